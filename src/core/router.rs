use crate::app::pages::{OverviewPage, RulesPage, SettingsPage};
use crate::domain::ports::Page;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Produces a page the first time its route is visited.
pub type PageFactory = fn() -> Arc<dyn Page>;

/// How locations map to URLs. Only path-based history (`/settings`) is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Path,
}

pub struct Route {
    path: &'static str,
    name: &'static str,
    factory: PageFactory,
    page: OnceLock<Arc<dyn Page>>,
}

impl Route {
    pub fn new(path: &'static str, name: &'static str, factory: PageFactory) -> Self {
        Self {
            path,
            name,
            factory,
            page: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_loaded(&self) -> bool {
        self.page.get().is_some()
    }

    /// The route's page, constructed on first call and reused afterwards.
    pub fn load(&self) -> Arc<dyn Page> {
        self.page
            .get_or_init(|| {
                tracing::debug!("Loading page for route '{}'", self.name);
                (self.factory)()
            })
            .clone()
    }

    fn matches(&self, path: &str) -> bool {
        let own = trim_trailing_slash(self.path);
        own.eq_ignore_ascii_case(path)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Static path-to-page table. There is no catch-all: unknown paths resolve
/// to `None`.
#[derive(Debug)]
pub struct RouteTable {
    history: HistoryMode,
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(
            HistoryMode::Path,
            vec![
                Route::new("/", "Overview", overview_page),
                Route::new("/settings", "Settings", settings_page),
                Route::new("/rules", "Rules", rules_page),
            ],
        )
    }
}

impl RouteTable {
    pub fn new(history: HistoryMode, routes: Vec<Route>) -> Self {
        Self { history, routes }
    }

    pub fn history(&self) -> HistoryMode {
        self.history
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Finds the route for a location. Query string and fragment are
    /// ignored, a trailing slash is optional and case does not matter.
    pub fn resolve(&self, location: &str) -> Option<&Route> {
        let path = normalize(location);
        self.routes.iter().find(|route| route.matches(path))
    }

    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// Link target for a named route under the table's history mode.
    pub fn href(&self, name: &str) -> Option<String> {
        let route = self.by_name(name)?;
        Some(match self.history {
            HistoryMode::Path => route.path.to_string(),
        })
    }

    /// Resolves `location` and loads its page.
    pub fn load(&self, location: &str) -> Option<Arc<dyn Page>> {
        self.resolve(location).map(Route::load)
    }
}

fn overview_page() -> Arc<dyn Page> {
    Arc::new(OverviewPage)
}

fn settings_page() -> Arc<dyn Page> {
    Arc::new(SettingsPage)
}

fn rules_page() -> Arc<dyn Page> {
    Arc::new(RulesPage)
}

fn normalize(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    if path.is_empty() {
        "/"
    } else {
        trim_trailing_slash(path)
    }
}

fn trim_trailing_slash(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some("") | None => path,
        Some(trimmed) => trimmed,
    }
}
