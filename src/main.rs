use clap::Parser;
use serde_json::Value;
use winclean_client::config::cli::{patch_from_pairs, Command, ConfigCommand};
use winclean_client::utils::{logger, validation::Validate};
use winclean_client::{ApiClient, Cli, ClientError, DiskCleanerApi, RouteTable};

fn print_json(value: &Value) -> winclean_client::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> winclean_client::Result<()> {
    let config = cli.client_config()?;
    config.validate()?;
    tracing::debug!("Client config: {:?}", config);

    let api = ApiClient::new(config)?;

    match cli.command {
        Command::Drives => print_json(&api.get_disk_drives().await?),
        Command::Usage { drive } => print_json(&api.get_disk_usage(&drive).await?),
        Command::Config(ConfigCommand::Get) => print_json(&api.get_config().await?),
        Command::Config(ConfigCommand::Set { pairs }) => {
            let patch = patch_from_pairs(&pairs);
            tracing::info!("Updating {} setting(s)", patch.len());
            print_json(&api.update_config(&patch).await?)
        }
        Command::LargeFiles(args) => print_json(&api.get_large_files(&args.to_params()).await?),
        Command::RebuildIndex { drive } => {
            tracing::info!("Requesting index rebuild for {}", drive);
            print_json(&api.rebuild_index(&drive).await?)
        }
        Command::Health => print_json(&api.health().await?),
        Command::PickFolder { initial_dir } => {
            let path = api.pick_folder(&initial_dir).await?;
            if path.is_empty() {
                tracing::info!("Folder picker cancelled");
            }
            println!("{}", path);
            Ok(())
        }
        Command::Routes => {
            let table = RouteTable::default();
            for route in table.routes() {
                println!("{:<10} {}", route.path(), route.name());
            }
            Ok(())
        }
        Command::View { path } => {
            let table = RouteTable::default();
            let page = table
                .load(&path)
                .ok_or(ClientError::RouteNotFound { path })?;
            print!("{}", page.render(&api).await?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if let Err(e) = run(cli).await {
        tracing::error!("❌ Command failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}
