use httpmock::prelude::*;
use regex::Regex;
use serde_json::json;
use std::time::Duration;
use winclean_client::{
    ApiClient, ClientConfig, ClientError, ConfigPatch, DiskCleanerApi, LargeFileQuery, QueryParams,
};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig::new(server.base_url())).unwrap()
}

#[tokio::test]
async fn test_get_disk_drives_returns_body_unchanged() {
    let server = MockServer::start();
    let body = json!([
        {"drive": "C:", "total_bytes": 512000000000u64, "used_bytes": 400000000000u64,
         "free_bytes": 112000000000u64, "free_percent": 21.88, "usn_available": true},
        {"drive": "D:", "extra": {"nested": [1, 2, 3]}}
    ]);
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/disk/drives")
            .header("content-type", "application/json");
        then.status(200).json_body(body.clone());
    });

    let result = client_for(&server).get_disk_drives().await.unwrap();

    mock.assert();
    assert_eq!(result, body);
}

#[tokio::test]
async fn test_get_disk_usage_percent_encodes_drive() {
    let server = MockServer::start();
    let body = json!({"drive": "C:", "free_percent": 12.5});
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path_matches(Regex::new(r"^/api/disk/usage/C%3A$").unwrap());
        then.status(200).json_body(body.clone());
    });

    let result = client_for(&server).get_disk_usage("C:").await.unwrap();

    mock.assert();
    assert_eq!(result, body);
}

#[tokio::test]
async fn test_get_disk_usage_not_found_propagates() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path_contains("/api/disk/usage/");
        then.status(404)
            .json_body(json!({"detail": "Drive not found or not accessible"}));
    });

    let err = client_for(&server).get_disk_usage("Q:").await.unwrap_err();

    mock.assert();
    match err {
        ClientError::Http(e) => assert_eq!(e.status().map(|s| s.as_u16()), Some(404)),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_get_disk_usage_empty_drive_is_sent_anyway() {
    // No mock registered for the bare prefix, so the server answers 404.
    let server = MockServer::start();

    let err = client_for(&server).get_disk_usage("").await.unwrap_err();

    assert!(matches!(err, ClientError::Http(ref e) if e.status().is_some()));
}

#[tokio::test]
async fn test_get_config() {
    let server = MockServer::start();
    let body = json!({"start_with_windows": false, "on_close": "quit", "cleanup_rules": []});
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/config");
        then.status(200).json_body(body.clone());
    });

    let result = client_for(&server).get_config().await.unwrap();

    assert_eq!(mock.hits(), 1);
    assert_eq!(result, body);
}

#[tokio::test]
async fn test_update_config_posts_partial_body() {
    let server = MockServer::start();
    let updated = json!({"start_with_windows": true, "on_close": "minimize_to_tray"});
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/config")
            .header("content-type", "application/json")
            .json_body(json!({"start_with_windows": true}));
        then.status(200).json_body(updated.clone());
    });

    let mut partial = ConfigPatch::new();
    partial.insert("start_with_windows".to_string(), json!(true));
    let result = client_for(&server).update_config(&partial).await.unwrap();

    mock.assert();
    assert_eq!(result, updated);
}

#[tokio::test]
async fn test_get_large_files_without_params() {
    let server = MockServer::start();
    let body = json!({"items": [], "limit": 100, "offset": 0});
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/scan/large-files");
        then.status(200).json_body(body.clone());
    });

    let result = client_for(&server)
        .get_large_files(&QueryParams::new())
        .await
        .unwrap();

    mock.assert();
    assert_eq!(result, body);
}

#[tokio::test]
async fn test_get_large_files_forwards_params() {
    let server = MockServer::start();
    let body = json!({"items": [{"path": "D:\\movie.mkv", "size_bytes": 4294967296u64, "mtime_ns": 1}]});
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/scan/large-files")
            .query_param("minSizeMb", "100");
        then.status(200).json_body(body.clone());
    });

    let mut params = QueryParams::new();
    params.insert("minSizeMb".to_string(), json!(100));
    let result = client_for(&server).get_large_files(&params).await.unwrap();

    mock.assert();
    assert_eq!(result, body);
}

#[tokio::test]
async fn test_get_large_files_sends_whole_floats_as_integers() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/scan/large-files")
            .query_param("min_size_mb", "100")
            .query_param("limit", "10");
        then.status(200).json_body(json!({"items": [], "limit": 10, "offset": 0}));
    });

    let mut params = QueryParams::new();
    params.insert("min_size_mb".to_string(), json!(100.0));
    params.insert("limit".to_string(), json!(10.0));
    client_for(&server).get_large_files(&params).await.unwrap();

    mock.assert();
}

#[tokio::test]
async fn test_get_large_files_with_typed_query() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/scan/large-files")
            .query_param("drive", "C:")
            .query_param("min_size_mb", "500")
            .query_param("extensions", "mp4,iso")
            .query_param("limit", "10");
        then.status(200).json_body(json!({"items": [], "limit": 10, "offset": 0}));
    });

    let params = LargeFileQuery::new()
        .drive("C:")
        .min_size_mb(500.0)
        .extensions(["mp4", "iso"])
        .limit(10)
        .into_params();
    client_for(&server).get_large_files(&params).await.unwrap();

    mock.assert();
}

#[tokio::test]
async fn test_rebuild_index_posts_drive() {
    let server = MockServer::start();
    let body = json!({"status": "started", "drive": "C:"});
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/scan/rebuild-index")
            .json_body(json!({"drive": "C:"}));
        then.status(200).json_body(body.clone());
    });

    let result = client_for(&server).rebuild_index("C:").await.unwrap();

    mock.assert();
    assert_eq!(result, body);
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/health");
        then.status(200).json_body(json!({"status": "ok"}));
    });

    let result = client_for(&server).health().await.unwrap();

    mock.assert();
    assert_eq!(result, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_pick_folder_returns_path() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/pick-folder")
            .query_param("initial_dir", "/home");
        then.status(200).json_body(json!({"path": "/home/x"}));
    });

    let path = client_for(&server).pick_folder("/home").await.unwrap();

    mock.assert();
    assert_eq!(path, "/home/x");
}

#[tokio::test]
async fn test_pick_folder_falls_back_to_empty_string() {
    for body in [json!({}), json!({"path": null}), json!({"path": ""})] {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/pick-folder")
                .query_param_exists("initial_dir");
            then.status(200).json_body(body.clone());
        });

        let path = client_for(&server).pick_folder("").await.unwrap();

        mock.assert();
        assert_eq!(path, "", "body {} should yield an empty path", body);
    }
}

#[tokio::test]
async fn test_each_call_sends_exactly_one_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/health");
        then.status(503);
    });

    let api = client_for(&server);
    assert!(api.health().await.is_err());
    assert!(api.health().await.is_err());

    // No retries: one hit per call.
    assert_eq!(mock.hits(), 2);
}

#[tokio::test]
async fn test_server_error_propagates() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/config");
        then.status(422).json_body(json!({"detail": [{"msg": "bad"}]}));
    });

    let err = client_for(&server)
        .update_config(&ConfigPatch::new())
        .await
        .unwrap_err();

    match err {
        ClientError::Http(e) => assert_eq!(e.status().map(|s| s.as_u16()), Some(422)),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_json_propagates() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/disk/drives");
        then.status(200).body("<html>not json</html>");
    });

    let err = client_for(&server).get_disk_drives().await.unwrap_err();

    assert!(matches!(err, ClientError::Http(ref e) if e.is_decode()));
}

#[tokio::test]
async fn test_connection_refused_propagates() {
    // Port 1 is reserved and nothing listens there.
    let api = ApiClient::new(ClientConfig::new("http://127.0.0.1:1")).unwrap();

    let err = api.health().await.unwrap_err();

    assert!(matches!(err, ClientError::Http(ref e) if e.is_connect()));
}

#[tokio::test]
async fn test_timeout_rejects_every_operation() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path_matches(Regex::new("^/api/").unwrap());
        then.status(200)
            .delay(Duration::from_millis(2500))
            .json_body(json!({"path": "/late"}));
    });

    let api = ApiClient::new(ClientConfig::new(server.base_url()).with_timeout(1)).unwrap();
    let patch = ConfigPatch::new();
    let params = QueryParams::new();

    let (drives, usage, config, update, large, rebuild, health, pick) = tokio::join!(
        api.get_disk_drives(),
        api.get_disk_usage("C:"),
        api.get_config(),
        api.update_config(&patch),
        api.get_large_files(&params),
        api.rebuild_index("C:"),
        api.health(),
        api.pick_folder(""),
    );

    let errors = [
        drives.unwrap_err(),
        usage.unwrap_err(),
        config.unwrap_err(),
        update.unwrap_err(),
        large.unwrap_err(),
        rebuild.unwrap_err(),
        health.unwrap_err(),
        pick.unwrap_err(),
    ];
    for err in errors {
        assert!(
            matches!(err, ClientError::Http(ref e) if e.is_timeout()),
            "expected timeout, got {:?}",
            err
        );
    }
}
