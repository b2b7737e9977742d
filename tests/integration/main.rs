//! Integration tests for the status poller.
//!
//! Each test runs the poller against an in-process HTTP server bound to a
//! random loopback port.

mod fixture;

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use webapp_status::config::Config;
use webapp_status::display::Dashboard;
use webapp_status::render::{RenderFormat, HEALTH_UNAVAILABLE_MESSAGE, INFO_FAILURE_MESSAGE};
use webapp_status::status::{HttpStatusSource, StatusSource};
use webapp_status::StatusPoller;

use fixture::{FixtureServer, Reply};

fn test_config(base_url: String) -> Config {
    Config {
        status_base_url: base_url,
        http_timeout_ms: 2_000,
        http_connect_timeout_ms: 500,
        ..Config::default()
    }
}

fn poller_for(server: &FixtureServer) -> StatusPoller<HttpStatusSource> {
    let config = test_config(server.base_url());
    let source = HttpStatusSource::new(&config).unwrap();
    StatusPoller::from_config(source, Dashboard::new(), &config)
}

#[tokio::test]
async fn info_summary_from_live_endpoint() {
    let server = FixtureServer::start().await;
    server.set_info(Reply::Json(
        r#"{"environment":"prod","host":"h1","deployment":"blue"}"#.to_string(),
    ));
    let poller = poller_for(&server);

    poller.load_app_info().await;

    let content = poller.dashboard().app_info.content();
    assert_eq!(
        content,
        "Environment: prod\nHost: h1\nDeployment: blue\nVersion: 1.0.0"
    );
}

#[tokio::test]
async fn stock_backend_reply_renders() {
    let server = FixtureServer::start().await;
    let poller = poller_for(&server);

    poller.load_app_info().await;
    poller.check_health().await;

    assert!(poller
        .dashboard()
        .app_info
        .content()
        .contains("Azure App Service via GitHub Actions"));
    assert_eq!(poller.dashboard().health_status.content(), "✅ healthy");
}

#[tokio::test]
async fn info_non_json_body_is_failure() {
    let server = FixtureServer::start().await;
    server.set_info(Reply::Garbage);
    let poller = poller_for(&server);

    poller.load_app_info().await;

    assert_eq!(poller.dashboard().app_info.content(), INFO_FAILURE_MESSAGE);
}

#[tokio::test]
async fn info_partial_body_renders_placeholders() {
    let server = FixtureServer::start().await;
    server.set_info(Reply::Json(r#"{"environment":"prod"}"#.to_string()));
    let poller = poller_for(&server);

    poller.load_app_info().await;

    assert_eq!(
        poller.dashboard().app_info.content(),
        "Environment: prod\nHost: undefined\nDeployment: undefined\nVersion: 1.0.0"
    );
}

#[tokio::test]
async fn info_non_object_body_is_failure() {
    let server = FixtureServer::start().await;
    server.set_info(Reply::Json("[1]".to_string()));
    let source = HttpStatusSource::new(&test_config(server.base_url())).unwrap();

    let err = source.fetch_app_info().await.unwrap_err();
    assert_eq!(err.kind(), "decode");

    let poller = StatusPoller::new(source, Dashboard::new());
    poller.load_app_info().await;
    assert_eq!(poller.dashboard().app_info.content(), INFO_FAILURE_MESSAGE);
}

#[tokio::test]
async fn info_server_error_is_failure() {
    let server = FixtureServer::start().await;
    server.set_info(Reply::Status(StatusCode::INTERNAL_SERVER_ERROR));
    let poller = poller_for(&server);

    poller.load_app_info().await;

    assert_eq!(poller.dashboard().app_info.content(), INFO_FAILURE_MESSAGE);
}

#[tokio::test]
async fn health_ok_renders_glyph_and_status() {
    let server = FixtureServer::start().await;
    server.set_health(Reply::Json(r#"{"status":"ok"}"#.to_string()));
    let poller = poller_for(&server);

    poller.check_health().await;

    assert_eq!(poller.dashboard().health_status.content(), "✅ ok");
}

#[tokio::test]
async fn health_non_string_status_renders_json_text() {
    let server = FixtureServer::start().await;
    server.set_health(Reply::Json(r#"{"status":true}"#.to_string()));
    let poller = poller_for(&server);

    poller.check_health().await;

    assert_eq!(poller.dashboard().health_status.content(), "✅ true");
}

#[tokio::test]
async fn health_unavailable_status_is_failure() {
    let server = FixtureServer::start().await;
    server.set_health(Reply::Status(StatusCode::SERVICE_UNAVAILABLE));
    let source = HttpStatusSource::new(&test_config(server.base_url())).unwrap();

    let err = source.fetch_health().await.unwrap_err();
    assert_eq!(err.kind(), "status");

    let poller = StatusPoller::new(source, Dashboard::new());
    poller.check_health().await;
    assert_eq!(
        poller.dashboard().health_status.content(),
        format!("❌ {}", HEALTH_UNAVAILABLE_MESSAGE)
    );
}

#[tokio::test]
async fn server_gone_is_failure() {
    let server = FixtureServer::start().await;
    let poller = poller_for(&server);
    drop(server);
    // Let the aborted server task release the listener.
    tokio::time::sleep(Duration::from_millis(50)).await;

    poller.load_app_info().await;
    poller.check_health().await;

    assert_eq!(poller.dashboard().app_info.content(), INFO_FAILURE_MESSAGE);
    assert_eq!(
        poller.dashboard().health_status.content(),
        "❌ Service unavailable"
    );
}

#[tokio::test]
async fn html_format_over_http() {
    let server = FixtureServer::start().await;
    let config = Config {
        render_format: RenderFormat::Html,
        ..test_config(server.base_url())
    };
    let source = HttpStatusSource::new(&config).unwrap();
    let poller = StatusPoller::from_config(source, Dashboard::new(), &config);

    poller.check_health().await;

    assert_eq!(
        poller.dashboard().health_status.content(),
        "<p class=\"status-healthy\">✅ healthy</p>"
    );
}

#[tokio::test]
async fn schedule_picks_up_health_changes() {
    let server = FixtureServer::start().await;
    let poller = poller_for(&server).with_interval(Duration::from_millis(200));
    let mut health_rx = poller.dashboard().health_status.subscribe();
    let handle = poller.initialize();

    tokio::time::timeout(Duration::from_secs(5), health_rx.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(*health_rx.borrow_and_update(), "✅ healthy");

    server.set_health(Reply::Status(StatusCode::BAD_GATEWAY));
    tokio::time::timeout(Duration::from_secs(5), health_rx.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(*health_rx.borrow_and_update(), "❌ Service unavailable");

    server.set_health(Reply::Json(r#"{"status":"recovered"}"#.to_string()));
    tokio::time::timeout(Duration::from_secs(5), health_rx.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(*health_rx.borrow_and_update(), "✅ recovered");

    handle.shutdown().await;
}
