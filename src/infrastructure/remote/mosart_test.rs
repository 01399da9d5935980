use std::time::Duration;

use anyhow::Result;
use mockito::Matcher;

use super::MosartClient;
use crate::domain::models::BridgeError;
use crate::domain::models::RemoteClient;

fn rest_client(url: &str) -> MosartClient {
    return MosartClient::new(url, "secret", false, Duration::from_millis(200));
}

#[tokio::test]
async fn it_requests_under_the_rest_prefix() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/v1/status")
        .with_status(200)
        .with_body("{}")
        .create();

    let body = rest_client(&server.url()).get("status", &[]).await;

    assert_eq!(body.unwrap(), "{}");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_requests_under_the_web_prefix() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/mosart/api/v1/status")
        .with_status(200)
        .with_body("{}")
        .create();

    let client = MosartClient::new(&server.url(), "secret", true, Duration::from_millis(200));
    let body = client.get("status", &[]).await;

    assert!(body.is_ok());
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_sends_the_api_key_header() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/v1/status")
        .match_header("X-Api-Key", "secret")
        .with_status(200)
        .create();

    rest_client(&server.url()).get("status", &[]).await?;

    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_passes_query_parameters() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/v1/command/overlay-graphics/take-in")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".to_string(), "1".to_string()),
            Matcher::UrlEncoded("name".to_string(), "strap".to_string()),
        ]))
        .with_status(200)
        .create();

    let query = vec![
        ("id".to_string(), "1".to_string()),
        ("name".to_string(), "strap".to_string()),
    ];
    let res = rest_client(&server.url())
        .get("command/overlay-graphics/take-in", &query)
        .await;

    assert!(res.is_ok());
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_an_http_error_status() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/v1/status")
        .with_status(503)
        .create();

    let res = rest_client(&server.url()).get("status", &[]).await;

    assert!(matches!(res, Err(BridgeError::Status { status: 503, .. })));
    mock.assert();
}

#[tokio::test]
async fn it_fails_on_an_unreachable_host() {
    let client = rest_client("http://127.0.0.1:1");

    let res = client.get("status", &[]).await;

    assert!(matches!(res, Err(BridgeError::Transport { .. })));
}
