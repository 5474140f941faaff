use anyhow::Result;

use super::AuthClient;
use super::SignupRequest;

impl AuthClient {
    pub(crate) fn with_url(url: String) -> AuthClient {
        return AuthClient {
            url,
            timeout: "200".to_string(),
        };
    }
}

#[tokio::test]
async fn it_fetches_the_current_identity() -> Result<()> {
    let body = serde_json::json!({
        "username": "alice",
        "name": "Alice Example",
        "email": "alice@example.com",
        "subscription_plan": "Pro",
    })
    .to_string();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/auth/me")
        .match_header("authorization", "Bearer abc")
        .with_status(200)
        .with_body(body)
        .create();

    let client = AuthClient::with_url(server.url());
    let identity = client.me("abc").await?;
    mock.assert();

    assert_eq!(identity.username, "alice");
    assert_eq!(identity.display_name(), "Alice Example");
    assert_eq!(identity.plan(), "Pro");

    return Ok(());
}

#[tokio::test]
async fn it_rejects_expired_identities() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/auth/me")
        .with_status(401)
        .create();

    let client = AuthClient::with_url(server.url());
    let res = client.me("stale").await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_logs_in_with_form_credentials() -> Result<()> {
    let body = serde_json::json!({
        "access_token": "token-123",
        "token_type": "bearer",
        "user": {
            "username": "alice",
        },
    })
    .to_string();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/auth/login")
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("username".to_string(), "alice".to_string()),
            mockito::Matcher::UrlEncoded("password".to_string(), "hunter2".to_string()),
        ]))
        .with_status(200)
        .with_body(body)
        .create();

    let client = AuthClient::with_url(server.url());
    let res = client.login("alice", "hunter2").await?;
    mock.assert();

    assert_eq!(res.access_token, "token-123");
    assert_eq!(res.user.unwrap().username, "alice");

    return Ok(());
}

#[tokio::test]
async fn it_fails_login_with_bad_credentials() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/auth/login")
        .with_status(401)
        .create();

    let client = AuthClient::with_url(server.url());
    let res = client.login("alice", "wrong").await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_signs_up_new_accounts() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/auth/signup")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "email": "alice@example.com",
        })))
        .with_status(200)
        .with_body("{}")
        .create();

    let client = AuthClient::with_url(server.url());
    client
        .signup(&SignupRequest {
            name: "Alice Example".to_string(),
            email: "alice@example.com".to_string(),
            phone: "555-0100".to_string(),
            password: "hunter2".to_string(),
        })
        .await?;
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_resolves_the_google_login_url() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/auth/google/login")
        .with_status(200)
        .with_body(r#"{"url": "https://accounts.example.com/o/oauth2/auth"}"#)
        .create();

    let client = AuthClient::with_url(server.url());
    let url = client.google_login_url().await?;
    mock.assert();

    assert_eq!(url, "https://accounts.example.com/o/oauth2/auth");

    return Ok(());
}
