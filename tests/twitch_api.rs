//! Exercises the Helix client against a local mock server: token grant,
//! stream lookup, and the refresh-and-retry path on an expired token.

use crimson::commands::streams::twitch::{TwitchClient, TwitchError};
use crimson::config::TwitchCredentials;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn creds() -> TwitchCredentials {
    TwitchCredentials {
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
    }
}

fn client_for(server: &MockServer) -> TwitchClient {
    TwitchClient::with_base_urls(
        &creds(),
        &format!("{}/helix", server.uri()),
        &server.uri(),
    )
}

fn token_response(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": token,
        "expires_in": 5011271,
        "token_type": "bearer",
    }))
}

#[tokio::test]
async fn fetches_token_then_queries_streams() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=test-client"))
        .respond_with(token_response("app-token"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/helix/streams"))
        .and(header("Authorization", "Bearer app-token"))
        .and(header("Client-Id", "test-client"))
        .and(query_param("user_login", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "user_login": "alice",
                "user_name": "Alice",
                "game_name": "Chess",
                "title": "ranked grind",
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let logins = vec!["alice".to_string(), "bob".to_string()];
    let live = client.live_streams(&logins).await.unwrap();

    assert_eq!(live.len(), 1);
    assert_eq!(live[0].user_login, "alice");
    assert_eq!(live[0].user_name, "Alice");
    assert_eq!(live[0].game_name, "Chess");
}

#[tokio::test]
async fn token_is_cached_across_polls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(token_response("app-token"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/helix/streams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let logins = vec!["alice".to_string()];
    assert!(client.live_streams(&logins).await.unwrap().is_empty());
    assert!(client.live_streams(&logins).await.unwrap().is_empty());
}

#[tokio::test]
async fn refreshes_token_after_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(token_response("fresh-token"))
        .expect(2)
        .mount(&server)
        .await;

    // First streams request hits an expired token; the retry succeeds.
    Mock::given(method("GET"))
        .and(path("/helix/streams"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/helix/streams"))
        .and(header("Authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "user_login": "alice", "user_name": "Alice" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let live = client
        .live_streams(&["alice".to_string()])
        .await
        .unwrap();
    assert_eq!(live.len(), 1);
    // game_name and title are optional in the Helix payload.
    assert_eq!(live[0].game_name, "");
    assert_eq!(live[0].title, "");
}

#[tokio::test]
async fn surfaces_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.live_streams(&["alice".to_string()]).await {
        Err(TwitchError::Auth(status)) => assert_eq!(status.as_u16(), 403),
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn no_requests_without_subscriptions() {
    // An empty login set must not even fetch a token.
    let server = MockServer::start().await;
    let client = client_for(&server);
    assert!(client.live_streams(&[]).await.unwrap().is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}
