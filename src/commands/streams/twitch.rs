//! Minimal Twitch Helix client for the stream-alert poller: app-token
//! auth (client-credentials grant) and the Get Streams endpoint. Base
//! URLs are injectable so tests can point at a local mock server.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::HTTP_CLIENT;
use crate::config::TwitchCredentials;

pub const HELIX_BASE: &str = "https://api.twitch.tv/helix";
pub const AUTH_BASE: &str = "https://id.twitch.tv";

#[derive(Error, Debug)]
pub enum TwitchError {
    #[error("twitch request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("twitch auth failed with status {0}")]
    Auth(StatusCode),

    #[error("helix returned status {0}")]
    Status(StatusCode),
}

/// One live stream as reported by Helix.
#[derive(Clone, Debug, Deserialize)]
pub struct LiveStream {
    pub user_login: String,
    pub user_name: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Deserialize)]
struct StreamsResponse {
    data: Vec<LiveStream>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct TwitchClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    helix_base: String,
    auth_base: String,
    /// Cached app access token; `None` forces a refresh on next use.
    token: Mutex<Option<String>>,
}

impl TwitchClient {
    pub fn new(creds: &TwitchCredentials) -> Self {
        Self::with_base_urls(creds, HELIX_BASE, AUTH_BASE)
    }

    pub fn with_base_urls(creds: &TwitchCredentials, helix_base: &str, auth_base: &str) -> Self {
        Self {
            http: HTTP_CLIENT.clone(),
            client_id: creds.client_id.clone(),
            client_secret: creds.client_secret.clone(),
            helix_base: helix_base.trim_end_matches('/').to_string(),
            auth_base: auth_base.trim_end_matches('/').to_string(),
            token: Mutex::new(None),
        }
    }

    /// Which of `logins` are currently live. Logins are batched 100 per
    /// Helix request; a 401 triggers one token refresh and retry.
    pub async fn live_streams(&self, logins: &[String]) -> Result<Vec<LiveStream>, TwitchError> {
        let mut live = Vec::new();
        for chunk in logins.chunks(100) {
            let mut response = self.get_streams(chunk).await?;
            if response.status() == StatusCode::UNAUTHORIZED {
                debug!("helix token expired, refreshing");
                self.token.lock().await.take();
                response = self.get_streams(chunk).await?;
            }
            if !response.status().is_success() {
                return Err(TwitchError::Status(response.status()));
            }
            live.extend(response.json::<StreamsResponse>().await?.data);
        }
        Ok(live)
    }

    async fn get_streams(&self, logins: &[String]) -> Result<reqwest::Response, TwitchError> {
        let token = self.token().await?;
        let query: Vec<(&str, &str)> = logins
            .iter()
            .map(|login| ("user_login", login.as_str()))
            .collect();
        Ok(self
            .http
            .get(format!("{}/streams", self.helix_base))
            .header("Client-Id", &self.client_id)
            .bearer_auth(token)
            .query(&query)
            .send()
            .await?)
    }

    async fn token(&self) -> Result<String, TwitchError> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref() {
            return Ok(token.clone());
        }
        let response = self
            .http
            .post(format!("{}/oauth2/token", self.auth_base))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(TwitchError::Auth(response.status()));
        }
        let token = response.json::<TokenResponse>().await?.access_token;
        *guard = Some(token.clone());
        Ok(token)
    }
}
