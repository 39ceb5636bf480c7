pub mod error;
pub mod types;

pub use error::{Result, SpotifyError};
pub use types::{Album, Artist, Track};

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use types::{ArtistSearchResponse, TokenResponse, TopTracksResponse};

const API_BASE_URL: &str = "https://api.spotify.com/v1";
const ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";

/// Market used for top-track lookups.
const TOP_TRACKS_MARKET: &str = "US";

/// Refresh the token this long before the provider says it expires.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

pub struct SpotifyClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    api_base_url: String,
    accounts_base_url: String,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    pub fn new(client_id: String, client_secret: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            client_id,
            client_secret,
            api_base_url: API_BASE_URL.to_string(),
            accounts_base_url: ACCOUNTS_BASE_URL.to_string(),
            token: Mutex::new(None),
        })
    }

    /// Point the client at a different API/accounts host (local stubs).
    pub fn with_base_urls(mut self, api_base_url: &str, accounts_base_url: &str) -> Self {
        self.api_base_url = api_base_url.trim_end_matches('/').to_string();
        self.accounts_base_url = accounts_base_url.trim_end_matches('/').to_string();
        self
    }

    /// Search artists by free-text name. Results keep provider relevance order.
    pub async fn search_artists(&self, query: &str) -> Result<Vec<Artist>> {
        tracing::debug!(query, "spotify: searching artists");
        let url = format!("{}/search", self.api_base_url);
        let resp: ArtistSearchResponse = self
            .get_json(&url, &[("q", query), ("type", "artist")])
            .await?;
        tracing::debug!(count = resp.artists.items.len(), "spotify: artist search returned");
        Ok(resp.artists.items)
    }

    /// Top tracks for an artist. The provider caps the list (currently 10).
    pub async fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<Track>> {
        tracing::debug!(artist_id, "spotify: fetching top tracks");
        let url = format!("{}/artists/{}/top-tracks", self.api_base_url, artist_id);
        let resp: TopTracksResponse = self
            .get_json(&url, &[("market", TOP_TRACKS_MARKET)])
            .await?;
        Ok(resp.tracks)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let token = self.access_token().await?;
        let resp = self
            .client
            .get(url)
            .bearer_auth(&token)
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SpotifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Return a valid bearer token, requesting a new one when the cached token
    /// is missing or about to expire.
    async fn access_token(&self) -> Result<String> {
        let mut guard = self.token.lock().await;
        if let Some(cached) = guard.as_ref() {
            if Instant::now() < cached.expires_at {
                return Ok(cached.access_token.clone());
            }
        }

        tracing::debug!("spotify: requesting client-credentials token");
        let url = format!("{}/api/token", self.accounts_base_url);
        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SpotifyError::Auth(format!("status {}: {}", status.as_u16(), body)));
        }

        let token: TokenResponse = resp.json().await?;
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *guard = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }
}
