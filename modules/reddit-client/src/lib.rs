pub mod error;
pub mod types;

pub use error::{RedditError, Result};
pub use types::{Comment, CommentNode, CommentTree, Listing, MoreComments, Submission};

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use types::{LinkThing, TokenResponse};

const OAUTH_BASE_URL: &str = "https://oauth.reddit.com";
const WWW_BASE_URL: &str = "https://www.reddit.com";

/// Reddit rejects larger page sizes.
pub const MAX_SEARCH_LIMIT: u32 = 100;

const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

pub struct RedditClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    oauth_base_url: String,
    www_base_url: String,
    token: Mutex<Option<CachedToken>>,
}

impl RedditClient {
    pub fn new(
        client_id: String,
        client_secret: String,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            client_id,
            client_secret,
            oauth_base_url: OAUTH_BASE_URL.to_string(),
            www_base_url: WWW_BASE_URL.to_string(),
            token: Mutex::new(None),
        })
    }

    pub fn with_base_urls(mut self, oauth_base_url: &str, www_base_url: &str) -> Self {
        self.oauth_base_url = oauth_base_url.trim_end_matches('/').to_string();
        self.www_base_url = www_base_url.trim_end_matches('/').to_string();
        self
    }

    /// Search a subreddit (`"all"` for the global corpus). `limit` is clamped
    /// to [`MAX_SEARCH_LIMIT`].
    pub async fn search(&self, subreddit: &str, query: &str, limit: u32) -> Result<Vec<Submission>> {
        let limit = limit.min(MAX_SEARCH_LIMIT).to_string();
        tracing::debug!(subreddit, query, %limit, "reddit: searching");

        let url = format!("{}/r/{}/search", self.oauth_base_url, subreddit);
        let listing: Listing<LinkThing> = self
            .get_json(
                &url,
                &[
                    ("q", query),
                    ("limit", &limit),
                    ("sort", "relevance"),
                    ("t", "all"),
                    ("restrict_sr", "on"),
                    ("raw_json", "1"),
                ],
            )
            .await?;

        let submissions: Vec<Submission> = listing
            .data
            .children
            .into_iter()
            .filter(|t| t.kind == "t3")
            .map(|t| t.data)
            .collect();
        tracing::debug!(count = submissions.len(), "reddit: search returned");
        Ok(submissions)
    }

    /// Fetch one thread's comment forest as served on the first page. "Load
    /// more" placeholders are returned unexpanded.
    pub async fn comment_tree(&self, submission_id: &str) -> Result<CommentTree> {
        let url = format!("{}/comments/{}", self.oauth_base_url, submission_id);
        let (post, comments): (Listing<LinkThing>, Listing<CommentNode>) =
            self.get_json(&url, &[("raw_json", "1")]).await?;

        Ok(CommentTree {
            submission: post.data.children.into_iter().next().map(|t| t.data),
            roots: comments.data.children,
        })
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
            return Err(RedditError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// App-only OAuth token, cached until shortly before expiry.
    async fn access_token(&self) -> Result<String> {
        let mut guard = self.token.lock().await;
        if let Some(cached) = guard.as_ref() {
            if Instant::now() < cached.expires_at {
                return Ok(cached.access_token.clone());
            }
        }

        tracing::debug!("reddit: requesting app-only token");
        let url = format!("{}/api/v1/access_token", self.www_base_url);
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
            return Err(RedditError::Auth(format!("status {}: {}", status.as_u16(), body)));
        }

        let body = resp.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)?;
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *guard = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }
}
