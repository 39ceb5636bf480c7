use std::sync::Arc;

use artistpulse_common::{ArtistIdentity, CommentRecord, FailurePolicy, Table};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::error::{settle, AggregatorError, Provider, Result};
use crate::normalize;
use crate::sentiment::SentimentScorer;
use crate::traits::{ForumNode, ForumProvider, ForumThread};

/// Maximum threads taken from the forum search.
pub const THREAD_SEARCH_LIMIT: u32 = 100;

/// Forum comments mentioning the artist, each scored for sentiment.
///
/// Cost grows with threads × comments per thread; nothing here caps the
/// comment count, so callers that need bounded latency must limit upstream.
pub struct SocialSentimentFetcher {
    forum: Arc<dyn ForumProvider>,
    scorer: Arc<dyn SentimentScorer>,
    policy: FailurePolicy,
    concurrency: usize,
}

impl SocialSentimentFetcher {
    pub fn new(
        forum: Arc<dyn ForumProvider>,
        scorer: Arc<dyn SentimentScorer>,
        policy: FailurePolicy,
        concurrency: usize,
    ) -> Self {
        Self {
            forum,
            scorer,
            policy,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn fetch(&self, identity: &ArtistIdentity) -> Result<Table<CommentRecord>> {
        settle(self.policy, self.fetch_comments(&identity.name).await)
    }

    async fn fetch_comments(&self, query: &str) -> Result<Table<CommentRecord>> {
        let mut threads = self
            .forum
            .search_threads(query, THREAD_SEARCH_LIMIT)
            .await
            .map_err(|e| AggregatorError::provider_call(Provider::Forum, e))?;
        threads.truncate(THREAD_SEARCH_LIMIT as usize);
        debug!(query, threads = threads.len(), "Forum search returned");

        // `buffered` keeps thread order while expanding several at once.
        let expanded: Vec<(ForumThread, anyhow::Result<Vec<ForumNode>>)> = stream::iter(threads)
            .map(|thread| async move {
                let nodes = self.forum.thread_comments(&thread.id).await;
                (thread, nodes)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut rows = Vec::new();
        let mut discarded_total = 0;
        for (thread, nodes) in expanded {
            let nodes = match nodes {
                Ok(nodes) => nodes,
                Err(e) => match self.policy {
                    FailurePolicy::Degrade => {
                        warn!(thread_id = thread.id.as_str(), error = %e, "Skipping thread, comments unavailable");
                        continue;
                    }
                    FailurePolicy::Propagate => {
                        return Err(AggregatorError::provider_call(Provider::Forum, e));
                    }
                },
            };

            let (comments, discarded) = normalize::flatten_zero_depth(nodes);
            discarded_total += discarded;
            rows.extend(
                comments
                    .into_iter()
                    .map(|c| normalize::comment_record(c, self.scorer.as_ref())),
            );
        }

        info!(
            query,
            comments = rows.len(),
            discarded_placeholders = discarded_total,
            "Scored forum comments"
        );
        Ok(Table::new(rows))
    }
}
