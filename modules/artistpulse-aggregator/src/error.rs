use std::fmt;

use artistpulse_common::{FailurePolicy, Record, Table};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for aggregation operations.
pub type Result<T> = std::result::Result<T, AggregatorError>;

/// The upstream service a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Catalog,
    Video,
    Forum,
    Events,
    Trends,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Catalog => "catalog",
            Provider::Video => "video",
            Provider::Forum => "forum",
            Provider::Events => "events",
            Provider::Trends => "trends",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum AggregatorError {
    #[error("Invalid artist name: {0:?}")]
    InvalidArtistName(String),

    #[error("No catalog artist matches {0:?}")]
    IdentityNotFound(String),

    #[error("{provider} provider call failed: {source}")]
    ProviderCall {
        provider: Provider,
        #[source]
        source: anyhow::Error,
    },

    #[error("Malformed {provider} response: {message}")]
    MalformedUpstreamShape { provider: Provider, message: String },
}

impl AggregatorError {
    pub fn provider_call(provider: Provider, source: anyhow::Error) -> Self {
        AggregatorError::ProviderCall { provider, source }
    }

    pub fn malformed(provider: Provider, message: impl Into<String>) -> Self {
        AggregatorError::MalformedUpstreamShape {
            provider,
            message: message.into(),
        }
    }

    /// The provider responsible, for upstream failures.
    pub fn provider(&self) -> Option<Provider> {
        match self {
            AggregatorError::ProviderCall { provider, .. }
            | AggregatorError::MalformedUpstreamShape { provider, .. } => Some(*provider),
            _ => None,
        }
    }
}

/// Apply the failure policy to a fetch result. Under `Degrade`, upstream
/// failures are logged and replaced by an empty table; caller errors such as
/// an invalid name always pass through.
pub(crate) fn settle<R: Record>(policy: FailurePolicy, result: Result<Table<R>>) -> Result<Table<R>> {
    match result {
        Err(err) if policy == FailurePolicy::Degrade => match err.provider() {
            Some(provider) => {
                tracing::warn!(%provider, table = R::TABLE, error = %err, "Provider failed, returning empty table");
                Ok(Table::empty())
            }
            None => Err(err),
        },
        other => other,
    }
}
