use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// One hit of `search.list` restricted to `type=channel`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: ResourceId,
    pub snippet: Option<Snippet>,
}

impl SearchResult {
    pub fn channel_id(&self) -> Option<&str> {
        self.id.channel_id.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceId {
    pub kind: Option<String>,
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Snippet {
    pub title: Option<String>,
    #[serde(rename = "channelTitle")]
    pub channel_title: Option<String>,
}

/// One item of `channels.list` with `part=statistics`.
#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    pub statistics: Option<ChannelStatistics>,
}

/// Counters as returned by the API: unsigned integers encoded as strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: Option<String>,
    #[serde(rename = "hiddenSubscriberCount", default)]
    pub hidden_subscriber_count: bool,
    #[serde(rename = "videoCount")]
    pub video_count: Option<String>,
}
