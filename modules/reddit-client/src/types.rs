use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

/// Reddit's generic paginated container (`kind: "Listing"`).
#[derive(Debug, Clone, Deserialize)]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData<T> {
    #[serde(default = "Vec::new")]
    pub children: Vec<T>,
    pub after: Option<String>,
}

/// A `t3` wrapper as it appears in search results.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkThing {
    pub kind: String,
    pub data: Submission,
}

/// A discussion thread (submission).
#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub subreddit: Option<String>,
    pub permalink: Option<String>,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub score: i64,
}

/// A child of a comment listing: either a real comment or a "load more"
/// placeholder.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum CommentNode {
    #[serde(rename = "t1")]
    Comment(Box<Comment>),
    #[serde(rename = "more")]
    More(MoreComments),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub body: String,
    pub author: Option<String>,
    #[serde(default)]
    pub score: i64,
    /// Seconds since the epoch, UTC. Reddit sends it as a float.
    pub created_utc: f64,
    #[serde(default, deserialize_with = "deserialize_replies")]
    pub replies: Option<Listing<CommentNode>>,
}

impl Comment {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_utc.trunc() as i64, 0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoreComments {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub children: Vec<String>,
}

/// `replies` is the empty string when a comment has no replies, a listing otherwise.
fn deserialize_replies<'de, D>(deserializer: D) -> Result<Option<Listing<CommentNode>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Replies {
        Listing(Listing<CommentNode>),
        Empty(String),
    }

    Ok(match Option::<Replies>::deserialize(deserializer)? {
        Some(Replies::Listing(listing)) => Some(listing),
        Some(Replies::Empty(_)) | None => None,
    })
}

/// The comment forest of one thread, as returned by `/comments/{id}`.
#[derive(Debug, Clone)]
pub struct CommentTree {
    pub submission: Option<Submission>,
    pub roots: Vec<CommentNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREAD: &str = r#"[
        {"kind": "Listing", "data": {"after": null, "children": [
            {"kind": "t3", "data": {"id": "abc", "title": "SUGA tour", "num_comments": 5, "score": 10}}
        ]}},
        {"kind": "Listing", "data": {"after": null, "children": [
            {"kind": "t1", "data": {"id": "c1", "body": "love it", "score": 4, "created_utc": 1700000000.0,
                "replies": {"kind": "Listing", "data": {"after": null, "children": [
                    {"kind": "t1", "data": {"id": "c1a", "body": "same", "score": 1, "created_utc": 1700000100.0, "replies": ""}},
                    {"kind": "more", "data": {"count": 7, "children": ["x", "y"]}}
                ]}}}},
            {"kind": "t1", "data": {"id": "c2", "body": "meh", "score": -2, "created_utc": 1700000200.0, "replies": ""}},
            {"kind": "more", "data": {"count": 30, "children": ["z"]}}
        ]}}
    ]"#;

    fn tree() -> CommentTree {
        let (post, comments): (Listing<LinkThing>, Listing<CommentNode>) =
            serde_json::from_str(THREAD).unwrap();
        CommentTree {
            submission: post.data.children.into_iter().next().map(|t| t.data),
            roots: comments.data.children,
        }
    }

    #[test]
    fn thread_pair_deserializes_with_placeholders() {
        let tree = tree();
        assert_eq!(tree.submission.unwrap().id, "abc");
        assert_eq!(tree.roots.len(), 3);
        assert!(matches!(tree.roots[2], CommentNode::More(ref m) if m.count == 30));
        let CommentNode::Comment(ref first) = tree.roots[0] else {
            panic!("expected a comment first");
        };
        let replies = first.replies.as_ref().unwrap();
        assert_eq!(replies.data.children.len(), 2);
    }

    #[test]
    fn created_utc_converts() {
        let c: Comment = serde_json::from_str(
            r#"{"id": "c", "body": "x", "score": 0, "created_utc": 1700000000.5, "replies": ""}"#,
        )
        .unwrap();
        assert_eq!(c.created_at().unwrap().timestamp(), 1_700_000_000);
        assert!(c.replies.is_none());
    }
}
