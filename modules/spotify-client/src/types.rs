use serde::Deserialize;

/// Response of `POST /api/token` for the client-credentials grant.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

/// Envelope of `GET /v1/search?type=artist`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistSearchResponse {
    pub artists: Paging<Artist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub followers: Option<Followers>,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl Artist {
    pub fn follower_count(&self) -> Option<u64> {
        self.followers.as_ref().map(|f| f.total)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

/// Envelope of `GET /v1/artists/{id}/top-tracks`.
#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub popularity: u32,
    pub duration_ms: u64,
    pub album: Album,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    pub name: Option<String>,
    /// "1981", "1981-12" or "1981-12-15" depending on `release_date_precision`.
    pub release_date: String,
    pub release_date_precision: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_search_deserializes() {
        let json = r#"{
            "artists": {
                "href": "https://api.spotify.com/v1/search?query=SUGA&type=artist",
                "items": [
                    {"id": "0ebNdVaOfp6N0oZ1guIxM8", "name": "SUGA",
                     "followers": {"href": null, "total": 12345678},
                     "popularity": 78, "genres": ["k-pop"]}
                ],
                "total": 1
            }
        }"#;
        let resp: ArtistSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.artists.items.len(), 1);
        assert_eq!(resp.artists.items[0].id, "0ebNdVaOfp6N0oZ1guIxM8");
        assert_eq!(resp.artists.items[0].follower_count(), Some(12345678));
    }

    #[test]
    fn top_tracks_keep_release_date_granularity() {
        let json = r#"{
            "tracks": [
                {"id": "a", "name": "Haegeum", "popularity": 70, "duration_ms": 181000,
                 "album": {"name": "D-DAY", "release_date": "2023-04-21", "release_date_precision": "day"}},
                {"id": "b", "name": "Agust D", "popularity": 55, "duration_ms": 220000,
                 "album": {"name": "Agust D", "release_date": "2016", "release_date_precision": "year"}}
            ]
        }"#;
        let resp: TopTracksResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.tracks[0].album.release_date, "2023-04-21");
        assert_eq!(resp.tracks[1].album.release_date, "2016");
    }

    #[test]
    fn empty_search_items() {
        let json = r#"{"artists": {"items": [], "total": 0}}"#;
        let resp: ArtistSearchResponse = serde_json::from_str(json).unwrap();
        assert!(resp.artists.items.is_empty());
    }
}
