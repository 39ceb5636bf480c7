use serde::Deserialize;

/// Envelope of `GET /discovery/v2/events.json`. `_embedded` is omitted
/// entirely when nothing matches.
#[derive(Debug, Clone, Deserialize)]
pub struct EventSearchResponse {
    #[serde(rename = "_embedded")]
    pub embedded: Option<EmbeddedEvents>,
    pub page: Option<Page>,
}

impl EventSearchResponse {
    pub fn into_events(self) -> Vec<Event> {
        self.embedded.map(|e| e.events).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddedEvents {
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub size: Option<u32>,
    #[serde(rename = "totalElements")]
    pub total_elements: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub id: Option<String>,
    pub name: Option<String>,
    pub dates: Option<Dates>,
    #[serde(rename = "_embedded")]
    pub embedded: Option<EventEmbedded>,
}

impl Event {
    pub fn start_date(&self) -> Option<&str> {
        self.dates
            .as_ref()?
            .start
            .as_ref()?
            .local_date
            .as_deref()
    }

    pub fn venues(&self) -> &[Venue] {
        self.embedded
            .as_ref()
            .map(|e| e.venues.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Dates {
    pub start: Option<Start>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Start {
    #[serde(rename = "localDate")]
    pub local_date: Option<String>,
    #[serde(rename = "dateTime")]
    pub date_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventEmbedded {
    #[serde(default)]
    pub venues: Vec<Venue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Venue {
    pub name: Option<String>,
    pub city: Option<City>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct City {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_with_and_without_venue() {
        let json = r#"{
            "_embedded": {"events": [
                {"id": "1", "name": "SUGA | Agust D TOUR",
                 "dates": {"start": {"localDate": "2023-04-26", "dateTime": "2023-04-27T00:00:00Z"}},
                 "_embedded": {"venues": [
                    {"name": "UBS Arena", "city": {"name": "Elmont"}},
                    {"name": "Second Venue", "city": {"name": "Elsewhere"}}
                 ]}},
                {"id": "2", "name": "Listening Party"}
            ]},
            "page": {"size": 10, "totalElements": 2}
        }"#;
        let resp: EventSearchResponse = serde_json::from_str(json).unwrap();
        let events = resp.into_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].start_date(), Some("2023-04-26"));
        assert_eq!(events[0].venues()[0].name.as_deref(), Some("UBS Arena"));
        assert_eq!(events[1].start_date(), None);
        assert!(events[1].venues().is_empty());
    }

    #[test]
    fn no_embedded_means_no_events() {
        let json = r#"{"page": {"size": 10, "totalElements": 0}}"#;
        let resp: EventSearchResponse = serde_json::from_str(json).unwrap();
        assert!(resp.into_events().is_empty());
    }
}
