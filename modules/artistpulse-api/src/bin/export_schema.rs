//! Print JSON Schemas for every record type served by the API.

use anyhow::Result;
use schemars::schema_for;

use artistpulse_common::{
    ArtistIdentity, ChannelStats, CommentRecord, EventRecord, TrackRecord, TrendPoint,
};

fn main() -> Result<()> {
    let schemas = serde_json::json!({
        "ArtistIdentity": schema_for!(ArtistIdentity),
        "TrackRecord": schema_for!(TrackRecord),
        "ChannelStats": schema_for!(ChannelStats),
        "CommentRecord": schema_for!(CommentRecord),
        "EventRecord": schema_for!(EventRecord),
        "TrendPoint": schema_for!(TrendPoint),
    });
    println!("{}", serde_json::to_string_pretty(&schemas)?);
    Ok(())
}
