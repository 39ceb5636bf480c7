//! Plain-text rendering of a profile snapshot for the terminal.

use std::fmt::Write;

use artistpulse_aggregator::views;
use artistpulse_aggregator::ProfileSnapshot;

pub struct DashboardOptions {
    pub top_tracks: usize,
    pub top_comments: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            top_tracks: views::DEFAULT_TOP_TRACKS,
            top_comments: views::DEFAULT_TOP_COMMENTS,
        }
    }
}

const BAR_WIDTH: usize = 30;

pub fn render(snapshot: &ProfileSnapshot, opts: &DashboardOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_dashboard(&mut out, snapshot, opts);
    out
}

fn write_dashboard(out: &mut String, snap: &ProfileSnapshot, opts: &DashboardOptions) -> std::fmt::Result {
    let metrics = views::quick_metrics(&snap.identity, &snap.channel, &snap.events);

    writeln!(out, "=== {} ===", snap.identity.name)?;
    writeln!(out, "Followers:        {}", metrics.followers)?;
    writeln!(out, "Subscribers:      {}", metrics.subscribers)?;
    writeln!(out, "Upcoming events:  {}", metrics.upcoming_events)?;

    writeln!(out, "\n--- Top tracks ---")?;
    let top = views::top_tracks(&snap.tracks, opts.top_tracks);
    if top.is_empty() {
        writeln!(out, "(no data)")?;
    }
    for (i, t) in top.iter().enumerate() {
        writeln!(out, "{:>2}. {:<40} {:>3}  {}", i + 1, t.name, t.popularity, t.release_date)?;
    }
    if let Some(s) = views::duration_summary(&snap.tracks) {
        writeln!(
            out,
            "Duration (s): min {:.0}  q1 {:.0}  median {:.0}  q3 {:.0}  max {:.0}",
            s.min / 1000.0,
            s.q1 / 1000.0,
            s.median / 1000.0,
            s.q3 / 1000.0,
            s.max / 1000.0
        )?;
    }

    writeln!(out, "\n--- Channel ---")?;
    let bars = views::channel_metric_bars(&snap.channel);
    if bars.is_empty() {
        writeln!(out, "(no data)")?;
    }
    for bar in bars {
        writeln!(out, "{:<12} {}", bar.metric, bar.count)?;
    }

    writeln!(out, "\n--- Sentiment ---")?;
    if snap.comments.is_empty() {
        writeln!(out, "(no data)")?;
    } else {
        let histogram = views::sentiment_histogram(&snap.comments, views::SENTIMENT_BINS);
        let peak = histogram.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        for bin in &histogram {
            let len = bin.count * BAR_WIDTH / peak;
            writeln!(out, "{:>5.2} {}", bin.lower, "#".repeat(len))?;
        }
        writeln!(out, "\nTop comments:")?;
        for c in views::top_comments(&snap.comments, opts.top_comments) {
            writeln!(out, "[{:>5}] ({:+.2}) {}", c.score, c.sentiment, one_line(&c.body, 80))?;
        }
    }

    writeln!(out, "\n--- Events ---")?;
    if snap.events.is_empty() {
        writeln!(out, "(no data)")?;
    }
    for e in snap.events.rows() {
        writeln!(out, "{}  {} @ {}, {}", e.date, e.name, e.venue, e.city)?;
    }

    writeln!(out, "\n--- Search interest ---")?;
    if snap.trends.is_empty() {
        writeln!(out, "(no data)")?;
    }
    for p in snap.trends.rows() {
        let marker = if p.is_partial { " (partial)" } else { "" };
        writeln!(out, "{}  {:>3}{}", p.date, p.interest, marker)?;
    }

    if !snap.failures.is_empty() {
        writeln!(out, "\n--- Failures ---")?;
        for f in &snap.failures {
            writeln!(out, "{}: {}", f.table, f.message)?;
        }
    }

    Ok(())
}

fn one_line(text: &str, max_chars: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{cut}...")
}
