use colored::Colorize;
use tabled::Table;

use crate::{
    analysis::{Analysis, TrackRecord},
    render::{
        ARTIST_COLOR, ChartColor, DECADE_COLOR, GENRE_COLOR, NO_GENRES, YEAR_COLOR, decade_label,
    },
    types::TrackTableRow,
};

/// Width of the longest bar, in characters.
pub const BAR_WIDTH: usize = 40;

pub fn report(analysis: &Analysis) -> String {
    let summary = &analysis.summary;
    let year_labels: Vec<(String, usize)> = analysis
        .by_year
        .iter()
        .map(|(year, count)| (year.to_string(), *count))
        .collect();
    let decade_labels: Vec<(String, usize)> = analysis
        .by_decade
        .iter()
        .map(|(decade, count)| (decade_label(*decade), *count))
        .collect();

    let mut out = String::new();
    out.push_str(&track_table(&analysis.tracks));
    out.push_str("\n\n");
    out.push_str(&bar_chart("Songs by Year", &year_labels, YEAR_COLOR));
    out.push('\n');
    out.push_str(&bar_chart("Songs by Decade", &decade_labels, DECADE_COLOR));
    out.push('\n');
    if analysis.top_genres.is_empty() {
        out.push_str(&format!("{}\n", NO_GENRES.dimmed()));
    } else {
        out.push_str(&bar_chart(
            &format!("Top {} Genres", analysis.top_genres.len()),
            &analysis.top_genres,
            GENRE_COLOR,
        ));
    }
    if !analysis.top_artists.is_empty() {
        out.push('\n');
        out.push_str(&bar_chart(
            &format!("Top {} Artists", analysis.top_artists.len()),
            &analysis.top_artists,
            ARTIST_COLOR,
        ));
    }
    out.push_str(&format!(
        "\nTotal songs: {total}\tYears: {earliest}-{latest}\tMost common decade: {peak} ({count})\n",
        total = summary.total,
        earliest = summary.earliest,
        latest = summary.latest,
        peak = decade_label(summary.peak_decade),
        count = summary.peak_decade_count,
    ));
    out
}

/// Table of tracks in the given order.
pub fn track_table(tracks: &[TrackRecord]) -> String {
    let rows: Vec<TrackTableRow> = tracks
        .iter()
        .map(|t| TrackTableRow {
            year: t.year,
            name: sanitize(&t.name),
            artist: sanitize(&t.artist),
            album: sanitize(&t.album),
            decade: decade_label(t.decade),
        })
        .collect();

    Table::new(rows).to_string()
}

/// Horizontal bars, scaled so the largest count spans [`BAR_WIDTH`].
pub fn bar_chart(title: &str, bins: &[(String, usize)], color: ChartColor) -> String {
    let max = bins.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let label_width = bins
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let (r, g, b) = color.rgb;

    let mut out = format!("{}\n", title.bold());
    for (label, count) in bins {
        let bar = "█".repeat(bar_length(*count, max, BAR_WIDTH));
        out.push_str(&format!(
            "{label:>width$} │ {bar} {count}\n",
            label = sanitize(label),
            width = label_width,
            bar = bar.truecolor(r, g, b),
        ));
    }
    out
}

/// Non-zero counts always get at least one cell.
pub fn bar_length(count: usize, max: usize, width: usize) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    ((count * width + max / 2) / max).max(1)
}

/// Drops control characters so track metadata cannot emit terminal escapes.
pub fn sanitize(value: &str) -> String {
    value.chars().filter(|c| !c.is_control()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_width() {
        assert_eq!(bar_length(10, 10, 40), 40);
        assert_eq!(bar_length(5, 10, 40), 20);
        assert_eq!(bar_length(1, 1000, 40), 1);
        assert_eq!(bar_length(0, 10, 40), 0);
        assert_eq!(bar_length(0, 0, 40), 0);
    }

    #[test]
    fn escape_sequences_are_removed() {
        assert_eq!(sanitize("Song\u{1b}[31mRed"), "Song[31mRed");
        assert_eq!(sanitize("Tab\tName"), "TabName");
        assert_eq!(sanitize("Beyoncé"), "Beyoncé");
    }
}
