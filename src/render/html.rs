use crate::{
    analysis::{Analysis, TrackRecord},
    render::{
        ARTIST_COLOR, ChartColor, DECADE_COLOR, GENRE_COLOR, NO_GENRES, YEAR_COLOR, decade_label,
    },
};

const CHART_WIDTH: f64 = 960.0;
const CHART_HEIGHT: f64 = 400.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_LEFT: f64 = 40.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;
const BAR_GAP: f64 = 0.1;

const STYLE: &str = r#"
body { background: #121212; color: #FFFFFF; font-family: sans-serif; margin: 2rem; }
h1 { font-size: 1.6rem; }
.chart { margin-bottom: 2rem; }
.chart svg { background: transparent; width: 100%; height: auto; }
.chart text { fill: #FFFFFF; font-size: 11px; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #2A2A2A; padding: 0.4rem 0.6rem; text-align: left; }
th { color: #B3B3B3; }
.empty { color: #B3B3B3; }
"#;

/// Escapes text for element content and attribute values.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Self-contained HTML page with the histograms, the top genre and artist
/// charts and the track table.
pub fn report(analysis: &Analysis, playlist_id: &str, generated_at: &str) -> String {
    let year_bins: Vec<(String, usize)> = analysis
        .by_year
        .iter()
        .map(|(year, count)| (year.to_string(), *count))
        .collect();
    let decade_bins: Vec<(String, usize)> = analysis
        .by_decade
        .iter()
        .map(|(decade, count)| (decade_label(*decade), *count))
        .collect();

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!(
        "<title>Playlist {} by release year</title>\n<style>{STYLE}</style>\n</head>\n<body>\n",
        escape_html(playlist_id)
    ));
    page.push_str(&format!(
        "<h1>Playlist Analysis (Total Songs: {})</h1>\n<p>Generated {}</p>\n",
        analysis.summary.total,
        escape_html(generated_at)
    ));
    page.push_str(&histogram_svg("Songs by Year", "Year", &year_bins, YEAR_COLOR));
    page.push_str(&histogram_svg(
        "Songs by Decade",
        "Decade",
        &decade_bins,
        DECADE_COLOR,
    ));

    if analysis.top_genres.is_empty() {
        page.push_str(&format!("<p class=\"empty\">{NO_GENRES}</p>\n"));
    } else {
        page.push_str(&histogram_svg(
            &format!("Top {} Genres", analysis.top_genres.len()),
            "Genre",
            &analysis.top_genres,
            GENRE_COLOR,
        ));
    }
    if !analysis.top_artists.is_empty() {
        page.push_str(&histogram_svg(
            &format!("Top {} Artists", analysis.top_artists.len()),
            "Artist",
            &analysis.top_artists,
            ARTIST_COLOR,
        ));
    }

    page.push_str(&track_table(&analysis.tracks));
    page.push_str("</body>\n</html>\n");
    page
}

pub fn track_table(tracks: &[TrackRecord]) -> String {
    let mut html = String::from(
        "<table>\n<thead>\n<tr><th>Year</th><th>Song Name</th><th>Author</th><th>Album</th><th>Decade</th></tr>\n</thead>\n<tbody>\n",
    );

    for track in tracks {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            track.year,
            escape_html(&track.name),
            escape_html(&track.artist),
            escape_html(&track.album),
            decade_label(track.decade),
        ));
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

/// Vertical bar histogram on a transparent background.
pub fn histogram_svg(
    title: &str,
    axis_label: &str,
    bins: &[(String, usize)],
    color: ChartColor,
) -> String {
    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let max = bins.iter().map(|(_, count)| *count).max().unwrap_or(0).max(1) as f64;
    let slot = plot_width / bins.len().max(1) as f64;
    let bar_width = slot * (1.0 - BAR_GAP);
    let title = escape_html(title);

    let mut svg = format!(
        "<div class=\"chart\">\n<svg viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\" role=\"img\" aria-label=\"{title}\">\n\
         <text x=\"{x}\" y=\"20\" text-anchor=\"middle\" font-size=\"16\">{title}</text>\n\
         <line x1=\"{MARGIN_LEFT}\" y1=\"{y}\" x2=\"{x2}\" y2=\"{y}\" stroke=\"#555555\"/>\n",
        x = CHART_WIDTH / 2.0,
        y = MARGIN_TOP + plot_height,
        x2 = MARGIN_LEFT + plot_width,
    );

    for (i, (label, count)) in bins.iter().enumerate() {
        let height = *count as f64 / max * plot_height;
        let x = MARGIN_LEFT + i as f64 * slot + (slot - bar_width) / 2.0;
        let y = MARGIN_TOP + plot_height - height;
        let label = escape_html(label);
        svg.push_str(&format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{bar_width:.2}\" height=\"{height:.2}\" fill=\"{fill}\"><title>{label}: {count}</title></rect>\n\
             <text x=\"{cx:.2}\" y=\"{ly:.2}\" text-anchor=\"end\" transform=\"rotate(-90 {cx:.2} {ly:.2})\">{label}</text>\n",
            fill = color.hex,
            cx = x + bar_width / 2.0,
            ly = MARGIN_TOP + plot_height + 6.0,
        ));
    }

    svg.push_str(&format!(
        "<text x=\"{x}\" y=\"{y}\" text-anchor=\"middle\">{label}</text>\n</svg>\n</div>\n",
        x = CHART_WIDTH / 2.0,
        y = CHART_HEIGHT - 4.0,
        label = escape_html(axis_label)
    ));
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_is_escaped() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn histogram_draws_one_bar_per_bin() {
        let bins = vec![
            ("1990s".to_string(), 2),
            ("2000s".to_string(), 0),
            ("2010s".to_string(), 5),
        ];
        let svg = histogram_svg("Songs by Decade", "Decade", &bins, DECADE_COLOR);
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains("fill=\"#33C1FF\""));
        assert!(svg.contains("<title>2010s: 5</title>"));
    }
}
