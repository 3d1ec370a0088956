//! Presentation of an [`crate::analysis::Analysis`].
//!
//! - [`terminal`] - colored bar charts and a `tabled` table for the CLI
//! - [`html`] - a self-contained dark themed report with SVG histograms
//! - [`csv`] - a flat export of the track table
//!
//! Track metadata is third-party data; every renderer neutralises it for
//! its target (control characters for terminals, markup for HTML, quoting
//! for CSV).

pub mod csv;
pub mod html;
pub mod terminal;

/// Fixed color of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartColor {
    pub hex: &'static str,
    pub rgb: (u8, u8, u8),
}

pub const YEAR_COLOR: ChartColor = ChartColor {
    hex: "#1DB954",
    rgb: (0x1D, 0xB9, 0x54),
};

pub const DECADE_COLOR: ChartColor = ChartColor {
    hex: "#33C1FF",
    rgb: (0x33, 0xC1, 0xFF),
};

pub const ARTIST_COLOR: ChartColor = ChartColor {
    hex: "#E05FA0",
    rgb: (0xE0, 0x5F, 0xA0),
};

pub const GENRE_COLOR: ChartColor = ChartColor {
    hex: "#9B6DFF",
    rgb: (0x9B, 0x6D, 0xFF),
};

/// Shown instead of the genre chart when no artist had genres.
pub const NO_GENRES: &str = "No genre data available";

pub fn decade_label(decade: i32) -> String {
    format!("{decade}s")
}
