//! Release year statistics for a playlist.
//!
//! [`aggregate`] turns raw playlist items into [`TrackRecord`]s; everything
//! else in this module works on those records and is free of I/O.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::{error::AppError, types::RawTrackItem};

/// A playlist track with a known release year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackRecord {
    pub name: String,
    /// Contributor names joined with ", ".
    pub artist: String,
    pub contributors: Vec<String>,
    /// Artist ids, used to look up genres.
    pub artist_ids: Vec<String>,
    pub album: String,
    pub year: i32,
    pub decade: i32,
    pub link: String,
}

/// Builds records from raw items, dropping entries without a usable
/// release year.
///
/// Items without a track, tracks without an album or release date, and
/// release dates that do not start with four digits are skipped. Fails with
/// [`AppError::NoValidTracks`] when nothing is left.
pub fn aggregate(items: &[RawTrackItem]) -> Result<Vec<TrackRecord>, AppError> {
    let records: Vec<TrackRecord> = items
        .iter()
        .filter_map(|item| {
            let track = item.track.as_ref()?;
            let album = track.album.as_ref()?;
            let year = parse_year(album.release_date.as_deref()?)?;

            let contributors: Vec<String> = track
                .artists
                .iter()
                .filter_map(|artist| artist.name.clone())
                .collect();

            Some(TrackRecord {
                name: track.name.clone().unwrap_or_default(),
                artist: contributors.join(", "),
                contributors,
                artist_ids: track
                    .artists
                    .iter()
                    .filter_map(|artist| artist.id.clone())
                    .collect(),
                album: album.name.clone().unwrap_or_default(),
                year,
                decade: decade_of(year),
                link: track
                    .external_urls
                    .as_ref()
                    .and_then(|urls| urls.spotify.clone())
                    .unwrap_or_default(),
            })
        })
        .collect();

    if records.is_empty() {
        return Err(AppError::NoValidTracks);
    }

    Ok(records)
}

/// Year from the first four characters of a release date
/// (`"1987"`, `"1987-03"`, `"1987-03-01"`).
pub fn parse_year(release_date: &str) -> Option<i32> {
    let prefix = release_date.get(..4)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Stable ascending sort by year; tracks of the same year keep their
/// playlist order.
pub fn sort_by_year(records: &mut [TrackRecord]) {
    records.sort_by_key(|record| record.year);
}

/// Track count per year, every year between the earliest and the latest
/// included.
pub fn year_histogram(records: &[TrackRecord]) -> Vec<(i32, usize)> {
    contiguous_bins(records.iter().map(|r| r.year), 1)
}

/// Track count per decade, every decade between the earliest and the
/// latest included.
pub fn decade_histogram(records: &[TrackRecord]) -> Vec<(i32, usize)> {
    contiguous_bins(records.iter().map(|r| r.decade), 10)
}

fn contiguous_bins(values: impl Iterator<Item = i32>, width: i32) -> Vec<(i32, usize)> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value.div_euclid(width) * width).or_default() += 1;
    }

    let (Some(&first), Some(&last)) = (counts.keys().next(), counts.keys().next_back()) else {
        return Vec::new();
    };

    (first..=last)
        .step_by(width as usize)
        .map(|bin| (bin, counts.get(&bin).copied().unwrap_or(0)))
        .collect()
}

/// Most frequent individual contributors, ties broken by name.
pub fn top_artists(records: &[TrackRecord], limit: usize) -> Vec<(String, usize)> {
    ranked(
        records
            .iter()
            .flat_map(|r| r.contributors.iter().map(String::as_str)),
        limit,
    )
}

/// Distinct artist ids in playlist order.
pub fn unique_artist_ids(records: &[TrackRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .flat_map(|r| r.artist_ids.iter())
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// Most frequent genres. Every artist credit on a track contributes all
/// genres of that artist; ids without known genres contribute nothing.
pub fn top_genres(
    records: &[TrackRecord],
    genres: &HashMap<String, Vec<String>>,
    limit: usize,
) -> Vec<(String, usize)> {
    ranked(
        records
            .iter()
            .flat_map(|r| r.artist_ids.iter())
            .filter_map(|id| genres.get(id))
            .flat_map(|list| list.iter().map(String::as_str)),
        limit,
    )
}

fn ranked<'a>(names: impl Iterator<Item = &'a str>, limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *counts.entry(name).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub earliest: i32,
    pub latest: i32,
    pub peak_decade: i32,
    pub peak_decade_count: usize,
}

/// Everything the presentation layer draws, computed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Sorted by year.
    pub tracks: Vec<TrackRecord>,
    pub by_year: Vec<(i32, usize)>,
    pub by_decade: Vec<(i32, usize)>,
    pub top_artists: Vec<(String, usize)>,
    /// Empty until [`Analysis::with_genres`] is applied.
    pub top_genres: Vec<(String, usize)>,
    pub summary: Summary,
}

impl Analysis {
    pub fn new(mut tracks: Vec<TrackRecord>, top: usize) -> Result<Self, AppError> {
        if tracks.is_empty() {
            return Err(AppError::NoValidTracks);
        }

        sort_by_year(&mut tracks);
        let by_year = year_histogram(&tracks);
        let by_decade = decade_histogram(&tracks);

        // Earliest decade wins a tie.
        let (peak_decade, peak_decade_count) = by_decade
            .iter()
            .copied()
            .fold((by_decade[0].0, 0), |best, bin| {
                if bin.1 > best.1 { bin } else { best }
            });

        let summary = Summary {
            total: tracks.len(),
            earliest: tracks[0].year,
            latest: tracks[tracks.len() - 1].year,
            peak_decade,
            peak_decade_count,
        };

        Ok(Self {
            top_artists: top_artists(&tracks, top),
            tracks,
            by_year,
            by_decade,
            top_genres: Vec::new(),
            summary,
        })
    }

    pub fn with_genres(mut self, genres: &HashMap<String, Vec<String>>, limit: usize) -> Self {
        self.top_genres = top_genres(&self.tracks, genres, limit);
        self
    }
}
