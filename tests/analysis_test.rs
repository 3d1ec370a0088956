mod common;

use std::collections::HashMap;

use common::{item, removed_item};
use playlist_eras::{
    analysis::*,
    error::AppError,
    types::{RawTrack, RawTrackItem},
};

fn record(name: &str, year: i32) -> TrackRecord {
    TrackRecord {
        name: name.to_string(),
        artist: "Artist".to_string(),
        contributors: vec!["Artist".to_string()],
        artist_ids: vec!["artist-id".to_string()],
        album: "Album".to_string(),
        year,
        decade: decade_of(year),
        link: String::new(),
    }
}

#[test]
fn test_decade_is_year_rounded_down() {
    assert_eq!(decade_of(1994), 1990);
    assert_eq!(decade_of(2000), 2000);
    assert_eq!(decade_of(2009), 2000);
    for year in 1000..=2999 {
        assert_eq!(decade_of(year), (year / 10) * 10);
    }
}

#[test]
fn test_aggregate_valid_track() {
    let items = vec![item(
        "Song",
        &["Simon", "Garfunkel"],
        "Bookends",
        Some("1987-03-01"),
    )];

    let records = aggregate(&items).unwrap();
    assert_eq!(records.len(), 1);

    let track = &records[0];
    assert_eq!(track.name, "Song");
    assert_eq!(track.artist, "Simon, Garfunkel");
    assert_eq!(track.contributors, vec!["Simon", "Garfunkel"]);
    assert_eq!(track.artist_ids, vec!["simon", "garfunkel"]);
    assert_eq!(track.album, "Bookends");
    assert_eq!(track.year, 1987);
    assert_eq!(track.decade, 1980);
    assert_eq!(track.link, "https://open.spotify.com/track/Song");
}

#[test]
fn test_aggregate_accepts_year_and_month_precision() {
    let items = vec![
        item("A", &["X"], "Album", Some("1971")),
        item("B", &["X"], "Album", Some("2003-11")),
    ];

    let years: Vec<i32> = aggregate(&items).unwrap().iter().map(|t| t.year).collect();
    assert_eq!(years, vec![1971, 2003]);
}

#[test]
fn test_aggregate_skips_invalid_items() {
    let no_album = RawTrackItem {
        track: Some(RawTrack {
            name: Some("No album".to_string()),
            ..RawTrack::default()
        }),
    };

    let items = vec![
        removed_item(),
        no_album,
        item("No date", &["X"], "Album", None),
        item("Bad date", &["X"], "Album", Some("N/A")),
        item("Short date", &["X"], "Album", Some("199")),
        item("Empty date", &["X"], "Album", Some("")),
        item("Valid", &["X"], "Album", Some("1987-03-01")),
    ];

    let records = aggregate(&items).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Valid");
    assert_eq!(records[0].decade, 1980);
}

#[test]
fn test_aggregate_without_valid_tracks_fails() {
    let items = vec![
        removed_item(),
        item("Bad date", &["X"], "Album", Some("N/A")),
    ];

    assert!(matches!(aggregate(&items), Err(AppError::NoValidTracks)));
    assert!(matches!(aggregate(&[]), Err(AppError::NoValidTracks)));
}

#[test]
fn test_aggregate_is_idempotent() {
    let items = vec![
        item("A", &["X", "Y"], "One", Some("2005-01-01")),
        removed_item(),
        item("B", &["Z"], "Two", Some("1990")),
    ];

    assert_eq!(aggregate(&items).unwrap(), aggregate(&items).unwrap());
}

#[test]
fn test_parse_year() {
    assert_eq!(parse_year("1987-03-01"), Some(1987));
    assert_eq!(parse_year("0000"), Some(0));
    assert_eq!(parse_year("N/A"), None);
    assert_eq!(parse_year("19x7-01-01"), None);
    assert_eq!(parse_year("-198"), None);
    assert_eq!(parse_year("éé"), None);
}

#[test]
fn test_sort_by_year_is_stable() {
    let mut records = vec![record("first", 2005), record("second", 1990), record("third", 1990)];

    sort_by_year(&mut records);

    let order: Vec<(&str, i32)> = records.iter().map(|r| (r.name.as_str(), r.year)).collect();
    assert_eq!(
        order,
        vec![("second", 1990), ("third", 1990), ("first", 2005)]
    );
}

#[test]
fn test_year_histogram_fills_gaps() {
    let records = vec![record("a", 1990), record("b", 1993), record("c", 1990)];

    assert_eq!(
        year_histogram(&records),
        vec![(1990, 2), (1991, 0), (1992, 0), (1993, 1)]
    );
}

#[test]
fn test_decade_histogram_uses_bins_of_ten() {
    let records = vec![record("a", 1975), record("b", 1999), record("c", 1991)];

    assert_eq!(
        decade_histogram(&records),
        vec![(1970, 1), (1980, 0), (1990, 2)]
    );
}

#[test]
fn test_top_artists_counts_contributors() {
    let items = vec![
        item("A", &["Queen", "David Bowie"], "Hot Space", Some("1982")),
        item("B", &["Queen"], "A Night at the Opera", Some("1975")),
        item("C", &["ABBA"], "Arrival", Some("1976")),
        item("D", &["David Bowie"], "Heroes", Some("1977")),
        item("E", &["Queen"], "Jazz", Some("1978")),
    ];
    let records = aggregate(&items).unwrap();

    assert_eq!(
        top_artists(&records, 2),
        vec![("Queen".to_string(), 3), ("David Bowie".to_string(), 2)]
    );
    assert_eq!(top_artists(&records, 10).len(), 3);
}

#[test]
fn test_analysis_summary() {
    let records = vec![
        record("a", 2005),
        record("b", 1994),
        record("c", 1990),
        record("d", 2011),
    ];

    let analysis = Analysis::new(records, 15).unwrap();

    assert_eq!(analysis.tracks.first().unwrap().year, 1990);
    assert_eq!(analysis.tracks.last().unwrap().year, 2011);
    assert_eq!(analysis.summary.total, 4);
    assert_eq!(analysis.summary.earliest, 1990);
    assert_eq!(analysis.summary.latest, 2011);
    // 1990s has two tracks
    assert_eq!(analysis.summary.peak_decade, 1990);
    assert_eq!(analysis.summary.peak_decade_count, 2);
    assert_eq!(analysis.by_year.len(), 22);
}

#[test]
fn test_analysis_requires_tracks() {
    assert!(matches!(
        Analysis::new(Vec::new(), 15),
        Err(AppError::NoValidTracks)
    ));
}

fn credited(name: &str, ids: &[&str]) -> TrackRecord {
    TrackRecord {
        artist_ids: ids.iter().map(|id| id.to_string()).collect(),
        ..record(name, 2000)
    }
}

#[test]
fn test_unique_artist_ids_keep_first_seen_order() {
    let records = vec![
        credited("a", &["x", "y"]),
        credited("b", &["y", "z"]),
        credited("c", &["x"]),
    ];

    assert_eq!(unique_artist_ids(&records), vec!["x", "y", "z"]);
}

#[test]
fn test_top_genres_counts_every_artist_credit() {
    let records = vec![
        credited("a", &["x", "y"]),
        credited("b", &["y"]),
        credited("c", &["unknown"]),
    ];
    let genres = HashMap::from([
        ("x".to_string(), vec!["synthpop".to_string(), "new wave".to_string()]),
        ("y".to_string(), vec!["synthpop".to_string()]),
        ("z".to_string(), vec!["jazz".to_string()]),
    ]);

    assert_eq!(
        top_genres(&records, &genres, 15),
        vec![("synthpop".to_string(), 3), ("new wave".to_string(), 1)]
    );
    assert_eq!(top_genres(&records, &genres, 1).len(), 1);
    assert!(top_genres(&records, &HashMap::new(), 15).is_empty());
}

#[test]
fn test_analysis_with_genres() {
    let genres = HashMap::from([("artist-id".to_string(), vec!["rock".to_string()])]);

    let analysis = Analysis::new(vec![record("a", 1990), record("b", 2001)], 15).unwrap();
    assert!(analysis.top_genres.is_empty());

    let analysis = analysis.with_genres(&genres, 15);
    assert_eq!(analysis.top_genres, vec![("rock".to_string(), 2)]);
}
