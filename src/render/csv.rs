use crate::analysis::TrackRecord;

pub const HEADER: &str = "year,Song Name,Authors,Album,Link";

/// CSV export of the track table, one line per track in the given order.
pub fn to_csv(tracks: &[TrackRecord]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for track in tracks {
        let fields = [
            track.year.to_string(),
            field(&track.name),
            field(&track.artist),
            field(&track.album),
            field(&track.link),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Quotes a field when it contains a separator, quote or line break.
pub fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_quoted_when_needed() {
        assert_eq!(field("Plain"), "Plain");
        assert_eq!(field("Simon, Garfunkel"), "\"Simon, Garfunkel\"");
        assert_eq!(field("12\" Mix"), "\"12\"\" Mix\"");
        assert_eq!(field("Line\nBreak"), "\"Line\nBreak\"");
    }

    #[test]
    fn export_has_header_and_rows() {
        let tracks = vec![TrackRecord {
            name: "Song".into(),
            artist: "A, B".into(),
            contributors: vec!["A".into(), "B".into()],
            artist_ids: vec!["a".into(), "b".into()],
            album: "Album".into(),
            year: 1994,
            decade: 1990,
            link: "https://open.spotify.com/track/1".into(),
        }];

        assert_eq!(
            to_csv(&tracks),
            "year,Song Name,Authors,Album,Link\n1994,Song,\"A, B\",Album,https://open.spotify.com/track/1\n"
        );
    }
}
