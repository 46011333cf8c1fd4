//! # Tag Normalization
//!
//! Each container names the same field differently: a title is `TITLE` in
//! ID3v1 and Vorbis comments, `TT2` in ID3v2.2, `TIT2` in ID3v2.3/2.4 and
//! `TITLE` again in an ASF content description. This module maps canonical
//! keys onto the native key of the detected format.
//!
//! ## Usage
//!
//! ```ignore
//! let report = TagReader::new().read_path("song.wma")?;
//! // Reads the `WM/AlbumTitle` descriptor
//! println!("{}", report.get("ALBUM"));
//! ```

use crate::report::FormatVersion;
use crate::store::TagStore;

/// Canonical keys understood by [`lookup`].
pub const CANONICAL_KEYS: [&str; 11] = [
    "TITLE",
    "ALBUM",
    "ARTIST",
    "ALBUMARTIST",
    "YEAR",
    "GENRE",
    "COMMENT",
    "TRACKNUMBER",
    "DISCNUMBER",
    "COMPOSER",
    "COPYRIGHT",
];

/// Native keys per canonical key, in column order ID3V1, ID3V2.2, ID3V2.3,
/// FLAC, ASF. An empty entry means the format has no such field.
///
/// Entries name the keys the decoders store: Vorbis `ARTIST`, the textual
/// `WM/Genre` and the ID3v1.1 `TRACKNUMBER`.
static KEY_TABLE: [(&str, [&str; 5]); 11] = [
    ("TITLE", ["TITLE", "TT2", "TIT2", "TITLE", "TITLE"]),
    ("ALBUM", ["ALBUM", "TAL", "TALB", "ALBUM", "WM/AlbumTitle"]),
    ("ARTIST", ["ARTIST", "TP1", "TPE1", "ARTIST", "ARTIST"]),
    ("ALBUMARTIST", ["ARTIST", "TP2", "TPE2", "ALBUMARTIST", "WM/AlbumArtist"]),
    ("YEAR", ["YEAR", "TYE", "TYER", "DATE", "WM/Year"]),
    ("GENRE", ["GENRE", "TCO", "TCON", "GENRE", "WM/Genre"]),
    ("COMMENT", ["COMMENT", "COM", "COMM", "COMMENT", "COMMENT"]),
    ("TRACKNUMBER", ["TRACKNUMBER", "TRK", "TRCK", "TRACKNUMBER", "WM/TrackNumber"]),
    ("DISCNUMBER", ["", "TPA", "TPOS", "DISCNUMBER", "WM/PartOfSet"]),
    ("COMPOSER", ["", "TCM", "TCOM", "COMPOSER", "WM/Composer"]),
    ("COPYRIGHT", ["", "TCR", "TCOP", "COPYRIGHT", "COPYRIGHT"]),
];

fn column(format: FormatVersion) -> usize {
    match format {
        FormatVersion::Id3v1 => 0,
        FormatVersion::Id3v22 => 1,
        // ID3v2.4 keeps the v2.3 frame IDs
        FormatVersion::Id3v23 | FormatVersion::Id3v24 => 2,
        FormatVersion::Flac => 3,
        FormatVersion::Asf => 4,
    }
}

/// Native key for `canonical_key` in `format`.
///
/// Returns `Some("")` when the format has no such field and `None` when the
/// key is not in the table at all.
pub fn native_key(format: FormatVersion, canonical_key: &str) -> Option<&'static str> {
    KEY_TABLE
        .iter()
        .find(|(canonical, _)| *canonical == canonical_key)
        .map(|(_, natives)| natives[column(format)])
}

/// Resolve `key` against `tags` for the given format.
///
/// Canonical keys go through the table; any other key is treated as a native
/// key and looked up verbatim. Every miss yields `""`.
pub fn lookup<'a>(format: Option<FormatVersion>, tags: &'a TagStore, key: &str) -> &'a str {
    let native = match format.and_then(|f| native_key(f, key)) {
        Some("") => return "",
        Some(native) => native,
        None => key,
    };
    tags.get(native).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(entries: &[(&str, &str)]) -> TagStore {
        let mut store = TagStore::new();
        for (k, v) in entries {
            store.insert(*k, *v);
        }
        store
    }

    #[test]
    fn test_every_canonical_key_has_a_native_key() {
        assert_eq!(CANONICAL_KEYS.len(), KEY_TABLE.len());
        for (canonical, natives) in KEY_TABLE.iter() {
            assert!(CANONICAL_KEYS.contains(canonical));
            assert!(natives.iter().any(|n| !n.is_empty()), "{canonical}");
        }
    }

    #[test]
    fn test_column_per_format() {
        assert_eq!(native_key(FormatVersion::Id3v22, "TITLE"), Some("TT2"));
        assert_eq!(native_key(FormatVersion::Id3v23, "TITLE"), Some("TIT2"));
        assert_eq!(native_key(FormatVersion::Id3v24, "TITLE"), Some("TIT2"));
        assert_eq!(native_key(FormatVersion::Asf, "ALBUM"), Some("WM/AlbumTitle"));
        assert_eq!(native_key(FormatVersion::Flac, "YEAR"), Some("DATE"));
        assert_eq!(native_key(FormatVersion::Flac, "UNKNOWN"), None);
    }

    #[test]
    fn test_entries_match_stored_keys() {
        assert_eq!(native_key(FormatVersion::Flac, "ARTIST"), Some("ARTIST"));
        assert_eq!(native_key(FormatVersion::Asf, "GENRE"), Some("WM/Genre"));
        assert_eq!(native_key(FormatVersion::Id3v1, "TRACKNUMBER"), Some("TRACKNUMBER"));

        let tags = store(&[("WM/Genre", "Jazz"), ("WM/GenreID", "8")]);
        assert_eq!(lookup(Some(FormatVersion::Asf), &tags, "GENRE"), "Jazz");
    }

    #[test]
    fn test_lookup_through_table() {
        let tags = store(&[("TALB", "Record"), ("TPE1", "Band")]);
        let format = Some(FormatVersion::Id3v23);
        assert_eq!(lookup(format, &tags, "ALBUM"), "Record");
        assert_eq!(lookup(format, &tags, "ARTIST"), "Band");
        assert_eq!(lookup(format, &tags, "TITLE"), "");
    }

    #[test]
    fn test_empty_column_yields_empty() {
        let tags = store(&[("DISCNUMBER", "1")]);
        assert_eq!(lookup(Some(FormatVersion::Id3v1), &tags, "DISCNUMBER"), "");
    }

    #[test]
    fn test_unknown_key_is_native_lookup() {
        let tags = store(&[("WM/Publisher", "Label")]);
        assert_eq!(lookup(Some(FormatVersion::Asf), &tags, "WM/Publisher"), "Label");
        assert_eq!(lookup(None, &tags, "WM/Publisher"), "Label");
    }

    #[test]
    fn test_id3v1_album_artist_falls_back_to_artist() {
        let tags = store(&[("ARTIST", "Solo")]);
        assert_eq!(lookup(Some(FormatVersion::Id3v1), &tags, "ALBUMARTIST"), "Solo");
    }
}
