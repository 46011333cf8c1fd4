//! # Code Tables
//!
//! Immutable lookup tables shared by every decoder: ID3v1 and ID3v2 genre
//! names, picture-type labels, and the human-readable frame descriptions used
//! when rendering ID3v2 display lines.
//!
//! All tables are `static` data and safe to read from any thread. A lookup
//! miss never fails: it yields an empty string or `None`.

use crate::report::FormatVersion;

/// Name of an ID3v1 genre byte, or `""` for unassigned codes.
pub fn id3v1_genre(code: u8) -> &'static str {
    match code {
        0x00..=0x93 => ID3V1_GENRES[code as usize],
        0xF0..=0xFF => ID3V1_GENRES_JP[(code - 0xF0) as usize],
        _ => "",
    }
}

/// Name of an ID3v2 numeric genre reference such as the `17` in `(17)`.
pub fn id3v2_genre(number: u32) -> Option<&'static str> {
    ID3V2_GENRES.get(number as usize).copied()
}

/// Label of an APIC/PIC/FLAC/WM picture-type code, or `""` when unknown.
pub fn picture_type_label(code: u32) -> &'static str {
    PICTURE_TYPES.get(code as usize).copied().unwrap_or("")
}

/// Human description of an ID3v2 frame ID.
///
/// ID3v2.4 shares the ID3v2.3 frame vocabulary. Returns `None` for frame IDs
/// outside the table and for non-ID3v2 formats.
pub fn frame_description(version: FormatVersion, frame_id: &str) -> Option<&'static str> {
    let table: &[(&str, &str)] = match version {
        FormatVersion::Id3v22 => &FRAME_NAMES_V22,
        FormatVersion::Id3v23 | FormatVersion::Id3v24 => &FRAME_NAMES_V23,
        _ => return None,
    };

    table
        .binary_search_by(|(id, _)| (*id).cmp(frame_id))
        .ok()
        .map(|idx| table[idx].1)
}

/// ID3v1 genre names for codes `0x00..=0x93`.
static ID3V1_GENRES: [&str; 0x94] = [
    "Blues", // 0x00
    "ClassicRock",
    "Country",
    "Dance",
    "Disco",
    "Funk",
    "Grunge",
    "Hip-Hop",
    "Jazz",
    "Metal",
    "NewAge",
    "Oldies",
    "Other",
    "Pop",
    "R&B",
    "Rap",
    "Reggae", // 0x10
    "Rock",
    "Techno",
    "Industrial",
    "Alternative",
    "Ska",
    "DeathMetal",
    "Pranks",
    "Soundtrack",
    "Euro-Techno",
    "Ambient",
    "Trip-Hop",
    "Vocal",
    "Jazz+Funk",
    "Fusion",
    "Trance",
    "Classical", // 0x20
    "Instrumental",
    "Acid",
    "House",
    "Game",
    "SoundClip",
    "Gospel",
    "Noise",
    "Alt.Rock",
    "Bass",
    "Soul",
    "Punk",
    "Space",
    "Meditative",
    "InstrumentalPop",
    "InstrumentalRock",
    "Ethnic", // 0x30
    "Gothic",
    "Darkwave",
    "Techno-Industrial",
    "Electronic",
    "Pop-Folk",
    "Eurodance",
    "Dream",
    "SouthernRock",
    "Comedy",
    "Cult",
    "Gangsta",
    "Top40",
    "ChristianRap",
    "Pop/Funk",
    "Jungle",
    "NativeAmerican", // 0x40
    "Cabaret",
    "NewWave",
    "Psychadelic",
    "Rave",
    "Showtunes",
    "Trailer",
    "Lo-Fi",
    "Tribal",
    "AcidPunk",
    "AcidJazz",
    "Polka",
    "Retro",
    "Musical",
    "Rock&Roll",
    "HardRock",
    "Folk", // 0x50
    "Folk/Rock",
    "NationalFolk",
    "Swing",
    "Fusion",
    "Bebob",
    "Latin",
    "Revival",
    "Celtic",
    "Bluegrass",
    "Avantgarde",
    "GothicRock",
    "ProgressiveRock",
    "PsychedelicRock",
    "SymphonicRock",
    "SlowRock",
    "BigBand", // 0x60
    "Chorus",
    "EasyListening",
    "Acoustic",
    "Humour",
    "Speech",
    "Chanson",
    "Opera",
    "ChamberMusic",
    "Sonata",
    "Symphony",
    "BootyBass",
    "Primus",
    "PornGroove",
    "Satire",
    "SlowJam",
    "Club", // 0x70
    "Tango",
    "Samba",
    "Folklore",
    "Ballad",
    "Power Ballad",
    "Rhytmic Soul",
    "Freestyle",
    "Duet",
    "Punk Rock",
    "Drum Solo",
    "Acapella",
    "Euro-House",
    "Dance Hall",
    "Goa",
    "Drum & Bass",
    "Club-House", // 0x80
    "Hardcore",
    "Terror",
    "Indie",
    "BritPop",
    "Negerpunk",
    "Polsk Punk",
    "Beat",
    "Christian Gangsta Rap",
    "Heavy Metal",
    "Black Metal",
    "Crossover",
    "Contemporary Christian",
    "Christian Rock",
    "Merengue",
    "Salsa",
    "Trash Metal", // 0x90
    "Anime",
    "JPop",
    "SynthPop",
];

/// Japanese extension genres for codes `0xF0..=0xFF`.
static ID3V1_GENRES_JP: [&str; 16] = [
    "Sacred",
    "Northern Europe",
    "Irish & Scottish",
    "Scotland",
    "Ethnic Europe",
    "Enka",
    "Children's Song",
    "空き",
    "Heavy Rock(J)",
    "Doom Rock(J)",
    "J-POP(J)",
    "Seiyu(J)",
    "Tecno Ambient(J)",
    "Moemoe(J)",
    "Tokusatsu(J)",
    "Anime(J)",
];

/// ID3v2 numeric genre references `(0)..=(125)`.
static ID3V2_GENRES: [&str; 126] = [
    "Blues", // 0
    "Classic Rock",
    "Country",
    "Dance",
    "Disco",
    "Funk",
    "Grunge",
    "Hip-Hop",
    "Jazz",
    "Metal",
    "New Age", // 10
    "Oldies",
    "Other",
    "Pop",
    "R&B",
    "Rap",
    "Reggae",
    "Rock",
    "Techno",
    "Industrial",
    "Alternative", // 20
    "Ska",
    "Death Metal",
    "Pranks",
    "Soundtrack",
    "Euro-Techno",
    "Ambient",
    "Trip-Hop",
    "Vocal",
    "Jazz+Funk",
    "Fusion", // 30
    "Trance",
    "Classical",
    "Instrumental",
    "Acid",
    "House",
    "Game",
    "Sound Clip",
    "Gospel",
    "Noise",
    "AlternRock", // 40
    "Bass",
    "Soul",
    "Punk",
    "Space",
    "Meditative",
    "Instrumental Pop",
    "Instrumental Rock",
    "Ethnic",
    "Gothic",
    "Darkwave", // 50
    "Techno-Industrial",
    "Electronic",
    "Pop-Folk",
    "Eurodance",
    "Dream",
    "Southern Rock",
    "Comedy",
    "Cult",
    "Gangsta",
    "Top 40", // 60
    "Christian Rap",
    "Pop/Funk",
    "Jungle",
    "Native American",
    "Cabaret",
    "New Wave",
    "Psychadelic",
    "Rave",
    "Showtunes",
    "Trailer", // 70
    "Lo-Fi",
    "Tribal",
    "Acid Punk",
    "Acid Jazz",
    "Polka",
    "Retro",
    "Musical",
    "Rock & Roll",
    "Hard Rock",
    "Folk", // 80
    "Folk-Rock",
    "National Folk",
    "Swing",
    "Fast Fusion",
    "Bebob",
    "Latin",
    "Revival",
    "Celtic",
    "Bluegrass",
    "Avantgarde", // 90
    "Gothic Rock",
    "Progressive Rock",
    "Psychedelic Rock",
    "Symphonic Rock",
    "Slow Rock",
    "Big Band",
    "Chorus",
    "Easy Listening",
    "Acoustic",
    "Humour", // 100
    "Speech",
    "Chanson",
    "Opera",
    "Chamber Music",
    "Sonata",
    "Symphony",
    "Booty Bass",
    "Primus",
    "Porn Groove",
    "Satire", // 110
    "Slow Jam",
    "Club",
    "Tango",
    "Samba",
    "Folklore",
    "Ballad",
    "Power Ballad",
    "Rhythmic Soul",
    "Freestyle",
    "Duet", // 120
    "Punk Rock",
    "Drum Solo",
    "A capella",
    "Euro-House",
    "Dance Hall",
];

static PICTURE_TYPES: [&str; 21] = [
    "Other",
    "32x32 pixels 'file icon' (PNG only)",
    "Other file icon",
    "Cover (front)",
    "Cover (back)",
    "Leaflet page",
    "Media (e.g. label side of CD)",
    "Lead artist/lead performer/soloist",
    "Artist/performer",
    "Conductor",
    "Band/Orchestra",
    "Composer",
    "Lyricist/text writer",
    "Recording Location",
    "During recording",
    "During performance",
    "Movie/video screen capture",
    "A bright coloured fish",
    "Illustration",
    "Band/artist logotype",
    "Publisher/Studio logotype",
];

/// Sorted by frame ID for binary search.
static FRAME_NAMES_V22: [(&str, &str); 63] = [
    ("BUF", "Recommended buffer size"),
    ("CNT", "Play counter"),
    ("COM", "Comments"),
    ("CRA", "Audio encryption"),
    ("CRM", "Encrypted meta frame"),
    ("EQU", "Equalization"),
    ("ETC", "Event timing codes"),
    ("GEO", "General encapsulated object"),
    ("IPL", "Involved people list"),
    ("LNK", "Linked information"),
    ("MCI", "Music CD Identifier"),
    ("MLL", "MPEG location lookup table"),
    ("PIC", "Attached picture"),
    ("POP", "Popularimeter"),
    ("REV", "Reverb"),
    ("RVA", "Relative volume adjustment"),
    ("SLT", "Synchronized lyric/text"),
    ("STC", "Synced tempo codes"),
    ("TAL", "Album/Movie/Show title"),
    ("TBP", "BPM (Beats Per Minute)"),
    ("TCM", "Composer"),
    ("TCO", "Content type"),
    ("TCR", "Copyright message"),
    ("TDA", "Date"),
    ("TDY", "Playlist delay"),
    ("TEN", "Encoded by"),
    ("TFT", "File type"),
    ("TIM", "Time"),
    ("TKE", "Initial key"),
    ("TLA", "Language(s)"),
    ("TLE", "Length"),
    ("TMT", "Media type"),
    ("TOA", "Original artist(s)/performer(s)"),
    ("TOF", "Original filename"),
    ("TOL", "Original Lyricist(s)/text writer(s)"),
    ("TOR", "Original release year"),
    ("TOT", "Original album/Movie/Show title"),
    ("TP1", "Lead artist(s)/Lead performer(s)/Soloist(s)/Performing group"),
    ("TP2", "Band/Orchestra/Accompaniment"),
    ("TP3", "Conductor/Performer refinement"),
    ("TP4", "Interpreted, remixed, or otherwise modified by"),
    ("TPA", "Part of a set"),
    ("TPB", "Publisher"),
    ("TRC", "ISRC (International Standard Recording Code)"),
    ("TRD", "Recording dates"),
    ("TRK", "Track number/Position in set"),
    ("TSI", "Size"),
    ("TSS", "Software/hardware and settings used for encoding"),
    ("TT1", "Content group description"),
    ("TT2", "Title/Songname/Content description"),
    ("TT3", "Subtitle/Description refinement"),
    ("TXT", "Lyricist/text writer"),
    ("TXX", "User defined text information frame"),
    ("TYE", "Year"),
    ("UFI", "Unique file identifier"),
    ("ULT", "Unsychronized lyric/text transcription"),
    ("WAF", "Official audio file webpage"),
    ("WAR", "Official artist/performer webpage"),
    ("WAS", "Official audio source webpage"),
    ("WCM", "Commercial information"),
    ("WCP", "Copyright/Legal information"),
    ("WPB", "Publishers official webpage"),
    ("WXX", "User defined URL link frame"),
];

/// Sorted by frame ID for binary search.
static FRAME_NAMES_V23: [(&str, &str); 74] = [
    ("AENC", "Audio encryption"),
    ("APIC", "Attached picture"),
    ("COMM", "Comments"),
    ("COMR", "Commercial frame"),
    ("ENCR", "Encryption method registration"),
    ("EQUA", "Equalization"),
    ("ETCO", "Event timing codes"),
    ("GEOB", "General encapsulated object"),
    ("GRID", "Group identification registration"),
    ("IPLS", "Involved people list"),
    ("LINK", "Linked information"),
    ("MCDI", "Music CD identifier"),
    ("MLLT", "MPEG location lookup table"),
    ("OWNE", "Ownership frame"),
    ("PCNT", "Play counter"),
    ("POPM", "Popularimeter"),
    ("POSS", "Position synchronisation frame"),
    ("PRIV", "Private frame"),
    ("RBUF", "Recommended buffer size"),
    ("RVAD", "Relative volume adjustment"),
    ("RVRB", "Reverb"),
    ("SYLT", "Synchronized lyric/text"),
    ("SYTC", "Synchronized tempo codes"),
    ("TALB", "Album/Movie/Show title"),
    ("TBPM", "BPM (beats per minute)"),
    ("TCOM", "Composer"),
    ("TCON", "Content type"),
    ("TCOP", "Copyright message"),
    ("TDAT", "Date"),
    ("TDLY", "Playlist delay"),
    ("TENC", "Encoded by"),
    ("TEXT", "Lyricist/Text writer"),
    ("TFLT", "File type"),
    ("TIME", "Time"),
    ("TIT1", "Content group description"),
    ("TIT2", "Title/songname/content description"),
    ("TIT3", "Subtitle/Description refinement"),
    ("TKEY", "Initial key"),
    ("TLAN", "Language(s)"),
    ("TLEN", "Length"),
    ("TMED", "Media type"),
    ("TOAL", "Original album/movie/show title"),
    ("TOFN", "Original filename"),
    ("TOLY", "Original lyricist(s)/text writer(s)"),
    ("TOPE", "Original artist(s)/performer(s)"),
    ("TORY", "Original release year"),
    ("TOWN", "File owner/licensee"),
    ("TPE1", "Lead performer(s)/Soloist(s)"),
    ("TPE2", "Band/orchestra/accompaniment"),
    ("TPE3", "Conductor/performer refinement"),
    ("TPE4", "Interpreted, remixed, or otherwise modified by"),
    ("TPOS", "Part of a set"),
    ("TPUB", "Publisher"),
    ("TRCK", "Track number/Position in set"),
    ("TRDA", "Recording dates"),
    ("TRSN", "Internet radio station name"),
    ("TRSO", "Internet radio station owner"),
    ("TSIZ", "Size"),
    ("TSRC", "ISRC (international standard recording code)"),
    ("TSSE", "Software/Hardware and settings used for encoding"),
    ("TXXX", "User defined text information frame"),
    ("TYER", "Year"),
    ("UFID", "Unique file identifier"),
    ("USER", "Terms of use"),
    ("USLT", "Unsychronized lyric/text transcription"),
    ("WCOM", "Commercial information"),
    ("WCOP", "Copyright/Legal information"),
    ("WOAF", "Official audio file webpage"),
    ("WOAR", "Official artist/performer webpage"),
    ("WOAS", "Official audio source webpage"),
    ("WORS", "Official internet radio station homepage"),
    ("WPAY", "Payment"),
    ("WPUB", "Publishers official webpage"),
    ("WXXX", "User defined URL link frame"),
];
