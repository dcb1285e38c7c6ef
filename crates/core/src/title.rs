//! Turn a movie file name into a `Title (Year)` search string.
//!
//! The result is what suggesters receive. Running the cleaner on its own
//! output gives the same string back.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Extensions removed from the end of a file name. Any other suffix is
/// treated as part of the title, so `notes.txt` cleans to `notes txt`.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "m4v", "wmv", "mpg", "mpeg", "ts", "webm",
];

/// `Title (1999)` at the very end.
static TRAILING_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\s*(\d{4})\s*\)\s*$").unwrap());

/// `[1999]` or `(1999)` anywhere.
static BRACKETED_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\[(]\s*(\d{4})\s*[\])]").unwrap());

/// Release metadata: resolution, source, codec, audio, size and any
/// bracketed or parenthesised group.
static RELEASE_METADATA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)",
        r"\b\d{3,4}p\b",
        r"|\bHDTV\b|\bDVDRip\b|\bBluRay\b|\bWEB-?DL\b|\bWEBRip\b",
        r"|\bx\d{3}\b|\bHEVC\b",
        r"|\bAAC(?:\d(?:\.\d)?)?\b|\bDD5\.1\b",
        r"|\b\d+MB\b",
        r"|\[[^\]]*\]|\([^)]*\)",
    ))
    .unwrap()
});

/// A standalone four-digit run.
static YEAR_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}\b").unwrap());

/// Clean `raw` (a file name or path) into `Title (Year)`, or just `Title`
/// when no year can be found.
///
/// The year is taken from, in order: a trailing `(YYYY)` group, the last
/// standalone four-digit run once release metadata is gone, or the first
/// bracket group holding exactly four digits.
pub fn clean_title(raw: &str) -> String {
    let name = file_name(raw);
    let name = strip_video_extension(name).replace('_', " ");

    let (body, trailing_year) = match TRAILING_YEAR.captures(&name) {
        Some(caps) => {
            let start = caps.get(0).map_or(name.len(), |m| m.start());
            (name[..start].to_string(), caps.get(1).map(|m| m.as_str().to_string()))
        }
        None => (name.clone(), None),
    };

    let bracketed_year = BRACKETED_YEAR
        .captures(&body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let mut title = RELEASE_METADATA
        .replace_all(&body, " ")
        .replace('.', " ");

    let mut year = trailing_year;
    if year.is_none() {
        if let Some(found) = YEAR_TOKEN.find_iter(&title).last() {
            let rest = format!("{}{}", &title[..found.start()], &title[found.end()..]);
            // a name that is only a four-digit run ("1917") keeps it as the title
            if !tidy(&rest).is_empty() {
                year = Some(found.as_str().to_string());
                title = rest;
            }
        }
    }
    let year = year.or(bracketed_year);

    let title = tidy(&title);
    match year {
        Some(year) => format!("{} ({})", title, year).trim().to_string(),
        None => title,
    }
}

fn file_name(raw: &str) -> &str {
    raw.rsplit(['/', '\\']).next().unwrap_or(raw)
}

fn strip_video_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if VIDEO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext)) =>
        {
            stem
        }
        _ => name,
    }
}

fn tidy(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c == '-' || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "The.Matrix.1999.1080p.BluRay.x264.mkv",
        "/media/movies/Drama/Heat (1995).mp4",
        r"C:\Movies\Alien.1979.DVDRip.avi",
        "Some_Movie_2010_720p_WEB-DL_AAC2.0.mp4",
        "2001.A.Space.Odyssey.1968.mkv",
        "Heat [1995] 1080p.mkv",
        "Inception (2010) [Director's Cut].mov",
        "1917.mkv",
        "Amelie 700MB HEVC DD5.1.mkv",
        "Aachen.Memories.2001.mkv",
        "Isaac.2019.mkv",
        "Just A Title",
        "notes.txt",
        "",
    ];

    #[test]
    fn test_release_name() {
        assert_eq!(
            clean_title("The.Matrix.1999.1080p.BluRay.x264.mkv"),
            "The Matrix (1999)"
        );
    }

    #[test]
    fn test_directories_are_dropped() {
        assert_eq!(clean_title("/media/movies/Drama/Heat (1995).mp4"), "Heat (1995)");
        assert_eq!(clean_title(r"C:\Movies\Alien.1979.DVDRip.avi"), "Alien (1979)");
    }

    #[test]
    fn test_underscores_and_audio_tags() {
        assert_eq!(
            clean_title("Some_Movie_2010_720p_WEB-DL_AAC2.0.mp4"),
            "Some Movie (2010)"
        );
    }

    #[test]
    fn test_last_four_digit_run_is_the_year() {
        assert_eq!(
            clean_title("2001.A.Space.Odyssey.1968.mkv"),
            "2001 A Space Odyssey (1968)"
        );
    }

    #[test]
    fn test_bracketed_year() {
        assert_eq!(clean_title("Heat [1995] 1080p.mkv"), "Heat (1995)");
        assert_eq!(
            clean_title("Inception (2010) [Director's Cut].mov"),
            "Inception (2010)"
        );
    }

    #[test]
    fn test_audio_tag_only_matches_whole_words() {
        assert_eq!(
            clean_title("Aachen.Memories.2001.mkv"),
            "Aachen Memories (2001)"
        );
        assert_eq!(clean_title("Isaac.2019.mkv"), "Isaac (2019)");
        assert_eq!(clean_title("Heat.1995.AAC5.1.mkv"), "Heat (1995)");
    }

    #[test]
    fn test_number_only_title_is_kept() {
        assert_eq!(clean_title("1917.mkv"), "1917");
    }

    #[test]
    fn test_size_and_codec_tags() {
        assert_eq!(clean_title("Amelie 700MB HEVC DD5.1.mkv"), "Amelie");
    }

    #[test]
    fn test_unknown_extension_is_kept() {
        assert_eq!(clean_title("Just A Title"), "Just A Title");
        assert_eq!(clean_title("notes.txt"), "notes txt");
        assert_eq!(clean_title(""), "");
    }

    /// Covers names that stay untouched by design too: a non-video suffix
    /// ("notes.txt") and a title that is only a year-like number ("1917.mkv").
    #[test]
    fn test_idempotent() {
        for sample in SAMPLES {
            let once = clean_title(sample);
            assert_eq!(clean_title(&once), once, "not idempotent for {sample:?}");
        }
    }
}
