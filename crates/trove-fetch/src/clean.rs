//! Text cleaning and URL screening

use regex::Regex;
use std::sync::LazyLock;

/// Path extensions that never hold readable article text
pub const UNSUPPORTED_EXTENSIONS: &[&str] = &[
    // documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "epub",
    // archives
    "zip", "tar", "gz", "tgz", "rar", "7z", "bz2", "xz", "dmg", "exe", "iso",
    // images
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "svg", "ico", "tiff", "heic",
    // audio
    "mp3", "wav", "ogg", "flac", "m4a", "aac",
    // video
    "mp4", "mov", "avi", "mkv", "webm", "wmv", "flv",
];

static RE_INLINE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}\u{200b}]+").expect("valid regex"));

static RE_SENTENCE_JOIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9\)][.!?])([A-Z])").expect("valid regex"));

/// Normalize extracted text
///
/// Collapses inline whitespace, trims lines, keeps at most one blank line
/// between paragraphs, and puts a space after sentence punctuation that
/// runs into the next sentence.
///
/// # Examples
///
/// ```
/// use trove_fetch::clean::clean_text;
///
/// assert_eq!(clean_text("end.Next   part\n\n\n\nmore"), "end. Next part\n\nmore");
/// ```
pub fn clean_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0usize;

    for line in raw.lines() {
        let line = RE_INLINE_SPACE.replace_all(line, " ");
        let line = line.trim();
        if line.is_empty() {
            blank_run += 1;
            continue;
        }
        if !out.is_empty() {
            out.push_str(if blank_run > 0 { "\n\n" } else { "\n" });
        }
        blank_run = 0;
        out.push_str(line);
    }

    RE_SENTENCE_JOIN.replace_all(&out, "$1 $2").into_owned()
}

/// Whether the URL path ends in a known non-text extension
pub fn has_unsupported_extension(raw_url: &str) -> bool {
    let path = match url::Url::parse(raw_url) {
        Ok(parsed) => parsed.path().to_lowercase(),
        Err(_) => raw_url
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or("")
            .to_lowercase(),
    };

    let last_segment = path.rsplit('/').next().unwrap_or("");
    match last_segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => UNSUPPORTED_EXTENSIONS.contains(&ext),
        _ => false,
    }
}

/// Whether a response content type is binary media
pub fn is_unsupported_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    mime == "application/pdf"
        || mime == "application/octet-stream"
        || mime.starts_with("image/")
        || mime.starts_with("audio/")
        || mime.starts_with("video/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean_text("  a \t  b  \n   c  "), "a b\nc");
    }

    #[test]
    fn test_collapses_blank_runs() {
        assert_eq!(clean_text("one\n\n\n\n\ntwo\n \n\t\nthree"), "one\n\ntwo\n\nthree");
    }

    #[test]
    fn test_repairs_sentence_spacing() {
        assert_eq!(clean_text("It ended.Then it began!Again"), "It ended. Then it began! Again");
        // Decimals and abbreviations in lower case stay intact
        assert_eq!(clean_text("version 3.5 is out.see notes"), "version 3.5 is out.see notes");
    }

    #[test]
    fn test_unsupported_extensions() {
        assert!(has_unsupported_extension("https://x.org/paper.PDF"));
        assert!(has_unsupported_extension("https://x.org/a/b/archive.tar.gz?dl=1"));
        assert!(has_unsupported_extension("https://x.org/photo.jpeg#top"));
        assert!(!has_unsupported_extension("https://x.org/post.html"));
        assert!(!has_unsupported_extension("https://x.org/pdf/article"));
        assert!(!has_unsupported_extension("https://x.org/"));
        assert!(!has_unsupported_extension("https://x.org/.mp4"));
    }

    #[test]
    fn test_unsupported_content_types() {
        assert!(is_unsupported_content_type("application/pdf"));
        assert!(is_unsupported_content_type("image/png"));
        assert!(is_unsupported_content_type("Video/MP4; codecs=x"));
        assert!(!is_unsupported_content_type("text/html; charset=utf-8"));
        assert!(!is_unsupported_content_type("text/plain"));
    }
}
