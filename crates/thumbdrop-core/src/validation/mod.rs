//! Filename validation
//!
//! User-supplied names (multipart filenames, archive entry names) end up inside
//! storage keys. These helpers strip anything that could move a key outside the
//! storage root.

const MAX_FILENAME_LENGTH: usize = 255;

/// Reduce an uploaded filename to a single safe path component.
///
/// Both `/` and `\` count as separators and only the final component is kept.
/// Control characters become `_`. Returns `"file"` when nothing usable is left.
pub fn sanitize_filename(filename: &str) -> String {
    let last = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    if last.is_empty() || last == "." || last == ".." {
        return "file".to_string();
    }

    last.chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| if c.is_control() { '_' } else { c })
        .collect()
}

/// Normalise an archive entry name into a relative key, keeping its directories.
///
/// Backslashes become `/`; empty, `.` and `..` segments are dropped, which also
/// removes any leading `/`. Returns `None` when no segment remains.
pub fn sanitize_entry_path(entry_name: &str) -> Option<String> {
    let normalized = entry_name.replace('\\', "/");
    let segments: Vec<String> = normalized
        .split('/')
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .map(|s| s.chars().map(|c| if c.is_control() { '_' } else { c }).collect())
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// Whether `key` is a relative key that stays under the storage root.
pub fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('/')
        && !key.starts_with('\\')
        && !key.split(['/', '\\']).any(|segment| segment == "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_filename_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\cat.png"), "cat.png");
        assert_eq!(sanitize_filename("photos/cat.png"), "cat.png");
    }

    #[test]
    fn sanitize_filename_keeps_plain_names() {
        assert_eq!(sanitize_filename("cat.png"), "cat.png");
        assert_eq!(sanitize_filename("my holiday (1).JPG"), "my holiday (1).JPG");
    }

    #[test]
    fn sanitize_filename_falls_back() {
        assert_eq!(sanitize_filename(""), "file");
        assert_eq!(sanitize_filename(".."), "file");
        assert_eq!(sanitize_filename("dir/"), "file");
    }

    #[test]
    fn sanitize_filename_replaces_control_characters() {
        assert_eq!(sanitize_filename("a\nb.png"), "a_b.png");
    }

    #[test]
    fn sanitize_entry_path_preserves_nesting() {
        assert_eq!(
            sanitize_entry_path("album/2024/a.jpg").as_deref(),
            Some("album/2024/a.jpg")
        );
        assert_eq!(
            sanitize_entry_path("album\\b.png").as_deref(),
            Some("album/b.png")
        );
    }

    #[test]
    fn sanitize_entry_path_drops_traversal() {
        assert_eq!(
            sanitize_entry_path("../../evil.png").as_deref(),
            Some("evil.png")
        );
        assert_eq!(
            sanitize_entry_path("/abs/./x.jpg").as_deref(),
            Some("abs/x.jpg")
        );
        assert_eq!(sanitize_entry_path("../.."), None);
        assert_eq!(sanitize_entry_path(""), None);
    }

    #[test]
    fn is_safe_key_rejects_escapes() {
        assert!(is_safe_key("1-a.png"));
        assert!(is_safe_key("1-album/a.png"));
        assert!(is_safe_key("1-..a.png"));
        assert!(is_safe_key("1-../a.png"));
        assert!(!is_safe_key("1-a/../../b.png"));
        assert!(!is_safe_key("/etc/passwd"));
        assert!(!is_safe_key(""));
    }
}
