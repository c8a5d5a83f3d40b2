//! Slash-delimited path helpers shared by the tree builder, navigator and viewer.

/// Splits a path or URL path into its non-empty `/` separated segments.
pub fn split(raw: &str) -> Vec<&str> {
    raw.trim_start_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

pub fn is_under_root(segments: &[&str], root_name: &str) -> bool {
    segments.first().is_some_and(|first| *first == root_name)
}

/// Rebuilds an absolute path (`/a/b`) from segments; no segments gives `/`.
pub fn join(segments: &[&str]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        "/".to_string()
    } else {
        out
    }
}

/// Canonical form of a folder path, so `content//guide/` and `/content/guide` compare equal.
pub fn normalize(raw: &str) -> String {
    join(&split(raw))
}

/// Prefixes root-absolute locators with the configured base; everything else is left alone.
pub fn with_base(base: &str, locator: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() || !locator.starts_with('/') || locator.starts_with("//") {
        return locator.to_string();
    }
    format!("{base}{locator}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_drops_empty_segments() {
        let cases: [(&str, &[&str]); 6] = [
            ("", &[]),
            ("/", &[]),
            ("///", &[]),
            ("/content/guide/", &["content", "guide"]),
            ("content//guide", &["content", "guide"]),
            ("//content/a.html", &["content", "a.html"]),
        ];
        for (input, expected) in cases {
            assert_eq!(split(input), expected, "input={input:?}");
        }
    }

    #[test]
    fn root_membership_is_segment_based() {
        assert!(is_under_root(&split("/content/a.html"), "content"));
        assert!(!is_under_root(&split("/contents/a.html"), "content"));
        assert!(!is_under_root(&split("/other/content/a.html"), "content"));
        assert!(!is_under_root(&split(""), "content"));
    }

    #[test]
    fn join_and_normalize_round_out_paths() {
        assert_eq!(join(&[]), "/");
        assert_eq!(join(&["content", "guide"]), "/content/guide");
        assert_eq!(normalize("content//guide/"), "/content/guide");
    }

    #[test]
    fn with_base_only_touches_root_absolute_locators() {
        assert_eq!(with_base("/site/", "/content/a.html"), "/site/content/a.html");
        assert_eq!(with_base("/site", "content/a.html"), "content/a.html");
        assert_eq!(
            with_base("/site", "https://example.org/a.html"),
            "https://example.org/a.html"
        );
        assert_eq!(with_base("/site", "//cdn.example.org/a.png"), "//cdn.example.org/a.png");
        assert_eq!(with_base("", "/content/a.html"), "/content/a.html");
    }
}
