// src/utils/youtube.rs

use url::Url;

const EMBED_PREFIX: &str = "https://www.youtube.com/embed/";

/// Rewrites YouTube watch and short links into their embeddable form.
///
/// * blank input yields `None`
/// * `youtube.com/embed/...` is returned as is
/// * `youtube.com/watch?v=ID&...` becomes `https://www.youtube.com/embed/ID`
/// * `youtu.be/ID?...` becomes `https://www.youtube.com/embed/ID`
/// * any other URL passes through unchanged (trimmed)
pub fn embed_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    if url.contains("youtube.com/embed/") {
        return Some(url.to_string());
    }

    if url.contains("youtube.com/watch") {
        if let Some((_, rest)) = url.split_once("v=") {
            let video_id = rest.split('&').next().unwrap_or_default();
            return Some(format!("{EMBED_PREFIX}{video_id}"));
        }
    }

    if let Some((_, rest)) = url.split_once("youtu.be/") {
        let video_id = rest.split('?').next().unwrap_or_default();
        return Some(format!("{EMBED_PREFIX}{video_id}"));
    }

    Some(url.to_string())
}

/// The stored video URL if it is safe to put in an iframe: only absolute
/// `http`/`https` URLs are kept.
pub fn playable_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(parsed.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{embed_url, playable_url};

    #[test]
    fn watch_links_drop_extra_params() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=XYZ&t=5").as_deref(),
            Some("https://www.youtube.com/embed/XYZ")
        );
    }

    #[test]
    fn short_links_drop_query() {
        assert_eq!(
            embed_url("https://youtu.be/XYZ?t=5").as_deref(),
            Some("https://www.youtube.com/embed/XYZ")
        );
    }

    #[test]
    fn embedded_and_foreign_urls_pass_through() {
        assert_eq!(
            embed_url("https://www.youtube.com/embed/XYZ").as_deref(),
            Some("https://www.youtube.com/embed/XYZ")
        );
        assert_eq!(
            embed_url("https://vimeo.com/12345").as_deref(),
            Some("https://vimeo.com/12345")
        );
        assert_eq!(
            embed_url("  https://cdn.example.org/clase.mp4 ").as_deref(),
            Some("https://cdn.example.org/clase.mp4")
        );
    }

    #[test]
    fn watch_without_video_id_passes_through() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch").as_deref(),
            Some("https://www.youtube.com/watch")
        );
    }

    #[test]
    fn blank_is_none() {
        assert_eq!(embed_url(""), None);
        assert_eq!(embed_url("   "), None);
    }

    #[test]
    fn only_web_urls_are_playable() {
        assert_eq!(
            playable_url("https://www.youtube.com/embed/XYZ").as_deref(),
            Some("https://www.youtube.com/embed/XYZ")
        );
        assert_eq!(
            playable_url("http://cdn.example.org/clase.mp4").as_deref(),
            Some("http://cdn.example.org/clase.mp4")
        );
        assert_eq!(playable_url("javascript:alert(document.domain)"), None);
        assert_eq!(playable_url("JavaScript:alert(1)"), None);
        assert_eq!(playable_url("data:text/html,<script>alert(1)</script>"), None);
        assert_eq!(playable_url("/relativo/video.mp4"), None);
    }
}
