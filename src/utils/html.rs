/// Clean admin-authored lesson HTML with ammonia before it is rendered
/// unescaped.
///
/// Whitelist based: formatting tags (<b>, <p>, lists, links) survive, while
/// <script>, <iframe>, inline event handlers and `javascript:` URLs are
/// stripped. Lesson videos are embedded by the template itself, not through
/// this content.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
