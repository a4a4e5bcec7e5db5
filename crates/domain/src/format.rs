//! Post formatting within the platform character ceiling

use crate::model::PostText;

/// Maximum length of a post, in characters
pub const POST_CHAR_LIMIT: usize = 140;

/// Marker appended to truncated text
pub const ELLIPSIS: &str = "...";

/// Build the post text, appending `url` and truncating `text` so both fit.
///
/// Lengths are counted in characters. When the URL leaves no room for even
/// the ellipsis, the post is the URL alone. URLs are never shortened.
pub fn format_post(text: &str, url: Option<&str>) -> PostText {
    let url = match url {
        Some(u) if !u.is_empty() => u,
        _ => return PostText::new(text.to_string()),
    };

    let url_len = url.chars().count();
    // One character for the separating space
    let budget = POST_CHAR_LIMIT.saturating_sub(url_len + 1);
    let text_len = text.chars().count();

    if text_len <= budget {
        return PostText::new(format!("{} {}", text, url));
    }

    let ellipsis_len = ELLIPSIS.chars().count();
    if budget < ellipsis_len {
        tracing::debug!(url_len, "URL leaves no room for text, posting URL only");
        return PostText::new(url.to_string());
    }

    let kept: String = text.chars().take(budget - ellipsis_len).collect();
    PostText::new(format!("{}{} {}", kept, ELLIPSIS, url))
}
