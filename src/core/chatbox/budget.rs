/// Character ceiling enforced by the chatbox
pub const MAX_MESSAGE_LENGTH: usize = 144;

/// Hard-cut `text` to its first `max_len` characters.
///
/// Length is counted in chars, not bytes or display columns. The cut is
/// neither word- nor line-aware and may split a line in half, but it always
/// lands on a codepoint boundary.
pub fn enforce(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_string(),
        Some((cut, _)) => {
            log::warn!(
                "Message is too long ({} characters). Truncating to {}.",
                text.chars().count(),
                max_len
            );
            text[..cut].to_string()
        }
    }
}
