//! Response text normalization
//!
//! Raw HTTP responses are reduced to a restricted character set before link
//! extraction: letters, digits, and the punctuation the extractor's markers
//! and terminators are built from. Newlines become spaces, kept letters are
//! lowercased, and every other character is dropped outright rather than
//! replaced. Dropping can concatenate tokens that spanned a removed
//! character; the extractor's marker scan relies on exactly this behavior,
//! so it must not be "fixed" to insert separators.

/// Punctuation kept alongside letters and digits
const KEPT_PUNCTUATION: &str = ".,/\":#?+-_= ";

/// Normalizes raw response text for link extraction
///
/// The result contains only lowercase letters, digits, and the kept
/// punctuation set; running it on its own output is a fixed point.
pub fn normalize_response(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\n' {
            result.push(' ');
        } else if ch.is_ascii_alphanumeric() || KEPT_PUNCTUATION.contains(ch) {
            result.push(ch.to_ascii_lowercase());
        }
    }
    result
}
