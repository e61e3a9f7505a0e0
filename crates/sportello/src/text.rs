//! Text normalization for matching.
//!
//! Every pattern match and FAQ lookup in this crate runs over normalized
//! text so that case and accents never cause a miss ("Perché" == "perche").

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lower-case, decompose and strip diacritical marks ("è" -> "e"), trim
/// surrounding whitespace. Idempotent.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .trim()
        .to_string()
}
