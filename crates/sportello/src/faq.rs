//! Exact-match FAQ lookup. Curated question forms only, no fuzziness.

use crate::document::Document;
use crate::text::normalize;

/// Case/diacritic-insensitive exact match of the question against the
/// document's FAQ keys. Partial matches never hit: only curated question
/// forms trigger curated answers.
pub fn lookup<'a>(doc: &'a Document, question: &str) -> Option<&'a str> {
    let q = normalize(question);
    if q.is_empty() {
        return None;
    }
    doc.faq
        .iter()
        .find(|(key, _)| normalize(key) == q)
        .map(|(_, answer)| answer.as_str())
}
