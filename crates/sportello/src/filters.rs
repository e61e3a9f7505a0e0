//! Dietary/attribute filter extraction.
//!
//! A question is reduced to three independent flags (vegetarian,
//! lactose-free, spicy). The question-side cues use stems so that gender
//! and number inflections match ("vegetariana", "piccanti"); the item-side
//! cues are looser still, so a curated tag like "veg" passes.

use crate::document::Item;
use crate::text::normalize;
use std::sync::LazyLock;

// "hot" needs a word boundary: "hotel" must not read as spicy.
static HOT_WORD_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\bhot\b").expect("hot word regex is valid"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub vegetarian: bool,
    pub lactose_free: bool,
    pub spicy: bool,
}

impl FilterSet {
    /// True when at least one flag is active.
    pub fn any(&self) -> bool {
        self.vegetarian || self.lactose_free || self.spicy
    }

    /// Whether an item satisfies every active flag. The item passes a flag
    /// when its tag/description text contains a cue for it; inactive flags
    /// pass trivially. Item names are deliberately not searched.
    pub fn item_matches(&self, item: &Item) -> bool {
        if !self.any() {
            return true;
        }

        let mut haystack = item.tags.join(" ");
        if let Some(description) = &item.description {
            haystack.push(' ');
            haystack.push_str(description);
        }
        let haystack = normalize(&haystack);

        let veg_cues = ["veg", "senza carne"];
        let lactose_cues = ["senza lattosio", "senza latte", "no lattosio"];
        let spicy_cues = ["piccant", "speziat", "diavola", "spicy"];

        if self.vegetarian && !veg_cues.iter().any(|c| haystack.contains(c)) {
            return false;
        }
        if self.lactose_free && !lactose_cues.iter().any(|c| haystack.contains(c)) {
            return false;
        }
        if self.spicy
            && !(spicy_cues.iter().any(|c| haystack.contains(c)) || HOT_WORD_RE.is_match(&haystack))
        {
            return false;
        }
        true
    }
}

/// Extract the filter flags a question asks for. Flags are independent:
/// zero, one, or several may be set by the same question.
pub fn parse_filters(question: &str) -> FilterSet {
    let q = normalize(question);

    let veg_cues = ["vegetarian", "vegan", "senza carne"];
    let lactose_cues = ["senza lattosio", "senza latte", "no lattosio"];
    let spicy_cues = ["piccant", "speziat", "diavola", "spicy"];

    FilterSet {
        vegetarian: veg_cues.iter().any(|c| q.contains(c)),
        lactose_free: lactose_cues.iter().any(|c| q.contains(c)),
        spicy: spicy_cues.iter().any(|c| q.contains(c)) || HOT_WORD_RE.is_match(&q),
    }
}
