//! Catalog matching: flattening, filtering, ordering, windowed selection.
//!
//! The candidate pool is rebuilt per turn from the full document, so the
//! caller-held exclusion set is the only memory between turns. Ordering is
//! deliberately policy, not chance: favorites lead when the search is
//! unconstrained, names lead when a filter already narrowed the set.

use crate::document::{Document, Item};
use crate::filters::FilterSet;
use std::collections::HashSet;

/// Build the ordered candidate pool for a suggestion turn.
///
/// Flattens every category, keeps items that satisfy all active filters,
/// drops names already surfaced, dedups by name (first occurrence wins),
/// then sorts: favorites first and name ascending when unconstrained,
/// name then price ascending when any filter is active.
pub fn candidates<'a>(
    doc: &'a Document,
    filters: &FilterSet,
    exclude: &HashSet<String>,
) -> Vec<&'a Item> {
    let mut seen = HashSet::new();
    let mut pool: Vec<&Item> = doc
        .catalog
        .iter()
        .flat_map(|c| c.items.iter())
        .filter(|item| filters.item_matches(item))
        .filter(|item| !exclude.contains(&item.name))
        .filter(|item| seen.insert(item.name.clone()))
        .collect();

    if filters.any() {
        pool.sort_by(|a, b| {
            a.name.cmp(&b.name).then_with(|| {
                a.price
                    .unwrap_or(f64::INFINITY)
                    .total_cmp(&b.price.unwrap_or(f64::INFINITY))
            })
        });
    } else {
        pool.sort_by(|a, b| b.favorite.cmp(&a.favorite).then_with(|| a.name.cmp(&b.name)));
    }
    pool
}

/// Take the turn's window from the pool: exactly two consecutive entries
/// starting at `cursor % len`, wrapping; one if only one remains; none if
/// the pool is empty (the router treats that as exhaustion).
pub fn window<'a>(pool: &[&'a Item], cursor: usize) -> Vec<&'a Item> {
    match pool.len() {
        0 => Vec::new(),
        1 => vec![pool[0]],
        len => {
            let start = cursor % len;
            vec![pool[start], pool[(start + 1) % len]]
        }
    }
}

/// Literal free-text lookup: first item, in category order, whose name
/// appears in the question or whose name/description contains the question.
/// Lower-cased comparison only, no filters, no exclusions. Needles shorter
/// than three characters are ignored to keep "ok"-sized questions from
/// matching every description.
pub fn direct_search<'a>(doc: &'a Document, question: &str) -> Option<&'a Item> {
    let q = question
        .to_lowercase()
        .trim()
        .trim_matches(|c: char| c == '?' || c == '!' || c == '.')
        .trim()
        .to_string();
    let q_long_enough = q.chars().count() >= 3;

    for category in &doc.catalog {
        for item in &category.items {
            let name = item.name.to_lowercase();
            if name.chars().count() >= 3 && q.contains(&name) {
                return Some(item);
            }
            if q_long_enough {
                if name.contains(&q) {
                    return Some(item);
                }
                if let Some(description) = &item.description {
                    if description.to_lowercase().contains(&q) {
                        return Some(item);
                    }
                }
            }
        }
    }
    None
}

/// One-line rendering for suggestion lists: "Margherita - €6.50".
pub fn item_line(item: &Item) -> String {
    match item.price {
        Some(price) => format!("{} - €{:.2}", item.name, price),
        None => item.name.clone(),
    }
}

/// Fuller rendering for direct lookups, with description and price.
pub fn item_detail(item: &Item) -> String {
    let mut line = item.name.clone();
    if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(": ");
        line.push_str(description);
    }
    if let Some(price) = item.price {
        line.push_str(&format!(" (€{:.2})", price));
    }
    line
}
