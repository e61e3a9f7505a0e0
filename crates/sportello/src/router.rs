//! Priority routing.
//!
//! Two entry points share the same handlers. `route` is the one-shot chain:
//! FAQ, venue topics, municipality topics, generic fallback, in that order,
//! and it always produces an answer. `route_session` adds the multi-turn
//! layer on top: direct hours/address answers ahead of catalog logic,
//! literal item lookup as an early exit, two-at-a-time suggestion windows
//! driven by the caller's rotation state, and exhaustion signaling.

use serde::Serialize;

use crate::catalog;
use crate::document::Document;
use crate::faq;
use crate::filters::{parse_filters, FilterSet};
use crate::intent::{MunicipalityClassifier, VenueClassifier};
use crate::session::{is_continuation, SessionState};
use crate::text::normalize;

/// Terminal fallback: returned when nothing else in the ladder applies.
pub const GENERIC_FALLBACK: &str =
    "Posso aiutarti con orari, indirizzo, contatti e prodotti o servizi.";

/// Returned when the filtered, excluded pool has no novel candidate left.
pub const EXHAUSTED_GUIDANCE: &str = "Ho esaurito i suggerimenti per questa ricerca. Prova con un \
     ingrediente (ad esempio \"mozzarella\") o con un filtro: vegetariano, senza lattosio, \
     piccante.";

// ============================================================================
// Types
// ============================================================================

/// Reply from the session-aware router: the answer text, the item names
/// surfaced this turn (already merged into the session's exclusion set),
/// and whether the suggestion pool ran dry.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReply {
    pub text: String,
    pub used_items: Vec<String>,
    pub exhausted: bool,
}

impl SessionReply {
    fn plain(text: String) -> Self {
        Self { text, used_items: Vec::new(), exhausted: false }
    }
}

// ============================================================================
// Router
// ============================================================================

pub struct Router {
    venue: VenueClassifier,
    municipality: MunicipalityClassifier,
}

impl Router {
    pub fn new() -> Self {
        Self {
            venue: VenueClassifier::new(),
            municipality: MunicipalityClassifier::new(),
        }
    }

    /// One-shot routing: FAQ, then venue topics (only for documents that
    /// expose venue config or a catalog), then municipality topics, then
    /// the generic fallback ladder. Total: every question gets a non-empty
    /// answer.
    pub fn route(&self, question: &str, doc: &Document) -> String {
        self.route_with_usage(question, doc).0
    }

    /// The one-shot chain plus the item names the answer surfaced. Only
    /// the venue catalog highlight puts items in front of the user; every
    /// other rung reports none.
    fn route_with_usage(&self, question: &str, doc: &Document) -> (String, Vec<String>) {
        if let Some(answer) = faq::lookup(doc, question) {
            tracing::debug!(handler = "faq", "Routed question");
            return (answer.to_string(), Vec::new());
        }

        if doc.has_venue_config() || doc.has_catalog() {
            if let Some(hit) = self.venue.classify_with_usage(question, doc) {
                tracing::debug!(handler = "venue", "Routed question");
                return hit;
            }
        }

        if let Some(answer) = self.municipality.classify(question, doc) {
            tracing::debug!(handler = "municipality", "Routed question");
            return (answer, Vec::new());
        }

        tracing::debug!(handler = "fallback", "Routed question");
        (self.generic_fallback(doc), Vec::new())
    }

    /// Session routing for multi-turn widgets. FAQ still wins; hours and
    /// address get direct answers ahead of any catalog logic; a literal
    /// item/description lookup short-circuits before the suggestion
    /// ladder; catalog suggestions come two at a time, rotate through the
    /// caller's cursor and never repeat a surfaced item. Questions the
    /// ladder does not cover degrade to the one-shot chain. Whichever
    /// path produced the answer, every item name shown to the user is
    /// merged into the exclusion set and reported in `used_items`.
    pub fn route_session(
        &self,
        question: &str,
        doc: &Document,
        state: &mut SessionState,
    ) -> SessionReply {
        if let Some(answer) = faq::lookup(doc, question) {
            return SessionReply::plain(answer.to_string());
        }

        let q = normalize(question);
        if self.venue.is_hours_question(&q) {
            return SessionReply::plain(self.venue.hours_answer(doc));
        }
        if self.venue.is_address_question(&q) {
            return SessionReply::plain(self.venue.address_answer(doc));
        }

        let continuation = is_continuation(question);

        // Continuations stay in the rotation; anything else may name an
        // item or ingredient outright, which beats the ladder.
        if !continuation && doc.has_catalog() {
            if let Some(item) = catalog::direct_search(doc, question) {
                tracing::debug!(item = %item.name, "Direct item lookup hit");
                state.exclude_all([item.name.clone()]);
                return SessionReply {
                    text: catalog::item_detail(item),
                    used_items: vec![item.name.clone()],
                    exhausted: false,
                };
            }
        }

        let filters = parse_filters(question);
        let wants_suggestions =
            continuation || filters.any() || self.venue.is_catalog_question(&q);
        if wants_suggestions && doc.has_catalog() {
            return self.suggest(doc, &filters, continuation, state);
        }

        // Degraded one-shot answers can still highlight catalog items;
        // those names count as used like any rotated suggestion.
        let (text, used_items) = self.route_with_usage(question, doc);
        state.exclude_all(used_items.iter().cloned());
        SessionReply { text, used_items, exhausted: false }
    }

    /// Serve one suggestion window and update the rotation state: surfaced
    /// names join the exclusion set, then the cursor advances (by two on a
    /// continuation turn, otherwise by one).
    fn suggest(
        &self,
        doc: &Document,
        filters: &FilterSet,
        continuation: bool,
        state: &mut SessionState,
    ) -> SessionReply {
        let pool = catalog::candidates(doc, filters, state.excluded());
        tracing::debug!(
            pool = pool.len(),
            cursor = state.cursor(),
            vegetarian = filters.vegetarian,
            lactose_free = filters.lactose_free,
            spicy = filters.spicy,
            "Serving catalog suggestions"
        );

        if pool.is_empty() {
            return SessionReply {
                text: EXHAUSTED_GUIDANCE.to_string(),
                used_items: Vec::new(),
                exhausted: true,
            };
        }

        let picks = catalog::window(&pool, state.cursor());
        let names: Vec<String> = picks.iter().map(|item| item.name.clone()).collect();
        state.exclude_all(names.iter().cloned());
        state.advance(if continuation { 2 } else { 1 });

        let line = picks
            .iter()
            .map(|item| catalog::item_line(item))
            .collect::<Vec<_>>()
            .join(" · ");
        SessionReply {
            text: format!("Ti propongo: {}. Vuoi altri suggerimenti?", line),
            used_items: names,
            exhausted: false,
        }
    }

    /// The never-empty tail of the chain: category list, town topic menu,
    /// or the fully generic line.
    fn generic_fallback(&self, doc: &Document) -> String {
        if doc.has_catalog() {
            let names = doc.category_names(5);
            if !names.is_empty() {
                return format!(
                    "Posso mostrarti le nostre categorie: {}. Cosa ti interessa?",
                    names.join(", ")
                );
            }
        }
        if doc.city.is_some() {
            let topics: Vec<&str> = if doc.suggestions.is_empty() {
                vec!["Storia", "Eventi", "Uffici e contatti", "Open data"]
            } else {
                doc.suggestions.iter().map(String::as_str).take(4).collect()
            };
            return format!("Posso aiutarti con: {}.", topics.join(", "));
        }
        GENERIC_FALLBACK.to_string()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Category, Item, VenueConfig};

    fn pizzeria() -> Document {
        Document::from_json(
            r#"{
                "name": "Da Mario",
                "config": {"hours": "9-18", "address": "Via Roma 1"},
                "catalog": [{
                    "name": "Pizze",
                    "items": [
                        {"name": "Arrosticini", "price": 9.0},
                        {"name": "Bruschetta", "price": 4.5},
                        {"name": "Carbonara", "price": 10.0}
                    ]
                }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_hours_scenario() {
        let router = Router::new();
        let doc = Document::from_json(r#"{"config": {"hours": "9-18"}}"#).unwrap();
        assert!(router.route("a che ora apre?", &doc).contains("9-18"));
    }

    #[test]
    fn test_empty_document_generic_fallback() {
        let router = Router::new();
        let doc = Document::default();
        assert_eq!(router.route("ciao", &doc), GENERIC_FALLBACK);
        assert_eq!(router.route("", &doc), GENERIC_FALLBACK);
    }

    #[test]
    fn test_faq_beats_everything() {
        let router = Router::new();
        let doc = Document::from_json(
            r#"{
                "config": {"hours": "9-12"},
                "faq": {"orari": "Aperti tutti i giorni"}
            }"#,
        )
        .unwrap();
        // The hours pattern would answer "9-12"; the FAQ key must win.
        assert_eq!(router.route("Orari", &doc), "Aperti tutti i giorni");

        let mut state = SessionState::new();
        let reply = router.route_session("  ORARI ", &doc, &mut state);
        assert_eq!(reply.text, "Aperti tutti i giorni");
        assert!(reply.used_items.is_empty());
    }

    #[test]
    fn test_route_always_answers() {
        let router = Router::new();
        let questions = ["", "ciao", "orari?", "qualcosa di vegetariano", "open data", "boh"];
        let docs = [
            Document::default(),
            pizzeria(),
            Document::from_json(r#"{"city": "Civitella"}"#).unwrap(),
        ];
        for doc in &docs {
            for q in questions {
                assert!(!router.route(q, doc).is_empty());
            }
        }
    }

    #[test]
    fn test_fallback_prefers_city_menu() {
        let router = Router::new();
        let doc = Document::from_json(r#"{"city": "Civitella"}"#).unwrap();
        let answer = router.route("boh", &doc);
        assert!(answer.contains("Storia"));
        assert!(answer.contains("Open data"));
    }

    #[test]
    fn test_session_direct_answers_before_catalog() {
        let router = Router::new();
        let mut state = SessionState::new();
        let doc = pizzeria();

        let hours = router.route_session("a che ora apre?", &doc, &mut state);
        assert!(hours.text.contains("9-18"));
        let address = router.route_session("dove siete?", &doc, &mut state);
        assert!(address.text.contains("Via Roma 1"));
        // Direct answers never touch the rotation state.
        assert_eq!(state.cursor(), 0);
        assert!(state.excluded().is_empty());
    }

    #[test]
    fn test_session_direct_item_lookup() {
        let router = Router::new();
        let mut state = SessionState::new();
        let mut doc = pizzeria();
        doc.catalog[0].items[1].description = Some("pane, pomodoro, basilico".into());

        let reply = router.route_session("cosa contiene la bruschetta?", &doc, &mut state);
        assert!(reply.text.contains("pane, pomodoro, basilico"));
        // The surfaced name counts as used even outside the rotation.
        assert_eq!(reply.used_items, vec!["Bruschetta"]);
        assert!(state.is_excluded("Bruschetta"));
        assert_eq!(state.cursor(), 0);

        // The next suggestion turn must not show it again.
        let next = router.route_session("cosa avete?", &doc, &mut state);
        assert_eq!(next.used_items, vec!["Arrosticini", "Carbonara"]);
    }

    #[test]
    fn test_session_degraded_answer_counts_items() {
        let router = Router::new();
        let mut state = SessionState::new();
        let doc = pizzeria();

        // No catalog keyword, no filters, no direct hit: degrades to the
        // one-shot chain, whose broad recall still highlights two items.
        let reply = router.route_session("boh", &doc, &mut state);
        assert_eq!(reply.used_items, vec!["Arrosticini", "Bruschetta"]);
        assert!(state.is_excluded("Arrosticini"));

        let next = router.route_session("altri?", &doc, &mut state);
        assert_eq!(next.used_items, vec!["Carbonara"]);

        let done = router.route_session("ancora", &doc, &mut state);
        assert!(done.exhausted);
    }

    #[test]
    fn test_session_rotation_to_exhaustion() {
        let router = Router::new();
        let mut state = SessionState::new();
        let doc = pizzeria();

        // Pool order without filters: no favorites, so name ascending.
        let first = router.route_session("cosa avete?", &doc, &mut state);
        assert_eq!(first.used_items, vec!["Arrosticini", "Bruschetta"]);
        assert!(!first.exhausted);
        assert_eq!(state.cursor(), 1);

        let second = router.route_session("dimmi altro", &doc, &mut state);
        assert_eq!(second.used_items, vec!["Carbonara"]);
        assert!(!second.exhausted);
        assert_eq!(state.cursor(), 3);

        let third = router.route_session("ancora", &doc, &mut state);
        assert!(third.exhausted);
        assert!(third.used_items.is_empty());
        assert_eq!(third.text, EXHAUSTED_GUIDANCE);
    }

    #[test]
    fn test_session_never_repeats_suggestions() {
        let router = Router::new();
        let mut state = SessionState::new();
        let doc = pizzeria();

        let mut seen = Vec::new();
        for _ in 0..4 {
            let reply = router.route_session("altri suggerimenti?", &doc, &mut state);
            if reply.exhausted {
                break;
            }
            for name in &reply.used_items {
                assert!(!seen.contains(name), "{} suggested twice", name);
                seen.push(name.clone());
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_session_filtered_suggestions() {
        let router = Router::new();
        let mut state = SessionState::new();
        let doc = Document {
            catalog: vec![Category {
                name: "Pizze".into(),
                items: vec![
                    Item {
                        name: "Margherita".into(),
                        tags: vec!["veg".into()],
                        ..Default::default()
                    },
                    Item {
                        name: "Diavola".into(),
                        tags: vec!["piccante".into()],
                        ..Default::default()
                    },
                ],
            }],
            ..Default::default()
        };

        let reply = router.route_session("qualcosa di vegetariano", &doc, &mut state);
        assert_eq!(reply.used_items, vec!["Margherita"]);

        let spent = router.route_session("altro di vegetariano", &doc, &mut state);
        assert!(spent.exhausted);
        assert_eq!(spent.text, EXHAUSTED_GUIDANCE);
    }

    #[test]
    fn test_session_degrades_without_catalog() {
        let router = Router::new();
        let mut state = SessionState::new();
        let doc = Document::from_json(r#"{"city": "Civitella"}"#).unwrap();

        let reply = router.route_session("si", &doc, &mut state);
        assert!(!reply.text.is_empty());
        assert!(!reply.exhausted);
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_venue_gate_requires_venue_shape() {
        let router = Router::new();
        // Municipality-only document: the venue classifier must not run,
        // so a story question lands on the municipality handler.
        let doc = Document::from_json(
            r#"{"city": "Civitella", "about": "Borgo antico sul colle."}"#,
        )
        .unwrap();
        assert!(router.route("raccontami la storia", &doc).contains("Borgo antico"));
    }

    #[test]
    fn test_catalog_redirect_when_categories_empty() {
        let router = Router::new();
        let doc = Document {
            config: Some(VenueConfig::default()),
            catalog: vec![Category { name: "Pizze".into(), items: Vec::new() }],
            ..Default::default()
        };
        // Empty categories leave no candidates; the catalog answer must
        // still point somewhere useful.
        let answer = router.route("cosa avete?", &doc);
        assert!(answer.contains("Pizze"));
    }
}
