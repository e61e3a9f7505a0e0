//! Venue-side intent classifier: hours, address, phone, WhatsApp, catalog.

use crate::catalog;
use crate::document::Document;
use crate::filters::parse_filters;
use crate::text::normalize;
use std::collections::HashSet;

pub struct VenueClassifier {}

impl VenueClassifier {
    pub fn new() -> Self {
        Self {}
    }

    /// First-match classification over venue topics. Catalog questions get
    /// deliberately broad recall: once the explicit topics have declined,
    /// any question against a document with a catalog is treated as a
    /// catalog question. Declines with `None` only when nothing applies.
    pub fn classify(&self, question: &str, doc: &Document) -> Option<String> {
        self.classify_with_usage(question, doc).map(|(answer, _)| answer)
    }

    /// Classification that also reports the item names the answer put in
    /// front of the user. Session callers merge those into the exclusion
    /// set; the one-shot `classify` discards them.
    pub(crate) fn classify_with_usage(
        &self,
        question: &str,
        doc: &Document,
    ) -> Option<(String, Vec<String>)> {
        let q = normalize(question);

        if self.is_hours_question(&q) {
            tracing::debug!(topic = "hours", "Venue pattern matched");
            return Some((self.hours_answer(doc), Vec::new()));
        }
        if self.is_address_question(&q) {
            tracing::debug!(topic = "address", "Venue pattern matched");
            return Some((self.address_answer(doc), Vec::new()));
        }
        if self.is_phone_question(&q) {
            tracing::debug!(topic = "phone", "Venue pattern matched");
            return Some((self.phone_answer(doc), Vec::new()));
        }
        if self.is_whatsapp_question(&q) {
            tracing::debug!(topic = "whatsapp", "Venue pattern matched");
            return Some((self.whatsapp_answer(doc), Vec::new()));
        }
        if doc.has_catalog() {
            tracing::debug!(topic = "catalog", "Venue catalog answer");
            return Some(self.catalog_answer(&q, doc));
        }
        None
    }

    pub fn is_hours_question(&self, q: &str) -> bool {
        let patterns = ["orari", "orario", "apert", "chius", "a che ora"];
        patterns.iter().any(|p| q.contains(p))
    }

    pub fn is_address_question(&self, q: &str) -> bool {
        let patterns = [
            "dove",
            "indirizzo",
            "come si arriva",
            "come arrivare",
            "raggiunger",
            "mappa",
            "indicazioni",
        ];
        patterns.iter().any(|p| q.contains(p))
    }

    pub fn is_phone_question(&self, q: &str) -> bool {
        let patterns = ["telefon", "chiama"];
        patterns.iter().any(|p| q.contains(p))
    }

    pub fn is_whatsapp_question(&self, q: &str) -> bool {
        let patterns = ["whatsapp", "whats app", "contatt", "messagg", "scriver"];
        patterns.iter().any(|p| q.contains(p))
    }

    pub fn is_catalog_question(&self, q: &str) -> bool {
        let patterns = [
            "menu",
            "prodott",
            "serviz",
            "offert",
            "offrite",
            "cosa avete",
            "cosa proponete",
            "catalogo",
            "listino",
            "prezz",
            "specialit",
            "consigli",
            "qualcosa",
        ];
        patterns.iter().any(|p| q.contains(p))
    }

    pub(crate) fn hours_answer(&self, doc: &Document) -> String {
        let hours = doc
            .config
            .as_ref()
            .and_then(|c| c.hours.as_deref())
            .unwrap_or("non indicato");
        let mut answer = format!("Orari: {}", hours);

        let hints: Vec<&str> = doc.suggestions.iter().map(String::as_str).take(3).collect();
        if !hints.is_empty() {
            answer.push_str("\nPosso aiutarti anche con: ");
            answer.push_str(&hints.join(", "));
        }
        answer
    }

    pub(crate) fn address_answer(&self, doc: &Document) -> String {
        let address = doc
            .config
            .as_ref()
            .and_then(|c| c.address.as_deref())
            .unwrap_or("non indicato");
        let mut answer = format!("Indirizzo: {}", address);

        let has_directions = doc
            .config
            .as_ref()
            .and_then(|c| c.map_url.as_ref())
            .is_some()
            || !doc.cta.is_empty();
        if has_directions {
            answer.push_str("\nUsa il pulsante Indicazioni per raggiungerci.");
        }
        answer
    }

    fn phone_answer(&self, doc: &Document) -> String {
        let phone = doc
            .config
            .as_ref()
            .and_then(|c| c.phone.as_deref())
            .unwrap_or("-");
        format!("Telefono: {}", phone)
    }

    fn whatsapp_answer(&self, doc: &Document) -> String {
        let whatsapp = doc
            .config
            .as_ref()
            .and_then(|c| c.whatsapp.as_deref())
            .unwrap_or("-");
        format!("WhatsApp: {}", whatsapp)
    }

    /// One-shot catalog highlight: filter by the question, then present the
    /// top two ranked favorite-first, name ascending. Not tied to rotation
    /// state, so the pool is built without exclusions; the highlighted
    /// names are returned alongside the answer. An empty filtered pool
    /// redirects to the category list instead.
    fn catalog_answer(&self, q: &str, doc: &Document) -> (String, Vec<String>) {
        let filters = parse_filters(q);
        let mut pool = catalog::candidates(doc, &filters, &HashSet::new());

        if pool.is_empty() {
            let names = doc.category_names(5);
            if names.is_empty() {
                return (
                    "Posso suggerirti qualcosa dal nostro catalogo, chiedimi pure.".to_string(),
                    Vec::new(),
                );
            }
            return (
                format!("Dai un'occhiata alle nostre categorie: {}.", names.join(", ")),
                Vec::new(),
            );
        }

        pool.sort_by(|a, b| b.favorite.cmp(&a.favorite).then_with(|| a.name.cmp(&b.name)));
        pool.truncate(2);
        let line = pool
            .iter()
            .map(|item| catalog::item_line(item))
            .collect::<Vec<_>>()
            .join(" · ");
        let used = pool.iter().map(|item| item.name.clone()).collect();
        (format!("Ti consiglio: {}. Vuoi altre opzioni?", line), used)
    }
}

impl Default for VenueClassifier {
    fn default() -> Self {
        Self::new()
    }
}
