//! Municipality-side intent classifier: story, project, events, offices,
//! open data, website, and the quick-reply topic menu.

use crate::document::Document;
use crate::text::normalize;
use std::sync::LazyLock;

// "sito"/"web"/"online" need word boundaries: "visitare" contains "sito".
static SITE_WORD_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\b(sito|web|website|online)\b").expect("site word regex is valid")
});

pub struct MunicipalityClassifier {}

impl MunicipalityClassifier {
    pub fn new() -> Self {
        Self {}
    }

    /// First-match classification over municipality topics. The final step
    /// falls back to a quick-reply topic menu when the document carries
    /// suggestions; otherwise the classifier declines with `None`.
    pub fn classify(&self, question: &str, doc: &Document) -> Option<String> {
        let q = normalize(question);

        if self.is_story_question(&q) {
            tracing::debug!(topic = "story", "Municipality pattern matched");
            return Some(self.story_answer(doc));
        }
        if self.is_project_question(&q) {
            tracing::debug!(topic = "project", "Municipality pattern matched");
            return Some(self.project_answer(doc));
        }
        if self.is_events_question(&q) {
            tracing::debug!(topic = "events", "Municipality pattern matched");
            return Some(self.events_answer(doc));
        }
        if self.is_offices_question(&q) {
            tracing::debug!(topic = "offices", "Municipality pattern matched");
            return Some(self.offices_answer(doc));
        }
        if self.is_open_data_question(&q) {
            tracing::debug!(topic = "open_data", "Municipality pattern matched");
            return Some(self.open_data_answer(doc));
        }
        if self.is_website_question(&q) {
            tracing::debug!(topic = "website", "Municipality pattern matched");
            return Some(self.website_answer(doc));
        }
        if !doc.suggestions.is_empty() {
            tracing::debug!(topic = "menu", "Municipality quick-reply menu");
            return Some(self.menu_answer(doc));
        }
        None
    }

    fn is_story_question(&self, q: &str) -> bool {
        let patterns = [
            "storia", "territorio", "chi si", "raccontami", "borgo", "paese", "tradizion",
            "origini",
        ];
        patterns.iter().any(|p| q.contains(p))
    }

    fn is_project_question(&self, q: &str) -> bool {
        let patterns = ["progett", "pilota", "digital", "iniziativa", "sperimentazion"];
        patterns.iter().any(|p| q.contains(p))
    }

    fn is_events_question(&self, q: &str) -> bool {
        let patterns = ["event", "fest", "sagr", "ricorrenz", "appuntament"];
        patterns.iter().any(|p| q.contains(p))
    }

    fn is_offices_question(&self, q: &str) -> bool {
        let patterns = ["uffic", "comune", "municip", "contatt", "anagrafe", "sindaco"];
        patterns.iter().any(|p| q.contains(p))
    }

    fn is_open_data_question(&self, q: &str) -> bool {
        let patterns = ["open data", "opendata", "dati apert", "dataset", "csv", "json"];
        patterns.iter().any(|p| q.contains(p))
    }

    fn is_website_question(&self, q: &str) -> bool {
        SITE_WORD_RE.is_match(q)
    }

    fn story_answer(&self, doc: &Document) -> String {
        doc.about
            .clone()
            .or_else(|| doc.story.clone())
            .unwrap_or_else(|| {
                "Trovi la storia e il territorio nella sezione dedicata.".to_string()
            })
    }

    fn project_answer(&self, doc: &Document) -> String {
        let mut answer = doc
            .pilot
            .as_ref()
            .and_then(|p| p.description.clone())
            .unwrap_or_else(|| {
                "Un progetto per portare i servizi digitali ai cittadini.".to_string()
            });

        let goals: Vec<&str> = doc
            .pilot
            .as_ref()
            .map(|p| p.goals.iter().map(String::as_str).take(2).collect())
            .unwrap_or_default();
        if !goals.is_empty() {
            answer.push_str("\nObiettivi: ");
            answer.push_str(&goals.join("; "));
        }
        answer
    }

    fn events_answer(&self, doc: &Document) -> String {
        if doc.festivities.is_empty() {
            return "Al momento non sono indicati eventi in programma.".to_string();
        }
        let listed: Vec<String> = doc
            .festivities
            .iter()
            .take(2)
            .map(|f| match &f.month {
                Some(month) => format!("{} ({})", f.name, month),
                None => f.name.clone(),
            })
            .collect();
        format!("Prossimi eventi: {}.", listed.join(", "))
    }

    fn offices_answer(&self, doc: &Document) -> String {
        match doc.social.as_ref().and_then(|s| s.website.as_deref()) {
            Some(url) => format!("Per uffici e contatti puoi visitare {}", url),
            None => "Per uffici e contatti visita il sito istituzionale del comune.".to_string(),
        }
    }

    fn open_data_answer(&self, doc: &Document) -> String {
        let open_data = doc.open_data.as_ref();
        let mut formats = Vec::new();
        if open_data.and_then(|o| o.json.as_ref()).is_some() {
            formats.push("JSON");
        }
        if open_data.and_then(|o| o.csv.as_ref()).is_some() {
            formats.push("CSV");
        }
        if formats.is_empty() {
            "Open data: non disponibile.".to_string()
        } else {
            format!("Open data disponibili nei formati: {}.", formats.join(", "))
        }
    }

    fn website_answer(&self, doc: &Document) -> String {
        match doc.social.as_ref().and_then(|s| s.website.as_deref()) {
            Some(url) => format!("Sito: {}", url),
            None => "Sito: non indicato".to_string(),
        }
    }

    fn menu_answer(&self, doc: &Document) -> String {
        let topics: Vec<&str> = doc.suggestions.iter().map(String::as_str).take(4).collect();
        format!("Posso aiutarti con: {}.", topics.join(", "))
    }
}

impl Default for MunicipalityClassifier {
    fn default() -> Self {
        Self::new()
    }
}
