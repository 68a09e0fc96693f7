//! Customer identity extraction: name, company, email and phone.
//!
//! Every field has its own prioritized pattern list. Segments are scanned in
//! transcript order and a field is filled by the first segment that yields
//! an acceptable capture; it is never overwritten afterwards.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{UNKNOWN_COMPANY, UNKNOWN_CUSTOMER};
use crate::pipeline::processing::patterns::{compile_all, title_case};
use crate::types::CustomerRecord;

static NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        // Explicit label: "customer sarah johnson", "client name is bob lee"
        r"\b(?:customer|client|contact)(?:\s+name)?(?:\s+is)?\s+([a-z]+(?:\s+[a-z]+)?)",
        r"\b(?:spoke|met|called|visited)\s+(?:(?:with|to)\s+)?([a-z]+(?:\s+[a-z]+)?)",
        r"\b(?:call|meeting|demo|chat|conversation|lunch|coffee|talked|chatted|demoed)\s+with\s+([a-z]+(?:\s+[a-z]+)?)",
        // Generic: "with emily rodriguez at ..."
        r"\bwith\s+([a-z]+(?:\s+[a-z]+)?)\s+(?:from|at|of)\b",
    ])
});

static COMPANY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"\b(?:company|organization|organisation|business)(?:\s+name)?(?:\s+is)?\s+([a-z0-9][a-z0-9\s-]*)",
        r"\b(?:works?|working|employed)\s+(?:at|for)\s+([a-z0-9][a-z0-9\s-]*)",
        r"\b(?:dealing|partnering)\s+with\s+([a-z0-9][a-z0-9\s-]*)",
        r"\b(?:from|at)\s+([a-z0-9][a-z0-9\s-]*)",
    ])
});

static EMAIL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"\b(?:email|e-mail|mail)(?:\s+address)?(?:\s+is)?\s+([a-z0-9._%+-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,})\b",
        r"\b([a-z0-9._%+-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,})\b",
    ])
});

static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"\b(?:phone|mobile|cell|number|tel|telephone)(?:\s+number)?(?:\s+is)?\s+((?:1[-.\s]?)?\d{3}[-.\s]?\d{3}[-.\s]?\d{4})\b",
        r"\b((?:1[-.\s]?)?\d{3}[-.\s]?\d{3}[-.\s]?\d{4})\b",
    ])
});

/// Full-string shape an extracted email must have to be kept
static EMAIL_SHAPE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_%+-]+(?:\.[a-z0-9_%+-]+)*@[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,}$").ok());

/// Words that end a captured name or company
const CONNECTORS: &[&str] = &[
    "from", "at", "with", "and", "about", "regarding", "to", "for", "who", "which", "that", "on", "in",
    "today", "yesterday", "tomorrow", "this", "last", "next", "was", "is", "are", "were", "will", "said",
    "since", "because", "but", "so", "after", "before", "during", "where", "when", "via", "by", "over",
];

/// Words that can never start a name or company
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "we", "us", "our", "you", "your", "he", "him", "his", "she", "her", "it", "its",
    "they", "them", "their", "a", "an", "the", "some", "any", "all", "this", "that", "these", "those",
    "um", "uh", "er", "ah", "hmm", "like", "well", "so", "okay", "ok", "yeah", "yes", "no", "just",
    "about", "back", "again", "least", "first", "once", "home", "scratch", "time", "moment", "point",
    "end", "noon", "around", "info", "information", "details", "number", "email", "phone", "list",
    "person", "someone", "everyone", "team", "up", "out", "over", "there", "here",
    // predicates that follow "client is ..."
    "not", "very", "still", "also", "really", "happy", "unhappy", "interested", "satisfied", "pleased",
    "excited", "concerned", "upset", "busy", "ready", "keen", "unsure", "waiting", "going", "looking",
    "asking", "considering",
];

const LEADING_ARTICLES: &[&str] = &["the", "a", "an"];

const MAX_NAME_WORDS: usize = 2;
const MAX_COMPANY_WORDS: usize = 4;

/// Accumulates the first accepted value per field; finalized once by [`CustomerBuilder::build`].
#[derive(Debug, Default)]
struct CustomerBuilder {
    name: Option<String>,
    company: Option<String>,
    email: Option<String>,
    phone: Option<String>,
}

impl CustomerBuilder {
    fn is_complete(&self) -> bool {
        self.name.is_some() && self.company.is_some() && self.email.is_some() && self.phone.is_some()
    }

    fn observe(&mut self, segment: &str) {
        fill_once(&mut self.name, || match_field(&NAME_PATTERNS, segment, clean_name));
        fill_once(&mut self.company, || match_field(&COMPANY_PATTERNS, segment, clean_company));
        fill_once(&mut self.email, || match_field(&EMAIL_PATTERNS, segment, clean_email));
        fill_once(&mut self.phone, || match_field(&PHONE_PATTERNS, segment, clean_phone));
    }

    fn build(self) -> CustomerRecord {
        CustomerRecord {
            name: self.name.unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string()),
            company: self.company.unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            notes: String::new(),
        }
    }
}

fn fill_once(slot: &mut Option<String>, candidate: impl FnOnce() -> Option<String>) {
    if slot.is_none() {
        *slot = candidate();
    }
}

/// Try each pattern in priority order, and each of its matches left to right,
/// until `clean` accepts a capture.
fn match_field(patterns: &[Regex], segment: &str, clean: fn(&str) -> Option<String>) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures_iter(segment)
            .filter_map(|caps| caps.get(1))
            .find_map(|m| clean(m.as_str()))
    })
}

/// Extract the customer identity from normalized segments.
pub fn extract_customer(segments: &[String]) -> CustomerRecord {
    let mut builder = CustomerBuilder::default();

    for segment in segments {
        if builder.is_complete() {
            break;
        }
        builder.observe(segment);
    }

    tracing::debug!(
        name_found = builder.name.is_some(),
        company_found = builder.company.is_some(),
        email_found = builder.email.is_some(),
        phone_found = builder.phone.is_some(),
        "Customer extraction finished"
    );

    builder.build()
}

fn take_words(capture: &str, max_words: usize) -> Vec<&str> {
    capture
        .split_whitespace()
        .take_while(|w| !CONNECTORS.contains(w))
        .take(max_words)
        .collect()
}

fn clean_name(capture: &str) -> Option<String> {
    let first = capture.split_whitespace().next()?;
    if STOP_WORDS.contains(&first) || CONNECTORS.contains(&first) {
        return None;
    }

    let words: Vec<&str> = take_words(capture, MAX_NAME_WORDS)
        .into_iter()
        .take_while(|w| !STOP_WORDS.contains(w))
        .collect();
    if words.is_empty() {
        return None;
    }
    Some(title_case(&words.join(" ")))
}

fn clean_company(capture: &str) -> Option<String> {
    let mut words = capture.split_whitespace().peekable();
    while words.peek().is_some_and(|w| LEADING_ARTICLES.contains(w)) {
        words.next();
    }
    let rest = words.collect::<Vec<_>>().join(" ");

    let first = rest.split_whitespace().next()?;
    if STOP_WORDS.contains(&first) || CONNECTORS.contains(&first) || first.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let kept = take_words(&rest, MAX_COMPANY_WORDS);
    if kept.is_empty() {
        return None;
    }
    Some(title_case(&kept.join(" ")))
}

fn clean_email(capture: &str) -> Option<String> {
    let email = capture.trim_end_matches('.').to_lowercase();
    is_valid_email(&email).then_some(email)
}

fn clean_phone(capture: &str) -> Option<String> {
    let phone = capture.trim();
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    (digits == 10 || digits == 11).then(|| phone.to_string())
}

/// Syntactic email check shared with the schema's email pattern
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_SHAPE.as_ref().is_some_and(|re| re.is_match(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::processing::normalize::normalize;

    fn customer(transcript: &str) -> CustomerRecord {
        extract_customer(&normalize(transcript))
    }

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(NAME_PATTERNS.len(), 4);
        assert_eq!(COMPANY_PATTERNS.len(), 4);
        assert_eq!(EMAIL_PATTERNS.len(), 2);
        assert_eq!(PHONE_PATTERNS.len(), 2);
        assert!(EMAIL_SHAPE.is_some());
    }

    #[test]
    fn test_extracts_name_and_company_from_call() {
        let record = customer("I had a call with Sarah Johnson from TechStart Inc. She's interested.");
        assert_eq!(record.name, "Sarah Johnson");
        assert_eq!(record.company, "Techstart Inc");
    }

    #[test]
    fn test_single_word_name_stops_at_connector() {
        let record = customer("Met with John from Acme. Discussed pricing.");
        assert_eq!(record.name, "John");
        assert_eq!(record.company, "Acme");
    }

    #[test]
    fn test_generic_with_from_pattern() {
        let record = customer("Great news! I just closed the deal with Emily Rodriguez at Innovative Solutions.");
        assert_eq!(record.name, "Emily Rodriguez");
        assert_eq!(record.company, "Innovative Solutions");
    }

    #[test]
    fn test_label_pattern_has_priority() {
        let record = customer("Client name is Dana Wu, we met with Bob at Initech.");
        assert_eq!(record.name, "Dana Wu");
    }

    #[test]
    fn test_first_segment_wins() {
        let record = customer("Spoke with Ann Lee. Later I met Tom Hardy.");
        assert_eq!(record.name, "Ann Lee");
    }

    #[test]
    fn test_label_followed_by_predicate_is_not_a_name() {
        let record = customer("Client is happy with the budget of 5 people.");
        assert_eq!(record.name, UNKNOWN_CUSTOMER);

        let record = customer("The customer is not interested. Spoke with Ann Lee.");
        assert_eq!(record.name, "Ann Lee");
    }

    #[test]
    fn test_pronoun_capture_is_rejected() {
        let record = customer("Contact me at not-an-email.");
        assert_eq!(record.name, UNKNOWN_CUSTOMER);
        assert_eq!(record.email, "");
    }

    #[test]
    fn test_email_and_phone() {
        let record = customer("Her email is Sarah.J@TechStart.io and her phone is 555-123-4567.");
        assert_eq!(record.email, "sarah.j@techstart.io");
        assert_eq!(record.phone, "555-123-4567");
    }

    #[test]
    fn test_sentinels_when_nothing_matches() {
        let record = customer("Um, uh... the and a of!");
        assert_eq!(record.name, UNKNOWN_CUSTOMER);
        assert_eq!(record.company, UNKNOWN_COMPANY);
        assert_eq!(record.email, "");
        assert_eq!(record.phone, "");
        assert_eq!(record.notes, "");
    }

    #[test]
    fn test_company_skips_articles_and_filler() {
        assert_eq!(clean_company("the acme group about paint"), Some("Acme Group".to_string()));
        assert_eq!(clean_company("the moment"), None);
        assert_eq!(clean_company("3 pm"), None);
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a.b@c.io"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
    }
}
