use crate::core::{Priority, PriorityClassifier};

pub const DEFAULT_HIGH_KEYWORDS: &[&str] = &[
    "urgent",
    "emergency",
    "asap",
    "broken",
    "not working",
    "refund",
    "complaint",
];

pub const DEFAULT_MEDIUM_KEYWORDS: &[&str] = &["when", "how long", "issue", "problem"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct KeywordRule {
    priority: Priority,
    keywords: Vec<String>,
}

/// Ordered keyword rules; the first rule with a substring hit wins.
///
/// Matching is case-insensitive and has no word boundaries, so "when"
/// also matches "whenever". Text that matches no rule gets the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordClassifier {
    rules: Vec<KeywordRule>,
    fallback: Priority,
}

impl KeywordClassifier {
    pub fn new(fallback: Priority) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    /// Appends a rule evaluated after every rule added before it.
    pub fn with_rule<I, S>(mut self, priority: Priority, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if !keywords.is_empty() {
            self.rules.push(KeywordRule { priority, keywords });
        }
        self
    }

    pub fn fallback(&self) -> Priority {
        self.fallback
    }

    /// Keyword that decided the tier, if any.
    pub fn explain(&self, text: &str) -> Option<(Priority, &str)> {
        let haystack = text.to_lowercase();
        self.rules.iter().find_map(|rule| {
            rule.keywords
                .iter()
                .find(|keyword| haystack.contains(keyword.as_str()))
                .map(|keyword| (rule.priority, keyword.as_str()))
        })
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(Priority::Medium)
            .with_rule(Priority::High, DEFAULT_HIGH_KEYWORDS)
            .with_rule(Priority::Medium, DEFAULT_MEDIUM_KEYWORDS)
    }
}

impl PriorityClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Priority {
        self.explain(text)
            .map(|(priority, _)| priority)
            .unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_keywords_any_case_anywhere() {
        let classifier = KeywordClassifier::default();
        for text in [
            "URGENT: please call me",
            "my order arrived Broken",
            "the app is not working at all",
            "I want a refund",
            "Formal complaint about the courier",
            "need this asap",
        ] {
            assert_eq!(classifier.classify(text), Priority::High, "{}", text);
        }
    }

    #[test]
    fn test_high_wins_over_medium() {
        let classifier = KeywordClassifier::default();
        assert_eq!(
            classifier.classify("When will my refund arrive? This is a problem"),
            Priority::High
        );
    }

    #[test]
    fn test_medium_keywords() {
        let classifier = KeywordClassifier::default();
        assert_eq!(classifier.classify("How long does shipping take?"), Priority::Medium);
        assert_eq!(
            classifier.explain("I have an issue with login"),
            Some((Priority::Medium, "issue"))
        );
    }

    #[test]
    fn test_unmatched_and_empty_default_to_medium() {
        let classifier = KeywordClassifier::default();
        assert_eq!(classifier.classify(""), Priority::Medium);
        assert_eq!(classifier.classify("hello"), Priority::Medium);
        assert_eq!(classifier.explain("hello"), None);
    }

    #[test]
    fn test_configured_low_rule_and_fallback() {
        let classifier = KeywordClassifier::new(Priority::Low)
            .with_rule(Priority::High, ["outage"])
            .with_rule(Priority::Low, ["Thanks"]);
        assert_eq!(classifier.classify("Major OUTAGE, thanks"), Priority::High);
        assert_eq!(classifier.classify("thanks for the help"), Priority::Low);
        assert_eq!(classifier.classify("hello"), Priority::Low);
    }

    #[test]
    fn test_blank_keywords_are_dropped() {
        let classifier = KeywordClassifier::new(Priority::Medium).with_rule(Priority::High, ["", "  "]);
        assert_eq!(classifier.classify("anything"), Priority::Medium);
    }
}
