//! Symptom triage for the assistant chat.
//!
//! Maps free text onto a fixed guidance message. Matching is lowercase
//! substring containment (not word boundaries) against ordered keyword
//! groups; the first group that matches wins, most severe first.

use serde::{Deserialize, Serialize};

use crate::models::TriageCategory;

/// Guidance produced for one piece of user text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResponse {
    pub message: String,
    pub category: TriageCategory,
}

/// A keyword group and the canned reply it produces.
pub struct TriageRule {
    /// Identifier for logs.
    pub id: &'static str,
    keywords: &'static [&'static str],
    pub category: TriageCategory,
    pub message: &'static str,
}

impl TriageRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|kw| lowered.contains(kw))
    }
}

// ── Keyword sets ────────────────────────────────────────────

static EMERGENCY_KEYWORDS: &[&str] = &["emergency", "bleeding", "severe pain"];

static DISCOMFORT_KEYWORDS: &[&str] = &["dizzy", "nausea", "morning sickness"];

static DEVELOPMENT_KEYWORDS: &[&str] = &["baby", "develop"];

static NUTRITION_KEYWORDS: &[&str] = &["eat", "food", "nutrition"];

static APPOINTMENT_KEYWORDS: &[&str] = &["appointment"];

// ── Messages ────────────────────────────────────────────────

pub const EMERGENCY_MESSAGE: &str = "⚠️ This sounds like it could be serious. Please contact your doctor immediately or go to the nearest hospital. For immediate emergency assistance, tap the Emergency button at the bottom of the screen.";

pub const DISCOMFORT_MESSAGE: &str = "Morning sickness and dizziness are common during pregnancy. Try eating small, frequent meals and stay hydrated. Ginger tea can help with nausea. However, if symptoms are severe or persistent, please consult your healthcare provider.";

pub const DEVELOPMENT_MESSAGE: &str = "At 28 weeks, your baby is about the size of an eggplant! Their brain is developing rapidly, and they can now blink and have sleep-wake cycles. You might feel more pronounced movements now. Keep up with your prenatal visits to monitor development.";

pub const NUTRITION_MESSAGE: &str = "Focus on iron-rich foods like lean meats, beans, and spinach. Include calcium sources like dairy or fortified plant milks. Don't forget your prenatal vitamins! Avoid raw fish, unpasteurized foods, and limit caffeine. Would you like specific meal suggestions?";

pub const APPOINTMENT_MESSAGE: &str = "Your next appointment is scheduled for Friday at 2:00 PM with Dr. Mensah. You'll have a routine checkup and ultrasound. Make sure to bring your list of questions and any concerns you'd like to discuss.";

pub const FALLBACK_MESSAGE: &str = "I understand your concern. During pregnancy, it's important to stay informed and address any worries. Can you provide more specific details about what you're experiencing? This will help me give you better guidance.";

/// Opening message of every conversation.
pub const GREETING_MESSAGE: &str = "Hello! I'm your AI health assistant. How can I help you today? You can ask me about pregnancy symptoms, nutrition, or any health concerns.";

// ── Rule registry ───────────────────────────────────────────

/// Rules in priority order. Order is part of the contract.
static RULES: &[TriageRule] = &[
    TriageRule {
        id: "TRI-EMERGENCY",
        keywords: EMERGENCY_KEYWORDS,
        category: TriageCategory::Emergency,
        message: EMERGENCY_MESSAGE,
    },
    TriageRule {
        id: "TRI-DISCOMFORT",
        keywords: DISCOMFORT_KEYWORDS,
        category: TriageCategory::Warning,
        message: DISCOMFORT_MESSAGE,
    },
    TriageRule {
        id: "TRI-DEVELOPMENT",
        keywords: DEVELOPMENT_KEYWORDS,
        category: TriageCategory::Normal,
        message: DEVELOPMENT_MESSAGE,
    },
    TriageRule {
        id: "TRI-NUTRITION",
        keywords: NUTRITION_KEYWORDS,
        category: TriageCategory::Normal,
        message: NUTRITION_MESSAGE,
    },
    TriageRule {
        id: "TRI-APPOINTMENT",
        keywords: APPOINTMENT_KEYWORDS,
        category: TriageCategory::Normal,
        message: APPOINTMENT_MESSAGE,
    },
];

/// First rule matching `text`, if any.
pub fn matching_rule(text: &str) -> Option<&'static TriageRule> {
    let lowered = text.to_lowercase();
    RULES.iter().find(|rule| rule.matches(&lowered))
}

/// Classify user text. Total over all inputs: no match yields the
/// fallback request for more detail with category `normal`.
pub fn classify(text: &str) -> TriageResponse {
    match matching_rule(text) {
        Some(rule) => TriageResponse {
            message: rule.message.to_string(),
            category: rule.category,
        },
        None => TriageResponse {
            message: FALLBACK_MESSAGE.to_string(),
            category: TriageCategory::Normal,
        },
    }
}

/// Predefined prompts offered as one-tap inputs.
pub fn quick_questions() -> Vec<&'static str> {
    vec![
        "How is my baby developing?",
        "What should I eat today?",
        "I have morning sickness",
        "When is my next appointment?",
        "I feel dizzy",
        "Emergency symptoms",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bleeding_is_emergency_regardless_of_other_keywords() {
        let texts = [
            "bleeding",
            "I am dizzy and bleeding",
            "my baby: light bleeding after food",
            "nausea, bleeding, appointment tomorrow?",
        ];
        for text in texts {
            let r = classify(text);
            assert_eq!(r.category, TriageCategory::Emergency, "{text}");
            assert_eq!(r.message, EMERGENCY_MESSAGE);
        }
    }

    #[test]
    fn empty_input_falls_back() {
        let r = classify("");
        assert_eq!(r.category, TriageCategory::Normal);
        assert_eq!(r.message, FALLBACK_MESSAGE);
        assert!(matching_rule("").is_none());
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(classify("BLEEDING"), classify("bleeding"));
        assert_eq!(classify("Morning Sickness").category, TriageCategory::Warning);
    }

    #[test]
    fn severe_pain_outranks_dizzy() {
        let r = classify("I have severe pain and feel dizzy");
        assert_eq!(r.category, TriageCategory::Emergency);
    }

    #[test]
    fn warning_group() {
        for text in ["I feel dizzy", "constant nausea", "I have morning sickness"] {
            let r = classify(text);
            assert_eq!(r.category, TriageCategory::Warning, "{text}");
            assert_eq!(r.message, DISCOMFORT_MESSAGE);
        }
    }

    #[test]
    fn informational_groups_have_distinct_messages() {
        assert_eq!(classify("How is my baby developing?").message, DEVELOPMENT_MESSAGE);
        assert_eq!(classify("nutrition tips").message, NUTRITION_MESSAGE);
        assert_eq!(classify("When is my next appointment?").message, APPOINTMENT_MESSAGE);
        for text in ["baby", "nutrition", "appointment"] {
            assert_eq!(classify(text).category, TriageCategory::Normal);
        }
    }

    #[test]
    fn development_outranks_nutrition() {
        // "baby" group is checked before "eat"
        assert_eq!(classify("what should my baby eat").message, DEVELOPMENT_MESSAGE);
    }

    #[test]
    fn substring_not_word_boundary() {
        // "eat" inside "great", "develop" inside "redeveloped"
        assert_eq!(classify("I feel great").message, NUTRITION_MESSAGE);
        assert_eq!(classify("redeveloped").message, DEVELOPMENT_MESSAGE);
        assert_eq!(classify("emergencyroom").category, TriageCategory::Emergency);
    }

    #[test]
    fn unmatched_text_falls_back() {
        let r = classify("hello there");
        assert_eq!(r.message, FALLBACK_MESSAGE);
        assert_eq!(r.category, TriageCategory::Normal);
    }

    #[test]
    fn deterministic() {
        let text = "Is spinach good food?";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn quick_questions_route_to_expected_rules() {
        let ids: Vec<_> = quick_questions()
            .into_iter()
            .map(|q| matching_rule(q).map(|r| r.id))
            .collect();
        assert_eq!(
            ids,
            vec![
                Some("TRI-DEVELOPMENT"),
                Some("TRI-NUTRITION"),
                Some("TRI-DISCOMFORT"),
                Some("TRI-APPOINTMENT"),
                Some("TRI-DISCOMFORT"),
                Some("TRI-EMERGENCY"),
            ]
        );
    }
}
