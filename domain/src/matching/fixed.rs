//! Canned replies for greetings and courtesy phrases.
//!
//! Checked before any corpus lookup so small talk never reaches the fuzzy
//! matcher or gets routed to a human.

/// Exact phrase → reply table
const FIXED_RESPONSES: &[(&str, &str)] = &[
    ("hi", "Hello! How can I assist you today?"),
    ("hello", "Hi there! What can I do for you?"),
    ("hey", "Hey! How can I help you?"),
    ("good morning", "Good morning! How can I assist you today?"),
    ("good afternoon", "Good afternoon! What can I do for you?"),
    ("good evening", "Good evening! How can I help you?"),
    ("bye", "Goodbye! Have a great day!"),
    ("goodbye", "See you later! Take care!"),
    ("thank you", "You're welcome!"),
    ("thanks", "You're welcome!"),
    ("welcome", "Thank you! How can I assist you further?"),
    (
        "how are you",
        "I'm just a bot, but I'm here to help you! How can I assist you today?",
    ),
    (
        "what's up",
        "Not much, just here to help you! What can I do for you?",
    ),
];

/// Exact-match lookup over the fixed phrase table.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedResponses;

impl FixedResponses {
    /// Reply for an already-normalized query, if it is a known phrase
    pub fn lookup(&self, normalized: &str) -> Option<&'static str> {
        FIXED_RESPONSES
            .iter()
            .find(|(phrase, _)| *phrase == normalized)
            .map(|(_, reply)| *reply)
    }

    /// All known phrases
    pub fn phrases(&self) -> impl Iterator<Item = &'static str> {
        FIXED_RESPONSES.iter().map(|(phrase, _)| *phrase)
    }
}
