//! The spoken result of one intent.

/// Keeps the voice session open for a follow-up utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuation {
    /// Platform intent names accepted for the follow-up.
    pub intent_filter: Vec<String>,
}

/// Text to speak plus optional continuation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub continuation: Option<Continuation>,
}

impl Response {
    /// A reply that ends the session.
    pub fn end(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            continuation: None,
        }
    }

    /// A question that keeps the session open for the given intents.
    pub fn ask(text: impl Into<String>, intent_filter: Vec<String>) -> Self {
        Self {
            text: text.into(),
            continuation: Some(Continuation { intent_filter }),
        }
    }

    /// Whether the voice session should be closed after speaking.
    pub fn ends_session(&self) -> bool {
        self.continuation.is_none()
    }
}
