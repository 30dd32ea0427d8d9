use serde::{Deserialize, Serialize};

/// One issue reported by the external grammar checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarError {
    /// Character offset of the issue in the checked text.
    pub offset: usize,
    /// Length of the offending span, in characters.
    pub length: usize,
    pub message: String,
    #[serde(default)]
    pub replacements: Vec<String>,
}

impl GrammarError {
    /// First suggested replacement, if the checker offered any.
    pub fn top_replacement(&self) -> Option<&str> {
        self.replacements.first().map(String::as_str)
    }

    /// The offending span of the original text.
    pub fn excerpt(&self, text: &str) -> String {
        text.chars().skip(self.offset).take(self.length).collect()
    }
}

/// Result of one grammar-check call.
///
/// `success` is false when the checker was unreachable or rejected the
/// request; the error list is then empty and scoring proceeds treating
/// the text as error-free.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrammarCheckOutcome {
    pub errors: Vec<GrammarError>,
    pub success: bool,
}

impl GrammarCheckOutcome {
    pub fn ok(errors: Vec<GrammarError>) -> Self {
        Self { errors, success: true }
    }

    /// The degraded outcome: no errors, flagged as unavailable.
    pub fn unavailable() -> Self {
        Self { errors: Vec::new(), success: false }
    }
}
