use serde::{Deserialize, Serialize};

use crate::band::Band;
use crate::metrics::TranscriptMetrics;
use crate::scoring::BandScores;

/// Full evaluation of one transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerReport {
    pub scores: BandScores,
    pub metrics: TranscriptMetrics,
    pub feedback: String,
    pub grammar_error_count: usize,
    /// False when the grammar checker was unavailable and scoring ran
    /// without error data.
    pub grammar_check_success: bool,
}

/// A multi-question speaking test to evaluate. Accepts both snake_case
/// and the API's camelCase field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSubmission {
    #[serde(default, alias = "testId")]
    pub test_id: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    #[serde(default, alias = "sampleAnswers")]
    pub sample_answers: Option<Vec<String>>,
}

/// One question's entry in a test report. `scores` is `None` when the
/// question went unanswered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionFeedback {
    pub question: String,
    pub feedback: String,
    pub scores: Option<BandScores>,
    pub word_count: usize,
    pub grammar_errors: usize,
    #[serde(default)]
    pub sample_answer: Option<String>,
}

/// Test-level aggregate over the answered questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSummary {
    pub fluency: Band,
    pub lexical: Band,
    pub grammar: Band,
    pub pronunciation: Band,
    pub overall: Band,
    pub total_words: usize,
    pub total_errors: usize,
    pub questions_answered: usize,
}

impl TestSummary {
    /// Averages per-dimension bands over answered questions, each rounded
    /// to the half point. Returns `None` when nothing was answered; an
    /// absent summary is not the same as a low-scoring one.
    pub fn from_answered(
        scores: &[BandScores],
        total_words: usize,
        total_errors: usize,
    ) -> Option<TestSummary> {
        if scores.is_empty() {
            return None;
        }
        let n = scores.len() as f64;
        let fluency: f64 = scores.iter().map(|s| s.fluency.value()).sum();
        let lexical: f64 = scores.iter().map(|s| s.lexical.value()).sum();
        let grammar: f64 = scores.iter().map(|s| s.grammar.value()).sum();
        let pronunciation: f64 = scores.iter().map(|s| s.pronunciation.value()).sum();

        Some(TestSummary {
            fluency: Band::from_mean(fluency / n),
            lexical: Band::from_mean(lexical / n),
            grammar: Band::from_mean(grammar / n),
            pronunciation: Band::from_mean(pronunciation / n),
            overall: Band::from_mean((fluency + lexical + grammar + pronunciation) / (n * 4.0)),
            total_words,
            total_errors,
            questions_answered: scores.len(),
        })
    }
}

/// Result of evaluating a whole test submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestReport {
    pub test_id: String,
    pub feedbacks: Vec<QuestionFeedback>,
    pub summary: Option<TestSummary>,
}
