use serde::{Deserialize, Serialize};

use speakband_core::{AnswerReport, QuestionFeedback, TestReport, TestSubmission, TestSummary};

// === Request DTOs ===

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeBatchRequest {
    #[serde(default)]
    pub test_id: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    #[serde(default)]
    pub sample_answers: Option<Vec<String>>,
}

impl From<AnalyzeBatchRequest> for TestSubmission {
    fn from(req: AnalyzeBatchRequest) -> Self {
        TestSubmission {
            test_id: req.test_id,
            questions: req.questions,
            answers: req.answers,
            sample_answers: req.sample_answers,
        }
    }
}

// === Response DTOs ===

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub feedback: String,
    pub fluency: f64,
    pub lexical: f64,
    pub grammar: f64,
    pub pronunciation: f64,
    pub overall: f64,
    pub grammar_errors: usize,
    pub word_count: usize,
    pub vocabulary_diversity: u32,
    pub grammar_check_success: bool,
}

impl From<AnswerReport> for AnalyzeResponse {
    fn from(report: AnswerReport) -> Self {
        AnalyzeResponse {
            feedback: report.feedback,
            fluency: report.scores.fluency.value(),
            lexical: report.scores.lexical.value(),
            grammar: report.scores.grammar.value(),
            pronunciation: report.scores.pronunciation.value(),
            overall: report.scores.overall.value(),
            grammar_errors: report.grammar_error_count,
            word_count: report.metrics.word_count,
            vocabulary_diversity: (report.metrics.type_token_ratio * 100.0).round() as u32,
            grammar_check_success: report.grammar_check_success,
        }
    }
}

/// One entry of a batch response. Unanswered questions report zero bands
/// and omit the word and error counts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionFeedbackDto {
    pub feedback: String,
    pub fluency: f64,
    pub lexical: f64,
    pub grammar: f64,
    pub pronunciation: f64,
    pub overall: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar_errors: Option<usize>,
    pub sample_answer: String,
    pub question: String,
}

impl From<QuestionFeedback> for QuestionFeedbackDto {
    fn from(entry: QuestionFeedback) -> Self {
        match entry.scores {
            Some(scores) => QuestionFeedbackDto {
                feedback: entry.feedback,
                fluency: scores.fluency.value(),
                lexical: scores.lexical.value(),
                grammar: scores.grammar.value(),
                pronunciation: scores.pronunciation.value(),
                overall: scores.overall.value(),
                word_count: Some(entry.word_count),
                grammar_errors: Some(entry.grammar_errors),
                sample_answer: entry.sample_answer.unwrap_or_default(),
                question: entry.question,
            },
            None => QuestionFeedbackDto {
                feedback: entry.feedback,
                fluency: 0.0,
                lexical: 0.0,
                grammar: 0.0,
                pronunciation: 0.0,
                overall: 0.0,
                word_count: None,
                grammar_errors: None,
                sample_answer: entry.sample_answer.unwrap_or_default(),
                question: entry.question,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummaryDto {
    pub fluency: f64,
    pub lexical: f64,
    pub grammar: f64,
    pub pronunciation: f64,
    pub overall: f64,
    pub total_words: usize,
    pub total_errors: usize,
    pub questions_answered: usize,
}

impl From<TestSummary> for TestSummaryDto {
    fn from(summary: TestSummary) -> Self {
        TestSummaryDto {
            fluency: summary.fluency.value(),
            lexical: summary.lexical.value(),
            grammar: summary.grammar.value(),
            pronunciation: summary.pronunciation.value(),
            overall: summary.overall.value(),
            total_words: summary.total_words,
            total_errors: summary.total_errors,
            questions_answered: summary.questions_answered,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeBatchResponse {
    pub feedbacks: Vec<QuestionFeedbackDto>,
    /// Null when no question was answered.
    pub test_summary: Option<TestSummaryDto>,
    pub test_id: String,
}

impl From<TestReport> for AnalyzeBatchResponse {
    fn from(report: TestReport) -> Self {
        AnalyzeBatchResponse {
            feedbacks: report.feedbacks.into_iter().map(QuestionFeedbackDto::from).collect(),
            test_summary: report.summary.map(TestSummaryDto::from),
            test_id: report.test_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub version: &'static str,
}
