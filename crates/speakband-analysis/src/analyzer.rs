use std::sync::Arc;

use tracing::info;

use speakband_core::{
    AnswerReport, BandScores, FeedbackComposer, QuestionContext, QuestionFeedback, Result,
    SpeakBandError, TestReport, TestSubmission, TestSummary, TranscriptMetrics,
};

use crate::check::GrammarCheck;

/// End-to-end transcript evaluation: grammar check, metric extraction,
/// band scoring and feedback rendering.
pub struct Analyzer {
    checker: Arc<dyn GrammarCheck>,
    composer: FeedbackComposer,
}

impl Analyzer {
    pub fn new(checker: Arc<dyn GrammarCheck>, composer: FeedbackComposer) -> Self {
        Self { checker, composer }
    }

    /// Scores one transcript. Rejects empty and whitespace-only input
    /// before touching the grammar checker.
    pub async fn analyze(&self, text: &str) -> Result<AnswerReport> {
        if text.trim().is_empty() {
            return Err(SpeakBandError::EmptyText);
        }

        let check = self.checker.check(text).await;
        let metrics = TranscriptMetrics::from_text(text);
        let scores = BandScores::from_metrics(&metrics, check.errors.len());
        let feedback = self.composer.compose(&scores, &metrics, &check);

        info!(
            overall = scores.overall.value(),
            words = metrics.word_count,
            grammar_errors = check.errors.len(),
            grammar_check = check.success,
            "transcript analyzed"
        );

        Ok(AnswerReport {
            scores,
            metrics,
            feedback,
            grammar_error_count: check.errors.len(),
            grammar_check_success: check.success,
        })
    }

    /// Evaluates a whole test. Questions are processed in order, one
    /// grammar check at a time, so reports are deterministic for a given
    /// submission. Blank answers produce a placeholder entry and are left
    /// out of the summary.
    pub async fn run_test(&self, submission: &TestSubmission) -> Result<TestReport> {
        if submission.questions.len() != submission.answers.len() {
            return Err(SpeakBandError::ShapeMismatch {
                questions: submission.questions.len(),
                answers: submission.answers.len(),
            });
        }

        let mut feedbacks = Vec::with_capacity(submission.answers.len());
        let mut answered: Vec<BandScores> = Vec::new();
        let mut total_words = 0;
        let mut total_errors = 0;

        for (index, (question, answer)) in
            submission.questions.iter().zip(&submission.answers).enumerate()
        {
            let number = index + 1;
            let sample_answer = submission
                .sample_answers
                .as_ref()
                .and_then(|samples| samples.get(index))
                .filter(|sample| !sample.is_empty())
                .cloned();

            if answer.trim().is_empty() {
                feedbacks.push(QuestionFeedback {
                    question: question.clone(),
                    feedback: FeedbackComposer::no_answer(number, question),
                    scores: None,
                    word_count: 0,
                    grammar_errors: 0,
                    sample_answer,
                });
                continue;
            }

            let check = self.checker.check(answer).await;
            let metrics = TranscriptMetrics::from_text(answer);
            let scores = BandScores::from_metrics(&metrics, check.errors.len());
            let context = QuestionContext {
                number,
                question,
                sample_answer: sample_answer.as_deref(),
            };
            let feedback =
                self.composer.compose_for_question(&context, answer, &scores, &metrics, &check.errors);

            total_words += metrics.word_count;
            total_errors += check.errors.len();
            answered.push(scores);

            feedbacks.push(QuestionFeedback {
                question: question.clone(),
                feedback,
                scores: Some(scores),
                word_count: metrics.word_count,
                grammar_errors: check.errors.len(),
                sample_answer,
            });
        }

        let summary = TestSummary::from_answered(&answered, total_words, total_errors);

        info!(
            test_id = %submission.test_id,
            questions = submission.questions.len(),
            answered = answered.len(),
            "test analyzed"
        );

        Ok(TestReport {
            test_id: submission.test_id.clone(),
            feedbacks,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use speakband_core::{DescriptorTable, GrammarCheckOutcome, GrammarError};

    const CLEAN_TEXT: &str =
        "The weather today is nice and I went to the park because I wanted fresh air.";

    struct StubCheck {
        outcome: GrammarCheckOutcome,
        seen: Mutex<Vec<String>>,
    }

    impl StubCheck {
        fn ok(errors: Vec<GrammarError>) -> Self {
            Self { outcome: GrammarCheckOutcome::ok(errors), seen: Mutex::new(Vec::new()) }
        }

        fn unavailable() -> Self {
            Self { outcome: GrammarCheckOutcome::unavailable(), seen: Mutex::new(Vec::new()) }
        }

        fn calls(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GrammarCheck for StubCheck {
        async fn check(&self, text: &str) -> GrammarCheckOutcome {
            self.seen.lock().unwrap().push(text.to_string());
            self.outcome.clone()
        }
    }

    fn analyzer(checker: Arc<StubCheck>) -> Analyzer {
        Analyzer::new(checker, FeedbackComposer::new(DescriptorTable::builtin().unwrap()))
    }

    fn error_at(offset: usize, length: usize) -> GrammarError {
        GrammarError {
            offset,
            length,
            message: "Possible spelling mistake found.".to_string(),
            replacements: vec!["want".to_string()],
        }
    }

    #[tokio::test]
    async fn test_analyze_scores_clean_text() {
        let checker = Arc::new(StubCheck::ok(Vec::new()));
        let report = analyzer(checker.clone()).analyze(CLEAN_TEXT).await.unwrap();

        assert_eq!(report.scores.overall.value(), 7.0);
        assert_eq!(report.grammar_error_count, 0);
        assert!(report.grammar_check_success);
        assert!(report.feedback.starts_with("**IELTS Speaking Assessment Results**"));
        assert_eq!(checker.calls(), [CLEAN_TEXT.to_string()]);
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_text_before_checking() {
        let checker = Arc::new(StubCheck::ok(Vec::new()));
        let result = analyzer(checker.clone()).analyze("   \n\t ").await;

        assert!(matches!(result, Err(SpeakBandError::EmptyText)));
        assert!(checker.calls().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_degrades_when_checker_unavailable() {
        let checker = Arc::new(StubCheck::unavailable());
        let report = analyzer(checker).analyze(CLEAN_TEXT).await.unwrap();

        assert!(!report.grammar_check_success);
        assert_eq!(report.grammar_error_count, 0);
        // scored as error-free text, with the degradation noted
        assert_eq!(report.scores.grammar.value(), 3.5);
        assert!(report.feedback.contains("Grammar check unavailable"));
    }

    #[tokio::test]
    async fn test_run_test_rejects_shape_mismatch_before_checking() {
        let checker = Arc::new(StubCheck::ok(Vec::new()));
        let submission = TestSubmission {
            test_id: "t1".to_string(),
            questions: vec!["Q1".to_string(), "Q2".to_string(), "Q3".to_string()],
            answers: vec![CLEAN_TEXT.to_string(), CLEAN_TEXT.to_string()],
            sample_answers: None,
        };
        let result = analyzer(checker.clone()).run_test(&submission).await;

        assert!(matches!(
            result,
            Err(SpeakBandError::ShapeMismatch { questions: 3, answers: 2 })
        ));
        assert!(checker.calls().is_empty());
    }

    #[tokio::test]
    async fn test_run_test_skips_blank_answers_in_summary() {
        let checker = Arc::new(StubCheck::ok(Vec::new()));
        let submission = TestSubmission {
            test_id: "t2".to_string(),
            questions: vec!["Q1".to_string(), "Q2".to_string(), "Q3".to_string()],
            answers: vec![CLEAN_TEXT.to_string(), "  ".to_string(), CLEAN_TEXT.to_string()],
            sample_answers: None,
        };
        let report = analyzer(checker.clone()).run_test(&submission).await.unwrap();

        assert_eq!(report.feedbacks.len(), 3);
        assert!(report.feedbacks[0].scores.is_some());
        assert!(report.feedbacks[1].scores.is_none());
        assert_eq!(report.feedbacks[1].word_count, 0);
        assert!(report.feedbacks[1].feedback.contains("No answer provided"));

        let summary = report.summary.unwrap();
        assert_eq!(summary.questions_answered, 2);
        assert_eq!(summary.total_words, 32);
        // both answered questions score identically
        assert_eq!(summary.fluency.value(), 8.0);
        assert_eq!(summary.lexical.value(), 9.0);
        assert_eq!(summary.grammar.value(), 3.5);
        assert_eq!(summary.pronunciation.value(), 7.5);
        assert_eq!(summary.overall.value(), 7.0);

        // the blank answer never reached the checker
        assert_eq!(checker.calls(), [CLEAN_TEXT.to_string(), CLEAN_TEXT.to_string()]);
    }

    #[tokio::test]
    async fn test_run_test_with_no_answers_has_no_summary() {
        let checker = Arc::new(StubCheck::ok(Vec::new()));
        let submission = TestSubmission {
            test_id: "t3".to_string(),
            questions: vec!["Q1".to_string(), "Q2".to_string()],
            answers: vec!["".to_string(), "   ".to_string()],
            sample_answers: None,
        };
        let report = analyzer(checker).run_test(&submission).await.unwrap();

        assert!(report.summary.is_none());
    }

    #[tokio::test]
    async fn test_run_test_counts_grammar_errors_in_totals() {
        let checker = Arc::new(StubCheck::ok(vec![error_at(2, 4), error_at(10, 2)]));
        let submission = TestSubmission {
            test_id: "t4".to_string(),
            questions: vec!["Q1".to_string(), "Q2".to_string()],
            answers: vec![CLEAN_TEXT.to_string(), CLEAN_TEXT.to_string()],
            sample_answers: None,
        };
        let report = analyzer(checker).run_test(&submission).await.unwrap();

        let summary = report.summary.unwrap();
        assert_eq!(summary.total_errors, 4);
        // two errors against 16 words floor the accuracy term
        assert_eq!(summary.grammar.value(), 1.0);
        assert_eq!(report.feedbacks[0].grammar_errors, 2);
    }

    #[tokio::test]
    async fn test_run_test_attaches_sample_answers() {
        let checker = Arc::new(StubCheck::ok(Vec::new()));
        let submission = TestSubmission {
            test_id: "t5".to_string(),
            questions: vec!["Q1".to_string(), "Q2".to_string()],
            answers: vec!["".to_string(), CLEAN_TEXT.to_string()],
            sample_answers: Some(vec!["".to_string(), "A model answer.".to_string()]),
        };
        let report = analyzer(checker).run_test(&submission).await.unwrap();

        // empty sample strings are treated as absent
        assert_eq!(report.feedbacks[0].sample_answer, None);
        assert_eq!(report.feedbacks[1].sample_answer.as_deref(), Some("A model answer."));
        assert!(report.feedbacks[1].feedback.contains("**Sample Answer for Reference:**"));
    }
}
