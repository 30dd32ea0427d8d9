use crate::band::Band;
use crate::descriptors::{DescriptorTable, Dimension, NO_DESCRIPTION};
use crate::grammar::{GrammarCheckOutcome, GrammarError};
use crate::metrics::TranscriptMetrics;
use crate::scoring::BandScores;

/// Most grammar issues listed in a full assessment.
const MAX_ASSESSMENT_ISSUES: usize = 5;
/// Most grammar issues listed in per-question feedback.
const MAX_QUESTION_ISSUES: usize = 3;
/// Bands below this trigger improvement suggestions.
const SUGGESTION_BAND: f64 = 6.0;

/// Position of one question within a test, for per-question feedback.
#[derive(Debug, Clone, Copy)]
pub struct QuestionContext<'a> {
    /// 1-based question number.
    pub number: usize,
    pub question: &'a str,
    pub sample_answer: Option<&'a str>,
}

/// Renders scores, metrics and grammar issues into markdown feedback.
pub struct FeedbackComposer {
    descriptors: DescriptorTable,
}

impl FeedbackComposer {
    pub fn new(descriptors: DescriptorTable) -> Self {
        Self { descriptors }
    }

    /// Full assessment for a single transcript.
    pub fn compose(
        &self,
        scores: &BandScores,
        metrics: &TranscriptMetrics,
        check: &GrammarCheckOutcome,
    ) -> String {
        let errors = &check.errors;
        let mut feedback = String::from("**IELTS Speaking Assessment Results**\n\n");
        feedback.push_str(&format!("**Overall Band Score: {}**\n\n", scores.overall));

        for (dimension, band) in [
            (Dimension::Fluency, scores.fluency),
            (Dimension::Lexical, scores.lexical),
            (Dimension::Grammar, scores.grammar),
            (Dimension::Pronunciation, scores.pronunciation),
        ] {
            feedback.push_str(&format!("**{} - Band {}:**\n", dimension.label(), band));
            feedback.push_str(&self.bullets(dimension, band));
            feedback.push('\n');
        }

        feedback.push_str("**Detailed Analysis:**\n");
        feedback.push_str(&format!("• Word count: {} words\n", metrics.word_count));
        feedback.push_str(&format!(
            "• Vocabulary diversity: {:.1}%\n",
            metrics.type_token_ratio * 100.0
        ));
        feedback.push_str(&format!(
            "• Average sentence length: {:.1} words\n",
            metrics.avg_words_per_sentence
        ));
        feedback.push_str(&format!("• Grammar errors found: {}\n", errors.len()));
        if !check.success {
            feedback.push_str("• Grammar check unavailable for this response\n");
        }

        if metrics.hesitation_markers > 0 {
            feedback.push_str(&format!(
                "• Hesitation markers detected: {}\n",
                metrics.hesitation_markers
            ));
        }
        if metrics.repetition_markers > 0 {
            feedback.push_str(&format!(
                "• Repetitions detected: {}\n",
                metrics.repetition_markers
            ));
        }

        feedback.push_str("\n**Areas for Improvement:**\n");
        if scores.fluency.value() < SUGGESTION_BAND {
            feedback.push_str("• Work on reducing pauses and hesitations\n");
            feedback.push_str("• Practice using linking words more naturally\n");
        }
        if scores.lexical.value() < SUGGESTION_BAND {
            feedback.push_str("• Expand your vocabulary with less common words\n");
            feedback.push_str("• Practice paraphrasing and using synonyms\n");
        }
        if scores.grammar.value() < SUGGESTION_BAND {
            feedback.push_str("• Focus on using more complex sentence structures\n");
            feedback.push_str("• Review grammar rules to reduce errors\n");
        }
        if scores.pronunciation.value() < SUGGESTION_BAND {
            feedback.push_str("• Practice pronunciation of individual sounds\n");
            feedback.push_str("• Work on word stress and sentence intonation\n");
        }

        if !errors.is_empty() {
            feedback.push_str("\n**Specific Grammar Issues:**\n");
            for (index, error) in errors.iter().take(MAX_ASSESSMENT_ISSUES).enumerate() {
                feedback.push_str(&format!("{}. {}\n", index + 1, error.message));
                if let Some(suggestion) = error.top_replacement() {
                    feedback.push_str(&format!("   Suggestion: \"{}\"\n", suggestion));
                }
            }
        }

        feedback
    }

    /// Shorter per-question feedback used inside a test report.
    pub fn compose_for_question(
        &self,
        context: &QuestionContext<'_>,
        text: &str,
        scores: &BandScores,
        metrics: &TranscriptMetrics,
        errors: &[GrammarError],
    ) -> String {
        let mut feedback =
            format!("**Question {}: \"{}\"**\n\n", context.number, context.question);
        feedback.push_str("**Your Response Analysis:**\n");
        feedback.push_str(&format!("Overall Band: {}\n\n", scores.overall));
        feedback.push_str(&format!("• Fluency & Coherence: {}\n", scores.fluency));
        feedback.push_str(&format!("• Lexical Resource: {}\n", scores.lexical));
        feedback.push_str(&format!("• Grammar: {}\n", scores.grammar));
        feedback.push_str(&format!("• Pronunciation: {}\n\n", scores.pronunciation));

        feedback.push_str("**Response Statistics:**\n");
        feedback.push_str(&format!("• Words: {}\n", metrics.word_count));
        feedback.push_str(&format!(
            "• Vocabulary diversity: {}%\n",
            (metrics.type_token_ratio * 100.0).round()
        ));
        feedback.push_str(&format!("• Grammar errors: {}\n\n", errors.len()));

        if scores.overall.value() < SUGGESTION_BAND {
            feedback.push_str("**Key Areas for Improvement:**\n");
            if metrics.word_count < 50 {
                feedback.push_str("• Provide longer, more detailed responses\n");
            }
            if scores.fluency.value() < SUGGESTION_BAND {
                feedback.push_str("• Reduce hesitations and improve flow\n");
            }
            if scores.lexical.value() < SUGGESTION_BAND {
                feedback.push_str("• Use more varied and sophisticated vocabulary\n");
            }
            if scores.grammar.value() < SUGGESTION_BAND {
                feedback.push_str("• Focus on grammar accuracy and complex structures\n");
            }
            feedback.push('\n');
        }

        if !errors.is_empty() {
            feedback.push_str("**Grammar Issues Detected:**\n");
            for (index, error) in errors.iter().take(MAX_QUESTION_ISSUES).enumerate() {
                feedback.push_str(&format!(
                    "{}. {} - \"{}\"\n",
                    index + 1,
                    error.message,
                    error.excerpt(text)
                ));
                if let Some(suggestion) = error.top_replacement() {
                    feedback.push_str(&format!("   Suggested: \"{}\"\n", suggestion));
                }
            }
            feedback.push('\n');
        }

        if let Some(sample) = context.sample_answer {
            feedback.push_str(&format!("**Sample Answer for Reference:**\n*{}*", sample));
        }

        feedback
    }

    /// Placeholder feedback for an unanswered question.
    pub fn no_answer(number: usize, question: &str) -> String {
        format!(
            "**Question {}: \"{}\"**\n\nNo answer provided. Please record your response to this question.",
            number, question
        )
    }

    fn bullets(&self, dimension: Dimension, band: Band) -> String {
        match self.descriptors.lookup(dimension, band.floor()) {
            Some(lines) => lines
                .iter()
                .map(|line| format!("• {}\n", line))
                .collect::<String>(),
            None => format!("• {}\n", NO_DESCRIPTION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::BandScores;

    fn composer() -> FeedbackComposer {
        FeedbackComposer::new(DescriptorTable::builtin().unwrap())
    }

    fn sample() -> (BandScores, TranscriptMetrics) {
        let metrics = TranscriptMetrics::from_text(
            "The weather today is nice and I went to the park because I wanted fresh air.",
        );
        let scores = BandScores::from_metrics(&metrics, 0);
        (scores, metrics)
    }

    fn typo_error() -> GrammarError {
        GrammarError {
            offset: 2,
            length: 4,
            message: "Possible spelling mistake found.".to_string(),
            replacements: vec!["want".to_string()],
        }
    }

    fn clean_check() -> GrammarCheckOutcome {
        GrammarCheckOutcome::ok(Vec::new())
    }

    #[test]
    fn test_assessment_headers_and_bands() {
        let (scores, metrics) = sample();
        let feedback = composer().compose(&scores, &metrics, &clean_check());

        assert!(feedback.starts_with("**IELTS Speaking Assessment Results**\n\n"));
        assert!(feedback.contains("**Overall Band Score: 7**\n"));
        assert!(feedback.contains("**Fluency and Coherence - Band 8:**\n"));
        assert!(feedback.contains("**Lexical Resource - Band 9:**\n"));
        assert!(feedback.contains("**Grammatical Range and Accuracy - Band 3.5:**\n"));
        assert!(feedback.contains("**Pronunciation - Band 7.5:**\n"));
        assert!(feedback.contains("• Word count: 16 words\n"));
        assert!(feedback.contains("• Vocabulary diversity: 87.5%\n"));
        assert!(feedback.contains("• Average sentence length: 16.0 words\n"));
        assert!(feedback.contains("• Grammar errors found: 0\n"));
    }

    #[test]
    fn test_suggestions_follow_low_bands_only() {
        let (scores, metrics) = sample();
        let feedback = composer().compose(&scores, &metrics, &clean_check());

        // grammar band is 3.5 here, the other three are above 6
        assert!(feedback.contains("**Areas for Improvement:**\n"));
        assert!(feedback.contains("• Focus on using more complex sentence structures\n"));
        assert!(!feedback.contains("• Expand your vocabulary with less common words\n"));
        assert!(!feedback.contains("• Work on reducing pauses and hesitations\n"));
        assert!(!feedback.contains("• Practice pronunciation of individual sounds\n"));
    }

    #[test]
    fn test_grammar_issues_capped_at_five() {
        let (scores, metrics) = sample();
        let errors: Vec<GrammarError> = (0..8)
            .map(|i| GrammarError {
                offset: 0,
                length: 1,
                message: format!("Issue {}", i),
                replacements: Vec::new(),
            })
            .collect();
        let feedback = composer().compose(&scores, &metrics, &GrammarCheckOutcome::ok(errors));

        assert!(feedback.contains("**Specific Grammar Issues:**\n"));
        assert!(feedback.contains("5. Issue 4\n"));
        assert!(!feedback.contains("6. Issue 5\n"));
    }

    #[test]
    fn test_suggestion_line_uses_first_replacement() {
        let (scores, metrics) = sample();
        let check = GrammarCheckOutcome::ok(vec![typo_error()]);
        let feedback = composer().compose(&scores, &metrics, &check);
        assert!(feedback.contains("1. Possible spelling mistake found.\n"));
        assert!(feedback.contains("   Suggestion: \"want\"\n"));
    }

    #[test]
    fn test_degraded_check_is_noted() {
        let (scores, metrics) = sample();
        let feedback =
            composer().compose(&scores, &metrics, &GrammarCheckOutcome::unavailable());
        assert!(feedback.contains("• Grammar check unavailable for this response\n"));

        let clean = composer().compose(&scores, &metrics, &clean_check());
        assert!(!clean.contains("Grammar check unavailable"));
    }

    #[test]
    fn test_missing_descriptor_falls_back_to_placeholder() {
        let table = DescriptorTable::from_json(r#"{"fluency_coherence": {}}"#).unwrap();
        let (scores, metrics) = sample();
        let feedback = FeedbackComposer::new(table).compose(&scores, &metrics, &clean_check());
        assert!(feedback.contains(&format!("• {}\n", NO_DESCRIPTION)));
    }

    #[test]
    fn test_question_feedback_layout() {
        let (scores, metrics) = sample();
        let context = QuestionContext {
            number: 2,
            question: "Describe your hometown",
            sample_answer: Some("My hometown is a small coastal city."),
        };
        let feedback = composer().compose_for_question(
            &context,
            "The weather today is nice and I went to the park because I wanted fresh air.",
            &scores,
            &metrics,
            &[],
        );

        assert!(feedback.starts_with("**Question 2: \"Describe your hometown\"**\n\n"));
        assert!(feedback.contains("**Your Response Analysis:**\nOverall Band: 7\n\n"));
        assert!(feedback.contains("• Fluency & Coherence: 8\n"));
        assert!(feedback.contains("• Vocabulary diversity: 88%\n"));
        // overall band 7: no improvement section
        assert!(!feedback.contains("**Key Areas for Improvement:**"));
        assert!(feedback.ends_with("**Sample Answer for Reference:**\n*My hometown is a small coastal city.*"));
    }

    #[test]
    fn test_question_feedback_quotes_offending_text() {
        let text = "I wnat to go";
        let metrics = TranscriptMetrics::from_text(text);
        let scores = BandScores::from_metrics(&metrics, 1);
        let context = QuestionContext { number: 1, question: "Q", sample_answer: None };
        let feedback =
            composer().compose_for_question(&context, text, &scores, &metrics, &[typo_error()]);

        assert!(feedback.contains("**Grammar Issues Detected:**\n"));
        assert!(feedback.contains("1. Possible spelling mistake found. - \"wnat\"\n"));
        assert!(feedback.contains("   Suggested: \"want\"\n"));
        // low overall on a four-word answer triggers the length suggestion
        assert!(feedback.contains("**Key Areas for Improvement:**\n"));
        assert!(feedback.contains("• Provide longer, more detailed responses\n"));
    }

    #[test]
    fn test_no_answer_placeholder() {
        assert_eq!(
            FeedbackComposer::no_answer(3, "Describe a book you read"),
            "**Question 3: \"Describe a book you read\"**\n\nNo answer provided. Please record your response to this question."
        );
    }
}
