use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::lexicon::{
    self, ADVANCED_CONNECTIVES, BASIC_CONNECTIVES, COMPLEX_TENSE_PHRASES, FUNCTION_WORDS,
    HESITATION_MARKERS, SELF_CORRECTION_MARKERS, SUBORDINATE_CLAUSE_MARKERS,
};

/// Tokens longer than this (and not function words) count as low-frequency.
const LOW_FREQUENCY_MIN_CHARS: usize = 6;

/// Surface counts and normalized sub-scores extracted from one transcript.
///
/// Extraction is deterministic and total: any string produces a value, and
/// every sub-score lands in [0, 1]. Denominators are floored at 1 so short
/// texts never divide by zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub unique_word_count: usize,
    pub type_token_ratio: f64,
    pub avg_words_per_sentence: f64,

    pub hesitation_markers: usize,
    pub repetition_markers: usize,
    pub self_correction_markers: usize,

    pub basic_connectives: usize,
    pub advanced_connectives: usize,
    pub low_frequency_words: usize,

    pub complex_tenses: usize,
    pub subordinate_clauses: usize,

    pub fluency_score: f64,
    pub coherence_score: f64,
    pub vocabulary_score: f64,
    pub grammar_complexity: f64,
    pub lexical_diversity: f64,
}

impl TranscriptMetrics {
    /// Extracts all metrics from a raw transcript.
    ///
    /// Words are whitespace-separated tokens kept verbatim, so "air." and
    /// "air" are distinct tokens; uniqueness is judged case-insensitively.
    /// Sentences are split on `.`, `!` and `?` with empty segments dropped.
    pub fn from_text(text: &str) -> TranscriptMetrics {
        let words: Vec<&str> = text.split_whitespace().collect();
        let word_count = words.len();
        let sentence_count = text
            .split(['.', '!', '?'])
            .filter(|segment| !segment.is_empty())
            .count();

        let lowered = text.to_lowercase();

        let unique: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let unique_word_count = unique.len();

        let hesitation_markers = lexicon::count_occurrences(&lowered, HESITATION_MARKERS);
        let self_correction_markers = lexicon::count_occurrences(&lowered, SELF_CORRECTION_MARKERS);
        let repetition_markers = adjacent_repetitions(&lowered);

        let basic_connectives = lexicon::count_occurrences(&lowered, BASIC_CONNECTIVES);
        let advanced_connectives = lexicon::count_occurrences(&lowered, ADVANCED_CONNECTIVES);

        let low_frequency_words = words
            .iter()
            .filter(|word| {
                let token = word.to_lowercase();
                token.chars().count() > LOW_FREQUENCY_MIN_CHARS
                    && !FUNCTION_WORDS.contains(&token.as_str())
            })
            .count();

        let complex_tenses = lexicon::count_occurrences(&lowered, COMPLEX_TENSE_PHRASES);
        let subordinate_clauses = lexicon::count_occurrences(&lowered, SUBORDINATE_CLAUSE_MARKERS);

        let wc = word_count as f64;
        let sc = sentence_count as f64;

        let type_token_ratio = unique_word_count as f64 / wc.max(1.0);
        let avg_words_per_sentence = wc / sc.max(1.0);

        let disfluencies =
            (hesitation_markers + 2 * repetition_markers + self_correction_markers) as f64;
        let fluency_score = (1.0 - disfluencies / (wc * 0.1).max(1.0)).max(0.0);

        let coherence_score = ((basic_connectives + 2 * advanced_connectives) as f64
            / (sc * 0.5).max(1.0))
        .min(1.0);

        let vocabulary_score = ((2 * low_frequency_words + unique_word_count) as f64 / wc.max(1.0))
            .min(1.0);

        let grammar_complexity = ((3 * complex_tenses + 2 * subordinate_clauses) as f64
            / sc.max(1.0))
        .min(1.0);

        let lexical_diversity = (unique_word_count as f64 / (wc * 0.7).max(1.0)).min(1.0);

        TranscriptMetrics {
            word_count,
            sentence_count,
            unique_word_count,
            type_token_ratio,
            avg_words_per_sentence,
            hesitation_markers,
            repetition_markers,
            self_correction_markers,
            basic_connectives,
            advanced_connectives,
            low_frequency_words,
            complex_tenses,
            subordinate_clauses,
            fluency_score,
            coherence_score,
            vocabulary_score,
            grammar_complexity,
            lexical_diversity,
        }
    }
}

/// Counts immediate word repetitions ("the the"), case already folded by
/// the caller. Pairs are non-overlapping: "go go go" is one repetition,
/// "go go go go" is two. The gap between the words must be whitespace only,
/// so "I, I" does not count.
fn adjacent_repetitions(lowered: &str) -> usize {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut start = None;
    for (i, c) in lowered.char_indices() {
        if lexicon::is_word_char(c) {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            runs.push((s, i));
        }
    }
    if let Some(s) = start {
        runs.push((s, lowered.len()));
    }

    let mut count = 0;
    let mut i = 0;
    while i + 1 < runs.len() {
        let (s1, e1) = runs[i];
        let (s2, e2) = runs[i + 1];
        let gap = &lowered[e1..s2];
        if gap.chars().all(char::is_whitespace) && lowered[s1..e1] == lowered[s2..e2] {
            count += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    count
}
