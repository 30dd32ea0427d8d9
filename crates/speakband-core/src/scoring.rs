use serde::{Deserialize, Serialize};

use crate::band::Band;
use crate::metrics::TranscriptMetrics;

/// Responses shorter than this are penalized on fluency.
const SHORT_RESPONSE_WORDS: usize = 50;

/// Bands for the four scored dimensions plus their half-point-rounded mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScores {
    pub fluency: Band,
    pub lexical: Band,
    pub grammar: Band,
    pub pronunciation: Band,
    pub overall: Band,
}

impl BandScores {
    /// Combines four dimension bands; `overall` is always their
    /// half-point-rounded mean, never set independently.
    pub fn from_dimensions(
        fluency: Band,
        lexical: Band,
        grammar: Band,
        pronunciation: Band,
    ) -> BandScores {
        let overall = Band::from_mean(
            (fluency.value() + lexical.value() + grammar.value() + pronunciation.value()) / 4.0,
        );
        BandScores { fluency, lexical, grammar, pronunciation, overall }
    }

    /// Scores one transcript across all four dimensions.
    pub fn from_metrics(metrics: &TranscriptMetrics, grammar_error_count: usize) -> BandScores {
        BandScores::from_dimensions(
            fluency_band(metrics),
            lexical_band(metrics),
            grammar_band(metrics, grammar_error_count),
            pronunciation_band(metrics),
        )
    }
}

/// Fluency and coherence: disfluency rate adjusted for response length and
/// sentence shape, averaged with connective density.
pub fn fluency_band(metrics: &TranscriptMetrics) -> Band {
    let mut score = metrics.fluency_score;
    if metrics.word_count < SHORT_RESPONSE_WORDS {
        score *= 0.7;
    }
    if metrics.avg_words_per_sentence > 20.0 {
        score *= 0.9;
    }
    if metrics.avg_words_per_sentence < 8.0 {
        score *= 0.8;
    }
    score = (score + metrics.coherence_score) / 2.0;
    Band::from_score(score.clamp(0.0, 1.0))
}

/// Lexical resource: vocabulary score with a type/token-ratio bonus or
/// penalty, averaged with lexical diversity.
pub fn lexical_band(metrics: &TranscriptMetrics) -> Band {
    let mut score = metrics.vocabulary_score;
    if metrics.type_token_ratio > 0.6 {
        score *= 1.1;
    }
    if metrics.type_token_ratio < 0.3 {
        score *= 0.8;
    }
    score = (score + metrics.lexical_diversity) / 2.0;
    Band::from_score(score.clamp(0.0, 1.0))
}

/// Grammatical range and accuracy: error rate per 20 words against the
/// structural complexity score. Texts with almost no complex structures
/// are penalized after the average.
pub fn grammar_band(metrics: &TranscriptMetrics, grammar_error_count: usize) -> Band {
    let error_rate =
        grammar_error_count as f64 / (metrics.word_count as f64 * 0.05).max(1.0);
    let accuracy = (1.0 - error_rate).max(0.0);
    let mut score = (accuracy + metrics.grammar_complexity) / 2.0;
    if metrics.grammar_complexity < 0.1 {
        score *= 0.8;
    }
    Band::from_score(score.clamp(0.0, 1.0))
}

/// Pronunciation proxy: no audio is available, so this starts from a fixed
/// baseline and credits rich vocabulary and complex structures.
pub fn pronunciation_band(metrics: &TranscriptMetrics) -> Band {
    let mut score: f64 = 0.7;
    if metrics.vocabulary_score > 0.7 {
        score += 0.1;
    }
    if metrics.grammar_complexity > 0.5 {
        score += 0.1;
    }
    Band::from_score(score.clamp(0.0, 1.0))
}
