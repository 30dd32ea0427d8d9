//! Marker lexicons used by transcript feature extraction.
//!
//! Band calibration depends on the exact membership of these sets. Treat
//! any edit as a calibration change and bump [`LEXICON_VERSION`].

/// Bumped whenever a marker set changes membership.
pub const LEXICON_VERSION: u32 = 1;

/// Filled-pause markers counted against fluency.
pub const HESITATION_MARKERS: &[&str] = &["um", "uh", "er", "ah", "hmm"];

/// Phrases signalling the speaker is revising what they just said.
pub const SELF_CORRECTION_MARKERS: &[&str] = &["sorry", "i mean", "actually", "wait"];

/// Everyday connectives; weighted 1x in the coherence score.
pub const BASIC_CONNECTIVES: &[&str] = &["and", "but", "so", "then", "because"];

/// Discourse connectives; weighted 2x in the coherence score.
pub const ADVANCED_CONNECTIVES: &[&str] = &[
    "however",
    "moreover",
    "furthermore",
    "nevertheless",
    "consequently",
    "therefore",
];

/// Auxiliary phrases marking perfect and modal-perfect constructions.
pub const COMPLEX_TENSE_PHRASES: &[&str] = &[
    "have been",
    "had been",
    "will have",
    "would have",
    "could have",
    "should have",
];

/// Words that typically introduce a subordinate clause.
pub const SUBORDINATE_CLAUSE_MARKERS: &[&str] = &[
    "which", "that", "who", "whom", "whose", "when", "where", "why", "although", "though",
    "while", "since", "if", "unless", "until",
];

/// High-frequency function words excluded from the low-frequency count.
pub const FUNCTION_WORDS: &[&str] = &[
    "the", "is", "are", "was", "were", "have", "has", "had", "do", "does", "did", "will",
    "would", "can", "could", "should", "may", "might",
];

/// Word characters for boundary purposes: ASCII letters, digits, underscore.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Counts non-overlapping occurrences of any entry in `set` within `text`.
///
/// `text` must already be lowercased. Matches are anchored at word
/// boundaries on both sides; multi-word entries match only with a single
/// literal space between the words. At each position the first listed
/// entry wins, and the scan resumes after the match, so "would have been"
/// counts one complex tense, not two.
pub fn count_occurrences(text: &str, set: &[&str]) -> usize {
    let mut count = 0;
    let mut pos = 0;
    while pos < text.len() {
        let at_boundary = text[..pos].chars().next_back().map_or(true, |c| !is_word_char(c));
        if at_boundary {
            if let Some(len) = match_at(text, pos, set) {
                count += 1;
                pos += len;
                continue;
            }
        }
        pos += text[pos..].chars().next().map_or(1, char::len_utf8);
    }
    count
}

fn match_at(text: &str, pos: usize, set: &[&str]) -> Option<usize> {
    let rest = &text[pos..];
    for &entry in set {
        if let Some(after) = rest.strip_prefix(entry) {
            if after.chars().next().map_or(true, |c| !is_word_char(c)) {
                return Some(entry.len());
            }
        }
    }
    None
}
