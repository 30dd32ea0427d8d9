use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Result;

const BUILTIN_DESCRIPTORS: &str = include_str!("../assets/descriptors.json");

/// Feedback line used when a descriptor entry is missing.
pub const NO_DESCRIPTION: &str = "No description available";

/// The four scored dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Fluency,
    Lexical,
    Grammar,
    Pronunciation,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Fluency,
        Dimension::Lexical,
        Dimension::Grammar,
        Dimension::Pronunciation,
    ];

    /// Key of this dimension in the descriptor table.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Fluency => "fluency_coherence",
            Dimension::Lexical => "lexical_resource",
            Dimension::Grammar => "grammatical_range",
            Dimension::Pronunciation => "pronunciation",
        }
    }

    /// Heading used in rendered feedback.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Fluency => "Fluency and Coherence",
            Dimension::Lexical => "Lexical Resource",
            Dimension::Grammar => "Grammatical Range and Accuracy",
            Dimension::Pronunciation => "Pronunciation",
        }
    }
}

/// Descriptor bullets per dimension and whole band, loaded once at startup.
///
/// Lookups never fail; a missing entry yields `None` and the caller falls
/// back to [`NO_DESCRIPTION`].
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct DescriptorTable {
    dimensions: HashMap<String, HashMap<String, Vec<String>>>,
}

impl DescriptorTable {
    /// Parses the descriptor set bundled with the crate.
    pub fn builtin() -> Result<DescriptorTable> {
        Ok(serde_json::from_str(BUILTIN_DESCRIPTORS)?)
    }

    /// Parses a caller-supplied descriptor set with the same JSON shape.
    pub fn from_json(json: &str) -> Result<DescriptorTable> {
        Ok(serde_json::from_str(json)?)
    }

    /// Bullets for a dimension at a whole band (half bands floor first).
    pub fn lookup(&self, dimension: Dimension, band: u8) -> Option<&[String]> {
        self.dimensions
            .get(dimension.key())
            .and_then(|bands| bands.get(&band.to_string()))
            .map(Vec::as_slice)
    }
}
