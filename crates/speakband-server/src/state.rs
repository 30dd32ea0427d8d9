use std::sync::Arc;

use speakband_analysis::{Analyzer, LanguageToolClient};
use speakband_core::{DescriptorTable, FeedbackComposer, Result, SpeakBandConfig};

pub struct AppState {
    pub analyzer: Analyzer,
}

impl AppState {
    pub fn new(config: &SpeakBandConfig) -> Result<Self> {
        let descriptors = DescriptorTable::builtin()?;
        let checker = Arc::new(LanguageToolClient::new(config.grammar.clone())?);
        let analyzer = Analyzer::new(checker, FeedbackComposer::new(descriptors));
        Ok(Self { analyzer })
    }
}
