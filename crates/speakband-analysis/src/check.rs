use async_trait::async_trait;

use speakband_core::GrammarCheckOutcome;

/// External grammar-check collaborator.
///
/// Implementations degrade internally: on failure or timeout they return
/// [`GrammarCheckOutcome::unavailable`] rather than an error, so analysis
/// can proceed on the remaining dimensions.
#[async_trait]
pub trait GrammarCheck: Send + Sync {
    async fn check(&self, text: &str) -> GrammarCheckOutcome;
}
