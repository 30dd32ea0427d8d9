pub mod analyzer;
pub mod check;
pub mod languagetool;

pub use analyzer::Analyzer;
pub use check::GrammarCheck;
pub use languagetool::LanguageToolClient;
