pub mod band;
pub mod config;
pub mod descriptors;
pub mod error;
pub mod feedback;
pub mod grammar;
pub mod lexicon;
pub mod metrics;
pub mod report;
pub mod scoring;

pub use band::Band;
pub use config::{GrammarCheckConfig, ServerConfig, SpeakBandConfig};
pub use descriptors::{DescriptorTable, Dimension, NO_DESCRIPTION};
pub use error::{Result, SpeakBandError};
pub use feedback::{FeedbackComposer, QuestionContext};
pub use grammar::{GrammarCheckOutcome, GrammarError};
pub use metrics::TranscriptMetrics;
pub use report::{AnswerReport, QuestionFeedback, TestReport, TestSubmission, TestSummary};
pub use scoring::BandScores;
