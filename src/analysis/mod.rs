pub mod errors;
pub mod language;
pub mod pipeline;
pub mod sentiment;
pub mod stats;
pub mod summarizer;
pub mod types;

pub use errors::{AnalysisError, ErrorKind};
pub use pipeline::{Pipeline, PipelineOutput};
pub use stats::{TextStatistics, WordCount};
pub use types::{
    AnalysisResult, AnalysisStatus, ConfidenceTier, LanguageResult, PipelineState,
    SentimentLabel, SentimentResult, StageOutcome, SummaryResult,
};
