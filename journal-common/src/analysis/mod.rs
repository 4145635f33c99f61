use async_trait::async_trait;
use std::fmt;

use crate::models::analysis::AnalysisResponse;
use crate::models::entry::Entry;

#[derive(Debug)]
pub enum AnalysisError {
    NotImplemented,
    Failed(String),
}

impl std::error::Error for AnalysisError {}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::NotImplemented => {
                write!(f, "AnalysisError: Entry analysis is not implemented")
            }
            AnalysisError::Failed(e) => write!(f, "AnalysisError: Analysis failed: {e}"),
        }
    }
}

/// Produces a sentiment, summary and topic list from an entry's text.
#[async_trait]
pub trait EntryAnalyzer: Send + Sync {
    async fn analyze(&self, entry: &Entry) -> Result<AnalysisResponse, AnalysisError>;
}

pub type Analyzer = Box<dyn EntryAnalyzer>;

/// Placeholder until a language-model backed analyzer exists. Every call reports
/// `AnalysisError::NotImplemented`.
#[derive(Default)]
pub struct PendingAnalyzer {}

impl PendingAnalyzer {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl EntryAnalyzer for PendingAnalyzer {
    async fn analyze(&self, entry: &Entry) -> Result<AnalysisResponse, AnalysisError> {
        log::debug!("Analysis requested for entry {}", entry.id);
        Err(AnalysisError::NotImplemented)
    }
}
