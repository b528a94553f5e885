///! Error kinds raised by the orbit engine
use orbit_common::SatelliteId;
use thiserror::Error;

/// Failure reported by the rendering collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("renderer rejected {operation} for satellite {id}: {reason}")]
    Rejected {
        operation: &'static str,
        id: SatelliteId,
        reason: String,
    },

    #[error("renderer unavailable: {0}")]
    Unavailable(String),

    #[error("failed to clear {} path overlay(s): {}", .failed.len(), .failed.join(", "))]
    ClearIncomplete { failed: Vec<SatelliteId> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplorerError {
    /// Ranking requested on a class with fewer than N members
    #[error("insufficient entities for ranking: need {need}, have {have}")]
    InsufficientEntities { need: usize, have: usize },

    /// Search query did not resolve to a satellite
    #[error("NORAD ID not found in data source: {query}")]
    NotFound { query: String },

    #[error("no search ID provided")]
    EmptyQuery,

    #[error(transparent)]
    Render(#[from] RenderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_message() {
        let err = ExplorerError::InsufficientEntities { need: 5, have: 3 };
        assert_eq!(err.to_string(), "insufficient entities for ranking: need 5, have 3");
    }

    #[test]
    fn test_clear_incomplete_message() {
        let err = RenderError::ClearIncomplete {
            failed: vec!["1".to_string(), "2".to_string()],
        };
        assert_eq!(err.to_string(), "failed to clear 2 path overlay(s): 1, 2");
    }
}
