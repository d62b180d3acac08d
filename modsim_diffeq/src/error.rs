use thiserror::Error;

/// Boxed error payload returned by user slope and event code.
pub type ModelError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort a solve before or during integration.
///
/// Solver-convergence failure is not an `OdeError`: it is reported through
/// [`crate::solution::Status::Failed`] with the partial trajectory retained.
#[derive(Debug, Error)]
pub enum OdeError {
    /// Malformed or mismatched problem setup, detected before stepping.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A slope function failed; the run is aborted and the error propagates.
    #[error("model evaluation failed at t = {t}: {source}")]
    Model {
        t: f64,
        #[source]
        source: ModelError,
    },
}
