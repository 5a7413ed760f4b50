//! Error types for the fixture-data crate.

use thiserror::Error;

/// Errors that can occur while generating fixtures.
///
/// Generation only fails when the underlying fake-data source keeps producing
/// values that violate a field constraint. Callers treat this as a fatal
/// configuration problem rather than something to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// A field could not be produced within the attempt budget.
    #[error("failed to generate a valid {field} after {max_attempts} attempts")]
    FieldGenerationFailed {
        /// Name of the fixture field that kept failing validation.
        field: &'static str,
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },
}
