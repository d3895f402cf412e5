//! Error types for the phonological distance engine.

/// Errors raised by the distance engine.
///
/// The engine itself is total over well-formed input; these variants cover
/// precondition violations the caller is expected to rule out.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhoneticError {
    /// Returned when both sequences of a pair are empty, so no length
    /// baseline exists for normalization.
    #[error("cannot normalize the distance between two empty sequences")]
    EmptyPair,

    /// Returned when a vowel cycle cannot define a cyclic adjacency.
    #[error("invalid vowel cycle: {reason}")]
    InvalidVowelCycle {
        /// What is wrong with the configured cycle.
        reason: String,
    },
}
