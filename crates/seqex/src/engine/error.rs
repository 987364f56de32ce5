//! Errors that can occur while matching.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// A transition was evaluated for a name with no binding.
    #[error("identifier `{0}` is not bound to a predicate or pattern")]
    UnboundIdentifier(String),

    /// Execution fuel exhausted (too many transition evaluations).
    #[error("runtime execution limit exceeded ({0} steps)")]
    ExecFuelExhausted(u32),

    /// Recursion fuel exhausted (sub-patterns nested too deeply).
    #[error("runtime recursion limit exceeded ({0} nested sub-patterns)")]
    RecursionLimitExceeded(u32),
}
