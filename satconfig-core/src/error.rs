//! The constraint compiler's error kinds (`spec.md` §7).
//!
//! There is no recovery path for any of these: each is reported once to stderr with
//! enough context to locate the offending configuration construct, and the driver
//! transitions to `Failed`. No `anyhow`/`thiserror` here, matching the teacher's own
//! hand-rolled `cdcl_engine::types::err::ErrorKind` union of per-subsystem error enums.

use std::fmt;

/// A single clause implicated in an unsatisfiable core, annotated with the
/// human-readable label `ClauseBuilder` attached when it was emitted.
#[derive(Clone, Debug)]
pub struct CoreClause {
    pub index: usize,
    pub label: String,
}

impl fmt::Display for CoreClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clause {}: {}", self.index, self.label)
    }
}

/// The constraint compiler's fatal error kinds.
#[derive(Debug)]
pub enum CoreError {
    /// The unconditional solve (no user assumptions) returned UNSAT: the base theory
    /// built from the symbol table is self-contradictory.
    InconsistentTheory { core: Vec<CoreClause> },

    /// The solve with user assumptions applied returned UNSAT.
    UnsatisfiableAssumptions { core: Vec<CoreClause> },

    /// The engine returned `UNKNOWN`.
    SolverUnknown,

    /// A build-time invariant was violated: refcount imbalance, an out-of-range SAT
    /// variable, a clause-index mismatch, or an unexpected expression tag.
    InternalInvariantViolated(String),

    /// An expression compared an undeclared symbol with `=`/`!=` (`spec.md` §9 Open
    /// Question 3).
    UnknownEquality { symbol: String },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InconsistentTheory { core } => {
                writeln!(f, "error: base configuration theory is unsatisfiable")?;
                for clause in core {
                    writeln!(f, "{clause}")?;
                }
                Ok(())
            }
            CoreError::UnsatisfiableAssumptions { core } => {
                writeln!(f, "error: configuration is unsatisfiable given current preferences")?;
                for clause in core {
                    writeln!(f, "{clause}")?;
                }
                Ok(())
            }
            CoreError::SolverUnknown => write!(f, "error: solver returned an unknown result"),
            CoreError::InternalInvariantViolated(detail) => {
                write!(f, "error: internal invariant violated: {detail}")
            }
            CoreError::UnknownEquality { symbol } => {
                write!(f, "error: '{symbol}' is compared with '=' or '!=' but was never declared")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<crate::expr_lower::LowerError> for CoreError {
    fn from(err: crate::expr_lower::LowerError) -> Self {
        match err {
            crate::expr_lower::LowerError::UnknownEquality { symbol } => {
                CoreError::UnknownEquality { symbol }
            }
        }
    }
}
