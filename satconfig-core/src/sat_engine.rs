//! A thin façade over `cdcl_engine`'s [`Context`], exposing exactly the "Solver
//! interface required" operations of `spec.md` §6: allocate a fresh variable, add a
//! literal to the clause currently being built, close the clause, assume a literal for
//! one `solve()` call, solve, deref a variable's value in the model, and (on the fatal
//! UNSAT path) extract a labelled unsatisfiable core.
//!
//! Deliberately built only against `cdcl_engine`'s published, doc-commented entry
//! points (`Context::from_config`, `fresh_or_max_atom`, `add_clause`, `add_assumption`/
//! `assert_assumptions`, `solve`, `report`) rather than reaching into its internal
//! database fields, so this façade is insulated from churn inside the vendored engine.

use cdcl_engine::config::Config;
use cdcl_engine::context::Context;
use cdcl_engine::reports::Report as EngineReport;
use cdcl_engine::structures::atom::Atom;
use cdcl_engine::structures::literal::{CLiteral, Literal as _};

use crate::error::CoreClause;

/// The outcome of a `solve()` call (`spec.md` §6's `SAT | UNSAT | UNKNOWN`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SatResult {
    Sat,
    Unsat,
    Unknown,
}

/// A single recorded original clause, kept so that [`SatEngine::unsat_core_indices`]
/// can re-solve with clauses removed one at a time (`spec.md` §4.11 / `DESIGN.md`'s
/// Open Question resolution 5: `cdcl_engine` has no native per-clause core oracle, so
/// the core is recovered by deletion).
struct RecordedClause {
    label: String,
    literals: Vec<i32>,
}

/// A façade over an external CDCL SAT engine, matching `spec.md` §6's required
/// solver-adapter surface.
pub struct SatEngine {
    context: Context,
    clause_buffer: Vec<CLiteral>,
    recorded: Vec<RecordedClause>,
    pending_assumptions: Vec<i32>,
    random_phase: bool,
}

impl SatEngine {
    /// Builds a fresh engine. `random_phase` mirrors `spec.md` §4.7's "if the
    /// randomised mode is enabled, the global default phase is set to random": absent a
    /// settable RNG seed in the vendored engine's public configuration surface, this is
    /// realised by biasing `polarity_lean`/`random_decision_bias` away from their
    /// deterministic defaults of `0.0` (see `DESIGN.md`).
    pub fn new(random_phase: bool) -> Self {
        let mut config = Config::default();
        if random_phase {
            config.polarity_lean.value = 0.5;
            config.random_decision_bias.value = 0.5;
        }
        Self {
            context: Context::from_config(config),
            clause_buffer: Vec::new(),
            recorded: Vec::new(),
            pending_assumptions: Vec::new(),
            random_phase,
        }
    }

    /// Allocates a fresh SAT variable (`spec.md` §6's `inc_max_var`).
    pub fn new_var(&mut self) -> u32 {
        self.context.fresh_or_max_atom()
    }

    /// Allocates a fresh SAT variable with a phase hint (`spec.md` §4.7's "phase
    /// hints: prefer modules over built-ins").
    pub fn new_var_with_phase_hint(&mut self, prefer_true: bool) -> u32 {
        match self
            .context
            .fresh_atom_specifying_previous_value(prefer_true)
        {
            Ok(atom) => atom,
            Err(_) => self.context.fresh_or_max_atom(),
        }
    }

    /// The number of variables allocated so far, used to validate variable
    /// conservation (`spec.md` §8 invariant 1).
    pub fn max_var(&self) -> u32 {
        self.context.fresh_or_max_atom().saturating_sub(1).max(0)
    }

    /// Adds a literal to the clause currently being assembled (`spec.md` §6's
    /// `add(lit)`). `lit` must be nonzero.
    pub fn add_literal(&mut self, lit: i32) {
        debug_assert_ne!(lit, 0, "literal 0 has no variable");
        let atom = lit.unsigned_abs() as Atom;
        self.clause_buffer.push(CLiteral::new(atom, lit > 0));
    }

    /// Closes the clause currently being assembled (`spec.md` §6's `add(0)`), tagging
    /// it with `label` for diagnostics, and returns its dense index.
    pub fn close_clause(&mut self, label: impl Into<String>) -> usize {
        let literals = std::mem::take(&mut self.clause_buffer);
        let index = self.recorded.len();
        let ints: Vec<i32> = literals
            .iter()
            .map(|l| {
                let v = l.atom() as i32;
                if l.polarity() {
                    v
                } else {
                    -v
                }
            })
            .collect();
        self.recorded.push(RecordedClause {
            label: label.into(),
            literals: ints,
        });
        let _ = self.context.add_clause(literals);
        index
    }

    /// A unit clause shortcut: allocates no new variable, closes a one-literal clause.
    pub fn add_unit_clause(&mut self, lit: i32, label: impl Into<String>) -> usize {
        self.add_literal(lit);
        self.close_clause(label)
    }

    /// Records an assumption for the next `solve()` call only (`spec.md` §6's
    /// `assume(lit)`).
    pub fn assume(&mut self, lit: i32) {
        let atom = lit.unsigned_abs() as Atom;
        self.pending_assumptions.push(lit);
        let _ = self.context.add_assumption(CLiteral::new(atom, lit > 0));
    }

    /// Whether `--random` seeding is in effect.
    pub fn is_random_phase(&self) -> bool {
        self.random_phase
    }

    /// Runs the engine (`spec.md` §6's `sat(limit)`), asserting any queued
    /// assumptions first.
    pub fn solve(&mut self) -> SatResult {
        if !self.pending_assumptions.is_empty() {
            // Safety: assumptions are asserted before any decision is made in this
            // engine's lifetime, immediately before the one `solve()` call that uses
            // them, matching `assert_assumptions`'s own safety contract.
            if unsafe { self.context.assert_assumptions() }.is_err() {
                self.pending_assumptions.clear();
                return SatResult::Unsat;
            }
        }
        self.pending_assumptions.clear();

        let outcome = match self.context.solve() {
            Ok(report) => report,
            Err(_) => return SatResult::Unknown,
        };

        match outcome {
            EngineReport::Satisfiable => SatResult::Sat,
            EngineReport::Unsatisfiable => SatResult::Unsat,
            EngineReport::Unknown => SatResult::Unknown,
        }
    }

    /// Reads a variable's value in the last model (`spec.md` §6's
    /// `deref(var) → +1 | -1 | 0`).
    pub fn deref(&self, var: u32) -> i32 {
        use cdcl_engine::structures::valuation::Valuation;
        match self.context.atom_cells.value_of(var) {
            Some(Some(true)) => 1,
            Some(Some(false)) => -1,
            _ => 0,
        }
    }

    /// Deletion-based unsatisfiable-core extraction (`spec.md` §7 / `DESIGN.md` Open
    /// Question 5): `cdcl_engine` has no native per-original-clause core oracle, so
    /// this re-solves fresh engine instances with one recorded clause removed at a
    /// time, keeping the removal iff the remainder is still UNSAT, until no further
    /// clause can be dropped. Only ever called on the fatal UNSAT path.
    pub fn unsat_core_indices(&self) -> Vec<CoreClause> {
        let mut kept: Vec<usize> = (0..self.recorded.len()).collect();

        loop {
            let mut shrank = false;
            let mut i = 0;
            while i < kept.len() {
                let candidate: Vec<usize> = kept
                    .iter()
                    .copied()
                    .enumerate()
                    .filter_map(|(pos, idx)| if pos == i { None } else { Some(idx) })
                    .collect();

                if candidate.is_empty() {
                    i += 1;
                    continue;
                }

                if self.resolve_subset_is_unsat(&candidate) {
                    kept = candidate;
                    shrank = true;
                } else {
                    i += 1;
                }
            }
            if !shrank {
                break;
            }
        }

        kept.into_iter()
            .map(|index| CoreClause {
                index,
                label: self.recorded[index].label.clone(),
            })
            .collect()
    }

    fn resolve_subset_is_unsat(&self, indices: &[usize]) -> bool {
        let config = Config::default();
        let mut probe = Context::from_config(config);
        let mut highest_var: u32 = 0;
        for &idx in indices {
            for &lit in &self.recorded[idx].literals {
                highest_var = highest_var.max(lit.unsigned_abs());
            }
        }
        for _ in 0..highest_var {
            probe.fresh_or_max_atom();
        }
        for &idx in indices {
            let clause: Vec<CLiteral> = self.recorded[idx]
                .literals
                .iter()
                .map(|&lit| CLiteral::new(lit.unsigned_abs() as Atom, lit > 0))
                .collect();
            if probe.add_clause(clause).is_err() {
                return true;
            }
        }
        matches!(probe.solve(), Ok(EngineReport::Unsatisfiable))
    }
}
