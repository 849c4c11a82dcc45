//! The constraint compiler: lowers a parsed kernel configuration's tristate symbol
//! algebra to CNF via Tseitin and drives an external SAT engine with assumptions to
//! produce a satisfying assignment (`spec.md` §1-§7).
//!
//! `satconfig-kconfig` owns parsing and file I/O; this crate only reads the resulting
//! [`satconfig_kconfig::SymbolTable`] and writes back `sat_base`/`sat_var`/`curr`.

pub mod bool_expr;
pub mod clause_builder;
pub mod driver;
pub mod error;
pub mod expr_lower;
pub mod sat_engine;
pub mod tseitin;
pub mod variable_layout;

pub use driver::{Driver, DriverState};
pub use error::CoreError;
pub use sat_engine::{SatEngine, SatResult};
pub use variable_layout::{SymbolVars, VariableLayout};
