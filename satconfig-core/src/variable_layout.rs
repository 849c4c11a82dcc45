//! Assigns a contiguous block of SAT variables to every solvable symbol, and one
//! variable to every prompt and default, per `spec.md` §4.2.
//!
//! Variables are written directly into `Symbol::sat_base` and `Property::sat_var` —
//! the symbol table's own fields for exactly this purpose — rather than kept in a
//! side table, since `spec.md` §5 describes the core as mutating those fields in
//! place and nothing else.

use satconfig_kconfig::{Kind, Symbol, SymbolTable};

use crate::error::CoreError;
use crate::sat_engine::SatEngine;

/// The fixed per-symbol SAT variable layout (`spec.md` §4.2's accessors), read off a
/// [Symbol] that has already been laid out.
pub struct SymbolVars;

impl SymbolVars {
    pub fn sym_y(s: &Symbol) -> u32 {
        s.sat_base.expect("symbol has no variable block")
    }

    /// Only meaningful for tristate symbols.
    pub fn sym_m(s: &Symbol) -> u32 {
        debug_assert_eq!(s.kind, Kind::Tristate, "sym_m on non-tristate symbol");
        s.sat_base.expect("symbol has no variable block") + 1
    }

    pub fn sym_assumed(s: &Symbol) -> u32 {
        s.sat_base.expect("symbol has no variable block") + 1 + (s.kind == Kind::Tristate) as u32
    }

    pub fn sym_selected(s: &Symbol) -> u32 {
        s.sat_base.expect("symbol has no variable block") + 2 + (s.kind == Kind::Tristate) as u32
    }
}

/// The outcome of running layout over a symbol table: just the pinned `TRUE_VAR` and
/// the bookkeeping `spec.md` §8 invariant 1 needs. Everything else lives on the
/// symbols and properties themselves.
pub struct VariableLayout {
    pub true_var: u32,
    symbol_var_count: u32,
    prompt_var_count: u32,
    default_var_count: u32,
}

impl VariableLayout {
    /// Walks `table` in declaration order, allocating one block per solvable symbol
    /// and one variable per prompt/default, then pins `TRUE_VAR`.
    pub fn build(table: &mut SymbolTable, engine: &mut SatEngine) -> Self {
        let solvable_ids: Vec<u32> = table.solvable_symbols().map(|s| s.id).collect();

        let mut symbol_var_count = 0u32;
        let mut prompt_var_count = 0u32;
        let mut default_var_count = 0u32;

        for id in solvable_ids {
            let is_tristate = table.get(id).kind == Kind::Tristate;
            let is_modules = table.get(id).name.as_deref() == Some("MODULES");
            let block_size = if is_tristate { 4 } else { 3 };

            // `spec.md` §4.7's phase-hint bias: prefer modules over built-ins, so
            // `sym_y(MODULES)` and every tristate's `sym_m` are allocated with a
            // `true` phase hint; the remaining variables in the block get the
            // engine's own default phase.
            let base = engine.new_var_with_phase_hint(is_modules);
            if is_tristate {
                engine.new_var_with_phase_hint(true); // sym_m
                for _ in 2..block_size {
                    engine.new_var();
                }
            } else {
                for _ in 1..block_size {
                    engine.new_var();
                }
            }
            symbol_var_count += block_size;
            table.get_mut(id).sat_base = Some(base);

            let property_count = table.get(id).properties.len();
            for idx in 0..property_count {
                let is_prompt = matches!(
                    table.get(id).properties[idx].kind,
                    satconfig_kconfig::PropertyKind::Prompt(_)
                );
                let is_default = matches!(
                    table.get(id).properties[idx].kind,
                    satconfig_kconfig::PropertyKind::Default(_)
                );
                if is_prompt {
                    let v = engine.new_var();
                    prompt_var_count += 1;
                    table.get_mut(id).properties[idx].sat_var = Some(v);
                } else if is_default {
                    let v = engine.new_var();
                    default_var_count += 1;
                    table.get_mut(id).properties[idx].sat_var = Some(v);
                }
            }
        }

        let true_var = engine.new_var();
        engine.add_unit_clause(true_var as i32, "TRUE_VAR pinned true");

        Self {
            true_var,
            symbol_var_count,
            prompt_var_count,
            default_var_count,
        }
    }

    /// Checks `spec.md` §8 invariant 1 (variable conservation) against the engine's
    /// own allocation count.
    pub fn validate_conservation(&self, engine: &SatEngine) -> Result<(), CoreError> {
        let expected = self.symbol_var_count + self.prompt_var_count + self.default_var_count + 1;
        let actual = engine.max_var();
        if actual != expected {
            return Err(CoreError::InternalInvariantViolated(format!(
                "variable conservation violated: expected {expected} variables, engine allocated {actual}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satconfig_kconfig::Span;

    #[test]
    fn sym_accessors_match_block_layout_for_bool_and_tristate() {
        let mut table = SymbolTable::new();
        let b = table.declare(Some("B".to_string()), Kind::Bool, Span::synthetic());
        let t = table.declare(Some("T".to_string()), Kind::Tristate, Span::synthetic());

        let mut engine = SatEngine::new(false);
        let layout = VariableLayout::build(&mut table, &mut engine);

        let b_sym = table.get(b);
        assert_eq!(SymbolVars::sym_y(b_sym) + 1, SymbolVars::sym_assumed(b_sym));
        assert_eq!(SymbolVars::sym_y(b_sym) + 2, SymbolVars::sym_selected(b_sym));

        let t_sym = table.get(t);
        assert_eq!(SymbolVars::sym_y(t_sym) + 1, SymbolVars::sym_m(t_sym));
        assert_eq!(SymbolVars::sym_y(t_sym) + 2, SymbolVars::sym_assumed(t_sym));
        assert_eq!(SymbolVars::sym_y(t_sym) + 3, SymbolVars::sym_selected(t_sym));

        layout
            .validate_conservation(&engine)
            .expect("no prompts or defaults were declared, so nothing should be unaccounted for");
    }
}
