//! Assembles the fixed set of per-symbol facts described by `spec.md` §4.4 and hands
//! each to [`tseitin`] as a single `BoolExpr`, asserted as a unit clause.
//!
//! Every fact gets a label (symbol name + fact kind) so an UNSAT core dump can name
//! the offending configuration construct (`spec.md` §7). `BoolExpr`s are built and
//! dropped symbol-by-symbol; [`bool_expr::reset_counters`] is called once up front so
//! [`Driver`](crate::driver::Driver) can check the refcount-balance invariant in
//! isolation for this phase (`spec.md` §8 invariant 2).

use std::collections::HashMap;

use satconfig_kconfig::{Kind, PropertyKind, Symbol, SymbolId, SymbolTable};

use crate::bool_expr::{self, BoolExpr};
use crate::error::CoreError;
use crate::expr_lower;
use crate::tseitin;
use crate::variable_layout::{SymbolVars, VariableLayout};

pub struct ClauseBuilder;

impl ClauseBuilder {
    /// Runs the whole rule set over `table`, pushing clauses into `engine`. Fails if
    /// any property's expression compares against an undeclared symbol (`spec.md` §9
    /// Open Question 3).
    pub fn build(
        table: &SymbolTable,
        layout: &VariableLayout,
        engine: &mut crate::sat_engine::SatEngine,
    ) -> Result<(), CoreError> {
        bool_expr::reset_counters();

        let ids: Vec<SymbolId> = table.solvable_symbols().map(|s| s.id).collect();

        let mut prompt_visible: HashMap<SymbolId, BoolExpr> = HashMap::new();
        let mut default_active: HashMap<SymbolId, BoolExpr> = HashMap::new();
        let mut selected_accum: HashMap<SymbolId, Vec<BoolExpr>> = HashMap::new();

        for &id in &ids {
            let symbol = table.get(id);
            let name = label_name(symbol);

            prompt_visible.insert(id, any_prompt_visible_expr(symbol));

            tristate_consistency(table, symbol, layout, engine, &name);
            prompt_visibility(table, symbol, layout, engine, &name)?;
            select_implications(table, symbol, layout, engine, &name, &mut selected_accum)?;

            if !symbol.is_choice() {
                let not_selected = bool_expr::not(&bool_expr::var(SymbolVars::sym_selected(symbol)));
                let not_visible = bool_expr::not(&prompt_visible[&id]);
                let initial_cond = bool_expr::and(&not_selected, &not_visible);
                let active = default_cascade(
                    table,
                    symbol,
                    id,
                    symbol.defaults().map(|p| (p, id)),
                    layout,
                    engine,
                    &name,
                    initial_cond,
                )?;
                default_active.insert(id, active);
            }
        }

        // sym_selected(T) <-> OR of every accumulated (sym_y(s) & lower(C).y) that
        // targets T, for every solvable symbol, not only ones actually selected.
        for &id in &ids {
            let symbol = table.get(id);
            let name = label_name(symbol);
            let selected_expr = selected_accum
                .get(&id)
                .map(|terms| terms.iter().fold(bool_expr::const_(false), |acc, t| bool_expr::or(&acc, t)))
                .unwrap_or_else(|| bool_expr::const_(false));
            let selected_var = bool_expr::var(SymbolVars::sym_selected(symbol));
            let fact = bool_expr::eq(&selected_var, &selected_expr);
            tseitin::assert_root(engine, &fact, &format!("{name}: selected <-> accumulated selectors"), layout.true_var);
        }

        for &id in &ids {
            let symbol = table.get(id);
            let name = label_name(symbol);
            let default_term = default_active
                .get(&id)
                .cloned()
                .unwrap_or_else(|| bool_expr::const_(false));
            justification(table, symbol, layout, engine, &name, &prompt_visible[&id], &default_term);
        }

        for &id in &ids {
            let symbol = table.get(id);
            if symbol.is_choice() {
                choice_block(table, symbol, layout, engine, &prompt_visible)?;
            }
        }

        Ok(())
    }
}

fn label_name(symbol: &Symbol) -> String {
    symbol.name.clone().unwrap_or_else(|| format!("<choice#{}>", symbol.id))
}

fn any_prompt_visible_expr(symbol: &Symbol) -> BoolExpr {
    symbol.prompts().fold(bool_expr::const_(false), |acc, prompt| {
        let var = prompt.sat_var.expect("prompt laid out");
        bool_expr::or(&acc, &bool_expr::var(var))
    })
}

fn tristate_consistency(
    table: &SymbolTable,
    symbol: &Symbol,
    layout: &VariableLayout,
    engine: &mut crate::sat_engine::SatEngine,
    name: &str,
) {
    if symbol.kind != Kind::Tristate {
        return;
    }
    let y = bool_expr::var(SymbolVars::sym_y(symbol));
    let m = bool_expr::var(SymbolVars::sym_m(symbol));

    let fact = bool_expr::implies(&m, &y);
    tseitin::assert_root(engine, &fact, &format!("{name}: m -> y"), layout.true_var);

    if let Some(modules_id) = table.modules_symbol() {
        let modules_symbol = table.get(modules_id);
        let modules_y = bool_expr::var(SymbolVars::sym_y(modules_symbol));
        let fact = bool_expr::implies(&m, &modules_y);
        tseitin::assert_root(engine, &fact, &format!("{name}: m -> MODULES"), layout.true_var);
    }
}

fn prompt_visibility(
    table: &SymbolTable,
    symbol: &Symbol,
    layout: &VariableLayout,
    engine: &mut crate::sat_engine::SatEngine,
    name: &str,
) -> Result<(), CoreError> {
    for prompt in symbol.prompts() {
        let pv = prompt.sat_var.expect("prompt laid out");
        let condition = match &prompt.visibility {
            Some(expr) => expr_lower::lower_visibility_for(table, expr, symbol)?.y,
            None => bool_expr::const_(true),
        };
        let fact = bool_expr::eq(&bool_expr::var(pv), &condition);
        tseitin::assert_root(engine, &fact, &format!("{name}: prompt visibility"), layout.true_var);
    }
    Ok(())
}

fn select_implications(
    table: &SymbolTable,
    symbol: &Symbol,
    layout: &VariableLayout,
    engine: &mut crate::sat_engine::SatEngine,
    name: &str,
    selected_accum: &mut HashMap<SymbolId, Vec<BoolExpr>>,
) -> Result<(), CoreError> {
    for select in symbol.selects() {
        let target = match &select.kind {
            PropertyKind::Select(t) => *t,
            _ => unreachable!(),
        };
        let condition = match &select.visibility {
            Some(expr) => expr_lower::lower_visibility_for(table, expr, symbol)?.y,
            None => bool_expr::const_(true),
        };
        let s_y = bool_expr::var(SymbolVars::sym_y(symbol));
        let trigger = bool_expr::and(&s_y, &condition);
        let target_symbol = table.get(target);
        let target_y = bool_expr::var(SymbolVars::sym_y(target_symbol));
        let fact = bool_expr::implies(&trigger, &target_y);
        tseitin::assert_root(
            engine,
            &fact,
            &format!("{name}: select {}", target_symbol.name.as_deref().unwrap_or("?")),
            layout.true_var,
        );

        selected_accum.entry(target).or_default().push(trigger);
    }
    Ok(())
}

/// Builds the cascading `cond`/unit-clause sequence shared by `spec.md` §4.4-4 and
/// §4.4-6; `target` is the symbol whose `y`/`m` the defaults assign (the defaulting
/// symbol itself for rule 4, the choice member named by each `value` for rule 6).
/// Returns the OR of all `default_var(D)` for use in the justification fact.
fn default_cascade<'a>(
    table: &SymbolTable,
    owner: &Symbol,
    _owner_id: SymbolId,
    defaults: impl Iterator<Item = (&'a satconfig_kconfig::Property, SymbolId)>,
    layout: &VariableLayout,
    engine: &mut crate::sat_engine::SatEngine,
    name: &str,
    mut cond: BoolExpr,
) -> Result<BoolExpr, CoreError> {
    let mut any_active = bool_expr::const_(false);

    for (default, target_id) in defaults {
        let (value_expr, visibility) = match &default.kind {
            PropertyKind::Default(value) => (value, &default.visibility),
            _ => unreachable!(),
        };
        let default_var = default.sat_var.expect("default laid out");
        let default_active_lit = bool_expr::var(default_var);

        let v_y = match visibility {
            Some(expr) => expr_lower::lower_visibility_for(table, expr, owner)?.y,
            None => bool_expr::const_(true),
        };

        let trigger = bool_expr::and(&cond, &v_y);
        let activates = bool_expr::implies(&trigger, &default_active_lit);
        tseitin::assert_root(engine, &activates, &format!("{name}: default activation"), layout.true_var);

        let value = expr_lower::lower(table, value_expr)?;
        let target_symbol = table.get(target_id);
        let y_eq = bool_expr::eq(&bool_expr::var(SymbolVars::sym_y(target_symbol)), &value.y);
        let assigns = if target_symbol.kind == Kind::Tristate {
            let m_eq = bool_expr::eq(&bool_expr::var(SymbolVars::sym_m(target_symbol)), &value.m);
            bool_expr::and(&y_eq, &m_eq)
        } else {
            y_eq
        };
        let assignment = bool_expr::implies(&default_active_lit, &assigns);
        tseitin::assert_root(engine, &assignment, &format!("{name}: default value"), layout.true_var);

        any_active = bool_expr::or(&any_active, &default_active_lit);
        cond = bool_expr::and(&cond, &bool_expr::not(&v_y));
    }

    let implicit_no = bool_expr::implies(&cond, &bool_expr::not(&bool_expr::var(SymbolVars::sym_y(owner))));
    tseitin::assert_root(engine, &implicit_no, &format!("{name}: implicit default n"), layout.true_var);

    Ok(any_active)
}

fn justification(
    _table: &SymbolTable,
    symbol: &Symbol,
    layout: &VariableLayout,
    engine: &mut crate::sat_engine::SatEngine,
    name: &str,
    prompt_visible: &BoolExpr,
    default_active: &BoolExpr,
) {
    let selected = bool_expr::var(SymbolVars::sym_selected(symbol));
    let justified = bool_expr::or(&bool_expr::or(prompt_visible, default_active), &selected);
    let fact = bool_expr::implies(&bool_expr::var(SymbolVars::sym_y(symbol)), &justified);
    tseitin::assert_root(engine, &fact, &format!("{name}: justification"), layout.true_var);
}

fn choice_block(
    table: &SymbolTable,
    symbol: &Symbol,
    layout: &VariableLayout,
    engine: &mut crate::sat_engine::SatEngine,
    prompt_visible: &HashMap<SymbolId, BoolExpr>,
) -> Result<(), CoreError> {
    let name = label_name(symbol);
    let members = symbol.choice_values().to_vec();
    let block_prompt_visible = prompt_visible
        .get(&symbol.id)
        .cloned()
        .unwrap_or_else(|| bool_expr::const_(false));

    if !symbol.is_optional() {
        let forces_y = bool_expr::implies(&block_prompt_visible, &bool_expr::var(SymbolVars::sym_y(symbol)));
        tseitin::assert_root(engine, &forces_y, &format!("{name}: choice forces selection"), layout.true_var);

        let any_member_visible = members.iter().fold(bool_expr::const_(false), |acc, &m| {
            let member = table.get(m);
            let mv = prompt_visible.get(&m).cloned().unwrap_or_else(|| any_prompt_visible_expr(member));
            bool_expr::or(&acc, &mv)
        });
        let any_member_y = members.iter().fold(bool_expr::const_(false), |acc, &m| {
            bool_expr::or(&acc, &bool_expr::var(SymbolVars::sym_y(table.get(m))))
        });
        let trigger = bool_expr::and(&block_prompt_visible, &any_member_visible);
        let requires_one = bool_expr::implies(&trigger, &any_member_y);
        tseitin::assert_root(engine, &requires_one, &format!("{name}: choice requires a member"), layout.true_var);
    }

    for i in 0..members.len() {
        for j in (i + 1)..members.len() {
            let yi = bool_expr::var(SymbolVars::sym_y(table.get(members[i])));
            let yj = bool_expr::var(SymbolVars::sym_y(table.get(members[j])));
            let not_both = bool_expr::or(&bool_expr::not(&yi), &bool_expr::not(&yj));
            tseitin::assert_root(engine, &not_both, &format!("{name}: choice mutual exclusion"), layout.true_var);
        }
    }

    let any_selected_or_visible = members.iter().fold(bool_expr::const_(false), |acc, &m| {
        let member = table.get(m);
        let sel = bool_expr::var(SymbolVars::sym_selected(member));
        let vis = prompt_visible.get(&m).cloned().unwrap_or_else(|| any_prompt_visible_expr(member));
        bool_expr::or(&acc, &bool_expr::or(&sel, &vis))
    });
    let initial_cond = bool_expr::not(&any_selected_or_visible);

    let defaults: Vec<(&satconfig_kconfig::Property, SymbolId)> = symbol
        .defaults()
        .map(|property| {
            let target = match &property.kind {
                PropertyKind::Default(satconfig_kconfig::Expr::Symbol(target)) => *target,
                _ => panic!("choice default must reference a member symbol"),
            };
            (property, target)
        })
        .collect();

    default_cascade(table, symbol, symbol.id, defaults.into_iter(), layout, engine, &name, initial_cond)?;
    Ok(())
}
