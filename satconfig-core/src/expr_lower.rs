//! Lowers configuration-language [`Expr`] trees to tristate `(y, m)` pairs of
//! [`BoolExpr`], per `spec.md` §4.3.
//!
//! A tristate value `v` is represented by `(v ≥ y, v = mod)`: `n = (F, F)`,
//! `m = (T, T)`, `y = (T, F)`.

use std::fmt;

use satconfig_kconfig::{Expr, Kind, SymbolId, SymbolTable, SYM_MOD, SYM_NO, SYM_YES};

use crate::bool_expr::{self, BoolExpr};
use crate::variable_layout::SymbolVars;

/// Lowering can only fail on an equality (`spec.md` §9 Open Question 3): comparing
/// against a symbol that was never declared (`Kind::Unknown`, assigned by the parser's
/// forward-reference handling) has no sound tristate or string reading, so it is
/// rejected rather than silently folded to a pointer-identity `CONST`.
#[derive(Debug)]
pub enum LowerError {
    UnknownEquality { symbol: String },
}

impl fmt::Display for LowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LowerError::UnknownEquality { symbol } => {
                write!(f, "'{symbol}' is compared with '=' or '!=' but was never declared")
            }
        }
    }
}

impl std::error::Error for LowerError {}

/// A lowered tristate pair: `y` is "at least yes", `m` is "exactly mod".
#[derive(Clone)]
pub struct TriPair {
    pub y: BoolExpr,
    pub m: BoolExpr,
}

impl TriPair {
    fn new(y: BoolExpr, m: BoolExpr) -> Self {
        Self { y, m }
    }

    fn constant(value: bool) -> Self {
        Self::new(bool_expr::const_(value), bool_expr::const_(false))
    }
}

/// Lowers `expr` with no "depends on m" special-casing in effect — used for
/// `select`/`default` value expressions, where a bare `m` sentinel means the ordinary
/// tristate constant, not the visibility restriction of `spec.md` §4.3.
pub fn lower(table: &SymbolTable, expr: &Expr) -> Result<TriPair, LowerError> {
    lower_inner(table, expr, None)
}

/// Lowers a property's visibility/`if` expression belonging to tristate symbol
/// `owner`, honouring the special `depends on m` rule: any `SYM_MOD` leaf in this
/// tree restricts `owner` to `n` or `m` rather than denoting the constant `m`.
pub fn lower_visibility(table: &SymbolTable, expr: &Expr, owner: SymbolId) -> Result<TriPair, LowerError> {
    lower_inner(table, expr, Some(owner))
}

/// Convenience form of [`lower_visibility`] taking the owning [`satconfig_kconfig::Symbol`]
/// directly, since `ClauseBuilder` always has it in hand already.
pub fn lower_visibility_for(
    table: &SymbolTable,
    expr: &Expr,
    owner: &satconfig_kconfig::Symbol,
) -> Result<TriPair, LowerError> {
    lower_inner(table, expr, Some(owner.id))
}

fn lower_inner(table: &SymbolTable, expr: &Expr, owner: Option<SymbolId>) -> Result<TriPair, LowerError> {
    match expr {
        Expr::Symbol(id) => Ok(lower_symbol(table, *id, owner)),
        Expr::Equal(a, b) => lower_equality(table, *a, *b, owner, false),
        Expr::Unequal(a, b) => lower_equality(table, *a, *b, owner, true),
        Expr::Not(inner) => {
            let a = lower_inner(table, inner, owner)?;
            Ok(TriPair::new(bool_expr::implies(&a.y, &a.m), a.m))
        }
        Expr::And(a, b) => {
            let a = lower_inner(table, a, owner)?;
            let b = lower_inner(table, b, owner)?;
            let y = bool_expr::and(&a.y, &b.y);
            let am_by = bool_expr::and(&a.y, &b.m);
            let by_am = bool_expr::and(&a.m, &b.y);
            let m = bool_expr::or(&am_by, &by_am);
            Ok(TriPair::new(y, m))
        }
        Expr::Or(a, b) => {
            let a = lower_inner(table, a, owner)?;
            let b = lower_inner(table, b, owner)?;
            let y = bool_expr::or(&a.y, &b.y);
            let a_ok = bool_expr::implies(&a.y, &a.m);
            let b_ok = bool_expr::implies(&b.y, &b.m);
            let both_ok = bool_expr::and(&a_ok, &b_ok);
            let m = bool_expr::and(&y, &both_ok);
            Ok(TriPair::new(y, m))
        }
        Expr::List(_) | Expr::Range(_, _) => {
            // Neither has boolean meaning on its own (`spec.md` §4.3); callers that
            // reach here (choice default lists, range bounds) destructure the
            // expression themselves rather than lowering it wholesale.
            Ok(TriPair::constant(false))
        }
    }
}

fn lower_symbol(table: &SymbolTable, id: SymbolId, owner: Option<SymbolId>) -> TriPair {
    if id == SYM_NO {
        return TriPair::constant(false);
    }
    if id == SYM_YES {
        return TriPair::new(bool_expr::const_(true), bool_expr::const_(false));
    }
    if id == SYM_MOD {
        if let Some(owner) = owner {
            let owner_symbol = table.get(owner);
            if owner_symbol.kind == Kind::Tristate {
                let y = SymbolVars::sym_y(owner_symbol);
                let m = SymbolVars::sym_m(owner_symbol);
                return TriPair::new(
                    bool_expr::implies(&bool_expr::var(y), &bool_expr::var(m)),
                    bool_expr::const_(false),
                );
            }
        }
        return TriPair::new(bool_expr::const_(true), bool_expr::const_(true));
    }

    let symbol = table.get(id);
    match symbol.kind {
        Kind::Bool => TriPair::new(bool_expr::var(SymbolVars::sym_y(symbol)), bool_expr::const_(false)),
        Kind::Tristate => TriPair::new(
            bool_expr::var(SymbolVars::sym_y(symbol)),
            bool_expr::var(SymbolVars::sym_m(symbol)),
        ),
        Kind::Int | Kind::Hex | Kind::String | Kind::Unknown => TriPair::constant(false),
    }
}

fn lower_equality(
    table: &SymbolTable,
    a: SymbolId,
    b: SymbolId,
    owner: Option<SymbolId>,
    negate: bool,
) -> Result<TriPair, LowerError> {
    let sa = table.get(a);
    let sb = table.get(b);

    let result = if sa.kind.is_tristate() && sb.kind.is_tristate() {
        let pa = lower_symbol(table, a, owner);
        let pb = lower_symbol(table, b, owner);
        let y_eq = bool_expr::eq(&pa.y, &pb.y);
        let m_eq = bool_expr::eq(&pa.m, &pb.m);
        bool_expr::and(&y_eq, &m_eq)
    } else if matches!(sa.kind, Kind::String | Kind::Int | Kind::Hex)
        || matches!(sb.kind, Kind::String | Kind::Int | Kind::Hex)
    {
        let equal = sa.get_string_value() == sb.get_string_value();
        bool_expr::const_(equal)
    } else {
        let unknown = if sa.kind == Kind::Unknown { sa } else { sb };
        return Err(LowerError::UnknownEquality {
            symbol: unknown.name.clone().unwrap_or_else(|| format!("<symbol#{}>", unknown.id)),
        });
    };

    let y = if negate { bool_expr::not(&result) } else { result };
    Ok(TriPair::new(y, bool_expr::const_(false)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use satconfig_kconfig::Expr;

    /// Asserts `pair` folded to the constant tristate encoding of `expected`
    /// (`spec.md` §4.3's `n = (F, F)`, `m = (T, T)`, `y = (T, F)`), i.e. that every
    /// intermediate `BoolExpr` actually constant-folded down rather than leaving a
    /// dangling symbolic node.
    fn assert_tri(result: Result<TriPair, LowerError>, expected_y: bool, expected_m: bool) {
        let pair = result.expect("lowering should not fail on a well-typed fixture");
        assert!(
            bool_expr::bool_equal(&pair.y, &bool_expr::const_(expected_y)),
            "y bit did not fold to {expected_y}: {}",
            bool_expr::pretty(&pair.y)
        );
        assert!(
            bool_expr::bool_equal(&pair.m, &bool_expr::const_(expected_m)),
            "m bit did not fold to {expected_m}: {}",
            bool_expr::pretty(&pair.m)
        );
    }

    #[test]
    fn sentinel_constants_match_the_tristate_encoding() {
        let table = SymbolTable::new();
        assert_tri(lower(&table, &Expr::Symbol(SYM_NO)), false, false);
        assert_tri(lower(&table, &Expr::Symbol(SYM_YES)), true, false);
        assert_tri(lower(&table, &Expr::Symbol(SYM_MOD)), true, true);
    }

    #[test]
    fn and_takes_the_tristate_minimum() {
        let table = SymbolTable::new();
        let y = Expr::Symbol(SYM_YES);
        let m = Expr::Symbol(SYM_MOD);
        let n = Expr::Symbol(SYM_NO);

        assert_tri(lower(&table, &Expr::and(y.clone(), m.clone())), true, true); // min(y, m) = m
        assert_tri(lower(&table, &Expr::and(m.clone(), n.clone())), false, false); // min(m, n) = n
        assert_tri(lower(&table, &Expr::and(y.clone(), y.clone())), true, false); // min(y, y) = y
    }

    #[test]
    fn or_takes_the_tristate_maximum() {
        let table = SymbolTable::new();
        let y = Expr::Symbol(SYM_YES);
        let m = Expr::Symbol(SYM_MOD);
        let n = Expr::Symbol(SYM_NO);

        assert_tri(lower(&table, &Expr::or(y.clone(), n.clone())), true, false); // max(y, n) = y
        assert_tri(lower(&table, &Expr::or(m.clone(), n.clone())), true, true); // max(m, n) = m
        assert_tri(lower(&table, &Expr::or(n.clone(), n.clone())), false, false); // max(n, n) = n
    }

    #[test]
    fn not_negates_yes_and_no_but_fixes_mod() {
        let table = SymbolTable::new();
        assert_tri(lower(&table, &Expr::not(Expr::Symbol(SYM_YES))), false, false);
        assert_tri(lower(&table, &Expr::not(Expr::Symbol(SYM_NO))), true, false);
        assert_tri(lower(&table, &Expr::not(Expr::Symbol(SYM_MOD))), true, true);
    }

    #[test]
    fn equal_and_unequal_on_sentinels_fold_to_constants() {
        let table = SymbolTable::new();
        assert_tri(lower(&table, &Expr::Equal(SYM_YES, SYM_YES)), true, false);
        assert_tri(lower(&table, &Expr::Equal(SYM_YES, SYM_MOD)), false, false);
        assert_tri(lower(&table, &Expr::Unequal(SYM_YES, SYM_MOD)), true, false);
    }

    #[test]
    fn non_tristate_symbol_lowers_to_the_constant_n_pair() {
        let mut table = SymbolTable::new();
        let s = table.declare(
            Some("ARCH".to_string()),
            Kind::String,
            satconfig_kconfig::Span::synthetic(),
        );
        assert_tri(lower(&table, &Expr::Symbol(s)), false, false);
    }

    #[test]
    fn equality_against_an_undeclared_symbol_is_rejected() {
        let mut table = SymbolTable::new();
        let known = table.declare(Some("A".to_string()), Kind::Bool, satconfig_kconfig::Span::synthetic());
        let ghost = table.declare(None, Kind::Unknown, satconfig_kconfig::Span::synthetic());

        let err = lower(&table, &Expr::Equal(known, ghost)).unwrap_err();
        assert!(matches!(err, LowerError::UnknownEquality { .. }));
    }
}
