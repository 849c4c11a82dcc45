//! A small, `Rc`-owned Boolean expression DAG with simplifying smart constructors.
//!
//! The original `satconf.c` walks a hand-rolled `malloc`/refcount dance (`bool_get`,
//! `bool_put`, a `refcount` field on every node) to share subtrees and release them when
//! the last edge pointing at them is dropped. `Rc` gives the same sharing and the same
//! "destroyed when the last edge drops" behaviour for free, so ownership transfer is
//! just moving (or cloning) an `Rc` rather than a pair of hand-matched `get`/`put` calls.
//! What the original's refcounting bought *beyond* memory management — a
//! construction/destruction count a test suite can check balances — is kept here as two
//! plain counters, bumped from the constructors and from `Drop`.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

thread_local! {
    static CREATED: Cell<u64> = Cell::new(0);
    static DESTROYED: Cell<u64> = Cell::new(0);
}

/// A node in a Boolean expression DAG. `Literal` holds a signed SAT variable index
/// (negative means negated), matching the DIMACS convention the rest of the crate uses.
#[derive(Debug)]
pub enum BoolExprNode {
    Const(bool),
    Literal(i32),
    Not(BoolExpr),
    And(BoolExpr, BoolExpr),
    Or(BoolExpr, BoolExpr),
    Eq(BoolExpr, BoolExpr),
}

impl Drop for BoolExprNode {
    fn drop(&mut self) {
        DESTROYED.with(|d| d.set(d.get() + 1));
    }
}

pub type BoolExpr = Rc<BoolExprNode>;

fn fresh(node: BoolExprNode) -> BoolExpr {
    CREATED.with(|c| c.set(c.get() + 1));
    Rc::new(node)
}

/// The number of nodes allocated by the smart constructors since the last
/// [reset_counters] call.
pub fn created() -> u64 {
    CREATED.with(|c| c.get())
}

/// The number of nodes actually dropped since the last [reset_counters] call.
pub fn destroyed() -> u64 {
    DESTROYED.with(|d| d.get())
}

/// Zeroes both counters; called once per `ClauseBuilder::build` so the Driver can check
/// the refcount-balance invariant in isolation for that phase.
pub fn reset_counters() {
    CREATED.with(|c| c.set(0));
    DESTROYED.with(|d| d.set(0));
}

pub fn const_(value: bool) -> BoolExpr {
    fresh(BoolExprNode::Const(value))
}

/// A bare positive literal for SAT variable `v`.
pub fn var(v: u32) -> BoolExpr {
    literal(v as i32)
}

/// A literal with an explicit sign; `k` must be nonzero.
pub fn literal(k: i32) -> BoolExpr {
    debug_assert_ne!(k, 0, "literal 0 has no variable");
    fresh(BoolExprNode::Literal(k))
}

pub fn not(e: &BoolExpr) -> BoolExpr {
    match &**e {
        BoolExprNode::Const(b) => const_(!b),
        BoolExprNode::Literal(k) => literal(-k),
        BoolExprNode::Not(inner) => inner.clone(),
        _ => fresh(BoolExprNode::Not(e.clone())),
    }
}

pub fn and(a: &BoolExpr, b: &BoolExpr) -> BoolExpr {
    match (&**a, &**b) {
        (BoolExprNode::Const(false), _) | (_, BoolExprNode::Const(false)) => const_(false),
        (BoolExprNode::Const(true), _) => b.clone(),
        (_, BoolExprNode::Const(true)) => a.clone(),
        _ => fresh(BoolExprNode::And(a.clone(), b.clone())),
    }
}

pub fn or(a: &BoolExpr, b: &BoolExpr) -> BoolExpr {
    match (&**a, &**b) {
        (BoolExprNode::Const(true), _) | (_, BoolExprNode::Const(true)) => const_(true),
        (BoolExprNode::Const(false), _) => b.clone(),
        (_, BoolExprNode::Const(false)) => a.clone(),
        _ => fresh(BoolExprNode::Or(a.clone(), b.clone())),
    }
}

pub fn eq(a: &BoolExpr, b: &BoolExpr) -> BoolExpr {
    match (&**a, &**b) {
        (BoolExprNode::Const(true), _) => b.clone(),
        (_, BoolExprNode::Const(true)) => a.clone(),
        (BoolExprNode::Const(false), _) => not(b),
        (_, BoolExprNode::Const(false)) => not(a),
        _ => fresh(BoolExprNode::Eq(a.clone(), b.clone())),
    }
}

pub fn implies(a: &BoolExpr, b: &BoolExpr) -> BoolExpr {
    or(&not(a), b)
}

/// Structural equality, used by tests and as an (unused in production) optional
/// simplification hook.
pub fn bool_equal(a: &BoolExpr, b: &BoolExpr) -> bool {
    if Rc::ptr_eq(a, b) {
        return true;
    }
    match (&**a, &**b) {
        (BoolExprNode::Const(x), BoolExprNode::Const(y)) => x == y,
        (BoolExprNode::Literal(x), BoolExprNode::Literal(y)) => x == y,
        (BoolExprNode::Not(x), BoolExprNode::Not(y)) => bool_equal(x, y),
        (BoolExprNode::And(x1, x2), BoolExprNode::And(y1, y2))
        | (BoolExprNode::Or(x1, x2), BoolExprNode::Or(y1, y2))
        | (BoolExprNode::Eq(x1, x2), BoolExprNode::Eq(y1, y2)) => {
            bool_equal(x1, y1) && bool_equal(x2, y2)
        }
        _ => false,
    }
}

/// Renders an expression for clause labels and debugging; not used on any hot path.
pub fn pretty(e: &BoolExpr) -> String {
    let mut out = String::new();
    write_pretty(e, &mut out);
    out
}

fn write_pretty(e: &BoolExpr, out: &mut String) {
    match &**e {
        BoolExprNode::Const(b) => out.push_str(if *b { "T" } else { "F" }),
        BoolExprNode::Literal(k) => {
            let _ = write!(out, "{k}");
        }
        BoolExprNode::Not(inner) => {
            out.push('!');
            write_pretty(inner, out);
        }
        BoolExprNode::And(a, b) => {
            out.push('(');
            write_pretty(a, out);
            out.push_str(" & ");
            write_pretty(b, out);
            out.push(')');
        }
        BoolExprNode::Or(a, b) => {
            out.push('(');
            write_pretty(a, out);
            out.push_str(" | ");
            write_pretty(b, out);
            out.push(')');
        }
        BoolExprNode::Eq(a, b) => {
            out.push('(');
            write_pretty(a, out);
            out.push_str(" = ");
            write_pretty(b, out);
            out.push(')');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_folding_short_circuits_and_or() {
        let t = const_(true);
        let f = const_(false);
        let v = var(5);

        assert!(matches!(*and(&f, &v), BoolExprNode::Const(false)));
        assert!(matches!(*and(&t, &v), BoolExprNode::Literal(5)));
        assert!(matches!(*or(&t, &v), BoolExprNode::Const(true)));
        assert!(matches!(*or(&f, &v), BoolExprNode::Literal(5)));
    }

    #[test]
    fn double_negation_and_literal_negation_collapse() {
        let v = var(3);
        let nn = not(&not(&v));
        assert!(matches!(*nn, BoolExprNode::Literal(3)));

        let n = not(&v);
        assert!(matches!(*n, BoolExprNode::Literal(-3)));
    }

    #[test]
    fn eq_short_circuits_on_constants() {
        let v = var(7);
        assert!(bool_equal(&eq(&const_(true), &v), &v));
        assert!(matches!(*eq(&const_(false), &v), BoolExprNode::Literal(-7)));
    }

    #[test]
    fn refcounts_balance_once_everything_is_dropped() {
        reset_counters();
        {
            let a = var(1);
            let b = var(2);
            let _c = and(&a, &b);
            let _d = or(&a, &b);
        }
        assert_eq!(created(), destroyed());
    }
}
