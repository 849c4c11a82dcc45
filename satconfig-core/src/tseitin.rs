//! Lowers a [`BoolExpr`] tree to CNF clauses via Tseitin's transformation, per
//! `spec.md` §4.5.
//!
//! One explicit-worklist post-order pass: each node is visited once (memoised on
//! `Rc` pointer identity, since the DAG shares subtrees), auxiliary variables are
//! allocated bottom-up, and the defining clauses are pushed to the engine as they're
//! discovered. `NOT` never allocates a variable: it just flips the sign of its
//! operand's literal.

use std::collections::HashMap;
use std::rc::Rc;

use crate::bool_expr::{BoolExpr, BoolExprNode};
use crate::sat_engine::SatEngine;

/// Lowers `expr` to clauses in `engine`, tagging every emitted clause with `label`
/// (plus a node-kind suffix), and returns the literal number of the root.
///
/// If the root is itself a plain literal (no auxiliary variable was needed because
/// the whole tree folded to a literal or a constant), the caller is responsible for
/// deciding whether a unit clause is warranted — `tseitin::encode` never emits one
/// itself, matching `spec.md` §4.5's "if the root literal is already a LITERAL ...
/// the caller emits a unit clause directly".
pub fn encode(engine: &mut SatEngine, expr: &BoolExpr, label: &str, true_var: u32) -> i32 {
    let mut memo: HashMap<*const BoolExprNode, i32> = HashMap::new();
    encode_node(engine, expr, label, true_var, &mut memo)
}

/// A node queued for the worklist: `Enter` means "compute this node's children before
/// its own literal", `Exit` means "this node's children are already memoised, emit its
/// defining clauses now". Holding owned `Rc` clones (cheap — a refcount bump) rather
/// than borrows keeps the stack self-contained across push/pop.
enum Frame {
    Enter(BoolExpr),
    Exit(BoolExpr),
}

/// Computes `root`'s literal with an explicit stack instead of the call stack: a
/// node's `Enter` frame pushes its own `Exit` frame underneath fresh `Enter` frames for
/// its children, so by LIFO order every child (and everything under it) is fully
/// resolved — and memoised — before the parent's `Exit` frame is reached. This keeps
/// `fold`-built chains (wide ANDs/ORs over many operands) from nesting call frames.
fn encode_node(
    engine: &mut SatEngine,
    root: &BoolExpr,
    label: &str,
    true_var: u32,
    memo: &mut HashMap<*const BoolExprNode, i32>,
) -> i32 {
    let mut stack = vec![Frame::Enter(root.clone())];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(expr) => {
                if memo.contains_key(&Rc::as_ptr(&expr)) {
                    continue;
                }
                match &*expr {
                    BoolExprNode::Const(_) | BoolExprNode::Literal(_) => {
                        stack.push(Frame::Exit(expr));
                    }
                    BoolExprNode::Not(inner) => {
                        let inner = inner.clone();
                        stack.push(Frame::Exit(expr));
                        stack.push(Frame::Enter(inner));
                    }
                    BoolExprNode::And(a, b) | BoolExprNode::Or(a, b) | BoolExprNode::Eq(a, b) => {
                        let a = a.clone();
                        let b = b.clone();
                        stack.push(Frame::Exit(expr));
                        stack.push(Frame::Enter(b));
                        stack.push(Frame::Enter(a));
                    }
                }
            }
            Frame::Exit(expr) => {
                let key = Rc::as_ptr(&expr);
                if memo.contains_key(&key) {
                    continue;
                }
                let lit = match &*expr {
                    BoolExprNode::Const(true) => true_var as i32,
                    BoolExprNode::Const(false) => -(true_var as i32),
                    BoolExprNode::Literal(k) => *k,
                    BoolExprNode::Not(inner) => -memo[&Rc::as_ptr(inner)],
                    BoolExprNode::And(a, b) => {
                        let la = memo[&Rc::as_ptr(a)];
                        let lb = memo[&Rc::as_ptr(b)];
                        let c = engine.new_var() as i32;
                        engine.add_literal(c);
                        engine.add_literal(-la);
                        engine.add_literal(-lb);
                        engine.close_clause(format!("{label} (AND fwd)"));
                        engine.add_literal(-c);
                        engine.add_literal(la);
                        engine.close_clause(format!("{label} (AND bwd a)"));
                        engine.add_literal(-c);
                        engine.add_literal(lb);
                        engine.close_clause(format!("{label} (AND bwd b)"));
                        c
                    }
                    BoolExprNode::Or(a, b) => {
                        let la = memo[&Rc::as_ptr(a)];
                        let lb = memo[&Rc::as_ptr(b)];
                        let c = engine.new_var() as i32;
                        engine.add_literal(-c);
                        engine.add_literal(la);
                        engine.add_literal(lb);
                        engine.close_clause(format!("{label} (OR fwd)"));
                        engine.add_literal(c);
                        engine.add_literal(-la);
                        engine.close_clause(format!("{label} (OR bwd a)"));
                        engine.add_literal(c);
                        engine.add_literal(-lb);
                        engine.close_clause(format!("{label} (OR bwd b)"));
                        c
                    }
                    BoolExprNode::Eq(a, b) => {
                        let la = memo[&Rc::as_ptr(a)];
                        let lb = memo[&Rc::as_ptr(b)];
                        let c = engine.new_var() as i32;
                        engine.add_literal(c);
                        engine.add_literal(la);
                        engine.add_literal(lb);
                        engine.close_clause(format!("{label} (EQ 1)"));
                        engine.add_literal(c);
                        engine.add_literal(-la);
                        engine.add_literal(-lb);
                        engine.close_clause(format!("{label} (EQ 2)"));
                        engine.add_literal(-c);
                        engine.add_literal(la);
                        engine.add_literal(-lb);
                        engine.close_clause(format!("{label} (EQ 3)"));
                        engine.add_literal(-c);
                        engine.add_literal(-la);
                        engine.add_literal(lb);
                        engine.close_clause(format!("{label} (EQ 4)"));
                        c
                    }
                };
                memo.insert(key, lit);
            }
        }
    }

    memo[&Rc::as_ptr(root)]
}

/// Encodes `expr` and asserts its root literal as a unit clause, unless the root
/// folded to `CONST(true)` (which needs no clause at all).
pub fn assert_root(engine: &mut SatEngine, expr: &BoolExpr, label: &str, true_var: u32) {
    if matches!(**expr, BoolExprNode::Const(true)) {
        return;
    }
    let root = encode(engine, expr, label, true_var);
    engine.add_unit_clause(root, label.to_string());
}
