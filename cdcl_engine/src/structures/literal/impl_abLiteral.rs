//! Implementation details of the [literal trait](Literal) for the [ABLiteral] structure.

use crate::{
    structures::atom::Atom,
    structures::literal::{ABLiteral, Literal},
};
