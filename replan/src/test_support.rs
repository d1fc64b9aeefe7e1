//! Test-only helpers for constructing encoded terms and procedures.

use crate::core::procedure::Procedure;
use crate::term::{Id, Prim, Term};

/// Identifier leaf with a numeric id.
pub fn ident(id: u64) -> Term {
    Term::Ident(Id::Num(id))
}

/// Identifier leaf with a string id (e.g. a worker).
pub fn named(id: &str) -> Term {
    Term::Ident(Id::Name(id.to_string()))
}

/// String primitive leaf (e.g. an operation name).
pub fn op_name(name: &str) -> Term {
    Term::Prim(Prim::Str(name.to_string()))
}

/// Tuple-shaped operation record.
pub fn op(items: Vec<Term>) -> Term {
    Term::Tuple(items)
}

/// Binary operation record `(name, lhs, rhs, out)` with numeric ids.
pub fn binary_op(name: &str, lhs: u64, rhs: u64, out: u64) -> Term {
    op(vec![op_name(name), ident(lhs), ident(rhs), ident(out)])
}

/// Procedure over `operations` with numeric arg/result ids.
pub fn procedure(operations: Vec<Term>, arg_ids: &[u64], result_ids: &[u64]) -> Procedure {
    Procedure::new(
        operations,
        arg_ids.iter().copied().map(Id::Num).collect(),
        result_ids.iter().copied().map(Id::Num).collect(),
    )
}
