//! Leaf-level identifier substitution over encoded operation records.

use crate::term::{Id, Term};

/// Rewrite every identifier leaf of `term` that occurs in `from_ids`.
///
/// A leaf equal to `from_ids[i]` becomes `to_ids[i]`; when an id appears
/// more than once in `from_ids`, the first occurrence wins. A matched
/// position with no counterpart in a shorter `to_ids` leaves the leaf
/// unchanged (best-effort positional pairing, no fault). Containers are
/// rebuilt with the same variant at every depth; only identifier leaves
/// are ever replaced.
///
/// Pure: the input record is never mutated, and output is identical for
/// identical inputs.
pub fn replace_ids(term: &Term, from_ids: &[Id], to_ids: &[Id]) -> Term {
    match term {
        Term::Ident(id) => match from_ids.iter().position(|from| from == id) {
            Some(pos) => match to_ids.get(pos) {
                Some(to) => Term::Ident(to.clone()),
                None => term.clone(),
            },
            None => term.clone(),
        },
        Term::List(items) => Term::List(replace_each(items, from_ids, to_ids)),
        Term::Tuple(items) => Term::Tuple(replace_each(items, from_ids, to_ids)),
        Term::Prim(_) => term.clone(),
    }
}

fn replace_each(items: &[Term], from_ids: &[Id], to_ids: &[Id]) -> Vec<Term> {
    items
        .iter()
        .map(|item| replace_ids(item, from_ids, to_ids))
        .collect()
}
