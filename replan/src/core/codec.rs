//! Transport form of a procedure: a flat ordered 4-tuple.
//!
//! `simplify` and `detail` are exact inverses. Operations are encoded
//! shallow: the records are already in fully-encoded leaf form, so only
//! the outer sequence container is built or unwrapped here.

use crate::core::procedure::Procedure;
use crate::term::{Id, Prim, Term};

/// Encode a procedure as `(operations, arg_ids, result_ids, promise_out_id)`.
pub fn simplify(procedure: &Procedure) -> Term {
    let promise_out_id = match &procedure.promise_out_id {
        Some(id) => Term::Ident(id.clone()),
        None => Term::Prim(Prim::Null),
    };
    Term::Tuple(vec![
        Term::List(procedure.operations.clone()),
        ids_term(&procedure.arg_ids),
        ids_term(&procedure.result_ids),
        promise_out_id,
    ])
}

/// Decode the exact inverse of [`simplify`].
///
/// Consumers must supply the four fields in fixed order; wrong arity or a
/// wrong field shape fails with a stable message.
pub fn detail(term: &Term) -> Result<Procedure, String> {
    let fields = match term {
        Term::Tuple(items) => items,
        other => {
            return Err(format!("expected procedure tuple, got {}", other.shape()));
        }
    };
    let [operations, arg_ids, result_ids, promise_out_id] = fields.as_slice() else {
        return Err(format!("expected 4 procedure fields, got {}", fields.len()));
    };

    let operations = match operations {
        Term::List(items) | Term::Tuple(items) => items.clone(),
        other => {
            return Err(format!("operations: expected sequence, got {}", other.shape()));
        }
    };
    let arg_ids = detail_ids("arg_ids", arg_ids)?;
    let result_ids = detail_ids("result_ids", result_ids)?;
    let promise_out_id = match promise_out_id {
        Term::Prim(Prim::Null) => None,
        Term::Ident(id) => Some(id.clone()),
        other => {
            return Err(format!(
                "promise_out_id: expected identifier or null, got {}",
                other.shape()
            ));
        }
    };

    let mut procedure = Procedure::new(operations, arg_ids, result_ids);
    procedure.promise_out_id = promise_out_id;
    Ok(procedure)
}

fn ids_term(ids: &[Id]) -> Term {
    Term::List(ids.iter().cloned().map(Term::Ident).collect())
}

fn detail_ids(field: &str, term: &Term) -> Result<Vec<Id>, String> {
    let items = match term {
        Term::List(items) | Term::Tuple(items) => items,
        other => {
            return Err(format!("{field}: expected sequence, got {}", other.shape()));
        }
    };
    items
        .iter()
        .map(|item| match item {
            Term::Ident(id) => Ok(id.clone()),
            other => Err(format!("{field}: expected identifier, got {}", other.shape())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{binary_op, ident, op, op_name, procedure};

    /// Encode then decode reproduces the procedure exactly, including the
    /// promise binding and arbitrarily nested operation content.
    #[test]
    fn simplify_detail_round_trips() {
        let mut original = procedure(
            vec![
                binary_op("add", 101, 102, 103),
                op(vec![
                    op_name("stack"),
                    Term::List(vec![op(vec![ident(103), ident(7)])]),
                    ident(104),
                ]),
            ],
            &[101, 102],
            &[104],
        );
        original.promise_out_id = Some(Id::Num(900));

        let detailed = detail(&simplify(&original)).expect("decode");

        assert_eq!(detailed, original);
    }

    /// An absent promise binding encodes as a null leaf in the fourth slot.
    #[test]
    fn simplify_encodes_absent_promise_as_null() {
        let encoded = simplify(&procedure(vec![], &[], &[]));

        let Term::Tuple(fields) = &encoded else {
            panic!("expected tuple");
        };
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[3], Term::Prim(Prim::Null));
    }

    /// Operation records are carried as-is: simplify is shallow over them.
    #[test]
    fn simplify_is_shallow_over_operations() {
        let record = binary_op("add", 1, 2, 3);
        let encoded = simplify(&procedure(vec![record.clone()], &[1, 2], &[3]));

        let Term::Tuple(fields) = &encoded else {
            panic!("expected tuple");
        };
        assert_eq!(fields[0], Term::List(vec![record]));
    }

    #[test]
    fn detail_rejects_wrong_arity() {
        let err = detail(&Term::Tuple(vec![Term::List(vec![])])).expect_err("arity");
        assert_eq!(err, "expected 4 procedure fields, got 1");
    }

    #[test]
    fn detail_rejects_non_tuple_root() {
        let err = detail(&Term::List(vec![])).expect_err("root shape");
        assert_eq!(err, "expected procedure tuple, got list");
    }

    #[test]
    fn detail_rejects_non_identifier_id_entries() {
        let encoded = Term::Tuple(vec![
            Term::List(vec![]),
            Term::List(vec![op_name("add")]),
            Term::List(vec![]),
            Term::Prim(Prim::Null),
        ]);

        let err = detail(&encoded).expect_err("id shape");
        assert_eq!(err, "arg_ids: expected identifier, got prim");
    }
}
