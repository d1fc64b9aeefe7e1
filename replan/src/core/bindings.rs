//! Binding diagnostics for declared procedure identifiers.

use std::collections::HashSet;

use crate::core::procedure::Procedure;
use crate::term::{Id, Term};

/// Report declared-id problems a retargeting caller usually wants to know
/// about before relying on positional rebinding:
/// - duplicate ids across `arg_ids` and `result_ids`
/// - declared ids that never occur in any operation
///
/// Findings are diagnostics with stable, sorted messages. They are not
/// errors: the engine rewrites opportunistically and treats an absent id
/// as a no-op.
pub fn audit_bindings(procedure: &Procedure) -> Vec<String> {
    let declared = [
        ("arg_ids", &procedure.arg_ids),
        ("result_ids", &procedure.result_ids),
    ];

    let mut findings = Vec::new();
    let mut seen: HashSet<&Id> = HashSet::new();
    for (role, ids) in declared {
        for id in ids {
            if !seen.insert(id) {
                findings.push(format!("duplicate declared id '{id}' in {role}"));
            }
        }
    }

    for (role, ids) in declared {
        for id in ids {
            let referenced = procedure
                .operations
                .iter()
                .any(|operation| contains_id(operation, id));
            if !referenced {
                findings.push(format!("{role} id '{id}' never occurs in any operation"));
            }
        }
    }

    findings.sort();
    findings
}

fn contains_id(term: &Term, target: &Id) -> bool {
    match term {
        Term::Ident(id) => id == target,
        Term::List(items) | Term::Tuple(items) => {
            items.iter().any(|item| contains_id(item, target))
        }
        Term::Prim(_) => false,
    }
}
