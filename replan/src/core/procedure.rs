//! Retargetable recorded procedures.
//!
//! A procedure is built once from a trace of operations and the ids that
//! trace produced. Retargeting rebinds it to new argument values, result
//! destinations, or a new owning worker by rewriting identifier occurrences
//! throughout the stored records, without re-recording or reordering them.

use std::fmt;

use tracing::debug;

use crate::core::rewrite::replace_ids;
use crate::term::{Id, Term};

/// Ordered sequence of encoded operation records plus the identifier
/// bindings (arguments, results) needed to replay them with fresh data.
///
/// `operations` is in execution order and is never reordered here. The
/// trust boundary is the external tracer/codec that produced the records:
/// construction performs no validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Procedure {
    /// Encoded operation records, insertion order = execution order.
    pub operations: Vec<Term>,
    /// Formal input ids; position `i` binds the `i`-th actual argument.
    pub arg_ids: Vec<Id>,
    /// Declared output ids, same positional contract.
    pub result_ids: Vec<Id>,
    /// Set only on procedures augmented for promise-based execution.
    /// Carried through encode/decode, never rewritten by retargeting.
    pub promise_out_id: Option<Id>,
}

/// Call-site seam: an argument is anything that exposes an identifier.
pub trait ValueHandle {
    fn id(&self) -> Id;
}

impl ValueHandle for Id {
    fn id(&self) -> Id {
        self.clone()
    }
}

impl Procedure {
    pub fn new(operations: Vec<Term>, arg_ids: Vec<Id>, result_ids: Vec<Id>) -> Self {
        Self {
            operations,
            arg_ids,
            result_ids,
            promise_out_id: None,
        }
    }

    /// Rebind the procedure to a new concrete call.
    ///
    /// Rewrites every occurrence of the current argument ids to the ids
    /// exposed by `args`, position by position, then does the same for
    /// `result_ids` against the previous outputs. Lengths are not
    /// cross-checked: a mismatch yields partial substitution, not an error.
    pub fn update_args<H: ValueHandle>(&mut self, args: &[H], result_ids: Vec<Id>) {
        let new_arg_ids: Vec<Id> = args.iter().map(ValueHandle::id).collect();
        let old_arg_ids = std::mem::take(&mut self.arg_ids);
        self.update_ids(Some((old_arg_ids.as_slice(), new_arg_ids.as_slice())), None);
        self.arg_ids = new_arg_ids;

        let old_result_ids = std::mem::take(&mut self.result_ids);
        self.update_ids(Some((old_result_ids.as_slice(), result_ids.as_slice())), None);
        self.result_ids = result_ids;
    }

    /// Rebind every occurrence of one party id to another throughout the
    /// stored operations, leaving `arg_ids`/`result_ids` untouched.
    pub fn update_worker_ids(&mut self, from_worker: &Id, to_worker: &Id) -> &mut Self {
        self.update_ids(None, Some((from_worker, to_worker)))
    }

    /// General substitution entry point.
    ///
    /// Each substitution runs only when its pair is present and non-empty;
    /// an absent pair is a silent no-op, not an error. Within each
    /// operation the worker rebinding applies before the id-list rebinding.
    /// Identifiers absent from the records rewrite nothing. Returns the
    /// receiver for chaining.
    pub fn update_ids(
        &mut self,
        ids: Option<(&[Id], &[Id])>,
        workers: Option<(&Id, &Id)>,
    ) -> &mut Self {
        let workers =
            workers.map(|(from, to)| (vec![from.clone()], vec![to.clone()]));
        // Empty id lists count as absent, same as a missing pair.
        let ids = ids.filter(|(from, to)| !from.is_empty() && !to.is_empty());

        for operation in &mut self.operations {
            if let Some((from, to)) = &workers {
                *operation = replace_ids(operation, from, to);
            }
            if let Some((from, to)) = ids {
                *operation = replace_ids(operation, from, to);
            }
        }

        debug!(
            operations = self.operations.len(),
            value_ids = ids.map_or(0, |(from, _)| from.len()),
            worker = workers.is_some(),
            "rewrote procedure ids"
        );
        self
    }

    /// Independent deep copy of the recorded operations and id bindings,
    /// safe to retarget without affecting the original.
    ///
    /// The fork starts without a promise binding: `promise_out_id` is not
    /// propagated, and callers opting into promise execution must set it
    /// again explicitly. Use `clone` for a field-for-field copy.
    pub fn fork(&self) -> Procedure {
        Procedure {
            operations: self.operations.clone(),
            arg_ids: self.arg_ids.clone(),
            result_ids: self.result_ids.clone(),
            promise_out_id: None,
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Procedure operations:{}>", self.operations.len())
    }
}
