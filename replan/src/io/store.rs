//! Procedure file load/save in the v1 transport form.
//!
//! Files hold the flat 4-tuple produced by [`simplify`], as JSON validated
//! against the v1 schema before decoding.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::Draft;
use serde_json::Value;
use tracing::debug;

use crate::core::codec::{detail, simplify};
use crate::core::procedure::Procedure;
use crate::term::Term;

/// JSON Schema (Draft 2020-12) for the persisted v1 transport form.
pub const V1_SCHEMA: &str = include_str!("../../../schemas/procedure/v1.schema.json");

/// Load and validate a procedure from disk (schema + decode).
pub fn load_procedure(path: &Path) -> Result<Procedure> {
    debug!(path = %path.display(), "loading procedure");
    let contents =
        fs::read_to_string(path).with_context(|| format!("read procedure {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse procedure {}", path.display()))?;
    validate_schema(&value)?;
    let term: Term = serde_json::from_value(value)
        .with_context(|| format!("deserialize procedure {}", path.display()))?;
    let procedure =
        detail(&term).map_err(|err| anyhow!("decode procedure {}: {err}", path.display()))?;
    debug!(operations = procedure.operations.len(), "procedure loaded");
    Ok(procedure)
}

/// Atomically write a procedure in the v1 transport form (temp file + rename).
pub fn save_procedure(path: &Path, procedure: &Procedure, pretty: bool) -> Result<()> {
    debug!(path = %path.display(), operations = procedure.operations.len(), "writing procedure");
    let term = simplify(procedure);
    let mut buf = if pretty {
        serde_json::to_string_pretty(&term).context("serialize procedure")?
    } else {
        serde_json::to_string(&term).context("serialize procedure")?
    };
    buf.push('\n');
    write_atomic(path, &buf)
}

/// Validate a JSON instance against the v1 schema (Draft 2020-12).
fn validate_schema(instance: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(V1_SCHEMA).context("parse v1 schema")?;
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .context("compile json schema")?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        bail!("schema validation failed:\n- {}", messages.join("\n- "));
    }
    Ok(())
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("procedure path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp procedure {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace procedure {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Id;
    use crate::test_support::{binary_op, op, op_name, procedure};

    /// Verifies save → load round-trip preserves the procedure exactly,
    /// including the promise binding.
    #[test]
    fn save_and_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("procedure.json");

        let mut original = procedure(
            vec![
                binary_op("add", 101, 102, 103),
                op(vec![op_name("send"), Term::List(vec![binary_op("mul", 103, 103, 104)])]),
            ],
            &[101, 102],
            &[104],
        );
        original.promise_out_id = Some(Id::Name("promise-1".to_string()));

        save_procedure(&path, &original, true).expect("save");
        let loaded = load_procedure(&path).expect("load");

        assert_eq!(loaded, original);
    }

    /// Compact output round-trips the same as pretty output.
    #[test]
    fn save_compact_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("procedure.json");

        let original = procedure(vec![binary_op("add", 1, 2, 3)], &[1, 2], &[3]);
        save_procedure(&path, &original, false).expect("save");

        let contents = fs::read_to_string(&path).expect("read");
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.ends_with('\n'));
        assert_eq!(load_procedure(&path).expect("load"), original);
    }

    /// Files that fail the v1 schema are rejected before decoding.
    #[test]
    fn load_rejects_schema_violations() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("procedure.json");
        fs::write(&path, "{\"tuple\": []}\n").expect("write");

        let err = load_procedure(&path).expect_err("schema should reject");
        assert!(err.to_string().contains("schema validation failed"));
    }

    /// Non-JSON input reports the parse failure with the path.
    #[test]
    fn load_rejects_malformed_json() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("procedure.json");
        fs::write(&path, "not json").expect("write");

        let err = load_procedure(&path).expect_err("parse should fail");
        assert!(err.to_string().contains("parse procedure"));
    }
}
