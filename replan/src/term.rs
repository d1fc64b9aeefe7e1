use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Encoded identifier for a stored value or an executing party (worker).
///
/// Equality is structural equality of the encoded form: numeric ids compare
/// as numbers, string ids as strings, never across the two.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Num(u64),
    Name(String),
}

impl Id {
    /// Parse a user-supplied id: all-digit input is numeric, anything else a name.
    pub fn parse(raw: &str) -> Id {
        match raw.parse::<u64>() {
            Ok(num) => Id::Num(num),
            Err(_) => Id::Name(raw.to_string()),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Num(num) => write!(f, "{num}"),
            Id::Name(name) => write!(f, "{name}"),
        }
    }
}

/// Non-identifier leaf value inside an encoded operation record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prim {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Bytes(Vec<u8>),
    Str(String),
}

/// One element of an encoded operation record.
///
/// `List` vs `Tuple` carries the container distinction of the encoded form;
/// rewrites must rebuild the same variant at every depth.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    Ident(Id),
    Prim(Prim),
    List(Vec<Term>),
    Tuple(Vec<Term>),
}

impl Term {
    /// Variant name for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            Term::Ident(_) => "ident",
            Term::Prim(_) => "prim",
            Term::List(_) => "list",
            Term::Tuple(_) => "tuple",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_parse_distinguishes_numbers_from_names() {
        assert_eq!(Id::parse("101"), Id::Num(101));
        assert_eq!(Id::parse("alice"), Id::Name("alice".to_string()));
        assert_eq!(Id::parse("-3"), Id::Name("-3".to_string()));
    }

    #[test]
    fn term_serializes_to_expected_json_shapes() {
        let term = Term::Tuple(vec![
            Term::Prim(Prim::Str("add".to_string())),
            Term::Ident(Id::Num(101)),
            Term::Ident(Id::Name("alice".to_string())),
            Term::List(vec![Term::Prim(Prim::Null)]),
        ]);
        let value = serde_json::to_value(&term).expect("serialize");
        assert_eq!(
            value,
            json!({
                "tuple": [
                    { "prim": { "str": "add" } },
                    { "ident": 101 },
                    { "ident": "alice" },
                    { "list": [{ "prim": "null" }] },
                ]
            })
        );
    }

    #[test]
    fn term_json_round_trips() {
        let term = Term::List(vec![
            Term::Ident(Id::Num(7)),
            Term::Prim(Prim::Float(OrderedFloat(1.5))),
            Term::Prim(Prim::Bytes(vec![0, 255])),
            Term::Tuple(vec![Term::Prim(Prim::Bool(true))]),
        ]);
        let raw = serde_json::to_string(&term).expect("serialize");
        let parsed: Term = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(parsed, term);
    }
}
