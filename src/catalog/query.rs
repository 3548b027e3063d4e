use std::cmp::Ordering;
use std::str::FromStr;

use serde_json::Value as JsonValue;

use super::error::QueryError;
use super::model::{GalaxyDoc, Measurement, ID_COLUMN};

// ---------------------------------------------------------------------------
// Query AST
// ---------------------------------------------------------------------------

/// A parsed filter. Top-level clauses are combined with AND.
///
/// ```text
/// {"name": "Gal 1"}
/// {"v_mag.value": {"$lt": 21}, "radial_velocity.value": {"$lte": -100}}
/// {"$or": [{"ra.value": 10.68458}, {"dec.value": 49.64667}]}
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    clauses: Vec<Clause>,
}

#[derive(Debug, Clone, PartialEq)]
enum Clause {
    Or(Vec<Query>),
    And(Vec<Query>),
    Field { path: FieldPath, ops: Vec<Op> },
}

/// `field` or `field.sub`.
#[derive(Debug, Clone, PartialEq)]
struct FieldPath {
    field: String,
    sub: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Eq(JsonValue),
    Ne(JsonValue),
    Gt(JsonValue),
    Gte(JsonValue),
    Lt(JsonValue),
    Lte(JsonValue),
    In(Vec<JsonValue>),
    Exists(bool),
}

impl Query {
    /// The empty query; matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Equality on the galaxy name.
    pub fn by_name(name: &str) -> Self {
        Self {
            clauses: vec![Clause::Field {
                path: FieldPath {
                    field: ID_COLUMN.to_string(),
                    sub: None,
                },
                ops: vec![Op::Eq(JsonValue::from(name))],
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Build a query from a JSON object.
    pub fn parse(value: &JsonValue) -> Result<Self, QueryError> {
        let obj = value
            .as_object()
            .ok_or_else(|| QueryError::NotAnObject(value.to_string()))?;

        let mut clauses = Vec::with_capacity(obj.len());
        for (key, val) in obj {
            let clause = match key.as_str() {
                "$or" => Clause::Or(parse_query_list("$or", val)?),
                "$and" => Clause::And(parse_query_list("$and", val)?),
                k if k.starts_with('$') => {
                    return Err(QueryError::UnsupportedOperator(k.to_string()))
                }
                k => Clause::Field {
                    path: parse_path(k)?,
                    ops: parse_ops(val)?,
                },
            };
            clauses.push(clause);
        }
        Ok(Self { clauses })
    }

    /// Does `doc` satisfy every clause?
    pub fn matches(&self, doc: &GalaxyDoc) -> bool {
        self.clauses.iter().all(|c| c.matches(doc))
    }
}

impl FromStr for Query {
    type Err = QueryError;

    /// Parse query text; blank text is the empty query.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Query::all());
        }
        let value: JsonValue = serde_json::from_str(s)?;
        Query::parse(&value)
    }
}

fn parse_query_list(op: &str, val: &JsonValue) -> Result<Vec<Query>, QueryError> {
    let items = val.as_array().ok_or_else(|| QueryError::BadOperand {
        op: op.to_string(),
        expected: "an array of queries",
    })?;
    items.iter().map(Query::parse).collect()
}

fn parse_path(key: &str) -> Result<FieldPath, QueryError> {
    let (field, sub) = match key.split_once('.') {
        Some((f, s)) => (f, Some(s.to_string())),
        None => (key, None),
    };
    if field.is_empty() || sub.as_deref() == Some("") {
        return Err(QueryError::EmptyPath);
    }
    Ok(FieldPath {
        field: field.to_string(),
        sub,
    })
}

/// A plain value means equality; an object whose keys all start with `$`
/// is a set of operators applied together.
fn parse_ops(val: &JsonValue) -> Result<Vec<Op>, QueryError> {
    let obj = match val.as_object() {
        Some(obj) if !obj.is_empty() && obj.keys().all(|k| k.starts_with('$')) => obj,
        _ => return Ok(vec![Op::Eq(val.clone())]),
    };

    obj.iter()
        .map(|(op, operand)| {
            let parsed = match op.as_str() {
                "$eq" => Op::Eq(operand.clone()),
                "$ne" => Op::Ne(operand.clone()),
                "$gt" => Op::Gt(operand.clone()),
                "$gte" => Op::Gte(operand.clone()),
                "$lt" => Op::Lt(operand.clone()),
                "$lte" => Op::Lte(operand.clone()),
                "$in" => Op::In(
                    operand
                        .as_array()
                        .cloned()
                        .ok_or_else(|| QueryError::BadOperand {
                            op: op.clone(),
                            expected: "an array",
                        })?,
                ),
                "$exists" => Op::Exists(operand.as_bool().ok_or_else(|| {
                    QueryError::BadOperand {
                        op: op.clone(),
                        expected: "a boolean",
                    }
                })?),
                other => return Err(QueryError::UnsupportedOperator(other.to_string())),
            };
            Ok(parsed)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

impl Clause {
    fn matches(&self, doc: &GalaxyDoc) -> bool {
        match self {
            Clause::Or(queries) => queries.iter().any(|q| q.matches(doc)),
            Clause::And(queries) => queries.iter().all(|q| q.matches(doc)),
            Clause::Field { path, ops } => field_matches(doc, path, ops),
        }
    }
}

fn field_matches(doc: &GalaxyDoc, path: &FieldPath, ops: &[Op]) -> bool {
    // Candidate values, one per measurement (or the name).
    let candidates: Vec<Option<JsonValue>> = if path.field == ID_COLUMN && path.sub.is_none() {
        if doc.name.is_empty() {
            vec![]
        } else {
            vec![Some(JsonValue::from(doc.name.clone()))]
        }
    } else {
        let sub = path.sub.as_deref().unwrap_or("value");
        doc.field(&path.field)
            .unwrap_or_default()
            .iter()
            .map(|m: &Measurement| m.get(sub))
            .collect()
    };

    // `$exists` on a bare field asks about the field, not its values.
    let any_present = match path.sub {
        None if path.field != ID_COLUMN => doc.field(&path.field).is_some(),
        _ => candidates.iter().any(Option::is_some),
    };
    for op in ops {
        if let Op::Exists(want) = op {
            if *want != any_present {
                return false;
            }
        }
    }

    // Each operator is checked on its own across every candidate, so
    // `{"$gt": 10, "$lt": 17}` may be satisfied by two different
    // measurements. Negations hold only when no candidate is equal, which
    // includes documents without the field.
    let present: Vec<&JsonValue> = candidates.iter().flatten().collect();
    let hit = ops.iter().all(|op| match op {
        Op::Exists(_) => true,
        Op::Ne(v) => !present.iter().any(|c| eq_matches(c, v)),
        _ => present.iter().any(|c| op_matches(op, c)),
    });
    log::debug!("{}: field {:?} -> {}", doc.name, path.field, hit);
    hit
}

/// Arrays (e.g. `distribution`) match when any element does. `$ne` is
/// the negation of equality over the whole candidate.
fn op_matches(op: &Op, candidate: &JsonValue) -> bool {
    match op {
        Op::Eq(v) => eq_matches(candidate, v),
        Op::Ne(v) => !eq_matches(candidate, v),
        Op::In(vals) => vals.iter().any(|v| eq_matches(candidate, v)),
        Op::Exists(_) => true,
        _ => match candidate {
            JsonValue::Array(items) => items.iter().any(|item| op_matches(op, item)),
            _ => order_matches(op, candidate),
        },
    }
}

/// Equality against a scalar or, for array candidates, any element. An
/// array operand compares against the whole array.
fn eq_matches(candidate: &JsonValue, operand: &JsonValue) -> bool {
    match candidate {
        JsonValue::Array(items) if !operand.is_array() => {
            items.iter().any(|item| values_equal(item, operand))
        }
        _ => values_equal(candidate, operand),
    }
}

fn order_matches(op: &Op, candidate: &JsonValue) -> bool {
    match op {
        Op::Gt(v) => compare(candidate, v) == Some(Ordering::Greater),
        Op::Gte(v) => matches!(compare(candidate, v), Some(Ordering::Greater | Ordering::Equal)),
        Op::Lt(v) => compare(candidate, v) == Some(Ordering::Less),
        Op::Lte(v) => matches!(compare(candidate, v), Some(Ordering::Less | Ordering::Equal)),
        _ => false,
    }
}

/// Numbers compare numerically (so `5 == 5.0`), everything else structurally.
fn values_equal(a: &JsonValue, b: &JsonValue) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Ordering between two values of the same kind; mixed kinds never order.
fn compare(a: &JsonValue, b: &JsonValue) -> Option<Ordering> {
    match (a, b) {
        (JsonValue::Number(_), JsonValue::Number(_)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (JsonValue::String(x), JsonValue::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
