use crate::utils::error::{PairingError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// A hashable JSON leaf value. Arrays and objects are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl TryFrom<serde_json::Value> for Scalar {
    type Error = PairingError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Null => Ok(Scalar::Null),
            serde_json::Value::Bool(b) => Ok(Scalar::Bool(b)),
            serde_json::Value::Number(n) => Ok(Scalar::Number(n)),
            serde_json::Value::String(s) => Ok(Scalar::String(s)),
            other => Err(PairingError::DataFormatError {
                message: format!("unhashable value {}", other),
            }),
        }
    }
}

impl From<Scalar> for serde_json::Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => serde_json::Value::Null,
            Scalar::Bool(b) => serde_json::Value::Bool(b),
            Scalar::Number(n) => serde_json::Value::Number(n),
            Scalar::String(s) => serde_json::Value::String(s),
        }
    }
}

impl fmt::Display for Scalar {
    /// Strings print bare, everything else as JSON text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// A named key-value record. Equality and hashing cover the full key-value
/// set, so key order in the source document does not matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub struct Record {
    pub data: BTreeMap<String, Scalar>,
}

impl Record {
    pub fn new<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Scalar>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            data: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn named(name: &str) -> Self {
        Self::new([("name", name)])
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.data.get(key)
    }

    /// The pairing identity. Any scalar `name` qualifies; non-string values
    /// are rendered as JSON text (`1`, `true`, `null`).
    pub fn name(&self) -> Result<Cow<'_, str>> {
        match self.data.get("name") {
            Some(Scalar::String(name)) => Ok(Cow::Borrowed(name.as_str())),
            Some(other) => Ok(Cow::Owned(other.to_string())),
            None => Err(PairingError::MissingNameError {
                record: self.to_string(),
            }),
        }
    }
}

impl TryFrom<serde_json::Value> for Record {
    type Error = PairingError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(obj) = value else {
            return Err(PairingError::DataFormatError {
                message: format!("expected an object, got {}", value),
            });
        };

        let mut data = BTreeMap::new();
        for (key, value) in obj {
            let scalar = Scalar::try_from(value).map_err(|e| PairingError::DataFormatError {
                message: format!("field '{}': {}", key, e),
            })?;
            data.insert(key, scalar);
        }
        Ok(Record { data })
    }
}

impl From<Record> for serde_json::Value {
    fn from(record: Record) -> Self {
        serde_json::Value::Object(
            record
                .data
                .into_iter()
                .map(|(k, v)| (k, serde_json::Value::from(v)))
                .collect(),
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = serde_json::Value::from(self.clone());
        write!(f, "{}", value)
    }
}

/// Structurally unique records, in the order they were first seen.
#[derive(Debug, Clone, Default)]
pub struct SanitizedDataset {
    records: Vec<Record>,
}

impl SanitizedDataset {
    /// Keeps the first occurrence of each record, in input order.
    pub fn from_ordered(records: Vec<Record>) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let records = records
            .into_iter()
            .filter(|record| seen.insert(record.clone()))
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl From<HashSet<Record>> for SanitizedDataset {
    fn from(set: HashSet<Record>) -> Self {
        Self {
            records: set.into_iter().collect(),
        }
    }
}

impl FromIterator<Record> for SanitizedDataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        iter.into_iter().collect::<HashSet<_>>().into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub dwarf: String,
    pub giant: String,
}

impl Pair {
    pub fn new(dwarf: impl Into<String>, giant: impl Into<String>) -> Self {
        Self {
            dwarf: dwarf.into(),
            giant: giant.into(),
        }
    }
}

impl From<Pair> for (String, String) {
    fn from(pair: Pair) -> Self {
        (pair.dwarf, pair.giant)
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dwarf, self.giant)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PairingResult {
    pub sanitized_records: usize,
    pub chunk_count: usize,
    pub pairs: Vec<Pair>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_equality_ignores_key_order() {
        let a = Record::try_from(json!({"name": "A", "x": 1})).unwrap();
        let b = Record::try_from(json!({"x": 1, "name": "A"})).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_record_rejects_non_object() {
        let err = Record::try_from(json!(["name", "A"])).unwrap_err();
        assert!(matches!(err, PairingError::DataFormatError { .. }));
    }

    #[test]
    fn test_record_rejects_unhashable_field() {
        let err = Record::try_from(json!({"name": "A", "tags": ["x"]})).unwrap_err();
        match err {
            PairingError::DataFormatError { message } => assert!(message.contains("tags")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_record_name() {
        assert_eq!(Record::named("Gimli").name().unwrap(), "Gimli");

        let unnamed = Record::new([("id", 1i64)]);
        assert!(matches!(
            unnamed.name(),
            Err(PairingError::MissingNameError { .. })
        ));

        let numeric = Record::new([("name", 7i64)]);
        assert_eq!(numeric.name().unwrap(), "7");

        let flag = Record::new([("name", false)]);
        assert_eq!(flag.name().unwrap(), "false");

        let null = Record::try_from(json!({"name": null})).unwrap();
        assert_eq!(null.name().unwrap(), "null");
    }

    #[test]
    fn test_record_serde_round_trip_through_json_document() {
        let records: Vec<Record> =
            serde_json::from_str(r#"[{"name": "A", "height": 1.5, "alive": true}]"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("alive"), Some(&Scalar::Bool(true)));

        let text = serde_json::to_string(&records[0]).unwrap();
        assert!(text.contains("\"name\":\"A\""));
    }

    #[test]
    fn test_from_ordered_keeps_first_occurrences() {
        let dataset = SanitizedDataset::from_ordered(vec![
            Record::named("B"),
            Record::named("A"),
            Record::named("B"),
        ]);
        let names: Vec<String> = dataset
            .records()
            .iter()
            .map(|r| r.name().unwrap().into_owned())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_pair_display() {
        assert_eq!(Pair::new("A", "B").to_string(), "(A, B)");
    }
}
