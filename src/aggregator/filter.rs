//! Multi-field filter specifications.
//!
//! A specification maps field names to accepted values. A record passes when,
//! for every constrained field, its value is one of the accepted values.
//! Field names that do not name a record field constrain nothing.

use crate::parser::schema::{FieldValue, RecordField, RequestRecord};
use crate::utils::error::FilterError;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Accepted values for one field: a single value or a list of values
///
/// `null` stands for the absent marker and only matches records whose
/// optional field is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AcceptedValues {
    Many(Vec<Value>),
    One(Value),
}

impl AcceptedValues {
    pub fn contains(&self, value: FieldValue<'_>) -> bool {
        match self {
            Self::Many(values) => values.iter().any(|accepted| value_matches(value, accepted)),
            Self::One(accepted) => value_matches(value, accepted),
        }
    }

    fn push(&mut self, value: Value) {
        match self {
            Self::Many(values) => values.push(value),
            Self::One(existing) => {
                let first = std::mem::replace(existing, Value::Null);
                *self = Self::Many(vec![first, value]);
            }
        }
    }
}

/// Exact equality between a record value and one accepted value
fn value_matches(value: FieldValue<'_>, accepted: &Value) -> bool {
    match (value, accepted) {
        (FieldValue::Absent, Value::Null) => true,
        (FieldValue::Text(text), Value::String(expected)) => text == expected.as_str(),
        (FieldValue::Number(n), Value::Number(expected)) => expected.as_f64() == Some(n),
        _ => false,
    }
}

/// Field name -> accepted values
///
/// Serializes as a plain JSON object, e.g. `{"status": [200, 304], "pop": null}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec {
    constraints: BTreeMap<String, AcceptedValues>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style constraint, replacing any previous one for `field`
    pub fn with(mut self, field: impl Into<String>, values: AcceptedValues) -> Self {
        self.constraints.insert(field.into(), values);
        self
    }

    /// Add `value` to the accepted set for `field`
    pub fn accept(&mut self, field: impl Into<String>, value: Value) {
        match self.constraints.entry(field.into()) {
            std::collections::btree_map::Entry::Occupied(mut slot) => slot.get_mut().push(value),
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(AcceptedValues::Many(vec![value]));
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&AcceptedValues> {
        self.constraints.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Constraints in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AcceptedValues)> {
        self.constraints.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Does `record` satisfy every constraint on a known field?
    pub fn matches(&self, record: &RequestRecord) -> bool {
        self.constraints.iter().all(|(name, accepted)| {
            RecordField::from_name(name).map_or(true, |field| accepted.contains(record.field(field)))
        })
    }

    /// Build a specification from `field=value[,value...]` arguments
    ///
    /// Repeating a field widens its accepted set.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, FilterError> {
        let mut spec = Self::new();
        for arg in args {
            let (field, values) = parse_arg(arg.as_ref())?;
            for value in values {
                spec.accept(field.clone(), value);
            }
        }
        Ok(spec)
    }
}

/// Parse one `field=value[,value...]` argument
///
/// Values of numeric fields are read as numbers and the literal `null`
/// selects the absent marker. Unknown field names are kept as-is.
pub fn parse_arg(arg: &str) -> Result<(String, Vec<Value>), FilterError> {
    let (field, raw_values) = arg
        .split_once('=')
        .ok_or_else(|| FilterError::MalformedArgument(arg.to_string()))?;

    let field = field.trim();
    if field.is_empty() {
        return Err(FilterError::MalformedArgument(arg.to_string()));
    }

    let numeric = RecordField::from_name(field).is_some_and(RecordField::is_numeric);
    let values = raw_values
        .split(',')
        .map(|raw| parse_value(raw.trim(), numeric))
        .collect();

    Ok((field.to_string(), values))
}

fn parse_value(raw: &str, numeric: bool) -> Value {
    if raw == "null" {
        return Value::Null;
    }
    if numeric {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::from(n);
        }
        if let Some(n) = raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            return Value::Number(n);
        }
    }
    Value::String(raw.to_string())
}

/// Keep the records that satisfy `spec`, in their original order
///
/// Total: unknown field names and an empty specification impose no constraint.
pub fn filter_records(records: &[RequestRecord], spec: &FilterSpec) -> Vec<RequestRecord> {
    let filtered: Vec<RequestRecord> = records
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect();

    debug!(
        "Filter with {} constraint(s) kept {}/{} records",
        spec.len(),
        filtered.len(),
        records.len()
    );

    filtered
}

/// Distinct values `field` takes across `records`
///
/// Sorted absent first, then numbers ascending, then text. Absent is `null`.
pub fn distinct_values(records: &[RequestRecord], field: RecordField) -> Vec<Value> {
    fn rank(value: &FieldValue<'_>) -> u8 {
        match value {
            FieldValue::Absent => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Text(_) => 2,
        }
    }

    let mut values: Vec<FieldValue<'_>> = records.iter().map(|r| r.field(field)).collect();
    values.sort_by(|a, b| match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(y),
        (FieldValue::Text(x), FieldValue::Text(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    });
    values.dedup_by(|a, b| match (&*a, &*b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(y) == Ordering::Equal,
        _ => a == b,
    });

    values.into_iter().map(FieldValue::to_json).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(status: u16, pop: Option<&str>) -> RequestRecord {
        RequestRecord {
            method: "GET".to_string(),
            url: "https://a.cdn/x".to_string(),
            status,
            pop: pop.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_status_filter_preserves_order() {
        let records = vec![record(200, Some("A")), record(404, None), record(200, Some("B"))];
        let spec = FilterSpec::new().with("status", AcceptedValues::Many(vec![json!(200)]));

        let filtered = filter_records(&records, &spec);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].pop.as_deref(), Some("A"));
        assert_eq!(filtered[1].pop.as_deref(), Some("B"));
    }

    #[test]
    fn test_absent_only_matches_null() {
        let records = vec![record(200, Some("")), record(200, None)];

        let absent = FilterSpec::new().with("pop", AcceptedValues::One(Value::Null));
        assert_eq!(filter_records(&records, &absent), vec![records[1].clone()]);

        let empty = FilterSpec::new().with("pop", AcceptedValues::One(json!("")));
        assert_eq!(filter_records(&records, &empty), vec![records[0].clone()]);
    }

    #[test]
    fn test_unknown_fields_impose_no_constraint() {
        let records = vec![record(200, None), record(500, None)];
        let spec = FilterSpec::new().with("colour", AcceptedValues::One(json!("red")));

        assert_eq!(filter_records(&records, &spec).len(), 2);
    }

    #[test]
    fn test_empty_accepted_list_matches_nothing() {
        let records = vec![record(200, None)];
        let spec = FilterSpec::new().with("status", AcceptedValues::Many(vec![]));

        assert!(filter_records(&records, &spec).is_empty());
    }

    #[test]
    fn test_deserialize_single_and_many() {
        let spec: FilterSpec =
            serde_json::from_value(json!({"status": [200, 304], "pop": null, "method": "GET"}))
                .unwrap();

        assert_eq!(spec.len(), 3);
        assert_eq!(spec.get("method"), Some(&AcceptedValues::One(json!("GET"))));
        assert_eq!(spec.get("pop"), Some(&AcceptedValues::One(Value::Null)));
        assert!(spec.matches(&record(304, None)));
        assert!(!spec.matches(&record(404, None)));

        let fields: Vec<&str> = spec.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["method", "pop", "status"]);
    }

    #[test]
    fn test_parse_arg_types_values_by_field() {
        assert_eq!(
            parse_arg("status=200,304").unwrap(),
            ("status".to_string(), vec![json!(200), json!(304)])
        );
        assert_eq!(
            parse_arg("pop=FRA56-P1,null").unwrap(),
            ("pop".to_string(), vec![json!("FRA56-P1"), Value::Null])
        );
        assert_eq!(
            parse_arg("method=200").unwrap(),
            ("method".to_string(), vec![json!("200")])
        );
        assert!(parse_arg("status").is_err());
        assert!(parse_arg("=200").is_err());
    }

    #[test]
    fn test_from_args_merges_repeated_fields() {
        let spec = FilterSpec::from_args(&["status=200", "status=304"]).unwrap();
        assert_eq!(
            spec.get("status"),
            Some(&AcceptedValues::Many(vec![json!(200), json!(304)]))
        );
    }

    #[test]
    fn test_distinct_values() {
        let records = vec![record(404, Some("B")), record(200, None), record(200, Some("A"))];

        assert_eq!(
            distinct_values(&records, RecordField::Pop),
            vec![Value::Null, json!("A"), json!("B")]
        );
        assert_eq!(
            distinct_values(&records, RecordField::Status),
            vec![json!(200), json!(404)]
        );
    }
}
