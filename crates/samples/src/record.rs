//! A single sample record.

use indexmap::IndexMap;

use crate::value::Value;

/// One sample's field -> value mapping. Field insertion order is preserved.
pub type Record = IndexMap<String, Value>;

/// Builds a [`Record`] from `(name, value)` pairs, keeping their order.
///
/// ```
/// use declust_samples::{Value, record};
///
/// let r = record([("x", 1.0), ("y", 2.0)]);
/// assert_eq!(r.keys().collect::<Vec<_>>(), ["x", "y"]);
/// assert_eq!(r["y"], Value::Float(2.0));
/// ```
pub fn record<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Counts how many of `field_names` the record carries, or `None` if it
/// carries exactly those fields.
pub(crate) fn schema_gap(rec: &Record, field_names: &[String]) -> Option<usize> {
    let present = field_names.iter().filter(|f| rec.contains_key(*f)).count();
    if present == field_names.len() && rec.len() == field_names.len() {
        None
    } else {
        Some(present.min(rec.len()))
    }
}
