//! Field values and their coercion from untyped text.

use std::fmt;

/// A single field value.
///
/// Values arrive untyped (usually as text from a delimited file) and are
/// coerced to the best-matching primitive by [`Value::parse`]. Numeric
/// interpretation happens only on demand through [`Value::as_f64`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Whole number.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean flag (`true` / `false`, case-insensitive on input).
    Bool(bool),
    /// Anything else, kept verbatim.
    Text(String),
}

impl Value {
    /// Coerces raw text to the best-matching primitive.
    ///
    /// Tried in order on the trimmed input: `i64`, `f64`, boolean. Anything
    /// that matches none of them is kept as [`Value::Text`] with the
    /// original, untrimmed content.
    ///
    /// ```
    /// use declust_samples::Value;
    ///
    /// assert_eq!(Value::parse("42"), Value::Int(42));
    /// assert_eq!(Value::parse(" 0.5 "), Value::Float(0.5));
    /// assert_eq!(Value::parse("TRUE"), Value::Bool(true));
    /// assert_eq!(Value::parse("forest"), Value::Text("forest".to_string()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if let Ok(i) = s.parse::<i64>() {
            return Self::Int(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Self::Float(f);
        }
        if s.eq_ignore_ascii_case("true") {
            return Self::Bool(true);
        }
        if s.eq_ignore_ascii_case("false") {
            return Self::Bool(false);
        }
        Self::Text(raw.to_string())
    }

    /// Numeric view of this value. `Text` has none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(_) => None,
        }
    }
}

/// Writes the bare cell text. `Text` is written unquoted, so text that looks
/// like a number or boolean (`"007"`, `"true"`) reparses through
/// [`Value::parse`] as `Int`, `Float` or `Bool`, not as `Text`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            // Debug keeps the decimal point so the value reparses as Float.
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}
