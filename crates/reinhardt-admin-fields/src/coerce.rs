//! Coercion functions converting raw tokens and assigned values into typed data

use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoerceError {
	/// The input has the right shape but an unacceptable value.
	#[error("invalid value: {0}")]
	Value(String),
	/// The input has a shape the coercion cannot handle at all.
	#[error("expected {expected}, found {found}")]
	Type {
		expected: &'static str,
		found: &'static str,
	},
}

impl CoerceError {
	pub(crate) fn type_mismatch(expected: &'static str, found: &Value) -> Self {
		CoerceError::Type {
			expected,
			found: kind_of(found),
		}
	}
}

type CoerceFn<T> = dyn Fn(&Value) -> Result<T, CoerceError> + Send + Sync;

/// A caller-supplied conversion from a raw value into a field's stored type.
///
/// Submitted tokens are handed over as `Value::String`; programmatically
/// assigned values are passed through as-is.
pub struct Coerce<T> {
	inner: Arc<CoerceFn<T>>,
}

impl<T> Coerce<T> {
	/// Wrap a conversion function
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_fields::{Coerce, CoerceError};
	/// use serde_json::{json, Value};
	///
	/// let upper = Coerce::new(|v: &Value| {
	///     v.as_str()
	///         .map(str::to_uppercase)
	///         .ok_or_else(|| CoerceError::Value(v.to_string()))
	/// });
	/// assert_eq!(upper.call(&json!("rust")).unwrap(), "RUST");
	/// ```
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&Value) -> Result<T, CoerceError> + Send + Sync + 'static,
	{
		Self { inner: Arc::new(f) }
	}

	pub fn call(&self, value: &Value) -> Result<T, CoerceError> {
		(self.inner)(value)
	}

	/// Coerce a submitted text token.
	pub fn call_str(&self, token: &str) -> Result<T, CoerceError> {
		self.call(&Value::String(token.to_string()))
	}
}

impl<T: FromStr + 'static> Coerce<T>
where
	T::Err: fmt::Display,
{
	/// Parse the value's text with [`FromStr`]
	///
	/// Strings, numbers and booleans are accepted; `null`, arrays and objects
	/// are type errors.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_fields::Coerce;
	/// use serde_json::json;
	///
	/// let coerce = Coerce::<u16>::parse();
	/// assert_eq!(coerce.call(&json!("8080")).unwrap(), 8080);
	/// assert_eq!(coerce.call(&json!(443)).unwrap(), 443);
	/// assert!(coerce.call(&json!("http")).is_err());
	/// ```
	pub fn parse() -> Self {
		Self::new(|value: &Value| {
			let text = match value {
				Value::String(s) => s.clone(),
				Value::Number(n) => n.to_string(),
				Value::Bool(b) => b.to_string(),
				other => return Err(CoerceError::type_mismatch("text", other)),
			};
			text.parse::<T>()
				.map_err(|e| CoerceError::Value(format!("{text:?}: {e}")))
		})
	}
}

impl Coerce<String> {
	/// Identity-to-text coercion, the default for the select fields
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_fields::Coerce;
	/// use serde_json::json;
	///
	/// let coerce = Coerce::text();
	/// assert_eq!(coerce.call(&json!("draft")).unwrap(), "draft");
	/// assert_eq!(coerce.call(&json!(3)).unwrap(), "3");
	/// assert!(coerce.call(&json!(["a"])).is_err());
	/// ```
	pub fn text() -> Self {
		Self::new(|value: &Value| match value {
			Value::Array(_) | Value::Object(_) => Err(CoerceError::type_mismatch("scalar", value)),
			other => Ok(value_text(other)),
		})
	}
}

impl Coerce<i64> {
	/// Integer coercion
	///
	/// Surrounding whitespace in text is ignored. Floats are accepted only
	/// when they have no fractional part and fit in an `i64`.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_fields::{Coerce, CoerceError};
	/// use serde_json::json;
	///
	/// let coerce = Coerce::integer();
	/// assert_eq!(coerce.call(&json!(" 42 ")).unwrap(), 42);
	/// assert!(matches!(coerce.call(&json!("abc")), Err(CoerceError::Value(_))));
	/// assert!(matches!(coerce.call(&json!(null)), Err(CoerceError::Type { .. })));
	/// ```
	pub fn integer() -> Self {
		Self::new(|value: &Value| match value {
			Value::String(s) => s
				.trim()
				.parse::<i64>()
				.map_err(|_| CoerceError::Value(format!("{s:?} is not an integer"))),
			Value::Number(n) => n
				.as_i64()
				.or_else(|| {
					n.as_f64()
						.filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
						.map(|f| f as i64)
				})
				.ok_or_else(|| CoerceError::Value(format!("{n} is not an integer"))),
			Value::Bool(b) => Ok(i64::from(*b)),
			other => Err(CoerceError::type_mismatch("integer", other)),
		})
	}
}

impl<T> Clone for Coerce<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T> fmt::Debug for Coerce<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Coerce")
			.field("target", &std::any::type_name::<T>())
			.finish()
	}
}

/// Text representation of a JSON value, without quotes around strings.
pub fn value_text(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Null => String::new(),
		other => other.to_string(),
	}
}

fn kind_of(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!("x"), "x")]
	#[case(json!(7), "7")]
	#[case(json!(1.5), "1.5")]
	#[case(json!(true), "true")]
	#[case(json!(null), "")]
	fn test_value_text(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(value_text(&value), expected);
	}

	#[rstest]
	fn test_text_rejects_compound_values() {
		let coerce = Coerce::text();
		assert_eq!(
			coerce.call(&json!({"a": 1})),
			Err(CoerceError::Type {
				expected: "scalar",
				found: "object",
			})
		);
	}

	#[rstest]
	#[case(json!(12), Ok(12))]
	#[case(json!(12.0), Ok(12))]
	#[case(json!(true), Ok(1))]
	fn test_integer_accepts_numbers(#[case] value: Value, #[case] expected: Result<i64, CoerceError>) {
		assert_eq!(Coerce::integer().call(&value), expected);
	}

	#[rstest]
	fn test_integer_rejects_fractions_and_arrays() {
		let coerce = Coerce::integer();
		assert!(matches!(coerce.call(&json!(1.5)), Err(CoerceError::Value(_))));
		assert!(matches!(coerce.call(&json!(1e20)), Err(CoerceError::Value(_))));
		assert!(matches!(coerce.call(&json!(-1e20)), Err(CoerceError::Value(_))));
		assert_eq!(coerce.call(&json!(3.0)), Ok(3));
		assert!(matches!(coerce.call(&json!([1])), Err(CoerceError::Type { .. })));
	}

	#[rstest]
	fn test_parse_reports_value_errors() {
		let coerce = Coerce::<u8>::parse();
		assert_eq!(coerce.call_str("255"), Ok(255));
		assert!(matches!(coerce.call_str("256"), Err(CoerceError::Value(_))));
		assert!(matches!(coerce.call(&json!(null)), Err(CoerceError::Type { .. })));
	}

	#[rstest]
	fn test_clone_shares_function() {
		let coerce = Coerce::integer();
		let cloned = coerce.clone();
		assert_eq!(cloned.call_str("5"), Ok(5));
		assert_eq!(format!("{cloned:?}"), "Coerce { target: \"i64\" }");
	}
}
