//! Validators run by [`FormField::validate`](crate::FormField::validate)
//!
//! Validators see a read-only [`FieldState`] snapshot of the field after
//! processing. Returning [`ValidationError::Stop`] ends the chain.

use crate::translation::gettext;

/// Snapshot of a processed field handed to each validator.
#[derive(Debug, Clone)]
pub struct FieldState<'a> {
	pub name: &'a str,
	pub raw_data: Option<&'a [String]>,
	/// Display text of the field.
	pub value: String,
	pub has_data: bool,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
	/// Record the message and continue with the next validator.
	#[error("{0}")]
	Invalid(String),
	/// Record the message, if any, and skip the remaining validators.
	#[error("{}", .0.as_deref().unwrap_or("validation stopped"))]
	Stop(Option<String>),
}

pub trait Validator: Send + Sync {
	fn validate(&self, field: &FieldState<'_>) -> Result<(), ValidationError>;
}

/// Requires the field to hold data after processing
///
/// # Examples
///
/// ```
/// use reinhardt_admin_fields::{DataRequired, FormField, TimeField};
///
/// let mut field = TimeField::new("opens_at").with_validator(DataRequired::new());
/// field.process(Some(&[]), None).unwrap();
/// assert!(!field.validate());
/// assert_eq!(field.errors(), ["This field is required."]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataRequired {
	message: Option<String>,
}

impl DataRequired {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl Validator for DataRequired {
	fn validate(&self, field: &FieldState<'_>) -> Result<(), ValidationError> {
		if field.has_data && !field.value.trim().is_empty() {
			return Ok(());
		}
		let message = self
			.message
			.clone()
			.unwrap_or_else(|| gettext("This field is required."));
		Err(ValidationError::Stop(Some(message)))
	}
}

/// Requires raw input to have been submitted, regardless of how it parsed.
#[derive(Debug, Clone, Default)]
pub struct InputRequired {
	message: Option<String>,
}

impl InputRequired {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl Validator for InputRequired {
	fn validate(&self, field: &FieldState<'_>) -> Result<(), ValidationError> {
		let submitted = field
			.raw_data
			.and_then(|raw| raw.first())
			.is_some_and(|first| !first.is_empty());
		if submitted {
			return Ok(());
		}
		let message = self
			.message
			.clone()
			.unwrap_or_else(|| gettext("This field is required."));
		Err(ValidationError::Stop(Some(message)))
	}
}

/// Bounds the character length of the field's display text
///
/// # Examples
///
/// ```
/// use reinhardt_admin_fields::{FormField, Length, Select2TagsField};
///
/// let mut field = Select2TagsField::new("tags")
///     .save_as_list(true)
///     .with_validator(Length::new(None, Some(5)));
/// field.process(Some(&["alpha, beta".to_string()]), None).unwrap();
/// assert!(!field.validate());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Length {
	min: Option<usize>,
	max: Option<usize>,
	message: Option<String>,
}

impl Length {
	pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
		Self {
			min,
			max,
			message: None,
		}
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	fn default_message(&self) -> String {
		match (self.min, self.max) {
			(Some(min), Some(max)) => gettext("Field must be between %(min)d and %(max)d characters long.")
				.replace("%(min)d", &min.to_string())
				.replace("%(max)d", &max.to_string()),
			(Some(min), None) => gettext("Field must be at least %(min)d characters long.")
				.replace("%(min)d", &min.to_string()),
			(None, Some(max)) => gettext("Field cannot be longer than %(max)d characters.")
				.replace("%(max)d", &max.to_string()),
			(None, None) => String::new(),
		}
	}
}

impl Validator for Length {
	fn validate(&self, field: &FieldState<'_>) -> Result<(), ValidationError> {
		let len = field.value.chars().count();
		let too_short = self.min.is_some_and(|min| len < min);
		let too_long = self.max.is_some_and(|max| len > max);
		if too_short || too_long {
			let message = self.message.clone().unwrap_or_else(|| self.default_message());
			return Err(ValidationError::Invalid(message));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn state<'a>(raw: Option<&'a [String]>, value: &str, has_data: bool) -> FieldState<'a> {
		FieldState {
			name: "field",
			raw_data: raw,
			value: value.to_string(),
			has_data,
		}
	}

	#[rstest]
	fn test_data_required() {
		let validator = DataRequired::new();
		assert!(validator.validate(&state(None, "21:30:00", true)).is_ok());
		assert_eq!(
			validator.validate(&state(None, "", false)),
			Err(ValidationError::Stop(Some("This field is required.".to_string())))
		);
		assert!(validator.validate(&state(None, "  ", true)).is_err());
	}

	#[rstest]
	fn test_input_required_looks_at_raw_data() {
		let validator = InputRequired::new().with_message("Pick a time");
		let raw = vec!["garbage".to_string()];
		assert!(validator.validate(&state(Some(&raw), "garbage", false)).is_ok());

		let empty = vec![String::new()];
		assert_eq!(
			validator.validate(&state(Some(&empty), "", false)),
			Err(ValidationError::Stop(Some("Pick a time".to_string())))
		);
		assert!(validator.validate(&state(None, "", false)).is_err());
	}

	#[rstest]
	#[case(Some(2), Some(4), "abc", true)]
	#[case(Some(2), Some(4), "a", false)]
	#[case(Some(2), Some(4), "abcde", false)]
	#[case(None, Some(3), "日本語", true)]
	#[case(Some(1), None, "", false)]
	fn test_length(
		#[case] min: Option<usize>,
		#[case] max: Option<usize>,
		#[case] value: &str,
		#[case] valid: bool,
	) {
		let validator = Length::new(min, max);
		assert_eq!(validator.validate(&state(None, value, true)).is_ok(), valid);
	}

	#[rstest]
	fn test_length_message() {
		let validator = Length::new(Some(2), Some(4));
		assert_eq!(
			validator.validate(&state(None, "a", true)),
			Err(ValidationError::Invalid(
				"Field must be between 2 and 4 characters long.".to_string()
			))
		);
	}
}
