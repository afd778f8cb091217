//! Base field contract shared by the admin fields
//!
//! Every field composes a [`FieldCore`] holding the state common to all
//! fields and implements [`FormField`]. The trait's default methods supply
//! the processing and validation lifecycle; fields override only the parsing
//! and display hooks they customize.

use crate::coerce::CoerceError;
use crate::validators::{FieldState, ValidationError, Validator};
use crate::widget::Widget;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
	#[error("{0}")]
	InvalidDateTime(String),
	#[error("{0}")]
	InvalidTime(String),
	#[error("{0}")]
	InvalidChoice(String),
	#[error("{0}")]
	NotAValidChoice(String),
	#[error("{0}")]
	Validation(String),
	#[error("Coercion failed: {0}")]
	Coerce(#[from] CoerceError),
}

impl FieldError {
	/// Whether the error describes bad user input that the form should report
	/// back, as opposed to a failure the caller has to handle.
	pub fn is_user_facing(&self) -> bool {
		!matches!(self, FieldError::Coerce(_))
	}
}

pub type FieldResult<T> = Result<T, FieldError>;

/// State shared by every field.
pub struct FieldCore {
	pub name: String,
	pub label: Option<String>,
	pub description: Option<String>,
	pub validators: Vec<Box<dyn Validator>>,
	pub raw_data: Option<Vec<String>>,
	pub process_errors: Vec<String>,
	pub errors: Vec<String>,
}

impl FieldCore {
	/// Create the base state for a field named `name`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_fields::FieldCore;
	///
	/// let core = FieldCore::new("published_at");
	/// assert_eq!(core.name, "published_at");
	/// assert!(core.raw_data.is_none());
	/// assert!(core.errors.is_empty());
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: None,
			description: None,
			validators: Vec::new(),
			raw_data: None,
			process_errors: Vec::new(),
			errors: Vec::new(),
		}
	}

	/// Raw tokens joined with a single space, if any raw input was received.
	pub(crate) fn joined_raw(&self) -> Option<String> {
		match &self.raw_data {
			Some(raw) if !raw.is_empty() => Some(raw.join(" ")),
			_ => None,
		}
	}
}

impl std::fmt::Debug for FieldCore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FieldCore")
			.field("name", &self.name)
			.field("label", &self.label)
			.field("validators", &self.validators.len())
			.field("raw_data", &self.raw_data)
			.field("errors", &self.errors)
			.finish()
	}
}

/// Capability interface implemented by every admin field.
pub trait FormField {
	fn core(&self) -> &FieldCore;

	fn core_mut(&mut self) -> &mut FieldCore;

	/// Widget descriptor consulted by the rendering layer.
	fn widget(&self) -> Widget;

	/// Assign a value that did not come from a form submission.
	fn process_data(&mut self, value: Option<&Value>);

	/// Parse submitted tokens into the field's typed data.
	fn process_formdata(&mut self, valuelist: &[String]) -> FieldResult<()>;

	/// Text used to re-display the field.
	fn value(&self) -> String;

	fn has_data(&self) -> bool;

	/// Typed data as JSON, `null` when unset.
	fn data_json(&self) -> Value;

	/// Checks run before the validator chain.
	fn pre_validate(&self) -> FieldResult<()> {
		Ok(())
	}

	fn name(&self) -> &str {
		&self.core().name
	}

	fn label(&self) -> Option<&str> {
		self.core().label.as_deref()
	}

	fn description(&self) -> Option<&str> {
		self.core().description.as_deref()
	}

	fn raw_data(&self) -> Option<&[String]> {
		self.core().raw_data.as_deref()
	}

	fn errors(&self) -> &[String] {
		&self.core().errors
	}

	/// Run one processing cycle.
	///
	/// `data` is applied first, then `formdata` when a submission is present.
	/// Input errors are kept for [`FormField::validate`] to report; coercion
	/// failures are returned to the caller.
	fn process(&mut self, formdata: Option<&[String]>, data: Option<&Value>) -> FieldResult<()> {
		self.core_mut().process_errors.clear();
		self.process_data(data);

		let Some(valuelist) = formdata else {
			return Ok(());
		};
		self.core_mut().raw_data = Some(valuelist.to_vec());

		match self.process_formdata(valuelist) {
			Ok(()) => Ok(()),
			Err(e) if e.is_user_facing() => {
				tracing::debug!(field = %self.name(), error = %e, "Rejected submitted value");
				self.core_mut().process_errors.push(e.to_string());
				Ok(())
			}
			Err(e) => Err(e),
		}
	}

	/// Validate the processed data, storing and reporting the outcome.
	fn validate(&mut self) -> bool {
		let mut errors = self.core().process_errors.clone();

		if let Err(e) = self.pre_validate() {
			errors.push(e.to_string());
		}

		if errors.is_empty() {
			let state = FieldState {
				name: self.name(),
				raw_data: self.raw_data(),
				value: self.value(),
				has_data: self.has_data(),
			};
			for validator in &self.core().validators {
				match validator.validate(&state) {
					Ok(()) => {}
					Err(ValidationError::Invalid(message)) => errors.push(message),
					Err(ValidationError::Stop(message)) => {
						errors.extend(message);
						break;
					}
				}
			}
		}

		let valid = errors.is_empty();
		self.core_mut().errors = errors;
		valid
	}
}
