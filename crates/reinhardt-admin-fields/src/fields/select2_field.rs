use crate::coerce::{Coerce, CoerceError, value_text};
use crate::config::Select2FieldArgs;
use crate::field::{FieldCore, FieldError, FieldResult, FormField};
use crate::translation::gettext;
use crate::validators::Validator;
use crate::widget::{Choice, Widget};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;

/// Key of the synthetic choice representing "no selection".
pub const BLANK_CHOICE_KEY: &str = "__None";

/// Select2 styled single-choice field.
///
/// The admin page must include select2.js and its stylesheet for the widget
/// to be enhanced.
#[derive(Debug)]
pub struct Select2Field<T = String> {
	pub core: FieldCore,
	pub coerce: Coerce<T>,
	/// Declared `(value, label)` pairs
	pub choices: Vec<(Value, String)>,
	pub allow_blank: bool,
	/// Label of the blank choice
	pub blank_text: String,
	pub data: Option<T>,
}

impl Select2Field<String> {
	/// Create a new Select2Field storing the chosen value as text
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_fields::Select2Field;
	///
	/// let field = Select2Field::new("status")
	///     .choices([("draft", "Draft"), ("published", "Published")]);
	/// assert_eq!(field.choices.len(), 2);
	/// assert!(!field.allow_blank);
	/// assert_eq!(field.blank_text, " ");
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self::with_coerce(name, Coerce::text())
	}

	/// Build a text-valued field from admin configuration
	pub fn from_args(name: impl Into<String>, args: Select2FieldArgs) -> Self {
		let mut field = Self::new(name);
		field.core.label = args.label;
		field.core.description = args.description;
		field.choices = args.choices;
		field.allow_blank = args.allow_blank;
		if let Some(blank_text) = args.blank_text.filter(|t| !t.is_empty()) {
			field.blank_text = blank_text;
		}
		field
	}
}

impl<T> Select2Field<T>
where
	T: PartialEq + Display,
{
	/// Create a Select2Field whose submitted values are converted with `coerce`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_fields::{Coerce, FormField, Select2Field};
	///
	/// let mut field = Select2Field::with_coerce("priority", Coerce::integer())
	///     .choices([(1, "Low"), (2, "High")]);
	/// field.process_formdata(&["2".to_string()]).unwrap();
	/// assert_eq!(field.data, Some(2));
	/// ```
	pub fn with_coerce(name: impl Into<String>, coerce: Coerce<T>) -> Self {
		Self {
			core: FieldCore::new(name),
			coerce,
			choices: Vec::new(),
			allow_blank: false,
			blank_text: " ".to_string(),
			data: None,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.core.label = Some(label.into());
		self
	}

	pub fn choices<I, V, L>(mut self, choices: I) -> Self
	where
		I: IntoIterator<Item = (V, L)>,
		V: Into<Value>,
		L: Into<String>,
	{
		self.choices = choices
			.into_iter()
			.map(|(value, label)| (value.into(), label.into()))
			.collect();
		self
	}

	pub fn allow_blank(mut self, allow_blank: bool) -> Self {
		self.allow_blank = allow_blank;
		self
	}

	/// Label of the blank choice. An empty label keeps the default single space.
	pub fn blank_text(mut self, blank_text: impl Into<String>) -> Self {
		let blank_text = blank_text.into();
		if !blank_text.is_empty() {
			self.blank_text = blank_text;
		}
		self
	}

	pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
		self.core.validators.push(Box::new(validator));
		self
	}

	fn is_current(&self, choice: &Value) -> bool {
		match (self.coerce.call(choice), &self.data) {
			(Ok(coerced), Some(data)) => coerced == *data,
			_ => false,
		}
	}

	/// Options to render, the blank choice first when allowed
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_fields::Select2Field;
	///
	/// let field = Select2Field::new("status")
	///     .choices([("draft", "Draft")])
	///     .allow_blank(true);
	/// let choices: Vec<_> = field.iter_choices().collect();
	/// assert_eq!(choices[0].value, "__None");
	/// assert!(choices[0].selected);
	/// assert!(!choices[1].selected);
	/// ```
	pub fn iter_choices(&self) -> impl Iterator<Item = Choice> + '_ {
		let blank = self
			.allow_blank
			.then(|| Choice::new(BLANK_CHOICE_KEY, self.blank_text.clone(), self.data.is_none()));
		let declared = self
			.choices
			.iter()
			.map(|(value, label)| Choice::new(value_text(value), label.clone(), self.is_current(value)));
		blank.into_iter().chain(declared)
	}
}

impl<T> FormField for Select2Field<T>
where
	T: PartialEq + Display + Serialize,
{
	fn core(&self) -> &FieldCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut FieldCore {
		&mut self.core
	}

	fn widget(&self) -> Widget {
		Widget::Select2 {
			allow_blank: self.allow_blank,
		}
	}

	fn process_data(&mut self, value: Option<&Value>) {
		self.data = match value {
			None | Some(Value::Null) => None,
			Some(value) => match self.coerce.call(value) {
				Ok(coerced) => Some(coerced),
				Err(e) => {
					tracing::debug!(field = %self.core.name, error = %e, "Discarding value that failed coercion");
					None
				}
			},
		};
	}

	fn process_formdata(&mut self, valuelist: &[String]) -> FieldResult<()> {
		let Some(token) = valuelist.first() else {
			return Ok(());
		};
		if token == BLANK_CHOICE_KEY {
			self.data = None;
			return Ok(());
		}
		match self.coerce.call_str(token) {
			Ok(coerced) => {
				self.data = Some(coerced);
				Ok(())
			}
			Err(CoerceError::Value(_)) => Err(FieldError::InvalidChoice(gettext(
				"Invalid Choice: could not coerce",
			))),
			Err(e) => Err(FieldError::Coerce(e)),
		}
	}

	fn pre_validate(&self) -> FieldResult<()> {
		if self.allow_blank && self.data.is_none() {
			return Ok(());
		}
		if self.choices.iter().any(|(value, _)| self.is_current(value)) {
			return Ok(());
		}
		Err(FieldError::NotAValidChoice(gettext("Not a valid choice")))
	}

	fn value(&self) -> String {
		self.data.as_ref().map(ToString::to_string).unwrap_or_default()
	}

	fn has_data(&self) -> bool {
		self.data.is_some()
	}

	fn data_json(&self) -> Value {
		serde_json::to_value(&self.data).unwrap_or(Value::Null)
	}
}
