use crate::coerce::Coerce;
use crate::config::Select2TagsFieldArgs;
use crate::field::{FieldCore, FieldResult, FormField};
use crate::validators::Validator;
use crate::widget::Widget;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;

/// Data held by a [`Select2TagsField`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagsData<T> {
	Single(T),
	List(Vec<T>),
}

/// Select2 styled tag input.
///
/// Stores either the coerced submission as a single value or, with
/// `save_as_list`, the list of coerced comma-separated tags.
#[derive(Debug)]
pub struct Select2TagsField<T = String> {
	pub core: FieldCore,
	pub coerce: Coerce<T>,
	/// Populate the data with a list instead of a single value
	pub save_as_list: bool,
	pub data: Option<TagsData<T>>,
}

impl Select2TagsField<String> {
	/// Create a new Select2TagsField storing text
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_fields::{FormField, Select2TagsField, TagsData};
	///
	/// let mut field = Select2TagsField::new("tags").save_as_list(true);
	/// field.process_formdata(&["a, b ,,c".to_string()]).unwrap();
	/// assert_eq!(
	///     field.data,
	///     Some(TagsData::List(vec!["a".to_string(), "b".to_string(), "c".to_string()]))
	/// );
	/// assert_eq!(field.value(), "a,b,c");
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self::with_coerce(name, Coerce::text())
	}

	/// Build a text-valued field from admin configuration
	pub fn from_args(name: impl Into<String>, args: Select2TagsFieldArgs) -> Self {
		let mut field = Self::new(name);
		field.core.label = args.label;
		field.core.description = args.description;
		field.save_as_list = args.save_as_list;
		field
	}
}

impl<T: Display> Select2TagsField<T> {
	pub fn with_coerce(name: impl Into<String>, coerce: Coerce<T>) -> Self {
		Self {
			core: FieldCore::new(name),
			coerce,
			save_as_list: false,
			data: None,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.core.label = Some(label.into());
		self
	}

	pub fn save_as_list(mut self, save_as_list: bool) -> Self {
		self.save_as_list = save_as_list;
		self
	}

	pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
		self.core.validators.push(Box::new(validator));
		self
	}
}

impl<T> FormField for Select2TagsField<T>
where
	T: Display + Serialize,
{
	fn core(&self) -> &FieldCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut FieldCore {
		&mut self.core
	}

	fn widget(&self) -> Widget {
		Widget::Select2Tags
	}

	fn process_data(&mut self, value: Option<&Value>) {
		let coerced = match value {
			None | Some(Value::Null) => {
				self.data = None;
				return;
			}
			Some(Value::Array(items)) => items
				.iter()
				.map(|item| self.coerce.call(item))
				.collect::<Result<Vec<_>, _>>()
				.map(TagsData::List),
			Some(value) => self.coerce.call(value).map(TagsData::Single),
		};
		self.data = match coerced {
			Ok(data) => Some(data),
			Err(e) => {
				tracing::debug!(field = %self.core.name, error = %e, "Discarding value that failed coercion");
				None
			}
		};
	}

	fn process_formdata(&mut self, valuelist: &[String]) -> FieldResult<()> {
		let Some(first) = valuelist.first() else {
			return Ok(());
		};
		let data = if self.save_as_list {
			let tags = first
				.split(',')
				.map(str::trim)
				.filter(|tag| !tag.is_empty())
				.map(|tag| self.coerce.call_str(tag))
				.collect::<Result<Vec<_>, _>>()?;
			TagsData::List(tags)
		} else {
			TagsData::Single(self.coerce.call_str(first)?)
		};
		self.data = Some(data);
		Ok(())
	}

	fn value(&self) -> String {
		match &self.data {
			Some(TagsData::List(tags)) => tags
				.iter()
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(","),
			Some(TagsData::Single(tag)) => tag.to_string(),
			None => String::new(),
		}
	}

	fn has_data(&self) -> bool {
		match &self.data {
			Some(TagsData::List(tags)) => !tags.is_empty(),
			Some(TagsData::Single(tag)) => !tag.to_string().is_empty(),
			None => false,
		}
	}

	fn data_json(&self) -> Value {
		serde_json::to_value(&self.data).unwrap_or(Value::Null)
	}
}
