use crate::field::{FieldError, FormField};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Field error in {field}: {error}")]
	Field { field: String, error: FieldError },
	#[error("Unknown field: {0}")]
	UnknownField(String),
}

pub type FormResult<T> = Result<T, FormError>;

/// Multi-valued form submission, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
	values: HashMap<String, Vec<String>>,
}

impl FormData {
	pub fn new() -> Self {
		Self::default()
	}

	/// Collect decoded `(key, value)` pairs, keeping every value of a repeated key
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_fields::FormData;
	///
	/// let data = FormData::from_pairs([("tags", "a"), ("tags", "b"), ("status", "draft")]);
	/// assert_eq!(data.get_list("tags"), ["a", "b"]);
	/// assert!(data.get_list("missing").is_empty());
	/// assert!(data.contains("status"));
	/// ```
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let mut data = Self::new();
		for (key, value) in pairs {
			data.append(key, value);
		}
		data
	}

	pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.values.entry(key.into()).or_default().push(value.into());
	}

	pub fn contains(&self, key: &str) -> bool {
		self.values.contains_key(key)
	}

	/// All values submitted for `key`, empty when the key is absent.
	pub fn get_list(&self, key: &str) -> &[String] {
		self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

/// The fields of one admin create/edit form.
#[derive(Default)]
pub struct AdminForm {
	fields: Vec<Box<dyn FormField>>,
	errors: HashMap<String, Vec<String>>,
}

impl AdminForm {
	/// Create a new empty form
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_fields::AdminForm;
	///
	/// let form = AdminForm::new();
	/// assert!(form.fields().is_empty());
	/// assert!(form.errors().is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_field(&mut self, field: Box<dyn FormField>) {
		self.fields.push(field);
	}

	pub fn with_field(mut self, field: impl FormField + 'static) -> Self {
		self.fields.push(Box::new(field));
		self
	}

	pub fn fields(&self) -> &[Box<dyn FormField>] {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Option<&dyn FormField> {
		self.fields
			.iter()
			.find(|f| f.name() == name)
			.map(|f| &**f)
	}

	/// Process a submission and/or object data through every field
	///
	/// With a non-empty `formdata` every field is treated as submitted; fields
	/// missing from it receive an empty value list. Object `data` is applied
	/// first so submitted values take precedence.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_fields::{AdminForm, FormData, TimeField};
	/// use std::collections::HashMap;
	///
	/// let mut form = AdminForm::new().with_field(TimeField::new("opens_at"));
	/// let formdata = FormData::from_pairs([("opens_at", "9:30pm")]);
	/// form.process(Some(&formdata), &HashMap::new()).unwrap();
	///
	/// assert!(form.validate());
	/// assert_eq!(form.data()["opens_at"], "21:30:00");
	/// ```
	pub fn process(
		&mut self,
		formdata: Option<&FormData>,
		data: &HashMap<String, Value>,
	) -> FormResult<()> {
		let formdata = formdata.filter(|f| !f.is_empty());

		for field in &mut self.fields {
			let name = field.name().to_string();
			let submitted = formdata.map(|f| f.get_list(&name));
			field
				.process(submitted, data.get(&name))
				.map_err(|error| FormError::Field { field: name, error })?;
		}
		Ok(())
	}

	/// Assign object data to one field, bypassing any submission.
	pub fn set_data(&mut self, name: &str, value: Option<&Value>) -> FormResult<()> {
		let field = self
			.fields
			.iter_mut()
			.find(|f| f.name() == name)
			.ok_or_else(|| FormError::UnknownField(name.to_string()))?;
		field.process_data(value);
		Ok(())
	}

	/// Validate every field and collect their errors by field name.
	pub fn validate(&mut self) -> bool {
		self.errors.clear();

		for field in &mut self.fields {
			if !field.validate() {
				self.errors
					.insert(field.name().to_string(), field.errors().to_vec());
			}
		}

		if !self.errors.is_empty() {
			tracing::debug!(invalid_fields = self.errors.len(), "Form validation failed");
		}
		self.errors.is_empty()
	}

	pub fn errors(&self) -> &HashMap<String, Vec<String>> {
		&self.errors
	}

	/// Typed data of every field, for populating the edited object.
	pub fn data(&self) -> HashMap<String, Value> {
		self.fields
			.iter()
			.map(|f| (f.name().to_string(), f.data_json()))
			.collect()
	}
}

impl std::fmt::Debug for AdminForm {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AdminForm")
			.field("fields", &self.fields.iter().map(|f| f.name()).collect::<Vec<_>>())
			.field("errors", &self.errors)
			.finish()
	}
}
