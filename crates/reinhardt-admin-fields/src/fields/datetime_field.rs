use crate::config::DateTimeFieldArgs;
use crate::field::{FieldCore, FieldError, FieldResult, FormField};
use crate::translation::gettext;
use crate::validators::Validator;
use crate::widget::Widget;
use chrono::format::ParseErrorKind;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use std::fmt::Write;

pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_DATETIME_WIDGET_FORMAT: &str = "yyyy-mm-dd hh:ii:ss";

/// Day given to values parsed or rendered without a date part.
pub(crate) fn base_date() -> Option<NaiveDate> {
	NaiveDate::from_ymd_opt(1900, 1, 1)
}

/// Render `dt` with a strftime format, `None` when chrono cannot render it.
pub(crate) fn render(dt: &NaiveDateTime, format: &str) -> Option<String> {
	let mut out = String::new();
	write!(out, "{}", dt.format(format)).ok()?;
	Some(out)
}

/// DateTimeField for date and time input with a date-time picker
#[derive(Debug)]
pub struct DateTimeField {
	pub core: FieldCore,
	/// Format for text to date-time conversion
	pub format: String,
	/// Date format understood by the picker widget
	pub widget_format: String,
	pub data: Option<NaiveDateTime>,
}

impl DateTimeField {
	/// Create a new DateTimeField
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_fields::DateTimeField;
	///
	/// let field = DateTimeField::new("published_at");
	/// assert_eq!(field.format, "%Y-%m-%d %H:%M:%S");
	/// assert_eq!(field.widget_format, "yyyy-mm-dd hh:ii:ss");
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			core: FieldCore::new(name),
			format: DEFAULT_DATETIME_FORMAT.to_string(),
			widget_format: DEFAULT_DATETIME_WIDGET_FORMAT.to_string(),
			data: None,
		}
	}

	/// Build the field from admin configuration, keeping defaults for unset options
	pub fn from_args(name: impl Into<String>, args: DateTimeFieldArgs) -> Self {
		let mut field = Self::new(name);
		field.core.label = args.label;
		field.core.description = args.description;
		if let Some(format) = args.format {
			field.format = format;
		}
		if let Some(widget_format) = args.widget_format {
			field.widget_format = widget_format;
		}
		field
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.core.label = Some(label.into());
		self
	}

	pub fn with_format(mut self, format: impl Into<String>) -> Self {
		self.format = format.into();
		self
	}

	pub fn with_widget_format(mut self, widget_format: impl Into<String>) -> Self {
		self.widget_format = widget_format.into();
		self
	}

	pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
		self.core.validators.push(Box::new(validator));
		self
	}

	fn parse(&self, s: &str) -> Option<NaiveDateTime> {
		match NaiveDateTime::parse_from_str(s, &self.format) {
			Ok(dt) => Some(dt),
			// Date-only formats give midnight, time-only formats the base date.
			Err(e) if e.kind() == ParseErrorKind::NotEnough => {
				match NaiveDate::parse_from_str(s, &self.format) {
					Ok(d) => d.and_hms_opt(0, 0, 0),
					Err(e) if e.kind() == ParseErrorKind::NotEnough => {
						let time = NaiveTime::parse_from_str(s, &self.format).ok()?;
						base_date().map(|d| d.and_time(time))
					}
					Err(_) => None,
				}
			}
			Err(_) => None,
		}
	}
}

impl FormField for DateTimeField {
	fn core(&self) -> &FieldCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut FieldCore {
		&mut self.core
	}

	fn widget(&self) -> Widget {
		Widget::DateTimePicker {
			date_format: self.widget_format.clone(),
		}
	}

	fn process_data(&mut self, value: Option<&Value>) {
		self.data = match value {
			Some(Value::String(s)) => self.parse(s).or_else(|| {
				NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok()
			}),
			_ => None,
		};
	}

	fn process_formdata(&mut self, valuelist: &[String]) -> FieldResult<()> {
		if valuelist.is_empty() {
			return Ok(());
		}
		let date_str = valuelist.join(" ");
		self.data = self.parse(&date_str);
		if self.data.is_none() {
			return Err(FieldError::InvalidDateTime(gettext("Not a valid datetime value")));
		}
		Ok(())
	}

	fn value(&self) -> String {
		if let Some(raw) = self.core.joined_raw() {
			return raw;
		}
		let Some(dt) = self.data else {
			return String::new();
		};
		render(&dt, &self.format).unwrap_or_else(|| {
			tracing::debug!(field = %self.core.name, format = %self.format, "Format cannot render date-time");
			String::new()
		})
	}

	fn has_data(&self) -> bool {
		self.data.is_some()
	}

	fn data_json(&self) -> Value {
		self.data
			.map(|dt| Value::String(dt.format(DEFAULT_DATETIME_FORMAT).to_string()))
			.unwrap_or(Value::Null)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
		NaiveDate::from_ymd_opt(y, mo, d)
			.unwrap()
			.and_hms_opt(h, mi, s)
			.unwrap()
	}

	#[rstest]
	fn test_datetimefield_defaults() {
		let field = DateTimeField::new("created_at");
		assert_eq!(field.format, DEFAULT_DATETIME_FORMAT);
		assert_eq!(field.widget_format, DEFAULT_DATETIME_WIDGET_FORMAT);
		assert_eq!(
			field.widget(),
			Widget::DateTimePicker {
				date_format: "yyyy-mm-dd hh:ii:ss".to_string()
			}
		);
	}

	#[rstest]
	fn test_datetimefield_valid() {
		let mut field = DateTimeField::new("created_at");
		field
			.process_formdata(&["2025-01-15 14:30:00".to_string()])
			.unwrap();
		assert_eq!(field.data, Some(at(2025, 1, 15, 14, 30, 0)));
		assert_eq!(field.value(), "2025-01-15 14:30:00");
	}

	#[rstest]
	fn test_datetimefield_joins_tokens() {
		let mut field = DateTimeField::new("created_at");
		field
			.process_formdata(&["2025-01-15".to_string(), "14:30:00".to_string()])
			.unwrap();
		assert_eq!(field.data, Some(at(2025, 1, 15, 14, 30, 0)));
	}

	#[rstest]
	#[case("not a datetime")]
	#[case("2025-13-01 14:30:00")]
	#[case("2025-02-30 14:30:00")]
	#[case("2025-01-15 25:30:00")]
	#[case("2025-01-15T14:30:00")]
	fn test_datetimefield_invalid(#[case] input: &str) {
		let mut field = DateTimeField::new("created_at");
		field.data = Some(at(2024, 1, 1, 0, 0, 0));
		assert_eq!(
			field.process_formdata(&[input.to_string()]),
			Err(FieldError::InvalidDateTime("Not a valid datetime value".to_string()))
		);
		assert_eq!(field.data, None);
	}

	#[rstest]
	fn test_datetimefield_custom_format() {
		let mut field = DateTimeField::new("created_at")
			.with_format("%d.%m.%Y %H:%M")
			.with_widget_format("dd.mm.yyyy hh:ii");
		field
			.process_formdata(&["15.01.2025 14:30".to_string()])
			.unwrap();
		assert_eq!(field.data, Some(at(2025, 1, 15, 14, 30, 0)));
		assert_eq!(field.value(), "15.01.2025 14:30");
		assert_eq!(field.widget().attrs()["data-date-format"], "dd.mm.yyyy hh:ii");
	}

	#[rstest]
	fn test_datetimefield_date_only_format() {
		let mut field = DateTimeField::new("created_at").with_format("%Y-%m-%d");
		field.process_formdata(&["2024-02-29".to_string()]).unwrap();
		assert_eq!(field.data, Some(at(2024, 2, 29, 0, 0, 0)));
	}

	#[rstest]
	fn test_datetimefield_time_only_format() {
		let mut field = DateTimeField::new("created_at").with_format("%H:%M");
		field.process_formdata(&["14:30".to_string()]).unwrap();
		assert_eq!(field.data, Some(at(1900, 1, 1, 14, 30, 0)));
		assert_eq!(field.value(), "14:30");
	}

	#[rstest]
	fn test_datetimefield_unrenderable_format_displays_empty() {
		let mut field = DateTimeField::new("created_at").with_format("%Y-%m-%d %H:%M:%S %");
		field.process_data(Some(&json!("2025-01-15T14:30:00")));
		assert_eq!(field.data, Some(at(2025, 1, 15, 14, 30, 0)));
		assert_eq!(field.value(), "");
		assert_eq!(field.data_json(), json!("2025-01-15 14:30:00"));
	}

	#[rstest]
	fn test_datetimefield_redisplays_raw_input() {
		let mut field = DateTimeField::new("created_at");
		field
			.process(Some(&["yesterday".to_string()]), None)
			.unwrap();
		assert_eq!(field.value(), "yesterday");
		assert!(!field.validate());
		assert_eq!(field.errors(), ["Not a valid datetime value"]);
	}

	#[rstest]
	fn test_datetimefield_process_data() {
		let mut field = DateTimeField::new("created_at");
		field.process_data(Some(&json!("2025-01-15T14:30:00")));
		assert_eq!(field.data, Some(at(2025, 1, 15, 14, 30, 0)));
		assert_eq!(field.value(), "2025-01-15 14:30:00");
		assert_eq!(field.data_json(), json!("2025-01-15 14:30:00"));

		field.process_data(Some(&json!(12)));
		assert_eq!(field.data, None);
		assert_eq!(field.value(), "");
		assert_eq!(field.data_json(), Value::Null);
	}

	#[rstest]
	fn test_datetimefield_from_args() {
		let args: DateTimeFieldArgs =
			serde_json::from_value(json!({"label": "Published", "format": "%Y/%m/%d %H:%M"})).unwrap();
		let field = DateTimeField::from_args("published_at", args);
		assert_eq!(field.label(), Some("Published"));
		assert_eq!(field.format, "%Y/%m/%d %H:%M");
		assert_eq!(field.widget_format, DEFAULT_DATETIME_WIDGET_FORMAT);
	}
}
