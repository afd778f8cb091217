use crate::config::TimeFieldArgs;
use crate::field::{FieldCore, FieldError, FieldResult, FormField};
use crate::fields::datetime_field::{base_date, render};
use crate::translation::gettext;
use crate::validators::Validator;
use crate::widget::Widget;
use chrono::{NaiveTime, Timelike};
use serde_json::Value;

/// Accepted input formats, tried in order.
pub const DEFAULT_TIME_FORMATS: [&str; 6] = [
	"%H:%M:%S",
	"%H:%M",
	"%I:%M:%S%p",
	"%I:%M%p",
	"%I:%M:%S %p",
	"%I:%M %p",
];
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";
pub const DEFAULT_TIME_WIDGET_FORMAT: &str = "hh:ii:ss";

/// A text field which stores a time of day.
///
/// Accepts time strings in multiple formats: `20:10`, `20:10:00`, `10:00 am`,
/// `9:30pm` and so on.
#[derive(Debug)]
pub struct TimeField {
	pub core: FieldCore,
	pub formats: Vec<String>,
	/// Format used to display a stored time
	pub default_format: String,
	pub widget_format: String,
	pub data: Option<NaiveTime>,
}

impl TimeField {
	/// Create a new TimeField
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_fields::{FormField, TimeField};
	///
	/// let mut field = TimeField::new("opens_at");
	/// field.process_formdata(&["9:30pm".to_string()]).unwrap();
	/// assert_eq!(field.value(), "21:30:00");
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			core: FieldCore::new(name),
			formats: DEFAULT_TIME_FORMATS.iter().map(|f| f.to_string()).collect(),
			default_format: DEFAULT_TIME_FORMAT.to_string(),
			widget_format: DEFAULT_TIME_WIDGET_FORMAT.to_string(),
			data: None,
		}
	}

	/// Build the field from admin configuration, keeping defaults for unset options
	pub fn from_args(name: impl Into<String>, args: TimeFieldArgs) -> Self {
		let mut field = Self::new(name);
		field.core.label = args.label;
		field.core.description = args.description;
		if let Some(formats) = args.formats.filter(|f| !f.is_empty()) {
			field.formats = formats;
		}
		if let Some(default_format) = args.default_format {
			field.default_format = default_format;
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

	/// Replace the accepted input formats. An empty list keeps the defaults.
	pub fn with_formats<I, S>(mut self, formats: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let formats: Vec<String> = formats.into_iter().map(Into::into).collect();
		if !formats.is_empty() {
			self.formats = formats;
		}
		self
	}

	pub fn with_default_format(mut self, default_format: impl Into<String>) -> Self {
		self.default_format = default_format.into();
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

	fn parse_time(&self, s: &str) -> Option<NaiveTime> {
		self.formats.iter().find_map(|fmt| {
			let t = NaiveTime::parse_from_str(s, fmt).ok()?;
			// Leap seconds are not a valid time of day.
			if t.nanosecond() >= 1_000_000_000 {
				return None;
			}
			NaiveTime::from_hms_opt(t.hour(), t.minute(), t.second())
		})
	}
}

impl FormField for TimeField {
	fn core(&self) -> &FieldCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut FieldCore {
		&mut self.core
	}

	fn widget(&self) -> Widget {
		Widget::TimePicker {
			date_format: self.widget_format.clone(),
		}
	}

	fn process_data(&mut self, value: Option<&Value>) {
		self.data = match value {
			Some(Value::String(s)) => self.parse_time(s),
			_ => None,
		};
	}

	fn process_formdata(&mut self, valuelist: &[String]) -> FieldResult<()> {
		if valuelist.is_empty() {
			return Ok(());
		}
		let time_str = valuelist.join(" ");
		match self.parse_time(&time_str) {
			Some(time) => {
				self.data = Some(time);
				Ok(())
			}
			None => {
				tracing::debug!(field = %self.core.name, input = %time_str, "No time format matched");
				Err(FieldError::InvalidTime(gettext("Invalid time format")))
			}
		}
	}

	fn value(&self) -> String {
		if let Some(raw) = self.core.joined_raw() {
			return raw;
		}
		let Some(dt) = self.data.zip(base_date()).map(|(t, d)| d.and_time(t)) else {
			return String::new();
		};
		render(&dt, &self.default_format).unwrap_or_else(|| {
			tracing::debug!(field = %self.core.name, format = %self.default_format, "Format cannot render time");
			String::new()
		})
	}

	fn has_data(&self) -> bool {
		self.data.is_some()
	}

	fn data_json(&self) -> Value {
		self.data
			.map(|t| Value::String(t.format(DEFAULT_TIME_FORMAT).to_string()))
			.unwrap_or(Value::Null)
	}
}
