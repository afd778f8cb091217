//! Widget descriptors consulted by the rendering layer
//!
//! The admin templates render every field as a plain input or select and let
//! the client-side scripts enhance it based on `data-*` attributes. Widgets
//! here only describe which enhancement applies; markup generation lives in
//! the rendering layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Widget type enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
	/// Text input enhanced with a date-time picker
	DateTimePicker { date_format: String },
	/// Text input enhanced with a time picker
	TimePicker { date_format: String },
	/// Select enhanced with search
	Select2 { allow_blank: bool },
	/// Text input enhanced with tag entry
	Select2Tags,
}

impl Widget {
	/// Value of the `data-role` attribute picked up by the admin scripts.
	pub fn role(&self) -> &'static str {
		match self {
			Widget::DateTimePicker { .. } => "datetimepicker",
			Widget::TimePicker { .. } => "timepicker",
			Widget::Select2 { .. } | Widget::Select2Tags => "select2",
		}
	}

	/// Attributes the rendering layer adds to the field's element
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_fields::Widget;
	///
	/// let widget = Widget::TimePicker { date_format: "hh:ii:ss".to_string() };
	/// let attrs = widget.attrs();
	/// assert_eq!(attrs["data-role"], "timepicker");
	/// assert_eq!(attrs["data-date-format"], "hh:ii:ss");
	/// ```
	pub fn attrs(&self) -> BTreeMap<&'static str, String> {
		let mut attrs = BTreeMap::new();
		attrs.insert("data-role", self.role().to_string());
		match self {
			Widget::DateTimePicker { date_format } | Widget::TimePicker { date_format } => {
				attrs.insert("data-date-format", date_format.clone());
			}
			Widget::Select2 { allow_blank: true } => {
				attrs.insert("data-allow-blank", "1".to_string());
			}
			Widget::Select2 { allow_blank: false } => {}
			Widget::Select2Tags => {
				attrs.insert("data-tags", "1".to_string());
			}
		}
		attrs
	}
}

/// One option yielded by choice enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
	pub value: String,
	pub label: String,
	pub selected: bool,
}

impl Choice {
	pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
			selected,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_select2_blank_attrs() {
		let attrs = Widget::Select2 { allow_blank: true }.attrs();
		assert_eq!(attrs.get("data-role").map(String::as_str), Some("select2"));
		assert_eq!(attrs.get("data-allow-blank").map(String::as_str), Some("1"));

		let attrs = Widget::Select2 { allow_blank: false }.attrs();
		assert!(!attrs.contains_key("data-allow-blank"));
	}

	#[rstest]
	fn test_tags_attrs() {
		let attrs = Widget::Select2Tags.attrs();
		assert_eq!(attrs.len(), 2);
		assert_eq!(attrs["data-tags"], "1");
	}

	#[rstest]
	fn test_widget_serializes_with_type_tag() {
		let widget = Widget::DateTimePicker {
			date_format: "yyyy-mm-dd hh:ii:ss".to_string(),
		};
		assert_eq!(
			serde_json::to_value(&widget).unwrap(),
			serde_json::json!({"type": "date_time_picker", "date_format": "yyyy-mm-dd hh:ii:ss"})
		);
	}
}
