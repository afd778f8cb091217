//! Per-field arguments supplied through admin configuration
//!
//! Model admins can override how a field is built without constructing it by
//! hand, e.g. from a JSON settings document:
//!
//! ```
//! use reinhardt_admin_fields::{FormField, TimeField, TimeFieldArgs};
//! use serde_json::json;
//!
//! let args: TimeFieldArgs = serde_json::from_value(json!({
//!     "label": "Opens at",
//!     "default_format": "%H:%M",
//! }))
//! .unwrap();
//!
//! let field = TimeField::from_args("opens_at", args);
//! assert_eq!(field.label(), Some("Opens at"));
//! assert_eq!(field.default_format, "%H:%M");
//! assert_eq!(field.widget_format, "hh:ii:ss");
//! ```
//!
//! Unset options keep the field's defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DateTimeFieldArgs {
	pub label: Option<String>,
	pub description: Option<String>,
	/// Format for text to date-time conversion
	pub format: Option<String>,
	/// Date format of the picker widget
	pub widget_format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeFieldArgs {
	pub label: Option<String>,
	pub description: Option<String>,
	/// Accepted input formats, tried in order
	pub formats: Option<Vec<String>>,
	pub default_format: Option<String>,
	pub widget_format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Select2FieldArgs {
	pub label: Option<String>,
	pub description: Option<String>,
	pub choices: Vec<(Value, String)>,
	pub allow_blank: bool,
	pub blank_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Select2TagsFieldArgs {
	pub label: Option<String>,
	pub description: Option<String>,
	pub save_as_list: bool,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::FormField;
	use crate::fields::{Select2Field, Select2TagsField, TimeField};
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_empty_args_keep_defaults() {
		let args: TimeFieldArgs = serde_json::from_value(json!({})).unwrap();
		assert_eq!(args, TimeFieldArgs::default());

		let field = TimeField::from_args("opens_at", args);
		assert_eq!(field.formats.len(), 6);
		assert_eq!(field.default_format, "%H:%M:%S");
	}

	#[rstest]
	fn test_empty_formats_keep_defaults() {
		let args = TimeFieldArgs {
			formats: Some(vec![]),
			..Default::default()
		};
		let field = TimeField::from_args("opens_at", args);
		assert_eq!(field.formats[0], "%H:%M:%S");
	}

	#[rstest]
	fn test_unknown_option_is_rejected() {
		let result = serde_json::from_value::<Select2TagsFieldArgs>(json!({"save_as_lists": true}));
		assert!(result.is_err());
	}

	#[rstest]
	fn test_select2_args() {
		let args: Select2FieldArgs = serde_json::from_value(json!({
			"choices": [["draft", "Draft"], [2, "Two"]],
			"allow_blank": true,
			"blank_text": "",
		}))
		.unwrap();
		let field = Select2Field::from_args("status", args);
		assert!(field.allow_blank);
		assert_eq!(field.blank_text, " ");
		assert_eq!(field.choices[1], (json!(2), "Two".to_string()));
		assert_eq!(field.iter_choices().count(), 3);
	}

	#[rstest]
	fn test_select2_tags_args() {
		let args: Select2TagsFieldArgs =
			serde_json::from_value(json!({"label": "Tags", "save_as_list": true})).unwrap();
		let field = Select2TagsField::from_args("tags", args);
		assert!(field.save_as_list);
		assert_eq!(field.label(), Some("Tags"));
	}
}
