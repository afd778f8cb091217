//! Admin form fields for Reinhardt
//!
//! This crate provides the custom field types used by the admin interface:
//! - `DateTimeField` with configurable parse and picker formats
//! - `TimeField` accepting 24-hour and 12-hour time input
//! - `Select2Field` single-choice select with an optional blank choice
//! - `Select2TagsField` tag input storing a single value or a list
//!
//! Fields parse submitted text into typed values, render those values back
//! for re-display and describe the widget the rendering layer should use.

pub mod coerce;
pub mod config;
pub mod field;
pub mod fields;
pub mod form;
pub mod translation;
pub mod validators;
pub mod widget;

pub use coerce::{Coerce, CoerceError};
pub use config::{DateTimeFieldArgs, Select2FieldArgs, Select2TagsFieldArgs, TimeFieldArgs};
pub use field::{FieldCore, FieldError, FieldResult, FormField};
pub use fields::{
	BLANK_CHOICE_KEY, DateTimeField, Select2Field, Select2TagsField, TagsData, TimeField,
};
pub use form::{AdminForm, FormData, FormError, FormResult};
pub use translation::{MessageCatalog, TranslationGuard, activate, gettext};
pub use validators::{DataRequired, FieldState, InputRequired, Length, ValidationError, Validator};
pub use widget::{Choice, Widget};
