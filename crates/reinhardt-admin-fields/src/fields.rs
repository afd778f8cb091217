// Date/time fields
pub mod datetime_field;
pub mod time_field;

// Select2 fields
pub mod select2_field;
pub mod select2_tags_field;

pub use datetime_field::DateTimeField;
pub use select2_field::{BLANK_CHOICE_KEY, Select2Field};
pub use select2_tags_field::{Select2TagsField, TagsData};
pub use time_field::TimeField;
