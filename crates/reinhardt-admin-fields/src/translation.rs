//! Message translation for user-facing field errors
//!
//! A [`MessageCatalog`] maps source messages to translations for one locale.
//! Activating a catalog makes [`gettext`] use it on the current thread until
//! the returned guard is dropped.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

/// A message catalog containing translations for a specific locale
///
/// # Example
/// ```
/// use reinhardt_admin_fields::MessageCatalog;
///
/// let mut catalog = MessageCatalog::new("fr");
/// catalog.add_translation("Invalid time format", "Format d'heure invalide");
///
/// assert_eq!(catalog.locale(), "fr");
/// assert_eq!(
///     catalog.get("Invalid time format"),
///     Some(&"Format d'heure invalide".to_string())
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
	locale: String,
	messages: HashMap<String, String>,
}

impl MessageCatalog {
	pub fn new(locale: &str) -> Self {
		Self {
			locale: locale.to_string(),
			messages: HashMap::new(),
		}
	}

	pub fn locale(&self) -> &str {
		&self.locale
	}

	pub fn add_translation(&mut self, message: impl Into<String>, translation: impl Into<String>) {
		self.messages.insert(message.into(), translation.into());
	}

	pub fn get(&self, message: &str) -> Option<&String> {
		self.messages.get(message)
	}
}

thread_local! {
	static ACTIVE: RefCell<Option<Arc<MessageCatalog>>> = const { RefCell::new(None) };
}

/// Restores the previously active catalog when dropped.
#[must_use = "the catalog is deactivated when the guard is dropped"]
pub struct TranslationGuard {
	previous: Option<Arc<MessageCatalog>>,
}

impl Drop for TranslationGuard {
	fn drop(&mut self) {
		let previous = self.previous.take();
		ACTIVE.with(|active| *active.borrow_mut() = previous);
	}
}

/// Activate `catalog` for the current thread
///
/// # Examples
///
/// ```
/// use reinhardt_admin_fields::{MessageCatalog, activate, gettext};
/// use std::sync::Arc;
///
/// let mut catalog = MessageCatalog::new("de");
/// catalog.add_translation("Not a valid choice", "Keine gültige Auswahl");
///
/// {
///     let _guard = activate(Arc::new(catalog));
///     assert_eq!(gettext("Not a valid choice"), "Keine gültige Auswahl");
/// }
/// assert_eq!(gettext("Not a valid choice"), "Not a valid choice");
/// ```
pub fn activate(catalog: Arc<MessageCatalog>) -> TranslationGuard {
	tracing::debug!(locale = %catalog.locale(), "Activating message catalog");
	let previous = ACTIVE.with(|active| active.borrow_mut().replace(catalog));
	TranslationGuard { previous }
}

/// Translate `message` with the active catalog, falling back to the message itself.
pub fn gettext(message: &str) -> String {
	ACTIVE.with(|active| {
		active
			.borrow()
			.as_ref()
			.and_then(|catalog| catalog.get(message).cloned())
			.unwrap_or_else(|| message.to_string())
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn catalog(locale: &str, translation: &str) -> Arc<MessageCatalog> {
		let mut catalog = MessageCatalog::new(locale);
		catalog.add_translation("Invalid time format", translation);
		Arc::new(catalog)
	}

	#[rstest]
	fn test_untranslated_message_passes_through() {
		assert_eq!(gettext("Invalid time format"), "Invalid time format");
	}

	#[rstest]
	fn test_nested_activation_restores_previous() {
		let _outer = activate(catalog("fr", "Format d'heure invalide"));
		{
			let _inner = activate(catalog("es", "Formato de hora no válido"));
			assert_eq!(gettext("Invalid time format"), "Formato de hora no válido");
		}
		assert_eq!(gettext("Invalid time format"), "Format d'heure invalide");
	}

	#[rstest]
	fn test_missing_entry_falls_back() {
		let _guard = activate(catalog("fr", "Format d'heure invalide"));
		assert_eq!(gettext("Not a valid choice"), "Not a valid choice");
	}
}
