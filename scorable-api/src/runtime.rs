//! Host runtime boundary
//!
//! The contract talks to its host through two narrow seams: an event sink
//! for grade and audit records, and a service locator used to fetch a text
//! translator for error messages. Both are fire-and-forget from the
//! contract's perspective; delivery, retry, and translation content are the
//! host's problem.

use std::sync::Arc;

use serde_json::{Map, Value};

/// Service name the contract passes to [`Runtime::service`] to obtain a
/// [`Translator`].
pub const I18N_SERVICE: &str = "i18n";

/// Host-provided text translation service.
pub trait Translator: Send + Sync {
    /// Translate a source-language message for display to the current user.
    fn gettext(&self, message: &str) -> String;
}

/// Handle to the host runtime a gradable unit lives in.
///
/// Implemented by the host application; the contract only publishes events
/// and looks up the `i18n` service. Publishing does not await delivery and
/// has no error channel here. A host whose transport can fail handles that
/// behind this trait.
pub trait Runtime: Send + Sync {
    /// Deliver an event to downstream consumers.
    ///
    /// Used for grade records (`event_name = "grade"`) and scoring audit
    /// events (`rescore_failure`, `rescore_result`).
    fn publish(&self, event_name: &str, payload: Map<String, Value>);

    /// Look up a host service by name.
    ///
    /// Returns `None` when the host does not provide the service.
    fn service(&self, name: &str) -> Option<Arc<dyn Translator>>;
}

/// Translate `message` through the host's `i18n` service, falling back to
/// the untranslated source string when the host provides none.
pub fn gettext(runtime: &dyn Runtime, message: &str) -> String {
    match runtime.service(I18N_SERVICE) {
        Some(translator) => translator.gettext(message),
        None => message.to_string(),
    }
}
