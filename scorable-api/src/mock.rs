//! Mock host runtime for testing
//!
//! [`RecordingRuntime`] captures published events in memory so tests can
//! assert on event order, names, and payload shape without a real host.
//! It doubles as the reference `Runtime` implementation in doc examples.

use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};

use crate::runtime::{I18N_SERVICE, Runtime, Translator};

/// One event captured by a [`RecordingRuntime`].
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedEvent {
    /// The event name passed to `publish`
    pub name: String,
    /// The payload passed to `publish`
    pub payload: Map<String, Value>,
}

/// In-memory `Runtime` implementation for testing.
///
/// Records every `publish` call in order. Provides no services unless a
/// translator is attached with [`RecordingRuntime::with_translator`].
#[derive(Default)]
pub struct RecordingRuntime {
    events: Mutex<Vec<PublishedEvent>>,
    translator: Option<Arc<dyn Translator>>,
}

impl RecordingRuntime {
    /// Create a runtime with no recorded events and no services.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a translator, served under the `i18n` service name.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// All events published so far, in publish order.
    pub fn published(&self) -> Vec<PublishedEvent> {
        self.events.lock().expect("event log poisoned").clone()
    }

    /// Payloads of published events with the given name, in publish order.
    pub fn published_named(&self, name: &str) -> Vec<Map<String, Value>> {
        self.published()
            .into_iter()
            .filter(|event| event.name == name)
            .map(|event| event.payload)
            .collect()
    }

    /// Number of events published so far.
    pub fn len(&self) -> usize {
        self.events.lock().expect("event log poisoned").len()
    }

    /// Whether no events have been published.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Runtime for RecordingRuntime {
    fn publish(&self, event_name: &str, payload: Map<String, Value>) {
        self.events.lock().expect("event log poisoned").push(PublishedEvent {
            name: event_name.to_string(),
            payload,
        });
    }

    fn service(&self, name: &str) -> Option<Arc<dyn Translator>> {
        if name == I18N_SERVICE {
            self.translator.clone()
        } else {
            None
        }
    }
}

/// Translator that prepends a fixed prefix, so tests can tell translated
/// output from the source string.
pub struct PrefixTranslator {
    prefix: String,
}

impl PrefixTranslator {
    /// Create a translator with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Translator for PrefixTranslator {
    fn gettext(&self, message: &str) -> String {
        format!("{}{}", self.prefix, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_events_in_order() {
        let runtime = RecordingRuntime::new();
        assert!(runtime.is_empty());

        let mut first = Map::new();
        first.insert("value".to_string(), json!(1.0));
        runtime.publish("grade", first);
        runtime.publish("rescore_result", Map::new());

        let events = runtime.published();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "grade");
        assert_eq!(events[0].payload.get("value"), Some(&json!(1.0)));
        assert_eq!(events[1].name, "rescore_result");
    }

    #[test]
    fn test_published_named_filters() {
        let runtime = RecordingRuntime::new();
        runtime.publish("grade", Map::new());
        runtime.publish("rescore_result", Map::new());
        runtime.publish("grade", Map::new());

        assert_eq!(runtime.published_named("grade").len(), 2);
        assert_eq!(runtime.published_named("rescore_failure").len(), 0);
    }

    #[test]
    fn test_service_lookup() {
        let runtime = RecordingRuntime::new();
        assert!(runtime.service(I18N_SERVICE).is_none());

        let runtime = RecordingRuntime::new()
            .with_translator(Arc::new(PrefixTranslator::new("es: ")));
        let translator = runtime.service(I18N_SERVICE).unwrap();
        assert_eq!(translator.gettext("score"), "es: score");
        assert!(runtime.service("gradebook").is_none());
    }
}
