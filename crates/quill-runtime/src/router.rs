use crate::sink::{StderrSink, StdoutSink};
use quill_types::{shared, SharedSink, DEFAULT_KEY};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Destination sinks keyed by section, then type, with `_default`
/// fallbacks at both levels.
pub struct OutputMap {
    map: HashMap<String, HashMap<String, SharedSink>>,
}

impl OutputMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// The conventional starting point: everything to stdout, `error`-typed
    /// messages to stderr.
    pub fn with_standard_streams() -> Self {
        let mut outputs = Self::new();
        outputs.set(DEFAULT_KEY, DEFAULT_KEY, shared(StdoutSink));
        outputs.set(DEFAULT_KEY, "error", shared(StderrSink));
        outputs
    }

    pub fn set(&mut self, section: &str, log_type: &str, sink: SharedSink) {
        self.map
            .entry(section.to_string())
            .or_default()
            .insert(log_type.to_string(), sink);
    }

    /// Resolve the destination for a (section, type) pair through the
    /// four-step fallback chain: exact, section default, type default,
    /// global default. `None` means the message is discarded.
    pub fn route(&self, section: &str, log_type: &str) -> Option<SharedSink> {
        if let Some(types) = self.map.get(section) {
            if let Some(sink) = types.get(log_type) {
                return Some(Arc::clone(sink));
            }
            if let Some(sink) = types.get(DEFAULT_KEY) {
                return Some(Arc::clone(sink));
            }
        }
        if let Some(types) = self.map.get(DEFAULT_KEY) {
            if let Some(sink) = types.get(log_type) {
                return Some(Arc::clone(sink));
            }
            if let Some(sink) = types.get(DEFAULT_KEY) {
                return Some(Arc::clone(sink));
            }
        }
        None
    }
}

impl Default for OutputMap {
    fn default() -> Self {
        Self::with_standard_streams()
    }
}

impl fmt::Debug for OutputMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut routes: Vec<String> = self
            .map
            .iter()
            .flat_map(|(section, types)| {
                types.keys().map(move |t| format!("{}/{}", section, t))
            })
            .collect();
        routes.sort();
        f.debug_struct("OutputMap").field("routes", &routes).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;

    #[test]
    fn test_fallback_chain_order() {
        let mut outputs = OutputMap::new();
        assert!(outputs.route("db", "info").is_none());

        outputs.set(DEFAULT_KEY, DEFAULT_KEY, shared(NullSink));
        assert!(outputs.route("db", "info").is_some());

        // More specific slots shadow the global default.
        let exact = shared(NullSink);
        outputs.set("db", "info", Arc::clone(&exact));
        let routed = outputs.route("db", "info").unwrap();
        assert!(Arc::ptr_eq(&routed, &exact));

        let section_default = shared(NullSink);
        outputs.set("db", DEFAULT_KEY, Arc::clone(&section_default));
        let routed = outputs.route("db", "warn").unwrap();
        assert!(Arc::ptr_eq(&routed, &section_default));

        let type_default = shared(NullSink);
        outputs.set(DEFAULT_KEY, "warn", Arc::clone(&type_default));
        let routed = outputs.route("api", "warn").unwrap();
        assert!(Arc::ptr_eq(&routed, &type_default));
    }

    #[test]
    fn test_unrouted_pair_is_discarded() {
        let outputs = OutputMap::new();
        assert!(outputs.route("db", "info").is_none());
    }
}
