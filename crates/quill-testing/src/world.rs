use quill::{Controller, Log, MemorySink};
use std::sync::{Arc, Mutex};

/// A controller wired to an in-memory default sink, with passthrough
/// `{{message}}` formats registered for the named types.
///
/// Tests observe exactly what was emitted, trailing newlines included.
pub struct CaptureWorld {
    controller: Controller,
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureWorld {
    /// A world with a single passthrough type `simple`.
    pub fn new() -> Self {
        Self::with_types(&["simple"])
    }

    /// A world with a passthrough format for each named type.
    pub fn with_types(types: &[&str]) -> Self {
        let controller = Controller::new();
        for log_type in types {
            controller.format(log_type, "{{message}}");
        }
        let sink = MemorySink::new();
        let lines = sink.buffer();
        controller.output("_default", sink);
        Self { controller, lines }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn log(&self, section: &str) -> Log {
        self.controller.log(section)
    }

    /// Everything captured so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Captured lines with trailing newlines stripped.
    pub fn messages(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .map(|line| line.trim_end_matches('\n').to_string())
            .collect()
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap().clear();
    }
}

impl Default for CaptureWorld {
    fn default() -> Self {
        Self::new()
    }
}
