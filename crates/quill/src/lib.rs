//! quill: sectioned, template-driven logging.
//!
//! # Overview
//!
//! `quill` is a logging facade built around three ideas: every log handle
//! belongs to a named *section*, every message has a *type* bound to a
//! template, and a visibility policy decides per (section, type) pair
//! whether a message is emitted at all. Sections can be collected into
//! recursively-expanding *groups*, and named *modes* switch whole
//! visibility profiles at once. Rendered lines are routed to *sinks*
//! (stdout, stderr, files, memory buffers, or your own) through a
//! per-section, per-type fallback chain.
//!
//! A log call never fails and never panics: suppressed messages, unknown
//! types, unroutable destinations, and serialization failures all degrade
//! silently.
//!
//! # Quickstart
//!
//! ```
//! use quill::vals;
//!
//! let logs = quill::init();
//! let log = logs.log("server");
//! log.info(vals!["listening on port %d", 8080]);
//! log.warn(vals!["%s retries left", 2]);
//! ```
//!
//! # Custom types and routing
//!
//! ```
//! use quill::{vals, Controller, MemorySink};
//!
//! let logs = Controller::new();
//! logs.format("audit", "{{timestamp}} [{{section}}] {{message}}");
//!
//! let sink = MemorySink::new();
//! let lines = sink.buffer();
//! logs.output("payments/audit", sink);
//!
//! logs.log("payments").emit("audit", vals!["charge %s accepted", "ch_123"]);
//! assert_eq!(lines.lock().unwrap().len(), 1);
//! ```
//!
//! # Visibility
//!
//! ```
//! use quill::{vals, ModeOptions};
//!
//! let logs = quill::init();
//! logs.group("backend", vec!["db".to_string(), "api".to_string()]).unwrap();
//! logs.hide("backend");
//! logs.show("db/error");
//!
//! logs.define_mode("triage", ModeOptions::new().show_by_default(false).show("backend"));
//! logs.mode("triage");
//! ```
//!
//! # Architecture
//!
//! This crate is a facade over:
//! - `quill-types`: value model, display options, the `Sink` trait
//! - `quill-engine`: group resolution, visibility scoring, template rendering
//! - `quill-runtime`: the controller owning all mutable state, routing,
//!   built-in sinks, and TOML configuration

pub mod defaults;

pub use quill_runtime::{
    Config, Controller, Error, FileSink, Log, MemorySink, NullSink, Options, Result, StderrSink,
    StdoutSink, Tap, DEFAULT_TAP_CAPACITY,
};
pub use quill_types::{
    vals, CallSite, DisplayOptions, DisplayUpdate, ErrorValue, LogValue, ModeOptions, SharedSink,
    Sink, DEFAULT_KEY,
};

pub use quill_engine::{CompiledTemplate, RenderContext, Renderer};

/// A controller preloaded with the built-in colored templates (`log`,
/// `info`, `warn`, `error`, `debug`), the standard mode set (`normal`,
/// `verbose`, `critical`, `silent` — none active), and stdout/stderr
/// default outputs.
pub fn init() -> Controller {
    let logs = Controller::new();
    for (name, template) in defaults::default_formats() {
        logs.format(&name, &template);
    }
    for (name, options) in defaults::default_modes() {
        logs.define_mode(&name, options);
    }
    logs
}
