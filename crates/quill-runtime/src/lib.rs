// Runtime module - orchestration on top of the engine: the controller that
// owns all mutable state, output routing, built-in sinks, the tap queue,
// and file-based configuration.

pub mod config;
pub mod controller;
pub mod error;
pub mod options;
pub mod router;
pub mod sink;
pub mod tap;

pub use config::Config;
pub use controller::{Controller, Log};
pub use error::{Error, Result};
pub use options::Options;
pub use router::OutputMap;
pub use sink::{FileSink, MemorySink, NullSink, StderrSink, StdoutSink};
pub use tap::{Tap, DEFAULT_TAP_CAPACITY};
