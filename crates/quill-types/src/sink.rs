use std::io;
use std::sync::{Arc, Mutex};

/// A write-capable destination for rendered log lines.
///
/// Writes are synchronous; the caller hands over the fully rendered line
/// (trailing newline included) and returns immediately. Delivery is not
/// guaranteed: routing layers are free to drop the line when no sink
/// resolves, and write errors are swallowed rather than surfaced through
/// the log call.
pub trait Sink: Send {
    /// Accept one rendered line.
    fn write(&mut self, message: &str) -> io::Result<()>;

    /// Flush and release the destination.
    fn end(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Shared handle to a sink; one destination may serve several routes.
pub type SharedSink = Arc<Mutex<dyn Sink>>;

/// Wrap a sink for registration in an output map.
pub fn shared<S: Sink + 'static>(sink: S) -> SharedSink {
    Arc::new(Mutex::new(sink))
}
