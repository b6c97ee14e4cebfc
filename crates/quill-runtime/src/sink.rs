use quill_types::Sink;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Writes lines to the process standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write(&mut self, message: &str) -> io::Result<()> {
        io::stdout().write_all(message.as_bytes())
    }

    fn end(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// Writes lines to the process standard error.
#[derive(Debug, Default)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn write(&mut self, message: &str) -> io::Result<()> {
        io::stderr().write_all(message.as_bytes())
    }

    fn end(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Appends lines to a file. Opening the file is the fallible step; once
/// open, write errors are swallowed by the emit path like any other sink's.
#[derive(Debug)]
pub struct FileSink {
    file: File,
}

impl FileSink {
    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self { file })
    }
}

impl Sink for FileSink {
    fn write(&mut self, message: &str) -> io::Result<()> {
        self.file.write_all(message.as_bytes())
    }

    fn end(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn write(&mut self, _message: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Collects lines into a shared in-memory buffer. Useful for tests and for
/// capturing a section's output programmatically.
#[derive(Debug, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the captured lines; clones observe the same buffer.
    pub fn buffer(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.buffer)
    }
}

impl Sink for MemorySink {
    fn write(&mut self, message: &str) -> io::Result<()> {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(message.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_shares_its_buffer() {
        let mut sink = MemorySink::new();
        let buffer = sink.buffer();
        sink.write("one\n").unwrap();
        sink.write("two\n").unwrap();
        assert_eq!(buffer.lock().unwrap().as_slice(), ["one\n", "two\n"]);
    }

    #[test]
    fn test_file_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        {
            let mut sink = FileSink::append(&path).unwrap();
            sink.write("first\n").unwrap();
            sink.end().unwrap();
        }
        {
            let mut sink = FileSink::append(&path).unwrap();
            sink.write("second\n").unwrap();
            sink.end().unwrap();
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn test_file_sink_open_failure_is_loud() {
        let result = FileSink::append("/definitely/not/a/dir/out.log");
        assert!(result.is_err());
    }
}
