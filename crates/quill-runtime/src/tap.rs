use std::collections::VecDeque;
use std::fmt;

/// Default number of lines a tap buffers before a consumer attaches.
pub const DEFAULT_TAP_CAPACITY: usize = 256;

/// Bounded FIFO buffer between emission and an optional consumer.
///
/// Lines emitted before a consumer attaches are queued up to the capacity;
/// overflow drops the oldest line, so an attaching consumer sees the most
/// recent history. Attaching flushes the queue in FIFO order exactly once,
/// then every later line goes straight to the consumer.
pub struct Tap {
    queue: VecDeque<String>,
    capacity: usize,
    consumer: Option<Box<dyn FnMut(&str) + Send>>,
}

impl Tap {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            capacity,
            consumer: None,
        }
    }

    pub fn push(&mut self, line: &str) {
        match &mut self.consumer {
            Some(consumer) => consumer(line),
            None => {
                if self.capacity == 0 {
                    return;
                }
                if self.queue.len() == self.capacity {
                    self.queue.pop_front();
                }
                self.queue.push_back(line.to_string());
            }
        }
    }

    pub fn attach(&mut self, mut consumer: Box<dyn FnMut(&str) + Send>) {
        for line in self.queue.drain(..) {
            consumer(&line);
        }
        self.consumer = Some(consumer);
    }

    pub fn detach(&mut self) {
        self.consumer = None;
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

impl Default for Tap {
    fn default() -> Self {
        Self::new(DEFAULT_TAP_CAPACITY)
    }
}

impl fmt::Debug for Tap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tap")
            .field("queued", &self.queue.len())
            .field("capacity", &self.capacity)
            .field("attached", &self.consumer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn collector() -> (Arc<Mutex<Vec<String>>>, Box<dyn FnMut(&str) + Send>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let consumer = Box::new(move |line: &str| {
            sink.lock().unwrap().push(line.to_string());
        });
        (seen, consumer)
    }

    #[test]
    fn test_attach_flushes_fifo_exactly_once() {
        let mut tap = Tap::new(8);
        tap.push("a\n");
        tap.push("b\n");

        let (seen, consumer) = collector();
        tap.attach(consumer);
        assert_eq!(seen.lock().unwrap().as_slice(), ["a\n", "b\n"]);
        assert_eq!(tap.queued(), 0);

        tap.push("c\n");
        assert_eq!(seen.lock().unwrap().as_slice(), ["a\n", "b\n", "c\n"]);
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let mut tap = Tap::new(2);
        tap.push("a\n");
        tap.push("b\n");
        tap.push("c\n");

        let (seen, consumer) = collector();
        tap.attach(consumer);
        assert_eq!(seen.lock().unwrap().as_slice(), ["b\n", "c\n"]);
    }

    #[test]
    fn test_detach_resumes_buffering() {
        let mut tap = Tap::new(4);
        let (seen, consumer) = collector();
        tap.attach(consumer);
        tap.push("a\n");
        tap.detach();
        tap.push("b\n");
        assert_eq!(seen.lock().unwrap().as_slice(), ["a\n"]);
        assert_eq!(tap.queued(), 1);
    }
}
