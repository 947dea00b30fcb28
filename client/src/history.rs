use chrono::Local;
use ringbuffer::{AllocRingBuffer, RingBuffer};

/// Recent game events, oldest dropped first.
pub struct EventHistory {
    entries: AllocRingBuffer<String>,
}

impl EventHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: AllocRingBuffer::new(capacity.max(1)),
        }
    }

    pub fn push(&mut self, message: impl AsRef<str>) {
        let timestamp = Local::now().format("%H:%M:%S");
        self.entries
            .enqueue(format!("[{}] {}", timestamp, message.as_ref()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }
}
