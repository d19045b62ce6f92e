//! The channel a session reads and writes fragments through.
//!
//! In a browser this is the location hash; here it is a trait so the protocol
//! can run against any carrier, including the in-memory one below.

pub trait Transport {
    /// The current fragment, if any.
    fn read(&self) -> Option<String>;

    /// Replace the current fragment.
    fn write(&mut self, fragment: &str);
}

/// Transport backed by a string in memory. Keeps every write, oldest first.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    current: Option<String>,
    writes: Vec<String>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a fragment already present, as when a shared link is opened.
    pub fn with_fragment(fragment: impl Into<String>) -> Self {
        Self {
            current: Some(fragment.into()),
            writes: Vec::new(),
        }
    }

    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    pub fn last_write(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }
}

impl Transport for MemoryTransport {
    fn read(&self) -> Option<String> {
        self.current.clone()
    }

    fn write(&mut self, fragment: &str) {
        self.current = Some(fragment.to_owned());
        self.writes.push(fragment.to_owned());
    }
}
