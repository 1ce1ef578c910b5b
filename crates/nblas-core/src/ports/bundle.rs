//! Resource bundle port.
//!
//! The bundle is the read-only collection of platform/flavor-specific
//! native artifacts shipped alongside the library. The provisioner probes
//! it at each candidate path in resolver order.

use std::collections::HashMap;
use std::io::{Cursor, Read};

/// Read-only lookup of packaged native artifacts.
///
/// Absence is `None`, not an error: the provisioner probes several
/// candidate paths and misses are expected.
pub trait ResourceBundle: Send + Sync {
    /// Open a readable byte stream at `path`, or `None` if the bundle has
    /// no entry there.
    fn open(&self, path: &str) -> Option<Box<dyn Read + Send>>;
}

/// In-memory bundle backed by a path → bytes map.
///
/// Used by tests and by embedders that compile artifacts into the binary.
#[derive(Debug, Default, Clone)]
pub struct StaticBundle {
    entries: HashMap<String, Vec<u8>>,
}

impl StaticBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any previous bytes at the same path.
    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.entries.insert(path.into(), bytes.into());
        self
    }

    /// Number of entries in the bundle.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceBundle for StaticBundle {
    fn open(&self, path: &str) -> Option<Box<dyn Read + Send>> {
        self.entries
            .get(path)
            .map(|bytes| Box::new(Cursor::new(bytes.clone())) as Box<dyn Read + Send>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_returns_none_for_missing_entries() {
        let bundle = StaticBundle::new();
        assert!(bundle.open("/lib/static/Linux/x86_64/libnblas.so").is_none());
    }

    #[test]
    fn open_yields_the_inserted_bytes() {
        let mut bundle = StaticBundle::new();
        bundle.insert("/lib/dynamic/Linux/x86_64/libnblas.so", vec![1, 2, 3]);

        let mut reader = bundle
            .open("/lib/dynamic/Linux/x86_64/libnblas.so")
            .expect("entry should exist");
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).expect("read");
        assert_eq!(bytes, vec![1, 2, 3]);
    }
}
