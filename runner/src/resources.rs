//! Read-only lookup over the executable's embedded payload table.

use husk_types::ResourceKey;

/// Lookup service for payloads bundled into the running executable.
///
/// The runner takes this as an explicit dependency so tests can substitute
/// a fake table for the binary's real one.
pub trait ResourceProvider {
    /// Resolve `key` to its payload bytes, or `None` if the key/kind pair
    /// is absent from the table.
    fn lookup(&self, key: &ResourceKey) -> Option<&[u8]>;
}

impl<T: ResourceProvider + ?Sized> ResourceProvider for &T {
    fn lookup(&self, key: &ResourceKey) -> Option<&[u8]> {
        (**self).lookup(key)
    }
}

/// Provider backed by a compile-time table of embedded blobs.
#[derive(Debug, Default)]
pub struct StaticResources {
    entries: Vec<(ResourceKey, &'static [u8])>,
}

impl StaticResources {
    #[must_use]
    pub fn new(entries: Vec<(ResourceKey, &'static [u8])>) -> Self {
        Self { entries }
    }

    pub fn insert(&mut self, key: ResourceKey, bytes: &'static [u8]) {
        self.entries.push((key, bytes));
    }
}

impl ResourceProvider for StaticResources {
    fn lookup(&self, key: &ResourceKey) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, bytes)| *bytes)
    }
}
