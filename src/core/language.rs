use std::collections::HashMap;

/// Immutable mapping from a language code to a display string. Built once at
/// process start; a lookup miss yields `None`, never an error.
pub struct LanguageTable {
    entries: HashMap<&'static str, &'static str>,
}

impl LanguageTable {
    /// Greeting fragments served by the hello leaf.
    pub fn hello() -> Self {
        Self::from_entries(&[("en", "Hello"), ("fr", "Bonjour"), ("es", "Ola")])
    }

    /// Recipient fragments served by the world leaf.
    pub fn world() -> Self {
        Self::from_entries(&[("en", "World"), ("fr", "Monde"), ("es", "Mundo")])
    }

    fn from_entries(entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            entries: entries.iter().copied().collect(),
        }
    }

    pub fn lookup(&self, code: &str) -> Option<&'static str> {
        self.entries.get(code).copied()
    }
}
