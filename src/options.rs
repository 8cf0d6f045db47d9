// std imports
use std::collections::BTreeMap;

// third-party imports
use serde::{Deserialize, Serialize};

// ---

/// Describes a named option recognized by a stream handler.
///
/// Values are strings; interpretation is up to the declaring handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDecl {
    pub name: &'static str,
    pub default: Option<&'static str>,
    pub help: &'static str,
}

// ---

/// A bag of named option values passed to stream handlers at open time.
///
/// Handlers take the options they recognize and pass the rest on to the
/// inner open, so unrecognized options surface at the innermost handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(BTreeMap<String, String>);

impl Options {
    /// Creates an empty bag.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option value, returning the bag for chaining.
    #[inline]
    pub fn with<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.set(name, value);
        self
    }

    /// Sets an option value, replacing any previous value.
    #[inline]
    pub fn set<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.0.insert(name.into(), value.into());
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|v| v.as_str())
    }

    /// Removes and returns an option value.
    #[inline]
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over option names in lexicographical order.
    #[inline]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }
}

// ---
