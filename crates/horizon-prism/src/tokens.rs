//! String-literal token storage.
//!
//! Earlier pipeline stages replace quoted string literals with opaque
//! labels so later passes never re-parse quoting. This store maps labels
//! back to their original text. Handles are cheap to clone and share one
//! underlying map, so the stage that tokenizes literals and the function
//! handlers that de-reference them can hold the same store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// Prefix carried by every string token label.
pub const TOKEN_PREFIX: &str = "___s";

#[derive(Debug, Default)]
struct Store {
    entries: HashMap<String, String>,
    next_id: usize,
}

/// Shared map from string-token labels to their original quoted text.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Store>>,
}

impl TokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a string literal and return its label.
    pub fn store(&self, value: impl Into<String>) -> String {
        let mut store = self.inner.write();
        store.next_id += 1;
        let label = format!("{}{}___", TOKEN_PREFIX, store.next_id);
        store.entries.insert(label.clone(), value.into());
        label
    }

    /// Fetch the literal text behind a label.
    pub fn get(&self, label: &str) -> Option<String> {
        self.inner.read().entries.get(label).cloned()
    }

    /// Whether the input starts with the token label prefix.
    pub fn is_token(&self, input: &str) -> bool {
        input.starts_with(TOKEN_PREFIX)
    }

    /// Replace every stored label in the input with its literal text, then
    /// trim surrounding quote characters from the result.
    pub fn resolve(&self, input: &str) -> String {
        let store = self.inner.read();
        let mut resolved = input.to_string();
        for (label, value) in &store.entries {
            resolved = resolved.replace(label.as_str(), value);
        }
        resolved
            .trim_matches(|c| c == '\'' || c == '"' || c == '`')
            .to_string()
    }

    /// Number of stored tokens.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Whether the store holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
