//! Bearer-token registry.
//!
//! Tokens are configured as `role:token` pairs. Only the SHA-256 digest of
//! each token is kept after parsing.

use std::collections::HashMap;
use std::fmt;

use turbine_core::hashing::sha256_hex;

/// Error produced while parsing a token specification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenSpecError {
    #[error("token entry '{0}' must have the form role:token")]
    Malformed(String),

    #[error("no API tokens configured")]
    Empty,

    #[error("duplicate token configured for role '{0}'")]
    Duplicate(String),
}

/// In-memory set of accepted bearer tokens, keyed by digest.
#[derive(Clone, Default, PartialEq)]
pub struct TokenRegistry {
    by_hash: HashMap<String, String>,
}

impl TokenRegistry {
    /// Parse a comma-separated `role:token` list.
    ///
    /// Whitespace around entries is ignored. At least one entry is required.
    pub fn parse(spec: &str) -> Result<Self, TokenSpecError> {
        let mut registry = Self::default();
        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (role, token) = entry
                .split_once(':')
                .map(|(r, t)| (r.trim(), t.trim()))
                .filter(|(r, t)| !r.is_empty() && !t.is_empty())
                .ok_or_else(|| TokenSpecError::Malformed(redact(entry)))?;
            if !registry.insert(role, token) {
                return Err(TokenSpecError::Duplicate(role.to_string()));
            }
        }
        if registry.is_empty() {
            return Err(TokenSpecError::Empty);
        }
        Ok(registry)
    }

    /// Register `token` for `role`. Returns `false` if the token is already known.
    pub fn insert(&mut self, role: &str, token: &str) -> bool {
        let hash = sha256_hex(token.as_bytes());
        if self.by_hash.contains_key(&hash) {
            return false;
        }
        self.by_hash.insert(hash, role.to_string());
        true
    }

    /// Role bound to `token`, if the token is accepted.
    pub fn authenticate(&self, token: &str) -> Option<&str> {
        self.by_hash
            .get(&sha256_hex(token.as_bytes()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }
}

impl fmt::Debug for TokenRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRegistry")
            .field("tokens", &self.by_hash.len())
            .finish()
    }
}

/// Keep the role part of a malformed entry and hide anything token-like.
fn redact(entry: &str) -> String {
    match entry.split_once(':') {
        Some((role, _)) => format!("{role}:***"),
        None => "***".to_string(),
    }
}
