//! Token names and case-insensitive token maps.

use std::cmp::Ordering;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use bytes::Bytes;

use crate::error::TokenError;

/// An ISUPPORT token name.
///
/// Equality and ordering ignore ASCII case, so `NETWORK` and `network` name the
/// same token and sort together.
#[derive(Clone, Debug)]
pub struct TokenName(String);

impl TokenName {
    /// Wrap a name without validating it.
    pub fn new(name: impl Into<String>) -> Self {
        TokenName(name.into())
    }

    /// The name as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that the name can be advertised.
    ///
    /// Names are non-empty printable ASCII without `=`. They must not start
    /// with `-` (that prefix marks removals in a difference) or `:` (a middle
    /// parameter starting with `:` would swallow the rest of the line).
    pub fn validate(&self) -> Result<(), TokenError> {
        let bytes = self.0.as_bytes();
        if bytes.is_empty() {
            return Err(TokenError::Empty);
        }
        if bytes[0] == b'-' {
            return Err(TokenError::LeadingDash(self.0.clone()));
        }
        if bytes[0] == b':' {
            return Err(TokenError::LeadingColon(self.0.clone()));
        }
        if let Some(&byte) = bytes.iter().find(|&&b| !(0x21..=0x7E).contains(&b) || b == b'=') {
            return Err(TokenError::InvalidByte {
                name: self.0.clone(),
                byte,
            });
        }
        Ok(())
    }

    /// The removal marker for this token (`-NAME`).
    pub fn removal(&self) -> TokenName {
        TokenName(format!("-{}", self.0))
    }

    /// If this is a removal marker, the name of the removed token.
    pub fn removed(&self) -> Option<&str> {
        self.0.strip_prefix('-')
    }

    fn folded(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.bytes().map(|b| b.to_ascii_lowercase())
    }
}

impl PartialEq for TokenName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for TokenName {}

impl PartialOrd for TokenName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TokenName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(other.folded())
    }
}

impl fmt::Display for TokenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenName {
    fn from(name: &str) -> Self {
        TokenName(name.to_string())
    }
}

impl From<String> for TokenName {
    fn from(name: String) -> Self {
        TokenName(name)
    }
}

/// A set of ISUPPORT tokens keyed by case-insensitive name.
///
/// Iteration follows case-insensitive lexicographic order of the names. That
/// order is what clients see on the wire, so it never depends on insertion
/// order. An empty value means the token is advertised bare (`NAME`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenMap {
    tokens: BTreeMap<TokenName, Bytes>,
}

impl TokenMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a token, returning the previous value.
    ///
    /// Overwriting keeps the spelling of the name that was inserted first.
    pub fn insert(&mut self, name: impl Into<TokenName>, value: impl Into<Bytes>) -> Option<Bytes> {
        self.tokens.insert(name.into(), value.into())
    }

    /// Insert a token without a value.
    pub fn insert_flag(&mut self, name: impl Into<TokenName>) -> Option<Bytes> {
        self.insert(name, Bytes::new())
    }

    /// Remove a token, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Bytes> {
        self.tokens.remove(&TokenName::from(name))
    }

    /// Look up a token's value.
    pub fn get(&self, name: &str) -> Option<&Bytes> {
        self.tokens.get(&TokenName::from(name))
    }

    /// Whether the token is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the map holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over tokens in wire order.
    pub fn iter(&self) -> btree_map::Iter<'_, TokenName, Bytes> {
        self.tokens.iter()
    }

    /// Keep only the tokens for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&TokenName, &Bytes) -> bool) {
        self.tokens.retain(|name, value| keep(name, value));
    }
}

impl<'a> IntoIterator for &'a TokenMap {
    type Item = (&'a TokenName, &'a Bytes);
    type IntoIter = btree_map::Iter<'a, TokenName, Bytes>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl<N: Into<TokenName>, V: Into<Bytes>> FromIterator<(N, V)> for TokenMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = TokenMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}
