//! Memoized transform-string parse results.

use hashbrown::HashMap;

use crate::parse::parse_xform;
use crate::transform::Xform;

/// A lookup table from transform-string literals to parsed transforms.
///
/// Grammars reference the same transform strings from many sites, so each
/// distinct literal is parsed once and cached under the exact input string.
/// Entries are never invalidated within a run. The cache is an explicit
/// owned value, passed by reference wherever it is consumed.
///
/// # Example
///
/// ```
/// use lsys_xform::XformCache;
///
/// let mut cache = XformCache::new();
/// let a = cache.parse("rz 5.6 tx 0.1 sa 0.996");
/// let b = cache.parse("rz 5.6 tx 0.1 sa 0.996");
/// assert_eq!(a, b);
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct XformCache {
    map: HashMap<String, Xform>,
}

impl XformCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `s`, memoizing the result under the exact literal string.
    ///
    /// A second call with the same string returns the cached transform
    /// without re-parsing. The empty string caches the identity like any
    /// other literal.
    pub fn parse(&mut self, s: &str) -> Xform {
        if let Some(cached) = self.map.get(s) {
            return *cached;
        }
        let xform = parse_xform(s);
        self.map.insert(s.to_owned(), xform);
        xform
    }

    /// Look up a previously parsed literal.
    #[must_use]
    pub fn get(&self, s: &str) -> Option<Xform> {
        self.map.get(s).copied()
    }

    /// `true` if `s` has been parsed into this cache.
    #[must_use]
    pub fn contains(&self, s: &str) -> bool {
        self.map.contains_key(s)
    }

    /// Number of distinct literals cached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// `true` if nothing has been cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix4;

    #[test]
    fn empty_string_caches_identity() {
        let mut cache = XformCache::new();
        let first = cache.parse("");
        let second = cache.parse("");

        assert_eq!(*first.matrix(), Matrix4::identity());
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_literals_get_distinct_entries() {
        let mut cache = XformCache::new();
        cache.parse("tx 1");
        cache.parse("tx 1 ");
        cache.parse("tx 1");

        // Keys are exact literals: trailing whitespace is a new entry.
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn get_misses_before_parse() {
        let mut cache = XformCache::new();
        assert!(cache.get("tx 1").is_none());
        cache.parse("tx 1");
        assert!(cache.get("tx 1").is_some());
        assert!(cache.contains("tx 1"));
    }
}
