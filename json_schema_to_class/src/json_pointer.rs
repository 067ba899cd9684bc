//! JSON Pointer paths (RFC 6901) locating nodes inside a schema document.
//!
//! Segments are `/`-separated, with `~` escaped as `~0` and `/` escaped as `~1`.
//! The document root is the empty pointer.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPointer(String);

impl JsonPointer {
    /// The pointer to the document root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new pointer one segment below `self`.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut path: String = self.0.clone();
        path.push('/');
        for c in segment.chars() {
            match c {
                '~' => path.push_str("~0"),
                '/' => path.push_str("~1"),
                other => path.push(other),
            }
        }
        Self(path)
    }

    /// Returns a new pointer two segments below `self`, e.g. `properties` then a key.
    #[must_use]
    pub fn child2(&self, first: &str, second: &str) -> Self {
        self.child(first).child(second)
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
