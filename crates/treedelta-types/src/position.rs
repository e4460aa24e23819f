use std::fmt;

use serde::{Deserialize, Serialize};

/// The address of a child within its immediate parent.
///
/// A position only ever compares against siblings of the same container
/// kind. The derived ordering is lexicographic for names and numeric for
/// indices; across variants it places every index before every name, which
/// no caller relies on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    /// Element of an array.
    Index(usize),
    /// Member of an object.
    Name(String),
}

impl Position {
    pub fn name(name: impl Into<String>) -> Self {
        Position::Name(name.into())
    }

    pub fn index(index: usize) -> Self {
        Position::Index(index)
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Position::Index(i) => Some(*i),
            Position::Name(_) => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Position::Name(name) => Some(name),
            Position::Index(_) => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Name(name) => f.write_str(name),
            Position::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Position {
    fn from(name: &str) -> Self {
        Position::Name(name.to_owned())
    }
}

impl From<usize> for Position {
    fn from(index: usize) -> Self {
        Position::Index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_order_lexicographically() {
        assert!(Position::name("bar") < Position::name("foo"));
        assert!(Position::name("a") < Position::name("ab"));
    }

    #[test]
    fn indices_order_numerically() {
        assert!(Position::index(2) < Position::index(10));
    }

    #[test]
    fn display() {
        assert_eq!(Position::name("key").to_string(), "key");
        assert_eq!(Position::index(7).to_string(), "7");
    }

    #[test]
    fn accessors() {
        assert_eq!(Position::index(3).as_index(), Some(3));
        assert_eq!(Position::index(3).as_name(), None);
        assert_eq!(Position::name("k").as_name(), Some("k"));
    }

    #[test]
    fn serializes_as_bare_json() {
        assert_eq!(serde_json::to_string(&Position::index(4)).unwrap(), "4");
        assert_eq!(serde_json::to_string(&Position::name("x")).unwrap(), "\"x\"");
        let parsed: Position = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(parsed, Position::name("x"));
    }
}
