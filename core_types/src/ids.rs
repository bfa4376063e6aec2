//! Document identifiers
//!
//! A document identifier is either the bare root token (the hosting
//! application's namespace) or the root token followed by a `/`-separated
//! relative path: `root/docs/notes.txt`.
//!
//! Identifiers are parsed once and carried around as [`DocumentId`], so the
//! rest of the system never slices identifier strings by hand.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between the root token and path segments
pub const SEPARATOR: char = '/';

/// Errors produced while parsing or deriving identifiers
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    /// Identifier string was empty
    #[error("Empty document id")]
    Empty,

    /// The root token before the first separator is empty
    #[error("Missing root token: {0}")]
    MissingRoot(String),

    /// A path segment is not a valid entry name
    #[error("Invalid segment {segment:?} in {id}")]
    InvalidSegment { id: String, segment: String },

    /// A name supplied for a child or rename is not a valid entry name
    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    /// The root identifier has no leaf segment to replace
    #[error("Root document has no leaf name")]
    RootHasNoLeaf,
}

/// Returns true if `name` can be used as a single entry name
///
/// Rejects empty names, `.`, `..`, and anything containing `/` or NUL.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(SEPARATOR)
        && !name.contains('\0')
}

/// Identifier of a document in the exposed tree
///
/// Formats back to exactly `root` or `root/seg/.../seg`, so the string form
/// round-trips through [`DocumentId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId {
    root: String,
    segments: Vec<String>,
}

impl DocumentId {
    /// Creates the root identifier for `token`
    pub fn root(token: impl Into<String>) -> Result<Self, IdError> {
        let token = token.into();
        if token.is_empty() {
            return Err(IdError::Empty);
        }
        if !is_valid_name(&token) {
            return Err(IdError::InvalidName(token));
        }
        Ok(Self {
            root: token,
            segments: Vec::new(),
        })
    }

    /// Parses an identifier string
    ///
    /// The root token is everything before the first `/`. A single trailing
    /// `/` is accepted and dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::DocumentId;
    ///
    /// let id = DocumentId::parse("app/docs/todo.txt").unwrap();
    /// assert_eq!(id.root_token(), "app");
    /// assert_eq!(id.leaf_name(), Some("todo.txt"));
    ///
    /// assert!(DocumentId::parse("app/").unwrap().is_root());
    /// assert!(DocumentId::parse("app/../etc").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        if raw.is_empty() {
            return Err(IdError::Empty);
        }
        let trimmed = raw.strip_suffix(SEPARATOR).unwrap_or(raw);

        let (root, rest) = match trimmed.split_once(SEPARATOR) {
            Some((root, rest)) => (root, Some(rest)),
            None => (trimmed, None),
        };
        if root.is_empty() {
            return Err(IdError::MissingRoot(raw.to_string()));
        }
        if root.contains('\0') || root == "." || root == ".." {
            return Err(IdError::InvalidSegment {
                id: raw.to_string(),
                segment: root.to_string(),
            });
        }

        let mut segments = Vec::new();
        if let Some(rest) = rest {
            for segment in rest.split(SEPARATOR) {
                if !is_valid_name(segment) {
                    return Err(IdError::InvalidSegment {
                        id: raw.to_string(),
                        segment: segment.to_string(),
                    });
                }
                segments.push(segment.to_string());
            }
        }

        Ok(Self {
            root: root.to_string(),
            segments,
        })
    }

    /// The root token this identifier lives under
    pub fn root_token(&self) -> &str {
        &self.root
    }

    /// True for the bare root identifier
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path segments below the root, outermost first
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Relative path below the base directory, `/`-joined
    ///
    /// Empty for the root.
    pub fn relative_path(&self) -> String {
        self.segments.join("/")
    }

    /// Last path segment, or `None` for the root
    pub fn leaf_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Structural parent, or `None` for the root
    pub fn parent(&self) -> Option<DocumentId> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            root: self.root.clone(),
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Identifier of the child entry `name`
    pub fn child(&self, name: &str) -> Result<DocumentId, IdError> {
        if !is_valid_name(name) {
            return Err(IdError::InvalidName(name.to_string()));
        }
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Ok(Self {
            root: self.root.clone(),
            segments,
        })
    }

    /// Identifier of the sibling entry `name`
    ///
    /// Replaces the leaf segment; fails for the root.
    pub fn with_leaf_name(&self, name: &str) -> Result<DocumentId, IdError> {
        if self.is_root() {
            return Err(IdError::RootHasNoLeaf);
        }
        if !is_valid_name(name) {
            return Err(IdError::InvalidName(name.to_string()));
        }
        let mut segments = self.segments.clone();
        let last = segments.len() - 1;
        segments[last] = name.to_string();
        Ok(Self {
            root: self.root.clone(),
            segments,
        })
    }

    /// True if `self` lies at or below `ancestor`
    ///
    /// Containment is checked per segment, so `app/ab` is not below `app/a`.
    pub fn is_descendant_of(&self, ancestor: &DocumentId) -> bool {
        self.root == ancestor.root && self.segments.starts_with(&ancestor.segments)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for segment in &self.segments {
            write!(f, "{}{}", SEPARATOR, segment)?;
        }
        Ok(())
    }
}

impl FromStr for DocumentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        let id = DocumentId::parse("com.example.app").unwrap();
        assert!(id.is_root());
        assert_eq!(id.root_token(), "com.example.app");
        assert_eq!(id.leaf_name(), None);
        assert_eq!(id.relative_path(), "");
    }

    #[test]
    fn test_parse_nested() {
        let id = DocumentId::parse("app/docs/notes/todo.txt").unwrap();
        assert_eq!(id.segments(), &["docs", "notes", "todo.txt"]);
        assert_eq!(id.relative_path(), "docs/notes/todo.txt");
        assert_eq!(id.to_string(), "app/docs/notes/todo.txt");
    }

    #[test]
    fn test_parse_trailing_slash() {
        assert_eq!(DocumentId::parse("app/").unwrap().to_string(), "app");
        assert_eq!(DocumentId::parse("app/docs/").unwrap().to_string(), "app/docs");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(DocumentId::parse(""), Err(IdError::Empty));
        assert!(matches!(
            DocumentId::parse("/docs"),
            Err(IdError::MissingRoot(_))
        ));
        assert!(matches!(
            DocumentId::parse("app//docs"),
            Err(IdError::InvalidSegment { .. })
        ));
        assert!(matches!(
            DocumentId::parse("app/docs/../../etc"),
            Err(IdError::InvalidSegment { .. })
        ));
        assert!(matches!(
            DocumentId::parse("app/./docs"),
            Err(IdError::InvalidSegment { .. })
        ));
        assert!(matches!(
            DocumentId::parse(".."),
            Err(IdError::InvalidSegment { .. })
        ));
    }

    #[test]
    fn test_parent() {
        let id = DocumentId::parse("app/a/b").unwrap();
        let parent = id.parent().unwrap();
        assert_eq!(parent.to_string(), "app/a");
        assert_eq!(parent.parent().unwrap().to_string(), "app");
        assert!(parent.parent().unwrap().parent().is_none());
    }

    #[test]
    fn test_child_never_doubles_separator() {
        let root = DocumentId::parse("app/").unwrap();
        assert_eq!(root.child("docs").unwrap().to_string(), "app/docs");

        let dir = DocumentId::parse("app/docs/").unwrap();
        assert_eq!(dir.child("a.txt").unwrap().to_string(), "app/docs/a.txt");
    }

    #[test]
    fn test_child_rejects_bad_names() {
        let root = DocumentId::root("app").unwrap();
        assert!(matches!(root.child(".."), Err(IdError::InvalidName(_))));
        assert!(matches!(root.child("a/b"), Err(IdError::InvalidName(_))));
        assert!(matches!(root.child(""), Err(IdError::InvalidName(_))));
    }

    #[test]
    fn test_with_leaf_name() {
        let id = DocumentId::parse("app/docs/old.txt").unwrap();
        let renamed = id.with_leaf_name("new.txt").unwrap();
        assert_eq!(renamed.to_string(), "app/docs/new.txt");
        assert_eq!(renamed.parent(), id.parent());

        let root = DocumentId::root("app").unwrap();
        assert_eq!(root.with_leaf_name("x"), Err(IdError::RootHasNoLeaf));
    }

    #[test]
    fn test_rename_then_child_composes() {
        let id = DocumentId::parse("app/a/b").unwrap();
        let composed = id.with_leaf_name("x").unwrap().child("y").unwrap();
        assert_eq!(composed.to_string(), "app/a/x/y");
    }

    #[test]
    fn test_is_descendant_of() {
        let a = DocumentId::parse("app/a").unwrap();
        let ab = DocumentId::parse("app/ab").unwrap();
        let a_b = DocumentId::parse("app/a/b").unwrap();
        let root = DocumentId::root("app").unwrap();
        let other = DocumentId::parse("other/a/b").unwrap();

        assert!(a_b.is_descendant_of(&a));
        assert!(a_b.is_descendant_of(&root));
        assert!(a.is_descendant_of(&a));
        assert!(!ab.is_descendant_of(&a));
        assert!(!a.is_descendant_of(&a_b));
        assert!(!other.is_descendant_of(&root));
    }

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("todo.txt"));
        assert!(is_valid_name(".hidden"));
        assert!(is_valid_name("with space"));

        assert!(!is_valid_name(""));
        assert!(!is_valid_name("."));
        assert!(!is_valid_name(".."));
        assert!(!is_valid_name("has/slash"));
        assert!(!is_valid_name("has\0null"));
    }

    #[test]
    fn test_serde_as_string() {
        let id = DocumentId::parse("app/docs/a.txt").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"app/docs/a.txt\"");

        let back: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        let bad: Result<DocumentId, _> = serde_json::from_str("\"app/../x\"");
        assert!(bad.is_err());
    }
}
