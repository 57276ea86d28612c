use serde::Serialize;
use std::fmt;

const SEPARATOR: char = '.';

/// Dotted logical name of a definition (`"data.repo_x"`).
///
/// The root path is the empty string. Module paths are prefixes of the
/// paths of the definitions they declare.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct Path(String);

impl Path {
    pub fn new(path: impl Into<String>) -> Self {
        let raw: String = path.into();
        // Normalise stray separators so "a..b." and "a.b" name the same thing.
        let joined = raw
            .split(SEPARATOR)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(".");
        Path(joined)
    }

    pub fn root() -> Self {
        Path(String::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Appends `other` below this path.
    pub fn join(&self, other: &Path) -> Path {
        match (self.is_root(), other.is_root()) {
            (true, _) => other.clone(),
            (false, true) => self.clone(),
            (false, false) => Path(format!("{}{}{}", self.0, SEPARATOR, other.0)),
        }
    }

    /// The enclosing path, or `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        if self.is_root() {
            return None;
        }
        Some(match self.0.rfind(SEPARATOR) {
            Some(idx) => Path(self.0[..idx].to_string()),
            None => Path::root(),
        })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<&str> for Path {
    fn from(value: &str) -> Self {
        Path::new(value)
    }
}

impl From<String> for Path {
    fn from(value: String) -> Self {
        Path::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalises_separators() {
        assert_eq!(Path::new("data..repo."), Path::new("data.repo"));
        assert!(Path::new("...").is_root());
    }

    #[test]
    fn test_join_and_parent() {
        let module = Path::new("data");
        let full = module.join(&Path::new("repo_x"));
        assert_eq!(full.as_str(), "data.repo_x");
        assert_eq!(full.parent(), Some(module.clone()));
        assert_eq!(module.parent(), Some(Path::root()));
        assert_eq!(Path::root().parent(), None);
        assert_eq!(Path::root().join(&module), module);
    }

    #[test]
    fn test_display_root() {
        assert_eq!(Path::root().to_string(), "<root>");
        assert_eq!(Path::new("a.b").segments().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
