use crate::path::Path;
use serde::{Deserialize, Serialize};

/// Where a transform or traversal applies: one node, or every node between
/// two paths in document order (both ends included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    Path(Path),
    Span(Path, Path),
}

impl Location {
    pub fn span(from: Path, to: Path) -> Self {
        Location::Span(from, to)
    }

    pub fn is_path(&self) -> bool {
        matches!(self, Location::Path(_))
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Location::Path(path) => Some(path),
            Location::Span(..) => None,
        }
    }

    /// First path covered by the location.
    pub fn start(&self) -> &Path {
        match self {
            Location::Path(path) | Location::Span(path, _) => path,
        }
    }

    /// Last path covered by the location.
    pub fn end(&self) -> &Path {
        match self {
            Location::Path(path) | Location::Span(_, path) => path,
        }
    }
}

impl From<Path> for Location {
    fn from(path: Path) -> Self {
        Location::Path(path)
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Location::Path(path.clone())
    }
}

impl From<(Path, Path)> for Location {
    fn from((from, to): (Path, Path)) -> Self {
        Location::Span(from, to)
    }
}
