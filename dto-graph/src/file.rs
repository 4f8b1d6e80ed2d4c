use std::path::{Path, PathBuf};

use crate::{Result, TypeGraph};

/// A snapshot file with both raw content and the parsed graph.
pub struct SnapshotFile {
    path: PathBuf,
    content: String,
    graph: TypeGraph,
}

impl SnapshotFile {
    /// Open and parse a snapshot file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let graph = TypeGraph::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            graph,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed graph.
    pub fn graph(&self) -> &TypeGraph {
        &self.graph
    }

    /// Consume the file, keeping only the parsed graph.
    pub fn into_graph(self) -> TypeGraph {
        self.graph
    }
}
