use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::model::{GraphDataset, Level};
use super::parse::parse_dataset;

/// The fetch port: one call per navigation scope, returning a parsed but
/// not yet transformed dataset. Implemented over the filesystem here;
/// tests substitute their own sources.
pub trait DatasetSource: Send + Sync {
    fn fetch(&self, level: &Level) -> Result<GraphDataset>;
}

/// Reads dataset documents from a directory: `repos_graph.json` for the top
/// level and one `<scope>.json` per repository, with `/` in scope ids
/// flattened to `__` to keep file names path-safe.
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_name(level: &Level) -> String {
        match level {
            Level::Top => "repos_graph.json".to_string(),
            Level::Module(scope) => format!("{}.json", scope.replace('/', "__")),
        }
    }
}

impl DatasetSource for FileSource {
    fn fetch(&self, level: &Level) -> Result<GraphDataset> {
        let path = self.dir.join(Self::file_name(level));
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read dataset file {}", path.display()))?;
        parse_dataset(&raw)
            .with_context(|| format!("failed to parse dataset file {}", path.display()))
    }
}
