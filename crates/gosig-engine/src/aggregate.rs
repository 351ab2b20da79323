use gosig_core::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::walker::{RootWalk, TreeWalker};

/// Every configured directory holds its sources in this subdirectory.
pub const SOURCE_DIR: &str = "src";

/// Where to look for source roots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfig {
    /// Workspace directories in search order, GOPATH style.
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
    /// Toolchain installation directory, GOROOT style.
    #[serde(default)]
    pub runtime_root: Option<PathBuf>,
}

impl RootConfig {
    /// Build a config from a platform path list (`:`-separated on Unix).
    /// Empty entries are dropped.
    pub fn from_search_path(search_path: Option<&str>, runtime_root: Option<PathBuf>) -> Self {
        let search_paths = search_path
            .map(|value| {
                std::env::split_paths(value)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self {
            search_paths,
            runtime_root: runtime_root.filter(|p| !p.as_os_str().is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search_paths.is_empty() && self.runtime_root.is_none()
    }

    /// The walk roots: each search path's source dir, then the runtime's.
    pub fn roots(&self) -> Vec<PathBuf> {
        self.search_paths
            .iter()
            .chain(self.runtime_root.iter())
            .map(|dir| dir.join(SOURCE_DIR))
            .collect()
    }
}

/// The outcome of walking one configured root.
#[derive(Debug)]
pub struct RootReport {
    pub root: PathBuf,
    pub result: Result<RootWalk>,
}

/// Runs the [`TreeWalker`] over every configured root in order.
pub struct Aggregator {
    config: RootConfig,
    walker: TreeWalker,
}

impl Aggregator {
    pub fn new(config: RootConfig) -> Self {
        Self::with_walker(config, TreeWalker::default())
    }

    pub fn with_walker(config: RootConfig, walker: TreeWalker) -> Self {
        Self { config, walker }
    }

    pub fn config(&self) -> &RootConfig {
        &self.config
    }

    /// Walk every root. A root that cannot be listed is reported in its own
    /// [`RootReport`] and does not stop the roots after it.
    pub fn run(&self) -> Vec<RootReport> {
        if self.config.is_empty() {
            tracing::info!("no source roots configured");
            return Vec::new();
        }
        self.config
            .roots()
            .into_iter()
            .map(|root| self.walk_root(root))
            .collect()
    }

    fn walk_root(&self, root: PathBuf) -> RootReport {
        let result = self.walker.walk(&root);
        if let Err(e) = &result {
            tracing::warn!(root = %root.display(), error = %e, "failed to walk root");
        }
        RootReport { root, result }
    }
}
