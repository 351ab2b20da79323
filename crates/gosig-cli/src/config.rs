use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use gosig_engine::RootConfig;

/// Load a TOML root configuration, e.g.
///
/// ```toml
/// search_paths = ["/home/me/go"]
/// runtime_root = "/usr/local/go"
/// ```
pub fn load(path: &Path) -> Result<RootConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .map_err(|e| gosig_core::Error::Config(e.to_string()))
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// An explicit config file wins; otherwise fall back to the GOPATH/GOROOT
/// style values from flags or the environment. With `go_env` set, a missing
/// GOROOT is asked from the installed toolchain.
pub fn resolve(
    config_file: Option<&Path>,
    gopath: Option<&str>,
    goroot: Option<PathBuf>,
    go_env: bool,
) -> Result<RootConfig> {
    match config_file {
        Some(path) => load(path),
        None => {
            let goroot = goroot.or_else(|| go_env.then(toolchain_goroot).flatten());
            Ok(RootConfig::from_search_path(gopath, goroot))
        }
    }
}

/// The toolchain's own root as reported by `go env GOROOT`, or `None` when
/// no `go` binary answers.
fn toolchain_goroot() -> Option<PathBuf> {
    let output = match Command::new("go").args(["env", "GOROOT"]).output() {
        Ok(output) if output.status.success() => output,
        Ok(output) => {
            tracing::debug!(status = %output.status, "go env GOROOT failed");
            return None;
        }
        Err(err) => {
            tracing::debug!(error = %err, "go toolchain not found");
            return None;
        }
    };
    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if root.is_empty() {
        return None;
    }
    tracing::debug!(goroot = %root, "using toolchain GOROOT");
    Some(PathBuf::from(root))
}
