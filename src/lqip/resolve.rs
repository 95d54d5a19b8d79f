//! Resolve abstract image handles to files on disk.
//!
//! An [`ImageHandle`] is what the site's asset pipeline hands out for an
//! imported image. Its `src` looks different depending on how the site is
//! being served, so resolution tries several conventions in order:
//!
//! | Tier | Condition | Path |
//! |------|-----------|------|
//! | [`Tier::FsPath`] | `fs_path` is set | `fs_path` (a `file://` URL is decoded) |
//! | [`Tier::DevServer`] | `src` contains `/@fs/` | everything after `/@fs`, query stripped |
//! | [`Tier::SourceRoot`] | `src` starts with `/src/` | `<root>/<src>` |
//! | [`Tier::AssetsFallback`] | anything else | `<root>/src/assets/<src>` |
//!
//! Resolution itself never fails: the last tier always yields a path. A bad
//! guess shows up later as a read error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// An imported image as seen by templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHandle {
    /// Public URL of the image (dev server path or hashed build asset).
    pub src: String,
    /// Original file reference, when the pipeline exposes one.
    #[serde(default, rename = "fsPath", skip_serializing_if = "Option::is_none")]
    pub fs_path: Option<String>,
}

impl ImageHandle {
    pub fn from_src(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            fs_path: None,
        }
    }
}

/// Which convention produced a resolved path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    FsPath,
    DevServer,
    SourceRoot,
    AssetsFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub path: PathBuf,
    pub tier: Tier,
}

const DEV_FS_MARKER: &str = "/@fs/";

/// Filesystem path for a `file://` URL. `None` for anything else, including
/// plain paths and URLs naming a remote host.
fn file_url_to_path(value: &str) -> Option<PathBuf> {
    Url::parse(value)
        .ok()
        .filter(|url| url.scheme() == "file")
        .and_then(|url| url.to_file_path().ok())
}

pub fn resolve_handle(handle: &ImageHandle, project_root: &Path, assets_dir: &Path) -> Resolved {
    if let Some(fs_path) = handle.fs_path.as_deref().filter(|p| !p.is_empty()) {
        let path = file_url_to_path(fs_path).unwrap_or_else(|| PathBuf::from(fs_path));
        return Resolved {
            path,
            tier: Tier::FsPath,
        };
    }

    let src = handle.src.as_str();

    if let Some((_, after)) = src.split_once(DEV_FS_MARKER) {
        let without_query = after.split('?').next().unwrap_or(after);
        return Resolved {
            path: PathBuf::from(format!("/{without_query}")),
            tier: Tier::DevServer,
        };
    }

    if let Some(rest) = src.strip_prefix("/src/") {
        return Resolved {
            path: project_root.join("src").join(rest),
            tier: Tier::SourceRoot,
        };
    }

    Resolved {
        path: project_root
            .join(assets_dir)
            .join(src.trim_start_matches('/')),
        tier: Tier::AssetsFallback,
    }
}
