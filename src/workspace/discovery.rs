use std::io;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::registry::{project_stem, Registry};

/// List shared projects that are not installed yet.
///
/// Only immediate subdirectories of `shared_root` that look like a git
/// repository (bare or not) are considered, and anything the registry already
/// tracks is dropped. Candidates come back sorted by path.
pub async fn discover_candidates<P: AsRef<Path>>(
    shared_root: P,
    registry: &Registry,
) -> io::Result<Vec<PathBuf>> {
    let shared_root = shared_root.as_ref().to_path_buf();

    debug!("Discovering shared projects in {}", shared_root.display());

    let found = task::spawn_blocking(move || list_repository_dirs(&shared_root))
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))??;

    let candidates: Vec<PathBuf> = found
        .into_iter()
        .filter(|path| {
            let known = registry.contains_project(path);
            if known {
                debug!("Skipping already installed project: {}", path.display());
            }
            !known
        })
        .collect();

    debug!("Found {} installable projects", candidates.len());
    Ok(candidates)
}

fn list_repository_dirs(root: &Path) -> io::Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("shared folder {} does not exist", root.display()),
        ));
    }

    let mut repos = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = match entry {
            Ok(entry) => entry,
            // Depth 0 means the shared folder itself could not be listed
            Err(e) if e.depth() == 0 => return Err(io::Error::from(e)),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", root.display(), e);
                continue;
            }
        };
        let path = entry.path();

        if !path.is_dir() {
            continue;
        }

        // The shared folder may itself be a checkout; its own `.git` is not a project
        if project_stem(path).is_none() {
            debug!("Skipping {}: no project name", path.display());
            continue;
        }

        if is_repository_root(path) {
            debug!("Found shared repository: {}", path.display());
            repos.push(path.to_path_buf());
        }
    }

    // Listing order is filesystem dependent
    repos.sort();

    Ok(repos)
}

/// Check if a directory is a git repository root, either a checkout with a
/// `.git` entry or a bare repository.
pub fn is_repository_root<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();

    if path.join(".git").exists() {
        return true;
    }

    path.join("HEAD").is_file() && path.join("objects").is_dir() && path.join("refs").is_dir()
}
