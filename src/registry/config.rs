use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Failure to read or write the persisted registry
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("No config file found at {}. Please run `logics setup` first", .path.display())]
    Missing { path: PathBuf },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to access config file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Failed to serialize registry: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// A project installed on this machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub location: PathBuf,
    /// Shared-folder repository this working copy was cloned from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<PathBuf>,
}

impl Repository {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(name: S, location: P) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            remote: None,
        }
    }

    pub fn with_remote<P: Into<PathBuf>>(mut self, remote: P) -> Self {
        self.remote = Some(remote.into());
        self
    }

    /// Directory git should operate in.
    ///
    /// Older registries stored `<project>/<name>.git`; those resolve to the
    /// checkout next to it when only the stripped form exists on disk.
    pub fn working_copy(&self) -> PathBuf {
        if self.location.is_dir() {
            return self.location.clone();
        }

        if let Some(stem) = project_stem(&self.location) {
            if self.location.extension().is_some_and(|ext| ext == "git") {
                let stripped = self.location.with_file_name(stem);
                if stripped.is_dir() {
                    return stripped;
                }
            }
        }

        self.location.clone()
    }

    /// Whether this entry already accounts for the shared project at `candidate`
    pub fn tracks(&self, candidate: &Path) -> bool {
        let Some(wanted) = project_stem(candidate) else {
            return false;
        };

        project_stem(&self.location).as_deref() == Some(wanted.as_str())
            || self
                .remote
                .as_deref()
                .and_then(project_stem)
                .as_deref()
                == Some(wanted.as_str())
    }
}

/// Persisted list of known repositories plus the two root folders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Registry {
    #[serde(alias = "sharedfolder")]
    pub shared_folder: PathBuf,
    #[serde(alias = "projectfolder")]
    pub project_folder: PathBuf,
    #[serde(default, alias = "repositories")]
    pub repos: Vec<Repository>,
}

impl Registry {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(shared_folder: P, project_folder: Q) -> Self {
        Self {
            shared_folder: shared_folder.into(),
            project_folder: project_folder.into(),
            repos: Vec::new(),
        }
    }

    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let path = path.as_ref();

        let contents = match fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RegistryError::Missing {
                    path: path.to_path_buf(),
                })
            }
            Err(source) => {
                return Err(RegistryError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let registry = Self::from_yaml_str(&contents).map_err(|source| RegistryError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            "Loaded {} repositories from {}",
            registry.repos.len(),
            path.display()
        );

        Ok(registry)
    }

    /// Overwrite `path` with this registry.
    ///
    /// The document is fully serialized before the file is touched and then
    /// swapped in with a rename, so a failure never leaves a truncated file.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), RegistryError> {
        let path = path.as_ref().to_path_buf();
        let yaml = self.to_yaml_string()?;

        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&target, yaml.as_bytes()))
            .await
            .map_err(|e| RegistryError::Io {
                path: path.clone(),
                source: io::Error::new(io::ErrorKind::Other, e),
            })?
            .map_err(|source| RegistryError::Io {
                path: path.clone(),
                source,
            })?;

        debug!("Saved registry to {}", path.display());
        Ok(())
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Add an entry. Uniqueness is checked by the caller before appending.
    pub fn append(&mut self, repo: Repository) {
        self.repos.push(repo);
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.repos.iter().map(|r| r.name.clone()).collect()
    }

    /// Whether any registered repository already accounts for `candidate`
    pub fn contains_project(&self, candidate: &Path) -> bool {
        self.repos.iter().any(|repo| repo.tracks(candidate))
    }
}

/// Base name of a repository path with any trailing `.git` removed
pub fn project_stem(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(".git").unwrap_or(name);
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
