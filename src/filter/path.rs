use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Why a requested file could not be resolved.
///
/// `InvalidUrl` covers anything that could land outside the root and is
/// decided before the filesystem is consulted; `NotFound` means the request
/// was acceptable but nothing is there. Both carry a fixed body that is
/// served to the client in place of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("requested path escapes the log root")]
    InvalidUrl,
    #[error("no such log file under the root")]
    NotFound,
}

impl ResolveError {
    /// Fixed user-facing sentinel body.
    pub fn user_message(self) -> &'static str {
        match self {
            ResolveError::InvalidUrl => "Invalid file url",
            ResolveError::NotFound => "File Not Found",
        }
    }
}

/// Resolve `name` against `root`, refusing anything that would escape it.
///
/// `..`, absolute paths, and drive prefixes are rejected lexically, so a
/// traversal attempt never touches the filesystem. A candidate that
/// survives is canonicalized and must still sit under the canonical root;
/// that closes the symlink hole where an in-root link points elsewhere.
pub fn resolve(root: &Path, name: &str) -> Result<PathBuf, ResolveError> {
    if name.is_empty() || name.contains('\0') {
        return Err(ResolveError::InvalidUrl);
    }

    let mut contained = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => contained.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ResolveError::InvalidUrl);
            }
        }
    }
    if contained.as_os_str().is_empty() {
        return Err(ResolveError::InvalidUrl);
    }

    let root = root.canonicalize().map_err(|_| ResolveError::NotFound)?;
    let resolved = root
        .join(contained)
        .canonicalize()
        .map_err(|_| ResolveError::NotFound)?;
    if !resolved.starts_with(&root) {
        return Err(ResolveError::InvalidUrl);
    }
    if !resolved.is_file() {
        return Err(ResolveError::NotFound);
    }
    Ok(resolved)
}
