use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};

fn traversal(path: &Path, reason: &'static str) -> StorageError {
    StorageError::PathTraversalAttempt {
        message: path.display().to_string().into(),
        context: Some(reason.into()),
    }
}

/// Lexically folds `.` and `..`. A `..` that would climb above the root is rejected.
fn fold_components(path: &Path) -> Result<PathBuf, StorageError> {
    let mut folded = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(segment) => folded.push(segment),
            Component::CurDir => {},
            Component::ParentDir if folded.pop() => {},
            Component::ParentDir => return Err(traversal(path, "Parent segment leaves the root")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(traversal(path, "Absolute paths are not accepted"));
            },
        }
    }

    Ok(folded)
}

/// Maps a relative path onto `root`, refusing anything that lands outside of it.
///
/// Existing targets are canonicalized so symlinks are followed before the check.
/// For targets that do not exist yet, the nearest existing ancestor is checked instead.
pub(crate) fn resolve_path(root: &Path, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
    let path = path.as_ref();
    let joined = root.join(fold_components(path)?);

    match joined.canonicalize() {
        Ok(canonical) if canonical.starts_with(root) => Ok(canonical),
        Ok(canonical) => Err(traversal(&canonical, "Resolved path leaves the root")),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => check_ancestors(root, joined),
        Err(err) => Err(StorageError::Io { source: err, context: None }),
    }
}

fn check_ancestors(root: &Path, joined: PathBuf) -> Result<PathBuf, StorageError> {
    let anchor = joined
        .ancestors()
        .skip(1)
        .take_while(|ancestor| ancestor.starts_with(root))
        .find(|ancestor| *ancestor == root || ancestor.exists())
        .ok_or_else(|| traversal(&joined, "No ancestor inside the root"))?;

    if anchor == root {
        return Ok(joined);
    }

    let canonical = anchor.canonicalize().map_err(|err| StorageError::Io {
        source: err,
        context: Some(format!("Failed to verify {}", anchor.display()).into()),
    })?;

    if canonical.starts_with(root) {
        Ok(joined)
    } else {
        Err(traversal(&canonical, "Ancestor links outside the root"))
    }
}
