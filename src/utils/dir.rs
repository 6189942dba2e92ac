use std::{
    env, io,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Result};

const APPLICATION_DIR: &str = "habitual";

/// Resolves the directory holding the store and logs, creating it when missing.
pub fn create_application_default_path() -> Result<PathBuf> {
    let path = {
        #[cfg(windows)]
        {
            let mut path = env::var("APPDATA")
                .map(PathBuf::from)
                .map_err(|_| anyhow!("APPDATA should be present on Windows"))?;
            path.push(APPLICATION_DIR);
            path
        }
        #[cfg(not(windows))]
        {
            let mut path = env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .or_else(|_| {
                    env::var("HOME").map(|home| {
                        let mut path = PathBuf::from(home);
                        path.push(".local/state");
                        path
                    })
                })
                .map_err(|_| anyhow!("Couldn't find neither XDG_STATE_HOME nor HOME"))?;
            path.push(APPLICATION_DIR);
            path
        }
    };

    ensure_dir(path)
}

/// Same as [create_application_default_path] but for a directory chosen by the user. The result
/// is absolute: the daemon changes its working directory after startup.
pub fn application_path(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(dir) => ensure_dir(resolve_dir(&dir)?),
        None => create_application_default_path(),
    }
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf> {
    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}

/// Anchors a relative directory at the current working directory.
pub fn resolve_dir(dir: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(dir)?)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_relative_dir_is_anchored_at_working_dir() {
        let resolved = resolve_dir(Path::new("state/habitual")).unwrap();

        assert!(resolved.is_absolute());
        assert_eq!(resolved, env::current_dir().unwrap().join("state/habitual"));
    }

    #[test]
    fn test_absolute_dir_is_kept() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(resolve_dir(dir.path()).unwrap(), dir.path());
    }

    #[test]
    fn test_application_path_is_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let path = application_path(Some(dir.path().join("nested"))).unwrap();

        assert!(path.is_absolute());
        assert!(path.is_dir());
    }
}
