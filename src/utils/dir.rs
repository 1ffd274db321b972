use std::{
    env, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

pub const APPLICATION_DIR_NAME: &str = "growthkit";

/// Resolves the platform state directory and makes sure it exists.
pub fn create_application_default_path() -> Result<PathBuf> {
    let mut path = platform_state_dir()?;
    path.push(APPLICATION_DIR_NAME);
    ensure_dir(&path)?;
    Ok(path)
}

/// Same as [create_application_default_path] for a directory passed by the user.
pub fn ensure_dir(path: &Path) -> Result<()> {
    match std::fs::create_dir_all(path) {
        Ok(_) => Ok(()),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(v) => Err(v).with_context(|| format!("Can't create application directory {path:?}")),
    }
}

fn platform_state_dir() -> Result<PathBuf> {
    cfg_if::cfg_if! {
        if #[cfg(windows)] {
            env::var("APPDATA")
                .map(PathBuf::from)
                .context("APPDATA should be present on Windows")
        } else {
            env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .or_else(|_| {
                    env::var("HOME").map(|home| {
                        let mut path = PathBuf::from(home);
                        path.push(".local/state");
                        path
                    })
                })
                .context("Couldn't find neither XDG_STATE_HOME nor HOME")
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use super::ensure_dir;

    #[test]
    fn ensure_dir_is_repeatable() -> Result<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested)?;
        ensure_dir(&nested)?;
        assert!(nested.is_dir());
        Ok(())
    }
}
