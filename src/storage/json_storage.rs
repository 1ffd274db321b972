use std::{
    future::Future,
    io::{ErrorKind, SeekFrom},
    ops::Deref,
    path::{Path, PathBuf},
};

use fs4::tokio::AsyncFileExt;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{
    fs::File,
    io::{self, AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};
use tracing::debug;

use crate::error::{TrackerError, TrackerResult};

/// Interface for abstracting storage of a tracker's state.
pub trait StateStorage<T> {
    /// Reads the whole state. Storage that doesn't exist yet yields the default state.
    fn load(&self) -> impl Future<Output = TrackerResult<T>>;

    /// Replaces the stored state with `state`.
    fn save(&self, state: &T) -> impl Future<Output = TrackerResult<()>>;
}

impl<T, S: Deref> StateStorage<T> for S
where
    S::Target: StateStorage<T>,
{
    fn load(&self) -> impl Future<Output = TrackerResult<T>> {
        self.deref().load()
    }

    fn save(&self, state: &T) -> impl Future<Output = TrackerResult<()>> {
        self.deref().save(state)
    }
}

/// The main realization of [StateStorage]: one pretty printed JSON document per file, rewritten
/// completely on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn persistence_error(&self, source: std::io::Error) -> TrackerError {
        TrackerError::Persistence {
            path: self.path.clone(),
            source,
        }
    }

    fn corrupted(&self, source: serde_json::Error) -> TrackerError {
        TrackerError::Corrupted {
            path: self.path.clone(),
            source,
        }
    }
}

impl<T: Serialize + DeserializeOwned + Default> StateStorage<T> for JsonFileStorage {
    async fn load(&self) -> TrackerResult<T> {
        let contents = match read_locked(&self.path).await {
            Ok(v) => v,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{:?} doesn't exist yet, starting empty", self.path);
                return Ok(T::default());
            }
            Err(e) => return Err(self.persistence_error(e)),
        };

        if contents.trim().is_empty() {
            return Ok(T::default());
        }
        serde_json::from_str(&contents).map_err(|e| self.corrupted(e))
    }

    async fn save(&self, state: &T) -> TrackerResult<()> {
        let mut buffer = serde_json::to_vec_pretty(state).map_err(|e| self.corrupted(e))?;
        buffer.push(b'\n');
        write_locked(&self.path, &buffer)
            .await
            .map_err(|e| self.persistence_error(e))?;
        debug!("Saved {} bytes into {:?}", buffer.len(), self.path);
        Ok(())
    }
}

async fn read_locked(path: &Path) -> Result<String, io::Error> {
    let mut file = File::open(path).await?;
    file.lock_shared()?;
    let mut contents = String::new();
    let result = file.read_to_string(&mut contents).await;
    file.unlock_async().await?;
    result?;
    Ok(contents)
}

async fn write_locked(path: &Path, buffer: &[u8]) -> Result<(), io::Error> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    // Truncating only after the lock is held, so that readers never see a half empty file.
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .await?;

    file.lock_exclusive()?;
    let result = overwrite(&mut file, buffer).await;
    file.unlock_async().await?;
    result
}

async fn overwrite(file: &mut File, buffer: &[u8]) -> Result<(), io::Error> {
    file.set_len(0).await?;
    file.seek(SeekFrom::Start(0)).await?;
    file.write_all(buffer).await?;
    file.flush().await?;
    file.sync_all().await
}
