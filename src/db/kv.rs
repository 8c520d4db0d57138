// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flat key-value byte store.
//!
//! Two backends:
//! - file: one file per key (`<dir>/<key>.json`), replaced atomically
//! - memory: process-local map, used for tests and ephemeral runs

use dashmap::DashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const FILE_EXTENSION: &str = "json";
const MAX_KEY_LEN: usize = 64;

/// Key-value store handle. Cheap to clone; clones share the same data.
#[derive(Clone)]
pub struct KvStore {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    File { dir: PathBuf },
    Memory(Arc<DashMap<String, Vec<u8>>>),
}

impl KvStore {
    /// Open (creating if needed) a directory-backed store.
    pub async fn open_dir<P: AsRef<Path>>(dir: P) -> Result<Self, KvError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| KvError::Io {
                key: dir.display().to_string(),
                source,
            })?;

        tracing::info!(dir = %dir.display(), "Opened file-backed key-value store");

        Ok(Self {
            backend: Backend::File { dir },
        })
    }

    /// Create an empty in-memory store.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(DashMap::new())),
        }
    }

    /// Short backend name for logs.
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::File { .. } => "file",
            Backend::Memory(_) => "memory",
        }
    }

    /// Read the value stored under `key`, if any.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        check_key(key)?;
        match &self.backend {
            Backend::Memory(map) => Ok(map.get(key).map(|v| v.value().clone())),
            Backend::File { dir } => match tokio::fs::read(value_path(dir, key)).await {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(source) => Err(KvError::Io {
                    key: key.to_string(),
                    source,
                }),
            },
        }
    }

    /// Store `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        check_key(key)?;
        match &self.backend {
            Backend::Memory(map) => {
                map.insert(key.to_string(), value.to_vec());
                Ok(())
            }
            Backend::File { dir } => {
                let path = value_path(dir, key);
                let tmp = path.with_extension(format!("{FILE_EXTENSION}.tmp"));
                let io_err = |source| KvError::Io {
                    key: key.to_string(),
                    source,
                };

                // Write then rename so readers never see a half-written value.
                tokio::fs::write(&tmp, value).await.map_err(io_err)?;
                if let Err(e) = tokio::fs::rename(&tmp, &path).await {
                    if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                        tracing::warn!(error = %cleanup, path = %tmp.display(), "Failed to remove temp file");
                    }
                    return Err(io_err(e));
                }
                Ok(())
            }
        }
    }

    /// Delete `key`. Missing keys are not an error.
    pub async fn remove(&self, key: &str) -> Result<(), KvError> {
        check_key(key)?;
        match &self.backend {
            Backend::Memory(map) => {
                map.remove(key);
                Ok(())
            }
            Backend::File { dir } => match tokio::fs::remove_file(value_path(dir, key)).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(source) => Err(KvError::Io {
                    key: key.to_string(),
                    source,
                }),
            },
        }
    }
}

fn value_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.{FILE_EXTENSION}"))
}

/// Keys become file names, so restrict them to a safe alphabet.
fn check_key(key: &str) -> Result<(), KvError> {
    let ok = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if ok {
        Ok(())
    } else {
        Err(KvError::InvalidKey(key.to_string()))
    }
}

/// Errors from key-value operations.
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Storage I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}
