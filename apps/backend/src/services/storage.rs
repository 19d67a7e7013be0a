//! Local-disk storage for recorded recitations.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid recording name: {0}")]
    InvalidName(String),
    #[error("File not found: {0}")]
    NotFound(String),
}

/// Prefix of in-flight upload files, before they are renamed.
const TEMP_PREFIX: &str = "recitation-";

/// A recording on disk and where clients can fetch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecitation {
    pub filename: String,
    pub url: String,
}

/// Recording store rooted at a directory.
pub struct RecitationStore {
    root: PathBuf,
    public_base_url: String,
}

impl RecitationStore {
    /// Open the store, creating the directory if it does not exist yet.
    pub async fn new(
        root: impl Into<PathBuf>,
        public_base_url: &str,
    ) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;

        Ok(Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Final file name for a surah/verse pair.
    ///
    /// Format: `{SURAH}_Ayat_{verse}.wav`, where the surah name is trimmed,
    /// whitespace runs become `_`, and letters are uppercased.
    pub fn make_filename(surah: &str, verse: &str) -> Result<String, StorageError> {
        let formatted = surah
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_uppercase();

        if formatted.is_empty()
            || formatted.contains("..")
            || formatted.contains(&['/', '\\'][..])
        {
            return Err(StorageError::InvalidName(surah.to_string()));
        }

        let verse = verse.trim();
        match verse.parse::<u32>() {
            Ok(n) if n > 0 => Ok(format!("{}_Ayat_{}.wav", formatted, n)),
            _ => Err(StorageError::InvalidName(verse.to_string())),
        }
    }

    /// Public URL of a stored file.
    pub fn url_for(&self, filename: &str) -> String {
        format!("{}/recitations/{}", self.public_base_url, filename)
    }

    /// Write an uploaded recording under its final name.
    ///
    /// The content lands under a temporary name first and is renamed into
    /// place, so a listing never shows a half-written recording. An existing
    /// recording for the same verse is replaced.
    pub async fn save(
        &self,
        surah: &str,
        verse: &str,
        content: &[u8],
    ) -> Result<StoredRecitation, StorageError> {
        let filename = Self::make_filename(surah, verse)?;

        let temp_name = format!(
            "{}{}-{}.wav",
            TEMP_PREFIX,
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple()
        );
        let temp_path = self.root.join(&temp_name);
        let final_path = self.root.join(&filename);

        tokio::fs::write(&temp_path, content).await?;
        tracing::debug!("Wrote upload to {}", temp_path.display());

        if let Err(e) = tokio::fs::rename(&temp_path, &final_path).await {
            tracing::error!("Error renaming {} to {}: {}", temp_name, filename, e);
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::info!("Saved recitation {} ({} bytes)", filename, content.len());

        Ok(StoredRecitation {
            url: self.url_for(&filename),
            filename,
        })
    }

    /// All stored recordings, sorted by file name.
    pub async fn list(&self) -> Result<Vec<StoredRecitation>, StorageError> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with(TEMP_PREFIX) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names
            .into_iter()
            .map(|filename| StoredRecitation {
                url: self.url_for(&filename),
                filename,
            })
            .collect())
    }

    /// Remove a recording by file name.
    pub async fn delete(&self, filename: &str) -> Result<(), StorageError> {
        if filename.is_empty() || filename.contains("..") || filename.contains(&['/', '\\'][..]) {
            return Err(StorageError::InvalidName(filename.to_string()));
        }

        match tokio::fs::remove_file(self.root.join(filename)).await {
            Ok(()) => {
                tracing::info!("Deleted recitation {}", filename);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(filename.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
