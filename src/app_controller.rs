use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::extraction::{DocumentKind, TextExtractor, UploadedDocument};
use crate::file_utils::FileManager;
use crate::filename::{build_filename, is_allowed_upload};
use crate::generation::{GenerationClient, GenerationParams, GenerationResult, SafetyVerdict};
use crate::providers::Provider;
use crate::providers::gemini::Gemini;

// @module: Application controller for note processing

/// A note written into the upload folder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredNote {
    /// Policy filename the note is stored under
    pub filename: String,
    /// Public link the web layer serves the file from
    pub file_url: String,
    /// The stored document
    pub document: UploadedDocument,
}

/// Main application controller for note processing
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Shared so extraction can run on a blocking worker
    extractor: Arc<TextExtractor>,
    // @field: Model client
    generator: GenerationClient,
}

impl Controller {
    // @method: Create a new controller backed by the hosted Gemini API
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        if config.gemini.api_key.is_empty() {
            warn!("No API key configured; AI generation will be unavailable");
        }

        let provider = Gemini::new(
            config.gemini.api_key.clone(),
            config.gemini.endpoint.clone(),
            config.gemini.timeout_secs,
        )
        .with_temperature(config.gemini.temperature);

        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    // @method: Create a controller with an explicit provider
    pub fn with_provider(config: Config, provider: Arc<dyn Provider>) -> Self {
        let generator = GenerationClient::new(provider, &config.generation);
        Self {
            config,
            extractor: Arc::new(TextExtractor::new()),
            generator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn generator(&self) -> &GenerationClient {
        &self.generator
    }

    /// Store an uploaded note under its policy filename
    pub fn store_upload(
        &self,
        source: &Path,
        subject: Option<&str>,
        department: Option<&str>,
        enrollment_id: Option<&str>,
    ) -> Result<StoredNote, AppError> {
        let original_filename = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if !is_allowed_upload(&original_filename) {
            return Err(AppError::InvalidUpload(format!("Invalid file type: {}", original_filename)));
        }

        if subject.is_none_or(str::is_empty) || department.is_none_or(str::is_empty) {
            return Err(AppError::InvalidUpload("Subject Name and Department are required".to_string()));
        }

        // Checked by is_allowed_upload above
        let kind = DocumentKind::from_path(source)
            .ok_or_else(|| AppError::InvalidUpload(format!("Invalid file type: {}", original_filename)))?;

        let filename = build_filename(subject, department, enrollment_id);
        let storage_path = self.config.storage.upload_folder.join(&filename);

        // An earlier note under the same name survives a failed upload
        FileManager::replace_file(source, &storage_path)
            .map_err(|e| AppError::File(format!("Upload failed: {:#}", e)))?;

        info!("File saved locally: {:?}", storage_path);

        Ok(StoredNote {
            file_url: format!("/uploads/{}", filename),
            filename,
            document: UploadedDocument {
                storage_path,
                original_filename,
                kind,
            },
        })
    }

    /// Extract the text of a note file; empty text is an error here
    pub async fn extract_text(&self, path: &Path) -> Result<String, AppError> {
        if !FileManager::file_exists(path) {
            debug!("File not found at {:?}", path);
            return Err(AppError::File(format!("File not found: {:?}", path)));
        }

        let extractor = Arc::clone(&self.extractor);
        let owned: PathBuf = path.to_path_buf();
        let text = tokio::task::spawn_blocking(move || extractor.extract(&owned))
            .await
            .map_err(|e| AppError::Unknown(format!("Extraction task failed: {}", e)))?;

        match text {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(AppError::NoTextContent(path.to_path_buf())),
        }
    }

    /// Extract the text of a note stored by [`Controller::store_upload`]
    pub async fn extract_stored(&self, note: &StoredNote) -> Result<String, AppError> {
        let extractor = Arc::clone(&self.extractor);
        let document = note.document.clone();
        let text = tokio::task::spawn_blocking(move || extractor.extract_document(&document))
            .await
            .map_err(|e| AppError::Unknown(format!("Extraction task failed: {}", e)))?;

        match text {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(AppError::NoTextContent(note.document.storage_path.clone())),
        }
    }

    /// Summarize a note file, detecting its kind from the extension
    pub async fn summarize(&self, path: &Path) -> Result<GenerationResult, AppError> {
        let text = self.extract_text(path).await?;
        Ok(self.generator.summarize(&text).await)
    }

    /// Generate practice questions from a note file
    pub async fn generate_questions(&self, path: &Path, params: &GenerationParams) -> Result<GenerationResult, AppError> {
        let text = self.extract_text(path).await?;
        Ok(self.generator.generate_questions(&text, params).await)
    }

    /// Moderate a note file
    pub async fn check_safety(&self, path: &Path) -> Result<SafetyVerdict, AppError> {
        let text = self.extract_text(path).await?;
        Ok(self.generator.check_safety(&text).await)
    }

    /// Summarize a note stored by [`Controller::store_upload`]
    pub async fn summarize_stored(&self, note: &StoredNote) -> Result<GenerationResult, AppError> {
        let text = self.extract_stored(note).await?;
        Ok(self.generator.summarize(&text).await)
    }

    /// Generate practice questions from a stored note
    pub async fn generate_questions_stored(
        &self,
        note: &StoredNote,
        params: &GenerationParams,
    ) -> Result<GenerationResult, AppError> {
        let text = self.extract_stored(note).await?;
        Ok(self.generator.generate_questions(&text, params).await)
    }

    /// Moderate a stored note
    pub async fn check_safety_stored(&self, note: &StoredNote) -> Result<SafetyVerdict, AppError> {
        let text = self.extract_stored(note).await?;
        Ok(self.generator.check_safety(&text).await)
    }

    /// Test the connection with the first configured model
    pub async fn test_connection(&self) -> Result<(), AppError> {
        let model = self.generator.models().first()
            .ok_or_else(|| AppError::Config("No generation models configured".to_string()))?;
        self.generator.test_connection(model).await.map_err(AppError::from)
    }
}
