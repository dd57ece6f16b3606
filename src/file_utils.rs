use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::extraction::DocumentKind;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Find every pdf/docx document under a directory, sorted by path
    pub fn find_documents<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && DocumentKind::from_path(path).is_some() {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Copy a file from one location to another, ensuring the target directory exists
    pub fn copy_file<P1: AsRef<Path>, P2: AsRef<Path>>(from: P1, to: P2) -> Result<()> {
        let from = from.as_ref();
        let to = to.as_ref();

        if !from.exists() {
            return Err(anyhow::anyhow!("Source file does not exist: {:?}", from));
        }

        // Ensure the target directory exists
        if let Some(parent) = to.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::copy(from, to)
            .with_context(|| format!("Failed to copy {:?} to {:?}", from, to))?;

        Ok(())
    }

    /// Replace `to` with a copy of `from` without ever leaving `to` half
    /// written. The copy goes to a sibling `.part` file that is renamed over
    /// the target; on failure only that temporary file is removed.
    pub fn replace_file<P1: AsRef<Path>, P2: AsRef<Path>>(from: P1, to: P2) -> Result<()> {
        let from = from.as_ref();
        let to = to.as_ref();

        if !Self::file_exists(from) {
            return Err(anyhow::anyhow!("Source file does not exist: {:?}", from));
        }

        let file_name = to
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Target has no file name: {:?}", to))?;
        let mut part_name = file_name.to_os_string();
        part_name.push(".part");
        let part = to.with_file_name(part_name);

        let result = Self::copy_file(from, &part).and_then(|_| {
            fs::rename(&part, to)
                .with_context(|| format!("Failed to move {:?} into place at {:?}", part, to))
        });

        if result.is_err() {
            if let Err(cleanup) = Self::remove_if_exists(&part) {
                log::warn!("Failed to remove partial copy {:?}: {}", part, cleanup);
            }
        }

        result
    }

    /// Remove a file if it exists
    pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove file: {:?}", path))?;
        }
        Ok(())
    }
}
