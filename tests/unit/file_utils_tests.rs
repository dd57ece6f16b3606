/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;

use notestack::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "note.pdf", "content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));
    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that ensure_dir creates nested directories
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested)?;

    assert!(FileManager::dir_exists(&nested));
    Ok(())
}

/// Test document discovery only returns notes, sorted
#[test]
fn test_find_documents_withMixedFiles_shouldReturnOnlyNotes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let sub_dir = temp_dir.path().join("week2");
    fs::create_dir(&sub_dir)?;

    common::create_test_file(temp_dir.path(), "b.pdf", "")?;
    common::create_test_file(temp_dir.path(), "a.DOCX", "")?;
    common::create_test_file(temp_dir.path(), "readme.txt", "")?;
    common::create_test_file(&sub_dir, "c.docx", "")?;

    let found = FileManager::find_documents(temp_dir.path())?;
    let names: Vec<String> = found
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();

    assert_eq!(names, vec!["a.DOCX", "b.pdf", "c.docx"]);
    Ok(())
}

/// Test copy_file creates the target directory
#[test]
fn test_copy_file_withMissingTargetDir_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "source.pdf", "pdf bytes")?;
    let target = temp_dir.path().join("uploads").join("Math_CS_E1.pdf");

    FileManager::copy_file(&source, &target)?;

    assert_eq!(fs::read_to_string(&target)?, "pdf bytes");
    Ok(())
}

/// Test copy_file fails on a missing source
#[test]
fn test_copy_file_withMissingSource_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let result = FileManager::copy_file(temp_dir.path().join("nope.pdf"), temp_dir.path().join("out.pdf"));

    assert!(result.is_err());
    Ok(())
}

/// Test remove_if_exists tolerates missing files
#[test]
fn test_remove_if_exists_shouldBeIdempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "gone.pdf", "x")?;

    FileManager::remove_if_exists(&file)?;
    FileManager::remove_if_exists(&file)?;

    assert!(!file.exists());
    Ok(())
}

/// Test replace_file swaps in the new content and leaves no temporary file
#[test]
fn test_replace_file_withExistingTarget_shouldOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "new.pdf", "new")?;
    let target = common::create_test_file(temp_dir.path(), "note.pdf", "old")?;

    FileManager::replace_file(&source, &target)?;

    assert_eq!(fs::read_to_string(&target)?, "new");
    assert!(!temp_dir.path().join("note.pdf.part").exists());
    Ok(())
}

/// Test replace_file never touches the target when the source is missing
#[test]
fn test_replace_file_withMissingSource_shouldKeepTarget() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = common::create_test_file(temp_dir.path(), "note.pdf", "old")?;

    let result = FileManager::replace_file(temp_dir.path().join("missing.pdf"), &target);

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&target)?, "old");
    Ok(())
}
