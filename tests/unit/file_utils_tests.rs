/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use wosc_guides::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that ensure_dir creates nested directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&nested)?;

    assert!(FileManager::dir_exists(&nested));
    Ok(())
}

/// Test that write_to_file creates parent directories and replaces content
#[test]
fn test_write_to_file_withExistingFile_shouldReplaceContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("heroes").join("flint.html");

    FileManager::write_to_file(&target, "first")?;
    FileManager::write_to_file(&target, "second")?;

    assert_eq!(fs::read_to_string(&target)?, "second");

    // No temporary files are left behind next to the page
    let leftovers: Vec<_> = fs::read_dir(target.parent().unwrap())?.collect();
    assert_eq!(leftovers.len(), 1);
    Ok(())
}

/// Test that written pages are readable by others
#[cfg(unix)]
#[test]
fn test_write_to_file_shouldBeWorldReadable() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("page.html");
    FileManager::write_to_file(&target, "<p>x</p>")?;

    let mode = fs::metadata(&target)?.permissions().mode();
    assert_eq!(mode & 0o044, 0o044);
    Ok(())
}

/// Test that read_to_string reports the path on failure
#[test]
fn test_read_to_string_withMissingFile_shouldMentionPath() {
    let err = FileManager::read_to_string("missing_dir/missing.json").unwrap_err();
    assert!(format!("{:#}", err).contains("missing.json"));
}

/// Test prefix discovery: sorted, depth one, extension checked
#[test]
fn test_find_files_with_prefix_shouldFilterAndSort() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_file(dir, "expert_zoe.json", "{}")?;
    common::create_test_file(dir, "expert_anna.json", "{}")?;
    common::create_test_file(dir, "expert_notes.txt", "")?;
    common::create_test_file(dir, "flint.json", "{}")?;
    fs::create_dir_all(dir.join("nested"))?;
    common::create_test_file(&dir.join("nested"), "expert_deep.json", "{}")?;

    let found = FileManager::find_files_with_prefix(dir, "expert_", "json")?;
    let names: Vec<String> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["expert_anna.json", "expert_zoe.json"]);
    Ok(())
}

/// Test that the extension must match exactly, case included
#[test]
fn test_find_files_with_prefix_withUppercaseExtension_shouldSkipFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_file(dir, "expert_Up.JSON", "{}")?;
    common::create_test_file(dir, "expert_down.json", "{}")?;

    let found = FileManager::find_files_with_prefix(dir, "expert_", "json")?;

    assert_eq!(found, vec![dir.join("expert_down.json")]);
    Ok(())
}
