/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;
use wosc_guides::errors::{AppError, BuildError, ContentError, LocaleError};

#[test]
fn test_contentError_missingFile_shouldDisplayPath() {
    let error = ContentError::MissingFile(PathBuf::from("jsons/flint.json"));
    let display = format!("{}", error);
    assert!(display.contains("Content file not found"));
    assert!(display.contains("jsons/flint.json"));
}

#[test]
fn test_contentError_malformedJson_shouldDisplayPathAndMessage() {
    let error = ContentError::MalformedJson {
        path: PathBuf::from("mia.json"),
        message: "expected value at line 1".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("mia.json"));
    assert!(display.contains("expected value"));
}

#[test]
fn test_buildError_missingRoot_shouldDisplayPath() {
    let error = BuildError::MissingRoot(PathBuf::from("/nowhere"));
    assert!(format!("{}", error).contains("/nowhere"));
}

#[test]
fn test_localeError_missingLocale_shouldNameLocale() {
    let error = LocaleError::MissingLocale("de".to_string());
    assert_eq!(format!("{}", error), "Locale 'de' is missing from the dictionary");
}

#[test]
fn test_appError_fromLocaleError_shouldWrapCorrectly() {
    let app_error: AppError = LocaleError::NotAnObject.into();
    let display = format!("{}", app_error);
    assert!(display.starts_with("Locale error"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let app_error: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(app_error, AppError::Unknown(ref m) if m == "boom"));
}
