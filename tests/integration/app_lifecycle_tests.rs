/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use std::fs;
use wosc_guides::app_config::Config;
use wosc_guides::app_controller::Controller;
use crate::common::{self, TestSite};

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config().locales.reference, "de");
    Ok(())
}

/// Test that an invalid configuration is rejected up front
#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.site.base_url = "::".to_string();
    assert!(Controller::with_config(config).is_err());
}

/// Test a build through the controller using a content override
#[test]
fn test_controller_build_withContentOverride_shouldWritePages() -> Result<()> {
    let config = common::small_config();
    let site = TestSite::new(&config)?;
    common::create_content(site.content_dir(), "philly.json", "Philly heals.")?;

    let controller = Controller::with_config(config)?;
    let report = controller.build(site.root.path(), Some(site.content_dir()))?;

    assert!(site.output("heroes/philly.html").is_file());
    assert_eq!(report.pages.len(), 3);
    Ok(())
}

/// Test that the configured content directory is resolved against the site root
#[test]
fn test_controller_build_withConfiguredContentDir_shouldResolveAgainstRoot() -> Result<()> {
    let mut config = common::small_config();
    config.paths.content_dir = "bot/jsons".into();
    let root = common::create_temp_dir()?;
    let content = root.path().join("bot").join("jsons");
    fs::create_dir_all(&content)?;
    common::create_content(&content, "flint.json", "Flint.")?;

    let controller = Controller::with_config(config)?;
    controller.build(root.path(), None)?;

    assert!(root.path().join("guides/heroes/flint.html").is_file());
    // No sitemap at the root: nothing is created
    assert!(!root.path().join("sitemap.xml").exists());
    Ok(())
}

/// Test that a missing content root is an error
#[test]
fn test_controller_build_withMissingRoot_shouldFail() -> Result<()> {
    let root = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;

    assert!(controller.build(root.path(), None).is_err());
    Ok(())
}

/// Test the locale fill through the controller
#[test]
fn test_controller_fill_locales_shouldFillFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "index.json",
        r#"{"de": {"faq.1": "a"}, "en": {"faq.1": "A"}, "fr": {}}"#,
    )?;

    let controller = Controller::new_for_test()?;
    let report = controller.fill_locales(&path)?;

    assert_eq!(report.filled_count(), 1);
    let data: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(data["fr"]["faq.1"], "A");
    Ok(())
}
