/*!
 * Tests for sitemap file updates
 */

use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use wosc_guides::app_config::SitemapConfig;
use wosc_guides::sitemap::{SitemapOutcome, SitemapUpdater, existing_locations};
use crate::common;

fn lastmod() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

/// Test that entries are appended before the closing tag, skipping listed URLs
#[test]
fn test_update_file_shouldAppendOnlyUnlistedUrls() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "sitemap.xml", common::SITEMAP)?;
    let config = SitemapConfig::default();
    let urls = vec![
        "https://www.whiteoutsurvival-community.com/".to_string(),
        "https://www.whiteoutsurvival-community.com/guides/experts/".to_string(),
        "https://www.whiteoutsurvival-community.com/guides/heroes/flint.html".to_string(),
    ];

    let outcome = SitemapUpdater::new(&config, lastmod()).update_file(&path, &urls)?;
    assert_eq!(outcome, SitemapOutcome::Updated { added: 2 });

    let content = fs::read_to_string(&path)?;
    assert!(content.contains(
        "<url><loc>https://www.whiteoutsurvival-community.com/guides/experts/</loc><lastmod>2026-10-18</lastmod></url>\n<url><loc>https://www.whiteoutsurvival-community.com/guides/heroes/flint.html</loc><lastmod>2026-10-18</lastmod></url>\n</urlset>"
    ));
    assert_eq!(existing_locations(&content).len(), 3);
    Ok(())
}

/// Test that the heroes-path guard makes a second run a no-op
#[test]
fn test_update_file_twice_shouldBeGuarded() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "sitemap.xml", common::SITEMAP)?;
    let config = SitemapConfig::default();
    let urls = vec!["https://www.whiteoutsurvival-community.com/guides/heroes/mia.html".to_string()];
    let updater = SitemapUpdater::new(&config, lastmod());

    updater.update_file(&path, &urls)?;
    let after_first = fs::read_to_string(&path)?;

    let outcome = updater.update_file(&path, &urls)?;
    assert_eq!(outcome, SitemapOutcome::Guarded);
    assert_eq!(fs::read_to_string(&path)?, after_first);
    Ok(())
}

/// Test that a missing sitemap is reported and not created
#[test]
fn test_update_file_withMissingSitemap_shouldNotCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("sitemap.xml");
    let config = SitemapConfig::default();

    let outcome = SitemapUpdater::new(&config, lastmod()).update_file(&path, &["https://x.test/".to_string()])?;

    assert_eq!(outcome, SitemapOutcome::Missing);
    assert!(!path.exists());
    Ok(())
}
