/*!
 * # wosc-guides - static guide pages for the WOSC community site
 *
 * A Rust library that turns bot-produced JSON content into static HTML guide
 * pages and keeps the site's sitemap and locale dictionary in shape.
 *
 * ## Features
 *
 * - Hero guides per game generation, generation meta summaries, expert
 *   guides and standalone guides (alliance mobilization)
 * - A deliberately small markdown subset: `**bold**`, `_italic_` and
 *   blank-line paragraphs
 * - Append-only sitemap updates
 * - FAQ/SEO locale gap filling from a fallback locale
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management, including the entity catalog
 * - `content`: Loading locale-keyed content documents
 * - `markdown`: Markdown-subset rendering
 * - `html`: Page template and attribute escaping
 * - `catalog`: Entities to build and their file/page locations
 * - `url_registry`: Deduplicated set of generated URLs
 * - `sitemap`: Sitemap merging
 * - `page_builder`: The page build run
 * - `locale_filler`: FAQ/SEO locale filling
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO locale code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod catalog;
pub mod content;
pub mod errors;
pub mod file_utils;
pub mod html;
pub mod language_utils;
pub mod locale_filler;
pub mod markdown;
pub mod page_builder;
pub mod sitemap;
pub mod url_registry;

// Re-export main types for easier usage
pub use app_config::Config;
pub use content::{ContentDocument, load_content};
pub use html::escape_attribute;
pub use markdown::render_markdown_subset;
pub use page_builder::{BuildReport, PageBuilder, PageDescriptor};
pub use locale_filler::{FillReport, LocaleDictionary, LocaleFiller};
pub use url_registry::UrlRegistry;
pub use errors::{AppError, BuildError, ContentError, LocaleError};
