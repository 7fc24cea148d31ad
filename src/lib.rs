/*!
 * # tvsqlgen - TV series fixture to SQL migration generator
 *
 * Converts three XML fixtures (countries, genres and a TV series catalog)
 * into five ordered SQL `INSERT` scripts.
 *
 * ## Features
 *
 * - Country and genre lookup tables in document order
 * - Series table in a randomized order (optionally seeded)
 * - Series-country and series-genre join tables resolving ids through
 *   subqueries on the localized series name
 * - Locale-aware comparison of the airing status
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `locale`: Collation context for status comparison
 * - `models`: Series entity model
 * - `xml_extractor`: XML fixture extraction
 * - `shuffler`: Random ordering of the series catalog
 * - `sql_emitter`: SQL script rendering and writing
 * - `app_controller`: The five-step pipeline
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod locale;
pub mod models;
pub mod xml_extractor;
pub mod shuffler;
pub mod sql_emitter;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use errors::{AppError, AppResult};
pub use locale::{Collator, CollationStrength, LocaleCollator, LocaleConfig};
pub use models::{Series, SeriesCatalog};
pub use sql_emitter::{MigrationStep, SqlEmitter};
pub use xml_extractor::XmlExtractor;
