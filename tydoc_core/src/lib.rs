//! `tydoc_core` is the core library for the [tydoc](https://github.com/ifiokjr/tydoc) documentation generator. It renders markdown reference pages for the types described in model files, driven entirely by configurable template strings with `{Placeholder}` tags.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Model files (JSON / TOML / YAML)
//!   → Catalog (loads type descriptions, filters by kind and namespace)
//!   → Categories (sort included types, resolve cross-type links)
//!   → Renderer (binds placeholder values into templates, bottom-up)
//!   → Sink (one file per type plus a category index)
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] — Type sources and inclusion predicates. Loads model files and decides which types a category covers.
//! - [`category`] — The per-category render pipeline: link resolution, member/section/type rendering, and output assembly.
//! - [`generator`] — Configuration loading from `tydoc.toml`, the generation pass, and writing or checking outputs.
//! - [`names`] — Identifier derivation: stable ids, display names, and built-in type aliases.
//!
//! ## Key Types
//!
//! - [`TypeDescription`] — A read-only description of one introspected type.
//! - [`Category`] — A named grouping of types sharing inclusion rules and templates.
//! - [`TemplateSet`] — The template strings used at each rendering context.
//! - [`GeneratorConfig`] — Configuration loaded from `tydoc.toml`.
//! - [`CheckResult`] — Result of comparing rendered output against disk.
//! - [`WriteReport`] — Result of writing rendered output to disk.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use tydoc_core::DirectorySink;
//! use tydoc_core::GeneratorConfig;
//! use tydoc_core::render_run;
//! use tydoc_core::write_outputs;
//!
//! let root = Path::new(".");
//! let config = GeneratorConfig::load_required(root).unwrap();
//! let source = config.source(root);
//!
//! let outputs = render_run(&config.categories, &source, |_progress| {});
//! let report = write_outputs(&outputs, &DirectorySink, &root.join(&config.output_directory));
//! if !report.is_ok() {
//!     eprintln!("{} file(s) could not be written", report.failed.len());
//! }
//! ```

pub use catalog::*;
pub use category::*;
pub use error::*;
pub use generator::*;
pub use model::*;
pub use template::*;

pub mod catalog;
pub mod category;
mod error;
pub mod generator;
pub mod model;
pub mod names;
pub mod template;

#[cfg(test)]
mod __fixtures;
