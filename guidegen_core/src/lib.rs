//! `guidegen_core` turns a corpus of guides into the documents and example
//! projects of a documentation website. A guide is a directory with a
//! `metadata.json`, an asciidoc document and optionally the sources of one or
//! more example applications.
//!
//! ## Processing Pipeline
//!
//! ```text
//! guides/<slug>/metadata.json
//!   → Parser (schema gate, deserialization)
//!   → Merger (base guide inheritance)
//!   → Defaults (languages, build tools, slug, document, app names)
//!   → Option matrix (build tool × language × test framework)
//!   → Macro pipeline (one ordered pass per handler, per variant)
//!   → DocumentConverter / ProjectGenerator / file transfer
//! ```
//!
//! ## Modules
//!
//! - [`config`]: configuration loading from `guidegen.toml`.
//! - [`macros`]: the macro vocabulary, its scanners and the ordered
//!   [`MacroPipeline`](macros::MacroPipeline).
//! - [`paths`]: naming conventions shared by the macros and the file
//!   transfer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use guidegen_core::GuidesConfig;
//! use guidegen_core::ManifestGenerator;
//! use guidegen_core::PassthroughConverter;
//! use guidegen_core::WebsiteGenerator;
//!
//! let root = Path::new(".");
//! let config = GuidesConfig::load_or_default(root).unwrap();
//! let jdk = config.resolve_jdk_version().unwrap();
//! let website = WebsiteGenerator::new(&config, &PassthroughConverter, &ManifestGenerator, jdk);
//! let report = website.generate(root, Path::new("build/site")).unwrap();
//! for failure in &report.failures {
//!     eprintln!("{}: {}", failure.slug, failure.error);
//! }
//! ```

pub use config::*;
pub use error::*;
pub use guide::*;
pub use merger::*;
pub use options::*;
pub use parser::*;
pub use render::*;
pub use schema::*;
pub use transfer::*;
pub use website::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod guide;
pub mod macros;
mod merger;
mod options;
mod parser;
pub mod paths;
mod render;
mod schema;
mod transfer;
mod website;

#[cfg(test)]
mod __fixtures;
