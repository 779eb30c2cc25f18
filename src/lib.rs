//! # hdrwiz - Embedded-Project Wizard Core
//!
//! hdrwiz extracts structured build metadata from semi-structured comments
//! in C header files and turns it into the catalogs an embedded-project
//! wizard needs: which firmware modules exist and what they depend on,
//! which `#define` parameters each configuration header exposes, which
//! enum choice lists back them, and which CPUs the tree supports.
//!
//! ## What it does
//!
//! - **Annotation parsing**: `$WIZARD`, `$WIZARD_MODULE` and `$WIZARD_LIST`
//!   markers inside doxygen comments carry declarative data payloads;
//!   payloads are parsed by a restricted literal grammar, never executed
//! - **Catalog aggregation**: sorted directory walks merge per-file records
//!   into module, parameter, enum-list and CPU catalogs, last-wins
//! - **Header rewriting**: a word-boundary-safe `#define` value
//!   substitution primitive writes user choices back into copied headers
//!
//! The GUI wizard, toolchain probing and project scaffolding live outside
//! this crate; they call in through the loaders below.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! let scan = hdrwiz::load_module_catalog(Path::new("sources/firmware")).unwrap();
//! for (name, module) in &scan.catalog {
//!     println!("{name}: depends on {:?}", module.depends);
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`comment`] - comment/define block extraction, three styles
//! - [`annotation`] - wizard marker detection and payload splitting
//! - [`literal`] - restricted data-literal grammar
//! - [`params`] - configuration-parameter catalogs
//! - [`modules`] - module catalogs
//! - [`lists`] - enum value-list catalogs
//! - [`cpu`] - CPU definition files (`.cdef`)
//! - [`define`] - `#define` splitting and value substitution

/// Wizard marker detection and payload splitting.
pub mod annotation;

/// Comment-block extraction from raw header text.
pub mod comment;

/// CPU definition (`.cdef`) loading with template includes.
pub mod cpu;

/// `#define` fragment splitting and value substitution.
pub mod define;

/// Error taxonomy.
pub mod error;

/// Enum value-list catalogs (`$WIZARD_LIST`).
pub mod lists;

/// Restricted data-literal grammar for annotation payloads.
pub mod literal;

/// Module catalogs (`$WIZARD_MODULE`).
pub mod modules;

/// Configuration-parameter catalogs (`$WIZARD`).
pub mod params;

/// Sorted directory walks and partial-result carriers.
pub mod scan;

/// Toolchain identification-output parsing.
pub mod toolchain;

/// Source-tree identification (VERSION probe).
pub mod tree;

pub use annotation::AnnotationKind;
pub use comment::{DefinitionBlock, definition_blocks};
pub use cpu::{CpuDefinition, load_cpu_definitions};
pub use define::{split_define, substitute};
pub use error::{ParseWarning, WizardError};
pub use lists::{EnumCatalog, load_enum_catalog};
pub use modules::{ModuleCatalog, ModuleRecord, load_module_catalog};
pub use params::{ConfigurationCatalog, ParamType, Parameter, load_configuration_catalog};
pub use scan::{CatalogScan, ScanFailure};
pub use toolchain::{ToolchainInfo, parse_toolchain_info};
pub use tree::{is_source_tree, source_tree_version};
