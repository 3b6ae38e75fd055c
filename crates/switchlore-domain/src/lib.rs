//! SwitchLore Domain Layer
//!
//! Core value types and trait boundaries shared by every SwitchLore crate.
//!
//! ## Key Concepts
//!
//! - **ConfigFile**: one ingested switch configuration (identifier + raw text)
//! - **FieldMap**: a loosely-typed record produced by an extraction strategy
//! - **ExtractionRow**: a field map stamped with its `source_file` provenance
//! - **Table**: the column-unified view handed to output sinks
//! - **Actions and templates**: the two extraction strategies, behind traits
//!
//! ## Architecture
//!
//! Infrastructure lives elsewhere:
//! - `switchlore-templates` implements [`traits::TemplateParser`]
//! - `switchlore-extractor` implements [`traits::ExtractionAction`] and runs queries

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config_file;
pub mod error;
pub mod options;
pub mod record;
pub mod table;
pub mod traits;

// Re-exports for convenience
pub use config_file::ConfigFile;
pub use error::{ActionError, ReservedFieldError, TemplateError};
pub use options::ActionOptions;
pub use record::{ExtractionRow, FieldMap, SOURCE_FILE_FIELD};
pub use table::Table;
pub use traits::{ActionInput, ExtractionAction, TemplateParser};
