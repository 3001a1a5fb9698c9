//! # Fall-Risk Dataset Validator
//!
//! Validation engine for the fall-risk tabular dataset. This crate checks a
//! CSV release against its schema and quality report:
//!
//! - File presence (dataset, schema, sample, quality report)
//! - Schema alignment (column names, column order, row count)
//! - Field constraints (dtype, integrality, binary and categorical sets, ranges)
//! - Documented percentiles
//! - Sample subset shape and id containment
//! - Label balance and key uniqueness
//! - Quality report score
//!
//! ## Example
//!
//! ```rust
//! use fallrisk_core::{CheckKind, FieldBuilder, FieldType, SchemaBuilder, ValidationConfig};
//! use fallrisk_validator::{DataSet, DatasetValidator, Fixtures};
//!
//! let schema = SchemaBuilder::new(2)
//!     .field(FieldBuilder::new("participant_id", FieldType::String).build())
//!     .field(FieldBuilder::new("label_high_fall_risk", FieldType::Binary).build())
//!     .build();
//! let dataset = DataSet::from_csv_reader(
//!     "participant_id,label_high_fall_risk\nP1,0\nP2,1\n".as_bytes(),
//! )
//! .unwrap();
//!
//! let config = ValidationConfig::builder()
//!     .only([CheckKind::SchemaAlignment, CheckKind::FieldConstraints])
//!     .build()
//!     .unwrap();
//! let fixtures = Fixtures::in_memory().with_schema(schema).with_dataset(dataset);
//!
//! let report = DatasetValidator::new(config).run_with(&fixtures);
//! assert!(report.passed, "{:?}", report.errors());
//! ```

mod constraints;
mod dataset;
mod engine;
mod error;
mod files;
mod quality;
mod report;
mod sample;
mod schema;
mod stats;

pub use constraints::*;
pub use dataset::*;
pub use engine::*;
pub use error::*;
pub use files::*;
pub use quality::*;
pub use report::*;
pub use sample::*;
pub use schema::*;
pub use stats::*;
