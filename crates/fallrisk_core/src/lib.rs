//! # Fall-Risk Dataset Core
//!
//! Core data structures for validating the fall-risk tabular dataset.
//!
//! The dataset ships with a schema (declared columns, types, ranges and
//! documented percentiles) and a precomputed quality report. This crate
//! models both, along with the configuration and report types shared by the
//! parser, validator and CLI crates.
//!
//! ## Key Concepts
//!
//! - **Schema**: Declared structural and statistical contract for the dataset
//! - **Quality Report**: Precomputed summary statistics artifact
//! - **Percentile Threshold**: Expected quantile value, used as a drift check
//! - **Check**: One independent property of the dataset, reported on its own
//!
//! ## Example
//!
//! ```rust
//! use fallrisk_core::{FieldBuilder, FieldType, SchemaBuilder, ValidationConfig};
//!
//! let schema = SchemaBuilder::new(1)
//!     .field(FieldBuilder::new("participant_id", FieldType::String).build())
//!     .field(FieldBuilder::new("label_high_fall_risk", FieldType::Binary).build())
//!     .build();
//!
//! let config = ValidationConfig::builder()
//!     .data_dir("datasets/fallrisk")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.fields.len(), 2);
//! assert_eq!(config.label_column, "label_high_fall_risk");
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod quality;
pub mod schema;
pub mod validator;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use quality::*;
pub use schema::*;
pub use validator::*;
