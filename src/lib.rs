//! Infer a JSON schema for Helm-style values files.
//!
//! The effective values (base with overrides merged in) determine every
//! fragment's type and default; the base file alone decides which keys are
//! `required`. Toggleable blocks carrying `enabled: false` are never required.
//!
//! ```
//! use values_schema::{generate, GenerateOptions, ValueNode};
//!
//! let base = ValueNode::from(serde_json::json!({"replicas": 1, "ingress": {"enabled": false}}));
//! let schema = generate(&base, &[], &GenerateOptions::default()).unwrap();
//! assert_eq!(schema.required_fields(), ["replicas"]);
//! ```
pub mod assemble;
pub mod cli;
pub mod config;
pub mod error;
pub mod inference;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod path_de;
pub mod prune;
pub mod required;
pub mod schema;
pub mod value;

pub use assemble::{generate, to_json_pretty};
pub use config::{ConfigFile, GenerateOptions};
pub use error::{Error, Result};
pub use inference::{infer, InferOptions};
pub use merge::{deep_merge, merge_layers};
pub use prune::prune_required;
pub use required::required_fields;
pub use schema::{SchemaFragment, SchemaType, TypeName};
pub use value::{Object, ValueNode};
