//! OpenAPI Splitter
//!
//! Splits one large OpenAPI document into per-resource documents, each
//! carrying only the routes of that resource and the schemas they need.
//!
//! Routes are grouped by the first path segment after a prefix (`/v1/` by
//! default), so `/v1/charges` and `/v1/charges/{id}` land in `charges`.
//! For each group the schema table is the transitive closure of every
//! `#/components/schemas/<name>` reference reachable from its routes.
//!
//! # Example
//!
//! ```
//! use openapi_split::{split_document, Document, SplitOptions};
//!
//! let document = Document::parse(r##"
//! openapi: 3.0.0
//! paths:
//!   /v1/refunds:
//!     get:
//!       responses:
//!         "200":
//!           content:
//!             application/json:
//!               schema:
//!                 $ref: "#/components/schemas/refund"
//! components:
//!   schemas:
//!     refund:
//!       properties:
//!         charge:
//!           $ref: "#/components/schemas/charge"
//!     charge:
//!       type: object
//!     customer:
//!       type: object
//! "##).unwrap();
//!
//! let (_, resources) = split_document(&document, &SplitOptions::new()).unwrap();
//! let refunds = &resources[0];
//!
//! assert_eq!(refunds.resource, "refunds");
//! assert!(refunds.required_schemas.contains("charge"));
//! assert!(!refunds.required_schemas.contains("customer"));
//! ```
//!
//! # Leniency
//!
//! | Situation | Behavior |
//! |-----------|----------|
//! | Path outside the prefix | Skipped |
//! | Resource segment is `{param}` | Skipped with a warning |
//! | Reference to an undefined schema | Dropped (error in strict mode) |
//! | One resource fails to write | Reported, others still written |

mod assembler;
mod document;
mod error;
mod grouper;
mod refs;
mod resolver;
mod types;
mod writer;

pub use assembler::{assemble_resource, split_document, ResourceDocument};
pub use document::Document;
pub use error::{LoadError, SplitError, WriteError};
pub use grouper::{group_paths, resource_key, Grouping, ResourceGroup, SkipReason, SkippedPath};
pub use refs::{collect_refs, find_refs, schema_name};
pub use resolver::{dangling_refs, resolve_dependencies};
pub use types::{
    OutputFormat, SplitOptions, DEFAULT_ALWAYS_INCLUDE, DEFAULT_INPUT, DEFAULT_OUTPUT_DIR,
    DEFAULT_PATH_PREFIX, REF_KEY, SCHEMA_REF_PREFIX,
};
pub use writer::{ensure_dir, write_all, write_resource, WriteFailure, WriteReport, WrittenFile};
