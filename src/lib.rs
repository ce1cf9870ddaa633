//! Schema language for structured (object-kind) feature flag values.
//!
//! Schema text such as
//!
//! ```text
//! { server: string, port?: integer, mirrors: Mirror[] }
//! type Mirror = { host: string, weight: float }
//! ```
//!
//! is parsed into a [`schema::TypeSet`], which can then validate candidate values and be
//! rendered into TypeScript declarations and Zod validators.

pub mod configuration;
pub mod export;
pub mod flags;
pub mod schema;

pub use schema::{
    generate_declaration, generate_validator_expression, parse_schema, validate_value,
    SchemaParser,
};
