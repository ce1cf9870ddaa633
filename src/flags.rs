use itertools::Itertools;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{
    generate_declaration, generation::FALLBACK_DECLARATION, literal::parse_literal, parse_schema,
    validate_value, SchemaError, TypeSet, ValidationError,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FlagError {
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("default does not match schema: {0}")]
    Default(#[from] ValidationError),

    #[error("`{0}` is not one of the declared values")]
    UnknownValue(String),

    #[error("flag declares no values")]
    NoValues,
}

/// One flag as an operator declares it. Object flags keep their schema and default as text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlagDefinition {
    Boolean {
        default: bool,
    },
    Integer {
        default: i64,
    },
    String {
        default: String,
    },
    Object {
        schema: String,
        default: String,
    },
    Enum {
        values: Vec<String>,
        default: String,
    },
    Tag {
        values: Vec<String>,
        #[serde(default)]
        default: Vec<String>,
    },
    AbTest {
        variants: Vec<String>,
        default: String,
    },
}

fn quoted(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

fn union_of(values: &[String]) -> String {
    values.iter().sorted().dedup().map(|v| quoted(v)).join(" | ")
}

fn check_member(values: &[String], value: &str) -> Result<(), FlagError> {
    if values.is_empty() {
        Err(FlagError::NoValues)
    } else if values.iter().any(|v| v == value) {
        Ok(())
    } else {
        Err(FlagError::UnknownValue(value.to_string()))
    }
}

impl FlagDefinition {
    pub fn kind(&self) -> &'static str {
        match self {
            FlagDefinition::Boolean { .. } => "boolean",
            FlagDefinition::Integer { .. } => "integer",
            FlagDefinition::String { .. } => "string",
            FlagDefinition::Object { .. } => "object",
            FlagDefinition::Enum { .. } => "enum",
            FlagDefinition::Tag { .. } => "tag",
            FlagDefinition::AbTest { .. } => "ab_test",
        }
    }

    /// Parsed schema of an object flag, `None` for every other kind.
    pub fn schema(&self) -> Option<Result<TypeSet, SchemaError>> {
        match self {
            FlagDefinition::Object { schema, .. } => Some(parse_schema(schema)),
            _ => None,
        }
    }

    /// The default as literal source text. Value sets are sorted so the output does not depend
    /// on declaration order.
    pub fn default_literal(&self) -> String {
        match self {
            FlagDefinition::Boolean { default } => default.to_string(),
            FlagDefinition::Integer { default } => default.to_string(),
            FlagDefinition::String { default } => quoted(default),
            FlagDefinition::Object { default, .. } => match parse_literal(default) {
                Ok(value) => value.to_string(),
                Err(_) => default.clone(),
            },
            FlagDefinition::Enum { default, .. } | FlagDefinition::AbTest { default, .. } => {
                quoted(default)
            }
            FlagDefinition::Tag { default, .. } => {
                format!("[{}]", default.iter().sorted().map(|v| quoted(v)).join(", "))
            }
        }
    }

    /// TypeScript type of the flag value.
    pub fn type_literal(&self) -> String {
        match self {
            FlagDefinition::Boolean { .. } => "boolean".to_string(),
            FlagDefinition::Integer { .. } => "number".to_string(),
            FlagDefinition::String { .. } => "string".to_string(),
            FlagDefinition::Object { schema, .. } => match parse_schema(schema) {
                Ok(schema) => generate_declaration(&schema),
                Err(_) => FALLBACK_DECLARATION.to_string(),
            },
            FlagDefinition::Enum { values, .. } => union_of(values),
            FlagDefinition::AbTest { variants, .. } => union_of(variants),
            FlagDefinition::Tag { values, .. } => format!("Array<{}>", union_of(values)),
        }
    }

    pub fn check(&self) -> Result<(), FlagError> {
        match self {
            FlagDefinition::Boolean { .. }
            | FlagDefinition::Integer { .. }
            | FlagDefinition::String { .. } => Ok(()),
            FlagDefinition::Object { schema, default } => {
                let schema = parse_schema(schema)?;
                validate_value(&schema, default.as_str())?;
                Ok(())
            }
            FlagDefinition::Enum { values, default } => check_member(values, default),
            FlagDefinition::AbTest { variants, default } => check_member(variants, default),
            FlagDefinition::Tag { values, default } => {
                if values.is_empty() {
                    return Err(FlagError::NoValues);
                }
                default.iter().try_for_each(|tag| check_member(values, tag))
            }
        }
    }
}
