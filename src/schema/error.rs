use super::ast::PrimitiveKind;

/// Label used for violations on the value itself rather than on one of its properties.
pub const ROOT_LABEL: &str = "(root)";

pub const LITERAL_FAILURE_PREFIX: &str = "failed to parse literal value: ";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{message} at line {line}, column {column}")]
    Lex {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("{message} at line {line}, column {column}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },
}

impl SchemaError {
    pub fn message(&self) -> &str {
        match self {
            SchemaError::Lex { message, .. } | SchemaError::Syntax { message, .. } => message,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            SchemaError::Lex { line, .. } | SchemaError::Syntax { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            SchemaError::Lex { column, .. } | SchemaError::Syntax { column, .. } => *column,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("schema does not declare an unnamed main type")]
    SchemaMissingMainType,

    #[error("property `{property}` must be of type {}", .expected.keyword())]
    TypeMismatch {
        property: String,
        expected: PrimitiveKind,
    },

    #[error("missing required property `{name}`")]
    MissingRequiredProperty { name: String },

    #[error("property `{property}` must be an array")]
    ExpectedArray { property: String },

    #[error("property `{property}` must be an object")]
    ExpectedObject { property: String },

    #[error("type `{name}` is referenced but not declared")]
    ReferenceNotFound { name: String },

    #[error("unexpected property `{name}`")]
    ExtraProperty { name: String },

    #[error("{}{}", LITERAL_FAILURE_PREFIX, .message)]
    LiteralParseFailure { message: String },
}
