pub mod ast;
pub mod error;
pub mod generation;
mod lex;
pub mod literal;
mod parse;
mod validate_value;

pub use ast::{PrimitiveKind, TObject, TProperty, TPropertyType, TypeDescriptor, TypeSet};
pub use error::{SchemaError, ValidationError};
pub use generation::{
    generate_declaration, generate_validator_expression, render_named_declarations,
};
pub use validate_value::{validate_value, Candidate};

/// Tokenizer and grammar behind a single call.
///
/// Both stages are generated parsers whose state lives on the stack of each call, so one
/// instance can be shared freely between threads and reused for every keystroke.
#[derive(Copy, Clone, Debug, Default)]
pub struct SchemaParser;

impl SchemaParser {
    pub fn new() -> Self {
        SchemaParser
    }

    pub fn parse(&self, text: &str) -> Result<TypeSet, SchemaError> {
        let tokens = lex::tokenize(text)?;
        log::trace!("schema text lexed into {} tokens", tokens.len());

        let schema = parse::parse_tokens(&tokens)?;
        log::debug!("parsed schema with {} type(s)", schema.types.len());
        Ok(schema)
    }
}

pub fn parse_schema(text: &str) -> Result<TypeSet, SchemaError> {
    SchemaParser::new().parse(text)
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn lex_errors_surface_through_parse() {
        let err = parse_schema("{ name: string; }").unwrap_err();
        assert!(matches!(err, SchemaError::Lex { line: 1, column: 15, .. }));
        assert_eq!(
            err.to_string(),
            "unexpected character `;` at line 1, column 15"
        );
    }

    #[test]
    fn deeply_nested_text_returns_an_error() {
        let text = format!("{}string{}", "{ x: ".repeat(1000), " }".repeat(1000));
        let err = parse_schema(&text).unwrap_err();
        assert!(err.message().contains("nested"), "{err}");
    }

    #[test]
    fn shared_parser_across_threads() {
        let parser = SchemaParser::new();
        let handles = (0..4)
            .map(|i| {
                thread::spawn(move || {
                    let text = format!("{{ field{i}: integer }}");
                    parser.parse(&text).map(|s| s.types.len())
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(1));
        }
    }

    #[test]
    fn failed_parse_does_not_affect_next_call() {
        let parser = SchemaParser::new();
        assert!(parser.parse("{ a: string, a: string }").is_err());
        assert!(parser.parse("{ a: string }").is_ok());
    }
}
