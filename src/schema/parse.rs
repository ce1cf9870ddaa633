use itertools::Itertools;
use peg::error::ParseError;
use peg::str::LineCol;

use super::ast::{PrimitiveKind, TObject, TProperty, TPropertyType, TypeDescriptor, TypeSet};
use super::error::SchemaError;
use super::lex::{Token, TokenStream};

const DUPLICATE_PROPERTY: &str = "property names must be unique within an object";
const AMBIGUOUS_MAIN_TYPE: &str = "exactly one type must be unnamed";
const DUPLICATE_TYPE: &str = "type names must be unique";

const SEMANTIC_MESSAGES: [&str; 3] = [DUPLICATE_PROPERTY, AMBIGUOUS_MAIN_TYPE, DUPLICATE_TYPE];

fn check_property_names(properties: &[TProperty]) -> Result<(), &'static str> {
    if properties.iter().map(|p| &p.property_name).all_unique() {
        Ok(())
    } else {
        Err(DUPLICATE_PROPERTY)
    }
}

fn check_type_names(types: &[TypeDescriptor]) -> Result<(), &'static str> {
    if types.len() < 2 {
        return Ok(());
    }

    if types.iter().filter(|t| t.is_main()).count() != 1 {
        return Err(AMBIGUOUS_MAIN_TYPE);
    }

    if types
        .iter()
        .filter(|t| !t.is_main())
        .map(|t| &t.name)
        .all_unique()
    {
        Ok(())
    } else {
        Err(DUPLICATE_TYPE)
    }
}

peg::parser! {

    pub grammar schema_parser() for TokenStream {

        rule kw_type() = quiet!{[Token::Type]} / expected!("`type`")
        rule kw_interface() = quiet!{[Token::Interface]} / expected!("`interface`")
        rule lbrace() = quiet!{[Token::LBrace]} / expected!("`{`")
        rule rbrace() = quiet!{[Token::RBrace]} / expected!("`}`")
        rule array_suffix() -> () = quiet!{[Token::ArraySuffix] {}} / expected!("`[]`")
        rule question() -> () = quiet!{[Token::Question] {}} / expected!("`?`")
        rule comma() = quiet!{[Token::Comma]} / expected!("`,`")
        rule colon() = quiet!{[Token::Colon]} / expected!("`:`")
        rule equals() = quiet!{[Token::Equals]} / expected!("`=`")

        rule identifier() -> String =
            quiet!{
                t:[Token::Identifier(_)] {
                    t.identifier().unwrap_or_default().to_string()
                }
            } / expected!("identifier")

        rule primitive_type() -> PrimitiveKind =
            quiet!{
                t:[Token::Primitive(_)] {
                    t.primitive().unwrap_or(PrimitiveKind::Unrecognized)
                }
            } / expected!("primitive type")

        rule property_type() -> TPropertyType =
            primitive:primitive_type() { TPropertyType::Primitive { primitive } }
            / name:identifier() { TPropertyType::Identifier { name } }
            / object:object() { TPropertyType::Object { object } }

        // An inline object consumes its own `[]`, so the property only sees a second one.
        rule property() -> TProperty =
            property_name:identifier() optional:question()? colon()
            property_type:property_type() array:array_suffix()? {
                TProperty {
                    property_name,
                    is_optional: optional.is_some(),
                    is_array: array.is_some(),
                    property_type,
                }
            }

        rule object() -> TObject =
            lbrace() properties:(property() ** comma()) rbrace() array:array_suffix()? {?
                check_property_names(&properties).map(|_| TObject {
                    properties,
                    is_array: array.is_some(),
                })
            }

        rule type_name() -> String =
            kw_type() name:identifier() equals() { name }
            / kw_interface() name:identifier() { name }

        rule type_descriptor() -> TypeDescriptor =
            name:type_name()? object:object() {
                TypeDescriptor {
                    name: name.unwrap_or_default(),
                    object,
                }
            }

        pub rule types() -> TypeSet =
            descriptors:type_descriptor()+ {?
                check_type_names(&descriptors).map(|_| TypeSet::new(descriptors))
            }
    }
}

fn syntax_error(error: ParseError<LineCol>) -> SchemaError {
    let expected = error.expected.tokens().collect_vec();

    // Semantic checks fail at the furthest position reached, next to the plain token expectations.
    let message = match expected.iter().find(|t| SEMANTIC_MESSAGES.contains(*t)) {
        Some(semantic) => semantic.to_string(),
        None => format!("expected one of: {}", expected.iter().sorted().join(", ")),
    };

    SchemaError::Syntax {
        message,
        line: error.location.line,
        column: error.location.column,
    }
}

pub fn parse_tokens(tokens: &TokenStream) -> Result<TypeSet, SchemaError> {
    schema_parser::types(tokens).map_err(syntax_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::lex::tokenize;

    fn parse(text: &str) -> Result<TypeSet, SchemaError> {
        parse_tokens(&tokenize(text).unwrap())
    }

    #[test]
    fn parses_primitive_properties() {
        let set = parse("{ name: string, age?: integer, tags: string[] }").unwrap();
        let main = set.main_type().unwrap();

        assert_eq!(main.object.properties.len(), 3);
        assert!(!main.object.is_array);

        let age = main.object.property("age").unwrap();
        assert!(age.is_optional);
        assert_eq!(
            age.property_type,
            TPropertyType::Primitive {
                primitive: PrimitiveKind::Integer
            }
        );

        let tags = main.object.property("tags").unwrap();
        assert!(tags.is_array);
        assert!(!tags.is_optional);
    }

    #[test]
    fn array_suffix_binds_to_inline_object() {
        let set = parse("{ items: { id: integer }[] }").unwrap();
        let items = set.main_type().unwrap().object.property("items").unwrap();

        assert!(!items.is_array);
        let TPropertyType::Object { object } = &items.property_type else {
            panic!("expected inline object, got {:?}", items.property_type);
        };
        assert!(object.is_array);
    }

    #[test]
    fn top_level_array() {
        let set = parse("{ name: string }[]").unwrap();
        assert!(set.main_type().unwrap().object.is_array);
    }

    #[test]
    fn empty_object() {
        let set = parse("{}").unwrap();
        assert!(set.main_type().unwrap().object.properties.is_empty());
    }

    #[test]
    fn named_types_and_forward_references() {
        let set = parse(
            "{ home: Address, work?: Address }
             type Address = { street: string, geo: Point }
             interface Point { lat: float, lng: float }",
        )
        .unwrap();

        assert_eq!(set.types.len(), 3);
        assert!(set.types[0].is_main());
        assert_eq!(set.types[1].name, "Address");
        assert_eq!(set.types[2].name, "Point");
        assert_eq!(
            set.types[1].object.property("geo").unwrap().property_type,
            TPropertyType::Identifier {
                name: "Point".to_string()
            }
        );
    }

    #[test]
    fn single_named_type_is_accepted() {
        let set = parse("type Only = { a: string }").unwrap();
        assert!(set.main_type().is_none());
    }

    #[test]
    fn duplicate_property_names() {
        let err = parse("{ name: string, name: integer }").unwrap_err();
        assert!(err.message().contains("unique"), "{err}");
    }

    #[test]
    fn duplicate_property_names_in_nested_object() {
        let err = parse("{ outer: { a: string, a: string }[] }").unwrap_err();
        assert_eq!(err.message(), DUPLICATE_PROPERTY);
    }

    #[test]
    fn two_unnamed_types() {
        let err = parse("{ a: string } { b: string }").unwrap_err();
        assert_eq!(err.message(), AMBIGUOUS_MAIN_TYPE);
    }

    #[test]
    fn no_unnamed_type_among_several() {
        let err = parse("type A = { a: string } type B = { b: string }").unwrap_err();
        assert_eq!(err.message(), AMBIGUOUS_MAIN_TYPE);
    }

    #[test]
    fn duplicate_type_names() {
        let err = parse("{ a: A } type A = { x: string } interface A { y: string }").unwrap_err();
        assert!(err.message().contains("unique"), "{err}");
        assert_eq!(err.message(), DUPLICATE_TYPE);
    }

    #[test]
    fn missing_colon_is_positioned() {
        let err = parse("{\n  name string\n}").unwrap_err();
        assert!(matches!(err, SchemaError::Syntax { .. }));
        assert_eq!((err.line(), err.column()), (2, 8));
        assert!(err.message().contains("`:`"), "{err}");
    }

    #[test]
    fn unterminated_object_reports_end_of_input() {
        let err = parse("{ name: string").unwrap_err();
        assert_eq!((err.line(), err.column()), (1, 15));
        assert!(err.message().contains("`}`"), "{err}");
    }

    #[test]
    fn keyword_is_not_a_property_name() {
        assert!(parse("{ type: string }").is_err());
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(parse("   ").is_err());
    }

    #[test]
    fn parsing_is_idempotent() {
        let text = "{ a: { b: B[] }[], c?: number } type B = { d: boolean }";
        assert_eq!(parse(text).unwrap(), parse(text).unwrap());
    }
}
