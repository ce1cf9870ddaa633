//! Text back-ends for a parsed schema: TypeScript type declarations and Zod validator
//! expressions. Both are previews for developers and never fail; anything they cannot
//! render falls back to a permissive type or an empty schema.

use itertools::Itertools;

use super::ast::{PrimitiveKind, TObject, TProperty, TPropertyType, TypeSet};

pub const FALLBACK_DECLARATION: &str = "object";
pub const EMPTY_VALIDATOR: &str = "z.object({})";

fn array_of(inner: String) -> String {
    format!("Array<{inner}>")
}

fn scalar_name(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Boolean => "boolean",
        PrimitiveKind::Integer | PrimitiveKind::Float | PrimitiveKind::Number => "number",
        PrimitiveKind::String => "string",
        PrimitiveKind::Unrecognized => {
            log::warn!("unrecognized primitive kind, declaring as `{FALLBACK_DECLARATION}`");
            FALLBACK_DECLARATION
        }
    }
}

fn declare_object(object: &TObject) -> String {
    let body = if object.properties.is_empty() {
        "{}".to_string()
    } else {
        format!(
            "{{ {} }}",
            object.properties.iter().map(declare_property).join("; ")
        )
    };

    if object.is_array {
        array_of(body)
    } else {
        body
    }
}

fn declare_property(property: &TProperty) -> String {
    let optional = if property.is_optional { "?" } else { "" };
    let mut rendered = declare_type(&property.property_type);
    if property.is_array {
        rendered = array_of(rendered);
    }

    format!("{}{optional}: {rendered}", property.property_name)
}

fn declare_type(property_type: &TPropertyType) -> String {
    match property_type {
        TPropertyType::Primitive { primitive } => scalar_name(*primitive).to_string(),
        // must already be in scope for the consumer
        TPropertyType::Identifier { name } => name.clone(),
        TPropertyType::Object { object } => declare_object(object),
    }
}

/// TypeScript type of the main type.
pub fn generate_declaration(schema: &TypeSet) -> String {
    match schema.main_type() {
        Some(main) => declare_object(&main.object),
        None => {
            log::warn!("schema has no main type, declaring as `{FALLBACK_DECLARATION}`");
            FALLBACK_DECLARATION.to_string()
        }
    }
}

/// `(name, TypeScript type)` for every named type, in declaration order.
pub fn render_named_declarations(schema: &TypeSet) -> Vec<(String, String)> {
    schema
        .named_types()
        .map(|t| (t.name.clone(), declare_object(&t.object)))
        .collect()
}

fn zod_primitive(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Boolean => "z.boolean()",
        PrimitiveKind::Integer => "z.number().int()",
        PrimitiveKind::Float | PrimitiveKind::Number => "z.number()",
        PrimitiveKind::String => "z.string()",
        PrimitiveKind::Unrecognized => {
            log::warn!("unrecognized primitive kind, validating with `z.never()`");
            "z.never()"
        }
    }
}

fn zod_object(object: &TObject) -> String {
    let expression = if object.properties.is_empty() {
        EMPTY_VALIDATOR.to_string()
    } else {
        format!(
            "z.object({{ {} }})",
            object.properties.iter().map(zod_property).join(", ")
        )
    };

    if object.is_array {
        format!("z.array({expression})")
    } else {
        expression
    }
}

fn zod_property(property: &TProperty) -> String {
    let mut expression = zod_type(&property.property_type);
    if property.is_array {
        expression = format!("z.array({expression})");
    }
    if property.is_optional {
        expression.push_str(".optional()");
    }

    format!("{}: {expression}", property.property_name)
}

fn zod_type(property_type: &TPropertyType) -> String {
    match property_type {
        TPropertyType::Primitive { primitive } => zod_primitive(*primitive).to_string(),
        // Named types are not carried down here; references accept anything.
        TPropertyType::Identifier { .. } => "z.any()".to_string(),
        TPropertyType::Object { object } => zod_object(object),
    }
}

/// Zod expression validating the main type.
pub fn generate_validator_expression(schema: &TypeSet) -> String {
    match schema.main_type() {
        Some(main) => zod_object(&main.object),
        None => {
            log::warn!("schema has no main type, validating with `{EMPTY_VALIDATOR}`");
            EMPTY_VALIDATOR.to_string()
        }
    }
}
