use std::borrow::Cow;

use serde_json::Value;

use super::ast::{PrimitiveKind, TObject, TProperty, TPropertyType, TypeSet};
use super::error::{ValidationError, ROOT_LABEL};
use super::literal::parse_literal;

type ValidateResult = Result<(), ValidationError>;

/// A value to check: either already structured, or object-literal text typed by an operator.
#[derive(Clone, Copy, Debug)]
pub enum Candidate<'a> {
    Value(&'a Value),
    Literal(&'a str),
}

impl<'a> From<&'a Value> for Candidate<'a> {
    fn from(value: &'a Value) -> Self {
        Candidate::Value(value)
    }
}

impl<'a> From<&'a str> for Candidate<'a> {
    fn from(text: &'a str) -> Self {
        Candidate::Literal(text)
    }
}

pub fn validate_value<'a>(schema: &TypeSet, candidate: impl Into<Candidate<'a>>) -> ValidateResult {
    log::debug!("validating value against schema with {} type(s)", schema.types.len());

    let main = schema
        .main_type()
        .ok_or(ValidationError::SchemaMissingMainType)?;

    let parsed;
    let value = match candidate.into() {
        Candidate::Value(value) => value,
        Candidate::Literal(text) => {
            parsed = parse_literal(text)?;
            &parsed
        }
    };

    ValueValidator { types: schema }.check_object(&main.object, value, ROOT_LABEL)
}

struct ValueValidator<'s> {
    types: &'s TypeSet,
}

impl<'s> ValueValidator<'s> {
    fn check_object(&self, object: &TObject, value: &Value, label: &str) -> ValidateResult {
        if !object.is_array {
            return self.check_properties(&object.properties, value, label);
        }

        let Value::Array(items) = value else {
            return Err(ValidationError::ExpectedArray {
                property: label.to_string(),
            });
        };

        items
            .iter()
            .try_for_each(|item| self.check_properties(&object.properties, item, label))
    }

    fn check_properties(
        &self,
        properties: &[TProperty],
        value: &Value,
        label: &str,
    ) -> ValidateResult {
        let entries: Vec<(Cow<str>, &Value)> = match value {
            Value::Object(map) => map.iter().map(|(k, v)| (Cow::from(k.as_str()), v)).collect(),
            // walked as an object keyed by index, so elements surface as extra properties
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (Cow::from(i.to_string()), v))
                .collect(),
            _ => {
                return Err(ValidationError::ExpectedObject {
                    property: label.to_string(),
                })
            }
        };

        if let Some((extra, _)) = entries
            .iter()
            .find(|(name, _)| !properties.iter().any(|p| p.property_name == *name))
        {
            return Err(ValidationError::ExtraProperty {
                name: extra.to_string(),
            });
        }

        for property in properties {
            let present = entries
                .iter()
                .find(|(name, _)| *name == property.property_name);

            match present {
                Some((_, value)) => self.check_property(property, value)?,
                None if property.is_optional => {}
                None => {
                    return Err(ValidationError::MissingRequiredProperty {
                        name: property.property_name.clone(),
                    })
                }
            }
        }

        Ok(())
    }

    fn check_property(&self, property: &TProperty, value: &Value) -> ValidateResult {
        if !property.is_array {
            return self.check_type(property, value);
        }

        let Value::Array(items) = value else {
            return Err(ValidationError::ExpectedArray {
                property: property.property_name.clone(),
            });
        };

        items
            .iter()
            .try_for_each(|item| self.check_type(property, item))
    }

    fn check_type(&self, property: &TProperty, value: &Value) -> ValidateResult {
        match &property.property_type {
            TPropertyType::Primitive { primitive } => {
                if matches_primitive(*primitive, value) {
                    Ok(())
                } else {
                    Err(ValidationError::TypeMismatch {
                        property: property.property_name.clone(),
                        expected: *primitive,
                    })
                }
            }
            TPropertyType::Identifier { name } => {
                let target =
                    self.types
                        .resolve(name)
                        .ok_or_else(|| ValidationError::ReferenceNotFound {
                            name: name.clone(),
                        })?;
                self.check_object(&target.object, value, &property.property_name)
            }
            TPropertyType::Object { object } => {
                self.check_object(object, value, &property.property_name)
            }
        }
    }
}

fn matches_primitive(kind: PrimitiveKind, value: &Value) -> bool {
    match kind {
        PrimitiveKind::Boolean => value.is_boolean(),
        PrimitiveKind::Integer => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => true,
            Value::Number(n) => n.as_f64().map_or(false, |f| f.is_finite() && f.fract() == 0.0),
            _ => false,
        },
        PrimitiveKind::Float | PrimitiveKind::Number => {
            value.as_f64().map_or(false, |f| !f.is_nan())
        }
        PrimitiveKind::String => value.is_string(),
        PrimitiveKind::Unrecognized => false,
    }
}
