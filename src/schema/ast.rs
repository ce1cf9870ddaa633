use serde_derive::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Integer,
    Float,
    Number,
    String,

    /// Kind written by a newer schema writer. Never produced by the parser.
    #[serde(other)]
    Unrecognized,
}

impl PrimitiveKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Number => "number",
            PrimitiveKind::String => "string",
            PrimitiveKind::Unrecognized => "unrecognized",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TPropertyType {
    Primitive { primitive: PrimitiveKind },
    /// Reference to a named type, resolved against the enclosing [`TypeSet`] on use.
    Identifier { name: String },
    Object { object: TObject },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TProperty {
    pub property_name: String,
    pub is_optional: bool,
    pub is_array: bool,
    pub property_type: TPropertyType,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TObject {
    pub properties: Vec<TProperty>,
    pub is_array: bool,
}

impl TObject {
    pub fn property(&self, name: &str) -> Option<&TProperty> {
        self.properties.iter().find(|p| p.property_name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Empty for the main type.
    #[serde(default)]
    pub name: String,
    pub object: TObject,
}

impl TypeDescriptor {
    pub fn is_main(&self) -> bool {
        self.name.is_empty()
    }
}

/// All type declarations of one schema text, in source order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeSet {
    pub types: Vec<TypeDescriptor>,
}

impl TypeSet {
    pub fn new(types: Vec<TypeDescriptor>) -> Self {
        TypeSet { types }
    }

    pub fn main_type(&self) -> Option<&TypeDescriptor> {
        self.types.iter().find(|t| t.is_main())
    }

    pub fn resolve(&self, name: &str) -> Option<&TypeDescriptor> {
        if name.is_empty() {
            return None;
        }
        self.types.iter().find(|t| t.name == name)
    }

    pub fn named_types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.iter().filter(|t| !t.is_main())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_primitive_kind_deserializes_as_unrecognized() {
        let parsed: TPropertyType =
            serde_json::from_str(r#"{"kind":"primitive","primitive":"decimal"}"#).unwrap();
        assert_eq!(
            parsed,
            TPropertyType::Primitive {
                primitive: PrimitiveKind::Unrecognized
            }
        );
    }

    #[test]
    fn resolve_ignores_main_type() {
        let set = TypeSet::new(vec![
            TypeDescriptor {
                name: String::new(),
                object: TObject::default(),
            },
            TypeDescriptor {
                name: "Address".to_string(),
                object: TObject::default(),
            },
        ]);

        assert!(set.resolve("").is_none());
        assert!(set.resolve("Address").is_some());
        assert!(set.main_type().unwrap().is_main());
        assert_eq!(set.named_types().count(), 1);
    }
}
