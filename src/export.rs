use std::collections::HashSet;

use itertools::Itertools;

use crate::configuration::FlagEntry;
use crate::schema::{generate_validator_expression, render_named_declarations};

/// Generated TypeScript sources for one group of flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportBundle {
    pub declarations: String,
    pub validators: String,
    pub defaults: String,
}

fn words(key: &str) -> impl Iterator<Item = &str> {
    key.split(|c: char| c == '_' || c == '-' || c == '.')
        .filter(|w| !w.is_empty())
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn pascal_case(key: &str) -> String {
    words(key).map(capitalized).collect()
}

pub fn camel_case(key: &str) -> String {
    let pascal = pascal_case(key);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn build_bundle(flags: &[FlagEntry]) -> ExportBundle {
    let mut bundle = ExportBundle {
        validators: "import { z } from \"zod\";\n\n".to_string(),
        defaults: "export const defaults = {\n".to_string(),
        ..Default::default()
    };
    let mut declared = HashSet::new();

    for entry in flags.iter().sorted_by(|a, b| a.key.cmp(&b.key)) {
        let key = &entry.key;

        match entry.definition.schema() {
            Some(Ok(schema)) => {
                for (name, rendered) in render_named_declarations(&schema) {
                    if declared.insert(name.clone()) {
                        bundle
                            .declarations
                            .push_str(&format!("export type {name} = {rendered};\n"));
                    } else {
                        log::warn!("type `{name}` of flag `{key}` is already declared, keeping the first declaration");
                    }
                }

                bundle.validators.push_str(&format!(
                    "export const {}Schema = {};\n",
                    camel_case(key),
                    generate_validator_expression(&schema)
                ));
            }
            Some(Err(e)) => log::warn!("flag `{key}` has an invalid schema: {e}"),
            None => {}
        }

        bundle.declarations.push_str(&format!(
            "export type {} = {};\n",
            pascal_case(key),
            entry.definition.type_literal()
        ));
        bundle.defaults.push_str(&format!(
            "  {}: {},\n",
            serde_json::Value::String(key.clone()),
            entry.definition.default_literal()
        ));
    }

    bundle.defaults.push_str("};\n");
    bundle
}
