//! JSON schema validators for shipaudit DTOs.
//!
//! Schemas are generated from the types with schemars, the same way
//! `cargo xtask schema` writes them to `schemas/`.

use jsonschema::JSONSchema;
use schemars::schema_for;
use shipaudit_types::{AuditReceipt, ConfigFile};

/// Error type for schema validation failures.
#[derive(Debug)]
pub struct SchemaValidationError {
    pub errors: Vec<String>,
}

impl std::fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Schema validation failed: {}", self.errors.join("; "))
    }
}

impl std::error::Error for SchemaValidationError {}

fn compile(schema: schemars::schema::RootSchema) -> JSONSchema {
    let value = serde_json::to_value(schema).expect("schema should serialize to JSON");
    JSONSchema::compile(&value).expect("schema should compile")
}

pub fn load_config_schema() -> JSONSchema {
    compile(schema_for!(ConfigFile))
}

pub fn load_audit_schema() -> JSONSchema {
    compile(schema_for!(AuditReceipt))
}

pub fn validate_config_file(config: &ConfigFile) -> Result<(), SchemaValidationError> {
    let json = serde_json::to_value(config).expect("ConfigFile should serialize to JSON");
    validate_with_schema(&load_config_schema(), &json)
}

pub fn validate_audit_receipt(receipt: &AuditReceipt) -> Result<(), SchemaValidationError> {
    let json = serde_json::to_value(receipt).expect("AuditReceipt should serialize to JSON");
    validate_with_schema(&load_audit_schema(), &json)
}

/// Validate any JSON value (e.g. CLI output) against the receipt schema.
pub fn validate_audit_json(json: &serde_json::Value) -> Result<(), SchemaValidationError> {
    validate_with_schema(&load_audit_schema(), json)
}

pub fn validate_config_json(json: &serde_json::Value) -> Result<(), SchemaValidationError> {
    validate_with_schema(&load_config_schema(), json)
}

fn validate_with_schema(
    schema: &JSONSchema,
    json: &serde_json::Value,
) -> Result<(), SchemaValidationError> {
    match schema.validate(json) {
        Ok(()) => Ok(()),
        Err(errors) => Err(SchemaValidationError {
            errors: errors.map(|e| e.to_string()).collect(),
        }),
    }
}

/// Snake case: lowercase ASCII, digits and single inner underscores.
pub fn is_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Object keys anywhere in `value` that are not snake_case.
pub fn non_snake_case_fields(value: &serde_json::Value) -> Vec<String> {
    let mut bad = Vec::new();
    collect(value, &mut bad);
    bad
}

fn collect(value: &serde_json::Value, bad: &mut Vec<String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                if !is_snake_case(key) {
                    bad.push(key.clone());
                }
                collect(val, bad);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr {
                collect(item, bad);
            }
        }
        _ => {}
    }
}
