use crate::{Result, StorefrontError};
use jsonschema::JSONSchema;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Validation strategies for form input
#[derive(Debug, Clone)]
pub enum Validator {
    /// Fast validation using serde
    SerdeFirst,
    /// Strict validation using JSON Schema
    Strict(StrictValidator),
}

impl Validator {
    /// Strict validator for the JSON Schema of `T`.
    pub fn strict_for<T: JsonSchema>() -> Result<Self> {
        Ok(Validator::Strict(StrictValidator::for_type::<T>()?))
    }

    /// Validate and deserialize input into type T
    pub fn validate<T: DeserializeOwned>(&self, input: Value) -> Result<T> {
        match self {
            Validator::SerdeFirst => serde_first_validate(input),
            Validator::Strict(validator) => validator.validate(input),
        }
    }
}

/// Fast serde-first validator
fn serde_first_validate<T: DeserializeOwned>(input: Value) -> Result<T> {
    serde_path_to_error::deserialize(input).map_err(|e| {
        StorefrontError::Validation(format!("Invalid value at {}: {}", e.path(), e.inner()))
    })
}

/// Strict JSON Schema validator
#[derive(Clone)]
pub struct StrictValidator {
    schema_json: Arc<Value>,
    compiled: Arc<JSONSchema>,
}

impl std::fmt::Debug for StrictValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrictValidator")
            .field("schema", &self.schema_json)
            .finish()
    }
}

impl StrictValidator {
    /// Compile a validator from a raw schema document.
    pub fn new(schema: Value) -> Result<Self> {
        let compiled = JSONSchema::compile(&schema)
            .map_err(|err| StorefrontError::Config(format!("Invalid form schema: {}", err)))?;
        Ok(Self {
            schema_json: Arc::new(schema),
            compiled: Arc::new(compiled),
        })
    }

    /// Compile the schema `schemars` derives for `T`.
    pub fn for_type<T: JsonSchema>() -> Result<Self> {
        let schema = serde_json::to_value(schemars::schema_for!(T))?;
        Self::new(schema)
    }

    pub fn schema_json(&self) -> &Value {
        &self.schema_json
    }

    /// Validate input against the schema, then deserialize it
    pub fn validate<T: DeserializeOwned>(&self, input: Value) -> Result<T> {
        if let Err(errors) = self.compiled.validate(&input) {
            let messages: Vec<String> = errors
                .map(|error| {
                    let path = error.instance_path.to_string();
                    if path.is_empty() {
                        error.to_string()
                    } else {
                        format!("{}: {}", path.trim_start_matches('/'), error)
                    }
                })
                .collect();
            return Err(StorefrontError::Validation(messages.join("; ")));
        }
        serde_first_validate(input)
    }
}
