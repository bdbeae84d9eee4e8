//! Central schema registry for Scout types.
//!
//! The `SchemaRegistry` builds JSON Schemas from scout-core types at
//! construction time using [`schemars::schema_for!`] and provides validation
//! via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;
use serde::de::DeserializeOwned;

use crate::error::SchemaError;
use crate::extract::extract_json;

pub const RELEVANCE_VERDICT: &str = "relevance_verdict";
pub const REFINEMENT_PROPOSAL: &str = "refinement_proposal";
pub const PAPER_METADATA: &str = "paper_metadata";
pub const SYNTHESIS_ANSWER: &str = "synthesis_answer";
pub const CANDIDATE_PAPER: &str = "candidate_paper";
pub const ARCHIVED_PAPER: &str = "archived_paper";
pub const PROJECT: &str = "project";

/// Central store of all JSON Schemas in the Scout system.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. Panics if `serde_json::to_value` fails (should be
/// infallible for valid `schemars` output).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a new registry containing the structured-output and entity
    /// schemas from scout-core.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on any `schemars`-generated
    /// schema, which `schemars` output never does.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Structured model outputs (4) ---
        register!(
            schemas,
            RELEVANCE_VERDICT,
            scout_core::structured::RelevanceVerdict
        );
        register!(
            schemas,
            REFINEMENT_PROPOSAL,
            scout_core::structured::RefinementProposal
        );
        register!(schemas, PAPER_METADATA, scout_core::structured::PaperMetadata);
        register!(
            schemas,
            SYNTHESIS_ANSWER,
            scout_core::structured::SynthesisAnswer
        );

        // --- Entities (3) ---
        register!(schemas, CANDIDATE_PAPER, scout_core::entities::CandidatePaper);
        register!(schemas, ARCHIVED_PAPER, scout_core::entities::ArchivedPaper);
        register!(schemas, PROJECT, scout_core::entities::Project);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Get a schema by name or fail with `SchemaError::NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown.
    pub fn require(&self, name: &str) -> Result<&serde_json::Value, SchemaError> {
        self.get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self.require(name)?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Parse raw model text into `T`, validating against the named schema
    /// first so a malformed response is a typed error, never a partially
    /// filled value.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Parse` if no JSON document can be read,
    /// `SchemaError::ValidationFailed` if it does not match the schema, or
    /// `SchemaError::NotFound` for an unknown schema name.
    pub fn parse<T: DeserializeOwned>(&self, name: &str, raw: &str) -> Result<T, SchemaError> {
        let value: serde_json::Value = serde_json::from_str(extract_json(raw))
            .map_err(|e| SchemaError::Parse(e.to_string()))?;
        self.validate(name, &value)?;
        serde_json::from_value(value).map_err(|e| SchemaError::Parse(e.to_string()))
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
