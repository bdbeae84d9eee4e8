//! # scout-schema
//!
//! JSON Schema generation and validation for Scout.
//!
//! This crate provides:
//! - `SchemaRegistry`: central store of the JSON Schemas for every structured
//!   model output and persisted entity
//! - Typed parsing of raw model text: fence stripping, JSON parsing, schema
//!   validation, then deserialization, each failure a distinct `SchemaError`
//!
//! Types are defined in `scout-core` with `#[derive(JsonSchema)]`; this crate
//! builds the registry and the validation layer on top of them.

mod error;
mod extract;
mod registry;

pub use error::SchemaError;
pub use extract::extract_json;
pub use registry::{
    ARCHIVED_PAPER, CANDIDATE_PAPER, PAPER_METADATA, PROJECT, REFINEMENT_PROPOSAL,
    RELEVANCE_VERDICT, SYNTHESIS_ANSWER, SchemaRegistry,
};
