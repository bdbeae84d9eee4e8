//! # scout-core
//!
//! Core types, ID prefixes, and error types for Scout.
//!
//! This crate provides the foundational types shared across all Scout crates:
//! - Paper and project entities (candidates, archived papers, projects)
//! - Structured model outputs (relevance verdicts, refinement proposals,
//!   extracted metadata, synthesis answers)
//! - Source and reading-status enums, the latter with a state machine
//! - Title normalization used as the per-project dedup key
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod structured;
pub mod title;
