//! Entity structs for Scout domain objects.
//!
//! Each persisted entity maps to a table in the libSQL store (see
//! `scout-db/migrations`). All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON roundtrip and schema validation.

mod candidate;
mod paper;
mod project;

pub use candidate::CandidatePaper;
pub use paper::ArchivedPaper;
pub use project::Project;
