//! The project-scoped store contract the pipeline depends on.

use std::future::Future;

use scout_core::entities::{ArchivedPaper, CandidatePaper, Project};

use crate::ScoutDb;
use crate::error::DatabaseError;

/// Result of an insert-or-ignore archival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new record was created.
    Inserted(ArchivedPaper),
    /// The project already held this title; carries the existing record.
    Duplicate(ArchivedPaper),
}

impl InsertOutcome {
    #[must_use]
    pub const fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }

    #[must_use]
    pub const fn paper(&self) -> &ArchivedPaper {
        match self {
            Self::Inserted(p) | Self::Duplicate(p) => p,
        }
    }

    #[must_use]
    pub fn into_paper(self) -> ArchivedPaper {
        match self {
            Self::Inserted(p) | Self::Duplicate(p) => p,
        }
    }
}

/// Paper storage scoped by project.
///
/// No method ever returns a record owned by a project other than the one
/// it was asked about.
pub trait PaperStore: Send + Sync {
    /// Fetch a project by id.
    fn get_project(
        &self,
        project_id: &str,
    ) -> impl Future<Output = Result<Project, DatabaseError>> + Send;

    /// Archive `paper` in `project_id` unless its normalized title is
    /// already present there.
    fn insert_paper(
        &self,
        project_id: &str,
        paper: &CandidatePaper,
    ) -> impl Future<Output = Result<InsertOutcome, DatabaseError>> + Send;

    /// Whether `project_id` already holds a paper with this title.
    fn is_duplicate(
        &self,
        project_id: &str,
        title: &str,
    ) -> impl Future<Output = Result<bool, DatabaseError>> + Send;

    /// The paper in `project_id` whose normalized title matches `title`.
    fn find_by_title(
        &self,
        project_id: &str,
        title: &str,
    ) -> impl Future<Output = Result<Option<ArchivedPaper>, DatabaseError>> + Send;

    /// All papers of a project, oldest first.
    fn list_by_project(
        &self,
        project_id: &str,
    ) -> impl Future<Output = Result<Vec<ArchivedPaper>, DatabaseError>> + Send;

    /// Papers of a project whose title contains `fragment`, ignoring case.
    fn search_titles(
        &self,
        project_id: &str,
        fragment: &str,
    ) -> impl Future<Output = Result<Vec<ArchivedPaper>, DatabaseError>> + Send;

    /// Delete a project and, by cascade, every paper it owns.
    fn delete_project(
        &self,
        project_id: &str,
    ) -> impl Future<Output = Result<(), DatabaseError>> + Send;
}

impl PaperStore for ScoutDb {
    async fn get_project(&self, project_id: &str) -> Result<Project, DatabaseError> {
        Self::get_project(self, project_id).await
    }

    async fn insert_paper(
        &self,
        project_id: &str,
        paper: &CandidatePaper,
    ) -> Result<InsertOutcome, DatabaseError> {
        Self::insert_paper(self, project_id, paper).await
    }

    async fn is_duplicate(&self, project_id: &str, title: &str) -> Result<bool, DatabaseError> {
        Self::is_duplicate(self, project_id, title).await
    }

    async fn find_by_title(
        &self,
        project_id: &str,
        title: &str,
    ) -> Result<Option<ArchivedPaper>, DatabaseError> {
        Self::find_by_title(self, project_id, title).await
    }

    async fn list_by_project(&self, project_id: &str) -> Result<Vec<ArchivedPaper>, DatabaseError> {
        Self::list_by_project(self, project_id).await
    }

    async fn search_titles(
        &self,
        project_id: &str,
        fragment: &str,
    ) -> Result<Vec<ArchivedPaper>, DatabaseError> {
        Self::search_titles(self, project_id, fragment).await
    }

    async fn delete_project(&self, project_id: &str) -> Result<(), DatabaseError> {
        Self::delete_project(self, project_id).await
    }
}
