//! Paper repository: insert-or-ignore archival, title lookups, reading
//! status transitions, cross-project cloning.

use chrono::Utc;

use scout_core::entities::{ArchivedPaper, CandidatePaper};
use scout_core::enums::ReadingStatus;
use scout_core::errors::CoreError;
use scout_core::ids::PREFIX_PAPER;
use scout_core::structured::RelevanceVerdict;
use scout_core::title::normalize_title;

use crate::ScoutDb;
use crate::error::DatabaseError;
use crate::helpers::{encode_string_list, get_opt_string, parse_datetime, parse_enum, parse_string_list};
use crate::store::InsertOutcome;

const PAPER_COLUMNS: &str = "id, project_id, title, authors, year, abstract, url, source_kind, \
     is_relevant, summary, methodology, citation_count, reading_status, created_at";

fn row_to_paper(row: &libsql::Row) -> Result<ArchivedPaper, DatabaseError> {
    let relevance = match row.get::<Option<i64>>(8)? {
        Some(flag) => Some(RelevanceVerdict {
            is_relevant: flag != 0,
            summary: get_opt_string(row, 9)?.unwrap_or_default(),
            methodology: get_opt_string(row, 10)?.unwrap_or_default(),
        }),
        None => None,
    };
    let year = row
        .get::<Option<i64>>(4)?
        .map(i32::try_from)
        .transpose()
        .map_err(|e| DatabaseError::InvalidState(format!("year out of range: {e}")))?;

    Ok(ArchivedPaper {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        authors: parse_string_list(&row.get::<String>(3)?)?,
        year,
        abstract_text: get_opt_string(row, 5)?,
        url: get_opt_string(row, 6)?,
        source_kind: parse_enum(&row.get::<String>(7)?)?,
        relevance,
        citation_count: row.get::<i64>(11)?,
        reading_status: parse_enum(&row.get::<String>(12)?)?,
        created_at: parse_datetime(&row.get::<String>(13)?)?,
    })
}

impl ScoutDb {
    async fn query_papers(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<ArchivedPaper>, DatabaseError> {
        let mut rows = self.conn().query(sql, params).await?;
        let mut papers = Vec::new();
        while let Some(row) = rows.next().await? {
            papers.push(row_to_paper(&row)?);
        }
        Ok(papers)
    }

    /// Archive a candidate in a project unless its normalized title is
    /// already there.
    ///
    /// The check and the insert are one statement (`ON CONFLICT DO
    /// NOTHING`), so two concurrent archivals of the same title yield one
    /// record and one [`InsertOutcome::Duplicate`].
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` for a blank title, or a libSQL error if
    /// the project does not exist.
    pub async fn insert_paper(
        &self,
        project_id: &str,
        paper: &CandidatePaper,
    ) -> Result<InsertOutcome, DatabaseError> {
        let normalized = normalize_title(&paper.title);
        if normalized.is_empty() {
            return Err(CoreError::Validation("paper title must not be empty".into()).into());
        }
        let now = Utc::now();
        let id = self.generate_id(PREFIX_PAPER).await?;
        let authors = encode_string_list(&paper.authors)?;
        let relevance = paper.relevance.as_ref();

        let affected = self
            .conn()
            .execute(
                "INSERT INTO papers (id, project_id, title, normalized_title, authors, year, abstract,
                     url, source_kind, is_relevant, summary, methodology, citation_count,
                     reading_status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, 'unread', ?14)
                 ON CONFLICT (project_id, normalized_title) DO NOTHING",
                libsql::params![
                    id.as_str(),
                    project_id,
                    paper.title.trim(),
                    normalized.as_str(),
                    authors,
                    paper.year.map(i64::from),
                    paper.abstract_text.as_deref(),
                    paper.url.as_deref(),
                    paper.source_kind.as_str(),
                    relevance.map(|r| i64::from(r.is_relevant)),
                    relevance.map(|r| r.summary.as_str()),
                    relevance.map(|r| r.methodology.as_str()),
                    paper.citation_count.unwrap_or(0),
                    now.to_rfc3339()
                ],
            )
            .await?;

        if affected == 0 {
            let existing = self
                .find_by_title(project_id, &paper.title)
                .await?
                .ok_or_else(|| {
                    DatabaseError::InvalidState(format!(
                        "insert of '{normalized}' ignored but no existing row found"
                    ))
                })?;
            tracing::debug!(project_id, title = %normalized, "duplicate skipped");
            return Ok(InsertOutcome::Duplicate(existing));
        }

        Ok(InsertOutcome::Inserted(ArchivedPaper {
            id,
            project_id: project_id.to_string(),
            title: paper.title.trim().to_string(),
            authors: paper.authors.clone(),
            year: paper.year,
            abstract_text: paper.abstract_text.clone(),
            url: paper.url.clone(),
            source_kind: paper.source_kind,
            relevance: paper.relevance.clone(),
            citation_count: paper.citation_count.unwrap_or(0),
            reading_status: ReadingStatus::Unread,
            created_at: now,
        }))
    }

    /// Get a paper by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the paper does not exist.
    pub async fn get_paper(&self, id: &str) -> Result<ArchivedPaper, DatabaseError> {
        self.query_papers(&format!("SELECT {PAPER_COLUMNS} FROM papers WHERE id = ?1"), [id])
            .await?
            .into_iter()
            .next()
            .ok_or(DatabaseError::NoResult)
    }

    /// The paper in `project_id` whose normalized title equals that of
    /// `title`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_by_title(
        &self,
        project_id: &str,
        title: &str,
    ) -> Result<Option<ArchivedPaper>, DatabaseError> {
        let normalized = normalize_title(title);
        Ok(self
            .query_papers(
                &format!(
                    "SELECT {PAPER_COLUMNS} FROM papers WHERE project_id = ?1 AND normalized_title = ?2"
                ),
                [project_id, normalized.as_str()],
            )
            .await?
            .into_iter()
            .next())
    }

    /// Whether `project_id` already holds a paper with this title.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn is_duplicate(&self, project_id: &str, title: &str) -> Result<bool, DatabaseError> {
        let normalized = normalize_title(title);
        let mut rows = self
            .conn()
            .query(
                "SELECT 1 FROM papers WHERE project_id = ?1 AND normalized_title = ?2",
                [project_id, normalized.as_str()],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// All papers of a project, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_by_project(&self, project_id: &str) -> Result<Vec<ArchivedPaper>, DatabaseError> {
        self.query_papers(
            &format!(
                "SELECT {PAPER_COLUMNS} FROM papers WHERE project_id = ?1 ORDER BY created_at, rowid"
            ),
            [project_id],
        )
        .await
    }

    /// Papers of a project whose title contains `fragment`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn search_titles(
        &self,
        project_id: &str,
        fragment: &str,
    ) -> Result<Vec<ArchivedPaper>, DatabaseError> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Ok(Vec::new());
        }
        // SQLite's lower() folds ASCII only, so matching happens on Unicode
        // lowercase in Rust.
        let needle = fragment.to_lowercase();
        let mut papers = self.list_by_project(project_id).await?;
        papers.retain(|paper| paper.title.to_lowercase().contains(&needle));
        Ok(papers)
    }

    /// Move a paper along the reading-status state machine.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the paper does not exist, or
    /// `DatabaseError::Core` wrapping `CoreError::InvalidTransition`.
    pub async fn update_reading_status(
        &self,
        paper_id: &str,
        next: ReadingStatus,
    ) -> Result<ArchivedPaper, DatabaseError> {
        let mut paper = self.get_paper(paper_id).await?;
        if !paper.reading_status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity_type: "paper".into(),
                id: paper_id.to_string(),
                from: paper.reading_status.to_string(),
                to: next.to_string(),
            }
            .into());
        }
        self.conn()
            .execute(
                "UPDATE papers SET reading_status = ?1 WHERE id = ?2",
                [next.as_str(), paper_id],
            )
            .await?;
        paper.reading_status = next;
        Ok(paper)
    }

    /// Copy a paper into another project as a new record.
    ///
    /// The copy keeps bibliographic data and the relevance verdict and
    /// starts unread. Dedup applies in the target project.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the paper does not exist, or a
    /// libSQL error if the target project does not.
    pub async fn clone_paper(
        &self,
        paper_id: &str,
        target_project_id: &str,
    ) -> Result<InsertOutcome, DatabaseError> {
        let source = self.get_paper(paper_id).await?;
        let candidate = source.to_candidate(source.source_kind);
        self.insert_paper(target_project_id, &candidate).await
    }

    /// Delete one paper.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the paper does not exist.
    pub async fn delete_paper(&self, paper_id: &str) -> Result<(), DatabaseError> {
        let affected = self
            .conn()
            .execute("DELETE FROM papers WHERE id = ?1", [paper_id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use scout_core::entities::CandidatePaper;
    use scout_core::enums::{ReadingStatus, SourceKind};
    use scout_core::errors::CoreError;
    use scout_core::structured::RelevanceVerdict;

    use crate::error::DatabaseError;
    use crate::store::InsertOutcome;
    use crate::test_support::test_db;

    fn candidate(title: &str) -> CandidatePaper {
        CandidatePaper {
            authors: vec!["Ashish Vaswani".into(), "Noam Shazeer".into()],
            year: Some(2017),
            abstract_text: Some("The dominant sequence transduction models...".into()),
            url: Some("https://arxiv.org/abs/1706.03762".into()),
            citation_count: Some(90_000),
            relevance: Some(RelevanceVerdict {
                is_relevant: true,
                summary: "Introduces the Transformer.".into(),
                methodology: "Empirical".into(),
            }),
            ..CandidatePaper::new(title, SourceKind::Academic)
        }
    }

    #[tokio::test]
    async fn insert_then_read_back() {
        let db = test_db().await;
        let project = db.create_project("P", None).await.unwrap();

        let outcome = db
            .insert_paper(&project.id, &candidate("Attention Is All You Need"))
            .await
            .unwrap();
        assert!(outcome.is_inserted());
        let inserted = outcome.into_paper();
        assert!(inserted.id.starts_with("pap-"));

        let fetched = db.get_paper(&inserted.id).await.unwrap();
        assert_eq!(fetched.title, "Attention Is All You Need");
        assert_eq!(fetched.authors, vec!["Ashish Vaswani", "Noam Shazeer"]);
        assert_eq!(fetched.year, Some(2017));
        assert_eq!(fetched.citation_count, 90_000);
        assert_eq!(fetched.reading_status, ReadingStatus::Unread);
        assert_eq!(fetched.source_kind, SourceKind::Academic);
        assert_eq!(
            fetched.relevance.as_ref().map(|r| r.methodology.as_str()),
            Some("Empirical")
        );
    }

    #[tokio::test]
    async fn bare_candidate_defaults() {
        let db = test_db().await;
        let project = db.create_project("P", None).await.unwrap();
        let inserted = db
            .insert_paper(&project.id, &CandidatePaper::new("Grey report", SourceKind::Grey))
            .await
            .unwrap()
            .into_paper();
        let fetched = db.get_paper(&inserted.id).await.unwrap();
        assert!(fetched.authors.is_empty());
        assert!(fetched.relevance.is_none());
        assert_eq!(fetched.citation_count, 0);
        assert!(fetched.abstract_text.is_none());
    }

    #[tokio::test]
    async fn second_insert_of_same_title_is_duplicate() {
        let db = test_db().await;
        let project = db.create_project("P", None).await.unwrap();
        let first = db
            .insert_paper(&project.id, &candidate("Attention Is All You Need"))
            .await
            .unwrap();
        let second = db
            .insert_paper(&project.id, &candidate("  Attention   Is All You Need "))
            .await
            .unwrap();

        assert!(!second.is_inserted());
        assert_eq!(second.paper().id, first.paper().id);
        assert_eq!(db.list_by_project(&project.id).await.unwrap().len(), 1);
    }

    #[rstest]
    #[case("Attention Is All You Need", true)]
    #[case("Attention  Is All You Need ", true)]
    #[case("attention is all you need", false)]
    #[case("Attention Is All You Need!", false)]
    #[tokio::test]
    async fn dedup_is_exact_on_normalized_title(#[case] lookup: &str, #[case] expected: bool) {
        let db = test_db().await;
        let project = db.create_project("P", None).await.unwrap();
        db.insert_paper(&project.id, &candidate("Attention Is All You Need"))
            .await
            .unwrap();
        assert_eq!(db.is_duplicate(&project.id, lookup).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn find_by_title_is_scoped_to_project() {
        let db = test_db().await;
        let a = db.create_project("A", None).await.unwrap();
        let b = db.create_project("B", None).await.unwrap();
        let title = "Deep Residual Learning for Image Recognition";

        db.insert_paper(&b.id, &candidate(title)).await.unwrap();

        assert!(db.find_by_title(&a.id, title).await.unwrap().is_none());
        assert!(!db.is_duplicate(&a.id, title).await.unwrap());

        db.insert_paper(&a.id, &candidate(title)).await.unwrap();
        let found = db.find_by_title(&a.id, title).await.unwrap().unwrap();
        assert_eq!(found.project_id, a.id);
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let db = test_db().await;
        let project = db.create_project("P", None).await.unwrap();
        let err = db
            .insert_paper(&project.id, &CandidatePaper::new("   ", SourceKind::Snowball))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn insert_into_missing_project_fails() {
        let db = test_db().await;
        assert!(
            db.insert_paper("prj-00000000", &candidate("Orphan"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn deleting_project_cascades_to_papers() {
        let db = test_db().await;
        let keep = db.create_project("Keep", None).await.unwrap();
        let gone = db.create_project("Gone", None).await.unwrap();
        db.insert_paper(&keep.id, &candidate("Kept")).await.unwrap();
        let doomed = db
            .insert_paper(&gone.id, &candidate("Doomed"))
            .await
            .unwrap()
            .into_paper();

        db.delete_project(&gone.id).await.unwrap();

        assert!(matches!(
            db.get_paper(&doomed.id).await,
            Err(DatabaseError::NoResult)
        ));
        assert_eq!(db.list_by_project(&keep.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_by_project_keeps_insertion_order() {
        let db = test_db().await;
        let project = db.create_project("P", None).await.unwrap();
        for title in ["One", "Two", "Three"] {
            db.insert_paper(&project.id, &candidate(title)).await.unwrap();
        }
        let titles: Vec<String> = db
            .list_by_project(&project.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
    }

    #[tokio::test]
    async fn search_titles_ignores_case_within_project() {
        let db = test_db().await;
        let a = db.create_project("A", None).await.unwrap();
        let b = db.create_project("B", None).await.unwrap();
        db.insert_paper(&a.id, &candidate("Federated Learning: Challenges"))
            .await
            .unwrap();
        db.insert_paper(&a.id, &candidate("Graph Neural Networks"))
            .await
            .unwrap();
        db.insert_paper(&b.id, &candidate("Federated Optimization"))
            .await
            .unwrap();

        let hits = db.search_titles(&a.id, "FEDERATED").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Federated Learning: Challenges");
        assert!(db.search_titles(&a.id, "  ").await.unwrap().is_empty());
    }

    #[rstest]
    #[case("über")]
    #[case("ÜBER FEDERATED")]
    #[case("Ελληνικά")]
    #[tokio::test]
    async fn search_titles_folds_non_ascii_case(#[case] fragment: &str) {
        let db = test_db().await;
        let project = db.create_project("P", None).await.unwrap();
        db.insert_paper(&project.id, &candidate("Über Federated Learning"))
            .await
            .unwrap();
        db.insert_paper(&project.id, &candidate("ΕΛΛΗΝΙΚΆ Corpora"))
            .await
            .unwrap();

        let hits = db.search_titles(&project.id, fragment).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn reading_status_follows_state_machine() {
        let db = test_db().await;
        let project = db.create_project("P", None).await.unwrap();
        let paper = db
            .insert_paper(&project.id, &candidate("Paper"))
            .await
            .unwrap()
            .into_paper();

        let err = db
            .update_reading_status(&paper.id, ReadingStatus::Synthesized)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::InvalidTransition { .. })
        ));

        let reading = db
            .update_reading_status(&paper.id, ReadingStatus::Reading)
            .await
            .unwrap();
        assert_eq!(reading.reading_status, ReadingStatus::Reading);

        db.update_reading_status(&paper.id, ReadingStatus::Synthesized)
            .await
            .unwrap();
        let stored = db.get_paper(&paper.id).await.unwrap();
        assert_eq!(stored.reading_status, ReadingStatus::Synthesized);
    }

    #[tokio::test]
    async fn clone_creates_independent_record() {
        let db = test_db().await;
        let a = db.create_project("A", None).await.unwrap();
        let b = db.create_project("B", None).await.unwrap();
        let original = db
            .insert_paper(&a.id, &candidate("Shared Title"))
            .await
            .unwrap()
            .into_paper();
        db.update_reading_status(&original.id, ReadingStatus::Reading)
            .await
            .unwrap();

        let cloned = db.clone_paper(&original.id, &b.id).await.unwrap();
        assert!(cloned.is_inserted());
        let copy = cloned.into_paper();
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.project_id, b.id);
        assert_eq!(copy.reading_status, ReadingStatus::Unread);

        db.delete_paper(&copy.id).await.unwrap();
        assert!(db.get_paper(&original.id).await.is_ok());

        let again = db.clone_paper(&original.id, &a.id).await.unwrap();
        assert!(matches!(again, InsertOutcome::Duplicate(ref p) if p.id == original.id));
    }

    #[tokio::test]
    async fn delete_missing_paper_is_no_result() {
        let db = test_db().await;
        assert!(matches!(
            db.delete_paper("pap-00000000").await,
            Err(DatabaseError::NoResult)
        ));
    }
}
