//! Project repository.

use chrono::Utc;

use scout_core::entities::Project;
use scout_core::errors::CoreError;
use scout_core::ids::PREFIX_PROJECT;

use crate::ScoutDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};

const PROJECT_COLUMNS: &str = "id, name, client_name, created_at";

fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        client_name: get_opt_string(row, 2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl ScoutDb {
    /// Create a project. Names are unique.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` for a blank name, or a libSQL error if
    /// the name is already taken.
    pub async fn create_project(
        &self,
        name: &str,
        client_name: Option<&str>,
    ) -> Result<Project, DatabaseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("project name must not be empty".into()).into());
        }
        let client_name = client_name.map(str::trim).filter(|c| !c.is_empty());
        let now = Utc::now();
        let id = self.generate_id(PREFIX_PROJECT).await?;

        self.conn()
            .execute(
                "INSERT INTO projects (id, name, client_name, created_at) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![id.as_str(), name, client_name, now.to_rfc3339()],
            )
            .await?;

        tracing::info!(project_id = %id, name, "project created");
        Ok(Project {
            id,
            name: name.to_string(),
            client_name: client_name.map(String::from),
            created_at: now,
        })
    }

    /// Get a project by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the project does not exist.
    pub async fn get_project(&self, id: &str) -> Result<Project, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_project(&row)
    }

    /// Find a project by id or by exact name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_project(&self, key: &str) -> Result<Option<Project>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1 OR name = ?1 \
                     ORDER BY id = ?1 DESC LIMIT 1"
                ),
                [key.trim()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_project(&row)?)),
            None => Ok(None),
        }
    }

    /// List all projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, rowid DESC"),
                (),
            )
            .await?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    /// Delete a project and, by cascade, all of its papers.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the project does not exist.
    pub async fn delete_project(&self, id: &str) -> Result<(), DatabaseError> {
        let affected = self
            .conn()
            .execute("DELETE FROM projects WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        tracing::info!(project_id = id, "project deleted");
        Ok(())
    }
}
