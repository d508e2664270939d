//! Database identities, document paths, and reference values.
//!
//! References compare structurally: database identity first (project, then
//! database), then the path segment by segment. They are never dereferenced.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the database used when a project does not specify one.
pub const DEFAULT_DATABASE_ID: &str = "(default)";

/// Identity of a database: the owning project and the database name.
///
/// Ordered by `project_id`, then `database_id`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDatabaseId")]
pub struct DatabaseId {
    project_id: String,
    database_id: String,
}

/// Unvalidated wire form of [`DatabaseId`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDatabaseId {
    project_id: String,
    database_id: String,
}

impl TryFrom<RawDatabaseId> for DatabaseId {
    type Error = Error;

    fn try_from(raw: RawDatabaseId) -> Result<Self> {
        Self::new(raw.project_id, raw.database_id)
    }
}

impl DatabaseId {
    /// Create a database identity. Both parts must be non-empty.
    pub fn new(project_id: impl Into<String>, database_id: impl Into<String>) -> Result<Self> {
        let project_id = project_id.into();
        let database_id = database_id.into();
        if project_id.is_empty() {
            return Err(Error::InvalidDatabaseId("project id is empty".into()));
        }
        if database_id.is_empty() {
            return Err(Error::InvalidDatabaseId(format!(
                "database id is empty for project {project_id}"
            )));
        }
        Ok(Self {
            project_id,
            database_id,
        })
    }

    /// The default database of `project_id`.
    pub fn default_for(project_id: impl Into<String>) -> Result<Self> {
        Self::new(project_id, DEFAULT_DATABASE_ID)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    pub fn is_default_database(&self) -> bool {
        self.database_id == DEFAULT_DATABASE_ID
    }
}

/// Path of a document: alternating collection and document ids.
///
/// Always non-empty, every segment non-empty, and an even number of
/// segments. Ordered segment by segment; a strict prefix sorts first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl DocumentPath {
    /// Parse a slash-separated path such as `"rooms/eros/messages/1"`.
    pub fn parse(path: &str) -> Result<Self> {
        Self::from_segments(path.split('/'))
    }

    /// Build a path from already-split segments.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

        if segments.is_empty() || segments.iter().any(String::is_empty) {
            return Err(Error::InvalidPath(format!(
                "empty segment in '{}'",
                segments.join("/")
            )));
        }
        if segments.len() % 2 != 0 {
            return Err(Error::InvalidPath(format!(
                "'{}' has an odd number of segments and names a collection",
                segments.join("/")
            )));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Id of the collection containing the document.
    pub fn collection_id(&self) -> &str {
        &self.segments[self.segments.len() - 2]
    }

    /// Id of the document itself (last segment).
    pub fn document_id(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }
}

impl TryFrom<Vec<String>> for DocumentPath {
    type Error = Error;

    fn try_from(segments: Vec<String>) -> Result<Self> {
        Self::from_segments(segments)
    }
}

impl From<DocumentPath> for Vec<String> {
    fn from(path: DocumentPath) -> Self {
        path.segments
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// A reference value: database identity plus document path.
///
/// Field order matters: the derived ordering compares the database first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    database: DatabaseId,
    path: DocumentPath,
}

impl Reference {
    pub fn new(database: DatabaseId, path: DocumentPath) -> Self {
        Self { database, path }
    }

    pub fn database(&self) -> &DatabaseId {
        &self.database
    }

    pub fn path(&self) -> &DocumentPath {
        &self.path
    }

    /// Fully qualified resource name,
    /// `projects/{project}/databases/{database}/documents/{path}`.
    pub fn resource_name(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents/{}",
            self.database.project_id, self.database.database_id, self.path
        )
    }

    /// Parse a fully qualified resource name produced by [`resource_name`].
    ///
    /// [`resource_name`]: Reference::resource_name
    pub fn parse_resource_name(name: &str) -> Result<Self> {
        let mut parts = name.split('/');
        let (project, database) = match (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) {
            (Some("projects"), Some(project), Some("databases"), Some(database), Some("documents")) => {
                (project, database)
            }
            _ => {
                tracing::debug!(name, "rejecting resource name without document prefix");
                return Err(Error::InvalidResourceName(name.to_string()));
            }
        };

        let database = DatabaseId::new(project, database)
            .map_err(|_| Error::InvalidResourceName(name.to_string()))?;
        let path = DocumentPath::from_segments(parts).map_err(|err| {
            tracing::debug!(name, %err, "rejecting resource name with malformed path");
            Error::InvalidResourceName(name.to_string())
        })?;

        Ok(Self::new(database, path))
    }
}
