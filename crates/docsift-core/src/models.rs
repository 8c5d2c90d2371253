//! Core data models shared by the pipeline, the stores and the frontends.

use serde::{Deserialize, Serialize};

/// Positional row shape produced by storage backends:
/// `(id, filename, title, content, size, media_type, category,
/// upload_timestamp, processing_seconds, raw_bytes)`.
///
/// Rows are converted into [`Document`] as soon as they enter the core.
pub type DocumentRow = (
    i64,
    String,
    String,
    String,
    i64,
    String,
    Option<String>,
    String,
    Option<f64>,
    Option<Vec<u8>>,
);

/// A stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub filename: String,
    pub title: String,
    pub content: String,
    /// Size of the original payload in bytes.
    pub size: i64,
    pub media_type: String,
    pub category: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS` (UTC), as written by the store.
    pub uploaded_at: String,
    /// Seconds spent extracting and classifying, if measured.
    pub processing_seconds: Option<f64>,
    #[serde(skip)]
    pub raw: Option<Vec<u8>>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        let (
            id,
            filename,
            title,
            content,
            size,
            media_type,
            category,
            uploaded_at,
            processing_seconds,
            raw,
        ) = row;
        Self {
            id,
            filename,
            title,
            content,
            size,
            media_type,
            category,
            uploaded_at,
            processing_seconds,
            raw,
        }
    }
}

/// Fields supplied when adding a document; the store assigns the id and the
/// upload timestamp.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub filename: String,
    pub title: String,
    pub content: String,
    pub size: i64,
    pub media_type: String,
    pub category: Option<String>,
    pub processing_seconds: Option<f64>,
    pub raw: Option<Vec<u8>>,
}

/// Which document fields a search considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Title,
    #[default]
    Content,
    Both,
}

impl std::str::FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(Scope::Title),
            "content" => Ok(Scope::Content),
            "both" => Ok(Scope::Both),
            other => Err(format!(
                "unknown search scope: '{}'. Use title, content, or both.",
                other
            )),
        }
    }
}

/// One matching document with its display excerpt.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub id: i64,
    pub document: Document,
    /// Content excerpt with whole-word matches wrapped in `<mark>` tags.
    pub excerpt: String,
}

/// A [`SearchHit`] produced by the similarity matcher, carrying the Jaccard
/// score it passed the threshold with.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarDocument {
    #[serde(flatten)]
    pub hit: SearchHit,
    pub similarity: f64,
}

/// Normalized score of one category for a piece of text, in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> DocumentRow {
        (
            7,
            "report.pdf".to_string(),
            "Quarterly Report".to_string(),
            "Revenue grew.".to_string(),
            2048,
            "application/pdf".to_string(),
            Some("Report".to_string()),
            "2024-03-01 10:00:00".to_string(),
            Some(0.25),
            None,
        )
    }

    #[test]
    fn row_maps_field_for_field() {
        let doc = Document::from(sample_row());
        assert_eq!(doc.id, 7);
        assert_eq!(doc.filename, "report.pdf");
        assert_eq!(doc.title, "Quarterly Report");
        assert_eq!(doc.content, "Revenue grew.");
        assert_eq!(doc.size, 2048);
        assert_eq!(doc.media_type, "application/pdf");
        assert_eq!(doc.category.as_deref(), Some("Report"));
        assert_eq!(doc.uploaded_at, "2024-03-01 10:00:00");
        assert_eq!(doc.processing_seconds, Some(0.25));
        assert!(doc.raw.is_none());
    }

    #[test]
    fn scope_parses_case_insensitively() {
        assert_eq!("Title".parse::<Scope>().unwrap(), Scope::Title);
        assert_eq!("BOTH".parse::<Scope>().unwrap(), Scope::Both);
        assert!("body".parse::<Scope>().is_err());
    }
}
