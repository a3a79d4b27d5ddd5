//! Input records read from JSON.
//!
//! Every scalar field accepts a string, a number, or `null`; absent and null
//! values become empty strings so the assemblers only deal with text.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Brand variant selecting the logo asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    #[default]
    Dc,
    Tt,
}

impl Brand {
    /// Parse a brand flag. Unknown values fall back to the default brand.
    pub fn from_flag(flag: &str) -> Self {
        match flag.trim().to_lowercase().as_str() {
            "tt" => Brand::Tt,
            "dc" | "" => Brand::Dc,
            other => {
                log::warn!("Unknown brand '{}', using default", other);
                Brand::Dc
            }
        }
    }
}

impl<'de> Deserialize<'de> for Brand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let flag = Option::<String>::deserialize(deserializer)?;
        Ok(flag.map(|f| Brand::from_flag(&f)).unwrap_or_default())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl Scalar {
    fn into_text(scalar: Option<Scalar>) -> String {
        match scalar {
            Some(Scalar::Text(s)) => s,
            Some(Scalar::Integer(n)) => n.to_string(),
            Some(Scalar::Float(f)) => f.to_string(),
            Some(Scalar::Flag(b)) => b.to_string(),
            None => String::new(),
        }
    }
}

/// Accept strings, numbers, booleans, or null as text.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(Scalar::into_text(Option::deserialize(deserializer)?))
}

/// Like [`text`], but a list of strings is joined with `", "`.
fn text_or_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrList {
        List(Vec<Option<Scalar>>),
        Single(Option<Scalar>),
    }

    Ok(match TextOrList::deserialize(deserializer)? {
        TextOrList::List(items) => items
            .into_iter()
            .map(|item| Scalar::into_text(item).trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        TextOrList::Single(scalar) => Scalar::into_text(scalar),
    })
}

fn optional_path<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<PathBuf>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
}

fn read_record<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::MissingInput(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::MissingInput(format!("{}: {}", path.display(), e)))
}

/// Fields of a staffing proposal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalFields {
    #[serde(deserialize_with = "text")]
    pub staff_name: String,
    #[serde(deserialize_with = "text")]
    pub position: String,
    #[serde(deserialize_with = "text")]
    pub duration: String,
    #[serde(deserialize_with = "text")]
    pub hourly_rate: String,
    #[serde(deserialize_with = "text")]
    pub commitment: String,
    #[serde(deserialize_with = "text")]
    pub staff_monthly: String,
    #[serde(deserialize_with = "text")]
    pub staff_total: String,
    #[serde(deserialize_with = "text")]
    pub expense_type: String,
    #[serde(deserialize_with = "text")]
    pub expense_desc: String,
    #[serde(deserialize_with = "text")]
    pub expense_monthly: String,
    #[serde(deserialize_with = "text")]
    pub expense_total: String,
    #[serde(deserialize_with = "text")]
    pub combined_monthly: String,
    #[serde(deserialize_with = "text")]
    pub combined_total: String,
    /// Multi-line free text rendered as bullets
    #[serde(deserialize_with = "text")]
    pub project_summary: String,
    #[serde(deserialize_with = "text")]
    pub project_experience: String,
    #[serde(deserialize_with = "optional_path")]
    pub formatted_resume_path: Option<PathBuf>,
    /// ISO date (YYYY-MM-DD)
    #[serde(deserialize_with = "text")]
    pub start_date: String,
    /// ISO date (YYYY-MM-DD)
    #[serde(deserialize_with = "text")]
    pub end_date: String,
    pub brand: Brand,
}

impl ProposalFields {
    /// Load proposal fields from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        read_record(path.as_ref())
    }

    /// Parse proposal fields from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One education entry of a resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(deserialize_with = "text")]
    pub degree: String,
    #[serde(deserialize_with = "text")]
    pub school: String,
    #[serde(deserialize_with = "text")]
    pub year: String,
}

/// One position held, with its bullet points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    #[serde(deserialize_with = "text")]
    pub company: String,
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub location: String,
    #[serde(deserialize_with = "text")]
    pub dates: String,
    #[serde(deserialize_with = "text")]
    pub project_details: String,
    pub bullets: Vec<String>,
}

/// Structured resume record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeFields {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub summary: String,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub certifications: Vec<String>,
    /// Comma-separated; a JSON list is joined
    #[serde(deserialize_with = "text_or_list")]
    pub skills: String,
    pub brand: Brand,
}

impl ResumeFields {
    /// Load a resume record from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        read_record(path.as_ref())
    }

    /// Parse a resume record from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Drop duplicate and incomplete entries.
    ///
    /// Experience entries are keyed by company and title and must name a
    /// company; education entries are keyed by degree and school and must
    /// name a degree. The first occurrence wins.
    pub fn cleaned(mut self) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.experience.retain(|job| {
            !job.company.trim().is_empty() && seen.insert(format!("{}|{}", job.company, job.title))
        });

        let mut seen = std::collections::HashSet::new();
        self.education.retain(|edu| {
            !edu.degree.trim().is_empty() && seen.insert(format!("{}|{}", edu.degree, edu.school))
        });

        self
    }
}
