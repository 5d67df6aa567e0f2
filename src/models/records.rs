//! Journal record types
//!
//! The persistence layer treats these as opaque serde values. Every optional
//! field defaults when missing so exports from older versions still load.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{
    DiaryEntryId, DocumentId, EventId, GrowthRecordId, MedicalRecordId, MilestoneId, VaccineId,
};

/// The child's profile (singleton)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub photo: Option<String>,
}

/// A free-text diary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub id: DiaryEntryId,
    pub date: NaiveDate,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

impl DiaryEntry {
    pub fn new(date: NaiveDate, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: DiaryEntryId::new(),
            date,
            title: title.into(),
            content: content.into(),
            mood: None,
            photos: Vec::new(),
        }
    }
}

/// A height/weight/head circumference measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRecord {
    pub id: GrowthRecordId,
    pub date: NaiveDate,
    /// Height in centimetres
    #[serde(default)]
    pub height: Option<f64>,
    /// Weight in kilograms
    #[serde(default)]
    pub weight: Option<f64>,
    /// Head circumference in centimetres
    #[serde(default)]
    pub head_circumference: Option<f64>,
}

impl GrowthRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: GrowthRecordId::new(),
            date,
            height: None,
            weight: None,
            head_circumference: None,
        }
    }
}

/// A scheduled or administered vaccination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineRecord {
    pub id: VaccineId,
    pub name: String,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub administered_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl VaccineRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: VaccineId::new(),
            name: name.into(),
            scheduled_date: None,
            administered_date: None,
            notes: String::new(),
        }
    }
}

/// A developmental milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: MilestoneId,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub achieved_date: Option<NaiveDate>,
}

impl Milestone {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: MilestoneId::new(),
            title: title.into(),
            category: None,
            achieved_date: None,
        }
    }
}

/// A user-created calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl CalendarEvent {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: EventId::new(),
            title: title.into(),
            date,
            time: None,
            description: String::new(),
        }
    }
}

/// An illness, allergy or doctor's visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: MedicalRecordId,
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl MedicalRecord {
    pub fn new(date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            id: MedicalRecordId::new(),
            date,
            title: title.into(),
            kind: None,
            notes: String::new(),
        }
    }
}

/// A reference to a stored document (scan, prescription, report)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRef {
    pub id: DocumentId,
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Inline data URL or external location
    #[serde(default)]
    pub data: String,
    pub added_at: DateTime<Utc>,
}

impl DocumentRef {
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new(),
            name: name.into(),
            mime_type: None,
            data: data.into(),
            added_at: Utc::now(),
        }
    }
}
