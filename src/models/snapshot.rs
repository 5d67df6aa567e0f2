//! The Snapshot: every piece of journal data in one record
//!
//! Exactly one snapshot is persisted at a time. It is written wholesale on
//! each save; there are no partial updates.

use serde::{Deserialize, Serialize};

use super::records::{
    CalendarEvent, DiaryEntry, DocumentRef, GrowthRecord, MedicalRecord, Milestone, Profile,
    VaccineRecord,
};
use crate::error::NestResult;

/// Aggregate of all application data
///
/// `profile` is required, so an arbitrary object never parses as an empty
/// snapshot. Collections missing from older documents default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub profile: Profile,
    #[serde(default)]
    pub diary: Vec<DiaryEntry>,
    #[serde(default)]
    pub growth: Vec<GrowthRecord>,
    #[serde(default)]
    pub vaccines: Vec<VaccineRecord>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub medical_history: Vec<MedicalRecord>,
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
}

impl Snapshot {
    /// Serialize to the canonical textual form
    pub fn to_canonical(&self) -> NestResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the canonical textual form
    pub fn from_canonical(text: &str) -> NestResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Number of records per collection, in display order
    pub fn collection_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("Diary entries", self.diary.len()),
            ("Growth records", self.growth.len()),
            ("Vaccines", self.vaccines.len()),
            ("Milestones", self.milestones.len()),
            ("Calendar events", self.events.len()),
            ("Medical history", self.medical_history.len()),
            ("Documents", self.documents.len()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Snapshot {
        let day = NaiveDate::from_ymd_opt(2024, 5, 12).unwrap();
        Snapshot {
            profile: Profile {
                name: "Mila".into(),
                birth_date: Some(day),
                ..Profile::default()
            },
            diary: vec![DiaryEntry::new(day, "First smile", "Right after lunch")],
            vaccines: vec![VaccineRecord::new("Hepatitis B")],
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_canonical_round_trip() {
        let snapshot = sample();
        let text = snapshot.to_canonical().unwrap();
        assert_eq!(Snapshot::from_canonical(&text).unwrap(), snapshot);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let snapshot = Snapshot::from_canonical(r#"{"profile":{"name":"Leo"}}"#).unwrap();
        assert_eq!(snapshot.profile.name, "Leo");
        assert!(snapshot.diary.is_empty());
        assert!(snapshot.documents.is_empty());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let snapshot =
            Snapshot::from_canonical(r#"{"theme":"dark","profile":{"name":"Leo"},"diary":[]}"#)
                .unwrap();
        assert_eq!(snapshot.profile.name, "Leo");
        assert!(snapshot.diary.is_empty());
    }

    #[test]
    fn test_rejects_object_without_profile() {
        assert!(Snapshot::from_canonical("{}").is_err());
        assert!(Snapshot::from_canonical(r#"{"accounts":[{"name":"Checking"}],"version":3}"#)
            .is_err());
    }

    #[test]
    fn test_measurements_round_trip_exactly() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 12).unwrap();
        let mut snapshot = sample();
        for i in 1..200u32 {
            let mut record = GrowthRecord::new(day);
            record.weight = Some(f64::from(i) * (116.81938242857143 / 200.0));
            record.height = Some(45.0 + f64::from(i) / 7.0);
            record.head_circumference = Some(f64::from(i).sqrt() * 3.3);
            snapshot.growth.push(record);
        }
        let mut known = GrowthRecord::new(day);
        known.weight = Some(116.81938242857143);
        snapshot.growth.push(known);

        let text = snapshot.to_canonical().unwrap();
        assert_eq!(Snapshot::from_canonical(&text).unwrap(), snapshot);
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(Snapshot::from_canonical("[1,2,3]").is_err());
        assert!(Snapshot::from_canonical("").is_err());
    }

    #[test]
    fn test_collection_counts() {
        let counts = sample().collection_counts();
        assert_eq!(counts[0], ("Diary entries", 1));
        assert_eq!(counts[2], ("Vaccines", 1));
        assert_eq!(counts.len(), 7);
    }
}
