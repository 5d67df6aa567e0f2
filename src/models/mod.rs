//! Data models for nestbook
//!
//! The snapshot aggregate and the journal records it carries.

pub mod ids;
pub mod records;
pub mod snapshot;

pub use ids::{
    DiaryEntryId, DocumentId, EventId, GrowthRecordId, MedicalRecordId, MilestoneId, VaccineId,
};
pub use records::{
    CalendarEvent, DiaryEntry, DocumentRef, GrowthRecord, MedicalRecord, Milestone, Profile,
    VaccineRecord,
};
pub use snapshot::Snapshot;
