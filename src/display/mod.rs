//! Display formatting for terminal output

use tabled::{settings::Style, Table, Tabled};

use crate::models::Snapshot;

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Collection")]
    name: &'static str,
    #[tabled(rename = "Records")]
    count: usize,
}

/// Format the per-collection record counts of a snapshot as a table
pub fn format_snapshot_summary(snapshot: &Snapshot) -> String {
    let rows: Vec<CountRow> = snapshot
        .collection_counts()
        .into_iter()
        .map(|(name, count)| CountRow { name, count })
        .collect();

    let mut output = String::new();
    let profile_name = if snapshot.profile.name.is_empty() {
        "(unnamed)"
    } else {
        snapshot.profile.name.as_str()
    };
    output.push_str(&format!("Profile: {}\n", profile_name));
    if let Some(birth_date) = snapshot.profile.birth_date {
        output.push_str(&format!("Born:    {}\n", birth_date));
    }
    output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    output
}

/// Render a yes/no flag
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiaryEntry, Profile};
    use chrono::NaiveDate;

    #[test]
    fn test_summary_lists_collections() {
        let day = NaiveDate::from_ymd_opt(2023, 11, 2).unwrap();
        let snapshot = Snapshot {
            profile: Profile {
                name: "Tess".into(),
                birth_date: Some(day),
                ..Profile::default()
            },
            diary: vec![DiaryEntry::new(day, "Born", "")],
            ..Snapshot::default()
        };

        let summary = format_snapshot_summary(&snapshot);
        assert!(summary.contains("Profile: Tess"));
        assert!(summary.contains("2023-11-02"));
        assert!(summary.contains("Diary entries"));
        assert!(summary.contains("Documents"));
    }

    #[test]
    fn test_summary_unnamed_profile() {
        let summary = format_snapshot_summary(&Snapshot::default());
        assert!(summary.contains("(unnamed)"));
    }
}
