//! JSON export/import of snapshots.

use std::fs;
use std::path::Path;

use crate::domain::Snapshot;
use crate::error::Result;

/// Conventional file name for an exported period.
pub fn export_file_name(snapshot: &Snapshot) -> String {
    format!("officina_planner_{}.json", snapshot.period().key())
}

/// Write a snapshot as pretty JSON.
pub fn export_snapshot(snapshot: &Snapshot, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, snapshot.to_json()?)?;
    log::info!("Exported {} jobs to {}", snapshot.jobs.len(), path.display());
    Ok(())
}

/// Read and validate a snapshot file.
pub fn import_snapshot(path: impl AsRef<Path>) -> Result<Snapshot> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let snapshot = Snapshot::from_json(&content)?;
    log::info!(
        "Imported {} jobs for {} from {}",
        snapshot.jobs.len(),
        snapshot.period(),
        path.display()
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Period;
    use crate::domain::{Job, Team};
    use crate::error::PlannerError;
    use tempfile::TempDir;

    fn snapshot() -> Snapshot {
        let mut snap = Snapshot::new(Period::parse("2025-08-18", "2025-08-23").unwrap(), Team::default_roster());
        snap.jobs.push(Job::with_id("j1", "Ceroni - Clutch", 8.0).with_plate("AB123CD"));
        snap.client_affinity.assign("ceroni", "M1");
        snap
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(&snapshot()), "officina_planner_2025-08-18_2025-08-23.json");
    }

    #[test]
    fn test_export_then_import() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plan.json");
        let snap = snapshot();
        export_snapshot(&snap, &path).unwrap();
        assert_eq!(import_snapshot(&path).unwrap(), snap);
    }

    #[test]
    fn test_import_legacy_export() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("legacy.json");
        let raw = r#"{
          "periodStart": "2025-08-18",
          "periodEnd": "2025-08-23",
          "jobs": [{
            "id": "x1", "title": "VAS - Marmitta + turbina", "hours": 14,
            "deadline": null, "ingress": "2025-08-08", "roles": ["meccanico"],
            "note": "ricambi dal 20/08", "plate": "",
            "lockedMechanicId": null, "lockedElectricId": null
          }],
          "team": {"meccanici": [{"id": "M1", "hours": 8}], "elettrauti": [{"id": "E1", "hours": 8}]},
          "clientAffinity": {"vas": "M1"}
        }"#;
        fs::write(&path, raw).unwrap();

        let snap = import_snapshot(&path).unwrap();
        assert_eq!(snap.jobs.len(), 1);
        assert_eq!(snap.jobs[0].deadline, None);
        assert_eq!(snap.team.mechanics.len(), 1);
        assert_eq!(snap.client_affinity.preferred("vas"), Some("M1"));
    }

    #[test]
    fn test_import_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            import_snapshot(temp.path().join("nope.json")),
            Err(PlannerError::Io(_))
        ));
    }

    #[test]
    fn test_import_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(import_snapshot(&path), Err(PlannerError::Json(_))));
    }
}
