use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use log::info;

use crate::error::Result;
use crate::record::ExhibitorRecord;

pub const SNAPSHOT_FILE: &str = "companies_data.json";

/// Name of the periodic backup written after `count` records.
pub fn backup_file_name(count: usize) -> String {
    format!("companies_backup_{}.json", count)
}

/// Writes the records as pretty JSON under `output_dir`, creating it if needed.
pub fn save_snapshot(
    records: &[ExhibitorRecord],
    output_dir: &Path,
    filename: Option<&str>,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(filename.unwrap_or(SNAPSHOT_FILE));

    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;

    info!("Saved {} records to {:?}", records.len(), path);
    Ok(path)
}

/// Reads a snapshot back. A missing file is an empty run, not an error.
pub fn load_snapshot(output_dir: &Path, filename: Option<&str>) -> Result<Vec<ExhibitorRecord>> {
    let path = output_dir.join(filename.unwrap_or(SNAPSHOT_FILE));
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No snapshot found at {:?}. Starting fresh.", path);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let records: Vec<ExhibitorRecord> = serde_json::from_str(&content)?;
    info!("Resumed previous session: {} records loaded from {:?}.", records.len(), path);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;

    fn sample() -> Vec<ExhibitorRecord> {
        vec![
            ExhibitorRecord {
                company: "Acme Foods".into(),
                country: "الإمارات".into(),
                profile_url: "https://exhibitors.gulfood.com/profile/acme".into(),
                ..Default::default()
            },
            ExhibitorRecord {
                company: "Beta Dairy".into(),
                email: "hello@beta.example".into(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn load_missing_snapshot_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let records = load_snapshot(dir.path(), Some("nope.json")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn save_creates_dir_and_load_restores_records() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("output");
        let records = sample();

        let path = save_snapshot(&records, &out, None).unwrap();
        assert_eq!(path, out.join(SNAPSHOT_FILE));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  {"), "expected indented JSON");
        assert!(text.contains("الإمارات"), "non-ASCII should be kept verbatim");
        assert!(text.contains("\"profile_url\""));

        assert_eq!(load_snapshot(&out, None).unwrap(), records);
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SNAPSHOT_FILE), "{not json").unwrap();
        assert!(matches!(
            load_snapshot(dir.path(), None),
            Err(ScrapeError::Json(_))
        ));
    }

    #[test]
    fn backup_names_embed_count() {
        assert_eq!(backup_file_name(40), "companies_backup_40.json");
    }
}
