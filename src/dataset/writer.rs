use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::scoring::ScoredHousehold;

pub const OUTPUT_HEADER: [&str; 4] = ["No", "Income", "Debt", "Crisp"];

/// Write ranked households as CSV: id, whole-unit income and debt, crisp value to 6 places.
pub fn write_ranked_csv<W: Write>(output: W, ranked: &[ScoredHousehold]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(OUTPUT_HEADER)?;

    for scored in ranked {
        writer.write_record([
            scored.household.id.clone(),
            format!("{:.0}", scored.household.income),
            format!("{:.0}", scored.household.debt),
            format!("{:.6}", scored.crisp_value),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Save ranked households to `path` atomically.
///
/// The file only appears once every row is written; on failure any previous
/// file at `path` is left untouched.
pub fn save_ranked_csv(path: &Path, ranked: &[ScoredHousehold]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    write_ranked_csv(&mut file, ranked)
        .with_context(|| format!("Failed to write ranked households to {}", path.display()))?;

    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Household;
    use crate::scoring::CategoryStrengths;
    use std::env;

    fn scored(id: &str, income: f64, debt: f64, crisp: f64) -> ScoredHousehold {
        ScoredHousehold {
            household: Household::new(id, income, debt),
            crisp_value: crisp,
            strengths: CategoryStrengths::new(1.0, 0.0, 0.0),
        }
    }

    #[test]
    fn test_writes_header_and_formatted_rows() {
        let ranked = vec![
            scored("A1", 1000.4, 10_000.6, 100.0),
            scored("A2", 1250.0, 45_000.0, 66.666_666_666_7),
        ];
        let mut buf = Vec::new();
        write_ranked_csv(&mut buf, &ranked).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "No,Income,Debt,Crisp\nA1,1000,10001,100.000000\nA2,1250,45000,66.666667\n"
        );
    }

    #[test]
    fn test_empty_ranking_writes_header_only() {
        let mut buf = Vec::new();
        write_ranked_csv(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No,Income,Debt,Crisp\n");
    }

    #[test]
    fn test_save_creates_file_and_parent_dir() {
        let dir = env::temp_dir().join("fuzzy_blt_test_writer");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("ranked.csv");

        save_ranked_csv(&path, &[scored("Z9", 300.0, 5_000.0, 100.0)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("No,Income,Debt,Crisp\n"));
        assert!(text.contains("Z9,300,5000,100.000000"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
