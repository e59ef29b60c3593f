// src/load.rs

use anyhow::{bail, Result};
use tracing::{debug, info, warn};

use crate::columns::{map_columns, Field};
use crate::csv;
use crate::records::build_records;
use crate::store::Roster;

/// Turn raw roster text into a [`Roster`]: strip the BOM, detect the
/// delimiter from the first line, parse, resolve columns, build records.
///
/// Fails only when the file holds no data rows; malformed quoting, ragged
/// rows and unrecognized headers are all tolerated downstream.
pub fn load_roster(text: &str) -> Result<Roster> {
    let cleaned = csv::strip_bom(text);

    let first_line = cleaned.split(['\r', '\n']).next().unwrap_or("");
    let delimiter = csv::detect_delimiter(first_line);
    debug!(?delimiter, first_line, "detected delimiter");

    let rows = csv::parse(cleaned, delimiter);
    if rows.len() < 2 {
        bail!(
            "CSV parsed but appears empty or only headers ({} rows)",
            rows.len()
        );
    }

    let headers: Vec<String> = rows[0].iter().map(|h| h.trim().to_string()).collect();
    let columns = map_columns(&headers);
    debug!(?headers, ?columns, "mapped columns");

    let missing = columns.missing_fields();
    if !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(|f| f.label()).collect();
        warn!(
            missing = labels.join(", "),
            "headers did not resolve every field, using positional fallback"
        );
    }

    let students = build_records(&rows[1..], &columns);
    info!(count = students.len(), "roster loaded");

    Ok(Roster {
        headers,
        columns,
        students,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::EnvFilter;

    fn init_test_logging() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("rosterscan=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    #[test]
    fn loads_arabic_roster_end_to_end() -> Result<()> {
        init_test_logging();
        let text = "\u{FEFF}الاسم الكامل,الرقم المدرسي,الصف,الشعبة,الجنسية\n\
                    أحمد,1023,5,A,مصري\n\
                    \"Doe, Jane\",77,3,B,Jordanian\n";

        let roster = load_roster(text)?;
        assert_eq!(roster.students.len(), 2);
        assert_eq!(roster.students[0].name, "أحمد");
        assert_eq!(roster.students[0].id, "1023");
        assert_eq!(roster.students[1].name, "Doe, Jane");
        assert!(roster.columns.missing_fields().is_empty());
        Ok(())
    }

    #[test]
    fn bom_makes_no_difference() -> Result<()> {
        let plain = "name,id,grade,section,nationality\nSara,55,3,B,Jordanian\n";
        let with_bom = format!("\u{FEFF}{}", plain);

        let a = load_roster(plain)?;
        let b = load_roster(&with_bom)?;
        assert_eq!(a.headers, b.headers);
        assert_eq!(a.students, b.students);
        Ok(())
    }

    #[test]
    fn semicolon_file_is_detected_and_parsed() -> Result<()> {
        let roster = load_roster("name;id\nSara;55\n")?;
        assert_eq!(roster.students[0].name, "Sara");
        assert_eq!(roster.students[0].id, "55");
        Ok(())
    }

    #[test]
    fn header_only_input_is_an_error() {
        assert!(load_roster("name,id,grade\n").is_err());
        assert!(load_roster("").is_err());
    }

    #[test]
    fn unrecognized_headers_still_load_by_position() -> Result<()> {
        let roster = load_roster("x,y,z,w,v\nSara,55,3,B,Jordanian\n")?;
        assert_eq!(roster.columns.missing_fields().len(), 5);
        assert_eq!(roster.students[0].name, "Sara");
        assert_eq!(roster.students[0].nationality, "Jordanian");
        Ok(())
    }
}
