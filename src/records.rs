// src/records.rs

use serde::{Deserialize, Serialize};

use crate::columns::{ColumnMap, Field};

/// One roster entry. All five attributes are kept as trimmed strings; no
/// field-level validation happens at this layer (garbage in, garbage out).
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Student {
    pub name: String,
    pub id: String,
    pub grade: String,
    pub section: String,
    pub nationality: String,
}

impl Student {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Id => &self.id,
            Field::Grade => &self.grade,
            Field::Section => &self.section,
            Field::Nationality => &self.nationality,
        }
    }
}

/// Build records from data rows using the resolved (or fallback) column
/// indices. A short row substitutes empty strings for the columns it lacks;
/// one bad row never fails the batch. Row order is preserved.
pub fn build_records(data_rows: &[Vec<String>], map: &ColumnMap) -> Vec<Student> {
    data_rows
        .iter()
        .filter(|row| row.iter().any(|c| !c.trim().is_empty()))
        .map(|row| Student {
            name: pick_cell(row, map.resolved_index(Field::Name)),
            id: pick_cell(row, map.resolved_index(Field::Id)),
            grade: pick_cell(row, map.resolved_index(Field::Grade)),
            section: pick_cell(row, map.resolved_index(Field::Section)),
            nationality: pick_cell(row, map.resolved_index(Field::Nationality)),
        })
        .collect()
}

fn pick_cell(row: &[String], index: usize) -> String {
    row.get(index).map(|c| c.trim().to_string()).unwrap_or_default()
}
