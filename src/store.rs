// src/store.rs

use crate::columns::ColumnMap;
use crate::records::Student;

/// Everything one successful load produced: the headers the file claims,
/// the column resolution derived from them, and the built records.
#[derive(Debug, Clone)]
pub struct Roster {
    pub headers: Vec<String>,
    pub columns: ColumnMap,
    pub students: Vec<Student>,
}

/// Single-writer holder for the session's current roster.
///
/// Replacement is wholesale: a new load swaps the entire roster, so the
/// last completed load wins. A failed load never touches the store, which
/// keeps previously loaded data intact.
#[derive(Debug, Default)]
pub struct RosterStore {
    current: Option<Roster>,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, roster: Roster) {
        self.current = Some(roster);
    }

    pub fn roster(&self) -> Option<&Roster> {
        self.current.as_ref()
    }
}
