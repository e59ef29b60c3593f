// src/search.rs

use crate::columns::{normalize, Field};
use crate::records::Student;

/// How many records an empty query shows.
pub const DISPLAY_CAP: usize = 200;

/// Filter the roster by a free-text query.
///
/// The query is normalized the same way headers are; a record matches when
/// the query is a substring of any of its five normalized field values. An
/// empty (or whitespace-only) query returns the first [`DISPLAY_CAP`]
/// records. Pure and synchronous; never fails.
pub fn search<'a>(students: &'a [Student], query: &str) -> Vec<&'a Student> {
    let query = normalize(query);
    if query.is_empty() {
        return students.iter().take(DISPLAY_CAP).collect();
    }

    students
        .iter()
        .filter(|s| {
            Field::ALL
                .into_iter()
                .any(|f| normalize(s.field(f)).contains(&query))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(name: &str, id: &str) -> Student {
        Student {
            name: name.into(),
            id: id.into(),
            grade: "5".into(),
            section: "A".into(),
            nationality: "مصري".into(),
        }
    }

    #[test]
    fn substring_of_id_matches() {
        let roster = vec![student("أحمد", "1023"), student("Sara", "77")];
        let hits = search(&roster, "102");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1023");
    }

    #[test]
    fn no_match_returns_empty_not_error() {
        let roster = vec![student("أحمد", "1023")];
        assert!(search(&roster, "zzz").is_empty());
    }

    #[test]
    fn query_is_normalized_before_matching() {
        let roster = vec![student("Jane Doe", "1")];
        assert_eq!(search(&roster, "  JANE ").len(), 1);
        assert_eq!(search(&roster, "\u{200F}doe").len(), 1);
    }

    #[test]
    fn any_of_the_five_fields_matches() {
        let roster = vec![student("أحمد", "1023")];
        assert_eq!(search(&roster, "مصري").len(), 1);
        assert_eq!(search(&roster, "a").len(), 1); // section
    }

    #[test]
    fn empty_query_shows_capped_prefix() {
        let roster: Vec<Student> = (0..DISPLAY_CAP + 50)
            .map(|i| student("x", &i.to_string()))
            .collect();
        let shown = search(&roster, "");
        assert_eq!(shown.len(), DISPLAY_CAP);
        assert_eq!(shown[0].id, "0");
        assert_eq!(search(&roster, "   ").len(), DISPLAY_CAP);
    }
}
