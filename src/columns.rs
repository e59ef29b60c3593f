// src/columns.rs
//
// Header-row inspection: figure out which column carries which semantic
// field. Headers arrive in Arabic or English, with stray bidi control marks
// and inconsistent spacing, so everything is compared in normalized form.

/// The five semantic fields of a roster record. Declaration order doubles as
/// the positional-fallback column order (name→0 … nationality→4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Id,
    Grade,
    Section,
    Nationality,
}

/// Known header phrases per field, highest priority first. Substring
/// containment is accepted on purpose: "الرقم المدرسي" should match a header
/// with extra decoration around it.
static NAME_HEADERS: &[&str] = &[
    "الاسم الكامل",
    "الاسم",
    "اسم الطالب",
    "full name",
    "student name",
    "name",
];
static ID_HEADERS: &[&str] = &[
    "الرقم المدرسي",
    "رقم مدرسي",
    "الرقم",
    "school id",
    "student id",
    "id",
];
static GRADE_HEADERS: &[&str] = &["الصف الدراسي", "الصف", "grade", "class"];
static SECTION_HEADERS: &[&str] = &["الشعبة", "شعبة", "section"];
static NATIONALITY_HEADERS: &[&str] = &["الجنسية", "nationality", "nation"];

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Id,
        Field::Grade,
        Field::Section,
        Field::Nationality,
    ];

    /// Column used when no header matched this field.
    pub fn fallback_index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Id => "id",
            Field::Grade => "grade",
            Field::Section => "section",
            Field::Nationality => "nationality",
        }
    }

    fn candidates(self) -> &'static [&'static str] {
        match self {
            Field::Name => NAME_HEADERS,
            Field::Id => ID_HEADERS,
            Field::Grade => GRADE_HEADERS,
            Field::Section => SECTION_HEADERS,
            Field::Nationality => NATIONALITY_HEADERS,
        }
    }
}

/// Per-load resolution of semantic field → column position. Unresolved
/// fields fall back to their positional default at read time, so a miss
/// never fails a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    slots: [Option<usize>; 5],
}

impl ColumnMap {
    pub fn get(&self, field: Field) -> Option<usize> {
        self.slots[field as usize]
    }

    /// Mapped column, or the positional fallback when unresolved.
    pub fn resolved_index(&self, field: Field) -> usize {
        self.slots[field as usize].unwrap_or_else(|| field.fallback_index())
    }

    /// Fields that no header matched, for a non-fatal warning.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.slots[*f as usize].is_none())
            .collect()
    }
}

/// Normalize a header cell or query for comparison: strip bidi control
/// marks, collapse whitespace runs to single spaces (trimming in the
/// process), and case-fold.
pub fn normalize(s: &str) -> String {
    let stripped: String = s
        .chars()
        .filter(|c| !matches!(c, '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}'))
        .collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Resolve the header row into a [`ColumnMap`].
///
/// A header matches a candidate phrase when the normalized forms are equal
/// or the header contains the phrase as a substring. First candidate (in
/// priority order) that matches any header wins; leftmost matching header
/// wins. Recomputed on every load.
pub fn map_columns(headers: &[String]) -> ColumnMap {
    let normalized: Vec<String> = headers.iter().map(|h| normalize(h)).collect();

    let mut map = ColumnMap::default();
    for field in Field::ALL {
        map.slots[field as usize] = field.candidates().iter().find_map(|cand| {
            let cand = normalize(cand);
            normalized.iter().position(|h| *h == cand || h.contains(&cand))
        });
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn normalize_strips_bidi_marks_and_collapses_whitespace() {
        assert_eq!(normalize("\u{200F}  الاسم   الكامل \u{200E}"), "الاسم الكامل");
        assert_eq!(normalize("  Full\t Name "), "full name");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn arabic_headers_resolve_in_order() {
        let map = map_columns(&headers(&[
            "الاسم الكامل",
            "الرقم المدرسي",
            "الصف",
            "الشعبة",
            "الجنسية",
        ]));
        for (i, field) in Field::ALL.into_iter().enumerate() {
            assert_eq!(map.get(field), Some(i), "{}", field.label());
        }
        assert!(map.missing_fields().is_empty());
    }

    #[test]
    fn english_headers_resolve_out_of_order() {
        let map = map_columns(&headers(&["Grade", "Student Name", "School ID"]));
        assert_eq!(map.get(Field::Name), Some(1));
        assert_eq!(map.get(Field::Id), Some(2));
        assert_eq!(map.get(Field::Grade), Some(0));
        assert_eq!(map.get(Field::Section), None);
    }

    #[test]
    fn substring_match_tolerates_decorated_headers() {
        let map = map_columns(&headers(&["** الرقم المدرسي **", "x"]));
        assert_eq!(map.get(Field::Id), Some(0));
    }

    #[test]
    fn unrecognized_headers_leave_every_field_unresolved() {
        let map = map_columns(&headers(&["x", "y", "z", "w", "v"]));
        assert_eq!(map.missing_fields().len(), 5);
        for (i, field) in Field::ALL.into_iter().enumerate() {
            assert_eq!(map.resolved_index(field), i);
        }
    }

    #[test]
    fn leftmost_header_wins_for_a_candidate() {
        let map = map_columns(&headers(&["name", "name again"]));
        assert_eq!(map.get(Field::Name), Some(0));
    }

    #[test]
    fn higher_priority_candidate_beats_a_later_column_hit() {
        // "id" (low priority) appears in column 0, but "school id" (high
        // priority) in column 2 wins because candidates are tested in order.
        let map = map_columns(&headers(&["id", "name", "school id"]));
        assert_eq!(map.get(Field::Id), Some(2));
    }

    #[test]
    fn one_header_may_satisfy_two_fields() {
        // Accepted ambiguity of substring matching: both grade and section
        // can land on the same column. First-match-wins per field.
        let map = map_columns(&headers(&["grade section", "x"]));
        assert_eq!(map.get(Field::Grade), Some(0));
        assert_eq!(map.get(Field::Section), Some(0));
    }
}
