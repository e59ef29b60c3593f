// src/render.rs

use std::io::{self, Write};

use crate::columns::Field;
use crate::records::Student;

/// Shown instead of a table when the filtered list is empty.
pub const NO_RESULTS: &str = "لا توجد نتائج (no results)";

/// Write the records as a fixed six-column text table: sequence number plus
/// the five fields, widths padded to the longest cell. Column widths count
/// chars, which is close enough for terminal output.
pub fn render_table<W: Write>(students: &[&Student], out: &mut W) -> io::Result<()> {
    if students.is_empty() {
        return writeln!(out, "{}", NO_RESULTS);
    }

    let mut widths = [1usize; 6];
    let labels = ["#", "name", "id", "grade", "section", "nationality"];
    for (i, label) in labels.iter().enumerate() {
        widths[i] = label.chars().count();
    }
    for (seq, s) in students.iter().enumerate() {
        widths[0] = widths[0].max((seq + 1).to_string().len());
        for (i, field) in Field::ALL.into_iter().enumerate() {
            widths[i + 1] = widths[i + 1].max(s.field(field).chars().count());
        }
    }

    write_row(out, &labels.map(String::from), &widths)?;
    for (seq, s) in students.iter().enumerate() {
        let cells = [
            (seq + 1).to_string(),
            s.name.clone(),
            s.id.clone(),
            s.grade.clone(),
            s.section.clone(),
            s.nationality.clone(),
        ];
        write_row(out, &cells, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[String; 6], widths: &[usize; 6]) -> io::Result<()> {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        let pad = widths[i].saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat(' ').take(pad));
    }
    writeln!(out, "{}", line.trim_end())
}
