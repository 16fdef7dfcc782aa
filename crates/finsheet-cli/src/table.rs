//! Plain-text rendering of the grid

use std::fmt::Write;

use finsheet::{RenderedGrid, RowType};

const INDENT: &str = "  ";
const GAP: &str = "  ";

/// Lay the rendered grid out as a fixed-width table
///
/// The focused cell is wrapped in `[ ]`, the cell being edited in `{ }`.
/// Comments are marked with `*`.
pub fn format_table(grid: &RenderedGrid) -> String {
    let mut header = vec![
        vec![String::new(), String::new()],
        vec!["No.".to_string(), "Line Item".to_string()],
        vec![String::new(), String::new()],
    ];
    for column in &grid.columns {
        header[0].push(format!("P{}", column.number));
        header[1].push(column.label());
        let mut status = column.status().to_string();
        if !column.is_included {
            status.push_str(", excluded");
        }
        header[2].push(status);
    }

    let body: Vec<Vec<String>> = grid
        .rows
        .iter()
        .map(|row| {
            let label = match row.row_type {
                RowType::Spacer => String::new(),
                _ => format!("{}{}", INDENT.repeat(row.indent_level as usize), row.label),
            };
            let mut line = vec![row.number.map(|n| n.to_string()).unwrap_or_default(), label];
            line.extend(row.cells.iter().map(|cell| {
                let mut text = cell.text.clone();
                if cell.comment.is_some() {
                    text.push('*');
                }
                if cell.editing {
                    format!("{{{}}}", text)
                } else if cell.focused {
                    format!("[{}]", text)
                } else {
                    text
                }
            }));
            line
        })
        .collect();

    let columns = 2 + grid.columns.len();
    let mut widths = vec![0; columns];
    for line in header.iter().chain(&body) {
        for (i, text) in line.iter().enumerate() {
            widths[i] = widths[i].max(text.chars().count());
        }
    }

    let mut out = String::new();
    for line in header.iter().chain(&body) {
        let mut rendered = String::new();
        for (i, width) in widths.iter().enumerate() {
            let text = line.get(i).map(String::as_str).unwrap_or("");
            if i > 0 {
                rendered.push_str(GAP);
            }
            // Labels are left-aligned, numbers right-aligned
            if i == 1 {
                let _ = write!(rendered, "{:<width$}", text, width = width);
            } else {
                let _ = write!(rendered, "{:>width$}", text, width = width);
            }
        }
        out.push_str(rendered.trim_end());
        out.push('\n');
    }
    out
}
