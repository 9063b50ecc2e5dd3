//! Plain ASCII table rendering for command output.

/// Rendered in place of `true` for boolean columns.
pub const CHECK_MARK: &str = if cfg!(windows) { "1" } else { "\u{2714}" };

fn width(cell: &str) -> usize {
    cell.chars().count()
}

fn border(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line
}

fn row_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).map_or("", String::as_str);
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(w - width(cell) + 1));
        line.push('|');
    }
    line
}

/// Renders `headers` and `rows` as a framed table, one line per row.
/// Rows shorter than the header are padded with empty cells.
#[must_use]
pub fn render(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(width(cell));
        }
    }

    let rule = border(&widths);
    let mut out = Vec::with_capacity(rows.len() + 4);
    out.push(rule.clone());
    out.push(row_line(headers, &widths));
    out.push(rule.clone());
    for row in rows {
        out.push(row_line(row, &widths));
    }
    out.push(rule);

    out.join("\n")
}
