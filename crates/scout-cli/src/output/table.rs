/// Minimum width of any column before truncation kicks in.
const MIN_COLUMN: usize = 6;

/// Render left-aligned columns separated by two spaces, with a dashed rule
/// under the header. Columns are shrunk widest-first to fit `max_width`.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    let mut widths = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect::<Vec<_>>();
    if let Some(max_width) = max_width {
        fit(&mut widths, max_width);
    }

    let header = line(headers.iter().copied(), &widths);
    let rule = "-".repeat(header.chars().count());
    let mut lines = vec![header, rule];
    for row in rows {
        lines.push(line(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", clip(cell, width)))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn fit(widths: &mut [usize], max_width: usize) {
    let gaps = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + gaps > max_width {
        let Some(widest) = widths
            .iter_mut()
            .filter(|w| **w > MIN_COLUMN)
            .max_by_key(|w| **w)
        else {
            return;
        };
        *widest -= 1;
    }
}

fn clip(text: &str, width: usize) -> String {
    let text = text.replace('\n', " ");
    if text.chars().count() <= width {
        return text;
    }
    let kept = text.chars().take(width.saturating_sub(1)).collect::<String>();
    format!("{kept}…")
}
