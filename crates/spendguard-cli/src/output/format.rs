pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders one numbered block: a tag line followed by indented detail lines.
pub fn numbered_block(number: usize, tag: &str, details: &[String]) -> Vec<String> {
    let mut lines = vec![format!("  {number}. {tag}")];
    for detail in details {
        lines.push(format!("     {detail}"));
    }
    lines
}
