use recast_engine::EngineError;

// ═══════════════════════════════════════════════════════════════
//  Row splitting and joining
// ═══════════════════════════════════════════════════════════════

/// Split one line into cells. No quoting: every delimiter separates.
pub(crate) fn parse_cells(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter).collect()
}

/// Join cells into one line without a terminator.
///
/// With no quoting there is no way to carry a delimiter or line break
/// inside a cell, so such a cell is rejected.
pub(crate) fn join_cells<S: AsRef<str>>(cells: &[S], delimiter: char) -> Result<String, EngineError> {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        let cell = cell.as_ref();
        if cell.contains([delimiter, '\n', '\r']) {
            return Err(EngineError::format_err(format!(
                "cell {cell:?} contains the delimiter or a line break"
            )));
        }
        if i > 0 {
            line.push(delimiter);
        }
        line.push_str(cell);
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_empty_cells() {
        assert_eq!(parse_cells("a||b|", '|'), ["a", "", "b", ""]);
        assert_eq!(parse_cells("1,2|s,t", '|'), ["1,2", "s,t"]);
    }

    #[test]
    fn join_rejects_embedded_delimiter() {
        assert_eq!(join_cells(&["U", "1,2", ""], '|').expect("line"), "U|1,2|");
        assert!(matches!(
            join_cells(&["a|b"], '|'),
            Err(EngineError::Format(_))
        ));
        assert!(join_cells(&["a\nb"], ';').is_err());
    }
}
