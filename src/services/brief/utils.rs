use crate::models::Row;

/// Removes ASCII spaces and newlines. Tabs, non-breaking and full-width
/// spaces are left alone.
pub fn remove_blanks(text: &str) -> String {
    text.chars().filter(|c| *c != ' ' && *c != '\n').collect()
}

/// Cell text at `index`, or `""` when the row is shorter.
pub fn cell_at(row: &Row, index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Concatenation of the first `width` cells, each re-cleaned.
pub fn leading_text(row: &Row, width: usize) -> String {
    row.iter().take(width).map(|cell| remove_blanks(cell)).collect()
}

/// Two-decimal rendering with at most one trailing zero dropped:
/// `45.20` -> `45.2`, `45.00` -> `45.0`.
pub fn format_percent(value: f64) -> String {
    let mut formatted = format!("{:.2}", value);
    if formatted.ends_with('0') {
        formatted.pop();
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_spaces_and_newlines_only() {
        assert_eq!(remove_blanks(" 病床\n使用 率 "), "病床使用率");
        assert_eq!(remove_blanks("a\tb\u{00a0}c\u{3000}d"), "a\tb\u{00a0}c\u{3000}d");
        assert_eq!(remove_blanks("a\r\nb"), "a\rb");
    }

    #[test]
    fn remove_blanks_is_idempotent() {
        for text in ["", "平均 住院日\n(天)", "≥ 85 %", "\n\n  \n"] {
            let once = remove_blanks(text);
            assert_eq!(remove_blanks(&once), once);
            assert!(!once.contains(' ') && !once.contains('\n'));
        }
    }

    #[test]
    fn cell_at_tolerates_short_rows() {
        let row = vec!["科室".to_string()];
        assert_eq!(cell_at(&row, 0), "科室");
        assert_eq!(cell_at(&row, 1), "");
    }

    #[test]
    fn leading_text_joins_up_to_width() {
        let row: Row = vec!["放射 治疗科".into(), "a".into(), "b".into(), "c".into()];
        assert_eq!(leading_text(&row, 3), "放射治疗科ab");
        assert_eq!(leading_text(&row[..1].to_vec(), 3), "放射治疗科");
    }

    #[test]
    fn format_strips_a_single_trailing_zero() {
        assert_eq!(format_percent(45.2), "45.2");
        assert_eq!(format_percent(45.0), "45.0");
        assert_eq!(format_percent(8.0 / 30.0 * 100.0), "26.67");
        assert_eq!(format_percent(20.0), "20.0");
        assert_eq!(format_percent(12.35), "12.35");
    }
}
