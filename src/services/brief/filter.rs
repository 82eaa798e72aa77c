use super::types::HEADER_WORDS;
use super::utils::{cell_at, leading_text};
use crate::models::{Row, Table};

/// Number of leading cells inspected for header vocabulary.
const HEADER_PROBE_WIDTH: usize = 3;

pub fn is_header_text(text: &str) -> bool {
    HEADER_WORDS.iter().any(|word| text.contains(word))
}

pub fn is_header_row(row: &Row) -> bool {
    is_header_text(&leading_text(row, HEADER_PROBE_WIDTH))
}

/// A department row names the department in its first or second cell and is
/// never the first row of its table. Missing cells count as empty.
pub fn is_department_row(index: usize, row: &Row, department: &str) -> bool {
    index >= 1 && (cell_at(row, 0).contains(department) || cell_at(row, 1).contains(department))
}

/// Keeps header rows and the department's rows, in order.
pub fn filter_table(table: &Table, department: &str) -> Table {
    table
        .iter()
        .enumerate()
        .filter(|(index, row)| is_header_row(row) || is_department_row(*index, row, department))
        .map(|(_, row)| row.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPT: &str = "放射治疗科";

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn header_words_are_recognised() {
        for word in ["指标名称", "检查项目", "科室", "科别"] {
            assert!(is_header_text(word), "{word}");
        }
        assert!(!is_header_text("放射治疗科"));
    }

    #[test]
    fn header_vocabulary_is_probed_in_first_three_cells() {
        assert!(is_header_row(&row(&["序号", "", "科别", "床位"])));
        assert!(!is_header_row(&row(&["序号", "a", "b", "科室"])));
    }

    #[test]
    fn department_is_matched_in_first_or_second_cell() {
        assert!(is_department_row(1, &row(&["放射治疗科", "1"]), DEPT));
        assert!(is_department_row(2, &row(&["3", "放射治疗科一病区"]), DEPT));
        assert!(!is_department_row(1, &row(&["3", "4", "放射治疗科"]), DEPT));
        assert!(!is_department_row(0, &row(&["放射治疗科"]), DEPT));
        assert!(is_department_row(1, &row(&["放射治疗科"]), DEPT));
    }

    #[test]
    fn unrelated_rows_are_dropped() {
        let table = vec![
            row(&["科室", "病床使用率"]),
            row(&["内科", "90%"]),
            row(&["放射治疗科", "92%"]),
            row(&["外科", "88%"]),
            row(&["合计", "89%"]),
        ];
        assert_eq!(
            filter_table(&table, DEPT),
            vec![row(&["科室", "病床使用率"]), row(&["放射治疗科", "92%"])]
        );
    }

    #[test]
    fn header_rows_are_kept_anywhere() {
        let table = vec![
            row(&["一、医疗质量"]),
            row(&["项目", "目标值"]),
            row(&["外科", "1"]),
        ];
        assert_eq!(filter_table(&table, DEPT), vec![row(&["项目", "目标值"])]);
    }

    #[test]
    fn empty_rows_are_dropped() {
        let table = vec![row(&["科室"]), Vec::new()];
        assert_eq!(filter_table(&table, DEPT), vec![row(&["科室"])]);
    }
}
