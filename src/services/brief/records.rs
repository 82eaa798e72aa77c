use super::types::{
    ADMISSION_NUMBER_HEADER, CASE_RECORD_WIDTH, GRADE_A_MARK, PATIENT_NAME_HEADER,
    PRESCRIPTION_MARK,
};
use super::utils::{cell_at, remove_blanks};
use crate::models::{Row, Table};

/// Department rows of the first case-record table (header has both a
/// `患者姓名` and a `住院号` cell), each cut to five cells.
pub fn case_records(tables: &[Table]) -> Vec<Row> {
    let Some(table) = tables.iter().find(|table| {
        table.first().is_some_and(|headers| {
            headers.iter().any(|cell| cell == PATIENT_NAME_HEADER)
                && headers.iter().any(|cell| cell == ADMISSION_NUMBER_HEADER)
        })
    }) else {
        return Vec::new();
    };

    table
        .iter()
        .skip(1)
        .map(|row| row.iter().take(CASE_RECORD_WIDTH).cloned().collect())
        .collect()
}

/// Records graded 甲级 in their fifth cell.
pub fn grade_a_records(records: &[Row]) -> Vec<Row> {
    records
        .iter()
        .filter(|record| cell_at(record, CASE_RECORD_WIDTH - 1).contains(GRADE_A_MARK))
        .cloned()
        .collect()
}

/// Paragraphs that publish a prescription number for the department,
/// numbered `（1）`, `（2）`, ... with their four-character lead-in dropped.
pub fn prescription_reviews(paragraphs: &[String], department: &str) -> Vec<String> {
    let needle = format!("{}{}", department, PRESCRIPTION_MARK);
    paragraphs
        .iter()
        .map(|paragraph| remove_blanks(paragraph))
        .filter(|text| text.contains(&needle))
        .enumerate()
        .map(|(index, text)| {
            let body: String = text.chars().skip(4).collect();
            format!("（{}）{}", index + 1, body)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Table {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn records_come_from_patient_table_only() {
        let tables = vec![
            table(&[&["科室", "病床使用率"], &["放射治疗科", "92%"]]),
            table(&[
                &["科室", "患者姓名", "住院号", "存在问题", "病历等级", "扣分"],
                &["放射治疗科", "张三", "A001", "缺少签名", "甲级", "1"],
                &["放射治疗科", "李四", "A002", "无", "乙级"],
            ]),
        ];
        assert_eq!(
            case_records(&tables),
            table(&[
                &["放射治疗科", "张三", "A001", "缺少签名", "甲级"],
                &["放射治疗科", "李四", "A002", "无", "乙级"],
            ])
        );
    }

    #[test]
    fn both_markers_are_required() {
        let tables = vec![table(&[&["科室", "患者姓名"], &["放射治疗科", "张三"]])];
        assert!(case_records(&tables).is_empty());
        let header_only = vec![table(&[&["患者姓名", "住院号"]])];
        assert!(case_records(&header_only).is_empty());
    }

    #[test]
    fn grade_a_filter_tolerates_short_records() {
        let records = table(&[
            &["放射治疗科", "张三", "A001", "缺少签名", "甲级病历"],
            &["放射治疗科", "李四", "A002", "无", "乙级"],
            &["放射治疗科", "王五"],
        ]);
        assert_eq!(grade_a_records(&records), records[..1].to_vec());
    }

    #[test]
    fn prescription_paragraphs_are_numbered() {
        let paragraphs = vec![
            "一、门急诊处方点评".to_string(),
            "1、 放射治疗科 处方号 123：用药不适宜".to_string(),
            "2、放射治疗科处方号456：超剂量".to_string(),
            "3、内科处方号789".to_string(),
        ];
        assert_eq!(
            prescription_reviews(&paragraphs, "放射治疗科"),
            vec![
                "（1）治疗科处方号123：用药不适宜".to_string(),
                "（2）治疗科处方号456：超剂量".to_string(),
            ]
        );
    }
}
