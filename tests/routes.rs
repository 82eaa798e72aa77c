//! Handler-level tests for the HTTP surface.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use qc_brief_services::models::{Document, Table};
use qc_brief_services::routes::{self, briefs};
use qc_brief_services::{AppState, Config};

fn table(rows: &[&[&str]]) -> Table {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

fn state() -> Arc<AppState> {
    let config = Config::from_lookup(|_| None).expect("default config");
    Arc::new(AppState::new(config).expect("default catalog compiles"))
}

fn document() -> Document {
    Document {
        tables: vec![table(&[
            &["科室", "病床使用率", "平均住院日"],
            &["科室", "≥85%", "≤9"],
            &["放射治疗科", "92%", "8.2"],
        ])],
        paragraphs: Vec::new(),
    }
}

#[test]
fn health_check_answers_ok() {
    assert_eq!(tokio_test::block_on(routes::health_check()), "OK");
}

#[tokio::test]
async fn analyze_returns_metrics_in_catalog_order() {
    let Json(extraction) = briefs::analyze_brief(State(state()), Json(document()))
        .await
        .expect("analysis succeeds");

    assert_eq!(extraction.department, "放射治疗科");
    assert_eq!(extraction.metrics.len(), 13);
    assert_eq!(extraction.metrics.iter().next().unwrap().name, "病床使用率");
    assert_eq!(extraction.metrics.get("病床使用率").unwrap().expected, "≥85%");
    // "≤" is not a threshold marker
    let stay = extraction.metrics.get("平均住院日").unwrap();
    assert_eq!((stay.actual.as_str(), stay.expected.as_str()), ("8.2", ""));

    let json = serde_json::to_value(&extraction).unwrap();
    assert_eq!(json["metrics"][0]["name"], "病床使用率");
    assert_eq!(json["metrics"][0]["actual"], "92%");
}

#[tokio::test]
async fn empty_document_yields_empty_metrics() {
    let response = briefs::analyze_brief(State(state()), Json(Document::default()))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);

    let Json(extraction) = briefs::analyze_brief(State(state()), Json(Document::default()))
        .await
        .expect("empty document is analyzed");
    assert_eq!(extraction.metrics.len(), 13);
    assert!(extraction
        .metrics
        .iter()
        .all(|m| m.actual.is_empty() && m.expected.is_empty()));
    assert!(extraction.grade_a_records.is_empty());
}

#[tokio::test]
async fn broken_registry_is_unprocessable() {
    let document = Document {
        tables: vec![table(&[
            &["科室", "病种名称", "病例数", "入径数", "出径数", "完成数"],
            &["放射治疗科", "鼻咽癌", "十", "3", "0", "2"],
        ])],
        paragraphs: Vec::new(),
    };
    let err = briefs::analyze_brief(State(state()), Json(document))
        .await
        .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn fill_writes_into_the_template() {
    let request: briefs::FillRequest = serde_json::from_value(serde_json::json!({
        "document": { "tables": document().tables },
        "template": [
            [["指标", "实际值", "目标值", "指标", "实际值", "目标值"],
             ["病床使用率", "", "", "平均住院日", "", ""]]
        ]
    }))
    .unwrap();

    let Json(response) = briefs::fill_template(State(state()), Json(request))
        .await
        .expect("fill succeeds");
    assert_eq!(
        response.template[0][1],
        vec!["病床使用率", "92%", "≥85%", "平均住院日", "8.2", ""]
    );

    let json = serde_json::to_value(&response).unwrap();
    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["template"]);
}

#[tokio::test]
async fn fill_without_template_is_rejected() {
    let request = briefs::FillRequest {
        document: document(),
        template: Vec::new(),
    };
    let err = briefs::fill_template(State(state()), Json(request))
        .await
        .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}
