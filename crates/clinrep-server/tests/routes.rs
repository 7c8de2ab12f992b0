use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;

use clinrep_export::pdf::HeadlessChrome;
use clinrep_export::styles::PageSetup;
use clinrep_export::template::{REPORT_TEMPLATE, TemplateStore};
use clinrep_instruments::tables::quotient::QuotientTable;
use clinrep_server::build_router;
use clinrep_server::middleware::audit::REQUEST_ID_HEADER;
use clinrep_server::state::AppState;

const TEMPLATE: &str = "<html><head><title>Report</title></head><body>\
<p class=\"name\">«Name»</p>\
<p>Quotient «Overall_Quotient», «Overall_Level».</p>\
<p>Tests: «Tests_Administered»</p>\
<p>Concerns: «Complaints»</p>\
<div style=\"display: «nimhans_display»;\"><h4>NIMHANS</h4></div>\
</body></html>";

fn state_for(dir: &Path, chrome: Option<PathBuf>) -> AppState {
    AppState {
        templates: Arc::new(TemplateStore::new(dir, false)),
        scores: Arc::new(QuotientTable),
        pdf: Arc::new(HeadlessChrome::new(chrome, Duration::from_secs(5))),
        page_setup: Arc::new(PageSetup::a4().with_base_href("http://127.0.0.1:8000/")),
    }
}

fn template_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(REPORT_TEMPLATE), TEMPLATE).unwrap();
    dir
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let dir = template_dir();
    let response = build_router(state_for(dir.path(), None))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn preview_substitutes_json_submission() {
    let dir = template_dir();
    let request = json_post(
        "/generate-preview",
        r#"{"name": "Asha <b>", "overallQuotient": 84, "showNimhans": true}"#,
    );
    let response = build_router(state_for(dir.path(), None))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let html = body_string(response).await;
    assert!(html.contains("<p class=\"name\">Asha &lt;b&gt;</p>"));
    assert!(html.contains("Quotient 84, Low level of intelligence."));
    assert!(html.contains("display: block;"));
    assert!(!html.contains('«'));
}

#[tokio::test]
async fn preview_accepts_urlencoded_form() {
    let dir = template_dir();
    let request = form_post("/generate-preview", "name=Ravi&overallQuotient=112");
    let response = build_router(state_for(dir.path(), None))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(">Ravi<"));
    assert!(html.contains("Quotient 112, High average."));
    assert!(html.contains("display: none;"));
}

#[tokio::test]
async fn urlencoded_repeated_keys_become_a_list() {
    let dir = template_dir();
    let router = build_router(state_for(dir.path(), None));

    for body in [
        "name=Ravi&complaints=Memory+issues&complaints=Spelling+mistakes",
        "name=Ravi&complaints%5B%5D=Memory+issues&complaints%5B%5D=Spelling+mistakes",
    ] {
        let response = router
            .clone()
            .oneshot(form_post("/generate-preview", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "body {body}");
        let html = body_string(response).await;
        assert!(
            html.contains("Concerns: Memory issues, Spelling mistakes"),
            "body {body} rendered {html}"
        );
    }
}

#[tokio::test]
async fn urlencoded_nimhans_flag_shows_block() {
    let dir = template_dir();
    let response = build_router(state_for(dir.path(), None))
        .oneshot(form_post("/generate-preview", "name=Ravi&showNimhans=true"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("display: block;"));
}

#[tokio::test]
async fn bracketed_single_value_is_still_a_list() {
    let dir = template_dir();
    let response = build_router(state_for(dir.path(), None))
        .oneshot(form_post("/generate-preview", "complaints%5B%5D=Inattention"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Concerns: Inattention</p>"));
}

#[tokio::test]
async fn preview_accepts_multipart_with_repeated_fields() {
    let dir = template_dir();
    let boundary = "clinrep-boundary";
    let part = |name: &str, value: &str| {
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    };
    let body = format!(
        "{}{}{}--{boundary}--\r\n",
        part("name", "Meera"),
        part("testsadministered[]", "MISIC"),
        part("testsadministered[]", "NIMHANS SLD Battery"),
    );
    let request = Request::post("/generate-preview")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    let response = build_router(state_for(dir.path(), None))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(">Meera<"));
    assert!(html.contains("Tests: MISIC, NIMHANS SLD Battery"));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let dir = template_dir();
    let response = build_router(state_for(dir.path(), None))
        .oneshot(json_post("/generate-preview", "{\"name\": "))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_template_hides_cause_from_preview() {
    let dir = tempfile::tempdir().unwrap();
    let response = build_router(state_for(dir.path(), None))
        .oneshot(json_post("/generate-preview", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "Error generating preview");
}

#[tokio::test]
async fn doc_download_is_a_word_attachment() {
    let dir = template_dir();
    let response = build_router(state_for(dir.path(), None))
        .oneshot(json_post("/download-preview-doc", r#"{"name": "Asha"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/msword"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=Clinical_Report.doc"
    );
    let doc = body_string(response).await;
    assert!(doc.contains("urn:schemas-microsoft-com:office:word"));
    assert!(doc.contains(">Asha<"));
}

#[tokio::test]
async fn doc_download_reports_template_failure() {
    let dir = tempfile::tempdir().unwrap();
    let response = build_router(state_for(dir.path(), None))
        .oneshot(json_post("/download-preview-doc", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(response).await.starts_with("Failed to generate DOC:"));
}

#[tokio::test]
async fn pdf_download_reports_browser_failure() {
    let dir = template_dir();
    let chrome = dir.path().join("no-such-browser");
    let response = build_router(state_for(dir.path(), Some(chrome)))
        .oneshot(json_post("/download-preview-pdf", r#"{"name": "Asha"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(response).await.starts_with("Failed to generate PDF:"));
}

#[tokio::test]
async fn template_assets_are_served() {
    let dir = template_dir();
    std::fs::write(dir.path().join("report.css"), "body { margin: 0; }").unwrap();

    let response = build_router(state_for(dir.path(), None))
        .oneshot(
            Request::get("/report_template/report.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "body { margin: 0; }");
}

#[tokio::test]
async fn template_edits_are_picked_up_without_cache() {
    let dir = template_dir();
    let router = build_router(state_for(dir.path(), None));

    let first = router
        .clone()
        .oneshot(json_post("/generate-preview", r#"{"name": "Asha"}"#))
        .await
        .unwrap();
    assert!(body_string(first).await.contains(">Asha<"));

    std::fs::write(dir.path().join(REPORT_TEMPLATE), "<h1>«Name» v2</h1>").unwrap();
    let second = router
        .oneshot(json_post("/generate-preview", r#"{"name": "Asha"}"#))
        .await
        .unwrap();
    assert_eq!(body_string(second).await, "<h1>Asha v2</h1>");
}
