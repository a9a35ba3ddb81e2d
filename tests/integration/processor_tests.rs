//! DocumentProcessor integration tests

use crate::common::assertions::BatchAssertions;
use crate::common::fixtures::task_status;
use crate::common::server::{TOKEN, TestApi};
use crate::common::{DocumentFactory, ProjectFactory};
use crate::{assert_err, assert_ok};
use chrono::Local;
use parking_lot::Mutex;
use pergaminos_rs::core::batch::EditField;
use pergaminos_rs::sdk::errors::fallback;
use pergaminos_rs::{
    ApiClient, DocumentProcessor, PollOutcome, Session, SubmitOutcome, Task, TaskStatus,
};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

const PROJECT_NAME: &str = "Archivo Histórico";

async fn mount_project(api: &TestApi) {
    Mock::given(method("GET"))
        .and(path(TestApi::api_path("projects/p1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(ProjectFactory::create("p1", PROJECT_NAME)))
        .mount(&api.server)
        .await;
    Mock::given(method("GET"))
        .and(path(TestApi::api_path("projects/p1/documents")))
        .respond_with(ResponseTemplate::new(200).set_body_json(DocumentFactory::unsorted_three()))
        .mount(&api.server)
        .await;
}

async fn processor(api: &TestApi) -> DocumentProcessor {
    mount_project(api).await;
    let mut processor = DocumentProcessor::new(api.authed_client(), api.config.polling.clone());
    assert_ok!(processor.select_project_by_id("p1").await);
    processor
}

#[derive(Default)]
struct Seen {
    updates: Mutex<Vec<Task>>,
    terminals: Mutex<Vec<Task>>,
}

fn recorder(seen: &Arc<Seen>) -> (impl Fn(&Task) + Send + 'static, impl FnOnce(Task) + Send + 'static) {
    let updates = seen.clone();
    let terminals = seen.clone();
    (
        move |task: &Task| updates.updates.lock().push(task.clone()),
        move |task: Task| terminals.terminals.lock().push(task),
    )
}

#[tokio::test]
async fn test_select_project_loads_clean_baseline() {
    let api = TestApi::start().await;
    let processor = processor(&api).await;

    assert_eq!(processor.project().map(|p| p.name.as_str()), Some(PROJECT_NAME));
    assert_eq!(processor.edits().len(), 3);
    processor.edits().assert_clean();
}

#[tokio::test]
async fn test_submit_without_changes_sends_nothing() {
    let api = TestApi::start().await;
    Mock::given(method("POST"))
        .and(path(TestApi::api_path("projects/p1/documents/process-rename-reorder")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"task_id": "t1"})))
        .expect(0)
        .mount(&api.server)
        .await;

    let mut processor = processor(&api).await;
    let err = assert_err!(processor.submit_changes(|_: &Task| {}, |_: Task| {}).await);
    assert!(err.is_validation());
    assert!(!processor.is_tracking());
}

#[tokio::test]
async fn test_submit_without_project_is_rejected() {
    let api = TestApi::start().await;
    let mut processor = DocumentProcessor::new(api.authed_client(), api.config.polling.clone());

    let err = assert_err!(processor.submit_changes(|_: &Task| {}, |_: Task| {}).await);
    assert!(err.is_validation());
    assert!(api.requests().await.is_empty());
}

#[tokio::test]
async fn test_full_process_flow() {
    let api = TestApi::start().await;
    Mock::given(method("POST"))
        .and(path(TestApi::api_path("projects/p1/documents/process-rename-reorder")))
        .and(body_string_contains(
            r#""d2":{"newName":"a.pdf","newOrder":1,"currentName":"a.pdf","currentOrder":2}"#,
        ))
        .and(body_string_contains("name=\"project_id\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"task_id": "t1"})))
        .expect(1)
        .mount(&api.server)
        .await;
    Mock::given(method("GET"))
        .and(path(TestApi::api_path("projects/p1/process-status/t1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_status("processing", 40)))
        .up_to_n_times(2)
        .mount(&api.server)
        .await;
    Mock::given(method("GET"))
        .and(path(TestApi::api_path("projects/p1/process-status/t1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "progress": 100,
            "download_url": "/api/downloads/t1.pdf"
        })))
        .mount(&api.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/downloads/t1.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 procesado".to_vec()))
        .expect(1)
        .mount(&api.server)
        .await;

    let mut processor = processor(&api).await;
    assert!(processor.edits_mut().apply_order_rule("alfabético").is_some());
    processor
        .edits()
        .assert_pending_orders(&[("d2", 1), ("d1", 2), ("d3", 3)]);

    let seen = Arc::new(Seen::default());
    let (on_update, on_terminal) = recorder(&seen);
    let outcome = assert_ok!(processor.submit_changes(on_update, on_terminal).await);
    assert!(matches!(outcome, SubmitOutcome::Tracking { ref task_id } if task_id == "t1"));

    let task = match processor.wait().await {
        Some(PollOutcome::Completed(task)) => task,
        other => panic!("unexpected outcome: {other:?}"),
    };
    assert_eq!(seen.updates.lock().len(), 3);
    assert_eq!(seen.terminals.lock().len(), 1);
    assert_eq!(task.task_id, "t1");

    let dir = TempDir::new().unwrap();
    let file = assert_ok!(processor.download_result(&task, dir.path()).await);
    let expected = format!(
        "{}_procesado_{}.pdf",
        PROJECT_NAME,
        Local::now().date_naive().format("%Y-%m-%d")
    );
    assert_eq!(file.file_name().and_then(|n| n.to_str()), Some(expected.as_str()));
    assert_eq!(std::fs::read(&file).unwrap(), b"%PDF-1.4 procesado");
}

#[tokio::test]
async fn test_synchronous_completion() {
    let api = TestApi::start().await;
    Mock::given(method("POST"))
        .and(path(TestApi::api_path("projects/p1/documents/process-rename-reorder")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Documentos procesados",
            "renamed": 3
        })))
        .mount(&api.server)
        .await;

    let mut processor = processor(&api).await;
    assert_ok!(processor.apply_name_pattern("DOC_{numero}"));

    match assert_ok!(processor.submit_changes(|_: &Task| {}, |_: Task| {}).await) {
        SubmitOutcome::Completed(accepted) => {
            assert_eq!(accepted.message.as_deref(), Some("Documentos procesados"))
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(processor.wait().await.is_none());
}

#[tokio::test]
async fn test_submit_failure_keeps_edits() {
    let api = TestApi::start().await;
    Mock::given(method("POST"))
        .and(path(TestApi::api_path("projects/p1/documents/process-rename-reorder")))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Orden duplicado"})),
        )
        .mount(&api.server)
        .await;

    let mut processor = processor(&api).await;
    assert_ok!(processor.edits_mut().set_pending_field("d1", EditField::Order(2)));

    let err = assert_err!(processor.submit_changes(|_: &Task| {}, |_: Task| {}).await);
    assert_eq!(err.user_message(fallback::PROCESS_DOCUMENTS), "Orden duplicado");
    assert_eq!(processor.edits().changed_count(), 1);
}

#[tokio::test]
async fn test_status_error_ends_as_failed_task() {
    let api = TestApi::start().await;
    Mock::given(method("POST"))
        .and(path(TestApi::api_path("projects/p1/documents/process-rename-reorder")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"task_id": "t2"})))
        .mount(&api.server)
        .await;
    Mock::given(method("GET"))
        .and(path(TestApi::api_path("projects/p1/process-status/t2")))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&api.server)
        .await;

    let mut processor = processor(&api).await;
    assert_ok!(processor.apply_name_pattern("{proyecto}_{numero}"));

    let seen = Arc::new(Seen::default());
    let (on_update, on_terminal) = recorder(&seen);
    assert_ok!(processor.submit_changes(on_update, on_terminal).await);

    match processor.wait().await {
        Some(PollOutcome::Failed(task)) => {
            assert_eq!(task.status, TaskStatus::Failed);
            assert_eq!(task.error.as_deref(), Some(fallback::PROCESS_STATUS));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(seen.updates.lock().is_empty());
    assert_eq!(seen.terminals.lock().len(), 1);
}

#[tokio::test]
async fn test_status_error_is_terminal_even_with_retries() {
    let api = TestApi::start().await;
    mount_project(&api).await;
    Mock::given(method("POST"))
        .and(path(TestApi::api_path("projects/p1/documents/process-rename-reorder")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"task_id": "t2"})))
        .mount(&api.server)
        .await;
    Mock::given(method("GET"))
        .and(path(TestApi::api_path("projects/p1/process-status/t2")))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&api.server)
        .await;
    Mock::given(method("GET"))
        .and(path(TestApi::api_path("projects/p1/process-status/t2")))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_status("completed", 100)))
        .expect(0)
        .mount(&api.server)
        .await;

    let mut config = api.config.clone();
    config.api.max_retries = 2;
    config.api.retry_delay_ms = 1;
    let client = assert_ok!(ApiClient::new(&config, Session::default()));
    assert_ok!(client.session().set_token(TOKEN));

    let mut processor = DocumentProcessor::new(client, config.polling.clone());
    assert_ok!(processor.select_project_by_id("p1").await);
    assert_ok!(processor.apply_name_pattern("{proyecto}_{numero}"));

    let seen = Arc::new(Seen::default());
    let (on_update, on_terminal) = recorder(&seen);
    assert_ok!(processor.submit_changes(on_update, on_terminal).await);

    assert!(matches!(processor.wait().await, Some(PollOutcome::Failed(_))));
    assert!(seen.updates.lock().is_empty());
    assert_eq!(seen.terminals.lock().len(), 1);
}

#[tokio::test]
async fn test_semantic_reorder_flow() {
    let api = TestApi::start().await;
    Mock::given(method("POST"))
        .and(path(TestApi::api_path("projects/p1/documents/reorder")))
        .and(body_string_contains("semantic_instructions=por+fecha+de+escritura"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"task_id": "r1"})))
        .expect(1)
        .mount(&api.server)
        .await;
    Mock::given(method("GET"))
        .and(path(TestApi::api_path("projects/p1/reorder-status/r1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_status("completed", 100)))
        .mount(&api.server)
        .await;

    let mut processor = processor(&api).await;
    let err = assert_err!(
        processor
            .submit_instructions("   ", |_: &Task| {}, |_: Task| {})
            .await
    );
    assert!(err.is_validation());

    assert_ok!(
        processor
            .submit_instructions("por fecha de escritura", |_: &Task| {}, |_: Task| {})
            .await
    );
    assert!(matches!(processor.wait().await, Some(PollOutcome::Completed(_))));
}

#[tokio::test]
async fn test_cancel_stops_tracking() {
    let api = TestApi::start().await;
    Mock::given(method("POST"))
        .and(path(TestApi::api_path("projects/p1/documents/process-rename-reorder")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"task_id": "t3"})))
        .mount(&api.server)
        .await;
    Mock::given(method("GET"))
        .and(path(TestApi::api_path("projects/p1/process-status/t3")))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_status("processing", 10)))
        .mount(&api.server)
        .await;

    let mut processor = processor(&api).await;
    assert_ok!(processor.edits_mut().set_pending_field("d3", EditField::Order(1)));

    let seen = Arc::new(Seen::default());
    let (on_update, on_terminal) = recorder(&seen);
    assert_ok!(processor.submit_changes(on_update, on_terminal).await);
    assert!(processor.is_tracking());

    tokio::time::sleep(std::time::Duration::from_millis(70)).await;
    processor.cancel();
    processor.cancel();
    assert!(!processor.is_tracking());
    assert!(processor.wait().await.is_none());

    let updates_at_cancel = seen.updates.lock().len();
    tokio::time::sleep(std::time::Duration::from_millis(80)).await;
    assert_eq!(seen.updates.lock().len(), updates_at_cancel);
    assert!(seen.terminals.lock().is_empty());
}

#[tokio::test]
async fn test_refresh_discards_edits() {
    let api = TestApi::start().await;
    let mut processor = processor(&api).await;

    assert_ok!(processor.apply_name_pattern("DOC_{numero}"));
    assert!(processor.edits().has_any_change());

    assert_ok!(processor.refresh().await);
    processor.edits().assert_clean();
}

#[tokio::test]
async fn test_download_requires_completed_task() {
    let api = TestApi::start().await;
    let processor = processor(&api).await;
    let dir = TempDir::new().unwrap();

    let pending = Task::pending("t1");
    let err = assert_err!(processor.download_result(&pending, dir.path()).await);
    assert!(err.is_validation());
}
