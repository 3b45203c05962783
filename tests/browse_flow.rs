mod common;

use std::sync::Arc;
use std::time::Duration;

use common::mock_backend::{MockBackend, MockResponse};
use note_browser::client::{NotesClient, TokioDispatcher};
use note_browser::notes::{
    BrowserPhase, FetchCompletion, NoteSetController, ResponseDisposition,
};
use note_browser::ui::app::{App, Focus};
use note_browser::ui::search::SearchFormIntent;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

fn wired_controller(client: NotesClient) -> (NoteSetController, UnboundedReceiver<FetchCompletion>) {
    let (tx, rx) = unbounded_channel();
    let dispatcher = TokioDispatcher::new(
        tokio::runtime::Handle::current(),
        Arc::new(client),
        move |completion| {
            let _ = tx.send(completion);
        },
    );
    (
        NoteSetController::new(Box::new(dispatcher), common::utc_dates()),
        rx,
    )
}

async fn next_completion(rx: &mut UnboundedReceiver<FetchCompletion>) -> FetchCompletion {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("completion timed out")
        .expect("dispatcher dropped")
}

async fn wait_for_requests(mock: &MockBackend, count: usize) {
    for _ in 0..200 {
        if mock.captured_requests().await.len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("mock never saw {count} request(s)");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn search_then_page_through_notes() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::notes(
        "Jane Doe",
        &["<p>Hello &amp; welcome</p>", "second", "third"],
    ))
    .await;

    let client = common::client(&mock.endpoint(), Duration::from_secs(5));
    let (mut ctl, mut rx) = wired_controller(client);

    let seq = ctl.on_search("12345", "2024-01-15T10:00").unwrap();
    assert_eq!(ctl.view().body, "Loading...");

    let completion = next_completion(&mut rx).await;
    assert_eq!(completion.seq, seq);
    let outcome = ctl.on_response(completion.seq, completion.result);
    assert_eq!(outcome, ResponseDisposition::Loaded { count: 3 });

    let view = ctl.view();
    assert_eq!(view.patient_label.as_deref(), Some("Patient Name: Jane Doe"));
    assert!(view.body.contains("Hello & welcome"));
    assert!(!view.body.contains("<p>"));
    assert_eq!(view.note_type, "Progress");
    assert_eq!(view.note_date, "2023-11-14");
    assert_eq!(view.position, Some((0, 3)));
    assert!(!view.can_go_prev);
    assert!(view.can_go_next);

    assert!(ctl.on_next());
    assert!(ctl.on_next());
    assert!(!ctl.on_next());
    assert_eq!(ctl.view().body, "third");
    assert_eq!(ctl.view().position, Some((2, 3)));
    assert!(!ctl.view().can_go_next);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn superseded_search_response_is_ignored() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::notes("Old Patient", &["old"]).with_delay(300))
        .await;
    mock.enqueue_response(MockResponse::notes("New Patient", &["new1", "new2"]))
        .await;

    let client = common::client(&mock.endpoint(), Duration::from_secs(5));
    let (mut ctl, mut rx) = wired_controller(client);

    let first = ctl.on_search("111", "2024-01-01").unwrap();
    wait_for_requests(&mock, 1).await;
    let second = ctl.on_search("222", "2024-01-01").unwrap();

    let mut outcomes = Vec::new();
    for _ in 0..2 {
        let completion = next_completion(&mut rx).await;
        let seq = completion.seq;
        outcomes.push((seq, ctl.on_response(seq, completion.result)));
    }

    assert!(outcomes.contains(&(first, ResponseDisposition::Stale)));
    assert!(outcomes.contains(&(second, ResponseDisposition::Loaded { count: 2 })));
    assert_eq!(
        ctl.view().patient_label.as_deref(),
        Some("Patient Name: New Patient")
    );
    assert_eq!(ctl.view().body, "new1");
    assert_eq!(ctl.store().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failed_search_can_be_retried() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::error(503, "unavailable")).await;
    mock.enqueue_response(MockResponse::notes("Jane Doe", &["recovered"]))
        .await;

    let client = common::client(&mock.endpoint(), Duration::from_secs(5));
    let (mut ctl, mut rx) = wired_controller(client);

    ctl.on_search("12345", "2024-01-15").unwrap();
    let completion = next_completion(&mut rx).await;
    assert_eq!(
        ctl.on_response(completion.seq, completion.result),
        ResponseDisposition::Failed
    );
    assert!(matches!(ctl.phase(), BrowserPhase::Failed { .. }));
    assert!(ctl.view().body.contains("503"));
    assert!(ctl.store().is_empty());

    ctl.on_retry().unwrap();
    let completion = next_completion(&mut rx).await;
    assert_eq!(
        ctl.on_response(completion.seq, completion.result),
        ResponseDisposition::Loaded { count: 1 }
    );
    assert_eq!(ctl.view().body, "recovered");

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].query, requests[1].query);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn app_form_submission_drives_controller() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::notes("Jane Doe", &["A", "B"]))
        .await;

    let client = common::client(&mock.endpoint(), Duration::from_secs(5));
    let (ctl, mut rx) = wired_controller(client);
    let mut app = App::new(ctl);

    app.dispatch_form(SearchFormIntent::Prefill {
        patient_id: "12345".to_string(),
        after: "2024-01-15".to_string(),
    });
    assert!(app.form().is_complete());

    let seq = app.submit_search().unwrap();
    assert_eq!(app.focus(), Focus::Notes);

    let completion = next_completion(&mut rx).await;
    assert_eq!(completion.seq, seq);
    assert_eq!(
        app.on_fetch_complete(completion),
        ResponseDisposition::Loaded { count: 2 }
    );

    app.next_note();
    assert_eq!(app.view().body, "B");
    app.prev_note();
    assert_eq!(app.view().body, "A");
    assert_eq!(app.scroll(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn invalid_form_input_sends_nothing() {
    let mock = MockBackend::start().await;
    let client = common::client(&mock.endpoint(), Duration::from_secs(5));
    let (ctl, mut rx) = wired_controller(client);
    let mut app = App::new(ctl);

    app.dispatch_form(SearchFormIntent::Prefill {
        patient_id: "12345".to_string(),
        after: "yesterday".to_string(),
    });
    assert!(app.submit_search().is_none());
    assert_eq!(app.focus(), Focus::Form);
    assert!(app.view().phase.is_error());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(rx.try_recv().is_err());
    assert!(mock.captured_requests().await.is_empty());
}
