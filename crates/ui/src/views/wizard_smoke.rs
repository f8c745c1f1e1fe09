use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dioxus::prelude::ReadableExt;
use services::{ANSWERS_KEY, FLAGS_KEY};
use storage::repository::{InMemoryStore, KeyValueStore, StorageError};
use weekend_core::Report;
use weekend_core::model::{AnswerBook, CompletionFlags, phase_at, phases};
use weekend_core::navigator::Navigator;
use weekend_core::report::compile_report;

use super::ViewError;
use super::test_harness::{
    ViewKind, preview, setup_view_harness, setup_view_harness_with_backend,
    setup_view_harness_with_store,
};
use crate::vm::WizardIntent;

/// Delegates to an `InMemoryStore`, failing every save while `failing` is set.
#[derive(Clone)]
struct SwitchableStore {
    inner: InMemoryStore,
    failing: Arc<AtomicBool>,
}

#[async_trait]
impl KeyValueStore for SwitchableStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.load(key).await
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("disk unavailable".to_string()));
        }
        self.inner.save(key, value).await
    }
}

#[tokio::test(flavor = "current_thread")]
async fn typing_an_answer_saves_the_whole_answers_blob() {
    let mut harness = setup_view_harness(ViewKind::Wizard(Navigator::for_catalog())).await;
    harness.rebuild();
    let phase = phase_at(0).unwrap();
    let first = phase.questions()[0];
    let second = phase.questions()[1];

    harness.dispatch(WizardIntent::Answer {
        question: first,
        value: "Slow invoicing".to_string(),
    });
    harness.dispatch(WizardIntent::Answer {
        question: second,
        value: "r/freelance".to_string(),
    });

    let mut expected = AnswerBook::new();
    expected.set(phase.name(), first, "Slow invoicing");
    expected.set(phase.name(), second, "r/freelance");
    let raw = harness.store.load(ANSWERS_KEY).await.unwrap().expect("answers blob");
    assert_eq!(serde_json::from_str::<AnswerBook>(&raw).unwrap(), expected);
    assert_eq!(harness.store.load(FLAGS_KEY).await.unwrap(), None);

    let html = harness.render();
    assert!(html.contains("Slow invoicing"), "missing answer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn toggling_completion_saves_the_flags_blob() {
    let mut harness = setup_view_harness(ViewKind::Wizard(Navigator::for_catalog())).await;
    harness.rebuild();

    harness.dispatch(WizardIntent::SetComplete(true));
    assert_eq!(
        harness.store.load(FLAGS_KEY).await.unwrap().as_deref(),
        Some(r#"{"Idea Generation":true}"#)
    );

    harness.dispatch(WizardIntent::Advance);
    harness.dispatch(WizardIntent::SetComplete(true));
    harness.dispatch(WizardIntent::SetComplete(false));
    assert_eq!(
        harness.store.load(FLAGS_KEY).await.unwrap().as_deref(),
        Some(r#"{"Competition Analysis":false,"Idea Generation":true}"#)
    );
    assert_eq!(harness.store.load(ANSWERS_KEY).await.unwrap(), None);
}

#[tokio::test(flavor = "current_thread")]
async fn download_writes_the_report_file() {
    let phase = phase_at(2).unwrap();
    let answers = format!(
        r#"{{"{}":{{"{}":"Pricing is unproven"}}}}"#,
        phase.name(),
        phase.questions()[1]
    );
    let store = InMemoryStore::with_entries([
        (ANSWERS_KEY, answers.as_str()),
        (FLAGS_KEY, r#"{"Idea Roasting":true}"#),
    ]);
    let mut harness = setup_view_harness_with_store(ViewKind::Wizard(preview()), store).await;
    harness.rebuild();

    harness.dispatch(WizardIntent::Download);

    let path = harness.export_dir.path().join(Report::DEFAULT_FILE_NAME);
    let written = std::fs::read_to_string(&path).expect("report file");
    let mut expected_answers = AnswerBook::new();
    expected_answers.set(phase.name(), phase.questions()[1], "Pricing is unproven");
    let mut expected_flags = CompletionFlags::new();
    expected_flags.set(phase.name(), true);
    assert_eq!(
        written,
        compile_report(phases(), &expected_answers, &expected_flags).as_str()
    );
    assert!(written.contains("Pricing is unproven"));

    let html = harness.render();
    assert!(html.contains("Saved to"), "missing export status in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn save_error_clears_after_a_later_save_succeeds() {
    let store = InMemoryStore::new();
    let failing = Arc::new(AtomicBool::new(true));
    let kv: Arc<dyn KeyValueStore> = Arc::new(SwitchableStore {
        inner: store.clone(),
        failing: Arc::clone(&failing),
    });
    let mut harness =
        setup_view_harness_with_backend(ViewKind::Wizard(Navigator::for_catalog()), store, kv)
            .await;
    harness.rebuild();

    harness.dispatch(WizardIntent::SetComplete(true));
    assert_eq!(*harness.handles().error().peek(), Some(ViewError::SaveFailed));
    let html = harness.render();
    assert!(
        html.contains(ViewError::SaveFailed.message()),
        "missing save error in {html}"
    );
    assert_eq!(harness.store.load(FLAGS_KEY).await.unwrap(), None);

    failing.store(false, Ordering::SeqCst);
    harness.dispatch(WizardIntent::SetComplete(true));
    assert_eq!(*harness.handles().error().peek(), None);
    let html = harness.render();
    assert!(
        !html.contains(ViewError::SaveFailed.message()),
        "stale save error in {html}"
    );
    assert_eq!(
        harness.store.load(FLAGS_KEY).await.unwrap().as_deref(),
        Some(r#"{"Idea Generation":true}"#)
    );
}

#[tokio::test(flavor = "current_thread")]
async fn preview_round_trip_returns_to_the_last_step() {
    let mut harness = setup_view_harness(ViewKind::Wizard(preview())).await;
    harness.rebuild();

    harness.dispatch(WizardIntent::ExitPreview);
    let vm = harness.handles().vm();
    assert!(!vm.peek().is_previewing());
    assert_eq!(vm.peek().navigator().step(), Some(6));
    let html = harness.render();
    assert!(html.contains("Preview Report"), "missing preview button in {html}");
}
