use services::{ANSWERS_KEY, FLAGS_KEY};
use storage::repository::InMemoryStore;
use weekend_core::model::phase_at;
use weekend_core::navigator::Navigator;

use super::test_harness::{
    ViewKind, last_step, preview, setup_view_harness, setup_view_harness_with_store,
};

#[tokio::test(flavor = "current_thread")]
async fn first_step_renders_questions_tools_and_next_button() {
    let mut harness = setup_view_harness(ViewKind::Wizard(Navigator::for_catalog())).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Step 1: Idea Generation"), "missing heading in {html}");
    for question in phase_at(0).unwrap().questions() {
        assert!(html.contains(question), "missing {question} in {html}");
    }
    assert!(html.contains("Helpful Tools"), "missing tools in {html}");
    assert!(html.contains("https://trends.google.com"), "missing link in {html}");
    assert!(html.contains("_blank"), "missing new-tab target in {html}");
    assert!(html.contains("Mark this step as completed"), "missing checkbox in {html}");
    assert!(html.contains("Next Step"), "missing next in {html}");
    assert!(!html.contains("Preview Report"), "unexpected preview in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn loaded_answers_prefill_the_form() {
    let phase = phase_at(0).unwrap();
    let answers = format!(
        r#"{{"{}":{{"{}":"Slow invoicing"}}}}"#,
        phase.name(),
        phase.questions()[0]
    );
    let store = InMemoryStore::with_entries([
        (ANSWERS_KEY, answers.as_str()),
        (FLAGS_KEY, r#"{"Idea Generation":true}"#),
    ]);

    let mut harness =
        setup_view_harness_with_store(ViewKind::Wizard(Navigator::for_catalog()), store).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Slow invoicing"), "missing answer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn last_step_offers_preview_instead_of_next() {
    let mut harness = setup_view_harness(ViewKind::Wizard(last_step())).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Step 7: Launch"), "missing heading in {html}");
    assert!(html.contains("Preview Report"), "missing preview in {html}");
    assert!(!html.contains("Next Step"), "unexpected next in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn preview_renders_compiled_report() {
    let mut harness = setup_view_harness(ViewKind::Wizard(preview())).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Report Preview"), "missing title in {html}");
    assert!(html.contains("SaaS Weekend Report"), "missing report in {html}");
    assert!(html.contains("Step 2: Competition Analysis"), "missing block in {html}");
    assert!(html.contains("(none)"), "missing placeholder in {html}");
    assert!(html.contains("Download Report"), "missing download in {html}");
    assert!(html.contains("Back to Steps"), "missing back in {html}");
    assert!(!html.contains("Mark this step as completed"), "unexpected form in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn routed_app_starts_on_first_step() {
    let mut harness = setup_view_harness(ViewKind::Routed).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Build Your SaaS in a Weekend"), "missing title in {html}");
    assert!(html.contains("Step 1: Idea Generation"), "missing heading in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn rendering_does_not_write_to_storage() {
    use storage::repository::KeyValueStore;

    let mut harness = setup_view_harness(ViewKind::Wizard(Navigator::for_catalog())).await;
    harness.rebuild();
    let _ = harness.render();
    assert_eq!(harness.store.load(ANSWERS_KEY).await.unwrap(), None);
    assert_eq!(harness.store.load(FLAGS_KEY).await.unwrap(), None);
}
