use std::sync::Arc;

use quiz_core::model::{OptionKey, Question, QuestionId};
use storage::repository::{QuestionRepository, StorageError};

use super::test_harness::{
    ViewHarness, ViewKind, drive_dom, setup_view_harness, setup_view_harness_with_repo,
};
use crate::vm::QuizIntent;

async fn settle(harness: &mut ViewHarness) {
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
}

fn send(harness: &mut ViewHarness, intent: QuizIntent) {
    let dispatch = harness
        .quiz_handles
        .as_ref()
        .expect("quiz handles")
        .dispatch();
    harness.dom.in_runtime(|| dispatch.call(intent));
    drive_dom(&mut harness.dom);
}

fn key(raw: &str) -> OptionKey {
    OptionKey::new(raw).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_title_and_links() {
    let mut harness = setup_view_harness(ViewKind::Home, 15);
    settle(&mut harness).await;
    let html = harness.render();
    assert!(html.contains("Cybersecurity MCQ Test"), "missing title in {html}");
    assert!(html.contains("Take 10 Question Test"), "missing default link in {html}");
    assert!(
        html.contains("Take Full Test (all 15 Questions)"),
        "missing full test link in {html}"
    );
    assert!(html.contains("Practice well"), "missing footer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question_and_advances() {
    let mut harness = setup_view_harness(ViewKind::Quiz("10".to_string()), 15);
    settle(&mut harness).await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 10"), "missing position in {html}");
    assert!(html.contains("10% Complete"), "missing progress in {html}");
    assert!(html.contains("Sample question 1?"), "missing text in {html}");
    assert!(html.contains("Reveal Answer"), "missing reveal in {html}");

    send(&mut harness, QuizIntent::Select(key("B")));
    send(&mut harness, QuizIntent::Next);
    let html = harness.render();
    assert!(html.contains("Question 2 of 10"), "did not advance in {html}");
    assert!(html.contains("20% Complete"), "missing progress in {html}");

    send(&mut harness, QuizIntent::Reveal);
    let html = harness.render();
    assert!(html.contains("Correct Answer: B"), "missing reveal text in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_unparseable_count_uses_default() {
    let mut harness = setup_view_harness(ViewKind::Quiz("abc".to_string()), 15);
    settle(&mut harness).await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 10"), "missing default count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_caps_at_bank_size() {
    let mut harness = setup_view_harness(ViewKind::Quiz("30".to_string()), 2);
    settle(&mut harness).await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "missing capped count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_restarts_when_count_changes() {
    let mut harness = setup_view_harness(ViewKind::Quiz("2".to_string()), 15);
    settle(&mut harness).await;
    send(&mut harness, QuizIntent::Select(key("B")));
    send(&mut harness, QuizIntent::Next);
    assert!(harness.render().contains("Question 2 of 2"));

    harness.set_view(ViewKind::Quiz("5".to_string()));
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 5"), "quiz did not restart in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_completes_and_retakes() {
    let mut harness = setup_view_harness(ViewKind::Quiz("2".to_string()), 2);
    settle(&mut harness).await;

    send(&mut harness, QuizIntent::Select(key("B")));
    send(&mut harness, QuizIntent::Next);
    assert!(harness.render().contains("Finish"));
    send(&mut harness, QuizIntent::Select(key("A")));
    send(&mut harness, QuizIntent::Next);

    let html = harness.render();
    assert!(html.contains("Quiz Results"), "missing results in {html}");
    assert!(html.contains("50%"), "missing percentage in {html}");
    assert!(
        html.contains("You got 1 out of 2 questions correct"),
        "missing headline in {html}"
    );
    assert!(html.contains("Question 1: Correct"), "missing row in {html}");
    assert!(html.contains("Question 2: Incorrect"), "missing row in {html}");
    assert!(html.contains("Return to Home"), "missing home link in {html}");

    send(&mut harness, QuizIntent::Restart);
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "did not restart in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_empty_bank_stays_loading() {
    let mut harness = setup_view_harness(ViewKind::Quiz("10".to_string()), 0);
    settle(&mut harness).await;
    let html = harness.render();
    assert!(html.contains("Loading questions..."), "missing loading in {html}");
    assert!(!html.contains("Quiz Results"), "unexpected results in {html}");
}

struct FailingRepo;

#[async_trait::async_trait]
impl QuestionRepository for FailingRepo {
    async fn upsert_question(&self, _question: &Question) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_question(&self, _id: QuestionId) -> Result<Option<Question>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_questions(&self, _limit: u32) -> Result<Vec<Question>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn count_questions(&self) -> Result<u32, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_error_state() {
    let mut harness =
        setup_view_harness_with_repo(ViewKind::Quiz("10".to_string()), Arc::new(FailingRepo));
    settle(&mut harness).await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness_with_repo(ViewKind::Home, Arc::new(FailingRepo));
    settle(&mut harness).await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Take 10 Question Test"), "missing default link in {html}");
}
