use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::Phase;
use services::quiz::SAVE_FAILED_NOTE;
use services::{ScoreSubmission, ScoreSubmitter, SubmitAck, SubmitError};

use super::test_harness::{delayed_quiz, offline_quiz, quiz_with_submitter, setup_view_harness};
use crate::vm::EMPTY_ID_PROMPT;

const SLOW: Duration = Duration::from_millis(100);
const PATIENCE: Duration = Duration::from_secs(2);

struct FailingSubmitter;

#[async_trait::async_trait]
impl ScoreSubmitter for FailingSubmitter {
    async fn submit_score(&self, _submission: &ScoreSubmission) -> Result<SubmitAck, SubmitError> {
        Err(SubmitError::Rejected("offline".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_start_prompt() {
    let mut harness = setup_view_harness(offline_quiz(5, 3));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("PIXEL QUIZ"), "missing title in {html}");
    assert!(html.contains("PRESS START"), "missing start button in {html}");
    assert!(html.contains("QUESTIONS FROM: offline"), "missing footer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_renders_first_question() {
    let quiz = offline_quiz(2, 1);
    quiz.start("ash").await.expect("start");

    let mut harness = setup_view_harness(quiz);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Q1: The Master Asks"), "missing label in {html}");
    assert!(html.contains("What is the capital of France?"), "missing title in {html}");
    assert!(html.contains("Paris"), "missing option in {html}");
    assert!(html.contains("Score: 0"), "missing score in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_card_smoke_renders_pass() {
    let quiz = offline_quiz(1, 1);
    quiz.start("ash").await.expect("start");
    quiz.answer("Paris").await.expect("answer");

    let mut harness = setup_view_harness(quiz);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("MISSION COMPLETE"), "missing heading in {html}");
    assert!(html.contains("Score: 1 / 1"), "missing score in {html}");
    assert!(html.contains("TRY AGAIN"), "missing retry in {html}");
    assert!(!html.contains("Note:"), "unexpected note in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_card_smoke_renders_save_failure_note() {
    let quiz = quiz_with_submitter(1, 1, Arc::new(FailingSubmitter));
    quiz.start("ash").await.expect("start");
    quiz.answer("Berlin").await.expect("answer");

    let mut harness = setup_view_harness(quiz);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("GAME OVER"), "missing heading in {html}");
    assert!(html.contains("Score: 0 / 1"), "missing score in {html}");
    let note = format!("Note: {SAVE_FAILED_NOTE}");
    assert!(html.contains(&note), "missing {note} in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn screens_follow_published_snapshots() {
    let mut harness = setup_view_harness(offline_quiz(2, 1));
    harness.rebuild();
    harness.drive_async().await;
    assert!(harness.render().contains("PRESS START"));

    harness.quiz.start("ash").await.expect("start");
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Q1: The Master Asks"), "missing game screen in {html}");

    harness.quiz.reset();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("PRESS START"), "missing home screen in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn press_start_survives_the_loading_screen() {
    let mut harness = setup_view_harness(delayed_quiz(2, 1, SLOW));
    harness.rebuild();

    harness.type_text("ash");
    harness.click(0);
    assert!(harness.drive_until(Phase::Playing, PATIENCE).await);
    assert_eq!(harness.quiz.snapshot().user_id, "ash");
    let html = harness.render();
    assert!(html.contains("Q1: The Master Asks"), "missing game screen in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn enter_key_starts_the_game() {
    let mut harness = setup_view_harness(delayed_quiz(2, 1, SLOW));
    harness.rebuild();

    harness.type_text("  ash ");
    harness.press_enter();

    assert!(harness.drive_until(Phase::Playing, PATIENCE).await);
    assert_eq!(harness.quiz.snapshot().user_id, "ash");
}

#[tokio::test(flavor = "current_thread")]
async fn blank_id_shows_prompt_and_stays_home() {
    let mut harness = setup_view_harness(delayed_quiz(2, 1, SLOW));
    harness.rebuild();

    harness.type_text("   ");
    harness.click(0);
    harness.drive_async().await;

    assert_eq!(harness.quiz.snapshot().phase, Phase::Idle);
    let html = harness.render();
    assert!(html.contains(EMPTY_ID_PROMPT), "missing prompt in {html}");
    assert!(html.contains("PRESS START"), "left home screen: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn clicks_play_through_to_result_and_back_home() {
    let mut harness = setup_view_harness(delayed_quiz(1, 1, SLOW));
    harness.rebuild();

    harness.type_text("ash");
    harness.click(0);
    assert!(harness.drive_until(Phase::Playing, PATIENCE).await);

    harness.click(0);
    assert!(harness.drive_until(Phase::Finished, PATIENCE).await);
    let snapshot = harness.quiz.snapshot();
    assert_eq!(snapshot.answers.len(), 1);
    assert!(snapshot.last_error.is_none());
    let html = harness.render();
    assert!(html.contains("Score: "), "missing result score in {html}");
    assert!(html.contains("TRY AGAIN"), "missing retry in {html}");

    harness.click(0);
    assert!(harness.drive_until(Phase::Idle, PATIENCE).await);
    let html = harness.render();
    assert!(html.contains("PRESS START"), "missing home screen in {html}");
}
