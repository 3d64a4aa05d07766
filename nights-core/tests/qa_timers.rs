//! QA tests for timer ownership: scripted delays fire on schedule, and a
//! timer never outlives the phase that armed it.

mod common;

use common::*;
use nights_core::testing::{assert_line_contains, assert_phase, TestHarness};
use nights_core::{GameEvent, GamePhase, KeyInput, TimerTag};

#[test]
fn test_video_skip_cancels_the_accusation_timer() {
    let mut h = TestHarness::new();
    start(&mut h);
    day1_complete(&mut h);
    day2_to_video(&mut h);
    assert!(h.timer_armed(TimerTag::VideoAccusation));

    // Skip the video early.
    h.press(KeyInput::Confirm);
    assert_phase(&h, GamePhase::ScienceAccusation);
    assert_line_contains(&h, "SnickleDoodle is weird");
    assert!(!h.timer_armed(TimerTag::VideoAccusation));

    // Long past the original deadline nothing re-fires; the accusation is
    // exactly where the player left it.
    h.step_ms(60_000);
    assert_phase(&h, GamePhase::ScienceAccusation);
    assert_line_contains(&h, "SnickleDoodle is weird");
}

#[test]
fn test_restart_disarms_everything() {
    let mut h = TestHarness::new();
    start(&mut h);
    h.advance_dialogue_times(2);
    assert!(h.timer_armed(TimerTag::AssignmentHandout));

    h.dispatch(GameEvent::Restart);
    assert!(!h.timer_armed(TimerTag::AssignmentHandout));
    h.step_ms(60_000);
    assert_phase(&h, GamePhase::IntroDialogue);
}

#[test]
fn test_blood_chain_fires_in_sequence() {
    let mut h = TestHarness::new();
    start(&mut h);
    day1_complete(&mut h);
    day2_complete(&mut h);
    day3_complete(&mut h);
    day4_complete(&mut h);

    h.advance_dialogue_times(7);
    h.advance_dialogue_times(5);
    assert_phase(&h, GamePhase::LunchDetentionTask);
    assert!(h.timer_armed(TimerTag::BloodReveal));

    // Not yet.
    h.step_ms(5_999);
    assert!(!h.session.state().show_blood);

    // Blood, then three seconds of it, then night 5.
    h.step_ms(1);
    assert!(h.session.state().show_blood);
    assert!(h.timer_armed(TimerTag::NightFiveIntro));

    h.step_ms(3_000);
    assert_phase(&h, GamePhase::Night5Intro);
    assert!(!h.session.state().show_blood);
    assert_line_contains(&h, "I wanna know what's going on");
}

#[test]
fn test_journal_snap_deadline_follows_the_typing() {
    let mut h = TestHarness::new();
    start(&mut h);
    day1_complete(&mut h);
    day2_complete(&mut h);
    day3_complete(&mut h);

    walk_right(&mut h, 26);
    h.press(KeyInput::Interact);
    h.advance_dialogue_times(6);
    h.press(KeyInput::Confirm);
    assert_phase(&h, GamePhase::Night4Journal);

    // Write past the threshold: the snap is armed.
    for _ in 0..13 {
        h.dispatch(GameEvent::JournalInput('x'));
    }
    assert!(h.timer_armed(TimerTag::JournalSnap));

    // Keep typing half a second later; the deadline moves with it.
    h.step_ms(500);
    h.dispatch(GameEvent::JournalInput('x'));
    h.step_ms(700); // past the original deadline, not the new one
    assert_phase(&h, GamePhase::Night4Journal);

    h.step_ms(300);
    assert_phase(&h, GamePhase::MrsGrimNoReaction);
}

#[test]
fn test_ink_run_is_a_noninteractive_cutscene() {
    let mut h = TestHarness::new();
    start(&mut h);
    day1_complete(&mut h);
    day2_complete(&mut h);
    day3_complete(&mut h);
    day4_complete(&mut h);
    day5_complete(&mut h);
    day6_complete(&mut h);
    day7_complete(&mut h);
    day8_complete(&mut h);

    h.advance_dialogue_times(4);
    h.advance_dialogue_times(3);
    assert_phase(&h, GamePhase::Day9InkRun);

    // Input during the cutscene changes nothing.
    h.press(KeyInput::Interact);
    h.press(KeyInput::Confirm);
    h.advance_dialogue();
    assert_phase(&h, GamePhase::Day9InkRun);

    h.step_ms(3_000);
    assert_phase(&h, GamePhase::Day10GymIntro);
}
