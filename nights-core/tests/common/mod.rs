//! Shared playthrough drivers for the QA suites.
//!
//! Each helper pushes the game from one checkpoint to the next through the
//! public session API only: keys, dialogue advances, and the manual clock.

use nights_core::testing::{assert_day, assert_phase, TestHarness};
use nights_core::{GameEvent, GamePhase, GrammarRole, KeyInput};

/// Title screen -> day 1 intro.
pub fn start(h: &mut TestHarness) {
    h.press(KeyInput::Confirm);
    assert_phase(h, GamePhase::IntroDialogue);
}

/// Intro -> the day-1 grammar paper on the desk.
pub fn day1_to_grammar(h: &mut TestHarness) {
    h.advance_dialogue(); // reviewing basic grammar
    h.advance_dialogue(); // here is your assignment (+2s handout)
    h.step_ms(2_000);
    assert_phase(h, GamePhase::GrammarTask);
}

/// Tag the classic paper.
pub fn tag_classic(h: &mut TestHarness, noun: usize, article: usize, preposition: usize) {
    let paper = h.session.grammar_mut().expect("no paper on the desk");
    paper.select_tool(GrammarRole::Noun);
    paper.click_token(noun);
    paper.select_tool(GrammarRole::Article);
    paper.click_token(article);
    paper.select_tool(GrammarRole::Preposition);
    paper.click_token(preposition);
}

/// Grammar paper -> day 2 science intro. Grades locally (the fallback rule).
pub fn day1_complete(h: &mut TestHarness) {
    day1_to_grammar(h);
    tag_classic(h, 1, 0, 2);
    h.submit_paper();
    assert_phase(h, GamePhase::GradingWait);
    h.grade_locally();
    assert_phase(h, GamePhase::GradingResult);

    h.advance_dialogue();
    assert_phase(h, GamePhase::NightNoteRead);
    h.press(KeyInput::Confirm);
    assert_phase(h, GamePhase::NightJournalEntry);
    h.dispatch(GameEvent::JournalInput('i'));
    h.dispatch(GameEvent::JournalFinish);
    assert_day(h, 2);
    assert_phase(h, GamePhase::ScienceIntro);
}

/// Science intro -> the eye video (accusation timer armed).
pub fn day2_to_video(h: &mut TestHarness) {
    h.advance_dialogue(); // good, take your seat
    h.advance_dialogue(); // table exhausted: video starts
    assert_phase(h, GamePhase::ScienceVideo);
}

/// Science intro -> day 3 principal's office. Lets the video run out.
pub fn day2_complete(h: &mut TestHarness) {
    day2_to_video(h);
    h.step_ms(8_000);
    assert_phase(h, GamePhase::ScienceAccusation);

    h.advance_dialogue_times(4);
    assert_phase(h, GamePhase::NightNoteRead);
    h.press(KeyInput::Confirm);
    h.dispatch(GameEvent::JournalFinish);
    assert_phase(h, GamePhase::EmptyClassroomExplore);
    h.step_ms(10_000);
    assert_day(h, 3);
    assert_phase(h, GamePhase::PrincipalOffice);
}

/// Principal's office -> day 4 hallway.
pub fn day3_complete(h: &mut TestHarness) {
    h.advance_dialogue_times(5);
    assert_phase(h, GamePhase::AfternoonSpeech);
    h.advance_dialogue();
    assert_phase(h, GamePhase::JumpscareSnickerdoodle);
    h.step_ms(3_000);
    assert_day(h, 4);
    assert_phase(h, GamePhase::HallwayWalk);
}

/// Walk right `presses` times.
pub fn walk_right(h: &mut TestHarness, presses: usize) {
    for _ in 0..presses {
        h.press(KeyInput::Right);
    }
}

/// Hallway -> day 5 Mrs. Grim.
pub fn day4_complete(h: &mut TestHarness) {
    walk_right(h, 26); // x = 62, within 10 of the locker at 70
    h.press(KeyInput::Interact);
    assert_phase(h, GamePhase::BullyEncounter);

    h.advance_dialogue_times(6);
    assert_phase(h, GamePhase::Night4Note);
    h.press(KeyInput::Confirm);
    assert_phase(h, GamePhase::Night4Journal);
    for _ in 0..14 {
        h.dispatch(GameEvent::JournalInput('a'));
    }
    h.step_ms(1_000);
    assert_day(h, 5);
    assert_phase(h, GamePhase::MrsGrimNoReaction);
}

/// Mrs. Grim -> day 6 via detention, blood, and the night library.
pub fn day5_complete(h: &mut TestHarness) {
    h.advance_dialogue_times(7);
    assert_phase(h, GamePhase::LunchConversation);
    h.advance_dialogue_times(5);
    assert_phase(h, GamePhase::LunchDetentionTask);

    h.step_ms(6_000); // blood
    assert!(h.session.state().show_blood);
    h.step_ms(3_000); // night 5
    assert_day(h, 5);
    assert_phase(h, GamePhase::Night5Intro);
    assert!(!h.session.state().show_blood);

    h.advance_dialogue();
    assert_phase(h, GamePhase::LibraryWalk);
    walk_right(h, 25); // x = 72.5, within 15 of the door at 85
    h.press(KeyInput::Interact);
    assert_phase(h, GamePhase::LibraryReveal);
    h.step_ms(5_000);
    assert_day(h, 6);
    assert_phase(h, GamePhase::Day6SnickerdoodleIntro);
}

/// Day 6 -> day 7 math class.
pub fn day6_complete(h: &mut TestHarness) {
    h.advance_dialogue_times(3);
    assert_phase(h, GamePhase::Day6PrincipalOffice);
    h.advance_dialogue_times(3);
    assert_phase(h, GamePhase::Day6WalkToLibrary);

    walk_right(h, 25);
    h.press(KeyInput::Interact);
    assert_phase(h, GamePhase::Day6LibraryEmpty);
    h.advance_dialogue_times(6);
    assert_phase(h, GamePhase::Night6Intro);
    h.advance_dialogue_times(2);
    assert_phase(h, GamePhase::Night6MusicWalk);

    walk_right(h, 25);
    h.press(KeyInput::Interact);
    assert_phase(h, GamePhase::Night6MusicReveal);
    h.step_ms(5_000);
    assert_day(h, 7);
    assert_phase(h, GamePhase::Day7TharnettIntro);
}

/// Math class -> the suffix test.
pub fn day7_to_suffix_task(h: &mut TestHarness) {
    h.advance_dialogue_times(5);
    assert_phase(h, GamePhase::Day7PinkyMovie);
    h.advance_dialogue_times(3);
    assert_phase(h, GamePhase::Day7HallwayEscape);
    h.advance_dialogue();
    assert_phase(h, GamePhase::Day7GrimSuffixIntro);
    h.advance_dialogue();
    assert_phase(h, GamePhase::Day7GrimSuffixTask);
}

/// Suffix test -> day 8 art class, via the lobby tape and the theater.
pub fn day7_complete(h: &mut TestHarness) {
    day7_to_suffix_task(h);
    let paper = h.session.grammar_mut().expect("no suffix paper");
    paper.click_token(11); // "speak"
    h.submit_paper();
    assert_phase(h, GamePhase::NightNoteRead);

    h.press(KeyInput::Confirm);
    assert_phase(h, GamePhase::Night7LobbySearch);
    // The harness pins the tape at x=50, right where the player spawns.
    h.press(KeyInput::Interact);
    walk_right(h, 11); // x = 83, within 10 of the theater door at 90
    h.press(KeyInput::Interact);
    assert_phase(h, GamePhase::Night7TheaterEnd);
    h.step_ms(10_000);
    assert_day(h, 8);
    assert_phase(h, GamePhase::Day8ArtIntro);
}

/// Art class -> day 9 hallway.
pub fn day8_complete(h: &mut TestHarness) {
    h.advance_dialogue();
    assert_phase(h, GamePhase::Day8Painting);
    h.dispatch(GameEvent::PaintMix);
    h.step_ms(2_000);
    assert_phase(h, GamePhase::Day8HorrorReveal);
    h.step_ms(3_000);
    assert_phase(h, GamePhase::NightNoteRead);
    h.press(KeyInput::Confirm);
    assert_phase(h, GamePhase::Night8LunchWalk);
    h.step_ms(5_000);
    assert_day(h, 9);
    assert_phase(h, GamePhase::Day9HallwayBully);
}

/// Day 9 -> day 10 gym.
pub fn day9_complete(h: &mut TestHarness) {
    h.advance_dialogue_times(4);
    assert_phase(h, GamePhase::Day9GrimClassWait);
    h.advance_dialogue_times(3);
    assert_phase(h, GamePhase::Day9InkRun);
    h.step_ms(3_000);
    assert_day(h, 10);
    assert_phase(h, GamePhase::Day10GymIntro);
}
