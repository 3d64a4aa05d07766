//! The story script: dialogue tables, note texts, and voice profiles.
//!
//! Dialogue is content-matched, not indexed. Each phase owns an ordered rule
//! list; on every advance the first rule whose matcher accepts the *currently
//! displayed line* decides the next beat. That lets a phase genuinely branch
//! on what was just said (the science intro does) instead of walking a fixed
//! sequence. When no rule matches, the phase's dialogue is exhausted and the
//! engine performs the phase-exit transition.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::event::{SoundCue, TimerTag};
use crate::phase::GamePhase;

// Speaker names, exactly as displayed and as keyed in the voice table.
pub const GRIM: &str = "Mrs. Grim";
pub const SNICKERDOODLE: &str = "Mr. Snickerdoodle";
pub const PRINCIPAL: &str = "Principal";
pub const TURPANCKI: &str = "Mrs. Turpancki";
pub const ISAIAH: &str = "Mrs. Isaiah";
pub const CLASSMATE: &str = "Classmate";
pub const KID: &str = "Kid";
pub const FRIEND: &str = "Friend 1";
pub const BULLY: &str = "Bully";
pub const THARNETT: &str = "Mr. Tharnett";
pub const PINKY: &str = "Pinky";
pub const PALETTE: &str = "Ms. Palette";
pub const MITCH: &str = "Mr. Mitch";
pub const NURSE: &str = "Nurse";
pub const CORRUPTED: &str = "Corrupted Student 99";
pub const STUDENT: &str = "Student 99";
pub const STUDENT_THOUGHT: &str = "Student 99 (Thought)";

/// How a rule matches the displayed line.
#[derive(Debug, Clone, Copy)]
pub enum LineMatcher {
    /// Matches any line. Used by phases whose next beat is unconditional.
    Any,
    Exact(&'static str),
    Contains(&'static str),
}

impl LineMatcher {
    pub fn matches(&self, line: &str) -> bool {
        match self {
            LineMatcher::Any => true,
            LineMatcher::Exact(s) => line == *s,
            LineMatcher::Contains(s) => line.contains(s),
        }
    }
}

/// What a matched rule does.
#[derive(Debug, Clone, Copy)]
pub struct DialogueStep {
    /// Next (speaker, line), shown and spoken.
    pub say: Option<(&'static str, &'static str)>,
    /// Phase transition applied after the line.
    pub goto: Option<GamePhase>,
    /// Hide the dialogue surface.
    pub hide_dialogue: bool,
    /// Cue played alongside the beat.
    pub sound: Option<SoundCue>,
    /// Timer armed by the beat, in milliseconds.
    pub arm: Option<(TimerTag, u64)>,
}

/// One row of a phase's dialogue table.
#[derive(Debug, Clone, Copy)]
pub struct DialogueRule {
    pub when: LineMatcher,
    pub step: DialogueStep,
}

const fn beat(
    when: LineMatcher,
    speaker: &'static str,
    line: &'static str,
) -> DialogueRule {
    DialogueRule {
        when,
        step: DialogueStep {
            say: Some((speaker, line)),
            goto: None,
            hide_dialogue: false,
            sound: None,
            arm: None,
        },
    }
}

const fn beat_goto(
    when: LineMatcher,
    speaker: &'static str,
    line: &'static str,
    goto: GamePhase,
) -> DialogueRule {
    DialogueRule {
        when,
        step: DialogueStep {
            say: Some((speaker, line)),
            goto: Some(goto),
            hide_dialogue: false,
            sound: None,
            arm: None,
        },
    }
}

const fn beat_sound(
    when: LineMatcher,
    speaker: &'static str,
    line: &'static str,
    sound: SoundCue,
) -> DialogueRule {
    DialogueRule {
        when,
        step: DialogueStep {
            say: Some((speaker, line)),
            goto: None,
            hide_dialogue: false,
            sound: Some(sound),
            arm: None,
        },
    }
}

const fn beat_arm(
    when: LineMatcher,
    speaker: &'static str,
    line: &'static str,
    tag: TimerTag,
    millis: u64,
) -> DialogueRule {
    DialogueRule {
        when,
        step: DialogueStep {
            say: Some((speaker, line)),
            goto: None,
            hide_dialogue: false,
            sound: None,
            arm: Some((tag, millis)),
        },
    }
}

/// A silent transition: hide the dialogue and move on.
const fn jump(when: LineMatcher, goto: GamePhase) -> DialogueRule {
    DialogueRule {
        when,
        step: DialogueStep {
            say: None,
            goto: Some(goto),
            hide_dialogue: true,
            sound: None,
            arm: None,
        },
    }
}

use LineMatcher::{Any, Contains, Exact};

static INTRO_DIALOGUE: &[DialogueRule] = &[beat_goto(
    Any,
    GRIM,
    "Today we are reviewing basic grammar. I expect perfection. Nothing less will be tolerated in my classroom.",
    GamePhase::ClassroomLesson,
)];

static CLASSROOM_LESSON: &[DialogueRule] = &[beat_arm(
    Any,
    GRIM,
    "Here is your assignment. Complete it immediately. Do not make mistakes.",
    TimerTag::AssignmentHandout,
    2000,
)];

static SCIENCE_INTRO: &[DialogueRule] = &[beat(
    Contains("Hand in"),
    SNICKERDOODLE,
    "Good. Now take your seat. We are watching a video about the human eye.",
)];

static SCIENCE_ACCUSATION: &[DialogueRule] = &[
    beat(
        Exact("Mr. SnickleDoodle is weird..."),
        SNICKERDOODLE,
        "WHO SAID THAT!?",
    ),
    beat(Exact("WHO SAID THAT!?"), CLASSMATE, "It was YOU! Student 99!"),
    beat(
        Contains("Student 99"),
        SNICKERDOODLE,
        "Detention. Tonight. Don't be late.",
    ),
];

static PRINCIPAL_OFFICE: &[DialogueRule] = &[
    beat(Contains("What the Heck?"), PRINCIPAL, "Language buddy boy."),
    beat(
        Exact("Language buddy boy."),
        PRINCIPAL,
        "Why were you there last night?",
    ),
    beat(
        Exact("Why were you there last night?"),
        STUDENT,
        "Because Mrs. Turpancki uses her room for speech lessons All day.",
    ),
    beat(
        Contains("Mrs. Turpancki"),
        PRINCIPAL,
        "From now on I want you in the afternoon.",
    ),
    beat_goto(
        Contains("afternoon"),
        TURPANCKI,
        "Let me fix you up.",
        GamePhase::AfternoonSpeech,
    ),
];

static BULLY_ENCOUNTER: &[DialogueRule] = &[
    beat(Contains("Hey nerd"), STUDENT, "You shut up!"),
    beat(
        Exact("You shut up!"),
        STUDENT,
        "Not like your the one who's sandwhiches is his dention.",
    ),
    beat(Contains("sandwhiches"), BULLY, "*Picks you up*"),
    beat(Exact("*Picks you up*"), STUDENT, "I'm not so sorry?"),
    beat(
        Exact("I'm not so sorry?"),
        SNICKERDOODLE,
        "Bully in my classroom now!",
    ),
];

static MRS_GRIM_NO_REACTION: &[DialogueRule] = &[
    beat(
        Exact("Give me your paper."),
        GRIM,
        "You're such a bad student.",
    ),
    beat(Exact("You're such a bad student."), STUDENT, "What did I do?"),
    beat(
        Exact("What did I do?"),
        GRIM,
        "*Shows the paper to the whole class: NO. NO. NO.*",
    ),
    beat(Contains("whole class"), GRIM, "You just wrote no!"),
    beat(Exact("You just wrote no!"), STUDENT, "What the?"),
    beat(Exact("What the?"), GRIM, "You're in for lunch detention."),
];

static LUNCH_CONVERSATION: &[DialogueRule] = &[
    beat(
        Exact("Yo, What if 98xx 2 came out."),
        FRIEND,
        "That would be sick!",
    ),
    beat(
        Exact("That would be sick!"),
        ISAIAH,
        "Hmmm, Aren't you supposed to be at Table 10.",
    ),
    beat(
        Exact("Hmmm, Aren't you supposed to be at Table 10."),
        STUDENT,
        "Mrs. Isaiah please.",
    ),
    beat(Exact("Mrs. Isaiah please."), ISAIAH, "Table 10 now!"),
];

static NIGHT_5_INTRO: &[DialogueRule] =
    &[jump(Contains("I wanna know"), GamePhase::LibraryWalk)];

static DAY_6_SNICKERDOODLE_INTRO: &[DialogueRule] = &[
    beat(Exact("You're evil!"), SNICKERDOODLE, "What do you mean?"),
    beat(
        Exact("What do you mean?"),
        STUDENT,
        "Get the principal I'll show you 2 it's too disturbing to talk about.",
    ),
    beat_goto(
        Contains("disturbing"),
        SNICKERDOODLE,
        "This trouble maker wanted to show us something.",
        GamePhase::Day6PrincipalOffice,
    ),
];

static DAY_6_PRINCIPAL_OFFICE: &[DialogueRule] = &[
    beat(Contains("trouble maker"), PRINCIPAL, "Oh, Ok."),
    beat(Exact("Oh, Ok."), STUDENT, "Follow me!"),
    jump(Exact("Follow me!"), GamePhase::Day6WalkToLibrary),
];

static DAY_6_LIBRARY_EMPTY: &[DialogueRule] = &[
    beat(
        Contains("nothing on the smartboard"),
        SNICKERDOODLE,
        "You were saying.",
    ),
    beat(
        Exact("You were saying."),
        STUDENT,
        "I saw Bully face with no eyes on the smartboard.",
    ),
    beat(
        Contains("Bully face"),
        PRINCIPAL,
        "How would you see the library if all classrooms only go once every 7 days.",
    ),
    beat(
        Contains("every 7 days"),
        STUDENT,
        "Fine I came here last night.",
    ),
    beat(
        Contains("last night"),
        SNICKERDOODLE,
        "This kid, Meet us here at night.",
    ),
];

static NIGHT_6_INTRO: &[DialogueRule] = &[beat(
    Exact("Why is no body here yet."),
    STUDENT_THOUGHT,
    "Maybe its them.",
)];

static DAY_7_THARNETT_INTRO: &[DialogueRule] = &[
    beat(
        Contains("Welcome class"),
        KID,
        "Mrs. Steen was the nicest teacher ever.",
    ),
    beat(
        Contains("nicest teacher"),
        THARNETT,
        "Seems like we got a new face in here.",
    ),
    beat(
        Contains("new face"),
        STUDENT,
        "I'm not new I'm just not trying to be a math teacher. More like a NBA player but you know were in our senior year.",
    ),
    beat(
        Contains("NBA player"),
        THARNETT,
        "Well, class today we have a movie I want to show you. Its called pinky.",
    ),
];

static DAY_7_PINKY_MOVIE: &[DialogueRule] = &[
    beat(Exact("I am going to warn you."), THARNETT, "What the."),
    beat(Exact("What the."), STUDENT, "I'm out."),
];

static DAY_9_HALLWAY_BULLY: &[DialogueRule] = &[
    beat(
        Contains("Sorry"),
        STUDENT,
        "Why now when threr is 1 day left of school.",
    ),
    beat(
        Contains("Why now"),
        BULLY,
        "I have been bleeding bad in the hostpital so I realized that I can do that to other people.",
    ),
    beat(Contains("bleeding bad"), STUDENT, "Ok."),
];

static DAY_9_GRIM_CLASS_WAIT: &[DialogueRule] = &[
    beat(Exact("She is 10 minutes late."), STUDENT, "Wait for her."),
    beat(Exact("Wait for her."), CLASSMATE, "I'm out."),
    beat_goto(Exact("I'm out."), STUDENT, "Run!!!!!!", GamePhase::Day9InkRun),
];

static DAY_10_GYM_INTRO: &[DialogueRule] = &[
    beat(Contains("set up a trampoline"), STUDENT, "I can not dunk."),
    beat(
        Exact("I can not dunk."),
        MITCH,
        "Looks like we have student 99 going up first.",
    ),
];

static DAY_10_INJURY: &[DialogueRule] = &[
    beat(Exact("Your hands."), STUDENT, "There bleeding."),
    beat(
        Exact("There bleeding."),
        MITCH,
        "Lets go get you a paper towel.",
    ),
];

static NIGHT_10_NURSE_INTRO: &[DialogueRule] = &[
    beat(Exact("Yo, Nurse."), NURSE, "Yes darling."),
    beat(Exact("Yes darling."), STUDENT, "My hand is bleeding."),
    beat(Exact("My hand is bleeding."), NURSE, "A knife would help."),
    beat_sound(
        Exact("A knife would help."),
        STUDENT,
        "My hand!",
        SoundCue::Jumpscare,
    ),
    beat(Exact("My hand!"), NURSE, "Theres more were that came from."),
];

static NIGHT_10_TRANSFORMATION: &[DialogueRule] = &[beat(
    Exact("Nurse your stronger than me."),
    CORRUPTED,
    "But Corrupted is better.",
)];

/// The dialogue table for a phase. Phases without dialogue (or whose only
/// advance behavior is the exhaustion transition) have an empty table.
pub fn dialogue_rules(phase: GamePhase) -> &'static [DialogueRule] {
    match phase {
        GamePhase::IntroDialogue => INTRO_DIALOGUE,
        GamePhase::ClassroomLesson => CLASSROOM_LESSON,
        GamePhase::ScienceIntro => SCIENCE_INTRO,
        GamePhase::ScienceAccusation => SCIENCE_ACCUSATION,
        GamePhase::PrincipalOffice => PRINCIPAL_OFFICE,
        GamePhase::BullyEncounter => BULLY_ENCOUNTER,
        GamePhase::MrsGrimNoReaction => MRS_GRIM_NO_REACTION,
        GamePhase::LunchConversation => LUNCH_CONVERSATION,
        GamePhase::Night5Intro => NIGHT_5_INTRO,
        GamePhase::Day6SnickerdoodleIntro => DAY_6_SNICKERDOODLE_INTRO,
        GamePhase::Day6PrincipalOffice => DAY_6_PRINCIPAL_OFFICE,
        GamePhase::Day6LibraryEmpty => DAY_6_LIBRARY_EMPTY,
        GamePhase::Night6Intro => NIGHT_6_INTRO,
        GamePhase::Day7TharnettIntro => DAY_7_THARNETT_INTRO,
        GamePhase::Day7PinkyMovie => DAY_7_PINKY_MOVIE,
        GamePhase::Day9HallwayBully => DAY_9_HALLWAY_BULLY,
        GamePhase::Day9GrimClassWait => DAY_9_GRIM_CLASS_WAIT,
        GamePhase::Day10GymIntro => DAY_10_GYM_INTRO,
        GamePhase::Day10Injury => DAY_10_INJURY,
        GamePhase::Night10NurseIntro => NIGHT_10_NURSE_INTRO,
        GamePhase::Night10Transformation => NIGHT_10_TRANSFORMATION,
        _ => &[],
    }
}

/// Find the step for the current line, top to bottom.
pub fn match_rule(phase: GamePhase, line: &str) -> Option<&'static DialogueStep> {
    dialogue_rules(phase)
        .iter()
        .find(|rule| rule.when.matches(line))
        .map(|rule| &rule.step)
}

// ============================================================================
// Notes
// ============================================================================

/// The handwriting on the night note for a given day.
pub fn note_text(day: u32) -> &'static str {
    match day {
        1 => "\"Think about what you've done.\"",
        2 => "\"Why did you disrespect the person that helps you?\"",
        4 => "\"Have you've felt alone in detantion?\"",
        7 => "\"Find my tape.\"",
        8 => "\"Paint is red...\"",
        _ => "",
    }
}

/// The heading above the note.
pub fn note_heading(day: u32) -> String {
    match day {
        2 | 4 | 8 => "DETENTION".to_string(),
        d => format!("NIGHT {d}"),
    }
}

// ============================================================================
// Voices
// ============================================================================

/// Speech parameters for one speaker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceProfile {
    pub pitch: f32,
    pub rate: f32,
}

pub const DEFAULT_VOICE: VoiceProfile = VoiceProfile {
    pitch: 1.0,
    rate: 1.0,
};

lazy_static! {
    /// Voice tunings per speaker.
    static ref VOICE_PROFILES: HashMap<&'static str, VoiceProfile> = {
        let mut m = HashMap::new();
        m.insert(GRIM, VoiceProfile { pitch: 0.6, rate: 0.8 });
        m.insert(SNICKERDOODLE, VoiceProfile { pitch: 1.6, rate: 1.3 });
        m.insert(PRINCIPAL, VoiceProfile { pitch: 0.5, rate: 0.9 });
        m.insert(TURPANCKI, VoiceProfile { pitch: 1.2, rate: 1.1 });
        m.insert(ISAIAH, VoiceProfile { pitch: 1.3, rate: 0.8 });
        m.insert(CLASSMATE, VoiceProfile { pitch: 1.1, rate: 1.1 });
        m.insert(KID, VoiceProfile { pitch: 1.1, rate: 1.1 });
        m.insert(FRIEND, VoiceProfile { pitch: 1.1, rate: 1.2 });
        m.insert(BULLY, VoiceProfile { pitch: 0.4, rate: 0.9 });
        m.insert(THARNETT, VoiceProfile { pitch: 0.8, rate: 0.95 });
        m.insert(PINKY, VoiceProfile { pitch: 1.8, rate: 0.8 });
        m.insert(PALETTE, VoiceProfile { pitch: 1.4, rate: 1.1 });
        m.insert(MITCH, VoiceProfile { pitch: 0.7, rate: 1.2 });
        m.insert(NURSE, VoiceProfile { pitch: 1.5, rate: 0.7 });
        m.insert(CORRUPTED, VoiceProfile { pitch: 0.2, rate: 0.8 });
        m.insert(STUDENT, VoiceProfile { pitch: 1.0, rate: 1.0 });
        m.insert(STUDENT_THOUGHT, VoiceProfile { pitch: 1.0, rate: 1.0 });
        m
    };
}

/// Look up a speaker's voice. Unknown speakers get the default.
pub fn voice_profile(speaker: &str) -> VoiceProfile {
    VOICE_PROFILES
        .get(speaker)
        .copied()
        .unwrap_or(DEFAULT_VOICE)
}
