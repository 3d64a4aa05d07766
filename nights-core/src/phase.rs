//! The narrative phase enumeration.
//!
//! A phase is one node of the story's state machine. Exactly one phase is
//! active at a time and it determines which scene is drawn, which dialogue
//! table is consulted, and which inputs do anything at all. Transitions are
//! performed only by the engine; the day counter is carried separately on
//! [`crate::state::GameState`] and is never derived from the phase name.

/// One beat of the narrative, from the title screen to the final corruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    StartScreen,

    // Day 1
    IntroDialogue,
    ClassroomLesson,
    GrammarTask,
    GradingWait,
    GradingResult,
    NightTransition,
    NightSurvival,
    NightNoteRead,
    NightJournalEntry,

    // Day 2
    ScienceIntro,
    ScienceVideo,
    ScienceAccusation,
    EmptyClassroomExplore,

    // Day 3
    PrincipalOffice,
    AfternoonSpeech,
    JumpscareSnickerdoodle,

    // Day 4
    HallwayWalk,
    BullyEncounter,
    Night4Note,
    Night4Journal,

    // Day 5
    MrsGrimNoReaction,
    LunchConversation,
    LunchDetentionTask,
    Night5Intro,
    LibraryWalk,
    LibraryReveal,

    // Day 6
    Day6SnickerdoodleIntro,
    Day6PrincipalOffice,
    Day6WalkToLibrary,
    Day6LibraryEmpty,
    Night6Intro,
    Night6MusicWalk,
    Night6MusicReveal,

    // Day 7
    Day7TharnettIntro,
    Day7PinkyMovie,
    Day7HallwayEscape,
    Day7GrimSuffixIntro,
    Day7GrimSuffixTask,
    Day7GrimFailure,
    Night7LobbySearch,
    Night7TheaterEnd,

    // Day 8
    Day8ArtIntro,
    Day8Painting,
    Day8HorrorReveal,
    Night8LunchWalk,

    // Day 9
    Day9HallwayBully,
    Day9GrimClassWait,
    Day9InkRun,

    // Day 10
    Day10GymIntro,
    Day10DunkTask,
    Day10Injury,
    Night10NurseIntro,
    Night10SurvivalQte,
    Night10InkChoice,
    Night10Transformation,

    GameOver,
}

impl GamePhase {
    /// Whether the standard play surface (day counter, dialogue box,
    /// inventory strip) is drawn in this phase. Full-screen takeovers such as
    /// notes, jumpscares, and walking segments suppress it.
    pub fn shows_hud(self) -> bool {
        use GamePhase::*;
        !matches!(
            self,
            StartScreen
                | NightNoteRead
                | NightJournalEntry
                | ScienceVideo
                | EmptyClassroomExplore
                | GameOver
                | JumpscareSnickerdoodle
                | HallwayWalk
                | Night4Note
                | Night4Journal
                | LunchDetentionTask
                | LibraryWalk
                | LibraryReveal
                | Day6WalkToLibrary
                | Night6MusicWalk
                | Night6MusicReveal
                | Night7LobbySearch
                | Night7TheaterEnd
                | Day7GrimFailure
                | Night8LunchWalk
                | Day9InkRun
                | Night10InkChoice
                | Night10Transformation
                | Day8HorrorReveal
        )
    }

    /// Phases that host a proximity-walk segment.
    pub fn is_walk(self) -> bool {
        use GamePhase::*;
        matches!(
            self,
            HallwayWalk
                | Day7HallwayEscape
                | EmptyClassroomExplore
                | Night8LunchWalk
                | LibraryWalk
                | Day6WalkToLibrary
                | Night6MusicWalk
                | Night7LobbySearch
        )
    }

    /// Phases that host the journal writing surface.
    pub fn is_journal(self) -> bool {
        use GamePhase::*;
        matches!(
            self,
            NightJournalEntry | Night4Journal | LunchDetentionTask
        )
    }

    /// Phases that present a note to read.
    pub fn is_note(self) -> bool {
        matches!(self, GamePhase::NightNoteRead | GamePhase::Night4Note)
    }
}
