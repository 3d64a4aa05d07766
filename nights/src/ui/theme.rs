//! Scene palettes.
//!
//! Each room gets a backdrop color and an accent, loosely tracking the
//! original CSS schemes: Grim's gray classroom, the blue science room, the
//! pink art room, and black for anything that happens at night.

use nights_core::GamePhase;
use ratatui::style::Color;

pub struct SceneTheme {
    pub backdrop: Color,
    pub accent: Color,
    pub title: &'static str,
}

pub fn scene_theme(phase: GamePhase) -> SceneTheme {
    use GamePhase::*;
    match phase {
        IntroDialogue | ClassroomLesson | GrammarTask | GradingWait | GradingResult
        | MrsGrimNoReaction | Night5Intro | Day7GrimSuffixIntro | Day7GrimSuffixTask
        | Day9GrimClassWait => SceneTheme {
            backdrop: Color::DarkGray,
            accent: Color::White,
            title: "MRS. GRIM'S CLASSROOM",
        },
        ScienceIntro | ScienceAccusation | Day6SnickerdoodleIntro => SceneTheme {
            backdrop: Color::Blue,
            accent: Color::LightCyan,
            title: "SCIENCE ROOM",
        },
        ScienceVideo => SceneTheme {
            backdrop: Color::Black,
            accent: Color::Green,
            title: "HUMAN_ANATOMY_V1.mp4",
        },
        PrincipalOffice | Day6PrincipalOffice => SceneTheme {
            backdrop: Color::Gray,
            accent: Color::Red,
            title: "PRINCIPAL'S OFFICE",
        },
        AfternoonSpeech => SceneTheme {
            backdrop: Color::Magenta,
            accent: Color::White,
            title: "SPEECH ROOM",
        },
        BullyEncounter | Day9HallwayBully => SceneTheme {
            backdrop: Color::DarkGray,
            accent: Color::LightBlue,
            title: "HALLWAY",
        },
        LunchConversation => SceneTheme {
            backdrop: Color::Yellow,
            accent: Color::Black,
            title: "LUNCHROOM",
        },
        Day6LibraryEmpty | Night6Intro => SceneTheme {
            backdrop: Color::Gray,
            accent: Color::White,
            title: "LIBRARY",
        },
        Day7TharnettIntro | Day7PinkyMovie => SceneTheme {
            backdrop: Color::Yellow,
            accent: Color::LightYellow,
            title: "MATH ROOM",
        },
        Day8ArtIntro | Day8Painting => SceneTheme {
            backdrop: Color::LightMagenta,
            accent: Color::White,
            title: "ART ROOM",
        },
        Day10GymIntro | Day10DunkTask | Day10Injury => SceneTheme {
            backdrop: Color::LightRed,
            accent: Color::White,
            title: "GYM",
        },
        Night10NurseIntro | Night10SurvivalQte | Night10InkChoice => SceneTheme {
            backdrop: Color::White,
            accent: Color::Red,
            title: "NURSE'S OFFICE",
        },
        _ => SceneTheme {
            backdrop: Color::Black,
            accent: Color::Red,
            title: "",
        },
    }
}
