//! The single mutable game state record.
//!
//! All of it is owned by the engine; nothing outside the engine writes to it.
//! Reads are fair game for any renderer.

use crate::grading::GradeReport;
use crate::phase::GamePhase;

/// Kinds of items that can end up in the backpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Pencil,
    Backpack,
    GradedPaperA,
    GradedPaperF,
    StrangeNote,
    VhsTape,
}

impl ItemKind {
    /// Display label for the inventory strip.
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Pencil => "Old Pencil",
            ItemKind::Backpack => "Old Backpack",
            ItemKind::GradedPaperA => "Graded Paper (A+)",
            ItemKind::GradedPaperF => "Graded Paper (F-)",
            ItemKind::StrangeNote => "Strange Note",
            ItemKind::VhsTape => "VHS Tape",
        }
    }
}

/// A collected item. Immutable once added.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: &'static str,
    pub kind: ItemKind,
    pub description: &'static str,
    pub icon: &'static str,
}

/// What the player starts every playthrough holding.
pub fn initial_inventory() -> Vec<Item> {
    vec![
        Item {
            id: "pencil-1",
            kind: ItemKind::Pencil,
            description: "A chewed up yellow pencil. The lead is dull.",
            icon: "\u{270f}",
        },
        Item {
            id: "backpack-1",
            kind: ItemKind::Backpack,
            description: "Faded canvas backpack. smells like old gym socks.",
            icon: "\u{1f392}",
        },
    ]
}

/// The VHS tape found in the night-7 lobby.
pub fn vhs_tape() -> Item {
    Item {
        id: "vhs-1",
        kind: ItemKind::VhsTape,
        description: "A dark, unmarked VHS tape.",
        icon: "\u{1f4fc}",
    }
}

/// Paint-mix state for the day-8 art room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtColor {
    White,
    Red,
    Blue,
    Purple,
}

/// Everything mutable about a playthrough.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Current state machine node.
    pub phase: GamePhase,

    /// Narrative day, 1..=10. Advances only on explicit transitions.
    pub day: u32,

    /// Speaker of the displayed line.
    pub speaker: String,

    /// The displayed line. Also the key the dialogue tables match against.
    pub line: String,

    /// Whether the dialogue surface is rendered.
    pub dialogue_visible: bool,

    /// Collected items. Grows during a playthrough, resets on restart.
    pub inventory: Vec<Item>,

    /// Scratch buffer for journal phases.
    pub journal_text: String,

    /// The most recent grade, if one has arrived.
    pub grading: Option<GradeReport>,

    /// Generated flavor text for the night transition.
    pub night_text: String,

    /// Trampoline dunk counter for day 10.
    pub dunk_count: u32,

    /// Paint-mix state for day 8.
    pub art_color: ArtColor,

    /// Blood overlay during lunch detention.
    pub show_blood: bool,

    /// THE END reveal on the game-over screen.
    pub show_ending: bool,
}

impl GameState {
    /// Fresh state at the title screen.
    pub fn new() -> Self {
        Self {
            phase: GamePhase::StartScreen,
            day: 1,
            speaker: String::new(),
            line: String::new(),
            dialogue_visible: false,
            inventory: initial_inventory(),
            journal_text: String::new(),
            grading: None,
            night_text: String::new(),
            dunk_count: 0,
            art_color: ArtColor::White,
            show_blood: false,
            show_ending: false,
        }
    }

    /// Add an item. Item ids are unique; adding an id already in the
    /// backpack is a no-op and returns false.
    pub fn add_item(&mut self, item: Item) -> bool {
        if self.inventory.iter().any(|i| i.id == item.id) {
            return false;
        }
        self.inventory.push(item);
        true
    }

    /// Whether any held item has the given kind.
    pub fn has_item(&self, kind: ItemKind) -> bool {
        self.inventory.iter().any(|i| i.kind == kind)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_inventory() {
        let state = GameState::new();
        assert_eq!(state.inventory.len(), 2);
        assert!(state.has_item(ItemKind::Pencil));
        assert!(state.has_item(ItemKind::Backpack));
        assert!(!state.has_item(ItemKind::VhsTape));
    }

    #[test]
    fn test_add_item_enforces_id_uniqueness() {
        let mut state = GameState::new();
        assert!(state.add_item(vhs_tape()));
        assert!(!state.add_item(vhs_tape()));
        assert_eq!(
            state
                .inventory
                .iter()
                .filter(|i| i.kind == ItemKind::VhsTape)
                .count(),
            1
        );
    }
}
