//! Kinds of structured elements found in scenario prose

use serde::{Deserialize, Serialize};

/// A kind of scenario element
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Npc,
    Location,
    Item,
    Encounter,
    Puzzle,
    Trap,
    Treasure,
    Clue,
    Event,
    Dialogue,
}

impl ElementType {
    pub const ALL: [ElementType; 10] = [
        Self::Npc,
        Self::Location,
        Self::Item,
        Self::Encounter,
        Self::Puzzle,
        Self::Trap,
        Self::Treasure,
        Self::Clue,
        Self::Event,
        Self::Dialogue,
    ];

    /// Tag used in bracketed markup, e.g. `[NPC: ...]`
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Npc => "NPC",
            Self::Location => "LOC",
            Self::Item => "ITEM",
            Self::Encounter => "ENCOUNTER",
            Self::Puzzle => "PUZZLE",
            Self::Trap => "TRAP",
            Self::Treasure => "TREASURE",
            Self::Clue => "CLUE",
            Self::Event => "EVENT",
            Self::Dialogue => "DIALOGUE",
        }
    }

    /// Human-readable plural label
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Npc => "Неигровые персонажи",
            Self::Location => "Локации",
            Self::Item => "Предметы",
            Self::Encounter => "Боевые встречи",
            Self::Puzzle => "Загадки",
            Self::Trap => "Ловушки",
            Self::Treasure => "Сокровища",
            Self::Clue => "Улики",
            Self::Event => "События",
            Self::Dialogue => "Диалоги",
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Npc => "npc",
            Self::Location => "location",
            Self::Item => "item",
            Self::Encounter => "encounter",
            Self::Puzzle => "puzzle",
            Self::Trap => "trap",
            Self::Treasure => "treasure",
            Self::Clue => "clue",
            Self::Event => "event",
            Self::Dialogue => "dialogue",
        };
        write!(f, "{}", name)
    }
}
