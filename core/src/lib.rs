#![no_std]

extern crate alloc;

use core::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use state::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod state;
mod types;

/// Cells around the first click that are kept free of mines.
pub const SAFE_ZONE_CELLS: CellCount = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mine_count: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mine_count: CellCount) -> Self {
        Self {
            width,
            height,
            mine_count,
        }
    }

    /// Rejects empty boards and densities that could not keep the first click safe.
    ///
    /// The bound is inclusive: `mine_count <= width * height - 9` is accepted, since
    /// even a click in the middle of the board leaves exactly that many candidates.
    pub fn new(width: Coord, height: Coord, mine_count: CellCount) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidSize);
        }

        let config = Self::new_unchecked(width, height, mine_count);
        if mine_count > config.total_cells().saturating_sub(SAFE_ZONE_CELLS) {
            log::warn!(
                "Rejected {}x{} with {} mines, too dense for a safe first click",
                width,
                height,
                mine_count
            );
            return Err(GameError::TooManyMines);
        }

        Ok(config)
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Easy => GameConfig::new_unchecked(9, 9, 10),
            Medium => GameConfig::new_unchecked(16, 16, 40),
            Hard => GameConfig::new_unchecked(30, 16, 99),
        }
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownDifficulty)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn name(self) -> &'static str {
        use GameStatus::*;
        match self {
            Playing => "playing",
            Won => "won",
            Lost => "lost",
        }
    }
}

/// Counters shown next to the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub revealed_count: CellCount,
    pub flagged_count: CellCount,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn difficulty_configs_match_classic_tiers() {
        assert_eq!(Difficulty::Easy.config(), GameConfig::new_unchecked(9, 9, 10));
        assert_eq!(Difficulty::Medium.config(), GameConfig::new_unchecked(16, 16, 40));
        assert_eq!(Difficulty::Hard.config(), GameConfig::new_unchecked(30, 16, 99));
    }

    #[test]
    fn difficulty_configs_pass_validation() {
        for difficulty in Difficulty::ALL {
            let config = difficulty.config();
            assert_eq!(
                GameConfig::new(config.width, config.height, config.mine_count),
                Ok(config)
            );
        }
    }

    #[test]
    fn difficulty_parses_and_displays() {
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("Medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!("expert".parse::<Difficulty>(), Err(UnknownDifficulty));
        assert_eq!(Difficulty::Easy.to_string(), "easy");
    }

    #[test]
    fn config_rejects_degenerate_boards() {
        assert_eq!(GameConfig::new(0, 9, 1), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new(3, 3, 1), Err(GameError::TooManyMines));
        assert_eq!(GameConfig::new(4, 4, 7), Ok(GameConfig::new_unchecked(4, 4, 7)));
        assert_eq!(GameConfig::new(4, 4, 8), Err(GameError::TooManyMines));
        assert_eq!(GameConfig::new(4, 4, 7).unwrap().total_cells(), 16);
    }

    #[test]
    fn config_serializes_camel_case() {
        let json = serde_json::to_value(Difficulty::Hard.config()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "width": 30, "height": 16, "mineCount": 99 })
        );
    }
}
