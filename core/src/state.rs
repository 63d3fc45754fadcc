use serde::Serialize;

use crate::*;

/// Full snapshot of one game, as handed to the presentation layer.
///
/// Every transition borrows the current state and returns the next one. Mines are
/// placed lazily on the first successful reveal, seeded with the value the state
/// was created with, so a game can be replayed from its seed and its inputs.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    cells: Board,
    width: Coord,
    height: Coord,
    mine_count: CellCount,
    flagged_count: CellCount,
    revealed_count: CellCount,
    game_status: GameStatus,
    is_first_click: bool,
    is_flag_mode: bool,
    #[serde(skip)]
    seed: u64,
}

impl GameState {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.width, config.height, config.mine_count)?;
        let cells = Board::new(config.width, config.height)?;
        Ok(Self::fresh(cells, config.mine_count, seed))
    }

    pub fn with_difficulty(difficulty: Difficulty, seed: u64) -> Result<Self> {
        log::debug!("New {} game", difficulty);
        Self::new(difficulty.config(), seed)
    }

    /// Resumes from an existing board, e.g. a fixed layout. Mines count as placed
    /// when the board carries any.
    pub fn from_board(cells: Board, seed: u64) -> Self {
        let mine_count = cells.mine_count();
        let is_first_click = !cells.has_mines();
        let stats = cells.stats();
        let game_status = cells.status(mine_count);
        Self {
            width: cells.width(),
            height: cells.height(),
            cells,
            mine_count,
            flagged_count: stats.flagged_count,
            revealed_count: stats.revealed_count,
            game_status,
            is_first_click,
            is_flag_mode: false,
            seed,
        }
    }

    fn fresh(cells: Board, mine_count: CellCount, seed: u64) -> Self {
        Self {
            width: cells.width(),
            height: cells.height(),
            cells,
            mine_count,
            flagged_count: 0,
            revealed_count: 0,
            game_status: GameStatus::Playing,
            is_first_click: true,
            is_flag_mode: false,
            seed,
        }
    }

    /// Starts over on the same configuration, discarding everything else.
    pub fn reset(&self, seed: u64) -> Self {
        log::debug!("Reset {}x{} game", self.width, self.height);
        Self::fresh(self.cells.cleared(), self.mine_count, seed)
    }

    pub fn board(&self) -> &Board {
        &self.cells
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.width, self.height, self.mine_count)
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    pub fn height(&self) -> Coord {
        self.height
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn stats(&self) -> GameStats {
        GameStats {
            revealed_count: self.revealed_count,
            flagged_count: self.flagged_count,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.game_status
    }

    pub fn is_first_click(&self) -> bool {
        self.is_first_click
    }

    pub fn is_flag_mode(&self) -> bool {
        self.is_flag_mode
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_count) - i32::from(self.flagged_count)
    }

    pub fn toggle_flag_mode(&self) -> Self {
        Self {
            is_flag_mode: !self.is_flag_mode,
            ..self.clone()
        }
    }

    /// Main button: reveals, or in flag mode chords a revealed number and flags
    /// anything else.
    pub fn primary(&self, coords: Coord2) -> Result<Self> {
        if !self.is_flag_mode {
            self.reveal(coords)
        } else if self.cells.cell(coords)?.is_revealed_number() {
            self.chord(coords)
        } else {
            self.toggle_flag(coords)
        }
    }

    /// Secondary button: chords a revealed number, flags anything else.
    pub fn secondary(&self, coords: Coord2) -> Result<Self> {
        if self.cells.cell(coords)?.is_revealed_number() {
            self.chord(coords)
        } else {
            self.toggle_flag(coords)
        }
    }

    /// Opens a cell, placing the mines first if this is the first successful reveal.
    pub fn reveal(&self, coords: Coord2) -> Result<Self> {
        self.check_playing()?;

        if !self.cells.cell(coords)?.is_hidden() {
            return Ok(self.clone());
        }

        let board = if self.is_first_click {
            self.cells
                .place_mines_with(SafeZoneGenerator::seeded(self.seed, coords), self.mine_count)?
        } else {
            self.cells.clone()
        };

        Ok(self.advance(board.reveal(coords)?, false))
    }

    pub fn toggle_flag(&self, coords: Coord2) -> Result<Self> {
        self.check_playing()?;

        let cells = self.cells.toggle_flag(coords)?;
        let flagged_count = cells.stats().flagged_count;
        Ok(Self {
            cells,
            flagged_count,
            ..self.clone()
        })
    }

    pub fn chord(&self, coords: Coord2) -> Result<Self> {
        self.check_playing()?;

        let board = self.cells.chord_reveal(coords)?;
        Ok(self.advance(board, self.is_first_click))
    }

    /// Recomputes status and counters after cells were opened.
    fn advance(&self, mut cells: Board, is_first_click: bool) -> Self {
        let game_status = cells.status(self.mine_count);
        if game_status == GameStatus::Lost {
            cells = cells.reveal_all_mines();
        }
        if game_status.is_finished() {
            log::debug!("Game finished: {:?}", game_status);
        }

        let stats = cells.stats();
        Self {
            cells,
            width: self.width,
            height: self.height,
            mine_count: self.mine_count,
            flagged_count: stats.flagged_count,
            revealed_count: stats.revealed_count,
            game_status,
            is_first_click,
            is_flag_mode: self.is_flag_mode,
            seed: self.seed,
        }
    }

    fn check_playing(&self) -> Result<()> {
        if self.game_status.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, mines: &[Coord2]) -> GameState {
        GameState::from_board(Board::from_mine_coords(size.0, size.1, mines).unwrap(), 0)
    }

    #[test]
    fn new_game_starts_pending() {
        let state = GameState::with_difficulty(Difficulty::Medium, 1).unwrap();

        assert_eq!(state.config(), Difficulty::Medium.config());
        assert_eq!(state.status(), GameStatus::Playing);
        assert!(state.is_first_click());
        assert!(!state.is_flag_mode());
        assert!(!state.board().has_mines());
        assert_eq!(state.stats(), GameStats::default());
    }

    #[test]
    fn new_rejects_unsafe_density() {
        let config = GameConfig::new_unchecked(3, 3, 1);

        assert_eq!(GameState::new(config, 0), Err(GameError::TooManyMines));
    }

    #[test]
    fn first_reveal_is_seeded() {
        let a = GameState::with_difficulty(Difficulty::Hard, 99).unwrap();
        let b = a.reset(99);

        assert_eq!(a.reveal((10, 5)).unwrap(), b.reveal((10, 5)).unwrap());
    }

    #[test]
    fn reveal_on_flagged_cell_does_not_place_mines() {
        let state = GameState::with_difficulty(Difficulty::Easy, 5)
            .unwrap()
            .toggle_flag((2, 2))
            .unwrap();

        let after = state.reveal((2, 2)).unwrap();

        assert!(after.is_first_click());
        assert!(!after.board().has_mines());
        assert_eq!(after.flagged_count(), 1);
    }

    #[test]
    fn flag_mode_primary_flags_without_placing_mines() {
        let state = GameState::with_difficulty(Difficulty::Easy, 5)
            .unwrap()
            .toggle_flag_mode();

        let after = state.primary((0, 0)).unwrap();

        assert_eq!(after.board()[(0, 0)].state, CellState::Flagged);
        assert_eq!(after.flagged_count(), 1);
        assert_eq!(after.mines_left(), 9);
        assert!(after.is_first_click());
    }

    #[test]
    fn flag_mode_primary_chords_revealed_number() {
        let state = layout((3, 3), &[(0, 0)])
            .reveal((1, 1))
            .unwrap()
            .toggle_flag((0, 0))
            .unwrap()
            .toggle_flag_mode();

        let after = state.primary((1, 1)).unwrap();

        assert_eq!(after.status(), GameStatus::Won);
        assert_eq!(after.revealed_count(), 8);
    }

    #[test]
    fn secondary_flags_hidden_and_chords_numbers() {
        let state = layout((3, 3), &[(0, 0)]).reveal((1, 1)).unwrap();

        let flagged = state.secondary((0, 0)).unwrap();
        assert_eq!(flagged.flagged_count(), 1);

        let chorded = flagged.secondary((1, 1)).unwrap();
        assert_eq!(chorded.status(), GameStatus::Won);
    }

    #[test]
    fn secondary_on_unsatisfied_number_changes_nothing() {
        let state = layout((3, 3), &[(0, 0)]).reveal((1, 1)).unwrap();

        assert_eq!(state.secondary((1, 1)).unwrap(), state);
    }

    #[test]
    fn loss_reveals_every_mine_and_blocks_moves() {
        let state = layout((3, 3), &[(0, 0), (2, 2)])
            .toggle_flag((2, 2))
            .unwrap()
            .reveal((0, 0))
            .unwrap();

        assert_eq!(state.status(), GameStatus::Lost);
        assert_eq!(state.board()[(2, 2)].state, CellState::Revealed);
        assert_eq!(state.flagged_count(), 0);
        assert_eq!(state.reveal((1, 1)), Err(GameError::AlreadyEnded));
        assert_eq!(state.toggle_flag((1, 1)), Err(GameError::AlreadyEnded));
        assert_eq!(state.chord((1, 1)), Err(GameError::AlreadyEnded));
        assert!(state.toggle_flag_mode().is_flag_mode());
    }

    #[test]
    fn reset_discards_progress() {
        let state = GameState::with_difficulty(Difficulty::Easy, 3)
            .unwrap()
            .reveal((4, 4))
            .unwrap()
            .toggle_flag_mode();

        let reset = state.reset(4);

        assert_eq!(reset, GameState::with_difficulty(Difficulty::Easy, 4).unwrap());
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let state = GameState::with_difficulty(Difficulty::Easy, 0).unwrap();

        assert_eq!(state.reveal((9, 0)), Err(GameError::InvalidCoords));
        assert_eq!(state.primary((0, 9)), Err(GameError::InvalidCoords));
        assert_eq!(state.secondary((9, 9)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn mines_left_goes_negative() {
        let mut state = layout((4, 4), &[(0, 0)]);
        for x in 0..3 {
            state = state.toggle_flag((x, 3)).unwrap();
        }

        assert_eq!(state.mines_left(), -2);
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let state = GameState::with_difficulty(Difficulty::Easy, 0).unwrap();

        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["width"], 9);
        assert_eq!(json["mineCount"], 10);
        assert_eq!(json["gameStatus"], "playing");
        assert_eq!(json["isFirstClick"], true);
        assert_eq!(json["isFlagMode"], false);
        assert_eq!(json["cells"].as_array().unwrap().len(), 9);
        assert_eq!(json["cells"][0][1]["id"], "1-0");
        assert_eq!(json["cells"][0][1]["x"], 1);
        assert!(json.get("seed").is_none());
    }
}
