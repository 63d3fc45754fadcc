use clap::Parser;
use minesweep_core::*;
use wasm_bindgen::prelude::*;

type JsResult<T> = std::result::Result<T, JsError>;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Difficulty of the first game
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Options come from the URL hash, e.g. `#--difficulty=hard&--seed=7&-vv`.
fn parse_args(location_hash: &str) -> std::result::Result<Args, clap::Error> {
    Args::try_parse_from(location_hash.split(['#', '&']))
}

fn location_args() -> Args {
    use gloo::utils::window;

    let location_hash = window().location().hash().unwrap_or_default();
    parse_args(&location_hash).unwrap_or_else(|err| {
        log::warn!("Ignoring invalid options {:?}: {}", location_hash, err);
        Args::parse_from([""])
    })
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let args = location_args();
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            gloo::console::error!(format!("Error initializing logger: {err}"));
        }
    }
    log::debug!("difficulty: {}, seed: {:?}", args.difficulty, args.seed);
}

/// Handle owning the single game state slot the page renders from. Each call
/// replaces the snapshot in place, so interactions are applied strictly in order.
#[wasm_bindgen]
pub struct Game {
    state: GameState,
    fixed_seed: Option<u64>,
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new(difficulty: Option<String>) -> JsResult<Game> {
        let args = location_args();
        let difficulty = match difficulty {
            Some(name) => name.parse()?,
            None => args.difficulty,
        };
        Ok(Self::with_seed(difficulty, args.seed)?)
    }

    pub fn reset(&mut self) {
        self.state = self.state.reset(self.next_seed());
    }

    pub fn set_difficulty(&mut self, difficulty: &str) -> JsResult<()> {
        let difficulty: Difficulty = difficulty.parse()?;
        self.state = GameState::with_difficulty(difficulty, self.next_seed())?;
        Ok(())
    }

    pub fn toggle_flag_mode(&mut self) {
        self.state = self.state.toggle_flag_mode();
    }

    pub fn primary(&mut self, x: u8, y: u8) -> JsResult<()> {
        log::trace!("primary ({}, {})", x, y);
        self.apply(|state| state.primary((x, y)))
    }

    pub fn secondary(&mut self, x: u8, y: u8) -> JsResult<()> {
        log::trace!("secondary ({}, {})", x, y);
        self.apply(|state| state.secondary((x, y)))
    }

    pub fn chord(&mut self, x: u8, y: u8) -> JsResult<()> {
        log::trace!("chord ({}, {})", x, y);
        self.apply(|state| state.chord((x, y)))
    }

    /// Full `GameState` as JSON, cells nested as `cells[y][x]`.
    pub fn snapshot(&self) -> JsResult<String> {
        Ok(serde_json::to_string(&self.state)?)
    }

    pub fn status(&self) -> String {
        self.state.status().name().into()
    }

    pub fn mines_left(&self) -> i32 {
        self.state.mines_left()
    }
}

impl Game {
    fn with_seed(difficulty: Difficulty, fixed_seed: Option<u64>) -> Result<Self> {
        let seed = fixed_seed.unwrap_or_else(random_seed);
        Ok(Self {
            state: GameState::with_difficulty(difficulty, seed)?,
            fixed_seed,
        })
    }

    fn next_seed(&self) -> u64 {
        self.fixed_seed.unwrap_or_else(random_seed)
    }

    /// Input after the game ended is dropped, the page keeps showing the final board.
    fn apply(&mut self, action: impl FnOnce(&GameState) -> Result<GameState>) -> JsResult<()> {
        match action(&self.state) {
            Ok(next) => {
                self.state = next;
                Ok(())
            }
            Err(GameError::AlreadyEnded) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
