use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::equation::{generate_equations, Equation, GameMode};

/// Seconds allotted to each level.
pub const ROUND_TIME: u32 = 15;
/// Number of levels in a full run.
pub const TOTAL_LEVELS: u32 = 80;

/// Lifecycle of an arithmetic-game run.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameStatus {
    /// No run started yet.
    Idle,
    /// A level is live and the countdown is running.
    Playing,
    /// All levels cleared.
    Won,
    /// The run ended in failure.
    Lost,
}

/// What a balloon click amounted to.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ClickOutcome {
    /// The click matched the mode's expected value.
    Correct,
    /// The click missed; the level advances without score.
    Wrong,
    /// The click was dropped: not playing, unknown id, or balloon already popped.
    Ignored,
}

/// State machine for the balloon-popping arithmetic game.
///
/// One level is six equation balloons and a fifteen-second countdown; what
/// counts as a correct click depends on the [`GameMode`] in force at the
/// current level. The caller drives it with [`tick`](Self::tick) once a second
/// and [`click`](Self::click) per balloon press.
pub struct ArithmeticGame {
    level: u32,
    score: u32,
    time_left: u32,
    status: GameStatus,
    equations: Vec<Equation>,
    clicked: Vec<String>,
    rng: StdRng,
}

impl ArithmeticGame {
    /// A fresh, idle game with an entropy-seeded generator.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A fresh, idle game with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            level: 1,
            score: 0,
            time_left: ROUND_TIME,
            status: GameStatus::Idle,
            equations: vec![],
            clicked: vec![],
            rng,
        }
    }

    /// Current level, 1-indexed.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Accumulated score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds remaining on the current level.
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Lifecycle state.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The mode in force at the current level.
    pub fn mode(&self) -> GameMode {
        GameMode::for_level(self.level)
    }

    /// The live balloons, clicked ones included.
    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    /// Ids of balloons already popped this level, in click order.
    pub fn clicked(&self) -> &[String] {
        &self.clicked
    }

    /// Begin a run at level 1.
    pub fn start(&mut self) {
        self.score = 0;
        self.start_level(1);
    }

    /// Jump to `level` with a fresh countdown and balloons; past the last level
    /// the run is won.
    pub fn start_level(&mut self, level: u32) {
        if level > TOTAL_LEVELS {
            self.status = GameStatus::Won;
            return;
        }

        self.level = level;
        self.time_left = ROUND_TIME;
        self.status = GameStatus::Playing;
        self.equations = generate_equations(level, &mut self.rng);
        self.clicked.clear();
    }

    /// Advance the countdown by one second. Hitting zero forfeits the level
    /// and moves on, scoreless.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.start_level(self.level + 1);
        }
    }

    /// Handle a click on the balloon with id `id`.
    ///
    /// `Smallest`/`Largest` levels resolve in one click: +10 for the global
    /// min/max, then the next level either way. `Ascending`/`Descending`
    /// levels want every balloon in value order: +2 per correct mid-sequence
    /// click, +10 on completing the sequence, and any wrong pick forfeits the
    /// rest of the level.
    pub fn click(&mut self, id: &str) -> ClickOutcome {
        if self.status != GameStatus::Playing || self.clicked.iter().any(|c| c == id) {
            return ClickOutcome::Ignored;
        }

        let clicked_value = match self.equations.iter().find(|eq| eq.id == id) {
            Some(eq) => eq.value,
            None => return ClickOutcome::Ignored,
        };

        match self.mode() {
            GameMode::Smallest | GameMode::Largest => {
                let target = match self.mode() {
                    GameMode::Smallest => self.min_value(self.equations.iter()),
                    _ => self.max_value(self.equations.iter()),
                };

                let correct = clicked_value == target;
                if correct {
                    self.score += 10;
                }
                self.start_level(self.level + 1);

                if correct { ClickOutcome::Correct } else { ClickOutcome::Wrong }
            }
            GameMode::Ascending | GameMode::Descending => {
                let unclicked = self.equations.iter()
                    .filter(|eq| !self.clicked.iter().any(|c| *c == eq.id));
                let target = match self.mode() {
                    GameMode::Ascending => self.min_value(unclicked),
                    _ => self.max_value(unclicked),
                };

                if clicked_value != target {
                    self.start_level(self.level + 1);
                    return ClickOutcome::Wrong;
                }

                self.clicked.push(id.to_owned());
                if self.clicked.len() == self.equations.len() {
                    self.score += 10;
                    self.start_level(self.level + 1);
                } else {
                    self.score += 2;
                }

                ClickOutcome::Correct
            }
        }
    }

    fn min_value<'a>(&self, equations: impl Iterator<Item = &'a Equation>) -> f64 {
        equations.map(|eq| eq.value).fold(f64::INFINITY, f64::min)
    }

    fn max_value<'a>(&self, equations: impl Iterator<Item = &'a Equation>) -> f64 {
        equations.map(|eq| eq.value).fold(f64::NEG_INFINITY, f64::max)
    }
}

impl Default for ArithmeticGame {
    fn default() -> Self {
        Self::new()
    }
}
