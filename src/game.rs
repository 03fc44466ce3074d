use crate::food::place_food;
use crate::grid::{Cell, Grid};
use crate::input::Command;
use crate::scores::{ScoreRecord, ScoreStore};
use crate::snake::Snake;
use ahash::AHashSet;
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundState {
    Running,
    Paused,
    GameOver,
}

/// How a finished round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Crashed,
    /// No free cell left for food: the snake filled the board.
    BoardFilled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Game {
    grid: Grid,
    snake: Snake,
    food: Option<Cell>,
    score: u32,
    state: RoundState,
    outcome: Option<Outcome>,
    saved: bool,
    store: Option<ScoreStore>,
    score_limit: usize,
    high_scores: Vec<ScoreRecord>,
    rng: SmallRng,
}

impl Game {
    /// Without a store the game still plays; scores just aren't kept.
    pub fn new(grid: Grid, store: Option<ScoreStore>, score_limit: usize, rng: SmallRng) -> Self {
        debug!(cells = grid.area(), "board ready");
        let snake = Snake::new(grid.center());
        let mut game = Self {
            grid,
            snake,
            food: None,
            score: 0,
            state: RoundState::Running,
            outcome: None,
            saved: false,
            store,
            score_limit,
            high_scores: Vec::new(),
            rng,
        };
        game.food = game.spawn_food();
        game.refresh_high_scores();
        game
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn high_scores(&self) -> &[ScoreRecord] {
        &self.high_scores
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        match (command, self.state) {
            (Command::Quit, _) => {
                info!(score = self.score, "quit");
                return Flow::Quit;
            }
            (Command::Pause, RoundState::Running) => {
                self.state = RoundState::Paused;
                debug!("paused");
            }
            (Command::Pause, RoundState::Paused) => {
                self.state = RoundState::Running;
                debug!("resumed");
            }
            (Command::Restart, RoundState::GameOver) => self.reset(),
            (Command::Steer(heading), RoundState::Running) => self.snake.set_heading(heading),
            _ => {}
        }
        Flow::Continue
    }

    /// One simulation step. Also persists the score on the first tick spent in
    /// `GameOver`; later ticks in that state do nothing.
    pub fn tick(&mut self) {
        if self.state == RoundState::Running {
            self.step();
        }
        self.finish_round();
    }

    fn step(&mut self) {
        self.snake.advance();

        if self.snake.collided(&self.grid) {
            self.end_round(Outcome::Crashed);
            return;
        }

        if self.food == Some(self.snake.head()) {
            self.score += 1;
            self.snake.mark_growth();
            debug!(score = self.score, "food eaten");
            self.food = self.spawn_food();
            if self.food.is_none() {
                self.end_round(Outcome::BoardFilled);
            }
        }
    }

    fn spawn_food(&mut self) -> Option<Cell> {
        let occupied: AHashSet<Cell> = self.snake.body().iter().copied().collect();
        place_food(&self.grid, &occupied, &mut self.rng)
    }

    fn end_round(&mut self, outcome: Outcome) {
        self.state = RoundState::GameOver;
        self.outcome = Some(outcome);
        info!(
            score = self.score,
            length = self.snake.len(),
            heading = ?self.snake.heading(),
            ?outcome,
            "round over"
        );
    }

    fn finish_round(&mut self) {
        if self.state != RoundState::GameOver || self.saved {
            return;
        }
        self.saved = true;
        if self.score == 0 {
            return;
        }
        let Some(store) = &self.store else {
            return;
        };
        match store.record_score(self.score) {
            Ok(()) => info!(score = self.score, "score recorded"),
            Err(e) => warn!("could not record score {}: {:#}", self.score, e),
        }
        self.refresh_high_scores();
    }

    fn reset(&mut self) {
        self.snake = Snake::new(self.grid.center());
        self.score = 0;
        self.state = RoundState::Running;
        self.outcome = None;
        self.saved = false;
        self.food = self.spawn_food();
        info!("new round");
    }

    fn refresh_high_scores(&mut self) {
        self.high_scores = match &self.store {
            Some(store) => store.top_scores(self.score_limit).unwrap_or_else(|e| {
                warn!("could not load high scores: {:#}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };
    }
}
