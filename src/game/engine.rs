use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, info};

use super::{
    collision::check_collision,
    config::{ConfigError, GameConfig},
    direction::Direction,
    food::place_food,
    state::{CollisionType, GameStatus, Position, Snake, Snapshot},
};

/// What the driver must do with its tick scheduler after an engine call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleCommand {
    /// Begin ticking every `Duration`
    Start(Duration),
    /// Cancel the current registration and tick every `Duration` from now on
    Restart(Duration),
    /// Stop ticking
    Stop,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was not running; nothing changed
    Ignored,
    /// The snake slid one cell
    Moved,
    /// The snake ate food and grew
    Ate { score: u32 },
    /// The snake ate the last free cell; the game is over
    BoardFull { score: u32 },
    /// The snake hit something; the game is over and nothing else moved
    Collided(CollisionType),
}

impl TickOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TickOutcome::Collided(_) | TickOutcome::BoardFull { .. }
        )
    }
}

/// Result of a game tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub outcome: TickOutcome,
    /// Scheduler change the driver must apply, if any
    pub schedule: Option<ScheduleCommand>,
    /// State after the tick
    pub snapshot: Snapshot,
}

/// The game engine. Owns every piece of mutable game state; the outside world
/// drives it through `start`, `set_direction`, `tick` and `reset` and observes
/// it through `snapshot`.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    snake: Snake,
    food: Position,
    score: u32,
    steps: u32,
    status: GameStatus,
    current_direction: Direction,
    pending_direction: Direction,
    tick_interval: Duration,
}

impl GameEngine {
    /// Create a new engine in the Idle state
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut engine = Self {
            snake: Snake::new(Position::new(0, 0), Direction::Right, 1),
            food: Position::new(0, 0),
            score: 0,
            steps: 0,
            status: GameStatus::Idle,
            current_direction: Direction::Right,
            pending_direction: Direction::Right,
            tick_interval: config.base_interval(),
            config,
            rng,
        };
        engine.reset();
        Ok(engine)
    }

    /// Put a fresh snake at the centre of the grid and return to Idle.
    ///
    /// Returns `Stop` if the scheduler was ticking.
    pub fn reset(&mut self) -> Option<ScheduleCommand> {
        let was_running = self.status == GameStatus::Running;

        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        self.snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );
        self.current_direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.score = 0;
        self.steps = 0;
        self.tick_interval = self.config.base_interval();
        self.status = GameStatus::Idle;
        self.respawn_food();

        info!(food = ?self.food, "game reset");

        was_running.then_some(ScheduleCommand::Stop)
    }

    /// The start/pause toggle.
    ///
    /// Idle and GameOver start running, Running pauses, Paused resumes.
    pub fn start(&mut self) -> ScheduleCommand {
        match self.status {
            GameStatus::Idle | GameStatus::GameOver => {
                info!(from = ?self.status, interval_ms = self.tick_interval.as_millis() as u64, "game started");
                self.status = GameStatus::Running;
                ScheduleCommand::Start(self.tick_interval)
            }
            GameStatus::Running => {
                info!(score = self.score, "game paused");
                self.status = GameStatus::Paused;
                ScheduleCommand::Stop
            }
            GameStatus::Paused => {
                info!(score = self.score, "game resumed");
                self.status = GameStatus::Running;
                ScheduleCommand::Start(self.tick_interval)
            }
        }
    }

    /// Buffer a direction for the next tick.
    ///
    /// A reversal of the direction currently applied is ignored, so the snake
    /// can never turn back into its own neck. Returns whether it was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.current_direction) {
            debug!(?direction, current = ?self.current_direction, "reversal ignored");
            return false;
        }
        self.pending_direction = direction;
        true
    }

    /// Advance the simulation by one cell. A no-op unless the game is running.
    pub fn tick(&mut self) -> TickResult {
        if self.status != GameStatus::Running {
            return self.result(TickOutcome::Ignored, None);
        }

        self.current_direction = self.pending_direction;
        let new_head = self.snake.head().moved_in_direction(self.current_direction);

        if let Some(collision) = check_collision(
            new_head,
            &self.snake,
            self.config.grid_width,
            self.config.grid_height,
        ) {
            self.status = GameStatus::GameOver;
            info!(?collision, score = self.score, steps = self.steps, "game over");
            return self.result(
                TickOutcome::Collided(collision),
                Some(ScheduleCommand::Stop),
            );
        }

        self.snake.push_head(new_head);
        self.steps += 1;

        if new_head != self.food {
            self.snake.pop_tail();
            return self.result(TickOutcome::Moved, None);
        }

        self.score = self.score.saturating_add(self.config.score_per_food);

        if !self.respawn_food() {
            self.status = GameStatus::GameOver;
            info!(score = self.score, "board filled");
            return self.result(
                TickOutcome::BoardFull { score: self.score },
                Some(ScheduleCommand::Stop),
            );
        }

        let interval = self.config.tick_interval(self.score);
        let schedule = if interval != self.tick_interval {
            debug!(
                from_ms = self.tick_interval.as_millis() as u64,
                to_ms = interval.as_millis() as u64,
                "tick interval changed"
            );
            self.tick_interval = interval;
            Some(ScheduleCommand::Restart(interval))
        } else {
            None
        };

        self.result(TickOutcome::Ate { score: self.score }, schedule)
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Copy of everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().collect(),
            food: self.food,
            score: self.score,
            status: self.status,
            direction: self.current_direction,
            grid_width: self.config.grid_width,
            grid_height: self.config.grid_height,
            steps: self.steps,
            tick_interval: self.tick_interval,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn current_direction(&self) -> Direction {
        self.current_direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Move the food to a free cell. Returns false, leaving it in place, when
    /// the snake covers the whole grid.
    fn respawn_food(&mut self) -> bool {
        match place_food(
            &mut self.rng,
            &self.snake,
            self.config.grid_width,
            self.config.grid_height,
        ) {
            Some(food) => {
                debug!(?food, "food placed");
                self.food = food;
                true
            }
            None => false,
        }
    }

    fn result(&self, outcome: TickOutcome, schedule: Option<ScheduleCommand>) -> TickResult {
        TickResult {
            outcome,
            schedule,
            snapshot: self.snapshot(),
        }
    }

    /// Replace the board for a test scenario
    #[cfg(test)]
    pub(crate) fn arrange(&mut self, snake: Snake, direction: Direction, food: Position) {
        self.snake = snake;
        self.current_direction = direction;
        self.pending_direction = direction;
        self.food = food;
    }
}
