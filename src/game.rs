use crate::config::GameConfig;
use crate::pos::Pos;
use crate::record::MatchStats;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }

    fn offset(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

/// What a single tick did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Paused or already over.
    Idle,
    Moved,
    Ate,
    Died,
}

/// Wall-clock play time that stops while the game is paused.
#[derive(Clone, Copy, Debug)]
pub struct PlayClock {
    started: Instant,
    paused_total: Duration,
    paused_at: Option<Instant>,
}

impl PlayClock {
    pub fn start(now: Instant) -> Self {
        Self {
            started: now,
            paused_total: Duration::ZERO,
            paused_at: None,
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if let Some(at) = self.paused_at.take() {
            self.paused_total += now.saturating_duration_since(at);
        }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        let until = self.paused_at.unwrap_or(now);
        until
            .saturating_duration_since(self.started)
            .saturating_sub(self.paused_total)
    }

    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        self.elapsed(now).as_secs()
    }
}

pub struct Game {
    pub width: i32,
    pub height: i32,
    pub snake: VecDeque<Pos>,
    pub dir: Dir,
    pending_dir: Dir,
    pub food: Pos,
    pub alive: bool,
    pub score: u32,
    pub moves: u32,
    pub paused: bool,
    pub clock: PlayClock,
    rng: SmallRng,
}

impl Game {
    pub fn new(cfg: &GameConfig, now: Instant) -> Self {
        let rng = match cfg.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(cfg.grid_width(), cfg.grid_height(), rng, now)
    }

    pub fn with_rng(width: i32, height: i32, rng: SmallRng, now: Instant) -> Self {
        let start_x = width / 2;
        let start_y = height / 2;
        let mut snake = VecDeque::new();
        snake.push_back(Pos::new(start_x, start_y));
        snake.push_back(Pos::new(start_x - 1, start_y));
        snake.push_back(Pos::new(start_x - 2, start_y));

        let mut g = Self {
            width,
            height,
            snake,
            dir: Dir::Right,
            pending_dir: Dir::Right,
            food: Pos::new(0, 0),
            alive: true,
            score: 0,
            moves: 0,
            paused: false,
            clock: PlayClock::start(now),
            rng,
        };
        g.place_food();
        g
    }

    /// Food never lands on row or column zero, nor on the snake.
    pub fn place_food(&mut self) {
        let in_range = self.snake.iter().filter(|p| p.x >= 1 && p.y >= 1).count();
        if in_range >= ((self.width - 1).max(0) * (self.height - 1).max(0)) as usize {
            return;
        }
        loop {
            let x = self.rng.gen_range(1..self.width);
            let y = self.rng.gen_range(1..self.height);
            let p = Pos::new(x, y);
            if !self.snake_contains(p) {
                self.food = p;
                break;
            }
        }
    }

    pub fn snake_contains(&self, p: Pos) -> bool {
        self.snake.iter().any(|&s| s == p)
    }

    pub fn head(&self) -> Pos {
        self.snake[0]
    }

    fn in_bounds(&self, p: Pos) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    pub fn step(&mut self) -> StepOutcome {
        if !self.alive || self.paused {
            return StepOutcome::Idle;
        }

        self.dir = self.pending_dir;
        let (dx, dy) = self.dir.offset();
        let new_head = self.head().offset(dx, dy);

        if !self.in_bounds(new_head) {
            self.alive = false;
            return StepOutcome::Died;
        }

        self.snake.push_front(new_head);
        let outcome = if new_head == self.food {
            self.score += 1;
            self.place_food();
            StepOutcome::Ate
        } else {
            self.snake.pop_back();
            StepOutcome::Moved
        };

        // The tail has already moved on, so stepping into its old cell is fine.
        if self.snake.iter().skip(1).any(|&s| s == new_head) {
            self.alive = false;
            return StepOutcome::Died;
        }
        outcome
    }

    /// Queues a turn for the next tick. Every accepted key press counts as a move,
    /// including a press of the current direction.
    pub fn change_dir(&mut self, new_dir: Dir) -> bool {
        if !self.alive || self.paused || new_dir == self.dir.opposite() {
            return false;
        }
        self.pending_dir = new_dir;
        self.moves += 1;
        true
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        self.paused = !self.paused;
        if self.paused {
            self.clock.pause(now);
        } else {
            self.clock.resume(now);
        }
    }

    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        self.clock.elapsed_secs(now)
    }

    pub fn match_stats(&self, now: Instant) -> MatchStats {
        MatchStats {
            score: self.score,
            moves: self.moves,
            time_seconds: self.elapsed_secs(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::with_rng(40, 30, SmallRng::seed_from_u64(7), Instant::now())
    }

    #[test]
    fn starts_centred_facing_right() {
        let g = game();
        assert_eq!(
            g.snake.iter().copied().collect::<Vec<_>>(),
            vec![Pos::new(20, 15), Pos::new(19, 15), Pos::new(18, 15)]
        );
        assert_eq!(g.dir, Dir::Right);
        assert!(g.alive);
        assert!(!g.snake_contains(g.food));
        assert!(g.food.x >= 1 && g.food.y >= 1);
    }

    #[test]
    fn moves_one_cell_and_keeps_length() {
        let mut g = game();
        g.food = Pos::new(1, 1);
        assert_eq!(g.step(), StepOutcome::Moved);
        assert_eq!(g.head(), Pos::new(21, 15));
        assert_eq!(g.snake.len(), 3);
    }

    #[test]
    fn eating_grows_and_scores() {
        let mut g = game();
        g.food = Pos::new(21, 15);
        assert_eq!(g.step(), StepOutcome::Ate);
        assert_eq!(g.score, 1);
        assert_eq!(g.snake.len(), 4);
        assert_ne!(g.food, Pos::new(21, 15));
    }

    #[test]
    fn reversal_is_rejected_and_not_counted() {
        let mut g = game();
        assert!(!g.change_dir(Dir::Left));
        assert_eq!(g.moves, 0);
        assert!(g.change_dir(Dir::Right));
        assert!(g.change_dir(Dir::Up));
        assert_eq!(g.moves, 2);
    }

    #[test]
    fn leaving_the_grid_ends_the_game() {
        let mut g = game();
        g.food = Pos::new(1, 1);
        for _ in 0..19 {
            assert_eq!(g.step(), StepOutcome::Moved);
        }
        assert_eq!(g.head(), Pos::new(39, 15));
        assert_eq!(g.step(), StepOutcome::Died);
        assert!(!g.alive);
        assert_eq!(g.step(), StepOutcome::Idle);
    }

    #[test]
    fn running_into_the_body_ends_the_game() {
        let mut g = game();
        g.food = Pos::new(1, 1);
        g.snake = VecDeque::from(vec![
            Pos::new(10, 10),
            Pos::new(9, 10),
            Pos::new(9, 11),
            Pos::new(10, 11),
            Pos::new(11, 11),
            Pos::new(11, 10),
        ]);
        g.change_dir(Dir::Down);
        assert_eq!(g.step(), StepOutcome::Died);
    }

    #[test]
    fn following_the_tail_is_safe() {
        let mut g = game();
        g.food = Pos::new(1, 1);
        g.snake = VecDeque::from(vec![
            Pos::new(10, 10),
            Pos::new(10, 11),
            Pos::new(11, 11),
            Pos::new(11, 10),
        ]);
        g.dir = Dir::Up;
        g.change_dir(Dir::Right);
        assert_eq!(g.step(), StepOutcome::Moved);
        assert!(g.alive);
    }

    #[test]
    fn food_takes_the_last_free_cell_then_stays_put() {
        let mut g = Game::with_rng(4, 2, SmallRng::seed_from_u64(3), Instant::now());
        assert_eq!(g.food, Pos::new(3, 1));

        g.snake = VecDeque::from([Pos::new(3, 1), Pos::new(2, 1), Pos::new(1, 1), Pos::new(0, 1)]);
        g.place_food();
        assert_eq!(g.food, Pos::new(3, 1));
    }

    #[test]
    fn paused_game_does_not_advance_or_count_moves() {
        let mut g = game();
        let now = Instant::now();
        g.toggle_pause(now);
        assert_eq!(g.step(), StepOutcome::Idle);
        assert!(!g.change_dir(Dir::Up));
        assert_eq!(g.head(), Pos::new(20, 15));
    }

    #[test]
    fn clock_excludes_paused_time() {
        let t0 = Instant::now();
        let mut clock = PlayClock::start(t0);
        clock.pause(t0 + Duration::from_secs(5));
        assert_eq!(clock.elapsed_secs(t0 + Duration::from_secs(60)), 5);
        clock.resume(t0 + Duration::from_secs(65));
        assert_eq!(clock.elapsed_secs(t0 + Duration::from_secs(72)), 12);
    }
}
