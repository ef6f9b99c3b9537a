//! Plinko board motion model.
//!
//! The ball is a point mass under constant gravity that bounces off the
//! side walls and a staggered peg lattice. Each peg hit damps the velocity
//! and adds a little random horizontal jitter. The simulation advances in
//! fixed 1/60 s steps derived from elapsed wall-clock time, so a slow
//! device skips ahead instead of slowing down.
//!
//! The drawn position is steered: over the last [`CORRECTION_START`] part
//! of the session it blends from the simulated position to the landing
//! point of the target slot. The ball therefore always comes to rest in
//! the slot chosen at session start; physics only decides the path.

use rand::Rng;
use rand_pcg::Mcg128Xsl64;

use super::session::{MotionModel, Pose};

pub const BOARD_WIDTH: f64 = 300.0;
pub const BOARD_HEIGHT: f64 = 400.0;
pub const PEG_ROWS: usize = 8;
pub const PEG_RADIUS: f64 = 4.0;
pub const PEG_SPACING: f64 = BOARD_WIDTH / 8.0;
pub const PEG_TOP: f64 = 50.0;
pub const PEG_ROW_GAP: f64 = 40.0;
pub const SLOT_HEIGHT: f64 = 60.0;
pub const SLOT_TOP: f64 = BOARD_HEIGHT - SLOT_HEIGHT;
pub const BALL_RADIUS: f64 = 6.0;
/// Resting height of the ball inside a slot.
pub const LANDING_Y: f64 = SLOT_TOP + SLOT_HEIGHT / 2.0;
pub const START_Y: f64 = -30.0;

/// Simulation step in milliseconds.
pub const STEP_MS: f64 = 1000.0 / 60.0;
/// Progress at which steering toward the target slot begins.
pub const CORRECTION_START: f64 = 0.6;

const GRAVITY: f64 = 0.05;
const BOUNCE: f64 = 0.7;
const JITTER: f64 = 0.4;
const COLLISION_DISTANCE: f64 = 10.0;
const WALL_MIN: f64 = 10.0;
const WALL_MAX: f64 = BOARD_WIDTH - 10.0;
/// The simulated ball rests once it reaches the slot tops.
const FLOOR_Y: f64 = SLOT_TOP + 10.0;

/// Peg centers, row by row.
pub fn pegs() -> impl Iterator<Item = (f64, f64)> {
    (0..PEG_ROWS).flat_map(|row| {
        let (offset, count) = if row % 2 == 0 {
            (0.0, 8)
        } else {
            (PEG_SPACING / 2.0, 7)
        };
        let y = PEG_TOP + row as f64 * PEG_ROW_GAP;
        (0..count).map(move |col| (offset + col as f64 * PEG_SPACING + PEG_SPACING / 2.0, y))
    })
}

pub fn slot_width(slot_count: usize) -> f64 {
    BOARD_WIDTH / slot_count.max(1) as f64
}

pub fn slot_center_x(index: usize, slot_count: usize) -> f64 {
    let w = slot_width(slot_count);
    index as f64 * w + w / 2.0
}

/// Slot containing horizontal position `x`.
pub fn slot_at_x(x: f64, slot_count: usize) -> usize {
    if slot_count == 0 {
        return 0;
    }
    let idx = (x.max(0.0) / slot_width(slot_count)).floor() as usize;
    idx.min(slot_count - 1)
}

fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[derive(Debug, Clone)]
pub struct BoardModel {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    target_x: f64,
    steps: u64,
    max_steps: u64,
    rng: Mcg128Xsl64,
}

impl BoardModel {
    pub fn new(
        target_index: usize,
        slot_count: usize,
        start_x: f64,
        duration_ms: f64,
        rng: Mcg128Xsl64,
    ) -> Self {
        let target_x = slot_center_x(target_index, slot_count);
        Self {
            x: start_x,
            y: START_Y,
            // Light bias toward the target from the start.
            vx: (target_x - start_x) * 0.01,
            vy: 0.0,
            target_x,
            steps: 0,
            max_steps: (duration_ms / STEP_MS).ceil() as u64,
            rng,
        }
    }

    /// Raw simulated position, before steering.
    pub fn simulated(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn step(&mut self) {
        if self.y >= FLOOR_Y {
            return;
        }

        self.vy += GRAVITY;
        self.x += self.vx;
        self.y += self.vy;

        if self.x < WALL_MIN {
            self.x = WALL_MIN;
            self.vx = -self.vx * BOUNCE;
        } else if self.x > WALL_MAX {
            self.x = WALL_MAX;
            self.vx = -self.vx * BOUNCE;
        }

        for (px, py) in pegs() {
            let dx = px - self.x;
            let dy = py - self.y;
            if (dx * dx + dy * dy).sqrt() < COLLISION_DISTANCE {
                let angle = dy.atan2(dx);
                let bounce_x = -angle.cos() * 2.0;
                let bounce_y = -angle.sin() * 2.0;
                let jitter = self.rng.gen_range(-JITTER / 2.0..JITTER / 2.0);
                self.vx = bounce_x * BOUNCE + jitter;
                self.vy = bounce_y * BOUNCE;
                // Push out so the ball does not stick to the peg.
                self.x += bounce_x * 2.0;
                self.y += bounce_y * 2.0;
            }
        }

        if self.y >= FLOOR_Y {
            self.y = FLOOR_Y;
            self.vx = 0.0;
            self.vy = 0.0;
        }
    }
}

impl MotionModel for BoardModel {
    fn advance(&mut self, elapsed_ms: f64, progress: f64) -> Pose {
        let due = ((elapsed_ms.max(0.0) / STEP_MS).floor() as u64).min(self.max_steps);
        while self.steps < due {
            self.step();
            self.steps += 1;
        }

        let w = smoothstep((progress - CORRECTION_START) / (1.0 - CORRECTION_START));
        Pose::Board {
            x: self.x + (self.target_x - self.x) * w,
            y: self.y + (LANDING_Y - self.y) * w,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn lattice_has_alternating_rows() {
        let pegs: Vec<_> = pegs().collect();
        assert_eq!(pegs.len(), 4 * 8 + 4 * 7);
        assert_eq!(pegs[0], (PEG_SPACING / 2.0, PEG_TOP));
        assert_eq!(pegs[8], (PEG_SPACING, PEG_TOP + PEG_ROW_GAP));
    }

    #[test]
    fn slot_lookup_clamps_to_edges() {
        assert_eq!(slot_at_x(-5.0, 8), 0);
        assert_eq!(slot_at_x(BOARD_WIDTH, 8), 7);
        assert_eq!(slot_at_x(slot_center_x(3, 8), 8), 3);
    }

    #[test]
    fn terminal_pose_is_target_slot() {
        for seed in 0..20u64 {
            let rng = Mcg128Xsl64::seed_from_u64(seed);
            let mut model = BoardModel::new(5, 9, 140.0, 3000.0, rng);
            match model.advance(3000.0, 1.0) {
                Pose::Board { x, y } => {
                    assert_eq!(slot_at_x(x, 9), 5);
                    assert!((x - slot_center_x(5, 9)).abs() < 1e-9);
                    assert!((y - LANDING_Y).abs() < 1e-9);
                }
                other => panic!("unexpected pose {other:?}"),
            }
        }
    }

    #[test]
    fn steps_follow_elapsed_time_not_calls() {
        let rng = Mcg128Xsl64::seed_from_u64(1);
        let mut a = BoardModel::new(0, 8, 150.0, 3000.0, rng.clone());
        let mut b = BoardModel::new(0, 8, 150.0, 3000.0, rng);

        // One long frame vs many short ones reach the same simulated state.
        a.advance(1000.0, 1000.0 / 3000.0);
        let mut t: f64 = 0.0;
        while t < 1000.0 {
            t += 5.0;
            b.advance(t.min(1000.0), t.min(1000.0) / 3000.0);
        }
        assert_eq!(a.simulated(), b.simulated());
    }

    #[test]
    fn ball_stays_inside_walls_and_above_floor() {
        let rng = Mcg128Xsl64::seed_from_u64(99);
        let mut model = BoardModel::new(2, 8, 175.0, 3000.0, rng);
        for i in 0..=180 {
            let elapsed = i as f64 * STEP_MS;
            model.advance(elapsed, 0.0);
            let (x, y) = model.simulated();
            assert!((WALL_MIN - 4.0..=WALL_MAX + 4.0).contains(&x), "x={x}");
            assert!(y <= FLOOR_Y);
        }
    }
}
