#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded enemy planner that turns a directional input into a tick command.
//!
//! Enemies close to the player (sharing a row band or column band of width
//! three) step diagonally toward it. Distant enemies usually flee along the
//! axis with the larger separation, occasionally drifting on the other axis.
//! Every random draw comes from a seeded ChaCha stream so identical inputs
//! replay identically.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tilecraft_core::{BoardDimensions, CellCoord, Command, Direction, EnemyStep, EntityView};

/// Probabilities steering enemy behaviour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PursuitTuning {
    near_retreat_chance: f64,
    far_flee_chance: f64,
    drift_chance: f64,
}

impl PursuitTuning {
    /// Creates tuning values, clamping each probability into `[0, 1]`.
    ///
    /// A NaN probability is treated as zero.
    #[must_use]
    pub fn new(near_retreat_chance: f64, far_flee_chance: f64, drift_chance: f64) -> Self {
        Self {
            near_retreat_chance: probability(near_retreat_chance),
            far_flee_chance: probability(far_flee_chance),
            drift_chance: probability(drift_chance),
        }
    }

    /// Chance that a nearby enemy backs away instead of closing in.
    #[must_use]
    pub const fn near_retreat_chance(&self) -> f64 {
        self.near_retreat_chance
    }

    /// Chance that a distant enemy flees instead of approaching.
    #[must_use]
    pub const fn far_flee_chance(&self) -> f64 {
        self.far_flee_chance
    }

    /// Chance that a distant enemy also moves on its minor axis.
    #[must_use]
    pub const fn drift_chance(&self) -> f64 {
        self.drift_chance
    }
}

impl Default for PursuitTuning {
    fn default() -> Self {
        Self::new(0.0, 0.7, 0.5)
    }
}

fn probability(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Configuration parameters required to construct the pursuit system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    seed: u64,
    tuning: PursuitTuning,
}

impl Config {
    /// Creates a configuration from a seed and tuning values.
    #[must_use]
    pub const fn new(seed: u64, tuning: PursuitTuning) -> Self {
        Self { seed, tuning }
    }

    /// Seed of the random stream.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Behaviour tuning.
    #[must_use]
    pub const fn tuning(&self) -> PursuitTuning {
        self.tuning
    }
}

/// Pure system that plans enemy steps for each directional input.
#[derive(Debug)]
pub struct Pursuit {
    rng: ChaCha8Rng,
    tuning: PursuitTuning,
}

impl Pursuit {
    /// Creates a new pursuit system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            tuning: config.tuning,
        }
    }

    /// Emits exactly one [`Command::AdvanceTick`] for the requested direction.
    ///
    /// Enemy steps are planned against the player's current cell. Without a
    /// player no steps are planned and no randomness is consumed.
    pub fn handle(
        &mut self,
        direction: Direction,
        entities: &EntityView,
        dimensions: BoardDimensions,
        out: &mut Vec<Command>,
    ) {
        let enemy_steps = match entities.player() {
            Some(player) => {
                let target = player.cell;
                entities
                    .enemies()
                    .map(|enemy| {
                        EnemyStep::new(enemy.id, self.plan_step(enemy.cell, target, dimensions))
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        out.push(Command::AdvanceTick {
            direction,
            enemy_steps,
        });
    }

    /// Cell an enemy at `enemy` moves to this tick, given the player at `player`.
    ///
    /// Destinations that would leave the board keep the enemy in place.
    pub fn plan_step(
        &mut self,
        enemy: CellCoord,
        player: CellCoord,
        dimensions: BoardDimensions,
    ) -> CellCoord {
        let row_delta = i64::from(player.row()) - i64::from(enemy.row());
        let column_delta = i64::from(player.column()) - i64::from(enemy.column());
        let row_sign = unit(row_delta);
        let column_sign = unit(column_delta);

        let (row_step, column_step) = if row_delta.abs() <= 1 || column_delta.abs() <= 1 {
            let heading = self.heading(self.tuning.near_retreat_chance);
            (heading * row_sign, heading * column_sign)
        } else {
            let heading = self.heading(self.tuning.far_flee_chance);
            let drift = self.rng.gen_bool(self.tuning.drift_chance);
            let minor = |sign: i32| if drift { heading * sign } else { 0 };
            if row_delta.abs() > column_delta.abs() {
                (heading * row_sign, minor(column_sign))
            } else {
                (minor(row_sign), heading * column_sign)
            }
        };

        enemy
            .offset(row_step, column_step, dimensions)
            .unwrap_or(enemy)
    }

    /// `-1` when the enemy moves away from the player, `1` when it approaches.
    fn heading(&mut self, away_chance: f64) -> i32 {
        if self.rng.gen_bool(away_chance) {
            -1
        } else {
            1
        }
    }
}

fn unit(delta: i64) -> i32 {
    match delta.signum() {
        1 => 1,
        -1 => -1,
        _ => 0,
    }
}
