// --- File: genetics.rs ---
use crate::config::CreatureConfig;
use crate::error::{SimError, SimResult};
use rand::Rng;

/// Food source a creature is drawn with. Only affects appearance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Diet {
    Herbivore,
    Carnivorous,
    Sun,
}

impl Diet {
    pub const ALL: [Diet; 3] = [Diet::Herbivore, Diet::Carnivorous, Diet::Sun];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Per-creature parameters fixed at birth.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Genetics {
    spawn_interval: u32,
    max_lifespan: u32,
    max_speed: f32,
    max_turn_rate: f32,
    max_size: f32,
}

impl Genetics {
    /// Builds a genome, rejecting values that would break the tick arithmetic.
    /// A lifespan of zero is legal: such a creature starts dying immediately.
    pub fn new(
        spawn_interval: u32,
        max_lifespan: u32,
        max_speed: f32,
        max_turn_rate: f32,
        max_size: f32,
    ) -> SimResult<Self> {
        if spawn_interval == 0 {
            return Err(SimError::InvalidGenetics {
                field: "spawn_interval",
                value: 0.0,
            });
        }
        for (field, value) in [
            ("max_speed", max_speed),
            ("max_turn_rate", max_turn_rate),
            ("max_size", max_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidGenetics {
                    field,
                    value: value as f64,
                });
            }
        }
        Ok(Self {
            spawn_interval,
            max_lifespan,
            max_speed,
            max_turn_rate,
            max_size,
        })
    }

    /// Draws every gene uniformly from the ranges in `config`.
    pub fn random<R: Rng + ?Sized>(config: &CreatureConfig, rng: &mut R) -> SimResult<Self> {
        config.validate()?;
        Self::new(
            rng.gen_range(config.min_spawn_interval..=config.max_spawn_interval),
            rng.gen_range(config.min_lifespan..=config.max_lifespan),
            rng.gen_range(config.min_speed..=config.max_speed),
            rng.gen_range(config.min_turn_rate..=config.max_turn_rate),
            rng.gen_range(config.min_size..=config.max_size),
        )
    }

    pub fn spawn_interval(&self) -> u32 {
        self.spawn_interval
    }

    pub fn max_lifespan(&self) -> u32 {
        self.max_lifespan
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn max_turn_rate(&self) -> f32 {
        self.max_turn_rate
    }

    pub fn max_size(&self) -> f32 {
        self.max_size
    }

    /// Size at `age`: grows linearly over the first third of a spawn interval,
    /// never below half of `max_size` and never above it.
    pub fn scale_at(&self, age: u64) -> f32 {
        let growth_ticks = self.spawn_interval as f32 / 3.0;
        (self.max_size * (age as f32 / growth_ticks)).clamp(self.max_size / 2.0, self.max_size)
    }

    /// True when a creature that has lived `ticks_lived` ticks should reproduce.
    pub fn is_spawn_tick(&self, ticks_lived: u64) -> bool {
        ticks_lived % self.spawn_interval as u64 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rejects_zero_spawn_interval() {
        let err = Genetics::new(0, 100, 1.0, 1.0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidGenetics {
                field: "spawn_interval",
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_positive_reals() {
        assert!(Genetics::new(5, 100, 0.0, 1.0, 1.0).is_err());
        assert!(Genetics::new(5, 100, 1.0, -2.0, 1.0).is_err());
        assert!(Genetics::new(5, 100, 1.0, 1.0, f32::INFINITY).is_err());
    }

    #[test]
    fn zero_lifespan_is_allowed() {
        assert!(Genetics::new(5, 0, 1.0, 1.0, 1.0).is_ok());
    }

    #[test]
    fn random_genetics_stay_in_configured_ranges() {
        let config = CreatureConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let genetics = Genetics::random(&config, &mut rng).unwrap();
            assert!((config.min_spawn_interval..=config.max_spawn_interval)
                .contains(&genetics.spawn_interval()));
            assert!((config.min_lifespan..=config.max_lifespan).contains(&genetics.max_lifespan()));
            assert!((config.min_speed..=config.max_speed).contains(&genetics.max_speed()));
            assert!(
                (config.min_turn_rate..=config.max_turn_rate).contains(&genetics.max_turn_rate())
            );
            assert!((config.min_size..=config.max_size).contains(&genetics.max_size()));
        }
    }

    #[test]
    fn random_genetics_refuse_invalid_config() {
        let config = CreatureConfig {
            min_spawn_interval: 0,
            ..CreatureConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Genetics::random(&config, &mut rng).is_err());
    }

    #[test]
    fn scale_grows_from_half_to_full_size() {
        let genetics = Genetics::new(30, 1000, 1.0, 1.0, 0.8).unwrap();
        assert_eq!(genetics.scale_at(0), 0.4);
        assert_eq!(genetics.scale_at(5), 0.4);
        // Past the half-size floor the curve is linear until it saturates at age 10.
        assert!((genetics.scale_at(7) - 0.56).abs() < 1e-6);
        assert_eq!(genetics.scale_at(10), 0.8);
        assert_eq!(genetics.scale_at(10_000), 0.8);
    }

    #[test]
    fn spawn_ticks_repeat_every_interval() {
        let genetics = Genetics::new(4, 1000, 1.0, 1.0, 1.0).unwrap();
        let ticks: Vec<u64> = (1..=13).filter(|&t| genetics.is_spawn_tick(t)).collect();
        assert_eq!(ticks, vec![4, 8, 12]);
    }

    #[test]
    fn every_diet_is_drawn() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = [false; 3];
        for _ in 0..100 {
            let diet = Diet::random(&mut rng);
            let index = Diet::ALL.iter().position(|d| *d == diet).unwrap();
            seen[index] = true;
        }
        assert_eq!(seen, [true; 3]);
    }
}
// --- End of File: genetics.rs ---
