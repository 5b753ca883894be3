//! Random decisions standing in for real identity and registration systems.

use std::ops::RangeInclusive;
use std::sync::{Mutex, MutexGuard};

use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use memberhub_config::SimulationConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct Simulation {
    rng: Mutex<StdRng>,
    failure_rate: f64,
    user_ids: RangeInclusive<u64>,
}

impl Simulation {
    /// `failure_rate` is clamped to `[0, 1]`; an inverted id range collapses to its lower bound.
    pub fn new(failure_rate: f64, user_ids: RangeInclusive<u64>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (start, end) = user_ids.into_inner();

        Self {
            rng: Mutex::new(rng),
            failure_rate: if failure_rate.is_nan() { 0.0 } else { failure_rate.clamp(0.0, 1.0) },
            user_ids: start..=end.max(start),
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.auth_failure_rate,
            config.user_id_min..=config.user_id_max,
            config.seed,
        )
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Draw a user id from the configured range.
    pub fn next_user_id(&self) -> String {
        self.rng().gen_range(self.user_ids.clone()).to_string()
    }

    /// Roll for an injected authentication failure.
    pub fn should_reject(&self) -> bool {
        self.rng().gen_bool(self.failure_rate)
    }

    /// Made-up `(first, last)` name for a new member.
    pub fn fake_name(&self) -> (String, String) {
        let mut rng = self.rng();
        let first: String = FirstName().fake_with_rng(&mut *rng);
        let last: String = LastName().fake_with_rng(&mut *rng);
        (first, last)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_ids_stay_within_range() {
        let simulation = Simulation::new(0.0, 10..=12, Some(7));
        for _ in 0..500 {
            let id: u64 = simulation.next_user_id().parse().unwrap();
            assert!((10..=12).contains(&id), "id {id} out of range");
        }
    }

    #[test]
    fn single_value_range_is_constant() {
        let simulation = Simulation::new(0.0, 5..=5, None);
        assert_eq!(simulation.next_user_id(), "5");
    }

    #[test]
    fn rejection_rate_matches_configuration_over_large_sample() {
        let simulation = Simulation::new(0.05, 1..=1000, Some(42));
        let samples = 20_000;
        let rejected = (0..samples).filter(|_| simulation.should_reject()).count();
        let ratio = rejected as f64 / samples as f64;
        assert!((0.04..=0.06).contains(&ratio), "observed ratio {ratio}");
    }

    #[test]
    fn extreme_rates_are_deterministic() {
        let never = Simulation::new(0.0, 1..=10, None);
        let always = Simulation::new(1.0, 1..=10, None);
        for _ in 0..100 {
            assert!(!never.should_reject());
            assert!(always.should_reject());
        }
    }

    #[test]
    fn out_of_range_inputs_are_sanitised() {
        let simulation = Simulation::new(3.0, 9..=1, Some(1));
        assert_eq!(simulation.failure_rate(), 1.0);
        assert_eq!(simulation.next_user_id(), "9");

        assert_eq!(Simulation::new(f64::NAN, 1..=1, None).failure_rate(), 0.0);
    }

    #[test]
    fn seeded_simulations_repeat() {
        let a = Simulation::new(0.5, 1..=1_000_000, Some(99));
        let b = Simulation::new(0.5, 1..=1_000_000, Some(99));
        assert_eq!(a.next_user_id(), b.next_user_id());
        assert_eq!(a.fake_name(), b.fake_name());
    }

    #[test]
    fn fake_names_are_not_empty() {
        let (first, last) = Simulation::default().fake_name();
        assert!(!first.is_empty());
        assert!(!last.is_empty());
    }
}
