//! Analysis policy: what "analyzing" an accessible log means. Swappable behind [`AnalysisPolicy`].

use rand::{Rng, RngCore};
use std::ops::RangeInclusive;
use std::thread;
use std::time::Duration;

use crate::LogDescriptor;
use crate::error::ClassifiedError;
use crate::utils::config::SimulationConsts;

/// Turns an accessible descriptor into success or a [`ClassifiedError::ParsingFailure`].
///
/// Implementations must depend only on the descriptor and the supplied RNG, and must be callable
/// from many threads at once. Any `Fn(&LogDescriptor, &mut dyn RngCore) -> Result<(), ClassifiedError>`
/// closure that is `Send + Sync` is a policy.
pub trait AnalysisPolicy: Send + Sync {
    fn analyze(&self, descriptor: &LogDescriptor, rng: &mut dyn RngCore)
    -> Result<(), ClassifiedError>;
}

impl<F> AnalysisPolicy for F
where
    F: Fn(&LogDescriptor, &mut dyn RngCore) -> Result<(), ClassifiedError> + Send + Sync,
{
    fn analyze(
        &self,
        descriptor: &LogDescriptor,
        rng: &mut dyn RngCore,
    ) -> Result<(), ClassifiedError> {
        self(descriptor, rng)
    }
}

/// Stand-in policy: sleeps a uniform random delay, then fails with a fixed probability.
#[derive(Clone, Debug)]
pub struct SimulatedPolicy {
    delay_ms: RangeInclusive<u64>,
    failure_probability: f64,
}

impl Default for SimulatedPolicy {
    fn default() -> Self {
        Self {
            delay_ms: SimulationConsts::DELAY_MS,
            failure_probability: SimulationConsts::FAILURE_PROBABILITY,
        }
    }
}

impl SimulatedPolicy {
    /// `failure_probability` is clamped to `[0, 1]`; NaN means never fail.
    pub fn new(delay_ms: RangeInclusive<u64>, failure_probability: f64) -> Self {
        let failure_probability = if failure_probability.is_nan() {
            0.0
        } else {
            failure_probability.clamp(0.0, 1.0)
        };
        Self {
            delay_ms,
            failure_probability,
        }
    }

    pub fn delay_ms(&self) -> &RangeInclusive<u64> {
        &self.delay_ms
    }

    pub fn failure_probability(&self) -> f64 {
        self.failure_probability
    }
}

impl AnalysisPolicy for SimulatedPolicy {
    fn analyze(
        &self,
        descriptor: &LogDescriptor,
        rng: &mut dyn RngCore,
    ) -> Result<(), ClassifiedError> {
        if !self.delay_ms.is_empty() {
            let ms = rng.gen_range(self.delay_ms.clone());
            thread::sleep(Duration::from_millis(ms));
        }
        if rng.gen_bool(self.failure_probability) {
            return Err(ClassifiedError::parsing_failure(
                &descriptor.id,
                &descriptor.path,
                SimulationConsts::FAILURE_REASON,
            ));
        }
        Ok(())
    }
}
