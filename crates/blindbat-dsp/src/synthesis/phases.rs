//! Phase sources for spectrum randomisation.

use std::f32::consts::TAU;

use rand::Rng;
use rand_pcg::Pcg32;

/// Supplies one phase (radians, nominally in `[0, 2π)`) per randomised bin.
pub trait PhaseSource {
    /// Draws the next phase.
    fn next_phase(&mut self) -> f32;
}

impl PhaseSource for Pcg32 {
    fn next_phase(&mut self) -> f32 {
        TAU * self.gen::<f32>()
    }
}

/// Replays a fixed list of phases, cycling when exhausted.
///
/// Used to make spectra predictable in tests and golden renders.
#[derive(Debug, Clone)]
pub struct FixedPhases {
    phases: Vec<f32>,
    next: usize,
}

impl FixedPhases {
    /// Creates a source that cycles through `phases`. An empty list yields 0.
    pub fn new(phases: Vec<f32>) -> Self {
        Self { phases, next: 0 }
    }

    /// Creates a source that always returns `phase`.
    pub fn constant(phase: f32) -> Self {
        Self::new(vec![phase])
    }

    /// Number of phases drawn so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl PhaseSource for FixedPhases {
    fn next_phase(&mut self) -> f32 {
        let phase = if self.phases.is_empty() {
            0.0
        } else {
            self.phases[self.next % self.phases.len()]
        };
        self.next += 1;
        phase
    }
}
