use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rodio::Source;
use std::f32::consts::PI;
use std::time::Duration;

use crate::theme::CueSpec;

/// Endless stereo cue tone.
///
/// Interleaves the spec's two frequencies across the channels so the
/// small offset is heard as a slow beat, and mixes in a brown-noise bed
/// when the spec asks for one.
pub struct CueTone {
    spec: CueSpec,
    sample_rate: u32,
    num_sample: usize,
    noise_last: f32,
    rng: StdRng,
}

impl CueTone {
    pub fn new(spec: CueSpec) -> Self {
        Self {
            spec,
            sample_rate: 44100,
            num_sample: 0,
            noise_last: 0.0,
            rng: StdRng::from_entropy(),
        }
    }

    // Brown noise: integrate white noise, clamp against drift, decay
    // against DC buildup.
    fn noise_sample(&mut self) -> f32 {
        let white = self.rng.gen_range(-1.0..1.0);
        self.noise_last += white * 0.02;
        self.noise_last = self.noise_last.clamp(-1.0, 1.0);
        self.noise_last *= 0.9999;
        self.noise_last
    }
}

impl Iterator for CueTone {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        self.num_sample = self.num_sample.wrapping_add(1);
        let t = self.num_sample as f32 / self.sample_rate as f32;

        // Even samples go left, odd samples right (stereo interleaved).
        let freq = if self.num_sample % 2 == 0 {
            self.spec.base_freq
        } else {
            self.spec.beat_freq
        };
        let tone = (2.0 * PI * freq * t).sin();

        let mix = self.spec.noise_level.clamp(0.0, 1.0);
        let sample = if mix > 0.0 {
            tone * (1.0 - mix) + self.noise_sample() * mix
        } else {
            tone
        };

        // Lower amplitude to prevent clipping
        Some(sample * 0.2)
    }
}

impl Source for CueTone {
    fn current_frame_len(&self) -> Option<usize> {
        None // Infinite stream
    }

    fn channels(&self) -> u16 {
        2
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None // Loops until stopped
    }
}
