//! Procedural sound effects
//!
//! No sound assets: the rock-break cue is synthesized once at startup
//! (filtered noise with an exponential decay) and pushed through an SDL2
//! audio queue on demand. If the audio device can't be opened the game runs
//! silently; a missing device never fails a tick.

use rand::Rng;
use sdl2::AudioSubsystem;
use sdl2::audio::{AudioQueue, AudioSpecDesired};

const SAMPLE_RATE: i32 = 44_100;
const BREAK_DURATION: f32 = 0.35;

pub struct SoundBank {
    queue: AudioQueue<i16>,
    rock_break: Vec<i16>,
}

impl SoundBank {
    /// Opens the audio device and pre-renders the effect samples.
    pub fn new(audio: &AudioSubsystem) -> Result<Self, String> {
        let spec = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };

        let queue = audio.open_queue::<i16, _>(None, &spec)?;
        queue.resume();

        Ok(SoundBank {
            queue,
            rock_break: synthesize_rock_break(),
        })
    }

    /// Fire-and-forget destruction cue.
    pub fn play_rock_break(&self) {
        // Dropped cues are fine; never propagate audio failures into the loop
        let _ = self.queue.queue_audio(&self.rock_break);
    }
}

/// Low-pass filtered noise burst with an exponential decay, so it reads as a dull crack
/// rather than a hiss.
fn synthesize_rock_break() -> Vec<i16> {
    let mut rng = rand::thread_rng();
    let sample_count = (SAMPLE_RATE as f32 * BREAK_DURATION) as usize;
    let mut samples = Vec::with_capacity(sample_count);

    let mut filtered = 0.0f32;
    for i in 0..sample_count {
        let t = i as f32 / sample_count as f32;
        let envelope = (-6.0 * t).exp();

        let noise: f32 = rng.gen_range(-1.0..1.0);
        // One-pole low-pass keeps the rumble, drops the fizz
        filtered += 0.18 * (noise - filtered);

        samples.push((filtered * envelope * i16::MAX as f32 * 0.8) as i16);
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rock_break_length_and_decay() {
        let samples = synthesize_rock_break();
        assert_eq!(
            samples.len(),
            (SAMPLE_RATE as f32 * BREAK_DURATION) as usize
        );

        // The tail must be much quieter than the attack
        let head: i32 = samples[..2000].iter().map(|s| (*s as i32).abs()).sum();
        let tail: i32 = samples[samples.len() - 2000..]
            .iter()
            .map(|s| (*s as i32).abs())
            .sum();
        assert!(head > tail * 4);
    }
}
