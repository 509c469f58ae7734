// SPDX-License-Identifier: MPL-2.0
//! Alarm/timer chime playback using cpal.
//!
//! Opening an audio output stream is a privileged, sometimes user-visible
//! act, so it only happens on an explicit [`Chime::prime`] triggered by a
//! user gesture (arming the alarm, starting the timer). The stream lives on
//! a dedicated thread that owns the `cpal::Stream`; the rest of the app
//! talks to it through a command channel and never blocks on audio.
//!
//! Audio failures are absorbed here: a deck without sound keeps working.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::error::{Error, Result};

/// Tone frequency of the chime.
const CHIME_FREQ_HZ: f32 = 880.0;

/// Length of one ring, in seconds.
const CHIME_SECONDS: f32 = 0.6;

/// Peak amplitude, well below clipping.
const CHIME_GAIN: f32 = 0.4;

/// Commands handled by the audio thread.
#[derive(Debug)]
enum ChimeCommand {
    /// Open the output stream if it is not open yet.
    Prime,

    /// Play one chime from the start.
    Ring,
}

/// Handle to the chime player.
///
/// `prime` is idempotent and cheap to call on every arming gesture; `ring`
/// is audible only once priming has succeeded.
pub struct Chime {
    command_tx: mpsc::UnboundedSender<ChimeCommand>,
    primed: Arc<AtomicBool>,
}

impl Chime {
    /// Spawns the audio thread. No stream is opened until [`prime`].
    ///
    /// [`prime`]: Self::prime
    pub fn new() -> Self {
        let (command_tx, mut command_rx) = mpsc::unbounded_channel::<ChimeCommand>();
        let primed = Arc::new(AtomicBool::new(false));
        let primed_for_thread = Arc::clone(&primed);

        std::thread::Builder::new()
            .name("chime-audio".to_string())
            .spawn(move || {
                let mut output: Option<ChimeOutput> = None;
                while let Some(command) = command_rx.blocking_recv() {
                    match command {
                        ChimeCommand::Prime => {
                            if output.is_none() {
                                match ChimeOutput::new() {
                                    Ok(opened) => {
                                        output = Some(opened);
                                        primed_for_thread.store(true, Ordering::SeqCst);
                                    }
                                    Err(err) => {
                                        eprintln!("Failed to open audio output: {err}");
                                    }
                                }
                            }
                        }
                        ChimeCommand::Ring => {
                            if let Some(output) = &output {
                                output.ring();
                            }
                        }
                    }
                }
                // Channel closed: thread ends, stream drops with it.
            })
            .expect("failed to spawn audio thread");

        Self { command_tx, primed }
    }

    /// Unlocks audio on a user gesture. Safe to call repeatedly; only the
    /// first successful call opens a stream.
    pub fn prime(&self) {
        let _ = self.command_tx.send(ChimeCommand::Prime);
    }

    /// Whether a prior [`prime`](Self::prime) has opened the output stream.
    pub fn is_primed(&self) -> bool {
        self.primed.load(Ordering::SeqCst)
    }

    /// Plays the chime. Silently does nothing when unprimed.
    pub fn ring(&self) {
        let _ = self.command_tx.send(ChimeCommand::Ring);
    }
}

impl Default for Chime {
    fn default() -> Self {
        Self::new()
    }
}

/// The open output stream plus the countdown the render callback consumes.
struct ChimeOutput {
    /// Samples left to render of the current ring; zero means silence.
    remaining: Arc<AtomicU32>,
    total_samples: u32,
    _stream: cpal::Stream,
}

impl ChimeOutput {
    fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("No audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Audio(format!("Failed to get audio config: {e}")))?;

        let sample_rate = supported_config.sample_rate().0;
        let channels = supported_config.channels();
        let total_samples = chime_total_samples(sample_rate);

        let remaining = Arc::new(AtomicU32::new(0));
        let remaining_clone = Arc::clone(&remaining);

        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(
                &device,
                &supported_config.into(),
                remaining_clone,
                sample_rate,
                channels,
                total_samples,
            )?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(
                &device,
                &supported_config.into(),
                remaining_clone,
                sample_rate,
                channels,
                total_samples,
            )?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(
                &device,
                &supported_config.into(),
                remaining_clone,
                sample_rate,
                channels,
                total_samples,
            )?,
            _ => return Err(Error::Audio("Unsupported audio sample format".to_string())),
        };

        stream
            .play()
            .map_err(|e| Error::Audio(format!("Failed to start audio stream: {e}")))?;

        Ok(Self {
            remaining,
            total_samples,
            _stream: stream,
        })
    }

    /// Restarts the envelope from the top.
    fn ring(&self) {
        self.remaining.store(self.total_samples, Ordering::Relaxed);
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        remaining: Arc<AtomicU32>,
        sample_rate: u32,
        channels: u16,
        total_samples: u32,
    ) -> Result<cpal::Stream> {
        let channels = channels as usize;
        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let mut left = remaining.load(Ordering::Relaxed);
                    for frame in data.chunks_mut(channels) {
                        let value = if left > 0 {
                            let sample =
                                chime_sample(total_samples - left, sample_rate, total_samples);
                            left -= 1;
                            sample
                        } else {
                            0.0
                        };
                        for sample in frame.iter_mut() {
                            *sample = T::from_sample(value);
                        }
                    }
                    remaining.store(left, Ordering::Relaxed);
                },
                |err| {
                    eprintln!("Audio output error: {err}");
                },
                None,
            )
            .map_err(|e| Error::Audio(format!("Failed to build audio stream: {e}")))?;

        Ok(stream)
    }
}

/// Number of samples one ring lasts at the given rate.
fn chime_total_samples(sample_rate: u32) -> u32 {
    (CHIME_SECONDS * sample_rate as f32) as u32
}

/// One sample of the chime: a sine tone under an exponential decay.
fn chime_sample(frame_index: u32, sample_rate: u32, total_samples: u32) -> f32 {
    if frame_index >= total_samples || sample_rate == 0 {
        return 0.0;
    }
    let t = frame_index as f32 / sample_rate as f32;
    let envelope = (-6.0 * t).exp();
    (std::f32::consts::TAU * CHIME_FREQ_HZ * t).sin() * envelope * CHIME_GAIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chime_lasts_just_over_half_a_second() {
        assert_eq!(chime_total_samples(48_000), 28_800);
        assert_eq!(chime_total_samples(44_100), 26_460);
    }

    #[test]
    fn chime_samples_stay_within_gain_bounds() {
        let total = chime_total_samples(48_000);
        for index in (0..total).step_by(97) {
            let sample = chime_sample(index, 48_000, total);
            assert!(sample.abs() <= CHIME_GAIN, "sample {index} out of range");
        }
    }

    #[test]
    fn chime_envelope_decays_over_time() {
        let total = chime_total_samples(48_000);
        let early_peak: f32 = (0..4_800)
            .map(|i| chime_sample(i, 48_000, total).abs())
            .fold(0.0, f32::max);
        let late_peak: f32 = (total - 4_800..total)
            .map(|i| chime_sample(i, 48_000, total).abs())
            .fold(0.0, f32::max);
        assert!(late_peak < early_peak / 4.0);
    }

    #[test]
    fn chime_is_silent_past_the_envelope() {
        let total = chime_total_samples(48_000);
        assert_eq!(chime_sample(total, 48_000, total), 0.0);
        assert_eq!(chime_sample(total + 1, 48_000, total), 0.0);
    }

    #[test]
    fn ringing_before_priming_is_harmless() {
        let chime = Chime::new();
        assert!(!chime.is_primed());
        chime.ring();
        assert!(!chime.is_primed());
    }
}
