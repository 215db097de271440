//! Bounce cues
//!
//! Cue requests are sampled: whatever key was requested last is played at
//! most once per sampling window, the rest are dropped.

use crate::consts::BEEP_DURATION_MS;
use crate::error::SinkError;
use crate::platform::SampleGrid;

/// A short square-wave tone ready for synthesis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Piano key number (49 = A4)
    pub key: u8,
    pub frequency_hz: f32,
    pub duration_ms: u64,
}

impl Tone {
    pub fn beep(key: u8) -> Self {
        Self {
            key,
            frequency_hz: piano_key_frequency(key),
            duration_ms: BEEP_DURATION_MS,
        }
    }
}

/// Frequency of a piano key: `440 * 2^((key - 49) / 12)`
#[inline]
pub fn piano_key_frequency(key: u8) -> f32 {
    440.0 * 2f32.powf((key as f32 - 49.0) / 12.0)
}

/// Something that can synthesize tones
pub trait AudioSink {
    fn play(&mut self, tone: Tone) -> Result<(), SinkError>;
}

/// Sink that only logs what it would play
#[derive(Debug, Default)]
pub struct LogAudio {
    played: u64,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, tone: Tone) -> Result<(), SinkError> {
        self.played += 1;
        log::debug!(
            "beep key {} ({:.1} Hz, {} ms)",
            tone.key,
            tone.frequency_hz,
            tone.duration_ms
        );
        Ok(())
    }
}

/// Sampling rate limiter in front of an audio sink
#[derive(Debug)]
pub struct Beeper {
    grid: SampleGrid,
    pending: Option<u8>,
    muted: bool,
}

impl Beeper {
    pub fn new(period_ms: u64) -> Self {
        Self {
            grid: SampleGrid::new(period_ms),
            pending: None,
            muted: false,
        }
    }

    /// Mute/unmute; muted requests are dropped
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.pending = None;
        }
    }

    /// Request a cue; replaces any request not yet sampled
    pub fn request(&mut self, key: u8) {
        if !self.muted {
            self.pending = Some(key);
        }
    }

    /// Sample at `now_ms`; yields the pending key once per window
    pub fn sample(&mut self, now_ms: u64) -> Option<u8> {
        if !self.grid.due(now_ms) {
            return None;
        }
        self.pending.take()
    }

    /// Sample and hand any due tone to `sink`
    ///
    /// Sink failures are logged and dropped; cues are fire-and-forget.
    pub fn flush<A: AudioSink + ?Sized>(&mut self, now_ms: u64, sink: &mut A) -> Option<Tone> {
        let tone = Tone::beep(self.sample(now_ms)?);
        if let Err(e) = sink.play(tone) {
            log::warn!("Dropped beep: {}", e);
        }
        Some(tone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        tones: Vec<Tone>,
        fail: bool,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, tone: Tone) -> Result<(), SinkError> {
            if self.fail {
                return Err(SinkError::Disconnected("audio"));
            }
            self.tones.push(tone);
            Ok(())
        }
    }

    #[test]
    fn test_piano_key_frequency() {
        assert!((piano_key_frequency(49) - 440.0).abs() < 1e-3);
        assert!((piano_key_frequency(61) - 880.0).abs() < 1e-2);
        assert!((piano_key_frequency(40) - 261.6256).abs() < 1e-2);
    }

    #[test]
    fn test_sampling_coalesces() {
        let mut beeper = Beeper::new(100);
        assert_eq!(beeper.sample(0), None);

        beeper.request(40);
        beeper.request(42);
        assert_eq!(beeper.sample(50), None);
        assert_eq!(beeper.sample(100), Some(42));

        // Nothing new since the last sample
        assert_eq!(beeper.sample(200), None);

        beeper.request(40);
        assert_eq!(beeper.sample(250), None);
        assert_eq!(beeper.sample(300), Some(40));
    }

    #[test]
    fn test_sampling_skips_missed_windows() {
        let mut beeper = Beeper::new(100);
        beeper.sample(0);
        beeper.request(40);
        assert_eq!(beeper.sample(750), Some(40));
        beeper.request(41);
        assert_eq!(beeper.sample(799), None);
        assert_eq!(beeper.sample(800), Some(41));
    }

    #[test]
    fn test_muted_drops_requests() {
        let mut beeper = Beeper::new(100);
        beeper.sample(0);
        beeper.request(40);
        beeper.set_muted(true);
        beeper.request(41);
        assert_eq!(beeper.sample(100), None);
    }

    #[test]
    fn test_flush_ignores_sink_failure() {
        let mut beeper = Beeper::new(100);
        let mut sink = Recorder {
            fail: true,
            ..Default::default()
        };
        beeper.sample(0);
        beeper.request(40);
        let tone = beeper.flush(100, &mut sink).expect("tone sampled");
        assert_eq!(tone.key, 40);
        assert_eq!(tone.duration_ms, 100);
        assert!(sink.tones.is_empty());

        sink.fail = false;
        beeper.request(40);
        beeper.flush(200, &mut sink);
        assert_eq!(sink.tones.len(), 1);
    }
}
