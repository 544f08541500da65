use crate::core::traits::ChimeBackend;
use anyhow::Result;
use rodio::source::{SineWave, Source, Zero};
use rodio::{OutputStream, Sink};
use std::time::Duration;

/// Ascending tone frequencies (A5, B5, C6)
const CHIME_FREQUENCIES: [f32; 3] = [880.0, 988.0, 1047.0];

const TONE_LENGTH: Duration = Duration::from_millis(120);
const TONE_SPACING: Duration = Duration::from_millis(160);
const ATTACK: Duration = Duration::from_millis(20);
const LEAD_IN: Duration = Duration::from_millis(20);
const PEAK_GAIN: f32 = 0.12;

const SAMPLE_RATE: u32 = 48_000;

pub struct RodioChime {
    sink: Sink,
}

impl RodioChime {
    pub fn new() -> Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default()?;

        // This keeps the audio engine running globally for the life of the program
        // without binding it to this struct.
        // If we simply dropped it, sound would stop.
        std::mem::forget(stream);

        let sink = Sink::try_new(&stream_handle)?;

        Ok(Self { sink })
    }
}

impl ChimeBackend for RodioChime {
    fn play_chime(&mut self) -> Result<()> {
        // A chime still ringing from a previous completion is cut off.
        self.sink.stop();

        self.sink.append(Zero::<f32>::new(1, SAMPLE_RATE).take_duration(LEAD_IN));
        for (index, freq) in CHIME_FREQUENCIES.iter().enumerate() {
            let tone = SineWave::new(*freq)
                .take_duration(TONE_LENGTH)
                .fade_in(ATTACK)
                .amplify(PEAK_GAIN);
            self.sink.append(tone);

            if index + 1 < CHIME_FREQUENCIES.len() {
                let gap = TONE_SPACING - TONE_LENGTH;
                self.sink.append(Zero::<f32>::new(1, SAMPLE_RATE).take_duration(gap));
            }
        }

        self.sink.play();
        Ok(())
    }
}

// To avoid leaks
impl Drop for RodioChime {
    fn drop(&mut self) {
        self.sink.stop();
    }
}
