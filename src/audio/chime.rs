use rodio::Source;
use std::f32::consts::PI;
use std::time::Duration;

/// Two-tone "ding" with an exponential decay.
pub struct Chime {
    low_freq: f32,
    high_freq: f32,
    sample_rate: u32,
    num_sample: usize,
    total_samples: usize,
}

impl Chime {
    pub fn new(low_freq: f32, high_freq: f32, length: Duration) -> Self {
        let sample_rate = 44100;
        Self {
            low_freq,
            high_freq,
            sample_rate,
            num_sample: 0,
            total_samples: (length.as_secs_f32() * sample_rate as f32) as usize,
        }
    }
}

impl Default for Chime {
    fn default() -> Self {
        Self::new(660.0, 990.0, Duration::from_millis(900))
    }
}

impl Iterator for Chime {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num_sample >= self.total_samples {
            return None;
        }
        self.num_sample += 1;

        let t = self.num_sample as f32 / self.sample_rate as f32;
        let envelope = (-4.0 * t).exp();

        // High tone enters a quarter of the way in
        let high = if t > 0.15 {
            (2.0 * PI * self.high_freq * t).sin()
        } else {
            0.0
        };
        let low = (2.0 * PI * self.low_freq * t).sin();

        Some((low * 0.6 + high * 0.4) * envelope * 0.3)
    }
}

impl Source for Chime {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_samples.saturating_sub(self.num_sample))
    }

    fn channels(&self) -> u16 {
        1 // Mono
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(
            self.total_samples as f32 / self.sample_rate as f32,
        ))
    }
}
