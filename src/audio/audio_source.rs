use std::time::Duration;

/// Fully decoded interleaved samples, ready to hand to the mixer.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioSourceDecoded {
    pub samples: Vec<f32>,
    pub channel_count: u32,
    pub sample_rate: u32,
}

impl AudioSourceDecoded {
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channel_count.max(1) as usize
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }

        Duration::from_secs_f64(self.frame_count() as f64 / self.sample_rate as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stereo_duration_counts_frames() {
        let source = AudioSourceDecoded {
            samples: vec![0.0; 44100 * 2],
            channel_count: 2,
            sample_rate: 44100,
        };
        assert_eq!(source.frame_count(), 44100);
        assert_eq!(source.duration(), Duration::from_secs(1));
    }

    #[test]
    fn zero_sample_rate_has_no_duration() {
        let source = AudioSourceDecoded {
            samples: vec![0.0; 16],
            channel_count: 1,
            sample_rate: 0,
        };
        assert_eq!(source.duration(), Duration::ZERO);
    }
}
