use std::{path::PathBuf, time::Duration};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::RecvTimeoutError;
use thiserror::Error;

mod audio_source;
mod global_sound;
mod wav;

pub use audio_source::AudioSourceDecoded;
pub use global_sound::GlobalSound;
pub use wav::{decode_wav, load_wav};

// Allows the device buffer to drain after the last frame is queued
const PLAYBACK_TAIL: Duration = Duration::from_millis(250);

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("alarm sound file {} not found", .0.to_string_lossy())]
    NotFound(PathBuf),
    #[error("could not decode {}: {source}", .path.to_string_lossy())]
    Decode {
        path: PathBuf,
        source: hound::Error,
    },
    #[error("unsupported channel count {0}, expected mono or stereo")]
    UnsupportedChannels(u32),
    #[error("no audio output device available")]
    NoOutputDevice,
    #[error(transparent)]
    DefaultStreamConfig(#[from] cpal::DefaultStreamConfigError),
    #[error(transparent)]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error(transparent)]
    PlayStream(#[from] cpal::PlayStreamError),
    #[error("audio stream error: {0}")]
    Stream(#[from] cpal::StreamError),
}

pub trait SoundPlayer {
    fn play(&self, audio_source: &AudioSourceDecoded) -> Result<(), AudioError>;
}

/// Plays through the default output device, blocking until the sound ends.
pub struct DevicePlayer {
    volume: f32,
}

impl DevicePlayer {
    pub fn new(volume: f32) -> Self {
        Self { volume }
    }
}

impl SoundPlayer for DevicePlayer {
    fn play(&self, audio_source: &AudioSourceDecoded) -> Result<(), AudioError> {
        let mut output = AudioOutput::new(self.volume)?;
        output.play(audio_source)
    }
}

/// Used when sound output is disabled, only reports what would have played.
#[derive(Default)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play(&self, audio_source: &AudioSourceDecoded) -> Result<(), AudioError> {
        log::info!(
            "Sound disabled, simulating {:.1}s of alarm sound",
            audio_source.duration().as_secs_f32()
        );
        Ok(())
    }
}

pub struct AudioOutput {
    mixer: oddio::Handle<oddio::Mixer<[f32; 2]>>,
    error_rx: crossbeam_channel::Receiver<cpal::StreamError>,
    volume: f32,
    _stream: cpal::Stream,
}

impl AudioOutput {
    pub fn new(volume: f32) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        let sample_rate = device.default_output_config()?.sample_rate();
        let config = cpal::StreamConfig {
            channels: 2,
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        let (mixer_handle, mixer) = oddio::split(oddio::Mixer::new());
        let (error_tx, error_rx) = crossbeam_channel::unbounded();

        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let frames = oddio::frame_stereo(data);
                oddio::run(&mixer, sample_rate.0, frames);
            },
            move |err| {
                log::error!("Audio stream error: {}", err);
                error_tx.send(err).ok();
            },
            None,
        )?;
        stream.play()?;

        log::info!(
            "Opened audio device {} at {} Hz",
            device.name().unwrap_or_else(|_| "<unknown>".into()),
            sample_rate.0
        );

        Ok(Self {
            mixer: mixer_handle,
            error_rx,
            volume,
            _stream: stream,
        })
    }

    pub fn play(&mut self, audio_source: &AudioSourceDecoded) -> Result<(), AudioError> {
        let mut sound = GlobalSound::play(&mut self.mixer, audio_source, self.volume);

        match self.error_rx.recv_timeout(sound.duration() + PLAYBACK_TAIL) {
            Ok(error) => {
                sound.stop();
                Err(AudioError::Stream(error))
            }
            // The sender lives in the error callback of _stream, so it cannot disconnect here
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => Ok(()),
        }
    }
}
