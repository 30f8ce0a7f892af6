use std::time::Duration;

use super::audio_source::AudioSourceDecoded;

enum ControlHandle {
    Stereo(oddio::Handle<oddio::Stop<oddio::Gain<oddio::FramesSignal<[f32; 2]>>>>),
    Mono(oddio::Handle<oddio::Stop<oddio::MonoToStereo<oddio::Gain<oddio::FramesSignal<f32>>>>>),
}

impl ControlHandle {
    pub fn gain_control(&mut self) -> oddio::GainControl {
        match self {
            ControlHandle::Stereo(handle) => handle.control::<oddio::Gain<_>, _>(),
            ControlHandle::Mono(handle) => handle.control::<oddio::Gain<_>, _>(),
        }
    }

    pub fn stop_control(&mut self) -> oddio::StopControl {
        match self {
            ControlHandle::Stereo(handle) => handle.control::<oddio::Stop<_>, _>(),
            ControlHandle::Mono(handle) => handle.control::<oddio::Stop<_>, _>(),
        }
    }
}

/// A non-spatial sound playing on the root mixer.
pub struct GlobalSound {
    control_handle: ControlHandle,
    duration: Duration,
}

impl GlobalSound {
    pub fn play(
        mixer: &mut oddio::Handle<oddio::Mixer<[f32; 2]>>,
        audio_source: &AudioSourceDecoded,
        volume: f32,
    ) -> Self {
        let sample_rate = audio_source.sample_rate;

        let mut control_handle = if audio_source.channel_count == 2 {
            let mut samples = audio_source.samples.clone();
            samples.truncate(samples.len() & !1);
            let frames = oddio::Frames::from_slice(sample_rate, oddio::frame_stereo(&mut samples));
            let signal = oddio::Gain::new(oddio::FramesSignal::from(frames));
            ControlHandle::Stereo(mixer.control().play(signal))
        } else {
            let frames = oddio::Frames::from_slice(sample_rate, &audio_source.samples);
            let signal = oddio::Gain::new(oddio::FramesSignal::from(frames));
            ControlHandle::Mono(mixer.control().play(oddio::MonoToStereo::new(signal)))
        };

        control_handle
            .gain_control()
            .set_amplitude_ratio(volume.clamp(0.0, 1.0));

        Self {
            control_handle,
            duration: audio_source.duration(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn stop(&mut self) {
        self.control_handle.stop_control().stop();
    }
}
