use std::{io::Read, path::Path};

use hound::WavReader;

use super::{audio_source::AudioSourceDecoded, AudioError};

pub fn load_wav(path: &Path) -> Result<AudioSourceDecoded, AudioError> {
    if !path.exists() {
        return Err(AudioError::NotFound(path.to_path_buf()));
    }

    let decode_error = |source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    };
    let reader = WavReader::open(path).map_err(decode_error)?;
    let decoded = decode_wav(reader).map_err(decode_error)?;

    if !matches!(decoded.channel_count, 1 | 2) {
        return Err(AudioError::UnsupportedChannels(decoded.channel_count));
    }

    log::info!(
        "Loaded {} ({} channels, {} Hz, {:.1}s)",
        path.to_string_lossy(),
        decoded.channel_count,
        decoded.sample_rate,
        decoded.duration().as_secs_f32()
    );
    Ok(decoded)
}

pub fn decode_wav<R: Read>(mut reader: WavReader<R>) -> Result<AudioSourceDecoded, hound::Error> {
    let hound::WavSpec {
        bits_per_sample,
        sample_format,
        sample_rate,
        channels,
    } = reader.spec();

    let samples = match sample_format {
        hound::SampleFormat::Int => {
            let max_value = 2_u32.pow(bits_per_sample as u32 - 1) - 1;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|sample| sample as f32 / max_value as f32))
                .collect::<Result<Vec<f32>, _>>()?
        }
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<f32>, _>>()?,
    };

    Ok(AudioSourceDecoded {
        samples,
        channel_count: channels as u32,
        sample_rate,
    })
}
