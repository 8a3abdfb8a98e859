//! core/playback/media.rs
//! Media decoding (Symphonia) -> rodio::Source, with in-place seeking.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use rodio::Source;
use rodio::source::SeekError;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, CodecParameters, Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, SeekMode, SeekTo};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::{Time, TimeBase};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("open failed: {0}")]
    Open(#[from] std::io::Error),
    #[error("format probe failed: {0}")]
    Probe(SymphoniaError),
    #[error("no decodable audio track")]
    NoAudioTrack,
    #[error("decoder init failed: {0}")]
    DecoderInit(SymphoniaError),
}

/// Open `path` and return a decoded audio source plus the media duration,
/// when the container reports one.
pub fn open_media(path: &Path) -> Result<(DecodedAudio, Option<u64>), MediaError> {
    let file = File::open(path)?;
    let stream = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(MediaError::Probe)?;

    let format = probed.format;

    // The MP4 samples carry a video track as well; pick the first track this
    // build can actually decode.
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(MediaError::NoAudioTrack)?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let duration_ms = duration_from_params(codec_params.time_base, codec_params.n_frames);

    let decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(MediaError::DecoderInit)?;

    let mut audio = DecodedAudio {
        sample_rate: codec_params.sample_rate.unwrap_or(44_100),
        channels: codec_params
            .channels
            .map(|c| c.count() as u16)
            .unwrap_or(2),
        format,
        decoder,
        codec_params,
        track_id,
        buffered: Vec::new(),
        cursor: 0,
        ended: false,
    };

    // Prime once so the output spec is right before the sink pulls samples.
    audio.refill();

    Ok((audio, duration_ms))
}

fn duration_from_params(time_base: Option<TimeBase>, n_frames: Option<u64>) -> Option<u64> {
    let time = time_base?.calc_time(n_frames?);
    Some(time.seconds * 1000 + (time.frac * 1000.0).round() as u64)
}

/// A streaming rodio Source backed by Symphonia.
///
/// Seekable in place: `try_seek` moves the demuxer and rebuilds the decoder,
/// so `Sink::try_seek` works without reopening the file.
pub struct DecodedAudio {
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    codec_params: CodecParameters,
    track_id: u32,

    // Output format for rodio
    sample_rate: u32,
    channels: u16,

    // Interleaved f32 samples ready to be yielded
    buffered: Vec<f32>,
    cursor: usize,

    ended: bool,
}

impl DecodedAudio {
    /// Pull packets until one decodes into samples, the stream ends, or a
    /// fatal error ends it for us.
    fn refill(&mut self) {
        self.buffered.clear();
        self.cursor = 0;

        while !self.ended {
            let packet = match self.format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(_)) => {
                    self.ended = true;
                    return;
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(err) => {
                    log::warn!("demux error, ending stream: {err}");
                    self.ended = true;
                    return;
                }
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            match self.decoder.decode(&packet) {
                Ok(decoded) => {
                    let spec = *decoded.spec();
                    self.sample_rate = spec.rate;
                    self.channels = spec.channels.count() as u16;

                    let mut interleaved = SampleBuffer::<f32>::new(decoded.frames() as u64, spec);
                    interleaved.copy_interleaved_ref(decoded);
                    self.buffered.extend_from_slice(interleaved.samples());
                    return;
                }
                Err(SymphoniaError::DecodeError(err)) => {
                    // Corrupt packet; skip it.
                    log::debug!("skipping undecodable packet: {err}");
                    continue;
                }
                Err(SymphoniaError::IoError(_)) => {
                    self.ended = true;
                    return;
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(err) => {
                    log::warn!("decode error, ending stream: {err}");
                    self.ended = true;
                    return;
                }
            }
        }
    }
}

impl Iterator for DecodedAudio {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor >= self.buffered.len() {
            if self.ended {
                return None;
            }
            self.refill();
        }

        let sample = self.buffered[self.cursor];
        self.cursor += 1;
        Some(sample)
    }
}

impl Source for DecodedAudio {
    fn current_span_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), SeekError> {
        let target = SeekTo::Time {
            time: Time::from(pos),
            track_id: Some(self.track_id),
        };

        self.format
            .seek(SeekMode::Accurate, target)
            .map_err(|e| SeekError::Other(Box::new(e)))?;

        // The demuxer moved; decoder state is stale until rebuilt.
        self.decoder = symphonia::default::get_codecs()
            .make(&self.codec_params, &DecoderOptions::default())
            .map_err(|e| SeekError::Other(Box::new(e)))?;

        self.buffered.clear();
        self.cursor = 0;
        self.ended = false;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_needs_both_time_base_and_frame_count() {
        let tb = TimeBase::new(1, 48_000);

        assert_eq!(duration_from_params(Some(tb), Some(96_000)), Some(2_000));
        assert_eq!(duration_from_params(None, Some(96_000)), None);
        assert_eq!(duration_from_params(Some(tb), None), None);
    }
}
