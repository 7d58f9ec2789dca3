use std::fs::File;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use symphonia::core::codecs::{
    CODEC_TYPE_AAC, CODEC_TYPE_ALAC, CODEC_TYPE_FLAC, CODEC_TYPE_MP3, CODEC_TYPE_OPUS,
    CODEC_TYPE_PCM_F32LE, CODEC_TYPE_PCM_S16BE, CODEC_TYPE_PCM_S16LE, CODEC_TYPE_PCM_S24LE,
    CODEC_TYPE_PCM_S32LE, CODEC_TYPE_PCM_U8, CODEC_TYPE_VORBIS, CodecType,
};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{MediaProbeError, MediaProber};
use crate::domain::AudioProperties;

/// In-process prober for containers symphonia can demux.
pub struct SymphoniaMediaProber;

#[async_trait]
impl MediaProber for SymphoniaMediaProber {
    async fn probe(&self, path: &Path) -> Result<AudioProperties, MediaProbeError> {
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || probe_file(&path))
            .await
            .map_err(|e| MediaProbeError::ProbeFailed(format!("probe task: {}", e)))?
    }
}

pub fn probe_file(path: &Path) -> Result<AudioProperties, MediaProbeError> {
    let file = File::open(path).map_err(|e| MediaProbeError::Unreadable(e.to_string()))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| MediaProbeError::ProbeFailed(format!("probe: {}", e)))?;

    let mut format = probed.format;

    let track = format.default_track().ok_or(MediaProbeError::NoAudioStream)?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| MediaProbeError::ProbeFailed("unknown sample rate".to_string()))?;
    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

    let duration_seconds = match codec_params.n_frames {
        Some(frames) => frames as f64 / sample_rate as f64,
        None => {
            // Containers without a frame count in the header: sum packet durations.
            let mut total_ts: u64 = 0;
            loop {
                let packet = match format.next_packet() {
                    Ok(p) => p,
                    Err(symphonia::core::errors::Error::IoError(ref e))
                        if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                    {
                        break;
                    }
                    Err(e) => {
                        return Err(MediaProbeError::ProbeFailed(format!("packet: {}", e)));
                    }
                };
                if packet.track_id() == track_id {
                    total_ts += packet.dur;
                }
            }
            match codec_params.time_base {
                Some(tb) => {
                    let time = tb.calc_time(total_ts);
                    time.seconds as f64 + time.frac
                }
                None => total_ts as f64 / sample_rate as f64,
            }
        }
    };

    Ok(AudioProperties {
        codec: codec_name(codec_params.codec).to_string(),
        sample_rate_hertz: sample_rate,
        channel_count: channels as u16,
        duration_seconds,
    })
}

/// Names codecs the way ffprobe does so both probers feed the same encoding table.
pub fn codec_name(codec: CodecType) -> &'static str {
    match codec {
        CODEC_TYPE_PCM_S16LE => "pcm_s16le",
        CODEC_TYPE_PCM_S16BE => "pcm_s16be",
        CODEC_TYPE_PCM_S24LE => "pcm_s24le",
        CODEC_TYPE_PCM_S32LE => "pcm_s32le",
        CODEC_TYPE_PCM_U8 => "pcm_u8",
        CODEC_TYPE_PCM_F32LE => "pcm_f32le",
        CODEC_TYPE_FLAC => "flac",
        CODEC_TYPE_MP3 => "mp3",
        CODEC_TYPE_AAC => "aac",
        CODEC_TYPE_VORBIS => "vorbis",
        CODEC_TYPE_OPUS => "opus",
        CODEC_TYPE_ALAC => "alac",
        _ => "unknown",
    }
}
