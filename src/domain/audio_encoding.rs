use std::fmt;
use std::str::FromStr;

/// Wire-level sample format label expected by the recognition service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioEncoding {
    Linear16,
    Flac,
    Mp3,
    Aac,
    OggOpus,
    Alac,
}

impl AudioEncoding {
    /// Maps a probed codec name to the encoding sent with recognition requests.
    ///
    /// Total: codecs the service cannot take natively (8, 24 and 32 bit PCM) and
    /// any unknown codec fall back to `LINEAR16`.
    pub fn from_codec(codec: &str) -> Self {
        match codec {
            "pcm_s16le" => Self::Linear16,
            "flac" => Self::Flac,
            "mpeg" | "mp3" => Self::Mp3,
            "aac" => Self::Aac,
            "vorbis" | "opus" => Self::OggOpus,
            "alac" => Self::Alac,
            "pcm_u8" | "pcm_s24le" | "pcm_s32le" => Self::Linear16,
            _ => Self::Linear16,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear16 => "LINEAR16",
            Self::Flac => "FLAC",
            Self::Mp3 => "MP3",
            Self::Aac => "AAC",
            Self::OggOpus => "OGG_OPUS",
            Self::Alac => "ALAC",
        }
    }
}

impl FromStr for AudioEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LINEAR16" => Ok(Self::Linear16),
            "FLAC" => Ok(Self::Flac),
            "MP3" => Ok(Self::Mp3),
            "AAC" => Ok(Self::Aac),
            "OGG_OPUS" => Ok(Self::OggOpus),
            "ALAC" => Ok(Self::Alac),
            other => Err(format!("Invalid audio encoding: {}", other)),
        }
    }
}

impl fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
