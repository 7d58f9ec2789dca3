mod ffmpeg_extractor;
mod ffprobe_prober;
mod media_factory;
mod process;
pub mod symphonia_prober;

pub use ffmpeg_extractor::FfmpegSegmentExtractor;
pub use ffprobe_prober::{FfprobeFormat, FfprobeMediaProber, FfprobeOutput, FfprobeStream};
pub use media_factory::{MediaProbeProvider, MediaToolsFactory};
pub use process::check_binary;
pub use symphonia_prober::SymphoniaMediaProber;
