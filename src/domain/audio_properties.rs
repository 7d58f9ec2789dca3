/// Stream properties of a source file as reported by a media prober.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioProperties {
    pub codec: String,
    pub sample_rate_hertz: u32,
    pub channel_count: u16,
    /// Zero when the container does not report a duration.
    pub duration_seconds: f64,
}

impl AudioProperties {
    /// False for zero, negative or non-finite durations, which cannot be split
    /// into windows without risking truncation.
    pub fn has_known_duration(&self) -> bool {
        self.duration_seconds.is_finite() && self.duration_seconds > 0.0
    }
}
