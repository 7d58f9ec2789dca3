/// Time window of one segment within the source recording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentWindow {
    pub index: usize,
    pub start_offset_seconds: f64,
    pub duration_seconds: f64,
}

impl SegmentWindow {
    pub fn end_offset_seconds(&self) -> f64 {
        self.start_offset_seconds + self.duration_seconds
    }
}

/// Contiguous, non-overlapping windows covering a recording.
///
/// `ceil(total / chunk)` windows; every window but the last is exactly
/// `chunk` long. There is no plan for a recording without a positive finite
/// duration; such files are submitted whole.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPlan {
    chunk_duration_seconds: f64,
    windows: Vec<SegmentWindow>,
}

impl SegmentPlan {
    pub fn new(
        total_duration_seconds: f64,
        chunk_duration_seconds: f64,
    ) -> Result<Self, SegmentPlanError> {
        if !chunk_duration_seconds.is_finite() || chunk_duration_seconds <= 0.0 {
            return Err(SegmentPlanError::InvalidChunkDuration(chunk_duration_seconds));
        }

        if !total_duration_seconds.is_finite() || total_duration_seconds <= 0.0 {
            return Err(SegmentPlanError::UnknownDuration(total_duration_seconds));
        }

        let count = segment_count(total_duration_seconds, chunk_duration_seconds);
        let windows = (0..count)
            .map(|index| {
                let start = index as f64 * chunk_duration_seconds;
                SegmentWindow {
                    index,
                    start_offset_seconds: start,
                    duration_seconds: (total_duration_seconds - start)
                        .min(chunk_duration_seconds),
                }
            })
            .collect();

        Ok(Self {
            chunk_duration_seconds,
            windows,
        })
    }

    pub fn chunk_duration_seconds(&self) -> f64 {
        self.chunk_duration_seconds
    }

    pub fn windows(&self) -> &[SegmentWindow] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl IntoIterator for SegmentPlan {
    type Item = SegmentWindow;
    type IntoIter = std::vec::IntoIter<SegmentWindow>;

    fn into_iter(self) -> Self::IntoIter {
        self.windows.into_iter()
    }
}

/// `ceil(total / chunk)`, at least one.
pub fn segment_count(total_duration_seconds: f64, chunk_duration_seconds: f64) -> usize {
    let count = (total_duration_seconds / chunk_duration_seconds).ceil();
    if count.is_finite() && count >= 1.0 {
        count as usize
    } else {
        1
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SegmentPlanError {
    #[error("chunk duration must be a positive number of seconds, got {0}")]
    InvalidChunkDuration(f64),
    #[error("source duration {0} cannot be split into windows")]
    UnknownDuration(f64),
}
