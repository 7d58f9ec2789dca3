use std::path::PathBuf;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{self, BoxStream};
use futures::{FutureExt, StreamExt};

use crate::application::ports::{SegmentExtractionError, SegmentExtractor};
use crate::domain::{AudioSource, SegmentPlan, SegmentWindow};

use super::scratch::{ScratchDir, ScratchSpace};

/// One extracted window of the source, backed by its own scratch directory.
#[derive(Debug)]
pub struct Segment {
    pub index: usize,
    pub start_offset_seconds: f64,
    pub duration_seconds: f64,
    pub temp_file_path: PathBuf,
    scratch: ScratchDir,
}

impl Segment {
    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&self.temp_file_path).await
    }

    /// Removes the segment's temporary storage.
    pub fn release(self) {
        self.scratch.release();
    }
}

/// A window whose audio has not been extracted yet.
pub struct PendingSegment<'a> {
    pub window: SegmentWindow,
    extraction: BoxFuture<'a, Result<Segment, SegmentExtractionError>>,
}

impl PendingSegment<'_> {
    pub async fn extract(self) -> Result<Segment, SegmentExtractionError> {
        self.extraction.await
    }
}

pub struct Segmenter {
    extractor: Arc<dyn SegmentExtractor>,
    scratch: ScratchSpace,
}

impl Segmenter {
    pub fn new(extractor: Arc<dyn SegmentExtractor>, scratch: ScratchSpace) -> Self {
        Self { extractor, scratch }
    }

    /// One pending extraction per window of the plan, in index order.
    ///
    /// Nothing touches the filesystem until a pending segment is awaited, so a
    /// consumer bounds how many segments exist at once by how many it awaits.
    pub fn split<'a>(
        &'a self,
        source: &'a AudioSource,
        plan: SegmentPlan,
    ) -> BoxStream<'a, PendingSegment<'a>> {
        stream::iter(plan)
            .map(move |window| PendingSegment {
                window,
                extraction: self.extract(source, window).boxed(),
            })
            .boxed()
    }

    /// Materializes one window into a fresh scratch directory.
    ///
    /// On error the directory is already gone when this returns.
    pub async fn extract(
        &self,
        source: &AudioSource,
        window: SegmentWindow,
    ) -> Result<Segment, SegmentExtractionError> {
        let scratch = self
            .scratch
            .allocate(&format!("segment-{}-", window.index))
            .map_err(|e| SegmentExtractionError::Scratch(e.to_string()))?;

        let output = scratch
            .path()
            .join(format!("out{}{}", window.index, source.extension()));

        self.extractor
            .extract(
                source.path(),
                window.start_offset_seconds,
                window.duration_seconds,
                &output,
            )
            .await?;

        let size = tokio::fs::metadata(&output)
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        if size == 0 {
            return Err(SegmentExtractionError::EmptyOutput);
        }

        tracing::debug!(
            segment = window.index,
            start_secs = window.start_offset_seconds,
            duration_secs = window.duration_seconds,
            bytes = size,
            "Segment extracted"
        );

        Ok(Segment {
            index: window.index,
            start_offset_seconds: window.start_offset_seconds,
            duration_seconds: window.duration_seconds,
            temp_file_path: output,
            scratch,
        })
    }
}
