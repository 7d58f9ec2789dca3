#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;

use chunkscribe::application::ports::{
    AudioPayload, MediaProbeError, MediaProber, RecognitionError, SegmentExtractionError,
    SegmentExtractor, SpeechRecognizer, StagingStore, StagingStoreError,
};
use chunkscribe::domain::{AudioProperties, RecognitionParams, StoragePath};

pub fn properties(duration_seconds: f64) -> AudioProperties {
    AudioProperties {
        codec: "pcm_s16le".to_string(),
        sample_rate_hertz: 16_000,
        channel_count: 1,
        duration_seconds,
    }
}

pub fn write_source(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn build_wav(sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let num_samples = samples.len() as u32;
    let byte_rate = sample_rate * 2;
    let data_size = num_samples * 2;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

pub struct FixedProber {
    pub properties: AudioProperties,
    pub calls: AtomicUsize,
}

impl FixedProber {
    pub fn new(properties: AudioProperties) -> Self {
        Self {
            properties,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl MediaProber for FixedProber {
    async fn probe(&self, _path: &Path) -> Result<AudioProperties, MediaProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.properties.clone())
    }
}

/// Writes `start=<offset>` into each output so recognizers can tell segments apart.
#[derive(Default)]
pub struct WritingExtractor {
    pub fail_at_offsets: HashSet<u64>,
    pub outputs: Mutex<Vec<PathBuf>>,
    pub calls: AtomicUsize,
}

impl WritingExtractor {
    pub fn failing_at(offsets: &[u64]) -> Self {
        Self {
            fail_at_offsets: offsets.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn outputs(&self) -> Vec<PathBuf> {
        self.outputs.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SegmentExtractor for WritingExtractor {
    async fn extract(
        &self,
        _source: &Path,
        start_offset_seconds: f64,
        _duration_seconds: f64,
        output: &Path,
    ) -> Result<(), SegmentExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let start = start_offset_seconds.round() as u64;
        if self.fail_at_offsets.contains(&start) {
            return Err(SegmentExtractionError::ExtractionFailed(format!(
                "cannot cut at {}",
                start
            )));
        }
        tokio::fs::write(output, format!("start={}", start)).await?;
        self.outputs.lock().unwrap().push(output.to_path_buf());
        Ok(())
    }
}

/// Echoes inline payloads back as `text(<payload>)`.
#[derive(Default)]
pub struct ScriptedRecognizer {
    pub fail_on: HashSet<String>,
    pub delays: HashMap<String, Duration>,
    pub hang: bool,
    pub payloads: Mutex<Vec<AudioPayload>>,
    pub params: Mutex<Vec<RecognitionParams>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl ScriptedRecognizer {
    pub fn failing_on(payloads: &[&str]) -> Self {
        Self {
            fail_on: payloads.iter().map(|p| p.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, payload: &str, delay: Duration) -> Self {
        self.delays.insert(payload.to_string(), delay);
        self
    }

    pub fn payloads(&self) -> Vec<AudioPayload> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn recognize(
        &self,
        payload: &AudioPayload,
        params: &RecognitionParams,
    ) -> Result<String, RecognitionError> {
        self.payloads.lock().unwrap().push(payload.clone());
        self.params.lock().unwrap().push(params.clone());

        let key = match payload {
            AudioPayload::Inline(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            AudioPayload::Staged { uri } => uri.clone(),
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if self.hang {
            futures::future::pending::<()>().await;
        }
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_on.contains(&key) {
            return Err(RecognitionError::ApiRequestFailed(format!(
                "rejected {}",
                key
            )));
        }
        Ok(format!("text({})", key))
    }
}

/// Objects become visible to `head` only after `hidden_heads` failed lookups.
#[derive(Default)]
pub struct InMemoryStagingStore {
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
    pub hidden_heads: usize,
    pub reject_uploads: bool,
    pub head_calls: AtomicUsize,
    pub deleted: Mutex<Vec<String>>,
}

impl InMemoryStagingStore {
    pub fn visible_after(hidden_heads: usize) -> Self {
        Self {
            hidden_heads,
            ..Self::default()
        }
    }

    pub fn never_visible() -> Self {
        Self::visible_after(usize::MAX)
    }

    /// Keeps the bytes of a failed upload, like a partially written object.
    pub fn rejecting_uploads() -> Self {
        Self {
            reject_uploads: true,
            ..Self::default()
        }
    }
}

#[async_trait::async_trait]
impl StagingStore for InMemoryStagingStore {
    async fn store(
        &self,
        path: &StoragePath,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
        _content_length: Option<u64>,
    ) -> Result<u64, StagingStoreError> {
        let mut data = Vec::new();
        while let Some(chunk) = stream.next().await {
            data.extend_from_slice(&chunk?);
        }
        let size = data.len() as u64;
        self.objects
            .lock()
            .unwrap()
            .insert(path.as_str().to_string(), data);
        if self.reject_uploads {
            return Err(StagingStoreError::UploadFailed(format!(
                "rejected {}",
                path
            )));
        }
        Ok(size)
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), StagingStoreError> {
        self.objects.lock().unwrap().remove(path.as_str());
        self.deleted.lock().unwrap().push(path.to_string());
        Ok(())
    }

    async fn head(&self, path: &StoragePath) -> Result<u64, StagingStoreError> {
        let call = self.head_calls.fetch_add(1, Ordering::SeqCst);
        if call < self.hidden_heads {
            return Err(StagingStoreError::NotFound(path.to_string()));
        }
        self.objects
            .lock()
            .unwrap()
            .get(path.as_str())
            .map(|d| d.len() as u64)
            .ok_or_else(|| StagingStoreError::NotFound(path.to_string()))
    }

    fn uri(&self, path: &StoragePath) -> String {
        format!("mem://{}", path)
    }
}
