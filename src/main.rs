use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use chunkscribe::application::services::{
    ChunkTranscriber, ScratchSpace, Segmenter, StagedTranscriber, SubmissionStrategy,
    TranscriptionService,
};
use chunkscribe::infrastructure::media::{MediaProbeProvider, MediaToolsFactory, check_binary};
use chunkscribe::infrastructure::observability::{TracingConfig, init_tracing};
use chunkscribe::infrastructure::recognition::RecognizerFactory;
use chunkscribe::infrastructure::storage::StagingStoreFactory;
use chunkscribe::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        TracingConfig::from_settings(&settings.logging, environment),
        settings.server.port,
    );

    if let Err(e) = check_binary(&settings.media.ffmpeg_path) {
        tracing::warn!(error = %e, "ffmpeg unavailable; segment extraction will fail");
    }
    if settings.media_probe_provider() == MediaProbeProvider::Ffprobe {
        if let Err(e) = check_binary(&settings.media.ffprobe_path) {
            tracing::warn!(error = %e, "ffprobe unavailable; probing will fail");
        }
    }

    let command_timeout = settings.media_command_timeout();
    let prober = MediaToolsFactory::create_prober(
        settings.media_probe_provider(),
        &settings.media.ffprobe_path,
        command_timeout,
    );
    let extractor = MediaToolsFactory::create_extractor(&settings.media.ffmpeg_path, command_timeout);

    let recognizer = RecognizerFactory::create(
        settings.recognition_provider(),
        settings.recognizer_options(),
    )
    .context("Failed to create speech recognizer")?;

    let segment_scratch = match &settings.chunking.scratch_dir {
        Some(dir) => ScratchSpace::in_dir(dir),
        None => ScratchSpace::system(),
    };
    let upload_scratch = match settings.upload_dir() {
        Some(dir) => ScratchSpace::in_dir(dir),
        None => ScratchSpace::system(),
    };

    let segmenter = Segmenter::new(extractor, segment_scratch);
    let chunked = ChunkTranscriber::new(
        segmenter,
        Arc::clone(&recognizer),
        settings.chunking.max_concurrent_segments,
    );

    let mut service = TranscriptionService::new(prober, chunked, settings.recognition_config()?);

    if settings.submission_strategy() == SubmissionStrategy::Staged {
        let store = StagingStoreFactory::create(&settings.storage)
            .context("Failed to create staging store")?;
        let staged = StagedTranscriber::new(store, recognizer, settings.visibility_policy());
        service =
            service.with_staged_submission(staged, settings.submission.inline_max_duration_seconds);
    }

    tracing::info!(
        provider = ?settings.recognition_provider(),
        strategy = ?service.strategy(),
        chunk_secs = settings.chunking.chunk_duration_seconds,
        language = %settings.recognition.language_code,
        "Transcription pipeline ready"
    );

    let shutdown = CancellationToken::new();
    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        transcription_service: Arc::new(service),
        upload_scratch,
        settings: Arc::new(settings),
        shutdown: shutdown.clone(),
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown requested; cancelling in-flight transcriptions");
    shutdown.cancel();
}
