mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ChunkingSettings, LoggingSettings, MediaProberSetting, MediaSettings,
    RecognitionProviderSetting, RecognitionSettings, ServerSettings, Settings, SettingsError,
    StorageProviderSetting, StorageSettings, SubmissionSettings, SubmissionStrategySetting,
};
