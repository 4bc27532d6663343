//! Server runner and config assembly

use std::env;
use std::process::ExitCode;

use crate::application::ports::ConfigStore;
use crate::application::{ProcessAudioOptions, ProcessAudioUseCase};
use crate::domain::config::AppConfig;
use crate::infrastructure::{GeminiTranscriber, TempDirAudioStore};
use crate::server::{create_router, AppState};

use super::args::ServeArgs;
use super::config_cmd::parse_bool;
use super::presenter::Presenter;
use super::signals::shutdown_signal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Run the HTTP service until SIGINT/SIGTERM
pub async fn run_server(config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    let transcriber = config
        .api_key()
        .map(|key| GeminiTranscriber::with_model(key, config.model_or_default()));

    let upload_dir = config.upload_dir_or_default();
    let options = ProcessAudioOptions {
        max_upload_bytes: config.max_upload_bytes(),
        timeout: config.timeout_or_default(),
    };
    let use_case =
        ProcessAudioUseCase::new(transcriber, TempDirAudioStore::new(&upload_dir), options);

    // A missing key does not stop the service; requests fail with a
    // configuration error until one is provided.
    if !use_case.is_configured() {
        tracing::error!("GEMINI_API_KEY is not set; transcription requests will fail");
        presenter.warn(
            "Missing API key. Set GEMINI_API_KEY or run 'voice-notes config set api_key <key>'",
        );
    }

    let router = create_router(AppState::new(use_case, config.dev_mode_or_default()));

    let host = config.host_or_default();
    let port = config.port_or_default();
    let listener = match tokio::net::TcpListener::bind((host, port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(host, port, error = %e, "failed to bind");
            presenter.error(&format!("Failed to bind {}:{}: {}", host, port, e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match listener.local_addr() {
        Ok(addr) => {
            tracing::info!(
                %addr,
                model = config.model_or_default(),
                upload_dir = %upload_dir.display(),
                max_upload_mb = options.max_upload_bytes / (1024 * 1024),
                timeout_secs = options.timeout.as_secs(),
                dev_mode = config.dev_mode_or_default(),
                "server started"
            );
            presenter.listening(addr);
        }
        Err(e) => tracing::warn!(error = %e, "could not read bound address"),
    }

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
        presenter.error(&format!("Server error: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    tracing::info!("server stopped");
    ExitCode::from(EXIT_SUCCESS)
}

/// Config overrides from `voice-notes serve` flags
pub fn config_from_args(args: &ServeArgs) -> AppConfig {
    AppConfig {
        host: args.host.clone(),
        port: args.port,
        upload_dir: args.upload_dir.clone(),
        model: args.model.clone(),
        timeout_secs: args.timeout,
        dev_mode: if args.dev { Some(true) } else { None },
        ..Default::default()
    }
}

/// Config overrides from the environment, read through `lookup`
pub fn config_from_env(lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    let var = |name: &str| lookup(name).filter(|s| !s.trim().is_empty());

    AppConfig {
        api_key: var("GEMINI_API_KEY"),
        dev_mode: var("VOICE_NOTES_DEV").and_then(|v| parse_bool(&v).ok()),
        port: var("PORT").and_then(|v| v.trim().parse().ok()),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            Presenter::new().warn(&format!("Ignoring config file: {}", e));
            AppConfig::empty()
        }
    };

    let env_config = config_from_env(|name| env::var(name).ok());

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
