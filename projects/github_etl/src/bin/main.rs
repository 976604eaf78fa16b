use anyhow::Result;
use axum::serve;
use projects_github_etl::{
	app::{router, AppState, BuildStateError},
	config::{Config, ConfigError},
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MainError {
	#[error("DotEnv: {source}")]
	DotEnv {
		#[source]
		source: dotenvy::Error,
	},
	#[error("Config: {source}")]
	Config {
		#[source]
		source: ConfigError,
	},
	#[error("TracingInit: {source}")]
	TracingInit {
		#[source]
		source: utils_trace::TracingInitError,
	},
	#[error("BuildState: {source}")]
	BuildState {
		#[source]
		source: BuildStateError,
	},
	#[error("TcpListenerBind: {source}")]
	TcpListenerBind {
		#[source]
		source: std::io::Error,
	},
	#[error("Serve: {source}")]
	Serve {
		#[source]
		source: std::io::Error,
	},
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
	if let Err(source) = dotenvy::dotenv() {
		if !source.not_found() {
			return Err(MainError::DotEnv { source });
		}
	}

	let config = Config::from_env().map_err(|source| MainError::Config { source })?;

	utils_trace::init(&config.log_level)
		.map_err(|source| MainError::TracingInit { source })?;

	let state = AppState::from_config(&config)
		.map_err(|source| MainError::BuildState { source })?;

	info!(
		name = %state.info.name,
		version = %state.info.version,
		persistence = config.persistence_enabled,
		github_owner = config.github.owner.as_deref().unwrap_or("-"),
		github_repo = config.github.repo.as_deref().unwrap_or("-"),
		"Starting"
	);

	let app = router(state);

	let listener = tokio::net::TcpListener::bind((config.server.bind_addr.as_str(), config.server.port))
		.await
		.map_err(|source| MainError::TcpListenerBind { source })?;

	info!("Server running on addr: {}:{}", config.server.bind_addr, config.server.port);

	serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await
		.map_err(|source| MainError::Serve { source })?;

	// The router and with it the pool were dropped when `serve` returned.
	info!("Server stopped");

	Ok(())
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %err, "failed to listen for shutdown signal");
		std::future::pending::<()>().await;
	}
	info!("Shutdown signal received");
}
