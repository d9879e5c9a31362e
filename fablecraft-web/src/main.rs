//! Fablecraft web server.
//!
//! Serves a single form: submit a fantasy novel idea, wait for the seven
//! outline stages, read the rendered outline.

mod app;

use anyhow::Context;
use clap::Parser;
use fablecraft::config::AppConfig;
use fablecraft::context::ContextPolicy;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments. Flags override environment configuration.
#[derive(Parser, Debug)]
#[command(name = "fablecraft")]
#[command(about = "Fantasy novel outline generator")]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(short, long)]
    bind: Option<String>,

    /// Background image (JPEG)
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Model name, e.g. gemini/gemini-1.5-flash
    #[arg(short, long)]
    model: Option<String>,

    /// Context passed between stages: full or last
    #[arg(long)]
    context_policy: Option<ContextPolicy>,

    /// Emit logs as JSON
    #[arg(long, env = "FABLECRAFT_LOG_JSON")]
    json_logs: bool,
}

impl Args {
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(bind) = self.bind {
            config = config.with_bind_addr(bind);
        }
        if let Some(image) = self.image {
            config = config.with_background_image(image);
        }
        if let Some(model) = self.model {
            config = config.with_model(model);
        }
        if let Some(policy) = self.context_policy {
            config = config.with_context_policy(policy);
        }
        config
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.json_logs);

    if let Some(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    let config = args.apply(AppConfig::from_env()?);
    info!(
        model = %config.model,
        bind = %config.bind_addr,
        policy = %config.context_policy,
        background = %config.background_image.display(),
        "Configuration loaded"
    );

    let state = Arc::new(app::AppState::from_config(&config)?);
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "Fablecraft listening");
    axum::serve(listener, app::router(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "fablecraft",
            "--bind",
            "0.0.0.0:9000",
            "--context-policy",
            "last",
        ]);

        let config = args.apply(AppConfig::new().with_model("gemini-1.5-pro"));

        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.context_policy, ContextPolicy::LastOutput);
        assert_eq!(config.model, "gemini-1.5-pro");
    }

    #[test]
    fn test_invalid_context_policy_flag() {
        assert!(Args::try_parse_from(["fablecraft", "--context-policy", "all"]).is_err());
    }
}
