use std::io::Write;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forge_design::config::Config;
use forge_design::{generate, DesignRequest};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout carries the design itself
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forge_design=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = Config::load();
    tracing::info!("Starting ForgeDesign");

    let request = match &cfg.request_path {
        Some(path) => {
            tracing::info!("Request: {}", path);
            let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
            serde_json::from_str::<DesignRequest>(&raw).with_context(|| format!("invalid design request in {}", path))?
        }
        None => {
            tracing::info!("No DESIGN_REQUEST set - using the demo request");
            DesignRequest::default()
        }
    };

    let base = cfg.base_network(request.tier);
    let design = generate(&request, base)?;

    let json = if cfg.pretty {
        serde_json::to_string_pretty(&design)?
    } else {
        serde_json::to_string(&design)?
    };

    match &cfg.output_path {
        Some(path) => {
            std::fs::write(path, json + "\n").with_context(|| format!("failed to write {}", path))?;
            tracing::info!("Design written to {}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }

    Ok(())
}
