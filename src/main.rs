mod cli;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use vg_core::config::Config;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    backend_url: Option<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = Config::load_or_default(config_path);

    // CLI and environment win over the config file.
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(url) = backend_url {
        config.backend.url = url;
    }

    tracing::info!("Starting vidgate");
    tracing::info!(
        "Server will listen on {}:{}, backend at {}",
        config.server.host,
        config.server.port,
        config.backend.url
    );

    vg_server::start(config).await?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vidgate=trace,vg_server=trace,vg_rpc=debug,tower_http=debug".to_string()
        } else {
            "vidgate=info,vg_server=info,vg_rpc=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start {
            host,
            port,
            backend_url,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, backend_url, cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("vidgate {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = Config::load(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Backend: {}", config.backend.url);
    println!("  Chunk size: {} bytes", config.upload.effective_chunk_size());
    println!("  Max upload: {} bytes", config.upload.max_upload_bytes);
    println!("  CORS enabled: {}", config.server.cors.enabled);
    if let Some(dir) = &config.server.static_dir {
        println!("  Static dir: {}", dir.display());
    }

    let warnings = config.validate();
    for warning in &warnings {
        println!("  ⚠ {warning}");
    }

    Ok(())
}
