use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vidgate")]
#[command(author, version, about = "HTTP edge gateway for a gRPC video chunk store")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP gateway
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// gRPC backend URL, e.g. http://localhost:50000 (overrides config)
        #[arg(long, env = "VIDGATE_BACKEND_URL")]
        backend_url: Option<String>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn start_overrides_parse() {
        let cli = Cli::try_parse_from([
            "vidgate",
            "--verbose",
            "start",
            "--port",
            "4000",
            "--backend-url",
            "http://store:50000",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Start {
                host,
                port,
                backend_url,
            } => {
                assert!(host.is_none());
                assert_eq!(port, Some(4000));
                assert_eq!(backend_url.as_deref(), Some("http://store:50000"));
            }
            _ => panic!("expected start"),
        }
    }
}
