use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use groqchat::{
    CredentialChain, CredentialProvider, GroqClient, GroqConfig, LlmProvider, repl,
    web::{self, AppState},
};

#[derive(Parser)]
#[command(name = "groqchat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Key file to scan for GROQ_API_KEY (repeatable, replaces the defaults)
    #[arg(long = "key-file", global = true)]
    key_files: Vec<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat in the terminal
    Chat,

    /// Serve the web form and the /chat endpoint
    Serve {
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let credentials = CredentialChain::default_chain(Some(cli.key_files));
    let api_key = credentials.api_key();

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let client = GroqClient::new(GroqConfig::new(require_api_key(api_key)?))?;

            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            let ctrl_c = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!(error = %e, "Failed to listen for Ctrl-C");
                    std::future::pending::<()>().await;
                }
            };
            repl::run(&client, stdin, &mut stdout, ctrl_c).await?;
        }
        Commands::Serve { addr } => {
            let provider: Option<Arc<dyn LlmProvider>> = match api_key {
                Some(api_key) => Some(Arc::new(GroqClient::new(GroqConfig::new(api_key))?)),
                None => {
                    warn!("GROQ_API_KEY not found; /chat will answer with an error");
                    None
                }
            };

            let app = web::create_router(AppState::new(provider));
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;
            info!(%addr, "Serving chat page");
            println!("Open http://{addr} in your browser.");

            if let Err(e) = axum::serve(listener, app).await {
                bail!("Server error: {e}");
            }
        }
    }

    Ok(())
}

/// The terminal chat cannot start without a key.
fn require_api_key(api_key: Option<String>) -> Result<String> {
    match api_key {
        Some(api_key) => Ok(api_key),
        None => {
            error!("GROQ_API_KEY not found in the environment or key files");
            bail!("set GROQ_API_KEY before running this program.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_an_error() {
        let err = require_api_key(None).expect_err("no key");
        assert!(err.to_string().contains("GROQ_API_KEY"));
        assert_eq!(require_api_key(Some("gsk_x".into())).unwrap(), "gsk_x");
    }

    #[test]
    fn cli_defaults_to_chat_without_key_files() {
        let cli = Cli::try_parse_from(["groqchat"]).expect("parse");
        assert!(cli.command.is_none());
        assert!(cli.key_files.is_empty());
        assert!(!cli.verbose);

        let cli = Cli::try_parse_from([
            "groqchat",
            "--key-file",
            "a.env",
            "serve",
            "--addr",
            "0.0.0.0:9000",
        ])
        .expect("parse");
        assert_eq!(cli.key_files, vec![PathBuf::from("a.env")]);
        assert!(matches!(
            cli.command,
            Some(Commands::Serve { addr }) if addr.port() == 9000
        ));
    }
}
