//! Command-line KTP extraction tool.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use ktp_ocr::{Client, ClientConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the KTP document (JPEG, PNG, WebP, or PDF)
    image: PathBuf,

    /// MIME type of the document, inferred from the extension when omitted
    #[arg(long)]
    mime: Option<String>,

    /// Caller identifier recorded in the request session
    #[arg(long, default_value = "cli")]
    caller: String,

    /// Gemini model to use instead of the default
    #[arg(long)]
    model: Option<String>,

    /// Per-document deadline in seconds
    #[arg(long, default_value_t = 300)]
    timeout_secs: u64,

    /// Pretty-print the resulting JSON
    #[arg(long)]
    pretty: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mime = match cli.mime {
        Some(mime) => mime,
        None => guess_mime(&cli.image)
            .with_context(|| format!("cannot infer the MIME type of {}", cli.image.display()))?
            .to_string(),
    };

    let bytes = std::fs::read(&cli.image)
        .with_context(|| format!("cannot read {}", cli.image.display()))?;

    let mut config = ClientConfig::new().with_timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }

    let client = Client::from_config(config).await?;
    let result = client.process_document(bytes, &mime, &cli.caller).await;

    // Logs go to stderr; stdout carries only the result object.
    if cli.pretty {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{result}");
    }
    Ok(())
}

/// Initializes log output, honoring `RUST_LOG` when set.
fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}

fn guess_mime(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}
