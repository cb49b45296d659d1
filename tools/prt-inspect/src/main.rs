//! prt-inspect: decrypt and verify a Probabilistic Reveal Token header.
//!
//! The header comes from the first argument, or from stdin when absent.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use prt_decoder::{
    CurveKind, DecodedToken, EpochKeyProvider, FileKeyProvider, HttpKeyProvider,
    PrtDecoderService, ProtocolConfig, PrtError, Secp256k1, P256,
};
use tracing::{debug, info};

use prt_inspect::config::{InspectConfig, KeySource};
use prt_inspect::logging::init_logging;
use prt_inspect::report::InspectReport;

/// Decrypt a PRT header and verify its MAC
#[derive(Parser, Debug)]
#[command(name = "prt-inspect", version)]
#[command(about = "Decrypt a Probabilistic Reveal Token header and verify its MAC")]
struct Args {
    /// Base64 PRT header value (read from stdin when omitted)
    header: Option<String>,

    /// Directory holding <epoch>.json key files
    #[arg(long, conflicts_with = "key_url")]
    key_dir: Option<PathBuf>,

    /// Base URL serving <epoch>.json key files
    #[arg(long)]
    key_url: Option<String>,

    /// Curve the token was issued on [default: p256]
    #[arg(long)]
    curve: Option<CurveKind>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => InspectConfig::load(path)?,
        None => InspectConfig::default(),
    };
    config.apply_env();
    config.override_keys(args.key_dir.clone(), args.key_url.clone());
    if let Some(curve) = args.curve {
        config.curve = curve;
    }
    config.validate()?;

    init_logging(&config.logging)?;

    let header = match args.header {
        Some(header) => header.trim().to_string(),
        None => read_stdin()?,
    };
    if header.is_empty() {
        bail!("no token header given");
    }

    let source = config.key_source();
    info!(?source, curve = %config.curve, "Inspecting token");

    let decoded = match source {
        KeySource::Dir(dir) => {
            decode(FileKeyProvider::new(dir), config.curve, &config.protocol, &header).await
        }
        KeySource::Url(url) => {
            let provider = HttpKeyProvider::new(url).context("failed to build HTTP client")?;
            decode(provider, config.curve, &config.protocol, &header).await
        }
    }?;

    let report = InspectReport::new(&decoded, config.curve);
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        for line in report.text_lines() {
            println!("{line}");
        }
    }

    Ok(())
}

async fn decode<K: EpochKeyProvider>(
    keys: K,
    curve: CurveKind,
    protocol: &ProtocolConfig,
    header: &str,
) -> Result<DecodedToken, PrtError> {
    debug!(%curve, "Building decoder service");
    match curve {
        CurveKind::P256 => {
            PrtDecoderService::with_curve(keys, P256, protocol)
                .decode_header(header)
                .await
        }
        CurveKind::Secp256k1 => {
            PrtDecoderService::with_curve(keys, Secp256k1, protocol)
                .decode_header(header)
                .await
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read token header from stdin")?;
    Ok(input.trim().to_string())
}
