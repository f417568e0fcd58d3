//! ots-client - create, upgrade and verify OpenTimestamps proofs

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ots_client::{Chain, DetachedTimestampFile, Op, OpenTimestamps, OtsConfig};

#[derive(Parser, Debug)]
#[command(name = "ots-client")]
#[command(about = "Create, upgrade and verify OpenTimestamps proofs")]
#[command(version)]
struct Args {
    /// Log level
    #[arg(long, env = "OTS_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the contents of a proof
    Info {
        /// Path to the .ots proof
        proof: PathBuf,

        /// Show operation results and arguments
        #[arg(short, long)]
        verbose: bool,
    },

    /// Timestamp one or more files, writing <file>.ots next to each
    Stamp {
        /// Files to timestamp
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Calendar URL (repeatable; defaults to OTS_CALENDAR_URLS or the public calendars)
        #[arg(short, long = "calendar")]
        calendars: Vec<String>,

        /// Calendar responses required
        #[arg(short = 'm', long)]
        quorum: Option<usize>,
    },

    /// Fetch calendar upgrades and rewrite the proof in place
    Upgrade {
        /// Path to the .ots proof
        proof: PathBuf,
    },

    /// Verify a proof against the blockchain
    Verify {
        /// Path to the .ots proof
        proof: PathBuf,

        /// Timestamped file (defaults to the proof path without .ots)
        #[arg(short, long, conflicts_with = "digest")]
        file: Option<PathBuf>,

        /// Hex digest of the timestamped file
        #[arg(short, long)]
        digest: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI args
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&args.log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting ots-client v{}", env!("CARGO_PKG_VERSION"));

    let mut config = OtsConfig::from_env();

    match args.command {
        Command::Info { proof, verbose } => {
            let file = read_proof(&proof)?;
            println!("{}", ots_client::ots::info(&file, verbose));
        }

        Command::Stamp {
            files,
            calendars,
            quorum,
        } => {
            if quorum.is_some() {
                config.quorum = quorum;
            }
            let client = OpenTimestamps::from_config(config)?;
            stamp(&client, &files, &calendars).await?;
        }

        Command::Upgrade { proof } => {
            let client = OpenTimestamps::from_config(config)?;
            let mut file = read_proof(&proof)?;

            if file.timestamp().is_timestamp_complete() {
                println!("Timestamp is already complete");
                return Ok(());
            }

            if client.upgrade_file(&mut file).await {
                fs::write(&proof, file.to_bytes())
                    .with_context(|| format!("failed to write {}", proof.display()))?;
                println!("Proof upgraded: {}", proof.display());
            }

            if file.timestamp().is_timestamp_complete() {
                println!("Success! Timestamp complete");
            } else {
                println!("Failure! Timestamp not complete");
            }
        }

        Command::Verify {
            proof,
            file,
            digest,
        } => {
            let client = OpenTimestamps::from_config(config)?;
            let detached = read_proof(&proof)?;

            let digest = match (digest, file) {
                (Some(hex_digest), _) => {
                    hex::decode(hex_digest.trim()).context("digest is not valid hex")?
                }
                (None, Some(path)) => hash_file(detached.file_hash_op(), &path)?,
                (None, None) => {
                    let path = proof.with_extension("");
                    hash_file(detached.file_hash_op(), &path)?
                }
            };

            let results = client.verify_file(&detached, &digest).await?;
            if results.is_empty() {
                anyhow::bail!("Timestamp not verified: pending confirmation in the blockchain");
            }

            for (chain, result) in &results {
                let name = match chain {
                    Chain::Bitcoin => "Bitcoin",
                    Chain::Litecoin => "Litecoin",
                };
                match result.date() {
                    Some(date) => println!(
                        "Success! {} block {} attests existence as of {}",
                        name, result.height, date
                    ),
                    None => println!("Success! {} block {} attests existence", name, result.height),
                }
            }
        }
    }

    Ok(())
}

/// Stamp `files` in one submission and write a proof next to each
async fn stamp(client: &OpenTimestamps, files: &[PathBuf], calendars: &[String]) -> anyhow::Result<()> {
    let mut outputs = Vec::with_capacity(files.len());
    let mut detached = Vec::with_capacity(files.len());

    for path in files {
        let out = proof_path(path);
        if out.exists() {
            anyhow::bail!("{} already exists", out.display());
        }

        let reader =
            fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        detached.push(DetachedTimestampFile::from_reader(Op::Sha256, reader)?);
        outputs.push(out);
    }

    client.stamp(&mut detached, calendars).await?;

    // a proof without attestations cannot be read back
    if detached
        .iter()
        .any(|f| f.timestamp().all_attestations().is_empty())
    {
        anyhow::bail!("no calendar accepted the submission");
    }

    for (file, out) in detached.iter().zip(&outputs) {
        let mut handle = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(out)
            .with_context(|| format!("failed to create {}", out.display()))?;
        handle.write_all(&file.to_bytes())?;
        println!("The timestamp proof '{}' has been created!", out.display());
    }

    Ok(())
}

fn read_proof(path: &Path) -> anyhow::Result<DetachedTimestampFile> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    DetachedTimestampFile::deserialize(&bytes)
        .with_context(|| format!("{} is not a valid proof", path.display()))
}

fn hash_file(op: &Op, path: &Path) -> anyhow::Result<Vec<u8>> {
    let reader = fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(op.hash_reader(reader)?)
}

fn proof_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".ots");
    PathBuf::from(name)
}
