//! Sigil CLI - generate keys, sign and verify files

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use sigil_keys::dsa::ParameterSizes;
use sigil_keys::ecdsa::Curve;
use sigil_keys::Algorithm;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod files;

use config::Config;

/// Sigil - Ed25519, ECDSA and DSA keys and signatures
#[derive(Parser)]
#[command(name = "sigil", version, about)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a key pair
    Keygen {
        /// Algorithm (ed25519, ecdsa, dsa)
        #[arg(short, long)]
        algorithm: Option<Algorithm>,

        /// ECDSA curve (P-256, P-384, P-521)
        #[arg(long)]
        curve: Option<Curve>,

        /// DSA parameter sizes (L2048N224, L2048N256, L3072N256)
        #[arg(long)]
        sizes: Option<ParameterSizes>,

        /// Reuse DSA parameters from a `DSA PARAMETERS` PEM file
        #[arg(long, value_name = "FILE")]
        params: Option<PathBuf>,

        /// Comment for the authorized-keys line
        #[arg(long)]
        comment: Option<String>,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,

        /// Output path for the private key; public files get `.pub.pem`
        /// and `.pub` appended
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Generate DSA domain parameters
    Params {
        /// Parameter sizes
        #[arg(long)]
        sizes: Option<ParameterSizes>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Sign a file
    Sign {
        /// Private key PEM
        #[arg(short, long)]
        key: PathBuf,

        /// File to sign (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Write the base64 signature here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify a signature
    Verify {
        /// Public key (PEM or authorized-keys line)
        #[arg(short = 'p', long)]
        public_key: PathBuf,

        /// Signed file (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Base64 signature file
        #[arg(short, long)]
        signature: PathBuf,
    },

    /// Re-encode a public key
    Convert {
        /// Public key (PEM or authorized-keys line)
        #[arg(short = 'p', long)]
        public_key: PathBuf,

        /// Target format
        #[arg(long, value_enum)]
        to: PublicFormat,

        /// Comment for the authorized-keys line
        #[arg(long)]
        comment: Option<String>,
    },

    /// Print the SHA-256 fingerprint of a key
    Fingerprint {
        /// Public or private key file
        #[arg(short, long)]
        key: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PublicFormat {
    Pem,
    Ssh,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Keygen {
            algorithm,
            curve,
            sizes,
            params,
            comment,
            force,
            output,
        } => {
            let request = config.keygen.resolve(algorithm, curve, sizes, comment)?;
            commands::keygen::cmd_keygen(&request, params.as_deref(), &output, force, cli.json)
        }

        Commands::Params { sizes, output } => {
            let sizes = match sizes {
                Some(sizes) => sizes,
                None => config.keygen.dsa_sizes()?,
            };
            commands::keygen::cmd_params(sizes, output.as_deref(), cli.json)
        }

        Commands::Sign { key, input, output } => {
            commands::sign::cmd_sign(&key, &input, output.as_deref(), cli.json)
        }

        Commands::Verify {
            public_key,
            input,
            signature,
        } => commands::sign::cmd_verify(&public_key, &input, &signature, cli.json),

        Commands::Convert {
            public_key,
            to,
            comment,
        } => commands::inspect::cmd_convert(&public_key, to, comment.as_deref()),

        Commands::Fingerprint { key } => commands::inspect::cmd_fingerprint(&key, cli.json),
    }
}
