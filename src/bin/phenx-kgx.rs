//! phenx-kgx CLI: convert the PhenX cross-reference workbook to KGX.
//!
//! Usage:
//!   phenx-kgx run [--config path] [--input file] [--data-dir dir] ...
//!   phenx-kgx digest <file> [--write]
//!   phenx-kgx show-config [--config path]

use clap::{Parser, Subcommand};
use phenx_kgx::source::{file_digest, write_digest};
use phenx_kgx::{Pipeline, PipelineConfig, UnknownCategoryPolicy};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "phenx-kgx",
    version,
    about = "Convert the PhenX protocol cross-reference to KGX nodes/edges"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download, convert and write nodes.jsonl / edges.jsonl
    Run {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print the SHA-256 digest of a file
    Digest {
        /// File to fingerprint
        path: PathBuf,
        /// Also write the digest to the sidecar file
        #[arg(long)]
        write: bool,
        /// Sidecar file to write
        #[arg(long, default_value = phenx_kgx::config::DEFAULT_DIGEST_FILE)]
        digest_file: PathBuf,
    },
    /// Print the effective configuration as YAML
    ShowConfig {
        #[command(flatten)]
        overrides: Overrides,
    },
}

/// Settings layered over the YAML file
#[derive(clap::Args)]
struct Overrides {
    /// YAML configuration file
    #[arg(short, long, env = "PHENX_KGX_CONFIG")]
    config: Option<PathBuf>,
    /// Local workbook (skips the download)
    #[arg(long, env = "PHENX_KGX_INPUT")]
    input: Option<PathBuf>,
    /// Workbook URL
    #[arg(long, env = "PHENX_KGX_SOURCE_URL")]
    source_url: Option<String>,
    /// Directory for the downloaded workbook and output files
    #[arg(long, env = "PHENX_KGX_DATA_DIR")]
    data_dir: Option<PathBuf>,
    /// Sidecar file for the workbook digest
    #[arg(long, env = "PHENX_KGX_DIGEST_FILE")]
    digest_file: Option<PathBuf>,
    /// Node normalization endpoint
    #[arg(long, env = "PHENX_KGX_NORMALIZER_URL")]
    normalizer_url: Option<String>,
    /// Curies per normalization request
    #[arg(long)]
    batch_size: Option<usize>,
    /// Per-request normalizer timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// reject | pass-through | drop
    #[arg(long)]
    unknown_category: Option<UnknownCategoryPolicy>,
}

impl Overrides {
    fn resolve(self) -> Result<PipelineConfig, String> {
        let mut config = PipelineConfig::load(self.config.as_deref())
            .map_err(|e| format!("failed to load configuration: {}", e))?;
        if let Some(input) = self.input {
            config.input = Some(input);
        }
        if let Some(url) = self.source_url {
            config.source_url = url;
        }
        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
        if let Some(file) = self.digest_file {
            config.digest_file = file;
        }
        if let Some(url) = self.normalizer_url {
            config.normalizer.url = url;
        }
        if let Some(size) = self.batch_size {
            config.normalizer.batch_size = size;
        }
        if let Some(secs) = self.timeout_secs {
            config.normalizer.timeout_secs = Some(secs);
        }
        if let Some(policy) = self.unknown_category {
            config.unknown_category = policy;
        }
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_run(overrides: Overrides) -> i32 {
    let config = match overrides.resolve() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let pipeline = match Pipeline::from_config(config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    // One thread, one request at a time
    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to create tokio runtime: {}", e);
            return 1;
        }
    };

    rt.block_on(async {
        let http = reqwest::Client::new();
        match pipeline.run(&http).await {
            Ok(report) => {
                println!("source:      {}", report.source.display());
                println!("sha256:      {}", report.digest);
                println!("rows:        {}", report.build.rows);
                println!("dup edges:   {}", report.build.duplicate_edges);
                println!("unresolved:  {}", report.unresolved.len());
                println!("nodes:       {} -> {}", report.nodes_written, report.nodes_path.display());
                println!("edges:       {} -> {}", report.edges_written, report.edges_path.display());
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        }
    })
}

fn cmd_digest(path: &Path, write: bool, digest_file: &Path) -> i32 {
    let digest = match file_digest(path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: cannot hash '{}': {}", path.display(), e);
            return 1;
        }
    };
    println!("{}", digest);
    if write {
        if let Err(e) = write_digest(digest_file, &digest) {
            eprintln!("Error: cannot write '{}': {}", digest_file.display(), e);
            return 1;
        }
    }
    0
}

fn cmd_show_config(overrides: Overrides) -> i32 {
    let yaml = overrides
        .resolve()
        .and_then(|config| config.to_yaml().map_err(|e| e.to_string()));
    match yaml {
        Ok(yaml) => {
            print!("{}", yaml);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Run { overrides } => cmd_run(overrides),
        Commands::Digest { path, write, digest_file } => cmd_digest(&path, write, &digest_file),
        Commands::ShowConfig { overrides } => cmd_show_config(overrides),
    };
    std::process::exit(code);
}
