//! Command line front end for resolving stored image references.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use upload_url_resolver::config::ResolverConfig;
use upload_url_resolver::logging::init_logging;
use upload_url_resolver::url_paths::{
  ImageUrlResolver, StoredKeySerializer, remap_legacy_upload_url,
};

#[derive(Debug, Parser)]
#[command(name = "upload-url-resolver", version, about = "Resolve stored image references into renderable URLs")]
struct Cli {
  /// API base URL; overrides the config file and `API_BASE_URL`.
  #[arg(long, global = true)]
  api_base: Option<String>,
  /// Configuration file (JSON or YAML). Defaults to discovery in the working directory.
  #[arg(long, global = true)]
  config: Option<PathBuf>,
  /// Log debug output to stderr.
  #[arg(short, long, global = true)]
  verbose: bool,
  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Resolve each reference and print one URL per line.
  Resolve {
    /// References to resolve.
    #[arg(required = true)]
    urls: Vec<String>,
  },
  /// Resolve the image fields of a quiz JSON document.
  Quiz {
    /// Input file; stdin when omitted.
    #[arg(long, short)]
    input: Option<PathBuf>,
  },
  /// Remap legacy upload references, printing an empty line for anything else.
  Legacy {
    /// References to remap.
    #[arg(required = true)]
    urls: Vec<String>,
  },
  /// Turn stored keys into the URLs the API sends to clients, using `uploadBaseUrl`.
  Serialize {
    /// Stored keys or legacy upload URLs.
    #[arg(required = true)]
    keys: Vec<String>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose)?;

  let config = load_config(&cli)?;
  let resolver = ImageUrlResolver::from_config(&config);
  let serializer = config.stored_key_serializer();

  let stdin = io::stdin();
  let stdout = io::stdout();
  run(
    &cli.command,
    &resolver,
    &serializer,
    &mut stdin.lock(),
    &mut stdout.lock(),
  )
}

fn load_config(cli: &Cli) -> Result<ResolverConfig> {
  let config = match &cli.config {
    Some(path) => ResolverConfig::from_path(path)
      .with_context(|| format!("failed to load config {}", path.display()))?,
    None => ResolverConfig::discover(Path::new(".")),
  };

  let mut config = config.with_env_overrides();
  if let Some(api_base) = &cli.api_base {
    config.api_base_url = api_base.clone();
  }
  Ok(config)
}

fn run<R, W>(
  command: &Command,
  resolver: &ImageUrlResolver,
  serializer: &StoredKeySerializer,
  input: &mut R,
  out: &mut W,
) -> Result<()>
where
  R: Read,
  W: Write,
{
  match command {
    Command::Resolve { urls } => {
      for url in urls {
        writeln!(out, "{}", resolver.resolve(Some(url)))?;
      }
    }
    Command::Quiz { input: path } => {
      let raw = match path {
        Some(path) => fs::read_to_string(path)
          .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
          let mut raw = String::new();
          input
            .read_to_string(&mut raw)
            .context("failed to read quiz JSON from stdin")?;
          raw
        }
      };

      let quiz: Value = serde_json::from_str(&raw).context("failed to parse quiz JSON")?;
      let resolved = resolver.resolve_quiz_value(&quiz);
      serde_json::to_writer_pretty(&mut *out, &resolved).context("failed to write quiz JSON")?;
      writeln!(out)?;
    }
    Command::Legacy { urls } => {
      for url in urls {
        writeln!(out, "{}", remap_legacy_upload_url(url).unwrap_or_default())?;
      }
    }
    Command::Serialize { keys } => {
      for key in keys {
        writeln!(out, "{}", serializer.serialize(Some(key)).unwrap_or_default())?;
      }
    }
  }

  out.flush()?;
  Ok(())
}
