//! bizcard server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `BIZCARD_*` environment variables, opens the SQLite mirror, connects to
//! Firestore when configured, and serves the HTTP API.
//!
//! # Password hash generation
//!
//! To generate the argon2 PHC string for `admin_password_hash`:
//!
//! ```text
//! cargo run -p bizcard-server -- --hash-password
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use bizcard_core::CardStore;
use bizcard_firestore::FirestoreCollection;
use bizcard_server::{AppState, ServerConfig};
use bizcard_store_sqlite::SqliteMirror;
use clap::Parser;
use rand_core::OsRng;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Digital business card server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.hash_password {
    let password = read_password()?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?
      .to_string();
    println!("{hash}");
    return Ok(());
  }

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("BIZCARD")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()
    .context("failed to read configuration")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let mirror_path = expand_tilde(&server_cfg.mirror_path);
  let mirror = SqliteMirror::open(&mirror_path)
    .await
    .with_context(|| format!("failed to open mirror at {mirror_path:?}"))?;

  let remote = match server_cfg.firestore.clone() {
    Some(fs) if fs.is_configured() => {
      tracing::info!(project = %fs.project_id, collection = %fs.collection, "using firestore");
      Some(FirestoreCollection::new(fs).context("failed to build firestore client")?)
    }
    _ => {
      tracing::warn!("firestore is not configured; running in offline mode");
      None
    }
  };

  if server_cfg.admin_password_hash.is_empty() {
    tracing::warn!("admin_password_hash is empty; admin routes will reject every request");
  }

  let store = CardStore::new(remote, mirror, server_cfg.store.clone());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let app = bizcard_server::router(AppState::new(store, server_cfg));

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read a password line from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
