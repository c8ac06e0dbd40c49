//! keytrust CLI: the `ktr` command.
//!
//! Manages a local keyring of public-key certificates and their trust
//! levels, and builds the recipient list for a message.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use keytrust::certificate::PublicCertificate;
use keytrust::time::micros_to_datetime;
use keytrust::{
    Certificate, FileTrustDb, KeyStore, KeytrustPaths, RecipientError, RecipientListBuilder,
    StdTty, TrustConfig, TrustDb, TrustLevel,
};

// ── Store helpers ─────────────────────────────────────────────────────────────

fn open_stores() -> Result<(KeyStore, FileTrustDb)> {
    let paths = KeytrustPaths::from_env().context("cannot locate keytrust home")?;
    let keys = KeyStore::new(paths.keys_dir()).context("failed to open key store")?;
    let trust = FileTrustDb::new(paths.trust_dir()).context("failed to open trust database")?;
    Ok((keys, trust))
}

fn lookup(keys: &KeyStore, name: &str) -> Result<Certificate> {
    keys.find_by_name(name)
        .with_context(|| format!("no certificate matches '{name}'"))
}

// ── Duration helpers ──────────────────────────────────────────────────────────

/// Parse a duration string like "24h", "7d", "365d" or "1d12h".
/// Returns the duration as microseconds.
fn parse_duration_to_micros(s: &str) -> Result<u64> {
    let s = s.trim();
    let mut total_micros: u64 = 0;
    let mut current = String::new();

    for ch in s.chars() {
        if ch.is_ascii_digit() {
            current.push(ch);
        } else {
            let val: u64 = current
                .parse()
                .map_err(|_| anyhow!("invalid duration: {s}"))?;
            current.clear();
            let unit_secs: u64 = match ch {
                'h' => 3600,
                'd' => 86400,
                'm' => 60,
                's' => 1,
                _ => return Err(anyhow!("unknown duration unit '{}' in '{s}'", ch)),
            };
            total_micros = val
                .checked_mul(unit_secs * 1_000_000)
                .and_then(|micros| total_micros.checked_add(micros))
                .ok_or_else(|| anyhow!("duration too large: {s}"))?;
        }
    }

    if !current.is_empty() {
        return Err(anyhow!("duration '{s}' is missing a unit (h/d/m/s)"));
    }
    if total_micros == 0 {
        return Err(anyhow!("duration must be > 0"));
    }
    Ok(total_micros)
}

fn apply_expiry(cert: Certificate, expires: Option<&str>) -> Result<Certificate> {
    match expires {
        Some(duration) => {
            let lifetime = parse_duration_to_micros(duration)?;
            let expires_at = cert
                .created_at
                .checked_add(lifetime)
                .ok_or_else(|| anyhow!("duration too large: {duration}"))?;
            Ok(cert.with_expiry(expires_at))
        }
        None => Ok(cert),
    }
}

fn key_line<C: PublicCertificate>(cert: &C) -> String {
    format!(
        "{:4}{}/{} {} {}",
        cert.nbits(),
        cert.algo().letter(),
        cert.key_id(),
        cert.date_string(),
        keytrust::certificate::printable_user_id(cert.user_id())
    )
}

// ── CLI structure ─────────────────────────────────────────────────────────────

/// keytrust CLI: manage certificates and trust, build recipient lists.
#[derive(Parser, Debug)]
#[command(
    name = "ktr",
    about = "keytrust CLI",
    version,
    long_about = "ktr: keytrust CLI\n\nManage a keyring of public-key certificates and their trust levels,\nand decide which recipients a message can be encrypted to."
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an Ed25519 key and store its certificate
    Keygen {
        /// User id, e.g. "Alice <alice@example.org>"
        #[arg(long)]
        user_id: String,

        /// Lifetime of the key (e.g. 30d, 365d)
        #[arg(long)]
        expires: Option<String>,

        /// Print the secret key (it is not stored anywhere)
        #[arg(long)]
        print_secret: bool,
    },

    /// Add an existing Ed25519 public key
    Add {
        /// Public key as 64 hex digits
        #[arg(long)]
        ed25519: String,

        /// User id, e.g. "Bob <bob@example.org>"
        #[arg(long)]
        user_id: String,

        /// Lifetime of the key (e.g. 30d, 365d)
        #[arg(long)]
        expires: Option<String>,
    },

    /// Import a certificate JSON file
    Import {
        /// Path to the certificate file
        file: std::path::PathBuf,
    },

    /// Print a certificate as JSON
    Export {
        /// Key id or user id
        key: String,
    },

    /// List certificates with their trust levels
    List,

    /// Inspect or assign trust levels
    Trust {
        #[command(subcommand)]
        subcommand: TrustCommands,
    },

    /// Build the recipient list for the given names
    Recipients {
        /// Key ids or user ids of the recipients
        names: Vec<String>,

        /// Never prompt
        #[arg(long)]
        batch: bool,

        /// Answer "no" to every question
        #[arg(long)]
        answer_no: bool,
    },
}

#[derive(Subcommand, Debug)]
enum TrustCommands {
    /// Assign a trust level (undefined, never, marginal, fully, ultimate)
    Set {
        /// Key id or user id
        key: String,

        /// Trust level
        level: String,
    },

    /// Show the trust level of a key
    Show {
        /// Key id or user id
        key: String,
    },
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    let result = match cli.command {
        Commands::Keygen {
            user_id,
            expires,
            print_secret,
        } => cmd_keygen(&user_id, expires.as_deref(), print_secret),
        Commands::Add {
            ed25519,
            user_id,
            expires,
        } => cmd_add(&ed25519, &user_id, expires.as_deref()),
        Commands::Import { file } => cmd_import(&file),
        Commands::Export { key } => cmd_export(&key),
        Commands::List => cmd_list(cli.verbose),
        Commands::Trust { subcommand } => match subcommand {
            TrustCommands::Set { key, level } => cmd_trust_set(&key, &level),
            TrustCommands::Show { key } => cmd_trust_show(&key),
        },
        Commands::Recipients {
            names,
            batch,
            answer_no,
        } => cmd_recipients(&names, &TrustConfig { batch, answer_no }),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        let closed = e
            .downcast_ref::<RecipientError>()
            .is_some_and(RecipientError::is_terminal_closed);
        std::process::exit(if closed { 2 } else { 1 });
    }
}

// ── Command implementations ───────────────────────────────────────────────────

/// `ktr keygen --user-id UID [--expires DURATION] [--print-secret]`
fn cmd_keygen(user_id: &str, expires: Option<&str>, print_secret: bool) -> Result<()> {
    let (keys, _) = open_stores()?;
    let (cert, secret) = Certificate::generate_ed25519_keypair(user_id);
    let cert = apply_expiry(cert, expires)?;
    let id = keys.save(&cert).context("failed to store certificate")?;

    println!("Created key {}", id.long());
    println!("  {}", key_line(&cert));
    if print_secret {
        println!("  Secret: {}", hex::encode(secret.to_bytes()));
    }
    Ok(())
}

/// `ktr add --ed25519 HEX --user-id UID [--expires DURATION]`
fn cmd_add(key_hex: &str, user_id: &str, expires: Option<&str>) -> Result<()> {
    let (keys, _) = open_stores()?;
    let cert = Certificate::from_ed25519_hex(key_hex, user_id).context("invalid public key")?;
    let cert = apply_expiry(cert, expires)?;
    let id = keys.save(&cert).context("failed to store certificate")?;
    println!("Added key {}", id.long());
    Ok(())
}

/// `ktr import FILE`
fn cmd_import(file: &std::path::Path) -> Result<()> {
    let (keys, _) = open_stores()?;
    let id = keys
        .import_file(file)
        .with_context(|| format!("failed to import {}", file.display()))?;
    println!("Imported key {}", id.long());
    Ok(())
}

/// `ktr export KEY`
fn cmd_export(key: &str) -> Result<()> {
    let (keys, _) = open_stores()?;
    let cert = lookup(&keys, key)?;
    let json = serde_json::to_string_pretty(&cert).context("failed to serialize certificate")?;
    println!("{json}");
    Ok(())
}

/// `ktr list`
fn cmd_list(verbose: bool) -> Result<()> {
    let (keys, mut trust) = open_stores()?;
    let certs = keys.list().context("failed to read key store")?;
    if certs.is_empty() {
        println!("No certificates.");
        return Ok(());
    }
    for cert in &certs {
        let level = trust
            .check_trust(cert)
            .map(|l| l.to_string())
            .unwrap_or_else(|e| format!("error: {e}"));
        println!("{} [{}]", key_line(cert), level);
        if verbose {
            println!("      id:      {}", cert.key_id().long());
            println!("      created: {}", micros_to_datetime(cert.created_at));
            if let Some(exp) = cert.expires_at {
                println!("      expires: {}", micros_to_datetime(exp));
            }
        }
    }
    Ok(())
}

/// `ktr trust set KEY LEVEL`
fn cmd_trust_set(key: &str, level: &str) -> Result<()> {
    let (keys, trust) = open_stores()?;
    let cert = lookup(&keys, key)?;
    let level: TrustLevel = level.parse().context("invalid trust level")?;
    trust
        .set_trust_level(&cert.key_id(), level)
        .context("failed to update trust database")?;
    println!("{} is now {}", cert.key_id(), level);
    Ok(())
}

/// `ktr trust show KEY`
fn cmd_trust_show(key: &str) -> Result<()> {
    let (keys, mut trust) = open_stores()?;
    let cert = lookup(&keys, key)?;
    let level = trust
        .check_trust(&cert)
        .context("failed to read trust database")?;
    println!("{}", key_line(&cert));
    println!("  Trust: {level}");
    if let Some(record) = trust.load_record(&cert.key_id())? {
        println!("  Since: {}", micros_to_datetime(record.inserted_at));
    }
    Ok(())
}

/// `ktr recipients [--batch] [--answer-no] NAME...`
fn cmd_recipients(names: &[String], config: &TrustConfig) -> Result<()> {
    let (mut keys, mut trust) = open_stores()?;
    log::debug!("building recipient list for {} name(s)", names.len());
    let mut tty = StdTty;
    let mut builder = RecipientListBuilder::new(&mut keys, &mut trust, &mut tty, config);

    let outcome = builder.build(names);
    for skipped in builder.skipped() {
        eprintln!("skipped '{}': {}", skipped.name, skipped.error);
    }
    for (name, reason) in builder.rejected() {
        eprintln!("not using '{name}': {reason:?}");
    }

    let list = outcome?;
    println!("{} recipient(s):", list.len());
    for cert in list.certificates() {
        println!("  {}", key_line(cert));
    }
    Ok(())
}
