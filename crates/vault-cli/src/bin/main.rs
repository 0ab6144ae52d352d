//! passvault CLI - generate passwords and keep them in an encrypted accounts file
//!
//! Every command opens the accounts file, performs one operation, and exits.
//! Secrets (generated or revealed passwords) go to stdout; status messages and
//! logs go to stderr.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

use vault_core::generator::{MAX_UI_LENGTH, MIN_UI_LENGTH};
use vault_core::{
    generate, CredentialStore, GeneratorSettings, PasswordRequirements, SettingsManager,
    VaultError, DEFAULT_ACCOUNTS_PATH,
};

const MIN_LENGTH: u64 = MIN_UI_LENGTH as u64;
const MAX_LENGTH: u64 = MAX_UI_LENGTH as u64;

/// passvault - Generate passwords and store them encrypted
#[derive(Parser, Debug)]
#[command(name = "passvault")]
#[command(version)]
#[command(about = "Generate passwords and store them in an encrypted accounts file")]
struct Cli {
    /// Accounts file to operate on
    #[arg(long, global = true, default_value = DEFAULT_ACCOUNTS_PATH)]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a random password
    Generate(GeneratorArgs),
    /// List stored account names
    List,
    /// Store a password for a new account
    Add {
        /// Account name
        name: String,
        /// Generate the password instead of prompting for it
        #[arg(long)]
        generate: bool,
        #[command(flatten)]
        generator: GeneratorArgs,
    },
    /// Remove an account
    Remove {
        /// Account name
        name: String,
    },
    /// Print the decrypted password of an account
    Reveal {
        /// Account name
        name: String,
    },
    /// Show or change the saved generator defaults
    Settings(GeneratorArgs),
}

/// Generator options; anything omitted falls back to the saved settings
#[derive(Args, Debug, Default, Clone, Copy)]
struct GeneratorArgs {
    /// Password length
    #[arg(long, value_parser = clap::value_parser!(u64).range(MIN_LENGTH..=MAX_LENGTH))]
    length: Option<u64>,
    /// Require an uppercase letter
    #[arg(long)]
    uppercase: Option<bool>,
    /// Require a digit
    #[arg(long)]
    digits: Option<bool>,
    /// Require a symbol
    #[arg(long)]
    symbols: Option<bool>,
}

impl GeneratorArgs {
    fn is_empty(&self) -> bool {
        self.length.is_none()
            && self.uppercase.is_none()
            && self.digits.is_none()
            && self.symbols.is_none()
    }

    /// Overlay the given options on top of `defaults`
    fn apply(&self, defaults: GeneratorSettings) -> GeneratorSettings {
        GeneratorSettings {
            length: self.length.map_or(defaults.length, |l| l as usize),
            requirements: PasswordRequirements {
                uppercase: self.uppercase.unwrap_or(defaults.requirements.uppercase),
                digits: self.digits.unwrap_or(defaults.requirements.digits),
                symbols: self.symbols.unwrap_or(defaults.requirements.symbols),
            },
        }
    }
}

/// Directory holding the accounts file, where settings live too
fn store_dir(accounts_file: &Path) -> PathBuf {
    match accounts_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn prompt_new_password(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    let password = rpassword::prompt_password(format!("Password for {}: ", name))?;
    let confirmation = rpassword::prompt_password("Confirm password: ")?;
    if password != confirmation {
        return Err("Passwords do not match".into());
    }
    Ok(password)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let dir = store_dir(&cli.file);

    match cli.command {
        Command::Generate(args) => {
            let settings = SettingsManager::new(&dir)?;
            let options = args.apply(settings.get().generator);
            println!("{}", generate(options.length, options.requirements)?);
        }
        Command::List => {
            let store = CredentialStore::open(&cli.file)?;
            if store.is_empty() {
                eprintln!("No accounts stored in {}", store.location().display());
            }
            for name in store.list() {
                println!("{}", name);
            }
        }
        Command::Add {
            name,
            generate,
            generator,
        } => {
            let mut store = CredentialStore::open(&cli.file)?;
            if generate {
                let settings = SettingsManager::new(&dir)?;
                let options = generator.apply(settings.get().generator);
                let password =
                    store.add_generated(&name, options.length, options.requirements)?;
                println!("{}", password.expose());
            } else {
                if !generator.is_empty() {
                    return Err("Generator options require --generate".into());
                }
                if store.contains(&name) {
                    return Err(VaultError::DuplicateAccount(name).into());
                }
                let password = prompt_new_password(&name)?;
                store.add(&name, &password)?;
            }
            eprintln!("Password successfully added");
        }
        Command::Remove { name } => {
            let mut store = CredentialStore::open(&cli.file)?;
            if store.remove(&name)? {
                eprintln!("Removed {}", name);
            } else {
                eprintln!("No account named {}", name);
            }
        }
        Command::Reveal { name } => {
            let store = CredentialStore::open(&cli.file)?;
            let secret = store.reveal(&name)?;
            println!("{}", secret.expose());
        }
        Command::Settings(args) => {
            let mut settings = SettingsManager::new(&dir)?;
            if !args.is_empty() {
                let mut updated = settings.get().clone();
                updated.generator = args.apply(updated.generator);
                settings.update(updated)?;
                debug!("Updated generator defaults in {:?}", settings.path());
            }
            let generator = settings.get().generator;
            println!("length    = {}", generator.length);
            println!("uppercase = {}", generator.requirements.uppercase);
            println!("digits    = {}", generator.requirements.digits);
            println!("symbols   = {}", generator.requirements.symbols);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only passwords and names
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<VaultError>() {
                Some(vault_error) if vault_error.kind().is_fatal() => {
                    eprintln!("fatal: {}", vault_error);
                }
                _ => eprintln!("error: {}", e),
            }
            ExitCode::FAILURE
        }
    }
}
