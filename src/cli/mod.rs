//! Command-line interface.

pub mod completions;
pub mod config;
pub mod file;
pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::constants::DEFAULT_EXTENSION;
use crate::core::kms::KmsProvider;

/// cloudkey - Encrypt and decrypt files with key in the cloud.
#[derive(Parser)]
#[command(
    name = "cloudkey",
    about = "Encrypt and decrypt files with key in the cloud",
    version
)]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create configuration file
    #[command(visible_alias = "c")]
    Config {
        #[command(subcommand)]
        provider: ConfigProvider,
    },

    /// Encrypt file
    #[command(visible_alias = "en")]
    Encrypt {
        #[command(subcommand)]
        provider: ProviderArgs,
    },

    /// Decrypt file
    #[command(visible_alias = "de")]
    Decrypt {
        #[command(subcommand)]
        provider: ProviderArgs,
    },

    /// Re-encrypt files recursively, if an encrypted file already exists
    #[command(visible_alias = "ren")]
    ReEncrypt {
        #[command(subcommand)]
        provider: ProviderArgs,
    },

    /// Decrypt files recursively, if they carry the encrypted extension
    #[command(visible_alias = "rde")]
    ReDecrypt {
        #[command(subcommand)]
        provider: ProviderArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Provider sections of `config`.
#[derive(Subcommand)]
pub enum ConfigProvider {
    /// Create configuration file for GCP
    #[command(visible_alias = "g")]
    Gcp {
        #[command(subcommand)]
        method: GcpMethod,
    },

    /// Create configuration file for AWS
    #[command(visible_alias = "a")]
    Aws {
        #[command(subcommand)]
        method: AwsMethod,
    },
}

/// GCP authentication methods.
#[derive(Subcommand)]
pub enum GcpMethod {
    /// Use the gcloud (application-default) account
    #[command(visible_alias = "ga")]
    GcloudAccount {
        #[command(flatten)]
        key: GcpKeyArgs,
    },

    /// Use a service account JSON key
    #[command(visible_alias = "sa")]
    ServiceAccount {
        #[command(flatten)]
        key: GcpKeyArgs,
        /// Service account JSON key file
        #[arg(short = 's', long, default_value = "")]
        service_account_key: String,
    },
}

/// Arguments shared by both GCP methods.
#[derive(Args)]
pub struct GcpKeyArgs {
    /// Config file
    pub config: PathBuf,
    /// Project name
    #[arg(short = 'p', long)]
    pub project: String,
    /// Key ring location
    #[arg(short = 'l', long)]
    pub location: String,
    /// Key ring name
    #[arg(short = 'r', long)]
    pub keyring: String,
    /// Crypto key name
    #[arg(short = 'k', long)]
    pub key: String,
}

/// AWS authentication methods.
#[derive(Subcommand)]
pub enum AwsMethod {
    /// Use static credentials (at least one of -a/-s/-t)
    #[command(visible_alias = "st")]
    StaticCreds {
        /// Config file
        config: PathBuf,
        /// Access key id
        #[arg(short = 'a', long, default_value = "")]
        access_key_id: String,
        /// Secret access key
        #[arg(short = 's', long, default_value = "")]
        secret_access_key: String,
        /// Session token
        #[arg(short = 't', long, default_value = "")]
        access_token: String,
        /// Region name
        #[arg(short = 'r', long)]
        region: String,
        /// Crypto key id
        #[arg(short = 'k', long)]
        key: String,
    },

    /// Use a shared credentials file and profile
    #[command(visible_alias = "sh")]
    SharedCreds {
        /// Config file
        config: PathBuf,
        /// Credentials file (defaults to ~/.aws/credentials)
        #[arg(short = 'f', long, default_value = "")]
        cred_file: String,
        /// Profile name (defaults to the default profile)
        #[arg(short = 'p', long, default_value = "")]
        profile: String,
        /// Region name
        #[arg(short = 'r', long)]
        region: String,
        /// Crypto key id
        #[arg(short = 'k', long)]
        key: String,
    },
}

/// Provider choice for the file commands.
#[derive(Subcommand)]
pub enum ProviderArgs {
    /// Use GCP Cloud KMS
    #[command(visible_alias = "g")]
    Gcp(TargetArgs),

    /// Use AWS KMS
    #[command(visible_alias = "a")]
    Aws(TargetArgs),
}

impl ProviderArgs {
    pub fn split(&self) -> (KmsProvider, &TargetArgs) {
        match self {
            Self::Gcp(args) => (KmsProvider::Gcp, args),
            Self::Aws(args) => (KmsProvider::Aws, args),
        }
    }
}

/// Arguments shared by encrypt, decrypt, re-encrypt and re-decrypt.
#[derive(Args)]
pub struct TargetArgs {
    /// Config file
    #[arg(short = 'c', long)]
    pub config: PathBuf,
    /// Encrypted files extension
    #[arg(short = 'e', long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,
    /// Target file (or directory for re-encrypt/re-decrypt)
    #[arg(value_name = "PATH")]
    pub target: PathBuf,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    match command {
        Command::Config { provider } => config::execute(provider),
        Command::Encrypt { provider } => {
            let (provider, args) = provider.split();
            file::encrypt(provider, args)
        }
        Command::Decrypt { provider } => {
            let (provider, args) = provider.split();
            file::decrypt(provider, args)
        }
        Command::ReEncrypt { provider } => {
            let (provider, args) = provider.split();
            file::re_encrypt(provider, args)
        }
        Command::ReDecrypt { provider } => {
            let (provider, args) = provider.split();
            file::re_decrypt(provider, args)
        }
        Command::Completions { shell } => completions::execute(shell),
    }
}
