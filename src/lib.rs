//! cloudkey - Encrypt and decrypt files with a key held in the cloud.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── config        # Write provider profiles
//! │   ├── file          # encrypt / decrypt / re-encrypt / re-decrypt
//! │   ├── output        # Terminal output helpers
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # Profile load/save and validation
//!     ├── kms/          # Provider backends
//!     │   ├── mod       # KmsBackend trait
//!     │   ├── gcp       # GCP Cloud KMS
//!     │   └── aws       # AWS KMS
//!     ├── session       # Lazily connected provider clients
//!     ├── codec         # Single-file encrypt/decrypt
//!     └── walk          # Recursive re-encrypt/re-decrypt
//! ```
//!
//! No cryptography happens locally: file bytes go to the provider's
//! Encrypt/Decrypt API and the response is written next to the input.

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::config::Config;
pub use crate::core::kms::{KmsBackend, KmsProvider};
pub use crate::core::session::Session;
pub use crate::error::{Error, Result};

/// Test-only exports. Not part of the public API.
#[cfg(feature = "test-kms")]
#[doc(hidden)]
pub mod test {
    pub use crate::core::kms::mock::MockKms;
}
