//! Mock KMS backend for testing.
//!
//! Reverses the payload and prepends a marker. NOT cryptographically
//! secure, it only exercises the plumbing without a cloud account.

use std::cell::Cell;

use super::{KmsBackend, KmsProvider};
use crate::error::{KmsError, Result};

const MARKER: &[u8] = b"mock-kms:";

#[derive(Debug)]
pub struct MockKms {
    provider: KmsProvider,
    calls: Cell<usize>,
    fail_on_call: Option<usize>,
}

impl MockKms {
    pub fn new(provider: KmsProvider) -> Self {
        Self {
            provider,
            calls: Cell::new(0),
            fail_on_call: None,
        }
    }

    /// A mock whose `n`-th call (1-based) is rejected.
    pub fn failing_on(provider: KmsProvider, n: usize) -> Self {
        Self {
            fail_on_call: Some(n),
            ..Self::new(provider)
        }
    }

    /// Number of encrypt/decrypt calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn record_call(&self) -> bool {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        self.fail_on_call == Some(n)
    }
}

impl KmsBackend for MockKms {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        if self.record_call() {
            return Err(KmsError::Encryption("mock provider rejected the request".into()).into());
        }
        let mut out = MARKER.to_vec();
        out.extend(plaintext.iter().rev());
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if self.record_call() {
            return Err(KmsError::Decryption("mock provider rejected the request".into()).into());
        }
        let body = ciphertext
            .strip_prefix(MARKER)
            .ok_or_else(|| KmsError::Decryption("not a mock ciphertext".into()))?;
        Ok(body.iter().rev().copied().collect())
    }

    fn provider(&self) -> KmsProvider {
        self.provider
    }
}
