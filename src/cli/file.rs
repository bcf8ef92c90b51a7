//! Encrypt, decrypt, re-encrypt and re-decrypt commands.
//!
//! Single-file commands report through the `info!` line the codec emits;
//! the recursive ones also print a summary.

use crate::cli::{output, TargetArgs};
use crate::core::kms::KmsProvider;
use crate::core::session::Session;
use crate::error::Result;

pub fn encrypt(provider: KmsProvider, args: &TargetArgs) -> Result<()> {
    Session::open(&args.config)?.encrypt(provider, &args.target, &args.extension)?;
    Ok(())
}

pub fn decrypt(provider: KmsProvider, args: &TargetArgs) -> Result<()> {
    Session::open(&args.config)?.decrypt(provider, &args.target, &args.extension)?;
    Ok(())
}

pub fn re_encrypt(provider: KmsProvider, args: &TargetArgs) -> Result<()> {
    let count =
        Session::open(&args.config)?.re_encrypt(provider, &args.target, &args.extension)?;
    summary("re-encrypted", count, args);
    Ok(())
}

pub fn re_decrypt(provider: KmsProvider, args: &TargetArgs) -> Result<()> {
    let count =
        Session::open(&args.config)?.re_decrypt(provider, &args.target, &args.extension)?;
    summary("decrypted", count, args);
    Ok(())
}

fn summary(verb: &str, count: usize, args: &TargetArgs) {
    let target = output::path(&args.target.display().to_string());
    if count == 0 {
        output::warn(&format!("no matching files under {}", target));
    } else {
        let noun = if count == 1 { "file" } else { "files" };
        output::success(&format!("{} {} {} under {}", verb, count, noun, target));
    }
}
