//! `dirgraph thumbnail <upn> --out PATH` – save a user's photo.

use anyhow::{Context, Result};
use dirgraph_core::directory::Directory;
use std::fs;
use std::path::Path;

use super::load_profile;

pub fn run_thumbnail(dir: &mut Directory, upn: &str, out: &Path) -> Result<()> {
    let profile = load_profile(dir, upn)?;
    match profile.thumbnail(dir)? {
        Some(bytes) => {
            fs::write(out, &bytes).with_context(|| format!("write {}", out.display()))?;
            println!("Wrote {} bytes to {}", bytes.len(), out.display());
        }
        None => println!("{} has no thumbnail photo.", upn),
    }
    Ok(())
}
