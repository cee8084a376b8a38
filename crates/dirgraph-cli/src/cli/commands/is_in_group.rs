//! `dirgraph is-in-group <upn> <group>` – print true or false.

use anyhow::Result;
use dirgraph_core::directory::Directory;

use super::load_profile;

pub fn run_is_in_group(dir: &mut Directory, upn: &str, group: &str) -> Result<()> {
    let mut profile = load_profile(dir, upn)?;
    println!("{}", profile.is_in_group(dir, group)?);
    Ok(())
}
