//! `dirgraph groups <upn>` – list a user's groups.

use anyhow::Result;
use dirgraph_core::directory::Directory;

use super::load_profile;

pub fn run_groups(dir: &mut Directory, upn: &str) -> Result<()> {
    let mut profile = load_profile(dir, upn)?;
    let groups = profile.groups(dir)?;
    if groups.is_empty() {
        println!("{} is not a member of any group.", upn);
    }
    for g in groups {
        println!("{}", g);
    }
    Ok(())
}
