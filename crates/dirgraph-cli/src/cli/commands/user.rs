//! `dirgraph user <upn>` – show a user's profile.

use anyhow::Result;
use dirgraph_core::directory::Directory;

use super::load_profile;

pub fn run_user(dir: &mut Directory, upn: &str) -> Result<()> {
    let mut profile = load_profile(dir, upn)?;
    let group_count = profile.groups(dir)?.len().to_string();
    let user = profile.user();
    let rows = [
        ("Object ID", user.object_id.as_str()),
        ("Display name", profile.display_name().unwrap_or("-")),
        ("First name", profile.first_name().unwrap_or("-")),
        ("Surname", profile.surname().unwrap_or("-")),
        ("Job title", profile.job_title()),
        ("Department", profile.department()),
        ("Language", profile.language()),
        ("Phone", profile.phone_number()),
        ("Mobile", profile.mobile_number()),
        ("Fax", profile.fax_number()),
        ("Address", profile.address()),
        ("City", profile.city()),
        ("Country", profile.country()),
        ("Groups", group_count.as_str()),
    ];
    for (label, value) in rows {
        println!("{:<14} {}", label, value);
    }
    Ok(())
}
