//! `dirgraph users` – list all users in the tenant.

use anyhow::Result;
use dirgraph_core::directory::Directory;

pub fn run_users(dir: &mut Directory) -> Result<()> {
    let users = dir.list_users()?;
    if users.is_empty() {
        println!("No users in tenant.");
        return Ok(());
    }
    println!("{:<38} {:<40} {}", "OBJECT ID", "PRINCIPAL NAME", "DISPLAY NAME");
    for u in users {
        println!(
            "{:<38} {:<40} {}",
            u.object_id,
            u.user_principal_name.as_deref().unwrap_or("-"),
            u.display_name.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
