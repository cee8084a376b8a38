//! CLI command handlers, one per file.

mod completions;
mod groups;
mod is_in_group;
mod thumbnail;
mod user;
mod users;

pub use completions::run_completions;
pub use groups::run_groups;
pub use is_in_group::run_is_in_group;
pub use thumbnail::run_thumbnail;
pub use user::run_user;
pub use users::run_users;

use anyhow::{anyhow, Result};
use dirgraph_core::directory::{Directory, UserProfile};

/// Look up `upn`, failing when the tenant has no such user.
fn load_profile(dir: &mut Directory, upn: &str) -> Result<UserProfile> {
    UserProfile::load(dir, upn)?.ok_or_else(|| anyhow!("no user with principal name {}", upn))
}
