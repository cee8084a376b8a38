//! User profile view with property fallbacks and cached group membership.

use super::{Directory, User};
use crate::dispatch::DispatchError;

const UNKNOWN: &str = "Unknown";
const DEFAULT_LANGUAGE: &str = "English";

/// A user looked up by UPN. Group membership is fetched once and cached for
/// the lifetime of the profile.
#[derive(Debug, Clone)]
pub struct UserProfile {
    user: User,
    groups: Option<Vec<String>>,
}

impl UserProfile {
    pub fn new(user: User) -> Self {
        Self { user, groups: None }
    }

    /// Look up `upn`; `None` if the tenant has no such user.
    pub fn load(directory: &mut Directory, upn: &str) -> Result<Option<Self>, DispatchError> {
        Ok(directory.user_by_upn(upn)?.map(Self::new))
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn first_name(&self) -> Option<&str> {
        self.user.given_name.as_deref()
    }

    pub fn surname(&self) -> Option<&str> {
        self.user.surname.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.user.display_name.as_deref()
    }

    pub fn job_title(&self) -> &str {
        or_unknown(&self.user.job_title)
    }

    pub fn language(&self) -> &str {
        self.user
            .preferred_language
            .as_deref()
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn mobile_number(&self) -> &str {
        or_unknown(&self.user.mobile)
    }

    pub fn fax_number(&self) -> &str {
        or_unknown(&self.user.facsimile_telephone_number)
    }

    pub fn phone_number(&self) -> &str {
        or_unknown(&self.user.telephone_number)
    }

    pub fn department(&self) -> &str {
        or_unknown(&self.user.department)
    }

    pub fn address(&self) -> &str {
        or_unknown(&self.user.street_address)
    }

    pub fn city(&self) -> &str {
        or_unknown(&self.user.city)
    }

    pub fn country(&self) -> &str {
        or_unknown(&self.user.country)
    }

    /// Groups the user belongs to; fetched on first use.
    pub fn groups(&mut self, directory: &mut Directory) -> Result<&[String], DispatchError> {
        if self.groups.is_none() {
            self.groups = Some(directory.member_of_groups(&self.user)?);
        }
        Ok(self.groups.as_deref().unwrap_or_default())
    }

    pub fn is_in_group(
        &mut self,
        directory: &mut Directory,
        group: &str,
    ) -> Result<bool, DispatchError> {
        Ok(self.groups(directory)?.iter().any(|g| g == group))
    }

    pub fn thumbnail(&self, directory: &mut Directory) -> Result<Option<Vec<u8>>, DispatchError> {
        directory.thumbnail(&self.user)
    }
}

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(UNKNOWN)
}
