//! Read operations against the directory, executed through the dispatcher.

mod model;
mod profile;

pub use model::{EntityRef, ReferencedObject, User};
pub use profile::UserProfile;

use anyhow::Result;
use model::Collection;

use crate::classify::{ErrorKind, RawFailure};
use crate::config::DirectoryConfig;
use crate::dispatch::{Attempt, DispatchError, Dispatcher};
use crate::session::EndpointSession;
use crate::transport::CurlTransport;

/// Named stream holding a user's photo.
pub const THUMBNAIL_PHOTO: &str = "thumbnailPhoto";

/// Directory client for one tenant.
///
/// Query results stay attached to the dispatcher's tracker until
/// [`Directory::release_tracked`] is called or the client is dropped.
pub struct Directory {
    dispatcher: Dispatcher,
}

impl Directory {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Build a client from validated configuration using the curl transport.
    pub fn from_config(cfg: &DirectoryConfig) -> Result<Self> {
        cfg.validate()?;
        let session = EndpointSession::new(cfg.connection_uri(), cfg.domain_name.clone());
        let dispatcher = Dispatcher::new(
            session,
            cfg.tenant_settings(),
            cfg.credential_provider(),
            Box::new(CurlTransport::new(cfg.curl_options())),
        );
        Ok(Self::new(dispatcher))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// Forget the entities attached by earlier queries; returns how many.
    pub fn release_tracked(&mut self) -> usize {
        self.dispatcher.release_tracked()
    }

    /// All users in the tenant.
    pub fn list_users(&mut self) -> Result<Vec<User>, DispatchError> {
        self.dispatcher.execute(|a| {
            let url = a.url("users");
            let users = a.get_json::<Collection<User>>(&url)?.value;
            attach_all(a, users.iter().map(|u| u.object_id.as_str()));
            Ok(users)
        })
    }

    /// Look a user up by user principal name (`name@tenant`).
    pub fn user_by_upn(&mut self, upn: &str) -> Result<Option<User>, DispatchError> {
        let filter = format!("userPrincipalName eq '{}'", upn.replace('\'', "''"));
        self.dispatcher.execute(|a| {
            let users_url = a.url("users");
            let mut url = url::Url::parse(&users_url)
                .map_err(|e| RawFailure::new(format!("invalid endpoint {}: {}", users_url, e)))?;
            url.query_pairs_mut().append_pair("$filter", &filter);
            let user = a
                .get_json::<Collection<User>>(url.as_str())?
                .value
                .into_iter()
                .next();
            if let Some(u) = &user {
                a.tracker().attach(u.object_id.clone());
            }
            Ok(user)
        })
    }

    /// Objects linked to `object_id` through `relation`:
    /// `GET {base}/{collection}('{object_id}')/{relation}`.
    pub fn raw_query(
        &mut self,
        collection: &str,
        relation: &str,
        object_id: &str,
    ) -> Result<Vec<ReferencedObject>, DispatchError> {
        let path = format!(
            "{}/{}",
            EntityRef::new(collection, object_id).path(),
            relation
        );
        self.dispatcher.execute(|a| {
            let url = a.url(&path);
            let objects = a.get_json::<Collection<ReferencedObject>>(&url)?.value;
            attach_all(a, objects.iter().map(|o| o.object_id.as_str()));
            Ok(objects)
        })
    }

    /// Display names of the groups `user` is a direct member of, in service order.
    pub fn member_of_groups(&mut self, user: &User) -> Result<Vec<String>, DispatchError> {
        let objects = self.raw_query("users", "memberOf", &user.object_id)?;
        Ok(objects
            .into_iter()
            .filter(|o| o.object_type == "Group")
            .filter_map(|o| o.display_name)
            .collect())
    }

    /// Bytes of the named stream on `entity`. Missing streams (and streams the
    /// service refuses to address) are `None` rather than an error.
    pub fn fetch_stream(
        &mut self,
        entity: &EntityRef,
        resource: &str,
    ) -> Result<Option<Vec<u8>>, DispatchError> {
        let path = format!("{}/{}", entity.path(), resource);
        let result = self.dispatcher.execute(|a| {
            let url = a.url(&path);
            a.get(&url).map(|r| r.body)
        });
        match result {
            Ok(body) if body.is_empty() => Ok(None),
            Ok(body) => Ok(Some(body)),
            Err(e) if is_absent(&e) => {
                tracing::debug!("stream {} on {} is absent: {}", resource, entity.path(), e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn thumbnail(&mut self, user: &User) -> Result<Option<Vec<u8>>, DispatchError> {
        self.fetch_stream(&user.entity_ref(), THUMBNAIL_PHOTO)
    }
}

fn attach_all<'i>(attempt: &mut Attempt<'_>, ids: impl Iterator<Item = &'i str>) {
    let tracker = attempt.tracker();
    for id in ids {
        tracker.attach(id);
    }
}

fn is_absent(e: &DispatchError) -> bool {
    matches!(
        e.kind(),
        Some(ErrorKind::ResourceNotFound) | Some(ErrorKind::BadRequest)
    )
}
