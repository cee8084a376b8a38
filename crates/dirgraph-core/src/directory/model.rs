//! Lightly typed directory records.

use serde::{Deserialize, Serialize};

/// Collection envelope: `{"odata.metadata": "...", "value": [...]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// A user object. Only the properties the client reads are mapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub object_id: String,
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub user_principal_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub preferred_language: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub facsimile_telephone_number: Option<String>,
    #[serde(default)]
    pub telephone_number: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl User {
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new("users", &self.object_id)
    }
}

/// Object returned by a relationship query (e.g. a user's `memberOf`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencedObject {
    pub object_id: String,
    #[serde(default)]
    pub object_type: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Address of an entity: collection name plus object id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    pub collection: String,
    pub object_id: String,
}

impl EntityRef {
    pub fn new(collection: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            object_id: object_id.into(),
        }
    }

    /// Path of the entity relative to the tenant endpoint: `users('id')`.
    pub fn path(&self) -> String {
        format!("{}('{}')", self.collection, self.object_id)
    }
}
