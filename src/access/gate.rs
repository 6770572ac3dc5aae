use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::policy::{AccessPolicy, CollectionAccess};
use super::role::{has_required_role, RoleSet};
use crate::types::{Collection, Operation};

/// Authenticated caller as supplied by the identity layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub roles: RoleSet,
}

impl Principal {
    pub fn new(id: impl Into<String>, roles: RoleSet) -> Self {
        Self {
            id: id.into(),
            email: None,
            roles,
        }
    }
}

/// Request context handed to access gates. The caller may be absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessRequest<'a> {
    pub user: Option<&'a Principal>,
}

impl<'a> AccessRequest<'a> {
    pub fn new(user: Option<&'a Principal>) -> Self {
        Self { user }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn is_anonymous(&self) -> bool {
        self.user.is_none()
    }

    fn roles(&self) -> Option<&'a RoleSet> {
        self.user.map(|u| &u.roles)
    }
}

/// Gate for a single restricted field
pub fn field_access(policy: AccessPolicy, req: &AccessRequest<'_>) -> bool {
    has_required_role(policy.roles(), req.roles())
}

/// Gate for a whole collection operation
pub fn collection_access(policy: AccessPolicy, req: &AccessRequest<'_>) -> bool {
    has_required_role(policy.roles(), req.roles())
}

/// Same contract as the request gates, for role data fetched elsewhere
/// (e.g. deciding which controls a client renders).
pub fn has_required_role_public(policy: AccessPolicy, roles: Option<&RoleSet>) -> bool {
    has_required_role(policy.roles(), roles)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldPermissions {
    pub read: bool,
    pub update: bool,
}

/// What a caller may do with a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessSummary {
    pub collection: Collection,
    pub read: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
    pub fields: BTreeMap<String, FieldPermissions>,
}

impl CollectionAccess {
    pub fn permits(&self, operation: Operation, req: &AccessRequest<'_>) -> bool {
        collection_access(self.policy(operation), req)
    }

    pub fn summary(&self, req: &AccessRequest<'_>) -> AccessSummary {
        let fields = self
            .fields
            .iter()
            .map(|f| {
                (
                    f.field.to_string(),
                    FieldPermissions {
                        read: field_access(f.read, req),
                        update: field_access(f.update, req),
                    },
                )
            })
            .collect();

        AccessSummary {
            collection: self.collection,
            read: self.permits(Operation::Read, req),
            create: self.permits(Operation::Create, req),
            update: self.permits(Operation::Update, req),
            delete: self.permits(Operation::Delete, req),
            fields,
        }
    }

    /// Remove restricted fields the caller may not read. Non-object values are left as-is.
    pub fn redact(&self, doc: &mut Value, req: &AccessRequest<'_>) {
        if let Value::Object(map) = doc {
            for f in self.fields {
                if !field_access(f.read, req) {
                    map.remove(f.field);
                }
            }
        }
    }

    /// Remove restricted fields the caller may not write, returning what was dropped.
    pub fn strip_unwritable(&self, doc: &mut Value, req: &AccessRequest<'_>) -> Vec<String> {
        let mut dropped = Vec::new();
        if let Value::Object(map) = doc {
            for f in self.fields {
                if !field_access(f.update, req) && map.remove(f.field).is_some() {
                    dropped.push(f.field.to_string());
                }
            }
        }
        dropped
    }
}
