use serde::Serialize;

use super::role::Role;
use crate::types::{Collection, Operation};

/// Static allowlist of roles permitted to perform a gated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy(&'static [Role]);

impl AccessPolicy {
    pub const NOBODY: AccessPolicy = AccessPolicy(&[]);
    pub const SUPER_ADMIN_ONLY: AccessPolicy = AccessPolicy(&[Role::SuperAdmin]);
    pub const ADMINS: AccessPolicy = AccessPolicy(&[Role::AdminMs, Role::AdminMsagri, Role::SuperAdmin]);
    pub const BUSINESS_AND_ADMINS: AccessPolicy = AccessPolicy(&[
        Role::UserBusiness,
        Role::AdminMs,
        Role::AdminMsagri,
        Role::SuperAdmin,
    ]);
    pub const ANY_ROLE: AccessPolicy = AccessPolicy(&Role::ALL);

    pub const fn new(roles: &'static [Role]) -> Self {
        Self(roles)
    }

    pub fn roles(&self) -> &'static [Role] {
        self.0
    }
}

impl Serialize for AccessPolicy {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Restricted field within a collection
#[derive(Debug, Clone, Copy)]
pub struct FieldAccess {
    pub field: &'static str,
    pub read: AccessPolicy,
    pub update: AccessPolicy,
}

/// Per-operation policies for one collection plus its restricted fields
#[derive(Debug, Clone, Copy)]
pub struct CollectionAccess {
    pub collection: Collection,
    pub read: AccessPolicy,
    pub create: AccessPolicy,
    pub update: AccessPolicy,
    pub delete: AccessPolicy,
    pub fields: &'static [FieldAccess],
}

impl CollectionAccess {
    pub fn policy(&self, operation: Operation) -> AccessPolicy {
        match operation {
            Operation::Read => self.read,
            Operation::Create => self.create,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldAccess> {
        self.fields.iter().find(|f| f.field == name)
    }
}

const USER_FIELDS: &[FieldAccess] = &[FieldAccess {
    field: "roles",
    read: AccessPolicy::SUPER_ADMIN_ONLY,
    update: AccessPolicy::SUPER_ADMIN_ONLY,
}];

const REPORT_FIELDS: &[FieldAccess] = &[FieldAccess {
    field: "status",
    read: AccessPolicy::ANY_ROLE,
    update: AccessPolicy::ADMINS,
}];

const DESTINATION_FIELDS: &[FieldAccess] = &[FieldAccess {
    field: "featured",
    read: AccessPolicy::ANY_ROLE,
    update: AccessPolicy::ADMINS,
}];

static USERS: CollectionAccess = CollectionAccess {
    collection: Collection::Users,
    read: AccessPolicy::ADMINS,
    create: AccessPolicy::SUPER_ADMIN_ONLY,
    update: AccessPolicy::SUPER_ADMIN_ONLY,
    delete: AccessPolicy::SUPER_ADMIN_ONLY,
    fields: USER_FIELDS,
};

static REPORTS: CollectionAccess = CollectionAccess {
    collection: Collection::Reports,
    read: AccessPolicy::ANY_ROLE,
    create: AccessPolicy::ANY_ROLE,
    update: AccessPolicy::ADMINS,
    delete: AccessPolicy::SUPER_ADMIN_ONLY,
    fields: REPORT_FIELDS,
};

static DESTINATIONS: CollectionAccess = CollectionAccess {
    collection: Collection::Destinations,
    read: AccessPolicy::ANY_ROLE,
    create: AccessPolicy::BUSINESS_AND_ADMINS,
    update: AccessPolicy::BUSINESS_AND_ADMINS,
    delete: AccessPolicy::ADMINS,
    fields: DESTINATION_FIELDS,
};

static CATEGORIES: CollectionAccess = CollectionAccess {
    collection: Collection::Categories,
    read: AccessPolicy::ANY_ROLE,
    create: AccessPolicy::ADMINS,
    update: AccessPolicy::ADMINS,
    delete: AccessPolicy::ADMINS,
    fields: &[],
};

static COMMENTS: CollectionAccess = CollectionAccess {
    collection: Collection::Comments,
    read: AccessPolicy::ANY_ROLE,
    create: AccessPolicy::ANY_ROLE,
    update: AccessPolicy::ADMINS,
    delete: AccessPolicy::ADMINS,
    fields: &[],
};

static MEDIA: CollectionAccess = CollectionAccess {
    collection: Collection::Media,
    read: AccessPolicy::ANY_ROLE,
    create: AccessPolicy::ANY_ROLE,
    update: AccessPolicy::ADMINS,
    delete: AccessPolicy::ADMINS,
    fields: &[],
};

/// Access configuration for a collection
pub fn collection_policies(collection: Collection) -> &'static CollectionAccess {
    match collection {
        Collection::Users => &USERS,
        Collection::Reports => &REPORTS,
        Collection::Destinations => &DESTINATIONS,
        Collection::Categories => &CATEGORIES,
        Collection::Comments => &COMMENTS,
        Collection::Media => &MEDIA,
    }
}
