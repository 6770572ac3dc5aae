pub mod role;
pub mod policy;
pub mod gate;

pub use role::{has_required_role, Role, RoleParseError, RoleSet};
pub use policy::{collection_policies, AccessPolicy, CollectionAccess, FieldAccess};
pub use gate::{
    collection_access, field_access, has_required_role_public, AccessRequest, AccessSummary,
    FieldPermissions, Principal,
};
