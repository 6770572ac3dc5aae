use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Capability label attached to a principal by the identity layer.
///
/// The set is closed; every call site refers to this enum rather than to raw
/// role strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    UserBusiness,
    AdminMs,
    AdminMsagri,
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::User,
        Role::UserBusiness,
        Role::AdminMs,
        Role::AdminMsagri,
        Role::SuperAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::UserBusiness => "USER_BUSINESS",
            Role::AdminMs => "ADMIN_MS",
            Role::AdminMsagri => "ADMIN_MSAGRI",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| RoleParseError(s.to_string()))
    }
}

/// Roles held by a single principal. Order and duplicates carry no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

/// String entries of a role array. Any other shape carries no roles.
pub fn labels_from_value(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(label) => Some(label),
                other => {
                    tracing::debug!("Ignoring non-string role entry: {}", other);
                    None
                }
            })
            .collect(),
        Value::Null => Vec::new(),
        other => {
            tracing::debug!("Ignoring malformed role data: {}", other);
            Vec::new()
        }
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(RoleSet::from_labels(labels_from_value(value)))
    }
}

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw labels, dropping anything outside the closed set.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roles = BTreeSet::new();
        for label in labels {
            match label.as_ref().parse::<Role>() {
                Ok(role) => {
                    roles.insert(role);
                }
                Err(e) => tracing::debug!("Ignoring role label: {}", e),
            }
        }
        Self(roles)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    pub fn labels(&self) -> Vec<String> {
        self.iter().map(|r| r.as_str().to_string()).collect()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        roles.into_iter().collect()
    }
}

/// True iff the caller holds at least one role from `allowed`.
///
/// An absent or empty caller set never matches, and neither does an empty
/// allowlist.
pub fn has_required_role(allowed: &[Role], caller: Option<&RoleSet>) -> bool {
    match caller {
        Some(roles) if !roles.is_empty() => allowed.iter().any(|role| roles.contains(*role)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("super_admin".parse::<Role>(), Ok(Role::SuperAdmin));
        assert_eq!(" ADMIN_MSAGRI ".parse::<Role>(), Ok(Role::AdminMsagri));
        assert!("ADMIN".parse::<Role>().is_err());
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&Role::UserBusiness).unwrap();
        assert_eq!(json, "\"USER_BUSINESS\"");
        let role: Role = serde_json::from_str("\"ADMIN_MS\"").unwrap();
        assert_eq!(role, Role::AdminMs);
    }

    #[test]
    fn from_labels_drops_unknown_and_duplicates() {
        let roles = RoleSet::from_labels(["USER", "USER", "editor", "SUPER_ADMIN"]);
        assert_eq!(roles.len(), 2);
        assert!(roles.contains(Role::User));
        assert!(roles.contains(Role::SuperAdmin));
    }

    #[test]
    fn deserialize_keeps_known_string_labels() {
        let roles: RoleSet = serde_json::from_value(serde_json::json!(["USER", 5, "EDITOR", null])).unwrap();
        assert_eq!(roles, RoleSet::from([Role::User]));

        let roles: RoleSet = serde_json::from_value(serde_json::json!("SUPER_ADMIN")).unwrap();
        assert!(roles.is_empty());

        let roles: RoleSet = serde_json::from_value(serde_json::json!({"role": "USER"})).unwrap();
        assert!(roles.is_empty());
    }

    #[test]
    fn intersection_decides() {
        let caller = RoleSet::from([Role::User, Role::SuperAdmin]);
        assert!(has_required_role(&[Role::SuperAdmin], Some(&caller)));
        assert!(!has_required_role(&[Role::AdminMs], Some(&caller)));
    }

    #[test]
    fn missing_or_empty_inputs_deny() {
        let caller = RoleSet::from([Role::SuperAdmin]);
        assert!(!has_required_role(&[], Some(&caller)));
        assert!(!has_required_role(&Role::ALL, Some(&RoleSet::new())));
        assert!(!has_required_role(&Role::ALL, None));
    }
}
