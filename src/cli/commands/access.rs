use clap::Subcommand;
use serde_json::json;

use crate::access::{collection_policies, has_required_role_public, AccessPolicy, AccessRequest, Principal};
use crate::cli::utils::{output_success, to_data};
use crate::cli::{parse_roles, OutputFormat};
use crate::types::{Collection, Operation};

#[derive(Subcommand)]
pub enum AccessCommands {
    #[command(about = "Check whether a role set may perform an operation")]
    Check {
        #[arg(long, help = "Comma-separated roles, e.g. USER,SUPER_ADMIN")]
        roles: String,
        #[arg(long, help = "Collection slug")]
        collection: String,
        #[arg(long, default_value = "read", help = "read, create, update or delete")]
        operation: String,
        #[arg(long, help = "Check a restricted field instead of the whole collection")]
        field: Option<String>,
    },

    #[command(about = "Show every collection's permissions for a role set")]
    Summary {
        #[arg(long, default_value = "", help = "Comma-separated roles; empty means no roles")]
        roles: String,
    },
}

/// Pick the policy being asked about
fn resolve_policy(collection: Collection, operation: Operation, field: Option<&str>) -> anyhow::Result<AccessPolicy> {
    let access = collection_policies(collection);
    match field {
        None => Ok(access.policy(operation)),
        Some(name) => {
            let field = access
                .field(name)
                .ok_or_else(|| anyhow::anyhow!("'{}' is not a restricted field of {}", name, collection))?;
            match operation {
                Operation::Read => Ok(field.read),
                Operation::Create | Operation::Update => Ok(field.update),
                Operation::Delete => Err(anyhow::anyhow!("fields have no delete policy")),
            }
        }
    }
}

pub async fn handle(cmd: AccessCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AccessCommands::Check { roles, collection, operation, field } => {
            let roles = parse_roles(&roles)?;
            let collection: Collection = collection.parse().map_err(anyhow::Error::msg)?;
            let operation: Operation = operation.parse().map_err(anyhow::Error::msg)?;
            let policy = resolve_policy(collection, operation, field.as_deref())?;

            let permitted = has_required_role_public(policy, Some(&roles));
            let target = match &field {
                Some(f) => format!("{}.{}", collection, f),
                None => collection.to_string(),
            };

            output_success(
                &output_format,
                &format!("{} {} {}", if permitted { "permit" } else { "deny" }, operation.as_str(), target),
                Some(json!({
                    "permitted": permitted,
                    "roles": roles.labels(),
                    "allowed_roles": policy,
                })),
            )
        }
        AccessCommands::Summary { roles } => {
            let roles = parse_roles(&roles)?;
            let principal = Principal::new("cli", roles);
            let req = AccessRequest::new(Some(&principal));

            let summaries: Vec<_> = Collection::ALL
                .into_iter()
                .map(|c| collection_policies(c).summary(&req))
                .collect();

            output_success(
                &output_format,
                &format!("Access for roles {:?}", principal.roles.labels()),
                Some(to_data(&summaries)?),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_policy_resolution() {
        let policy = resolve_policy(Collection::Users, Operation::Update, Some("roles")).unwrap();
        assert_eq!(policy, AccessPolicy::SUPER_ADMIN_ONLY);
        assert!(resolve_policy(Collection::Users, Operation::Delete, Some("roles")).is_err());
        assert!(resolve_policy(Collection::Media, Operation::Read, Some("alt")).is_err());
    }

    #[test]
    fn collection_policy_resolution() {
        let policy = resolve_policy(Collection::Reports, Operation::Delete, None).unwrap();
        assert_eq!(policy, AccessPolicy::SUPER_ADMIN_ONLY);
    }
}
