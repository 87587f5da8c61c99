//! Identity service operations
//!
//! Typed lookups and mutations against the identity API: projects, users,
//! roles, domains, and project-level role assignments.

use super::client::ApiClient;
use anyhow::{Context, Result};
use serde_json::{json, Value};

/// Project (tenant) information
#[derive(Debug, Clone)]
pub struct Project {
    pub id: String,
    pub name: String,
}

impl From<&Value> for Project {
    fn from(value: &Value) -> Self {
        Self {
            id: str_field(value, "id"),
            name: str_field(value, "name"),
        }
    }
}

/// User information
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl From<&Value> for User {
    fn from(value: &Value) -> Self {
        Self {
            id: str_field(value, "id"),
            name: str_field(value, "name"),
        }
    }
}

/// Role information
#[derive(Debug, Clone)]
pub struct Role {
    pub id: String,
    pub name: String,
}

impl From<&Value> for Role {
    fn from(value: &Value) -> Self {
        Self {
            id: str_field(value, "id"),
            name: str_field(value, "name"),
        }
    }
}

/// Domain information
#[derive(Debug, Clone)]
pub struct Domain {
    pub id: String,
    pub name: String,
    pub enabled: bool,
}

impl From<&Value> for Domain {
    fn from(value: &Value) -> Self {
        Self {
            id: str_field(value, "id"),
            name: str_field(value, "name"),
            enabled: value.get("enabled").and_then(|v| v.as_bool()).unwrap_or(true),
        }
    }
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("-")
        .to_string()
}

fn collection<'a>(response: &'a Value, key: &str) -> Vec<&'a Value> {
    response
        .get(key)
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().collect())
        .unwrap_or_default()
}

// =============================================================================
// Listing and lookups
// =============================================================================

/// List all projects
pub async fn list_projects(client: &ApiClient) -> Result<Vec<Project>> {
    let response = client.get(&client.identity_url("projects")).await?;
    Ok(collection(&response, "projects")
        .into_iter()
        .map(Project::from)
        .collect())
}

/// List all users
pub async fn list_users(client: &ApiClient) -> Result<Vec<User>> {
    let response = client.get(&client.identity_url("users")).await?;
    Ok(collection(&response, "users")
        .into_iter()
        .map(User::from)
        .collect())
}

/// List all roles
pub async fn list_roles(client: &ApiClient) -> Result<Vec<Role>> {
    let response = client.get(&client.identity_url("roles")).await?;
    Ok(collection(&response, "roles")
        .into_iter()
        .map(Role::from)
        .collect())
}

/// List all domains
pub async fn list_domains(client: &ApiClient) -> Result<Vec<Domain>> {
    let response = client.get(&client.identity_url("domains")).await?;
    Ok(collection(&response, "domains")
        .into_iter()
        .map(Domain::from)
        .collect())
}

async fn find_by_name(client: &ApiClient, path: &str, key: &str, name: &str) -> Result<Option<Value>> {
    let url = client.identity_url(&format!("{}?name={}", path, urlencoding::encode(name)));
    let response = client.get(&url).await?;
    Ok(collection(&response, key).first().map(|v| (*v).clone()))
}

/// Find a project by exact name
pub async fn find_project_by_name(client: &ApiClient, name: &str) -> Result<Option<Project>> {
    Ok(find_by_name(client, "projects", "projects", name)
        .await?
        .as_ref()
        .map(Project::from))
}

/// Find a user by exact name
pub async fn find_user_by_name(client: &ApiClient, name: &str) -> Result<Option<User>> {
    Ok(find_by_name(client, "users", "users", name)
        .await?
        .as_ref()
        .map(User::from))
}

/// Find a role by exact name
pub async fn find_role_by_name(client: &ApiClient, name: &str) -> Result<Option<Role>> {
    Ok(find_by_name(client, "roles", "roles", name)
        .await?
        .as_ref()
        .map(Role::from))
}

/// Show a single project; `None` means it no longer exists.
pub async fn show_project(client: &ApiClient, project_id: &str) -> Result<Option<Project>> {
    let url = client.identity_url(&format!("projects/{}", project_id));
    let response = client.get_opt(&url).await?;
    Ok(response
        .as_ref()
        .and_then(|v| v.get("project"))
        .map(Project::from))
}

// =============================================================================
// Role assignments
// =============================================================================

fn assignment_url(client: &ApiClient, project_id: &str, user_id: &str, role_id: &str) -> String {
    client.identity_url(&format!(
        "projects/{}/users/{}/roles/{}",
        project_id, user_id, role_id
    ))
}

/// Check whether a user holds a role on a project
pub async fn has_role_on_project(
    client: &ApiClient,
    project_id: &str,
    user_id: &str,
    role_id: &str,
) -> Result<bool> {
    client
        .head(&assignment_url(client, project_id, user_id, role_id))
        .await
        .context("Failed to check role assignment")
}

/// Grant a role to a user on a project
pub async fn grant_role_on_project(
    client: &ApiClient,
    project_id: &str,
    user_id: &str,
    role_id: &str,
) -> Result<()> {
    client
        .put(&assignment_url(client, project_id, user_id, role_id), None)
        .await
        .context("Failed to grant role")?;
    Ok(())
}

/// Revoke a role from a user on a project
pub async fn revoke_role_on_project(
    client: &ApiClient,
    project_id: &str,
    user_id: &str,
    role_id: &str,
) -> Result<()> {
    client
        .delete(&assignment_url(client, project_id, user_id, role_id))
        .await
        .context("Failed to revoke role")?;
    Ok(())
}

// =============================================================================
// Deletion
// =============================================================================

/// Delete a project
pub async fn delete_project(client: &ApiClient, project_id: &str) -> Result<()> {
    client
        .delete(&client.identity_url(&format!("projects/{}", project_id)))
        .await?;
    Ok(())
}

/// Delete a user
pub async fn delete_user(client: &ApiClient, user_id: &str) -> Result<()> {
    client
        .delete(&client.identity_url(&format!("users/{}", user_id)))
        .await?;
    Ok(())
}

/// Delete a role
pub async fn delete_role(client: &ApiClient, role_id: &str) -> Result<()> {
    client
        .delete(&client.identity_url(&format!("roles/{}", role_id)))
        .await?;
    Ok(())
}

/// Disable a domain. Enabled domains reject deletion, so this always
/// precedes `delete_domain`.
pub async fn disable_domain(client: &ApiClient, domain_id: &str) -> Result<()> {
    let url = client.identity_url(&format!("domains/{}", domain_id));
    client
        .patch(&url, &json!({ "domain": { "enabled": false } }))
        .await?;
    Ok(())
}

/// Delete a domain
pub async fn delete_domain(client: &ApiClient, domain_id: &str) -> Result<()> {
    client
        .delete(&client.identity_url(&format!("domains/{}", domain_id)))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_from_value() {
        let value = serde_json::json!({"id": "p1", "name": "alpha", "enabled": true});
        let project = Project::from(&value);
        assert_eq!(project.id, "p1");
        assert_eq!(project.name, "alpha");
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let value = serde_json::json!({});
        let user = User::from(&value);
        assert_eq!(user.id, "-");
        assert_eq!(user.name, "-");

        let domain = Domain::from(&value);
        assert!(domain.enabled, "missing enabled defaults to true");
    }
}
