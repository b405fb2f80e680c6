//! Credential store collaborators.
//!
//! Two secrets feed the trackers: the organization admin API key (usage and
//! cost reporting) and the OAuth bearer token (session utilization). Both
//! resolve through an ordered chain - secure local store first, then
//! environment, then config file - and both resolve to `None` rather than
//! an error when every source misses, leaving the policy to the caller.

use std::env;
use std::process::Command;

use tracing::debug;

use crate::config::Config;

/// Keychain service/account under which the admin key is stored.
const KEYCHAIN_SERVICE: &str = "claude-usage-tracker";
const KEYCHAIN_ACCOUNT: &str = "admin-api-key";

/// Keychain service holding the Claude Code OAuth credential blob.
const OAUTH_KEYCHAIN_SERVICE: &str = "Claude Code-credentials";

/// Resolve the admin API key: keychain, then `ANTHROPIC_ADMIN_API_KEY`,
/// then the config file.
pub fn admin_api_key(config: &Config) -> Option<String> {
    if let Some(key) = keychain_password(KEYCHAIN_SERVICE, Some(KEYCHAIN_ACCOUNT)) {
        debug!("admin API key resolved from keychain");
        return Some(key);
    }

    if let Ok(key) = env::var("ANTHROPIC_ADMIN_API_KEY") {
        if !key.is_empty() {
            debug!("admin API key resolved from environment");
            return Some(key);
        }
    }

    config.api.admin_api_key.clone().filter(|k| !k.is_empty())
}

/// Resolve the OAuth bearer token: Claude Code keychain blob, then
/// `CLAUDE_CODE_OAUTH_TOKEN`.
pub fn bearer_token() -> Option<String> {
    if let Some(raw) = keychain_password(OAUTH_KEYCHAIN_SERVICE, None) {
        if let Some(token) = access_token_from_credentials(&raw) {
            debug!("bearer token resolved from keychain");
            return Some(token);
        }
    }

    env::var("CLAUDE_CODE_OAUTH_TOKEN")
        .ok()
        .filter(|t| !t.is_empty())
}

/// Pull `claudeAiOauth.accessToken` out of the credential blob.
fn access_token_from_credentials(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw.trim()).ok()?;
    value
        .get("claudeAiOauth")?
        .get("accessToken")?
        .as_str()
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
}

/// Store the admin API key in the credential store.
///
/// Replaces any existing entry. Only meaningful on macOS; elsewhere the
/// caller should fall back to the environment or config file.
pub fn store_admin_api_key(api_key: &str) -> bool {
    if !cfg!(target_os = "macos") {
        return false;
    }

    // Delete first so add does not fail on a duplicate entry.
    let _ = Command::new("security")
        .args([
            "delete-generic-password",
            "-s",
            KEYCHAIN_SERVICE,
            "-a",
            KEYCHAIN_ACCOUNT,
        ])
        .output();

    Command::new("security")
        .args([
            "add-generic-password",
            "-s",
            KEYCHAIN_SERVICE,
            "-a",
            KEYCHAIN_ACCOUNT,
            "-w",
            api_key,
        ])
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Remove the admin API key from the credential store.
pub fn delete_admin_api_key() -> bool {
    if !cfg!(target_os = "macos") {
        return false;
    }

    Command::new("security")
        .args([
            "delete-generic-password",
            "-s",
            KEYCHAIN_SERVICE,
            "-a",
            KEYCHAIN_ACCOUNT,
        ])
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Look up a generic password in the macOS keychain.
///
/// Returns `None` on non-macOS platforms, on lookup failure, and on any
/// subprocess error.
fn keychain_password(service: &str, account: Option<&str>) -> Option<String> {
    if !cfg!(target_os = "macos") {
        return None;
    }

    let mut command = Command::new("security");
    command.args(["find-generic-password", "-s", service]);
    if let Some(account) = account {
        command.args(["-a", account]);
    }
    command.arg("-w");

    let output = command.output().ok()?;
    if !output.status.success() {
        return None;
    }

    let secret = String::from_utf8(output.stdout).ok()?;
    let secret = secret.trim();
    if secret.is_empty() {
        None
    } else {
        Some(secret.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_extraction() {
        let raw = r#"{"claudeAiOauth": {"accessToken": "sk-ant-oat-abc", "expiresAt": 1}}"#;
        assert_eq!(
            access_token_from_credentials(raw),
            Some("sk-ant-oat-abc".to_string())
        );
    }

    #[test]
    fn test_access_token_missing_or_malformed() {
        assert_eq!(access_token_from_credentials("{}"), None);
        assert_eq!(access_token_from_credentials("not json"), None);
        assert_eq!(
            access_token_from_credentials(r#"{"claudeAiOauth": {"accessToken": ""}}"#),
            None
        );
    }

    #[test]
    fn test_config_fallback_for_admin_key() {
        let mut config = Config::default();
        config.api.admin_api_key = Some("sk-ant-admin-from-config".to_string());

        // No keychain on CI and the env var may be unset; the config entry
        // must still surface unless the environment overrides it.
        if env::var("ANTHROPIC_ADMIN_API_KEY").is_err() && !cfg!(target_os = "macos") {
            assert_eq!(
                admin_api_key(&config),
                Some("sk-ant-admin-from-config".to_string())
            );
        }
    }
}
