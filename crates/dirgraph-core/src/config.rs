use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::credential::{CachedCredential, CommandToken, CredentialProvider, EnvToken};
use crate::dispatch::TenantSettings;
use crate::transport::CurlOptions;

/// Environment variable read for the bearer token when no `[credential]` section is given.
pub const DEFAULT_TOKEN_ENV: &str = "DIRGRAPH_TOKEN";

/// How the bearer credential is obtained (optional section in config.toml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Environment variable holding an already issued token.
    #[serde(default)]
    pub token_env: Option<String>,
    /// External command that prints a token on stdout (argv form). Takes precedence over `token_env`.
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

/// Transport timeouts (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
        }
    }
}

/// Tenant configuration loaded from `~/.config/dirgraph/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Domain name of the tenant, e.g. `contoso.onmicrosoft.com`.
    pub domain_name: String,
    /// Principal id of the calling application.
    pub app_principal_id: String,
    /// Shared secret of the calling application, handed to the credential provider.
    #[serde(default)]
    pub symmetric_key: Option<String>,
    #[serde(default = "default_graph_domain")]
    pub graph_domain: String,
    #[serde(default = "default_sts_url")]
    pub sts_url: String,
    /// Value of the data contract version header sent with every request.
    #[serde(default = "default_contract_version")]
    pub data_contract_version: String,
    /// Principal id of the directory service itself.
    #[serde(default = "default_principal_id")]
    pub principal_id: String,
    #[serde(default)]
    pub credential: Option<CredentialConfig>,
    #[serde(default)]
    pub transport: Option<TransportConfig>,
}

fn default_graph_domain() -> String {
    "graph.windows.net".to_string()
}

fn default_sts_url() -> String {
    "https://accounts.accesscontrol.windows.net/".to_string()
}

fn default_contract_version() -> String {
    "0.8".to_string()
}

fn default_principal_id() -> String {
    "00000002-0000-0000-c000-000000000000".to_string()
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            domain_name: String::new(),
            app_principal_id: String::new(),
            symmetric_key: None,
            graph_domain: default_graph_domain(),
            sts_url: default_sts_url(),
            data_contract_version: default_contract_version(),
            principal_id: default_principal_id(),
            credential: None,
            transport: None,
        }
    }
}

impl DirectoryConfig {
    /// Default endpoint: `https://{graph_domain}/{domain_name}`.
    pub fn connection_uri(&self) -> String {
        format!("https://{}/{}", self.graph_domain, self.domain_name)
    }

    /// Tenant address at the token issuer.
    pub fn full_tenant_address(&self) -> String {
        format!("{}{}", self.sts_url, self.domain_name)
    }

    pub fn service_realm(&self) -> String {
        format!("{}/{}@{}", self.principal_id, self.graph_domain, self.domain_name)
    }

    pub fn issuing_resource(&self) -> String {
        format!("{}@{}", self.app_principal_id, self.domain_name)
    }

    /// Reject configurations that cannot address a tenant.
    pub fn validate(&self) -> Result<()> {
        if self.domain_name.trim().is_empty() {
            anyhow::bail!("domain_name is not set; edit the config file");
        }
        let uri = self.connection_uri();
        let parsed = url::Url::parse(&uri).with_context(|| format!("invalid endpoint {}", uri))?;
        if parsed.host_str().is_none() {
            anyhow::bail!("endpoint {} has no host", uri);
        }
        if let Some(argv) = self.credential.as_ref().and_then(|c| c.command.as_ref()) {
            if argv.is_empty() {
                anyhow::bail!("credential.command must name a program");
            }
        }
        Ok(())
    }

    pub fn tenant_settings(&self) -> TenantSettings {
        TenantSettings {
            authority: self.full_tenant_address(),
            service_realm: self.service_realm(),
            issuing_resource: self.issuing_resource(),
            shared_secret: self.symmetric_key.clone(),
            contract_version: self.data_contract_version.clone(),
        }
    }

    pub fn curl_options(&self) -> CurlOptions {
        let t = self.transport.clone().unwrap_or_default();
        CurlOptions {
            connect_timeout: Duration::from_secs(t.connect_timeout_secs),
            timeout: Duration::from_secs(t.timeout_secs),
        }
    }

    /// Credential provider described by the `[credential]` section, cached
    /// until the service reports the token expired.
    pub fn credential_provider(&self) -> Box<dyn CredentialProvider> {
        let section = self.credential.clone().unwrap_or_default();
        if let Some(cmd) = section.command.as_deref().and_then(CommandToken::from_argv) {
            return Box::new(CachedCredential::new(cmd));
        }
        let var = section
            .token_env
            .unwrap_or_else(|| DEFAULT_TOKEN_ENV.to_string());
        Box::new(CachedCredential::new(EnvToken::new(var)))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dirgraph")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DirectoryConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DirectoryConfig::default();
        write_config(&path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

pub fn load_from_path(path: &Path) -> Result<DirectoryConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: DirectoryConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

pub fn write_config(path: &Path, cfg: &DirectoryConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contoso() -> DirectoryConfig {
        DirectoryConfig {
            domain_name: "contoso.onmicrosoft.com".to_string(),
            app_principal_id: "app-1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn default_config_values() {
        let cfg = DirectoryConfig::default();
        assert_eq!(cfg.graph_domain, "graph.windows.net");
        assert_eq!(cfg.data_contract_version, "0.8");
        assert_eq!(cfg.principal_id, "00000002-0000-0000-c000-000000000000");
        assert!(cfg.credential.is_none());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn derived_addresses() {
        let cfg = contoso();
        assert_eq!(cfg.connection_uri(), "https://graph.windows.net/contoso.onmicrosoft.com");
        assert_eq!(
            cfg.full_tenant_address(),
            "https://accounts.accesscontrol.windows.net/contoso.onmicrosoft.com"
        );
        assert_eq!(
            cfg.service_realm(),
            "00000002-0000-0000-c000-000000000000/graph.windows.net@contoso.onmicrosoft.com"
        );
        assert_eq!(cfg.issuing_resource(), "app-1@contoso.onmicrosoft.com");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn config_toml_minimal() {
        let toml = r#"
            domain_name = "contoso.com"
            app_principal_id = "abc"
        "#;
        let cfg: DirectoryConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.domain_name, "contoso.com");
        assert_eq!(cfg.sts_url, "https://accounts.accesscontrol.windows.net/");
        assert!(cfg.symmetric_key.is_none());
        assert_eq!(cfg.curl_options().timeout, Duration::from_secs(60));
    }

    #[test]
    fn config_toml_sections() {
        let toml = r#"
            domain_name = "contoso.com"
            app_principal_id = "abc"
            symmetric_key = "c2VjcmV0"
            graph_domain = "graph.local:8443"

            [credential]
            command = ["issue-token", "--realm"]

            [transport]
            connect_timeout_secs = 2
            timeout_secs = 5
        "#;
        let cfg: DirectoryConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.connection_uri(), "https://graph.local:8443/contoso.com");
        let cred = cfg.credential.as_ref().unwrap();
        assert_eq!(
            cred.command.as_deref(),
            Some(&["issue-token".to_string(), "--realm".to_string()][..])
        );
        let opts = cfg.curl_options();
        assert_eq!(opts.connect_timeout, Duration::from_secs(2));
        assert_eq!(opts.timeout, Duration::from_secs(5));
        let tenant = cfg.tenant_settings();
        assert_eq!(tenant.shared_secret.as_deref(), Some("c2VjcmV0"));
        assert_eq!(tenant.contract_version, "0.8");
    }

    #[test]
    fn empty_credential_command_is_rejected() {
        let mut cfg = contoso();
        cfg.credential = Some(CredentialConfig {
            token_env: None,
            command: Some(Vec::new()),
        });
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn write_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = contoso();
        cfg.transport = Some(TransportConfig::default());
        write_config(&path, &cfg).unwrap();
        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded.domain_name, cfg.domain_name);
        assert_eq!(loaded.transport, Some(TransportConfig::default()));
    }

    #[test]
    fn load_from_path_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "domain_name = [").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("parse config"));
    }
}
