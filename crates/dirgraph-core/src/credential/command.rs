//! Obtain a token by running an external issuing command.
//!
//! The command receives the token request through environment variables and
//! prints the token on stdout:
//!
//! - `DIRGRAPH_AUTHORITY`
//! - `DIRGRAPH_SERVICE_REALM`
//! - `DIRGRAPH_ISSUING_RESOURCE`
//! - `DIRGRAPH_SHARED_SECRET` (only when a secret is configured)

use super::{non_empty, CredentialError, CredentialProvider, TokenRequest};
use std::process::Command;

#[derive(Debug, Clone)]
pub struct CommandToken {
    program: String,
    args: Vec<String>,
}

impl CommandToken {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from an argv list (`["az", "account", "get-access-token", ...]`).
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }
}

impl CredentialProvider for CommandToken {
    fn acquire(&mut self, request: &TokenRequest<'_>) -> Result<String, CredentialError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .env("DIRGRAPH_AUTHORITY", request.authority)
            .env("DIRGRAPH_SERVICE_REALM", request.service_realm)
            .env("DIRGRAPH_ISSUING_RESOURCE", request.issuing_resource);
        if let Some(secret) = request.shared_secret {
            cmd.env("DIRGRAPH_SHARED_SECRET", secret);
        }

        let output = cmd.output().map_err(|source| CredentialError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(CredentialError::CommandFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let stdout = String::from_utf8(output.stdout).map_err(|_| CredentialError::InvalidOutput)?;
        non_empty(stdout)
    }
}
