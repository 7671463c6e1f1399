//! Command line and environment configuration.
//!
//! Environment (read once at startup, flags win):
//! * `PROCLOAD_AGENT_PORT`: listen port (default 8080)
//! * `PROCLOAD_AGENT_PROC_ROOT`: directory holding `stat` and `meminfo` (default `/proc`)

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use thiserror::Error;

use crate::directive::Directive;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PROC_ROOT: &str = "/proc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub bind: IpAddr,
    pub port: u16,
    pub enable_ssl: bool,
    pub proc_root: PathBuf,
    /// Each location carries the directive installed on it.
    pub locations: Vec<(String, Directive)>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            enable_ssl: false,
            proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
            locations: Vec::new(),
        }
    }
}

impl AgentConfig {
    /// Defaults overridden by `PROCLOAD_AGENT_*` variables. An unparsable
    /// port is ignored.
    pub fn from_env() -> Self {
        let mut cfg = AgentConfig::default();
        if let Some(port) = std::env::var("PROCLOAD_AGENT_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            cfg.port = port;
        }
        if let Some(root) = std::env::var_os("PROCLOAD_AGENT_PROC_ROOT") {
            cfg.proc_root = PathBuf::from(root);
        }
        cfg
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// `--help` was requested; carries the usage text.
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Invalid(String),
}

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--port PORT|-p PORT] [--bind ADDR] [--location PATH]... [--enableSSL]\n\
         \n\
         Each --location gets the hello_world handler (default: /).\n\
         Env: PROCLOAD_AGENT_PORT, PROCLOAD_AGENT_PROC_ROOT"
    )
}

/// Parses argv (program name first) on top of `base`.
pub fn parse_args<I: IntoIterator<Item = String>>(
    args: I,
    base: AgentConfig,
) -> Result<AgentConfig, CliError> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "procload_agent".into());
    let mut cfg = base;
    let mut locations: Vec<String> = Vec::new();

    let missing = |flag: &str| CliError::Invalid(format!("{flag} requires a value\n{}", usage(&prog)));

    while let Some(arg) = it.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        match flag.as_str() {
            "-h" | "--help" => return Err(CliError::Usage(usage(&prog))),
            "--enableSSL" => cfg.enable_ssl = true,
            "--port" | "-p" => {
                let v = inline.or_else(|| it.next()).ok_or_else(|| missing(flag.as_str()))?;
                cfg.port = v
                    .parse()
                    .map_err(|_| CliError::Invalid(format!("invalid port: {v}")))?;
            }
            "--bind" => {
                let v = inline.or_else(|| it.next()).ok_or_else(|| missing(flag.as_str()))?;
                cfg.bind = v
                    .parse()
                    .map_err(|_| CliError::Invalid(format!("invalid bind address: {v}")))?;
            }
            "--location" => {
                let v = inline.or_else(|| it.next()).ok_or_else(|| missing(flag.as_str()))?;
                if !v.starts_with('/') {
                    return Err(CliError::Invalid(format!(
                        "location must start with '/': {v}"
                    )));
                }
                if !locations.contains(&v) {
                    locations.push(v);
                }
            }
            _ => {
                return Err(CliError::Invalid(format!(
                    "unexpected argument: {arg}\n{}",
                    usage(&prog)
                )))
            }
        }
    }

    if locations.is_empty() {
        locations.push("/".to_string());
    }
    cfg.locations = locations
        .into_iter()
        .map(|l| (l, Directive::HelloWorld))
        .collect();
    Ok(cfg)
}
