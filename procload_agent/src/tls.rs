//! Self-signed TLS material for `--enableSSL`, generated once and reused.

use rcgen::{generate_simple_self_signed, CertifiedKey};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

fn config_dir() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| Path::new(&h).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("procload_agent")
        .join("tls")
}

pub fn cert_paths() -> (PathBuf, PathBuf) {
    let dir = config_dir();
    (dir.join("cert.pem"), dir.join("key.pem"))
}

pub fn ensure_self_signed_cert() -> anyhow::Result<(PathBuf, PathBuf)> {
    let (cert_path, key_path) = cert_paths();
    if cert_path.exists() && key_path.exists() {
        return Ok((cert_path, key_path));
    }
    if let Some(dir) = cert_path.parent() {
        fs::create_dir_all(dir)?;
    }

    let hostname = hostname::get()
        .ok()
        .and_then(|s| s.into_string().ok())
        .unwrap_or_else(|| "localhost".to_string());
    // SANs: hostname + localhost loopbacks
    let mut sans = vec![hostname];
    for extra in ["localhost", "127.0.0.1", "::1"] {
        if !sans.iter().any(|s| s == extra) {
            sans.push(extra.to_string());
        }
    }
    let CertifiedKey { cert, key_pair } = generate_simple_self_signed(sans)?;

    fs::write(&cert_path, cert.pem())?;
    fs::write(&key_path, key_pair.serialize_pem())?;

    info!(cert = %cert_path.display(), key = %key_path.display(), "generated self-signed TLS certificate");
    Ok((cert_path, key_path))
}
