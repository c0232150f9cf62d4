use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

pub struct ServerGuard {
    pub base_url: String,
    pub token: String,
    pub data_dir: tempfile::TempDir,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn spawn_server() -> Result<ServerGuard> {
    spawn_server_with_tokens(&["dev"])
}

pub fn spawn_server_with_tokens(tokens: &[&str]) -> Result<ServerGuard> {
    let data_dir = tempfile::tempdir().context("create server tempdir")?;
    let addr_file = data_dir.path().join("addr.txt");

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_resale-dev-server"));
    cmd.args([
        "--addr",
        "127.0.0.1:0",
        "--addr-file",
        addr_file.to_str().unwrap(),
        "--data-dir",
        data_dir.path().to_str().unwrap(),
    ]);
    for token in tokens {
        cmd.args(["--dev-token", token]);
    }
    let child = cmd
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn resale-dev-server")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        token: tokens.first().copied().unwrap_or("dev").to_string(),
        data_dir,
        child,
    })
}

fn read_addr_file(addr_file: &std::path::Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

#[allow(dead_code)]
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Ids of the first `n` listings in the server's default (newest first) order.
#[allow(dead_code)]
pub fn listing_ids(base_url: &str, n: usize) -> Result<Vec<String>> {
    let body: serde_json::Value = reqwest::blocking::Client::new()
        .get(format!("{}/listings", base_url))
        .send()
        .context("list listings")?
        .error_for_status()
        .context("list listings status")?
        .json()
        .context("parse listings")?;
    let ids = body
        .get("data")
        .and_then(|d| d.as_array())
        .context("listings data not array")?
        .iter()
        .filter_map(|l| l.get("_id").and_then(|v| v.as_str()).map(str::to_string))
        .take(n)
        .collect::<Vec<_>>();
    if ids.len() < n {
        anyhow::bail!("server has only {} listings", ids.len());
    }
    Ok(ids)
}
