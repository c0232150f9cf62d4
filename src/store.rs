use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::{ClientConfig, ClientState, Session};
use crate::wishlist::KeyValueStorage;

const STORE_DIR: &str = ".resale";

/// Client-side persistent directory: config, session state and the key/value storage
/// that guest-mode data lives in.
#[derive(Clone, Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn store_dir(root: &Path) -> PathBuf {
        root.join(STORE_DIR)
    }

    pub fn open(root: &Path) -> Result<Self> {
        let dir = Self::store_dir(root);
        if !dir.is_dir() {
            return Err(anyhow!(
                "No {} directory found at {} (run `resale init`)",
                STORE_DIR,
                dir.display()
            ));
        }
        Ok(Self { root: dir })
    }

    /// Walks up from `start` until a directory containing `.resale` is found.
    pub fn discover(start: &Path) -> Result<Self> {
        let mut cur = Some(start);
        while let Some(dir) = cur {
            if Self::store_dir(dir).is_dir() {
                return Self::open(dir);
            }
            cur = dir.parent();
        }
        Err(anyhow!(
            "No {} directory found in {} or any parent (run `resale init`)",
            STORE_DIR,
            start.display()
        ))
    }

    pub fn init(root: &Path, force: bool) -> Result<Self> {
        let dir = Self::store_dir(root);
        if dir.exists() && !force {
            return Err(anyhow!(
                "{} already exists at {} (use --force to re-init)",
                STORE_DIR,
                dir.display()
            ));
        }
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;

        let store = Self { root: dir };
        store.write_config(&ClientConfig::default())?;
        store.write_state(&ClientState::default())?;
        if store.storage_path().exists() {
            fs::remove_file(store.storage_path()).context("reset storage.json")?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn read_config(&self) -> Result<ClientConfig> {
        let bytes = fs::read(self.root.join("config.json")).context("read config.json")?;
        let cfg: ClientConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported client config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &ClientConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn read_state(&self) -> Result<ClientState> {
        let path = self.root.join("state.json");
        if !path.exists() {
            return Ok(ClientState::default());
        }
        let bytes = fs::read(&path).context("read state.json")?;
        let st: ClientState = serde_json::from_slice(&bytes).context("parse state.json")?;
        if st.version != 1 {
            anyhow::bail!("unsupported client state version {}", st.version);
        }
        Ok(st)
    }

    pub fn write_state(&self, st: &ClientState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize state")?;
        write_atomic(&self.root.join("state.json"), &bytes).context("write state.json")?;
        Ok(())
    }

    pub fn session(&self) -> Result<Option<Session>> {
        Ok(self.read_state()?.session_token.map(Session::new))
    }

    pub fn set_session(&self, token: &str) -> Result<()> {
        let mut st = self.read_state()?;
        st.session_token = Some(token.to_string());
        self.write_state(&st)
    }

    pub fn clear_session(&self) -> Result<()> {
        let mut st = self.read_state()?;
        st.session_token = None;
        self.write_state(&st)
    }

    fn storage_path(&self) -> PathBuf {
        self.root.join("storage.json")
    }

    fn read_storage(&self) -> Result<BTreeMap<String, String>> {
        let path = self.storage_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let bytes = fs::read(&path).context("read storage.json")?;
        serde_json::from_slice(&bytes).context("parse storage.json")
    }

    fn write_storage(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(items).context("serialize storage")?;
        write_atomic(&self.storage_path(), &bytes).context("write storage.json")
    }
}

impl KeyValueStorage for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_storage()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_storage()?;
        items.insert(key.to_string(), value.to_string());
        self.write_storage(&items)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.read_storage()?;
        if items.remove(key).is_some() {
            self.write_storage(&items)?;
        }
        Ok(())
    }
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
