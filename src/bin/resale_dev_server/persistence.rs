use super::*;

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct WishlistsFile {
    version: u32,

    #[serde(default)]
    wishlists: HashMap<String, Vec<WishlistItem>>,
}

pub(super) fn wishlists_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("wishlists.json")
}

pub(super) fn load_wishlists_from_disk(
    data_dir: &std::path::Path,
) -> Result<HashMap<String, Vec<WishlistItem>>> {
    let path = wishlists_path(data_dir);
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let bytes = std::fs::read(&path).context("read wishlists.json")?;
    let file: WishlistsFile = serde_json::from_slice(&bytes).context("parse wishlists.json")?;
    if file.version != 1 {
        anyhow::bail!("unsupported wishlists.json version {}", file.version);
    }
    Ok(file.wishlists)
}

pub(super) fn persist_wishlists(
    state: &AppState,
    wishlists: &HashMap<String, Vec<WishlistItem>>,
) -> Result<()> {
    let file = WishlistsFile {
        version: 1,
        wishlists: wishlists.clone(),
    };
    let bytes = serde_json::to_vec_pretty(&file).context("serialize wishlists")?;
    write_atomic_overwrite(&wishlists_path(&state.data_dir), &bytes)
        .context("write wishlists.json")
}

pub(super) fn write_atomic_overwrite(path: &std::path::Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    std::fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

pub(super) fn now_ts() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}
