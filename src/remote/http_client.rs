use super::*;

impl RemoteClient {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            anyhow::bail!("unauthorized (session invalid/expired; run `resale login --token ...`)");
        }
        resp.error_for_status()
            .with_context(|| format!("{} status", label))
    }

    /// Joins `segments` onto the base URL, percent-encoding each one.
    pub(super) fn url(&self, segments: &[&str]) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .with_context(|| format!("parse api base url {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("api base url cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

pub(super) fn read_body(resp: reqwest::blocking::Response, label: &str) -> Result<Vec<u8>> {
    let bytes = resp
        .bytes()
        .with_context(|| format!("read {} response body", label))?;
    Ok(bytes.to_vec())
}
