// src/fetch.rs

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use reqwest::Client;
use tokio::fs;
use tracing::{info, warn};
use url::Url;

/// Relative candidates tried under the base URL before the base itself.
static CSV_CANDIDATES: &[&str] = &["data.csv"];

static BUSTER_SEQ: AtomicU64 = AtomicU64::new(0);

/// Cache-defeating query value; changes on every request.
fn cache_buster() -> String {
    let seq = BUSTER_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", Utc::now().timestamp_millis(), seq)
}

fn candidate_urls(base: &Url) -> Vec<Url> {
    let mut urls = Vec::new();
    for rel in CSV_CANDIDATES {
        if let Ok(u) = base.join(rel) {
            if !urls.contains(&u) {
                urls.push(u);
            }
        }
    }
    if !urls.contains(base) {
        urls.push(base.clone());
    }
    urls
}

/// Fetch the roster CSV text from `base`, trying each candidate URL with a
/// cache-busting query parameter. A failing candidate is logged and skipped;
/// only when every candidate fails does this return an error, at which point
/// the caller falls back to a local file.
pub async fn fetch_roster_text(client: &Client, base: &Url) -> Result<String> {
    for mut url in candidate_urls(base) {
        url.query_pairs_mut().append_pair("t", &cache_buster());
        info!(url = %url, "fetching roster");

        let result = async {
            let resp = client.get(url.as_str()).send().await?.error_for_status()?;
            info!(status = %resp.status(), "response");
            resp.text().await.map_err(anyhow::Error::from)
        }
        .await;

        match result {
            Ok(text) => return Ok(text),
            Err(err) => warn!(url = %url, %err, "candidate failed"),
        }
    }
    bail!("all roster URL candidates failed for {}", base);
}

/// Read a locally supplied roster file as UTF-8 text. Invalid sequences are
/// replaced (with a warning) rather than failing the load.
pub async fn read_roster_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("reading roster file {}", path.display()))?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(path = %path.display(), "file is not valid UTF-8, replacing bad sequences");
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}
