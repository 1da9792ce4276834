use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u32 = 20;
pub const SENSOR_PAGE_SIZE: u32 = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub refresh_interval_secs: Option<u32>,
}

impl RuntimeConfig {
    fn merge(self, fallback: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: self.api_base_url.or(fallback.api_base_url),
            refresh_interval_secs: self.refresh_interval_secs.or(fallback.refresh_interval_secs),
        }
    }

    fn is_complete(&self) -> bool {
        self.api_base_url.is_some() && self.refresh_interval_secs.is_some()
    }
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();
static REFRESH_INTERVAL_SECS: OnceLock<u32> = OnceLock::new();

fn read_global(name: &str) -> Option<RuntimeConfig> {
    // Expect optional global object: window.<name> = { API_BASE_URL: "...", REFRESH_INTERVAL_SECS: 20 }
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    let lookup = |upper: &str, lower: &str| {
        js_sys::Reflect::get(&obj, &upper.into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .or_else(|| js_sys::Reflect::get(&obj, &lower.into()).ok())
            .filter(|v| !v.is_undefined() && !v.is_null())
    };
    Some(RuntimeConfig {
        api_base_url: lookup("API_BASE_URL", "api_base_url").and_then(|v| v.as_string()),
        refresh_interval_secs: lookup("REFRESH_INTERVAL_SECS", "refresh_interval_secs")
            .and_then(|v| v.as_f64())
            .filter(|secs| *secs >= 1.0)
            .map(|secs| secs as u32),
    })
}

fn snapshot_from_globals() -> RuntimeConfig {
    let env = read_global("__SENSOR_DASHBOARD_ENV").unwrap_or_default();
    let cfg = read_global("__SENSOR_DASHBOARD_CONFIG").unwrap_or_default();
    env.merge(cfg)
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let origin = web_sys::window()?.location().origin().ok()?;
    let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn cache(cfg: RuntimeConfig) {
    let base = cfg
        .api_base_url
        .as_deref()
        .map(normalize_base_url)
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    let _ = API_BASE_URL.set(base);
    let _ = REFRESH_INTERVAL_SECS
        .set(cfg.refresh_interval_secs.unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS));
}

/// Resolves the runtime configuration once: env.js globals, then ./config.json, then defaults.
pub async fn init() {
    if API_BASE_URL.get().is_some() {
        return;
    }
    let mut cfg = snapshot_from_globals();
    if !cfg.is_complete() {
        if let Some(fetched) = fetch_runtime_config().await {
            cfg = cfg.merge(fetched);
        }
    }
    log::info!(
        "runtime config: api_base_url={:?} refresh_interval_secs={:?}",
        cfg.api_base_url,
        cfg.refresh_interval_secs
    );
    cache(cfg);
}

pub async fn await_api_base_url() -> String {
    init().await;
    api_base_url()
}

pub fn api_base_url() -> String {
    API_BASE_URL
        .get()
        .cloned()
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

pub fn refresh_interval_ms() -> u32 {
    REFRESH_INTERVAL_SECS
        .get()
        .copied()
        .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS)
        .saturating_mul(1000)
}
