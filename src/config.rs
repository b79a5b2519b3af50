use std::{env, fs, path::Path};

use serde::Deserialize;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "config.json";
pub const API_KEY_ENV: &str = "TMDB_API_KEY";
pub const RENDERER_ENV: &str = "CINEGRID_RENDERER";

pub const DEFAULT_TMDB_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_POSTER_WORKERS: usize = 4;
const MAX_POSTER_WORKERS: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendererPref {
    Glow,
    Wgpu,
}

impl RendererPref {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "glow" | "gl" => Some(Self::Glow),
            "wgpu" => Some(Self::Wgpu),
            _ => None,
        }
    }

    /// WGPU (DX12) on Windows, GL elsewhere.
    pub fn platform_default() -> Self {
        if cfg!(target_os = "windows") {
            Self::Wgpu
        } else {
            Self::Glow
        }
    }

    pub fn to_eframe(self) -> eframe::Renderer {
        match self {
            Self::Glow => eframe::Renderer::Glow,
            Self::Wgpu => eframe::Renderer::Wgpu,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Never hardcoded; comes from config.json or `TMDB_API_KEY`.
    pub tmdb_api_key: Option<String>,
    pub tmdb_api_base: String,
    pub tmdb_image_base: String,
    pub request_timeout_secs: u64,
    pub poster_workers: usize,
    pub renderer: RendererPref,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            tmdb_api_base: DEFAULT_TMDB_API_BASE.to_string(),
            tmdb_image_base: DEFAULT_TMDB_IMAGE_BASE.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            poster_workers: DEFAULT_POSTER_WORKERS,
            renderer: RendererPref::platform_default(),
        }
    }
}

impl AppConfig {
    pub fn has_api_key(&self) -> bool {
        self.tmdb_api_key.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(alias = "api_key")]
    tmdb_api_key: Option<String>,
    tmdb_api_base: Option<String>,
    tmdb_image_base: Option<String>,
    request_timeout_secs: Option<u64>,
    poster_workers: Option<usize>,
    renderer: Option<String>,
}

/// `config.json` from the working directory, then `TMDB_API_KEY` and
/// `CINEGRID_RENDERER` on top.
pub fn load_config() -> AppConfig {
    let mut cfg = load_config_from(Path::new(CONFIG_FILE));
    apply_api_key_override(&mut cfg, env::var(API_KEY_ENV).ok());
    apply_renderer_override(&mut cfg, env::var(RENDERER_ENV).ok());
    cfg
}

pub fn load_config_from(cfg_path: &Path) -> AppConfig {
    let mut cfg = AppConfig::default();

    match fs::read_to_string(cfg_path) {
        Ok(raw) => match serde_json::from_str::<RawConfig>(&raw) {
            Ok(parsed) => {
                if let Some(key) = non_blank(parsed.tmdb_api_key) {
                    cfg.tmdb_api_key = Some(key);
                }
                if let Some(base) = non_blank(parsed.tmdb_api_base) {
                    cfg.tmdb_api_base = trim_base(&base);
                }
                if let Some(base) = non_blank(parsed.tmdb_image_base) {
                    cfg.tmdb_image_base = trim_base(&base);
                }
                if let Some(secs) = parsed.request_timeout_secs {
                    cfg.request_timeout_secs = secs.max(1);
                }
                if let Some(n) = parsed.poster_workers {
                    if !(1..=MAX_POSTER_WORKERS).contains(&n) {
                        warn!(
                            "poster_workers={n} out of range; clamping to 1..={MAX_POSTER_WORKERS}"
                        );
                    }
                    cfg.poster_workers = n.clamp(1, MAX_POSTER_WORKERS);
                }
                if let Some(name) = parsed.renderer {
                    match RendererPref::parse(&name) {
                        Some(r) => cfg.renderer = r,
                        None => warn!("unknown renderer {name:?}; keeping {:?}", cfg.renderer),
                    }
                }
                info!("Loaded config from {}", cfg_path.display());
            }
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Using defaults.",
                    cfg_path.display(),
                    err
                );
            }
        },
        Err(_) => {
            info!("No {} found; using defaults", cfg_path.display());
        }
    }

    cfg
}

fn apply_api_key_override(cfg: &mut AppConfig, from_env: Option<String>) {
    if let Some(key) = non_blank(from_env) {
        if cfg.tmdb_api_key.is_some() {
            info!("{API_KEY_ENV} overrides the key from {CONFIG_FILE}");
        }
        cfg.tmdb_api_key = Some(key);
    }
}

fn apply_renderer_override(cfg: &mut AppConfig, from_env: Option<String>) {
    if let Some(r) = from_env.as_deref().and_then(RendererPref::parse) {
        cfg.renderer = r;
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn trim_base(s: &str) -> String {
    s.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_cfg(body: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, body).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("nope.json"));
        assert_eq!(cfg, AppConfig::default());
        assert!(!cfg.has_api_key());
    }

    #[test]
    fn parses_all_keys_and_trims_bases() {
        let (_dir, path) = write_cfg(
            r#"{
                "tmdb_api_key": "  abc123 ",
                "tmdb_api_base": "http://localhost:9000/3/",
                "tmdb_image_base": "http://img.local/w342/",
                "request_timeout_secs": 0,
                "poster_workers": 64
            }"#,
        );
        let cfg = load_config_from(&path);
        assert_eq!(cfg.tmdb_api_key.as_deref(), Some("abc123"));
        assert_eq!(cfg.tmdb_api_base, "http://localhost:9000/3");
        assert_eq!(cfg.tmdb_image_base, "http://img.local/w342");
        assert_eq!(cfg.request_timeout_secs, 1);
        assert_eq!(cfg.poster_workers, MAX_POSTER_WORKERS);
    }

    #[test]
    fn api_key_alias_and_blank_key() {
        let (_dir, path) = write_cfg(r#"{ "api_key": "k" }"#);
        assert_eq!(load_config_from(&path).tmdb_api_key.as_deref(), Some("k"));

        let (_dir, path) = write_cfg(r#"{ "tmdb_api_key": "   " }"#);
        assert_eq!(load_config_from(&path).tmdb_api_key, None);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let (_dir, path) = write_cfg("{ not json");
        assert_eq!(load_config_from(&path), AppConfig::default());
    }

    #[test]
    fn env_key_overrides_file_key() {
        let mut cfg = AppConfig {
            tmdb_api_key: Some("from-file".into()),
            ..AppConfig::default()
        };
        apply_api_key_override(&mut cfg, Some(String::new()));
        assert_eq!(cfg.tmdb_api_key.as_deref(), Some("from-file"));
        apply_api_key_override(&mut cfg, Some("from-env".into()));
        assert_eq!(cfg.tmdb_api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn renderer_from_file_then_env() {
        let (_dir, path) = write_cfg(r#"{ "renderer": "WGPU" }"#);
        let mut cfg = load_config_from(&path);
        assert_eq!(cfg.renderer, RendererPref::Wgpu);

        apply_renderer_override(&mut cfg, Some("vulkan".into()));
        assert_eq!(cfg.renderer, RendererPref::Wgpu);
        apply_renderer_override(&mut cfg, Some("glow".into()));
        assert_eq!(cfg.renderer, RendererPref::Glow);

        let (_dir, path) = write_cfg(r#"{ "renderer": "software" }"#);
        assert_eq!(load_config_from(&path).renderer, RendererPref::platform_default());
    }
}
