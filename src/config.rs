//! Service configuration parsed from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_DATA_DIR: &str = "..";
pub const DEFAULT_SCENE_FILE: &str = "scene.json";
pub const DEFAULT_RECORD_FILE: &str = "record_control.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioConfig {
    pub port: u16,
    pub bind: IpAddr,
    /// Directory shared with the renderer. Defaults to the parent of the
    /// working directory.
    pub data_dir: PathBuf,
    pub scene_file: String,
    pub record_file: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            scene_file: DEFAULT_SCENE_FILE.to_owned(),
            record_file: DEFAULT_RECORD_FILE.to_owned(),
        }
    }
}

impl StudioConfig {
    /// Build config from environment variables. Every variable is optional:
    ///
    /// - `PORT`: default 3000
    /// - `STUDIO_BIND`: default `0.0.0.0`
    /// - `STUDIO_DATA_DIR`: default `..`
    /// - `STUDIO_SCENE_FILE`: default `scene.json`
    /// - `STUDIO_RECORD_FILE`: default `record_control.json`
    ///
    /// Values that don't parse fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            bind: env_parse("STUDIO_BIND", DEFAULT_BIND),
            data_dir: PathBuf::from(env_string("STUDIO_DATA_DIR", DEFAULT_DATA_DIR)),
            scene_file: env_string("STUDIO_SCENE_FILE", DEFAULT_SCENE_FILE),
            record_file: env_string("STUDIO_RECORD_FILE", DEFAULT_RECORD_FILE),
        }
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Where `POST /api/save` writes the scene snapshot.
    #[must_use]
    pub fn scene_path(&self) -> PathBuf {
        self.data_dir.join(&self.scene_file)
    }

    /// Where `POST /api/record` writes the renderer control file.
    #[must_use]
    pub fn record_path(&self) -> PathBuf {
        self.data_dir.join(&self.record_file)
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(v) => v.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

fn env_string(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_owned(),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
