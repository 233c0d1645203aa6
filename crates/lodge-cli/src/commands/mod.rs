//! CLI command implementations

pub mod build;
pub mod edit;
pub mod import;
pub mod info;
pub mod watch;

use std::path::{Path, PathBuf};

use lodge_terrain::TerrainConfig;

/// Load the config at `path` (defaults if missing) and return it together
/// with the directory relative heightmap paths resolve against.
pub fn load_config(path: &str) -> (TerrainConfig, PathBuf) {
    let path = Path::new(path);
    let config = TerrainConfig::load_or_default(path);
    let base = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    (config, base)
}
