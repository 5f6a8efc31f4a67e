use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn data_file(name: &str) -> PathBuf {
        ProjectDirs::from("", "", "wormtype")
            .map(|proj_dirs| proj_dirs.data_local_dir().join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    }

    pub fn leaderboard_path() -> PathBuf {
        Self::data_file("leaderboard.txt")
    }

    pub fn achievements_path() -> PathBuf {
        Self::data_file("achievements.txt")
    }

    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "wormtype")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("wormtype_config.json"))
    }
}
