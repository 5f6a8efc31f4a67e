//! Achievement unlocks and the equipped worm cosmetic.
//!
//! Persisted as a small text file: the first line is the equipped worm
//! color id, each following line is `id|unlocked(0/1)`. Unknown ids and
//! malformed lines are skipped on load.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use strum_macros::Display;

use crate::app_dirs::AppDirs;

/// WPM needed to unlock the pink worm.
pub const PINK_WORM_WPM: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum WormColor {
    #[default]
    Default,
    Pink,
}

impl WormColor {
    pub fn from_id(id: &str) -> Self {
        match id {
            "pink" => WormColor::Pink,
            _ => WormColor::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

/// All achievements plus the currently equipped cosmetic.
#[derive(Debug, Clone)]
pub struct AchievementSet {
    pub equipped: WormColor,
    achievements: Vec<Achievement>,
}

impl AchievementSet {
    pub fn new() -> Self {
        Self {
            equipped: WormColor::Default,
            achievements: vec![Achievement {
                id: "pink_worm",
                name: "red!worm?pink!worm?",
                description: "Achieve 60+ WPM to unlock the pink worm variant!",
                unlocked: false,
            }],
        }
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.achievements
            .iter()
            .any(|a| a.id == id && a.unlocked)
    }

    /// Evaluate a finished round against the locked achievements. Returns
    /// true when something new was unlocked this call. Observes the outcome
    /// only; never touches session state.
    pub fn check(&mut self, wpm: f64) -> bool {
        let mut newly_unlocked = false;
        for achievement in &mut self.achievements {
            if achievement.id == "pink_worm" && !achievement.unlocked && wpm >= PINK_WORM_WPM {
                achievement.unlocked = true;
                newly_unlocked = true;
            }
        }
        newly_unlocked
    }

    /// Equip a color if it is available; the default is always available.
    /// Returns whether anything changed.
    pub fn equip(&mut self, color: WormColor) -> bool {
        let available = match color {
            WormColor::Default => true,
            WormColor::Pink => self.is_unlocked("pink_worm"),
        };
        if available && self.equipped != color {
            self.equipped = color;
            return true;
        }
        false
    }

    /// Step the equipped cosmetic to the next unlocked color.
    pub fn cycle_equipped(&mut self) -> bool {
        let next = match self.equipped {
            WormColor::Default => WormColor::Pink,
            WormColor::Pink => WormColor::Default,
        };
        self.equip(next)
    }

    fn set_unlocked(&mut self, id: &str, unlocked: bool) {
        for achievement in &mut self.achievements {
            if achievement.id == id {
                achievement.unlocked = unlocked;
            }
        }
    }
}

impl Default for AchievementSet {
    fn default() -> Self {
        Self::new()
    }
}

pub trait AchievementStore {
    /// Overlay persisted unlock state onto `set`.
    fn load(&self, set: &mut AchievementSet);
    fn save(&self, set: &AchievementSet) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileAchievementStore {
    path: PathBuf,
}

impl FileAchievementStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::achievements_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileAchievementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementStore for FileAchievementStore {
    fn load(&self, set: &mut AchievementSet) {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return;
        };
        let mut lines = contents.lines();

        if let Some(equipped) = lines.next() {
            set.equipped = WormColor::from_id(equipped.trim());
        }

        for line in lines {
            if let Some((id, flag)) = line.split_once('|') {
                if let Ok(flag) = flag.trim().parse::<u8>() {
                    set.set_unlocked(id.trim(), flag == 1);
                }
            }
        }

        // Never leave a locked cosmetic equipped.
        if set.equipped == WormColor::Pink && !set.is_unlocked("pink_worm") {
            set.equipped = WormColor::Default;
        }
    }

    fn save(&self, set: &AchievementSet) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut data = format!("{}\n", set.equipped);
        for achievement in set.achievements() {
            data.push_str(&format!(
                "{}|{}\n",
                achievement.id, achievement.unlocked as u8
            ));
        }
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_set_is_locked_with_default_worm() {
        let set = AchievementSet::new();
        assert_eq!(set.equipped, WormColor::Default);
        assert!(!set.is_unlocked("pink_worm"));
    }

    #[test]
    fn test_check_unlocks_at_threshold() {
        let mut set = AchievementSet::new();
        assert!(!set.check(59.9));
        assert!(!set.is_unlocked("pink_worm"));

        assert!(set.check(60.0));
        assert!(set.is_unlocked("pink_worm"));
    }

    #[test]
    fn test_check_fires_only_once() {
        let mut set = AchievementSet::new();
        assert!(set.check(75.0));
        assert!(!set.check(80.0));
    }

    #[test]
    fn test_equip_requires_unlock() {
        let mut set = AchievementSet::new();
        assert!(!set.equip(WormColor::Pink));
        assert_eq!(set.equipped, WormColor::Default);

        set.check(65.0);
        assert!(set.equip(WormColor::Pink));
        assert_eq!(set.equipped, WormColor::Pink);
    }

    #[test]
    fn test_cycle_equipped() {
        let mut set = AchievementSet::new();
        // nothing unlocked: cycling goes nowhere
        assert!(!set.cycle_equipped());

        set.check(65.0);
        assert!(set.cycle_equipped());
        assert_eq!(set.equipped, WormColor::Pink);
        assert!(set.cycle_equipped());
        assert_eq!(set.equipped, WormColor::Default);
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileAchievementStore::with_path(dir.path().join("achievements.txt"));

        let mut set = AchievementSet::new();
        set.check(70.0);
        set.equip(WormColor::Pink);
        store.save(&set).unwrap();

        let mut loaded = AchievementSet::new();
        store.load(&mut loaded);
        assert!(loaded.is_unlocked("pink_worm"));
        assert_eq!(loaded.equipped, WormColor::Pink);
    }

    #[test]
    fn test_load_missing_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let store = FileAchievementStore::with_path(dir.path().join("nope.txt"));

        let mut set = AchievementSet::new();
        store.load(&mut set);
        assert_eq!(set.equipped, WormColor::Default);
        assert!(!set.is_unlocked("pink_worm"));
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("achievements.txt");
        fs::write(&path, "default\nnot a record\npink_worm|banana\npink_worm|1\n").unwrap();

        let mut set = AchievementSet::new();
        FileAchievementStore::with_path(&path).load(&mut set);
        assert!(set.is_unlocked("pink_worm"));
    }

    #[test]
    fn test_load_demotes_locked_equipped_cosmetic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("achievements.txt");
        fs::write(&path, "pink\npink_worm|0\n").unwrap();

        let mut set = AchievementSet::new();
        FileAchievementStore::with_path(&path).load(&mut set);
        assert_eq!(set.equipped, WormColor::Default);
    }

    #[test]
    fn test_worm_color_ids() {
        assert_eq!(WormColor::Default.to_string(), "default");
        assert_eq!(WormColor::Pink.to_string(), "pink");
        assert_eq!(WormColor::from_id("pink"), WormColor::Pink);
        assert_eq!(WormColor::from_id("anything else"), WormColor::Default);
    }
}
