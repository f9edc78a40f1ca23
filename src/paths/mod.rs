use std::path::{Path, PathBuf};

use crate::filesystem::expand_home;
use crate::versions::GameVersion;

/// Resolves the files and directories of a game installation and the
/// launcher directory that sits next to it.
///
/// The launcher directory holds launcher-owned content such as graphics
/// packs; everything else lives under the game directory.
#[derive(Debug, Clone)]
pub struct GamePaths {
    game_dir: PathBuf,
    launcher_dir: PathBuf,
}

impl GamePaths {
    pub fn new(game_dir: impl Into<PathBuf>, launcher_dir: impl Into<PathBuf>) -> Self {
        GamePaths {
            game_dir: game_dir.into(),
            launcher_dir: launcher_dir.into(),
        }
    }

    /// Builds paths from string form, expanding a leading `~` in either
    /// directory to the user's home directory.
    pub fn from_strs(game_dir: &str, launcher_dir: &str) -> Self {
        GamePaths {
            game_dir: expand_home(game_dir),
            launcher_dir: expand_home(launcher_dir),
        }
    }

    pub fn game_dir(&self) -> &Path {
        &self.game_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.game_dir.join("data")
    }

    pub fn init_dir(&self) -> PathBuf {
        self.game_dir.join("data").join("init")
    }

    pub fn init_txt(&self) -> PathBuf {
        self.init_dir().join("init.txt")
    }

    pub fn d_init_txt(&self) -> PathBuf {
        self.init_dir().join("d_init.txt")
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.game_dir.join("raw")
    }

    pub fn raw_objects_dir(&self) -> PathBuf {
        self.game_dir.join("raw").join("objects")
    }

    pub fn save_dir(&self) -> PathBuf {
        self.game_dir.join("data").join("save")
    }

    /// Directory containing installable graphics packs, one per subfolder.
    pub fn graphics_dir(&self) -> PathBuf {
        self.launcher_dir.join("Graphics")
    }

    /// The raw material files carrying the aquifer toggle. The game renamed
    /// them in 0.31.
    pub fn aquifer_raw_files(&self, version: &GameVersion) -> Vec<PathBuf> {
        let objects = self.raw_objects_dir();
        aquifer_raw_names(version)
            .iter()
            .map(|name| objects.join(name))
            .collect()
    }
}

/// Filenames of the stone raws that carry the aquifer toggle for the given
/// game version.
pub fn aquifer_raw_names(version: &GameVersion) -> [&'static str; 3] {
    if version.as_str() < "0.31" {
        [
            "matgloss_stone_layer.txt",
            "matgloss_stone_mineral.txt",
            "matgloss_stone_soil.txt",
        ]
    } else {
        [
            "inorganic_stone_layer.txt",
            "inorganic_stone_mineral.txt",
            "inorganic_stone_soil.txt",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_init_files_under_data_init() {
        let paths = GamePaths::new("/games/df", "/games/lnp");
        assert_eq!(paths.init_txt(), PathBuf::from("/games/df/data/init/init.txt"));
        assert_eq!(
            paths.d_init_txt(),
            PathBuf::from("/games/df/data/init/d_init.txt")
        );
        assert_eq!(paths.graphics_dir(), PathBuf::from("/games/lnp/Graphics"));
    }

    #[test]
    fn from_strs_expands_a_leading_tilde() {
        let home = dirs::home_dir().unwrap();
        let paths = GamePaths::from_strs("~/games/df", "~");
        assert_eq!(paths.game_dir(), home.join("games/df"));
        assert_eq!(paths.graphics_dir(), home.join("Graphics"));
    }

    #[test]
    fn from_strs_leaves_plain_paths_alone() {
        let paths = GamePaths::from_strs("/games/df", "/games/lnp");
        assert_eq!(paths.game_dir(), Path::new("/games/df"));
        assert_eq!(paths.init_txt(), PathBuf::from("/games/df/data/init/init.txt"));
    }

    #[test]
    fn aquifer_raws_switch_names_at_0_31() {
        let old = GameVersion::from("0.28.181.40b");
        let new = GameVersion::from("0.31.01");
        assert_eq!(aquifer_raw_names(&old)[0], "matgloss_stone_layer.txt");
        assert_eq!(aquifer_raw_names(&new)[0], "inorganic_stone_layer.txt");
    }
}
