use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::filesystem::{self, FilesystemError, RemoveOptions};
use crate::paths::GamePaths;
use crate::settings::{GameSettings, SettingsError};

/// Errors raised by graphics pack operations.
#[derive(Debug, Error)]
pub enum GraphicsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// A graphics pack directory and the font pair its init file declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicsPack {
    pub name: String,
    pub font: Option<String>,
    pub graphics_font: Option<String>,
}

/// Outcome of a pack installation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    /// The pack directory lacks `raw/graphics` or `data/init` and was not
    /// touched.
    MissingFiles,
}

// Fields copied from a pack's init.txt into the install.
const INIT_FIELDS: &[&str] = &[
    "FONT",
    "FULLFONT",
    "GRAPHICS",
    "GRAPHICS_FONT",
    "GRAPHICS_FULLFONT",
    "TRUETYPE",
];

// Fields copied from a pack's d_init.txt: colors, tile overrides, tracks
// and tree tiles.
const D_INIT_FIELDS: &[&str] = &[
    "WOUND_COLOR_NONE",
    "WOUND_COLOR_MINOR",
    "WOUND_COLOR_INHIBITED",
    "WOUND_COLOR_FUNCTION_LOSS",
    "WOUND_COLOR_BROKEN",
    "WOUND_COLOR_MISSING",
    "SKY",
    "CHASM",
    "PILLAR_TILE",
    // Tracks
    "TRACK_N",
    "TRACK_S",
    "TRACK_E",
    "TRACK_W",
    "TRACK_NS",
    "TRACK_NE",
    "TRACK_NW",
    "TRACK_SE",
    "TRACK_SW",
    "TRACK_EW",
    "TRACK_NSE",
    "TRACK_NSW",
    "TRACK_NEW",
    "TRACK_SEW",
    "TRACK_NSEW",
    "TRACK_RAMP_N",
    "TRACK_RAMP_S",
    "TRACK_RAMP_E",
    "TRACK_RAMP_W",
    "TRACK_RAMP_NS",
    "TRACK_RAMP_NE",
    "TRACK_RAMP_NW",
    "TRACK_RAMP_SE",
    "TRACK_RAMP_SW",
    "TRACK_RAMP_EW",
    "TRACK_RAMP_NSE",
    "TRACK_RAMP_NSW",
    "TRACK_RAMP_NEW",
    "TRACK_RAMP_SEW",
    "TRACK_RAMP_NSEW",
    // Trees
    "TREE_ROOT_SLOPING",
    "TREE_TRUNK_SLOPING",
    "TREE_ROOT_SLOPING_DEAD",
    "TREE_TRUNK_SLOPING_DEAD",
    "TREE_ROOTS",
    "TREE_ROOTS_DEAD",
    "TREE_BRANCHES",
    "TREE_BRANCHES_DEAD",
    "TREE_SMOOTH_BRANCHES",
    "TREE_SMOOTH_BRANCHES_DEAD",
    "TREE_TRUNK_PILLAR",
    "TREE_TRUNK_PILLAR_DEAD",
    "TREE_CAP_PILLAR",
    "TREE_CAP_PILLAR_DEAD",
    "TREE_TRUNK_N",
    "TREE_TRUNK_S",
    "TREE_TRUNK_N_DEAD",
    "TREE_TRUNK_S_DEAD",
    "TREE_TRUNK_EW",
    "TREE_TRUNK_EW_DEAD",
    "TREE_CAP_WALL_N",
    "TREE_CAP_WALL_S",
    "TREE_CAP_WALL_N_DEAD",
    "TREE_CAP_WALL_S_DEAD",
    "TREE_TRUNK_E",
    "TREE_TRUNK_W",
    "TREE_TRUNK_E_DEAD",
    "TREE_TRUNK_W_DEAD",
    "TREE_TRUNK_NS",
    "TREE_TRUNK_NS_DEAD",
    "TREE_CAP_WALL_E",
    "TREE_CAP_WALL_W",
    "TREE_CAP_WALL_E_DEAD",
    "TREE_CAP_WALL_W_DEAD",
    "TREE_TRUNK_NW",
    "TREE_CAP_WALL_NW",
    "TREE_TRUNK_NW_DEAD",
    "TREE_CAP_WALL_NW_DEAD",
    "TREE_TRUNK_NE",
    "TREE_CAP_WALL_NE",
    "TREE_TRUNK_NE_DEAD",
    "TREE_CAP_WALL_NE_DEAD",
    "TREE_TRUNK_SW",
    "TREE_CAP_WALL_SW",
    "TREE_TRUNK_SW_DEAD",
    "TREE_CAP_WALL_SW_DEAD",
    "TREE_TRUNK_SE",
    "TREE_CAP_WALL_SE",
    "TREE_TRUNK_SE_DEAD",
    "TREE_CAP_WALL_SE_DEAD",
    "TREE_TRUNK_NSE",
    "TREE_TRUNK_NSE_DEAD",
    "TREE_TRUNK_NSW",
    "TREE_TRUNK_NSW_DEAD",
    "TREE_TRUNK_NEW",
    "TREE_TRUNK_NEW_DEAD",
    "TREE_TRUNK_SEW",
    "TREE_TRUNK_SEW_DEAD",
    "TREE_TRUNK_NSEW",
    "TREE_TRUNK_NSEW_DEAD",
    "TREE_TRUNK_BRANCH_N",
    "TREE_TRUNK_BRANCH_N_DEAD",
    "TREE_TRUNK_BRANCH_S",
    "TREE_TRUNK_BRANCH_S_DEAD",
    "TREE_TRUNK_BRANCH_E",
    "TREE_TRUNK_BRANCH_E_DEAD",
    "TREE_TRUNK_BRANCH_W",
    "TREE_TRUNK_BRANCH_W_DEAD",
    "TREE_BRANCH_NS",
    "TREE_BRANCH_NS_DEAD",
    "TREE_BRANCH_EW",
    "TREE_BRANCH_EW_DEAD",
    "TREE_BRANCH_NW",
    "TREE_BRANCH_NW_DEAD",
    "TREE_BRANCH_NE",
    "TREE_BRANCH_NE_DEAD",
    "TREE_BRANCH_SW",
    "TREE_BRANCH_SW_DEAD",
    "TREE_BRANCH_SE",
    "TREE_BRANCH_SE_DEAD",
    "TREE_BRANCH_NSE",
    "TREE_BRANCH_NSE_DEAD",
    "TREE_BRANCH_NSW",
    "TREE_BRANCH_NSW_DEAD",
    "TREE_BRANCH_NEW",
    "TREE_BRANCH_NEW_DEAD",
    "TREE_BRANCH_SEW",
    "TREE_BRANCH_SEW_DEAD",
    "TREE_BRANCH_NSEW",
    "TREE_BRANCH_NSEW_DEAD",
    "TREE_TWIGS",
    "TREE_TWIGS_DEAD",
    "TREE_CAP_RAMP",
    "TREE_CAP_RAMP_DEAD",
    "TREE_CAP_FLOOR1",
    "TREE_CAP_FLOOR2",
    "TREE_CAP_FLOOR1_DEAD",
    "TREE_CAP_FLOOR2_DEAD",
    "TREE_CAP_FLOOR3",
    "TREE_CAP_FLOOR4",
    "TREE_CAP_FLOOR3_DEAD",
    "TREE_CAP_FLOOR4_DEAD",
    "TREE_TRUNK_INTERIOR",
    "TREE_TRUNK_INTERIOR_DEAD",
];

// Files a simplified pack keeps under data/init.
const KEPT_INIT_FILES: &[&str] = &["colors.txt", "init.txt", "d_init.txt", "overrides.txt"];

fn pack_dir(paths: &GamePaths, pack: &str) -> PathBuf {
    paths.graphics_dir().join(pack)
}

fn pack_init_txt(paths: &GamePaths, pack: &str) -> PathBuf {
    pack_dir(paths, pack).join("data").join("init").join("init.txt")
}

/// Lists the graphics packs under the launcher's graphics directory, probing
/// each pack's init file for the fonts it would install. A missing graphics
/// directory yields an empty list.
pub fn read_packs(paths: &GamePaths) -> Result<Vec<GraphicsPack>, GraphicsError> {
    let graphics = paths.graphics_dir();
    let mut packs = Vec::new();
    if !filesystem::dir_exists(&graphics) {
        return Ok(packs);
    }
    let mut names: Vec<String> = fs::read_dir(&graphics)?
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();
    for name in names {
        let init = pack_init_txt(paths, &name);
        packs.push(GraphicsPack {
            font: GameSettings::read_value(&init, "FONT"),
            graphics_font: GameSettings::read_value(&init, "GRAPHICS_FONT"),
            name,
        });
    }
    Ok(packs)
}

/// Names the currently installed pack: the one whose FONT and GRAPHICS_FONT
/// both match the registry's values. When no pack matches, returns the raw
/// `font/graphics_font` pair instead.
pub fn current_pack(paths: &GamePaths, settings: &GameSettings) -> Result<String, GraphicsError> {
    let font = settings.get("FONT");
    let graphics_font = settings.get("GRAPHICS_FONT");
    for pack in read_packs(paths)? {
        if font.is_some()
            && pack.font.as_deref() == font
            && pack.graphics_font.as_deref() == graphics_font
        {
            return Ok(pack.name);
        }
    }
    Ok(format!(
        "{}/{}",
        font.unwrap_or("?"),
        graphics_font.unwrap_or("?")
    ))
}

/// Installs the named graphics pack into the game directory.
///
/// The pack must contain `raw/graphics` and `data/init`; otherwise nothing
/// is touched and [`InstallOutcome::MissingFiles`] is returned. Installation
/// replaces the install's `raw/graphics` and `data/art` with the pack's,
/// patches the pack's init fields into the game's init files through the
/// registry (preserving every setting the pack does not override), installs
/// `colors.txt`, and carries over `overrides.txt` when the pack ships one.
///
/// There is no rollback: an error partway through propagates and leaves the
/// installation in a mixed state, so callers should treat a failed install
/// as needing a reinstall.
pub fn install_pack(
    paths: &GamePaths,
    settings: &mut GameSettings,
    pack: &str,
) -> Result<InstallOutcome, GraphicsError> {
    let gfx = pack_dir(paths, pack);
    if !filesystem::dir_exists(&gfx)
        || !filesystem::dir_exists(gfx.join("raw").join("graphics"))
        || !filesystem::dir_exists(gfx.join("data").join("init"))
    {
        return Ok(InstallOutcome::MissingFiles);
    }

    // Pick up the install's current values (and any fields the catalog does
    // not know) before patching the pack's overrides on top.
    settings.read_settings()?;

    filesystem::remove_if_exists(
        paths.raw_dir().join("graphics"),
        RemoveOptions { recursive: true },
    )?;
    filesystem::copy_tree(gfx.join("raw"), paths.raw_dir())?;

    filesystem::remove_if_exists(paths.data_dir().join("art"), RemoveOptions { recursive: true })?;
    filesystem::copy_tree(gfx.join("data").join("art"), paths.data_dir().join("art"))?;

    patch_inits(settings, &gfx)?;

    filesystem::copy_file(
        gfx.join("data").join("init").join("colors.txt"),
        paths.init_dir().join("colors.txt"),
    )?;

    // TwbT overrides travel with the pack when present; packs without one
    // just clear any stale copy.
    let overrides = paths.init_dir().join("overrides.txt");
    if let Err(err) = fs::remove_file(&overrides) {
        debug!("no overrides.txt to remove: {err}");
    }
    let pack_overrides = gfx.join("data").join("init").join("overrides.txt");
    if filesystem::file_exists(&pack_overrides) {
        filesystem::copy_file(&pack_overrides, &overrides)?;
    }

    Ok(InstallOutcome::Installed)
}

/// Reads the pack's init overrides into the registry and writes the merged
/// settings back to the install, changing only the listed fields. Fields
/// the registry has never seen (version-gated or absent from the install's
/// files) are skipped.
fn patch_inits(settings: &mut GameSettings, gfx_dir: &Path) -> Result<(), SettingsError> {
    let init_dir = gfx_dir.join("data").join("init");
    settings.read_file(&init_dir.join("init.txt"), INIT_FIELDS, false)?;
    let d_init = init_dir.join("d_init.txt");
    if d_init.is_file() {
        settings.read_file(&d_init, D_INIT_FIELDS, false)?;
    }
    settings.write_settings()
}

/// Strips the named pack down to the files installation needs: `data/art`,
/// `raw/graphics`, `raw/objects`, and the init files. Returns the number of
/// files removed, or `None` for an empty pack directory.
pub fn simplify_pack(paths: &GamePaths, pack: &str) -> Result<Option<u64>, GraphicsError> {
    let pack_dir = pack_dir(paths, pack);
    let files_before = filesystem::count_files(&pack_dir);
    if files_before == 0 {
        return Ok(None);
    }

    let staging = tempfile::tempdir()?;
    filesystem::copy_tree(&pack_dir, &staging.path().to_path_buf())?;
    filesystem::remove_if_exists(&pack_dir, RemoveOptions { recursive: true })?;

    for sub in ["data/art", "raw/graphics", "raw/objects", "data/init"] {
        filesystem::create_if_not_exists(pack_dir.join(sub), true)?;
    }
    for sub in ["data/art", "raw/graphics", "raw/objects"] {
        let src = staging.path().join(sub);
        if src.is_dir() {
            filesystem::copy_tree(&src, &pack_dir.join(sub))?;
        }
    }
    for name in KEPT_INIT_FILES {
        let src = staging.path().join("data").join("init").join(name);
        if src.is_file() {
            filesystem::copy_file(&src, &pack_dir.join("data").join("init").join(name))?;
        }
    }

    let files_after = filesystem::count_files(&pack_dir);
    Ok(Some(files_before.saturating_sub(files_after)))
}

/// Simplifies every pack, returning the total number of files removed.
pub fn simplify_packs(paths: &GamePaths) -> Result<u64, GraphicsError> {
    let mut removed = 0;
    for pack in read_packs(paths)? {
        if let Some(count) = simplify_pack(paths, &pack.name)? {
            removed += count;
        }
    }
    Ok(removed)
}

/// Refreshes each save game with the install's current raws, replacing the
/// save's `raw/graphics` outright. A directory named `current` is skipped.
/// Returns the number of saves updated.
pub fn update_savegames(paths: &GamePaths) -> Result<usize, GraphicsError> {
    let save_dir = paths.save_dir();
    if !save_dir.is_dir() {
        return Ok(0);
    }
    let mut count = 0;
    for entry in fs::read_dir(&save_dir)?.flatten() {
        let save = entry.path();
        if !save.is_dir() || save.file_name().is_some_and(|name| name == "current") {
            continue;
        }
        filesystem::remove_if_exists(
            save.join("raw").join("graphics"),
            RemoveOptions { recursive: true },
        )?;
        filesystem::copy_tree(&paths.raw_dir(), &save.join("raw"))?;
        count += 1;
    }
    Ok(count)
}
