use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

/// An opaque, totally ordered game version identifier.
///
/// The game zero-pads its version strings (`0.31.04`, `0.40.13`, ...), so
/// plain string ordering matches release order. Comparison is therefore
/// derived straight from the inner string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameVersion(String);

impl GameVersion {
    pub fn new(version: impl Into<String>) -> Self {
        GameVersion(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameVersion {
    fn from(version: &str) -> Self {
        GameVersion(version.to_string())
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Describes the game installation being operated on: its version and any
/// named variations that change which options exist.
///
/// Known variations: `"legacy"` (pre-SDL builds, which lack the graphics
/// printing options) and `"twbt"` (extends the print mode choices).
#[derive(Debug, Clone)]
pub struct GameInfo {
    pub version: GameVersion,
    variations: HashSet<String>,
}

impl GameInfo {
    pub fn new(version: impl Into<GameVersion>) -> Self {
        GameInfo {
            version: version.into(),
            variations: HashSet::new(),
        }
    }

    /// Adds a named variation flag, builder style.
    pub fn with_variation(mut self, name: &str) -> Self {
        self.variations.insert(name.to_string());
        self
    }

    pub fn has_variation(&self, name: &str) -> bool {
        self.variations.contains(name)
    }
}

/// The version range in which an on-disk field is valid: from `introduced`
/// (inclusive) up to `removed` (exclusive), or open-ended when `removed`
/// is absent.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpan {
    pub introduced: &'static str,
    pub removed: Option<&'static str>,
}

impl FieldSpan {
    /// Whether the field exists in the given game version.
    pub fn supports(&self, version: &GameVersion) -> bool {
        if self.introduced > version.as_str() {
            return false;
        }
        match self.removed {
            Some(removed) => version.as_str() < removed,
            None => true,
        }
    }
}

/// Looks up the version range for an on-disk field name.
///
/// Returns `None` for field names absent from the table. The table is
/// exhaustive for every field the built-in option catalog references, so a
/// `None` during catalog registration is a programming error; fields
/// discovered inside a file at runtime legitimately fall outside it.
pub fn field_span(field: &str) -> Option<FieldSpan> {
    FIELD_SPANS.get(field).copied()
}

/// Internal/custom fields are named with a leading lowercase character and
/// bypass the compatibility table entirely.
pub fn is_internal_field(field: &str) -> bool {
    match field.chars().next() {
        Some(c) => !c.is_uppercase(),
        None => true,
    }
}

static FIELD_SPANS: LazyLock<HashMap<&'static str, FieldSpan>> = LazyLock::new(|| {
    FIELD_TABLE
        .iter()
        .map(|&(field, introduced, removed)| (field, FieldSpan { introduced, removed }))
        .collect()
});

// One entry per known field: name, first version with it, first version
// without it (if it was ever removed).
const FIELD_TABLE: &[(&str, &str, Option<&str>)] = &[
    ("EXTENDED_ASCII", "0.21.93.19a", Some("0.21.104.19d")),
    ("BLACK_B", "0.21.93.19a", Some("0.31.04")),
    ("BLACK_G", "0.21.93.19a", Some("0.31.04")),
    ("BLACK_R", "0.21.93.19a", Some("0.31.04")),
    ("BLUE_B", "0.21.93.19a", Some("0.31.04")),
    ("BLUE_G", "0.21.93.19a", Some("0.31.04")),
    ("BLUE_R", "0.21.93.19a", Some("0.31.04")),
    ("BROWN_B", "0.21.93.19a", Some("0.31.04")),
    ("BROWN_G", "0.21.93.19a", Some("0.31.04")),
    ("BROWN_R", "0.21.93.19a", Some("0.31.04")),
    ("CYAN_B", "0.21.93.19a", Some("0.31.04")),
    ("CYAN_G", "0.21.93.19a", Some("0.31.04")),
    ("CYAN_R", "0.21.93.19a", Some("0.31.04")),
    ("DGRAY_B", "0.21.93.19a", Some("0.31.04")),
    ("DGRAY_G", "0.21.93.19a", Some("0.31.04")),
    ("DGRAY_R", "0.21.93.19a", Some("0.31.04")),
    ("GREEN_B", "0.21.93.19a", Some("0.31.04")),
    ("GREEN_G", "0.21.93.19a", Some("0.31.04")),
    ("GREEN_R", "0.21.93.19a", Some("0.31.04")),
    ("LBLUE_B", "0.21.93.19a", Some("0.31.04")),
    ("LBLUE_G", "0.21.93.19a", Some("0.31.04")),
    ("LBLUE_R", "0.21.93.19a", Some("0.31.04")),
    ("LCYAN_B", "0.21.93.19a", Some("0.31.04")),
    ("LCYAN_G", "0.21.93.19a", Some("0.31.04")),
    ("LCYAN_R", "0.21.93.19a", Some("0.31.04")),
    ("LGRAY_B", "0.21.93.19a", Some("0.31.04")),
    ("LGRAY_G", "0.21.93.19a", Some("0.31.04")),
    ("LGRAY_R", "0.21.93.19a", Some("0.31.04")),
    ("LGREEN_B", "0.21.93.19a", Some("0.31.04")),
    ("LGREEN_G", "0.21.93.19a", Some("0.31.04")),
    ("LGREEN_R", "0.21.93.19a", Some("0.31.04")),
    ("LMAGENTA_B", "0.21.93.19a", Some("0.31.04")),
    ("LMAGENTA_G", "0.21.93.19a", Some("0.31.04")),
    ("LMAGENTA_R", "0.21.93.19a", Some("0.31.04")),
    ("LRED_B", "0.21.93.19a", Some("0.31.04")),
    ("LRED_G", "0.21.93.19a", Some("0.31.04")),
    ("LRED_R", "0.21.93.19a", Some("0.31.04")),
    ("MAGENTA_B", "0.21.93.19a", Some("0.31.04")),
    ("MAGENTA_G", "0.21.93.19a", Some("0.31.04")),
    ("MAGENTA_R", "0.21.93.19a", Some("0.31.04")),
    ("RED_B", "0.21.93.19a", Some("0.31.04")),
    ("RED_G", "0.21.93.19a", Some("0.31.04")),
    ("RED_R", "0.21.93.19a", Some("0.31.04")),
    ("WHITE_B", "0.21.93.19a", Some("0.31.04")),
    ("WHITE_G", "0.21.93.19a", Some("0.31.04")),
    ("WHITE_R", "0.21.93.19a", Some("0.31.04")),
    ("YELLOW_B", "0.21.93.19a", Some("0.31.04")),
    ("YELLOW_G", "0.21.93.19a", Some("0.31.04")),
    ("YELLOW_R", "0.21.93.19a", Some("0.31.04")),
    ("DISPLAY_LENGTH", "0.21.93.19a", None),
    ("FONT", "0.21.93.19a", None),
    ("FULLFONT", "0.21.93.19a", None),
    ("FULLSCREENX", "0.21.93.19a", None),
    ("FULLSCREENY", "0.21.93.19a", None),
    ("MORE", "0.21.93.19a", None),
    ("VARIED_GROUND_TILES", "0.21.93.19a", None),
    ("WINDOWEDX", "0.21.93.19a", None),
    ("WINDOWEDY", "0.21.93.19a", None),
    ("INTRO", "0.21.100.19a", None),
    ("SOUND", "0.21.100.19a", None),
    ("KEY_HOLD_MS", "0.21.101.19a", None),
    ("NICKNAME_ADVENTURE", "0.21.102.19a", None),
    ("NICKNAME_DWARF", "0.21.102.19a", None),
    ("NICKNAME_LEGENDS", "0.21.102.19a", None),
    ("WINDOWED", "0.21.102.19a", None),
    ("ENGRAVINGS_START_OBSCURED", "0.21.104.19d", None),
    ("MOUSE", "0.21.104.21a", None),
    ("MOUSE_PICTURE", "0.21.104.21a", None),
    ("ADVENTURER_TRAPS", "0.22.110.23a", None),
    ("BLACK_SPACE", "0.22.120.23a", None),
    ("GRAPHICS", "0.22.120.23a", None),
    ("GRAPHICS_BLACK_SPACE", "0.22.120.23a", None),
    ("GRAPHICS_FONT", "0.22.120.23a", None),
    ("GRAPHICS_FULLFONT", "0.22.120.23a", None),
    ("GRAPHICS_FULLSCREENX", "0.22.120.23a", None),
    ("GRAPHICS_FULLSCREENY", "0.22.120.23a", None),
    ("GRAPHICS_WINDOWEDX", "0.22.120.23a", None),
    ("GRAPHICS_WINDOWEDY", "0.22.120.23a", None),
    ("FPS", "0.22.121.23b", None),
    ("TEMPERATURE", "0.22.121.23b", None),
    ("WEATHER", "0.22.121.23b", None),
    ("FPS_CAP", "0.23.130.23a", None),
    ("POPULATION_CAP", "0.23.130.23a", None),
    ("ADVENTURER_ALWAYS_CENTER", "0.27.169.32a", None),
    ("ADVENTURER_Z_VIEWS", "0.27.169.32a", None),
    ("AQUIFER", "0.27.169.32a", None),
    ("ARTIFACTS", "0.27.169.32a", None),
    ("AUTOBACKUP", "0.27.169.32a", None),
    ("AUTOSAVE", "0.27.169.32a", None),
    ("CAVEINS", "0.27.169.32a", None),
    ("CHASM", "0.27.169.32a", None),
    ("COFFIN_NO_PETS_DEFAULT", "0.27.169.32a", None),
    ("ECONOMY", "0.27.169.32a", None),
    ("G_FPS_CAP", "0.27.169.32a", None),
    ("INITIAL_SAVE", "0.27.169.32a", None),
    ("INVADERS", "0.27.169.32a", None),
    ("LOG_MAP_REJECTS", "0.27.169.32a", None),
    ("PATH_COST", "0.27.169.32a", None),
    ("RECENTER_INTERFACE_SHUTDOWN_MS", "0.27.169.32a", None),
    ("SHOW_FLOW_AMOUNTS", "0.27.169.32a", None),
    ("SHOW_IMP_QUALITY", "0.27.169.32a", None),
    ("SKY", "0.27.169.32a", None),
    ("TEXTURE_PARAM", "0.27.169.32a", None),
    ("TOPMOST", "0.27.169.32a", None),
    ("VOLUME", "0.27.169.32a", None),
    ("VSYNC", "0.27.169.32a", None),
    ("PRIORITY", "0.27.169.33c", None),
    ("EMBARK_RECTANGLE", "0.27.169.33g", None),
    ("PAUSE_ON_LOAD", "0.27.169.33g", None),
    ("BABY_CHILD_CAP", "0.27.176.38a", None),
    ("ZERO_RENT", "0.27.176.38a", None),
    ("AUTOSAVE_PAUSE", "0.27.176.38b", None),
    ("EMBARK_WARNING_ALWAYS", "0.27.176.38b", None),
    ("IDLERS", "0.28.181.39a", None),
    ("SHOW_ALL_HISTORY_IN_DWARF_MODE", "0.28.181.39a", None),
    ("SHOW_EMBARK_CHASM", "0.28.181.39d", Some("0.31.01")),
    ("SHOW_EMBARK_M_PIPE", "0.28.181.39d", Some("0.31.01")),
    ("SHOW_EMBARK_M_POOL", "0.28.181.39d", Some("0.31.01")),
    ("SHOW_EMBARK_OTHER", "0.28.181.39d", Some("0.31.01")),
    ("SHOW_EMBARK_PIT", "0.28.181.39d", Some("0.31.01")),
    ("SHOW_EMBARK_POOL", "0.28.181.39d", Some("0.31.01")),
    ("SHOW_EMBARK_RIVER", "0.28.181.39d", Some("0.31.01")),
    ("SHOW_EMBARK_TUNNEL", "0.28.181.39d", None),
    ("GRID", "0.28.181.39f", None),
    ("STORE_DIST_BARREL_COMBINE", "0.28.181.40a", None),
    ("STORE_DIST_BIN_COMBINE", "0.28.181.40a", None),
    ("STORE_DIST_BUCKET_COMBINE", "0.28.181.40a", None),
    ("STORE_DIST_ITEM_DECREASE", "0.28.181.40a", None),
    ("STORE_DIST_SEED_COMBINE", "0.28.181.40a", None),
    ("FULLGRID", "0.28.181.40b", None),
    ("PARTIAL_PRINT", "0.28.181.40b", None),
    ("COMPRESSED_SAVES", "0.31.01", None),
    ("TESTING_ARENA", "0.31.01", None),
    ("WOUND_COLOR_BROKEN", "0.31.01", None),
    ("WOUND_COLOR_FUNCTION_LOSS", "0.31.01", None),
    ("WOUND_COLOR_INHIBITED", "0.31.01", None),
    ("WOUND_COLOR_MINOR", "0.31.01", None),
    ("WOUND_COLOR_MISSING", "0.31.01", None),
    ("WOUND_COLOR_NONE", "0.31.01", None),
    ("PILLAR_TILE", "0.31.08", None),
    ("ZOOM_SPEED", "0.31.13", None),
    ("ARB_SYNC", "0.31.13", None),
    ("KEY_REPEAT_ACCEL_LIMIT", "0.31.13", None),
    ("KEY_REPEAT_ACCEL_START", "0.31.13", None),
    ("KEY_REPEAT_MS", "0.31.13", None),
    ("MACRO_MS", "0.31.13", None),
    ("PRINT_MODE", "0.31.13", None),
    ("RESIZABLE", "0.31.13", None),
    ("SINGLE_BUFFER", "0.31.13", None),
    ("TRUETYPE", "0.31.13", None),
    ("WALKING_SPREADS_SPATTER_ADV", "0.31.16", None),
    ("WALKING_SPREADS_SPATTER_DWF", "0.31.16", None),
    ("SET_LABOR_LISTS", "0.34.03", None),
    ("TRACK_E", "0.34.08", None),
    ("TRACK_EW", "0.34.08", None),
    ("TRACK_N", "0.34.08", None),
    ("TRACK_NE", "0.34.08", None),
    ("TRACK_NEW", "0.34.08", None),
    ("TRACK_NS", "0.34.08", None),
    ("TRACK_NSE", "0.34.08", None),
    ("TRACK_NSEW", "0.34.08", None),
    ("TRACK_NSW", "0.34.08", None),
    ("TRACK_NW", "0.34.08", None),
    ("TRACK_RAMP_E", "0.34.08", None),
    ("TRACK_RAMP_EW", "0.34.08", None),
    ("TRACK_RAMP_N", "0.34.08", None),
    ("TRACK_RAMP_NE", "0.34.08", None),
    ("TRACK_RAMP_NEW", "0.34.08", None),
    ("TRACK_RAMP_NS", "0.34.08", None),
    ("TRACK_RAMP_NSE", "0.34.08", None),
    ("TRACK_RAMP_NSEW", "0.34.08", None),
    ("TRACK_RAMP_NSW", "0.34.08", None),
    ("TRACK_RAMP_NW", "0.34.08", None),
    ("TRACK_RAMP_S", "0.34.08", None),
    ("TRACK_RAMP_SE", "0.34.08", None),
    ("TRACK_RAMP_SEW", "0.34.08", None),
    ("TRACK_RAMP_SW", "0.34.08", None),
    ("TRACK_RAMP_W", "0.34.08", None),
    ("TRACK_S", "0.34.08", None),
    ("TRACK_SE", "0.34.08", None),
    ("TRACK_SEW", "0.34.08", None),
    ("TRACK_SW", "0.34.08", None),
    ("TRACK_W", "0.34.08", None),
    ("FORTRESS_SEED_CAP", "0.40.01", None),
    ("SPECIFIC_SEED_CAP", "0.40.01", None),
    ("TREE_BRANCH_EW", "0.40.01", None),
    ("TREE_BRANCH_EW_DEAD", "0.40.01", None),
    ("TREE_BRANCH_NE", "0.40.01", None),
    ("TREE_BRANCH_NE_DEAD", "0.40.01", None),
    ("TREE_BRANCH_NEW", "0.40.01", None),
    ("TREE_BRANCH_NEW_DEAD", "0.40.01", None),
    ("TREE_BRANCH_NS", "0.40.01", None),
    ("TREE_BRANCH_NS_DEAD", "0.40.01", None),
    ("TREE_BRANCH_NSE", "0.40.01", None),
    ("TREE_BRANCH_NSE_DEAD", "0.40.01", None),
    ("TREE_BRANCH_NSEW", "0.40.01", None),
    ("TREE_BRANCH_NSEW_DEAD", "0.40.01", None),
    ("TREE_BRANCH_NSW", "0.40.01", None),
    ("TREE_BRANCH_NSW_DEAD", "0.40.01", None),
    ("TREE_BRANCH_NW", "0.40.01", None),
    ("TREE_BRANCH_NW_DEAD", "0.40.01", None),
    ("TREE_BRANCH_SE", "0.40.01", None),
    ("TREE_BRANCH_SE_DEAD", "0.40.01", None),
    ("TREE_BRANCH_SEW", "0.40.01", None),
    ("TREE_BRANCH_SEW_DEAD", "0.40.01", None),
    ("TREE_BRANCH_SW", "0.40.01", None),
    ("TREE_BRANCH_SW_DEAD", "0.40.01", None),
    ("TREE_BRANCHES", "0.40.01", None),
    ("TREE_BRANCHES_DEAD", "0.40.01", None),
    ("TREE_CAP_FLOOR1", "0.40.01", None),
    ("TREE_CAP_FLOOR1_DEAD", "0.40.01", None),
    ("TREE_CAP_FLOOR2", "0.40.01", None),
    ("TREE_CAP_FLOOR2_DEAD", "0.40.01", None),
    ("TREE_CAP_FLOOR3", "0.40.01", None),
    ("TREE_CAP_FLOOR3_DEAD", "0.40.01", None),
    ("TREE_CAP_FLOOR4", "0.40.01", None),
    ("TREE_CAP_FLOOR4_DEAD", "0.40.01", None),
    ("TREE_CAP_PILLAR", "0.40.01", None),
    ("TREE_CAP_PILLAR_DEAD", "0.40.01", None),
    ("TREE_CAP_RAMP", "0.40.01", None),
    ("TREE_CAP_RAMP_DEAD", "0.40.01", None),
    ("TREE_CAP_WALL_E", "0.40.01", None),
    ("TREE_CAP_WALL_E_DEAD", "0.40.01", None),
    ("TREE_CAP_WALL_N", "0.40.01", None),
    ("TREE_CAP_WALL_N_DEAD", "0.40.01", None),
    ("TREE_CAP_WALL_NE", "0.40.01", None),
    ("TREE_CAP_WALL_NE_DEAD", "0.40.01", None),
    ("TREE_CAP_WALL_NW", "0.40.01", None),
    ("TREE_CAP_WALL_NW_DEAD", "0.40.01", None),
    ("TREE_CAP_WALL_S", "0.40.01", None),
    ("TREE_CAP_WALL_S_DEAD", "0.40.01", None),
    ("TREE_CAP_WALL_SE", "0.40.01", None),
    ("TREE_CAP_WALL_SE_DEAD", "0.40.01", None),
    ("TREE_CAP_WALL_SW", "0.40.01", None),
    ("TREE_CAP_WALL_SW_DEAD", "0.40.01", None),
    ("TREE_CAP_WALL_W", "0.40.01", None),
    ("TREE_CAP_WALL_W_DEAD", "0.40.01", None),
    ("TREE_ROOT_SLOPING", "0.40.01", None),
    ("TREE_ROOT_SLOPING_DEAD", "0.40.01", None),
    ("TREE_ROOTS", "0.40.01", None),
    ("TREE_ROOTS_DEAD", "0.40.01", None),
    ("TREE_SMOOTH_BRANCHES", "0.40.01", None),
    ("TREE_SMOOTH_BRANCHES_DEAD", "0.40.01", None),
    ("TREE_TRUNK_BRANCH_E", "0.40.01", None),
    ("TREE_TRUNK_BRANCH_E_DEAD", "0.40.01", None),
    ("TREE_TRUNK_BRANCH_N", "0.40.01", None),
    ("TREE_TRUNK_BRANCH_N_DEAD", "0.40.01", None),
    ("TREE_TRUNK_BRANCH_S", "0.40.01", None),
    ("TREE_TRUNK_BRANCH_S_DEAD", "0.40.01", None),
    ("TREE_TRUNK_BRANCH_W", "0.40.01", None),
    ("TREE_TRUNK_BRANCH_W_DEAD", "0.40.01", None),
    ("TREE_TRUNK_E", "0.40.01", None),
    ("TREE_TRUNK_E_DEAD", "0.40.01", None),
    ("TREE_TRUNK_EW", "0.40.01", None),
    ("TREE_TRUNK_EW_DEAD", "0.40.01", None),
    ("TREE_TRUNK_INTERIOR", "0.40.01", None),
    ("TREE_TRUNK_INTERIOR_DEAD", "0.40.01", None),
    ("TREE_TRUNK_N", "0.40.01", None),
    ("TREE_TRUNK_N_DEAD", "0.40.01", None),
    ("TREE_TRUNK_NE", "0.40.01", None),
    ("TREE_TRUNK_NE_DEAD", "0.40.01", None),
    ("TREE_TRUNK_NEW", "0.40.01", None),
    ("TREE_TRUNK_NEW_DEAD", "0.40.01", None),
    ("TREE_TRUNK_NS", "0.40.01", None),
    ("TREE_TRUNK_NS_DEAD", "0.40.01", None),
    ("TREE_TRUNK_NSE", "0.40.01", None),
    ("TREE_TRUNK_NSE_DEAD", "0.40.01", None),
    ("TREE_TRUNK_NSEW", "0.40.01", None),
    ("TREE_TRUNK_NSEW_DEAD", "0.40.01", None),
    ("TREE_TRUNK_NSW", "0.40.01", None),
    ("TREE_TRUNK_NSW_DEAD", "0.40.01", None),
    ("TREE_TRUNK_NW", "0.40.01", None),
    ("TREE_TRUNK_NW_DEAD", "0.40.01", None),
    ("TREE_TRUNK_PILLAR", "0.40.01", None),
    ("TREE_TRUNK_PILLAR_DEAD", "0.40.01", None),
    ("TREE_TRUNK_S", "0.40.01", None),
    ("TREE_TRUNK_S_DEAD", "0.40.01", None),
    ("TREE_TRUNK_SE", "0.40.01", None),
    ("TREE_TRUNK_SE_DEAD", "0.40.01", None),
    ("TREE_TRUNK_SEW", "0.40.01", None),
    ("TREE_TRUNK_SEW_DEAD", "0.40.01", None),
    ("TREE_TRUNK_SLOPING", "0.40.01", None),
    ("TREE_TRUNK_SLOPING_DEAD", "0.40.01", None),
    ("TREE_TRUNK_SW", "0.40.01", None),
    ("TREE_TRUNK_SW_DEAD", "0.40.01", None),
    ("TREE_TRUNK_W", "0.40.01", None),
    ("TREE_TRUNK_W_DEAD", "0.40.01", None),
    ("TREE_TWIGS", "0.40.01", None),
    ("TREE_TWIGS_DEAD", "0.40.01", None),
    ("STRICT_POPULATION_CAP", "0.40.05", None),
    ("POST_PREPARE_EMBARK_CONFIRMATION", "0.40.09", None),
    ("GRAZE_COEFFICIENT", "0.40.13", None),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_order_lexicographically() {
        assert!(GameVersion::from("0.31.13") > GameVersion::from("0.31.04"));
        assert!(GameVersion::from("0.28.181.40b") < GameVersion::from("0.31.01"));
        assert!(GameVersion::from("0.40.13") > GameVersion::from("0.34.08"));
    }

    #[test]
    fn open_ended_field_is_supported_from_introduction_onward() {
        let span = field_span("TRUETYPE").unwrap();
        assert!(!span.supports(&GameVersion::from("0.31.12")));
        assert!(span.supports(&GameVersion::from("0.31.13")));
        assert!(span.supports(&GameVersion::from("0.40.24")));
    }

    #[test]
    fn bounded_field_uses_half_open_range() {
        let span = field_span("BLACK_R").unwrap();
        assert!(span.supports(&GameVersion::from("0.21.93.19a")));
        assert!(span.supports(&GameVersion::from("0.31.03")));
        assert!(!span.supports(&GameVersion::from("0.31.04")));
    }

    #[test]
    fn unknown_field_has_no_span() {
        assert!(field_span("NOT_A_REAL_FIELD").is_none());
    }

    #[test]
    fn lowercase_leading_names_are_internal() {
        assert!(is_internal_field("customField"));
        assert!(!is_internal_field("TRUETYPE"));
    }

    #[test]
    fn variations_are_queryable() {
        let info = GameInfo::new("0.40.24").with_variation("twbt");
        assert!(info.has_variation("twbt"));
        assert!(!info.has_variation("legacy"));
    }
}
