/// The `versions` module defines the ordered game version identifier, the
/// version descriptor (version plus named variation flags), and the static
/// compatibility table recording in which version range each known on-disk
/// configuration field is valid.
pub mod versions;

/// The `settings` module is the settings registry: a catalog of typed options
/// mapped onto the game's plain-text `[FIELD:VALUE]` configuration files,
/// with read, modify, and write-back support that preserves every byte the
/// registry does not own. This is the core of the crate.
pub mod settings;

/// The `paths` module resolves the files and directories of a game
/// installation and its launcher directory, including filenames that differ
/// between game versions.
pub mod paths;

/// The `filesystem` module provides the directory and file plumbing used by
/// graphics pack management: existence checks, home expansion, recursive
/// tree copies and removals.
pub mod filesystem;

/// The `graphics` module manages graphics packs: listing installed packs,
/// detecting the active one, installing a pack into the game directory,
/// stripping packs down to their essential files, and refreshing save games
/// with the current raws.
pub mod graphics;

/// The `manifest` module parses the optional `manifest.json` metadata file
/// shipped inside a graphics pack and checks it against a game version.
pub mod manifest;
