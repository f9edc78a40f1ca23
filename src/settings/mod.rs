use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use encoding_rs::WINDOWS_1252;
use log::{debug, warn};
use regex::Regex;
use thiserror::Error;

use crate::paths::GamePaths;
use crate::versions::{self, GameInfo, GameVersion};

/// Errors raised by settings file I/O.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Wrapper for standard IO errors.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// How an option's value is encoded on disk and which values it may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValuePolicy {
    /// Free-form value; cycling leaves it untouched.
    Unconstrained,
    /// Value drawn from a fixed, ordered list of choices.
    Enumerated(Vec<String>),
    /// Anything on disk other than the literal `NO` reads as `YES`.
    ForceBool,
    /// `YES` and `NO` mean the opposite on disk; swapped in both directions.
    NegatedBool,
    /// No value on disk: the option is on when `[FIELD]` appears and turned
    /// off by rewriting the brackets as `!FIELD!`.
    BracketToggle,
}

impl ValuePolicy {
    fn enumerated(values: &[&str]) -> ValuePolicy {
        ValuePolicy::Enumerated(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Parameter-count constraints for [`GameSettings::has_field`]. `None`
/// leaves the corresponding bound unchecked.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParamFilter {
    pub exact: Option<usize>,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

// Any `[TOKEN:VALUE]` pair; both captures are non-greedy so the value stops
// at the first closing bracket.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.+?):(.+?)\]").expect("token pattern"));

fn field_value_re(field: &str) -> Regex {
    Regex::new(&format!(r"\[{}:(.+?)\]", regex::escape(field))).expect("field pattern")
}

fn swap_yes_no(value: &str) -> String {
    match value {
        "YES" => "NO".to_string(),
        "NO" => "YES".to_string(),
        other => other.to_string(),
    }
}

// The game's text files use a legacy single-byte code page; decode and
// encode through it so every byte round-trips unchanged.
fn read_text(path: &Path) -> Result<String, SettingsError> {
    let bytes = fs::read(path)?;
    let (text, _, _) = WINDOWS_1252.decode(&bytes);
    Ok(text.into_owned())
}

fn write_text(path: &Path, text: &str) -> Result<(), SettingsError> {
    let (bytes, _, _) = WINDOWS_1252.encode(text);
    fs::write(path, &bytes)?;
    Ok(())
}

/// The settings registry: a catalog of known options bound to the game's
/// plain-text configuration files, with typed read/modify/write-back.
///
/// Constructed once per installation from a fixed catalog filtered by the
/// game version; options whose on-disk field does not exist in that version
/// are recorded by name only and excluded from every read, write, and cycle
/// operation. Option values are read with [`read_settings`], changed with
/// [`set_value`] / [`cycle_item`], and persisted with [`write_settings`],
/// which rewrites only the bracketed tokens it owns and preserves all other
/// file content byte for byte.
///
/// [`read_settings`]: GameSettings::read_settings
/// [`set_value`]: GameSettings::set_value
/// [`cycle_item`]: GameSettings::cycle_item
/// [`write_settings`]: GameSettings::write_settings
#[derive(Debug)]
pub struct GameSettings {
    info: GameInfo,
    settings: HashMap<String, String>,
    policies: HashMap<String, ValuePolicy>,
    field_names: HashMap<String, String>,
    inverse_field_names: HashMap<String, String>,
    files: HashMap<String, Vec<PathBuf>>,
    // Fileset -> option names, in registration order. Kept as a Vec so bulk
    // reads and writes visit filesets deterministically.
    in_files: Vec<(Vec<PathBuf>, Vec<String>)>,
}

impl GameSettings {
    /// Builds the registry for the installation described by `paths` and
    /// `info`, seeding it with the built-in option catalog. Options invalid
    /// for the given version are skipped; the `legacy` variation drops the
    /// graphics printing options and `twbt` extends the print mode choices.
    pub fn new(paths: &GamePaths, info: &GameInfo) -> GameSettings {
        let mut reg = GameSettings {
            info: info.clone(),
            settings: HashMap::new(),
            policies: HashMap::new(),
            field_names: HashMap::new(),
            inverse_field_names: HashMap::new(),
            files: HashMap::new(),
            in_files: Vec::new(),
        };

        let boolvals = ValuePolicy::enumerated(&["YES", "NO"]);
        let init = vec![paths.init_txt()];
        if !info.has_variation("legacy") {
            reg.register("truetype", "TRUETYPE", "YES", ValuePolicy::ForceBool, init.clone());
        }
        reg.register("sound", "SOUND", "YES", boolvals.clone(), init.clone());
        reg.register("volume", "VOLUME", "255", ValuePolicy::Unconstrained, init.clone());
        reg.register("introMovie", "INTRO", "YES", boolvals.clone(), init.clone());
        reg.register(
            "startWindowed",
            "WINDOWED",
            "YES",
            ValuePolicy::enumerated(&["YES", "NO", "PROMPT"]),
            init.clone(),
        );
        reg.register("fpsCounter", "FPS", "NO", boolvals.clone(), init.clone());
        reg.register("fpsCap", "FPS_CAP", "100", ValuePolicy::Unconstrained, init.clone());
        reg.register("gpsCap", "G_FPS_CAP", "50", ValuePolicy::Unconstrained, init.clone());
        reg.register(
            "procPriority",
            "PRIORITY",
            "NORMAL",
            ValuePolicy::enumerated(&[
                "REALTIME",
                "HIGH",
                "ABOVE_NORMAL",
                "NORMAL",
                "BELOW_NORMAL",
                "IDLE",
            ]),
            init.clone(),
        );
        reg.register("compressSaves", "COMPRESSED_SAVES", "YES", boolvals.clone(), init.clone());
        if !info.has_variation("legacy") {
            let mut printmodes = vec!["2D", "STANDARD"];
            if info.has_variation("twbt") {
                printmodes.extend(["TWBT", "TWBT_LEGACY"]);
            }
            reg.register(
                "printmode",
                "PRINT_MODE",
                "2D",
                ValuePolicy::enumerated(&printmodes),
                init.clone(),
            );
        }

        // Before 0.31.04 the d_init settings lived in init.txt itself.
        let dinit = if info.version <= GameVersion::from("0.31.03") {
            init.clone()
        } else {
            vec![paths.d_init_txt()]
        };
        reg.register("popcap", "POPULATION_CAP", "200", ValuePolicy::Unconstrained, dinit.clone());
        reg.register(
            "strictPopcap",
            "STRICT_POPULATION_CAP",
            "220",
            ValuePolicy::Unconstrained,
            dinit.clone(),
        );
        reg.register("childcap", "BABY_CHILD_CAP", "100:1000", ValuePolicy::Unconstrained, dinit.clone());
        reg.register("invaders", "INVADERS", "YES", boolvals.clone(), dinit.clone());
        reg.register("temperature", "TEMPERATURE", "YES", boolvals.clone(), dinit.clone());
        reg.register("weather", "WEATHER", "YES", boolvals.clone(), dinit.clone());
        reg.register("caveins", "CAVEINS", "YES", boolvals.clone(), dinit.clone());
        reg.register("liquidDepth", "SHOW_FLOW_AMOUNTS", "YES", boolvals.clone(), dinit.clone());
        reg.register("variedGround", "VARIED_GROUND_TILES", "YES", boolvals.clone(), dinit.clone());
        if info.version <= GameVersion::from("0.34.06") {
            reg.register("laborLists", "SET_LABOR_LISTS", "YES", boolvals.clone(), dinit.clone());
        } else {
            reg.register(
                "laborLists",
                "SET_LABOR_LISTS",
                "SKILLS",
                ValuePolicy::enumerated(&["NO", "SKILLS", "BY_UNIT_TYPE"]),
                dinit.clone(),
            );
        }
        reg.register(
            "autoSave",
            "AUTOSAVE",
            "SEASONAL",
            ValuePolicy::enumerated(&["NONE", "SEASONAL", "YEARLY"]),
            dinit.clone(),
        );
        reg.register("autoBackup", "AUTOBACKUP", "YES", boolvals.clone(), dinit.clone());
        reg.register("autoSavePause", "AUTOSAVE_PAUSE", "YES", boolvals.clone(), dinit.clone());
        reg.register("initialSave", "INITIAL_SAVE", "YES", boolvals.clone(), dinit.clone());
        reg.register("pauseOnLoad", "PAUSE_ON_LOAD", "YES", boolvals.clone(), dinit.clone());
        reg.register(
            "entombPets",
            "COFFIN_NO_PETS_DEFAULT",
            "NO",
            ValuePolicy::NegatedBool,
            dinit.clone(),
        );
        reg.register("artifacts", "ARTIFACTS", "YES", boolvals, dinit);

        // The aquifer toggle is replicated across the stone raws.
        reg.register(
            "aquifers",
            "AQUIFER",
            "NO",
            ValuePolicy::BracketToggle,
            paths.aquifer_raw_files(&info.version),
        );

        reg
    }

    /// Registers a catalog option. Does nothing when `name` is already
    /// registered or already in use as the on-disk name of another option;
    /// the first registration wins.
    ///
    /// The name mapping is always recorded, but when the version table says
    /// the field does not exist in this installation's version, no value,
    /// policy, or file binding is stored and the option stays invisible to
    /// every bulk operation.
    ///
    /// # Panics
    ///
    /// Panics if `field_name` is neither internal (lowercase-leading) nor
    /// present in the version compatibility table.
    fn register(
        &mut self,
        name: &str,
        field_name: &str,
        default: &str,
        policy: ValuePolicy,
        files: Vec<PathBuf>,
    ) {
        if self.settings.contains_key(name) || self.inverse_field_names.contains_key(name) {
            return;
        }
        self.field_names.insert(name.to_string(), field_name.to_string());
        if !self.catalog_field_supported(field_name) {
            return;
        }
        self.bind(name, field_name, default, policy, files);
    }

    /// Registers a field discovered inside a file during a read. Fields the
    /// version table does not know are accepted as-is (they are demonstrably
    /// present in this installation), but a field the table marks as
    /// unsupported in this version is ignored even when found on disk. First
    /// registration wins, so catalog entries and earlier discoveries are
    /// never overwritten.
    fn register_discovered(&mut self, field: &str, value: &str, file: &Path) {
        if self.settings.contains_key(field) || self.inverse_field_names.contains_key(field) {
            return;
        }
        if let Some(span) = versions::field_span(field) {
            if !span.supports(&self.info.version) {
                debug!("ignoring discovered field {field}: not valid in this game version");
                return;
            }
        }
        self.field_names.insert(field.to_string(), field.to_string());
        self.bind(field, field, value, ValuePolicy::Unconstrained, vec![file.to_path_buf()]);
    }

    fn bind(
        &mut self,
        name: &str,
        field_name: &str,
        default: &str,
        policy: ValuePolicy,
        files: Vec<PathBuf>,
    ) {
        self.settings.insert(name.to_string(), default.to_string());
        self.policies.insert(name.to_string(), policy);
        if field_name != name {
            self.inverse_field_names.insert(field_name.to_string(), name.to_string());
        }
        self.files.insert(name.to_string(), files.clone());
        match self.in_files.iter_mut().find(|(set, _)| *set == files) {
            Some((_, names)) => names.push(name.to_string()),
            None => self.in_files.push((files, vec![name.to_string()])),
        }
    }

    fn catalog_field_supported(&self, field_name: &str) -> bool {
        if versions::is_internal_field(field_name) {
            return true;
        }
        match versions::field_span(field_name) {
            Some(span) => span.supports(&self.info.version),
            None => panic!("field {field_name} is missing from the version compatibility table"),
        }
    }

    /// Resolves an on-disk field name to its internal name; names with no
    /// inverse mapping pass through unchanged.
    fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.inverse_field_names.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Current value of an option, addressed by either its internal or its
    /// on-disk name.
    ///
    /// # Panics
    ///
    /// Panics on a name unknown to the registry; that is a caller bug, not
    /// a recoverable condition.
    pub fn value(&self, name: &str) -> &str {
        self.get(name)
            .unwrap_or_else(|| panic!("unknown option: {name}"))
    }

    /// Current value of an option, or `None` when the name is unknown (or
    /// skipped as unsupported in this game version).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.settings.get(self.resolve(name)).map(String::as_str)
    }

    /// Whether an option (by internal or on-disk name) holds a value in this
    /// registry. Version-gated options report false.
    pub fn is_registered(&self, name: &str) -> bool {
        self.settings.contains_key(self.resolve(name))
    }

    /// The on-disk field name recorded for an internal name, including for
    /// options that were version-gated out of the registry.
    pub fn field_name(&self, name: &str) -> Option<&str> {
        self.field_names.get(name).map(String::as_str)
    }

    /// The files an option is bound to.
    pub fn files_for(&self, name: &str) -> Option<&[PathBuf]> {
        self.files.get(self.resolve(name)).map(Vec::as_slice)
    }

    /// Iterates over `(name, current value)` for every registered option.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.settings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overwrites the in-memory value of `name`. No validation is applied;
    /// the value is taken as-is and only hits disk on the next write.
    pub fn set_value(&mut self, name: &str, value: &str) {
        self.settings.insert(name.to_string(), value.to_string());
    }

    /// Advances `name` to the next value allowed by its policy.
    ///
    /// # Panics
    ///
    /// Panics on a name unknown to the registry.
    pub fn cycle_item(&mut self, name: &str) {
        let current = self
            .settings
            .get(name)
            .unwrap_or_else(|| panic!("unknown option: {name}"));
        let policy = self
            .policies
            .get(name)
            .unwrap_or_else(|| panic!("unknown option: {name}"));
        let next = cycle_list(current, policy);
        self.settings.insert(name.to_string(), next);
    }

    /// Reads every registered option from its files. Filesets containing a
    /// single file also register every `[FIELD:VALUE]` token found in that
    /// file, making fields the catalog never anticipated editable; fields
    /// found in multi-file filesets cannot be attributed to one file for
    /// write-back, so those are never auto-registered.
    pub fn read_settings(&mut self) -> Result<(), SettingsError> {
        let filesets = self.in_files.clone();
        for (files, names) in &filesets {
            let fields: Vec<&str> = names.iter().map(String::as_str).collect();
            for filename in files {
                self.read_file(filename, &fields, files.len() == 1)?;
            }
        }
        Ok(())
    }

    /// Reads the requested fields from one file.
    ///
    /// Fields may be given by internal or on-disk name. A field that cannot
    /// be found in the file keeps its in-memory value and logs a warning (it
    /// usually means the file belongs to a different game version). With
    /// `auto_add`, every `[FIELD:VALUE]` token in the file is registered
    /// first, bound to this file alone.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the file cannot be read.
    pub fn read_file(
        &mut self,
        filename: &Path,
        fields: &[&str],
        auto_add: bool,
    ) -> Result<(), SettingsError> {
        let text = read_text(filename)?;
        if auto_add {
            for caps in TOKEN_RE.captures_iter(&text) {
                let (field, value) = (&caps[1], &caps[2]);
                self.register_discovered(field, value, filename);
            }
        }
        for &field in fields {
            let name = self.resolve(field).to_string();
            let Some(policy) = self.policies.get(&name) else {
                debug!("skipping field {name}: not registered for this version");
                continue;
            };
            let field_name = &self.field_names[&name];
            if *policy == ValuePolicy::BracketToggle {
                // Presence-only: absence never writes an explicit NO back.
                if text.contains(&format!("[{field_name}]")) {
                    self.settings.insert(name, "YES".to_string());
                }
                continue;
            }
            match field_value_re(field_name).captures(&text) {
                Some(caps) => {
                    let captured = &caps[1];
                    let value = match policy {
                        ValuePolicy::ForceBool if captured != "NO" => "YES".to_string(),
                        ValuePolicy::NegatedBool => swap_yes_no(captured),
                        _ => captured.to_string(),
                    };
                    self.settings.insert(name, value);
                }
                None => warn!(
                    "expected a match for field {name} in {}; game version mismatch?",
                    filename.display()
                ),
            }
        }
        Ok(())
    }

    /// Writes every registered option back to its files.
    pub fn write_settings(&self) -> Result<(), SettingsError> {
        for (files, names) in &self.in_files {
            let fields: Vec<&str> = names.iter().map(String::as_str).collect();
            for filename in files {
                self.write_file(filename, &fields)?;
            }
        }
        Ok(())
    }

    /// Patches the given fields into one file, rewriting it whole. Only the
    /// first occurrence of each field's token is substituted; every other
    /// byte of the file is preserved exactly. A toggle field whose brackets
    /// appear in neither form leaves the file untouched for that field.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the file cannot be read or rewritten.
    pub fn write_file(&self, filename: &Path, fields: &[&str]) -> Result<(), SettingsError> {
        let mut text = read_text(filename)?;
        for &field in fields {
            let name = self.resolve(field);
            let Some(policy) = self.policies.get(name) else {
                debug!("skipping field {name}: not registered for this version");
                continue;
            };
            let field_name = &self.field_names[name];
            if *policy == ValuePolicy::BracketToggle {
                let (from, to) = if self.settings[name] == "NO" {
                    (format!("[{field_name}]"), format!("!{field_name}!"))
                } else {
                    (format!("!{field_name}!"), format!("[{field_name}]"))
                };
                text = text.replacen(&from, &to, 1);
            } else {
                let mut value = self.settings[name].clone();
                if *policy == ValuePolicy::NegatedBool {
                    value = swap_yes_no(&value);
                }
                let replacement = format!("[{field_name}:{value}]");
                text = field_value_re(field_name)
                    .replacen(&text, 1, regex::NoExpand(&replacement))
                    .into_owned();
            }
        }
        write_text(filename, &text)
    }

    /// Creates a new file containing exactly one bracketed line per field,
    /// in the given order, rendered with the same per-policy rules as
    /// [`write_file`](GameSettings::write_file).
    pub fn create_file(&self, filename: &Path, fields: &[&str]) -> Result<(), SettingsError> {
        let mut text = String::new();
        for &field in fields {
            let name = self.resolve(field);
            let Some(policy) = self.policies.get(name) else {
                debug!("skipping field {name}: not registered for this version");
                continue;
            };
            let field_name = &self.field_names[name];
            if *policy == ValuePolicy::BracketToggle {
                if self.settings[name] == "NO" {
                    text.push_str(&format!("!{field_name}!\n"));
                } else {
                    text.push_str(&format!("[{field_name}]\n"));
                }
            } else {
                let mut value = self.settings[name].clone();
                if *policy == ValuePolicy::NegatedBool {
                    value = swap_yes_no(&value);
                }
                text.push_str(&format!("[{field_name}:{value}]\n"));
            }
        }
        write_text(filename, &text)
    }

    /// Reads a single field's value from a file without a registry. Returns
    /// the first occurrence, or `None` when the field is absent or the file
    /// cannot be read.
    pub fn read_value(filename: &Path, field: &str) -> Option<String> {
        let bytes = fs::read(filename).ok()?;
        let (text, _, _) = WINDOWS_1252.decode(&bytes);
        field_value_re(field)
            .captures(&text)
            .map(|caps| caps[1].to_string())
    }

    /// Tests whether a field occurs in a file with an acceptable number of
    /// parameters (the count of `:` separators after the field name).
    /// Returns false when the field is absent, a constraint fails, or the
    /// file cannot be read.
    pub fn has_field(filename: &Path, field: &str, params: ParamFilter) -> bool {
        let Ok(bytes) = fs::read(filename) else {
            return false;
        };
        let (text, _, _) = WINDOWS_1252.decode(&bytes);
        let re = Regex::new(&format!(r"\[{}(:.+?)\]", regex::escape(field)))
            .expect("field pattern");
        let Some(caps) = re.captures(&text) else {
            return false;
        };
        let count = caps[1].matches(':').count();
        if params.exact.is_some_and(|exact| count != exact) {
            return false;
        }
        if params.min.is_some_and(|min| count < min) {
            return false;
        }
        if params.max.is_some_and(|max| count > max) {
            return false;
        }
        true
    }
}

/// Returns the value following `current` under the given policy.
///
/// Unconstrained options never change. The three boolean-flavored policies
/// cycle through `YES`/`NO`. Enumerated options advance to the next listed
/// value, wrapping past the end; a current value not in the list lands on
/// the first entry.
pub fn cycle_list(current: &str, policy: &ValuePolicy) -> String {
    let items: Vec<&str> = match policy {
        ValuePolicy::Unconstrained => return current.to_string(),
        ValuePolicy::ForceBool | ValuePolicy::NegatedBool | ValuePolicy::BracketToggle => {
            vec!["YES", "NO"]
        }
        ValuePolicy::Enumerated(values) => values.iter().map(String::as_str).collect(),
    };
    match items.iter().position(|&item| item == current) {
        Some(index) => items[(index + 1) % items.len()].to_string(),
        None => items[0].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture(version: &str) -> (TempDir, GamePaths, GameSettings) {
        let dir = tempfile::tempdir().unwrap();
        let game = dir.path().join("df");
        fs::create_dir_all(game.join("data").join("init")).unwrap();
        fs::create_dir_all(game.join("raw").join("objects")).unwrap();
        let paths = GamePaths::new(&game, dir.path().join("lnp"));
        let settings = GameSettings::new(&paths, &GameInfo::new(version));
        (dir, paths, settings)
    }

    #[test]
    fn plain_field_round_trips() {
        let (_dir, paths, mut settings) = fixture("0.40.24");
        fs::write(paths.init_txt(), "[SOUND:YES]\n[VOLUME:255]\n").unwrap();
        settings.set_value("volume", "100");
        settings.write_file(&paths.init_txt(), &["volume"]).unwrap();
        let text = fs::read_to_string(paths.init_txt()).unwrap();
        assert_eq!(text, "[SOUND:YES]\n[VOLUME:100]\n");
        settings.set_value("volume", "0");
        settings.read_file(&paths.init_txt(), &["volume"], false).unwrap();
        assert_eq!(settings.value("volume"), "100");
    }

    #[test]
    fn negated_bool_round_trips_through_two_swaps() {
        let (_dir, paths, mut settings) = fixture("0.40.24");
        fs::write(paths.d_init_txt(), "[COFFIN_NO_PETS_DEFAULT:YES]\n").unwrap();
        settings.set_value("entombPets", "YES");
        settings.write_file(&paths.d_init_txt(), &["entombPets"]).unwrap();
        let text = fs::read_to_string(paths.d_init_txt()).unwrap();
        assert_eq!(text, "[COFFIN_NO_PETS_DEFAULT:NO]\n");
        settings.set_value("entombPets", "NO");
        settings
            .read_file(&paths.d_init_txt(), &["entombPets"], false)
            .unwrap();
        assert_eq!(settings.value("entombPets"), "YES");
    }

    #[test]
    fn force_bool_normalizes_on_read() {
        let (_dir, paths, mut settings) = fixture("0.40.24");
        fs::write(paths.init_txt(), "[TRUETYPE:MAYBE]\n").unwrap();
        settings.read_file(&paths.init_txt(), &["truetype"], false).unwrap();
        assert_eq!(settings.value("truetype"), "YES");

        fs::write(paths.init_txt(), "[TRUETYPE:NO]\n").unwrap();
        settings.read_file(&paths.init_txt(), &["truetype"], false).unwrap();
        assert_eq!(settings.value("truetype"), "NO");
    }

    #[test]
    fn toggle_read_is_presence_only() {
        let (_dir, paths, mut settings) = fixture("0.40.24");
        let raw = paths.raw_objects_dir().join("inorganic_stone_layer.txt");
        fs::write(&raw, "layer stone\n[AQUIFER]\n").unwrap();
        settings.read_file(&raw, &["aquifers"], false).unwrap();
        assert_eq!(settings.value("aquifers"), "YES");

        let (_dir, paths, mut settings) = fixture("0.40.24");
        let raw = paths.raw_objects_dir().join("inorganic_stone_layer.txt");
        fs::write(&raw, "layer stone\n!AQUIFER!\n").unwrap();
        settings.read_file(&raw, &["aquifers"], false).unwrap();
        assert_eq!(settings.value("aquifers"), "NO");
    }

    #[test]
    fn toggle_write_flips_bracket_forms() {
        let (_dir, paths, mut settings) = fixture("0.40.24");
        let raw = paths.raw_objects_dir().join("inorganic_stone_soil.txt");
        fs::write(&raw, "soil\n[AQUIFER]\ntrailing\n").unwrap();
        settings.set_value("aquifers", "NO");
        settings.write_file(&raw, &["aquifers"]).unwrap();
        assert_eq!(fs::read_to_string(&raw).unwrap(), "soil\n!AQUIFER!\ntrailing\n");
        settings.set_value("aquifers", "YES");
        settings.write_file(&raw, &["aquifers"]).unwrap();
        assert_eq!(fs::read_to_string(&raw).unwrap(), "soil\n[AQUIFER]\ntrailing\n");
    }

    #[test]
    fn toggle_write_without_either_form_changes_nothing() {
        let (_dir, paths, settings) = fixture("0.40.24");
        let raw = paths.raw_objects_dir().join("inorganic_stone_mineral.txt");
        fs::write(&raw, "no toggle here\n").unwrap();
        settings.write_file(&raw, &["aquifers"]).unwrap();
        assert_eq!(fs::read_to_string(&raw).unwrap(), "no toggle here\n");
    }

    #[test]
    fn cycling_wraps_and_recovers_from_unknown_values() {
        let policy = ValuePolicy::enumerated(&["NONE", "SEASONAL", "YEARLY"]);
        assert_eq!(cycle_list("SEASONAL", &policy), "YEARLY");
        assert_eq!(cycle_list("YEARLY", &policy), "NONE");
        assert_eq!(cycle_list("BOGUS", &policy), "NONE");
        assert_eq!(cycle_list("anything", &ValuePolicy::Unconstrained), "anything");
        assert_eq!(cycle_list("YES", &ValuePolicy::ForceBool), "NO");
        assert_eq!(cycle_list("NO", &ValuePolicy::BracketToggle), "YES");
    }

    #[test]
    fn cycle_item_advances_registered_option() {
        let (_dir, _paths, mut settings) = fixture("0.40.24");
        settings.set_value("autoSave", "YEARLY");
        settings.cycle_item("autoSave");
        assert_eq!(settings.value("autoSave"), "NONE");
    }

    #[test]
    fn unsupported_field_is_gated_but_still_resolvable() {
        let (_dir, _paths, settings) = fixture("0.31.12");
        assert!(!settings.is_registered("truetype"));
        assert_eq!(settings.field_name("truetype"), Some("TRUETYPE"));
        assert_eq!(settings.get("truetype"), None);

        let (_dir, _paths, settings) = fixture("0.31.13");
        assert!(settings.is_registered("truetype"));
    }

    #[test]
    #[should_panic(expected = "unknown option")]
    fn value_lookup_on_unknown_name_panics() {
        let (_dir, _paths, settings) = fixture("0.40.24");
        settings.value("noSuchOption");
    }

    #[test]
    fn auto_discovery_registers_unknown_tokens() {
        let (_dir, paths, mut settings) = fixture("0.40.24");
        fs::write(paths.init_txt(), "[CUSTOM_TOKEN:5]\n").unwrap();
        settings.read_file(&paths.init_txt(), &[], true).unwrap();
        assert_eq!(settings.get("CUSTOM_TOKEN"), Some("5"));
        // Discovered fields carry no value list, so cycling is a no-op.
        settings.cycle_item("CUSTOM_TOKEN");
        assert_eq!(settings.value("CUSTOM_TOKEN"), "5");
    }

    #[test]
    fn auto_discovery_gates_fields_known_to_be_unsupported() {
        let (_dir, paths, mut settings) = fixture("0.31.12");
        fs::write(paths.init_txt(), "[TRUETYPE:YES]\n[CUSTOM_TOKEN:5]\n").unwrap();
        settings.read_file(&paths.init_txt(), &[], true).unwrap();
        // TRUETYPE first appears in 0.31.13, so the stray token is ignored;
        // the table-unknown one is still picked up.
        assert!(!settings.is_registered("TRUETYPE"));
        assert_eq!(settings.get("CUSTOM_TOKEN"), Some("5"));
    }

    #[test]
    fn auto_discovery_never_overrides_catalog_entries() {
        let (_dir, paths, mut settings) = fixture("0.40.24");
        fs::write(paths.init_txt(), "[VOLUME:42]\n").unwrap();
        settings.read_file(&paths.init_txt(), &[], true).unwrap();
        // The field maps back to the catalog option, untouched by auto-add.
        assert_eq!(settings.value("volume"), "255");
        assert_eq!(settings.value("VOLUME"), "255");
    }

    #[test]
    fn missing_field_keeps_prior_value() {
        let (_dir, paths, mut settings) = fixture("0.40.24");
        fs::write(paths.init_txt(), "[VOLUME:255]\n").unwrap();
        settings.read_file(&paths.init_txt(), &["sound"], false).unwrap();
        assert_eq!(settings.value("sound"), "YES");
    }

    #[test]
    fn writes_preserve_every_unmatched_byte() {
        let (_dir, paths, mut settings) = fixture("0.40.24");
        let original = "A comment line.\r\n[SOUND:YES]\r\n\r\n  indented text\r\n[VOLUME:255]\r\n[VOLUME:128]\r\ntrailer";
        fs::write(paths.init_txt(), original).unwrap();
        settings.set_value("volume", "33");
        settings.write_file(&paths.init_txt(), &["volume"]).unwrap();
        let text = fs::read_to_string(paths.init_txt()).unwrap();
        // Only the first occurrence changes; CRLFs, spacing and the comment
        // survive untouched.
        assert_eq!(
            text,
            "A comment line.\r\n[SOUND:YES]\r\n\r\n  indented text\r\n[VOLUME:33]\r\n[VOLUME:128]\r\ntrailer"
        );
    }

    #[test]
    fn read_takes_first_occurrence_only() {
        let (_dir, paths, mut settings) = fixture("0.40.24");
        fs::write(paths.init_txt(), "[VOLUME:1]\n[VOLUME:2]\n").unwrap();
        settings.read_file(&paths.init_txt(), &["volume"], false).unwrap();
        assert_eq!(settings.value("volume"), "1");
    }

    #[test]
    fn legacy_variation_drops_graphics_printing_options() {
        let dir = tempfile::tempdir().unwrap();
        let paths = GamePaths::new(dir.path().join("df"), dir.path().join("lnp"));
        let info = GameInfo::new("0.40.24").with_variation("legacy");
        let settings = GameSettings::new(&paths, &info);
        assert!(!settings.is_registered("truetype"));
        assert!(!settings.is_registered("printmode"));
        assert!(settings.is_registered("sound"));
    }

    #[test]
    fn twbt_variation_extends_print_modes() {
        let dir = tempfile::tempdir().unwrap();
        let paths = GamePaths::new(dir.path().join("df"), dir.path().join("lnp"));
        let info = GameInfo::new("0.40.24").with_variation("twbt");
        let mut settings = GameSettings::new(&paths, &info);
        settings.set_value("printmode", "STANDARD");
        settings.cycle_item("printmode");
        assert_eq!(settings.value("printmode"), "TWBT");
    }

    #[test]
    fn old_versions_keep_d_init_options_in_init_txt() {
        let (_dir, paths, settings) = fixture("0.31.03");
        assert_eq!(settings.files_for("popcap"), Some(&[paths.init_txt()][..]));

        let (_dir, paths, settings) = fixture("0.40.24");
        assert_eq!(settings.files_for("popcap"), Some(&[paths.d_init_txt()][..]));
    }

    #[test]
    fn create_file_renders_one_line_per_field() {
        let (_dir, paths, mut settings) = fixture("0.40.24");
        settings.set_value("aquifers", "NO");
        let out = paths.init_dir().join("generated.txt");
        settings.create_file(&out, &["aquifers", "volume", "entombPets"]).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "!AQUIFER!\n[VOLUME:255]\n[COFFIN_NO_PETS_DEFAULT:YES]\n"
        );
    }

    #[test]
    fn bulk_read_auto_adds_only_in_single_file_filesets() {
        let (_dir, paths, mut settings) = fixture("0.40.24");
        fs::write(paths.init_txt(), "[SOUND:NO]\n[FONT:curses.png]\n").unwrap();
        fs::write(paths.d_init_txt(), "[AUTOSAVE:YEARLY]\n").unwrap();
        for raw in paths.aquifer_raw_files(&GameVersion::from("0.40.24")) {
            fs::write(&raw, "[AQUIFER]\n").unwrap();
        }
        settings.read_settings().unwrap();
        assert_eq!(settings.value("sound"), "NO");
        assert_eq!(settings.value("autoSave"), "YEARLY");
        assert_eq!(settings.value("aquifers"), "YES");
        // FONT came from the single-file init fileset.
        assert_eq!(settings.get("FONT"), Some("curses.png"));
        assert!(settings.iter().any(|(name, value)| name == "autoSave" && value == "YEARLY"));
    }

    #[test]
    fn read_value_probe_tolerates_missing_files() {
        let (_dir, paths, _settings) = fixture("0.40.24");
        assert_eq!(GameSettings::read_value(&paths.init_txt(), "FONT"), None);
        fs::write(paths.init_txt(), "[FONT:curses.png]\n[FONT:other.png]\n").unwrap();
        assert_eq!(
            GameSettings::read_value(&paths.init_txt(), "FONT"),
            Some("curses.png".to_string())
        );
    }

    #[test]
    fn has_field_probe_counts_parameters() {
        let (_dir, paths, _settings) = fixture("0.40.24");
        assert!(!GameSettings::has_field(&paths.init_txt(), "EMBARK_RECTANGLE", ParamFilter::default()));
        fs::write(paths.init_txt(), "[EMBARK_RECTANGLE:4:4]\n").unwrap();
        assert!(GameSettings::has_field(&paths.init_txt(), "EMBARK_RECTANGLE", ParamFilter::default()));
        assert!(GameSettings::has_field(
            &paths.init_txt(),
            "EMBARK_RECTANGLE",
            ParamFilter { exact: Some(2), ..Default::default() }
        ));
        assert!(!GameSettings::has_field(
            &paths.init_txt(),
            "EMBARK_RECTANGLE",
            ParamFilter { min: Some(3), ..Default::default() }
        ));
        assert!(!GameSettings::has_field(
            &paths.init_txt(),
            "EMBARK_RECTANGLE",
            ParamFilter { max: Some(1), ..Default::default() }
        ));
    }

    #[test]
    fn reading_a_missing_file_is_an_error() {
        let (_dir, paths, mut settings) = fixture("0.40.24");
        let result = settings.read_file(&paths.init_txt(), &["sound"], false);
        assert!(result.is_err());
    }
}
