//! Tray settings and the namespaced key/value store they persist to.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_BATCHES, DEFAULT_TRAY_HEIGHT, SETTINGS_NAMESPACE};
use crate::error::{LightboxError, Result};

/// Edge of the window the tray is docked to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrayLocation {
    #[default]
    Bottom,
    Top,
    Left,
    Right,
}

impl TrayLocation {
    pub const ALL: &[Self] = &[Self::Bottom, Self::Top, Self::Left, Self::Right];

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Bottom | Self::Top)
    }

    fn key(&self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Top => "top",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for TrayLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bottom => write!(f, "Bottom"),
            Self::Top => write!(f, "Top"),
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
        }
    }
}

impl FromStr for TrayLocation {
    type Err = LightboxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.key() == s)
            .ok_or_else(|| LightboxError::Settings(format!("unknown tray location '{s}'")))
    }
}

/// Order of images inside a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// As the producer emitted them.
    #[default]
    Produced,
    /// By file name.
    Name,
}

impl SortOrder {
    pub const ALL: &[Self] = &[Self::Produced, Self::Name];

    fn key(&self) -> &'static str {
        match self {
            Self::Produced => "produced",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Produced => write!(f, "Produced"),
            Self::Name => write!(f, "Name"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = LightboxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|o| o.key() == s)
            .ok_or_else(|| LightboxError::Settings(format!("unknown sort order '{s}'")))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraySettings {
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_tray_height")]
    pub tray_height: f32,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_true")]
    pub newest_first: bool,
    #[serde(default = "default_max_batches")]
    pub max_batches: usize,
    #[serde(default)]
    pub location: TrayLocation,
    /// Source node ids whose batches are hidden.
    #[serde(default)]
    pub node_filter: Vec<String>,
}

fn default_true() -> bool {
    true
}
fn default_tray_height() -> f32 {
    DEFAULT_TRAY_HEIGHT
}
fn default_max_batches() -> usize {
    DEFAULT_MAX_BATCHES
}

impl Default for TraySettings {
    fn default() -> Self {
        Self {
            visible: true,
            tray_height: DEFAULT_TRAY_HEIGHT,
            sort_order: SortOrder::default(),
            newest_first: true,
            max_batches: DEFAULT_MAX_BATCHES,
            location: TrayLocation::default(),
            node_filter: Vec::new(),
        }
    }
}

const KEY_VISIBLE: &str = "visible";
const KEY_TRAY_HEIGHT: &str = "tray_height";
const KEY_SORT_ORDER: &str = "sort_order";
const KEY_NEWEST_FIRST: &str = "newest_first";
const KEY_MAX_BATCHES: &str = "max_batches";
const KEY_LOCATION: &str = "location";
const KEY_NODE_FILTER: &str = "node_filter";

fn namespaced(key: &str) -> String {
    format!("{SETTINGS_NAMESPACE}.{key}")
}

impl TraySettings {
    /// Read from a store. Missing or malformed entries fall back to defaults.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        let get = |key: &str| store.get(&namespaced(key));

        Self {
            visible: parse_or(get(KEY_VISIBLE), defaults.visible),
            tray_height: parse_or(get(KEY_TRAY_HEIGHT), defaults.tray_height).max(0.0),
            sort_order: parse_or(get(KEY_SORT_ORDER), defaults.sort_order),
            newest_first: parse_or(get(KEY_NEWEST_FIRST), defaults.newest_first),
            max_batches: parse_or(get(KEY_MAX_BATCHES), defaults.max_batches).max(1),
            location: parse_or(get(KEY_LOCATION), defaults.location),
            node_filter: get(KEY_NODE_FILTER)
                .map(|v| parse_node_filter(&v))
                .unwrap_or(defaults.node_filter),
        }
    }

    pub fn store(&self, store: &mut dyn KeyValueStore) {
        store.set(&namespaced(KEY_VISIBLE), self.visible.to_string());
        store.set(&namespaced(KEY_TRAY_HEIGHT), self.tray_height.to_string());
        store.set(&namespaced(KEY_SORT_ORDER), self.sort_order.key().to_string());
        store.set(&namespaced(KEY_NEWEST_FIRST), self.newest_first.to_string());
        store.set(&namespaced(KEY_MAX_BATCHES), self.max_batches.to_string());
        store.set(&namespaced(KEY_LOCATION), self.location.key().to_string());
        match serde_json::to_string(&self.node_filter) {
            Ok(v) => store.set(&namespaced(KEY_NODE_FILTER), v),
            Err(e) => tracing::warn!("cannot encode node filter: {e}"),
        }
    }

    pub fn is_node_hidden(&self, node_id: &str) -> bool {
        self.node_filter.iter().any(|n| n == node_id)
    }

    /// Show or hide batches from `node_id`.
    pub fn set_node_hidden(&mut self, node_id: &str, hidden: bool) {
        let present = self.is_node_hidden(node_id);
        if hidden && !present {
            self.node_filter.push(node_id.to_string());
        } else if !hidden && present {
            self.node_filter.retain(|n| n != node_id);
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    match value {
        Some(v) => v.parse().unwrap_or_else(|_| {
            tracing::warn!("ignoring malformed setting value '{v}'");
            default
        }),
        None => default,
    }
}

/// Node ids are directory names and may contain any separator, so the
/// list is kept as a JSON array.
fn parse_node_filter(value: &str) -> Vec<String> {
    serde_json::from_str(value).unwrap_or_else(|e| {
        tracing::warn!("ignoring malformed node filter '{value}': {e}");
        Vec::new()
    })
}

/// String-keyed persistent storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory store, for tests and hosts without persistence.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Flat TOML table of strings on disk. Writes happen on [`FileStore::flush`].
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl FileStore {
    /// Open `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    /// `settings.toml` under the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| Self::path_in(&dir))
    }

    /// Settings file location inside `config_dir`.
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(SETTINGS_NAMESPACE).join("settings.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string(&self.entries)?)?;
        self.dirty = false;
        tracing::debug!("settings written to {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        if self.entries.get(key) != Some(&value) {
            self.entries.insert(key.to_string(), value);
            self.dirty = true;
        }
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.dirty = true;
        }
    }
}
