//! Polling watcher that turns new files in an output directory into
//! [`ProducedImages`] notifications.
//!
//! Files directly inside the root belong to a node named after the root;
//! files one level down belong to a node named after their subdirectory.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::consts::IMAGE_EXTENSIONS;
use crate::error::Result;
use crate::image_list::Locator;
use crate::tray::ProducedImages;

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

#[derive(Debug)]
pub struct DirectoryFeed {
    root: PathBuf,
    seen: HashSet<PathBuf>,
}

impl DirectoryFeed {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            seen: HashSet::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Mark everything currently on disk as already reported.
    pub fn skip_existing(&mut self) -> Result<usize> {
        let found = self.collect()?;
        let count = found.len();
        self.seen.extend(found.into_iter().map(|f| f.path));
        Ok(count)
    }

    /// New files since the previous scan, one event per node.
    pub fn scan(&mut self) -> Result<Vec<ProducedImages>> {
        let mut fresh: Vec<FoundFile> = self
            .collect()?
            .into_iter()
            .filter(|f| !self.seen.contains(&f.path))
            .collect();
        fresh.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.path.cmp(&b.path)));

        let mut by_node: BTreeMap<String, Vec<Locator>> = BTreeMap::new();
        let mut node_order: Vec<String> = Vec::new();
        for file in fresh {
            self.seen.insert(file.path.clone());
            if !by_node.contains_key(&file.node) {
                node_order.push(file.node.clone());
            }
            by_node
                .entry(file.node)
                .or_default()
                .push(Locator::from(file.path));
        }

        let events: Vec<ProducedImages> = node_order
            .into_iter()
            .filter_map(|node| {
                by_node.remove(&node).map(|images| ProducedImages {
                    images,
                    source_node_id: node,
                })
            })
            .collect();
        if !events.is_empty() {
            tracing::debug!("feed scan of {}: {} new batches", self.root.display(), events.len());
        }
        Ok(events)
    }

    fn collect(&self) -> Result<Vec<FoundFile>> {
        let root_node = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());

        let mut found = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                let node = entry.file_name().to_string_lossy().into_owned();
                collect_images(&path, &node, &mut found)?;
            } else if file_type.is_file() && is_image_path(&path) {
                found.push(FoundFile::new(path, root_node.clone()));
            }
        }
        Ok(found)
    }
}

fn collect_images(dir: &Path, node: &str, out: &mut Vec<FoundFile>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && is_image_path(&path) {
            out.push(FoundFile::new(path, node.to_string()));
        }
    }
    Ok(())
}

struct FoundFile {
    path: PathBuf,
    node: String,
    modified: SystemTime,
}

impl FoundFile {
    fn new(path: PathBuf, node: String) -> Self {
        let modified = std::fs::metadata(&path)
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        Self {
            path,
            node,
            modified,
        }
    }
}
