//! Batches of produced images, as shown in the tray.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::image_list::{ImageList, Locator};
use crate::settings::{SortOrder, TraySettings};

/// "Images produced" notification from the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducedImages {
    pub images: Vec<Locator>,
    pub source_node_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch {
    pub id: u64,
    pub source_node_id: String,
    pub images: Vec<Locator>,
}

type UpdateCallback = Box<dyn FnMut(&ImageList)>;

/// The tray's image collection.
///
/// Batches are stored oldest first and capped at `max_batches`. The flat
/// [`ImageList`] honors the node filter and the ordering settings; whenever
/// it changes the registered update callback runs with the new list.
pub struct Tray {
    batches: VecDeque<Batch>,
    next_batch_id: u64,
    settings: TraySettings,
    published: ImageList,
    on_update: Option<UpdateCallback>,
}

impl Tray {
    pub fn new(settings: TraySettings) -> Self {
        Self {
            batches: VecDeque::new(),
            next_batch_id: 0,
            settings,
            published: ImageList::default(),
            on_update: None,
        }
    }

    pub fn settings(&self) -> &TraySettings {
        &self.settings
    }

    /// Runs every time the visible image list changes.
    pub fn set_update_callback(&mut self, callback: impl FnMut(&ImageList) + 'static) {
        self.on_update = Some(Box::new(callback));
    }

    /// Add a batch. Empty notifications are ignored.
    pub fn push(&mut self, event: ProducedImages) -> bool {
        if event.images.is_empty() {
            return false;
        }
        self.next_batch_id += 1;
        tracing::debug!(
            "batch {} from node '{}': {} images",
            self.next_batch_id,
            event.source_node_id,
            event.images.len()
        );
        self.batches.push_back(Batch {
            id: self.next_batch_id,
            source_node_id: event.source_node_id,
            images: event.images,
        });
        self.enforce_cap();
        self.publish();
        true
    }

    /// Replace settings. Visibility alone never republishes the list.
    pub fn set_settings(&mut self, settings: TraySettings) {
        self.settings = settings;
        self.enforce_cap();
        self.publish();
    }

    pub fn set_node_hidden(&mut self, node_id: &str, hidden: bool) {
        self.settings.set_node_hidden(node_id, hidden);
        self.publish();
    }

    pub fn clear(&mut self) {
        self.batches.clear();
        self.publish();
    }

    /// Every node id seen in the current batches, filtered or not.
    pub fn node_ids(&self) -> BTreeSet<&str> {
        self.batches
            .iter()
            .map(|b| b.source_node_id.as_str())
            .collect()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Visible batches in display order, images sorted per settings.
    pub fn visible_batches(&self) -> Vec<Batch> {
        let mut out: Vec<Batch> = self
            .batches
            .iter()
            .filter(|b| !self.settings.is_node_hidden(&b.source_node_id))
            .cloned()
            .collect();
        if self.settings.newest_first {
            out.reverse();
        }
        if self.settings.sort_order == SortOrder::Name {
            for batch in &mut out {
                batch
                    .images
                    .sort_by(|a, b| a.file_name().cmp(b.file_name()));
            }
        }
        out
    }

    /// Flat list in display order.
    pub fn images(&self) -> ImageList {
        self.visible_batches()
            .into_iter()
            .flat_map(|b| b.images)
            .collect()
    }

    /// Position of `locator` in [`Self::images`].
    pub fn position(&self, locator: &Locator) -> Option<usize> {
        self.images().position(locator)
    }

    fn enforce_cap(&mut self) {
        let cap = self.settings.max_batches.max(1);
        while self.batches.len() > cap {
            if let Some(dropped) = self.batches.pop_front() {
                tracing::debug!("dropping batch {} (cap {cap})", dropped.id);
            }
        }
    }

    fn publish(&mut self) {
        let images = self.images();
        if images == self.published {
            return;
        }
        self.published = images;
        if let Some(callback) = self.on_update.as_mut() {
            callback(&self.published);
        }
    }
}
