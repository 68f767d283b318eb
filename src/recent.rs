use std::collections::HashSet;

use log::{debug, info, warn};

use crate::VideoRecord;
use crate::storage::Storage;

/// Storage key for the recent videos list
pub const RECENT_KEY: &str = "waffle.recent";

/// Maximum number of recent videos kept
pub const CAPACITY: usize = 4;

/// Bounded, insertion-ordered list of previously resolved videos.
///
/// Identifiers are unique. When full, the oldest entry is evicted first.
/// Re-resolving a video that is already present does not move it.
#[derive(Debug)]
pub struct RecentItems<S: Storage> {
    storage: S,
    items: Vec<VideoRecord>,
}

impl<S: Storage> RecentItems<S> {
    /// Read the persisted list. Missing or unreadable data gives an empty list.
    pub fn load(storage: S) -> Self {
        let items = match storage.get(RECENT_KEY) {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<VideoRecord>>(&bytes) {
                Ok(items) => normalize(items),
                Err(e) => {
                    warn!("Ignoring unreadable recent videos: {e}");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No recent videos stored");
                Vec::new()
            }
            Err(e) => {
                warn!("Could not read recent videos: {e}");
                Vec::new()
            }
        };
        debug!("Loaded {} recent videos", items.len());
        Self { storage, items }
    }

    /// Append `record` unless its identifier is already present.
    ///
    /// Trims from the front to [`CAPACITY`] and persists on change. A
    /// duplicate leaves the list untouched and writes nothing.
    pub fn record_if_absent(&mut self, record: VideoRecord) -> &[VideoRecord] {
        if self.contains(&record) {
            debug!("{} already in recent videos", record.identifier);
            return &self.items;
        }

        info!("Adding {} to recent videos", record.identifier);
        self.items.push(record);
        if self.items.len() > CAPACITY {
            let excess = self.items.len() - CAPACITY;
            self.items.drain(..excess);
        }
        self.persist();
        &self.items
    }

    /// Oldest first
    pub fn all(&self) -> &[VideoRecord] {
        &self.items
    }

    /// 1-based lookup, matching the numbering shown to the user
    pub fn pick(&self, number: usize) -> Option<&VideoRecord> {
        number.checked_sub(1).and_then(|i| self.items.get(i))
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn contains(&self, record: &VideoRecord) -> bool {
        self.items.iter().any(|r| r.identifier == record.identifier)
    }

    fn persist(&mut self) {
        let data = match serde_json::to_vec(&self.items) {
            Ok(data) => data,
            Err(e) => {
                warn!("Could not serialize recent videos: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.set(RECENT_KEY, &data) {
            warn!("Could not persist recent videos: {e}");
        }
    }
}

/// Drop duplicate identifiers (first wins) and keep the newest CAPACITY
fn normalize(items: Vec<VideoRecord>) -> Vec<VideoRecord> {
    let mut seen = HashSet::new();
    let mut items: Vec<VideoRecord> = items
        .into_iter()
        .filter(|r| seen.insert(r.identifier.clone()))
        .collect();
    if items.len() > CAPACITY {
        let excess = items.len() - CAPACITY;
        items.drain(..excess);
    }
    items
}
