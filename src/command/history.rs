use std::collections::VecDeque;

use log::debug;

use crate::scene::Scene;

/// Default number of snapshots kept
pub const DEFAULT_HISTORY_DEPTH: usize = 20;

/// Independent copy of the scene at one point in time.
///
/// Holds cloned element values, never references to live elements, so
/// mutating the scene afterwards cannot reach into history.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    scene: Scene,
}

impl Snapshot {
    /// Copies `scene`, dropping any selection
    pub fn capture(scene: &Scene) -> Self {
        let mut scene = scene.clone();
        scene.clear_selection();
        Self { scene }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn len(&self) -> usize {
        self.scene.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scene.is_empty()
    }

    pub fn into_scene(self) -> Scene {
        self.scene
    }
}

/// Bounded undo stack of scene snapshots. Pushing past capacity evicts the oldest.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    snapshots: VecDeque<Snapshot>,
    capacity: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl SnapshotHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
            debug!("History full, evicted oldest snapshot");
        }
        self.snapshots.push_back(snapshot);
    }

    /// Captures `scene` and pushes it
    pub fn save(&mut self, scene: &Scene) {
        self.push(Snapshot::capture(scene));
    }

    /// Most recent snapshot, if any
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_back()
    }

    pub fn peek(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshots from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }
}
