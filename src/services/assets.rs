use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    foundation::error::PlaylineResult,
    services::generate::{Artifact, ArtifactKind},
};

/// Opaque unique asset-record identifier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct AssetId(uuid::Uuid);

impl AssetId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Provenance attached to an artifact when it is persisted.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AssetMeta {
    /// Id of the tool that produced the artifact.
    pub tool_id: String,
    /// Title of the tool that produced the artifact.
    pub tool_title: String,
}

/// A persisted artifact with provenance.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AssetRecord {
    /// Unique record id.
    pub id: AssetId,
    /// Identity the record belongs to.
    pub identity: String,
    /// Media kind of the stored artifact.
    pub kind: ArtifactKind,
    /// Locator of the stored artifact.
    pub locator: String,
    /// Producing tool id.
    pub tool_id: String,
    /// Producing tool title.
    pub tool_title: String,
    /// Creation time, seconds since the Unix epoch.
    pub created_at: u64,
}

/// Keyed artifact store boundary.
///
/// The timeline never owns artifact bytes; clips reference records (or raw
/// locators) held here, and removing a clip never touches the record.
pub trait AssetCatalog {
    /// Persist an artifact under `identity`, returning the stored record.
    fn persist(
        &mut self,
        identity: &str,
        artifact: &Artifact,
        meta: AssetMeta,
    ) -> PlaylineResult<AssetRecord>;
    /// Records for `identity`, newest first.
    fn list(&self, identity: &str) -> Vec<AssetRecord>;
    /// Delete a record. Benign no-op returning `false` on an unknown id.
    fn delete(&mut self, id: AssetId) -> bool;
}

/// Records dropped in one eviction pass when the store is full.
const EVICT_BATCH: usize = 5;

/// In-memory [`AssetCatalog`] with a bounded capacity.
///
/// When full it evicts the oldest five records (across every identity)
/// before inserting, mirroring quota-recovery behavior in a real backing
/// store.
#[derive(Clone, Debug)]
pub struct MemoryAssets {
    capacity: usize,
    // Insertion order, oldest first.
    records: Vec<AssetRecord>,
}

impl Default for MemoryAssets {
    fn default() -> Self {
        Self::with_capacity(50)
    }
}

impl MemoryAssets {
    /// A store with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            records: Vec::new(),
        }
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records are held.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl AssetCatalog for MemoryAssets {
    fn persist(
        &mut self,
        identity: &str,
        artifact: &Artifact,
        meta: AssetMeta,
    ) -> PlaylineResult<AssetRecord> {
        if self.records.len() >= self.capacity {
            let evicted = EVICT_BATCH.min(self.records.len());
            self.records.drain(..evicted);
            tracing::debug!(evicted, "asset store full, dropped oldest records");
        }

        let record = AssetRecord {
            id: AssetId::generate(),
            identity: identity.to_string(),
            kind: artifact.kind,
            locator: artifact.locator.clone(),
            tool_id: meta.tool_id,
            tool_title: meta.tool_title,
            created_at: unix_now_secs(),
        };
        self.records.push(record.clone());
        Ok(record)
    }

    fn list(&self, identity: &str) -> Vec<AssetRecord> {
        self.records
            .iter()
            .rev()
            .filter(|r| r.identity == identity)
            .cloned()
            .collect()
    }

    fn delete(&mut self, id: AssetId) -> bool {
        match self.records.iter().position(|r| r.id == id) {
            Some(at) => {
                self.records.remove(at);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> AssetMeta {
        AssetMeta {
            tool_id: "image-gen".to_string(),
            tool_title: "Image Generator".to_string(),
        }
    }

    fn image(locator: &str) -> Artifact {
        Artifact::new(ArtifactKind::Image, locator)
    }

    #[test]
    fn list_is_newest_first_and_identity_scoped() {
        let mut store = MemoryAssets::new();
        store.persist("ana", &image("asset/a.png"), meta()).unwrap();
        store.persist("ben", &image("asset/b.png"), meta()).unwrap();
        store.persist("ana", &image("asset/c.png"), meta()).unwrap();

        let listed: Vec<_> = store.list("ana").into_iter().map(|r| r.locator).collect();
        assert_eq!(listed, vec!["asset/c.png", "asset/a.png"]);
    }

    #[test]
    fn delete_is_benign_on_unknown_id() {
        let mut store = MemoryAssets::new();
        let record = store.persist("ana", &image("asset/a.png"), meta()).unwrap();

        assert!(store.delete(record.id));
        assert!(!store.delete(record.id));
        assert!(store.is_empty());
    }

    #[test]
    fn full_store_evicts_the_oldest_batch() {
        let mut store = MemoryAssets::with_capacity(6);
        for i in 0..6 {
            store
                .persist("ana", &image(&format!("asset/{i}.png")), meta())
                .unwrap();
        }

        store.persist("ana", &image("asset/6.png"), meta()).unwrap();

        // Five oldest dropped, the sixth and the new record remain.
        assert_eq!(store.len(), 2);
        let listed: Vec<_> = store.list("ana").into_iter().map(|r| r.locator).collect();
        assert_eq!(listed, vec!["asset/6.png", "asset/5.png"]);
    }

    #[test]
    fn records_carry_tool_provenance() {
        let mut store = MemoryAssets::new();
        let record = store.persist("ana", &image("asset/a.png"), meta()).unwrap();
        assert_eq!(record.tool_id, "image-gen");
        assert_eq!(record.tool_title, "Image Generator");
        assert_eq!(record.kind, ArtifactKind::Image);
    }
}
