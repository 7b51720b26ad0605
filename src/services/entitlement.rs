use std::collections::{BTreeMap, BTreeSet};

/// Entitlement gate consulted before the workspace for a paid tool opens.
///
/// Purchase flows and payment confirmation live behind this boundary; the
/// session only ever asks the yes/no question.
pub trait Entitlements {
    /// True when `identity` has unlocked `feature_id`.
    fn is_unlocked(&self, identity: &str, feature_id: &str) -> bool;
}

/// In-memory purchase ledger keyed by identity.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PurchaseLedger {
    purchases: BTreeMap<String, BTreeSet<String>>,
}

impl PurchaseLedger {
    /// An empty ledger; everything is locked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `identity` purchased `feature_id`. Idempotent.
    pub fn record_purchase(&mut self, identity: &str, feature_id: &str) {
        self.purchases
            .entry(identity.to_string())
            .or_default()
            .insert(feature_id.to_string());
    }
}

impl Entitlements for PurchaseLedger {
    fn is_unlocked(&self, identity: &str, feature_id: &str) -> bool {
        self.purchases
            .get(identity)
            .is_some_and(|owned| owned.contains(feature_id))
    }
}
