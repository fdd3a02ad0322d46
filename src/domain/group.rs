//! Unified groups: listings believed to describe the same event.
//!
//! A [`UnifiedGroup`] is the terminal artifact of unification. Groups are
//! collected into a [`UnifiedBatch`], which keeps every group even when two
//! of them settle on the same canonical name.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::id::GroupId;
use super::listing::PlatformPayload;
use super::verdict::MatchRecord;

/// Listings merged into one event, with their per-platform payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedGroup {
    pub id: GroupId,
    pub canonical_name: String,
    /// Weakest accepted pairwise confidence; `1.0` for singletons.
    pub confidence: f64,
    /// Rationale of the most recent merge.
    pub rationale: String,
    /// Every accepted pairwise verdict, in merge order.
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
    pub member_count: usize,
    /// Payloads keyed by platform, in member order within each platform.
    pub platforms: BTreeMap<String, Vec<PlatformPayload>>,
}

impl UnifiedGroup {
    /// True when no other listing joined the anchor.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.member_count == 1
    }

    /// Number of payloads across all platforms.
    #[must_use]
    pub fn payload_count(&self) -> usize {
        self.platforms.values().map(Vec::len).sum()
    }

    /// First payload of each platform, in platform order.
    pub fn primary_payloads(&self) -> impl Iterator<Item = (&str, &PlatformPayload)> {
        self.platforms
            .iter()
            .filter_map(|(platform, payloads)| payloads.first().map(|p| (platform.as_str(), p)))
    }
}

/// All groups produced from one listing batch.
///
/// Groups are ordered by finalization. Lookup by canonical name resolves to
/// the most recently inserted group carrying that name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<UnifiedGroup>", into = "Vec<UnifiedGroup>")]
pub struct UnifiedBatch {
    groups: Vec<UnifiedGroup>,
    by_name: HashMap<String, usize>,
}

impl UnifiedBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group.
    ///
    /// Returns the id of the group previously registered under the same
    /// canonical name, if any. That group stays in the batch.
    pub fn push(&mut self, group: UnifiedGroup) -> Option<GroupId> {
        let index = self.groups.len();
        let shadowed = self
            .by_name
            .insert(group.canonical_name.clone(), index)
            .map(|prev| self.groups[prev].id);
        self.groups.push(group);
        shadowed
    }

    /// Group registered under `canonical_name`.
    #[must_use]
    pub fn get(&self, canonical_name: &str) -> Option<&UnifiedGroup> {
        self.by_name.get(canonical_name).map(|&i| &self.groups[i])
    }

    /// Group with the given id.
    #[must_use]
    pub fn by_id(&self, id: GroupId) -> Option<&UnifiedGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UnifiedGroup> {
        self.groups.iter()
    }

    #[must_use]
    pub fn groups(&self) -> &[UnifiedGroup] {
        &self.groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of listings across all groups.
    #[must_use]
    pub fn listing_count(&self) -> usize {
        self.groups.iter().map(|g| g.member_count).sum()
    }

    /// Number of distinct canonical names.
    #[must_use]
    pub fn distinct_names(&self) -> usize {
        self.by_name.len()
    }
}

impl From<Vec<UnifiedGroup>> for UnifiedBatch {
    fn from(groups: Vec<UnifiedGroup>) -> Self {
        let mut batch = Self::new();
        for group in groups {
            batch.push(group);
        }
        batch
    }
}

impl From<UnifiedBatch> for Vec<UnifiedGroup> {
    fn from(batch: UnifiedBatch) -> Self {
        batch.groups
    }
}

impl<'a> IntoIterator for &'a UnifiedBatch {
    type Item = &'a UnifiedGroup;
    type IntoIter = std::slice::Iter<'a, UnifiedGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
