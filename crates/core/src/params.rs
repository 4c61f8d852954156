//! Typed template parameters.
//!
//! Placeholder names are a closed set instead of free-form strings, so a
//! template referencing `{asset_name}` and a call site filling
//! `asset_name` cannot drift apart silently: both go through [`ParamKey`].
//! Values stay strings because they are only ever interpolated into
//! user-facing text.

use std::collections::BTreeMap;

/// Every placeholder name the message catalog may reference.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKey {
    /// Human-readable asset name.
    AssetName,
    /// Short inventory tag of the asset.
    AssetTag,
    /// Display name of the user the message concerns.
    UserName,
    /// Status before a transition.
    OldStatus,
    /// Status after a transition.
    NewStatus,
    /// Condition before a transition.
    OldCondition,
    /// Condition after a transition.
    NewCondition,
    /// Deadline date (warranty expiry or maintenance target), ISO formatted.
    DueDate,
    /// Width of a due-soon window in days.
    Days,
}

/// All param keys, in template-name order. Used by catalog self-checks.
pub const ALL_PARAM_KEYS: &[ParamKey] = &[
    ParamKey::AssetName,
    ParamKey::AssetTag,
    ParamKey::UserName,
    ParamKey::OldStatus,
    ParamKey::NewStatus,
    ParamKey::OldCondition,
    ParamKey::NewCondition,
    ParamKey::DueDate,
    ParamKey::Days,
];

impl ParamKey {
    /// The placeholder name as it appears in templates, without braces.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AssetName => "asset_name",
            Self::AssetTag => "asset_tag",
            Self::UserName => "user_name",
            Self::OldStatus => "old_status",
            Self::NewStatus => "new_status",
            Self::OldCondition => "old_condition",
            Self::NewCondition => "new_condition",
            Self::DueDate => "due_date",
            Self::Days => "days",
        }
    }

    /// Reverse lookup from a template placeholder name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        ALL_PARAM_KEYS.iter().copied().find(|k| k.as_str() == lower)
    }
}

/// An ordered set of `(key, value)` substitutions for one rendering.
///
/// Ordering is deterministic (BTreeMap) so repeated renders substitute in
/// the same sequence. Missing keys are not an error anywhere downstream:
/// a template placeholder with no matching param stays literal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageParams(BTreeMap<ParamKey, String>);

impl MessageParams {
    /// An empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, builder style.
    pub fn with(mut self, key: ParamKey, value: impl Into<String>) -> Self {
        self.0.insert(key, value.into());
        self
    }

    /// Insert or replace a value.
    pub fn set(&mut self, key: ParamKey, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    /// Look up a value.
    pub fn get(&self, key: ParamKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    /// Whether a key is present.
    pub fn contains(&self, key: ParamKey) -> bool {
        self.0.contains_key(&key)
    }

    /// Iterate `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Number of params present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
