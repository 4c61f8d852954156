//! Transition detection.
//!
//! `detect` diffs an asset's before/after snapshot under the caller's
//! touched-field mask and emits the notification intents the change
//! warrants. Pure and infallible: no I/O, no clock, no error path. A rule
//! whose recipient cannot be determined (no assignee) emits nothing; the
//! skip is permanent, not deferred.

use crate::asset::{AssetCondition, AssetSnapshot, AssetStatus, TouchedFields};
use crate::intent::NotificationIntent;
use crate::kind::NotificationKind;
use crate::params::{MessageParams, ParamKey};
use crate::types::DbId;

/// Diff `before`/`after` and emit intents for every rule-relevant change.
///
/// Only fields marked in `touched` are considered; a stored value that
/// drifted through some other path in the same transaction stays silent.
/// Multiple changed fields each yield an independent intent; the returned
/// order is not part of the contract.
pub fn detect(
    before: &AssetSnapshot,
    after: &AssetSnapshot,
    touched: TouchedFields,
) -> Vec<NotificationIntent> {
    let mut intents = Vec::new();

    if touched.assignee {
        detect_assignment(before, after, &mut intents);
    }
    if touched.status && before.status != after.status {
        detect_status(before, after, &mut intents);
    }
    if touched.condition && before.condition != after.condition {
        detect_condition(before, after, &mut intents);
    }

    intents
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

fn detect_assignment(
    before: &AssetSnapshot,
    after: &AssetSnapshot,
    intents: &mut Vec<NotificationIntent>,
) {
    match (before.assigned_to, after.assigned_to) {
        (None, Some(new)) => {
            intents.push(asset_intent(new, after, NotificationKind::AssetAssigned));
        }
        (Some(old), Some(new)) if old != new => {
            // One intent, to the incoming assignee. The outgoing assignee
            // is not separately notified.
            intents.push(asset_intent(new, after, NotificationKind::AssetReassigned));
        }
        (Some(old), None) => {
            intents.push(asset_intent(old, after, NotificationKind::AssetUnassigned));
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

fn detect_status(
    before: &AssetSnapshot,
    after: &AssetSnapshot,
    intents: &mut Vec<NotificationIntent>,
) {
    let Some(recipient) = rule_recipient(before, after) else {
        return;
    };

    let kind = match after.status {
        AssetStatus::Active => NotificationKind::AssetActivated,
        AssetStatus::UnderMaintenance => NotificationKind::AssetUnderMaintenance,
        AssetStatus::Disposed => NotificationKind::AssetDisposed,
        AssetStatus::Lost => NotificationKind::AssetLost,
        AssetStatus::InStorage => {
            let params = base_params(after)
                .with(ParamKey::OldStatus, before.status.as_str())
                .with(ParamKey::NewStatus, after.status.as_str());
            intents.push(NotificationIntent::for_asset(
                recipient,
                after.id,
                NotificationKind::AssetStatusChanged,
                params,
            ));
            return;
        }
    };
    intents.push(asset_intent(recipient, after, kind));
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

fn detect_condition(
    before: &AssetSnapshot,
    after: &AssetSnapshot,
    intents: &mut Vec<NotificationIntent>,
) {
    let Some(recipient) = rule_recipient(before, after) else {
        return;
    };

    let kind = match after.condition {
        AssetCondition::Damaged => NotificationKind::AssetConditionDamaged,
        AssetCondition::Poor => NotificationKind::AssetConditionPoor,
        _ => {
            let params = base_params(after)
                .with(ParamKey::OldCondition, before.condition.as_str())
                .with(ParamKey::NewCondition, after.condition.as_str());
            intents.push(NotificationIntent::for_asset(
                recipient,
                after.id,
                NotificationKind::AssetConditionChanged,
                params,
            ));
            return;
        }
    };
    intents.push(asset_intent(recipient, after, kind));
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Recipient for status/condition rules: the current assignee, or the
/// prior one when the same update cleared the assignment.
fn rule_recipient(before: &AssetSnapshot, after: &AssetSnapshot) -> Option<DbId> {
    after.assigned_to.or(before.assigned_to)
}

/// Params every asset intent starts from. `user_name` is left for the
/// dispatcher, which resolves display names at delivery time.
fn base_params(snapshot: &AssetSnapshot) -> MessageParams {
    MessageParams::new()
        .with(ParamKey::AssetName, &snapshot.name)
        .with(ParamKey::AssetTag, &snapshot.asset_tag)
}

fn asset_intent(
    recipient: DbId,
    after: &AssetSnapshot,
    kind: NotificationKind,
) -> NotificationIntent {
    NotificationIntent::for_asset(recipient, after.id, kind, base_params(after))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
