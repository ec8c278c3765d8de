//! Suspicion scoring for accounts and fraud rings.
//!
//! Account scores are built from fixed per-family base weights, scaled by
//! ring involvement, with a bonus for accounts spanning multiple pattern
//! families. Ring risk is the mean member score weighted by pattern
//! severity. Both land in `[0, 100]` at one-decimal precision.

use std::collections::BTreeMap;

use crate::aggregate::AccountFlags;
use crate::types::PatternKind;

/// Extra scaling per ring beyond the first.
const INVOLVEMENT_STEP: f64 = 0.15;
/// Bonus for spanning more than one pattern family.
const MULTI_PATTERN_BONUS: f64 = 15.0;

fn family_base(kind: PatternKind) -> f64 {
    match kind {
        PatternKind::Cycle => 40.0,
        PatternKind::Smurfing => 30.0,
        PatternKind::LayeredShell => 30.0,
    }
}

fn ring_severity(kind: PatternKind) -> f64 {
    match kind {
        PatternKind::Cycle => 1.2,
        PatternKind::Smurfing => 1.0,
        PatternKind::LayeredShell => 1.1,
    }
}

/// Round to one decimal and clamp into `[0, 100]`.
fn finalize(score: f64) -> f64 {
    ((score * 10.0).round() / 10.0).clamp(0.0, 100.0)
}

/// Compute suspicion scores for every flagged account.
pub fn score_accounts(accounts: &BTreeMap<String, AccountFlags>) -> BTreeMap<String, f64> {
    accounts
        .iter()
        .map(|(account, flags)| (account.clone(), account_score(flags)))
        .collect()
}

fn account_score(flags: &AccountFlags) -> f64 {
    let mut score: f64 = flags.families.iter().map(|kind| family_base(*kind)).sum();

    if flags.ring_count > 1 {
        score *= 1.0 + (flags.ring_count as f64 - 1.0) * INVOLVEMENT_STEP;
    }
    if flags.families.len() > 1 {
        score += MULTI_PATTERN_BONUS;
    }

    finalize(score)
}

/// Risk score for one ring given its members' suspicion scores.
pub fn ring_risk(member_scores: &[f64], kind: PatternKind) -> f64 {
    if member_scores.is_empty() {
        return 0.0;
    }
    let mean = member_scores.iter().sum::<f64>() / member_scores.len() as f64;
    finalize(mean * ring_severity(kind))
}
