//! Unique-slot random assignment.
//!
//! The engine is a pure function of its inputs plus the injected random
//! source. Each selected participant receives a distinct slot from the
//! range, and every ordering of slots is equally likely.

use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::domain::{AssignError, AssignmentRange, AssignmentResult, Participant};

/// Assign each id in `selected` a distinct slot from `range`.
///
/// Results are returned in the order of `selected`. Fails without producing
/// anything when the range is smaller than the selection, when an id does not
/// name a participant, or when an id appears twice.
pub fn assign<R: Rng + ?Sized>(
    participants: &[Participant],
    selected: &[String],
    range: AssignmentRange,
    rng: &mut R,
) -> Result<Vec<AssignmentResult>, AssignError> {
    if (selected.len() as u128) > range.span() {
        return Err(AssignError::RangeInsufficient {
            requested: selected.len(),
            available: range.size(),
        });
    }

    let by_id: HashMap<&str, &Participant> =
        participants.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut seen = HashSet::with_capacity(selected.len());
    let mut chosen = Vec::with_capacity(selected.len());
    for id in selected {
        let participant = by_id
            .get(id.as_str())
            .ok_or_else(|| AssignError::UnknownParticipant(id.clone()))?;
        if !seen.insert(id.as_str()) {
            return Err(AssignError::DuplicateParticipant(id.clone()));
        }
        chosen.push(*participant);
    }

    let slots = draw_slots(range, chosen.len(), rng);

    Ok(chosen
        .into_iter()
        .zip(slots)
        .map(|(p, slot)| AssignmentResult {
            participant_id: p.id.clone(),
            name: p.name.clone(),
            slot,
        })
        .collect())
}

/// First `count` values of a Fisher–Yates shuffle of `range`.
///
/// The range is never materialized: positions that have been swapped are
/// tracked in a sparse map, and an untouched position `k` holds offset `k`.
/// Only the prefix is shuffled, which yields the same distribution for
/// those `count` values as shuffling the whole range.
fn draw_slots<R: Rng + ?Sized>(range: AssignmentRange, count: usize, rng: &mut R) -> Vec<i64> {
    let n = range.span();
    let mut displaced: HashMap<u128, u128> = HashMap::with_capacity(count);
    let mut slots = Vec::with_capacity(count);

    for i in 0..count as u128 {
        let j = rng.gen_range(i..n);
        let at_i = displaced.get(&i).copied().unwrap_or(i);
        let at_j = displaced.get(&j).copied().unwrap_or(j);
        // Position i is never read again, only j needs the swapped value.
        displaced.insert(j, at_i);
        slots.push(offset_to_slot(range.min(), at_j));
    }

    slots
}

fn offset_to_slot(min: i64, offset: u128) -> i64 {
    // offset < span, so the sum always lands inside [min, max].
    ((min as i128) + (offset as i128)) as i64
}
