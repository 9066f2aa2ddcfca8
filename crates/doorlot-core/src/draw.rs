//! Draw workflow: resolve the selection, assign slots, record history.

use std::sync::Arc;

use doorlot_state::KvStore;
use rand::Rng;

use crate::clock::Clock;
use crate::domain::{AssignmentRange, AssignmentResult, HistoryEntry, Result};
use crate::engine;
use crate::obs;
use crate::recording::HistoryRecorder;
use crate::roster::{Roster, Selection};

/// A computed batch and the outcome of persisting it.
///
/// `results` survive a storage failure so the caller can still show or
/// export them; they just will not be in history.
#[derive(Debug)]
pub struct DrawOutcome {
    pub results: Vec<AssignmentResult>,
    pub recorded: Result<HistoryEntry>,
}

/// Thin API layer tying the roster, the engine and the recorder together.
pub struct DrawService {
    roster: Roster,
    recorder: HistoryRecorder,
}

impl DrawService {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            roster: Roster::new(store.clone()),
            recorder: HistoryRecorder::new(store),
        }
    }

    /// Assign slots to `selection` and append the batch to `actor`'s log and
    /// the global log.
    ///
    /// Engine and roster errors fail the whole call and leave storage
    /// untouched. A history write failure is reported in
    /// [`DrawOutcome::recorded`] and is not retried.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        actor: &str,
        selection: &Selection,
        range: AssignmentRange,
        rng: &mut R,
        clock: &dyn Clock,
    ) -> Result<DrawOutcome> {
        let _span = obs::DrawSpan::enter(actor);
        let people = self.roster.list()?;

        let results = engine::assign(&people, selection.ids(), range, rng).map_err(|e| {
            obs::emit_draw_rejected(actor, &e);
            e
        })?;
        obs::emit_draw_completed(actor, results.len(), range.min(), range.max());

        let recorded = self.recorder.record(actor, &results, clock);
        Ok(DrawOutcome { results, recorded })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn recorder(&self) -> &HistoryRecorder {
        &self.recorder
    }
}
