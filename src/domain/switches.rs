use crate::domain::models::{Mode, SwitchId, SwitchStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cumulative check-ins needed to move from flickering to stable.
pub const STABLE_AFTER_CHECKINS: u32 = 7;
/// Cumulative check-ins needed to move from stable to powered.
pub const POWERED_AFTER_CHECKINS: u32 = 14;
pub const PRIORITY_LIMIT: usize = 2;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SwitchState {
    pub status: SwitchStatus,
    pub mode: Mode,
    pub check_ins: u32,
    pub streak_days: u32,
    pub training_started: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwitchEntry {
    pub id: SwitchId,
    pub label: &'static str,
    #[serde(flatten)]
    pub state: SwitchState,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CheckInOutcome {
    pub previous: SwitchStatus,
    pub status: SwitchStatus,
    pub check_ins: u32,
}

impl CheckInOutcome {
    pub fn advanced(&self) -> bool {
        self.status != self.previous
    }
}

/// Status after one more check-in. At most one tier per call.
fn next_status(current: SwitchStatus, check_ins: u32) -> SwitchStatus {
    match current {
        SwitchStatus::Off => SwitchStatus::Flickering,
        SwitchStatus::Flickering if check_ins >= STABLE_AFTER_CHECKINS => SwitchStatus::Stable,
        SwitchStatus::Stable if check_ins >= POWERED_AFTER_CHECKINS => SwitchStatus::Powered,
        SwitchStatus::Flickering | SwitchStatus::Stable | SwitchStatus::Powered => current,
    }
}

/// Progress state for all 8 switches, always complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchBoard {
    states: BTreeMap<SwitchId, SwitchState>,
}

impl Default for SwitchBoard {
    fn default() -> Self {
        Self::from_map(BTreeMap::new())
    }
}

impl SwitchBoard {
    /// Fills any switch missing from a persisted record with a fresh state.
    pub fn from_map(mut states: BTreeMap<SwitchId, SwitchState>) -> Self {
        for id in SwitchId::ALL {
            states.entry(id).or_default();
        }
        Self { states }
    }

    pub fn as_map(&self) -> &BTreeMap<SwitchId, SwitchState> {
        &self.states
    }

    pub fn get(&self, id: SwitchId) -> &SwitchState {
        // from_map guarantees every id is present
        &self.states[&id]
    }

    fn state_mut(&mut self, id: SwitchId) -> &mut SwitchState {
        self.states.entry(id).or_default()
    }

    /// Explicit user reset: discards any stable/powered standing.
    pub fn start_training(&mut self, id: SwitchId, now: DateTime<Utc>) -> &SwitchState {
        let state = self.state_mut(id);
        if state.status > SwitchStatus::Flickering {
            tracing::info!(
                "Restarting training on {} from {}",
                id.as_str(),
                state.status.as_str()
            );
        }
        state.status = SwitchStatus::Flickering;
        state.mode = Mode::Training;
        state.training_started = Some(now);
        state.last_updated = Some(now);
        state
    }

    pub fn record_check_in(&mut self, id: SwitchId, now: DateTime<Utc>) -> CheckInOutcome {
        let state = self.state_mut(id);
        let previous = state.status;
        state.check_ins = state.check_ins.saturating_add(1);
        state.streak_days = state.streak_days.saturating_add(1);
        state.status = next_status(previous, state.check_ins);
        state.last_updated = Some(now);

        let outcome = CheckInOutcome {
            previous,
            status: state.status,
            check_ins: state.check_ins,
        };
        if outcome.advanced() {
            tracing::info!(
                "Switch {} advanced {} -> {} at {} check-ins",
                id.as_str(),
                previous.as_str(),
                outcome.status.as_str(),
                outcome.check_ins
            );
        }
        outcome
    }

    pub fn set_status(&mut self, id: SwitchId, status: SwitchStatus, now: DateTime<Utc>) {
        let state = self.state_mut(id);
        state.status = status;
        state.last_updated = Some(now);
    }

    pub fn set_mode(&mut self, id: SwitchId, mode: Mode, now: DateTime<Utc>) {
        let state = self.state_mut(id);
        state.mode = mode;
        state.last_updated = Some(now);
    }

    pub fn entries(&self) -> Vec<SwitchEntry> {
        SwitchId::ALL
            .into_iter()
            .map(|id| self.entry(id))
            .collect()
    }

    pub fn active_switches(&self) -> Vec<SwitchEntry> {
        SwitchId::ALL
            .into_iter()
            .filter(|id| self.get(*id).status != SwitchStatus::Off)
            .map(|id| self.entry(id))
            .collect()
    }

    pub fn priority_switches(&self) -> Vec<SwitchEntry> {
        SwitchId::ALL
            .into_iter()
            .filter(|id| {
                let state = self.get(*id);
                state.mode == Mode::Training || state.status == SwitchStatus::Flickering
            })
            .take(PRIORITY_LIMIT)
            .map(|id| self.entry(id))
            .collect()
    }

    fn entry(&self, id: SwitchId) -> SwitchEntry {
        SwitchEntry {
            id,
            label: id.label(),
            state: self.get(id).clone(),
        }
    }
}
