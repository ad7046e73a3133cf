use crate::db::{self, Persistence, RecordKey};
use crate::domain::models::{FlagKey, Level, Mode, SwitchId, SwitchStatus, TimeBand};
use crate::domain::plan::{PlanGroup, PlanItem, PlanList, PlanSummary};
use crate::domain::recommendation::{derive_mode, derive_recommended_switch, Recommendation};
use crate::domain::signals::{SignalStore, SignalUpdate, Signals};
use crate::domain::switches::{CheckInOutcome, SwitchBoard, SwitchEntry, SwitchState};
use crate::error::{EngineError, PersistError};
use crate::services::catalog::PlanCatalog;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub signals: Signals,
    pub recommendation: Recommendation,
    pub mode: Mode,
    pub switches: Vec<SwitchEntry>,
    pub active_switches: Vec<SwitchEntry>,
    pub priority_switches: Vec<SwitchEntry>,
    pub plans: Vec<PlanGroup>,
    pub plan_summary: PlanSummary,
}

/// Owns the user's state and the storage it is flushed to.
///
/// Every mutation applies in memory first, then writes the touched record.
/// When the write fails the record stays dirty and the caller gets
/// [`EngineError::Persistence`]; the next successful write or an explicit
/// [`Engine::flush`] catches storage up.
pub struct Engine {
    backend: Arc<dyn Persistence>,
    catalog: Arc<PlanCatalog>,
    signals: SignalStore,
    switches: SwitchBoard,
    plans: PlanList,
    dirty: HashSet<RecordKey>,
}

impl Engine {
    pub fn load(backend: Arc<dyn Persistence>, catalog: Arc<PlanCatalog>) -> Self {
        let signals: Signals = db::load_record(backend.as_ref(), RecordKey::Signals);
        let switches: BTreeMap<SwitchId, SwitchState> =
            db::load_record(backend.as_ref(), RecordKey::Switches);
        let plans: Vec<PlanItem> = db::load_record(backend.as_ref(), RecordKey::Plans);
        tracing::info!(
            "Engine loaded: {} switch records, {} plan items",
            switches.len(),
            plans.len()
        );

        Self {
            backend,
            catalog,
            signals: SignalStore::new(signals),
            switches: SwitchBoard::from_map(switches),
            plans: PlanList::new(plans),
            dirty: HashSet::new(),
        }
    }

    pub fn flush(&mut self) -> Result<(), PersistError> {
        for key in RecordKey::ALL {
            if self.dirty.contains(&key) {
                self.write(key)?;
            }
        }
        Ok(())
    }

    pub fn has_unsaved_changes(&self) -> bool {
        !self.dirty.is_empty()
    }

    fn write(&mut self, key: RecordKey) -> Result<(), PersistError> {
        let backend = self.backend.as_ref();
        let result = match key {
            RecordKey::Signals => db::save_record(backend, key, self.signals.get()),
            RecordKey::Switches => db::save_record(backend, key, self.switches.as_map()),
            RecordKey::Plans => db::save_record(backend, key, &self.plans.items()),
        };
        match result {
            Ok(()) => {
                self.dirty.remove(&key);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to persist {} record: {}", key.as_str(), e);
                self.dirty.insert(key);
                Err(e)
            }
        }
    }

    fn persist(&mut self, key: RecordKey) -> Result<(), EngineError> {
        self.dirty.insert(key);
        self.flush().map_err(EngineError::from)
    }

    // --- signals ---

    pub fn signals(&self) -> &Signals {
        self.signals.get()
    }

    pub fn update_signals(&mut self, update: SignalUpdate) -> Result<&Signals, EngineError> {
        self.update_signals_at(update, Utc::now())
    }

    pub fn update_signals_at(
        &mut self,
        update: SignalUpdate,
        now: DateTime<Utc>,
    ) -> Result<&Signals, EngineError> {
        self.signals.update(update, now);
        self.persist(RecordKey::Signals)?;
        Ok(self.signals.get())
    }

    pub fn update_energy_level(&mut self, level: Level) -> Result<&Signals, EngineError> {
        self.signals.update_energy_level(level, Utc::now());
        self.persist(RecordKey::Signals)?;
        Ok(self.signals.get())
    }

    pub fn set_flag(&mut self, key: FlagKey, value: bool) -> Result<&Signals, EngineError> {
        self.signals.set_flag(key, value, Utc::now());
        self.persist(RecordKey::Signals)?;
        Ok(self.signals.get())
    }

    pub fn increment_flag_count(&mut self, key: FlagKey) -> Result<&Signals, EngineError> {
        self.signals.increment_flag_count(key, Utc::now());
        self.persist(RecordKey::Signals)?;
        Ok(self.signals.get())
    }

    // --- recommendation ---

    pub fn recommendation(&self) -> Recommendation {
        derive_recommended_switch(self.signals.get())
    }

    pub fn mode(&self) -> Mode {
        derive_mode(self.signals.get())
    }

    // --- switches ---

    pub fn switch(&self, id: SwitchId) -> &SwitchState {
        self.switches.get(id)
    }

    pub fn switches(&self) -> Vec<SwitchEntry> {
        self.switches.entries()
    }

    pub fn active_switches(&self) -> Vec<SwitchEntry> {
        self.switches.active_switches()
    }

    pub fn priority_switches(&self) -> Vec<SwitchEntry> {
        self.switches.priority_switches()
    }

    pub fn start_training(&mut self, id: SwitchId) -> Result<SwitchState, EngineError> {
        let state = self.switches.start_training(id, Utc::now()).clone();
        self.persist(RecordKey::Switches)?;
        Ok(state)
    }

    pub fn record_check_in(&mut self, id: SwitchId) -> Result<CheckInOutcome, EngineError> {
        let outcome = self.switches.record_check_in(id, Utc::now());
        self.persist(RecordKey::Switches)?;
        Ok(outcome)
    }

    pub fn set_status(&mut self, id: SwitchId, status: SwitchStatus) -> Result<(), EngineError> {
        self.switches.set_status(id, status, Utc::now());
        self.persist(RecordKey::Switches)
    }

    pub fn set_mode(&mut self, id: SwitchId, mode: Mode) -> Result<(), EngineError> {
        self.switches.set_mode(id, mode, Utc::now());
        self.persist(RecordKey::Switches)
    }

    // --- plans ---

    pub fn plans(&self) -> &PlanList {
        &self.plans
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    /// Resolves the catalog template and appends a snapshot of it.
    pub fn add_from_catalog(
        &mut self,
        switch_id: SwitchId,
        time_band: TimeBand,
    ) -> Result<PlanItem, EngineError> {
        let template = self.catalog.lookup(switch_id, time_band)?;
        let item = PlanItem::from_template(switch_id, time_band, template, Utc::now());
        let added = self.plans.push(item).clone();
        tracing::debug!(
            "Added plan item {} ({}/{})",
            added.id,
            switch_id.as_str(),
            time_band.as_str()
        );
        self.persist(RecordKey::Plans)?;
        Ok(added)
    }

    /// Uses the time band from the current signals.
    pub fn add_recommended(&mut self) -> Result<PlanItem, EngineError> {
        let rec = self.recommendation();
        let band = self.signals.get().time_band;
        self.add_from_catalog(rec.recommended_switch_id, band)
    }

    pub fn toggle_complete(&mut self, id: Uuid) -> Result<PlanItem, EngineError> {
        let item = self.plans.toggle_complete(id)?.clone();
        self.persist(RecordKey::Plans)?;
        Ok(item)
    }

    pub fn remove_plan(&mut self, id: Uuid) -> Result<PlanItem, EngineError> {
        let removed = self.plans.remove(id)?;
        self.persist(RecordKey::Plans)?;
        Ok(removed)
    }

    pub fn clear_completed(&mut self) -> Result<usize, EngineError> {
        let removed = self.plans.clear_completed();
        if removed > 0 {
            self.persist(RecordKey::Plans)?;
        }
        Ok(removed)
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            signals: self.signals.get().clone(),
            recommendation: self.recommendation(),
            mode: self.mode(),
            switches: self.switches(),
            active_switches: self.active_switches(),
            priority_switches: self.priority_switches(),
            plans: self.plans.grouped(),
            plan_summary: self.plans.summary(),
        }
    }
}
