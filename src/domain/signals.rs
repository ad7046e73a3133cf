use crate::domain::models::{FlagKey, Level, Mode, SwitchId, TimeBand};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Instant situational conditions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Flags {
    pub overwhelm: bool,
    pub time_chaos: bool,
    pub money_stress: bool,
    pub relationship_drain: bool,
    pub env_mess: bool,
    pub low_energy: bool,
    pub low_motivation: bool,
    pub sleep_debt: bool,
}

impl Flags {
    pub fn get(&self, key: FlagKey) -> bool {
        match key {
            FlagKey::Overwhelm => self.overwhelm,
            FlagKey::TimeChaos => self.time_chaos,
            FlagKey::MoneyStress => self.money_stress,
            FlagKey::RelationshipDrain => self.relationship_drain,
            FlagKey::EnvMess => self.env_mess,
            FlagKey::LowEnergy => self.low_energy,
            FlagKey::LowMotivation => self.low_motivation,
            FlagKey::SleepDebt => self.sleep_debt,
        }
    }

    pub fn set(&mut self, key: FlagKey, value: bool) {
        let slot = match key {
            FlagKey::Overwhelm => &mut self.overwhelm,
            FlagKey::TimeChaos => &mut self.time_chaos,
            FlagKey::MoneyStress => &mut self.money_stress,
            FlagKey::RelationshipDrain => &mut self.relationship_drain,
            FlagKey::EnvMess => &mut self.env_mess,
            FlagKey::LowEnergy => &mut self.low_energy,
            FlagKey::LowMotivation => &mut self.low_motivation,
            FlagKey::SleepDebt => &mut self.sleep_debt,
        };
        *slot = value;
    }
}

/// Cumulative occurrences per flag family over the nominal 14-day window.
/// Nothing here decays with elapsed time; only an explicit reset clears them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FlagCounts {
    pub overwhelm: u32,
    pub time_chaos: u32,
    pub money_stress: u32,
    pub relationship_drain: u32,
    pub env_mess: u32,
    pub low_energy: u32,
    pub low_motivation: u32,
    pub sleep_debt: u32,
}

impl FlagCounts {
    pub fn get(&self, key: FlagKey) -> u32 {
        match key {
            FlagKey::Overwhelm => self.overwhelm,
            FlagKey::TimeChaos => self.time_chaos,
            FlagKey::MoneyStress => self.money_stress,
            FlagKey::RelationshipDrain => self.relationship_drain,
            FlagKey::EnvMess => self.env_mess,
            FlagKey::LowEnergy => self.low_energy,
            FlagKey::LowMotivation => self.low_motivation,
            FlagKey::SleepDebt => self.sleep_debt,
        }
    }

    pub fn increment(&mut self, key: FlagKey) -> u32 {
        let slot = match key {
            FlagKey::Overwhelm => &mut self.overwhelm,
            FlagKey::TimeChaos => &mut self.time_chaos,
            FlagKey::MoneyStress => &mut self.money_stress,
            FlagKey::RelationshipDrain => &mut self.relationship_drain,
            FlagKey::EnvMess => &mut self.env_mess,
            FlagKey::LowEnergy => &mut self.low_energy,
            FlagKey::LowMotivation => &mut self.low_motivation,
            FlagKey::SleepDebt => &mut self.sleep_debt,
        };
        *slot = slot.saturating_add(1);
        *slot
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Signals {
    pub energy_level: Level,
    pub stress_level: Level,
    pub time_band: TimeBand,
    pub primary_switch_id: Option<SwitchId>,
    pub support_switch_id: Option<SwitchId>,
    pub mode_bias: Mode,
    pub flags: Flags,
    pub flag_counts_14d: FlagCounts,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Per-field update commands. Energy changes always go through the guarded
/// path so the mode-bias restore rule cannot be skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum SignalUpdate {
    EnergyLevel(Level),
    StressLevel(Level),
    TimeBand(TimeBand),
    PrimarySwitch(Option<SwitchId>),
    SupportSwitch(Option<SwitchId>),
    ModeBias(Mode),
    Flag { key: FlagKey, value: bool },
    IncrementFlagCount(FlagKey),
    ResetFlagCounts,
}

#[derive(Debug, Clone, Default)]
pub struct SignalStore {
    signals: Signals,
}

impl SignalStore {
    pub fn new(signals: Signals) -> Self {
        Self { signals }
    }

    pub fn get(&self) -> &Signals {
        &self.signals
    }

    pub fn update(&mut self, update: SignalUpdate, now: DateTime<Utc>) {
        match update {
            SignalUpdate::EnergyLevel(level) => self.apply_energy_level(level),
            SignalUpdate::StressLevel(level) => self.signals.stress_level = level,
            SignalUpdate::TimeBand(band) => self.signals.time_band = band,
            SignalUpdate::PrimarySwitch(id) => self.signals.primary_switch_id = id,
            SignalUpdate::SupportSwitch(id) => self.signals.support_switch_id = id,
            SignalUpdate::ModeBias(mode) => self.signals.mode_bias = mode,
            SignalUpdate::Flag { key, value } => self.signals.flags.set(key, value),
            SignalUpdate::IncrementFlagCount(key) => {
                let count = self.signals.flag_counts_14d.increment(key);
                tracing::debug!("flag count {} now {}", key.as_str(), count);
            }
            SignalUpdate::ResetFlagCounts => self.signals.flag_counts_14d = FlagCounts::default(),
        }
        self.signals.last_updated = Some(now);
    }

    pub fn update_energy_level(&mut self, level: Level, now: DateTime<Utc>) {
        self.update(SignalUpdate::EnergyLevel(level), now);
    }

    pub fn set_flag(&mut self, key: FlagKey, value: bool, now: DateTime<Utc>) {
        self.update(SignalUpdate::Flag { key, value }, now);
    }

    pub fn increment_flag_count(&mut self, key: FlagKey, now: DateTime<Utc>) {
        self.update(SignalUpdate::IncrementFlagCount(key), now);
    }

    fn apply_energy_level(&mut self, level: Level) {
        let signals = &mut self.signals;
        signals.energy_level = level;
        match level {
            Level::Low => {
                signals.flags.low_energy = true;
                signals.mode_bias = Mode::Restoring;
            }
            Level::Medium | Level::High => {
                signals.flags.low_energy = false;
                // Another stressor still active keeps the restoring posture.
                if !signals.flags.overwhelm && signals.stress_level != Level::High {
                    signals.mode_bias = Mode::Training;
                }
            }
        }
        tracing::debug!(
            "energy level {} leaves mode bias {}",
            level.as_str(),
            signals.mode_bias.as_str()
        );
    }
}
