use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    #[default]
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }
}

/// Coarse bucket of currently available time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeBand {
    Tiny,
    #[default]
    Small,
    Medium,
    Large,
}

impl TimeBand {
    pub const ALL: [TimeBand; 4] = [
        TimeBand::Tiny,
        TimeBand::Small,
        TimeBand::Medium,
        TimeBand::Large,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeBand::Tiny => "tiny",
            TimeBand::Small => "small",
            TimeBand::Medium => "medium",
            TimeBand::Large => "large",
        }
    }

    /// Rough minutes range shown next to the band in the UI.
    pub fn minutes_hint(&self) -> (u16, Option<u16>) {
        match self {
            TimeBand::Tiny => (2, Some(5)),
            TimeBand::Small => (10, Some(15)),
            TimeBand::Medium => (20, Some(30)),
            TimeBand::Large => (45, None),
        }
    }
}

impl TryFrom<&str> for TimeBand {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "tiny" => Ok(TimeBand::Tiny),
            "small" => Ok(TimeBand::Small),
            "medium" => Ok(TimeBand::Medium),
            "large" => Ok(TimeBand::Large),
            _ => Err(ValidationError::InvalidValue {
                field: "time_band",
                value: value.to_string(),
            }),
        }
    }
}

/// Behavioral posture content is generated for. Independent of status tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Training,
    Maintaining,
    Restoring,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Training => "training",
            Mode::Maintaining => "maintaining",
            Mode::Restoring => "restoring",
        }
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum SwitchId {
    Body,
    Mind,
    Time,
    Purpose,
    Money,
    Relationships,
    Environment,
    Identity,
}

impl SwitchId {
    /// Fixed iteration order. Every listing of switches follows it.
    pub const ALL: [SwitchId; 8] = [
        SwitchId::Body,
        SwitchId::Mind,
        SwitchId::Time,
        SwitchId::Purpose,
        SwitchId::Money,
        SwitchId::Relationships,
        SwitchId::Environment,
        SwitchId::Identity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SwitchId::Body => "body",
            SwitchId::Mind => "mind",
            SwitchId::Time => "time",
            SwitchId::Purpose => "purpose",
            SwitchId::Money => "money",
            SwitchId::Relationships => "relationships",
            SwitchId::Environment => "environment",
            SwitchId::Identity => "identity",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SwitchId::Body => "Body",
            SwitchId::Mind => "Mind",
            SwitchId::Time => "Time",
            SwitchId::Purpose => "Purpose",
            SwitchId::Money => "Money",
            SwitchId::Relationships => "Relationships",
            SwitchId::Environment => "Environment",
            SwitchId::Identity => "Identity",
        }
    }
}

impl TryFrom<&str> for SwitchId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "body" => Ok(SwitchId::Body),
            "mind" => Ok(SwitchId::Mind),
            "time" => Ok(SwitchId::Time),
            "purpose" => Ok(SwitchId::Purpose),
            "money" => Ok(SwitchId::Money),
            "relationships" => Ok(SwitchId::Relationships),
            "environment" => Ok(SwitchId::Environment),
            "identity" => Ok(SwitchId::Identity),
            _ => Err(ValidationError::UnknownSwitch(value.to_string())),
        }
    }
}

/// Status tiers, ordered from least to most established.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum SwitchStatus {
    #[default]
    Off,
    Flickering,
    Stable,
    Powered,
}

impl SwitchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwitchStatus::Off => "off",
            SwitchStatus::Flickering => "flickering",
            SwitchStatus::Stable => "stable",
            SwitchStatus::Powered => "powered",
        }
    }
}

/// One of the 8 situational flag families.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FlagKey {
    Overwhelm,
    TimeChaos,
    MoneyStress,
    RelationshipDrain,
    EnvMess,
    LowEnergy,
    LowMotivation,
    SleepDebt,
}

impl FlagKey {
    pub const ALL: [FlagKey; 8] = [
        FlagKey::Overwhelm,
        FlagKey::TimeChaos,
        FlagKey::MoneyStress,
        FlagKey::RelationshipDrain,
        FlagKey::EnvMess,
        FlagKey::LowEnergy,
        FlagKey::LowMotivation,
        FlagKey::SleepDebt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlagKey::Overwhelm => "overwhelm",
            FlagKey::TimeChaos => "time_chaos",
            FlagKey::MoneyStress => "money_stress",
            FlagKey::RelationshipDrain => "relationship_drain",
            FlagKey::EnvMess => "env_mess",
            FlagKey::LowEnergy => "low_energy",
            FlagKey::LowMotivation => "low_motivation",
            FlagKey::SleepDebt => "sleep_debt",
        }
    }
}

impl TryFrom<&str> for FlagKey {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_lowercase().replace('-', "_");
        FlagKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownFlag(value.to_string()))
    }
}
