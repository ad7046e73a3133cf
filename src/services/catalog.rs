use crate::domain::models::{SwitchId, TimeBand};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanTemplate {
    pub title: String,
    pub steps: Vec<String>,
    pub estimate_minutes: u16,
}

/// One row of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub switch_id: SwitchId,
    pub time_band: TimeBand,
    #[serde(flatten)]
    pub template: PlanTemplate,
}

/// Immutable `(switch, time band)` table. Construction fails unless every
/// pair is present, so lookups on a built catalog cannot miss.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    templates: HashMap<(SwitchId, TimeBand), PlanTemplate>,
}

impl PlanCatalog {
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut templates = HashMap::new();
        for entry in entries {
            if templates
                .insert((entry.switch_id, entry.time_band), entry.template)
                .is_some()
            {
                tracing::warn!(
                    "Duplicate catalog entry for {}/{}, keeping the last one",
                    entry.switch_id.as_str(),
                    entry.time_band.as_str()
                );
            }
        }

        let catalog = Self { templates };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let entries: Vec<CatalogEntry> = serde_json::from_str(&raw)?;
        tracing::info!(
            "Loaded {} catalog entries from {}",
            entries.len(),
            path.as_ref().display()
        );
        Self::from_entries(entries)
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        let entries = BUILTIN
            .iter()
            .map(|(switch_id, time_band, title, minutes, steps)| CatalogEntry {
                switch_id: *switch_id,
                time_band: *time_band,
                template: PlanTemplate {
                    title: title.to_string(),
                    steps: steps.iter().map(|s| s.to_string()).collect(),
                    estimate_minutes: *minutes,
                },
            })
            .collect();
        Self::from_entries(entries)
    }

    pub fn lookup(&self, switch: SwitchId, band: TimeBand) -> Result<&PlanTemplate, CatalogError> {
        self.templates
            .get(&(switch, band))
            .ok_or(CatalogError::Missing {
                switch: switch.as_str(),
                band: band.as_str(),
            })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Checks presence per key only; titles and steps are opaque content.
    fn validate(&self) -> Result<(), CatalogError> {
        for switch in SwitchId::ALL {
            for band in TimeBand::ALL {
                self.lookup(switch, band)?;
            }
        }
        Ok(())
    }
}

type BuiltinRow = (SwitchId, TimeBand, &'static str, u16, &'static [&'static str]);

#[rustfmt::skip]
const BUILTIN: &[BuiltinRow] = &[
    // Body
    (SwitchId::Body, TimeBand::Tiny, "Wake up the body", 3, &[
        "Stand up and roll your shoulders 10 times",
        "Drink a full glass of water",
    ]),
    (SwitchId::Body, TimeBand::Small, "Short movement reset", 12, &[
        "Walk briskly for 8 minutes",
        "Stretch hamstrings and hips for 2 minutes",
        "Finish with 5 slow breaths",
    ]),
    (SwitchId::Body, TimeBand::Medium, "Steady movement block", 25, &[
        "Warm up for 5 minutes",
        "15 minutes of walking, cycling or bodyweight circuits",
        "Cool down and stretch for 5 minutes",
    ]),
    (SwitchId::Body, TimeBand::Large, "Full training session", 50, &[
        "Warm up for 10 minutes",
        "30 minutes of your main workout",
        "10 minutes of mobility work",
        "Refuel with water and a protein snack",
    ]),
    // Mind
    (SwitchId::Mind, TimeBand::Tiny, "Two-minute calm", 2, &[
        "Breathe in for 4, hold for 4, out for 6, repeat 6 times",
    ]),
    (SwitchId::Mind, TimeBand::Small, "Unload the head", 10, &[
        "Write down everything on your mind for 5 minutes",
        "Circle the one thing you can act on today",
        "Sit quietly for 2 minutes",
    ]),
    (SwitchId::Mind, TimeBand::Medium, "Guided focus practice", 20, &[
        "10 minutes of guided meditation",
        "Journal three things that went well",
        "Pick one intention for the rest of the day",
    ]),
    (SwitchId::Mind, TimeBand::Large, "Deep recovery for the mind", 45, &[
        "Take a phone-free walk for 20 minutes",
        "15 minutes of meditation or yoga nidra",
        "Reflect in writing on what is draining you",
    ]),
    // Time
    (SwitchId::Time, TimeBand::Tiny, "Pick the one thing", 3, &[
        "Name the single most important task for today",
    ]),
    (SwitchId::Time, TimeBand::Small, "Quick triage", 12, &[
        "List open tasks for 5 minutes",
        "Mark each as now, later or drop",
        "Block 25 minutes in your calendar for the top item",
    ]),
    (SwitchId::Time, TimeBand::Medium, "Plan the next three days", 25, &[
        "Review your calendar for the next three days",
        "Move or decline one low-value commitment",
        "Schedule focus blocks for your top two priorities",
    ]),
    (SwitchId::Time, TimeBand::Large, "Weekly reset", 50, &[
        "Clear your inbox to a single screen",
        "Review goals and upcoming deadlines",
        "Build next week's plan with buffer time",
        "Set a hard stop time for each workday",
    ]),
    // Purpose
    (SwitchId::Purpose, TimeBand::Tiny, "Why today matters", 3, &[
        "Write one sentence about what you want today to mean",
    ]),
    (SwitchId::Purpose, TimeBand::Small, "Values check", 10, &[
        "Pick your top three values",
        "Note one recent moment where you lived one of them",
    ]),
    (SwitchId::Purpose, TimeBand::Medium, "Small meaningful step", 25, &[
        "Choose a project that matters to you",
        "Spend 20 minutes moving it forward",
        "Note how it felt",
    ]),
    (SwitchId::Purpose, TimeBand::Large, "Purpose map", 45, &[
        "Describe where you want to be in a year",
        "List three milestones on the way",
        "Schedule the first concrete action",
    ]),
    // Money
    (SwitchId::Money, TimeBand::Tiny, "Check one balance", 3, &[
        "Open your main account and look at the balance without judgment",
    ]),
    (SwitchId::Money, TimeBand::Small, "Spot the leaks", 15, &[
        "Review the last 7 days of spending",
        "Flag one expense you could cut or pause",
    ]),
    (SwitchId::Money, TimeBand::Medium, "Bills and buffers", 30, &[
        "List upcoming bills for the month",
        "Set reminders or autopay for each",
        "Move a small amount into savings",
    ]),
    (SwitchId::Money, TimeBand::Large, "Monthly money session", 60, &[
        "Categorize last month's spending",
        "Compare against your budget",
        "Cancel one unused subscription",
        "Set next month's spending targets",
    ]),
    // Relationships
    (SwitchId::Relationships, TimeBand::Tiny, "Send a kind message", 3, &[
        "Text someone you appreciate and tell them why",
    ]),
    (SwitchId::Relationships, TimeBand::Small, "Quick catch-up", 15, &[
        "Call or voice-message a friend or family member",
        "Ask one real question and listen",
    ]),
    (SwitchId::Relationships, TimeBand::Medium, "Repair or reconnect", 30, &[
        "Think of one relationship that feels strained",
        "Write what you want to say",
        "Reach out or schedule a conversation",
    ]),
    (SwitchId::Relationships, TimeBand::Large, "Quality time", 60, &[
        "Plan an activity with someone close",
        "Put phones away for the duration",
        "Share one thing you are grateful for about them",
    ]),
    // Environment
    (SwitchId::Environment, TimeBand::Tiny, "Clear one surface", 4, &[
        "Pick your desk or nightstand and clear it completely",
    ]),
    (SwitchId::Environment, TimeBand::Small, "Ten-minute tidy", 10, &[
        "Set a 10-minute timer",
        "Put away everything out of place in one room",
    ]),
    (SwitchId::Environment, TimeBand::Medium, "Reset a space", 25, &[
        "Choose one room",
        "Remove trash and items that belong elsewhere",
        "Wipe surfaces and open a window",
    ]),
    (SwitchId::Environment, TimeBand::Large, "Declutter session", 50, &[
        "Pick a closet, drawer or shelf",
        "Sort into keep, donate and discard",
        "Take the donate pile to your car or door",
    ]),
    // Identity
    (SwitchId::Identity, TimeBand::Tiny, "Name who you are becoming", 3, &[
        "Finish the sentence: I am someone who...",
    ]),
    (SwitchId::Identity, TimeBand::Small, "Evidence log", 10, &[
        "Write down three things you did this week that fit who you want to be",
    ]),
    (SwitchId::Identity, TimeBand::Medium, "Habit anchor", 20, &[
        "Pick one identity-based habit",
        "Attach it to something you already do daily",
        "Do the first repetition now",
    ]),
    (SwitchId::Identity, TimeBand::Large, "Identity review", 45, &[
        "Reflect on the roles you play",
        "Note which feel true and which feel borrowed",
        "Choose one change to make this month",
    ]),
];
