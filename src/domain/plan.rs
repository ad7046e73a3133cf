use crate::domain::models::{SwitchId, TimeBand};
use crate::error::ValidationError;
use crate::services::catalog::PlanTemplate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanItem {
    pub id: Uuid,
    pub switch_id: SwitchId,
    pub title: String,
    pub estimate_minutes: u16,
    #[serde(default)]
    pub completed: bool,
    /// Copied from the catalog at creation; later catalog changes never reach it.
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub time_band: TimeBand,
    pub created_at: Option<DateTime<Utc>>,
}

impl PlanItem {
    pub fn from_template(
        switch_id: SwitchId,
        time_band: TimeBand,
        template: &PlanTemplate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            switch_id,
            title: template.title.clone(),
            estimate_minutes: template.estimate_minutes,
            completed: false,
            steps: template.steps.clone(),
            time_band,
            created_at: Some(now),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanGroup {
    pub switch_id: SwitchId,
    pub label: &'static str,
    pub items: Vec<PlanItem>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct PlanSummary {
    pub total: usize,
    pub completed: usize,
    pub remaining_minutes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanList {
    items: Vec<PlanItem>,
}

impl PlanList {
    pub fn new(items: Vec<PlanItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[PlanItem] {
        &self.items
    }

    pub fn push(&mut self, mut item: PlanItem) -> &PlanItem {
        // v4 collisions are not expected; regenerate rather than shadow an item.
        while self.items.iter().any(|i| i.id == item.id) {
            item.id = Uuid::new_v4();
        }
        let idx = self.items.len();
        self.items.push(item);
        &self.items[idx]
    }

    pub fn toggle_complete(&mut self, id: Uuid) -> Result<&PlanItem, ValidationError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(ValidationError::UnknownPlanItem(id))?;
        item.completed = !item.completed;
        Ok(item)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<PlanItem, ValidationError> {
        let idx = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(ValidationError::UnknownPlanItem(id))?;
        Ok(self.items.remove(idx))
    }

    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|i| !i.completed);
        before - self.items.len()
    }

    /// Groups follow the fixed switch order; items keep insertion order.
    pub fn grouped(&self) -> Vec<PlanGroup> {
        SwitchId::ALL
            .into_iter()
            .filter_map(|switch_id| {
                let items: Vec<PlanItem> = self
                    .items
                    .iter()
                    .filter(|i| i.switch_id == switch_id)
                    .cloned()
                    .collect();
                if items.is_empty() {
                    None
                } else {
                    Some(PlanGroup {
                        switch_id,
                        label: switch_id.label(),
                        items,
                    })
                }
            })
            .collect()
    }

    pub fn summary(&self) -> PlanSummary {
        let completed = self.items.iter().filter(|i| i.completed).count();
        let remaining_minutes = self
            .items
            .iter()
            .filter(|i| !i.completed)
            .map(|i| u32::from(i.estimate_minutes))
            .sum();
        PlanSummary {
            total: self.items.len(),
            completed,
            remaining_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(title: &str) -> PlanTemplate {
        PlanTemplate {
            title: title.to_string(),
            steps: vec!["one".into(), "two".into()],
            estimate_minutes: 10,
        }
    }

    fn item(switch: SwitchId, title: &str) -> PlanItem {
        PlanItem::from_template(switch, TimeBand::Small, &template(title), Utc::now())
    }

    #[test]
    fn test_steps_are_snapshotted() {
        let mut source = template("Walk");
        let created = PlanItem::from_template(SwitchId::Body, TimeBand::Small, &source, Utc::now());
        source.steps.push("three".into());
        source.title = "Run".into();
        assert_eq!(created.steps, vec!["one".to_string(), "two".to_string()]);
        assert_eq!(created.title, "Walk");
    }

    #[test]
    fn test_toggle_touches_one_item_and_is_idempotent_twice() {
        let mut list = PlanList::default();
        let a = item(SwitchId::Body, "a");
        let b = item(SwitchId::Body, "b");
        let (a_id, b_id) = (a.id, b.id);
        list.push(a);
        list.push(b);
        let before = list.clone();

        assert!(list.toggle_complete(a_id).unwrap().completed);
        assert!(!list.items().iter().find(|i| i.id == b_id).unwrap().completed);

        list.toggle_complete(a_id).unwrap();
        assert_eq!(list, before);
    }

    #[test]
    fn test_remove_unknown_id_is_validation_error() {
        let mut list = PlanList::default();
        list.push(item(SwitchId::Mind, "a"));
        let missing = Uuid::new_v4();
        assert_eq!(
            list.remove(missing),
            Err(ValidationError::UnknownPlanItem(missing))
        );
        assert!(list.toggle_complete(missing).is_err());
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn test_grouping_keeps_insertion_order() {
        let mut list = PlanList::default();
        list.push(item(SwitchId::Money, "m1"));
        list.push(item(SwitchId::Body, "b1"));
        list.push(item(SwitchId::Money, "m2"));
        list.push(item(SwitchId::Body, "b2"));

        let groups = list.grouped();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].switch_id, SwitchId::Body);
        let titles: Vec<&str> = groups[1].items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["m1", "m2"]);
    }

    #[test]
    fn test_summary_and_clear_completed() {
        let mut list = PlanList::default();
        let a = item(SwitchId::Time, "a");
        let a_id = a.id;
        list.push(a);
        list.push(item(SwitchId::Time, "b"));
        list.toggle_complete(a_id).unwrap();

        assert_eq!(
            list.summary(),
            PlanSummary {
                total: 2,
                completed: 1,
                remaining_minutes: 10
            }
        );
        assert_eq!(list.clear_completed(), 1);
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn test_push_never_duplicates_ids() {
        let mut list = PlanList::default();
        let a = item(SwitchId::Body, "a");
        let mut twin = item(SwitchId::Body, "twin");
        twin.id = a.id;
        list.push(a);
        list.push(twin);
        assert_ne!(list.items()[0].id, list.items()[1].id);
    }
}
