use crate::domain::models::{Level, Mode, SwitchId};
use crate::domain::signals::Signals;
use serde::{Deserialize, Serialize};

/// Money stress seen this many times in the window recommends `money`
/// even when the flag itself is currently clear.
pub const MONEY_STRESS_REPEAT_THRESHOLD: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub recommended_switch_id: SwitchId,
    pub alternative_switch_id: SwitchId,
    pub reason: String,
}

impl Recommendation {
    fn new(recommended: SwitchId, alternative: SwitchId, reason: &str) -> Self {
        Self {
            recommended_switch_id: recommended,
            alternative_switch_id: alternative,
            reason: reason.to_string(),
        }
    }
}

/// Ordered decision ladder; the first matching rule wins.
pub fn derive_recommended_switch(signals: &Signals) -> Recommendation {
    let flags = &signals.flags;
    let counts = &signals.flag_counts_14d;

    match (signals.energy_level, signals.stress_level) {
        (Level::Low, Level::High) => {
            return Recommendation::new(
                SwitchId::Mind,
                SwitchId::Body,
                "Low energy under high stress: calm the mind before asking the body for anything.",
            );
        }
        (Level::Low, Level::Low | Level::Medium) => {
            return Recommendation::new(
                SwitchId::Body,
                SwitchId::Mind,
                "Energy is low: start with a small physical reset.",
            );
        }
        (Level::Medium | Level::High, _) => {}
    }

    if flags.overwhelm || flags.time_chaos {
        return Recommendation::new(
            SwitchId::Time,
            SwitchId::Mind,
            "Too much at once: put a little order back into the day.",
        );
    }

    if counts.money_stress >= MONEY_STRESS_REPEAT_THRESHOLD || flags.money_stress {
        return Recommendation::new(
            SwitchId::Money,
            SwitchId::Time,
            "Money worries keep coming up: one concrete step takes some weight off.",
        );
    }

    if flags.relationship_drain {
        return Recommendation::new(
            SwitchId::Relationships,
            SwitchId::Mind,
            "Relationships feel draining: tend one connection on your own terms.",
        );
    }

    if flags.env_mess {
        return Recommendation::new(
            SwitchId::Environment,
            SwitchId::Time,
            "Your space is adding noise: clear one small area.",
        );
    }

    Recommendation::new(
        signals.primary_switch_id.unwrap_or(SwitchId::Body),
        signals.support_switch_id.unwrap_or(SwitchId::Mind),
        "No pressing signal: keep building your chosen focus.",
    )
}

pub fn derive_mode(signals: &Signals) -> Mode {
    if signals.energy_level == Level::Low || signals.flags.low_energy {
        return Mode::Restoring;
    }
    if signals.stress_level == Level::High || signals.flags.overwhelm {
        return Mode::Restoring;
    }
    signals.mode_bias
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral() -> Signals {
        Signals::default()
    }

    fn ids(rec: &Recommendation) -> (SwitchId, SwitchId) {
        (rec.recommended_switch_id, rec.alternative_switch_id)
    }

    #[test]
    fn test_low_energy_high_stress_beats_money_flag() {
        let mut s = neutral();
        s.energy_level = Level::Low;
        s.stress_level = Level::High;
        s.flags.money_stress = true;
        s.flag_counts_14d.money_stress = 5;
        let rec = derive_recommended_switch(&s);
        assert_eq!(ids(&rec), (SwitchId::Mind, SwitchId::Body));
    }

    #[test]
    fn test_low_energy_alone_recommends_body() {
        let mut s = neutral();
        s.energy_level = Level::Low;
        s.flags.overwhelm = true;
        assert_eq!(
            ids(&derive_recommended_switch(&s)),
            (SwitchId::Body, SwitchId::Mind)
        );
    }

    #[test]
    fn test_overwhelm_or_time_chaos_recommends_time() {
        let mut s = neutral();
        s.flags.time_chaos = true;
        s.flags.money_stress = true;
        assert_eq!(
            ids(&derive_recommended_switch(&s)),
            (SwitchId::Time, SwitchId::Mind)
        );
    }

    #[test]
    fn test_repeated_money_stress_recommends_money() {
        let mut s = neutral();
        s.flag_counts_14d.money_stress = 2;
        assert_eq!(
            ids(&derive_recommended_switch(&s)),
            (SwitchId::Money, SwitchId::Time)
        );

        s.flag_counts_14d.money_stress = 1;
        assert_ne!(derive_recommended_switch(&s).recommended_switch_id, SwitchId::Money);
    }

    #[test]
    fn test_relationship_then_environment_order() {
        let mut s = neutral();
        s.flags.relationship_drain = true;
        s.flags.env_mess = true;
        assert_eq!(
            ids(&derive_recommended_switch(&s)),
            (SwitchId::Relationships, SwitchId::Mind)
        );

        s.flags.relationship_drain = false;
        assert_eq!(
            ids(&derive_recommended_switch(&s)),
            (SwitchId::Environment, SwitchId::Time)
        );
    }

    #[test]
    fn test_fallback_uses_chosen_switches() {
        let mut s = neutral();
        assert_eq!(
            ids(&derive_recommended_switch(&s)),
            (SwitchId::Body, SwitchId::Mind)
        );

        s.primary_switch_id = Some(SwitchId::Purpose);
        s.support_switch_id = Some(SwitchId::Identity);
        assert_eq!(
            ids(&derive_recommended_switch(&s)),
            (SwitchId::Purpose, SwitchId::Identity)
        );
    }

    #[test]
    fn test_every_branch_has_reason_and_is_deterministic() {
        let mut cases = Vec::new();
        let mut s = neutral();
        cases.push(s.clone());
        s.flags.env_mess = true;
        cases.push(s.clone());
        s.flags.relationship_drain = true;
        cases.push(s.clone());
        s.flags.money_stress = true;
        cases.push(s.clone());
        s.flags.overwhelm = true;
        cases.push(s.clone());
        s.energy_level = Level::Low;
        cases.push(s.clone());
        s.stress_level = Level::High;
        cases.push(s.clone());

        for case in &cases {
            let first = derive_recommended_switch(case);
            assert!(!first.reason.trim().is_empty());
            assert_eq!(first, derive_recommended_switch(case));
        }
    }

    #[test]
    fn test_mode_restoring_on_low_energy_regardless_of_bias() {
        for bias in [Mode::Training, Mode::Maintaining, Mode::Restoring] {
            let mut s = neutral();
            s.energy_level = Level::Low;
            s.mode_bias = bias;
            assert_eq!(derive_mode(&s), Mode::Restoring);
        }
    }

    #[test]
    fn test_mode_restoring_on_stress_or_overwhelm() {
        let mut s = neutral();
        s.mode_bias = Mode::Maintaining;
        s.stress_level = Level::High;
        assert_eq!(derive_mode(&s), Mode::Restoring);

        s.stress_level = Level::Medium;
        s.flags.overwhelm = true;
        assert_eq!(derive_mode(&s), Mode::Restoring);

        s.flags.overwhelm = false;
        assert_eq!(derive_mode(&s), Mode::Maintaining);

        s.flags.low_energy = true;
        assert_eq!(derive_mode(&s), Mode::Restoring);
    }
}
