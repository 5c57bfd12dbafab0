use serde::{Deserialize, Serialize};

/// Annual return assumptions in percent.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestRatePresets {
    pub conservative: f64,
    pub average: f64,
    pub optimistic: f64,
}

impl Default for InterestRatePresets {
    fn default() -> Self {
        Self {
            conservative: 4.0,
            average: 7.0,
            optimistic: 10.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RiskProfile {
    Conservative,
    ModeratelyConservative,
    Moderate,
    ModeratelyAggressive,
    Aggressive,
}

impl InterestRatePresets {
    /// Intermediate profiles sit halfway between their neighbouring presets.
    pub fn recommended_rate(&self, profile: Option<RiskProfile>) -> f64 {
        match profile {
            Some(RiskProfile::Conservative) => self.conservative,
            Some(RiskProfile::ModeratelyConservative) => (self.conservative + self.average) / 2.0,
            Some(RiskProfile::Moderate) | None => self.average,
            Some(RiskProfile::ModeratelyAggressive) => (self.average + self.optimistic) / 2.0,
            Some(RiskProfile::Aggressive) => self.optimistic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommended_rate_follows_profile() {
        let presets = InterestRatePresets::default();
        assert_eq!(presets.recommended_rate(None), 7.0);
        assert_eq!(presets.recommended_rate(Some(RiskProfile::Conservative)), 4.0);
        assert_eq!(
            presets.recommended_rate(Some(RiskProfile::ModeratelyConservative)),
            5.5
        );
        assert_eq!(presets.recommended_rate(Some(RiskProfile::Moderate)), 7.0);
        assert_eq!(
            presets.recommended_rate(Some(RiskProfile::ModeratelyAggressive)),
            8.5
        );
        assert_eq!(presets.recommended_rate(Some(RiskProfile::Aggressive)), 10.0);
    }

    #[test]
    fn custom_presets_are_respected() {
        let presets = InterestRatePresets {
            conservative: 3.0,
            average: 5.0,
            optimistic: 9.0,
        };
        assert_eq!(
            presets.recommended_rate(Some(RiskProfile::ModeratelyAggressive)),
            7.0
        );
    }
}
