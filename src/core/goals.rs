use serde::{Deserialize, Serialize};

pub const MILESTONES: [u32; 4] = [25, 50, 75, 100];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub contributions: Vec<f64>,
    /// Percent thresholds already reached; never cleared once set.
    #[serde(default)]
    pub milestones_reached: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub current_amount: f64,
    pub progress_percentage: f64,
    pub remaining_amount: f64,
    pub completed: bool,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_amount: f64) -> Self {
        Self {
            name: name.into(),
            target_amount,
            contributions: Vec::new(),
            milestones_reached: Vec::new(),
        }
    }

    pub fn current_amount(&self) -> f64 {
        self.contributions.iter().sum()
    }

    pub fn progress(&self) -> GoalProgress {
        let current_amount = self.current_amount();
        let raw_percentage = raw_percentage(current_amount, self.target_amount);
        GoalProgress {
            current_amount,
            progress_percentage: raw_percentage.min(100.0),
            remaining_amount: (self.target_amount - current_amount).max(0.0),
            completed: raw_percentage >= 100.0,
        }
    }

    /// Records a contribution and latches any milestone it crosses.
    pub fn add_contribution(&mut self, amount: f64) {
        self.contributions.push(amount);
        let percentage = raw_percentage(self.current_amount(), self.target_amount);
        for milestone in MILESTONES {
            if percentage >= milestone as f64 && !self.milestones_reached.contains(&milestone) {
                self.milestones_reached.push(milestone);
            }
        }
        self.milestones_reached.sort_unstable();
    }
}

fn raw_percentage(current: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 100.0;
    }
    current / target * 100.0
}
