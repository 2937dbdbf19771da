use serde::{Deserialize, Serialize};

/// Training program archetype chosen on the category screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgramCategory {
  #[serde(rename = "marathon")]
  Marathon,
  #[serde(rename = "half_marathon")]
  HalfMarathon,
  #[serde(rename = "15k")]
  FifteenK,
  #[serde(rename = "10k")]
  TenK,
  #[serde(rename = "5k")]
  FiveK,
  #[serde(rename = "c25k")]
  CouchTo5k,
  #[serde(rename = "base_building")]
  BaseBuilding,
  #[serde(rename = "speed")]
  Speed,
  #[serde(rename = "run_walk")]
  RunWalk,
  #[serde(rename = "weight_loss")]
  WeightLoss,
}

/// Display metadata for one category card
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
  pub id: ProgramCategory,
  pub label: &'static str,
  pub description: &'static str,
}

impl ProgramCategory {
  /// Every category in the order the selection screen lists them
  pub const ALL: [ProgramCategory; 10] = [
    Self::Marathon,
    Self::HalfMarathon,
    Self::FifteenK,
    Self::TenK,
    Self::FiveK,
    Self::CouchTo5k,
    Self::BaseBuilding,
    Self::Speed,
    Self::RunWalk,
    Self::WeightLoss,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Marathon => "marathon",
      Self::HalfMarathon => "half_marathon",
      Self::FifteenK => "15k",
      Self::TenK => "10k",
      Self::FiveK => "5k",
      Self::CouchTo5k => "c25k",
      Self::BaseBuilding => "base_building",
      Self::Speed => "speed",
      Self::RunWalk => "run_walk",
      Self::WeightLoss => "weight_loss",
    }
  }

  pub fn info(&self) -> CategoryInfo {
    let (label, description) = match self {
      Self::Marathon => ("Full Marathon", "26.2 miles. The ultimate endurance test."),
      Self::HalfMarathon => (
        "Half Marathon",
        "13.1 miles. The perfect blend of speed and stamina.",
      ),
      Self::FifteenK => ("15K Training", "Step up from the 10K distance."),
      Self::TenK => ("10K Training", "Build speed endurance for 6.2 miles."),
      Self::FiveK => ("5K Training", "Fast, fun, and furious speed work."),
      Self::CouchTo5k => ("Couch to 5K", "Go from zero to running 30 minutes straight."),
      Self::BaseBuilding => ("Base Building", "Increase aerobic capacity without burnout."),
      Self::Speed => ("Speed & PRs", "Intervals and track work to smash your PB."),
      Self::RunWalk => ("Run/Walk Method", "Sustainable intervals for endurance."),
      Self::WeightLoss => ("Weight Loss", "Burn calories with heart-rate focused runs."),
    };

    CategoryInfo {
      id: *self,
      label,
      description,
    }
  }
}

impl std::fmt::Display for ProgramCategory {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for ProgramCategory {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|c| c.as_str() == s)
      .ok_or_else(|| format!("Unknown program category: {}", s))
  }
}

/// The full category catalog, in display order
pub fn catalog() -> Vec<CategoryInfo> {
  ProgramCategory::ALL.iter().map(|c| c.info()).collect()
}
