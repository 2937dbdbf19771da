pub mod category;
pub mod plan;
pub mod preferences;

pub use category::{catalog, CategoryInfo, ProgramCategory};
pub use plan::{DayName, DayPlan, TrainingPlan, WeeklyPlan, Workout, WorkoutType};
pub use preferences::{
  ExperienceLevel, FitnessLevel, GoalType, PreferenceError, PreferenceField, PreferencesUpdate,
  UserPreferences,
};
