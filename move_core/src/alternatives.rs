//! Easier and harder substitutes offered when swapping an exercise.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whether an alternative regresses or progresses the original movement
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlternativeDifficulty {
    Easier,
    Harder,
}

/// A substitute exercise for a plan entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExerciseAlternative {
    pub name: String,
    pub difficulty: AlternativeDifficulty,
    pub reps: String,
}

static ALTERNATIVES: Lazy<HashMap<&'static str, Vec<ExerciseAlternative>>> =
    Lazy::new(build_alternatives);

/// Alternatives for an exercise name; empty when none are known
pub fn alternatives_for(exercise_name: &str) -> &'static [ExerciseAlternative] {
    ALTERNATIVES
        .get(exercise_name)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn alt(name: &str, difficulty: AlternativeDifficulty, reps: &str) -> ExerciseAlternative {
    ExerciseAlternative {
        name: name.into(),
        difficulty,
        reps: reps.into(),
    }
}

fn build_alternatives() -> HashMap<&'static str, Vec<ExerciseAlternative>> {
    let mut table = HashMap::new();

    table.insert(
        "Bodyweight Squats",
        vec![
            alt("Chair Squats", AlternativeDifficulty::Easier, "3 × 12 reps"),
            alt("Jump Squats", AlternativeDifficulty::Harder, "3 × 10 reps"),
        ],
    );
    table.insert(
        "Incline Push-Ups",
        vec![
            alt("Wall Push-Ups", AlternativeDifficulty::Easier, "3 × 12 reps"),
            alt("Standard Push-Ups", AlternativeDifficulty::Harder, "3 × 8 reps"),
        ],
    );
    table.insert(
        "Knee Push-Ups",
        vec![
            alt("Wall Push-Ups", AlternativeDifficulty::Easier, "3 × 15 reps"),
            alt("Standard Push-Ups", AlternativeDifficulty::Harder, "3 × 8 reps"),
        ],
    );
    table.insert(
        "Glute Bridges",
        vec![
            alt("Glute Squeeze", AlternativeDifficulty::Easier, "3 × 20 reps"),
            alt("Single-Leg Glute Bridge", AlternativeDifficulty::Harder, "3 × 8 each leg"),
        ],
    );
    table.insert(
        "Plank (knees down)",
        vec![
            alt("Forearm Plank on Knees", AlternativeDifficulty::Easier, "3 × 15-20 seconds"),
            alt("High Plank", AlternativeDifficulty::Harder, "3 × 30-45 seconds"),
        ],
    );
    table.insert(
        "Plank (knees allowed)",
        vec![
            alt("Forearm Plank on Knees", AlternativeDifficulty::Easier, "3 × 15-20 seconds"),
            alt("High Plank", AlternativeDifficulty::Harder, "3 × 30-45 seconds"),
        ],
    );
    table.insert(
        "Plank",
        vec![
            alt("Forearm Plank on Knees", AlternativeDifficulty::Easier, "3 × 15-20 seconds"),
            alt("Plank with Shoulder Taps", AlternativeDifficulty::Harder, "3 × 30 seconds"),
        ],
    );
    table.insert(
        "Plank Hold",
        vec![
            alt("Forearm Plank on Knees", AlternativeDifficulty::Easier, "3 × 30 seconds"),
            alt("Plank with Leg Raises", AlternativeDifficulty::Harder, "3 × 40 seconds"),
        ],
    );
    table.insert(
        "Static Lunges",
        vec![
            alt("Assisted Lunges (hold wall)", AlternativeDifficulty::Easier, "3 × 6 each leg"),
            alt("Walking Lunges", AlternativeDifficulty::Harder, "3 × 10 each leg"),
        ],
    );
    table.insert(
        "Wall Sit",
        vec![
            alt("Half Wall Sit", AlternativeDifficulty::Easier, "3 × 15-20 seconds"),
            alt("Wall Sit with Calf Raises", AlternativeDifficulty::Harder, "3 × 30 seconds"),
        ],
    );
    table.insert(
        "Russian Twists",
        vec![
            alt("Seated Twists", AlternativeDifficulty::Easier, "3 × 12 twists"),
            alt("Weighted Russian Twists", AlternativeDifficulty::Harder, "3 × 20 twists"),
        ],
    );
    table.insert(
        "Leg Raises",
        vec![
            alt("Bent Knee Raises", AlternativeDifficulty::Easier, "3 × 8 reps"),
            alt("Straight Leg Raises", AlternativeDifficulty::Harder, "3 × 12 reps"),
        ],
    );
    table.insert(
        "Lying Leg Raises",
        vec![
            alt("Bent Knee Raises", AlternativeDifficulty::Easier, "3 × 8 reps"),
            alt("Hanging Leg Raises", AlternativeDifficulty::Harder, "3 × 8 reps"),
        ],
    );
    table.insert(
        "Flutter Kicks",
        vec![
            alt("Bent Knee Flutter", AlternativeDifficulty::Easier, "3 × 15 seconds"),
            alt("Scissor Kicks", AlternativeDifficulty::Harder, "3 × 25 seconds"),
        ],
    );
    table.insert(
        "Superman Hold",
        vec![
            alt("Bird-Dog Hold", AlternativeDifficulty::Easier, "3 × 15-20 seconds"),
            alt("Superman Pulses", AlternativeDifficulty::Harder, "3 × 15 reps"),
        ],
    );
    table.insert(
        "Tricep Dips (bent knees)",
        vec![
            alt("Assisted Tricep Dips", AlternativeDifficulty::Easier, "3 × 8 reps"),
            alt("Straight Leg Dips", AlternativeDifficulty::Harder, "3 × 12 reps"),
        ],
    );
    table.insert(
        "Shoulder Taps (knees)",
        vec![
            alt("Wall Shoulder Taps", AlternativeDifficulty::Easier, "3 × 12 taps"),
            alt("High Plank Shoulder Taps", AlternativeDifficulty::Harder, "3 × 20 taps"),
        ],
    );
    table.insert(
        "Bird-Dog",
        vec![
            alt("Bird-Dog (arm only)", AlternativeDifficulty::Easier, "3 × 6 each side"),
            alt("Bird-Dog with hold", AlternativeDifficulty::Harder, "3 × 10 each side"),
        ],
    );
    table.insert(
        "Side Plank (knees)",
        vec![
            alt("Side Lying Leg Lift", AlternativeDifficulty::Easier, "3 × 15 sec each side"),
            alt("Full Side Plank", AlternativeDifficulty::Harder, "3 × 25 sec each side"),
        ],
    );
    table.insert(
        "Calf Raises",
        vec![
            alt("Seated Calf Raises", AlternativeDifficulty::Easier, "3 × 15 reps"),
            alt("Single-Leg Calf Raises", AlternativeDifficulty::Harder, "3 × 12 each leg"),
        ],
    );
    table.insert(
        "Jumping Jacks",
        vec![
            alt("Step Jacks", AlternativeDifficulty::Easier, "1 minute"),
            alt("Star Jumps", AlternativeDifficulty::Harder, "1 minute"),
        ],
    );
    table.insert(
        "Jumping Jacks (slow)",
        vec![
            alt("Step Jacks", AlternativeDifficulty::Easier, "1 minute"),
            alt("Regular Jumping Jacks", AlternativeDifficulty::Harder, "1 minute"),
        ],
    );
    table.insert(
        "High Knees (slow)",
        vec![
            alt("March in Place", AlternativeDifficulty::Easier, "1 minute"),
            alt("High Knees", AlternativeDifficulty::Harder, "1 minute"),
        ],
    );

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DifficultyLevel;

    #[test]
    fn test_known_exercise_has_easier_and_harder() {
        let alts = alternatives_for("Bodyweight Squats");
        assert_eq!(alts.len(), 2);
        assert_eq!(alts[0].name, "Chair Squats");
        assert_eq!(alts[0].difficulty, AlternativeDifficulty::Easier);
        assert_eq!(alts[1].difficulty, AlternativeDifficulty::Harder);
    }

    #[test]
    fn test_every_entry_matches_a_plan_exercise() {
        let catalog = crate::catalog::get_default_catalog();
        let names: std::collections::HashSet<&str> = DifficultyLevel::ALL
            .iter()
            .flat_map(|level| catalog.plan(*level).exercises())
            .map(|exercise| exercise.name.as_str())
            .collect();

        let mut unmatched: Vec<_> = ALTERNATIVES
            .keys()
            .filter(|name| !names.contains(*name))
            .collect();
        unmatched.sort();
        assert!(unmatched.is_empty(), "No plan exercise named {:?}", unmatched);
    }

    #[test]
    fn test_renamed_plan_entries_have_alternatives() {
        assert_eq!(alternatives_for("Incline Push-Ups")[0].name, "Wall Push-Ups");
        assert_eq!(alternatives_for("Plank (knees down)").len(), 2);
        assert_eq!(alternatives_for("Side Plank (knees)")[1].name, "Full Side Plank");
    }

    #[test]
    fn test_unknown_exercise_has_no_alternatives() {
        assert!(alternatives_for("Underwater Basket Weaving").is_empty());
    }
}
