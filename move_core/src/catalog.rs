//! Built-in weekly plans for every difficulty level.
//!
//! The catalog is compiled in, built once on first use, and never mutated.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with the beginner, intermediate and hardcore plans
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    let mut plans = HashMap::new();
    let mut info = HashMap::new();

    plans.insert(
        DifficultyLevel::Beginner,
        Plan {
            difficulty: DifficultyLevel::Beginner,
            days: beginner_plan(),
        },
    );
    plans.insert(
        DifficultyLevel::Intermediate,
        Plan {
            difficulty: DifficultyLevel::Intermediate,
            days: intermediate_plan(),
        },
    );
    plans.insert(
        DifficultyLevel::Hardcore,
        Plan {
            difficulty: DifficultyLevel::Hardcore,
            days: hardcore_plan(),
        },
    );

    info.insert(
        DifficultyLevel::Beginner,
        PlanInfo {
            id: DifficultyLevel::Beginner,
            name: "Beginner".into(),
            description: "Perfect for those starting their fitness journey".into(),
            duration: "25-35 min/day".into(),
            level: "3 rounds per exercise".into(),
            icon: "🌱".into(),
            available: true,
        },
    );
    info.insert(
        DifficultyLevel::Intermediate,
        PlanInfo {
            id: DifficultyLevel::Intermediate,
            name: "Intermediate".into(),
            description: "Build strength, stamina & better core control".into(),
            duration: "40-50 min/day".into(),
            level: "4 rounds per exercise".into(),
            icon: "💪".into(),
            available: true,
        },
    );
    info.insert(
        DifficultyLevel::Hardcore,
        PlanInfo {
            id: DifficultyLevel::Hardcore,
            name: "Hardcore".into(),
            description: "Maximum intensity for advanced athletes".into(),
            duration: "50-60 min/day".into(),
            level: "5 rounds per exercise".into(),
            icon: "🔥".into(),
            available: false,
        },
    );

    Catalog { plans, info }
}

impl Catalog {
    /// Plan for a difficulty, falling back to [`DifficultyLevel::FALLBACK`]
    pub fn plan(&self, difficulty: DifficultyLevel) -> &Plan {
        self.plans
            .get(&difficulty)
            .or_else(|| self.plans.get(&DifficultyLevel::FALLBACK))
            .unwrap_or_else(|| empty_plan())
    }

    /// Plan for a raw id; unrecognized ids resolve to the fallback plan
    pub fn plan_by_id(&self, id: &str) -> &Plan {
        self.plan(DifficultyLevel::parse_or_fallback(id))
    }

    /// Day of a plan by tag; unknown tags return `None`
    pub fn day(&self, difficulty: DifficultyLevel, day_id: &str) -> Option<&DayWorkout> {
        self.plan(difficulty).day(day_id)
    }

    pub fn plan_info(&self, difficulty: DifficultyLevel) -> Option<&PlanInfo> {
        self.info.get(&difficulty)
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or an empty list if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for level in DifficultyLevel::ALL {
            let Some(plan) = self.plans.get(&level) else {
                errors.push(format!("Catalog has no {} plan", level));
                continue;
            };

            if !self.info.contains_key(&level) {
                errors.push(format!("Plan '{}' has no metadata", level));
            }

            let day_ids: Vec<DayId> = plan.days.iter().map(|d| d.id).collect();
            if day_ids != DayId::ALL {
                errors.push(format!(
                    "Plan '{}': days must be Monday..Sunday in order, found {:?}",
                    level, day_ids
                ));
            }

            let mut seen = HashSet::new();
            for exercise in plan.exercises() {
                if !seen.insert(exercise.id.as_str()) {
                    errors.push(format!(
                        "Plan '{}': duplicate exercise id '{}'",
                        level, exercise.id
                    ));
                }
                if exercise.name.trim().is_empty() {
                    errors.push(format!(
                        "Plan '{}': exercise '{}' has an empty name",
                        level, exercise.id
                    ));
                }
            }
        }

        errors
    }
}

/// Display label for a section tag; unknown tags are returned unchanged
pub fn section_label(section: &str) -> &str {
    match section {
        "warmup" => "Warm-up",
        "main" => "Main Workout",
        "core" => "Core",
        "cooldown" => "Cooldown",
        other => other,
    }
}

fn empty_plan() -> &'static Plan {
    static EMPTY: Lazy<Plan> = Lazy::new(|| Plan {
        difficulty: DifficultyLevel::FALLBACK,
        days: Vec::new(),
    });
    &EMPTY
}

fn ex(id: &str, name: &str, reps: &str, section: Section) -> Exercise {
    Exercise {
        id: id.into(),
        name: name.into(),
        reps: reps.into(),
        section,
    }
}

fn day(id: DayId, focus: &str, exercises: Vec<Exercise>) -> DayWorkout {
    DayWorkout {
        id,
        focus: focus.into(),
        exercises,
    }
}

// ============================================================================
// Plans
// ============================================================================

fn beginner_plan() -> Vec<DayWorkout> {
    vec![
        day(
            DayId::Monday,
            "Full Body (Beginner Friendly)",
            vec![
                ex("mon-w1", "Jumping Jacks", "1 minute", Section::Warmup),
                ex("mon-w2", "Arm Circles", "30 sec forward + 30 sec backward", Section::Warmup),
                ex("mon-w3", "Standing High Knees (slow)", "1 minute", Section::Warmup),
                ex("mon-w4", "Hip Rotations", "1 minute", Section::Warmup),
                ex("mon-w5", "Shoulder Rolls", "1 minute", Section::Warmup),
                ex("mon-w6", "Standing Toe Touches", "1 minute", Section::Warmup),
                ex("mon-m1", "Bodyweight Squats", "3 × 15 reps", Section::Main),
                ex("mon-m2", "Incline Push-Ups", "3 × 10 reps", Section::Main),
                ex("mon-m3", "Glute Bridges", "3 × 15 reps", Section::Main),
                ex("mon-m4", "Standing March in Place", "3 × 30 seconds", Section::Main),
                ex("mon-m5", "Plank (knees down)", "3 × 20-30 seconds", Section::Main),
                ex("mon-d1", "Standing Quad Stretch", "30 sec each leg", Section::Cooldown),
                ex("mon-d2", "Hamstring Stretch", "30 sec each leg", Section::Cooldown),
                ex("mon-d3", "Chest Stretch", "30 sec", Section::Cooldown),
                ex("mon-d4", "Child's Pose", "1 minute", Section::Cooldown),
                ex("mon-d5", "Deep Breathing", "2 minutes", Section::Cooldown),
            ],
        ),
        day(
            DayId::Tuesday,
            "Lower Body (Legs & Glutes)",
            vec![
                ex("tue-w1", "March in Place", "1 minute", Section::Warmup),
                ex("tue-w2", "Arm Swings", "1 minute", Section::Warmup),
                ex("tue-w3", "Hip Circles", "1 minute", Section::Warmup),
                ex("tue-w4", "Half Squats", "15 reps", Section::Warmup),
                ex("tue-w5", "Leg Swings", "1 minute each leg", Section::Warmup),
                ex("tue-m1", "Bodyweight Squats", "3 × 20 reps", Section::Main),
                ex("tue-m2", "Static Lunges", "3 × 8 reps each leg", Section::Main),
                ex("tue-m3", "Wall Sit", "3 × 25-30 seconds", Section::Main),
                ex("tue-m4", "Glute Bridges", "3 × 15 reps", Section::Main),
                ex("tue-m5", "Calf Raises", "3 × 20 reps", Section::Main),
                ex("tue-d1", "Standing Quad Stretch", "30 sec each leg", Section::Cooldown),
                ex("tue-d2", "Seated Hamstring Stretch", "1 minute", Section::Cooldown),
                ex("tue-d3", "Calf Stretch", "1 minute", Section::Cooldown),
                ex("tue-d4", "Hip Stretch", "30 sec each side", Section::Cooldown),
                ex("tue-d5", "Deep Breathing", "2 minutes", Section::Cooldown),
            ],
        ),
        day(
            DayId::Wednesday,
            "Core & Abs (Beginner)",
            vec![
                ex("wed-w1", "Jumping Jacks (slow)", "1 minute", Section::Warmup),
                ex("wed-w2", "Torso Twists", "1 minute", Section::Warmup),
                ex("wed-w3", "Standing Side Bends", "1 minute", Section::Warmup),
                ex("wed-w4", "Arm Swings", "1 minute", Section::Warmup),
                ex("wed-w5", "Shoulder Rolls", "1 minute", Section::Warmup),
                ex("wed-m1", "Plank (knees allowed)", "3 × 20-30 seconds", Section::Main),
                ex("wed-m2", "Lying Leg Raises", "3 × 10 reps", Section::Main),
                ex("wed-m3", "Russian Twists", "3 × 16 twists", Section::Main),
                ex("wed-m4", "Flutter Kicks", "3 × 20 seconds", Section::Main),
                ex("wed-m5", "Superman Hold", "3 × 20-30 seconds", Section::Main),
                ex("wed-d1", "Cobra Stretch", "1 minute", Section::Cooldown),
                ex("wed-d2", "Cat-Cow Stretch", "1 minute", Section::Cooldown),
                ex("wed-d3", "Lying Spinal Twist", "30 sec each side", Section::Cooldown),
                ex("wed-d4", "Child's Pose", "1 minute", Section::Cooldown),
                ex("wed-d5", "Deep Breathing", "2 minutes", Section::Cooldown),
            ],
        ),
        day(
            DayId::Thursday,
            "Upper Body (Arms, Chest, Shoulders)",
            vec![
                ex("thu-w1", "Arm Circles", "1 minute", Section::Warmup),
                ex("thu-w2", "Shoulder Rolls", "1 minute", Section::Warmup),
                ex("thu-w3", "Wrist Rotations", "1 minute", Section::Warmup),
                ex("thu-w4", "Jumping Jacks", "1 minute", Section::Warmup),
                ex("thu-w5", "Torso Twists", "1 minute", Section::Warmup),
                ex("thu-w6", "Neck Rotations", "1 minute", Section::Warmup),
                ex("thu-m1", "Knee Push-Ups", "3 × 10 reps", Section::Main),
                ex("thu-m2", "Shoulder Taps (knees)", "3 × 16 taps", Section::Main),
                ex("thu-m3", "Tricep Dips (bent knees)", "3 × 10 reps", Section::Main),
                ex("thu-m4", "Pike Hold", "3 × 20 seconds", Section::Main),
                ex("thu-m5", "Plank", "3 × 20-30 seconds", Section::Main),
                ex("thu-d1", "Chest Stretch", "30 sec", Section::Cooldown),
                ex("thu-d2", "Triceps Stretch", "30 sec each arm", Section::Cooldown),
                ex("thu-d3", "Shoulder Stretch", "30 sec each arm", Section::Cooldown),
                ex("thu-d4", "Cobra Pose", "1 minute", Section::Cooldown),
                ex("thu-d5", "Deep Breathing", "2 minutes", Section::Cooldown),
            ],
        ),
        day(
            DayId::Friday,
            "Full Body Light Cardio",
            vec![
                ex("fri-w1", "March in Place", "1 minute", Section::Warmup),
                ex("fri-w2", "Arm Swings", "1 minute", Section::Warmup),
                ex("fri-w3", "High Knees (slow)", "1 minute", Section::Warmup),
                ex("fri-w4", "Hip Circles", "1 minute", Section::Warmup),
                ex("fri-w5", "Shoulder Rolls", "1 minute", Section::Warmup),
                ex("fri-w6", "Light Stretch", "1 minute", Section::Warmup),
                ex("fri-m1", "Jumping Jacks", "3 × 40 sec work, 20 sec rest", Section::Main),
                ex("fri-m2", "Bodyweight Squats", "3 × 40 sec work, 20 sec rest", Section::Main),
                ex("fri-m3", "Incline Push-Ups", "3 × 40 sec work, 20 sec rest", Section::Main),
                ex("fri-m4", "Standing Knee Raises", "3 × 40 sec work, 20 sec rest", Section::Main),
                ex("fri-m5", "Plank Hold", "3 × 40 sec work, 20 sec rest", Section::Main),
                ex("fri-d1", "Standing Forward Fold", "1 minute", Section::Cooldown),
                ex("fri-d2", "Hamstring Stretch", "1 minute", Section::Cooldown),
                ex("fri-d3", "Shoulder Stretch", "1 minute", Section::Cooldown),
                ex("fri-d4", "Butterfly Stretch", "1 minute", Section::Cooldown),
                ex("fri-d5", "Deep Breathing", "2 minutes", Section::Cooldown),
            ],
        ),
        day(
            DayId::Saturday,
            "Core + Stretch (Holiday Day)",
            vec![
                ex("sat-w1", "Arm Circles", "1 minute", Section::Warmup),
                ex("sat-w2", "Torso Twists", "1 minute", Section::Warmup),
                ex("sat-w3", "Standing March", "1 minute", Section::Warmup),
                ex("sat-w4", "Side Bends", "1 minute", Section::Warmup),
                ex("sat-w5", "Ankle Rotations", "1 minute", Section::Warmup),
                ex("sat-m1", "Bird-Dog", "3 × 8 reps each side", Section::Main),
                ex("sat-m2", "Glute Bridges", "3 × 15 reps", Section::Main),
                ex("sat-m3", "Side Plank (knees)", "3 × 20 sec each side", Section::Main),
                ex("sat-m4", "Lying Leg Raises", "3 × 10 reps", Section::Main),
                ex("sat-m5", "Superman Hold", "3 × 30 seconds", Section::Main),
                ex("sat-d1", "Seated Forward Fold", "1 minute", Section::Cooldown),
                ex("sat-d2", "Butterfly Stretch", "1 minute", Section::Cooldown),
                ex("sat-d3", "Cobra Pose", "1 minute", Section::Cooldown),
                ex("sat-d4", "Shoulder Stretch", "1 minute", Section::Cooldown),
                ex("sat-d5", "Deep Breathing / Relaxation", "3-5 minutes", Section::Cooldown),
            ],
        ),
        day(
            DayId::Sunday,
            "Rest & Recovery",
            vec![
                ex("sun-w1", "Neck Rolls", "1 minute", Section::Warmup),
                ex("sun-w2", "Shoulder Rolls", "1 minute", Section::Warmup),
                ex("sun-m1", "Standing Toe Touch", "1 minute", Section::Main),
                ex("sun-m2", "Hip Circles", "1 minute", Section::Main),
                ex("sun-m3", "Cat-Cow Stretch", "1 minute", Section::Main),
                ex("sun-m4", "Child's Pose", "1 minute", Section::Main),
                ex("sun-m5", "Butterfly Stretch", "1 minute", Section::Main),
                ex("sun-m6", "Hamstring Stretch", "1 minute", Section::Main),
                ex("sun-m7", "Chest Stretch", "1 minute", Section::Main),
                ex("sun-d1", "Deep Breathing / Meditation", "5-10 minutes", Section::Cooldown),
            ],
        ),
    ]
}

fn intermediate_plan() -> Vec<DayWorkout> {
    vec![
        day(
            DayId::Monday,
            "Full Body Strength + Cardio",
            vec![
                ex("mon-w1", "Jumping Jacks", "1 minute", Section::Warmup),
                ex("mon-w2", "High Knees", "1 minute", Section::Warmup),
                ex("mon-w3", "Arm Circles", "1 minute", Section::Warmup),
                ex("mon-w4", "Hip Rotations", "1 minute", Section::Warmup),
                ex("mon-w5", "Leg Swings", "1 minute each leg", Section::Warmup),
                ex("mon-w6", "Shoulder Rolls", "1 minute", Section::Warmup),
                ex("mon-m1", "Jump Squats", "4 × 15 reps", Section::Main),
                ex("mon-m2", "Push-Ups", "4 × 12 reps", Section::Main),
                ex("mon-m3", "Reverse Lunges", "4 × 10 reps each leg", Section::Main),
                ex("mon-m4", "Mountain Climbers", "4 × 30 seconds", Section::Main),
                ex("mon-m5", "Plank", "4 × 40 seconds", Section::Main),
                ex("mon-d1", "Standing Quad Stretch", "30 sec each leg", Section::Cooldown),
                ex("mon-d2", "Hamstring Stretch", "30 sec each leg", Section::Cooldown),
                ex("mon-d3", "Chest Stretch", "30 sec", Section::Cooldown),
                ex("mon-d4", "Child's Pose", "1 minute", Section::Cooldown),
                ex("mon-d5", "Deep Breathing", "2-3 minutes", Section::Cooldown),
            ],
        ),
        day(
            DayId::Tuesday,
            "Legs & Glutes (Strength Focus)",
            vec![
                ex("tue-w1", "March in Place", "1 minute", Section::Warmup),
                ex("tue-w2", "Jumping Jacks", "1 minute", Section::Warmup),
                ex("tue-w3", "Hip Circles", "1 minute", Section::Warmup),
                ex("tue-w4", "Bodyweight Squats", "20 reps", Section::Warmup),
                ex("tue-w5", "Walking Lunges", "10 reps each leg", Section::Warmup),
                ex("tue-m1", "Squats", "4 × 25 reps", Section::Main),
                ex("tue-m2", "Bulgarian Split Squats", "4 × 10 reps each leg", Section::Main),
                ex("tue-m3", "Wall Sit", "4 × 40-45 seconds", Section::Main),
                ex("tue-m4", "Glute Bridges", "4 × 20 reps", Section::Main),
                ex("tue-m5", "Calf Raises", "4 × 30 reps", Section::Main),
                ex("tue-d1", "Quad Stretch", "30 sec each leg", Section::Cooldown),
                ex("tue-d2", "Seated Hamstring Stretch", "1 minute", Section::Cooldown),
                ex("tue-d3", "Hip Flexor Stretch", "30 sec each side", Section::Cooldown),
                ex("tue-d4", "Calf Stretch", "1 minute", Section::Cooldown),
                ex("tue-d5", "Deep Breathing", "2 minutes", Section::Cooldown),
            ],
        ),
        day(
            DayId::Wednesday,
            "Core & Abs (Intermediate)",
            vec![
                ex("wed-w1", "Jumping Jacks", "1 minute", Section::Warmup),
                ex("wed-w2", "Torso Twists", "1 minute", Section::Warmup),
                ex("wed-w3", "Standing Side Bends", "1 minute", Section::Warmup),
                ex("wed-w4", "Arm Swings", "1 minute", Section::Warmup),
                ex("wed-w5", "Shoulder Rolls", "1 minute", Section::Warmup),
                ex("wed-m1", "Plank", "4 × 45 seconds", Section::Main),
                ex("wed-m2", "Leg Raises", "4 × 15 reps", Section::Main),
                ex("wed-m3", "Bicycle Crunches", "4 × 20 reps", Section::Main),
                ex("wed-m4", "Flutter Kicks", "4 × 40 seconds", Section::Main),
                ex("wed-m5", "Superman Hold", "4 × 40 seconds", Section::Main),
                ex("wed-d1", "Cobra Stretch", "1 minute", Section::Cooldown),
                ex("wed-d2", "Cat-Cow Stretch", "1 minute", Section::Cooldown),
                ex("wed-d3", "Lying Spinal Twist", "30 sec each side", Section::Cooldown),
                ex("wed-d4", "Child's Pose", "1 minute", Section::Cooldown),
                ex("wed-d5", "Deep Breathing", "2 minutes", Section::Cooldown),
            ],
        ),
        day(
            DayId::Thursday,
            "Upper Body & Core",
            vec![
                ex("thu-w1", "Arm Circles", "1 minute", Section::Warmup),
                ex("thu-w2", "Shoulder Rolls", "1 minute", Section::Warmup),
                ex("thu-w3", "Wrist Rotations", "1 minute", Section::Warmup),
                ex("thu-w4", "Jumping Jacks", "1 minute", Section::Warmup),
                ex("thu-w5", "Torso Twists", "1 minute", Section::Warmup),
                ex("thu-w6", "Neck Rotations", "1 minute", Section::Warmup),
                ex("thu-m1", "Push-Ups", "4 × 15 reps", Section::Main),
                ex("thu-m2", "Tricep Dips", "4 × 15 reps", Section::Main),
                ex("thu-m3", "Pike Push-Ups", "4 × 10 reps", Section::Main),
                ex("thu-m4", "Shoulder Taps", "4 × 24 taps", Section::Main),
                ex("thu-m5", "Forearm Plank", "4 × 45 seconds", Section::Main),
                ex("thu-d1", "Shoulder Stretch", "30 sec each arm", Section::Cooldown),
                ex("thu-d2", "Triceps Stretch", "30 sec each arm", Section::Cooldown),
                ex("thu-d3", "Chest Stretch", "30 sec", Section::Cooldown),
                ex("thu-d4", "Cobra Pose", "1 minute", Section::Cooldown),
                ex("thu-d5", "Deep Breathing", "2 minutes", Section::Cooldown),
            ],
        ),
        day(
            DayId::Friday,
            "Full Body HIIT (Fat Burn)",
            vec![
                ex("fri-w1", "Jumping Jacks", "1 minute", Section::Warmup),
                ex("fri-w2", "High Knees", "1 minute", Section::Warmup),
                ex("fri-w3", "Arm Swings", "1 minute", Section::Warmup),
                ex("fri-w4", "Hip Circles", "1 minute", Section::Warmup),
                ex("fri-w5", "Dynamic Toe Touches", "1 minute", Section::Warmup),
                ex("fri-m1", "Burpees", "4 × 40 sec work, 20 sec rest", Section::Main),
                ex("fri-m2", "Jump Squats", "4 × 40 sec work, 20 sec rest", Section::Main),
                ex("fri-m3", "Push-Ups", "4 × 40 sec work, 20 sec rest", Section::Main),
                ex("fri-m4", "Plank Jacks", "4 × 40 sec work, 20 sec rest", Section::Main),
                ex("fri-m5", "Mountain Climbers", "4 × 40 sec work, 20 sec rest", Section::Main),
                ex("fri-d1", "Standing Forward Fold", "1 minute", Section::Cooldown),
                ex("fri-d2", "Hamstring Stretch", "1 minute", Section::Cooldown),
                ex("fri-d3", "Butterfly Stretch", "1 minute", Section::Cooldown),
                ex("fri-d4", "Shoulder Stretch", "1 minute", Section::Cooldown),
                ex("fri-d5", "Deep Breathing", "2 minutes", Section::Cooldown),
            ],
        ),
        day(
            DayId::Saturday,
            "Core + Stability (Holiday Day)",
            vec![
                ex("sat-w1", "Arm Circles", "1 minute", Section::Warmup),
                ex("sat-w2", "Hip Circles", "1 minute", Section::Warmup),
                ex("sat-w3", "Standing March", "1 minute", Section::Warmup),
                ex("sat-w4", "Side Bends", "1 minute", Section::Warmup),
                ex("sat-w5", "Ankle Rotations", "1 minute", Section::Warmup),
                ex("sat-m1", "Bird-Dog", "4 × 10 reps each side", Section::Main),
                ex("sat-m2", "Side Plank", "4 × 30 seconds each side", Section::Main),
                ex("sat-m3", "Hollow Hold", "4 × 30-35 seconds", Section::Main),
                ex("sat-m4", "Glute Bridge March", "4 × 20 reps", Section::Main),
                ex("sat-m5", "Superman Hold", "4 × 45 seconds", Section::Main),
                ex("sat-d1", "Seated Forward Fold", "1 minute", Section::Cooldown),
                ex("sat-d2", "Butterfly Stretch", "1 minute", Section::Cooldown),
                ex("sat-d3", "Cobra Pose", "1 minute", Section::Cooldown),
                ex("sat-d4", "Hip Opener Stretch", "1 minute each side", Section::Cooldown),
                ex("sat-d5", "Deep Breathing / Relaxation", "4-5 minutes", Section::Cooldown),
            ],
        ),
        day(
            DayId::Sunday,
            "Active Recovery & Mobility",
            vec![
                ex("sun-w1", "Neck Rolls", "1 minute", Section::Warmup),
                ex("sun-w2", "Shoulder Rolls", "1 minute", Section::Warmup),
                ex("sun-m1", "Cat-Cow Stretch", "1 minute", Section::Main),
                ex("sun-m2", "Child's Pose", "1 minute", Section::Main),
                ex("sun-m3", "Cobra Stretch", "1 minute", Section::Main),
                ex("sun-m4", "Seated Spinal Twist", "1 minute each side", Section::Main),
                ex("sun-m5", "Standing Forward Fold", "1 minute", Section::Main),
                ex("sun-m6", "Hip Flexor Stretch", "1 minute each leg", Section::Main),
                ex("sun-m7", "Butterfly Stretch", "1 minute", Section::Main),
                ex("sun-d1", "Deep Breathing / Meditation", "5-10 minutes", Section::Cooldown),
            ],
        ),
    ]
}

fn hardcore_plan() -> Vec<DayWorkout> {
    vec![
        day(
            DayId::Monday,
            "Coming Soon - Hardcore Full Body",
            vec![
                ex("mon-m1", "Hardcore plan coming soon!", "Stay tuned", Section::Main),
            ],
        ),
        day(
            DayId::Tuesday,
            "Coming Soon - Hardcore Legs",
            vec![
                ex("tue-m1", "Hardcore plan coming soon!", "Stay tuned", Section::Main),
            ],
        ),
        day(
            DayId::Wednesday,
            "Coming Soon - Hardcore Core",
            vec![
                ex("wed-m1", "Hardcore plan coming soon!", "Stay tuned", Section::Main),
            ],
        ),
        day(
            DayId::Thursday,
            "Coming Soon - Hardcore Upper",
            vec![
                ex("thu-m1", "Hardcore plan coming soon!", "Stay tuned", Section::Main),
            ],
        ),
        day(
            DayId::Friday,
            "Coming Soon - Hardcore HIIT",
            vec![
                ex("fri-m1", "Hardcore plan coming soon!", "Stay tuned", Section::Main),
            ],
        ),
        day(
            DayId::Saturday,
            "Coming Soon - Hardcore Core",
            vec![
                ex("sat-m1", "Hardcore plan coming soon!", "Stay tuned", Section::Main),
            ],
        ),
        day(
            DayId::Sunday,
            "Coming Soon - Hardcore Recovery",
            vec![
                ex("sun-m1", "Hardcore plan coming soon!", "Stay tuned", Section::Main),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.plans.len(), 3);
        assert_eq!(catalog.info.len(), 3);
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_beginner_monday_has_sixteen_exercises() {
        let catalog = get_default_catalog();
        let monday = catalog.day(DifficultyLevel::Beginner, "monday").unwrap();
        assert_eq!(monday.exercises.len(), 16);
        assert_eq!(monday.day_name(), "Monday");
        assert_eq!(monday.exercises[6].id, "mon-m1");
        assert_eq!(monday.exercises[6].name, "Bodyweight Squats");
    }

    #[test]
    fn test_unknown_plan_id_falls_back() {
        let catalog = get_default_catalog();
        let plan = catalog.plan_by_id("ultra");
        assert_eq!(plan.difficulty, DifficultyLevel::Intermediate);
        assert_eq!(plan.days.len(), 7);
    }

    #[test]
    fn test_missing_fallback_plan_resolves_to_empty_plan() {
        let mut catalog = build_default_catalog();
        catalog.plans.clear();

        let plan = catalog.plan(DifficultyLevel::Beginner);
        assert_eq!(plan.difficulty, DifficultyLevel::FALLBACK);
        assert!(plan.days.is_empty());
        assert!(catalog.day(DifficultyLevel::Beginner, "monday").is_none());
    }

    #[test]
    fn test_unknown_day_is_not_found() {
        let catalog = get_default_catalog();
        assert!(catalog.day(DifficultyLevel::Beginner, "someday").is_none());
    }

    #[test]
    fn test_hardcore_is_not_available() {
        let catalog = get_default_catalog();
        let info = catalog.plan_info(DifficultyLevel::Hardcore).unwrap();
        assert!(!info.available);
        assert_eq!(catalog.plan(DifficultyLevel::Hardcore).total_exercises(), 7);
    }

    #[test]
    fn test_section_labels() {
        assert_eq!(section_label("warmup"), "Warm-up");
        assert_eq!(section_label("main"), "Main Workout");
        assert_eq!(section_label(Section::Cooldown.as_str()), "Cooldown");
        assert_eq!(section_label("stretch"), "stretch");
    }

    #[test]
    fn test_validate_flags_duplicate_ids() {
        let mut catalog = build_default_catalog();
        let plan = catalog.plans.get_mut(&DifficultyLevel::Beginner).unwrap();
        let duplicate = plan.days[0].exercises[0].clone();
        plan.days[1].exercises.push(duplicate);

        let errors = catalog.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("duplicate exercise id 'mon-w1'"));
    }
}
