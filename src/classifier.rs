//! Exercise classification
//!
//! Maps an exercise name to a body-region / movement category using an ordered
//! keyword table. The first group with a matching keyword wins, so lower-body
//! keywords take precedence over push and pull.

use crate::types::Category;

/// Keyword group evaluated in order
pub struct ClassifierRule {
    pub category: Category,
    /// Lower-case substrings
    pub keywords: &'static [&'static str],
}

/// Classification rules in precedence order
pub const RULES: [ClassifierRule; 3] = [
    ClassifierRule {
        category: Category::Lower,
        keywords: &[
            "squat",
            "deadlift",
            "lunge",
            "leg",
            "hamstring",
            "calf",
            "calves",
            "hip thrust",
            "hip-thrust",
            "glute",
            "rdl",
            "good morning",
            "good-morning",
        ],
    },
    ClassifierRule {
        category: Category::Push,
        keywords: &[
            "bench",
            "overhead press",
            "shoulder press",
            "incline",
            "dip",
            "push",
            "tricep",
        ],
    },
    ClassifierRule {
        category: Category::Pull,
        keywords: &[
            "row",
            "pulldown",
            "pull-down",
            "pull-up",
            "pull up",
            "pullup",
            "curl",
            "face pull",
            "face-pull",
            "shrug",
            "chin",
        ],
    },
];

/// Stateless exercise classifier
pub struct Classifier;

impl Classifier {
    /// Category for an exercise name; `Other` when no rule matches
    pub fn classify(exercise: &str) -> Category {
        let name = exercise.to_lowercase();
        RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| name.contains(k)))
            .map(|rule| rule.category)
            .unwrap_or(Category::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_table() {
        let cases = [
            ("Back Squat", Category::Lower),
            ("Romanian Deadlift", Category::Lower),
            ("Walking Lunge", Category::Lower),
            ("Leg Press", Category::Lower),
            ("Seated Calf Raise", Category::Lower),
            ("Barbell Hip Thrust", Category::Lower),
            ("DB RDL", Category::Lower),
            ("Good Morning", Category::Lower),
            ("Bench Press", Category::Push),
            ("Overhead Press", Category::Push),
            ("Seated Shoulder Press", Category::Push),
            ("Incline Dumbbell Fly", Category::Push),
            ("Weighted Dip", Category::Push),
            ("Push-Up", Category::Push),
            ("Tricep Pushdown", Category::Push),
            ("Barbell Row", Category::Pull),
            ("Lat Pulldown", Category::Pull),
            ("Pull-Up", Category::Pull),
            ("Hammer Curl", Category::Pull),
            ("Cable Face Pull", Category::Pull),
            ("Dumbbell Shrug", Category::Pull),
            ("Chin-Up", Category::Pull),
            ("Plank", Category::Other),
            ("Farmer's Carry", Category::Other),
            ("", Category::Other),
        ];

        for (name, expected) in cases {
            assert_eq!(Classifier::classify(name), expected, "{name}");
        }
    }

    #[test]
    fn test_lower_takes_precedence() {
        assert_eq!(Classifier::classify("Squat Row Complex"), Category::Lower);
        assert_eq!(Classifier::classify("Lying Leg Curl"), Category::Lower);
    }

    #[test]
    fn test_push_takes_precedence_over_pull() {
        assert_eq!(Classifier::classify("Bench Row Superset"), Category::Push);
    }

    #[test]
    fn test_case_insensitive_and_deterministic() {
        assert_eq!(Classifier::classify("BACK SQUAT"), Category::Lower);
        let first = Classifier::classify("Cable Curl");
        let second = Classifier::classify("Cable Curl");
        assert_eq!(first, second);
    }
}
