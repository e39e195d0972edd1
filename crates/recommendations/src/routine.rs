//! Canonical skincare routine order and the category lookup table.

use serde::{Deserialize, Serialize};

/// One step of the canonical routine, numbered 1–8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutineStep {
    Cleanser = 1,
    Exfoliant = 2,
    Toner = 3,
    Essence = 4,
    Serum = 5,
    Mask = 6,
    Moisturizer = 7,
    Sunscreen = 8,
}

/// Step assumed for categories missing from `CATEGORY_STEPS`.
pub const DEFAULT_STEP: RoutineStep = RoutineStep::Serum;

/// Category label (trimmed, lowercase) → routine step.
///
/// Spanish storefront labels first, English aliases after.
pub const CATEGORY_STEPS: &[(&str, RoutineStep)] = &[
    ("limpiador", RoutineStep::Cleanser),
    ("limpiadores", RoutineStep::Cleanser),
    ("limpieza", RoutineStep::Cleanser),
    ("desmaquillante", RoutineStep::Cleanser),
    ("desmaquillantes", RoutineStep::Cleanser),
    ("exfoliante", RoutineStep::Exfoliant),
    ("exfoliantes", RoutineStep::Exfoliant),
    ("exfoliación", RoutineStep::Exfoliant),
    ("exfoliacion", RoutineStep::Exfoliant),
    ("tónico", RoutineStep::Toner),
    ("tónicos", RoutineStep::Toner),
    ("tonico", RoutineStep::Toner),
    ("tonicos", RoutineStep::Toner),
    ("esencia", RoutineStep::Essence),
    ("esencias", RoutineStep::Essence),
    ("sérum", RoutineStep::Serum),
    ("sérums", RoutineStep::Serum),
    ("serum", RoutineStep::Serum),
    ("serums", RoutineStep::Serum),
    ("mascarilla", RoutineStep::Mask),
    ("mascarillas", RoutineStep::Mask),
    ("hidratante", RoutineStep::Moisturizer),
    ("hidratantes", RoutineStep::Moisturizer),
    ("hidratación", RoutineStep::Moisturizer),
    ("hidratacion", RoutineStep::Moisturizer),
    ("crema", RoutineStep::Moisturizer),
    ("cremas", RoutineStep::Moisturizer),
    ("protector solar", RoutineStep::Sunscreen),
    ("protectores solares", RoutineStep::Sunscreen),
    ("protección solar", RoutineStep::Sunscreen),
    ("proteccion solar", RoutineStep::Sunscreen),
    ("bloqueador", RoutineStep::Sunscreen),
    ("cleanser", RoutineStep::Cleanser),
    ("cleansers", RoutineStep::Cleanser),
    ("exfoliant", RoutineStep::Exfoliant),
    ("exfoliants", RoutineStep::Exfoliant),
    ("toner", RoutineStep::Toner),
    ("toners", RoutineStep::Toner),
    ("essence", RoutineStep::Essence),
    ("essences", RoutineStep::Essence),
    ("mask", RoutineStep::Mask),
    ("masks", RoutineStep::Mask),
    ("moisturizer", RoutineStep::Moisturizer),
    ("moisturizers", RoutineStep::Moisturizer),
    ("sunscreen", RoutineStep::Sunscreen),
    ("sunscreens", RoutineStep::Sunscreen),
];

impl RoutineStep {
    pub const ALL: [RoutineStep; 8] = [
        RoutineStep::Cleanser,
        RoutineStep::Exfoliant,
        RoutineStep::Toner,
        RoutineStep::Essence,
        RoutineStep::Serum,
        RoutineStep::Mask,
        RoutineStep::Moisturizer,
        RoutineStep::Sunscreen,
    ];

    /// Map a free-text category to its step. Unknown categories → `DEFAULT_STEP`.
    pub fn from_category(category: &str) -> Self {
        let key = category.trim().to_lowercase();
        CATEGORY_STEPS
            .iter()
            .find(|(label, _)| *label == key)
            .map(|(_, step)| *step)
            .unwrap_or(DEFAULT_STEP)
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Absolute distance between two steps in the routine.
    pub fn distance(self, other: RoutineStep) -> u8 {
        self.number().abs_diff(other.number())
    }

    /// Spanish display label.
    pub fn label(self) -> &'static str {
        match self {
            RoutineStep::Cleanser => "Limpieza",
            RoutineStep::Exfoliant => "Exfoliación",
            RoutineStep::Toner => "Tónico",
            RoutineStep::Essence => "Esencia",
            RoutineStep::Serum => "Sérum",
            RoutineStep::Mask => "Mascarilla",
            RoutineStep::Moisturizer => "Hidratación",
            RoutineStep::Sunscreen => "Protección Solar",
        }
    }
}

impl core::fmt::Display for RoutineStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_round_trips_through_lookup() {
        for (label, step) in CATEGORY_STEPS {
            assert_eq!(RoutineStep::from_category(label), *step, "label {label}");
        }
    }

    #[test]
    fn table_keys_are_normalized_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for (label, _) in CATEGORY_STEPS {
            assert_eq!(*label, label.trim().to_lowercase());
            assert!(seen.insert(*label), "duplicate label {label}");
        }
    }

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        assert_eq!(RoutineStep::from_category("  LIMPIADORES "), RoutineStep::Cleanser);
        assert_eq!(RoutineStep::from_category("Tónicos"), RoutineStep::Toner);
        assert_eq!(RoutineStep::from_category("Protector Solar"), RoutineStep::Sunscreen);
    }

    #[test]
    fn unknown_category_defaults_to_serum() {
        assert_eq!(RoutineStep::from_category("accesorios"), RoutineStep::Serum);
        assert_eq!(RoutineStep::from_category(""), RoutineStep::Serum);
    }

    #[test]
    fn steps_are_numbered_in_routine_order() {
        let numbers: Vec<u8> = RoutineStep::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, (1..=8).collect::<Vec<u8>>());
        assert_eq!(RoutineStep::Cleanser.distance(RoutineStep::Sunscreen), 7);
    }
}
