//! Pairwise scoring: routine proximity plus skin-type compatibility.

use glowcart_catalog::ProductLite;

use crate::routine::RoutineStep;

/// Score forced on same-category candidates (substitutes, not complements).
pub const SAME_CATEGORY_PENALTY: i32 = -20;

/// Bonus when the candidate is labelled for every skin type.
pub const UNIVERSAL_SKIN_BONUS: i32 = 2;

/// Bonus when both products share an exact skin-type label.
pub const SHARED_SKIN_BONUS: i32 = 3;

/// Substrings that mark a label as "all skin types".
pub const UNIVERSAL_SKIN_MARKERS: &[&str] = &["todo tipo", "todos", "todo"];

/// Points awarded by routine distance. Coarse on purpose: adjacency wins.
pub fn proximity_points(distance: u8) -> i32 {
    match distance {
        1 => 5,
        2 => 3,
        3 => 2,
        _ => 1,
    }
}

/// Category labels compare trimmed and case-insensitively.
pub fn same_category(a: &ProductLite, b: &ProductLite) -> bool {
    a.category.trim().to_lowercase() == b.category.trim().to_lowercase()
}

/// Skin-type component of the score.
///
/// The universal marker on the candidate takes precedence over an exact
/// overlap; the two bonuses never stack.
pub fn skin_type_bonus(current: &ProductLite, candidate: &ProductLite) -> i32 {
    let candidate_types = normalized(&candidate.skin_type);

    let universal = candidate_types
        .iter()
        .any(|label| UNIVERSAL_SKIN_MARKERS.iter().any(|m| label.contains(m)));
    if universal {
        return UNIVERSAL_SKIN_BONUS;
    }

    let current_types = normalized(&current.skin_type);
    if candidate_types.iter().any(|t| current_types.contains(t)) {
        SHARED_SKIN_BONUS
    } else {
        0
    }
}

/// Score `candidate` as a complement to `current`.
pub fn score(current: &ProductLite, candidate: &ProductLite) -> i32 {
    if same_category(current, candidate) {
        return SAME_CATEGORY_PENALTY;
    }

    let distance = RoutineStep::from_category(&current.category)
        .distance(RoutineStep::from_category(&candidate.category));

    proximity_points(distance) + skin_type_bonus(current, candidate)
}

fn normalized(labels: &[String]) -> Vec<String> {
    labels.iter().map(|l| l.trim().to_lowercase()).collect()
}
