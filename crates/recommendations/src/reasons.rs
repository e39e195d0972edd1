//! One-line rationale shown next to each recommendation.

use glowcart_catalog::ProductLite;

use crate::routine::RoutineStep;

/// Distance beyond which curated copy is never used.
pub const CURATED_MAX_DISTANCE: u8 = 3;

/// Curated copy keyed by `(earlier step, later step)`; direction-independent.
pub const CURATED_REASONS: &[((u8, u8), &str)] = &[
    (
        (1, 2),
        "Después de limpiar, exfoliar retira las células muertas y deja la piel lista para absorber los activos.",
    ),
    (
        (2, 3),
        "El tónico tras la exfoliación equilibra el pH y calma la piel recién renovada.",
    ),
    (
        (3, 4),
        "La esencia sobre el tónico aporta una primera capa de hidratación ligera.",
    ),
    (
        (4, 5),
        "La esencia prepara la piel para que el sérum penetre mejor.",
    ),
    (
        (5, 6),
        "Una mascarilla después del sérum intensifica el tratamiento.",
    ),
    (
        (6, 7),
        "La hidratante sella los beneficios de la mascarilla.",
    ),
    (
        (7, 8),
        "El protector solar es el último paso imprescindible después de hidratar.",
    ),
    (
        (5, 7),
        "La hidratante sobre el sérum sella sus activos y prolonga su efecto.",
    ),
    (
        (4, 7),
        "La hidratante completa la hidratación que empieza con la esencia.",
    ),
    (
        (3, 5),
        "El tónico deja la piel receptiva para aprovechar al máximo el sérum.",
    ),
    (
        (1, 3),
        "Tras la limpieza, el tónico restablece el equilibrio natural de la piel.",
    ),
];

/// Curated copy for a pair of steps, in either order.
pub fn curated_reason(a: RoutineStep, b: RoutineStep) -> Option<&'static str> {
    let key = (a.number().min(b.number()), a.number().max(b.number()));
    CURATED_REASONS
        .iter()
        .find(|(pair, _)| *pair == key)
        .map(|(_, text)| *text)
}

/// Why `recommended` pairs well with `current`.
pub fn reason(current: &ProductLite, recommended: &ProductLite) -> String {
    let current_step = RoutineStep::from_category(&current.category);
    let recommended_step = RoutineStep::from_category(&recommended.category);

    if current_step.distance(recommended_step) <= CURATED_MAX_DISTANCE {
        if let Some(text) = curated_reason(current_step, recommended_step) {
            return text.to_string();
        }
    }

    if recommended_step < current_step {
        format!(
            "Úsalo antes para preparar la piel y potenciar tu {}.",
            current_step.label()
        )
    } else {
        format!(
            "Aplícalo después para sellar y prolongar el efecto de tu {}.",
            current_step.label()
        )
    }
}
