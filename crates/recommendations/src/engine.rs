//! Ranking: score every candidate, keep the positive ones, take the best few.

use serde::{Deserialize, Serialize};
use tracing::debug;

use glowcart_catalog::ProductLite;
use glowcart_core::Entity;

use crate::reasons::reason;
use crate::routine::RoutineStep;
use crate::scoring::score;

/// Suggestions returned when the caller doesn't ask for a specific amount.
pub const DEFAULT_LIMIT: usize = 3;

/// Hard cap on suggestions per request.
pub const MAX_LIMIT: usize = 10;

/// A ranked suggestion with its rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product: ProductLite,
    pub reason: String,
    /// Display label of the suggested product's routine step.
    pub step: String,
}

/// Rank `catalog` against `current` and return at most `min(limit, MAX_LIMIT)`
/// suggestions.
///
/// `catalog` is expected to be an active-only snapshot; it may contain
/// `current` itself, which is skipped by id. Equal scores keep catalog order.
pub fn get_recommendations(
    current: &ProductLite,
    catalog: &[ProductLite],
    limit: usize,
) -> Vec<Recommendation> {
    let limit = limit.min(MAX_LIMIT);

    let mut scored: Vec<(i32, &ProductLite)> = catalog
        .iter()
        .filter(|candidate| !candidate.is_same_entity(current))
        .map(|candidate| (score(current, candidate), candidate))
        .filter(|(points, _)| *points > 0)
        .collect();

    // Stable: ties keep catalog encounter order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, candidate)| Recommendation {
            product: candidate.clone(),
            reason: reason(current, candidate),
            step: RoutineStep::from_category(&candidate.category)
                .label()
                .to_string(),
        })
        .collect()
}

/// Recommendation entry point with a configured default limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationEngine {
    default_limit: usize,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different default; clamped to `1..=MAX_LIMIT`.
    pub fn with_default_limit(limit: usize) -> Self {
        Self {
            default_limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    pub fn recommend(
        &self,
        current: &ProductLite,
        catalog: &[ProductLite],
        limit: Option<usize>,
    ) -> Vec<Recommendation> {
        let limit = limit.unwrap_or(self.default_limit);
        let picks = get_recommendations(current, catalog, limit);

        debug!(
            product_id = %current.id,
            candidates = catalog.len(),
            requested = limit,
            returned = picks.len(),
            "ranked recommendations"
        );

        picks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn product(id: &str, category: &str, skin: &[&str]) -> ProductLite {
        ProductLite::new(id, category).with_skin_types(skin.iter().copied())
    }

    fn sample_catalog() -> Vec<ProductLite> {
        vec![
            product("cleanser", "Limpiadores", &["Seca"]),
            product("cleanser-2", "limpiadores", &["Seca"]),
            product("exfoliant", "Exfoliantes", &["Grasa"]),
            product("toner", "Tónicos", &["Seca"]),
            product("essence", "Esencias", &[]),
            product("serum", "Sérums", &["Todo tipo de piel"]),
            product("mask", "Mascarillas", &[]),
            product("cream", "Hidratantes", &["Seca"]),
            product("spf", "Protector Solar", &["Todo tipo de piel"]),
        ]
    }

    #[test]
    fn ranks_by_score_and_respects_default_limit() {
        let catalog = sample_catalog();
        let current = catalog[0].clone();

        let picks = RecommendationEngine::new().recommend(&current, &catalog, None);

        // exfoliant: 5, toner: 3 + 3 = 6, essence: 2, serum: 1 + 2 = 3,
        // cream: 1 + 3 = 4, spf: 1 + 2 = 3
        let ids: Vec<&str> = picks.iter().map(|r| r.product.id.as_str()).collect();
        assert_eq!(ids, vec!["toner", "exfoliant", "cream"]);
        assert_eq!(picks[0].step, "Tónico");
        assert_eq!(picks[1].step, "Exfoliación");
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog = sample_catalog();
        let current = catalog[0].clone();

        let picks = get_recommendations(&current, &catalog, 10);
        let ids: Vec<&str> = picks.iter().map(|r| r.product.id.as_str()).collect();

        // serum and spf both score 3; serum comes first in the catalog.
        assert_eq!(
            ids,
            vec!["toner", "exfoliant", "cream", "serum", "spf", "essence", "mask"]
        );
    }

    #[test]
    fn never_recommends_the_reference_or_its_category() {
        let catalog = sample_catalog();
        let picks = get_recommendations(&catalog[0], &catalog, 10);
        assert!(picks.iter().all(|r| r.product.id.as_str() != "cleanser"));
        assert!(picks.iter().all(|r| r.product.id.as_str() != "cleanser-2"));
    }

    #[test]
    fn zero_limit_yields_nothing() {
        let catalog = sample_catalog();
        assert!(get_recommendations(&catalog[0], &catalog, 0).is_empty());
    }

    #[test]
    fn catalog_of_substitutes_yields_nothing() {
        let catalog = vec![
            product("a", "Sérums", &[]),
            product("b", "sérums", &[]),
            product("c", "SÉRUMS", &[]),
        ];
        assert!(get_recommendations(&catalog[0], &catalog, 3).is_empty());
    }

    #[test]
    fn configured_default_is_clamped() {
        assert_eq!(RecommendationEngine::with_default_limit(50).default_limit(), MAX_LIMIT);
        assert_eq!(RecommendationEngine::with_default_limit(0).default_limit(), 1);
    }

    #[test]
    fn reasons_are_attached() {
        let catalog = sample_catalog();
        let picks = get_recommendations(&catalog[0], &catalog, 1);
        assert_eq!(picks[0].reason, reason(&catalog[0], &picks[0].product));
    }

    #[test]
    fn serializes_with_camel_case_product() {
        let mut p = product("serum", "Sérums", &["Seca"]);
        p.compare_at_price = Some(10);
        let rec = Recommendation {
            product: p,
            reason: "r".into(),
            step: "Sérum".into(),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["product"]["skinType"][0], "Seca");
        assert_eq!(json["product"]["compareAtPrice"], 10);
    }

    const CATEGORIES: &[&str] = &[
        "Limpiadores",
        "exfoliantes",
        "Tónicos",
        "esencias",
        "Sérums",
        "mascarillas",
        "Hidratantes",
        "protector solar",
        "accesorios",
    ];
    const SKIN_TYPES: &[&str] = &["Seca", "Grasa", "Mixta", "Sensible", "Todo tipo de piel"];

    fn arb_product(id: usize) -> impl Strategy<Value = ProductLite> {
        (
            0..CATEGORIES.len(),
            proptest::collection::vec(0..SKIN_TYPES.len(), 0..3),
        )
            .prop_map(move |(cat, skins)| {
                product(
                    &format!("p{id}"),
                    CATEGORIES[cat],
                    &skins.iter().map(|i| SKIN_TYPES[*i]).collect::<Vec<_>>(),
                )
            })
    }

    fn arb_catalog() -> impl Strategy<Value = Vec<ProductLite>> {
        (1usize..25).prop_flat_map(|n| (0..n).map(arb_product).collect::<Vec<_>>())
    }

    proptest! {
        #[test]
        fn result_excludes_reference_and_substitutes(
            catalog in arb_catalog(),
            pick in any::<prop::sample::Index>(),
            limit in 0usize..20,
        ) {
            let current = &catalog[pick.index(catalog.len())];
            let picks = get_recommendations(current, &catalog, limit);

            for rec in &picks {
                prop_assert_ne!(&rec.product.id, &current.id);
                prop_assert_ne!(
                    rec.product.category.to_lowercase(),
                    current.category.to_lowercase()
                );
            }
        }

        #[test]
        fn result_length_is_bounded(
            catalog in arb_catalog(),
            pick in any::<prop::sample::Index>(),
            limit in 0usize..20,
        ) {
            let current = &catalog[pick.index(catalog.len())];
            let picks = get_recommendations(current, &catalog, limit);
            let eligible = catalog
                .iter()
                .filter(|c| c.id != current.id && score(current, c) > 0)
                .count();

            prop_assert!(picks.len() <= limit.min(MAX_LIMIT));
            prop_assert!(picks.len() <= eligible);
        }

        #[test]
        fn scores_are_non_increasing(
            catalog in arb_catalog(),
            pick in any::<prop::sample::Index>(),
        ) {
            let current = &catalog[pick.index(catalog.len())];
            let picks = get_recommendations(current, &catalog, MAX_LIMIT);
            let scores: Vec<i32> = picks.iter().map(|r| score(current, &r.product)).collect();
            prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        }

        #[test]
        fn ranking_is_deterministic(
            catalog in arb_catalog(),
            pick in any::<prop::sample::Index>(),
        ) {
            let current = &catalog[pick.index(catalog.len())];
            prop_assert_eq!(
                get_recommendations(current, &catalog, 5),
                get_recommendations(current, &catalog, 5)
            );
        }
    }
}
