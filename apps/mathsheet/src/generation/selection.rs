//! Item selection: gathers items from the registry and sizes them to the sheet.
//!
//! A sheet wants `rounds × items_per_group` questions. Surplus is truncated.
//! A shortfall is padded by cycling through what was gathered; each copy is
//! tagged `duplicated: true` with `original_index` pointing at its source.
//! The target is capped at `MAX_SHEET_ITEMS`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::generation::registry::{GeneratorKey, GeneratorRegistry, RegistryError};
use crate::models::Item;

/// Request for `count` items from one generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub category: String,
    pub subcategory: String,
    pub count: usize,
}

impl Selection {
    pub fn key(&self) -> GeneratorKey {
        GeneratorKey::new(self.category.clone(), self.subcategory.clone())
    }
}

/// Upper bound on the questions in one sheet.
pub const MAX_SHEET_ITEMS: usize = 10_000;

/// `rounds × items_per_group`, or `None` if the product overflows or exceeds
/// `MAX_SHEET_ITEMS`.
pub fn sheet_target(rounds: usize, items_per_group: usize) -> Option<usize> {
    rounds
        .checked_mul(items_per_group)
        .filter(|&target| target <= MAX_SHEET_ITEMS)
}

/// Gathers items for every selection, in order, then fits them to the target.
///
/// With `rounds == 0` or `items_per_group == 0` there is no target and all
/// gathered items are returned as-is.
pub fn assemble_items(
    registry: &GeneratorRegistry,
    selections: &[Selection],
    rounds: usize,
    items_per_group: usize,
) -> Result<Vec<Item>, RegistryError> {
    let target = sheet_target(rounds, items_per_group).ok_or(RegistryError::TargetTooLarge {
        rounds,
        items_per_group,
        max: MAX_SHEET_ITEMS,
    })?;

    let mut gathered = Vec::new();
    for selection in selections {
        gathered.extend(registry.generate(&selection.key(), selection.count)?);
    }

    if target == 0 {
        return Ok(gathered);
    }
    if gathered.is_empty() {
        return Err(RegistryError::InsufficientItems { target });
    }
    if gathered.len() >= target {
        gathered.truncate(target);
        return Ok(gathered);
    }

    let originals = gathered.len();
    warn!(
        gathered = originals,
        target, "Selection: too few items, padding with duplicates"
    );
    let padding: Vec<Item> = (0..target - originals)
        .map(|i| {
            let source = i % originals;
            gathered[source].duplicate_of(source)
        })
        .collect();
    gathered.extend(padding);
    Ok(gathered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::registry::BankGenerator;
    use crate::layout::SizeClass;
    use crate::models::item::test_support::make_item;
    use serde_json::json;
    use std::sync::Arc;

    fn make_registry() -> GeneratorRegistry {
        let mut registry = GeneratorRegistry::new();
        let adds = (1..=3)
            .map(|n| make_item(format!("{n} + {n}"), format!("${}$", n * 2), "", SizeClass::Small))
            .collect();
        let areas = (1..=2)
            .map(|n| make_item(format!("square of side {n}"), format!("${}$", n * n), "", SizeClass::Wide))
            .collect();
        registry.register(GeneratorKey::new("arithmetic", "addition"), Arc::new(BankGenerator::new(adds)));
        registry.register(GeneratorKey::new("geometry", "area"), Arc::new(BankGenerator::new(areas)));
        registry
    }

    fn select(category: &str, subcategory: &str, count: usize) -> Selection {
        Selection {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            count,
        }
    }

    #[test]
    fn test_no_target_returns_everything_in_order() {
        let items = assemble_items(
            &make_registry(),
            &[select("geometry", "area", 5), select("arithmetic", "addition", 2)],
            0,
            0,
        )
        .unwrap();
        let questions: Vec<&str> = items.iter().filter_map(|i| i.question.as_deref()).collect();
        assert_eq!(
            questions,
            vec!["square of side 1", "square of side 2", "1 + 1", "2 + 2"]
        );
    }

    #[test]
    fn test_surplus_is_truncated() {
        let items =
            assemble_items(&make_registry(), &[select("arithmetic", "addition", 3)], 1, 2).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| !i.extra.contains_key("duplicated")));
    }

    #[test]
    fn test_shortfall_is_padded_with_marked_duplicates() {
        let items =
            assemble_items(&make_registry(), &[select("geometry", "area", 2)], 2, 3).unwrap();
        assert_eq!(items.len(), 6);
        assert!(items[..2].iter().all(|i| i.extra.is_empty()));
        let sources: Vec<_> = items[2..].iter().map(|i| i.extra["original_index"].clone()).collect();
        assert_eq!(sources, vec![json!(0), json!(1), json!(0), json!(1)]);
        assert!(items[2..].iter().all(|i| i.extra["duplicated"] == json!(true)));
        assert_eq!(items[4].question, items[0].question);
    }

    #[test]
    fn test_nothing_gathered_with_target_errors() {
        let err =
            assemble_items(&make_registry(), &[select("geometry", "area", 0)], 1, 4).unwrap_err();
        assert!(matches!(err, RegistryError::InsufficientItems { target: 4 }));
    }

    #[test]
    fn test_sheet_target_bounds() {
        assert_eq!(sheet_target(0, 5), Some(0));
        assert_eq!(sheet_target(4, 5), Some(20));
        assert_eq!(sheet_target(MAX_SHEET_ITEMS, 1), Some(MAX_SHEET_ITEMS));
        assert_eq!(sheet_target(MAX_SHEET_ITEMS + 1, 1), None);
        assert_eq!(sheet_target(usize::MAX / 2, 3), None);
    }

    #[test]
    fn test_overflowing_target_is_rejected_not_panicking() {
        let err = assemble_items(
            &make_registry(),
            &[select("geometry", "area", 2)],
            usize::MAX / 2,
            3,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::TargetTooLarge { items_per_group: 3, max: MAX_SHEET_ITEMS, .. }
        ));
    }

    #[test]
    fn test_oversized_target_is_rejected_before_padding() {
        let err = assemble_items(
            &make_registry(),
            &[select("geometry", "area", 2)],
            1_000_000_000,
            10,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::TargetTooLarge { rounds: 1_000_000_000, .. }));
    }

    #[test]
    fn test_target_at_cap_is_padded() {
        let items = assemble_items(
            &make_registry(),
            &[select("geometry", "area", 2)],
            MAX_SHEET_ITEMS / 10,
            10,
        )
        .unwrap();
        assert_eq!(items.len(), MAX_SHEET_ITEMS);
        assert_eq!(items[MAX_SHEET_ITEMS - 1].extra["original_index"], json!(1));
    }

    #[test]
    fn test_unknown_generator_propagates() {
        let err = assemble_items(&make_registry(), &[select("calculus", "limits", 1)], 0, 0)
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownGenerator { .. }));
    }
}
