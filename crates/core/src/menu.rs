//! Day menu input validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::meal::Meal;
use crate::types::MessId;

pub const MAX_ITEM_NAME_LEN: u64 = 200;
pub const MAX_ITEMS_PER_DAY: u64 = 60;
pub const MAX_ALLERGENS_PER_ITEM: u64 = 20;
pub const MAX_ALLERGEN_LEN: usize = 50;

/// One dish on the menu.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemInput {
    pub meal: Meal,
    #[validate(length(min = 1, max = MAX_ITEM_NAME_LEN))]
    pub item_name: String,
    #[serde(default)]
    pub is_special: bool,
    #[serde(default)]
    #[validate(length(max = MAX_ALLERGENS_PER_ITEM))]
    pub allergens: Vec<String>,
}

/// Full menu for a mess on one day. Publishing replaces any existing menu.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PublishMenu {
    pub mess_id: MessId,
    pub menu_date: NaiveDate,
    #[validate(length(max = MAX_ITEMS_PER_DAY), nested)]
    pub items: Vec<MenuItemInput>,
}

/// Validate a menu and normalise item names and allergens in place.
pub fn validate_menu(menu: &mut PublishMenu) -> Result<(), CoreError> {
    for item in &mut menu.items {
        item.item_name = item.item_name.trim().to_string();
        item.allergens = item
            .allergens
            .iter()
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        item.allergens.sort();
        item.allergens.dedup();

        if let Some(a) = item.allergens.iter().find(|a| a.chars().count() > MAX_ALLERGEN_LEN) {
            return Err(CoreError::Validation(format!(
                "Allergen '{a}' exceeds {MAX_ALLERGEN_LEN} characters"
            )));
        }
    }

    menu.validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn item(meal: Meal, name: &str) -> MenuItemInput {
        MenuItemInput {
            meal,
            item_name: name.to_string(),
            is_special: false,
            allergens: vec![],
        }
    }

    fn menu(items: Vec<MenuItemInput>) -> PublishMenu {
        PublishMenu {
            mess_id: Uuid::new_v4(),
            menu_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            items,
        }
    }

    #[test]
    fn valid_menu_passes() {
        let mut m = menu(vec![
            item(Meal::Breakfast, "Idli Sambar"),
            item(Meal::Lunch, "Rice & Dal"),
            item(Meal::Dinner, "Chapati & Curry"),
        ]);
        assert!(validate_menu(&mut m).is_ok());
    }

    #[test]
    fn blank_item_name_rejected() {
        let mut m = menu(vec![item(Meal::Lunch, "   ")]);
        assert!(matches!(validate_menu(&mut m), Err(CoreError::Validation(_))));
    }

    #[test]
    fn overlong_item_name_rejected() {
        let name = "a".repeat(MAX_ITEM_NAME_LEN as usize + 1);
        let mut m = menu(vec![item(Meal::Lunch, &name)]);
        assert!(validate_menu(&mut m).is_err());
    }

    #[test]
    fn too_many_items_rejected() {
        let items = (0..=MAX_ITEMS_PER_DAY)
            .map(|i| item(Meal::Dinner, &format!("dish {i}")))
            .collect();
        let mut m = menu(items);
        assert!(validate_menu(&mut m).is_err());
    }

    #[test]
    fn allergens_normalised() {
        let mut dish = item(Meal::Lunch, " Paneer Tikka ");
        dish.allergens = vec![" Dairy".into(), "dairy".into(), "".into(), "Nuts".into()];
        let mut m = menu(vec![dish]);
        validate_menu(&mut m).unwrap();
        assert_eq!(m.items[0].item_name, "Paneer Tikka");
        assert_eq!(m.items[0].allergens, vec!["dairy", "nuts"]);
    }

    #[test]
    fn too_many_allergens_rejected() {
        let mut dish = item(Meal::Lunch, "Thali");
        dish.allergens = (0..=MAX_ALLERGENS_PER_ITEM).map(|i| format!("a{i}")).collect();
        let mut m = menu(vec![dish]);
        assert!(matches!(validate_menu(&mut m), Err(CoreError::Validation(_))));
    }

    #[test]
    fn allergen_length_counts_characters() {
        let mut dish = item(Meal::Dinner, "Dal");
        dish.allergens = vec!["é".repeat(MAX_ALLERGEN_LEN)];
        let mut m = menu(vec![dish.clone()]);
        assert!(validate_menu(&mut m).is_ok());

        dish.allergens = vec!["é".repeat(MAX_ALLERGEN_LEN + 1)];
        let mut m = menu(vec![dish]);
        assert!(validate_menu(&mut m).is_err());
    }

    #[test]
    fn empty_menu_is_allowed() {
        let mut m = menu(vec![]);
        assert!(validate_menu(&mut m).is_ok());
    }
}
