//! Repository for the `menu_items` table.

use chrono::NaiveDate;
use forge_core::menu::PublishMenu;
use forge_core::types::MessId;
use sqlx::PgPool;

use crate::models::menu::MenuItem;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, mess_id, menu_date, meal, item_name, is_special, allergens, sort_order, created_at";

/// Provides day-menu reads and publishing.
pub struct MenuRepo;

impl MenuRepo {
    /// Replace the menu for `(mess_id, menu_date)` with `menu.items`.
    ///
    /// Runs in a transaction so readers see either the old menu or the new
    /// one, never a mix.
    pub async fn replace_day(pool: &PgPool, menu: &PublishMenu) -> Result<Vec<MenuItem>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM menu_items WHERE mess_id = $1 AND menu_date = $2")
            .bind(menu.mess_id)
            .bind(menu.menu_date)
            .execute(&mut *tx)
            .await?;

        let insert_query = format!(
            "INSERT INTO menu_items
                (mess_id, menu_date, meal, item_name, is_special, allergens, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );

        let mut items = Vec::with_capacity(menu.items.len());
        for (idx, item) in menu.items.iter().enumerate() {
            let row = sqlx::query_as::<_, MenuItem>(&insert_query)
                .bind(menu.mess_id)
                .bind(menu.menu_date)
                .bind(item.meal.as_str())
                .bind(&item.item_name)
                .bind(item.is_special)
                .bind(&item.allergens)
                .bind(idx as i32)
                .fetch_one(&mut *tx)
                .await?;
            items.push(row);
        }

        tx.commit().await?;
        Ok(items)
    }

    /// The menu for a mess on one day, grouped by meal in serving order.
    pub async fn list_day(
        pool: &PgPool,
        mess_id: MessId,
        menu_date: NaiveDate,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM menu_items
             WHERE mess_id = $1 AND menu_date = $2
             ORDER BY CASE meal WHEN 'breakfast' THEN 0 WHEN 'lunch' THEN 1 ELSE 2 END,
                      sort_order"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(mess_id)
            .bind(menu_date)
            .fetch_all(pool)
            .await
    }
}
