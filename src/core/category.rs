//! Category business logic - read-only category lookups.

use crate::{
    entities::{Category, category},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};

/// Retrieves all categories, ordered by id.
pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by its unique name, returning `None` when absent.
pub async fn get_category_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<category::Model>> {
    Category::find()
        .filter(category::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_get_all_categories_ordered() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_category(&db, "clothes").await?;
        create_test_category(&db, "tech").await?;

        let categories = get_all_categories(&db).await?;
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "clothes");
        assert_eq!(categories[1].name, "tech");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_category_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_category(&db, "clothes").await?;

        let found = get_category_by_name(&db, "clothes").await?;
        assert_eq!(found, Some(created));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_category_by_name_absent() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_category(&db, "clothes").await?;

        // Absent is None, never an error and never an empty object.
        let found = get_category_by_name(&db, "books").await?;
        assert!(found.is_none());

        Ok(())
    }
}
