//! Id assignment shared by every collection.
//!
//! New records get `max(existing ids, 0) + 1`. Ids of deleted records are only reused
//! when the deleted record held the current maximum.

use crate::errors::Result;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QuerySelect};

/// Returns the id the next record of `E` should receive.
pub async fn next_id<E, C>(db: &C, id_column: E::Column) -> Result<i64>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let max_id: Option<Option<i64>> = E::find()
        .select_only()
        .column_as(id_column.max(), "max_id")
        .into_tuple()
        .one(db)
        .await?;

    Ok(max_id.flatten().unwrap_or(0) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Expense, ExpenseColumn, Payment, PaymentColumn};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_next_id_on_empty_collection_is_one() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(next_id::<Payment, _>(&db, PaymentColumn::Id).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_next_id_follows_max() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_expense(&db, 100.0).await?;
        create_test_expense(&db, 200.0).await?;
        assert_eq!(next_id::<Expense, _>(&db, ExpenseColumn::Id).await?, 3);
        Ok(())
    }
}
