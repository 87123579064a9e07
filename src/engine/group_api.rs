use super::Engine;

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{types::Json, Acquire, Executor, Row};
use uuid::Uuid;

use crate::api::GroupAPI;
use crate::entities::Group;
use crate::error::{invalid_input_error, Error};

#[async_trait]
impl GroupAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_group(
        &self,
        name: String,
        start_time: String,
        end_time: String,
    ) -> Result<Group, Error> {
        let group = Group::new(&name, &start_time, &end_time)?;

        let mut conn = self.pool.acquire().await?;
        conn.execute(
            sqlx::query("INSERT INTO groups (id, data) VALUES ($1, $2)")
                .bind(&group.id)
                .bind(Json(&group)),
        )
        .await?;

        Ok(group)
    }

    #[tracing::instrument(skip(self))]
    async fn find_group(&self, id: Uuid) -> Result<Group, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM groups WHERE id = $1").bind(&id))
            .await?;

        let result = maybe_result.ok_or_else(|| invalid_input_error())?;
        let Json(group) = result.try_get("data")?;

        Ok(group)
    }

    #[tracing::instrument(skip(self))]
    async fn list_groups(&self) -> Result<Vec<Group>, Error> {
        let mut conn = self.pool.acquire().await?;

        let mut results = conn.fetch(sqlx::query(
            "SELECT data FROM groups ORDER BY data->>'created_at' DESC",
        ));

        let mut groups = Vec::new();
        while let Some(row) = results.try_next().await? {
            let Json::<Group>(group) = row.try_get("data")?;
            groups.push(group);
        }

        Ok(groups)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_group(&self, id: Uuid) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        tx.execute(sqlx::query("DELETE FROM routes WHERE group_id = $1").bind(&id))
            .await?;

        let result = tx
            .execute(sqlx::query("DELETE FROM groups WHERE id = $1").bind(&id))
            .await?;

        if result.rows_affected() == 0 {
            return Err(invalid_input_error());
        }

        tx.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::api::GroupAPI;
    use crate::engine::fakes::{engine, FailingDirections, NoLocation, StaticGeocoder};

    #[tokio::test]
    async fn invalid_group_never_reaches_the_store() {
        let engine = engine(
            Arc::new(StaticGeocoder::new(&[])),
            Arc::new(FailingDirections),
            Arc::new(NoLocation),
        );

        let err = engine
            .create_group("".into(), "07:30".into(), "09:00".into())
            .await
            .unwrap_err();

        assert_eq!(err.code, 102);
    }
}
