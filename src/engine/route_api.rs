use super::Engine;

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{types::Json, Executor, Row};
use uuid::Uuid;

use crate::api::{GroupAPI, RouteAPI, SelectionAPI};
use crate::entities::Route;
use crate::error::{invalid_input_error, Error};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_route(
        &self,
        group_id: Uuid,
        name: String,
        selection_token: Uuid,
    ) -> Result<Route, Error> {
        let selection = self.find_selection(selection_token).await?;

        let route = Route::new(
            &name,
            selection.origin,
            selection.destination,
            selection.plan,
        )?;

        // the route list is keyed by group; make sure the owner exists
        self.find_group(group_id).await?;

        let mut conn = self.pool.acquire().await?;
        conn.execute(
            sqlx::query("INSERT INTO routes (id, group_id, data) VALUES ($1, $2, $3)")
                .bind(&route.id)
                .bind(&group_id)
                .bind(Json(&route)),
        )
        .await?;

        Ok(route)
    }

    #[tracing::instrument(skip(self))]
    async fn find_route(&self, group_id: Uuid, id: Uuid) -> Result<Route, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(
                sqlx::query("SELECT data FROM routes WHERE id = $1 AND group_id = $2")
                    .bind(&id)
                    .bind(&group_id),
            )
            .await?;

        let result = maybe_result.ok_or_else(|| invalid_input_error())?;
        let Json(route) = result.try_get("data")?;

        Ok(route)
    }

    #[tracing::instrument(skip(self))]
    async fn list_routes(&self, group_id: Uuid) -> Result<Vec<Route>, Error> {
        let mut conn = self.pool.acquire().await?;

        let mut results = conn.fetch(
            sqlx::query("SELECT data FROM routes WHERE group_id = $1 ORDER BY data->>'created_at'")
                .bind(&group_id),
        );

        let mut routes = Vec::new();
        while let Some(row) = results.try_next().await? {
            let Json::<Route>(route) = row.try_get("data")?;
            routes.push(route);
        }

        Ok(routes)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_route(&self, group_id: Uuid, id: Uuid) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        let result = conn
            .execute(
                sqlx::query("DELETE FROM routes WHERE id = $1 AND group_id = $2")
                    .bind(&id)
                    .bind(&group_id),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(invalid_input_error());
        }

        Ok(())
    }
}
