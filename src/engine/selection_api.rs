use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::api::SelectionAPI;
use crate::entities::{Coordinate, Selection};
use crate::error::{invalid_input_error, location_unavailable_error, Error};
use crate::{geocode, routing};

impl Engine {
    /// Runs a transition on a stored selection and dispatches the route
    /// fetch when it leaves both endpoints chosen.
    async fn transition<F>(&self, token: Uuid, f: F) -> Result<Selection, Error>
    where
        F: FnOnce(&mut Selection) -> Result<(), Error>,
    {
        let mut selections = self.selections.lock().await;
        let selection = selections
            .get_mut(&token)
            .ok_or_else(|| invalid_input_error())?;

        f(selection)?;

        if selection.plan.is_none() {
            if let Some((origin, destination)) = selection.chosen_pair() {
                self.spawn_plan_fetch(token, selection.generation(), origin, destination);
            }
        }

        Ok(selection.clone())
    }

    /// Fire-and-forget: the caller never waits on routing. The task carries
    /// the generation it was dispatched with; a write-back whose generation
    /// no longer matches is dropped.
    fn spawn_plan_fetch(
        &self,
        token: Uuid,
        generation: u64,
        origin: Coordinate,
        destination: Coordinate,
    ) {
        let directions = self.directions.clone();
        let selections = self.selections.clone();

        tokio::spawn(async move {
            let plan = routing::fetch_plan(directions.as_ref(), origin, destination).await;

            let mut selections = selections.lock().await;
            if let Some(selection) = selections.get_mut(&token) {
                if !selection.apply_plan(generation, plan) {
                    tracing::debug!(%token, generation, "discarding stale route plan");
                }
            }
        });
    }
}

#[async_trait]
impl SelectionAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_selection(&self) -> Result<Selection, Error> {
        // permission denial stays silent, the session just opens on the
        // default center
        let position = match self.locator.request_permission().await {
            Ok(true) => self.locator.current_position().await.ok(),
            _ => None,
        };

        let selection = Selection::new(position);

        let mut selections = self.selections.lock().await;
        selections.insert(selection.token, selection.clone());

        Ok(selection)
    }

    #[tracing::instrument(skip(self))]
    async fn find_selection(&self, token: Uuid) -> Result<Selection, Error> {
        let selections = self.selections.lock().await;

        selections
            .get(&token)
            .cloned()
            .ok_or_else(|| invalid_input_error())
    }

    #[tracing::instrument(skip(self))]
    async fn set_origin(&self, token: Uuid, coordinate: Coordinate) -> Result<Selection, Error> {
        self.transition(token, |selection| {
            selection.set_origin(coordinate);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn set_destination(
        &self,
        token: Uuid,
        coordinate: Coordinate,
    ) -> Result<Selection, Error> {
        self.transition(token, |selection| {
            selection.set_destination(coordinate);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn search_origin(&self, token: Uuid, query: String) -> Result<Selection, Error> {
        let coordinate = geocode::resolve(self.geocoder.as_ref(), &query).await?;

        self.transition(token, |selection| {
            selection.set_origin(coordinate);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn search_destination(&self, token: Uuid, query: String) -> Result<Selection, Error> {
        let coordinate = geocode::resolve(self.geocoder.as_ref(), &query).await?;

        self.transition(token, |selection| {
            selection.set_destination(coordinate);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn use_current_location(&self, token: Uuid) -> Result<Selection, Error> {
        let known = self.find_selection(token).await?.user_location;

        let position = match known {
            Some(position) => position,
            None => self
                .locator
                .current_position()
                .await
                .map_err(|_| location_unavailable_error())?,
        };

        self.transition(token, |selection| {
            selection.user_location = Some(position);
            selection.choose(position);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn reset_selection(&self, token: Uuid) -> Result<Selection, Error> {
        self.transition(token, |selection| {
            selection.reset();
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn discard_selection(&self, token: Uuid) -> Result<(), Error> {
        let mut selections = self.selections.lock().await;

        selections
            .remove(&token)
            .map(|_| ())
            .ok_or_else(|| invalid_input_error())
    }
}
