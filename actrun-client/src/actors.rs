//! Actor browsing endpoints

use actrun_core::domain::actor::{ActorDetail, ActorSummary};
use actrun_core::dto::actor::{
    ActorDetailResponse, ActorListResponse, CategoriesResponse, Category,
};

use crate::GatewayClient;
use crate::error::Result;

impl GatewayClient {
    /// List the actors owned by the authenticated account
    pub async fn my_actors(&self) -> Result<Vec<ActorSummary>> {
        let url = format!("{}/api/my-actors", self.base_url);
        let response = self.authed(self.client.get(&url))?.send().await?;

        let body: ActorListResponse = self.handle_response(response).await?;
        Ok(body.actors)
    }

    /// List public actors, optionally filtered by search text and category
    ///
    /// # Arguments
    /// * `search` - Free-text filter
    /// * `category` - Category id from [`GatewayClient::categories`]
    /// * `limit` - Maximum entries; the gateway caps this at 100
    pub async fn public_actors(
        &self,
        search: Option<&str>,
        category: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<ActorSummary>> {
        let url = format!("{}/api/public-actors", self.base_url);

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(search) = search {
            params.push(("search", search.to_string()));
        }
        if let Some(category) = category {
            params.push(("category", category.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        let response = self
            .authed(self.client.get(&url))?
            .query(&params)
            .send()
            .await?;

        let body: ActorListResponse = self.handle_response(response).await?;
        Ok(body.actors)
    }

    /// Get one actor's details, including its declared input schema
    ///
    /// # Arguments
    /// * `actor_id` - The remote actor identifier
    pub async fn get_actor(&self, actor_id: &str) -> Result<ActorDetail> {
        let url = format!("{}/api/actor/{}", self.base_url, actor_id);
        let response = self.authed(self.client.get(&url))?.send().await?;

        let body: ActorDetailResponse = self.handle_response(response).await?;
        Ok(body.actor)
    }

    /// Get the static category list
    pub async fn categories(&self) -> Result<Vec<Category>> {
        let url = format!("{}/api/categories", self.base_url);
        let response = self.client.get(&url).send().await?;

        let body: CategoriesResponse = self.handle_response(response).await?;
        Ok(body.categories)
    }
}
