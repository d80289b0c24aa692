//! Actor listing and detail DTOs

use serde::{Deserialize, Serialize};

use crate::domain::actor::{ActorDetail, ActorSummary};

/// Response for both own-actor and public-actor listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorListResponse {
    pub success: bool,
    pub actors: Vec<ActorSummary>,
}

/// Response for a single actor lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorDetailResponse {
    pub success: bool,
    pub actor: ActorDetail,
}

/// One entry in the static category list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<Category>,
}
