//! Wire shapes of the remote automation API
//!
//! The remote service wraps every payload in a `data` envelope; list
//! endpoints nest the entries under `data.items`. These structs exist only
//! to deserialize that shape and are mapped into core domain types before
//! leaving this crate.

use serde::Deserialize;
use serde_json::Value;

use actrun_core::domain::actor::{ActorDetail, ActorSummary};
use actrun_core::domain::run::{RunSnapshot, RunStatus, StartedRun};
use actrun_core::domain::user::UserAccount;

#[derive(Debug, Deserialize)]
pub(crate) struct Wrapped<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Paged<T> {
    pub data: Page<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireUser {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub plan: Option<Value>,
}

impl From<WireUser> for UserAccount {
    fn from(user: WireUser) -> Self {
        UserAccount {
            username: user.username,
            email: user.email,
            plan: user.plan,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireActor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub modified_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl WireActor {
    /// Reshapes an own-actor listing entry.
    pub fn into_summary(self) -> ActorSummary {
        let title = self.title.clone().unwrap_or_else(|| self.name.clone());
        ActorSummary {
            id: self.id,
            name: self.name,
            username: self.username,
            title,
            description: self.description,
            category: None,
            is_public: self.is_public.unwrap_or(false),
            featured: self.featured,
            created_at: self.created_at,
            modified_at: self.modified_at,
        }
    }

    /// Reshapes a store listing entry; store actors are public by
    /// definition and carry their first category.
    pub fn into_store_summary(self) -> ActorSummary {
        let title = self.title.clone().unwrap_or_else(|| self.name.clone());
        let category = self
            .categories
            .as_ref()
            .and_then(|c| c.first())
            .cloned();
        ActorSummary {
            id: self.id,
            name: self.name,
            username: self.username,
            title,
            description: self.description,
            category,
            is_public: true,
            featured: self.featured,
            created_at: self.created_at,
            modified_at: self.modified_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireActorDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub input_schema: Option<Value>,
    #[serde(default)]
    pub output_schema: Option<Value>,
    #[serde(default)]
    pub default_run_input: Option<Value>,
    #[serde(default)]
    pub example_run_input: Option<Value>,
    #[serde(default)]
    pub versions: Option<Value>,
}

impl From<WireActorDetail> for ActorDetail {
    fn from(actor: WireActorDetail) -> Self {
        let title = actor.title.clone().unwrap_or_else(|| actor.name.clone());
        ActorDetail {
            id: actor.id,
            name: actor.name,
            title,
            description: actor.description,
            input_schema: actor.input_schema,
            output_schema: actor.output_schema,
            default_run_input: actor
                .default_run_input
                .unwrap_or_else(|| Value::Object(Default::default())),
            example_run_input: actor
                .example_run_input
                .unwrap_or_else(|| Value::Object(Default::default())),
            versions: actor.versions,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireRun {
    pub id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub stats: Option<Value>,
    #[serde(default)]
    pub meta: Option<Value>,
}

impl From<WireRun> for StartedRun {
    fn from(run: WireRun) -> Self {
        StartedRun {
            id: run.id,
            status: run.status,
        }
    }
}

impl From<WireRun> for RunSnapshot {
    fn from(run: WireRun) -> Self {
        RunSnapshot {
            id: run.id,
            status: run.status,
            started_at: run.started_at,
            finished_at: run.finished_at,
            stats: run.stats,
            meta: run.meta,
        }
    }
}
