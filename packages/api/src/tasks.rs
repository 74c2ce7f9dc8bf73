//! # Task client
//!
//! Typed CRUD over `/api/{user_id}/tasks`, scoped to the signed-in user and
//! routed through the [`Gateway`]. Response shapes are validated here once, so
//! UI call sites receive `Task` values or an [`ApiError`], never raw JSON.
//!
//! | Method | HTTP | Path |
//! |--------|------|------|
//! | [`list`](TaskClient::list) | GET | `/api/{user_id}/tasks` |
//! | [`create`](TaskClient::create) | POST | `/api/{user_id}/tasks` |
//! | [`get`](TaskClient::get) | GET | `/api/{user_id}/tasks/{id}` |
//! | [`update`](TaskClient::update) | PUT | `/api/{user_id}/tasks/{id}` |
//! | [`set_completed`](TaskClient::set_completed) | PATCH | `/api/{user_id}/tasks/{id}/complete` |
//! | [`delete`](TaskClient::delete) | DELETE | `/api/{user_id}/tasks/{id}` |

use serde::Serialize;
use store::KeyValueStore;

use crate::error::ApiError;
use crate::gateway::{Gateway, RequestOptions};
use crate::models::{Task, TaskDraft, TaskList};
use crate::navigator::Navigator;
use crate::response::{check, read_json};

#[derive(Serialize)]
struct TaskBody<'a> {
    title: &'a str,
    description: Option<&'a str>,
    completed: bool,
}

impl<'a> TaskBody<'a> {
    fn new(draft: &'a TaskDraft, completed: bool) -> Self {
        Self {
            title: draft.title(),
            description: draft.description(),
            completed,
        }
    }
}

#[derive(Serialize)]
struct CompleteBody {
    completed: bool,
}

pub struct TaskClient<S: KeyValueStore, N: Navigator> {
    gateway: Gateway<S, N>,
}

impl<S: KeyValueStore, N: Navigator> Clone for TaskClient<S, N> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<S: KeyValueStore, N: Navigator> TaskClient<S, N> {
    pub fn new(gateway: Gateway<S, N>) -> Self {
        Self { gateway }
    }

    fn collection_path(&self) -> Result<String, ApiError> {
        let session = self.gateway.require_session()?;
        Ok(format!("/api/{}/tasks", session.user.id))
    }

    fn task_path(&self, id: i64) -> Result<String, ApiError> {
        Ok(format!("{}/{}", self.collection_path()?, id))
    }

    /// All tasks of the signed-in user.
    pub async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let path = self.collection_path()?;
        let response = self.gateway.request(&path, RequestOptions::get()).await?;
        let response = check(response, "Unable to load tasks").await?;
        let list: TaskList = read_json(response, &path).await?;
        Ok(list.into_tasks())
    }

    pub async fn create(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        let path = self.collection_path()?;
        let options = RequestOptions::post().json(&TaskBody::new(draft, false))?;
        let response = self.gateway.request(&path, options).await?;
        let response = check(response, "Unable to save task").await?;
        read_json(response, &path).await
    }

    pub async fn get(&self, id: i64) -> Result<Task, ApiError> {
        let path = self.task_path(id)?;
        let response = self.gateway.request(&path, RequestOptions::get()).await?;
        let response = check(response, "Task not found").await?;
        read_json(response, &path).await
    }

    /// Replace title, description and completion flag.
    pub async fn update(&self, id: i64, draft: &TaskDraft, completed: bool) -> Result<Task, ApiError> {
        let path = self.task_path(id)?;
        let options = RequestOptions::put().json(&TaskBody::new(draft, completed))?;
        let response = self.gateway.request(&path, options).await?;
        let response = check(response, "Unable to update task").await?;
        read_json(response, &path).await
    }

    pub async fn set_completed(&self, id: i64, completed: bool) -> Result<Task, ApiError> {
        let path = format!("{}/complete", self.task_path(id)?);
        let options = RequestOptions::patch().json(&CompleteBody { completed })?;
        let response = self.gateway.request(&path, options).await?;
        let response = check(response, "Unable to update task").await?;
        read_json(response, &path).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let path = self.task_path(id)?;
        let response = self.gateway.request(&path, RequestOptions::delete()).await?;
        check(response, "Unable to delete task").await?;
        Ok(())
    }
}
