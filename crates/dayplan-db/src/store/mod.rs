//! Narrow persistence interface consumed by the reconciliation engine.
//!
//! Every method is its own commit scope: there is no transaction spanning
//! multiple calls, so a batch that fails mid-way leaves the already-applied
//! prefix persisted. The engine depends on this trait rather than on a
//! concrete backend; `PgStore` is the production implementation.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::DbResult;
use crate::model::alert::{Alert, NewAlert};
use crate::model::category::{Category, NewCategory};
use crate::model::event::{Event, NewEvent};
use crate::model::participant::{NewParticipant, Participant};
use crate::model::routine::{NewRoutine, Routine};
use crate::model::task::{NewTask, Task};
use crate::model::user::{NewUser, User};

pub mod pg;

pub use pg::PgStore;

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    // Users
    async fn user_by_id(&self, id: i64) -> DbResult<Option<User>>;
    async fn create_user(&self, user: NewUser) -> DbResult<User>;

    // Categories
    async fn category_by_id(&self, id: i64) -> DbResult<Option<Category>>;
    async fn category_by_id_for_user(&self, id: i64, user_id: i64) -> DbResult<Option<Category>>;
    async fn categories_for_user(&self, user_id: i64) -> DbResult<Vec<Category>>;
    async fn default_category_for_user(&self, user_id: i64) -> DbResult<Option<Category>>;
    async fn create_category(&self, category: NewCategory) -> DbResult<Category>;
    async fn update_category(&self, category: &Category) -> DbResult<Category>;
    async fn delete_category(&self, id: i64) -> DbResult<()>;

    // Events
    async fn event_by_id(&self, id: i64) -> DbResult<Option<Event>>;
    async fn events_overlapping(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Event>>;
    async fn create_event(&self, event: NewEvent) -> DbResult<Event>;
    async fn update_event(&self, event: &Event) -> DbResult<Event>;
    /// Cascades to the event's participants and their alerts.
    async fn delete_event(&self, id: i64) -> DbResult<()>;

    // Tasks
    async fn task_by_id(&self, id: i64) -> DbResult<Option<Task>>;
    async fn uncompleted_tasks_for_user(&self, user_id: i64) -> DbResult<Vec<Task>>;
    async fn completed_tasks_in_range(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Task>>;
    async fn create_task(&self, task: NewTask) -> DbResult<Task>;
    async fn update_task(&self, task: &Task) -> DbResult<Task>;
    /// Cascades to the task's participants and their alerts.
    async fn delete_task(&self, id: i64) -> DbResult<()>;

    // Participants
    async fn participant_for_event(
        &self,
        event_id: i64,
        user_id: i64,
    ) -> DbResult<Option<Participant>>;
    async fn participant_for_task(
        &self,
        task_id: i64,
        user_id: i64,
    ) -> DbResult<Option<Participant>>;
    async fn participants_of_event(&self, event_id: i64) -> DbResult<Vec<Participant>>;
    async fn participants_of_task(&self, task_id: i64) -> DbResult<Vec<Participant>>;
    async fn participants_in_category(&self, category_id: i64) -> DbResult<Vec<Participant>>;
    async fn create_participant(&self, participant: NewParticipant) -> DbResult<Participant>;
    async fn update_participant(&self, participant: &Participant) -> DbResult<Participant>;

    // Routines
    async fn routine_by_id(&self, id: i64) -> DbResult<Option<Routine>>;
    async fn routines_for_user(&self, user_id: i64) -> DbResult<Vec<Routine>>;
    async fn create_routine(&self, routine: NewRoutine) -> DbResult<Routine>;
    async fn update_routine(&self, routine: &Routine) -> DbResult<Routine>;
    async fn delete_routine(&self, id: i64) -> DbResult<()>;

    // Alerts
    async fn alerts_for_participant(&self, participant_id: i64) -> DbResult<Vec<Alert>>;
    async fn alerts_for_routine(&self, routine_id: i64) -> DbResult<Vec<Alert>>;
    async fn create_alert(&self, alert: NewAlert) -> DbResult<Alert>;
    async fn delete_alerts_for_participant(&self, participant_id: i64) -> DbResult<()>;
    async fn delete_alerts_for_routine(&self, routine_id: i64) -> DbResult<()>;
}
