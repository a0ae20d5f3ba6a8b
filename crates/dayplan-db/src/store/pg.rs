//! Postgres-backed `ScheduleStore`.
//!
//! Each method checks a connection out of the pool and commits on its own;
//! batch-level atomicity is deliberately not provided (see `store::mod`).

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbPool;
use crate::db::schema;
use crate::error::DbResult;
use crate::model::alert::{Alert, NewAlert};
use crate::model::category::{Category, NewCategory};
use crate::model::event::{Event, NewEvent};
use crate::model::participant::{NewParticipant, Participant};
use crate::model::routine::{NewRoutine, Routine};
use crate::model::task::{NewTask, Task};
use crate::model::user::{NewUser, User};
use crate::store::ScheduleStore;

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleStore for PgStore {
    async fn user_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::users::table
            .find(id)
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn create_user(&self, user: NewUser) -> DbResult<User> {
        let mut conn = self.pool.get().await?;
        Ok(diesel::insert_into(schema::users::table)
            .values(&user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn category_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::categories::table
            .find(id)
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn category_by_id_for_user(&self, id: i64, user_id: i64) -> DbResult<Option<Category>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::categories::table
            .find(id)
            .filter(schema::categories::user_id.eq(user_id))
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn categories_for_user(&self, user_id: i64) -> DbResult<Vec<Category>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::categories::table
            .filter(schema::categories::user_id.eq(user_id))
            .order(schema::categories::created_at.asc())
            .select(Category::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn default_category_for_user(&self, user_id: i64) -> DbResult<Option<Category>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::categories::table
            .filter(schema::categories::user_id.eq(user_id))
            .filter(schema::categories::is_default.eq(true))
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn create_category(&self, category: NewCategory) -> DbResult<Category> {
        let mut conn = self.pool.get().await?;
        Ok(diesel::insert_into(schema::categories::table)
            .values(&category)
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn update_category(&self, category: &Category) -> DbResult<Category> {
        let mut conn = self.pool.get().await?;
        Ok(diesel::update(schema::categories::table.find(category.id))
            .set(category)
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn delete_category(&self, id: i64) -> DbResult<()> {
        let mut conn = self.pool.get().await?;
        diesel::delete(schema::categories::table.find(id))
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn event_by_id(&self, id: i64) -> DbResult<Option<Event>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::events::table
            .find(id)
            .select(Event::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn events_overlapping(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Event>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::events::table
            .inner_join(schema::participants::table)
            .filter(schema::participants::user_id.eq(user_id))
            .filter(schema::events::start_date.le(end))
            .filter(schema::events::end_date.ge(start))
            .select(Event::as_select())
            .distinct()
            .load(&mut conn)
            .await?)
    }

    async fn create_event(&self, event: NewEvent) -> DbResult<Event> {
        let mut conn = self.pool.get().await?;
        Ok(diesel::insert_into(schema::events::table)
            .values(&event)
            .returning(Event::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn update_event(&self, event: &Event) -> DbResult<Event> {
        let mut conn = self.pool.get().await?;
        Ok(diesel::update(schema::events::table.find(event.id))
            .set(event)
            .returning(Event::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn delete_event(&self, id: i64) -> DbResult<()> {
        let mut conn = self.pool.get().await?;
        diesel::delete(schema::events::table.find(id))
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn task_by_id(&self, id: i64) -> DbResult<Option<Task>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::tasks::table
            .find(id)
            .select(Task::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn uncompleted_tasks_for_user(&self, user_id: i64) -> DbResult<Vec<Task>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::tasks::table
            .inner_join(schema::participants::table)
            .filter(schema::participants::user_id.eq(user_id))
            .filter(schema::tasks::is_completed.eq(false))
            .select(Task::as_select())
            .distinct()
            .load(&mut conn)
            .await?)
    }

    async fn completed_tasks_in_range(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Task>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::tasks::table
            .inner_join(schema::participants::table)
            .filter(schema::participants::user_id.eq(user_id))
            .filter(schema::tasks::is_completed.eq(true))
            .filter(schema::tasks::completed_at.ge(start))
            .filter(schema::tasks::completed_at.le(end))
            .select(Task::as_select())
            .distinct()
            .load(&mut conn)
            .await?)
    }

    async fn create_task(&self, task: NewTask) -> DbResult<Task> {
        let mut conn = self.pool.get().await?;
        Ok(diesel::insert_into(schema::tasks::table)
            .values(&task)
            .returning(Task::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn update_task(&self, task: &Task) -> DbResult<Task> {
        let mut conn = self.pool.get().await?;
        Ok(diesel::update(schema::tasks::table.find(task.id))
            .set(task)
            .returning(Task::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn delete_task(&self, id: i64) -> DbResult<()> {
        let mut conn = self.pool.get().await?;
        diesel::delete(schema::tasks::table.find(id))
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn participant_for_event(
        &self,
        event_id: i64,
        user_id: i64,
    ) -> DbResult<Option<Participant>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::participants::table
            .filter(schema::participants::event_id.eq(event_id))
            .filter(schema::participants::user_id.eq(user_id))
            .select(Participant::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn participant_for_task(
        &self,
        task_id: i64,
        user_id: i64,
    ) -> DbResult<Option<Participant>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::participants::table
            .filter(schema::participants::task_id.eq(task_id))
            .filter(schema::participants::user_id.eq(user_id))
            .select(Participant::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn participants_of_event(&self, event_id: i64) -> DbResult<Vec<Participant>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::participants::table
            .filter(schema::participants::event_id.eq(event_id))
            .select(Participant::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn participants_of_task(&self, task_id: i64) -> DbResult<Vec<Participant>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::participants::table
            .filter(schema::participants::task_id.eq(task_id))
            .select(Participant::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn participants_in_category(&self, category_id: i64) -> DbResult<Vec<Participant>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::participants::table
            .filter(schema::participants::category_id.eq(category_id))
            .select(Participant::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn create_participant(&self, participant: NewParticipant) -> DbResult<Participant> {
        let mut conn = self.pool.get().await?;
        Ok(diesel::insert_into(schema::participants::table)
            .values(&participant)
            .returning(Participant::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn update_participant(&self, participant: &Participant) -> DbResult<Participant> {
        let mut conn = self.pool.get().await?;
        Ok(diesel::update(schema::participants::table.find(participant.id))
            .set(participant)
            .returning(Participant::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn routine_by_id(&self, id: i64) -> DbResult<Option<Routine>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::routines::table
            .find(id)
            .select(Routine::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn routines_for_user(&self, user_id: i64) -> DbResult<Vec<Routine>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::routines::table
            .filter(schema::routines::user_id.eq(user_id))
            .order(schema::routines::created_at.asc())
            .select(Routine::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn create_routine(&self, routine: NewRoutine) -> DbResult<Routine> {
        let mut conn = self.pool.get().await?;
        Ok(diesel::insert_into(schema::routines::table)
            .values(&routine)
            .returning(Routine::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn update_routine(&self, routine: &Routine) -> DbResult<Routine> {
        let mut conn = self.pool.get().await?;
        Ok(diesel::update(schema::routines::table.find(routine.id))
            .set(routine)
            .returning(Routine::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn delete_routine(&self, id: i64) -> DbResult<()> {
        let mut conn = self.pool.get().await?;
        diesel::delete(schema::routines::table.find(id))
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn alerts_for_participant(&self, participant_id: i64) -> DbResult<Vec<Alert>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::alerts::table
            .filter(schema::alerts::participant_id.eq(participant_id))
            .select(Alert::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn alerts_for_routine(&self, routine_id: i64) -> DbResult<Vec<Alert>> {
        let mut conn = self.pool.get().await?;
        Ok(schema::alerts::table
            .filter(schema::alerts::routine_id.eq(routine_id))
            .select(Alert::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn create_alert(&self, alert: NewAlert) -> DbResult<Alert> {
        let mut conn = self.pool.get().await?;
        Ok(diesel::insert_into(schema::alerts::table)
            .values(&alert)
            .returning(Alert::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn delete_alerts_for_participant(&self, participant_id: i64) -> DbResult<()> {
        let mut conn = self.pool.get().await?;
        diesel::delete(
            schema::alerts::table.filter(schema::alerts::participant_id.eq(participant_id)),
        )
        .execute(&mut conn)
        .await?;
        Ok(())
    }

    async fn delete_alerts_for_routine(&self, routine_id: i64) -> DbResult<()> {
        let mut conn = self.pool.get().await?;
        diesel::delete(schema::alerts::table.filter(schema::alerts::routine_id.eq(routine_id)))
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}
