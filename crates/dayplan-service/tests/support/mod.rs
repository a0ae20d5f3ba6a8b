//! In-memory `ScheduleStore` used by the engine tests.
//!
//! Mirrors the Postgres implementation's observable behavior, including
//! the delete cascades from schedule items to participants and alerts.

// Not every test binary touches every helper.
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use dayplan_db::error::DbResult;
use dayplan_db::model::alert::{Alert, NewAlert};
use dayplan_db::model::category::{Category, NewCategory};
use dayplan_db::model::event::{Event, NewEvent};
use dayplan_db::model::participant::{NewParticipant, Participant};
use dayplan_db::model::routine::{NewRoutine, Routine};
use dayplan_db::model::task::{NewTask, Task};
use dayplan_db::model::user::{NewUser, User};
use dayplan_db::store::ScheduleStore;
use dayplan_service::user::create_user_with_defaults;

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    categories: Vec<Category>,
    events: Vec<Event>,
    tasks: Vec<Task>,
    participants: Vec<Participant>,
    routines: Vec<Routine>,
    alerts: Vec<Alert>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn cascade_participants(&mut self, participant_ids: &[i64]) {
        self.participants.retain(|p| !participant_ids.contains(&p.id));
        self.alerts
            .retain(|a| !a.participant_id.is_some_and(|id| participant_ids.contains(&id)));
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct row count helpers for asserting on persisted state.
    pub fn alert_count(&self) -> usize {
        self.inner.lock().unwrap().alerts.len()
    }

    pub fn event_count(&self) -> usize {
        self.inner.lock().unwrap().events.len()
    }

    pub fn task_count(&self) -> usize {
        self.inner.lock().unwrap().tasks.len()
    }

    pub fn category_count(&self) -> usize {
        self.inner.lock().unwrap().categories.len()
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn user_by_id(&self, id: i64) -> DbResult<Option<User>> {
        Ok(self.inner.lock().unwrap().users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> DbResult<User> {
        let mut tables = self.inner.lock().unwrap();
        let row = User {
            id: tables.next_id(),
            name: user.name,
            email: user.email,
            created_at: Utc::now(),
        };
        tables.users.push(row.clone());
        Ok(row)
    }

    async fn category_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn category_by_id_for_user(&self, id: i64, user_id: i64) -> DbResult<Option<Category>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .categories
            .iter()
            .find(|c| c.id == id && c.user_id == user_id)
            .cloned())
    }

    async fn categories_for_user(&self, user_id: i64) -> DbResult<Vec<Category>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .categories
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn default_category_for_user(&self, user_id: i64) -> DbResult<Option<Category>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .categories
            .iter()
            .find(|c| c.user_id == user_id && c.is_default)
            .cloned())
    }

    async fn create_category(&self, category: NewCategory) -> DbResult<Category> {
        let mut tables = self.inner.lock().unwrap();
        let row = Category {
            id: tables.next_id(),
            user_id: category.user_id,
            name: category.name,
            color: category.color,
            is_default: category.is_default,
            created_at: Utc::now(),
        };
        tables.categories.push(row.clone());
        Ok(row)
    }

    async fn update_category(&self, category: &Category) -> DbResult<Category> {
        let mut tables = self.inner.lock().unwrap();
        if let Some(existing) = tables.categories.iter_mut().find(|c| c.id == category.id) {
            *existing = category.clone();
        }
        Ok(category.clone())
    }

    async fn delete_category(&self, id: i64) -> DbResult<()> {
        self.inner.lock().unwrap().categories.retain(|c| c.id != id);
        Ok(())
    }

    async fn event_by_id(&self, id: i64) -> DbResult<Option<Event>> {
        Ok(self.inner.lock().unwrap().events.iter().find(|e| e.id == id).cloned())
    }

    async fn events_overlapping(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Event>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .events
            .iter()
            .filter(|e| e.start_date <= end && e.end_date >= start)
            .filter(|e| {
                tables
                    .participants
                    .iter()
                    .any(|p| p.event_id == Some(e.id) && p.user_id == user_id)
            })
            .cloned()
            .collect())
    }

    async fn create_event(&self, event: NewEvent) -> DbResult<Event> {
        let mut tables = self.inner.lock().unwrap();
        let row = Event {
            id: tables.next_id(),
            name: event.name,
            description: event.description,
            location: event.location,
            start_date: event.start_date,
            end_date: event.end_date,
            start_time: event.start_time,
            end_time: event.end_time,
            source_text: event.source_text,
            visibility: event.visibility,
            created_at: Utc::now(),
        };
        tables.events.push(row.clone());
        Ok(row)
    }

    async fn update_event(&self, event: &Event) -> DbResult<Event> {
        let mut tables = self.inner.lock().unwrap();
        if let Some(existing) = tables.events.iter_mut().find(|e| e.id == event.id) {
            *existing = event.clone();
        }
        Ok(event.clone())
    }

    async fn delete_event(&self, id: i64) -> DbResult<()> {
        let mut tables = self.inner.lock().unwrap();
        tables.events.retain(|e| e.id != id);
        let participant_ids: Vec<i64> = tables
            .participants
            .iter()
            .filter(|p| p.event_id == Some(id))
            .map(|p| p.id)
            .collect();
        tables.cascade_participants(&participant_ids);
        Ok(())
    }

    async fn task_by_id(&self, id: i64) -> DbResult<Option<Task>> {
        Ok(self.inner.lock().unwrap().tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn uncompleted_tasks_for_user(&self, user_id: i64) -> DbResult<Vec<Task>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .tasks
            .iter()
            .filter(|t| !t.is_completed)
            .filter(|t| {
                tables
                    .participants
                    .iter()
                    .any(|p| p.task_id == Some(t.id) && p.user_id == user_id)
            })
            .cloned()
            .collect())
    }

    async fn completed_tasks_in_range(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Task>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .tasks
            .iter()
            .filter(|t| t.is_completed)
            .filter(|t| t.completed_at.is_some_and(|d| d >= start && d <= end))
            .filter(|t| {
                tables
                    .participants
                    .iter()
                    .any(|p| p.task_id == Some(t.id) && p.user_id == user_id)
            })
            .cloned()
            .collect())
    }

    async fn create_task(&self, task: NewTask) -> DbResult<Task> {
        let mut tables = self.inner.lock().unwrap();
        let row = Task {
            id: tables.next_id(),
            name: task.name,
            description: task.description,
            location: task.location,
            start_time: task.start_time,
            end_time: task.end_time,
            scheduled_time: task.scheduled_time,
            is_completed: task.is_completed,
            completed_at: None,
            source_text: task.source_text,
            visibility: task.visibility,
            created_at: Utc::now(),
        };
        tables.tasks.push(row.clone());
        Ok(row)
    }

    async fn update_task(&self, task: &Task) -> DbResult<Task> {
        let mut tables = self.inner.lock().unwrap();
        if let Some(existing) = tables.tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task.clone();
        }
        Ok(task.clone())
    }

    async fn delete_task(&self, id: i64) -> DbResult<()> {
        let mut tables = self.inner.lock().unwrap();
        tables.tasks.retain(|t| t.id != id);
        let participant_ids: Vec<i64> = tables
            .participants
            .iter()
            .filter(|p| p.task_id == Some(id))
            .map(|p| p.id)
            .collect();
        tables.cascade_participants(&participant_ids);
        Ok(())
    }

    async fn participant_for_event(
        &self,
        event_id: i64,
        user_id: i64,
    ) -> DbResult<Option<Participant>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .participants
            .iter()
            .find(|p| p.event_id == Some(event_id) && p.user_id == user_id)
            .cloned())
    }

    async fn participant_for_task(
        &self,
        task_id: i64,
        user_id: i64,
    ) -> DbResult<Option<Participant>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .participants
            .iter()
            .find(|p| p.task_id == Some(task_id) && p.user_id == user_id)
            .cloned())
    }

    async fn participants_of_event(&self, event_id: i64) -> DbResult<Vec<Participant>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .participants
            .iter()
            .filter(|p| p.event_id == Some(event_id))
            .cloned()
            .collect())
    }

    async fn participants_of_task(&self, task_id: i64) -> DbResult<Vec<Participant>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .participants
            .iter()
            .filter(|p| p.task_id == Some(task_id))
            .cloned()
            .collect())
    }

    async fn participants_in_category(&self, category_id: i64) -> DbResult<Vec<Participant>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .participants
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn create_participant(&self, participant: NewParticipant) -> DbResult<Participant> {
        let mut tables = self.inner.lock().unwrap();
        let row = Participant {
            id: tables.next_id(),
            user_id: participant.user_id,
            event_id: participant.event_id,
            task_id: participant.task_id,
            category_id: participant.category_id,
            role: participant.role,
            status: participant.status,
            created_at: Utc::now(),
        };
        tables.participants.push(row.clone());
        Ok(row)
    }

    async fn update_participant(&self, participant: &Participant) -> DbResult<Participant> {
        let mut tables = self.inner.lock().unwrap();
        if let Some(existing) = tables
            .participants
            .iter_mut()
            .find(|p| p.id == participant.id)
        {
            *existing = participant.clone();
        }
        Ok(participant.clone())
    }

    async fn routine_by_id(&self, id: i64) -> DbResult<Option<Routine>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .routines
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn routines_for_user(&self, user_id: i64) -> DbResult<Vec<Routine>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .routines
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_routine(&self, routine: NewRoutine) -> DbResult<Routine> {
        let mut tables = self.inner.lock().unwrap();
        let row = Routine {
            id: tables.next_id(),
            user_id: routine.user_id,
            name: routine.name,
            days_of_week: routine.days_of_week,
            start_time: routine.start_time,
            end_time: routine.end_time,
            icon: routine.icon,
            color: routine.color,
            created_at: Utc::now(),
        };
        tables.routines.push(row.clone());
        Ok(row)
    }

    async fn update_routine(&self, routine: &Routine) -> DbResult<Routine> {
        let mut tables = self.inner.lock().unwrap();
        if let Some(existing) = tables.routines.iter_mut().find(|r| r.id == routine.id) {
            *existing = routine.clone();
        }
        Ok(routine.clone())
    }

    async fn delete_routine(&self, id: i64) -> DbResult<()> {
        let mut tables = self.inner.lock().unwrap();
        tables.routines.retain(|r| r.id != id);
        tables.alerts.retain(|a| a.routine_id != Some(id));
        Ok(())
    }

    async fn alerts_for_participant(&self, participant_id: i64) -> DbResult<Vec<Alert>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .alerts
            .iter()
            .filter(|a| a.participant_id == Some(participant_id))
            .cloned()
            .collect())
    }

    async fn alerts_for_routine(&self, routine_id: i64) -> DbResult<Vec<Alert>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .alerts
            .iter()
            .filter(|a| a.routine_id == Some(routine_id))
            .cloned()
            .collect())
    }

    async fn create_alert(&self, alert: NewAlert) -> DbResult<Alert> {
        let mut tables = self.inner.lock().unwrap();
        let row = Alert {
            id: tables.next_id(),
            participant_id: alert.participant_id,
            routine_id: alert.routine_id,
            kind: alert.kind,
            minutes_before: alert.minutes_before,
            created_at: Utc::now(),
        };
        tables.alerts.push(row.clone());
        Ok(row)
    }

    async fn delete_alerts_for_participant(&self, participant_id: i64) -> DbResult<()> {
        self.inner
            .lock()
            .unwrap()
            .alerts
            .retain(|a| a.participant_id != Some(participant_id));
        Ok(())
    }

    async fn delete_alerts_for_routine(&self, routine_id: i64) -> DbResult<()> {
        self.inner
            .lock()
            .unwrap()
            .alerts
            .retain(|a| a.routine_id != Some(routine_id));
        Ok(())
    }
}

/// Creates a user with seeded categories and returns `(user_id, default_category_id)`.
pub async fn seed_user(store: &MemoryStore, name: &str) -> (i64, i64) {
    let user = create_user_with_defaults(store, name, &format!("{name}@example.com"))
        .await
        .unwrap();
    let default = store
        .default_category_for_user(user.id)
        .await
        .unwrap()
        .unwrap();
    (user.id, default.id)
}
