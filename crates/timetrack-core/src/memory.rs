//! In-memory [`TrackerStore`] used by tests and local experiments.

use std::{
  collections::BTreeMap,
  sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::{DateTime, Utc};

use crate::{
  Error, Result,
  passport::PassportNumber,
  people::{People, PersonDetails},
  store::{Page, TrackerStore},
  task::{NewTask, Task},
  user::{User, UserFields, UserFilter},
};

/// Thread-safe in-memory store. Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
  next_id: i64,
  users:   BTreeMap<i64, User>,
  tasks:   BTreeMap<i64, Task>,
  people:  BTreeMap<i64, People>,
}

impl MemoryState {
  fn allocate_id(&mut self) -> i64 {
    self.next_id += 1;
    self.next_id
  }

  fn passport_taken(&self, passport_number: &str, except: Option<i64>) -> bool {
    self
      .users
      .values()
      .any(|u| u.passport_number == passport_number && Some(u.id) != except)
  }
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn read(&self) -> Result<RwLockReadGuard<'_, MemoryState>> {
    self.state.read().map_err(|_| poisoned())
  }

  fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryState>> {
    self.state.write().map_err(|_| poisoned())
  }
}

fn poisoned() -> Error { Error::Persistence("memory store lock poisoned".into()) }

fn duplicate_passport(passport_number: &str) -> Error {
  Error::Conflict(format!("passport number {passport_number:?} is already registered"))
}

impl TrackerStore for MemoryStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, fields: UserFields) -> Result<User> {
    let mut state = self.write()?;
    if state.passport_taken(&fields.passport_number, None) {
      return Err(duplicate_passport(&fields.passport_number));
    }

    let now = Utc::now();
    let user = User {
      id:              state.allocate_id(),
      passport_number: fields.passport_number,
      surname:         fields.surname,
      name:            fields.name,
      patronymic:      fields.patronymic,
      address:         fields.address,
      created_at:      now,
      updated_at:      now,
    };
    state.users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn get_user(&self, id: i64) -> Result<Option<User>> {
    Ok(self.read()?.users.get(&id).cloned())
  }

  async fn list_users<'a>(&'a self, filter: &'a UserFilter, page: Page) -> Result<Vec<User>> {
    let state = self.read()?;
    let skip  = usize::try_from(page.offset).unwrap_or(usize::MAX);
    let take  = usize::try_from(page.limit).unwrap_or(usize::MAX);
    Ok(
      state
        .users
        .values()
        .filter(|u| filter.matches(u))
        .skip(skip)
        .take(take)
        .cloned()
        .collect(),
    )
  }

  async fn update_user(&self, mut user: User) -> Result<User> {
    let mut state = self.write()?;
    if !state.users.contains_key(&user.id) {
      return Err(Error::NotFound(format!("user {} not found", user.id)));
    }
    if state.passport_taken(&user.passport_number, Some(user.id)) {
      return Err(duplicate_passport(&user.passport_number));
    }
    user.updated_at = Utc::now();
    state.users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn delete_user(&self, id: i64) -> Result<bool> {
    Ok(self.write()?.users.remove(&id).is_some())
  }

  // ── Tasks ─────────────────────────────────────────────────────────────────

  async fn add_task(&self, input: NewTask) -> Result<Task> {
    let mut state = self.write()?;
    let now = Utc::now();
    let task = Task {
      id:          state.allocate_id(),
      user_id:     input.user_id,
      description: input.description,
      start_time:  input.start_time,
      end_time:    input.end_time,
      duration:    input.duration,
      created_at:  now,
      updated_at:  now,
    };
    state.tasks.insert(task.id, task.clone());
    Ok(task)
  }

  async fn get_task(&self, user_id: i64, task_id: i64) -> Result<Option<Task>> {
    Ok(
      self
        .read()?
        .tasks
        .get(&task_id)
        .filter(|t| t.user_id == user_id)
        .cloned(),
    )
  }

  async fn update_task(&self, mut task: Task) -> Result<Task> {
    let mut state = self.write()?;
    if !state.tasks.contains_key(&task.id) {
      return Err(Error::NotFound(format!("task {} not found", task.id)));
    }
    task.updated_at = Utc::now();
    state.tasks.insert(task.id, task.clone());
    Ok(task)
  }

  async fn list_tasks_in_period(
    &self,
    user_id: i64,
    start:   DateTime<Utc>,
    end:     DateTime<Utc>,
  ) -> Result<Vec<Task>> {
    let state = self.read()?;
    let mut tasks: Vec<Task> = state
      .tasks
      .values()
      .filter(|t| t.user_id == user_id)
      .filter(|t| t.start_time.is_some_and(|s| s >= start))
      .filter(|t| t.end_time.is_some_and(|e| e <= end))
      .cloned()
      .collect();
    tasks.sort_by(|a, b| b.duration.cmp(&a.duration));
    Ok(tasks)
  }

  // ── People ────────────────────────────────────────────────────────────────

  async fn add_person(&self, person: PersonDetails) -> Result<People> {
    let mut state = self.write()?;
    let passport = PassportNumber::new(person.passport_series, person.passport_number);
    if state.people.values().any(|p| p.passport() == passport) {
      return Err(Error::Conflict(format!("person with passport {passport} already exists")));
    }

    let now = Utc::now();
    let people = People {
      id:              state.allocate_id(),
      passport_series: person.passport_series,
      passport_number: person.passport_number,
      surname:         person.surname,
      name:            person.name,
      patronymic:      person.patronymic,
      address:         person.address,
      created_at:      now,
      updated_at:      now,
    };
    state.people.insert(people.id, people.clone());
    Ok(people)
  }

  async fn get_person(&self, passport: PassportNumber) -> Result<Option<People>> {
    Ok(
      self
        .read()?
        .people
        .values()
        .find(|p| p.passport() == passport)
        .cloned(),
    )
  }
}
