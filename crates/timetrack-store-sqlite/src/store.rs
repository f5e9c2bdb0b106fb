//! [`SqliteStore`]: the SQLite implementation of [`TrackerStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use timetrack_core::{
  passport::PassportNumber,
  people::{People, PersonDetails},
  store::{Page, TrackerStore},
  task::{NewTask, Task},
  user::{User, UserFields, UserFilter},
};

use crate::{
  Error, Result,
  encode::{
    PEOPLE_COLUMNS, RawPeople, RawTask, RawUser, TASK_COLUMNS, USER_COLUMNS, encode_dt, now,
    stored_dt,
  },
  error::is_unique_violation,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A time-tracking store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Map a failed write, turning a `UNIQUE` violation into `conflict()`.
fn unique_or(err: tokio_rusqlite::Error, conflict: impl FnOnce() -> Error) -> Error {
  if is_unique_violation(&err) { conflict() } else { Error::Database(err) }
}

// ─── TrackerStore impl ───────────────────────────────────────────────────────

impl TrackerStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, fields: UserFields) -> Result<User> {
    let at       = now();
    let at_str   = encode_dt(at);
    let passport = fields.passport_number.clone();
    let row      = fields.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (
             passport_number, surname, name, patronymic, address, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
          rusqlite::params![
            row.passport_number,
            row.surname,
            row.name,
            row.patronymic,
            row.address,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(|e| unique_or(e, || Error::DuplicatePassport(passport)))?;

    Ok(User {
      id,
      passport_number: fields.passport_number,
      surname:         fields.surname,
      name:            fields.name,
      patronymic:      fields.patronymic,
      address:         fields.address,
      created_at:      at,
      updated_at:      at,
    })
  }

  async fn get_user(&self, id: i64) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            rusqlite::params![id],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn list_users<'a>(&'a self, filter: &'a UserFilter, page: Page) -> Result<Vec<User>> {
    let predicates: Vec<(&'static str, String)> = filter
      .predicates()
      .into_iter()
      .map(|(column, value)| (column, value.to_owned()))
      .collect();

    let raws: Vec<RawUser> = self
      .conn
      .call(move |conn| {
        // Column names come from a fixed list; only values are bound.
        let conds: Vec<String> = predicates
          .iter()
          .enumerate()
          .map(|(i, (column, _))| format!("{column} = ?{}", i + 1))
          .collect();

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let n   = predicates.len();
        let sql = format!(
          "SELECT {USER_COLUMNS} FROM users {where_clause}
           ORDER BY id
           LIMIT ?{} OFFSET ?{}",
          n + 1,
          n + 2,
        );

        let mut params: Vec<&dyn rusqlite::ToSql> = predicates
          .iter()
          .map(|(_, value)| value as &dyn rusqlite::ToSql)
          .collect();
        params.push(&page.limit);
        params.push(&page.offset);

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params.as_slice(), RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  async fn update_user(&self, mut user: User) -> Result<User> {
    user.updated_at = now();

    let id       = user.id;
    let passport = user.passport_number.clone();
    let row      = user.clone();
    let at_str   = encode_dt(user.updated_at);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users
           SET passport_number = ?1, surname = ?2, name = ?3, patronymic = ?4,
               address = ?5, updated_at = ?6
           WHERE id = ?7",
          rusqlite::params![
            row.passport_number,
            row.surname,
            row.name,
            row.patronymic,
            row.address,
            at_str,
            row.id,
          ],
        )?)
      })
      .await
      .map_err(|e| unique_or(e, || Error::DuplicatePassport(passport)))?;

    if changed == 0 {
      return Err(Error::UserNotFound(id));
    }
    Ok(user)
  }

  async fn delete_user(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| Ok(conn.execute("DELETE FROM users WHERE id = ?1", rusqlite::params![id])?))
      .await?;
    Ok(removed > 0)
  }

  // ── Tasks ─────────────────────────────────────────────────────────────────

  async fn add_task(&self, input: NewTask) -> Result<Task> {
    let at   = now();
    let task = Task {
      id:          0,
      user_id:     input.user_id,
      description: input.description,
      start_time:  input.start_time.map(stored_dt),
      end_time:    input.end_time.map(stored_dt),
      duration:    input.duration,
      created_at:  at,
      updated_at:  at,
    };

    let user_id     = task.user_id;
    let description = task.description.clone();
    let start_str   = task.start_time.map(encode_dt);
    let end_str     = task.end_time.map(encode_dt);
    let duration    = task.duration;
    let at_str      = encode_dt(at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tasks (
             user_id, description, start_time, end_time, duration, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
          rusqlite::params![user_id, description, start_str, end_str, duration, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Task { id, ..task })
  }

  async fn get_task(&self, user_id: i64, task_id: i64) -> Result<Option<Task>> {
    let raw: Option<RawTask> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?1 AND id = ?2"),
            rusqlite::params![user_id, task_id],
            RawTask::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawTask::into_task).transpose()
  }

  async fn update_task(&self, mut task: Task) -> Result<Task> {
    task.start_time = task.start_time.map(stored_dt);
    task.end_time   = task.end_time.map(stored_dt);
    task.updated_at = now();

    let id          = task.id;
    let description = task.description.clone();
    let start_str   = task.start_time.map(encode_dt);
    let end_str     = task.end_time.map(encode_dt);
    let duration    = task.duration;
    let at_str      = encode_dt(task.updated_at);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE tasks
           SET description = ?1, start_time = ?2, end_time = ?3, duration = ?4,
               updated_at = ?5
           WHERE id = ?6",
          rusqlite::params![description, start_str, end_str, duration, at_str, id],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::TaskNotFound(id));
    }
    Ok(task)
  }

  async fn list_tasks_in_period(
    &self,
    user_id: i64,
    start:   DateTime<Utc>,
    end:     DateTime<Utc>,
  ) -> Result<Vec<Task>> {
    let start_str = encode_dt(start);
    let end_str   = encode_dt(end);

    let raws: Vec<RawTask> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TASK_COLUMNS} FROM tasks
           WHERE user_id = ?1 AND start_time >= ?2 AND end_time <= ?3
           ORDER BY duration DESC, id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![user_id, start_str, end_str], RawTask::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTask::into_task).collect()
  }

  // ── People ────────────────────────────────────────────────────────────────

  async fn add_person(&self, person: PersonDetails) -> Result<People> {
    let at       = now();
    let at_str   = encode_dt(at);
    let passport = PassportNumber::new(person.passport_series, person.passport_number);
    let row      = person.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (
             passport_series, passport_number, surname, name, patronymic, address,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
          rusqlite::params![
            row.passport_series,
            row.passport_number,
            row.surname,
            row.name,
            row.patronymic,
            row.address,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(|e| unique_or(e, || Error::DuplicatePerson(passport)))?;

    Ok(People {
      id,
      passport_series: person.passport_series,
      passport_number: person.passport_number,
      surname:         person.surname,
      name:            person.name,
      patronymic:      person.patronymic,
      address:         person.address,
      created_at:      at,
      updated_at:      at,
    })
  }

  async fn get_person(&self, passport: PassportNumber) -> Result<Option<People>> {
    let raw: Option<RawPeople> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {PEOPLE_COLUMNS} FROM people
               WHERE passport_series = ?1 AND passport_number = ?2"
            ),
            rusqlite::params![passport.series, passport.number],
            RawPeople::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPeople::into_people).transpose()
  }
}
