//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Duration, TimeZone, Utc};
use timetrack_core::{
  passport::PassportNumber,
  people::PersonDetails,
  store::{Page, TrackerStore},
  task::NewTask,
  user::{UserFields, UserFilter},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn user(passport: &str, surname: &str, name: &str) -> UserFields {
  UserFields {
    passport_number: passport.into(),
    surname:         surname.into(),
    name:            name.into(),
    patronymic:      "Ivanovich".into(),
    address:         "Moscow".into(),
  }
}

fn nine_am() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap() }

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_user() {
  let s = store().await;

  let created = s.add_user(user("1234 567890", "Ivanov", "Ivan")).await.unwrap();
  assert!(created.id > 0);

  let fetched = s.get_user(created.id).await.unwrap();
  assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = store().await;
  assert_eq!(s.get_user(404).await.unwrap(), None);
}

#[tokio::test]
async fn duplicate_passport_is_a_conflict() {
  let s = store().await;
  s.add_user(user("1234 567890", "Ivanov", "Ivan")).await.unwrap();

  let err = s.add_user(user("1234 567890", "Petrov", "Petr")).await.unwrap_err();
  assert!(matches!(err, Error::DuplicatePassport(_)), "{err}");
  assert!(matches!(timetrack_core::Error::from(err), timetrack_core::Error::Conflict(_)));
}

#[tokio::test]
async fn update_user_overwrites_fields() {
  let s = store().await;
  let mut u = s.add_user(user("1234 567890", "Ivanov", "Ivan")).await.unwrap();

  u.surname = "Petrov".into();
  u.address = String::new();
  let updated = s.update_user(u.clone()).await.unwrap();
  assert!(updated.updated_at >= u.updated_at);

  let fetched = s.get_user(u.id).await.unwrap().unwrap();
  assert_eq!(fetched.surname, "Petrov");
  assert_eq!(fetched.address, "");
  assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_user_into_taken_passport_is_a_conflict() {
  let s = store().await;
  s.add_user(user("1 1", "A", "A")).await.unwrap();
  let mut b = s.add_user(user("2 2", "B", "B")).await.unwrap();

  b.passport_number = "1 1".into();
  let err = s.update_user(b).await.unwrap_err();
  assert!(matches!(err, Error::DuplicatePassport(_)), "{err}");
}

#[tokio::test]
async fn update_missing_user_fails() {
  let s = store().await;
  let mut ghost = s.add_user(user("1 1", "A", "A")).await.unwrap();
  ghost.id = 999;
  assert!(matches!(s.update_user(ghost).await, Err(Error::UserNotFound(999))));
}

#[tokio::test]
async fn delete_user_reports_whether_a_row_was_removed() {
  let s = store().await;
  let u = s.add_user(user("1 1", "A", "A")).await.unwrap();

  assert!(s.delete_user(u.id).await.unwrap());
  assert!(!s.delete_user(u.id).await.unwrap());
  assert_eq!(s.get_user(u.id).await.unwrap(), None);
}

#[tokio::test]
async fn list_users_filters_and_paginates() {
  let s = store().await;
  for i in 0..7 {
    s.add_user(user(&format!("1000 {i}"), "Ivanov", "Ivan")).await.unwrap();
  }
  s.add_user(user("2000 1", "Petrov", "Ivan")).await.unwrap();

  let ivanovs = UserFilter { surname: Some("Ivanov".into()), ..UserFilter::default() };
  let first  = s.list_users(&ivanovs, Page::new(1, 5)).await.unwrap();
  let second = s.list_users(&ivanovs, Page::new(2, 5)).await.unwrap();
  assert_eq!(first.len(), 5);
  assert_eq!(second.len(), 2);
  assert!(first.iter().chain(&second).all(|u| u.surname == "Ivanov"));
  assert!(second.iter().all(|u| first.iter().all(|f| f.id != u.id)));

  let both = UserFilter {
    surname: Some("Petrov".into()),
    name: Some("Ivan".into()),
    ..UserFilter::default()
  };
  let found = s.list_users(&both, Page::default()).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].passport_number, "2000 1");

  let everyone = s.list_users(&UserFilter::default(), Page::new(1, 100)).await.unwrap();
  assert_eq!(everyone.len(), 8);
}

#[tokio::test]
async fn filter_values_are_bound_not_interpolated() {
  let s = store().await;
  s.add_user(user("1 1", "O'Brien", "Pat")).await.unwrap();

  let filter = UserFilter { surname: Some("O'Brien".into()), ..UserFilter::default() };
  assert_eq!(s.list_users(&filter, Page::default()).await.unwrap().len(), 1);

  let hostile = UserFilter { name: Some("x' OR '1'='1".into()), ..UserFilter::default() };
  assert!(s.list_users(&hostile, Page::default()).await.unwrap().is_empty());
}

// ─── Tasks ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_task_by_composite_key() {
  let s = store().await;
  let task = s.add_task(NewTask::new(3, "write report")).await.unwrap();
  assert_eq!(task.start_time, None);

  assert_eq!(s.get_task(3, task.id).await.unwrap(), Some(task.clone()));
  assert_eq!(s.get_task(4, task.id).await.unwrap(), None);
}

#[tokio::test]
async fn update_task_persists_lifecycle_fields() {
  let s = store().await;
  let mut task = s.add_task(NewTask::new(1, "deploy")).await.unwrap();

  task.start(nine_am());
  task.end(nine_am() + Duration::minutes(60)).unwrap();
  let saved = s.update_task(task).await.unwrap();

  let fetched = s.get_task(1, saved.id).await.unwrap().unwrap();
  assert_eq!(fetched, saved);
  assert_eq!(fetched.duration, 60);
  assert_eq!(fetched.start_time, Some(nine_am()));
}

#[tokio::test]
async fn tasks_survive_user_deletion() {
  let s = store().await;
  let u = s.add_user(user("1 1", "A", "A")).await.unwrap();
  let task = s.add_task(NewTask::new(u.id, "orphan")).await.unwrap();

  assert!(s.delete_user(u.id).await.unwrap());
  assert!(s.get_task(u.id, task.id).await.unwrap().is_some());
}

#[tokio::test]
async fn period_query_orders_by_duration_and_skips_open_tasks() {
  let s = store().await;
  let base = nine_am();

  for (minutes, offset) in [(15, 0), (90, 30), (45, 180)] {
    let start = base + Duration::minutes(offset);
    s.add_task(NewTask::finished(1, format!("{minutes}"), start, start + Duration::minutes(minutes)).unwrap())
      .await
      .unwrap();
  }
  let mut open = NewTask::new(1, "open");
  open.start_time = Some(base + Duration::minutes(5));
  s.add_task(open).await.unwrap();
  s.add_task(NewTask::new(1, "never started")).await.unwrap();
  let late = base + Duration::hours(20);
  s.add_task(NewTask::finished(1, "late", late, late + Duration::minutes(300)).unwrap())
    .await
    .unwrap();

  let tasks = s
    .list_tasks_in_period(1, base, base + Duration::hours(8))
    .await
    .unwrap();
  let durations: Vec<i64> = tasks.iter().map(|t| t.duration).collect();
  assert_eq!(durations, vec![90, 45, 15]);

  assert!(s.list_tasks_in_period(2, base, base + Duration::hours(8)).await.unwrap().is_empty());
}

#[tokio::test]
async fn period_bounds_are_inclusive() {
  let s = store().await;
  let start = nine_am();
  let end = start + Duration::minutes(30);
  s.add_task(NewTask::finished(1, "exact", start, end).unwrap()).await.unwrap();

  assert_eq!(s.list_tasks_in_period(1, start, end).await.unwrap().len(), 1);
  assert!(s
    .list_tasks_in_period(1, start + Duration::seconds(1), end)
    .await
    .unwrap()
    .is_empty());
}

// ─── People ──────────────────────────────────────────────────────────────────

fn smith() -> PersonDetails {
  PersonDetails {
    passport_series: 1001,
    passport_number: 100_001,
    surname:         "Smith".into(),
    name:            "John".into(),
    patronymic:      "Johnson".into(),
    address:         "Moscow".into(),
  }
}

#[tokio::test]
async fn person_lookup_by_passport_pair() {
  let s = store().await;
  let added = s.add_person(smith()).await.unwrap();

  let found = s.get_person(PassportNumber::new(1001, 100_001)).await.unwrap();
  assert_eq!(found, Some(added));
  assert_eq!(s.get_person(PassportNumber::new(1001, 100_002)).await.unwrap(), None);
}

#[tokio::test]
async fn passport_pair_is_unique_but_components_are_not() {
  let s = store().await;
  s.add_person(smith()).await.unwrap();

  let err = s.add_person(smith()).await.unwrap_err();
  assert!(matches!(err, Error::DuplicatePerson(_)), "{err}");

  let same_series = PersonDetails { passport_number: 100_002, ..smith() };
  assert!(s.add_person(same_series).await.is_ok());
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seeding_resets_and_populates() {
  let s = store().await;
  s.add_user(user("5555 000000", "Stale", "Row")).await.unwrap();

  let summary = s.seed_demo_data().await.unwrap();
  assert!(summary.users > 0);
  assert_eq!(summary.tasks, summary.users * 3);
  assert!(summary.people > 0);

  let stale = UserFilter { surname: Some("Stale".into()), ..UserFilter::default() };
  assert!(s.list_users(&stale, Page::default()).await.unwrap().is_empty());

  let again = s.seed_demo_data().await.unwrap();
  assert_eq!(again, summary);

  let ivanov = UserFilter {
    passport_number: Some("1234 567890".into()),
    ..UserFilter::default()
  };
  let ivanov = s.list_users(&ivanov, Page::default()).await.unwrap();
  assert_eq!(ivanov.len(), 1);

  let everything = s
    .list_tasks_in_period(
      ivanov[0].id,
      Utc::now() - Duration::days(1),
      Utc::now() + Duration::days(1),
    )
    .await
    .unwrap();
  let durations: Vec<i64> = everything.iter().map(|t| t.duration).collect();
  assert_eq!(durations, vec![180, 120, 60]);

  assert!(s.get_person(PassportNumber::new(1001, 100_001)).await.unwrap().is_some());
}
