//! Demo data for local development.

use chrono::Duration;
use timetrack_core::{
  people::PersonDetails,
  store::TrackerStore,
  task::NewTask,
  user::UserFields,
};

use crate::{Result, SqliteStore, encode::now};

/// `(passport, surname, name, patronymic, address)`
const USERS: &[(&str, &str, &str, &str, &str)] = &[
  ("1234 567890", "Ivanov", "Ivan", "Ivanovich", "г. Москва, ул. Ленина, д. 5, кв. 1"),
  ("2345 678901", "Petrov", "Petr", "Petrovich", "г. Санкт-Петербург, Невский проспект, д. 10, кв. 2"),
  ("3456 789012", "Sidorov", "Sidr", "Sidorovich", "г. Казань, ул. Баумана, д. 15, кв. 3"),
  ("4567 890123", "Smirnov", "Sergey", "Sergeevich", "г. Новосибирск, ул. Красный проспект, д. 20, кв. 4"),
  ("5678 901234", "Kuznetsov", "Nikolay", "Nikolaevich", "г. Екатеринбург, ул. Ленина, д. 25, кв. 5"),
  ("6789 012345", "Popov", "Aleksey", "Alexeevich", "г. Нижний Новгород, ул. Горького, д. 30, кв. 6"),
  ("7890 123456", "Vasiliev", "Dmitry", "Dmitrievich", "г. Самара, ул. Ленина, д. 35, кв. 7"),
  ("8901 234567", "Mikhailov", "Mikhail", "Mikhailovich", "г. Омск, ул. Ленина, д. 40, кв. 8"),
  ("9012 345678", "Fedorov", "Fedor", "Fedorovich", "г. Казань, ул. Ленина, д. 45, кв. 9"),
  ("0123 456789", "Kovalev", "Vladimir", "Vladimirovich", "г. Челябинск, ул. Ленина, д. 50, кв. 10"),
];

/// `(series, number, surname, name, patronymic, address)`
const PEOPLE: &[(i64, i64, &str, &str, &str, &str)] = &[
  (1001, 100_001, "Smith", "John", "Johnson", "г. Москва, ул. Пушкина, д. 1, кв. 1"),
  (1002, 100_002, "Johnson", "Jane", "Janet", "г. Санкт-Петербург, ул. Пушкина, д. 2, кв. 2"),
  (1003, 100_003, "Brown", "Charlie", "Charles", "г. Казань, ул. Пушкина, д. 3, кв. 3"),
  (1004, 100_004, "Davis", "Alice", "Alicia", "г. Новосибирск, ул. Пушкина, д. 4, кв. 4"),
  (1005, 100_005, "Miller", "Robert", "Roberts", "г. Екатеринбург, ул. Пушкина, д. 5, кв. 5"),
  (1006, 100_006, "Wilson", "James", "Jim", "г. Нижний Новгород, ул. Пушкина, д. 6, кв. 6"),
  (1007, 100_007, "Moore", "Lisa", "Lilian", "г. Самара, ул. Пушкина, д. 7, кв. 7"),
  (1008, 100_008, "Taylor", "David", "Dave", "г. Омск, ул. Пушкина, д. 8, кв. 8"),
  (1009, 100_009, "Anderson", "Eve", "Evans", "г. Челябинск, ул. Пушкина, д. 9, кв. 9"),
  (1010, 100_010, "Thomas", "Frank", "Franklin", "г. Уфа, ул. Пушкина, д. 10, кв. 10"),
];

/// `(description, hours ago started, hours ago ended)`, lasting 60, 120 and 180 minutes.
const TASKS: &[(&str, i64, i64)] = &[("Task 1", 10, 9), ("Task 2", 9, 7), ("Task 3", 5, 2)];

/// Row counts inserted by [`SqliteStore::seed_demo_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
  pub users:  usize,
  pub tasks:  usize,
  pub people: usize,
}

impl SqliteStore {
  /// Wipe every table and load a fixed demo data set: users with three
  /// finished tasks each, and registry records for enrolment.
  pub async fn seed_demo_data(&self) -> Result<SeedSummary> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(
          "DELETE FROM tasks;
           DELETE FROM users;
           DELETE FROM people;",
        )?;
        Ok(())
      })
      .await?;

    let mut summary = SeedSummary { users: 0, tasks: 0, people: 0 };
    let at = now();

    for &(passport, surname, name, patronymic, address) in USERS {
      let user = self
        .add_user(UserFields {
          passport_number: passport.to_owned(),
          surname:         surname.to_owned(),
          name:            name.to_owned(),
          patronymic:      patronymic.to_owned(),
          address:         address.to_owned(),
        })
        .await?;
      summary.users += 1;

      for &(description, started, ended) in TASKS {
        let task = NewTask::finished(
          user.id,
          description,
          at - Duration::hours(started),
          at - Duration::hours(ended),
        )?;
        self.add_task(task).await?;
        summary.tasks += 1;
      }
    }

    for &(series, number, surname, name, patronymic, address) in PEOPLE {
      self
        .add_person(PersonDetails {
          passport_series: series,
          passport_number: number,
          surname:         surname.to_owned(),
          name:            name.to_owned(),
          patronymic:      patronymic.to_owned(),
          address:         address.to_owned(),
        })
        .await?;
      summary.people += 1;
    }

    Ok(summary)
  }
}
