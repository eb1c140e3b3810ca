//! [`SqliteStore`] — the SQLite implementation of [`AnimalStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use paddock_core::{
  animal::{Animal, AnimalPatch, NewAnimal},
  store::AnimalStore,
  tutor::{NewTutor, Tutor, TutorCredentials},
};

use crate::{
  Error, Result,
  encode::{RawAnimal, RawTutor, encode_dt, encode_species, encode_uuid},
  schema::SCHEMA,
};

const ANIMAL_COLUMNS: &str = "animal_id, tutor_id, name, species, breed, age, \
                              thought_of_the_day, thought_generated_at, created_at";

fn raw_animal_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawAnimal> {
  Ok(RawAnimal {
    animal_id:            row.get(0)?,
    tutor_id:             row.get(1)?,
    name:                 row.get(2)?,
    species:              row.get(3)?,
    breed:                row.get(4)?,
    age:                  row.get(5)?,
    thought_of_the_day:   row.get(6)?,
    thought_generated_at: row.get(7)?,
    created_at:           row.get(8)?,
  })
}

fn raw_tutor_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawTutor> {
  Ok(RawTutor {
    tutor_id:     row.get(0)?,
    username:     row.get(1)?,
    email:        row.get(2)?,
    display_name: row.get(3)?,
    created_at:   row.get(4)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Paddock store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
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

  async fn username_exists(&self, username: String) -> Result<bool> {
    let taken: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM tutors WHERE username = ?1",
              rusqlite::params![username],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(taken)
  }

  async fn fetch_animal(&self, id: Uuid) -> Result<Option<Animal>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawAnimal> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {ANIMAL_COLUMNS} FROM animals WHERE animal_id = ?1"),
              rusqlite::params![id_str],
              raw_animal_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAnimal::into_animal).transpose()
  }
}

// ─── AnimalStore impl ────────────────────────────────────────────────────────

impl AnimalStore for SqliteStore {
  type Error = Error;

  // ── Tutors ────────────────────────────────────────────────────────────────

  async fn add_tutor(&self, input: NewTutor) -> Result<Tutor> {
    // Pre-checks give friendly errors; the UNIQUE constraints remain the
    // backstop against a racing insert.
    if self.username_exists(input.username.clone()).await? {
      return Err(Error::UsernameTaken(input.username));
    }
    if self.find_tutor_by_email(&input.email).await?.is_some() {
      return Err(Error::EmailTaken(input.email));
    }

    let tutor = Tutor {
      tutor_id:     Uuid::new_v4(),
      username:     input.username,
      email:        input.email,
      display_name: input.display_name,
      created_at:   Utc::now(),
    };

    let id_str = encode_uuid(tutor.tutor_id);
    let at_str = encode_dt(tutor.created_at);
    let username = tutor.username.clone();
    let email = tutor.email.clone();
    let display_name = tutor.display_name.clone();
    let password_hash = input.password_hash;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tutors (tutor_id, username, email, display_name, password_hash, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, username, email, display_name, password_hash, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(tutor)
  }

  async fn get_tutor(&self, id: Uuid) -> Result<Option<Tutor>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawTutor> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT tutor_id, username, email, display_name, created_at
               FROM tutors WHERE tutor_id = ?1",
              rusqlite::params![id_str],
              raw_tutor_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawTutor::into_tutor).transpose()
  }

  async fn find_tutor_by_username(
    &self,
    username: &str,
  ) -> Result<Option<TutorCredentials>> {
    let username = username.to_owned();

    let raw: Option<(RawTutor, String)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT tutor_id, username, email, display_name, created_at, password_hash
               FROM tutors WHERE username = ?1",
              rusqlite::params![username],
              |row| Ok((raw_tutor_from_row(row)?, row.get(5)?)),
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .map(|(raw, password_hash)| {
        Ok(TutorCredentials { tutor: raw.into_tutor()?, password_hash })
      })
      .transpose()
  }

  async fn find_tutor_by_email(&self, email: &str) -> Result<Option<Tutor>> {
    let email = email.to_owned();

    let raw: Option<RawTutor> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT tutor_id, username, email, display_name, created_at
               FROM tutors WHERE email = ?1",
              rusqlite::params![email],
              raw_tutor_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawTutor::into_tutor).transpose()
  }

  // ── Animals ───────────────────────────────────────────────────────────────

  async fn add_animal(&self, tutor_id: Uuid, input: NewAnimal) -> Result<Animal> {
    let animal = Animal {
      animal_id:            Uuid::new_v4(),
      tutor_id,
      name:                 input.name,
      species:              input.species,
      breed:                input.breed,
      age:                  input.age,
      thought_of_the_day:   None,
      thought_generated_at: None,
      created_at:           Utc::now(),
    };

    let id_str = encode_uuid(animal.animal_id);
    let tutor_str = encode_uuid(animal.tutor_id);
    let name = animal.name.clone();
    let species = encode_species(animal.species);
    let breed = animal.breed.clone();
    let age = animal.age;
    let at_str = encode_dt(animal.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO animals (animal_id, tutor_id, name, species, breed, age, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![id_str, tutor_str, name, species, breed, age, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(animal)
  }

  async fn get_animal(&self, id: Uuid) -> Result<Option<Animal>> {
    self.fetch_animal(id).await
  }

  async fn list_animals(&self) -> Result<Vec<Animal>> {
    let raws: Vec<RawAnimal> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ANIMAL_COLUMNS} FROM animals ORDER BY created_at, animal_id"
        ))?;
        let rows = stmt
          .query_map([], raw_animal_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAnimal::into_animal).collect()
  }

  async fn list_animals_by_tutor(&self, tutor_id: Uuid) -> Result<Vec<Animal>> {
    let tutor_str = encode_uuid(tutor_id);

    let raws: Vec<RawAnimal> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ANIMAL_COLUMNS} FROM animals
           WHERE tutor_id = ?1 ORDER BY created_at, animal_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![tutor_str], raw_animal_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAnimal::into_animal).collect()
  }

  async fn replace_animal(&self, id: Uuid, input: NewAnimal) -> Result<Animal> {
    let id_str = encode_uuid(id);
    let name = input.name;
    let species = encode_species(input.species);
    let breed = input.breed;
    let age = input.age;

    let updated = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE animals SET name = ?2, species = ?3, breed = ?4, age = ?5
           WHERE animal_id = ?1",
          rusqlite::params![id_str, name, species, breed, age],
        )?)
      })
      .await?;

    if updated == 0 {
      return Err(Error::AnimalNotFound(id));
    }

    self.fetch_animal(id).await?.ok_or(Error::AnimalNotFound(id))
  }

  async fn patch_animal(&self, id: Uuid, patch: AnimalPatch) -> Result<Animal> {
    let current = self.fetch_animal(id).await?.ok_or(Error::AnimalNotFound(id))?;

    let merged = NewAnimal {
      name:    patch.name.unwrap_or(current.name),
      species: patch.species.unwrap_or(current.species),
      breed:   patch.breed.or(current.breed),
      age:     patch.age.or(current.age),
    };

    self.replace_animal(id, merged).await
  }

  async fn delete_animal(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM animals WHERE animal_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::AnimalNotFound(id));
    }
    Ok(())
  }

  async fn set_thought(
    &self,
    id: Uuid,
    thought: &str,
    generated_at: DateTime<Utc>,
  ) -> Result<Animal> {
    let id_str = encode_uuid(id);
    let thought = thought.to_owned();
    let at_str = encode_dt(generated_at);

    // Both columns in one statement: they are present iff the other is.
    let updated = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE animals SET thought_of_the_day = ?2, thought_generated_at = ?3
           WHERE animal_id = ?1",
          rusqlite::params![id_str, thought, at_str],
        )?)
      })
      .await?;

    if updated == 0 {
      return Err(Error::AnimalNotFound(id));
    }

    self.fetch_animal(id).await?.ok_or(Error::AnimalNotFound(id))
  }
}
