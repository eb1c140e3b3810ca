//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings. Species is stored as its lowercase
//! discriminant.

use std::str::FromStr as _;

use chrono::{DateTime, Utc};
use paddock_core::{
  animal::{Animal, Species},
  tutor::Tutor,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Species ─────────────────────────────────────────────────────────────────

pub fn encode_species(s: Species) -> String { s.to_string() }

pub fn decode_species(s: &str) -> Result<Species> {
  Species::from_str(s)
    .map_err(|_| Error::DateParse(format!("unknown species: {s:?}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `tutors` row.
pub struct RawTutor {
  pub tutor_id:      String,
  pub username:      String,
  pub email:         String,
  pub display_name:  String,
  pub created_at:    String,
}

impl RawTutor {
  pub fn into_tutor(self) -> Result<Tutor> {
    Ok(Tutor {
      tutor_id:     decode_uuid(&self.tutor_id)?,
      username:     self.username,
      email:        self.email,
      display_name: self.display_name,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from an `animals` row.
pub struct RawAnimal {
  pub animal_id:            String,
  pub tutor_id:             String,
  pub name:                 String,
  pub species:              String,
  pub breed:                Option<String>,
  pub age:                  Option<u32>,
  pub thought_of_the_day:   Option<String>,
  pub thought_generated_at: Option<String>,
  pub created_at:           String,
}

impl RawAnimal {
  pub fn into_animal(self) -> Result<Animal> {
    Ok(Animal {
      animal_id:            decode_uuid(&self.animal_id)?,
      tutor_id:             decode_uuid(&self.tutor_id)?,
      name:                 self.name,
      species:              decode_species(&self.species)?,
      breed:                self.breed,
      age:                  self.age,
      thought_of_the_day:   self.thought_of_the_day,
      thought_generated_at: self
        .thought_generated_at
        .as_deref()
        .map(decode_dt)
        .transpose()?,
      created_at:           decode_dt(&self.created_at)?,
    })
  }
}
