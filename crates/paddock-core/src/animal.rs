//! Animal — a single pet's profile, owned by exactly one tutor.
//!
//! The two thought columns are written only by the thought pipeline, through
//! [`crate::store::AnimalStore::set_thought`]. The client-writable shapes
//! ([`NewAnimal`], [`AnimalPatch`]) do not carry them, so ordinary CRUD can
//! never touch them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// The fixed species taxonomy. `Other` is the catch-all.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Species {
  Dog,
  Cat,
  Bird,
  Rabbit,
  Hamster,
  Fish,
  Reptile,
  Horse,
  Other,
}

/// A pet record. `tutor_id` is immutable after creation; the thought fields
/// are either both present or both absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
  pub animal_id:            Uuid,
  pub tutor_id:             Uuid,
  pub name:                 String,
  pub species:              Species,
  pub breed:                Option<String>,
  /// Age in whole years.
  pub age:                  Option<u32>,
  pub thought_of_the_day:   Option<String>,
  pub thought_generated_at: Option<DateTime<Utc>>,
  pub created_at:           DateTime<Utc>,
}

/// The client-writable fields of an animal. Used for creation and for full
/// replacement (PUT); absent optionals clear the stored value.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAnimal {
  pub name:    String,
  pub species: Species,
  pub breed:   Option<String>,
  pub age:     Option<u32>,
}

impl NewAnimal {
  /// Check the data-model invariants the storage layer assumes.
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::EmptyAnimalName);
    }
    Ok(())
  }
}

/// A partial update (PATCH). Fields left `None` are unchanged; `breed` and
/// `age` can therefore be updated but not cleared through a patch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimalPatch {
  pub name:    Option<String>,
  pub species: Option<Species>,
  pub breed:   Option<String>,
  pub age:     Option<u32>,
}

impl AnimalPatch {
  /// A patch may omit the name entirely, but cannot blank it.
  pub fn validate(&self) -> Result<()> {
    if let Some(name) = &self.name
      && name.trim().is_empty()
    {
      return Err(Error::EmptyAnimalName);
    }
    Ok(())
  }
}
