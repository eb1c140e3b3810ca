//! Prompt construction — animal attributes to a natural-language instruction.

use paddock_core::animal::Animal;

/// Build the instruction sent to the text-generation API for one animal.
///
/// Pure and infallible. Absent optional fields (`breed`, `age`) are rendered
/// as the word `unknown` rather than being skipped, so the model always
/// receives the same sentence structure.
pub fn build_prompt(animal: &Animal) -> String {
  let age = animal
    .age
    .map_or_else(|| "unknown".to_string(), |a| a.to_string());
  let breed = animal.breed.as_deref().unwrap_or("unknown");

  format!(
    "Imagine you are a {species} named {name}. \
     You are {age} years old, which is a very important detail for your \
     personality and view of the world. \
     Your species, {species}, influences how you think and feel. \
     Your breed is {breed}. \
     Generate a short, cute, and unique thought (max 180 characters) that \
     reflects your age and species.",
    species = animal.species,
    name = animal.name,
  )
}
