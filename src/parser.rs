//! Turns a model reply into a [`RecipeRecord`].
//!
//! The reply format is semi-structured text: labeled header lines, then a
//! dash-bulleted ingredient list and a numbered instruction list. The parser
//! is total: it never fails, it degrades to empty fields when lines are
//! missing or malformed.

use crate::model::RecipeRecord;

/// Which list the scanner is currently inside.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    None,
    Ingredients,
    Instructions,
}

/// Parse one model reply into a [`RecipeRecord`].
///
/// Single pass over the lines. Labeled fields (`Name:`, `Serving Size:`,
/// `Calories:`, `Protein:`, `Carbohydrates:`, `Fat:`) match case-sensitively
/// by prefix and last-wins on repeats. An `Ingredients`/`Instructions` prefix
/// switches the current section; within a section, `-` lines become
/// ingredients and digit-led lines become instructions (kept verbatim,
/// numeral included). Everything else is dropped.
pub fn parse_response(text: &str) -> RecipeRecord {
    let mut record = RecipeRecord::default();
    let mut section = Section::None;

    for line in text.lines() {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix("Name:") {
            record.name = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Serving Size:") {
            record.serving_size = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Calories:") {
            record.calories = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Protein:") {
            record.protein = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Carbohydrates:") {
            record.carbohydrates = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Fat:") {
            record.fat = rest.trim().to_string();
        } else if line.starts_with("Ingredients") {
            section = Section::Ingredients;
        } else if line.starts_with("Instructions") {
            section = Section::Instructions;
        } else {
            match section {
                Section::Ingredients => {
                    if let Some(rest) = line.strip_prefix('-') {
                        record.ingredients.push(rest.trim().to_string());
                    }
                }
                Section::Instructions => {
                    // chars().next() rather than indexing: the line may be empty
                    if line.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                        record.instructions.push(line.to_string());
                    }
                }
                Section::None => {}
            }
        }
    }

    record
}
