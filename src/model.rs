use serde::Serialize;

/// A recipe recommendation parsed from one model reply.
///
/// Nutrition fields keep the model's unit-bearing text ("450 kcal", "20g")
/// without numeric validation. Any field the reply did not mention stays
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeRecord {
    pub name: String,
    pub serving_size: String,
    pub calories: String,
    pub protein: String,
    pub carbohydrates: String,
    pub fat: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl RecipeRecord {
    /// True when the reply matched nothing at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.serving_size.is_empty()
            && self.calories.is_empty()
            && self.protein.is_empty()
            && self.carbohydrates.is_empty()
            && self.fat.is_empty()
            && self.ingredients.is_empty()
            && self.instructions.is_empty()
    }
}
