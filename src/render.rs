//! Plain-text layout for a parsed recommendation.

use crate::model::RecipeRecord;

/// Render a record the way the app displays it: title, nutrition metrics,
/// ingredient bullets, then the instruction lines verbatim. Sections with
/// no items are omitted.
pub fn render(record: &RecipeRecord) -> String {
    let mut out = String::new();

    out.push_str(&format!("🍲 {}\n\n", record.name));
    out.push_str(&format!("Calories: {}\n", record.calories));
    out.push_str(&format!("Protein: {}\n", record.protein));
    out.push_str(&format!("Carbohydrates: {}\n", record.carbohydrates));
    out.push_str(&format!("Fat: {}\n", record.fat));
    out.push_str(&format!("Serving Size: {}\n", record.serving_size));

    if !record.ingredients.is_empty() {
        out.push_str("\n🛒 Ingredients\n");
        for ingredient in &record.ingredients {
            out.push_str(&format!("- {}\n", ingredient));
        }
    }

    if !record.instructions.is_empty() {
        out.push_str("\n👨‍🍳 Instructions\n");
        for step in &record.instructions {
            out.push_str(&format!("{}\n", step));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecipeRecord {
        RecipeRecord {
            name: "Veggie Stir Fry".to_string(),
            serving_size: "300g".to_string(),
            calories: "450".to_string(),
            protein: "20g".to_string(),
            carbohydrates: "50g".to_string(),
            fat: "15g".to_string(),
            ingredients: vec!["broccoli".to_string(), "carrot".to_string()],
            instructions: vec!["1. Chop vegetables".to_string()],
        }
    }

    #[test]
    fn test_render_full_record() {
        let text = render(&sample());
        assert!(text.contains("🍲 Veggie Stir Fry"));
        assert!(text.contains("Calories: 450"));
        assert!(text.contains("- broccoli"));
        // Instruction lines keep their numerals
        assert!(text.contains("1. Chop vegetables"));
    }

    #[test]
    fn test_render_omits_empty_sections() {
        let record = RecipeRecord {
            ingredients: Vec::new(),
            instructions: Vec::new(),
            ..sample()
        };
        let text = render(&record);
        assert!(!text.contains("Ingredients"));
        assert!(!text.contains("Instructions"));
    }
}
