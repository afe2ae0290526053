// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Meal slot a recipe belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MealType {
    #[serde(rename = "Desayuno")]
    Breakfast,
    #[serde(rename = "Almuerzo")]
    Lunch,
    #[serde(rename = "Merienda")]
    Snack,
    #[serde(rename = "Cena")]
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Snack,
        MealType::Dinner,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Desayuno",
            MealType::Lunch => "Almuerzo",
            MealType::Snack => "Merienda",
            MealType::Dinner => "Cena",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        MealType::ALL
            .into_iter()
            .find(|m| {
                m.label().to_lowercase() == wanted || format!("{:?}", m).to_lowercase() == wanted
            })
            .ok_or_else(|| format!("unknown meal type: {}", s))
    }
}

/// A recipe with macros, stored newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    /// kcal
    pub calories: f64,
    /// grams
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub ingredients: Vec<String>,
    /// Ordered preparation steps
    pub instructions: Vec<String>,
    pub is_ai_generated: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub date_added: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_type_field() {
        let raw = r#"{
            "id": "r1",
            "title": "Avena proteica",
            "type": "Desayuno",
            "calories": 420,
            "protein": 32,
            "carbs": 50,
            "fats": 9.5,
            "ingredients": ["avena", "whey"],
            "instructions": ["Mezclar", "Servir"],
            "isAiGenerated": true,
            "dateAdded": 1705312800000
        }"#;
        let recipe: Recipe = serde_json::from_str(raw).unwrap();
        assert_eq!(recipe.meal_type, MealType::Breakfast);
        assert_eq!(recipe.instructions, vec!["Mezclar", "Servir"]);

        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["type"], "Desayuno");
        assert_eq!(json["isAiGenerated"], true);
    }

    #[test]
    fn test_meal_type_from_str() {
        assert_eq!("cena".parse::<MealType>(), Ok(MealType::Dinner));
        assert_eq!("Snack".parse::<MealType>(), Ok(MealType::Snack));
        assert!("brunch".parse::<MealType>().is_err());
    }
}
