// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tip and recipe generation.
//!
//! Prompts are sent to a [`ContentGenerator`], which returns raw JSON. When
//! the generator is unavailable or its output cannot be used, tips fall back
//! to fixed local text and recipes are skipped.

use rand::seq::SliceRandom;
use serde::Deserialize;
use std::sync::Arc;

use crate::db::LocalStore;
use crate::error::{AppError, Result};
use crate::models::{new_record_id, MealType, Recipe, Tip, TipCategory};
use crate::time_utils::now_millis;

/// Tip used when no generator is configured.
pub const OFFLINE_TIP: &str =
    "La disciplina te llevará a lugares donde la motivación no puede llegar.";
/// Tip used when the generator fails or returns unusable output.
pub const FALLBACK_TIP: &str = "El descanso es clave para el crecimiento muscular.";
/// Tip used when the generator answers with an empty tip.
pub const EMPTY_TIP: &str = "Sigue entrenando.";
pub const DEFAULT_RECIPE_TITLE: &str = "Receta Fitness";

/// Text generation backend. Implementations return the model's raw JSON.
pub trait ContentGenerator: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String>;
}

/// Generator used when no backend is configured; always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

impl ContentGenerator for OfflineGenerator {
    fn complete(&self, _prompt: &str) -> Result<String> {
        Err(AppError::GeneratorUnavailable(
            "no content generator configured".to_string(),
        ))
    }
}

pub fn tip_prompt(category: TipCategory) -> String {
    format!(
        "Genera un consejo corto (max 25 palabras), impactante y útil sobre \"{}\" para un atleta de gimnasio. \
         Responde en JSON con la forma {{\"tip\": string}}.",
        category
    )
}

pub fn recipe_prompt(meal: MealType, preferences: Option<&str>) -> String {
    let mut prompt = format!(
        "Genera una receta saludable para: {}. Debe ser alta en proteínas y adecuada para fitness.",
        meal
    );
    if let Some(preferences) = preferences.map(str::trim).filter(|p| !p.is_empty()) {
        prompt.push_str(&format!(" Preferencias del usuario: \"{}\".", preferences));
    }
    prompt.push_str(
        " Responde en JSON con title, calories, protein, carbs, fats, ingredients e instructions.",
    );
    prompt
}

#[derive(Debug, Deserialize)]
struct TipResponse {
    #[serde(default)]
    tip: Option<String>,
}

/// Extract the tip text from a `{"tip": ...}` response.
pub fn parse_tip(raw: &str) -> Result<String> {
    let response: TipResponse = serde_json::from_str(raw)?;
    Ok(response
        .tip
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| EMPTY_TIP.to_string()))
}

/// Recipe fields as returned by the generator; all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecipeDraft {
    pub title: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
}

impl RecipeDraft {
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Complete the draft into a stored recipe, filling gaps with defaults.
    pub fn into_recipe(self, meal: MealType, date_added: i64) -> Recipe {
        Recipe {
            id: new_record_id(),
            title: self
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_RECIPE_TITLE.to_string()),
            meal_type: meal,
            calories: self.calories.unwrap_or(0.0),
            protein: self.protein.unwrap_or(0.0),
            carbs: self.carbs.unwrap_or(0.0),
            fats: self.fats.unwrap_or(0.0),
            ingredients: self.ingredients.unwrap_or_default(),
            instructions: self.instructions.unwrap_or_default(),
            is_ai_generated: true,
            date_added,
        }
    }
}

fn random_category() -> TipCategory {
    TipCategory::ALL
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(TipCategory::Motivation)
}

/// Generates tips and recipes and stores them.
#[derive(Clone)]
pub struct ContentService {
    store: LocalStore,
    generator: Arc<dyn ContentGenerator>,
}

impl ContentService {
    pub fn new(store: LocalStore, generator: Arc<dyn ContentGenerator>) -> Self {
        Self { store, generator }
    }

    /// Generate a tip for `category` without storing it.
    ///
    /// Generation problems never fail the call: an unavailable generator
    /// gives the offline tip and any other failure the fallback tip.
    pub fn generate_tip(&self, category: TipCategory) -> Tip {
        let generated = self
            .generator
            .complete(&tip_prompt(category))
            .and_then(|raw| parse_tip(&raw));
        let (content, is_ai_generated) = match generated {
            Ok(content) => (content, true),
            Err(AppError::GeneratorUnavailable(reason)) => {
                tracing::debug!(%reason, "Generator unavailable, using offline tip");
                (OFFLINE_TIP.to_string(), false)
            }
            Err(e) => {
                tracing::warn!(error = %e, %category, "Tip generation failed, using fallback");
                (FALLBACK_TIP.to_string(), false)
            }
        };

        Tip {
            id: new_record_id(),
            content,
            category,
            is_ai_generated,
            date_added: now_millis(),
        }
    }

    /// Motivational tip of the day. Shown only, never stored.
    pub fn daily_tip(&self) -> Tip {
        self.generate_tip(TipCategory::Motivation)
    }

    /// Generate a tip and prepend it to the stored tips.
    ///
    /// Without a category one is picked at random. Only storage errors fail.
    pub fn add_generated_tip(&self, category: Option<TipCategory>) -> Result<Tip> {
        let category = category.unwrap_or_else(random_category);
        let tip = self.generate_tip(category);
        self.store.add_tip(&tip)?;
        tracing::info!(tip_id = %tip.id, %category, ai = tip.is_ai_generated, "Tip added");
        Ok(tip)
    }

    /// Generate a recipe and prepend it.
    ///
    /// Returns `Ok(None)` when the generator is unavailable or its output
    /// cannot be parsed; nothing is stored in that case.
    pub fn generate_recipe(
        &self,
        meal: MealType,
        preferences: Option<&str>,
    ) -> Result<Option<Recipe>> {
        let draft = self
            .generator
            .complete(&recipe_prompt(meal, preferences))
            .and_then(|raw| RecipeDraft::parse(&raw));

        let draft = match draft {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!(error = %e, %meal, "Recipe generation failed");
                return Ok(None);
            }
        };

        let recipe = draft.into_recipe(meal, now_millis());
        self.store.add_recipe(&recipe)?;
        tracing::info!(recipe_id = %recipe.id, %meal, "Recipe generated");
        Ok(Some(recipe))
    }

    /// Stored recipes for one meal slot, newest first.
    pub fn recipes_for(&self, meal: MealType) -> Result<Vec<Recipe>> {
        Ok(self
            .store
            .get_recipes()?
            .into_iter()
            .filter(|r| r.meal_type == meal)
            .collect())
    }
}
