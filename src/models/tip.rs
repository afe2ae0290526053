// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training tips and the built-in seed set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Tip category. Stored using the Spanish labels shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum TipCategory {
    #[serde(rename = "Nutrición")]
    Nutrition,
    #[serde(rename = "Fuerza")]
    Strength,
    #[serde(rename = "Hidratación")]
    Hydration,
    #[serde(rename = "Suplementación")]
    Supplements,
    #[serde(rename = "Motivación")]
    Motivation,
}

impl TipCategory {
    pub const ALL: [TipCategory; 5] = [
        TipCategory::Nutrition,
        TipCategory::Strength,
        TipCategory::Hydration,
        TipCategory::Supplements,
        TipCategory::Motivation,
    ];

    /// Label as persisted and displayed.
    pub fn label(&self) -> &'static str {
        match self {
            TipCategory::Nutrition => "Nutrición",
            TipCategory::Strength => "Fuerza",
            TipCategory::Hydration => "Hidratación",
            TipCategory::Supplements => "Suplementación",
            TipCategory::Motivation => "Motivación",
        }
    }
}

impl fmt::Display for TipCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TipCategory {
    type Err = String;

    /// Accepts the stored label or the English variant name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TipCategory::ALL
            .into_iter()
            .find(|c| {
                c.label().to_lowercase() == wanted || format!("{:?}", c).to_lowercase() == wanted
            })
            .ok_or_else(|| format!("unknown tip category: {}", s))
    }
}

/// A short training tip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Tip {
    pub id: String,
    pub content: String,
    pub category: TipCategory,
    pub is_ai_generated: bool,
    /// When the tip was added (epoch milliseconds)
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub date_added: i64,
}

const SEED_TIPS: [(&str, TipCategory); 8] = [
    (
        "La hidratación es tan importante como el peso que levantas. Bebe al menos 3L diarios.",
        TipCategory::Hydration,
    ),
    (
        "No entrenes el ego, entrena el músculo. Controla la fase excéntrica (bajada) del movimiento.",
        TipCategory::Strength,
    ),
    (
        "El músculo crece durante el descanso, no en el gimnasio. Prioriza dormir 7-8 horas.",
        TipCategory::Motivation,
    ),
    (
        "La proteína es el ladrillo de tus músculos. Asegúrate de ingerir algo de proteína en cada comida.",
        TipCategory::Nutrition,
    ),
    (
        "La consistencia vence a la intensidad. Es mejor entrenar 4 días bien que 1 día perfecto y abandonar.",
        TipCategory::Motivation,
    ),
    (
        "La creatina funciona por acumulación, no por timing. Tómala todos los días, entrenes o no.",
        TipCategory::Supplements,
    ),
    (
        "Antes de buscar suplementos mágicos, revisa si comes suficiente comida real.",
        TipCategory::Nutrition,
    ),
    (
        "El calentamiento no es opcional. 5-10 minutos de movilidad previenen meses de lesiones.",
        TipCategory::Strength,
    ),
];

/// Spacing between seeded `date_added` values, newest first.
const SEED_SPACING_MS: i64 = 100_000;

/// The fixed set of tips written on first read of an empty store.
///
/// Ids are "1" through "8"; `date_added` descends from `now_ms`.
pub fn seed_tips(now_ms: i64) -> Vec<Tip> {
    SEED_TIPS
        .iter()
        .enumerate()
        .map(|(i, (content, category))| Tip {
            id: (i + 1).to_string(),
            content: content.to_string(),
            category: *category,
            is_ai_generated: false,
            date_added: now_ms - SEED_SPACING_MS * i as i64,
        })
        .collect()
}
