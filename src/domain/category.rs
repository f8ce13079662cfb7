//! Category canonicalization, pillar assignment, and display colors.
//!
//! Upstream category labels are free text entered in either Spanish or
//! English; the tables here fold synonymous labels into one canonical name
//! before any grouping so "Comida" and "Food" land in the same slice.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Display metadata for a category, supplied by the upstream store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// High-level spending-strategy buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Needs,
    Wants,
    Savings,
}

impl Pillar {
    pub const ALL: [Pillar; 3] = [Pillar::Needs, Pillar::Wants, Pillar::Savings];
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Pillar::Needs => "Needs",
            Pillar::Wants => "Wants",
            Pillar::Savings => "Savings",
        };
        f.write_str(label)
    }
}

static SYNONYMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let pairs: &[(&str, &[&str])] = &[
        ("Food", &["food", "comida", "alimentacion", "alimentación"]),
        ("Groceries", &["groceries", "mercado", "supermercado"]),
        ("Restaurants", &["restaurants", "restaurantes", "dining"]),
        ("Transport", &["transport", "transportation", "transporte"]),
        ("Housing", &["housing", "vivienda", "rent", "arriendo"]),
        ("Utilities", &["utilities", "servicios", "servicios publicos", "servicios públicos"]),
        ("Health", &["health", "salud"]),
        ("Education", &["education", "educacion", "educación"]),
        ("Entertainment", &["entertainment", "entretenimiento", "ocio"]),
        ("Shopping", &["shopping", "compras"]),
        ("Subscriptions", &["subscriptions", "suscripciones"]),
        ("Travel", &["travel", "viajes"]),
        ("Savings", &["savings", "ahorro", "ahorros"]),
        ("Investment", &["investment", "investments", "inversion", "inversión", "inversiones"]),
        ("Debt", &["debt", "deuda", "deudas"]),
        ("Insurance", &["insurance", "seguros", "seguro"]),
        ("Salary", &["salary", "salario", "sueldo", "nomina", "nómina"]),
        ("Pets", &["pets", "mascotas"]),
        ("Gifts", &["gifts", "regalos"]),
        ("Other", &["other", "otro", "otros"]),
    ];
    let mut table = HashMap::new();
    for (canonical, aliases) in pairs {
        for alias in *aliases {
            table.insert(*alias, *canonical);
        }
    }
    table
});

static PILLARS: Lazy<HashMap<&'static str, Pillar>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for label in [
        "Food",
        "Groceries",
        "Transport",
        "Housing",
        "Utilities",
        "Health",
        "Education",
        "Debt",
        "Insurance",
    ] {
        table.insert(label, Pillar::Needs);
    }
    for label in ["Savings", "Investment"] {
        table.insert(label, Pillar::Savings);
    }
    table
});

const COLOR_PALETTE: [&str; 12] = [
    "#2563eb", "#dc2626", "#16a34a", "#d97706", "#7c3aed", "#db2777", "#0891b2", "#65a30d",
    "#ea580c", "#4f46e5", "#0d9488", "#b91c1c",
];

/// Folds a free-text label into its canonical category name. Labels absent
/// from the synonym table pass through trimmed but otherwise unchanged, so a
/// transaction is never dropped for carrying an unrecognized category.
pub fn canonicalize(label: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return "Other".to_string();
    }
    let key = trimmed.to_lowercase();
    match SYNONYMS.get(key.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => trimmed.to_string(),
    }
}

/// Maps a canonical category to its pillar; unknown labels are Wants.
pub fn pillar_for(canonical: &str) -> Pillar {
    PILLARS.get(canonical).copied().unwrap_or(Pillar::Wants)
}

/// Resolves a display color: explicit assignment first, else a color picked
/// deterministically from the label so it is stable across renders.
pub fn display_color(canonical: &str, meta: &[CategoryMeta]) -> String {
    if let Some(assigned) = meta
        .iter()
        .find(|m| canonicalize(&m.name) == canonical)
        .and_then(|m| m.color.clone())
    {
        return assigned;
    }
    COLOR_PALETTE[fnv1a(canonical) as usize % COLOR_PALETTE.len()].to_string()
}

fn fnv1a(input: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in input.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bilingual_labels_fold_to_one_canonical_name() {
        assert_eq!(canonicalize("Comida"), "Food");
        assert_eq!(canonicalize("  food "), "Food");
        assert_eq!(canonicalize("Arriendo"), "Housing");
        assert_eq!(canonicalize("nómina"), "Salary");
    }

    #[test]
    fn unknown_labels_pass_through() {
        assert_eq!(canonicalize("Llama grooming"), "Llama grooming");
        assert_eq!(canonicalize(""), "Other");
    }

    #[test]
    fn pillar_assignment_defaults_to_wants() {
        assert_eq!(pillar_for("Housing"), Pillar::Needs);
        assert_eq!(pillar_for("Savings"), Pillar::Savings);
        assert_eq!(pillar_for("Entertainment"), Pillar::Wants);
        assert_eq!(pillar_for("Llama grooming"), Pillar::Wants);
    }

    #[test]
    fn explicit_color_wins_over_hash_fallback() {
        let meta = vec![CategoryMeta {
            name: "Comida".into(),
            color: Some("#ff0000".into()),
        }];
        assert_eq!(display_color("Food", &meta), "#ff0000");
    }

    #[test]
    fn fallback_color_is_deterministic_and_in_palette() {
        let first = display_color("Travel", &[]);
        let second = display_color("Travel", &[]);
        assert_eq!(first, second);
        assert!(COLOR_PALETTE.contains(&first.as_str()));
    }
}
