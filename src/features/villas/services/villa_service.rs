use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::core::error::{AppError, Result};
use crate::features::villas::dtos::{VillaQueryDto, VillaResponseDto};
use crate::features::villas::models::Villa;
use crate::shared::constants::VILLA_NUMBER_WIDTH;

const BUNDLED_VILLAS: &str = include_str!("../../../../data/villas.json");

/// Canonical form of a villa number: trimmed, upper-cased, and with the part
/// after the dash zero-padded (`a-7` becomes `A-007`). Inputs that do not
/// split into exactly two parts, or whose second part is empty, are only
/// trimmed and upper-cased.
pub fn normalize_villa_number(input: &str) -> String {
    let upper = input.trim().to_uppercase();
    let parts: Vec<&str> = upper.split('-').collect();

    match parts.as_slice() {
        [prefix, number] if !number.is_empty() => {
            format!("{}-{:0>width$}", prefix, number, width = VILLA_NUMBER_WIDTH)
        }
        _ => upper,
    }
}

/// In-memory villa directory, read once at startup
pub struct VillaService {
    villas: BTreeMap<String, Villa>,
}

impl VillaService {
    /// Reads `path` when given, otherwise the bundled directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let raw = match path {
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                AppError::Internal(format!(
                    "Failed to read villa data {}: {}",
                    path.display(),
                    e
                ))
            })?,
            None => BUNDLED_VILLAS.to_string(),
        };

        let service = Self::from_json(&raw)?;
        tracing::info!("Villa directory loaded: {} villas", service.villas.len());
        Ok(service)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let villas: HashMap<String, Villa> = serde_json::from_str(raw)
            .map_err(|e| AppError::Internal(format!("Invalid villa data: {}", e)))?;

        Ok(Self::from_villas(villas))
    }

    pub fn from_villas(villas: impl IntoIterator<Item = (String, Villa)>) -> Self {
        Self {
            villas: villas
                .into_iter()
                .map(|(number, villa)| (normalize_villa_number(&number), villa))
                .collect(),
        }
    }

    /// Whether `number` names a known villa once normalized
    pub fn contains(&self, number: &str) -> bool {
        self.villas.contains_key(&normalize_villa_number(number))
    }

    pub fn get(&self, number: &str) -> Result<VillaResponseDto> {
        let number = normalize_villa_number(number);
        self.villas
            .get(&number)
            .map(|villa| VillaResponseDto::new(&number, villa))
            .ok_or_else(|| AppError::NotFound(format!("Villa {} not found", number)))
    }

    /// Matching villas ordered by number
    pub fn search(&self, query: &VillaQueryDto) -> Vec<VillaResponseDto> {
        let q = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        self.villas
            .iter()
            .filter(|(_, villa)| matches_field(&villa.category, &query.category))
            .filter(|(_, villa)| matches_field(&villa.street, &query.street))
            .filter(|(_, villa)| matches_field(&villa.block, &query.block))
            .filter(|(number, villa)| match &q {
                Some(q) => {
                    number.to_lowercase().contains(q) || villa.residents.to_lowercase().contains(q)
                }
                None => true,
            })
            .map(|(number, villa)| VillaResponseDto::new(number, villa))
            .collect()
    }
}

fn matches_field(value: &str, filter: &Option<String>) -> bool {
    match filter.as_deref().map(str::trim) {
        Some(filter) if !filter.is_empty() => value.eq_ignore_ascii_case(filter),
        _ => true,
    }
}
