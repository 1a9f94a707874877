// catalog/validation.rs - Draft validation
//
// Every rule runs independently and all violations are reported together,
// so the form can show every inline error at once.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::model::ProductFields;

/// Form fields that can carry a validation error
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    Name,
    Description,
    Price,
    PricePerGram,
}

impl ProductField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::Price => "price",
            ProductField::PricePerGram => "price_per_gram",
        }
    }
}

impl std::fmt::Display for ProductField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub const NAME_REQUIRED: &str = "Nome é obrigatório";
pub const DESCRIPTION_REQUIRED: &str = "Descrição é obrigatória";
pub const PRICE_NOT_POSITIVE: &str = "Preço deve ser maior que zero";
pub const PRICE_PER_GRAM_REQUIRED: &str = "Preço por grama é obrigatório para produtos pesáveis";

/// Field name → error message. Empty means the draft can be saved.
pub type FieldErrors = BTreeMap<ProductField, String>;

/// Validate draft fields
pub fn validate(fields: &ProductFields) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if fields.name.trim().is_empty() {
        errors.insert(ProductField::Name, NAME_REQUIRED.to_string());
    }

    if fields.description.trim().is_empty() {
        errors.insert(ProductField::Description, DESCRIPTION_REQUIRED.to_string());
    }

    if fields.price <= Decimal::ZERO {
        errors.insert(ProductField::Price, PRICE_NOT_POSITIVE.to_string());
    }

    if fields.is_weighable && !fields.price_per_gram.is_some_and(|p| p > Decimal::ZERO) {
        errors.insert(ProductField::PricePerGram, PRICE_PER_GRAM_REQUIRED.to_string());
    }

    errors
}
