// catalog/model.rs - Product data model shared by the core, the store and the UI
//
// Field names here are the wire names and the database column names.
// Everything round-trips through serde JSON unchanged.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque product identifier assigned by the store
pub type ProductId = Uuid;

/// Availability type given to new products when none is set
pub const DEFAULT_AVAILABILITY: &str = "always";

/// Product category (fixed set)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Acai,
    Combo,
    Milkshake,
    Vitamina,
    Sorvetes,
    Bebidas,
    Complementos,
    Sobremesas,
    #[default]
    Outros,
}

impl Category {
    /// Every category, in the order the form lists them
    pub const ALL: [Category; 9] = [
        Category::Acai,
        Category::Combo,
        Category::Milkshake,
        Category::Vitamina,
        Category::Sorvetes,
        Category::Bebidas,
        Category::Complementos,
        Category::Sobremesas,
        Category::Outros,
    ];

    /// Wire/database value
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Acai => "acai",
            Category::Combo => "combo",
            Category::Milkshake => "milkshake",
            Category::Vitamina => "vitamina",
            Category::Sorvetes => "sorvetes",
            Category::Bebidas => "bebidas",
            Category::Complementos => "complementos",
            Category::Sobremesas => "sobremesas",
            Category::Outros => "outros",
        }
    }

    /// Human label shown in selects and badges
    pub fn label(&self) -> &'static str {
        match self {
            Category::Acai => "Açaí",
            Category::Combo => "Combo",
            Category::Milkshake => "Milkshake",
            Category::Vitamina => "Vitamina",
            Category::Sorvetes => "Sorvetes",
            Category::Bebidas => "Bebidas",
            Category::Complementos => "Complementos",
            Category::Sobremesas => "Sobremesas",
            Category::Outros => "Outros",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown product category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Product as stored by the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_weighable: bool,
    #[serde(default)]
    pub price_per_gram: Option<Decimal>,
    // Extension payloads, passed through untouched
    #[serde(default)]
    pub complement_groups: Option<serde_json::Value>,
    #[serde(default)]
    pub sizes: Option<serde_json::Value>,
    #[serde(default)]
    pub scheduled_days: Option<serde_json::Value>,
    #[serde(default)]
    pub availability_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Build a product from store-assigned id and the submitted fields
    pub fn from_fields(id: ProductId, fields: ProductFields) -> Self {
        Product {
            id,
            name: fields.name,
            category: fields.category,
            price: fields.price,
            original_price: fields.original_price,
            description: fields.description,
            image_url: fields.image_url,
            is_active: fields.is_active,
            is_weighable: fields.is_weighable,
            price_per_gram: fields.price_per_gram,
            complement_groups: fields.complement_groups,
            sizes: fields.sizes,
            scheduled_days: fields.scheduled_days,
            availability_type: fields.availability_type,
            created_at: None,
            updated_at: None,
        }
    }

    /// Editable fields of this product (everything but id and timestamps)
    pub fn to_fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            category: self.category,
            price: self.price,
            original_price: self.original_price,
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            is_active: self.is_active,
            is_weighable: self.is_weighable,
            price_per_gram: self.price_per_gram,
            complement_groups: self.complement_groups.clone(),
            sizes: self.sizes.clone(),
            scheduled_days: self.scheduled_days.clone(),
            availability_type: self.availability_type.clone(),
        }
    }

    /// Apply a partial update in place
    pub fn apply_patch(&mut self, patch: &ProductPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(original_price) = patch.original_price {
            self.original_price = original_price;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url = image_url.clone();
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(is_weighable) = patch.is_weighable {
            self.is_weighable = is_weighable;
        }
        if let Some(price_per_gram) = patch.price_per_gram {
            self.price_per_gram = price_per_gram;
        }
        if let Some(complement_groups) = &patch.complement_groups {
            self.complement_groups = complement_groups.clone();
        }
        if let Some(sizes) = &patch.sizes {
            self.sizes = sizes.clone();
        }
        if let Some(scheduled_days) = &patch.scheduled_days {
            self.scheduled_days = scheduled_days.clone();
        }
        if let Some(availability_type) = &patch.availability_type {
            self.availability_type = availability_type.clone();
        }
    }

    /// Whether the catalog should show the original price struck through.
    ///
    /// Display hint only; an original price below the price is accepted.
    pub fn is_on_promotion(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }
}

/// Fields sent to the store when creating a product
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub category: Category,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_weighable: bool,
    #[serde(default)]
    pub price_per_gram: Option<Decimal>,
    #[serde(default)]
    pub complement_groups: Option<serde_json::Value>,
    #[serde(default)]
    pub sizes: Option<serde_json::Value>,
    #[serde(default)]
    pub scheduled_days: Option<serde_json::Value>,
    #[serde(default)]
    pub availability_type: Option<String>,
}

impl Default for ProductFields {
    fn default() -> Self {
        ProductFields {
            name: String::new(),
            category: Category::default(),
            price: Decimal::ZERO,
            original_price: None,
            description: String::new(),
            image_url: None,
            is_active: true,
            is_weighable: false,
            price_per_gram: None,
            complement_groups: None,
            sizes: None,
            scheduled_days: None,
            availability_type: Some(DEFAULT_AVAILABILITY.to_string()),
        }
    }
}

/// Partial update for `ProductStore::update`
///
/// `None` leaves a field unchanged. Nullable fields use `Some(None)` to clear.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_some")]
    pub original_price: Option<Option<Decimal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_some")]
    pub image_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_weighable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_some")]
    pub price_per_gram: Option<Option<Decimal>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_some")]
    pub complement_groups: Option<Option<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_some")]
    pub sizes: Option<Option<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_some")]
    pub scheduled_days: Option<Option<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_some")]
    pub availability_type: Option<Option<String>>,
}

// A present `null` must become Some(None), not None
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

impl ProductPatch {
    /// Patch that only flips the active flag
    pub fn active(is_active: bool) -> Self {
        ProductPatch {
            is_active: Some(is_active),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }

    /// Patch holding only the fields that differ between `before` and `after`
    pub fn diff(before: &ProductFields, after: &ProductFields) -> Self {
        fn changed<T: PartialEq + Clone>(before: &T, after: &T) -> Option<T> {
            (before != after).then(|| after.clone())
        }

        ProductPatch {
            name: changed(&before.name, &after.name),
            category: changed(&before.category, &after.category),
            price: changed(&before.price, &after.price),
            original_price: changed(&before.original_price, &after.original_price),
            description: changed(&before.description, &after.description),
            image_url: changed(&before.image_url, &after.image_url),
            is_active: changed(&before.is_active, &after.is_active),
            is_weighable: changed(&before.is_weighable, &after.is_weighable),
            price_per_gram: changed(&before.price_per_gram, &after.price_per_gram),
            complement_groups: changed(&before.complement_groups, &after.complement_groups),
            sizes: changed(&before.sizes, &after.sizes),
            scheduled_days: changed(&before.scheduled_days, &after.scheduled_days),
            availability_type: changed(&before.availability_type, &after.availability_type),
        }
    }
}

impl From<ProductFields> for ProductPatch {
    /// Full replacement of every editable field
    fn from(fields: ProductFields) -> Self {
        ProductPatch {
            name: Some(fields.name),
            category: Some(fields.category),
            price: Some(fields.price),
            original_price: Some(fields.original_price),
            description: Some(fields.description),
            image_url: Some(fields.image_url),
            is_active: Some(fields.is_active),
            is_weighable: Some(fields.is_weighable),
            price_per_gram: Some(fields.price_per_gram),
            complement_groups: Some(fields.complement_groups),
            sizes: Some(fields.sizes),
            scheduled_days: Some(fields.scheduled_days),
            availability_type: Some(fields.availability_type),
        }
    }
}

/// In-memory copy of a product being created or edited
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// None until the store has created the product
    pub id: Option<ProductId>,
    pub fields: ProductFields,
}

impl ProductDraft {
    /// Empty draft for the "new product" form
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft copied from an existing product
    pub fn from_product(product: &Product) -> Self {
        ProductDraft {
            id: Some(product.id),
            fields: product.to_fields(),
        }
    }

    /// Fields to submit: text trimmed, money rounded to cents.
    /// `price_per_gram` is dropped for products sold by unit.
    pub fn submission(&self) -> ProductFields {
        let mut fields = self.fields.clone();
        fields.name = fields.name.trim().to_string();
        fields.description = fields.description.trim().to_string();
        fields.price = fields.price.round_dp(2);
        fields.original_price = fields.original_price.map(|p| p.round_dp(2));
        fields.image_url = fields
            .image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        if !fields.is_weighable {
            fields.price_per_gram = None;
        }
        fields
    }
}

/// Format a money value the way the admin table shows it
pub fn format_price(value: Decimal) -> String {
    format!("R$ {:.2}", value.round_dp(2))
}

/// Price label for products sold by weight
pub fn format_price_per_gram(value: Decimal) -> String {
    format!("R$ {}/g", value.normalize())
}

/// Parse a decimal typed into a form input. Accepts a comma as decimal separator.
pub fn parse_decimal_input(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(&trimmed.replace(',', ".")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_product() -> Product {
        Product::from_fields(
            Uuid::new_v4(),
            ProductFields {
                name: "Açaí 500g".to_string(),
                category: Category::Acai,
                price: Decimal::new(1850, 2),
                original_price: Some(Decimal::new(2200, 2)),
                description: "Açaí puro com granola".to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_category_default() {
        assert_eq!(Category::default(), Category::Outros);
    }

    #[test]
    fn test_category_wire_names() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category() {
        let err = "pizza".parse::<Category>().unwrap_err();
        assert_eq!(err, UnknownCategory("pizza".to_string()));
    }

    #[test]
    fn test_fields_defaults() {
        let fields = ProductFields::default();
        assert!(fields.is_active);
        assert!(!fields.is_weighable);
        assert_eq!(fields.category, Category::Outros);
        assert_eq!(fields.availability_type.as_deref(), Some("always"));
    }

    #[test]
    fn test_product_deserializes_with_missing_optionals() {
        let id = Uuid::new_v4();
        let json = format!(
            r#"{{"id":"{}","name":"Coca","category":"bebidas","price":"6.00","description":"Lata 350ml"}}"#,
            id
        );
        let product: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(product.id, id);
        assert!(product.is_active);
        assert!(!product.is_weighable);
        assert_eq!(product.price, Decimal::new(600, 2));
        assert!(product.original_price.is_none());
    }

    #[test]
    fn test_promotion_is_display_only() {
        let mut product = sample_product();
        assert!(product.is_on_promotion());

        product.original_price = Some(Decimal::new(1000, 2));
        assert!(!product.is_on_promotion());

        product.original_price = None;
        assert!(!product.is_on_promotion());
    }

    #[test]
    fn test_apply_patch_only_touches_set_fields() {
        let mut product = sample_product();
        let before = product.clone();

        product.apply_patch(&ProductPatch::active(false));

        assert!(!product.is_active);
        assert_eq!(product.name, before.name);
        assert_eq!(product.price, before.price);
        assert_eq!(product.original_price, before.original_price);
    }

    #[test]
    fn test_apply_patch_clears_nullable_field() {
        let mut product = sample_product();
        let patch = ProductPatch {
            original_price: Some(None),
            ..Default::default()
        };
        product.apply_patch(&patch);
        assert!(product.original_price.is_none());
    }

    #[test]
    fn test_patch_null_versus_absent() {
        let patch: ProductPatch = serde_json::from_str(r#"{"image_url":null}"#).unwrap();
        assert_eq!(patch.image_url, Some(None));
        assert_eq!(patch.original_price, None);

        let json = serde_json::to_string(&ProductPatch::active(true)).unwrap();
        assert_eq!(json, r#"{"is_active":true}"#);
    }

    #[test]
    fn test_full_patch_reproduces_fields() {
        let product = sample_product();
        let mut other = Product::from_fields(product.id, ProductFields::default());
        other.apply_patch(&ProductPatch::from(product.to_fields()));
        assert_eq!(other.to_fields(), product.to_fields());
    }

    #[test]
    fn test_diff_contains_only_changes() {
        let product = sample_product();
        let before = product.to_fields();
        let mut after = before.clone();
        after.name = "Açaí 700g".to_string();
        after.original_price = None;

        let patch = ProductPatch::diff(&before, &after);
        assert_eq!(patch.name.as_deref(), Some("Açaí 700g"));
        assert_eq!(patch.original_price, Some(None));
        assert!(patch.price.is_none());
        assert!(patch.description.is_none());

        assert!(ProductPatch::diff(&before, &before).is_empty());
    }

    #[test]
    fn test_submission_normalizes_fields() {
        let mut draft = ProductDraft::new();
        draft.fields.name = "  Milkshake  ".to_string();
        draft.fields.description = " Morango ".to_string();
        draft.fields.price = Decimal::new(12999, 3);
        draft.fields.image_url = Some("   ".to_string());
        draft.fields.price_per_gram = Some(Decimal::new(5, 2));

        let fields = draft.submission();
        assert_eq!(fields.name, "Milkshake");
        assert_eq!(fields.description, "Morango");
        assert_eq!(fields.price, Decimal::new(1300, 2));
        assert!(fields.image_url.is_none());
        // Not weighable, so the per-gram price is not sent
        assert!(fields.price_per_gram.is_none());
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::new(125, 1)), "R$ 12.50");
        assert_eq!(format_price(Decimal::new(6, 0)), "R$ 6.00");
        assert_eq!(format_price_per_gram(Decimal::new(50, 3)), "R$ 0.05/g");
    }

    #[test]
    fn test_parse_decimal_input() {
        assert_eq!(parse_decimal_input("12,50"), Some(Decimal::new(1250, 2)));
        assert_eq!(parse_decimal_input(" 7 "), Some(Decimal::new(7, 0)));
        assert_eq!(parse_decimal_input(""), None);
        assert_eq!(parse_decimal_input("abc"), None);
    }
}
