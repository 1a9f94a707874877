// fixtures/tables/products.rs
//
// The delivery products table: DDL, seed rows and the same rows as
// `Product` values for code that runs without a database.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::catalog::model::{Category, Product, ProductFields};
use crate::fixtures::TestTable;

/// Table name inside the configured schema
pub const TABLE_NAME: &str = "delivery_products";

pub struct DeliveryProductsTable;

impl TestTable for DeliveryProductsTable {
    fn create_sql(schema: &str) -> Vec<String> {
        vec![
            format!("CREATE SCHEMA IF NOT EXISTS {}", schema),
            format!(
                r#"
                CREATE TABLE IF NOT EXISTS {schema}.{table} (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    name TEXT NOT NULL CHECK (btrim(name) <> ''),
                    category TEXT NOT NULL DEFAULT 'outros',
                    price NUMERIC(10, 2) NOT NULL CHECK (price > 0),
                    original_price NUMERIC(10, 2),
                    description TEXT NOT NULL CHECK (btrim(description) <> ''),
                    image_url TEXT,
                    is_active BOOLEAN NOT NULL DEFAULT true,
                    is_weighable BOOLEAN NOT NULL DEFAULT false,
                    price_per_gram NUMERIC(10, 4),
                    complement_groups JSONB,
                    sizes JSONB,
                    scheduled_days JSONB,
                    availability_type TEXT DEFAULT 'always',
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    CHECK (NOT is_weighable OR price_per_gram > 0)
                )
                "#,
                schema = schema,
                table = TABLE_NAME
            ),
        ]
    }

    fn setup_sql(schema: &str) -> Vec<String> {
        let mut statements = Self::create_sql(schema);
        statements.push(format!(
            r#"
            INSERT INTO {schema}.{table}
                (name, category, price, original_price, description, is_active, is_weighable, price_per_gram)
            VALUES
                ('Açaí 300ml', 'acai', 15.90, NULL, 'Açaí tradicional com banana e granola', true, false, NULL),
                ('Açaí 500ml', 'acai', 19.90, 24.90, 'Açaí cremoso com dois complementos', true, false, NULL),
                ('Combo Casal', 'combo', 39.90, 45.00, 'Dois açaís de 500ml e uma água', true, false, NULL),
                ('Milkshake de Morango', 'milkshake', 16.00, NULL, 'Milkshake 400ml com calda de morango', true, false, NULL),
                ('Sorvete no Peso', 'sorvetes', 0.01, NULL, 'Sorvete artesanal vendido por grama', true, true, 0.0590),
                ('Granola', 'complementos', 2.50, NULL, 'Porção extra de granola crocante', true, false, NULL),
                ('Água sem Gás', 'bebidas', 4.00, NULL, 'Garrafa 500ml', false, false, NULL)
            "#,
            schema = schema,
            table = TABLE_NAME
        ));
        statements
    }
}

fn fields(name: &str, category: Category, price: Decimal, description: &str) -> ProductFields {
    ProductFields {
        name: name.to_string(),
        category,
        price,
        description: description.to_string(),
        ..Default::default()
    }
}

/// Stable id of the n-th sample product
pub fn sample_id(index: usize) -> Uuid {
    Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0000 + index as u128 + 1)
}

/// The seed rows as in-memory products, in insertion order.
/// Ids are stable across calls.
pub fn sample_products() -> Vec<Product> {
    let mut acai_500 = fields(
        "Açaí 500ml",
        Category::Acai,
        Decimal::new(1990, 2),
        "Açaí cremoso com dois complementos",
    );
    acai_500.original_price = Some(Decimal::new(2490, 2));

    let mut combo = fields(
        "Combo Casal",
        Category::Combo,
        Decimal::new(3990, 2),
        "Dois açaís de 500ml e uma água",
    );
    combo.original_price = Some(Decimal::new(4500, 2));

    let mut sorvete = fields(
        "Sorvete no Peso",
        Category::Sorvetes,
        Decimal::new(1, 2),
        "Sorvete artesanal vendido por grama",
    );
    sorvete.is_weighable = true;
    sorvete.price_per_gram = Some(Decimal::new(590, 4));

    let mut agua = fields("Água sem Gás", Category::Bebidas, Decimal::new(400, 2), "Garrafa 500ml");
    agua.is_active = false;

    vec![
        fields(
            "Açaí 300ml",
            Category::Acai,
            Decimal::new(1590, 2),
            "Açaí tradicional com banana e granola",
        ),
        acai_500,
        combo,
        fields(
            "Milkshake de Morango",
            Category::Milkshake,
            Decimal::new(1600, 2),
            "Milkshake 400ml com calda de morango",
        ),
        sorvete,
        fields(
            "Granola",
            Category::Complementos,
            Decimal::new(250, 2),
            "Porção extra de granola crocante",
        ),
        agua,
    ]
    .into_iter()
    .enumerate()
    .map(|(i, f)| Product::from_fields(sample_id(i), f))
    .collect()
}
