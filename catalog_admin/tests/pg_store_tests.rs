// tests/pg_store_tests.rs - PgProductStore against a real PostgreSQL
//
// Requires DATABASE_URL. Each test runs in its own schema, created with the
// seed rows and dropped afterwards.

mod common;

use catalog_admin::catalog::{
    Category, EditSession, ProductFields, ProductPatch, ProductStore, SaveOutcome, SessionState, StoreError,
};
use catalog_admin::web_app::api::{db, PgProductStore};
use common::db::with_test_db;
use rust_decimal::Decimal;
use serde_json::json;

fn brownie() -> ProductFields {
    ProductFields {
        name: "Brownie".to_string(),
        description: "Chocolate meio amargo".to_string(),
        category: Category::Sobremesas,
        price: Decimal::new(950, 2),
        sizes: Some(json!([{ "name": "Fatia", "price": "9.50" }])),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_list_returns_seed_rows() -> anyhow::Result<()> {
    with_test_db("pg_list_seed", |pool, schema| async move {
        let store = PgProductStore::new(pool, schema);

        let products = store.list().await?;

        assert_eq!(products.len(), 7);
        assert_eq!(store.count().await?, 7);
        let sorvete = products.iter().find(|p| p.name == "Sorvete no Peso").unwrap();
        assert!(sorvete.is_weighable);
        assert_eq!(sorvete.price_per_gram, Some(Decimal::new(590, 4)));
        assert!(products.iter().any(|p| !p.is_active));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_create_roundtrips_all_fields() -> anyhow::Result<()> {
    with_test_db("pg_create", |pool, schema| async move {
        let store = PgProductStore::new(pool, schema);

        let created = store.create(brownie()).await?;

        assert_eq!(created.to_fields(), brownie());
        assert!(created.created_at.is_some());
        let listed = store.list().await?;
        assert!(listed.iter().any(|p| p.id == created.id));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_create_rejects_invalid_fields() -> anyhow::Result<()> {
    with_test_db("pg_create_invalid", |pool, schema| async move {
        let store = PgProductStore::new(pool, schema);
        let mut fields = brownie();
        fields.price = Decimal::ZERO;

        let err = store.create(fields).await.unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.count().await?, 7);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_update_applies_partial_patch() -> anyhow::Result<()> {
    with_test_db("pg_update_patch", |pool, schema| async move {
        let store = PgProductStore::new(pool, schema);
        let acai = store
            .list()
            .await?
            .into_iter()
            .find(|p| p.name == "Açaí 500ml")
            .unwrap();

        let patch = ProductPatch {
            price: Some(Decimal::new(1790, 2)),
            original_price: Some(None),
            ..Default::default()
        };
        let updated = store.update(acai.id, patch).await?;

        assert_eq!(updated.price, Decimal::new(1790, 2));
        assert_eq!(updated.original_price, None);
        assert_eq!(updated.name, acai.name);
        assert_eq!(updated.description, acai.description);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_missing_product_is_not_found() -> anyhow::Result<()> {
    with_test_db("pg_not_found", |pool, schema| async move {
        let store = PgProductStore::new(pool, schema);
        let id = uuid::Uuid::new_v4();

        assert_eq!(store.update(id, ProductPatch::active(false)).await.unwrap_err(), StoreError::NotFound(id));
        assert_eq!(store.delete(id).await.unwrap_err(), StoreError::NotFound(id));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_delete_removes_row() -> anyhow::Result<()> {
    with_test_db("pg_delete", |pool, schema| async move {
        let store = PgProductStore::new(pool, schema);
        let created = store.create(brownie()).await?;

        store.delete(created.id).await?;

        assert_eq!(store.count().await?, 7);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_edit_session_against_postgres() -> anyhow::Result<()> {
    with_test_db("pg_edit_session", |pool, schema| async move {
        let store = PgProductStore::new(pool, schema);
        let granola = store
            .list()
            .await?
            .into_iter()
            .find(|p| p.name == "Granola")
            .unwrap();

        let mut session = EditSession::new();
        session.start_edit(&granola)?;
        session.edit(|f| f.description = "Granola caseira com mel".to_string());

        let outcome = session.save(&store).await;

        let SaveOutcome::Saved { product, .. } = outcome else {
            panic!("expected the edit to be saved");
        };
        assert_eq!(product.description, "Granola caseira com mel");
        assert_eq!(session.state(), SessionState::Idle);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_seed_if_empty_on_fresh_schema() -> anyhow::Result<()> {
    with_test_db("pg_seed_fresh", |pool, schema| async move {
        // Start from an empty table in the same schema
        sqlx::query(&format!("DELETE FROM {}.delivery_products", schema))
            .execute(&pool)
            .await?;
        db::ensure_schema(&pool, &schema).await?;
        let store = PgProductStore::new(pool, schema);

        let created = db::seed_if_empty(&store, vec![brownie()]).await?;
        assert_eq!(created, 1);
        assert_eq!(db::seed_if_empty(&store, vec![brownie()]).await?, 0);
        assert_eq!(store.count().await?, 1);
        Ok(())
    })
    .await
}
