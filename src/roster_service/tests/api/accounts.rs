use fake::{Fake, faker::internet::en::SafeEmail};
use roster_adapters::hashing::Argon2Hasher;
use roster_core::{CredentialHasher, PasswordHash};
use roster_service::AccountServiceError;
use secrecy::{ExposeSecret, Secret};

use crate::helpers::{PASSWORD, TestApp, fields};

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = TestApp::new().await;
    let email: String = SafeEmail().fake();

    let id = app.service.create_account(fields(&email)).await.unwrap();
    let view = app.service.get_account(id).await.unwrap().unwrap();

    assert_eq!(view.id, id);
    assert_eq!(view.first_name, "Ada");
    assert_eq!(view.middle_name.as_deref(), Some("Augusta"));
    assert_eq!(view.last_name, "Lovelace");
    assert_eq!(view.email, email);
    assert_eq!(view.date_of_birth.to_string(), "1990-12-10");

    let stored: String = sqlx::query_scalar("SELECT password_hash FROM accounts WHERE id = $1")
        .bind(id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_ne!(stored, PASSWORD);

    let hash = PasswordHash::new(Secret::from(stored)).unwrap();
    assert!(
        Argon2Hasher::new()
            .verify(&hash, &Secret::from(PASSWORD.to_string()))
            .await
    );
    assert!(!hash.as_ref().expose_secret().contains(PASSWORD));
}

#[tokio::test]
async fn test_missing_middle_name_is_stored_as_null() {
    let app = TestApp::new().await;
    let mut input = fields("solo@example.com");
    input.middle_name = None;

    let id = app.service.create_account(input).await.unwrap();

    let middle: Option<String> =
        sqlx::query_scalar("SELECT middle_name FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert!(middle.is_none());
    let view = app.service.get_account(id).await.unwrap().unwrap();
    assert!(view.middle_name.is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = TestApp::new().await;
    app.service
        .create_account(fields("dup@example.com"))
        .await
        .unwrap();

    let result = app.service.create_account(fields("dup@example.com")).await;
    assert!(matches!(result, Err(AccountServiceError::EmailInUse)));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_invalid_input_never_reaches_the_database() {
    let app = TestApp::new().await;
    let mut input = fields("bad@example.com");
    input.date_of_birth = "2023-13-01".to_string();

    let result = app.service.create_account(input).await;
    assert!(matches!(result, Err(AccountServiceError::InvalidInput(_))));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_malformed_row_reads_as_absent() {
    let app = TestApp::new().await;
    let id = app
        .service
        .create_account(fields("ada@example.com"))
        .await
        .unwrap();

    sqlx::query("UPDATE accounts SET first_name = 'R2D2' WHERE id = $1")
        .bind(id)
        .execute(&app.pool)
        .await
        .unwrap();

    assert!(app.service.get_account(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_unknown_id() {
    let app = TestApp::new().await;
    assert!(app.service.get_account(99).await.unwrap().is_none());
}

#[tokio::test]
async fn test_service_built_from_settings_shares_the_database() {
    let app = TestApp::new().await;
    let id = app
        .service
        .create_account(fields("ada@example.com"))
        .await
        .unwrap();

    // Migrations are already applied; running them again is a no-op.
    let other = roster_service::build_account_service(Some(&app.settings))
        .await
        .unwrap();
    let view = other.get_account(id).await.unwrap().unwrap();
    assert_eq!(view.email, "ada@example.com");
}
