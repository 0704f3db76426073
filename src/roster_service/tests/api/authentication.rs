use roster_core::{AccountStore, AccountStoreError, Email};
use roster_service::AccountServiceError;
use secrecy::Secret;

use crate::helpers::{PASSWORD, TestApp, fields};

#[tokio::test]
async fn test_authenticate_correct_credentials() {
    let app = TestApp::new().await;
    let id = app
        .service
        .create_account(fields("ada@example.com"))
        .await
        .unwrap();

    let authenticated = app
        .service
        .authenticate("ada@example.com", PASSWORD)
        .await
        .unwrap();
    assert_eq!(authenticated, id);
}

#[tokio::test]
async fn test_store_tells_failures_apart_but_service_does_not() {
    let app = TestApp::new().await;
    app.service
        .create_account(fields("ada@example.com"))
        .await
        .unwrap();

    let wrong = Secret::from("Ab1!Ab1!Ab1?".to_string());
    let right = Secret::from(PASSWORD.to_string());
    assert_eq!(
        app.store.authenticate("ada@example.com", &wrong).await,
        Err(AccountStoreError::InvalidPassword)
    );
    assert_eq!(
        app.store.authenticate("eve@example.com", &right).await,
        Err(AccountStoreError::InvalidEmail)
    );

    let wrong_password = app
        .service
        .authenticate("ada@example.com", "Ab1!Ab1!Ab1?")
        .await
        .unwrap_err();
    let unknown_email = app
        .service
        .authenticate("eve@example.com", PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(wrong_password, AccountServiceError::InvalidCredentials));
    assert!(matches!(unknown_email, AccountServiceError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_email_lookup_is_exact() {
    let app = TestApp::new().await;
    let id = app
        .service
        .create_account(fields("ada@example.com"))
        .await
        .unwrap();

    let found = app
        .store
        .find_id_by_email(&Email::parse("ada@example.com").unwrap())
        .await
        .unwrap();
    assert_eq!(found.map(|id| id.value()), Some(id));

    let found = app
        .store
        .find_id_by_email(&Email::parse("ADA@example.com").unwrap())
        .await
        .unwrap();
    assert!(found.is_none());
    assert!(matches!(
        app.service.authenticate("ADA@example.com", PASSWORD).await,
        Err(AccountServiceError::InvalidCredentials)
    ));
}
