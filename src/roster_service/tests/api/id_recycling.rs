use roster_service::AccountServiceError;

use crate::helpers::{TestApp, fields};

#[tokio::test]
async fn test_deleted_id_is_reused() {
    let app = TestApp::new().await;

    let a = app
        .service
        .create_account(fields("a@example.com"))
        .await
        .unwrap();
    assert_eq!(a, 1);

    app.service.delete_account(a).await.unwrap();
    assert_eq!(app.pooled_ids().await, vec![a]);
    assert!(app.service.get_account(a).await.unwrap().is_none());

    let b = app
        .service
        .create_account(fields("b@example.com"))
        .await
        .unwrap();
    assert_eq!(b, a);
    assert!(app.pooled_ids().await.is_empty());

    let c = app
        .service
        .create_account(fields("c@example.com"))
        .await
        .unwrap();
    assert_eq!(c, 2);
}

#[tokio::test]
async fn test_oldest_released_id_is_reused_first() {
    let app = TestApp::new().await;
    let mut ids = Vec::new();
    for email in ["a@example.com", "b@example.com", "c@example.com"] {
        ids.push(app.service.create_account(fields(email)).await.unwrap());
    }

    app.service.delete_account(ids[2]).await.unwrap();
    app.service.delete_account(ids[0]).await.unwrap();

    let next = app
        .service
        .create_account(fields("d@example.com"))
        .await
        .unwrap();
    assert_eq!(next, ids[2]);
    assert_eq!(app.pooled_ids().await, vec![ids[0]]);
}

#[tokio::test]
async fn test_concurrent_creates_with_one_pooled_id() {
    let app = TestApp::new().await;
    let a = app
        .service
        .create_account(fields("a@example.com"))
        .await
        .unwrap();
    app.service
        .create_account(fields("b@example.com"))
        .await
        .unwrap();
    app.service.delete_account(a).await.unwrap();

    let (left, right) = tokio::join!(
        app.service.create_account(fields("c@example.com")),
        app.service.create_account(fields("d@example.com")),
    );
    let left = left.unwrap();
    let right = right.unwrap();

    assert_ne!(left, right);
    assert!(left == a || right == a);
    assert_eq!(left.max(right), 3);
    assert!(app.pooled_ids().await.is_empty());
}

#[tokio::test]
async fn test_duplicate_email_does_not_consume_pooled_id() {
    let app = TestApp::new().await;
    let a = app
        .service
        .create_account(fields("a@example.com"))
        .await
        .unwrap();
    app.service
        .create_account(fields("b@example.com"))
        .await
        .unwrap();
    app.service.delete_account(a).await.unwrap();

    let result = app.service.create_account(fields("b@example.com")).await;
    assert!(matches!(result, Err(AccountServiceError::EmailInUse)));
    assert_eq!(app.pooled_ids().await, vec![a]);
}

#[tokio::test]
async fn test_failed_delete_leaves_account_and_pool_untouched() {
    let app = TestApp::new().await;
    let id = app
        .service
        .create_account(fields("a@example.com"))
        .await
        .unwrap();

    // Make the row removal fail after the id has been released.
    sqlx::query(
        r#"
            CREATE FUNCTION block_account_delete() RETURNS trigger AS $$
            BEGIN
                RAISE EXCEPTION 'account delete blocked';
            END;
            $$ LANGUAGE plpgsql
        "#,
    )
    .execute(&app.pool)
    .await
    .unwrap();
    sqlx::query(
        r#"
            CREATE TRIGGER block_account_delete
            BEFORE DELETE ON accounts
            FOR EACH ROW EXECUTE FUNCTION block_account_delete()
        "#,
    )
    .execute(&app.pool)
    .await
    .unwrap();

    let result = app.service.delete_account(id).await;
    assert!(matches!(result, Err(AccountServiceError::Internal)));
    assert!(app.service.get_account(id).await.unwrap().is_some());
    assert!(app.pooled_ids().await.is_empty());

    sqlx::query("DROP TRIGGER block_account_delete ON accounts")
        .execute(&app.pool)
        .await
        .unwrap();
    app.service.delete_account(id).await.unwrap();
    assert_eq!(app.pooled_ids().await, vec![id]);
}

#[tokio::test]
async fn test_delete_unknown_id() {
    let app = TestApp::new().await;

    let result = app.service.delete_account(42).await;
    assert!(matches!(result, Err(AccountServiceError::NotFound)));
    assert!(app.pooled_ids().await.is_empty());
}
