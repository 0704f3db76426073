use roster_adapters::{
    config::{PostgresSettings, RosterSettings},
    hashing::Argon2Hasher,
    persistence::PostgresAccountStore,
};
use roster_core::AccountFields;
use roster_service::{AccountService, PostgresAccountService, configure_postgresql};
use secrecy::Secret;
use sqlx::PgPool;
use testcontainers_modules::{
    postgres::Postgres,
    testcontainers::{ContainerAsync, runners::AsyncRunner},
};

pub const PASSWORD: &str = "Ab1!Ab1!Ab1!";

pub struct TestApp {
    pub service: PostgresAccountService,
    pub store: PostgresAccountStore<Argon2Hasher>,
    pub pool: PgPool,
    pub settings: RosterSettings,
    // Dropping the container stops the database.
    _container: ContainerAsync<Postgres>,
}

impl TestApp {
    pub async fn new() -> Self {
        let container = Postgres::default().start().await.unwrap();
        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(5432).await.unwrap();

        let settings = RosterSettings {
            postgres: PostgresSettings {
                url: Secret::from(format!(
                    "postgres://postgres:postgres@{host}:{port}/postgres"
                )),
                max_connections: 5,
            },
        };
        let pool = configure_postgresql(&settings).await.unwrap();

        let store = PostgresAccountStore::new(pool.clone(), Argon2Hasher::new());
        let service = AccountService::new(store.clone());

        Self {
            service,
            store,
            pool,
            settings,
            _container: container,
        }
    }

    pub async fn pooled_ids(&self) -> Vec<i64> {
        sqlx::query_scalar("SELECT id FROM id_pool ORDER BY released_on, id")
            .fetch_all(&self.pool)
            .await
            .unwrap()
    }
}

pub fn fields(email: &str) -> AccountFields {
    AccountFields {
        first_name: "ada".to_string(),
        middle_name: Some("augusta".to_string()),
        last_name: "lovelace".to_string(),
        email: email.to_string(),
        password: Secret::from(PASSWORD.to_string()),
        date_of_birth: "1990-12-10".to_string(),
    }
}
