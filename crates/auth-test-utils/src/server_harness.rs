//! Test server harness for E2E testing
//!
//! Provides TestAuthServer for spawning real auth server instances in tests.
//! The server runs the production router over an in-memory user store, so no
//! database is required.

use crate::crypto_fixtures::{test_symmetric_key, test_token_maker};
use crate::token_builders::TestUserBuilder;
use auth_service::config::{Config, MIN_BCRYPT_COST};
use auth_service::models::TokenResponse;
use auth_service::observability::metrics::init_metrics_recorder;
use auth_service::repositories::{InMemoryUserStore, UserStore};
use auth_service::routes::{self, AppState};
use auth_service::token::SealedTokenMaker;
use common::secret::SecretString;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Seed for the harness token key.
const SERVER_KEY_SEED: u8 = 1;

/// Test harness for spawning the auth server in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_auth_flow_e2e() -> Result<()> {
///     let server = TestAuthServer::spawn().await?;
///
///     let response = server
///         .client()
///         .post(format!("{}/api/v1/auth/login", server.url()))
///         .json(&login_request)
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestAuthServer {
    addr: SocketAddr,
    store: Arc<dyn UserStore>,
    token_maker: Arc<SealedTokenMaker>,
    config: Config,
    client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestAuthServer {
    /// Spawn a server over an empty in-memory store
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_store(Arc::new(InMemoryUserStore::new())).await
    }

    /// Spawn a server over the given store
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Seal tokens with `test_symmetric_key(1)`
    /// - Hash passwords at the minimum bcrypt cost
    pub async fn spawn_with_store(store: Arc<dyn UserStore>) -> Result<Self, anyhow::Error> {
        let token_maker = Arc::new(
            test_token_maker(SERVER_KEY_SEED)
                .map_err(|e| anyhow::anyhow!("Failed to build token maker: {}", e))?,
        );

        let config = Config {
            database_url: String::new(), // Not used with the in-memory store
            bind_address: "127.0.0.1:0".to_string(),
            token_symmetric_key: SecretString::from(test_symmetric_key(SERVER_KEY_SEED)),
            access_token_duration: chrono::Duration::hours(1),
            bcrypt_cost: MIN_BCRYPT_COST,
        };

        let state = Arc::new(AppState {
            store: store.clone(),
            token_maker: token_maker.clone(),
            config: config.clone(),
        });

        // Only one global recorder per process; later servers get a detached one.
        let metrics_handle = match init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => PrometheusBuilder::new().build_recorder().handle(),
        };

        let app = routes::build_routes(state, metrics_handle);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            store,
            token_maker,
            config,
            client: reqwest::Client::new(),
            _handle: handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Shared HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Token maker holding the server's key
    pub fn token_maker(&self) -> &SealedTokenMaker {
        &self.token_maker
    }

    /// Get reference to the user store
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    /// Get reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Register `user` and return the issued access token
    pub async fn register(&self, user: &TestUserBuilder) -> Result<String, anyhow::Error> {
        let response = self
            .client
            .post(format!("{}/api/v1/auth/register", self.url()))
            .json(&user.build())
            .send()
            .await?;

        anyhow::ensure!(
            response.status().is_success(),
            "Registration failed with status {}",
            response.status()
        );

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }
}

impl Drop for TestAuthServer {
    fn drop(&mut self) {
        self._handle.abort();
    }
}
