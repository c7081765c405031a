use anyhow::{Context, Result};
use tokio::sync::OnceCell;

use comprehensive_api::auth::CredentialRegistry;
use comprehensive_api::config::AppConfig;
use comprehensive_api::{app, AppState};

static SERVER: OnceCell<TestServer> = OnceCell::const_new();

pub struct TestServer {
    pub base_url: String,
}

impl TestServer {
    /// Serve the real router on an ephemeral loopback port in a background
    /// thread with its own runtime, so it outlives any single test runtime.
    fn spawn() -> Result<Self> {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").context("failed to bind test port")?;
        std_listener.set_nonblocking(true)?;
        let addr = std_listener.local_addr()?;

        let mut config = AppConfig::default();
        config.api.enable_request_logging = false;
        let state = AppState::new(config, CredentialRegistry::reference())?;

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("test server runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(std_listener).expect("test listener");
                axum::serve(listener, app(state)).await.expect("test server");
            });
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
        })
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    SERVER.get_or_try_init(|| async { TestServer::spawn() }).await
}

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}
