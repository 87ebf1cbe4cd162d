//! Gateway serve entrypoint.

use crate::{
    AppState, MemoryBotConfig,
    chat::{ChatContext, Settings},
    provider::{Connector, OpenAIConnector},
    routes,
};
use anyhow::Result;
use tokio::sync::oneshot;

/// Handle returned by [`serve`], holding the bound port and shutdown trigger.
pub struct ServeHandle {
    /// The port the server is listening on.
    pub port: u16,
    /// Send a value to trigger graceful shutdown.
    shutdown_tx: Option<oneshot::Sender<()>>,
    /// Join handle for the server task.
    join: Option<tokio::task::JoinHandle<Result<(), std::io::Error>>>,
}

impl ServeHandle {
    /// Trigger graceful shutdown and wait for the server to stop.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            join.await??;
        }
        Ok(())
    }
}

/// Build the chat context from config and start serving on `bind`.
pub async fn serve(config: &MemoryBotConfig, bind: &str) -> Result<ServeHandle> {
    let connector = OpenAIConnector::new(
        llm::Client::new(),
        config.llm.base_url.clone(),
        config.llm.timeout(),
    );
    serve_with_connector(config, connector, bind).await
}

/// Serve with a caller-supplied completion connector.
pub async fn serve_with_connector<C: Connector>(
    config: &MemoryBotConfig,
    connector: C,
    bind: &str,
) -> Result<ServeHandle> {
    let settings = Settings {
        credential: config.llm.api_key.trim().to_owned(),
        model: config.llm.model,
        window: config.memory.window,
        ..Settings::default()
    };
    if settings.credential.is_empty() {
        tracing::warn!("no API key configured; enter one in the page");
    }
    tracing::info!(
        "chat context ready: model {}, window {}",
        settings.model,
        settings.window
    );

    let chat = ChatContext::new(settings, config.llm.timeout());
    let app = routes::router(AppState::new(chat, connector)?);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    let port = listener.local_addr()?.port();
    tracing::info!("memorybot listening on {bind} (port {port})");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("received shutdown signal");
            })
            .await
    });

    Ok(ServeHandle {
        port,
        shutdown_tx: Some(shutdown_tx),
        join: Some(join),
    })
}
