use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::server::Server;

/// Accepts connections forever, serving each one on its own task.
pub async fn run(server: Arc<Server>, listener: TcpListener) -> anyhow::Result<()> {
    info!("Listening on {}", listener.local_addr()?);

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let server = Arc::clone(&server);
        tokio::spawn(async move {
            server.handle_connection(socket).await;
            tracing::debug!(%peer, "Connection closed");
        });
    }
}
