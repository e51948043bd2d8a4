//! Run the HTTP/WebSocket server: `folio serve`.

use anyhow::Result;

use folio::folio_config::FolioToml;

/// CLI flags override the file and environment.
pub async fn cmd_serve(mut config: FolioToml, port: Option<u16>, dev: bool) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    if dev {
        config.server.dev = true;
    }
    folio::server::start_server(&config).await
}
