use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpStream;
use tokio_rustls::{
    client::TlsStream,
    rustls::{self, pki_types::ServerName, ClientConfig, RootCertStore},
    TlsConnector,
};

fn client_config() -> anyhow::Result<ClientConfig> {
    let roots = RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(config)
}

pub async fn wrap(host: &str, stream: TcpStream) -> anyhow::Result<TlsStream<TcpStream>> {
    let connector = TlsConnector::from(Arc::new(client_config()?));
    let name = ServerName::try_from(host.to_string())
        .with_context(|| anyhow::anyhow!("'{host}' is not a valid server name"))?;

    log::debug!("starting tls handshake with {host}");
    connector
        .connect(name, stream)
        .await
        .with_context(|| anyhow::anyhow!("tls handshake with {host} failed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builds() {
        let config = client_config().unwrap();
        assert!(config.alpn_protocols.is_empty());
    }
}
