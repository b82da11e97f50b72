//! Startup orchestration.
//!
//! # Responsibilities
//! - Bind the listener described by the configuration
//! - Announce the reachable address
//!
//! # Design Decisions
//! - Fail fast: a bind error is fatal
//! - The announced port is the bound one, so port 0 reports the real port

use tokio::net::TcpListener;
use thiserror::Error;

use crate::config::ListenerConfig;

/// Error type for startup operations.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Bind the configured address and log where the service is reachable.
pub async fn bind_listener(config: &ListenerConfig) -> Result<TcpListener, StartupError> {
    let address = config.bind_address();
    let bind_err = |source| StartupError::Bind {
        address: address.clone(),
        source,
    };

    let listener = TcpListener::bind(&address).await.map_err(bind_err)?;
    let local_addr = listener.local_addr().map_err(bind_err)?;

    tracing::info!(
        address = %local_addr,
        "Server running at http://localhost:{}",
        local_addr.port()
    );
    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn binds_ephemeral_port() {
        let config = ListenerConfig {
            port: 0,
            ..ListenerConfig::default()
        };
        let listener = bind_listener(&config).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn reports_unresolvable_host() {
        let config = ListenerConfig {
            host: "not a host".into(),
            port: 0,
            ..ListenerConfig::default()
        };
        let err = bind_listener(&config).await.unwrap_err();
        assert!(err.to_string().contains("not a host:0"));
    }
}
