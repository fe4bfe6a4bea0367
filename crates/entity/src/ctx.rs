use std::sync::Arc;

use tokio::sync::RwLock;

use quill_pg::{DbConfig, DB};
use quill_server::ServerConfig;
use quill_session::{SessionCodec, SessionConfig};

struct Inner {
    server_config: ServerConfig,
    codec: SessionCodec,
    pg_config: DbConfig,
    db: RwLock<DB>,
}

#[derive(Clone)]
pub struct Storage {
    inner: Arc<Inner>,
}

impl Storage {
    pub fn new() -> anyhow::Result<Self> {
        let server_config = ServerConfig::new()?;
        let codec = SessionCodec::new(&SessionConfig::new()?)?;
        let pg_config = DbConfig::new()?;
        let db = DB::new(server_config.app_name(), &pg_config)?;
        Ok(Self {
            inner: Arc::new(Inner {
                server_config,
                codec,
                pg_config,
                db: RwLock::new(db),
            }),
        })
    }

    pub fn server_config(&self) -> &ServerConfig {
        &self.inner.server_config
    }

    pub fn codec(&self) -> &SessionCodec {
        &self.inner.codec
    }

    /// Current database handle, cloned out so the lock is never held
    /// across a query.
    pub async fn db(&self) -> DB {
        self.inner.db.read().await.clone()
    }

    /// Opens a fresh pool for the configured environment and swaps it in.
    /// Runtimes whose pools cannot outlive an invocation get a new
    /// connection per request without rebuilding the schema.
    pub async fn reconnect(&self) -> anyhow::Result<()> {
        let db = DB::new(self.inner.server_config.app_name(), &self.inner.pg_config)?;
        *self.inner.db.write().await = db;
        Ok(())
    }
}
