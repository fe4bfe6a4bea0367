use std::sync::Arc;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config as PgConfig;

struct Inner {
    pool: PgPool,
}

#[derive(Clone)]
pub struct DB {
    inner: Arc<Inner>,
}

impl DB {
    /// Opens a lazily-connecting pool. No connection is attempted until
    /// the first query runs.
    pub fn new(app_name: &str, cfg: &PgConfig) -> anyhow::Result<Self> {
        log::info!(
            "'{app_name}' -> connects to postgresql '{}'",
            cfg.database()
        );
        let mut options = PgPoolOptions::new().max_connections(cfg.max_connections());
        if let Some(schema) = cfg.schema() {
            let schema = schema.to_string();
            options = options.after_connect(move |conn, _meta| {
                let schema = schema.clone();
                Box::pin(async move {
                    sqlx::query(&format!("SET search_path TO {schema}"))
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            });
        }
        let pool = options.connect_lazy(cfg.address())?;
        Ok(Self {
            inner: Arc::new(Inner { pool }),
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }
}

#[cfg(test)]
mod tests {
    use super::DB;

    #[tokio::test]
    async fn lazy_pool_needs_no_server_test() -> anyhow::Result<()> {
        let cfg = crate::DbConfig::builder()
            .with_prefix("PG_LAZY_TEST_NOT_SET_IN_SHELL_")
            .build()?;
        let db = DB::new("quill-test", &cfg)?;
        let other = db.clone();
        assert!(std::ptr::eq(db.pool(), other.pool()));
        Ok(())
    }
}
