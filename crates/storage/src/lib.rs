use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::domain::{Producto, ProductoId};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./data/erp.db";

/// Persistence operations the desktop backend worker and the tools CLI rely on.
#[async_trait]
pub trait ProductoRepository: Send + Sync {
    /// Every stored producto, oldest first.
    async fn list_productos(&self) -> Result<Vec<Producto>>;
    /// Stores a new row and returns the id storage assigned. The incoming id is ignored.
    async fn insert_producto(&self, producto: &Producto) -> Result<ProductoId>;
    async fn count_productos(&self) -> Result<i64>;
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid sqlite database url '{database_url}'"))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open sqlite database '{database_url}'"))?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run productos migrations")?;
        tracing::debug!(database_url, "storage ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }
}

#[async_trait]
impl ProductoRepository for Storage {
    async fn list_productos(&self) -> Result<Vec<Producto>> {
        let rows = sqlx::query(
            "SELECT id, nombre, descripcion, categoria, precio_unitario, stock
             FROM productos
             ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list productos")?;

        rows.iter().map(producto_from_row).collect()
    }

    async fn insert_producto(&self, producto: &Producto) -> Result<ProductoId> {
        let rec = sqlx::query(
            "INSERT INTO productos (nombre, descripcion, categoria, precio_unitario, stock)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(&producto.nombre)
        .bind(&producto.descripcion)
        .bind(&producto.categoria)
        .bind(producto.precio_unitario)
        .bind(producto.stock)
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("failed to insert producto '{}'", producto.nombre))?;
        Ok(ProductoId(rec.get::<i64, _>(0)))
    }

    async fn count_productos(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM productos")
            .fetch_one(&self.pool)
            .await
            .context("failed to count productos")?;
        Ok(count)
    }
}

fn producto_from_row(row: &SqliteRow) -> Result<Producto> {
    Ok(Producto {
        id: ProductoId(row.try_get::<i64, _>("id")?),
        nombre: row.try_get("nombre")?,
        descripcion: row.try_get("descripcion")?,
        categoria: row.try_get("categoria")?,
        precio_unitario: row.try_get("precio_unitario")?,
        stock: row.try_get("stock")?,
    })
}

/// Turns a bare file path or `sqlite:path` into a `sqlite://` url. Blank input falls back to
/// [`DEFAULT_DATABASE_URL`].
pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return DEFAULT_DATABASE_URL.to_string();
    }

    if raw_database_url.starts_with("sqlite::memory:") || raw_database_url.contains("://") {
        return raw_database_url.to_string();
    }

    let path = raw_database_url
        .strip_prefix("sqlite:")
        .unwrap_or(raw_database_url);
    format!("sqlite://{}", path.replace('\\', "/"))
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
