use async_trait::async_trait;
use cost_core::seed::default_catalog;
use cost_core::{Category, Item, ItemId, ItemRepository, NewItem, RepositoryError};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::decimal::{decimal_to_f64, get_decimal};

const SELECT_ITEMS: &str = "SELECT id, nome, categoria, quantidade_base, tipo_quantidade,
        preco_por_quantidade
 FROM items";

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Open `path`, creating the file if it does not exist. `:memory:` opens
    /// a private in-memory database on a single connection.
    pub async fn new(path: &str) -> Result<Self, RepositoryError> {
        if path == ":memory:" {
            return Self::in_memory().await;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{}: {}", path, e)))?;
        Ok(Self { pool })
    }

    pub async fn in_memory() -> Result<Self, RepositoryError> {
        // Every connection to `:memory:` is its own database, so the pool
        // must never open a second one or drop the first.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    #[cfg(test)]
    fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    /// Insert the default catalog if `items` has never allocated an id.
    ///
    /// An emptied table keeps its `sqlite_sequence` entry, so deleting every
    /// item does not bring the defaults back. Returns whether seeding ran.
    pub async fn seed_if_new(&self) -> Result<bool, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let allocated = sqlx::query("SELECT seq FROM sqlite_sequence WHERE name = 'items'")
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .is_some();
        if allocated {
            return Ok(false);
        }

        let items = default_catalog();
        for item in &items {
            sqlx::query(
                "INSERT INTO items (
                    id, nome, categoria, quantidade_base, tipo_quantidade, preco_por_quantidade
                ) VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(item.id)
            .bind(&item.nome)
            .bind(item.categoria.as_str())
            .bind(decimal_to_f64(item.quantidade_base))
            .bind(&item.tipo_quantidade)
            .bind(decimal_to_f64(item.preco_por_quantidade))
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        info!(count = items.len(), "seeded default catalog");
        Ok(true)
    }
}

fn row_to_item(row: &sqlx::sqlite::SqliteRow) -> Result<Item, RepositoryError> {
    let categoria: String = row
        .try_get("categoria")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

    Ok(Item {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        nome: row
            .try_get("nome")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        categoria: Category::parse(&categoria).ok_or_else(|| {
            RepositoryError::Database(format!("Unknown categoria '{}'", categoria))
        })?,
        quantidade_base: get_decimal(row, "quantidade_base")?,
        tipo_quantidade: row
            .try_get("tipo_quantidade")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        preco_por_quantidade: get_decimal(row, "preco_por_quantidade")?,
    })
}

#[async_trait]
impl ItemRepository for SqliteRepository {
    async fn list_items(&self) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query(&format!("{} ORDER BY id", SELECT_ITEMS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_item).collect()
    }

    async fn get_item(
        &self,
        id: ItemId,
    ) -> Result<Item, RepositoryError> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_ITEMS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        row_to_item(&row)
    }

    async fn create_item(
        &self,
        item: NewItem,
    ) -> Result<Item, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO items (
                nome, categoria, quantidade_base, tipo_quantidade, preco_por_quantidade
            ) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(item.nome())
        .bind(item.categoria().as_str())
        .bind(decimal_to_f64(item.quantidade_base()))
        .bind(item.tipo_quantidade())
        .bind(decimal_to_f64(item.preco_por_quantidade()))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(Item::from_new(result.last_insert_rowid(), item))
    }

    async fn update_item(
        &self,
        id: ItemId,
        item: NewItem,
    ) -> Result<Item, RepositoryError> {
        let result = sqlx::query(
            "UPDATE items SET
                nome = ?, categoria = ?, quantidade_base = ?, tipo_quantidade = ?,
                preco_por_quantidade = ?
             WHERE id = ?",
        )
        .bind(item.nome())
        .bind(item.categoria().as_str())
        .bind(decimal_to_f64(item.quantidade_base()))
        .bind(item.tipo_quantidade())
        .bind(decimal_to_f64(item.preco_por_quantidade()))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(Item::from_new(id, item))
    }

    async fn delete_item(
        &self,
        id: ItemId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
