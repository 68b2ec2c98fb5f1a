// ==========================================
// 产品目录 - SQLite 产品仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 并发: put_if_absent 为单条 INSERT ... ON CONFLICT DO NOTHING，检查与插入原子完成
// ==========================================

use crate::db;
use crate::domain::product::{Product, ProductFilter};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::product_repo::ProductRepository;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

const SELECT_COLUMNS: &str = "SELECT id, name, description, price, stock, category FROM product";

// ==========================================
// SqliteProductRepository - 产品仓储
// ==========================================
/// 产品仓储
/// 职责: 管理 product 表的 CRUD 操作
pub struct SqliteProductRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteProductRepository {
    /// 打开（必要时创建）数据库文件
    pub fn new<P: AsRef<Path>>(db_path: P) -> RepositoryResult<Self> {
        let conn = db::open_sqlite_connection(db_path.as_ref())
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self::from_connection(Arc::new(Mutex::new(conn))))
    }

    /// 内存数据库实例
    pub fn in_memory() -> RepositoryResult<Self> {
        let conn = db::open_in_memory()
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self::from_connection(Arc::new(Mutex::new(conn))))
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Product> {
        Ok(Product {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            price: row.get(3)?,
            stock: row.get(4)?,
            category: row.get(5)?,
        })
    }

    fn query_products(&self, sql: &str, values: Vec<Value>) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params_from_iter(values), Self::map_row)?;
        let products = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(products)
    }
}

fn require_key(product: &Product) -> RepositoryResult<&str> {
    product
        .key()
        .ok_or_else(|| RepositoryError::ValidationError("product id is required".to_string()))
}

impl ProductRepository for SqliteProductRepository {
    fn get(&self, id: &str) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;
        let product = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(product)
    }

    fn put_if_absent(&self, product: &Product) -> RepositoryResult<bool> {
        // 无主键的记录无法入库，按未插入处理
        let Some(id) = product.key() else {
            return Ok(false);
        };
        let conn = self.get_conn()?;
        let inserted = conn.execute(
            r#"
            INSERT INTO product (id, name, description, price, stock, category)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO NOTHING
            "#,
            params![
                id,
                product.name,
                product.description,
                product.price,
                product.stock,
                product.category,
            ],
        )?;
        debug!(product_id = %id, inserted = inserted == 1, "put_if_absent");
        Ok(inserted == 1)
    }

    fn update(&self, product: &Product) -> RepositoryResult<bool> {
        let id = require_key(product)?;
        let conn = self.get_conn()?;
        let updated = conn.execute(
            r#"
            UPDATE product
            SET name = ?2, description = ?3, price = ?4, stock = ?5, category = ?6
            WHERE id = ?1
            "#,
            params![
                id,
                product.name,
                product.description,
                product.price,
                product.stock,
                product.category,
            ],
        )?;
        Ok(updated == 1)
    }

    fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let deleted = conn.execute("DELETE FROM product WHERE id = ?1", params![id])?;
        Ok(deleted == 1)
    }

    fn list(&self) -> RepositoryResult<Vec<Product>> {
        self.query_products(&format!("{} ORDER BY id", SELECT_COLUMNS), Vec::new())
    }

    fn search(&self, filter: &ProductFilter) -> RepositoryResult<Vec<Product>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        // 名称条件不下推：SQLite lower() 只折叠 ASCII，名称在查询结果上按 Unicode 过滤
        if filter.name.is_some() {
            clauses.push("name IS NOT NULL");
        }
        if let Some(category) = &filter.category {
            clauses.push("category = ?");
            values.push(Value::Text(category.clone()));
        }
        if let Some(min) = filter.min_price {
            clauses.push("price >= ?");
            values.push(Value::Real(min));
        }
        if let Some(max) = filter.max_price {
            clauses.push("price <= ?");
            values.push(Value::Real(max));
        }

        let mut sql = SELECT_COLUMNS.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        let mut products = self.query_products(&sql, values)?;
        if filter.name.is_some() {
            products.retain(|product| filter.matches(product));
        }
        Ok(products)
    }
}
