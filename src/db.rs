// ==========================================
// 产品目录 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 打开即保证 product 表存在
// ==========================================

use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 产品表结构
pub const PRODUCT_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS product (
    id          TEXT PRIMARY KEY NOT NULL,
    name        TEXT,
    description TEXT,
    price       REAL,
    stock       INTEGER,
    category    TEXT
);
CREATE INDEX IF NOT EXISTS idx_product_category ON product(category);
"#;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 建表（幂等）
pub fn ensure_product_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(PRODUCT_SCHEMA)
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection<P: AsRef<Path>>(db_path: P) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    ensure_product_schema(&conn)?;
    Ok(conn)
}

/// 打开内存数据库（测试/临时目录）
pub fn open_in_memory() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure_sqlite_connection(&conn)?;
    ensure_product_schema(&conn)?;
    Ok(conn)
}
