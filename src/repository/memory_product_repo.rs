// ==========================================
// 产品目录 - 内存产品仓储
// ==========================================
// 存储: RwLock<HashMap<id, Product>>，可选 JSON 快照文件
// 并发: put_if_absent 在同一把写锁内完成存在性检查与插入
// 持久化: 每次成功变更后重写快照；写快照失败只记日志，不回滚内存变更
// ==========================================

use crate::domain::product::{Product, ProductFilter};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::product_repo::ProductRepository;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

pub struct MemoryProductRepository {
    products: RwLock<HashMap<String, Product>>,
    data_file: Option<PathBuf>,
}

impl MemoryProductRepository {
    /// 纯内存目录（不持久化）
    pub fn new() -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
            data_file: None,
        }
    }

    /// 以 JSON 快照文件为后备存储
    ///
    /// 文件不存在时从空目录开始；文件存在但无法解析时报错
    pub fn with_data_file<P: Into<PathBuf>>(data_file: P) -> RepositoryResult<Self> {
        let data_file = data_file.into();
        let products = load_snapshot(&data_file)?;
        Ok(Self {
            products: RwLock::new(products),
            data_file: Some(data_file),
        })
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, HashMap<String, Product>>> {
        self.products
            .read()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, HashMap<String, Product>>> {
        self.products
            .write()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 持写锁期间保存快照，保证快照与内存一致
    fn persist(&self, products: &HashMap<String, Product>) {
        let Some(path) = &self.data_file else {
            return;
        };
        if let Err(e) = save_snapshot(path, products) {
            warn!(error = %e, "failed to save catalog snapshot");
        }
    }
}

impl Default for MemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn require_key(product: &Product) -> RepositoryResult<&str> {
    product
        .key()
        .ok_or_else(|| RepositoryError::ValidationError("product id is required".to_string()))
}

fn sorted(mut products: Vec<Product>) -> Vec<Product> {
    products.sort_by(|a, b| a.id.cmp(&b.id));
    products
}

fn load_snapshot(path: &Path) -> RepositoryResult<HashMap<String, Product>> {
    if !path.exists() {
        info!(path = %path.display(), "catalog snapshot not found, starting empty");
        return Ok(HashMap::new());
    }

    let to_error = |message: String| RepositoryError::SnapshotLoadError {
        path: path.display().to_string(),
        message,
    };

    let file = File::open(path).map_err(|e| to_error(e.to_string()))?;
    let products: Vec<Product> =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| to_error(e.to_string()))?;

    let mut map = HashMap::with_capacity(products.len());
    for product in products {
        if let Some(id) = product.key().map(str::to_string) {
            map.insert(id, product);
        }
    }
    info!(path = %path.display(), count = map.len(), "catalog snapshot loaded");
    Ok(map)
}

fn save_snapshot(path: &Path, products: &HashMap<String, Product>) -> RepositoryResult<()> {
    let to_error = |message: String| RepositoryError::SnapshotSaveError {
        path: path.display().to_string(),
        message,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| to_error(e.to_string()))?;
    }

    let snapshot = sorted(products.values().cloned().collect());
    let file = File::create(path).map_err(|e| to_error(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &snapshot).map_err(|e| to_error(e.to_string()))?;
    writer.flush().map_err(|e| to_error(e.to_string()))
}

impl ProductRepository for MemoryProductRepository {
    fn get(&self, id: &str) -> RepositoryResult<Option<Product>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn put_if_absent(&self, product: &Product) -> RepositoryResult<bool> {
        // 无主键的记录无法入库，按未插入处理
        let Some(id) = product.key() else {
            return Ok(false);
        };
        let mut products = self.write()?;
        if products.contains_key(id) {
            return Ok(false);
        }
        products.insert(id.to_string(), product.clone());
        self.persist(&products);
        Ok(true)
    }

    fn update(&self, product: &Product) -> RepositoryResult<bool> {
        let id = require_key(product)?;
        let mut products = self.write()?;
        if !products.contains_key(id) {
            return Ok(false);
        }
        products.insert(id.to_string(), product.clone());
        self.persist(&products);
        Ok(true)
    }

    fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let mut products = self.write()?;
        if products.remove(id).is_none() {
            return Ok(false);
        }
        self.persist(&products);
        Ok(true)
    }

    fn list(&self) -> RepositoryResult<Vec<Product>> {
        Ok(sorted(self.read()?.values().cloned().collect()))
    }

    fn search(&self, filter: &ProductFilter) -> RepositoryResult<Vec<Product>> {
        let products = self.read()?;
        Ok(sorted(
            products
                .values()
                .filter(|p| filter.matches(p))
                .cloned()
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn test_put_if_absent_is_atomic_across_threads() {
        let repo = Arc::new(MemoryProductRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || {
                    let product = Product::new("same", format!("n{}", i), "", 1.0, 1, "c");
                    repo.put_if_absent(&product).unwrap()
                })
            })
            .collect();

        let inserted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|inserted| *inserted)
            .count();

        assert_eq!(inserted, 1);
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");

        let repo = MemoryProductRepository::with_data_file(&path).unwrap();
        assert!(repo.list().unwrap().is_empty());
        assert!(repo
            .put_if_absent(&Product::new("1", "测试产品", "描述", 100.0, 10, "测试分类"))
            .unwrap());
        assert!(path.exists());

        let reloaded = MemoryProductRepository::with_data_file(&path).unwrap();
        let product = reloaded.get("1").unwrap().unwrap();
        assert_eq!(product.name.as_deref(), Some("测试产品"));
        assert_eq!(product.price, Some(100.0));
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "not json").unwrap();

        let err = MemoryProductRepository::with_data_file(&path).err().unwrap();
        assert!(matches!(err, RepositoryError::SnapshotLoadError { .. }));
    }

    #[test]
    fn test_search_uses_filter() {
        let repo = MemoryProductRepository::new();
        repo.put_if_absent(&Product::new("1", "Apple Phone", "", 100.0, 10, "phone"))
            .unwrap();
        repo.put_if_absent(&Product::new("2", "Huawei Phone", "", 200.0, 20, "phone"))
            .unwrap();

        let hits = repo
            .search(&ProductFilter::default().with_name("APPLE"))
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_deref(), Some("1"));
    }

    #[test]
    fn test_put_if_absent_without_id_is_not_inserted() {
        let repo = MemoryProductRepository::new();
        let mut product = Product::new("x", "n", "", 1.0, 1, "c");
        product.id = Some(String::new());

        assert!(!repo.put_if_absent(&product).unwrap());
        assert!(repo.list().unwrap().is_empty());
        assert!(matches!(
            repo.update(&product),
            Err(RepositoryError::ValidationError(_))
        ));
    }

    #[test]
    fn test_search_name_folds_unicode_case() {
        let repo = MemoryProductRepository::new();
        repo.put_if_absent(&Product::new("1", "ÄPFEL Saft", "", 5.0, 1, "drink"))
            .unwrap();

        let hits = repo
            .search(&ProductFilter::default().with_name("äpfel"))
            .unwrap();
        assert_eq!(hits.len(), 1);
    }
}
