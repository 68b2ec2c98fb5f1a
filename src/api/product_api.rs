// ==========================================
// 产品目录 - 产品 API
// ==========================================
// 职责: 产品增删改查、条件查询、批量调价/调库存、导入导出入口
// 说明: 目录为唯一可变资源，导入导出与 API 共享同一仓储实例
// ==========================================

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::import::ImportOutcome;
use crate::domain::product::{Product, ProductFilter};
use crate::exporter::ProductExporter;
use crate::importer::{is_valid_id, validate_product, ProductImporter};
use crate::repository::ProductRepository;

// ==========================================
// ProductApi - 产品 API
// ==========================================

/// 产品API
///
/// 职责：
/// 1. 产品维护（新增/查询/修改/删除），写入前执行业务校验
/// 2. 条件查询
/// 3. 批量调价（按金额/按百分比）与批量设置库存
/// 4. 表格导入/导出
pub struct ProductApi {
    repo: Arc<dyn ProductRepository>,
    importer: ProductImporter,
    exporter: ProductExporter,
}

impl ProductApi {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self {
            importer: ProductImporter::new(repo.clone()),
            exporter: ProductExporter::new(repo.clone()),
            repo,
        }
    }

    // ==========================================
    // 单条维护
    // ==========================================

    /// 新增产品
    ///
    /// # 错误
    /// - InvalidInput: 主键缺失或字段校验失败
    /// - AlreadyExists: 主键已存在
    pub fn add_product(&self, product: Product) -> ApiResult<Product> {
        let id = require_id(&product)?;
        ensure_valid(&product)?;

        if !self.repo.put_if_absent(&product)? {
            return Err(ApiError::AlreadyExists(format!("Product(id={})", id)));
        }

        info!(product_id = %id, "产品已新增");
        Ok(product)
    }

    pub fn get_product(&self, id: &str) -> ApiResult<Product> {
        self.repo
            .get(id)?
            .ok_or_else(|| not_found(id))
    }

    /// 覆盖已存在的产品
    pub fn update_product(&self, product: Product) -> ApiResult<Product> {
        let id = require_id(&product)?;
        ensure_valid(&product)?;

        if !self.repo.update(&product)? {
            return Err(not_found(&id));
        }

        info!(product_id = %id, "产品已更新");
        Ok(product)
    }

    pub fn delete_product(&self, id: &str) -> ApiResult<()> {
        if !self.repo.delete(id)? {
            return Err(not_found(id));
        }
        info!(product_id = %id, "产品已删除");
        Ok(())
    }

    pub fn list_products(&self) -> ApiResult<Vec<Product>> {
        Ok(self.repo.list()?)
    }

    pub fn search_products(&self, filter: &ProductFilter) -> ApiResult<Vec<Product>> {
        Ok(self.repo.search(filter)?)
    }

    // ==========================================
    // 批量操作
    // ==========================================
    // 规则: 未知主键、无价格产品与调价后为负的产品跳过，返回实际更新条数

    /// 批量调价（价格 + adjustment）
    #[instrument(skip(self))]
    pub fn batch_update_price(&self, ids: &[String], adjustment: f64) -> ApiResult<usize> {
        self.batch_update(ids, |product| adjust_price(product, |price| price + adjustment))
    }

    /// 批量按百分比调价（价格 * (1 + percentage / 100)）
    #[instrument(skip(self))]
    pub fn batch_update_price_by_percentage(
        &self,
        ids: &[String],
        percentage: f64,
    ) -> ApiResult<usize> {
        let factor = 1.0 + percentage / 100.0;
        self.batch_update(ids, |product| adjust_price(product, |price| price * factor))
    }

    /// 批量设置库存
    #[instrument(skip(self))]
    pub fn batch_update_stock(&self, ids: &[String], new_stock: i32) -> ApiResult<usize> {
        if new_stock < 0 {
            return Err(ApiError::InvalidInput(
                crate::importer::product_validator::STOCK_NEGATIVE.to_string(),
            ));
        }
        self.batch_update(ids, |product| {
            product.stock = Some(new_stock);
            true
        })
    }

    fn batch_update<F>(&self, ids: &[String], mut apply: F) -> ApiResult<usize>
    where
        F: FnMut(&mut Product) -> bool,
    {
        let mut updated = 0;
        for id in ids {
            let Some(mut product) = self.repo.get(id)? else {
                debug!(product_id = %id, "批量操作跳过未知产品");
                continue;
            };
            if !apply(&mut product) {
                debug!(product_id = %id, "批量操作跳过未调整的产品");
                continue;
            }
            if self.repo.update(&product)? {
                updated += 1;
            }
        }
        info!(requested = ids.len(), updated, "批量操作完成");
        Ok(updated)
    }

    // ==========================================
    // 导入导出
    // ==========================================

    /// 导入表格文件，返回导入报告
    pub fn import_products<P: AsRef<Path>>(&self, file_path: P) -> ImportOutcome {
        self.importer.import(file_path)
    }

    /// 导出全部产品
    pub fn export_all<P: AsRef<Path>>(&self, file_path: P) -> ApiResult<()> {
        self.exporter.try_export_all(file_path.as_ref())?;
        Ok(())
    }

    /// 导出满足条件的产品
    pub fn export_filtered<P: AsRef<Path>>(
        &self,
        file_path: P,
        filter: &ProductFilter,
    ) -> ApiResult<()> {
        self.exporter
            .try_export_filtered(file_path.as_ref(), filter)?;
        Ok(())
    }
}

fn require_id(product: &Product) -> ApiResult<String> {
    if !is_valid_id(product.id.as_deref()) {
        return Err(ApiError::InvalidInput("id is required".to_string()));
    }
    Ok(product.id.clone().unwrap_or_default())
}

fn ensure_valid(product: &Product) -> ApiResult<()> {
    let violations = validate_product(Some(product));
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ApiError::InvalidInput(violations.join(", ")))
    }
}

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Product(id={})", id))
}

/// 按规则调整价格；无价格或结果为负/非有限值时不修改并返回 false
fn adjust_price<F: Fn(f64) -> f64>(product: &mut Product, adjust: F) -> bool {
    let Some(price) = product.price else {
        return false;
    };
    let adjusted = adjust(price);
    if !adjusted.is_finite() || adjusted < 0.0 {
        return false;
    }
    product.price = Some(adjusted);
    true
}
