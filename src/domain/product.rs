// ==========================================
// 产品目录 - 产品实体
// ==========================================
// 职责: 目录与表格共用的产品结构、导入行包装、查询条件
// 红线: 不含数据访问逻辑
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Product - 产品主数据
// ==========================================
// 用途: 目录持久化形态 / 导出形态
// 说明: 字段均可为空，是否可入库由校验器判定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<String>,          // 产品ID（目录主键）
    pub name: Option<String>,        // 名称（必填）
    pub description: Option<String>, // 描述（可选，导入时合并品牌）
    pub price: Option<f64>,          // 价格（必填，>= 0）
    pub stock: Option<i32>,          // 库存（必填，>= 0）
    pub category: Option<String>,    // 分类（必填）
}

impl Product {
    /// 构造字段完整的产品
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        stock: i32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            description: Some(description.into()),
            price: Some(price),
            stock: Some(stock),
            category: Some(category.into()),
        }
    }

    /// 非空白的主键
    pub fn key(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// 追加一段描述文本（已有描述时以空格分隔）
    pub fn append_description(&mut self, text: &str) {
        self.description = Some(match self.description.take() {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, text),
            _ => text.to_string(),
        });
    }
}

// ==========================================
// RowProduct - 导入行记录
// ==========================================
// 用途: 导入管道中间产物，仅用于错误定位
// 生命周期: 仅在导入流程内，不落库
#[derive(Debug, Clone, PartialEq)]
pub struct RowProduct {
    pub row_number: usize, // 行号（从 1 开始，不含表头）
    pub product: Product,
}

impl RowProduct {
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            product: Product::default(),
        }
    }
}

// ==========================================
// ProductFilter - 查询条件
// ==========================================
// 规则: 各条件 AND 组合，None 表示不约束
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub name: Option<String>,     // 名称包含（不区分大小写）
    pub category: Option<String>, // 分类精确匹配
    pub min_price: Option<f64>,   // 最低价格（含）
    pub max_price: Option<f64>,   // 最高价格（含）
}

impl ProductFilter {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price_range(mut self, min_price: Option<f64>, max_price: Option<f64>) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    /// 判断产品是否满足全部条件
    ///
    /// 产品缺少被约束的字段时视为不满足
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(needle) = &self.name {
            let needle = needle.to_lowercase();
            match &product.name {
                Some(name) if name.to_lowercase().contains(&needle) => {}
                _ => return false,
            }
        }

        if let Some(category) = &self.category {
            if product.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }

        if let Some(min) = self.min_price {
            if !product.price.is_some_and(|p| p >= min) {
                return false;
            }
        }

        if let Some(max) = self.max_price {
            if !product.price.is_some_and(|p| p <= max) {
                return false;
            }
        }

        true
    }
}
