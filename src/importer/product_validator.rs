// ==========================================
// 产品目录 - 产品数据校验
// ==========================================
// 职责: 入库/更新前的必填与取值范围校验
// 规则: 纯函数，违规顺序固定为 名称 → 价格 → 库存 → 分类
// ==========================================

use crate::domain::product::Product;

pub const RECORD_IS_NULL: &str = "record is null";
pub const NAME_REQUIRED: &str = "name is required";
pub const PRICE_REQUIRED: &str = "price is required";
pub const PRICE_NEGATIVE: &str = "price must not be negative";
pub const STOCK_REQUIRED: &str = "stock is required";
pub const STOCK_NEGATIVE: &str = "stock must not be negative";
pub const CATEGORY_REQUIRED: &str = "category is required";

/// 校验产品，返回违规描述列表
///
/// 空列表表示可以入库或更新；产品为 None 时只返回一条违规
pub fn validate_product(product: Option<&Product>) -> Vec<String> {
    let Some(product) = product else {
        return vec![RECORD_IS_NULL.to_string()];
    };

    let mut violations = Vec::new();

    if is_blank(product.name.as_deref()) {
        violations.push(NAME_REQUIRED.to_string());
    }

    match product.price {
        None => violations.push(PRICE_REQUIRED.to_string()),
        Some(price) if price < 0.0 => violations.push(PRICE_NEGATIVE.to_string()),
        Some(_) => {}
    }

    match product.stock {
        None => violations.push(STOCK_REQUIRED.to_string()),
        Some(stock) if stock < 0 => violations.push(STOCK_NEGATIVE.to_string()),
        Some(_) => {}
    }

    if is_blank(product.category.as_deref()) {
        violations.push(CATEGORY_REQUIRED.to_string());
    }

    violations
}

/// 主键非空且非空白
pub fn is_valid_id(id: Option<&str>) -> bool {
    !is_blank(id)
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
