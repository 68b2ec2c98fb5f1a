// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 生成导入用的 Excel 夹具文件、准备存储后端与示例数据
// ==========================================

#![allow(dead_code)]

use product_catalog::{
    MemoryProductRepository, Product, ProductRepository, SqliteProductRepository,
};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 导入文件表头（列顺序: ID,名称,品牌,分类,价格,库存,描述）
pub const IMPORT_HEADERS: [&str; 7] = ["ID", "名称", "品牌", "分类", "价格", "库存", "描述"];

/// 夹具单元格
#[derive(Debug, Clone, Copy)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    /// 公式文本（不含 '='）
    Formula(&'a str),
    Blank,
}

/// 写出带表头的导入文件，rows 中每个元素对应一行数据
pub fn write_import_file(dir: &Path, name: &str, rows: &[Vec<Cell<'_>>]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in IMPORT_HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }

    for (idx, row) in rows.iter().enumerate() {
        let row_idx = idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(row_idx, col as u16, *text).unwrap();
                }
                Cell::Number(value) => {
                    worksheet.write_number(row_idx, col as u16, *value).unwrap();
                }
                Cell::Formula(formula) => {
                    worksheet.write_formula(row_idx, col as u16, *formula).unwrap();
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save(&path).unwrap();
    path
}

/// 完整合法的一行
pub fn valid_row<'a>(id: &'a str, name: &'a str, price: f64, stock: f64) -> Vec<Cell<'a>> {
    vec![
        Cell::Text(id),
        Cell::Text(name),
        Cell::Text("ACME"),
        Cell::Text("phone"),
        Cell::Number(price),
        Cell::Number(stock),
        Cell::Text("demo"),
    ]
}

/// 两种存储后端（SQLite 内存库 / 进程内目录）
pub fn backends() -> Vec<(&'static str, Arc<dyn ProductRepository>)> {
    let sqlite: Arc<dyn ProductRepository> = Arc::new(SqliteProductRepository::in_memory().unwrap());
    let memory: Arc<dyn ProductRepository> = Arc::new(MemoryProductRepository::new());
    vec![("sqlite", sqlite), ("memory", memory)]
}

/// 示例目录
pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new("1", "Apple Phone", "flagship", 100.0, 10, "phone"),
        Product::new("2", "Huawei Phone", "", 200.0, 20, "phone"),
        Product::new("3", "Apple Laptop", "", 300.0, 30, "laptop"),
    ]
}

/// 向目录写入示例数据
pub fn seed(repo: &dyn ProductRepository) {
    for product in sample_products() {
        assert!(repo.put_if_absent(&product).unwrap());
    }
}
