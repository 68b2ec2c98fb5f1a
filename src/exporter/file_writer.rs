// ==========================================
// 产品目录 - 表格文件写出
// ==========================================
// 固定布局: 单工作表，表头 ID,名称,描述,价格,库存,分类
// 类型: 文本列写字符串，价格写小数，库存写整数；空字段留空白
// ==========================================

use crate::domain::product::Product;
use crate::exporter::error::ExportResult;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use tracing::debug;

/// 导出表头
pub const EXPORT_HEADERS: [&str; 6] = ["ID", "名称", "描述", "价格", "库存", "分类"];

/// 导出工作表名
pub const EXPORT_SHEET_NAME: &str = "产品数据";

// ==========================================
// ProductFileWriter Trait
// ==========================================
// 实现者: ExcelProductWriter
pub trait ProductFileWriter: Send + Sync {
    /// 按输入顺序写出全部产品
    fn write(&self, products: &[Product], file_path: &Path) -> ExportResult<()>;
}

pub struct ExcelProductWriter;

impl ProductFileWriter for ExcelProductWriter {
    fn write(&self, products: &[Product], file_path: &Path) -> ExportResult<()> {
        let mut workbook = Workbook::new();
        let integer = Format::new().set_num_format("0");

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(EXPORT_SHEET_NAME)?;

        for (col, header) in EXPORT_HEADERS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header)?;
        }

        for (idx, product) in products.iter().enumerate() {
            write_product_row(worksheet, idx as u32 + 1, product, &integer)?;
        }

        worksheet.autofit();

        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        workbook.save(file_path)?;

        debug!(file_path = %file_path.display(), rows = products.len(), "spreadsheet written");
        Ok(())
    }
}

fn write_product_row(
    worksheet: &mut Worksheet,
    row: u32,
    product: &Product,
    integer: &Format,
) -> ExportResult<()> {
    let text_cells = [
        (0u16, product.id.as_deref()),
        (1, product.name.as_deref()),
        (2, product.description.as_deref()),
        (5, product.category.as_deref()),
    ];
    for (col, value) in text_cells {
        if let Some(value) = value {
            worksheet.write_string(row, col, value)?;
        }
    }

    if let Some(price) = product.price {
        worksheet.write_number(row, 3, price)?;
    }
    if let Some(stock) = product.stock {
        worksheet.write_number_with_format(row, 4, stock, integer)?;
    }

    Ok(())
}
