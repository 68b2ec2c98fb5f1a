// ==========================================
// 产品目录 - 表格文件解析器
// ==========================================
// 支持: Excel (.xlsx/.xls)，按扩展名选择
// 列布局（按位置，不按表头名）:
//   0=ID 1=名称 2=品牌 3=分类 4=价格 5=库存 6=描述
// 注意: 与导出列布局（ID,名称,描述,价格,库存,分类）不一致，
//       导出文件不能直接重新导入
// ==========================================

use crate::domain::product::RowProduct;
use crate::importer::cell_value::CellValue;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{Data, Range, Reader, Xls, Xlsx};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tracing::{debug, info};

/// 导入列位置
pub mod columns {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const BRAND: usize = 2;
    pub const CATEGORY: usize = 3;
    pub const PRICE: usize = 4;
    pub const STOCK: usize = 5;
    pub const DESCRIPTION: usize = 6;

    pub const COUNT: usize = 7;
}

/// 品牌并入描述时的前缀
pub const BRAND_LABEL: &str = "品牌: ";

// ==========================================
// ProductFileReader Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: ExcelProductReader
pub trait ProductFileReader: Send + Sync {
    /// 解析文件为带行号的候选产品
    ///
    /// # 返回
    /// - Ok(Vec<RowProduct>): 文件顺序的行记录（整行空白的行已跳过）
    /// - Err: 文件无法打开（IO）、扩展名不支持或缺少表头（格式）
    fn read(&self, file_path: &Path) -> ImportResult<Vec<RowProduct>>;
}

// ==========================================
// Excel Reader 实现
// ==========================================
pub struct ExcelProductReader;

impl ProductFileReader for ExcelProductReader {
    fn read(&self, file_path: &Path) -> ImportResult<Vec<RowProduct>> {
        // 打开文件（句柄随 workbook 一起在函数返回时释放）
        let file = File::open(file_path)?;

        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "xlsx" => {
                let mut workbook: Xlsx<_> = Xlsx::new(BufReader::new(file))?;
                read_first_sheet(&mut workbook)
            }
            "xls" => {
                let mut workbook: Xls<_> = Xls::new(BufReader::new(file))?;
                read_first_sheet(&mut workbook)
            }
            _ => Err(ImportError::UnsupportedFormat(
                file_path.display().to_string(),
            )),
        }
    }
}

fn read_first_sheet<RS, W>(workbook: &mut W) -> ImportResult<Vec<RowProduct>>
where
    RS: Read + Seek,
    W: Reader<RS>,
    ImportError: From<W::Error>,
{
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ImportError::ExcelParseError("workbook has no sheets".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name)?;
    // 公式区域读取失败时按无公式处理
    let formulas = workbook.worksheet_formula(&sheet_name).ok();

    // 表头必须位于第一行
    let (header_row, end_row) = match (range.start(), range.end()) {
        (Some((start, _)), Some((end, _))) => (start, end),
        _ => return Err(ImportError::MissingHeader),
    };
    if header_row != 0 {
        return Err(ImportError::MissingHeader);
    }

    let mut products = Vec::new();

    for row_idx in 1..=end_row {
        let cells = collect_cells(&range, formulas.as_ref(), row_idx);

        // 整行空白视为不存在的行
        if cells.iter().all(Option::is_none) {
            continue;
        }

        products.push(decode_row(row_idx as usize, &cells));
    }

    info!(sheet = %sheet_name, rows = products.len(), "spreadsheet parsed");
    Ok(products)
}

/// 取一行的前七列；区域外或空白单元格为 None
fn collect_cells(
    range: &Range<Data>,
    formulas: Option<&Range<String>>,
    row_idx: u32,
) -> Vec<Option<CellValue>> {
    (0..columns::COUNT as u32)
        .map(|col| {
            let formula = formulas
                .and_then(|f| f.get_value((row_idx, col)))
                .map(String::as_str);
            match range.get_value((row_idx, col)) {
                Some(Data::Empty) | None if formula.map_or(true, str::is_empty) => None,
                Some(data) => Some(CellValue::from_cell(data, formula)),
                None => Some(CellValue::from_cell(&Data::Empty, formula)),
            }
        })
        .collect()
}

/// 按列位置解码一行
///
/// 品牌与描述并入 description：先品牌（带前缀），再原始描述，空格分隔
pub fn decode_row(row_number: usize, cells: &[Option<CellValue>]) -> RowProduct {
    let cell = |col: usize| cells.get(col).and_then(Option::as_ref);
    let mut row = RowProduct::new(row_number);
    let product = &mut row.product;

    if let Some(c) = cell(columns::ID) {
        product.id = Some(c.as_text());
    }

    if let Some(c) = cell(columns::NAME) {
        product.name = Some(c.as_text());
    }

    if let Some(c) = cell(columns::BRAND) {
        let brand = c.as_text();
        if !brand.is_empty() {
            product.append_description(&format!("{}{}", BRAND_LABEL, brand));
        }
    }

    if let Some(c) = cell(columns::CATEGORY) {
        product.category = Some(c.as_text());
    }

    if let Some(c) = cell(columns::PRICE) {
        product.price = c.as_decimal();
    }

    if let Some(c) = cell(columns::STOCK) {
        product.stock = c.as_integer();
    }

    if let Some(c) = cell(columns::DESCRIPTION) {
        let description = c.as_text();
        if !description.is_empty() {
            product.append_description(&description);
        }
    }

    debug!(row_number, product_id = ?row.product.id, "row decoded");
    row
}
