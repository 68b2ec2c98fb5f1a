// ==========================================
// ProductExporter 集成测试
// ==========================================
// 测试目标: 目录 → Excel 文件，表头与列类型、条件导出、导出/导入列布局差异
// ==========================================

mod test_helpers;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use product_catalog::exporter::{ProductExporter, EXPORT_HEADERS, EXPORT_SHEET_NAME};
use product_catalog::importer::ProductImporter;
use product_catalog::{logging, MemoryProductRepository, ProductFilter, ProductRepository};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use test_helpers::{backends, seed};

fn read_sheet(path: &Path) -> Range<Data> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    workbook.worksheet_range(EXPORT_SHEET_NAME).unwrap()
}

fn id_column(range: &Range<Data>) -> Vec<String> {
    (1..range.height() as u32)
        .map(|row| range.get_value((row, 0)).unwrap().to_string())
        .collect()
}

#[test]
fn test_export_empty_catalog_writes_header_only() {
    logging::init_test();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.xlsx");

    for (backend, repo) in backends() {
        let exporter = ProductExporter::new(repo);
        assert!(exporter.export_all(&path), "{}", backend);

        let range = read_sheet(&path);
        assert_eq!(range.height(), 1, "{}", backend);
        let header: Vec<String> = (0..6)
            .map(|col| range.get_value((0, col)).unwrap().to_string())
            .collect();
        assert_eq!(header, EXPORT_HEADERS.map(str::to_string).to_vec());
    }
}

#[test]
fn test_export_all_typed_columns() {
    logging::init_test();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("all.xlsx");

    for (backend, repo) in backends() {
        seed(repo.as_ref());
        assert!(ProductExporter::new(repo).export_all(&path), "{}", backend);

        let range = read_sheet(&path);
        let mut ids = id_column(&range);
        ids.sort();
        assert_eq!(ids, vec!["1", "2", "3"], "{}", backend);

        let row = (1..range.height() as u32)
            .find(|row| range.get_value((*row, 0)) == Some(&Data::String("1".to_string())))
            .unwrap();
        assert_eq!(
            range.get_value((row, 1)),
            Some(&Data::String("Apple Phone".to_string()))
        );
        assert_eq!(
            range.get_value((row, 2)),
            Some(&Data::String("flagship".to_string()))
        );
        assert_eq!(range.get_value((row, 3)), Some(&Data::Float(100.0)));
        assert_eq!(range.get_value((row, 4)), Some(&Data::Float(10.0)));
        assert_eq!(
            range.get_value((row, 5)),
            Some(&Data::String("phone".to_string()))
        );
    }
}

#[test]
fn test_export_filtered_by_name_and_price() {
    logging::init_test();
    let dir = TempDir::new().unwrap();
    let repo: Arc<dyn ProductRepository> = Arc::new(MemoryProductRepository::new());
    seed(repo.as_ref());
    let exporter = ProductExporter::new(repo);

    let by_name = dir.path().join("apple.xlsx");
    assert!(exporter.export_filtered(&by_name, &ProductFilter::default().with_name("APPLE")));
    let mut ids = id_column(&read_sheet(&by_name));
    ids.sort();
    assert_eq!(ids, vec!["1", "3"]);

    let by_price = dir.path().join("cheap.xlsx");
    let filter = ProductFilter::default().with_price_range(None, Some(150.0));
    assert!(exporter.export_filtered(&by_price, &filter));
    assert_eq!(id_column(&read_sheet(&by_price)), vec!["1"]);
}

#[test]
fn test_export_to_directory_path_fails() {
    logging::init_test();
    let dir = TempDir::new().unwrap();
    let (_, repo) = backends().remove(1);
    seed(repo.as_ref());

    // 目标路径是已存在的目录，无法写出文件
    assert!(!ProductExporter::new(repo).export_all(dir.path()));
}

#[test]
fn test_exported_file_does_not_reimport_as_same_records() {
    logging::init_test();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roundtrip.xlsx");

    let source: Arc<dyn ProductRepository> = Arc::new(MemoryProductRepository::new());
    seed(source.as_ref());
    assert!(ProductExporter::new(source).export_all(&path));

    // 导出列（ID,名称,描述,价格,库存,分类）与导入列（ID,名称,品牌,分类,价格,库存,描述）位置不同
    let target: Arc<dyn ProductRepository> = Arc::new(MemoryProductRepository::new());
    let outcome = ProductImporter::new(target.clone()).import(&path);

    assert!(!outcome.is_fatal());
    assert_eq!(outcome.total_records(), 3);
    assert_eq!(outcome.success_count(), 0);
    assert!(outcome
        .failures()
        .iter()
        .all(|f| f.ends_with("validation failed: stock is required")));
    assert!(target.list().unwrap().is_empty());
}
