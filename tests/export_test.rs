// ==========================================
// Excel 导出集成测试
// ==========================================
// 测试目标: 汇总报告写出 .xlsx 后可被重新读取，列与值不变、无样式
// ==========================================

mod test_helpers;

use calamine::{open_workbook_auto, Data, Reader};
use inventory_cover::config::column_keys::SUMMARY_COLUMNS;
use inventory_cover::presenter::{export_to_dir, render_table, summary_headers};
use inventory_cover::{PipelineConfig, SummaryApi, SummaryRow};
use std::path::Path;
use tempfile::TempDir;
use test_helpers::{csv_text, write_text, SALES_HEADER, STOCK_HEADER};

fn read_back(path: &Path) -> Vec<Vec<String>> {
    let mut workbook = open_workbook_auto(path).unwrap();
    let sheet = workbook.sheet_names()[0].clone();
    let range = workbook.worksheet_range(&sheet).unwrap();

    range
        .rows()
        .map(|row| row.iter().map(Data::to_string).collect())
        .collect()
}

fn summary_row(sku: &str, ratio: f64) -> SummaryRow {
    SummaryRow {
        country: "US".to_string(),
        product_name: "杯子".to_string(),
        sku: sku.to_string(),
        fba_stock: 15,
        in_transit_total: 5,
        trailing_30d_sales: 8,
        forecast_30d_sales: 8,
        stock_sales_ratio: ratio,
    }
}

#[test]
fn test_export_to_dir_round_trip() {
    let dir = TempDir::new().unwrap();
    let rows = vec![summary_row("SKU1", 2.5), summary_row("SKU2", 99.0)];

    let headers = summary_headers("zh-CN");
    let path = export_to_dir(&headers, &rows, dir.path(), "summary.xlsx").unwrap();
    let cells = read_back(&path);

    assert_eq!(cells.len(), 3);
    assert_eq!(cells[0], SUMMARY_COLUMNS.to_vec());
    assert_eq!(cells[1], vec!["US", "杯子", "SKU1", "15", "5", "8", "8", "2.5"]);
    assert_eq!(cells[2][7], "99");
}

#[test]
fn test_export_creates_output_dir() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("reports").join("2024");

    let path = export_to_dir(&summary_headers("zh-CN"), &[], &nested, "empty.xlsx").unwrap();
    assert!(path.exists());
    assert_eq!(read_back(&path), vec![SUMMARY_COLUMNS.to_vec()]);
}

#[tokio::test]
async fn test_report_save_export_uses_configured_name() {
    let dir = TempDir::new().unwrap();
    let stock = write_text(
        dir.path(),
        "stock.csv",
        &csv_text(STOCK_HEADER, &["杯子,SKU1,US,15,0,5", "碗,SKU2,US,8,0,2"]),
    )
    .unwrap();
    let sales = write_text(
        dir.path(),
        "sales.csv",
        &csv_text(SALES_HEADER, &["杯子,SKU1,US,20"]),
    )
    .unwrap();

    let api = SummaryApi::new(PipelineConfig::default()).unwrap();
    let outcome = api.run_files(&stock, &sales).await;
    let report = outcome.report.unwrap();

    let out_dir = dir.path().join("out");
    let path = report.save_export(&out_dir).unwrap();
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("Amazon_Inventory_Sales_Summary.xlsx")
    );

    let cells = read_back(&path);
    assert_eq!(cells.len(), 1 + report.rows.len());
    assert_eq!(cells[1][2], "SKU1");
    assert_eq!(cells[1][7], "1");
    assert_eq!(cells[2][2], "SKU2");

    // 终端表格与导出同序
    let rendered = render_table(&report.headers, &report.view).to_string();
    let first = rendered.find("SKU1").unwrap();
    let second = rendered.find("SKU2").unwrap();
    assert!(first < second);
}

#[tokio::test]
async fn test_export_headers_match_table_headers() {
    let dir = TempDir::new().unwrap();
    let stock = write_text(
        dir.path(),
        "stock.csv",
        &csv_text(STOCK_HEADER, &["杯子,SKU1,US,15,0,5"]),
    )
    .unwrap();
    let sales = write_text(
        dir.path(),
        "sales.csv",
        &csv_text(SALES_HEADER, &["杯子,SKU1,US,10"]),
    )
    .unwrap();

    for (locale, ratio_header) in [("zh-CN", "库销比"), ("en", "Stock/Sales")] {
        let config = PipelineConfig {
            locale: locale.to_string(),
            ..PipelineConfig::default()
        };
        let api = SummaryApi::new(config).unwrap();
        let report = api.run_files(&stock, &sales).await.report.unwrap();

        let path = report.save_export(&dir.path().join(locale)).unwrap();
        let cells = read_back(&path);
        assert_eq!(cells[0], report.headers);
        assert_eq!(cells[0][7], ratio_header);

        let rendered = render_table(&report.headers, &report.view).to_string();
        assert!(rendered.contains(ratio_header));
    }
}

#[tokio::test]
async fn test_outcome_json_has_banner_and_no_export_bytes() {
    let dir = TempDir::new().unwrap();
    let stock = write_text(
        dir.path(),
        "stock.csv",
        &csv_text(STOCK_HEADER, &["杯子,SKU1,US,15,0,5"]),
    )
    .unwrap();
    let sales = write_text(
        dir.path(),
        "sales.csv",
        &csv_text(SALES_HEADER, &["杯子,SKU1,US,10"]),
    )
    .unwrap();

    let api = SummaryApi::new(PipelineConfig::default()).unwrap();
    let outcome = api.run_files(&stock, &sales).await;

    let json: serde_json::Value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["banner"]["kind"], "SUCCESS");
    assert_eq!(json["report"]["rows"][0]["sku"], "SKU1");
    assert_eq!(json["report"]["view"][0]["style"], "NORMAL");
    assert!(json["report"].get("export_bytes").is_none());
}
