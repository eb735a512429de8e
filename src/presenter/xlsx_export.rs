// ==========================================
// 库存销量整合系统 - Excel 导出
// ==========================================
// 职责: 汇总行（不带样式）→ .xlsx，首行为输出列名
// ==========================================

use crate::domain::inventory::SummaryRow;
use crate::presenter::error::{PresentError, PresentResult};
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// 构建工作簿（单工作表，首行为 headers）
pub fn build_workbook(headers: &[String], rows: &[SummaryRow]) -> PresentResult<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, header.as_str())?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = u32::try_from(idx + 1).map_err(|_| PresentError::TooManyRows(rows.len()))?;

        worksheet.write_string(r, 0, row.country.as_str())?;
        worksheet.write_string(r, 1, row.product_name.as_str())?;
        worksheet.write_string(r, 2, row.sku.as_str())?;
        worksheet.write_number(r, 3, row.fba_stock as f64)?;
        worksheet.write_number(r, 4, row.in_transit_total as f64)?;
        worksheet.write_number(r, 5, row.trailing_30d_sales as f64)?;
        worksheet.write_number(r, 6, row.forecast_30d_sales as f64)?;
        worksheet.write_number(r, 7, row.stock_sales_ratio)?;
    }

    Ok(workbook)
}

/// 导出为内存中的 .xlsx 内容（供下载）
pub fn export_to_buffer(headers: &[String], rows: &[SummaryRow]) -> PresentResult<Vec<u8>> {
    let mut workbook = build_workbook(headers, rows)?;
    Ok(workbook.save_to_buffer()?)
}

/// 导出到目录，返回写出的文件路径
pub fn export_to_dir(
    headers: &[String],
    rows: &[SummaryRow],
    dir: &Path,
    file_name: &str,
) -> PresentResult<PathBuf> {
    let bytes = export_to_buffer(headers, rows)?;
    save_buffer(&bytes, dir, file_name)
}

/// 将已生成的 .xlsx 内容写入目录（目录不存在时创建）
pub fn save_buffer(bytes: &[u8], dir: &Path, file_name: &str) -> PresentResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, bytes)?;

    info!(path = %path.display(), bytes = bytes.len(), "汇总报告已导出");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::styled_view::summary_headers;

    #[test]
    fn test_export_to_buffer_is_zip() {
        let bytes = export_to_buffer(&summary_headers("zh-CN"), &[]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
