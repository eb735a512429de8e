// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 在临时目录中生成 CSV / Excel 输入文件
// ==========================================

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

pub const STOCK_HEADER: &str = "品名,SKU,国家（地区）,FBA库存,入库中,FBA在途";
pub const SALES_HEADER: &str = "品名,SKU,国家,销量";

/// 写入 UTF-8 文本文件
pub fn write_text(dir: &Path, name: &str, content: &str) -> Result<PathBuf, Box<dyn Error>> {
    write_bytes(dir, name, content.as_bytes())
}

/// 写入原始字节
pub fn write_bytes(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join(name);
    fs::write(&path, bytes)?;
    Ok(path)
}

/// 表头 + 数据行拼成 CSV 文本
pub fn csv_text(header: &str, rows: &[&str]) -> String {
    let mut text = String::from(header);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

/// 文本编码为带 BOM 的 UTF-16 LE
pub fn utf16le_with_bom(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

/// 文本编码为 GBK
pub fn gbk(text: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = encoding_rs::GBK.encode(text);
    assert!(!had_errors, "GBK 无法编码: {}", text);
    bytes.into_owned()
}

/// 生成 Excel 输入文件（第一行表头，能解析为数字的值按数字写入）
pub fn write_xlsx(
    dir: &Path,
    name: &str,
    headers: &[&str],
    rows: &[Vec<&str>],
) -> Result<PathBuf, Box<dyn Error>> {
    write_xlsx_sheets(dir, name, &[("Sheet1", headers, rows)])
}

/// 生成多工作表的 Excel 输入文件，按给定顺序写入
pub fn write_xlsx_sheets(
    dir: &Path,
    name: &str,
    sheets: &[(&str, &[&str], &[Vec<&str>])],
) -> Result<PathBuf, Box<dyn Error>> {
    let mut workbook = Workbook::new();

    for (sheet_name, headers, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*sheet_name)?;

        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header)?;
        }
        for (r, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                let (r, col) = (r as u32 + 1, col as u16);
                match value.parse::<f64>() {
                    Ok(number) => worksheet.write_number(r, col, number)?,
                    Err(_) => worksheet.write_string(r, col, *value)?,
                };
            }
        }
    }

    let path = dir.join(name);
    workbook.save(&path)?;
    Ok(path)
}
