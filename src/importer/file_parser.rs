// ==========================================
// 库存销量整合系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls/.xlsm/.xlsb/.ods) / CSV (UTF-8 → GBK → UTF-16)
// 输出: RawTable（表头 + 行记录）
// ==========================================

use crate::domain::table::RawTable;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{FileParser, Upload};
use calamine::{open_workbook_auto_from_rs, Reader};
use csv::ReaderBuilder;
use encoding_rs::{GBK, UTF_16BE, UTF_16LE, UTF_8};
use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info, warn};

/// 按电子表格解析的扩展名
const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xls", "xlsm", "xlsb", "ods"];

/// 取文件扩展名（小写）
fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 文件名是否指向电子表格格式
pub fn is_spreadsheet(file_name: &str) -> bool {
    SPREADSHEET_EXTENSIONS.contains(&extension_of(file_name).as_str())
}

// ==========================================
// TextEncoding - CSV 文本编码
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Gbk,
    Utf16,
}

impl TextEncoding {
    /// 依次尝试的编码顺序，首个成功者胜出
    pub const FALLBACK_CHAIN: [TextEncoding; 3] =
        [TextEncoding::Utf8, TextEncoding::Gbk, TextEncoding::Utf16];

    /// 严格解码（遇到非法字节返回 None，不做替换）
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => {
                let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                UTF_8
                    .decode_without_bom_handling_and_without_replacement(body)
                    .map(|s| s.into_owned())
            }
            TextEncoding::Gbk => GBK
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
            TextEncoding::Utf16 => {
                // 有 BOM 按 BOM，无 BOM 按小端
                let (encoding, body) = if let Some(rest) = bytes.strip_prefix(b"\xFE\xFF") {
                    (UTF_16BE, rest)
                } else if let Some(rest) = bytes.strip_prefix(b"\xFF\xFE") {
                    (UTF_16LE, rest)
                } else {
                    (UTF_16LE, bytes)
                };
                encoding
                    .decode_without_bom_handling_and_without_replacement(body)
                    .map(|s| s.into_owned())
            }
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "UTF-8"),
            TextEncoding::Gbk => write!(f, "GBK"),
            TextEncoding::Utf16 => write!(f, "UTF-16"),
        }
    }
}

/// 行记录补齐表头中缺失的列，并判断是否整行空白
fn finish_row(
    headers: &[String],
    mut row_map: HashMap<String, String>,
) -> Option<HashMap<String, String>> {
    for header in headers {
        row_map.entry(header.clone()).or_default();
    }
    if row_map.values().all(|v| v.is_empty()) {
        None
    } else {
        Some(row_map)
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 解析已解码的 CSV 文本
    pub fn parse_text(&self, text: &str) -> ImportResult<RawTable> {
        // 按错误编码解码 UTF-16 文本时会出现 NUL，视为本次解析失败
        if text.contains('\0') {
            return Err(ImportError::CsvParseError("文本中包含 NUL 字符".to_string()));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(text.as_bytes());

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::CsvParseError("文件无表头".to_string()));
        }

        // 读取所有行
        let mut table = RawTable::new(headers);
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                // 表头重复时取第一列
                if let Some(header) = table.headers.get(col_idx) {
                    row_map
                        .entry(header.clone())
                        .or_insert_with(|| value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if let Some(row) = finish_row(&table.headers, row_map) {
                table.rows.push(row);
            }
        }

        Ok(table)
    }

    /// 按编码链依次尝试解码 + 解析
    pub fn parse_with_fallback(&self, file_name: &str, bytes: &[u8]) -> ImportResult<RawTable> {
        for encoding in TextEncoding::FALLBACK_CHAIN {
            let Some(text) = encoding.decode(bytes) else {
                debug!(file = file_name, encoding = %encoding, "解码失败，尝试下一种编码");
                continue;
            };

            match self.parse_text(&text) {
                Ok(table) => {
                    if encoding != TextEncoding::Utf8 {
                        warn!(file = file_name, encoding = %encoding, "CSV 非 UTF-8 编码，已回退解码");
                    }
                    return Ok(table);
                }
                Err(e) => {
                    debug!(file = file_name, encoding = %encoding, error = %e, "CSV 解析失败，尝试下一种编码");
                }
            }
        }

        Err(ImportError::NoUsableEncoding {
            file: file_name.to_string(),
            tried: TextEncoding::FALLBACK_CHAIN
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

impl FileParser for CsvParser {
    fn parse_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<RawTable> {
        self.parse_with_fallback(file_name, bytes)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<RawTable> {
        // 检查扩展名
        if !is_spreadsheet(file_name) {
            return Err(ImportError::UnsupportedFormat(extension_of(file_name)));
        }

        // 打开工作簿（按内容识别 xlsx/xls/xlsb/ods）
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        // 读取数据行
        let mut table = RawTable::new(headers);
        for data_row in rows {
            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = table.headers.get(col_idx) {
                    row_map
                        .entry(header.clone())
                        .or_insert_with(|| cell.to_string().trim().to_string());
                }
            }

            // 跳过完全空白的行
            if let Some(row) = finish_row(&table.headers, row_map) {
                table.rows.push(row);
            }
        }

        debug!(file = file_name, sheet = %sheet_name, rows = table.len(), "Excel 解析完成");
        Ok(table)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 从文件路径解析（文件名作为声明名称）
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let upload = Upload::from_path(file_path)?;
        self.parse_bytes(&upload.file_name, &upload.bytes)
    }
}

impl FileParser for UniversalFileParser {
    fn parse_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<RawTable> {
        let table = if is_spreadsheet(file_name) {
            ExcelParser.parse_bytes(file_name, bytes)?
        } else {
            CsvParser.parse_bytes(file_name, bytes)?
        };

        info!(
            file = file_name,
            columns = table.headers.len(),
            rows = table.len(),
            "文件解析完成"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn utf16le_with_bom(text: &str) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_csv_parser_utf8() {
        let bytes = "品名,SKU,国家,销量\n杯子,SKU1,US,10\n".as_bytes();
        let table = CsvParser.parse_bytes("sales.csv", bytes).unwrap();

        assert_eq!(table.headers, vec!["品名", "SKU", "国家", "销量"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].get("销量"), Some(&"10".to_string()));
    }

    #[test]
    fn test_csv_parser_strips_utf8_bom() {
        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend_from_slice("SKU,销量\nA,1\n".as_bytes());
        let table = CsvParser.parse_bytes("sales.csv", &bytes).unwrap();
        assert!(table.has_column("SKU"));
    }

    #[test]
    fn test_csv_parser_gbk_fallback() {
        let (encoded, _, had_errors) = GBK.encode("品名,SKU\n杯子,SKU1\n");
        assert!(!had_errors);
        let table = CsvParser.parse_bytes("sales.csv", &encoded).unwrap();

        assert_eq!(table.headers, vec!["品名", "SKU"]);
        assert_eq!(table.rows[0].get("品名"), Some(&"杯子".to_string()));
    }

    #[test]
    fn test_csv_parser_utf16_fallback() {
        let bytes = utf16le_with_bom("品名,SKU\n杯子,SKU1\n");
        let table = CsvParser.parse_bytes("sales.csv", &bytes).unwrap();

        assert_eq!(table.headers, vec!["品名", "SKU"]);
        assert_eq!(table.rows[0].get("SKU"), Some(&"SKU1".to_string()));
    }

    #[test]
    fn test_csv_parser_duplicate_header_keeps_first_column() {
        let bytes = "品名,SKU,国家,销量,销量\n杯子,SKU1,US,10,999\n".as_bytes();
        let table = CsvParser.parse_bytes("sales.csv", bytes).unwrap();

        assert_eq!(table.rows[0].get("销量"), Some(&"10".to_string()));
    }

    #[test]
    fn test_csv_parser_utf16_without_bom_is_little_endian() {
        let mut bytes = Vec::new();
        for unit in "品名,SKU\n杯子,SKU1\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let table = CsvParser.parse_bytes("sales.csv", &bytes).unwrap();

        assert_eq!(table.headers, vec!["品名", "SKU"]);
        assert_eq!(table.rows[0].get("品名"), Some(&"杯子".to_string()));
    }

    #[test]
    fn test_csv_parser_ascii_utf16_skips_nul_decodings() {
        // 纯 ASCII 的 UTF-16 LE 也是合法 UTF-8 / GBK，只能靠 NUL 排除
        let mut bytes = Vec::new();
        for unit in "SKU,qty\nA,1\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert!(TextEncoding::Utf8.decode(&bytes).unwrap().contains('\0'));

        let table = CsvParser.parse_bytes("sales.csv", &bytes).unwrap();
        assert_eq!(table.headers, vec!["SKU", "qty"]);
        assert_eq!(table.rows[0].get("qty"), Some(&"1".to_string()));
    }

    #[test]
    fn test_parse_text_rejects_nul() {
        let result = CsvParser.parse_text("S\0K\0U\0\n");
        assert!(matches!(result, Err(ImportError::CsvParseError(_))));
    }

    #[test]
    fn test_csv_parser_no_usable_encoding() {
        // 奇数长度且非法的字节序列，三种编码均失败
        let bytes = [0xFF, 0xFF, 0xFF];
        let result = CsvParser.parse_bytes("broken.csv", &bytes);
        assert!(matches!(result, Err(ImportError::NoUsableEncoding { .. })));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows_and_pad() {
        let bytes = "SKU,销量,国家\nA,1,US\n,,\nB,2\n".as_bytes();
        let table = CsvParser.parse_bytes("sales.csv", bytes).unwrap();

        // 应跳过空行，短行补齐
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].get("国家"), Some(&"".to_string()));
    }

    #[test]
    fn test_is_spreadsheet() {
        assert!(is_spreadsheet("report.XLSX"));
        assert!(is_spreadsheet("report.xls"));
        assert!(!is_spreadsheet("report.csv"));
        assert!(!is_spreadsheet("report"));
    }

    #[test]
    fn test_excel_parser_rejects_csv_name() {
        let result = ExcelParser.parse_bytes("sales.csv", b"a,b");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_universal_parser_file_not_found() {
        let result = UniversalFileParser.parse("non_existent.csv");
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_parser_from_path() {
        let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "品名,SKU,国家,销量").unwrap();
        writeln!(temp_file, "杯子,SKU1,US,10").unwrap();
        writeln!(temp_file, "杯子,SKU1,US,5").unwrap();

        let table = UniversalFileParser.parse(temp_file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }
}
