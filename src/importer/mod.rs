// ==========================================
// 库存销量整合系统 - 导入层
// ==========================================
// 职责: 上传文件 → 原始表格 → 领域记录
// 支持: Excel, CSV (UTF-8 / GBK / UTF-16)
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod report_loader;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{ColumnMap, FieldMapper, MappedRecords};
pub use file_parser::{is_spreadsheet, CsvParser, ExcelParser, TextEncoding, UniversalFileParser};
pub use report_loader::BlockingReportLoader;

// 重导出 Trait 接口
pub use importer_trait::{FileParser, ReportLoader, Upload};
