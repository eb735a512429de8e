// ==========================================
// 库存销量整合系统 - 领域模型层
// ==========================================
// 职责: 定义输入行、汇总结果、输出行及相关类型
// 红线: 不含文件解析逻辑,不含引擎逻辑
// ==========================================

pub mod inventory;
pub mod table;
pub mod types;

// 重导出核心类型
pub use inventory::{
    AggregatedSales, AggregatedStock, SalesKey, SalesRecord, StockKey, StockRecord, SummaryRow,
};
pub use table::RawTable;
pub use types::{JoinMode, ReportKind, RowStyle};
