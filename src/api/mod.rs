// ==========================================
// 库存销量整合系统 - API 层
// ==========================================
// 职责: 对外的汇总接口，供终端程序或界面壳调用
// ==========================================

pub mod error;
pub mod summary_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use summary_api::{Banner, SummaryApi, SummaryOutcome, SummaryReport};
