// ==========================================
// 库存销量整合系统 - 核心库
// ==========================================
// 输入: 补货建议表 (FBA 库存/在途) + 产品表现表 (30 天销量)
// 输出: 按 (国家, SKU) 合并的汇总表，标记库销比风险项，可导出 Excel
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与类型
pub mod domain;

// 配置层 - 流水线配置与列名
pub mod config;

// 导入层 - 文件解析与字段映射
pub mod importer;

// 引擎层 - 汇总、合并、评分
pub mod engine;

// 展示层 - 视图、终端表格、Excel 导出
pub mod presenter;

// API 层 - 单次汇总入口
pub mod api;

// 阶段耗时
pub mod perf;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::types::{JoinMode, ReportKind, RowStyle};
pub use domain::{RawTable, SummaryRow};

pub use config::{ConfigManager, GrowthFactor, PipelineConfig};

pub use engine::{HighlightRule, PipelineStats, RiskEngine, SummaryOrchestrator, SummaryResult};

pub use presenter::StyledRow;

pub use api::{ApiError, ApiResult, Banner, SummaryApi, SummaryOutcome, SummaryReport};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "库存销量整合系统";
