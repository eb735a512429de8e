// ==========================================
// 库存销量整合系统 - 引擎层
// ==========================================
// 职责: 分组汇总、合并评分、行高亮，以及按顺序编排它们
// 红线: 引擎不读文件，只处理已解析的表格
// ==========================================

pub mod error;
pub mod highlight;
pub mod inventory_aggregator;
pub mod orchestrator;
pub mod risk;
pub mod sales_aggregator;

// 重导出核心引擎
pub use error::{EngineError, EngineResult};
pub use highlight::{row_style, HighlightRule, DEFAULT_RISK_RATIO_THRESHOLD};
pub use inventory_aggregator::InventoryAggregator;
pub use orchestrator::{PipelineStats, SummaryOrchestrator, SummaryResult};
pub use risk::{round_half_even, MergeOutcome, MergedRow, RiskEngine};
pub use sales_aggregator::SalesAggregator;
