// ==========================================
// 库存销量整合系统 - 引擎编排器
// ==========================================
// 用途: 按固定顺序执行 销量汇总 → 库存汇总 → 合并评分 → 行高亮
// 红线: 任一阶段失败即整体失败，不产出部分结果
// ==========================================

use crate::config::PipelineConfig;
use crate::domain::inventory::SummaryRow;
use crate::domain::table::RawTable;
use crate::domain::types::RowStyle;
use crate::engine::error::EngineResult;
use crate::engine::{HighlightRule, InventoryAggregator, RiskEngine, SalesAggregator};
use crate::importer::FieldMapper;
use crate::perf::PerfGuard;
use serde::Serialize;
use tracing::{debug, info};

// ==========================================
// PipelineStats - 运行统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineStats {
    pub sales_rows: usize,           // 销量表有效行
    pub stock_rows: usize,           // 库存表有效行
    pub sales_groups: usize,         // (国家, SKU) 组数
    pub stock_groups: usize,         // (国家, 品名, SKU) 组数
    pub unmatched_sales_keys: usize, // 库存表中不存在的销量键
    pub coerced_cells: usize,        // 数量按 0 兜底的单元格
    pub skipped_rows: usize,         // 分组键为空被跳过的行
    pub high_risk_rows: usize,       // 高风险行数
}

// ==========================================
// SummaryResult - 汇总结果
// ==========================================
#[derive(Debug, Clone)]
pub struct SummaryResult {
    /// 已排序的汇总行
    pub rows: Vec<SummaryRow>,
    /// 与 rows 一一对应的行样式
    pub styles: Vec<RowStyle>,
    pub stats: PipelineStats,
}

// ==========================================
// SummaryOrchestrator - 引擎编排器
// ==========================================
pub struct SummaryOrchestrator {
    config: PipelineConfig,
    mapper: FieldMapper,
    sales: SalesAggregator,
    inventory: InventoryAggregator,
    risk: RiskEngine,
    highlight: HighlightRule,
}

impl SummaryOrchestrator {
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 流水线配置（创建时校验）
    pub fn new(config: PipelineConfig) -> EngineResult<Self> {
        config.validate()?;

        Ok(Self {
            mapper: FieldMapper::new(),
            sales: SalesAggregator::new(),
            inventory: InventoryAggregator::new(),
            risk: RiskEngine::new(config.no_sales_ratio),
            highlight: HighlightRule::new(config.risk_ratio_threshold),
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 当前使用的高亮规则（展示层据此生成带样式视图）
    pub fn highlight(&self) -> &HighlightRule {
        &self.highlight
    }

    /// 执行完整流水线
    ///
    /// # 参数
    /// - stock_table: 补货建议表（原始）
    /// - sales_table: 产品表现表（原始）
    ///
    /// # 返回
    /// - Ok(SummaryResult): 排序后的汇总行 + 行样式 + 统计
    /// - Err: 任一输入表缺少必需列
    pub fn run(&self, stock_table: &RawTable, sales_table: &RawTable) -> EngineResult<SummaryResult> {
        info!(
            stock_rows = stock_table.len(),
            sales_rows = sales_table.len(),
            growth_factor = self.config.growth_factor.value(),
            join_mode = %self.config.join_mode,
            "开始生成库存销量汇总"
        );

        // === 步骤 1: 销量表清洗与汇总 ===
        let (sales_agg, sales_mapped) = {
            let mut perf = PerfGuard::new("aggregate_sales");
            let result = self.sales.aggregate_table(sales_table, &self.mapper)?;
            perf.set_rows(result.0.len());
            result
        };

        // === 步骤 2: 库存表清洗与汇总 ===
        let (stock_agg, stock_mapped) = {
            let mut perf = PerfGuard::new("aggregate_stock");
            let result = self.inventory.aggregate_table(stock_table, &self.mapper)?;
            perf.set_rows(result.0.len());
            result
        };

        // === 步骤 3: 双表合并 ===
        let merged = {
            let mut perf = PerfGuard::new("merge");
            let merged = self.risk.merge(&stock_agg, &sales_agg, self.config.join_mode);
            perf.set_rows(merged.rows.len());
            merged
        };

        // === 步骤 4: 预估销量 & 库销比 & 排序 ===
        let rows = {
            let mut perf = PerfGuard::new("score");
            let rows = self.risk.score_merged(&merged.rows, self.config.growth_factor);
            perf.set_rows(rows.len());
            rows
        };

        // === 步骤 5: 行高亮 ===
        let styles = self.highlight.apply(&rows);
        let high_risk_rows = styles.iter().filter(|s| s.is_high_risk()).count();
        debug!(high_risk_rows, "行高亮完成");

        let stats = PipelineStats {
            sales_rows: sales_mapped.records.len(),
            stock_rows: stock_mapped.records.len(),
            sales_groups: sales_agg.len(),
            stock_groups: stock_agg.len(),
            unmatched_sales_keys: merged.unmatched_sales_keys,
            coerced_cells: sales_mapped.coerced_cells + stock_mapped.coerced_cells,
            skipped_rows: sales_mapped.skipped_rows + stock_mapped.skipped_rows,
            high_risk_rows,
        };

        info!(
            rows = rows.len(),
            high_risk_rows,
            unmatched_sales_keys = stats.unmatched_sales_keys,
            "库存销量汇总完成"
        );

        Ok(SummaryResult {
            rows,
            styles,
            stats,
        })
    }
}
