// ==========================================
// 库存销量整合系统 - 合并与库销比评分引擎
// ==========================================
// 职责: 库存汇总 ⋈ 销量汇总 → 预估销量 / 库销比 → 取整 → 排序
// 输入: AggregatedStock + AggregatedSales + 增长系数
// 输出: Vec<SummaryRow>（完整物化）
// ==========================================

use crate::config::GrowthFactor;
use crate::domain::inventory::{AggregatedSales, AggregatedStock, SalesKey, SummaryRow};
use crate::domain::types::JoinMode;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// 按指定小数位四舍五入，恰好为 .5 时取偶（银行家舍入）
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    if decimals == 0 {
        return value.round_ties_even();
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

// ==========================================
// MergedRow - 合并后、取整前的中间行
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub country: String,
    pub product_name: String,
    pub sku: String,
    pub fba_stock: f64,
    pub in_transit_total: f64,
    pub trailing_30d_sales: f64,
}

// ==========================================
// MergeOutcome - 合并结果
// ==========================================
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub rows: Vec<MergedRow>,
    /// 在库存汇总中找不到的销量键数量
    pub unmatched_sales_keys: usize,
}

// ==========================================
// RiskEngine - 合并与评分引擎
// ==========================================
pub struct RiskEngine {
    /// 无销量时的库销比哨兵值
    no_sales_ratio: f64,
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(99.0)
    }
}

impl RiskEngine {
    /// 构造函数
    ///
    /// # 参数
    /// - `no_sales_ratio`: 过去30天销量为 0 时使用的库销比（默认 99.0）
    pub fn new(no_sales_ratio: f64) -> Self {
        Self { no_sales_ratio }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 合并、评分并排序
    ///
    /// # 步骤
    /// 1. 按 (国家, SKU) 合并，缺失销量补 0
    /// 2. 预估销量 = round(销量 × 增长系数)
    /// 3. 库销比 = (FBA库存 + 在途总计) / 销量，销量为 0 时取哨兵值，保留一位小数
    /// 4. 数量列截断为整数
    /// 5. 库销比升序、销量降序（稳定排序）
    pub fn score(
        &self,
        stock: &[AggregatedStock],
        sales: &[AggregatedSales],
        growth: GrowthFactor,
        join_mode: JoinMode,
    ) -> Vec<SummaryRow> {
        let merged = self.merge(stock, sales, join_mode);
        self.score_merged(&merged.rows, growth)
    }

    /// 对合并结果逐行评分并排序
    pub fn score_merged(&self, merged: &[MergedRow], growth: GrowthFactor) -> Vec<SummaryRow> {
        let mut rows: Vec<SummaryRow> = merged
            .iter()
            .map(|row| self.score_row(row, growth))
            .collect();

        self.sort_rows(&mut rows);
        rows
    }

    /// 合并库存汇总与销量汇总
    ///
    /// # 规则
    /// - StockLeft: 保留全部库存键；销量表独有的键被丢弃（记录 warn）
    /// - Outer: 额外追加销量表独有的键，库存/在途按 0 计
    pub fn merge(
        &self,
        stock: &[AggregatedStock],
        sales: &[AggregatedSales],
        join_mode: JoinMode,
    ) -> MergeOutcome {
        let sales_by_key: HashMap<SalesKey, &AggregatedSales> =
            sales.iter().map(|s| (s.key(), s)).collect();

        let mut matched: HashSet<SalesKey> = HashSet::new();
        let mut rows = Vec::with_capacity(stock.len());

        for item in stock {
            let key = item.join_key();
            let trailing_30d_sales = match sales_by_key.get(&key) {
                Some(s) => {
                    let total = s.trailing_30d_sales;
                    matched.insert(key);
                    total
                }
                None => 0.0,
            };

            rows.push(MergedRow {
                country: item.country.clone(),
                product_name: item.product_name.clone(),
                sku: item.sku.clone(),
                fba_stock: item.fba_stock,
                in_transit_total: item.in_transit_total,
                trailing_30d_sales,
            });
        }

        // 销量表独有的键（保持销量汇总的键顺序）
        let sales_only: Vec<&AggregatedSales> = sales
            .iter()
            .filter(|s| !matched.contains(&s.key()))
            .collect();
        let unmatched_sales_keys = sales_only.len();

        match join_mode {
            JoinMode::StockLeft => {
                if unmatched_sales_keys > 0 {
                    warn!(
                        unmatched_sales_keys,
                        "部分销量键在库存表中不存在，未出现在汇总中"
                    );
                }
            }
            JoinMode::Outer => {
                rows.extend(sales_only.into_iter().map(|s| MergedRow {
                    country: s.country.clone(),
                    product_name: s.product_name.clone(),
                    sku: s.sku.clone(),
                    fba_stock: 0.0,
                    in_transit_total: 0.0,
                    trailing_30d_sales: s.trailing_30d_sales,
                }));
            }
        }

        debug!(
            join_mode = %join_mode,
            rows = rows.len(),
            unmatched_sales_keys,
            "库存与销量合并完成"
        );

        MergeOutcome {
            rows,
            unmatched_sales_keys,
        }
    }

    /// 计算单行的预估销量与库销比，并做整数截断
    pub fn score_row(&self, row: &MergedRow, growth: GrowthFactor) -> SummaryRow {
        SummaryRow {
            country: row.country.clone(),
            product_name: row.product_name.clone(),
            sku: row.sku.clone(),
            fba_stock: row.fba_stock as i64,
            in_transit_total: row.in_transit_total as i64,
            trailing_30d_sales: row.trailing_30d_sales as i64,
            forecast_30d_sales: self.forecast(row.trailing_30d_sales, growth),
            stock_sales_ratio: self.stock_sales_ratio(
                row.fba_stock,
                row.in_transit_total,
                row.trailing_30d_sales,
            ),
        }
    }

    /// 未来30天预估销量 = round(过去30天销量 × 增长系数)，.5 取偶
    pub fn forecast(&self, trailing_30d_sales: f64, growth: GrowthFactor) -> i64 {
        round_half_even(trailing_30d_sales * growth.value(), 0) as i64
    }

    /// 库销比 = (FBA库存 + 在途总计) / 过去30天销量，保留一位小数
    ///
    /// 销量为 0 时返回哨兵值（不是真实风险比）
    pub fn stock_sales_ratio(&self, fba_stock: f64, in_transit_total: f64, trailing_30d_sales: f64) -> f64 {
        let ratio = if trailing_30d_sales > 0.0 {
            (fba_stock + in_transit_total) / trailing_30d_sales
        } else {
            self.no_sales_ratio
        };
        round_half_even(ratio, 1)
    }

    /// 库销比升序，相同时过去30天销量降序；完全相同保持原顺序
    pub fn sort_rows(&self, rows: &mut [SummaryRow]) {
        rows.sort_by(|a, b| {
            a.stock_sales_ratio
                .total_cmp(&b.stock_sales_ratio)
                .then_with(|| b.trailing_30d_sales.cmp(&a.trailing_30d_sales))
        });
    }
}
