// ==========================================
// 库存销量整合系统 - 行高亮规则
// ==========================================
// 规则: 库销比 < 阈值 且 过去30天销量 > 0 → 高风险（整行标记）
// 红线: 纯函数，只依赖当前行
// ==========================================

use crate::domain::inventory::SummaryRow;
use crate::domain::types::RowStyle;

/// 默认风险阈值
pub const DEFAULT_RISK_RATIO_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightRule {
    threshold: f64,
}

impl Default for HighlightRule {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_RATIO_THRESHOLD)
    }
}

impl HighlightRule {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// 判定单行样式
    ///
    /// 销量为 0 的死库存不标记（其库销比为哨兵值，本身也不会触发）
    pub fn row_style(&self, row: &SummaryRow) -> RowStyle {
        if row.stock_sales_ratio < self.threshold && row.trailing_30d_sales > 0 {
            RowStyle::HighRisk
        } else {
            RowStyle::Normal
        }
    }

    /// 逐行判定
    pub fn apply(&self, rows: &[SummaryRow]) -> Vec<RowStyle> {
        rows.iter().map(|row| self.row_style(row)).collect()
    }
}

/// 按默认阈值判定单行样式
pub fn row_style(row: &SummaryRow) -> RowStyle {
    HighlightRule::default().row_style(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ratio: f64, sales: i64) -> SummaryRow {
        SummaryRow {
            country: "US".to_string(),
            product_name: "杯子".to_string(),
            sku: "SKU1".to_string(),
            fba_stock: 0,
            in_transit_total: 0,
            trailing_30d_sales: sales,
            forecast_30d_sales: sales,
            stock_sales_ratio: ratio,
        }
    }

    #[test]
    fn test_low_ratio_with_sales_is_high_risk() {
        let rule = HighlightRule::default();
        assert_eq!(rule.row_style(&row(1.0, 20)), RowStyle::HighRisk);
        assert_eq!(rule.row_style(&row(1.9, 1)), RowStyle::HighRisk);
        assert_eq!(rule.row_style(&row(0.0, 5)), RowStyle::HighRisk);
    }

    #[test]
    fn test_ratio_exactly_at_threshold_is_not_flagged() {
        let rule = HighlightRule::default();
        assert_eq!(rule.row_style(&row(2.0, 10)), RowStyle::Normal);
        assert_eq!(row_style(&row(2.0, 10)), RowStyle::Normal);
        assert_eq!(row_style(&row(1.9, 10)), RowStyle::HighRisk);
    }

    #[test]
    fn test_zero_sales_is_never_flagged() {
        let rule = HighlightRule::default();
        assert_eq!(rule.row_style(&row(0.5, 0)), RowStyle::Normal);
        assert_eq!(rule.row_style(&row(99.0, 0)), RowStyle::Normal);
    }

    #[test]
    fn test_custom_threshold() {
        let rule = HighlightRule::new(3.0);
        assert_eq!(rule.row_style(&row(2.5, 10)), RowStyle::HighRisk);
        assert_eq!(rule.apply(&[row(2.5, 10), row(3.0, 10)]), vec![RowStyle::HighRisk, RowStyle::Normal]);
    }
}
