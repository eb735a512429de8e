// ==========================================
// 库存销量整合系统 - 带样式的展示视图
// ==========================================
// 职责: 汇总行 + 行样式 → 供界面渲染的行（含 CSS 与库销比显示文本）
// ==========================================

use crate::config::column_keys::SUMMARY_COLUMN_KEYS;
use crate::domain::inventory::SummaryRow;
use crate::domain::types::RowStyle;
use crate::engine::HighlightRule;
use crate::i18n::t_in;
use crate::presenter::error::PresentResult;
use serde::Serialize;

/// 展示用的一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledRow {
    #[serde(flatten)]
    pub row: SummaryRow,
    pub style: RowStyle,
    /// 整行的 CSS 声明，无标记时为空串
    pub css: &'static str,
    /// 库销比固定一位小数
    pub ratio_display: String,
}

impl StyledRow {
    pub fn new(row: SummaryRow, style: RowStyle) -> Self {
        Self {
            css: style.css(),
            ratio_display: row.ratio_display(),
            row,
            style,
        }
    }
}

/// 汇总表列名（终端表格与导出共用）
pub fn summary_headers(locale: &str) -> Vec<String> {
    SUMMARY_COLUMN_KEYS
        .iter()
        .map(|key| t_in(locale, key))
        .collect()
}

/// 按高亮规则逐行生成展示视图
pub fn build_styled_view(rows: &[SummaryRow], rule: &HighlightRule) -> Vec<StyledRow> {
    rows.iter()
        .map(|row| StyledRow::new(row.clone(), rule.row_style(row)))
        .collect()
}

/// 展示视图序列化为 JSON（供界面壳使用）
pub fn to_json(view: &[StyledRow]) -> PresentResult<String> {
    Ok(serde_json::to_string_pretty(view)?)
}
