// ==========================================
// 库存销量整合系统 - 领域类型定义
// ==========================================
// 职责: 报表种类 / 行样式标记 / 合并方式
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 报表种类 (Report Kind)
// ==========================================
// 用途: 错误信息与日志中标明是哪张输入表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportKind {
    Sales, // 产品表现表 (含 30 天销量)
    Stock, // 补货建议表 (含 FBA 库存/在途)
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Sales => write!(f, "销量表"),
            ReportKind::Stock => write!(f, "库存表"),
        }
    }
}

// ==========================================
// 行样式 (Row Style)
// ==========================================
// 高风险: 库销比 < 阈值 且 过去30天销量 > 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowStyle {
    Normal,   // 无标记
    HighRisk, // 红底黄字加粗
}

impl RowStyle {
    /// 高风险行的 CSS 声明（红底、黄字、加粗）
    pub const HIGH_RISK_CSS: &'static str =
        "background-color: #FF0000; color: #FFFF00; font-weight: bold;";

    /// 样式对应的 CSS 声明，无标记时为空串
    pub fn css(&self) -> &'static str {
        match self {
            RowStyle::Normal => "",
            RowStyle::HighRisk => Self::HIGH_RISK_CSS,
        }
    }

    pub fn is_high_risk(&self) -> bool {
        matches!(self, RowStyle::HighRisk)
    }
}

impl fmt::Display for RowStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowStyle::Normal => write!(f, "NORMAL"),
            RowStyle::HighRisk => write!(f, "HIGH_RISK"),
        }
    }
}

// ==========================================
// 合并方式 (Join Mode)
// ==========================================
// StockLeft: 以库存汇总为左表，无库存记录的销量键被丢弃
// Outer: 额外保留只出现在销量表中的键（库存、在途按 0 计）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinMode {
    #[default]
    StockLeft,
    Outer,
}

impl fmt::Display for JoinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinMode::StockLeft => write!(f, "STOCK_LEFT"),
            JoinMode::Outer => write!(f, "OUTER"),
        }
    }
}
