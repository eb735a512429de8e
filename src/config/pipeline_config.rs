// ==========================================
// 库存销量整合系统 - 流水线配置
// ==========================================
// 职责: 增长系数、风险阈值、合并方式、导出文件名
// 红线: 增长系数作为显式参数传入评分步骤，不使用全局状态
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::JoinMode;
use crate::i18n::SUPPORTED_LOCALES;
use serde::{Deserialize, Serialize};

// ==========================================
// GrowthFactor - 未来 30 天预测增长系数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct GrowthFactor(f64);

impl GrowthFactor {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 2.0;
    pub const DEFAULT: f64 = 1.0;

    /// 创建增长系数
    ///
    /// # 返回
    /// - Ok: 值在 [0.5, 2.0] 内（不要求落在 0.1 步长上）
    /// - Err: 超出范围或非有限数
    pub fn new(value: f64) -> ConfigResult<Self> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ConfigError::GrowthFactorOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for GrowthFactor {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl<'de> Deserialize<'de> for GrowthFactor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        GrowthFactor::new(value).map_err(serde::de::Error::custom)
    }
}

// ==========================================
// PipelineConfig - 流水线配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// 未来 30 天预测增长系数
    pub growth_factor: GrowthFactor,

    /// 库销比低于该值（且有销量）视为高风险
    pub risk_ratio_threshold: f64,

    /// 过去 30 天无销量时的库销比哨兵值
    pub no_sales_ratio: f64,

    /// 库存汇总与销量汇总的合并方式
    pub join_mode: JoinMode,

    /// 导出文件名（不含扩展名）
    pub export_file_stem: String,

    /// 界面语言（zh-CN / en）
    pub locale: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            growth_factor: GrowthFactor::default(),
            risk_ratio_threshold: 2.0,
            no_sales_ratio: 99.0,
            join_mode: JoinMode::StockLeft,
            export_file_stem: "Amazon_Inventory_Sales_Summary".to_string(),
            locale: "zh-CN".to_string(),
        }
    }
}

impl PipelineConfig {
    /// 校验配置值
    pub fn validate(&self) -> ConfigResult<()> {
        GrowthFactor::new(self.growth_factor.value())?;

        if !self.risk_ratio_threshold.is_finite() || self.risk_ratio_threshold <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "risk_ratio_threshold".to_string(),
                message: format!("必须为正数，实际 {}", self.risk_ratio_threshold),
            });
        }

        if !self.no_sales_ratio.is_finite() || self.no_sales_ratio < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "no_sales_ratio".to_string(),
                message: format!("必须为非负数，实际 {}", self.no_sales_ratio),
            });
        }

        let stem = self.export_file_stem.trim();
        if stem.is_empty() || stem.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                key: "export_file_stem".to_string(),
                message: format!("文件名无效: {:?}", self.export_file_stem),
            });
        }

        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "locale".to_string(),
                message: format!(
                    "仅支持 {}，实际 {}",
                    SUPPORTED_LOCALES.join(" / "),
                    self.locale
                ),
            });
        }

        Ok(())
    }

    /// 导出文件名（含 .xlsx 扩展名）
    pub fn export_file_name(&self) -> String {
        format!("{}.xlsx", self.export_file_stem.trim())
    }
}
