// ==========================================
// 库存销量整合系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / 空值判断 / 数量字段尽力转换
// 红线: 数量转换失败一律按 0 计，不报错、不丢行
// ==========================================

pub struct DataCleaner;

impl DataCleaner {
    /// 清洗文本字段（TRIM）
    pub fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// 文本是否为空（仅含空白也视为空）
    pub fn is_blank(&self, value: Option<&str>) -> bool {
        value.map(|v| v.trim().is_empty()).unwrap_or(true)
    }

    /// 严格解析数量
    ///
    /// # 返回
    /// - Some(f64): 有限且非负的数值
    /// - None: 空值、非数值、NaN/inf、负数
    pub fn parse_quantity(&self, value: Option<&str>) -> Option<f64> {
        let trimmed = value?.trim();
        if trimmed.is_empty() {
            return None;
        }

        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
    }

    /// 数量字段尽力转换
    ///
    /// # 返回
    /// - (数值, 是否按 0 兜底)
    pub fn coerce_quantity(&self, value: Option<&str>) -> (f64, bool) {
        match self.parse_quantity(value) {
            Some(v) => (v, false),
            None => (0.0, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_basic() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_text("  SKU1  "), "SKU1");
    }

    #[test]
    fn test_is_blank() {
        let cleaner = DataCleaner;
        assert!(cleaner.is_blank(None));
        assert!(cleaner.is_blank(Some("   ")));
        assert!(!cleaner.is_blank(Some("US")));
    }

    #[test]
    fn test_coerce_quantity_valid() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.coerce_quantity(Some("10")), (10.0, false));
        assert_eq!(cleaner.coerce_quantity(Some(" 2.5 ")), (2.5, false));
        assert_eq!(cleaner.coerce_quantity(Some("1e2")), (100.0, false));
    }

    #[test]
    fn test_coerce_quantity_fallback_to_zero() {
        let cleaner = DataCleaner;
        for raw in [None, Some(""), Some("N/A"), Some("1,234"), Some("abc"), Some("NaN"), Some("inf"), Some("-3")] {
            assert_eq!(cleaner.coerce_quantity(raw), (0.0, true), "raw = {:?}", raw);
        }
    }
}
