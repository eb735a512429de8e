// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文；文案位于 locales/
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["zh-CN", "en"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use inventory_cover::i18n::t;
/// let msg = t("banner.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 按指定语言翻译（不读写全局 locale）
pub fn t_in(locale: &str, key: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use inventory_cover::i18n::t_with_args;
/// let msg = t_with_args("banner.error", &[("reason", "文件不存在")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    fill_args(t(key), args)
}

/// 按指定语言翻译（带参数）
pub fn t_with_args_in(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    fill_args(t_in(locale, key), args)
}

fn fill_args(mut result: String, args: &[(&str, &str)]) -> String {
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // locale 为全局状态，相关测试串行执行
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(current_locale(), "en");

        set_locale("zh-CN");
        assert_eq!(current_locale(), "zh-CN");
    }

    #[test]
    fn test_translate_banner() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(t("banner.success"), "✅ 数据整合成功！已标记库销比风险项。");

        set_locale("en");
        assert!(t("banner.success").starts_with("✅ Data merged"));

        set_locale("zh-CN");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        let msg = t_with_args("banner.error", &[("reason", "库存表缺少必需列: FBA库存")]);
        assert_eq!(msg, "❌ 运行错误: 库存表缺少必需列: FBA库存");
    }

    #[test]
    fn test_translate_in_ignores_current_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(t_in("zh-CN", "columns.stock_sales_ratio"), "库销比");
        assert_eq!(
            t_with_args_in("zh-CN", "banner.load_failed", &[("reason", "a.csv")]),
            "❌ 无法读取文件: a.csv"
        );
        assert_eq!(current_locale(), "en");

        set_locale("zh-CN");
        assert_eq!(t_in("en", "columns.stock_sales_ratio"), "Stock/Sales");
    }

    #[test]
    fn test_column_names_match_export_headers() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(t("columns.stock_sales_ratio"), "库销比");
        assert_eq!(t("columns.in_transit_total"), "在途总计");
    }
}
