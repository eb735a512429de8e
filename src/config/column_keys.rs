// ==========================================
// 库存销量整合系统 - 列名常量
// ==========================================
// 职责: 输入表必需列、可接受的列名别名、输出列名
// ==========================================

// ===== 输入列 (销量表 / 库存表共用) =====
pub const PRODUCT_NAME: &str = "品名";
pub const SKU: &str = "SKU";

// ===== 销量表 =====
pub const SALES_COUNTRY: &str = "国家";
pub const SALES_QTY: &str = "销量";

// ===== 库存表 =====
pub const STOCK_COUNTRY: &str = "国家（地区）";
pub const FBA_STOCK: &str = "FBA库存";
pub const INBOUND_QTY: &str = "入库中";
pub const IN_TRANSIT_QTY: &str = "FBA在途";

// ===== 输出列 =====
pub const OUT_COUNTRY: &str = "国家";
pub const OUT_PRODUCT_NAME: &str = "品名";
pub const OUT_SKU: &str = "SKU";
pub const OUT_FBA_STOCK: &str = "FBA库存";
pub const OUT_IN_TRANSIT_TOTAL: &str = "在途总计";
pub const OUT_TRAILING_SALES: &str = "过去30天总销量";
pub const OUT_FORECAST_SALES: &str = "未来30天预估销量";
pub const OUT_STOCK_SALES_RATIO: &str = "库销比";

/// 销量表必需列
pub const SALES_REQUIRED: [&str; 4] = [PRODUCT_NAME, SKU, SALES_COUNTRY, SALES_QTY];

/// 库存表必需列
pub const STOCK_REQUIRED: [&str; 6] = [
    PRODUCT_NAME,
    SKU,
    STOCK_COUNTRY,
    FBA_STOCK,
    INBOUND_QTY,
    IN_TRANSIT_QTY,
];

/// 汇总表输出列（展示与导出共用，顺序固定）
pub const SUMMARY_COLUMNS: [&str; 8] = [
    OUT_COUNTRY,
    OUT_PRODUCT_NAME,
    OUT_SKU,
    OUT_FBA_STOCK,
    OUT_IN_TRANSIT_TOTAL,
    OUT_TRAILING_SALES,
    OUT_FORECAST_SALES,
    OUT_STOCK_SALES_RATIO,
];

/// 汇总表输出列的翻译键（与 SUMMARY_COLUMNS 一一对应，zh-CN 下译文即为列名）
pub const SUMMARY_COLUMN_KEYS: [&str; 8] = [
    "columns.country",
    "columns.product_name",
    "columns.sku",
    "columns.fba_stock",
    "columns.in_transit_total",
    "columns.trailing_sales",
    "columns.forecast_sales",
    "columns.stock_sales_ratio",
];

/// 列名别名，首个元素为标准列名
///
/// 不同导出版本的表头写法不一（全角/半角括号、英文后台）
pub fn aliases(key: &str) -> Vec<&'static str> {
    match key {
        PRODUCT_NAME => vec![PRODUCT_NAME, "产品名称", "Product Name"],
        SKU => vec![SKU, "sku", "MSKU"],
        SALES_COUNTRY => vec![SALES_COUNTRY, "国家（地区）", "国家(地区)", "Country"],
        STOCK_COUNTRY => vec![STOCK_COUNTRY, "国家(地区)", "国家", "Country"],
        SALES_QTY => vec![SALES_QTY, "Sales", "Units Ordered"],
        FBA_STOCK => vec![FBA_STOCK, "FBA Stock"],
        INBOUND_QTY => vec![INBOUND_QTY, "Inbound"],
        IN_TRANSIT_QTY => vec![IN_TRANSIT_QTY, "In Transit"],
        _ => Vec::new(),
    }
}
