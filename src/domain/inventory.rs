// ==========================================
// 库存销量整合系统 - 库存/销量领域模型
// ==========================================
// 职责: 输入行记录、分组汇总结果、最终汇总行
// 红线: 所有数量字段在类型转换后非负
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// SalesRecord - 销量输入行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub product_name: String, // 品名
    pub sku: String,          // SKU
    pub country: String,      // 国家
    pub sales_qty: f64,       // 销量（转换失败按 0 计）

    // 元信息
    pub row_number: usize,
}

impl SalesRecord {
    pub fn key(&self) -> SalesKey {
        SalesKey {
            country: self.country.clone(),
            sku: self.sku.clone(),
        }
    }
}

// ==========================================
// StockRecord - 库存输入行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub product_name: String, // 品名
    pub sku: String,          // SKU
    pub country: String,      // 国家（地区）
    pub fba_stock: f64,       // FBA库存
    pub inbound_qty: f64,     // 入库中
    pub in_transit_qty: f64,  // FBA在途

    // 元信息
    pub row_number: usize,
}

impl StockRecord {
    /// 在途总计 = 入库中 + FBA在途
    pub fn in_transit_total(&self) -> f64 {
        self.inbound_qty + self.in_transit_qty
    }

    pub fn key(&self) -> StockKey {
        StockKey {
            country: self.country.clone(),
            product_name: self.product_name.clone(),
            sku: self.sku.clone(),
        }
    }
}

// ==========================================
// 分组键
// ==========================================
// 派生 Ord 的字段顺序即分组后的输出顺序

/// 销量分组键 (国家, SKU)，也是合并键
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SalesKey {
    pub country: String,
    pub sku: String,
}

/// 库存分组键 (国家, 品名, SKU)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StockKey {
    pub country: String,
    pub product_name: String,
    pub sku: String,
}


// ==========================================
// AggregatedSales - 销量汇总
// ==========================================
// 每个 (国家, SKU) 唯一一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSales {
    pub country: String,
    pub sku: String,
    pub product_name: String,     // 该键首次出现的品名，仅外连接时使用
    pub trailing_30d_sales: f64,  // 过去30天总销量
}

impl AggregatedSales {
    pub fn key(&self) -> SalesKey {
        SalesKey {
            country: self.country.clone(),
            sku: self.sku.clone(),
        }
    }
}

// ==========================================
// AggregatedStock - 库存汇总
// ==========================================
// 每个 (国家, 品名, SKU) 唯一一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedStock {
    pub country: String,
    pub product_name: String,
    pub sku: String,
    pub fba_stock: f64,        // FBA库存合计
    pub in_transit_total: f64, // 在途总计合计
}

impl AggregatedStock {
    /// 与销量汇总合并的键 (国家, SKU)
    pub fn join_key(&self) -> SalesKey {
        SalesKey {
            country: self.country.clone(),
            sku: self.sku.clone(),
        }
    }
}

// ==========================================
// SummaryRow - 最终汇总行
// ==========================================
// 列顺序: 国家, 品名, SKU, FBA库存, 在途总计, 过去30天总销量, 未来30天预估销量, 库销比
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub country: String,
    pub product_name: String,
    pub sku: String,
    pub fba_stock: i64,
    pub in_transit_total: i64,
    pub trailing_30d_sales: i64,
    pub forecast_30d_sales: i64,
    pub stock_sales_ratio: f64, // 一位小数；无销量时为 99.0
}

impl SummaryRow {
    /// 库销比按一位小数显示（不省略末尾 0）
    pub fn ratio_display(&self) -> String {
        format!("{:.1}", self.stock_sales_ratio)
    }
}
