// ==========================================
// 库存销量整合系统 - 销量汇总引擎
// ==========================================
// 输入: 销量表原始行
// 输出: 每个 (国家, SKU) 一行的过去30天总销量，按键升序
// ==========================================

use crate::domain::inventory::{AggregatedSales, SalesKey, SalesRecord};
use crate::domain::table::RawTable;
use crate::importer::{FieldMapper, ImportResult, MappedRecords};
use std::collections::BTreeMap;
use tracing::debug;

pub struct SalesAggregator {
    // 无状态引擎
}

impl Default for SalesAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl SalesAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 从原始销量表映射并汇总
    ///
    /// # 返回
    /// - Ok((汇总结果, 映射结果)): 映射结果保留兜底/跳过计数
    /// - Err(MissingColumns): 缺少 品名/SKU/国家/销量 任一列
    pub fn aggregate_table(
        &self,
        table: &RawTable,
        mapper: &FieldMapper,
    ) -> ImportResult<(Vec<AggregatedSales>, MappedRecords<SalesRecord>)> {
        let mapped = mapper.map_sales(table)?;
        let aggregated = self.aggregate(&mapped.records);
        Ok((aggregated, mapped))
    }

    /// 按 (国家, SKU) 分组求和
    pub fn aggregate(&self, records: &[SalesRecord]) -> Vec<AggregatedSales> {
        let mut groups: BTreeMap<SalesKey, (String, f64)> = BTreeMap::new();

        for record in records {
            let entry = groups
                .entry(record.key())
                .or_insert_with(|| (record.product_name.clone(), 0.0));
            entry.1 += record.sales_qty;
        }

        debug!(input_rows = records.len(), groups = groups.len(), "销量汇总完成");

        groups
            .into_iter()
            .map(|(key, (product_name, total))| AggregatedSales {
                country: key.country,
                sku: key.sku,
                product_name,
                trailing_30d_sales: total,
            })
            .collect()
    }
}
