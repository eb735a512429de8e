// ==========================================
// 库存销量整合系统 - 库存汇总引擎
// ==========================================
// 输入: 库存表原始行
// 输出: 每个 (国家, 品名, SKU) 一行的 FBA库存 / 在途总计，按键升序
// ==========================================

use crate::domain::inventory::{AggregatedStock, StockKey, StockRecord};
use crate::domain::table::RawTable;
use crate::importer::{FieldMapper, ImportResult, MappedRecords};
use std::collections::BTreeMap;
use tracing::debug;

pub struct InventoryAggregator {
    // 无状态引擎
}

impl Default for InventoryAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 从原始库存表映射并汇总
    pub fn aggregate_table(
        &self,
        table: &RawTable,
        mapper: &FieldMapper,
    ) -> ImportResult<(Vec<AggregatedStock>, MappedRecords<StockRecord>)> {
        let mapped = mapper.map_stock(table)?;
        let aggregated = self.aggregate(&mapped.records);
        Ok((aggregated, mapped))
    }

    /// 按 (国家, 品名, SKU) 分组，分别对 FBA库存 与 在途总计 求和
    pub fn aggregate(&self, records: &[StockRecord]) -> Vec<AggregatedStock> {
        let mut groups: BTreeMap<StockKey, (f64, f64)> = BTreeMap::new();

        for record in records {
            let entry = groups.entry(record.key()).or_insert((0.0, 0.0));
            entry.0 += record.fba_stock;
            entry.1 += record.in_transit_total();
        }

        debug!(input_rows = records.len(), groups = groups.len(), "库存汇总完成");

        groups
            .into_iter()
            .map(|(key, (fba_stock, in_transit_total))| AggregatedStock {
                country: key.country,
                product_name: key.product_name,
                sku: key.sku,
                fba_stock,
                in_transit_total,
            })
            .collect()
    }
}
