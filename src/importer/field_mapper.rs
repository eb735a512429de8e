// ==========================================
// 库存销量整合系统 - 字段映射器实现
// ==========================================
// 职责: 必需列解析（含别名）+ 原始行 → 领域记录
// 红线: 缺少必需列直接报错；数量转换失败按 0 计
// ==========================================

use crate::config::column_keys;
use crate::domain::inventory::{SalesRecord, StockRecord};
use crate::domain::table::RawTable;
use crate::domain::types::ReportKind;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;
use tracing::{debug, warn};

// ==========================================
// ColumnMap - 标准列名 → 实际表头
// ==========================================
#[derive(Debug, Clone)]
pub struct ColumnMap {
    resolved: HashMap<&'static str, String>,
}

impl ColumnMap {
    /// 取一行中某标准列的值
    fn get<'a>(&self, row: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
        self.resolved
            .get(key)
            .and_then(|header| row.get(header))
            .map(|v| v.as_str())
    }
}

// ==========================================
// MappedRecords - 映射结果
// ==========================================
#[derive(Debug, Clone)]
pub struct MappedRecords<T> {
    pub records: Vec<T>,
    /// 按 0 兜底的数量单元格数
    pub coerced_cells: usize,
    /// 分组键（国家/SKU/品名）为空而跳过的行数
    pub skipped_rows: usize,
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 解析必需列
    ///
    /// # 返回
    /// - Ok(ColumnMap): 全部必需列均找到（按别名顺序取首个匹配）
    /// - Err(MissingColumns): 列出所有缺失的标准列名
    pub fn resolve_columns(
        &self,
        table: &RawTable,
        kind: ReportKind,
        required: &[&'static str],
    ) -> ImportResult<ColumnMap> {
        let mut resolved = HashMap::new();
        let mut missing = Vec::new();

        for &key in required {
            let found = column_keys::aliases(key)
                .into_iter()
                .find(|alias| table.has_column(alias));

            match found {
                Some(header) => {
                    if header != key {
                        debug!(kind = %kind, column = key, header = header, "通过别名匹配列");
                    }
                    resolved.insert(key, header.to_string());
                }
                None => missing.push(key.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(ImportError::MissingColumns {
                kind,
                columns: missing,
            });
        }

        Ok(ColumnMap { resolved })
    }

    /// 映射销量表
    pub fn map_sales(&self, table: &RawTable) -> ImportResult<MappedRecords<SalesRecord>> {
        let columns =
            self.resolve_columns(table, ReportKind::Sales, &column_keys::SALES_REQUIRED)?;

        let mut records = Vec::with_capacity(table.len());
        let mut coerced_cells = 0;
        let mut skipped_rows = 0;

        for (idx, row) in table.rows.iter().enumerate() {
            let country = columns.get(row, column_keys::SALES_COUNTRY);
            let sku = columns.get(row, column_keys::SKU);

            // 分组键为空的行不参与汇总
            if self.cleaner.is_blank(country) || self.cleaner.is_blank(sku) {
                skipped_rows += 1;
                continue;
            }

            let (sales_qty, coerced) = self
                .cleaner
                .coerce_quantity(columns.get(row, column_keys::SALES_QTY));
            coerced_cells += usize::from(coerced);

            records.push(SalesRecord {
                product_name: self
                    .cleaner
                    .clean_text(columns.get(row, column_keys::PRODUCT_NAME).unwrap_or("")),
                sku: self.cleaner.clean_text(sku.unwrap_or("")),
                country: self.cleaner.clean_text(country.unwrap_or("")),
                sales_qty,
                row_number: idx + 1,
            });
        }

        self.log_summary(ReportKind::Sales, records.len(), coerced_cells, skipped_rows);
        Ok(MappedRecords {
            records,
            coerced_cells,
            skipped_rows,
        })
    }

    /// 映射库存表
    pub fn map_stock(&self, table: &RawTable) -> ImportResult<MappedRecords<StockRecord>> {
        let columns =
            self.resolve_columns(table, ReportKind::Stock, &column_keys::STOCK_REQUIRED)?;

        let mut records = Vec::with_capacity(table.len());
        let mut coerced_cells = 0;
        let mut skipped_rows = 0;

        for (idx, row) in table.rows.iter().enumerate() {
            let country = columns.get(row, column_keys::STOCK_COUNTRY);
            let sku = columns.get(row, column_keys::SKU);
            let product_name = columns.get(row, column_keys::PRODUCT_NAME);

            // 库存按 (国家, 品名, SKU) 分组，任一为空即跳过
            if self.cleaner.is_blank(country)
                || self.cleaner.is_blank(sku)
                || self.cleaner.is_blank(product_name)
            {
                skipped_rows += 1;
                continue;
            }

            let mut quantity = |key: &str| {
                let (value, coerced) = self.cleaner.coerce_quantity(columns.get(row, key));
                coerced_cells += usize::from(coerced);
                value
            };

            let fba_stock = quantity(column_keys::FBA_STOCK);
            let inbound_qty = quantity(column_keys::INBOUND_QTY);
            let in_transit_qty = quantity(column_keys::IN_TRANSIT_QTY);

            records.push(StockRecord {
                product_name: self.cleaner.clean_text(product_name.unwrap_or("")),
                sku: self.cleaner.clean_text(sku.unwrap_or("")),
                country: self.cleaner.clean_text(country.unwrap_or("")),
                fba_stock,
                inbound_qty,
                in_transit_qty,
                row_number: idx + 1,
            });
        }

        self.log_summary(ReportKind::Stock, records.len(), coerced_cells, skipped_rows);
        Ok(MappedRecords {
            records,
            coerced_cells,
            skipped_rows,
        })
    }

    fn log_summary(&self, kind: ReportKind, mapped: usize, coerced_cells: usize, skipped: usize) {
        debug!(kind = %kind, mapped, coerced_cells, "字段映射完成");
        if skipped > 0 {
            warn!(kind = %kind, skipped_rows = skipped, "分组键为空的行已跳过");
        }
    }
}
