// ==========================================
// 库存销量整合系统 - 原始表格模型
// ==========================================
// 职责: 文件解析结果（表头 + 行记录），尚未做任何类型转换
// ==========================================

use std::collections::HashMap;

/// 解析后的原始表格
///
/// 行记录为 `列名 -> 单元格文本`，单元格已去除首尾空白；
/// 表头单独保存，以便在没有数据行时仍能做列校验。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// 表头中是否存在该列
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
