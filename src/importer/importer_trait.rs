// ==========================================
// 库存销量整合系统 - 导入 Trait
// ==========================================
// 职责: 定义文件解析与报表加载接口（不包含实现）
// ==========================================

use crate::domain::table::RawTable;
use crate::importer::error::{ImportError, ImportResult};
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件内容 → 原始表格
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析上传文件内容
    ///
    /// # 参数
    /// - file_name: 声明的文件名（用于判断格式）
    /// - bytes: 文件内容
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 行记录
    /// - Err: 格式不支持、编码均失败、表格损坏
    fn parse_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<RawTable>;
}

// ==========================================
// Upload - 一次上传的文件
// ==========================================
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// 从磁盘读取文件（文件名作为声明名称）
    pub fn from_path<P: AsRef<Path>>(file_path: P) -> ImportResult<Self> {
        let path = file_path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self { file_name, bytes })
    }
}

// ==========================================
// ReportLoader Trait
// ==========================================
// 用途: 异步加载一张上传报表
// 实现者: BlockingReportLoader
//
// # 说明
// - 两张报表互不依赖，调用方可并发加载
#[async_trait]
pub trait ReportLoader: Send + Sync {
    /// 加载上传文件为原始表格
    async fn load(&self, upload: Upload) -> ImportResult<RawTable>;
}
