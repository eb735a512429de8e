// ==========================================
// 库存销量整合系统 - 报表加载器实现
// ==========================================
// 职责: 在阻塞线程池中解析上传文件，供异步调用方并发加载两张报表
// ==========================================

use crate::domain::table::RawTable;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{FileParser, ReportLoader, Upload};
use async_trait::async_trait;
use tracing::{debug, instrument};

// ==========================================
// BlockingReportLoader
// ==========================================
pub struct BlockingReportLoader;

#[async_trait]
impl ReportLoader for BlockingReportLoader {
    #[instrument(skip(self, upload), fields(file = %upload.file_name, bytes = upload.bytes.len()))]
    async fn load(&self, upload: Upload) -> ImportResult<RawTable> {
        debug!("开始解析上传文件");

        tokio::task::spawn_blocking(move || {
            UniversalFileParser.parse_bytes(&upload.file_name, &upload.bytes)
        })
        .await
        .map_err(|e| ImportError::InternalError(format!("解析任务异常退出: {}", e)))?
    }
}
