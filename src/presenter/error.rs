// ==========================================
// 库存销量整合系统 - 展示/导出错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresentError {
    #[error("Excel 导出失败: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("行数超出 Excel 上限: {0}")]
    TooManyRows(usize),

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),
}

/// Result 类型别名
pub type PresentResult<T> = Result<T, PresentError>;
