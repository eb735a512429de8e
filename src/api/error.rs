// ==========================================
// 库存销量整合系统 - API 层错误类型
// ==========================================
// 职责: 汇总各层错误；Display 即展示给用户的错误原因
// ==========================================

use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::importer::ImportError;
use crate::presenter::PresentError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 文件与表结构 =====
    #[error(transparent)]
    Import(#[from] ImportError),

    // ===== 配置 =====
    #[error(transparent)]
    Config(#[from] ConfigError),

    // ===== 展示/导出 =====
    #[error(transparent)]
    Present(#[from] PresentError),
}

impl ApiError {
    /// 是否为文件加载失败（任一编码/格式均无法读取）
    pub fn is_load_failure(&self) -> bool {
        matches!(self, ApiError::Import(e) if e.is_load_failure())
    }
}

// ==========================================
// 从 EngineError 转换
// 引擎错误只是上游错误的包装，这里展开为具体来源
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Import(e) => ApiError::Import(e),
            EngineError::Config(e) => ApiError::Config(e),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
