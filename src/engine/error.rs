// ==========================================
// 库存销量整合系统 - 引擎层错误类型
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use thiserror::Error;

/// 引擎层错误类型
///
/// 汇总/合并/评分本身不会失败，错误均来自上游表结构或配置
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
