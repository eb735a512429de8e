// ==========================================
// 库存销量整合系统 - 配置层
// ==========================================
// 职责: 流水线配置、列名常量、配置文件加载
// ==========================================

pub mod column_keys;
pub mod config_manager;
pub mod error;
pub mod pipeline_config;

// 重导出核心配置类型
pub use config_manager::{default_config_path, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use pipeline_config::{GrowthFactor, PipelineConfig};
