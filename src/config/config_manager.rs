// ==========================================
// 库存销量整合系统 - 配置管理器
// ==========================================
// 职责: 配置加载（显式路径 > 用户配置目录 > 默认值）与校验
// 存储: JSON 文件（只读，不写回）
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::pipeline_config::PipelineConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 用户配置目录下的相对路径
const CONFIG_DIR_NAME: &str = "inventory-cover";
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    config: PipelineConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用默认配置
    pub fn with_defaults() -> Self {
        Self {
            config: PipelineConfig::default(),
            source: None,
        }
    }

    /// 加载配置
    ///
    /// # 参数
    /// - explicit_path: 命令行指定的配置文件（必须存在）
    ///
    /// # 查找顺序
    /// 1. explicit_path
    /// 2. `<config_dir>/inventory-cover/config.json`（存在时）
    /// 3. 默认配置
    pub fn load(explicit_path: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("未找到配置文件，使用默认配置");
                Ok(Self::with_defaults())
            }
        }
    }

    /// 从 JSON 文件加载配置（缺省字段取默认值）
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let path_str = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        let config: PipelineConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;
        config.validate()?;

        info!(path = %path_str, growth_factor = config.growth_factor.value(), "配置加载完成");

        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 取出配置（供命令行参数覆写）
    pub fn into_config(self) -> PipelineConfig {
        self.config
    }

    /// 配置来源文件，默认配置时为 None
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// 默认配置文件路径（平台用户配置目录）
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::JoinMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{"growth_factor": 1.2, "join_mode": "OUTER"}}"#).unwrap();

        let manager = ConfigManager::from_file(temp_file.path()).unwrap();
        assert_eq!(manager.config().growth_factor.value(), 1.2);
        assert_eq!(manager.config().join_mode, JoinMode::Outer);
        assert_eq!(manager.source(), Some(temp_file.path()));
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "not json").unwrap();

        let result = ConfigManager::from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let result = ConfigManager::load(Some(Path::new("/non/existent/config.json")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_with_defaults() {
        let manager = ConfigManager::with_defaults();
        assert_eq!(manager.config(), &PipelineConfig::default());
        assert!(manager.source().is_none());
    }
}
