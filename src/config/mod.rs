use crate::core::error::AdvisorResult;
use crate::ibg::{ConstructionBudget, TraversalOrder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// 应用配置
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub ibg: IbgConfig,
    pub interaction: InteractionConfig,
}

/// 日志配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
    /// 警告及以上级别同时输出到标准错误
    pub stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
            file: "ibg-advisor".to_string(),
            max_file_size: 100 * 1024 * 1024, // 100MB
            max_files: 5,
            stderr: false,
        }
    }
}

/// 索引收益图构建配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct IbgConfig {
    /// 工作队列的遍历顺序，只影响内存局部性，不影响结果
    pub traversal: TraversalOrder,
    /// 单条语句最多发起的 what-if 调用次数
    pub max_oracle_calls: Option<usize>,
    /// 单条语句的构建时间上限（毫秒）
    pub time_limit_ms: Option<u64>,
    /// 是否并行构建不同语句的图
    pub parallel_build: bool,
}

impl Default for IbgConfig {
    fn default() -> Self {
        Self {
            traversal: TraversalOrder::BreadthFirst,
            max_oracle_calls: None,
            time_limit_ms: None,
            parallel_build: true,
        }
    }
}

impl IbgConfig {
    /// 转换为构建预算
    pub fn budget(&self) -> ConstructionBudget {
        ConstructionBudget {
            max_oracle_calls: self.max_oracle_calls,
            time_limit: self.time_limit_ms.map(Duration::from_millis),
        }
    }
}

/// 交互分析配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    /// 交互度高于该阈值的索引对被划入同一分区
    pub threshold: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self { threshold: 0.0 }
    }
}

impl Config {
    /// 从 TOML 文件加载，缺省的段和字段取默认值
    pub fn load<P: AsRef<Path>>(path: P) -> AdvisorResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> AdvisorResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AdvisorError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.log.level, "info");
        assert_eq!(config.ibg.traversal, TraversalOrder::BreadthFirst);
        assert_eq!(config.ibg.max_oracle_calls, None);
        assert_eq!(config.interaction.threshold, 0.0);
    }

    #[test]
    fn test_config_load_save() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");

        let mut config = Config::default();
        config.ibg.traversal = TraversalOrder::DepthFirst;
        config.ibg.max_oracle_calls = Some(64);
        config.interaction.threshold = 0.5;
        config.save(temp_file.path()).expect("Failed to save config");

        let loaded = Config::load(temp_file.path()).expect("Failed to load config from temporary file");
        assert_eq!(loaded.ibg, config.ibg);
        assert_eq!(loaded.interaction, config.interaction);
        assert_eq!(loaded.log.file, config.log.file);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        temp_file
            .write_all(b"[ibg]\ntraversal = \"depth_first\"\ntime_limit_ms = 250\n")
            .expect("Failed to write TOML content to temporary file");

        let loaded = Config::load(temp_file.path()).expect("Failed to load partial config");
        assert_eq!(loaded.ibg.traversal, TraversalOrder::DepthFirst);
        assert!(loaded.ibg.parallel_build);
        assert_eq!(loaded.log.level, "info");

        let budget = loaded.ibg.budget();
        assert_eq!(budget.time_limit, Some(Duration::from_millis(250)));
        assert_eq!(budget.max_oracle_calls, None);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        temp_file
            .write_all(b"[ibg]\ntraversal = \"sideways\"\n")
            .expect("Failed to write TOML content to temporary file");

        let err = Config::load(temp_file.path()).expect_err("未知的遍历顺序应该被拒绝");
        assert!(matches!(err, AdvisorError::Config(_)));

        let err = Config::load("/nonexistent/ibg-advisor.toml").expect_err("缺失的文件应该报错");
        assert!(matches!(err, AdvisorError::Io(_)));
    }
}
