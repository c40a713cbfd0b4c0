//! 日志初始化
//!
//! 以 `log` 为门面、`flexi_logger` 为后端写入滚动日志文件。
//! 异步写入模式下退出前必须调用 [`shutdown`]，否则尾部日志可能丢失。

use crate::config::LogConfig;
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use parking_lot::Mutex;

/// 进程内唯一的日志句柄
static LOGGER_HANDLE: Mutex<Option<LoggerHandle>> = Mutex::new(None);

/// 按配置启动文件日志
///
/// 重复调用时返回错误，已有的日志句柄保持不变
pub fn init(config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut guard = LOGGER_HANDLE.lock();
    if guard.is_some() {
        return Err("日志系统已经初始化".into());
    }

    let duplicate = if config.stderr {
        Duplicate::Warn
    } else {
        Duplicate::None
    };
    let handle = Logger::try_with_str(&config.level)?
        .log_to_file(
            FileSpec::default()
                .basename(&config.file)
                .directory(&config.dir),
        )
        .rotate(
            Criterion::Size(config.max_file_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.max_files),
        )
        .duplicate_to_stderr(duplicate)
        .write_mode(WriteMode::Async)
        .append()
        .start()?;
    *guard = Some(handle);
    drop(guard);

    log::info!("日志写入 {}/{}，级别 {}", config.dir, config.file, config.level);
    Ok(())
}

/// 刷新异步缓冲并释放日志句柄
pub fn shutdown() {
    if let Some(handle) = LOGGER_HANDLE.lock().take() {
        handle.flush();
        handle.shutdown();
    }
}

pub fn is_initialized() -> bool {
    LOGGER_HANDLE.lock().is_some()
}
