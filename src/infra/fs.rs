//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides the filesystem helpers used around a run:
//! locating the project root, reserving a results path for captured
//! runner output, and reading it back.
//!
//! 此模块提供运行前后使用的文件系统辅助功能：
//! 定位项目根目录、为捕获的运行器输出预留结果路径以及读取该文件。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Searches upward from `start` for the first directory containing any of
/// the `markers`.
///
/// # Arguments
/// * `start` - Directory the search begins in
/// * `markers` - File or directory names identifying a project root
///
/// # Returns
/// The first matching directory, or `None` if the filesystem root is reached
pub fn find_root(start: &Path, markers: &[String]) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| markers.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf)
}

/// Reserves a unique results path in the system temp directory without
/// creating the file. The executor creates it when it stores the captured
/// runner output.
///
/// 在系统临时目录中预留一个唯一的结果路径，但不创建文件。
/// 执行器在保存捕获的运行器输出时创建该文件。
pub fn reserve_results_path() -> io::Result<PathBuf> {
    let reserved = tempfile::Builder::new()
        .prefix("minitest_adapter_")
        .suffix(".out")
        .make(|path| Ok(path.to_path_buf()))?;
    let (path, _) = reserved.keep().map_err(|e| e.error)?;
    Ok(path)
}

/// Reads the captured output of a run.
///
/// # Arguments
/// * `path` - Path of the results file
///
/// # Returns
/// The file content, lossily decoded as UTF-8
pub fn read_results(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Checks if a path exists and is a directory.
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}
