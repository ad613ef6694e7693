//! # Configuration Module / 配置模块
//!
//! Holds the three overridable providers of the adapter: the test command
//! builder, the root marker files and the filtered directory names. Each may
//! be given as plain data or as a producer function; both are resolved once
//! by [`AdapterConfigBuilder::build`] into an immutable [`AdapterConfig`].
//!
//! 保存适配器的三个可覆盖提供者：测试命令构建器、根目录标记文件和过滤的目录名。
//! 每一个都可以是普通数据或生成函数；两者都会在 [`AdapterConfigBuilder::build`]
//! 中被一次性解析为不可变的 [`AdapterConfig`]。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::core::error::AdapterError;

/// Default name of the optional configuration file.
/// 可选配置文件的默认名称。
pub const CONFIG_FILE_NAME: &str = "Minitest.toml";

/// A producer for a configuration value.
/// 配置值的生成器。
pub type Provider<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// Maps the runner arguments to the full argument vector.
/// 将运行器参数映射为完整的参数向量。
pub type CommandFn = Arc<dyn Fn(Vec<String>) -> Vec<String> + Send + Sync>;

/// A configuration value that is either static data or computed on demand.
/// 静态数据或按需计算的配置值。
pub enum ConfigValue<T> {
    Static(T),
    Computed(Provider<T>),
}

impl<T> ConfigValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn computed(f: impl Fn() -> T + Send + Sync + 'static) -> Self {
        ConfigValue::Computed(Arc::new(f))
    }

    fn into_provider(self) -> Provider<T> {
        match self {
            ConfigValue::Static(value) => Arc::new(move || value.clone()),
            ConfigValue::Computed(f) => f,
        }
    }
}

impl<T> From<T> for ConfigValue<T> {
    fn from(value: T) -> Self {
        ConfigValue::Static(value)
    }
}

/// How the test runner command is produced from the runner arguments.
/// 如何根据运行器参数生成测试运行命令。
pub enum CommandTemplate {
    /// A fixed prefix; the runner arguments are appended to it.
    /// 固定前缀；运行器参数会被追加在其后。
    Static(Vec<String>),
    /// A function receiving the runner arguments and returning the full argv.
    /// 接收运行器参数并返回完整 argv 的函数。
    Computed(CommandFn),
}

impl CommandTemplate {
    pub fn computed(f: impl Fn(Vec<String>) -> Vec<String> + Send + Sync + 'static) -> Self {
        CommandTemplate::Computed(Arc::new(f))
    }

    /// Parses a shell-like command string such as `bundle exec ruby -Itest`.
    /// Environment variables and `~` are expanded before splitting.
    ///
    /// 解析类似 shell 的命令字符串，例如 `bundle exec ruby -Itest`。
    /// 拆分前会展开环境变量和 `~`。
    pub fn parse(command: &str) -> Result<Self, AdapterError> {
        let expanded = shellexpand::full(command)
            .map_err(|e| AdapterError::Config(format!("failed to expand `{command}`: {e}")))?;
        let parts = shlex::split(&expanded)
            .ok_or_else(|| AdapterError::Config(format!("failed to parse command: {expanded}")))?;
        if parts.is_empty() {
            return Err(AdapterError::EmptyCommand);
        }
        Ok(CommandTemplate::Static(parts))
    }

    fn into_command_fn(self) -> Result<CommandFn, AdapterError> {
        match self {
            CommandTemplate::Static(prefix) => {
                if prefix.is_empty() {
                    return Err(AdapterError::EmptyCommand);
                }
                Ok(Arc::new(move |args: Vec<String>| {
                    let mut command = prefix.clone();
                    command.extend(args);
                    command
                }))
            }
            CommandTemplate::Computed(f) => Ok(f),
        }
    }
}

pub fn default_test_command() -> Vec<String> {
    ["bundle", "exec", "ruby", "-Itest"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn default_root_files() -> Vec<String> {
    ["Gemfile", ".rspec", ".gitignore"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn default_filter_dirs() -> Vec<String> {
    [".git", "node_modules"].into_iter().map(String::from).collect()
}

fn default_language() -> String {
    "en".to_string()
}

/// Resolved adapter configuration. Immutable once built; reconfigure by
/// building a new value and replacing the old one wholesale.
///
/// 已解析的适配器配置。构建后不可变；重新配置时应构建新值并整体替换旧值。
#[derive(Clone)]
pub struct AdapterConfig {
    test_cmd: CommandFn,
    root_files: Provider<Vec<String>>,
    filter_dirs: Provider<Vec<String>>,
    language: String,
}

impl AdapterConfig {
    pub fn builder() -> AdapterConfigBuilder {
        AdapterConfigBuilder::default()
    }

    /// Builds the full runner argv for the given runner arguments.
    /// 为给定的运行器参数构建完整的 argv。
    pub fn test_command(&self, args: Vec<String>) -> Vec<String> {
        (self.test_cmd)(args)
    }

    pub fn root_files(&self) -> Vec<String> {
        (self.root_files)()
    }

    pub fn filter_dirs(&self) -> Vec<String> {
        (self.filter_dirs)()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Loads the configuration from a TOML file.
    /// 从 TOML 文件加载配置。
    pub fn load(path: &Path) -> Result<Self, AdapterError> {
        let content = fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&content).map_err(|source| AdapterError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        file.into_config()
    }

    /// Loads the configuration file if it exists, otherwise returns the defaults.
    /// 如果配置文件存在则加载，否则返回默认配置。
    pub fn load_or_default(path: &Path) -> Result<Self, AdapterError> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            test_cmd: Arc::new(|args: Vec<String>| {
                let mut command = default_test_command();
                command.extend(args);
                command
            }),
            root_files: Arc::new(default_root_files),
            filter_dirs: Arc::new(default_filter_dirs),
            language: default_language(),
        }
    }
}

impl fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("test_cmd", &self.test_command(Vec::new()))
            .field("root_files", &self.root_files())
            .field("filter_dirs", &self.filter_dirs())
            .field("language", &self.language)
            .finish()
    }
}

/// Builder collecting static or computed values before resolution.
/// 在解析之前收集静态值或计算值的构建器。
#[derive(Default)]
pub struct AdapterConfigBuilder {
    test_cmd: Option<CommandTemplate>,
    root_files: Option<ConfigValue<Vec<String>>>,
    filter_dirs: Option<ConfigValue<Vec<String>>>,
    language: Option<String>,
}

impl AdapterConfigBuilder {
    pub fn test_command(mut self, template: CommandTemplate) -> Self {
        self.test_cmd = Some(template);
        self
    }

    pub fn root_files(mut self, value: impl Into<ConfigValue<Vec<String>>>) -> Self {
        self.root_files = Some(value.into());
        self
    }

    pub fn filter_dirs(mut self, value: impl Into<ConfigValue<Vec<String>>>) -> Self {
        self.filter_dirs = Some(value.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn build(self) -> Result<AdapterConfig, AdapterError> {
        let defaults = AdapterConfig::default();
        Ok(AdapterConfig {
            test_cmd: match self.test_cmd {
                Some(template) => template.into_command_fn()?,
                None => defaults.test_cmd,
            },
            root_files: self
                .root_files
                .map(ConfigValue::into_provider)
                .unwrap_or(defaults.root_files),
            filter_dirs: self
                .filter_dirs
                .map(ConfigValue::into_provider)
                .unwrap_or(defaults.filter_dirs),
            language: self.language.unwrap_or(defaults.language),
        })
    }
}

/// On-disk representation of `Minitest.toml`.
/// `Minitest.toml` 的磁盘表示形式。
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    /// The language for console messages (e.g., "en", "zh-CN").
    /// 控制台消息的语言（例如 "en", "zh-CN"）。
    #[serde(default = "default_language")]
    pub language: String,
    /// Shell-like runner prefix, e.g. `bundle exec ruby -Itest`.
    /// 类似 shell 的运行器前缀，例如 `bundle exec ruby -Itest`。
    #[serde(default)]
    pub test_command: Option<String>,
    #[serde(default)]
    pub root_files: Option<Vec<String>>,
    #[serde(default)]
    pub filter_dirs: Option<Vec<String>>,
}

impl ConfigFile {
    pub fn into_config(self) -> Result<AdapterConfig, AdapterError> {
        let mut builder = AdapterConfig::builder().language(self.language);
        if let Some(command) = &self.test_command {
            builder = builder.test_command(CommandTemplate::parse(command)?);
        }
        if let Some(root_files) = self.root_files {
            builder = builder.root_files(root_files);
        }
        if let Some(filter_dirs) = self.filter_dirs {
            builder = builder.filter_dirs(filter_dirs);
        }
        builder.build()
    }
}
