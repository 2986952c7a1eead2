//! Operator-facing text.
//!
//! Every line the launcher shows comes from [`Messages`], in one of two
//! locales. Chinese is the default because the launched application ships
//! for a Chinese-speaking audience.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Where Python can be downloaded from, shown with the runtime diagnostic.
pub const RUNTIME_DOWNLOAD_URL: &str = "https://www.python.org/downloads/";

/// Supported display languages.
///
/// Config values are read through [`FromStr`], so `zh_CN`, `zh-cn` and
/// `EN` are accepted alongside the canonical `zh-CN` and `en`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Locale {
    /// Simplified Chinese.
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    /// English.
    #[serde(rename = "en")]
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "zh" | "zh-cn" | "zh-hans" => Ok(Self::ZhCn),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            _ => Err(format!("unknown locale: {}", s)),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZhCn => write!(f, "zh-CN"),
            Self::En => write!(f, "en"),
        }
    }
}

impl Locale {
    /// Pick a locale from the process environment.
    pub fn detect() -> Self {
        Self::detect_with(|key| std::env::var(key).ok())
    }

    /// Pick a locale from `LC_ALL`, then `LANG`.
    ///
    /// Values starting with `zh` select Chinese; any other non-empty value
    /// (other than the `C`/`POSIX` placeholders) selects English. With
    /// nothing usable set, falls back to Chinese.
    pub fn detect_with<F>(env_fn: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in ["LC_ALL", "LANG"] {
            let Some(value) = env_fn(key) else {
                continue;
            };
            let value = value.trim().to_lowercase();
            if value.is_empty() || value == "c" || value == "posix" || value.starts_with("c.") {
                continue;
            }
            return if value.starts_with("zh") {
                Self::ZhCn
            } else {
                Self::En
            };
        }
        Self::default()
    }
}

/// Message catalog for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    /// Create a catalog for `locale`.
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Banner shown before the first stage.
    pub fn header(&self) -> String {
        match self.locale {
            Locale::ZhCn => "正在准备运行环境".to_string(),
            Locale::En => "Preparing the runtime environment".to_string(),
        }
    }

    /// Spinner text for the runtime probe.
    pub fn checking_runtime(&self, runtime: &str) -> String {
        match self.locale {
            Locale::ZhCn => format!("正在检查 Python 环境 ({})...", runtime),
            Locale::En => format!("Checking for Python ({})...", runtime),
        }
    }

    /// Runtime probe succeeded, with the version when one was parsed.
    pub fn runtime_found(&self, version: Option<&str>) -> String {
        match (self.locale, version) {
            (Locale::ZhCn, Some(v)) => format!("已检测到 Python {}", v),
            (Locale::ZhCn, None) => "已检测到 Python".to_string(),
            (Locale::En, Some(v)) => format!("Found Python {}", v),
            (Locale::En, None) => "Found Python".to_string(),
        }
    }

    /// Short spinner result for an absent runtime.
    pub fn runtime_not_found(&self) -> String {
        match self.locale {
            Locale::ZhCn => "未检测到 Python".to_string(),
            Locale::En => "Python not found".to_string(),
        }
    }

    /// Fatal diagnostic naming the version to install.
    pub fn runtime_missing(&self, min_version: &str) -> String {
        match self.locale {
            Locale::ZhCn => format!(
                "未检测到 Python，请先安装 Python {} 或更高版本，并确保已添加到 PATH",
                min_version
            ),
            Locale::En => format!(
                "Python was not found. Please install Python {} or newer and make sure it is on PATH",
                min_version
            ),
        }
    }

    /// Where to download the runtime.
    pub fn runtime_download_hint(&self) -> String {
        match self.locale {
            Locale::ZhCn => format!("下载地址: {}", RUNTIME_DOWNLOAD_URL),
            Locale::En => format!("Download: {}", RUNTIME_DOWNLOAD_URL),
        }
    }

    /// Warning for a runtime older than the configured minimum.
    pub fn runtime_too_old(&self, found: &str, min_version: &str) -> String {
        match self.locale {
            Locale::ZhCn => format!(
                "当前 Python 版本为 {}，建议使用 {} 或更高版本",
                found, min_version
            ),
            Locale::En => format!(
                "Python {} detected; version {} or newer is recommended",
                found, min_version
            ),
        }
    }

    /// Spinner text for the import probe.
    pub fn checking_dependency(&self, module: &str) -> String {
        match self.locale {
            Locale::ZhCn => format!("正在检查依赖 ({})...", module),
            Locale::En => format!("Checking dependencies ({})...", module),
        }
    }

    /// The required module imported.
    pub fn dependency_found(&self) -> String {
        match self.locale {
            Locale::ZhCn => "依赖已安装".to_string(),
            Locale::En => "Dependencies are installed".to_string(),
        }
    }

    /// The required module failed to import; installation follows.
    pub fn dependency_missing(&self) -> String {
        match self.locale {
            Locale::ZhCn => "缺少依赖，正在安装...".to_string(),
            Locale::En => "Dependencies are missing, installing...".to_string(),
        }
    }

    /// The dependency manifest does not exist.
    pub fn manifest_missing(&self, path: &Path) -> String {
        match self.locale {
            Locale::ZhCn => format!("未找到依赖清单文件: {}", path.display()),
            Locale::En => format!("Dependency manifest not found: {}", path.display()),
        }
    }

    /// The package manager exited 0.
    pub fn install_succeeded(&self) -> String {
        match self.locale {
            Locale::ZhCn => "依赖安装完成".to_string(),
            Locale::En => "Dependencies installed".to_string(),
        }
    }

    /// The package manager exited non-zero.
    pub fn install_failed(&self, exit_code: Option<i32>) -> String {
        let code = exit_code.map_or_else(|| "?".to_string(), |c| c.to_string());
        match self.locale {
            Locale::ZhCn => format!("依赖安装失败 (退出码 {})", code),
            Locale::En => format!("Dependency installation failed (exit code {})", code),
        }
    }

    /// The package manager could not be started.
    pub fn install_spawn_failed(&self, detail: &str) -> String {
        match self.locale {
            Locale::ZhCn => format!("无法启动包管理器: {}", detail),
            Locale::En => format!("Could not start the package manager: {}", detail),
        }
    }

    /// Shown just before the entry point takes over the console.
    pub fn launching(&self, entry_point: &Path) -> String {
        match self.locale {
            Locale::ZhCn => format!("正在启动程序 ({})...", entry_point.display()),
            Locale::En => format!("Starting the application ({})...", entry_point.display()),
        }
    }

    /// The application exited non-zero.
    pub fn app_exited_with_error(&self, exit_code: Option<i32>) -> String {
        let code = exit_code.map_or_else(|| "?".to_string(), |c| c.to_string());
        match self.locale {
            Locale::ZhCn => format!("程序异常退出 (退出码 {})", code),
            Locale::En => format!("The application exited with an error (exit code {})", code),
        }
    }

    /// The application could not be started.
    pub fn launch_failed(&self, detail: &str) -> String {
        match self.locale {
            Locale::ZhCn => format!("无法启动程序: {}", detail),
            Locale::En => format!("Could not start the application: {}", detail),
        }
    }

    /// Launch refused after a failed install.
    pub fn strict_abort(&self) -> String {
        match self.locale {
            Locale::ZhCn => "依赖未能正确安装，已取消启动".to_string(),
            Locale::En => "Dependencies were not installed correctly; launch cancelled".to_string(),
        }
    }

    /// Exit prompt when a single key press is read.
    pub fn press_any_key(&self) -> String {
        match self.locale {
            Locale::ZhCn => "按任意键退出...".to_string(),
            Locale::En => "Press any key to exit...".to_string(),
        }
    }

    /// Exit prompt when a whole line is read.
    pub fn press_enter(&self) -> String {
        match self.locale {
            Locale::ZhCn => "按回车键退出...".to_string(),
            Locale::En => "Press Enter to exit...".to_string(),
        }
    }

    /// The configuration could not be loaded; nothing was started.
    pub fn config_failed(&self, detail: &str) -> String {
        match self.locale {
            Locale::ZhCn => format!("配置文件有误，未启动程序: {}", detail),
            Locale::En => format!("Configuration error, nothing was started: {}", detail),
        }
    }
}
