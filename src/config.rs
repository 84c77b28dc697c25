/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 会话配置：Graphviz可执行文件、数组打印选项、GPU可见性
 *                 所有配置均显式传入，不修改任何进程级全局状态
 */

use crate::diagram::ImageFormat;
use crate::errors::DisplayError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;

/// 控制GPU可见性的环境变量名
pub const VISIBLE_DEVICES_ENV: &str = "CUDA_VISIBLE_DEVICES";

/// 会话的完整配置，各字段都有默认值，JSON中可只写需要覆盖的部分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub graphviz: GraphvizConfig,
    pub print: PrintOptions,
    /// 多GPU时只使用的设备编号（默认"1"）；为None时不设置环境变量
    pub visible_devices: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            graphviz: GraphvizConfig::default(),
            print: PrintOptions::default(),
            visible_devices: Some("1".to_string()),
        }
    }
}

impl SessionConfig {
    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, DisplayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// 从 JSON 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DisplayError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, DisplayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 需要注入到会话进程的环境变量
    pub fn session_env(&self) -> Vec<(&'static str, String)> {
        self.visible_devices
            .iter()
            .map(|devices| (VISIBLE_DEVICES_ENV, devices.clone()))
            .collect()
    }

    /// 把会话环境变量写入即将启动的子进程（只影响该子进程）
    pub fn configure_command<'a>(&self, command: &'a mut Command) -> &'a mut Command {
        for (key, value) in self.session_env() {
            command.env(key, value);
        }
        command
    }
}

/// Graphviz 相关配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphvizConfig {
    /// `dot` 可执行文件（名称或路径）
    pub bin: String,
    /// 保存可视化时默认的图像格式
    pub format: ImageFormat,
}

impl Default for GraphvizConfig {
    fn default() -> Self {
        Self {
            bin: "dot".to_string(),
            format: ImageFormat::default(),
        }
    }
}

/// 数组文本化的打印选项（仿照NumPy的`set_printoptions`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintOptions {
    /// 浮点数最多保留的小数位数
    pub precision: usize,
    /// 为true时从不使用科学计数法
    pub suppress: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            precision: 2,
            suppress: true,
        }
    }
}
