/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 调用 Graphviz 把 Digraph 渲染为 SVG 文本或图像文件
 *
 * 所有渲染都走同一个`dot -T<格式> [-o <文件>]`调用，DOT 文本经标准输入传入
 */

use super::Digraph;
use crate::config::GraphvizConfig;
use crate::errors::DisplayError;
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::str::FromStr;

/// 图像格式，取值同时是 Graphviz 的`-T`参数和文件后缀
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
    Pdf,
}

impl ImageFormat {
    pub const ALL: [Self; 3] = [Self::Png, Self::Svg, Self::Pdf];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DisplayError::Graphviz(format!("不支持的图像格式`{s}`（可选 png/svg/pdf）")))
    }
}

/// 保存图示的结果：`.dot`文件总会写出，图像只有渲染成功时才有
#[derive(Debug)]
pub struct SavedDiagram {
    pub dot_path: PathBuf,
    /// 渲染成功时为图像路径，失败时为原因
    pub image: Result<PathBuf, DisplayError>,
}

impl SavedDiagram {
    pub fn image_path(&self) -> Option<&Path> {
        self.image.as_ref().ok().map(PathBuf::as_path)
    }
}

/// 检测 Graphviz 是否可用（`<bin> -V`）
pub fn is_graphviz_available(bin: &str) -> bool {
    Command::new(bin)
        .arg("-V")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

impl Digraph {
    /// 渲染为 SVG 文本
    pub fn to_svg(&self, config: &GraphvizConfig) -> Result<String, DisplayError> {
        let stdout = run_dot(&config.bin, ImageFormat::Svg, None, &self.to_dot())?;
        String::from_utf8(stdout)
            .map_err(|e| DisplayError::Graphviz(format!("SVG 输出不是合法的 UTF-8: {e}")))
    }

    /// 把 DOT 文本写入文件
    pub fn save_dot<P: AsRef<Path>>(&self, path: P) -> Result<(), DisplayError> {
        std::fs::write(path.as_ref(), self.to_dot())?;
        Ok(())
    }

    /// 以`base_path`（不带后缀）为基础写出`<base>.dot`，并尝试渲染`<base>.<格式>`
    ///
    /// `format`缺省时使用配置中的格式。Graphviz 不可用或渲染失败不算错误，
    /// 原因记录在返回值的`image`里；只有路径带后缀或写`.dot`失败时才返回 Err。
    pub fn save_visualization<P: AsRef<Path>>(
        &self,
        base_path: P,
        config: &GraphvizConfig,
        format: Option<ImageFormat>,
    ) -> Result<SavedDiagram, DisplayError> {
        let base_path = base_path.as_ref();
        let format = format.unwrap_or(config.format);
        if base_path.extension().is_some() {
            return Err(DisplayError::InvalidPath(format!(
                "`{}`带有后缀；请只给出基础路径，会自动写出 .dot 与 .{} 文件",
                base_path.display(),
                format.as_str()
            )));
        }

        let dot_path = base_path.with_extension("dot");
        let source = self.to_dot();
        std::fs::write(&dot_path, &source)?;

        let image_path = base_path.with_extension(format.as_str());
        let image = run_dot(&config.bin, format, Some(&image_path), &source).map(|_| image_path);
        if let Err(e) = &image {
            tracing::warn!(dot = %dot_path.display(), "只写出了 DOT 文件: {e}");
        }

        Ok(SavedDiagram { dot_path, image })
    }
}

/// 启动一次`dot -T<format> [-o <output>]`，把`source`写入其标准输入，返回标准输出
///
/// 可执行文件不存在时返回带安装提示的错误；子进程在任何情况下都会被回收。
fn run_dot(
    bin: &str,
    format: ImageFormat,
    output: Option<&Path>,
    source: &str,
) -> Result<Vec<u8>, DisplayError> {
    let mut command = Command::new(bin);
    command.arg(format!("-T{}", format.as_str()));
    if let Some(path) = output {
        command.arg("-o").arg(path);
    }

    let spawned = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();
    let mut child = match spawned {
        Ok(child) => child,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(bin, "找不到 Graphviz 可执行文件");
            return Err(DisplayError::Graphviz(format!(
                "找不到`{bin}`，请先安装 Graphviz（如 apt install graphviz / brew install graphviz），\
                 或在配置中指定其路径"
            )));
        }
        Err(e) => return Err(DisplayError::Graphviz(format!("无法启动`{bin}`: {e}"))),
    };

    // 写完后drop掉stdin，dot才会读到EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(source.as_bytes()),
        None => Ok(()),
    };
    if let Err(e) = written {
        let _ = child.kill();
        let _ = child.wait();
        return Err(e.into());
    }

    let result = child.wait_with_output()?;
    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(DisplayError::Graphviz(format!(
            "`{bin} -T{}`退出码 {}: {}",
            format.as_str(),
            result.status,
            stderr.trim()
        )));
    }
    Ok(result.stdout)
}
