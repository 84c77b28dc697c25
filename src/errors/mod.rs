/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 本库统一的错误类型
 */

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DisplayError {
    // 计算图相关
    #[error("计算图中不存在节点`{0}`")]
    NodeNotFound(String),

    // LaTeX公式相关
    #[error("符号`{token}`绑定的值`{value}`既不是数组也不是数字，无法格式化为定点数")]
    NotNumeric { token: String, value: String },
    #[error("数组数据不合法：{0}")]
    InvalidArray(String),

    // Graphviz相关
    #[error("Graphviz渲染失败：{0}")]
    Graphviz(String),
    #[error("路径不合法：{0}")]
    InvalidPath(String),

    // 外部错误统一转成消息，便于比较
    #[error("读写文件失败：{0}")]
    Io(String),
    #[error("JSON解析失败：{0}")]
    Json(String),
    #[error("读取npy文件失败：{0}")]
    Npy(String),
}

impl From<std::io::Error> for DisplayError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for DisplayError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
