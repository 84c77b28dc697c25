/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 计算图图示模块
 *
 * 公开 API：
 * - `GraphSource`: 计算图提供方（反向遍历）
 * - `GraphDef`/`NodeDef`: 可从 JSON 加载的计算图描述（TensorFlow GraphDef 的子集）
 * - `GraphRenderer`: 把反向遍历得到的子图画成 Graphviz 图示，并省略被屏蔽的节点
 */

mod def;
mod renderer;

#[cfg(test)]
mod tests;

pub use def::{GraphDef, NodeDef};
pub use renderer::{AdjacencyRecord, GraphRenderer, Suppression};

use crate::errors::DisplayError;

/// 反向遍历得到的一个节点：名称及其按顺序排列的输入名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedNode {
    pub name: String,
    pub inputs: Vec<String>,
}

impl WalkedNode {
    pub fn new(name: &str, inputs: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// 计算图提供方
///
/// 从终端节点出发沿"输入"边反向遍历，返回所有可达节点（含终端节点本身）。
/// 遍历顺序不影响图示的正确性，但应当是确定的。
pub trait GraphSource {
    fn backward_walk(&self, terminal: &str) -> Result<Vec<WalkedNode>, DisplayError>;
}
