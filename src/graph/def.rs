/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 计算图描述（TensorFlow GraphDef 的 JSON 子集）
 *
 * 输入名沿用 TensorFlow 的约定：
 * - `"name"` / `"name:0"`: 节点`name`的第0个输出
 * - `"name:N"`: 节点`name`的第N个输出
 * - `"^name"`: 控制依赖（反向遍历时不跟随）
 */

use super::{GraphSource, WalkedNode};
use crate::errors::DisplayError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

/// 计算图的可序列化描述
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDef {
    #[serde(default)]
    pub node: Vec<NodeDef>,
}

/// 节点描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDef {
    pub name: String,
    #[serde(default)]
    pub op: String,
    /// 输入名列表（含控制依赖），保持原始写法
    #[serde(default)]
    pub input: Vec<String>,
}

impl NodeDef {
    pub fn new(name: &str, op: &str, input: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            op: op.to_string(),
            input: input.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// 数据输入对应的生产者节点名；控制依赖返回None
    pub fn producer_name(input: &str) -> Option<&str> {
        if input.starts_with('^') {
            return None;
        }
        match input.rsplit_once(':') {
            Some((op, index)) if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) => {
                Some(op)
            }
            _ => Some(input),
        }
    }
}

impl GraphDef {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加节点描述
    pub fn add_node(&mut self, node: NodeDef) {
        self.node.push(node);
    }

    pub fn get(&self, name: &str) -> Option<&NodeDef> {
        self.node.iter().find(|n| n.name == name)
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, DisplayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, DisplayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// 从 JSON 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DisplayError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }
}

impl GraphSource for GraphDef {
    /// 广度优先的反向遍历，只跟随数据输入；引用了图中不存在节点的输入被忽略
    fn backward_walk(&self, terminal: &str) -> Result<Vec<WalkedNode>, DisplayError> {
        // 同名节点以第一个为准
        let mut index: HashMap<&str, &NodeDef> = HashMap::new();
        for node in &self.node {
            index.entry(node.name.as_str()).or_insert(node);
        }

        let root = index
            .get(terminal)
            .copied()
            .ok_or_else(|| DisplayError::NodeNotFound(terminal.to_string()))?;

        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&NodeDef> = VecDeque::new();
        let mut walked = Vec::new();
        visited.insert(root.name.as_str());
        queue.push_back(root);

        while let Some(node) = queue.pop_front() {
            walked.push(WalkedNode {
                name: node.name.clone(),
                inputs: node.input.clone(),
            });
            for producer in node.input.iter().filter_map(|i| NodeDef::producer_name(i)) {
                if let Some(&next) = index.get(producer) {
                    if visited.insert(next.name.as_str()) {
                        queue.push_back(next);
                    }
                }
            }
        }

        tracing::debug!(terminal, nodes = walked.len(), "反向遍历完成");
        Ok(walked)
    }
}
