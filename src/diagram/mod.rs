/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 有向图图示（Graphviz DOT）
 *
 * 只负责累积节点/边的声明并生成 DOT 文本；
 * 调用 Graphviz 渲染 SVG/图像文件的部分见 graphviz.rs
 */

mod graphviz;


pub use graphviz::{ImageFormat, SavedDiagram, is_graphviz_available};

/// 图示中的一条声明，按声明顺序保存
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Node { name: String, label: String },
    Edge { from: String, to: String },
}

/// 累积式的有向图图示
///
/// 不做去重：同一节点重复声明时 Graphviz 会将其视为同一个节点，
/// 所以重复声明是无害的。
#[derive(Debug, Clone, Default)]
pub struct Digraph {
    name: String,
    statements: Vec<Statement>,
}

impl Digraph {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            statements: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 声明一个带文本标签的节点
    pub fn node(&mut self, name: &str, label: &str) {
        self.statements.push(Statement::Node {
            name: name.to_string(),
            label: label.to_string(),
        });
    }

    /// 声明一条有向边`from -> to`
    pub fn edge(&mut self, from: &str, to: &str) {
        self.statements.push(Statement::Edge {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// 按声明顺序返回所有节点名
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Node { name, .. } => Some(name.as_str()),
            Statement::Edge { .. } => None,
        })
    }

    /// 按声明顺序返回所有边
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Edge { from, to } => Some((from.as_str(), to.as_str())),
            Statement::Node { .. } => None,
        })
    }

    /// 生成 Graphviz DOT 格式的图描述字符串
    ///
    /// 返回的字符串可直接交给`dot`渲染，也可在线预览：
    /// <https://dreampuf.github.io/GraphvizOnline/>
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();

        // 图头部
        dot.push_str(&format!("digraph {} {{\n", quote(&self.name)));
        dot.push_str("    rankdir=TB;\n");
        dot.push_str("    node [fontname=\"Microsoft YaHei,SimHei,Arial\"];\n");
        dot.push_str("    edge [fontname=\"Microsoft YaHei,SimHei,Arial\"];\n");
        dot.push('\n');

        for statement in &self.statements {
            match statement {
                Statement::Node { name, label } => {
                    dot.push_str(&format!("    {} [label={}];\n", quote(name), quote(label)));
                }
                Statement::Edge { from, to } => {
                    dot.push_str(&format!("    {} -> {};\n", quote(from), quote(to)));
                }
            }
        }

        dot.push_str("}\n");
        dot
    }
}

/// DOT 中的标识符一律加引号（TensorFlow 节点名含`/`、`:`等字符）
fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}
