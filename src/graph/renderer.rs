/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 计算图 → Graphviz 图示，省略被屏蔽的节点并把其边"穿透"到它的输入
 */

use super::{GraphSource, WalkedNode};
use crate::config::GraphvizConfig;
use crate::diagram::{Digraph, ImageFormat, SavedDiagram};
use crate::errors::DisplayError;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// 屏蔽规则：节点名包含任一子串即被屏蔽
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suppression {
    patterns: Vec<String>,
}

impl Suppression {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// 不屏蔽任何节点
    pub fn none() -> Self {
        Self::default()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_suppressed(&self, node_name: &str) -> bool {
        self.patterns.iter().any(|p| node_name.contains(p.as_str()))
    }
}

/// 邻接记录：节点名 → 按顺序排列的输入名，保持遍历顺序，构建后不可变
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyRecord {
    order: Vec<String>,
    inputs: HashMap<String, Vec<String>>,
}

impl AdjacencyRecord {
    /// 同名节点再次出现时保留首次出现的位置，输入以最后一次为准
    pub fn from_walk(walked: Vec<WalkedNode>) -> Self {
        let mut record = Self::default();
        for WalkedNode { name, inputs } in walked {
            if !record.inputs.contains_key(&name) {
                record.order.push(name.clone());
            }
            record.inputs.insert(name, inputs);
        }
        record
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    /// 按遍历顺序返回节点名
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// 不在记录中的节点视为没有输入
    pub fn inputs_of(&self, name: &str) -> Option<&[String]> {
        self.inputs.get(name).map(Vec::as_slice)
    }

    /// 按遍历顺序返回所有`(输入, 所属节点)`边
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().flat_map(move |owner| {
            self.inputs[owner]
                .iter()
                .map(move |input| (input.as_str(), owner.as_str()))
        })
    }
}

/// 计算图图示
///
/// 构造时立即完成绘制：
/// 1. 从终端节点反向遍历，得到邻接记录；
/// 2. 每个未被屏蔽的节点声明为图示节点（标签即节点名）；
/// 3. 每条边`输入 -> 所属节点`交给[`draw_edge`](Self::draw_edge)处理。
#[derive(Debug, Clone)]
pub struct GraphRenderer {
    record: AdjacencyRecord,
    suppression: Suppression,
    dot: Digraph,
    graphviz: GraphvizConfig,
}

impl GraphRenderer {
    pub fn new<G: GraphSource + ?Sized>(
        graph: &G,
        terminal: &str,
        suppression: Suppression,
    ) -> Result<Self, DisplayError> {
        let record = AdjacencyRecord::from_walk(graph.backward_walk(terminal)?);
        let mut renderer = Self {
            record,
            suppression,
            dot: Digraph::new(terminal),
            graphviz: GraphvizConfig::default(),
        };
        renderer.draw();

        tracing::debug!(
            terminal,
            recorded = renderer.record.len(),
            nodes = renderer.dot.nodes().count(),
            edges = renderer.dot.edges().count(),
            "计算图图示构建完成"
        );
        Ok(renderer)
    }

    /// 指定渲染 SVG/图像时使用的 Graphviz 配置
    pub fn with_graphviz(mut self, config: GraphvizConfig) -> Self {
        self.graphviz = config;
        self
    }

    pub fn record(&self) -> &AdjacencyRecord {
        &self.record
    }

    pub fn suppression(&self) -> &Suppression {
        &self.suppression
    }

    pub fn diagram(&self) -> &Digraph {
        &self.dot
    }

    pub fn is_suppressed(&self, node_name: &str) -> bool {
        self.suppression.is_suppressed(node_name)
    }

    pub fn to_dot(&self) -> String {
        self.dot.to_dot()
    }

    pub fn to_svg(&self) -> Result<String, DisplayError> {
        self.dot.to_svg(&self.graphviz)
    }

    pub fn save_visualization<P: AsRef<Path>>(
        &self,
        base_path: P,
        format: Option<ImageFormat>,
    ) -> Result<SavedDiagram, DisplayError> {
        self.dot.save_visualization(base_path, &self.graphviz, format)
    }

    fn draw(&mut self) {
        let mut dot = Digraph::new(self.dot.name());
        let mut resolver = PushThrough::new(&self.record, &self.suppression);
        for owner in self.record.names() {
            if !self.suppression.is_suppressed(owner) {
                dot.node(owner, owner);
            }
            for input in self.record.inputs_of(owner).unwrap_or_default() {
                Self::draw_edge(&mut dot, &mut resolver, input, owner);
            }
        }
        self.dot = dot;
    }

    /// 边的改写规则：
    /// - `from`被屏蔽：改为从`from`的每个输入画到`to`（递归穿透）；`from`没有记录的输入时丢弃；
    /// - 否则若`to`被屏蔽：直接丢弃；
    /// - 否则画`from -> to`。
    ///
    /// NOTE: `to`被屏蔽时只丢弃，不会把边继续传给`to`的下游。
    fn draw_edge(dot: &mut Digraph, resolver: &mut PushThrough<'_>, from: &str, to: &str) {
        if resolver.suppression.is_suppressed(from) {
            let (sources, _) = resolver.sources_of(from);
            for source in &sources {
                Self::connect(dot, resolver.suppression, source, to);
            }
        } else {
            Self::connect(dot, resolver.suppression, from, to);
        }
    }

    fn connect(dot: &mut Digraph, suppression: &Suppression, from: &str, to: &str) {
        if !suppression.is_suppressed(to) {
            dot.edge(from, to);
        }
    }
}

/// 被屏蔽节点的穿透解析：求出它沿输入方向最近的未屏蔽祖先（保留重复与顺序）
struct PushThrough<'a> {
    record: &'a AdjacencyRecord,
    suppression: &'a Suppression,
    memo: HashMap<String, Vec<String>>,
    on_path: HashSet<String>,
}

impl<'a> PushThrough<'a> {
    fn new(record: &'a AdjacencyRecord, suppression: &'a Suppression) -> Self {
        Self {
            record,
            suppression,
            memo: HashMap::new(),
            on_path: HashSet::new(),
        }
    }

    /// 返回`(祖先列表, 是否因环被截断)`；被截断的结果不缓存
    fn sources_of(&mut self, name: &str) -> (Vec<String>, bool) {
        if let Some(cached) = self.memo.get(name) {
            return (cached.clone(), false);
        }
        // 全由屏蔽节点组成的环：再次经过同一节点时丢弃
        if !self.on_path.insert(name.to_string()) {
            return (Vec::new(), true);
        }

        let record = self.record;
        let mut sources = Vec::new();
        let mut cut = false;
        for input in record.inputs_of(name).unwrap_or_default() {
            if self.suppression.is_suppressed(input) {
                let (nested, nested_cut) = self.sources_of(input);
                sources.extend(nested);
                cut |= nested_cut;
            } else {
                sources.push(input.clone());
            }
        }

        self.on_path.remove(name);
        if !cut {
            self.memo.insert(name.to_string(), sources.clone());
        }
        (sources, cut)
    }
}
