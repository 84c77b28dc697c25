use super::{GraphDef, NodeDef};


/// 由`(名称, 输入)`列表构建计算图
fn graph_of(nodes: &[(&str, &[&str])]) -> GraphDef {
    let mut graph = GraphDef::new();
    for (name, inputs) in nodes {
        graph.add_node(NodeDef::new(name, "Op", inputs));
    }
    graph
}
