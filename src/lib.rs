//! # Workshop Display
//!
//! 机器学习工作坊用的两个展示工具：
//! - [`graph::GraphRenderer`]：把计算图从终端节点反向遍历得到的子图画成 Graphviz 图示，
//!   并省略名称中含指定子串的"噪声"节点（其边会穿透到它的输入）；
//! - [`latex::ArrayFormatter`]：把表达式中的符号替换成数字或矩阵，生成 LaTeX 公式。
//!
//! 两者互不依赖，构造时即完成计算。
//!

pub mod config;
pub mod diagram;
pub mod errors;
pub mod graph;
pub mod latex;
pub mod utils;

pub use config::{GraphvizConfig, PrintOptions, SessionConfig};
pub use errors::DisplayError;
pub use graph::{GraphDef, GraphRenderer, GraphSource, NodeDef, Suppression};
pub use latex::{ArrayFormatter, Bindings, MathDisplay, Value};
