/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 公式中符号可绑定的值，以及显式的符号表（Bindings）
 */

use crate::errors::DisplayError;
use ndarray::{Array, ArrayD, Dimension, IxDyn};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// 符号绑定的值：纯数、数组，或无法格式化的文本
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    IntArray(ArrayD<i64>),
    FloatArray(ArrayD<f64>),
    Text(String),
}

impl Value {
    pub fn is_array(&self) -> bool {
        matches!(self, Self::IntArray(_) | Self::FloatArray(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::IntArray(a) => write!(f, "{a}"),
            Self::FloatArray(a) => write!(f, "{a}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<D: Dimension> From<Array<i64, D>> for Value {
    fn from(a: Array<i64, D>) -> Self {
        Self::IntArray(a.into_dyn())
    }
}

impl<D: Dimension> From<Array<f64, D>> for Value {
    fn from(a: Array<f64, D>) -> Self {
        Self::FloatArray(a.into_dyn())
    }
}

/// 显式的符号表：符号名 → 值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: HashMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<V: Into<Value>>(&mut self, name: &str, value: V) -> Option<Value> {
        self.values.insert(name.to_string(), value.into())
    }

    /// 链式插入，便于构造
    pub fn with<V: Into<Value>>(mut self, name: &str, value: V) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 从 JSON 对象解析，如`{"x": 3, "M": [[1, 2], [3, 4]]}`
    ///
    /// - 整数 → `Int`，其余数字 → `Float`，布尔值按0/1处理；
    /// - 嵌套列表 → 数组，元素全为整数时为`IntArray`，否则为`FloatArray`；
    /// - 其它（字符串、null、对象）→ `Text`，格式化时会失败。
    pub fn from_json(json: &str) -> Result<Self, DisplayError> {
        let parsed: JsonValue = serde_json::from_str(json)?;
        let JsonValue::Object(entries) = parsed else {
            return Err(DisplayError::Json("符号表必须是 JSON 对象".to_string()));
        };

        let mut bindings = Self::new();
        for (name, value) in &entries {
            bindings.values.insert(name.clone(), value_from_json(value)?);
        }
        Ok(bindings)
    }

    /// 从 JSON 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DisplayError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// 从`.npy`文件读取数组并绑定到`name`（支持 f64/f32/i64/i32 元素）
    pub fn load_npy<P: AsRef<Path>>(&mut self, name: &str, path: P) -> Result<(), DisplayError> {
        let path = path.as_ref();
        let value = match ndarray_npy::read_npy::<_, ArrayD<f64>>(path) {
            Ok(a) => Value::FloatArray(a),
            Err(first_err) => {
                if let Ok(a) = ndarray_npy::read_npy::<_, ArrayD<f32>>(path) {
                    Value::FloatArray(a.mapv(f64::from))
                } else if let Ok(a) = ndarray_npy::read_npy::<_, ArrayD<i64>>(path) {
                    Value::IntArray(a)
                } else if let Ok(a) = ndarray_npy::read_npy::<_, ArrayD<i32>>(path) {
                    Value::IntArray(a.mapv(i64::from))
                } else {
                    return Err(DisplayError::Npy(format!("{}: {first_err}", path.display())));
                }
            }
        };
        tracing::debug!(name, path = %path.display(), "已从npy文件加载数组");
        self.values.insert(name.to_string(), value);
        Ok(())
    }
}

fn value_from_json(value: &JsonValue) -> Result<Value, DisplayError> {
    Ok(match value {
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(number_as_f64(n)?),
        },
        JsonValue::Bool(b) => Value::Int(i64::from(*b)),
        JsonValue::Array(_) => array_from_json(value)?,
        JsonValue::String(s) => Value::Text(s.clone()),
        other => Value::Text(other.to_string()),
    })
}

fn number_as_f64(n: &serde_json::Number) -> Result<f64, DisplayError> {
    n.as_f64()
        .ok_or_else(|| DisplayError::InvalidArray(format!("无法表示为浮点数: {n}")))
}

/// 嵌套列表 → 数组；各层长度必须一致
fn array_from_json(value: &JsonValue) -> Result<Value, DisplayError> {
    let mut shape = Vec::new();
    let mut leaves = Vec::new();
    let mut leaf_depth = None;
    collect_leaves(value, 0, &mut shape, &mut leaves, &mut leaf_depth)?;

    let as_ints: Option<Vec<i64>> = leaves.iter().map(|n| n.as_i64()).collect();
    match as_ints {
        Some(ints) if !ints.is_empty() => Ok(Value::IntArray(build_array(&shape, ints)?)),
        _ => {
            let floats = leaves
                .iter()
                .map(|n| number_as_f64(n))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::FloatArray(build_array(&shape, floats)?))
        }
    }
}

fn collect_leaves<'a>(
    value: &'a JsonValue,
    depth: usize,
    shape: &mut Vec<usize>,
    leaves: &mut Vec<&'a serde_json::Number>,
    leaf_depth: &mut Option<usize>,
) -> Result<(), DisplayError> {
    match value {
        JsonValue::Array(items) => {
            if leaf_depth.is_some_and(|d| depth >= d) {
                return Err(DisplayError::InvalidArray("嵌套层数不一致".to_string()));
            }
            if depth == shape.len() {
                shape.push(items.len());
            } else if shape[depth] != items.len() {
                return Err(DisplayError::InvalidArray(format!(
                    "第{depth}维长度不一致: {} 与 {}",
                    shape[depth],
                    items.len()
                )));
            }
            for item in items {
                collect_leaves(item, depth + 1, shape, leaves, leaf_depth)?;
            }
            Ok(())
        }
        JsonValue::Number(n) => {
            match *leaf_depth {
                None if depth == shape.len() => *leaf_depth = Some(depth),
                Some(d) if d == depth => {}
                _ => return Err(DisplayError::InvalidArray("嵌套层数不一致".to_string())),
            }
            leaves.push(n);
            Ok(())
        }
        other => Err(DisplayError::InvalidArray(format!("数组元素必须是数字: {other}"))),
    }
}

fn build_array<T>(shape: &[usize], data: Vec<T>) -> Result<ArrayD<T>, DisplayError> {
    Array::from_shape_vec(IxDyn(shape), data).map_err(|e| DisplayError::InvalidArray(e.to_string()))
}
