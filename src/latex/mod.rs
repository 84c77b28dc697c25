/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 数组/数字 → LaTeX 公式
 *
 * 公开 API：
 * - `ArrayFormatter`: 把以空白分隔的表达式中的符号替换为对应的数字或矩阵
 * - `Bindings`/`Value`: 显式的符号表
 * - `MathDisplay`: 可在 notebook 中显示的公式
 */

mod array_text;
mod value;

#[cfg(test)]
mod tests;

pub use array_text::{float_array_text, int_array_text};
pub use value::{Bindings, Value};

use crate::config::PrintOptions;
use crate::errors::DisplayError;
use std::fmt;

/// 表达式 → LaTeX 公式
///
/// 表达式按空白切分，每个片段独立处理：
/// - 在符号表中且为数组：替换为`bmatrix`矩阵；
/// - 在符号表中且为纯数：替换为保留两位小数的定点数；
/// - 不在符号表中：原样保留。
///
/// 处理后的片段以单个空格拼接。构造时即完成转换。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayFormatter {
    display: MathDisplay,
}

impl ArrayFormatter {
    pub fn new(expression: &str, bindings: &Bindings) -> Result<Self, DisplayError> {
        Self::with_options(expression, bindings, &PrintOptions::default())
    }

    /// `options`只影响数组的文本化，纯数始终保留两位小数
    pub fn with_options(
        expression: &str,
        bindings: &Bindings,
        options: &PrintOptions,
    ) -> Result<Self, DisplayError> {
        let pieces = expression
            .split_whitespace()
            .map(|token| match bindings.get(token) {
                Some(value) => value_to_latex(token, value, options),
                None => Ok(token.to_string()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            display: MathDisplay::new(&pieces.join(" ")),
        })
    }

    /// 生成的 LaTeX 文本（不含`$`定界符）
    pub fn latex(&self) -> &str {
        self.display.data()
    }

    pub fn display(&self) -> &MathDisplay {
        &self.display
    }

    pub fn repr_latex(&self) -> String {
        self.display.repr_latex()
    }
}

fn value_to_latex(token: &str, value: &Value, options: &PrintOptions) -> Result<String, DisplayError> {
    match value {
        Value::IntArray(array) => Ok(ndarray_to_latex(&int_array_text(array))),
        Value::FloatArray(array) => Ok(ndarray_to_latex(&float_array_text(array, options))),
        Value::Int(v) => Ok(number_to_latex(*v as f64)),
        Value::Float(v) => Ok(number_to_latex(*v)),
        Value::Text(text) => Err(DisplayError::NotNumeric {
            token: token.to_string(),
            value: text.clone(),
        }),
    }
}

/// 数组文本 → `bmatrix`：去掉方括号后逐行处理，行内元素以` & `连接并以`\\`结尾
pub fn ndarray_to_latex(array_text: &str) -> String {
    let stripped = array_text.replace(['[', ']'], "");
    let mut lines = vec![r"\begin{bmatrix}".to_string()];
    lines.extend(
        stripped
            .lines()
            .map(|l| format!("  {}{}", l.split_whitespace().collect::<Vec<_>>().join(" & "), r"\\")),
    );
    lines.push(r"\end{bmatrix}".to_string());
    lines.join("\n")
}

/// 保留两位小数的定点数
pub fn number_to_latex(number: f64) -> String {
    if number.is_nan() {
        return "nan".to_string();
    }
    format!("{number:.2}")
}

/// 行间公式（`$\displaystyle ...$`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathDisplay {
    data: String,
}

impl MathDisplay {
    pub fn new(latex: &str) -> Self {
        Self {
            data: latex.to_string(),
        }
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn repr_latex(&self) -> String {
        format!(r"$\displaystyle {}$", self.data.trim_matches('$'))
    }
}

impl fmt::Display for MathDisplay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.repr_latex())
    }
}
