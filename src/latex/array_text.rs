/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 仿照 NumPy 的`str(ndarray)`把数组转成文本
 *
 * 规则（对应`np.set_printoptions(precision, suppress)`）：
 * - 整数数组按整数打印，所有元素右对齐到同一宽度；
 * - 浮点数最多保留`precision`位小数，去掉末尾的0但保留小数点（如`2.`）；
 * - 最大绝对值≥1e8时，或`suppress=false`且数值跨度过大时，改用科学计数法，
 *   此时尾数补0到统一的小数位数；
 * - 相邻元素以空格分隔，每一维的子块以换行分隔，高维块之间留出空行。
 * 不做 NumPy 的长数组省略（`...`）与按行宽折行。
 */

use crate::config::PrintOptions;
use ndarray::ArrayD;

/// 整数数组 → 文本
pub fn int_array_text(array: &ArrayD<i64>) -> String {
    let items: Vec<String> = array.iter().map(|v| v.to_string()).collect();
    let width = items.iter().map(String::len).max().unwrap_or(0);
    let items: Vec<String> = items.iter().map(|s| format!("{s:>width$}")).collect();
    layout(array.shape(), &items)
}

/// 浮点数组 → 文本
pub fn float_array_text(array: &ArrayD<f64>, options: &PrintOptions) -> String {
    let items: Vec<String> = if needs_scientific(array, options.suppress) {
        let values: Vec<f64> = array.iter().copied().collect();
        format_scientific(&values, options.precision)
    } else {
        array
            .iter()
            .map(|&v| format_positional(v, options.precision))
            .collect()
    };
    layout(array.shape(), &align_decimal_points(&items))
}

/// NumPy 的判断规则：最大绝对值≥1e8，或不压缩小数时最小值<1e-4、最大/最小>1e3
fn needs_scientific(array: &ArrayD<f64>, suppress: bool) -> bool {
    let magnitudes: Vec<f64> = array
        .iter()
        .filter(|v| v.is_finite() && **v != 0.)
        .map(|v| v.abs())
        .collect();
    if magnitudes.is_empty() {
        return false;
    }
    let max_val = magnitudes.iter().copied().fold(f64::MIN, f64::max);
    let min_val = magnitudes.iter().copied().fold(f64::MAX, f64::min);
    max_val >= 1e8 || (!suppress && (min_val < 1e-4 || max_val / min_val > 1e3))
}

fn format_special(v: f64) -> Option<String> {
    if v.is_nan() {
        Some("nan".to_string())
    } else if v.is_infinite() {
        Some(if v > 0. { "inf" } else { "-inf" }.to_string())
    } else {
        None
    }
}

/// 去掉小数部分末尾的0，保留小数点
fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0')
    } else {
        s
    }
}

fn format_positional(v: f64, precision: usize) -> String {
    if let Some(special) = format_special(v) {
        return special;
    }
    let s = format!("{v:.precision$}");
    let trimmed = trim_fraction(&s);
    if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        // precision为0时`format!`不带小数点
        format!("{trimmed}.")
    }
}

/// 科学计数法下单个有限值的各部分，如`-1.5e-05`为`("-1", "5", '-', "5")`
struct Scientific {
    integer: String,
    fraction: String,
    exp_sign: char,
    exp_digits: String,
}

impl Scientific {
    /// 先按`precision`位舍入，再去掉尾数末尾的0
    fn new(v: f64, precision: usize) -> Self {
        let s = format!("{v:.precision$e}");
        let (mantissa, exponent) = s.split_once('e').unwrap_or((s.as_str(), "0"));
        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let (exp_sign, exp_digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        Self {
            integer: integer.to_string(),
            fraction: fraction.trim_end_matches('0').to_string(),
            exp_sign,
            exp_digits: exp_digits.to_string(),
        }
    }
}

/// 整个数组共用一种科学计数法写法：尾数小数位补0到各元素中最长的位数，
/// 指数位数也取最大值（至少两位），如`[1e8, 1.5]`→`1.0e+08`、`1.5e+00`
fn format_scientific(values: &[f64], precision: usize) -> Vec<String> {
    let parts: Vec<Option<Scientific>> = values
        .iter()
        .map(|&v| v.is_finite().then(|| Scientific::new(v, precision)))
        .collect();
    let frac_width = parts.iter().flatten().map(|p| p.fraction.len()).max().unwrap_or(0);
    let exp_width = parts
        .iter()
        .flatten()
        .map(|p| p.exp_digits.len())
        .max()
        .unwrap_or(0)
        .max(2);

    values
        .iter()
        .zip(&parts)
        .map(|(&v, part)| match part {
            Some(p) => format!(
                "{}.{:0<frac_width$}e{}{:0>exp_width$}",
                p.integer, p.fraction, p.exp_sign, p.exp_digits
            ),
            None => format_special(v).unwrap_or_default(),
        })
        .collect()
}

/// 按小数点对齐：整数部分左侧补空格，小数部分右侧补空格
fn align_decimal_points(items: &[String]) -> Vec<String> {
    let split: Vec<(&str, &str)> = items
        .iter()
        .map(|s| match s.find('.') {
            Some(pos) => s.split_at(pos),
            None => (s.as_str(), ""),
        })
        .collect();
    let int_width = split.iter().map(|(i, _)| i.len()).max().unwrap_or(0);
    let frac_width = split.iter().map(|(_, f)| f.len()).max().unwrap_or(0);
    split
        .iter()
        .map(|(i, f)| format!("{i:>int_width$}{f:<frac_width$}"))
        .collect()
}

/// 按形状把已格式化的元素（行优先）排成带方括号的文本
fn layout(shape: &[usize], items: &[String]) -> String {
    if shape.is_empty() {
        return items.first().cloned().unwrap_or_default();
    }
    // 任一维为0：NumPy 一律打印为`[]`
    if items.is_empty() {
        return "[]".to_string();
    }
    let mut out = String::new();
    layout_axis(shape, items, 0, &mut out);
    out
}

fn layout_axis(shape: &[usize], items: &[String], axis: usize, out: &mut String) {
    let rest = shape.len() - axis - 1;
    let stride: usize = shape[axis + 1..].iter().product();
    out.push('[');
    for i in 0..shape[axis] {
        if i > 0 {
            if rest == 0 {
                out.push(' ');
            } else {
                out.push_str(&"\n".repeat(rest));
                out.push_str(&" ".repeat(axis + 1));
            }
        }
        if rest == 0 {
            out.push_str(&items[i]);
        } else {
            layout_axis(shape, &items[i * stride..(i + 1) * stride], axis + 1, out);
        }
    }
    out.push(']');
}
