use crate::config::PrintOptions;
use crate::latex::{float_array_text, int_array_text};
use ndarray::{ArrayD, IxDyn, arr0, arr1, arr2};

#[test]
fn test_int_array_text() {
    assert_eq!(int_array_text(&arr1(&[1i64, 2, 3]).into_dyn()), "[1 2 3]");
    assert_eq!(
        int_array_text(&arr2(&[[1i64, 2], [3, 4]]).into_dyn()),
        "[[1 2]\n [3 4]]"
    );
    // 右对齐到同一宽度
    assert_eq!(
        int_array_text(&arr2(&[[1i64, -20], [300, 4]]).into_dyn()),
        "[[  1 -20]\n [300   4]]"
    );
    assert_eq!(int_array_text(&arr0(7i64).into_dyn()), "7");
}

#[test]
fn test_int_array_text_rank3() {
    let array = ArrayD::from_shape_vec(IxDyn(&[2, 2, 2]), (1i64..=8).collect()).unwrap();
    assert_eq!(
        int_array_text(&array),
        "[[[1 2]\n  [3 4]]\n\n [[5 6]\n  [7 8]]]"
    );
}

#[test]
fn test_float_array_text_default_options() {
    let options = PrintOptions::default();
    assert_eq!(
        float_array_text(&arr2(&[[1., 2.], [3., 4.]]).into_dyn(), &options),
        "[[1. 2.]\n [3. 4.]]"
    );
    assert_eq!(
        float_array_text(&arr1(&[1.5, 2.25]).into_dyn(), &options),
        "[1.5  2.25]"
    );
    assert_eq!(
        float_array_text(&arr1(&[1.23456, -0.5]).into_dyn(), &options),
        "[ 1.23 -0.5 ]"
    );
    // suppress=true 时极小值直接舍入
    assert_eq!(
        float_array_text(&arr1(&[0.00001, 1.]).into_dyn(), &options),
        "[0. 1.]"
    );
}

#[test]
fn test_float_array_text_special_values() {
    let options = PrintOptions::default();
    let text = float_array_text(&arr1(&[f64::NAN, f64::INFINITY, 1.]).into_dyn(), &options);
    let elements: Vec<_> = text
        .trim_matches(|c| c == '[' || c == ']')
        .split_whitespace()
        .collect();
    assert_eq!(elements, vec!["nan", "inf", "1."]);
}

#[test]
fn test_float_array_text_scientific() {
    let suppressed = PrintOptions::default();
    assert_eq!(
        float_array_text(&arr1(&[1e9, 1.]).into_dyn(), &suppressed),
        "[1.e+09 1.e+00]"
    );
    // 尾数补0到统一的小数位数
    assert_eq!(
        float_array_text(&arr1(&[1e8, 1.5]).into_dyn(), &suppressed),
        "[1.0e+08 1.5e+00]"
    );
    assert_eq!(
        float_array_text(&arr1(&[-1.25e9, 3e8]).into_dyn(), &suppressed),
        "[-1.25e+09  3.00e+08]"
    );
    // 指数超过两位时所有元素的指数位数一致
    assert_eq!(
        float_array_text(&arr1(&[1e100, 2e8]).into_dyn(), &suppressed),
        "[1.e+100 2.e+008]"
    );

    let unsuppressed = PrintOptions {
        precision: 2,
        suppress: false,
    };
    assert_eq!(
        float_array_text(&arr1(&[0.00001, 1.]).into_dyn(), &unsuppressed),
        "[1.e-05 1.e+00]"
    );
    // 跨度不大时仍是定点数
    assert_eq!(
        float_array_text(&arr1(&[0.5, 1.]).into_dyn(), &unsuppressed),
        "[0.5 1. ]"
    );
}

#[test]
fn test_float_array_text_precision() {
    let options = PrintOptions {
        precision: 4,
        suppress: true,
    };
    assert_eq!(
        float_array_text(&arr1(&[0.12345678]).into_dyn(), &options),
        "[0.1235]"
    );
    let options = PrintOptions {
        precision: 0,
        suppress: true,
    };
    assert_eq!(float_array_text(&arr1(&[2.4]).into_dyn(), &options), "[2.]");
}

#[test]
fn test_empty_array_text() {
    let options = PrintOptions::default();
    let empty = ArrayD::<f64>::zeros(IxDyn(&[0]));
    assert_eq!(float_array_text(&empty, &options), "[]");

    // 任一维为0都打印为`[]`
    let empty = ArrayD::<f64>::zeros(IxDyn(&[2, 0]));
    assert_eq!(float_array_text(&empty, &options), "[]");
    let empty = ArrayD::<i64>::zeros(IxDyn(&[0, 3, 2]));
    assert_eq!(int_array_text(&empty), "[]");
}
