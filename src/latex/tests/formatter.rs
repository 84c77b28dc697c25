use crate::assert_err;
use crate::config::PrintOptions;
use crate::errors::DisplayError;
use crate::latex::{ArrayFormatter, Bindings, MathDisplay, ndarray_to_latex, number_to_latex};
use ndarray::{ArrayD, IxDyn, arr1, arr2};

#[test]
fn test_number_token() {
    let bindings = Bindings::new().with("x", 3);
    let formatter = ArrayFormatter::new("x + 1", &bindings).unwrap();
    assert_eq!(formatter.latex(), "3.00 + 1");
}

#[test]
fn test_matrix_token() {
    let bindings = Bindings::new().with("M", arr2(&[[1i64, 2], [3, 4]]));
    let formatter = ArrayFormatter::new("M", &bindings).unwrap();
    assert_eq!(
        formatter.latex(),
        "\\begin{bmatrix}\n  1 & 2\\\\\n  3 & 4\\\\\n\\end{bmatrix}"
    );
}

#[test]
fn test_unbound_tokens_pass_through() {
    let bindings = Bindings::new().with("a", 0.5).with("b", -1.25);
    let formatter = ArrayFormatter::new("a + b = c", &bindings).unwrap();
    assert_eq!(formatter.latex(), "0.50 + -1.25 = c");
}

#[test]
fn test_whitespace_is_normalized() {
    let bindings = Bindings::new().with("a", 1);
    let formatter = ArrayFormatter::new("  a\t+\n  2 ", &bindings).unwrap();
    assert_eq!(formatter.latex(), "1.00 + 2");

    let formatter = ArrayFormatter::new("   ", &bindings).unwrap();
    assert_eq!(formatter.latex(), "");
}

#[test]
fn test_linear_expression() {
    let bindings = Bindings::new()
        .with("W", arr2(&[[0.5, -1.], [2., 0.25]]))
        .with("x", arr1(&[1i64, 2]))
        .with("b", 1.5);
    let formatter = ArrayFormatter::new("W x + b", &bindings).unwrap();
    assert_eq!(
        formatter.latex(),
        "\\begin{bmatrix}\n  0.5 & -1.\\\\\n  2. & 0.25\\\\\n\\end{bmatrix} \
         \\begin{bmatrix}\n  1 & 2\\\\\n\\end{bmatrix} + 1.50"
    );
}

#[test]
fn test_rank3_array_keeps_blank_rows() {
    let array = ArrayD::from_shape_vec(IxDyn(&[2, 1, 2]), vec![1i64, 2, 3, 4]).unwrap();
    let bindings = Bindings::new().with("T", array);
    let formatter = ArrayFormatter::new("T", &bindings).unwrap();
    assert_eq!(
        formatter.latex(),
        "\\begin{bmatrix}\n  1 & 2\\\\\n  \\\\\n  3 & 4\\\\\n\\end{bmatrix}"
    );
}

#[test]
fn test_print_options() {
    let bindings = Bindings::new().with("v", arr1(&[0.123456]));
    let options = PrintOptions {
        precision: 4,
        suppress: true,
    };
    let formatter = ArrayFormatter::with_options("v", &bindings, &options).unwrap();
    assert_eq!(
        formatter.latex(),
        "\\begin{bmatrix}\n  0.1235\\\\\n\\end{bmatrix}"
    );
}

#[test]
fn test_scientific_and_empty_arrays() {
    let bindings = Bindings::new()
        .with("big", arr1(&[1e8, 1.5]))
        .with("empty", ArrayD::<f64>::zeros(IxDyn(&[2, 0])));

    let formatter = ArrayFormatter::new("big", &bindings).unwrap();
    assert_eq!(
        formatter.latex(),
        "\\begin{bmatrix}\n  1.0e+08 & 1.5e+00\\\\\n\\end{bmatrix}"
    );

    let formatter = ArrayFormatter::new("empty", &bindings).unwrap();
    assert_eq!(formatter.latex(), "\\begin{bmatrix}\n\\end{bmatrix}");
}

#[test]
fn test_text_value_is_not_numeric() {
    let bindings = Bindings::new().with("name", "hello");
    assert_err!(
        ArrayFormatter::new("name + 1", &bindings),
        DisplayError::NotNumeric("name")
    );
    // 未出现在表达式中的文本值不影响结果
    assert!(ArrayFormatter::new("1 + 1", &bindings).is_ok());
}

#[test]
fn test_repr_latex() {
    let bindings = Bindings::new().with("x", 3);
    let formatter = ArrayFormatter::new("x + 1", &bindings).unwrap();
    assert_eq!(formatter.repr_latex(), "$\\displaystyle 3.00 + 1$");
    assert_eq!(formatter.display().to_string(), "$\\displaystyle 3.00 + 1$");

    // 已带`$`定界符的文本不会重复包裹
    assert_eq!(MathDisplay::new("$x$").repr_latex(), "$\\displaystyle x$");
}

#[test]
fn test_ndarray_to_latex() {
    assert_eq!(
        ndarray_to_latex("[[1 2]\n [3 4]]"),
        "\\begin{bmatrix}\n  1 & 2\\\\\n  3 & 4\\\\\n\\end{bmatrix}"
    );
    assert_eq!(
        ndarray_to_latex("5"),
        "\\begin{bmatrix}\n  5\\\\\n\\end{bmatrix}"
    );
}

#[test]
fn test_number_to_latex() {
    assert_eq!(number_to_latex(3.), "3.00");
    assert_eq!(number_to_latex(-0.5), "-0.50");
    assert_eq!(number_to_latex(f64::NAN), "nan");
    assert_eq!(number_to_latex(f64::INFINITY), "inf");
}
