//! Integration tests for reading adjacency matrices

use pretty_assertions::assert_eq;

use tikz_grapher::{parse, FormatError, MatrixError, MatrixFormat, ShapeError};

#[test]
fn test_formats_agree() {
    let csv = parse("0,1,1\n0,0,1\n1,0,0\n", MatrixFormat::Csv).unwrap();
    let python = parse("[[0,1,1],[0,0,1],[1,0,0]]", MatrixFormat::Python).unwrap();
    let mathematica = parse("{{0,1,1},{0,0,1},{1,0,0}}", MatrixFormat::Mathematica).unwrap();
    let flat = parse("[0,1,1,0,0,1,1,0,0]", MatrixFormat::Python).unwrap();
    assert_eq!(csv, python);
    assert_eq!(python, mathematica);
    assert_eq!(mathematica, flat);
}

#[test]
fn test_entries_are_binarized() {
    let m = parse("[[0, 2.5], [-1, \"0\"]]", MatrixFormat::Python).unwrap();
    assert_eq!(m.rows(), vec![vec![0, 1], vec![1, 0]]);
}

#[test]
fn test_format_names() {
    assert_eq!("CSV".parse::<MatrixFormat>().unwrap(), MatrixFormat::Csv);
    assert_eq!(
        "Mathematica".parse::<MatrixFormat>().unwrap(),
        MatrixFormat::Mathematica
    );
    assert!(matches!(
        "yaml".parse::<MatrixFormat>(),
        Err(FormatError::UnknownFormat(name)) if name == "yaml"
    ));
}

#[test]
fn test_boundaries() {
    assert_eq!(
        parse("[[1]]", MatrixFormat::Python),
        Err(MatrixError::Shape(ShapeError::TooSmall { size: 1 }))
    );
    assert!(matches!(
        parse("[[0,1,0],[1,0,0]]", MatrixFormat::Python),
        Err(MatrixError::Shape(ShapeError::NotSquare { .. }))
    ));
    assert!(matches!(
        parse("zero,one\none,zero", MatrixFormat::Csv),
        Err(MatrixError::Format(_))
    ));
}

#[test]
fn test_format_error_report() {
    let source = "0,1\n1,?\n";
    let Err(MatrixError::Format(errors)) = parse(source, MatrixFormat::Csv) else {
        panic!("expected a format error");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].span(), Some(&(6..7)));
    let report = errors[0].format(source, "graph.csv");
    assert!(report.contains("graph.csv"));
}
