//! Standalone document assembly

/// Document class line of every standalone document
pub const DOCUMENT_CLASS: &str = "\\documentclass[tikz]{standalone}\n";

/// Wrap a picture in a compilable standalone document, with `preamble`
/// placed before `\begin{document}`
pub fn standalone_document(preamble: &str, picture: &str) -> String {
    let mut doc = String::with_capacity(DOCUMENT_CLASS.len() + preamble.len() + picture.len() + 40);
    doc.push_str(DOCUMENT_CLASS);
    doc.push_str(preamble);
    doc.push_str("\\begin{document}\n");
    doc.push_str(picture);
    doc.push_str("\\end{document}\n");
    doc
}
