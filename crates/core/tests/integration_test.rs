//! End-to-end pipeline tests: parse → optimize → render.

use inktex_core::optimize::run_all;
use inktex_core::output::{OutputModule, TikzLineWidth};
use inktex_core::parser::parse_document;

const DOCUMENT: &str = r#"<xournal version="0.4.8">
<title>Xournal document</title>
<page width="612.00" height="792.00">
<background type="solid" color="white" style="plain"/>
<layer>
<stroke tool="pen" color="red" width="1.41">
0.0 0.0 10.0 0.0 10.0 10.0 0.0 10.0 0.0 0.0
</stroke>
<stroke tool="pen" color="black" width="1.41">
0.0 20.0 5.0 20.0 10.0 20.0 15.0 25.0
</stroke>
<text font="Sans" size="12.00" x="30.00" y="40.00" color="gray">hi</text>
</layer>
</page>
</xournal>
"#;

#[test]
fn test_full_conversion_detects_and_renders_shapes() {
    let mut document = parse_document(DOCUMENT.as_bytes()).unwrap();
    run_all(&mut document);

    let mut module = TikzLineWidth::new(Vec::new());
    module.write_all(&document).unwrap();
    let out = String::from_utf8(module.into_inner()).unwrap();

    // The closed 5-point loop becomes a rectangle primitive.
    assert!(out.contains("  \\draw[line width=1.41pt,red] (0,0) rectangle (10,10);\n"));
    // The collinear middle point of the second stroke is gone.
    assert!(out.contains("  \\draw[black,line width=1.41pt] (0, 20) -- (10, 20) -- (15, 25);\n"));
    // The gray text color is synthesized and declared in the header.
    assert!(out.contains("  \\definecolor{xou808080}{rgb}{0.5020,0.5020,0.5020}\n"));
    assert!(out.contains("] at (30,42.5) {hi};\n"));
    assert!(out.starts_with("\\tikzset{"));
    assert!(out.ends_with("\\end{tikzpicture}\n"));
}

#[test]
fn test_conversion_without_optimization_keeps_raw_strokes() {
    let document = parse_document(DOCUMENT.as_bytes()).unwrap();

    let mut module = TikzLineWidth::new(Vec::new());
    module.write_all(&document).unwrap();
    let out = String::from_utf8(module.into_inner()).unwrap();

    // Without the optimizer the loop stays a closed polyline.
    assert!(out.contains(
        "  \\draw[red,line width=1.41pt] (0, 0) -- (10, 0) -- (10, 10) -- (0, 10) -- cycle;\n"
    ));
    assert!(!out.contains("rectangle"));
}
