//! Tests for the TikZ output modules.

use inktex_core::model::{
    Circle, Color, Coords, Ellipse, Item, Layer, Page, Rectangle, Stroke, TextBox,
};
use inktex_core::output::{OutputModule, Tikz, TikzDebug, TikzLineWidth};

fn black() -> Color {
    Color::new(0, 0, 0, 1.0)
}

fn page_with(items: Vec<Item>) -> Vec<Page> {
    vec![Page {
        width: 612.0,
        height: 792.0,
        layers: vec![Layer { items }],
    }]
}

fn render_linewidth(render: impl FnOnce(&mut TikzLineWidth<Vec<u8>>)) -> String {
    let mut module = TikzLineWidth::new(Vec::new());
    render(&mut module);
    String::from_utf8(module.into_inner()).unwrap()
}

#[test]
fn test_fixed_stroke_renders_as_polyline() {
    let out = render_linewidth(|module| {
        module
            .stroke(&Stroke {
                color: black(),
                width: 1.41,
                coords: Coords::Fixed(vec![(0.0, 0.0), (10.0, 0.0), (20.0, 10.0)]),
            })
            .unwrap();
    });
    assert_eq!(
        out,
        "  \\draw[black,line width=1.41pt] (0, 0) -- (10, 0) -- (20, 10);\n"
    );
}

#[test]
fn test_closed_stroke_ends_with_cycle() {
    let out = render_linewidth(|module| {
        module
            .stroke(&Stroke {
                color: black(),
                width: 1.0,
                coords: Coords::Fixed(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]),
            })
            .unwrap();
    });
    assert_eq!(
        out,
        "  \\draw[black,line width=1pt] (0, 0) -- (10, 0) -- (10, 10) -- cycle;\n"
    );
}

#[test]
fn test_single_point_stroke_renders_as_dot() {
    let out = render_linewidth(|module| {
        module
            .stroke(&Stroke {
                color: black(),
                width: 1.0,
                coords: Coords::Fixed(vec![(4.0, 5.0)]),
            })
            .unwrap();
    });
    assert_eq!(out, "  \\draw[black,line width=1pt] (4, 5) -- cycle;\n");
}

#[test]
fn test_variable_stroke_renders_width_tagged_segments() {
    let out = render_linewidth(|module| {
        module
            .stroke(&Stroke {
                color: black(),
                width: 1.0,
                coords: Coords::Variable(vec![
                    ((0.0, 0.0), 0.7),
                    ((10.0, 0.0), 1.2),
                    ((20.0, 5.0), 1.3),
                ]),
            })
            .unwrap();
    });
    assert_eq!(
        out,
        "  \\draw[vlw=black] (0, 0) to[t=1.2pt] (10, 0) to[t=1.3pt] (20, 5);\n"
    );
}

#[test]
fn test_variable_stroke_with_opacity_wraps_style_options() {
    let out = render_linewidth(|module| {
        module
            .stroke(&Stroke {
                color: Color::new(255, 255, 0, 0.5),
                width: 1.0,
                coords: Coords::Variable(vec![((0.0, 0.0), 0.7), ((10.0, 0.0), 1.2)]),
            })
            .unwrap();
    });
    assert_eq!(
        out,
        "  \\draw[vlw={xouffff00,opacity=0.500}] (0, 0) to[t=1.2pt] (10, 0);\n"
    );
}

#[test]
fn test_textbox_shifts_down_and_escapes_line_breaks() {
    let out = render_linewidth(|module| {
        module
            .textbox(&TextBox {
                font: "Sans".to_string(),
                size: 12.0,
                x: 10.0,
                y: 20.0,
                color: black(),
                text: "hello\nworld".to_string(),
            })
            .unwrap();
    });
    assert_eq!(
        out,
        "  \\node[align=left, below right, inner sep=0pt] at (10,22.5) {hello\\\\world};\n"
    );
}

#[test]
fn test_textbox_includes_non_default_color() {
    let out = render_linewidth(|module| {
        module
            .textbox(&TextBox {
                font: "Sans".to_string(),
                size: 12.0,
                x: 0.0,
                y: 0.0,
                color: Color::new(255, 0, 0, 1.0),
                text: "warning".to_string(),
            })
            .unwrap();
    });
    assert_eq!(
        out,
        "  \\node[align=left, below right, inner sep=0pt,red] at (0,2.5) {warning};\n"
    );
}

#[test]
fn test_circle_omits_default_modifiers() {
    let out = render_linewidth(|module| {
        module
            .circle(&Circle {
                color: black(),
                x: 50.0,
                y: 50.0,
                radius: 10.0,
                width: 1.0,
            })
            .unwrap();
    });
    assert_eq!(out, "  \\draw[line width=1pt] (50,50) circle (10);\n");
}

#[test]
fn test_circle_includes_color_and_opacity_when_set() {
    let out = render_linewidth(|module| {
        module
            .circle(&Circle {
                color: Color::new(255, 0, 0, 0.5),
                x: 0.0,
                y: 0.0,
                radius: 5.0,
                width: 2.0,
            })
            .unwrap();
    });
    assert_eq!(
        out,
        "  \\draw[line width=2pt,red,opacity=0.500] (0,0) circle (5);\n"
    );
}

#[test]
fn test_rectangle_renders_corner_to_corner() {
    let out = render_linewidth(|module| {
        module
            .rectangle(&Rectangle {
                color: Color::new(255, 0, 0, 1.0),
                x1: 0.0,
                y1: 0.0,
                x2: 10.0,
                y2: 5.0,
                width: 2.0,
            })
            .unwrap();
    });
    assert_eq!(out, "  \\draw[line width=2pt,red] (0,0) rectangle (10,5);\n");
}

#[test]
fn test_ellipse_renders_center_and_radii() {
    let out = render_linewidth(|module| {
        module
            .ellipse(&Ellipse {
                color: black(),
                left: 30.0,
                right: 70.0,
                top: 60.0,
                bottom: 40.0,
                width: 1.0,
            })
            .unwrap();
    });
    assert_eq!(out, "  \\draw[line width=1pt] (50,50) ellipse (20 and 10);\n");
}

#[test]
fn test_header_declares_each_synthesized_color_once() {
    let gray = Color::new(128, 128, 128, 1.0);
    let document = page_with(vec![
        Item::Stroke(Stroke {
            color: gray,
            width: 1.0,
            coords: Coords::Fixed(vec![(0.0, 0.0), (1.0, 1.0)]),
        }),
        Item::Stroke(Stroke {
            color: gray,
            width: 1.0,
            coords: Coords::Fixed(vec![(2.0, 2.0), (3.0, 3.0)]),
        }),
    ]);
    let out = render_linewidth(|module| {
        module.header(&document).unwrap();
    });
    let expected = "  \\definecolor{xou808080}{rgb}{0.5020,0.5020,0.5020}\n";
    assert_eq!(out.matches(expected).count(), 1);
}

#[test]
fn test_header_skips_definitions_for_named_colors() {
    let document = page_with(vec![Item::Stroke(Stroke {
        color: black(),
        width: 1.0,
        coords: Coords::Fixed(vec![(0.0, 0.0), (1.0, 1.0)]),
    })]);
    let out = render_linewidth(|module| {
        module.header(&document).unwrap();
    });
    assert!(!out.contains("\\definecolor"));
}

#[test]
fn test_fixed_width_module_ignores_per_point_widths() {
    let mut module = Tikz::new(Vec::new());
    module
        .stroke(&Stroke {
            color: black(),
            width: 2.0,
            coords: Coords::Variable(vec![((0.0, 0.0), 0.7), ((10.0, 0.0), 1.2)]),
        })
        .unwrap();
    assert_eq!(
        String::from_utf8(module.into_inner()).unwrap(),
        "  \\draw[black,line width=2pt] (0, 0) -- (10, 0);\n"
    );
}

#[test]
fn test_fixed_width_module_header_has_no_style_preamble() {
    let document = page_with(vec![]);
    let mut module = Tikz::new(Vec::new());
    module.header(&document).unwrap();
    let out = String::from_utf8(module.into_inner()).unwrap();
    assert!(!out.contains("vlw"));
    assert!(out.starts_with("\\begin{tikzpicture}"));
}

#[test]
fn test_debug_module_marks_every_coordinate() {
    let mut module = TikzDebug::new(Vec::new());
    module
        .stroke(&Stroke {
            color: black(),
            width: 1.0,
            coords: Coords::Fixed(vec![(0.0, 0.0), (5.0, 5.0)]),
        })
        .unwrap();
    assert_eq!(
        String::from_utf8(module.into_inner()).unwrap(),
        concat!(
            "  \\draw[black,line width=1pt] (0, 0) -- (5, 5);\n",
            "  \\draw[red, line width=1pt] (0, 0) -- cycle;\n",
            "  \\draw[red, line width=1pt] (5, 5) -- cycle;\n",
        )
    );
}

#[test]
fn test_write_all_emits_header_body_footer() {
    let document = page_with(vec![Item::Stroke(Stroke {
        color: black(),
        width: 1.0,
        coords: Coords::Fixed(vec![(0.0, 0.0), (10.0, 0.0)]),
    })]);
    let out = render_linewidth(|module| {
        module.write_all(&document).unwrap();
    });
    insta::assert_snapshot!(out, @r"
    \tikzset{
      vlw/.style={
        to path={%
          \pgfextra{%
            \draw[#1,line width=\pgfkeysvalueof{/tikz/t}] (\tikztostart) -- (\tikztotarget);
          }%
          (\tikztotarget)
        },
      },
      t/.initial=0.4pt,
    }
    \begin{tikzpicture}[yscale=-1, y=1pt, x=1pt, every path/.style={line cap=round, line join=round}]
      \draw[black,line width=1pt] (0, 0) -- (10, 0);
    \end{tikzpicture}
    ");
}
