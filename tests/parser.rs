use std::io::Write;

use svgscene::{
    Error, Group, Node, Options, Paint, ShapeKind, Text, TextMeasure, Transform, Tree,
    ViewBoxTransform,
};

fn shape<'a>(tree: &'a Tree, id: &str) -> &'a svgscene::Shape {
    match tree.node_by_id(id) {
        Some(Node::Shape(ref shape)) => &**shape,
        n => panic!("'{}' is not a shape: {:?}", id, n),
    }
}

fn text_runs(g: &Group, runs: &mut Vec<Text>) {
    for node in &g.children {
        match node {
            Node::Group(ref g) => text_runs(g, runs),
            Node::Text(ref text) => runs.push((**text).clone()),
            _ => {}
        }
    }
}

/// Every character advances by 10 units, regardless of the font.
#[derive(Debug)]
struct FixedAdvance;

impl TextMeasure for FixedAdvance {
    fn measure(&self, text: &str, _: &svgscene::Font) -> f32 {
        text.chars().count() as f32 * 10.0
    }
}

#[test]
fn style_precedence() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g fill='blue'>
            <rect id='r1' style='fill:red' fill='green'/>
            <rect id='r2' fill='green'/>
            <rect id='r3'/>
        </g>
    </svg>
    ";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    let color = |id| match shape(&tree, id).style.fill {
        Some(Paint::Color(c)) => (c.red, c.green, c.blue),
        ref p => panic!("unexpected paint: {:?}", p),
    };

    assert_eq!(color("r1"), (255, 0, 0));
    assert_eq!(color("r2"), (0, 128, 0));
    assert_eq!(color("r3"), (0, 0, 255));
}

#[test]
fn inherited_values_are_kept() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g stroke='red' stroke-width='2' stroke-linecap='round'>
            <g stroke-width='5'>
                <rect id='r1'/>
            </g>
        </g>
    </svg>
    ";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    let style = &shape(&tree, "r1").style;
    assert!(style.has_stroke);
    assert!(matches!(style.stroke, Some(Paint::Color(_))));
    assert_eq!(style.line_width, Some(5.0));
    assert_eq!(style.line_cap, Some(svgscene::LineCap::Round));
}

#[test]
fn root_style_is_explicit_only() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' fill='red'><rect id='r1'/></svg>";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    assert!(matches!(tree.root().style.fill, Some(Paint::Color(_))));
    assert!(matches!(shape(&tree, "r1").style.fill, Some(Paint::Color(_))));
}

#[test]
fn sticky_stroke_flag() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g stroke='red'>
            <rect id='r1' stroke='none'/>
        </g>
        <rect id='r2' stroke='none'/>
    </svg>
    ";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    assert_eq!(shape(&tree, "r1").style.stroke, Some(Paint::None));
    assert!(shape(&tree, "r1").style.has_stroke);
    assert!(!shape(&tree, "r2").style.has_stroke);
}

#[test]
fn transform_order() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' transform='translate(10,0) scale(2)'/>
        <rect id='r2' transform='skewX(30) translate(5 5)'/>
        <rect id='r3'/>
    </svg>
    ";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    assert_eq!(
        shape(&tree, "r1").transform,
        Some(Transform::from_row(2.0, 0.0, 0.0, 2.0, 10.0, 0.0))
    );
    assert_eq!(
        shape(&tree, "r2").transform,
        Some(Transform::from_translate(5.0, 5.0))
    );
    assert_eq!(shape(&tree, "r3").transform, None);
}

#[test]
fn compact_numbers() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <polygon id='p1' points='10-5 20-5 30,40'/>
        <rect id='r1' transform='translate(10-5)' stroke-dasharray='1-2'/>
    </svg>
    ";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    match shape(&tree, "p1").kind {
        ShapeKind::Polygon { ref points } => {
            assert_eq!(*points, vec![(10.0, -5.0), (20.0, -5.0), (30.0, 40.0)]);
        }
        ref k => panic!("unexpected shape: {:?}", k),
    }

    let r1 = shape(&tree, "r1");
    assert_eq!(r1.transform, Some(Transform::from_translate(10.0, -5.0)));
    assert_eq!(r1.style.dash_array, Some(vec![1.0, -2.0]));
}

#[test]
fn invalid_inline_declaration_is_skipped() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' fill='blue' style=';stroke:red; bogus; fill:;fill:#00ff00'/>
    </svg>
    ";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    let style = &shape(&tree, "r1").style;
    assert_eq!(
        style.fill,
        Some(Paint::Color(svgscene::Color::new_rgba(0, 255, 0, 255)))
    );
    assert!(style.has_stroke);
}

#[test]
fn view_box_mapping() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' width='200' height='200' viewBox='0 0 100 50'/>";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    assert_eq!(
        tree.view_box_transform,
        Some(ViewBoxTransform {
            scale: 2.0,
            tx: 0.0,
            ty: 50.0
        })
    );
    assert_eq!(
        tree.root().transform,
        Some(Transform::from_row(2.0, 0.0, 0.0, 2.0, 0.0, 50.0))
    );
    assert_eq!(tree.root().children.len(), 1);
    assert!(matches!(tree.root().children[0], Node::Group(_)));

    let clip = tree.root().clip.unwrap();
    assert_eq!((clip.width(), clip.height()), (200.0, 200.0));
}

#[test]
fn ignore_view_box() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' width='200' height='200' viewBox='0 0 100 50'><rect/></svg>";

    let opt = Options {
        ignore_view_box: true,
        ..Options::default()
    };

    let tree = Tree::from_str(svg, &opt).unwrap();
    assert!(tree.view_box_transform.is_some());
    assert_eq!(tree.root().transform, None);
    assert!(matches!(tree.root().children[0], Node::Shape(_)));
    assert!(tree.root().clip.is_some());
}

#[test]
fn ignore_root_clip() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' width='200' height='200'/>";

    let opt = Options {
        ignore_root_clip: true,
        ..Options::default()
    };

    let tree = Tree::from_str(svg, &opt).unwrap();
    assert!(tree.root().clip.is_none());
}

#[test]
fn clip_without_view_box() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' width='30' height='40'/>";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    assert_eq!(tree.view_box, None);
    assert_eq!(tree.view_box_transform, None);
    assert_eq!(tree.root().transform, None);

    let clip = tree.root().clip.unwrap();
    assert_eq!((clip.x(), clip.y(), clip.width(), clip.height()), (0.0, 0.0, 30.0, 40.0));
}

#[test]
fn unresolved_size() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 10 20'/>";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    assert_eq!(tree.width, None);
    assert_eq!(tree.height, None);
    assert!(tree.view_box.is_some());
    assert_eq!(tree.view_box_transform, None);
    assert!(tree.root().clip.is_none());
}

#[test]
fn fallback_size() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' width='50%' viewBox='0 0 10 20'/>";

    let opt = Options {
        width: Some(300.0),
        height: Some(100.0),
        ..Options::default()
    };

    let tree = Tree::from_str(svg, &opt).unwrap();
    assert_eq!(tree.width, Some(150.0));
    assert_eq!(tree.height, Some(100.0));
    assert!(tree.view_box_transform.is_some());
}

#[test]
fn malformed_view_box() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' width='10' height='10' viewBox='0 0 10'/>";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    assert_eq!(tree.view_box, None);
    assert_eq!(tree.view_box_transform, None);
}

#[test]
fn gradient_resolution() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <defs>
            <linearGradient id='g1' x2='1'>
                <stop offset='0' stop-color='red'/>
                <stop offset='50%' style='stop-color:blue; stop-opacity:0.5'/>
            </linearGradient>
        </defs>
        <rect id='r1' fill='url(#g1)'/>
        <rect id='r2' stroke='url(#g1)'/>
        <rect id='r3' fill='url(#missing)'/>
    </svg>
    ";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();

    // Definitions are not rendered.
    assert_eq!(tree.root().children.len(), 3);

    let lg1 = match shape(&tree, "r1").style.fill {
        Some(Paint::LinearGradient(ref lg)) => lg.clone(),
        ref p => panic!("unexpected paint: {:?}", p),
    };

    assert_eq!(shape(&tree, "r2").style.stroke, Some(Paint::LinearGradient(lg1.clone())));
    assert!(shape(&tree, "r2").style.has_stroke);
    assert_eq!(shape(&tree, "r3").style.fill, None);

    assert_eq!(lg1.id, "g1");
    assert_eq!((lg1.x1, lg1.y1, lg1.x2, lg1.y2), (0.0, 0.0, 1.0, 0.0));
    assert_eq!(lg1.stops.len(), 2);
    assert_eq!(lg1.stops[0].color, svgscene::Color::new_rgba(255, 0, 0, 255));
    assert_eq!(lg1.stops[1].offset, 0.5);
    assert_eq!(lg1.stops[1].color, svgscene::Color::new_rgba(0, 0, 255, 128));
}

#[test]
fn gradient_defaults() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <defs>
            <linearGradient id='g1'>
                <stop/>
            </linearGradient>
        </defs>
        <rect id='r1' fill='url(#g1)'/>
    </svg>
    ";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    match shape(&tree, "r1").style.fill {
        Some(Paint::LinearGradient(ref lg)) => {
            assert_eq!((lg.x1, lg.y1, lg.x2, lg.y2), (0.0, 0.0, 10.0, 0.0));
            assert_eq!(lg.stops[0].offset, 0.0);
            assert_eq!(lg.stops[0].color, svgscene::Color::black());
        }
        ref p => panic!("unexpected paint: {:?}", p),
    }
}

#[test]
fn gradient_must_precede_use() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' fill='url(#g1)'/>
        <defs>
            <linearGradient id='g1'/>
        </defs>
    </svg>
    ";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    assert_eq!(shape(&tree, "r1").style.fill, None);
}

#[test]
fn duplicated_gradient_keeps_first() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <defs>
            <linearGradient id='g1' x1='1'/>
            <linearGradient id='g1' x1='2'/>
        </defs>
        <rect id='r1' fill='url(#g1)'/>
    </svg>
    ";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    match shape(&tree, "r1").style.fill {
        Some(Paint::LinearGradient(ref lg)) => assert_eq!(lg.x1, 1.0),
        ref p => panic!("unexpected paint: {:?}", p),
    }
}

#[test]
fn text_cursor_advance() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <text x='5' y='20'>
            <tspan>ab</tspan>
            <tspan>cde</tspan>
            <tspan dy='10'>f</tspan>
        </text>
    </svg>
    ";

    let opt = Options {
        text_measure: &FixedAdvance,
        ..Options::default()
    };

    let tree = Tree::from_str(svg, &opt).unwrap();
    let mut runs = Vec::new();
    text_runs(tree.root(), &mut runs);

    assert_eq!(runs.len(), 3);
    assert_eq!((runs[0].text.as_str(), runs[0].x, runs[0].y), ("ab", 5.0, 20.0));
    assert_eq!(runs[0].width, 20.0);
    assert_eq!((runs[1].text.as_str(), runs[1].x, runs[1].y), ("cde", 25.0, 20.0));
    assert_eq!((runs[2].text.as_str(), runs[2].x, runs[2].y), ("f", 55.0, 30.0));
}

#[test]
fn text_structure() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <text id='t1' font-family='Arial' font-size='20' font-weight='bold' stroke-width='3'>
            Hello,
            <tspan id='ts1' x='100' font-style='italic'>world</tspan>
        </text>
    </svg>
    ";

    let opt = Options {
        text_measure: &FixedAdvance,
        ..Options::default()
    };

    let tree = Tree::from_str(svg, &opt).unwrap();

    let text = match tree.node_by_id("t1") {
        Some(Node::Group(ref g)) => g,
        n => panic!("unexpected node: {:?}", n),
    };

    assert_eq!(text.style.text_stroke_width, Some(3.0));
    assert_eq!(text.style.line_width, None);
    assert_eq!(text.children.len(), 2);

    let mut runs = Vec::new();
    text_runs(tree.root(), &mut runs);
    assert_eq!(runs.len(), 2);

    assert_eq!(runs[0].text, "Hello,");
    assert_eq!(runs[0].font.family, "Arial");
    assert_eq!(runs[0].font.size, 20.0);
    assert_eq!(runs[0].font.weight, 700);
    assert_eq!(runs[0].transform, None);

    assert_eq!(runs[1].text, "world");
    assert_eq!(runs[1].x, 100.0);
    assert_eq!(runs[1].font.style, svgscene::FontStyle::Italic);
}

#[test]
fn default_font() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><text>a</text></svg>";

    let opt = Options {
        font_family: "Arial".to_string(),
        font_size: 16.0,
        ..Options::default()
    };

    let tree = Tree::from_str(svg, &opt).unwrap();
    let mut runs = Vec::new();
    text_runs(tree.root(), &mut runs);
    assert_eq!(runs[0].font.family, "Arial");
    assert_eq!(runs[0].font.size, 16.0);
    assert_eq!(runs[0].font.weight, 400);
}

#[test]
fn small_font_is_scaled() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><text x='9' y='18' font-size='3'>ab</text></svg>";

    let opt = Options {
        text_measure: &FixedAdvance,
        ..Options::default()
    };

    let tree = Tree::from_str(svg, &opt).unwrap();
    let mut runs = Vec::new();
    text_runs(tree.root(), &mut runs);

    let run = &runs[0];
    assert_eq!(run.font.size, 9.0);
    let factor = 3.0 / 9.0;
    assert_eq!(run.width, 20.0 * factor);
    assert_eq!(
        run.transform,
        Some(Transform::from_row(factor, 0.0, 0.0, factor, 9.0 - 9.0 * factor, 18.0 - 18.0 * factor))
    );
}

#[test]
fn text_outside_of_text_element_is_ignored() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'>text<g>more text</g></svg>";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    let mut runs = Vec::new();
    text_runs(tree.root(), &mut runs);
    assert!(runs.is_empty());
}

#[test]
fn missing_root_element() {
    let svg = "<!-- comment --><html xmlns='http://www.w3.org/1999/xhtml'><svg/></html>";
    assert!(matches!(
        Tree::from_str(svg, &Options::default()),
        Err(Error::NoSvgElement)
    ));
}

#[test]
fn root_name_is_case_insensitive() {
    let svg = "<!DOCTYPE svg><!-- comment --><SVG width='10' height='10'><rect id='r1'/></SVG>";
    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    assert_eq!(tree.width, Some(10.0));
    assert!(tree.node_by_id("r1").is_some());
}

#[test]
fn malformed_markup() {
    assert!(matches!(
        Tree::from_str("<svg>", &Options::default()),
        Err(Error::ParsingFailed(_))
    ));
}

#[test]
fn default_rect_geometry() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><rect id='r1' width='oops'/></svg>";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    match shape(&tree, "r1").kind {
        ShapeKind::Rect {
            x,
            y,
            width,
            height,
            rx,
            ry,
        } => assert_eq!((x, y, width, height, rx, ry), (0.0, 0.0, 0.0, 0.0, 0.0, 0.0)),
        ref k => panic!("unexpected shape: {:?}", k),
    }
}

#[test]
fn all_shapes() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>
        <circle cx='1' cy='2' r='3'/>
        <ellipse cx='1' cy='2' rx='3' ry='4'/>
        <line x1='1' y1='2' x2='3' y2='4'/>
        <polygon points='0,0 10,0 10,10'/>
        <polyline points='0,0 10,0'/>
        <path d='M 10 20 L 30 40 Z'/>
        <image id='img1' width='5' height='6' xlink:href='image.png'/>
        <unknown><rect/></unknown>
        <style>rect { fill: red }</style>
    </svg>
    ";

    let tree = Tree::from_str(svg, &Options::default()).unwrap();
    let children = &tree.root().children;
    assert_eq!(children.len(), 7);

    assert!(matches!(children[0], Node::Shape(ref s) if matches!(s.kind, ShapeKind::Circle { r, .. } if r == 3.0)));
    assert!(matches!(children[1], Node::Shape(ref s) if matches!(s.kind, ShapeKind::Ellipse { .. })));
    assert!(matches!(children[2], Node::Shape(ref s) if matches!(s.kind, ShapeKind::Line { x2, .. } if x2 == 3.0)));
    assert!(matches!(children[3], Node::Shape(ref s) if matches!(s.kind, ShapeKind::Polygon { ref points } if points.len() == 3)));
    assert!(matches!(children[4], Node::Shape(ref s) if matches!(s.kind, ShapeKind::Polyline { ref points } if points.len() == 2)));
    assert!(matches!(children[5], Node::Shape(ref s) if matches!(s.kind, ShapeKind::Path { data: Some(_) })));

    match children[6] {
        Node::Image(ref img) => {
            assert_eq!(img.id, "img1");
            assert_eq!((img.width, img.height), (5.0, 6.0));
            assert_eq!(img.href.as_deref(), Some("image.png"));
        }
        ref n => panic!("unexpected node: {:?}", n),
    }
}

#[test]
fn from_svgz() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' width='10' height='20'/>";

    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(svg.as_bytes()).unwrap();
    let data = encoder.finish().unwrap();

    let tree = Tree::from_data(&data, &Options::default()).unwrap();
    assert_eq!((tree.width, tree.height), (Some(10.0), Some(20.0)));
}

#[test]
fn not_utf8() {
    assert!(matches!(
        Tree::from_data(&[0xff, 0xfe, 0x00], &Options::default()),
        Err(Error::NotAnUtf8Str)
    ));
}

#[test]
fn malformed_gzip() {
    assert!(matches!(
        Tree::from_data(&[0x1f, 0x8b, 0x00, 0x01], &Options::default()),
        Err(Error::MalformedGZip)
    ));
}

#[test]
fn from_xmltree() {
    let doc = roxmltree::Document::parse("<svg xmlns='http://www.w3.org/2000/svg'><g id='g1'/></svg>").unwrap();
    let tree = Tree::from_xmltree(&doc, &Options::default()).unwrap();
    assert!(matches!(tree.node_by_id("g1"), Some(Node::Group(_))));
}
