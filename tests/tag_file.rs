//! End-to-end tag file generation through the library API

mod common;

use std::collections::HashSet;

use common::{parse_line, TestRepo};
use gotags::indexing::META_LINE_COUNT;
use gotags::{ProgramInfo, TagCollector, TagOptions};

fn collector(options: TagOptions) -> TagCollector {
    TagCollector::new(options, ProgramInfo::default())
}

const SHAPES: &str = r#"package shapes

import "math"

// Shape is anything with an area.
type Shape interface {
	Area() float64
	Perimeter() float64
}

type Point struct {
	X, Y int
}

type Circle struct {
	Point
	Radius float64
	label  string
}

const (
	Pi2    = math.Pi * 2
	maxDim = 1 << 16
)

var DefaultCircle = Circle{Radius: 1}

func NewCircle(r float64) *Circle {
	return &Circle{Radius: r}
}

func (c Circle) Area() float64 {
	return math.Pi * c.Radius * c.Radius
}

func (c *Circle) Scale(f float64) {
	c.Radius *= f
}
"#;

#[test]
fn add_function_scenario() {
    let repo = TestRepo::new().with_file("calc.go", "package calc\n\nfunc Add(a, b int) int {\n\treturn a + b\n}\n");
    let output = collector(TagOptions::default()).run(&[repo.file("calc.go")]);

    let lines = output.tag_lines();
    assert_eq!(lines.len(), 1);

    let tag = parse_line(&lines[0]);
    assert_eq!(tag.name, "Add");
    assert_eq!(tag.file, repo.file("calc.go"));
    assert_eq!(tag.pattern, "/^func Add(a, b int) int {$/");
    assert_eq!(tag.kind, "f");
    assert_eq!(tag.field("line"), Some("3"));
    assert_eq!(tag.field("access"), Some("public"));
    assert_eq!(tag.field("signature"), Some("(int, int) int"));
    assert_eq!(tag.field("receiver"), None);
}

#[test]
fn point_struct_and_method_scenario() {
    let source = "package geo\n\ntype Point struct { X, Y int }\n\nfunc (p *Point) Dist() float64 {\n\treturn 0\n}\n";
    let repo = TestRepo::new().with_file("geo.go", source);
    let output = collector(TagOptions {
        sort: false,
        ..Default::default()
    })
    .run(&[repo.file("geo.go")]);

    let tags: Vec<_> = output.tag_lines().iter().map(|l| parse_line(l)).collect();
    let kinds: Vec<(&str, &str)> = tags.iter().map(|t| (t.name, t.kind)).collect();
    assert_eq!(kinds, vec![("Point", "s"), ("X", "w"), ("Y", "w"), ("Dist", "m")]);

    assert_eq!(tags[1].field("struct"), Some("Point"));
    assert_eq!(tags[2].field("struct"), Some("Point"));
    assert_eq!(tags[3].field("receiver"), Some("*Point"));
    assert_eq!(tags[3].field("line"), Some("5"));
}

#[test]
fn malformed_file_scenario() {
    let repo = TestRepo::new()
        .with_file("broken.go", "package broken\n\nfunc oops( {\n")
        .with_file("limits.go", "package limits\n\nconst MaxSize = 1024\n");

    let output = collector(TagOptions::default()).run(&[repo.file("broken.go"), repo.file("limits.go")]);
    assert_eq!(output.lines.len(), META_LINE_COUNT + 1);
    assert_eq!(parse_line(&output.tag_lines()[0]).name, "MaxSize");
    assert_eq!(output.diagnostics().len(), 1);

    let silent = collector(TagOptions {
        silent: true,
        ..Default::default()
    })
    .run(&[repo.file("broken.go"), repo.file("limits.go")]);
    assert_eq!(silent.tag_lines(), output.tag_lines());
    assert!(silent.diagnostics().is_empty());
}

#[test]
fn const_block_scenario() {
    let repo = TestRepo::new().with_file("c.go", "package c\n\nconst (\n\tA = 1\n\tB = 2\n)\n");
    let output = collector(TagOptions::default()).run(&[repo.file("c.go")]);

    let tags: Vec<_> = output.tag_lines().iter().map(|l| parse_line(l)).collect();
    let found: Vec<(&str, Option<&str>)> = tags.iter().map(|t| (t.name, t.field("line"))).collect();
    assert_eq!(found, vec![("A", Some("4")), ("B", Some("5"))]);
}

#[test]
fn meta_lines_lead_every_run() {
    let repo = TestRepo::new().with_file("shapes.go", SHAPES);
    let collector = collector(TagOptions::default());

    let empty = collector.run(&[]);
    let full = collector.run(&[repo.file("shapes.go")]);

    let meta = collector.meta_lines();
    assert_eq!(&empty.lines[..], &meta[..]);
    assert_eq!(&full.lines[..META_LINE_COUNT], &meta[..]);
    assert!(meta.iter().all(|l| l.starts_with("!_TAG_")));
}

#[test]
fn sorted_output_is_bytewise_and_stable_under_resort() {
    let repo = TestRepo::new().with_file("shapes.go", SHAPES);
    let output = collector(TagOptions::default()).run(&[repo.file("shapes.go")]);

    let lines = output.tag_lines().to_vec();
    let mut resorted = lines.clone();
    gotags::indexing::sort_tag_lines(&mut resorted);
    assert_eq!(lines, resorted);
    assert!(lines.windows(2).all(|w| w[0].as_bytes() <= w[1].as_bytes()));
}

#[test]
fn access_matches_identifier_case() {
    let repo = TestRepo::new().with_file("shapes.go", SHAPES);
    let output = collector(TagOptions::default()).run(&[repo.file("shapes.go")]);

    for line in output.tag_lines() {
        let tag = parse_line(line);
        let expected = if tag.name.starts_with(char::is_uppercase) {
            "public"
        } else {
            "private"
        };
        assert_eq!(tag.field("access"), Some(expected), "{}", line);
    }
}

#[test]
fn members_reference_emitted_types() {
    let repo = TestRepo::new().with_file("shapes.go", SHAPES);
    let output = collector(TagOptions::default()).run(&[repo.file("shapes.go")]);
    let tags: Vec<_> = output.tag_lines().iter().map(|l| parse_line(l)).collect();

    let types: HashSet<&str> = tags
        .iter()
        .filter(|t| matches!(t.kind, "s" | "n" | "t"))
        .map(|t| t.name)
        .collect();

    for tag in &tags {
        match tag.kind {
            "w" => assert!(types.contains(tag.field("struct").unwrap())),
            "a" => assert!(types.contains(tag.field("interface").unwrap())),
            "m" => assert!(!tag.field("receiver").unwrap().is_empty()),
            "f" => assert!(tag.field("receiver").is_none()),
            _ => {}
        }
    }

    let circle_fields: Vec<&str> = tags
        .iter()
        .filter(|t| t.kind == "w" && t.field("struct") == Some("Circle"))
        .map(|t| t.name)
        .collect();
    assert_eq!(circle_fields, vec!["Point", "Radius", "label"]);
}

#[test]
fn files_keep_input_order_when_unsorted() {
    let repo = TestRepo::new()
        .with_file("b.go", "package p\n\nfunc B() {}\n")
        .with_file("a.go", "package p\n\nfunc A() {}\n");
    let output = collector(TagOptions {
        sort: false,
        ..Default::default()
    })
    .run(&[repo.file("b.go"), repo.file("a.go")]);

    let names: Vec<&str> = output.tag_lines().iter().map(|l| parse_line(l).name).collect();
    assert_eq!(names, vec!["B", "A"]);
}
