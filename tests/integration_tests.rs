//! End-to-end tests: complete Sindarin source files through the public API.
//!
//! Blocks in Sindarin are undelimited and greedy: a body-bearing declaration
//! absorbs every following statement-shaped line, so the program below keeps
//! struct declarations (whose bodies also absorb following `fn`s as members)
//! at the end of the file.

use sindarin_syntax::tree::{Element, Field, NodeKind, Tree};

/// A representative program touching every declaration form.
const PROGRAM: &str = concat!(
    "#pragma include <stdio.h>\n",
    "#pragma pack (4)\n",
    "\n",
    "import \"vec.sn\" as vec\n",
    "\n",
    "type Handle = opaque\n",
    "type Callback = native fn\n",
    "\n",
    "@source \"fastmath.c\"\n",
    "@include <math.h>\n",
    "@link m\n",
    "native fn fast_sqrt(x: double): double\n",
    "\n",
    "var home: Point = Point{x: 1, y: 2}\n",
    "\n",
    "shared fn classify(p: Point): str =>\n",
    "  var label: str = \"other\"\n",
    "  /* greedy blocks: everything below is the if-consequence */\n",
    "  if p.x == 0 && p.y == 0 => label = \"origin\"\n",
    "  for var i: int = 0; i < 3; ++i => label += \"!\"\n",
    "  for c in label => log(c)\n",
    "  while p.y > 100 => break\n",
    "  match p.x =>\n",
    "    0 => return \"axis\"\n",
    "    1 => return $\"unit {p.y:d}\"\n",
    "\n",
    "fn main(): int =>\n",
    "  var t: int = &compute(7)!\n",
    "  return t\n",
    "\n",
    "native struct Buffer as ref =>\n",
    "  data: byte[]\n",
    "  len: int\n",
    "\n",
    "struct Point =>\n",
    "  x: int\n",
    "  y: int\n",
    "  fn length(): double => return fast_sqrt((self.x * self.x + self.y * self.y) as double)\n",
    "  static fn origin(): Point => return Point{x: 0, y: 0}\n",
);

fn top_level_kinds(tree: &Tree) -> Vec<NodeKind> {
    tree.children(tree.root())
        .iter()
        .map(|c| match c.element {
            Element::Node(id) => tree.kind(id),
            Element::Token(id) => panic!("top-level token child {:?}", id),
        })
        .collect()
}

#[test]
fn full_program_parses_cleanly() {
    let tree = sindarin::parse(PROGRAM);
    assert!(
        tree.diagnostics().is_empty(),
        "diagnostics: {:?}",
        tree.diagnostics()
    );
    assert_eq!(
        top_level_kinds(&tree),
        vec![
            NodeKind::Pragma,
            NodeKind::Pragma,
            NodeKind::ImportStatement,
            NodeKind::TypeDeclaration,
            NodeKind::TypeDeclaration,
            NodeKind::NativeFunctionDeclaration,
            NodeKind::VariableDeclaration,
            NodeKind::FunctionDeclaration,
            NodeKind::FunctionDeclaration,
            NodeKind::StructDeclaration,
            NodeKind::StructDeclaration,
        ]
    );
}

#[test]
fn full_program_round_trips() {
    let tree = sindarin::parse(PROGRAM);
    let reconstructed: String = tree
        .tokens()
        .iter()
        .map(|t| &PROGRAM[t.span.start..t.span.end])
        .collect();
    assert_eq!(reconstructed, PROGRAM);
}

#[test]
fn struct_members_are_ordered() {
    let tree = sindarin::parse(PROGRAM);
    let point = match tree.children(tree.root())[10].element {
        Element::Node(id) => id,
        Element::Token(_) => unreachable!(),
    };
    assert_eq!(tree.kind(point), NodeKind::StructDeclaration);

    let name = match tree.get_field(point, Field::Name).expect("struct name") {
        Element::Token(id) => tree.token_text(id),
        Element::Node(_) => unreachable!(),
    };
    assert_eq!(name, "Point");

    let body = match tree.get_field(point, Field::Body).expect("struct body") {
        Element::Node(id) => id,
        Element::Token(_) => unreachable!(),
    };
    let member_kinds: Vec<NodeKind> = tree
        .children(body)
        .iter()
        .filter_map(|c| match c.element {
            Element::Node(id) => Some(tree.kind(id)),
            Element::Token(_) => None,
        })
        .collect();
    assert_eq!(
        member_kinds,
        vec![
            NodeKind::FieldDeclaration,
            NodeKind::FieldDeclaration,
            NodeKind::FunctionDeclaration,
            NodeKind::StaticFunctionDeclaration,
        ]
    );
}

#[test]
fn strict_mode_accepts_the_program() {
    assert!(sindarin::parse_strict(PROGRAM, "demo.sn").is_ok());
}

#[test]
fn one_corrupted_statement_does_not_lose_declarations() {
    let corrupted = PROGRAM.replace("var label: str = \"other\"", "var label: = \"other\"");
    let tree = sindarin::parse(&corrupted);
    assert_eq!(tree.diagnostics().len(), 1, "diagnostics: {:?}", tree.diagnostics());
    // All eleven top-level declarations survive
    assert_eq!(top_level_kinds(&tree).len(), 11);
    // Strict mode rejects the same input
    assert!(sindarin::parse_strict(&corrupted, "demo.sn").is_err());
}

#[test]
fn line_and_column_lookup() {
    let tree = sindarin::parse(PROGRAM);
    let main_offset = PROGRAM.find("fn main").expect("fn main in program");
    let (line, column) = tree.line_col(main_offset);
    let expected_line = PROGRAM[..main_offset].matches('\n').count() as u32 + 1;
    assert_eq!((line, column), (expected_line, 1));
}
