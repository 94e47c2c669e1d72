//! Behavioral properties of the reference rewriter

use rstest::rstest;
use template_linker_rewriter::{rewrite, Rewriter};

fn import_lines(output: &str) -> Vec<&str> {
    output.lines().filter(|line| line.starts_with("import ")).collect()
}

#[rstest]
#[case("")]
#[case("var render = function () { return _c('img', { attrs: { src: \"./a.png\" } }) }")]
#[case("require")]
#[case("require(")]
#[case("require(\"open")]
#[case("require(variable)")]
#[case("_vm.require(\"a\")")]
#[case("requires(\"a\")")]
fn unmatched_input_is_returned_unchanged(#[case] source: &str) {
    assert_eq!(rewrite(source), source);
}

#[test]
fn single_reference_is_hoisted() {
    let output = rewrite(r#"require("a")"#);
    assert_eq!(import_lines(&output), vec![r#"import __$_require_a__ from "a""#]);
    assert!(output.ends_with("\n__$_require_a__"));
}

#[test]
fn identifier_is_stable_across_calls() {
    let source = r#"h(require("./logo.png"))"#;
    assert_eq!(rewrite(source), rewrite(source));
}

#[test]
fn repeated_literal_yields_one_import() {
    let output = rewrite(r#"require("a"); require("a");"#);
    assert_eq!(import_lines(&output).len(), 1);
    assert!(output.ends_with("__$_require_a__; __$_require_a__;"));
}

#[test]
fn distinct_spellings_are_not_merged() {
    let result = Rewriter::new().rewrite_with_bindings(r#"require('a'); require("a");"#);
    assert_eq!(
        import_lines(&result.code),
        vec!["import __$_require_a__ from 'a'", r#"import __$_require_a_2__ from "a""#]
    );
    assert!(result.code.ends_with("__$_require_a__; __$_require_a_2__;"));
}

#[rstest]
#[case(r#"require("a\"b")"#, r#""a\"b""#)]
#[case(r#"require('a\'b')"#, r#"'a\'b'"#)]
#[case(r#"require("a\\b")"#, r#""a\\b""#)]
#[case(r#"require("a\\")"#, r#""a\\""#)]
fn escaped_literals_are_preserved_verbatim(#[case] source: &str, #[case] literal: &str) {
    let result = Rewriter::new().rewrite_with_bindings(source);
    assert_eq!(result.bindings.len(), 1);
    assert_eq!(result.bindings[0].literal, literal);
    assert_eq!(
        import_lines(&result.code),
        vec![format!("import {} from {}", result.bindings[0].identifier, literal)]
    );
    assert!(result.code.ends_with(&result.bindings[0].identifier));
}

#[test]
fn imports_follow_first_seen_order() {
    let output = rewrite(
        r#"require("./c.png"), require("./a.png"), require("./c.png"), require("./b.png"), require("./a.png")"#,
    );
    assert_eq!(
        import_lines(&output),
        vec![
            r#"import __$_require_c_png__ from "./c.png""#,
            r#"import __$_require_a_png__ from "./a.png""#,
            r#"import __$_require_b_png__ from "./b.png""#,
        ]
    );
}

#[rstest]
#[case(r#"require("")"#, r#"import __$_require___ from """#)]
#[case("require('')", "import __$_require___ from ''")]
fn empty_literals_still_bind(#[case] source: &str, #[case] import: &str) {
    let output = rewrite(source);
    assert_eq!(import_lines(&output), vec![import]);
    assert!(output.ends_with("\n__$_require___"));
}

#[test]
fn many_distinct_references() {
    let source: String = (0..200)
        .map(|i| format!("require(\"./img/{}.png\");", i))
        .collect();
    let result = Rewriter::new().rewrite_with_bindings(&source);
    assert_eq!(result.bindings.len(), 200);
    assert!(!result.code.contains("require(\""));
}

#[test]
fn realistic_render_function() {
    let source = concat!(
        "var render = function () {\n",
        "  var _vm = this\n",
        "  var _h = _vm.$createElement\n",
        "  var _c = _vm._self._c || _h\n",
        "  return _c('div', [_c('img', { attrs: { src: require(\"./assets/logo.png\") } }),",
        " _c('img', { attrs: { src: require(\"./assets/logo.png\") } })])\n",
        "}\n",
        "var staticRenderFns = []\n",
        "render._withStripped = true\n",
    );

    let output = rewrite(source);

    assert!(output.starts_with("import __$_require_assets_logo_png__ from \"./assets/logo.png\"\nvar render"));
    assert_eq!(output.matches("src: __$_require_assets_logo_png__").count(), 2);
    assert!(output.ends_with("render._withStripped = true\n"));
}
