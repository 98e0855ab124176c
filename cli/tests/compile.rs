//! End-to-end scenarios from the compiler's external spec, driven
//! through the `gengarc` binary rather than the library API.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn gengarc() -> Command {
    Command::cargo_bin("gengarc").unwrap()
}

fn write_source(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn empty_main_emits_prelude_and_iife() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "empty.gengar", "main() { }");

    gengarc().arg(&input).assert().success();

    let code = fs::read_to_string(input.with_extension("js")).unwrap();
    assert!(code.contains("function print(...args){\n  console.log(...args);\n}\n"));
    assert!(code.contains(";(function()"));
}

#[test]
fn const_with_string_and_call_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(
        &dir,
        "greet.gengar",
        "main() {\n  const msg: string = \"hi\";\n  print(msg);\n}\n",
    );

    gengarc().arg(&input).assert().success();

    let code = fs::read_to_string(input.with_extension("js")).unwrap();
    assert!(code.contains("const msg=\"hi\";"));
    assert!(code.contains("print(msg);"));
}

#[test]
fn if_else_if_else_chain_has_three_returns() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(
        &dir,
        "branch.gengar",
        "main() {\n  if (x) { return 1; } else if (y) { return 2; } else { return 3; }\n}\n",
    );

    gengarc().arg(&input).assert().success();

    let code = fs::read_to_string(input.with_extension("js")).unwrap();
    assert_eq!(code.matches("return").count(), 3);
    assert!(code.contains("if(x)"));
}

#[test]
fn while_loop_with_assignment_and_binary_expression() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "loop.gengar", "main() { mut i: number = 0; while (i) { i = i + 1; } }");

    gengarc().arg(&input).assert().success();

    let code = fs::read_to_string(input.with_extension("js")).unwrap();
    assert!(code.contains("let i=0;"));
    assert!(code.contains("while(i)"));
    assert!(code.contains("i = i + 1"));
}

#[test]
fn member_call_preserves_dotted_chain() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "member.gengar", "main() { const s: string = foo.bar.baz(x); }");

    gengarc().arg(&input).assert().success();

    let code = fs::read_to_string(input.with_extension("js")).unwrap();
    assert!(code.contains("foo.bar.baz(x)"));
}

#[test]
fn writes_source_map_and_appends_sourcemap_comment() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "hello.gengar", "main() { print(\"hi\"); }");

    gengarc().arg(&input).assert().success();

    let js_path = input.with_extension("js");
    let map_path = input.with_extension("js.map");
    assert!(map_path.exists());
    let code = fs::read_to_string(js_path).unwrap();
    assert!(code.contains("//# sourceMappingURL=hello.js.map"));
}

#[test]
fn no_source_map_flag_skips_the_map_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "hello.gengar", "main() { print(\"hi\"); }");

    gengarc().arg(&input).arg("--no-source-map").assert().success();

    assert!(!input.with_extension("js.map").exists());
}

#[test]
fn syntax_error_exits_non_zero_with_message_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "broken.gengar", "main( { }");

    gengarc()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn missing_file_exits_non_zero() {
    gengarc().arg("does/not/exist.gengar").assert().failure();
}
