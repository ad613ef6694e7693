// Shared test helpers for integration tests
#![allow(dead_code)]

use minitest_adapter::core::models::{Position, PositionKind, Tree};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CALC_FILE: &str = "test/calculator_test.rb";
pub const STRING_FILE: &str = "test/string_test.rb";

pub const ADDS_ID: &str = "test/calculator_test.rb::CalculatorTest::test_adds_numbers";
pub const FAILS_ID: &str = "test/calculator_test.rb::CalculatorTest::test_fails";
pub const NEGATIVE_ID: &str = "test/calculator_test.rb::CalculatorTest::handles negative numbers";
pub const NAMESPACE_ID: &str = "test/calculator_test.rb::CalculatorTest";
pub const UPCASE_ID: &str = "test/string_test.rb::test_upcase";

pub fn position(kind: PositionKind, path: &str, name: &str, id: &str) -> Position {
    Position {
        kind,
        path: PathBuf::from(path),
        name: name.to_string(),
        id: id.to_string(),
        range: None,
    }
}

pub fn leaf(kind: PositionKind, path: &str, name: &str, id: &str) -> Tree {
    Tree::new(position(kind, path, name, id))
}

/// A `test/` directory with one namespaced file and one file whose test has
/// no enclosing class.
pub fn sample_tree() -> Tree {
    let calculator = Tree::with_children(
        position(PositionKind::File, CALC_FILE, "calculator_test.rb", CALC_FILE),
        vec![Tree::with_children(
            position(PositionKind::Namespace, CALC_FILE, "CalculatorTest", NAMESPACE_ID),
            vec![
                leaf(PositionKind::Test, CALC_FILE, "test_adds_numbers", ADDS_ID),
                leaf(PositionKind::Test, CALC_FILE, "test_fails", FAILS_ID),
                leaf(
                    PositionKind::Test,
                    CALC_FILE,
                    "\"handles negative numbers\"",
                    NEGATIVE_ID,
                ),
            ],
        )],
    );

    let strings = Tree::with_children(
        position(PositionKind::File, STRING_FILE, "string_test.rb", STRING_FILE),
        vec![leaf(PositionKind::Test, STRING_FILE, "test_upcase", UPCASE_ID)],
    );

    Tree::with_children(
        position(PositionKind::Dir, "test", "test", "test"),
        vec![calculator, strings],
    )
}

/// Verbose Minitest output for a run of `sample_tree`, plus one test the
/// tree does not know about.
pub const SAMPLE_OUTPUT: &str = "Run options: -v --seed 1234

# Running:

CalculatorTest#test_adds_numbers = 0.002 s = .
CalculatorTest#test_fails = 0.001 s = F
CalculatorTest#test_handles_negative_numbers = 0.000 s = S
Minitest::Test#test_upcase = 0.001 s = .
OtherTest#test_unknown = 0.001 s = .

Finished in 0.004512s, 886.5248 runs/s, 664.8936 assertions/s.

  1) Failure:
CalculatorTest#test_fails [test/calculator_test.rb:42]:
Expected: 4
  Actual: 5

  2) Skipped:
CalculatorTest#test_handles_negative_numbers [test/calculator_test.rb:50]:
Not implemented yet

5 runs, 4 assertions, 1 failures, 0 errors, 1 skips
";

/// Output in which every test of `sample_tree` passes.
pub const PASSING_OUTPUT: &str = "CalculatorTest#test_adds_numbers = 0.002 s = .
CalculatorTest#test_fails = 0.001 s = .
CalculatorTest#test_handles_negative_numbers = 0.001 s = .
Minitest::Test#test_upcase = 0.001 s = .

4 runs, 4 assertions, 0 failures, 0 errors, 0 skips
";

/// Writes `sample_tree` as JSON into `dir` and returns its path.
pub fn write_tree(dir: &Path) -> PathBuf {
    let path = dir.join("tree.json");
    let json = serde_json::to_string_pretty(&sample_tree()).expect("tree serializes");
    fs::write(&path, json).expect("Failed to write tree.json");
    path
}

/// Creates a project directory whose test command is a shell script that
/// prints `output` regardless of its arguments.
pub fn setup_fake_project(output: &str) -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let root = temp_dir.path();

    fs::write(root.join("Gemfile"), "source \"https://rubygems.org\"\n").expect("Failed to write Gemfile");
    fs::write(root.join("runner_output.txt"), output).expect("Failed to write runner output");

    let script = root.join("fake_runner.sh");
    fs::write(&script, format!("cat '{}'\n", root.join("runner_output.txt").display()))
        .expect("Failed to write fake runner");

    let config = format!(
        "language = \"en\"\ntest_command = \"sh '{}'\"\n",
        script.display()
    );
    fs::write(root.join("Minitest.toml"), config).expect("Failed to write Minitest.toml");

    write_tree(root);
    temp_dir
}
