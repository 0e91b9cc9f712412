//! Java fixtures for selection tests.
//!
//! Positions in the doc comments are 0-indexed (line, UTF-16 column).

#![allow(dead_code)]

/// A local variable whose initializer is `first + second`.
///
/// The initializer spans (4,27)-(4,41); (4,32) is the space after `first`.
pub const SIMPLE_EXPRESSION: &str = r#"package com.example;

public class SimpleSelectionExpansionTest {
    void greet(String first, String second) {
        String greetings = first + second;
    }
}
"#;

/// A method whose declaration spans (3,4)-(5,5).
///
/// (3,43) is the start of the `count` parameter.
pub const METHOD_BODY: &str = r#"package com.example;

public class MethodBodySelectionExpansionTest {
    public void process(String input, int count) {
        System.out.println(input + count);
    }
}
"#;

/// A try/catch/finally statement spanning (4,8)-(10,9).
///
/// The catch block ends at (8,9); the finally block spans (8,18)-(10,9).
pub const TRY_CATCH_FINALLY: &str = r#"package com.example;

public class TrySelectionExpansionTest {
    public void run() {
        try {
            System.out.println("try");
        } catch (Exception e) {
            e.printStackTrace();
        } finally {
            System.out.println("finally");
        }
    }
}
"#;

/// Two statements on one line with no space between them.
///
/// `first();` spans (4,8)-(4,16) and `second();` spans (4,16)-(4,25).
pub const ADJACENT_STATEMENTS: &str = r#"package com.example;

public class Adjacent {
    void run() {
        first();second();
    }
}
"#;

/// Create a temporary Java file holding `content`.
///
/// Returns the file URI, the content and the temp file guard.
pub fn create_java_file(content: &str) -> (String, String, tempfile::NamedTempFile) {
    let temp_file = tempfile::Builder::new()
        .suffix(".java")
        .tempfile()
        .expect("Failed to create temp file");

    std::fs::write(temp_file.path(), content).expect("Failed to write temp file");

    let uri = url::Url::from_file_path(temp_file.path())
        .expect("Failed to construct file URI from temp file path")
        .to_string();

    (uri, content.to_string(), temp_file)
}
