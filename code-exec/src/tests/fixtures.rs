/// Programs that run to completion
pub mod code_samples {
    pub const PYTHON_HELLO: &str = r#"print("hello")"#;

    pub const PYTHON_MULTILINE: &str = r#"def factorial(n):
    if n <= 1:
        return 1
    return n * factorial(n - 1)

result = factorial(5)
print(f"Factorial of 5 is {result}")"#;

    pub const PYTHON_SILENT: &str = r#"x = 40 + 2"#;

    pub const PYTHON_UNICODE: &str = r#"print("héllo wörld ✓")"#;
}

/// Programs that raise or otherwise fail
pub mod failing_code {
    pub const PYTHON_ZERO_DIVISION: &str = r#"print(1/0)"#;

    pub const PYTHON_NAME_ERROR: &str = r#"a = 1
b = 2
print(a + c)"#;

    pub const PYTHON_SYNTAX_ERROR: &str = r#"def broken(:
    pass"#;

    pub const PYTHON_PARTIAL_OUTPUT: &str = r#"print("before")
raise ValueError("boom")"#;

    pub const PYTHON_EXIT_CODE: &str = r#"import sys
sys.exit(3)"#;

    pub const PYTHON_STDERR_THEN_RAISE: &str = r#"import sys
sys.stderr.write("noise\n")
1/0"#;
}

/// Programs that probe isolation and limits
pub mod test_scenarios {
    pub const PYTHON_SLEEP: &str = r#"import time
time.sleep(30)
print("should not print")"#;

    pub const PYTHON_READS_STDIN: &str = r#"print(input())"#;

    pub const PYTHON_LEAKS_GLOBAL: &str = r#"leaked = "from a previous run""#;

    pub const PYTHON_USES_GLOBAL: &str = r#"print(leaked)"#;

    pub const PYTHON_ENV_PROBE: &str = r#"import os
print(os.environ.get("GEMINI_API_KEY", "absent"))"#;

    pub const PYTHON_BACKGROUND_CHILD: &str = r#"import subprocess
child = subprocess.Popen(["sleep", "30"])
print(child.pid)"#;

    pub const PYTHON_MEMORY_HOG: &str = r#"data = bytearray(1024 * 1024 * 1024)
print(len(data))"#;
}
