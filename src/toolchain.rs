//! Toolchain identification-output parsing.
//!
//! The wizard layer probes candidate cross-compilers by running them with
//! `-v` and hands the captured output here. Only the text parsing lives in
//! the core; spawning the compiler is the caller's business.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Fields recognized in `gcc -v` style output. Every field is optional:
/// a truncated or exotic output yields whatever was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToolchainInfo {
    pub target: Option<String>,
    pub version: Option<String>,
    pub build: Option<String>,
    pub configured: Option<String>,
    pub thread_model: Option<String>,
}

static TARGET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^Target: (.*)$").unwrap());
static VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gcc version ([0-9][0-9.]*)").unwrap());
static BUILD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gcc version [0-9][0-9.]* \(([^)]*)\)").unwrap());
static CONFIGURED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Configured with: (.*)$").unwrap());
static THREAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Thread model: (.*)$").unwrap());

/// Extract toolchain identity from verbose compiler output.
pub fn parse_toolchain_info(output: &str) -> ToolchainInfo {
    let grab = |re: &Regex| {
        re.captures(output)
            .map(|caps| caps[1].trim().to_string())
    };
    ToolchainInfo {
        target: grab(&TARGET),
        version: grab(&VERSION),
        build: grab(&BUILD),
        configured: grab(&CONFIGURED),
        thread_model: grab(&THREAD),
    }
}
