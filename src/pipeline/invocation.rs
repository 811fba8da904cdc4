//! External command invocations.

use std::collections::BTreeMap;
use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::serde_json::{Map, Value};

use crate::redact::to_redacted_json;

/// A pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Generate the build system with CMake.
    Configure,
    /// Compile with Ninja.
    Build,
    /// Install the build outputs.
    Install,
    /// Run the test suite.
    Test,
    /// Upload coverage results to Coveralls.
    CoverageUpload,
}

impl Step {
    /// Returns the step's name as used in logs and errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Configure => "configure",
            Self::Build => "build",
            Self::Install => "install",
            Self::Test => "test",
            Self::CoverageUpload => "coverage upload",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One external command, with the options it runs under.
///
/// `env` is an overlay applied to this child process only; the parent
/// process environment is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    step: Step,
    program: String,
    args: Vec<String>,
    cwd: Utf8PathBuf,
    env: BTreeMap<String, String>,
}

impl Invocation {
    /// Creates an invocation of `program` for `step`, run in `cwd`.
    pub fn new(step: Step, program: impl Into<String>, cwd: impl Into<Utf8PathBuf>) -> Self {
        Self {
            step,
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            env: BTreeMap::new(),
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds an environment variable to the child's overlay.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// The pipeline step this invocation belongs to.
    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    /// The program to execute.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed after the program name.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Working directory of the child.
    #[must_use]
    pub fn cwd(&self) -> &Utf8Path {
        &self.cwd
    }

    /// Environment overlay for the child.
    #[must_use]
    pub const fn env_overlay(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Full command line (program followed by arguments) as JSON.
    #[must_use]
    pub fn command_json(&self) -> String {
        let argv = std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .map(Value::String)
            .collect();
        to_redacted_json(&Value::Array(argv))
    }

    /// Invocation options (`cwd` and any `env` overlay) as JSON with
    /// secrets redacted.
    #[must_use]
    pub fn options_json(&self) -> String {
        let mut options = Map::new();
        options.insert(String::from("cwd"), Value::String(self.cwd.to_string()));
        if !self.env.is_empty() {
            let env = self
                .env
                .iter()
                .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                .collect();
            options.insert(String::from("env"), Value::Object(env));
        }
        to_redacted_json(&Value::Object(options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn command_json_lists_program_then_arguments() {
        let invocation = Invocation::new(Step::Build, "ninja", "/work/build").arg("-j4");
        assert_eq!(invocation.command_json(), r#"["ninja","-j4"]"#);
    }

    #[rstest]
    fn options_json_omits_empty_env() {
        let invocation = Invocation::new(Step::Test, "ninja", "/work/build").arg("test");
        assert_eq!(invocation.options_json(), r#"{"cwd":"/work/build"}"#);
    }

    #[rstest]
    fn options_json_redacts_token_in_env_overlay() {
        let invocation = Invocation::new(Step::CoverageUpload, "coveralls", "/work/build")
            .env("COVERALLS_REPO_TOKEN", "s3cr3t")
            .env("CI_NAME", "github");

        let options = invocation.options_json();

        assert!(!options.contains("s3cr3t"), "token leaked: {options}");
        assert_eq!(
            options,
            r#"{"cwd":"/work/build","env":{"CI_NAME":"github","COVERALLS_REPO_TOKEN":"***"}}"#
        );
        assert_eq!(
            invocation
                .env_overlay()
                .get("COVERALLS_REPO_TOKEN")
                .map(String::as_str),
            Some("s3cr3t")
        );
    }

    #[rstest]
    #[case(Step::Configure, "configure")]
    #[case(Step::CoverageUpload, "coverage upload")]
    fn step_names(#[case] step: Step, #[case] expected: &str) {
        assert_eq!(step.to_string(), expected);
    }
}
