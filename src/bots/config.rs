//! Bot configuration records

use serde::Serialize;
use std::collections::BTreeMap;

/// Steps and properties a bot runs with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotConfig {
    /// Unique bot identifier
    pub bot_id: String,
    /// Flags for the host step driver; no host step when empty
    pub host_opts: Vec<String>,
    /// Device tests to run, if any
    pub test_spec: Option<TestSpec>,
    /// Slave properties overriding the process-wide defaults
    pub slave_props: BTreeMap<String, String>,
}

/// Device test suites and the extra flags passed along with them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestSpec {
    /// Suite names, run in declaration order
    pub tests: Vec<String>,
    /// Extra flags appended after the suites
    pub extra_args: Vec<String>,
}

impl BotConfig {
    pub fn new<S: AsRef<str>>(bot_id: &str, host_opts: &[S]) -> Self {
        Self {
            bot_id: bot_id.to_string(),
            host_opts: host_opts.iter().map(|s| s.as_ref().to_string()).collect(),
            test_spec: None,
            slave_props: BTreeMap::new(),
        }
    }

    /// Attach a test spec
    pub fn with_tests(mut self, test_spec: TestSpec) -> Self {
        self.test_spec = Some(test_spec);
        self
    }

    /// Add a per-bot slave property
    pub fn with_slave_prop(mut self, key: &str, value: &str) -> Self {
        self.slave_props.insert(key.to_string(), value.to_string());
        self
    }

    /// Copy of this config under another id
    pub fn renamed(&self, bot_id: &str) -> Self {
        Self {
            bot_id: bot_id.to_string(),
            ..self.clone()
        }
    }

    /// Try-bots verify speculative changes and must not publish results
    pub fn is_try_bot(&self) -> bool {
        self.bot_id.starts_with("try")
    }

    /// Drop every occurrence of `flag` from the test extra args
    pub fn strip_test_arg(&mut self, flag: &str) {
        if let Some(spec) = self.test_spec.as_mut() {
            spec.extra_args.retain(|arg| arg != flag);
        }
    }
}

impl TestSpec {
    pub fn new<S: AsRef<str>>(tests: &[S]) -> Self {
        Self {
            tests: tests.iter().map(|s| s.as_ref().to_string()).collect(),
            extra_args: Vec::new(),
        }
    }

    pub fn with_args<S: AsRef<str>>(mut self, extra_args: &[S]) -> Self {
        self.extra_args = extra_args.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renamed_keeps_everything_but_id() {
        let original = BotConfig::new("main-tests", &["--extract-build"])
            .with_tests(TestSpec::new(&["ui", "unit"]).with_args(&["--asan"]))
            .with_slave_prop("extra_gyp_defines", "asan=1");
        let copy = original.renamed("try-tests");

        assert_eq!(copy.bot_id, "try-tests");
        assert_eq!(copy.host_opts, original.host_opts);
        assert_eq!(copy.test_spec, original.test_spec);
        assert_eq!(copy.slave_props, original.slave_props);
    }

    #[test]
    fn test_strip_test_arg_leaves_source_untouched() {
        let original = BotConfig::new("main-tests", &["--extract-build"])
            .with_tests(TestSpec::new(&["ui"]).with_args(&["--experimental", "--upload"]));
        let mut copy = original.renamed("try-tests");
        copy.strip_test_arg("--upload");

        assert_eq!(copy.test_spec.unwrap().extra_args, vec!["--experimental"]);
        assert_eq!(
            original.test_spec.unwrap().extra_args,
            vec!["--experimental", "--upload"]
        );
    }

    #[test]
    fn test_strip_without_test_spec_is_noop() {
        let mut config = BotConfig::new("try-builder-rel", &["--compile"]);
        config.strip_test_arg("--upload");
        assert!(config.test_spec.is_none());
    }

    #[test]
    fn test_is_try_bot() {
        assert!(BotConfig::new::<&str>("try-fyi-tests", &[]).is_try_bot());
        assert!(!BotConfig::new::<&str>("lkgr-clobber", &[]).is_try_bot());
        assert!(!BotConfig::new::<&str>("main-try", &[]).is_try_bot());
    }
}
