//! Shell quoting for logged and wrapped command lines

use crate::common::{Error, Result};

/// Quote a single argument for a POSIX shell
pub fn quote(arg: &str) -> Result<String> {
    shlex::try_quote(arg)
        .map(|quoted| quoted.into_owned())
        .map_err(|e| Error::Quote(format!("{arg:?}: {e}")))
}

/// Join argv into one shell command line
pub fn command_line<S: AsRef<str>>(argv: &[S]) -> Result<String> {
    shlex::try_join(argv.iter().map(|s| s.as_ref())).map_err(|e| Error::Quote(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words_are_untouched() {
        assert_eq!(command_line(&["bash", "-exc", "--compile"]).unwrap(), "bash -exc --compile");
    }

    #[test]
    fn test_json_survives_shell_splitting() {
        let json = r#"{"buildername": "Android Builder (dbg)", "it's": 1}"#;
        let argv = ["host_steps.py", "--factory-properties", json];
        let line = command_line(&argv).unwrap();
        assert_eq!(shlex::split(&line).unwrap(), argv);
    }

    #[test]
    fn test_empty_argument() {
        assert_eq!(quote("").unwrap(), "''");
    }

    #[test]
    fn test_nul_is_rejected() {
        assert!(matches!(quote("a\0b"), Err(Error::Quote(_))));
    }
}
