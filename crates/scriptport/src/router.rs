//! Classification of dequeued payloads into executable directives.

use camino::{Utf8Path, Utf8PathBuf};
use strum::{Display, EnumString};

/// Scripting languages the directive grammar accepts, in priority order.
///
/// The declaration order matters: the first language matching the payload
/// wins, so `Python | code` never shadows `PythonScript | code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum ScriptLanguage {
    /// Microsoft VBScript.
    #[strum(serialize = "VBScript")]
    VbScript,
    /// Microsoft JScript.
    #[strum(serialize = "JScript")]
    JScript,
    /// Python driven by the host's embedded interpreter.
    #[strum(serialize = "Python")]
    Python,
    /// The host's dedicated Python scripting engine.
    #[strum(serialize = "PythonScript")]
    PythonScript,
    /// Perl driven by the host's scripting engine.
    #[strum(serialize = "PerlScript")]
    PerlScript,
}

impl ScriptLanguage {
    /// All supported languages, in matching priority order.
    pub const PRIORITY: [Self; 5] = [
        Self::VbScript,
        Self::JScript,
        Self::Python,
        Self::PythonScript,
        Self::PerlScript,
    ];

    /// Canonical name used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VbScript => "VBScript",
            Self::JScript => "JScript",
            Self::Python => "Python",
            Self::PythonScript => "PythonScript",
            Self::PerlScript => "PerlScript",
        }
    }
}

/// Executable instruction derived from one dequeued payload.
///
/// Directives are transient: they live for a single tick iteration and are
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptDirective {
    /// Payload named an existing filesystem path; run it as a script file.
    FilePath(Utf8PathBuf),
    /// Payload matched `LANGUAGE | CODE`; run the code under the language.
    LanguageCode {
        /// Language the code portion runs under.
        language: ScriptLanguage,
        /// Code portion, trimmed of surrounding whitespace.
        code: String,
    },
}

/// Classifies a payload as a directive, or `None` when it is unroutable.
///
/// An existing filesystem path wins over the language grammar, even when
/// the payload would also parse as `LANGUAGE | CODE`.
#[must_use]
pub fn classify(payload: &str) -> Option<ScriptDirective> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return None;
    }
    if Utf8Path::new(trimmed).exists() {
        return Some(ScriptDirective::FilePath(Utf8PathBuf::from(trimmed)));
    }
    for language in ScriptLanguage::PRIORITY {
        if let Some(rest) = trimmed.strip_prefix(language.as_str())
            && let Some(code) = rest.trim_start().strip_prefix('|')
        {
            return Some(ScriptDirective::LanguageCode {
                language,
                code: code.trim().to_string(),
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn routes_language_directive() {
        let directive = classify("JScript | LogMessage(\"Pouet\")").expect("directive");
        assert_eq!(
            directive,
            ScriptDirective::LanguageCode {
                language: ScriptLanguage::JScript,
                code: "LogMessage(\"Pouet\")".to_string(),
            }
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let directive = classify("  Python  |  print(1)  ").expect("directive");
        assert_eq!(
            directive,
            ScriptDirective::LanguageCode {
                language: ScriptLanguage::Python,
                code: "print(1)".to_string(),
            }
        );
    }

    #[test]
    fn python_prefix_does_not_shadow_python_script() {
        let directive = classify("PythonScript | run()").expect("directive");
        assert!(matches!(
            directive,
            ScriptDirective::LanguageCode {
                language: ScriptLanguage::PythonScript,
                ..
            }
        ));
    }

    #[test]
    fn existing_path_wins_over_language_grammar() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("JScript | trap.js");
        std::fs::write(&path, b"// not code to route").expect("write file");
        let payload = path.to_str().expect("utf8 path");

        let directive = classify(payload).expect("directive");
        assert_eq!(
            directive,
            ScriptDirective::FilePath(Utf8PathBuf::from(payload))
        );
    }

    #[test]
    fn existing_path_with_surrounding_whitespace_is_routed() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("script.py");
        std::fs::write(&path, b"print(1)").expect("write file");
        let payload = format!("  {}  ", path.display());

        let directive = classify(&payload).expect("directive");
        assert!(matches!(directive, ScriptDirective::FilePath(_)));
    }

    #[rstest]
    #[case::unsupported_language("not a path | nonsense")]
    #[case::missing_pipe("JScript LogMessage()")]
    #[case::empty("")]
    #[case::whitespace_only("   \n  ")]
    #[case::missing_file("/definitely/not/a/real/path.py")]
    fn unroutable_payloads_classify_as_none(#[case] payload: &str) {
        assert_eq!(classify(payload), None);
    }
}
