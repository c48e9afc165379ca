//! `${NAME}` substitution over raw document text.
//!
//! Names run to the first closing brace; there is no nesting and no escape
//! syntax. Rendering is a pure function of the text and the lookup: the
//! first reference the lookup does not define aborts the render with no
//! partial output.

use std::collections::{BTreeMap, HashMap};

use regex_lite::Regex;

use crate::error::ResolveError;

/// Name -> value lookup used to resolve `${NAME}` references.
///
/// Implementations must be pure reads; the renderer never writes back.
pub trait EnvLookup {
    /// The value for `name`, or `None` when it is not defined.
    fn get(&self, name: &str) -> Option<String>;
}

impl EnvLookup for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

impl EnvLookup for BTreeMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        BTreeMap::get(self, name).cloned()
    }
}

/// Lookup backed by the current process environment.
///
/// This is the one impure edge callers may plug in; the renderer itself
/// still performs no I/O and no mutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Replace every `${NAME}` reference in `text` with its looked-up value.
///
/// Matches are resolved in order of appearance; literal text (including a
/// dangling `${` with no closing brace) passes through unchanged. Fails
/// with [`ResolveError::UndefinedVariable`] naming the first reference the
/// lookup does not define.
pub fn render(text: &str, lookup: &impl EnvLookup) -> Result<String, ResolveError> {
    let var_re = Regex::new(r"\$\{([^}]*)\}").unwrap();

    let mut rendered = String::with_capacity(text.len());
    let mut scanned = 0;
    for caps in var_re.captures_iter(text) {
        let matched = caps.get(0).unwrap();
        let name = caps.get(1).unwrap().as_str();

        rendered.push_str(&text[scanned..matched.start()]);
        match lookup.get(name) {
            Some(value) => rendered.push_str(&value),
            None => {
                return Err(ResolveError::UndefinedVariable {
                    name: name.to_string(),
                })
            }
        }
        scanned = matched.end();
    }
    rendered.push_str(&text[scanned..]);

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitutes_in_order() {
        let env = lookup(&[("H", "db"), ("P", "5432")]);
        assert_eq!(render("host=${H}:${P}", &env).unwrap(), "host=db:5432");
    }

    #[test]
    fn test_literal_passthrough() {
        let env = lookup(&[]);
        assert_eq!(render("no variables here", &env).unwrap(), "no variables here");
    }

    #[test]
    fn test_undefined_variable_fails_with_name() {
        let env = lookup(&[]);
        let err = render("x=${MISSING}", &env).unwrap_err();
        match err {
            ResolveError::UndefinedVariable { name } => assert_eq!(name, "MISSING"),
            other => panic!("expected UndefinedVariable, got: {:?}", other),
        }
    }

    #[test]
    fn test_fails_on_first_undefined() {
        let env = lookup(&[("A", "1")]);
        let err = render("${A}${FIRST}${SECOND}", &env).unwrap_err();
        match err {
            ResolveError::UndefinedVariable { name } => assert_eq!(name, "FIRST"),
            other => panic!("expected UndefinedVariable, got: {:?}", other),
        }
    }

    #[test]
    fn test_adjacent_references() {
        let env = lookup(&[("A", "x"), ("B", "y")]);
        assert_eq!(render("${A}${B}", &env).unwrap(), "xy");
    }

    #[test]
    fn test_repeated_reference() {
        let env = lookup(&[("TAG", "v1")]);
        assert_eq!(render("${TAG}-${TAG}", &env).unwrap(), "v1-v1");
    }

    #[test]
    fn test_name_stops_at_first_closing_brace() {
        let env = lookup(&[("H", "db"), ("P", "5432")]);
        // Greedy matching would see one reference named "H}:${P" here.
        assert_eq!(render("${H}:${P}", &env).unwrap(), "db:5432");
    }

    #[test]
    fn test_empty_name_is_a_reference() {
        let env = lookup(&[]);
        let err = render("${}", &env).unwrap_err();
        match err {
            ResolveError::UndefinedVariable { name } => assert_eq!(name, ""),
            other => panic!("expected UndefinedVariable, got: {:?}", other),
        }
        let env = lookup(&[("", "empty")]);
        assert_eq!(render("${}", &env).unwrap(), "empty");
    }

    #[test]
    fn test_unterminated_reference_passes_through() {
        let env = lookup(&[]);
        assert_eq!(render("tail ${OPEN", &env).unwrap(), "tail ${OPEN");
    }

    #[test]
    fn test_empty_value_substitutes() {
        let env = lookup(&[("EMPTY", "")]);
        assert_eq!(render("[${EMPTY}]", &env).unwrap(), "[]");
    }

    #[test]
    fn test_identical_inputs_identical_output() {
        let env = lookup(&[("X", "1")]);
        let a = render("v=${X}", &env).unwrap();
        let b = render("v=${X}", &env).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_process_env_lookup() {
        std::env::set_var("STACKFLOW_RENDER_TEST_VAR", "from-process");
        assert_eq!(
            render("v=${STACKFLOW_RENDER_TEST_VAR}", &ProcessEnv).unwrap(),
            "v=from-process"
        );
        std::env::remove_var("STACKFLOW_RENDER_TEST_VAR");
    }

    #[test]
    fn test_btree_lookup() {
        let mut env = BTreeMap::new();
        env.insert("K".to_string(), "v".to_string());
        assert_eq!(render("${K}", &env).unwrap(), "v");
    }
}
