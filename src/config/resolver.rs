//! Placeholder resolution over a composed configuration
//!
//! Every leaf of the configuration is addressable by its dotted path, rooted
//! at `this` (`this.server.port`). String leaves may embed `${name}`
//! placeholders naming either such a path or a runtime seed (`mode`, `cwd`,
//! `exe_dir`).
//!
//! Resolution runs in two passes:
//!
//! 1. A depth-first walk copies every placeholder-free leaf into the variable
//!    table and records each placeholder-bearing string as a pending item.
//! 2. Each pending item is substituted against the table built by the walk,
//!    then written back into the owned mapping by path.
//!
//! Because pending items only read walk-time variables, the outcome does not
//! depend on key order, and a placeholder pointing at another pending item is
//! an unsatisfied dependency.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::runtime::RuntimeContext;
use super::value::{Mapping, Value};
use crate::error::{MarketError, MarketResult};

/// Path segment naming the root of the configuration
pub const ROOT: &str = "this";

/// Flat table of resolved variables keyed by dotted path
pub type Variables = BTreeMap<String, Value>;

/// A configuration with every placeholder substituted
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub mapping: Mapping,
    pub variables: Variables,
}

/// A string leaf waiting for its dependencies
#[derive(Debug)]
struct Pending {
    segments: Vec<String>,
    variable: String,
    dependencies: BTreeSet<String>,
    template: String,
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([a-z0-9_.]+)\}").expect("placeholder pattern is valid"))
}

/// Names referenced by `${...}` placeholders in `text`
pub fn placeholders(text: &str) -> BTreeSet<String> {
    placeholder_pattern()
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Resolve every placeholder in `mapping`
///
/// # Errors
///
/// [`MarketError::AmbiguousStructure`] for empty keys or keys containing `.`,
/// [`MarketError::UnsatisfiedDependency`] when a placeholder names a variable
/// that is not in the table after the walk.
pub fn resolve(mut mapping: Mapping, runtime: &RuntimeContext) -> MarketResult<Resolved> {
    let mut variables = runtime.seed();
    let mut pending = Vec::new();
    collect(&mapping, &mut Vec::new(), &mut variables, &mut pending)?;

    tracing::debug!(
        resolved = variables.len(),
        pending = pending.len(),
        "Collected configuration variables"
    );

    let mut substituted = Vec::with_capacity(pending.len());
    for item in &pending {
        if let Some(missing) = item.dependencies.iter().find(|d| !variables.contains_key(*d)) {
            return Err(MarketError::UnsatisfiedDependency {
                dependency: missing.clone(),
                variable: item.variable.clone(),
            });
        }

        let value = placeholder_pattern()
            .replace_all(&item.template, |caps: &Captures| {
                variables
                    .get(&caps[1])
                    .map(ToString::to_string)
                    .unwrap_or_default()
            })
            .into_owned();
        substituted.push(value);
    }

    for (item, value) in pending.into_iter().zip(substituted) {
        tracing::trace!(variable = %item.variable, value = %value, "Resolved placeholder");
        set_at_path(&mut mapping, &item.segments, Value::from(value.clone()))?;
        variables.insert(item.variable, Value::from(value));
    }

    Ok(Resolved { mapping, variables })
}

fn collect(
    mapping: &Mapping,
    segments: &mut Vec<String>,
    variables: &mut Variables,
    pending: &mut Vec<Pending>,
) -> MarketResult<()> {
    for (key, value) in mapping {
        segments.push(key.clone());
        let variable = dotted(segments);

        if key.is_empty() || key.contains('.') {
            return Err(MarketError::AmbiguousStructure { path: variable });
        }

        match value {
            Value::Mapping(nested) => collect(nested, segments, variables, pending)?,
            Value::String(text) => {
                let dependencies = placeholders(text);
                if dependencies.is_empty() {
                    variables.insert(variable, value.clone());
                } else {
                    pending.push(Pending {
                        segments: segments.clone(),
                        variable,
                        dependencies,
                        template: text.clone(),
                    });
                }
            }
            Value::Boolean(_) | Value::Number(_) => {
                variables.insert(variable, value.clone());
            }
        }

        segments.pop();
    }
    Ok(())
}

fn dotted(segments: &[String]) -> String {
    let mut path = String::from(ROOT);
    for segment in segments {
        path.push('.');
        path.push_str(segment);
    }
    path
}

/// Replace the value stored at `segments`, which must already exist
pub fn set_at_path(mapping: &mut Mapping, segments: &[String], value: Value) -> MarketResult<()> {
    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| MarketError::Config("Cannot set a value at an empty path".into()))?;

    let mut current = mapping;
    for segment in parents {
        current = match current.get_mut(segment) {
            Some(Value::Mapping(nested)) => nested,
            _ => {
                return Err(MarketError::Config(format!(
                    "No mapping at `{}` while writing `{}`",
                    segment,
                    dotted(segments)
                )))
            }
        };
    }

    match current.get_mut(last) {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => Err(MarketError::Config(format!(
            "No value at `{}`",
            dotted(segments)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn runtime(mode: &str) -> RuntimeContext {
        RuntimeContext::new(mode, "/work", "/opt/market/bin")
    }

    #[test]
    fn test_placeholder_resolution() {
        let m = mapping("host: local\nurl: \"http://${this.host}\"\n");
        let resolved = resolve(m, &runtime("dev")).unwrap();

        assert_eq!(resolved.mapping["url"], Value::from("http://local"));
        assert_eq!(resolved.variables["this.url"], Value::from("http://local"));
    }

    #[test]
    fn test_unsatisfied_dependency() {
        let m = mapping("url: \"${nope.value}/x\"\n");
        match resolve(m, &runtime("dev")) {
            Err(MarketError::UnsatisfiedDependency { dependency, variable }) => {
                assert_eq!(dependency, "nope.value");
                assert_eq!(variable, "this.url");
            }
            other => panic!("expected UnsatisfiedDependency, got {:?}", other),
        }
    }

    #[test]
    fn test_runtime_seeds() {
        let m = mapping("mode_name: \"${mode}\"\nstate: \"${cwd}/var/state.json\"\nbin: \"${exe_dir}\"\n");
        let resolved = resolve(m, &runtime("prod")).unwrap();

        assert_eq!(resolved.mapping["mode_name"], Value::from("prod"));
        assert_eq!(resolved.mapping["state"], Value::from("/work/var/state.json"));
        assert_eq!(resolved.mapping["bin"], Value::from("/opt/market/bin"));
    }

    #[test]
    fn test_nested_paths_and_scalars() {
        let m = mapping(
            "server:\n  host: example.org\n  port: 8080\n  tls: true\nendpoint: \"${this.server.host}:${this.server.port} tls=${this.server.tls}\"\n",
        );
        let resolved = resolve(m, &runtime("dev")).unwrap();

        assert_eq!(
            resolved.mapping["endpoint"],
            Value::from("example.org:8080 tls=true")
        );
        // Non-string scalars stay typed in place
        let server = resolved.mapping["server"].as_mapping().unwrap();
        assert_eq!(server["port"], Value::from(8080i64));
        assert_eq!(resolved.variables["this.server.port"], Value::from(8080i64));
        // Mappings are not variables
        assert!(!resolved.variables.contains_key("this.server"));
    }

    #[test]
    fn test_numbers_substitute_without_loss() {
        let m = mapping("max: 18446744073709551615\nratio: 1.0\ntext: \"${this.max} ${this.ratio}\"\n");
        let resolved = resolve(m, &runtime("dev")).unwrap();
        assert_eq!(
            resolved.mapping["text"],
            Value::from("18446744073709551615 1.0")
        );
    }

    #[test]
    fn test_placeholder_inside_nested_leaf() {
        let m = mapping("name: market\npaths:\n  log: \"/var/log/${this.name}/${mode}.log\"\n");
        let resolved = resolve(m, &runtime("dev")).unwrap();

        let paths = resolved.mapping["paths"].as_mapping().unwrap();
        assert_eq!(paths["log"], Value::from("/var/log/market/dev.log"));
    }

    #[test]
    fn test_resolution_independent_of_key_order() {
        // `a_url` sorts before the `z_host` it references
        let m = mapping("a_url: \"http://${this.z_host}\"\nz_host: far\n");
        let resolved = resolve(m, &runtime("dev")).unwrap();
        assert_eq!(resolved.mapping["a_url"], Value::from("http://far"));
    }

    #[test]
    fn test_repeated_placeholder() {
        let m = mapping("x: ab\ny: \"${this.x}-${this.x}\"\n");
        let resolved = resolve(m, &runtime("dev")).unwrap();
        assert_eq!(resolved.mapping["y"], Value::from("ab-ab"));
    }

    #[test]
    fn test_chained_placeholder_is_unsatisfied() {
        let m = mapping("a: base\nb: \"${this.a}/b\"\nc: \"${this.b}/c\"\n");
        match resolve(m, &runtime("dev")) {
            Err(MarketError::UnsatisfiedDependency { dependency, variable }) => {
                assert_eq!(dependency, "this.b");
                assert_eq!(variable, "this.c");
            }
            other => panic!("expected UnsatisfiedDependency, got {:?}", other),
        }
    }

    #[test]
    fn test_mapping_reference_is_unsatisfied() {
        let m = mapping("server:\n  host: h\ncopy: \"${this.server}\"\n");
        assert!(matches!(
            resolve(m, &runtime("dev")),
            Err(MarketError::UnsatisfiedDependency { .. })
        ));
    }

    #[test]
    fn test_non_matching_text_left_verbatim() {
        let m = mapping("a: \"${HOME} and $mode and ${}\"\n");
        let resolved = resolve(m, &runtime("dev")).unwrap();
        assert_eq!(resolved.mapping["a"], Value::from("${HOME} and $mode and ${}"));
    }

    #[test]
    fn test_dotted_key_is_ambiguous() {
        let m = mapping("server:\n  \"a.b\": 1\n");
        match resolve(m, &runtime("dev")) {
            Err(MarketError::AmbiguousStructure { path }) => assert_eq!(path, "this.server.a.b"),
            other => panic!("expected AmbiguousStructure, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_key_is_ambiguous() {
        let m = mapping("\"\": 1\n");
        assert!(matches!(
            resolve(m, &runtime("dev")),
            Err(MarketError::AmbiguousStructure { .. })
        ));
    }

    #[test]
    fn test_placeholders_extraction() {
        let deps = placeholders("${a.b} ${c_1} ${a.b} ${Upper}");
        assert_eq!(deps.len(), 2);
        assert!(deps.contains("a.b"));
        assert!(deps.contains("c_1"));
    }

    #[test]
    fn test_set_at_path() {
        let mut m = mapping("a:\n  b: 1\n");
        set_at_path(&mut m, &["a".to_string(), "b".to_string()], Value::from("two")).unwrap();
        assert_eq!(m["a"].as_mapping().unwrap()["b"], Value::from("two"));

        assert!(set_at_path(&mut m, &["a".to_string(), "zz".to_string()], Value::from(1i64)).is_err());
        assert!(set_at_path(&mut m, &[], Value::from(1i64)).is_err());
    }
}
