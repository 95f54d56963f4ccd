//! Integration tests: full snippet files through extraction and validation.

use std::path::Path;

use snipcheck_core::{sort_outcomes, OutcomeError};
use snipcheck_schema::{validate_metadata, Parameter, SnippetChecker};

fn check(text: &str) -> Vec<snipcheck_core::Outcome> {
    SnippetChecker::default().check_source(Path::new("library/snippet.rego"), text)
}

#[test]
fn number_default_mismatch_yields_one_schema_error() {
    let text = "\
# METADATA: library-snippet
# title: \"t\"
# description: \"d\"
# schema:
#   parameters:
#     - name: \"x\"
#       type: \"number\"
#       default: \"not-a-number\"
package x
";
    let outcomes = check(text);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].errors.len(), 1);
    match &outcomes[0].errors[0] {
        OutcomeError::Schema(err) => {
            assert!(err.message.contains("default should be a number"), "{err}");
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn rego_policy_binding_passes() {
    let text = "\
# METADATA: library-snippet
# title: \"t\"
# description: \"d\"
# policy:
#   rule:
#     type: \"rego\"
#     value: \"true\"
";
    let outcomes = check(text);
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].passed(), "{:?}", outcomes[0].errors);
}

#[test]
fn toggle_with_string_value_fails() {
    let text = "\
# METADATA: library-snippet
# title: t
# description: d
# schema:
#   decision:
#     - type: toggle
#       label: L
#       toggles:
#         - key: k
#           value: \"yes\"
";
    let outcomes = check(text);
    assert_eq!(outcomes[0].errors.len(), 1);
}

#[test]
fn block_ends_at_first_non_comment_line() {
    let text = "\
# METADATA: library-snippet
# title: t
# description: d
default allow := false
# schema:
#   parameters: not-a-list
";
    let outcomes = check(text);
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].passed(), "trailing comments must not join the block");
}

#[test]
fn complete_snippet_produces_typed_metadata() {
    let raw = "\
title: Require labels
description: Every workload must carry the listed labels
schema:
  parameters:
    - name: labels
      label: Required labels
      type: object
      required: true
      key:
        placeholder: label name
      value:
        type: set_of_strings
        placeholder: allowed values
      default:
        team: [platform, data]
    - name: source
      type: string
      items:
        query: data.library.teams
        library: teams
  decision:
    - type: toggle
      label: Enforcement
      toggles:
        - key: allowed
          value: false
        - key: monitor
          value: true
    - type: string
      key: message
      value: missing labels
policy:
  rule:
    type: rego
    value: \"{{this}}[decision]\"
";
    let metadata = validate_metadata(raw).unwrap();
    let parameters = metadata.parameters.unwrap();
    assert_eq!(parameters.len(), 2);
    assert!(matches!(parameters[0], Parameter::Object(_)));
    assert_eq!(parameters[0].common().required, Some(true));
    assert_eq!(parameters[1].name(), "source");
    assert_eq!(metadata.decision.unwrap().len(), 2);
    assert_eq!(metadata.policy.unwrap().rule_value, "{{this}}[decision]");
}

#[test]
fn checking_twice_is_idempotent() {
    let text = "\
# METADATA: library-snippet
# title: a
# description: b
allow := true
# METADATA: library-snippet
# title: 1
";
    let mut first = check(text);
    let mut second = check(text);
    sort_outcomes(&mut first);
    sort_outcomes(&mut second);
    assert_eq!(first, second);
}

#[test]
fn infinite_number_default_passes_end_to_end() {
    let text = "\
# METADATA: library-snippet
# title: t
# description: d
# tuning: .nan
# schema:
#   parameters:
#     - name: ceiling
#       type: number
#       default: .inf
";
    let outcomes = check(text);
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].passed(), "{:?}", outcomes[0].errors);
}
