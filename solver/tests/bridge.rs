use tasolver::{
    BridgeError, ExecError, ModelValue, SolveResult, check_satisfiable, run_script,
    simplify_formula,
};

const SAT_SCRIPT: &str = r#"[
  {"declare": {"name": "x", "sort": "int"}},
  {"assert": {"and": [
    {"eq": [{"var": "x"}, {"int": 4}]},
    {"gt": [{"var": "x"}, {"int": 3}]}
  ]}},
  "check"
]"#;

const UNSAT_SCRIPT: &str = r#"[
  {"declare": {"name": "x", "sort": "int"}},
  {"assert": {"eq": [{"var": "x"}, {"int": 2}]}},
  {"assert": {"gt": [{"var": "x"}, {"int": 3}]}},
  "check"
]"#;

#[test]
fn satisfiable_state_answers_true() {
    assert!(check_satisfiable(SAT_SCRIPT.as_bytes()).unwrap());
}

#[test]
fn satisfiable_check_exposes_a_model() {
    match run_script(SAT_SCRIPT.as_bytes()).unwrap() {
        SolveResult::Sat(model) => assert_eq!(model.get("x"), Some(&ModelValue::Int(4))),
        other => panic!("expected a satisfiable outcome, got {:?}", other),
    }
}

#[test]
fn unsatisfiable_state_answers_false() {
    assert!(!check_satisfiable(UNSAT_SCRIPT.as_bytes()).unwrap());
    assert!(matches!(
        run_script(UNSAT_SCRIPT.as_bytes()).unwrap(),
        SolveResult::Unsat
    ));
}

// The boolean boundary cannot distinguish "no solution exists" from "the
// solver gave up"; both must read as not-satisfiable.
#[test]
fn verdicts_other_than_sat_collapse_to_false() {
    assert!(!SolveResult::<()>::Unsat.is_sat());
    assert!(!SolveResult::<()>::Unknown.is_sat());
    assert!(SolveResult::Sat(()).is_sat());
}

#[test]
fn non_utf8_input_is_a_decode_error() {
    let err = check_satisfiable(&[0x80, 0xff, 0x00]).unwrap_err();
    assert!(matches!(err, BridgeError::Decode(_)));
}

#[test]
fn malformed_scripts_fail_during_evaluation() {
    let err = check_satisfiable(b"[{\"declare\":").unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Execution(ExecError::Syntax(_))
    ));
}

#[test]
fn scripts_without_a_check_record_no_verdict() {
    let script = r#"[
      {"declare": {"name": "x", "sort": "int"}},
      {"assert": {"gt": [{"var": "x"}, {"int": 3}]}}
    ]"#;
    assert!(matches!(
        run_script(script.as_bytes()).unwrap_err(),
        BridgeError::MissingVerdict
    ));
}

#[test]
fn unknown_variables_propagate_to_the_host() {
    let script = r#"[
      {"assert": {"gt": [{"var": "y"}, {"int": 3}]}},
      "check"
    ]"#;
    let err = run_script(script.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Execution(ExecError::UnknownVariable(name)) if name == "y"
    ));
}

#[test]
fn later_checks_overwrite_earlier_verdicts() {
    let script = r#"[
      {"declare": {"name": "x", "sort": "int"}},
      {"assert": {"gt": [{"var": "x"}, {"int": 3}]}},
      "check",
      {"assert": {"lt": [{"var": "x"}, {"int": 2}]}},
      "check"
    ]"#;
    assert!(!check_satisfiable(script.as_bytes()).unwrap());
}

#[test]
fn quantified_scripts_build_and_solve() {
    let script = r#"[
      {"declare": {"name": "t", "sort": "real"}},
      {"assert": {"gt": [{"var": "t"}, {"real": {"num": 0, "den": 1}}]}},
      {"assert": {"exists": {
        "bound": [{"name": "u", "sort": "real"}],
        "body": {"and": [
          {"le": [{"real": {"num": 0, "den": 1}}, {"var": "u"}]},
          {"lt": [{"var": "u"}, {"var": "t"}]}
        ]}
      }}},
      "check"
    ]"#;
    assert!(check_satisfiable(script.as_bytes()).unwrap());
}

#[test]
fn constant_formulas_simplify_to_their_truth_value() {
    let script = r#"[
      {"assert": {"eq": [{"int": 2}, {"add": [{"int": 1}, {"int": 1}]}]}}
    ]"#;
    assert_eq!(simplify_formula(script.as_bytes()).unwrap(), "true");
}

#[test]
fn empty_scripts_simplify_to_true() {
    assert_eq!(simplify_formula(b"[]").unwrap(), "true");
}
