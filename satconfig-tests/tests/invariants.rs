//! Direct checks of the testable properties of `spec.md` §8 that the scenario table
//! doesn't already exercise end to end.

use satconfig_core::{bool_expr, sat_engine::SatResult, tseitin, SatEngine};
use satconfig_kconfig::Tri;
use satconfig_tests::{solve, solve_with_overlay, value_of};

#[test]
fn assumption_fidelity_across_all_three_tristate_preferences() {
    let source = r#"
        config MODULES
            bool
            default y

        config D
            tristate "d"
            depends on MODULES
    "#;

    let n = solve_with_overlay(source, "CONFIG_D=n\n").unwrap();
    assert_eq!(value_of(&n, "D"), Tri::No);

    let m = solve_with_overlay(source, "CONFIG_D=m\n").unwrap();
    assert_eq!(value_of(&m, "D"), Tri::Mod);

    let y = solve_with_overlay(source, "CONFIG_D=y\n").unwrap();
    assert_eq!(value_of(&y, "D"), Tri::Yes);
}

#[test]
fn default_idempotence_reparsing_the_written_config_reproduces_the_assignment() {
    let source = r#"
        config MODULES
            bool
            default y

        config D
            tristate "d"
            depends on MODULES
    "#;

    let first = solve_with_overlay(source, "CONFIG_D=m\n").unwrap();

    let path = std::env::temp_dir().join(format!("satconfig-idempotence-{}.config", std::process::id()));
    satconfig_kconfig::conf_write(&first, &path).unwrap();
    let rendered = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let second = solve_with_overlay(source, &rendered).unwrap();

    assert_eq!(value_of(&first, "MODULES"), value_of(&second, "MODULES"));
    assert_eq!(value_of(&first, "D"), value_of(&second, "D"));
}

#[test]
fn tseitin_and_gate_matches_its_truth_table() {
    let mut engine = SatEngine::new(false);
    let true_var = engine.new_var();
    engine.add_unit_clause(true_var as i32, "true_var");

    let a = engine.new_var();
    let b = engine.new_var();
    let expr = bool_expr::and(&bool_expr::var(a), &bool_expr::var(b));
    let root = tseitin::encode(&mut engine, &expr, "a & b", true_var);

    // Force a = true, b = false: AND must come out false.
    engine.assume(a as i32);
    engine.assume(-(b as i32));
    assert_eq!(engine.solve(), SatResult::Sat);
    assert_eq!(engine.deref(root.unsigned_abs()), if root > 0 { -1 } else { 1 });
}

#[test]
fn tseitin_or_gate_matches_its_truth_table() {
    let mut engine = SatEngine::new(false);
    let true_var = engine.new_var();
    engine.add_unit_clause(true_var as i32, "true_var");

    let a = engine.new_var();
    let b = engine.new_var();
    let expr = bool_expr::or(&bool_expr::var(a), &bool_expr::var(b));
    let root = tseitin::encode(&mut engine, &expr, "a | b", true_var);

    // Force both false: OR must come out false.
    engine.assume(-(a as i32));
    engine.assume(-(b as i32));
    assert_eq!(engine.solve(), SatResult::Sat);
    assert_eq!(engine.deref(root.unsigned_abs()), if root > 0 { -1 } else { 1 });
}

#[test]
fn select_does_not_leave_mutual_exclusion_satisfiable_both_ways() {
    let source = r#"
        choice
            prompt "pick"

            config A
                bool "A"

            config B
                bool "B"
        endchoice
    "#;
    let table = solve_with_overlay(source, "CONFIG_B=y\n").unwrap();
    assert_eq!(value_of(&table, "B"), Tri::Yes);
    assert_eq!(value_of(&table, "A"), Tri::No);
}

#[test]
fn base_theory_without_any_preferences_is_consistent() {
    assert!(solve("config A\n    bool\n").is_ok());
}

#[test]
fn depends_on_m_restricts_a_tristate_symbol_to_n_or_m() {
    let source = r#"
        config L
            tristate "l"
            depends on m
    "#;

    let as_mod = solve_with_overlay(source, "CONFIG_L=m\n").expect("L=m satisfies 'depends on m'");
    assert_eq!(value_of(&as_mod, "L"), Tri::Mod);

    let as_yes = solve_with_overlay(source, "CONFIG_L=y\n");
    assert!(
        as_yes.is_err(),
        "'depends on m' forces sym_y(L) -> sym_m(L), so L=y alone should be unsatisfiable"
    );
}
