//! The end-to-end scenarios of `spec.md` §8's table (A-F).

use satconfig_core::CoreError;
use satconfig_kconfig::Tri;
use satconfig_tests::{solve, solve_with_overlay, value_of};

#[test]
fn scenario_a_plain_default_yes() {
    let table = solve("config A\n    bool\n    default y\n").expect("base theory is consistent");
    assert_eq!(value_of(&table, "A"), Tri::Yes);
}

#[test]
fn scenario_b_module_dependency_honoured_with_user_preference() {
    let source = r#"
        config MODULES
            bool
            default y

        config D
            tristate "d"
            depends on MODULES
    "#;
    let table = solve_with_overlay(source, "CONFIG_D=m\n").expect("MODULES=y makes D=m satisfiable");
    assert_eq!(value_of(&table, "MODULES"), Tri::Yes);
    assert_eq!(value_of(&table, "D"), Tri::Mod);
}

#[test]
fn scenario_c_conflicting_preferences_are_unsatisfiable() {
    let source = r#"
        config MODULES
            bool

        config D
            tristate "d"
            depends on MODULES
    "#;
    let result = solve_with_overlay(source, "CONFIG_D=m\nCONFIG_MODULES=n\n");
    assert!(matches!(result, Err(CoreError::UnsatisfiableAssumptions { .. })));
}

#[test]
fn scenario_d_choice_mutual_exclusion_with_user_selection() {
    let source = r#"
        choice
            prompt "pick"

            config A
                bool "A"

            config B
                bool "B"
        endchoice
    "#;
    let table = solve_with_overlay(source, "CONFIG_A=y\n").expect("a non-optional choice with A preferred solves");
    assert_eq!(value_of(&table, "A"), Tri::Yes);
    assert_eq!(value_of(&table, "B"), Tri::No);
}

#[test]
fn scenario_e_select_overrides_default() {
    let source = r#"
        config X
            bool
            default n

        config Y
            bool
            select X
            default y
    "#;
    let table = solve(source).expect("select should force X on despite its own default n");
    assert_eq!(value_of(&table, "X"), Tri::Yes);
    assert_eq!(value_of(&table, "Y"), Tri::Yes);
}

#[test]
fn scenario_f_tristate_default_conditioned_on_modules() {
    let source = r#"
        config A
            tristate "a"
            default m if MODULES

        config MODULES
            bool
            default y
    "#;
    let table = solve(source).expect("A=m is consistent once MODULES=y makes the default active");
    assert_eq!(value_of(&table, "A"), Tri::Mod);
    assert_eq!(value_of(&table, "MODULES"), Tri::Yes);
}
