use satconfig_kconfig::{parse, Kind, PropertyKind};

#[test]
fn parses_a_plain_bool_symbol_with_prompt_and_dependency() {
    let table = parse(
        "Kconfig",
        r#"
        config FOO
            bool "Enable foo"
            default y

        config BAR
            bool "Enable bar"
            depends on FOO
            default n
        "#,
    )
    .expect("valid source should parse");

    let foo = table.find("FOO").expect("FOO declared");
    let bar = table.find("BAR").expect("BAR declared");

    assert_eq!(table.get(foo).kind, Kind::Bool);
    assert_eq!(table.get(bar).kind, Kind::Bool);
    assert_eq!(table.get(foo).prompts().count(), 1);
    assert_eq!(table.get(bar).defaults().count(), 1);

    let bar_prompt_visibility = table
        .get(bar)
        .prompts()
        .next()
        .unwrap()
        .visibility
        .clone()
        .expect("bar's prompt is gated by 'depends on FOO'");
    // depends-on should be folded into the prompt's visibility condition.
    assert!(format!("{bar_prompt_visibility:?}").contains("FOO"));
}

#[test]
fn select_and_forward_references_resolve_to_the_same_symbol() {
    let table = parse(
        "Kconfig",
        r#"
        config A
            bool "A"
            select B

        config B
            bool "B"
        "#,
    )
    .unwrap();

    let a = table.find("A").unwrap();
    let b = table.find("B").unwrap();
    let select = table.get(a).selects().next().unwrap();
    match &select.kind {
        PropertyKind::Select(target) => assert_eq!(*target, b),
        other => panic!("expected Select, got {other:?}"),
    }
}

#[test]
fn choice_block_collects_its_members_in_order() {
    let table = parse(
        "Kconfig",
        r#"
        choice
            prompt "Pick one"

            config CHOICE_A
                bool "A"

            config CHOICE_B
                bool "B"
        endchoice
        "#,
    )
    .unwrap();

    let choice = table
        .iter()
        .find(|s| s.is_choice())
        .expect("an anonymous choice symbol was declared");
    assert_eq!(choice.choice_values().len(), 2);

    let a = table.find("CHOICE_A").unwrap();
    let b = table.find("CHOICE_B").unwrap();
    assert!(table.get(a).flags.choice_value);
    assert!(table.get(b).flags.choice_value);
    assert_eq!(choice.choice_values(), &[a, b]);
}

#[test]
fn menu_depends_on_is_folded_into_member_prompt_visibility() {
    let table = parse(
        "Kconfig",
        r#"
        menu "Networking"
            depends on NET

        config NET
            bool "Networking support"

        config WIRELESS
            bool "Wireless"
        endmenu
        "#,
    )
    .unwrap();

    let wireless = table.find("WIRELESS").unwrap();
    let visibility = table
        .get(wireless)
        .prompts()
        .next()
        .unwrap()
        .visibility
        .clone()
        .unwrap();
    assert!(format!("{visibility:?}").contains("NET"));
}

#[test]
fn equality_expression_against_a_string_literal_interns_a_constant_symbol() {
    let table = parse(
        "Kconfig",
        r#"
        config ARCH
            string "Target architecture"
            default "x86"

        config X86_ONLY
            bool "x86-only feature"
            depends on ARCH = "x86"
        "#,
    )
    .unwrap();

    let x86_only = table.find("X86_ONLY").unwrap();
    let arch = table.find("ARCH").unwrap();
    let visibility = table
        .get(x86_only)
        .prompts()
        .next()
        .unwrap()
        .visibility
        .clone()
        .unwrap();
    match visibility {
        satconfig_kconfig::Expr::Equal(lhs, rhs) => {
            assert_eq!(lhs, arch);
            assert_ne!(rhs, arch, "the string literal should intern to its own symbol id");
        }
        other => panic!("expected an Equal expression, got {other:?}"),
    }
}

#[test]
fn range_property_is_recorded_with_both_bounds() {
    let table = parse(
        "Kconfig",
        r#"
        config TIMEOUT
            int "Timeout in seconds"
            range 1 60
            default 30
        "#,
    )
    .unwrap();

    let timeout = table.find("TIMEOUT").unwrap();
    let symbol = table.get(timeout);
    let range = symbol
        .properties
        .iter()
        .find_map(|p| match &p.kind {
            PropertyKind::Range(lo, hi) => Some((lo.clone(), hi.clone())),
            _ => None,
        })
        .expect("a range property was recorded");
    assert!(format!("{range:?}").contains('1'));
}

#[test]
fn malformed_source_reports_a_located_error() {
    let err = parse("Kconfig", "config FOO\n    bool \"Foo\n").unwrap_err();
    assert_eq!(err.span.line, 2);
}

#[test]
fn unterminated_menu_is_rejected() {
    let err = parse(
        "Kconfig",
        r#"
        menu "Unterminated"
        config FOO
            bool "Foo"
        "#,
    )
    .unwrap_err();
    assert!(err.message.contains("menu"));
}

#[test]
fn bareword_default_resolves_to_the_tristate_sentinels() {
    let table = parse(
        "Kconfig",
        r#"
        config DRIVER
            tristate "Some driver"
            default m
        "#,
    )
    .unwrap();

    let driver = table.find("DRIVER").unwrap();
    let default = table.get(driver).defaults().next().unwrap();
    match &default.kind {
        PropertyKind::Default(satconfig_kconfig::Expr::Symbol(id)) => {
            assert_eq!(*id, satconfig_kconfig::SYM_MOD);
        }
        other => panic!("expected a Default referencing the 'm' sentinel, got {other:?}"),
    }
    assert_eq!(table.get(driver).kind, Kind::Tristate);
}
