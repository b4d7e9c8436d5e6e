//! Tests for the UCI tree.

use crate::error::UciError;
use crate::tree::{
    Config, OptionType, Section, Selector, SelectorError, UciOption, is_placeholder_name,
    parse_selector, placeholder_index, placeholder_name,
};

fn opt(name: &str, values: &[&str]) -> UciOption {
    UciOption::new(name, OptionType::Option, values.iter().copied())
}

fn list(name: &str, values: &[&str]) -> UciOption {
    UciOption::new(name, OptionType::List, values.iter().copied())
}

fn section(section_type: &str, name: &str, options: Vec<UciOption>) -> Section {
    let mut sec = Section::new(section_type, name);
    for o in options {
        sec.add(o);
    }
    sec
}

/// Builds the tree a producer emits for a file with a named `foo` section,
/// two unnamed `foo` sections, and a trailing block that re-opens "named".
fn unnamed_fixture() -> Config {
    let mut config = Config::new("unnamed");
    config.add(section(
        "foo",
        "named",
        vec![opt("pos", &["0"]), opt("unnamed", &["0"]), list("list", &["0"])],
    ));
    config.add(section(
        "foo",
        "",
        vec![opt("pos", &["1"]), opt("unnamed", &["1"]), opt("list", &["10"])],
    ));
    config.add(section(
        "foo",
        "",
        vec![opt("pos", &["2"]), opt("unnamed", &["1"]), list("list", &["20"])],
    ));

    let reopened = config.merge(section("foo", "named", vec![list("list", &["30"])]));
    reopened.set("pos", OptionType::Option, ["3"]);
    config.mark_clean();
    config
}

fn values<'a>(config: &'a Config, selector: &str, option: &str) -> &'a [String] {
    config
        .get(selector)
        .unwrap_or_else(|| panic!("no section for {selector}"))
        .option_values(option)
        .unwrap_or_else(|| panic!("no option {option} in {selector}"))
}

// ============================================================================
// Selector parsing
// ============================================================================

#[test]
fn test_parse_selector_errors() {
    let cases: &[(&str, SelectorError)] = &[
        ("", SelectorError::Implausible),
        ("aa[0]", SelectorError::MustStartWithAt),
        ("@@[0]", SelectorError::MultipleAtSigns),
        ("@@@@@@@@@@@", SelectorError::MultipleAtSigns),
        ("@[[0]", SelectorError::MultipleOpenBrackets),
        ("@][0]", SelectorError::MultipleCloseBrackets),
        ("@aa0]", SelectorError::InvalidFormat),
        ("@abc[", SelectorError::InvalidFormat),
        ("@a[0x", SelectorError::InvalidFormat),
        ("@[00]", SelectorError::InvalidFormat),
    ];

    for (input, expected) in cases {
        assert_eq!(
            parse_selector(input).unwrap_err(),
            *expected,
            "input {input:?}"
        );
    }
}

#[test]
fn test_parse_selector_messages() {
    assert_eq!(
        parse_selector("").unwrap_err().to_string(),
        "implausible section selector: must be at least 5 characters long"
    );
    assert_eq!(
        parse_selector("aa[0]").unwrap_err().to_string(),
        "invalid syntax: section selector must start with @ sign"
    );
    assert_eq!(
        parse_selector("@aa0]").unwrap_err().to_string(),
        "invalid syntax: section selector must have format '@type[index]'"
    );
    assert_eq!(
        parse_selector("@a[b]").unwrap_err().to_string(),
        "invalid syntax: index must be numeric: parsing \"b\": invalid digit found in string"
    );
}

#[test]
fn test_parse_selector_non_numeric_index() {
    for input in ["@a[b]", "@abcdEFGHijkl[0xff]", "@a[1.5]"] {
        match parse_selector(input) {
            Err(SelectorError::IndexNotNumeric { index, .. }) => {
                assert!(input.contains(&format!("[{index}]")));
            }
            other => panic!("expected IndexNotNumeric for {input:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_parse_selector_valid() {
    assert_eq!(parse_selector("@a[0]").unwrap(), ("a", 0));
    assert_eq!(parse_selector("@a[4223]").unwrap(), ("a", 4223));
    assert_eq!(parse_selector("@a[-1]").unwrap(), ("a", -1));
    assert_eq!(
        parse_selector("@abcdEFGHijkl[-255]").unwrap(),
        ("abcdEFGHijkl", -255)
    );
}

#[test]
fn test_selector_classification() {
    assert_eq!(Selector::parse("lan").unwrap(), Selector::Named("lan"));
    assert_eq!(
        Selector::parse("@interface[-2]").unwrap(),
        Selector::Positional {
            section_type: "interface",
            index: -2
        }
    );
    assert_eq!(
        Selector::parse("@x").unwrap_err(),
        SelectorError::Implausible
    );
}

#[test]
fn test_placeholder_helpers() {
    assert_eq!(placeholder_name("system", 0), "@system[0]");
    assert_eq!(placeholder_index("@system[12]"), Some(12));
    assert_eq!(placeholder_index("@system[-1]"), None);
    assert_eq!(placeholder_index("system"), None);

    assert!(is_placeholder_name("@system[3]", "system"));
    assert!(!is_placeholder_name("@system[3]", "sys"));
    assert!(!is_placeholder_name("@system[-3]", "system"));
    assert!(!is_placeholder_name("lan", "interface"));
    assert!(is_placeholder_name("@a[1][2]", "a[1]"));
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_get_unnamed_fixture() {
    let config = unnamed_fixture();

    for selector in ["named", "@foo[0]", "@foo[-3]"] {
        assert_eq!(values(&config, selector, "pos"), ["3"]);
        assert_eq!(values(&config, selector, "unnamed"), ["0"]);
        assert_eq!(values(&config, selector, "list"), ["0", "30"]);
    }

    for selector in ["@foo[1]", "@foo[-2]"] {
        assert_eq!(values(&config, selector, "pos"), ["1"]);
        assert_eq!(values(&config, selector, "unnamed"), ["1"]);
        assert_eq!(values(&config, selector, "list"), ["10"]);
    }

    for selector in ["@foo[2]", "@foo[-1]"] {
        assert_eq!(values(&config, selector, "pos"), ["2"]);
        assert_eq!(values(&config, selector, "unnamed"), ["1"]);
        assert_eq!(values(&config, selector, "list"), ["20"]);
    }
}

#[test]
fn test_named_and_positional_lookup_return_same_section() {
    let config = unnamed_fixture();
    let by_name = config.get("named").unwrap();
    let by_position = config.get("@foo[0]").unwrap();
    assert!(std::ptr::eq(by_name, by_position));
}

#[test]
fn test_positional_lookup_counts_only_matching_type() {
    let mut config = Config::new("network");
    config.add(section("interface", "lan", vec![]));
    config.add(section("device", "", vec![opt("name", &["br-lan"])]));
    config.add(section("interface", "", vec![opt("proto", &["dhcp"])]));
    config.add(section("device", "", vec![opt("name", &["eth1"])]));

    assert_eq!(values(&config, "@device[0]", "name"), ["br-lan"]);
    assert_eq!(values(&config, "@device[1]", "name"), ["eth1"]);
    assert_eq!(values(&config, "@device[-1]", "name"), ["eth1"]);
    assert_eq!(values(&config, "@interface[1]", "proto"), ["dhcp"]);
    assert_eq!(config.get("@interface[0]").unwrap().name, "lan");
}

#[test]
fn test_out_of_bounds_selectors() {
    let config = unnamed_fixture();

    for selector in ["@foo[3]", "@foo[-4]", "@bar[0]", "@bar[-1]"] {
        assert_eq!(
            config.try_get(selector).unwrap_err(),
            SelectorError::IndexOutOfBounds,
            "selector {selector}"
        );
        assert!(config.get(selector).is_none());
    }
}

#[test]
fn test_missing_name_is_not_an_error() {
    let config = unnamed_fixture();
    assert_eq!(config.try_get("missing").unwrap(), None);
    assert!(config.get_named("missing").is_none());
}

#[test]
fn test_malformed_selector_surfaces_through_try_get() {
    let config = unnamed_fixture();
    assert_eq!(
        config.try_get("@foo").unwrap_err(),
        SelectorError::Implausible
    );
    assert_eq!(
        config.get_unnamed("named").unwrap_err(),
        SelectorError::MustStartWithAt
    );
    assert!(config.get("@foo[x]").is_none());
}

#[test]
fn test_section_name_and_index() {
    let config = unnamed_fixture();
    let second = config.get("@foo[1]").unwrap();
    assert_eq!(config.index(second).unwrap(), 1);
    assert_eq!(config.section_name(second).unwrap(), "@foo[1]");

    let named = config.get("named").unwrap();
    assert_eq!(config.section_name(named).unwrap(), "named");
}

#[test]
fn test_index_of_foreign_section_is_an_invariant_failure() {
    let config = unnamed_fixture();
    let stray = Section::new("foo", "");

    assert!(matches!(
        config.index(&stray),
        Err(UciError::ForeignSection { config }) if config == "unnamed"
    ));
    assert!(config.section_name(&stray).is_err());
}

// ============================================================================
// Merge
// ============================================================================

#[test]
fn test_merge_values_is_idempotent_and_ordered() {
    let mut option = list("dns", &["a", "b"]);
    option.merge_values(["b", "c", "a", "d", "c"]);
    assert_eq!(option.values, ["a", "b", "c", "d"]);

    option.merge_values(["d", "a"]);
    assert_eq!(option.values, ["a", "b", "c", "d"]);
}

#[test]
fn test_add_value_appends_without_dedup() {
    let mut option = list("server", &["a"]);
    option.add_value("b");
    option.add_value(String::from("a"));
    assert_eq!(option.values, ["a", "b", "a"]);

    option.set_values(["c"]);
    assert_eq!(option.values, ["c"]);
}

#[test]
fn test_section_merge_existing_and_new_options() {
    let mut sec = section("interface", "lan", vec![list("dns", &["1.1.1.1"])]);

    sec.merge(list("dns", &["8.8.8.8", "1.1.1.1"]));
    sec.merge(opt("proto", &["static"]));

    assert_eq!(sec.options.len(), 2);
    assert_eq!(sec.option_values("dns").unwrap(), ["1.1.1.1", "8.8.8.8"]);
    assert_eq!(sec.get("proto").unwrap().option_type, OptionType::Option);
}

#[test]
fn test_config_merge_matching_name_keeps_count() {
    let mut config = unnamed_fixture();
    let before = config.sections.len();

    let merged = config.merge(section("foo", "named", vec![opt("extra", &["x"])]));
    assert_eq!(merged.option_last_value("extra"), Some("x"));
    assert_eq!(config.sections.len(), before);
    assert!(config.is_tainted());
}

#[test]
fn test_config_merge_new_name_appends_one() {
    let mut config = unnamed_fixture();
    let before = config.sections.len();

    config.merge(section("foo", "other", vec![]));
    assert_eq!(config.sections.len(), before + 1);
    assert_eq!(config.sections.last().unwrap().name, "other");
}

#[test]
fn test_config_merge_unnamed_overlays_first_of_type() {
    let mut config = Config::new("system");
    config.add(section("system", "", vec![opt("hostname", &["OpenWrt"])]));
    config.add(section("system", "", vec![opt("hostname", &["second"])]));

    config.merge(section("system", "", vec![opt("timezone", &["UTC"])]));

    assert_eq!(config.sections.len(), 2);
    assert_eq!(config.sections[0].option_last_value("timezone"), Some("UTC"));
    assert!(config.sections[1].get("timezone").is_none());
}

#[test]
fn test_config_merge_unnamed_into_empty_type_appends() {
    let mut config = Config::new("system");
    config.add(section("timeserver", "ntp", vec![]));

    config.merge(section("system", "", vec![opt("hostname", &["OpenWrt"])]));

    assert_eq!(config.sections.len(), 2);
    assert_eq!(config.count("system"), 1);
}

#[test]
fn test_config_merge_at_targets_position() {
    let mut config = unnamed_fixture();

    config.merge_at(section("foo", "", vec![list("list", &["21"])]), 2);
    assert_eq!(values(&config, "@foo[2]", "list"), ["20", "21"]);

    config.merge_at(section("foo", "", vec![]), 3);
    assert_eq!(config.count("foo"), 4);
}

#[test]
fn test_merge_config_uses_fragment_positions() {
    let mut config = unnamed_fixture();

    let mut fragment = Config::new("overlay");
    fragment.add(section("foo", "", vec![opt("first", &["yes"])]));
    fragment.add(section("foo", "", vec![opt("second", &["yes"])]));
    fragment.add(section("bar", "", vec![]));

    config.merge_config(fragment);

    // "named" occupies position 0 but its identity is its name, so the first
    // unnamed overlay finds no @foo[0] and is appended.
    assert!(config.get("named").unwrap().get("first").is_none());
    assert_eq!(values(&config, "@foo[3]", "first"), ["yes"]);
    assert_eq!(values(&config, "@foo[1]", "second"), ["yes"]);
    assert_eq!(config.count("foo"), 4);
    assert_eq!(config.count("bar"), 1);
}

#[test]
fn test_stored_placeholder_name_matches_position() {
    let mut config = unnamed_fixture();
    config.merge(section("foo", "@foo[1]", vec![opt("patched", &["1"])]));

    assert_eq!(config.sections.len(), 3);
    assert_eq!(values(&config, "@foo[1]", "patched"), ["1"]);
}

// ============================================================================
// Deletion
// ============================================================================

#[test]
fn test_del_positional_removes_second_of_type() {
    let mut config = Config::new("firewall");
    config.add(section("rule", "", vec![opt("name", &["a"])]));
    config.add(section("zone", "lan", vec![]));
    config.add(section("rule", "", vec![opt("name", &["b"])]));
    config.add(section("rule", "", vec![opt("name", &["c"])]));

    assert!(config.del("@rule[1]"));

    let remaining: Vec<_> = config
        .sections
        .iter()
        .map(|sec| {
            sec.option_last_value("name")
                .unwrap_or(sec.name.as_str())
                .to_string()
        })
        .collect();
    assert_eq!(remaining, ["a", "lan", "c"]);
}

#[test]
fn test_del_negative_index_and_name() {
    let mut config = unnamed_fixture();

    assert!(config.del("@foo[-1]"));
    assert_eq!(config.count("foo"), 2);
    assert_eq!(values(&config, "@foo[-1]", "pos"), ["1"]);

    assert!(config.del("named"));
    assert_eq!(config.count("foo"), 1);
    assert_eq!(values(&config, "@foo[0]", "pos"), ["1"]);
}

#[test]
fn test_del_missing_is_noop() {
    let mut config = unnamed_fixture();

    assert!(!config.del("missing"));
    assert!(!config.del("@foo[7]"));
    assert!(!config.del("@bar[0]"));
    assert_eq!(config.sections.len(), 3);
    assert!(!config.is_tainted());
}

#[test]
fn test_empty_name_never_addresses_unnamed_section() {
    let mut config = Config::new("system");
    config.add(section("system", "", vec![opt("hostname", &["OpenWrt"])]));
    config.mark_clean();

    assert!(config.get("").is_none());
    assert!(matches!(config.try_get(""), Ok(None)));
    assert!(config.get_named("").is_none());
    assert!(!config.del(""));
    assert_eq!(config.sections.len(), 1);
    assert!(!config.is_tainted());
}

#[test]
fn test_section_del_option() {
    let mut sec = section("foo", "", vec![opt("a", &["1"]), opt("b", &["2"])]);

    assert!(sec.del("a"));
    assert!(!sec.del("a"));
    assert_eq!(sec.options.len(), 1);
    assert_eq!(sec.options[0].name, "b");
}

// ============================================================================
// Tainting
// ============================================================================

#[test]
fn test_taint_tracking() {
    let mut config = unnamed_fixture();
    assert!(!config.is_tainted());

    let _ = config.get("named");
    assert!(!config.is_tainted());

    assert!(config.get_mut("missing").is_none());
    assert!(!config.is_tainted());

    config.get_mut("named").unwrap().del("pos");
    assert!(config.is_tainted());

    config.mark_clean();
    config.add(Section::new("bar", ""));
    assert!(config.is_tainted());
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_write_uci_text() {
    let mut config = Config::new("network");
    config.add(section(
        "interface",
        "lan",
        vec![opt("proto", &["static"]), list("dns", &["1.1.1.1", "8.8.8.8"])],
    ));
    config.add(section("device", "", vec![opt("name", &["br-lan", "ignored"])]));

    let expected = "\nconfig interface 'lan'\n\
                    \toption proto 'static'\n\
                    \tlist dns '1.1.1.1'\n\
                    \tlist dns '8.8.8.8'\n\
                    \nconfig device\n\
                    \toption name 'br-lan'\n\
                    \n";
    assert_eq!(config.to_string(), expected);

    let mut sink = Vec::new();
    let written = config.write_to(&mut sink).unwrap();
    assert_eq!(written, expected.len());
    assert_eq!(String::from_utf8(sink).unwrap(), expected);
}

#[test]
fn test_write_omits_placeholder_names() {
    let mut config = Config::new("system");
    config.add(section("system", "@system[0]", vec![]));
    config.add(section("system", "@other[0]", vec![]));

    assert_eq!(
        config.to_string(),
        "\nconfig system\n\nconfig system '@other[0]'\n\n"
    );
}

#[test]
fn test_write_empty_config() {
    assert_eq!(Config::new("empty").to_string(), "\n");
}

#[test]
fn test_write_to_propagates_sink_errors() {
    struct FailingSink;

    impl std::io::Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let err = unnamed_fixture().write_to(FailingSink).unwrap_err();
    assert_eq!(err.to_string(), "disk full");
}

#[test]
fn test_json_dump_shape() {
    let mut config = Config::new("dhcp");
    config.add(section("dnsmasq", "", vec![list("server", &["1.1.1.1"])]));

    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "dhcp",
            "sections": [{
                "type": "dnsmasq",
                "options": [{
                    "name": "server",
                    "values": ["1.1.1.1"],
                    "type": "list"
                }]
            }]
        })
    );

    let back: Config = serde_json::from_value(json).unwrap();
    assert_eq!(back.sections, config.sections);
    assert!(!back.is_tainted());
}
