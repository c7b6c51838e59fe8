use super::*;

#[test]
fn empty() {
    let res = Name::try_from("");
    assert!(res == Err(NameError::Empty));
}

#[test]
fn invalid_start() {
    let assert = |s: &str| {
        let res = Name::try_from(s);
        assert!(res == Err(NameError::InvalidStart(s.chars().next().unwrap())));
    };
    for a in ["-hacking", "_hacking", ".hacking", "#hacking"] {
        assert(a)
    }
}

#[test]
fn invalid_end() {
    let assert = |s: &str| {
        let res = Name::try_from(s);
        assert!(res == Err(NameError::InvalidEnd(s.chars().next_back().unwrap())));
    };
    for a in ["hacking-", "hacking_", "hacking."] {
        assert(a)
    }
}

#[test]
fn invalid_chars() {
    let res = Name::try_from("a!@#$%^&*()z");
    assert!(res == Err(NameError::InvalidCharacters("!@#$%^&*()".into())));
}

#[test]
fn valid_names() {
    let valid = [
        "hacking",
        "coverage",
        "python-subunit",
        "oslo.config",
        "zope_interface",
        "acitoolkit",
        "a",
        "3to2",
        "backports.ssl-match_hostname",
    ];

    for name in valid {
        assert!(Name::try_from(name).is_ok(), "expected '{}' to be valid", name);
    }
}

#[test]
fn normalization_collapses_separator_runs() {
    let assert = |written: &str, canonical: &str| {
        let name = Name::try_from(written).unwrap();
        assert_eq!(name.normalized(), canonical);
    };

    assert("Python-Subunit", "python-subunit");
    assert("python_subunit", "python-subunit");
    assert("python.subunit", "python-subunit");
    assert("python-_.subunit", "python-subunit");
    assert("oslo.config", "oslo-config");
    assert("hacking", "hacking");
}

#[test]
fn display_preserves_spelling() {
    let name = Name::try_from("Python-Subunit").unwrap();
    assert_eq!(name.to_string(), "Python-Subunit");
}
