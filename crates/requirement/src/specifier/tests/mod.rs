use super::*;

fn set(s: &str) -> SpecifierSet {
    s.parse().unwrap()
}

fn v(s: &str) -> Version {
    s.parse().unwrap()
}

#[test]
fn parse_single() {
    let spec: Specifier = ">=3.6".parse().unwrap();
    assert_eq!(spec.op, Op::Ge);
    assert_eq!(spec.version, v("3.6"));
}

#[test]
fn parse_set_preserves_order() {
    let specs = set("<0.11,>=0.10.0");
    let rendered: Vec<String> = specs.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["<0.11", ">=0.10.0"]);
    assert_eq!(specs.to_string(), "<0.11,>=0.10.0");
}

#[test]
fn parse_empty_set() {
    let specs = set("");
    assert!(specs.is_empty());
    assert_eq!(specs.to_string(), "");
}

#[test]
fn tolerates_inline_whitespace() {
    let specs = set(" >= 1.1.2 , != 1.2.0 ");
    assert_eq!(specs.to_string(), ">=1.1.2,!=1.2.0");
}

#[test]
fn rejects_bad_input() {
    assert!(matches!(
        "1.0".parse::<SpecifierSet>(),
        Err(SpecifierError::InvalidOp(_))
    ));
    assert!(matches!(
        "~=1.0".parse::<SpecifierSet>(),
        Err(SpecifierError::InvalidOp(_))
    ));
    assert!(matches!(
        ">=1.0,,<2".parse::<SpecifierSet>(),
        Err(SpecifierError::Empty)
    ));
    assert!(matches!(
        ">=banana".parse::<SpecifierSet>(),
        Err(SpecifierError::Version(_))
    ));
}

#[test]
fn contains() {
    let specs = set("<0.11,>=0.10.0");
    assert!(specs.contains(&v("0.10.0")));
    assert!(specs.contains(&v("0.10.5")));
    assert!(specs.contains(&v("0.10")));
    assert!(!specs.contains(&v("0.11")));
    assert!(!specs.contains(&v("0.9.9")));

    let exclusions = set("!=1.2.0,!=1.3b1,<1.3,>=1.1.2");
    assert!(exclusions.contains(&v("1.1.2")));
    assert!(exclusions.contains(&v("1.2.1")));
    assert!(!exclusions.contains(&v("1.2.0")));
    assert!(!exclusions.contains(&v("1.3b1")));
    assert!(!exclusions.contains(&v("1.3")));
}

#[test]
fn satisfiable_ranges() {
    for specs in [
        "",
        ">=3.6",
        "<0.11,>=0.10.0",
        "!=1.2.0,!=1.3b1,<1.3,>=1.1.2",
        ">=1.0,<=1.0",
        "==1.0,>=0.5,<2",
        ">1.0,<1.0.1",
    ] {
        assert!(set(specs).is_satisfiable(), "expected '{}' satisfiable", specs);
    }
}

#[test]
fn unsatisfiable_ranges() {
    for specs in [
        ">2,<1",
        ">=2.0,<2.0",
        ">2.0,<=2.0",
        ">1.0,<1.0",
        "==1.0,==2.0",
        "==3.0,<2.0",
        "==1.0,!=1.0",
        ">=1.0,<=1.0,!=1.0",
        ">=1.0,<=1.0.0,!=1.0",
    ] {
        assert!(
            !set(specs).is_satisfiable(),
            "expected '{}' unsatisfiable",
            specs
        );
    }
}

#[test]
fn padded_bounds_collapse() {
    // >=1.0 and <=1.0.0 pin the same version under padded comparison
    let specs = set(">=1.0,<=1.0.0");
    assert!(specs.is_satisfiable());
    assert!(specs.contains(&v("1.0")));
    assert!(!specs.contains(&v("1.0.1")));
}
