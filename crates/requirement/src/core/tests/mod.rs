use super::*;

fn req(s: &str) -> Requirement {
    s.parse().unwrap()
}

#[test]
fn registry_with_constraints() {
    let hacking = req("hacking<0.11,>=0.10.0");
    match &hacking {
        Requirement::Registry(r) => {
            assert_eq!(r.name.as_str(), "hacking");
            assert_eq!(r.specifiers.to_string(), "<0.11,>=0.10.0");
        }
        _ => panic!("expected a registry entry"),
    }
    assert!(!hacking.is_editable());
    assert_eq!(hacking.name().as_str(), "hacking");
    assert_eq!(hacking.to_string(), "hacking<0.11,>=0.10.0");
}

#[test]
fn registry_unconstrained() {
    let bare = req("testrepository");
    match &bare {
        Requirement::Registry(r) => assert!(r.specifiers.is_empty()),
        _ => panic!("expected a registry entry"),
    }
    assert_eq!(bare.to_string(), "testrepository");
}

#[test]
fn registry_tolerates_spaces_before_constraints() {
    assert_eq!(
        req("coverage >= 3.6").to_string(),
        req("coverage>=3.6").to_string()
    );
}

#[test]
fn editable_with_revision() {
    let toolkit =
        req("-e git+https://github.com/noironetworks/acitoolkit.git@noiro-lite#egg=acitoolkit");
    match &toolkit {
        Requirement::Editable(e) => {
            assert_eq!(e.vcs, VcsKind::Git);
            assert_eq!(
                e.url.as_str(),
                "https://github.com/noironetworks/acitoolkit.git"
            );
            assert_eq!(e.rev.as_deref(), Some("noiro-lite"));
            assert_eq!(e.egg.as_str(), "acitoolkit");
        }
        _ => panic!("expected an editable entry"),
    }
    assert!(toolkit.is_editable());
    assert_eq!(toolkit.name().as_str(), "acitoolkit");
    assert_eq!(
        toolkit.to_string(),
        "-e git+https://github.com/noironetworks/acitoolkit.git@noiro-lite#egg=acitoolkit"
    );
}

#[test]
fn editable_without_revision() {
    let plain = req("-e git+https://github.com/noironetworks/apicapi.git#egg=apicapi");
    match &plain {
        Requirement::Editable(e) => assert!(e.rev.is_none()),
        _ => panic!("expected an editable entry"),
    }
}

#[test]
fn editable_long_flag() {
    let spelled = req("--editable git+https://github.com/noironetworks/apicapi.git@master#egg=apicapi");
    assert_eq!(
        spelled.to_string(),
        "-e git+https://github.com/noironetworks/apicapi.git@master#egg=apicapi"
    );
}

#[test]
fn userinfo_at_is_not_a_revision() {
    let ssh = req("-e git+ssh://git@github.com/noironetworks/apicapi.git#egg=apicapi");
    match &ssh {
        Requirement::Editable(e) => {
            assert!(e.rev.is_none());
            assert_eq!(e.url.username(), "git");
        }
        _ => panic!("expected an editable entry"),
    }
}

#[test]
fn editable_errors() {
    assert!(matches!(
        "-e git+https://example.com/repo.git@#egg=x".parse::<Requirement>(),
        Err(RequirementError::EmptyRev)
    ));
    assert!(matches!(
        "-e git+https://example.com/repo.git@master".parse::<Requirement>(),
        Err(RequirementError::MissingEgg)
    ));
    assert!(matches!(
        "-e git+https://example.com/repo.git#subdirectory=x".parse::<Requirement>(),
        Err(RequirementError::MissingEgg)
    ));
    assert!(matches!(
        "-e cvs+https://example.com/repo#egg=x".parse::<Requirement>(),
        Err(RequirementError::UnknownVcs(_))
    ));
    assert!(matches!(
        "-e https://example.com/repo.git#egg=x".parse::<Requirement>(),
        Err(RequirementError::UnknownVcs(_))
    ));
    assert!(matches!(
        "-e git+not a url#egg=x".parse::<Requirement>(),
        Err(RequirementError::Url(_))
    ));
}

#[test]
fn other_installer_options_are_rejected() {
    for line in ["-r other.txt", "--requirement other.txt", "-c constraints.txt"] {
        assert!(matches!(
            line.parse::<Requirement>(),
            Err(RequirementError::UnsupportedOption(_))
        ));
    }
}

#[test]
fn empty_declaration() {
    assert!(matches!(
        "   ".parse::<Requirement>(),
        Err(RequirementError::Empty)
    ));
}

#[test]
fn bad_registry_lines() {
    assert!(matches!(
        "#name".parse::<Requirement>(),
        Err(RequirementError::Name(NameError::InvalidStart('#')))
    ));
    assert!(matches!(
        "hacking~=0.10".parse::<Requirement>(),
        Err(RequirementError::Specifier(SpecifierError::InvalidOp(_)))
    ));
    assert!(matches!(
        "hacking and friends".parse::<Requirement>(),
        Err(RequirementError::Specifier(SpecifierError::InvalidOp(_)))
    ));
}

#[test]
fn serializes_to_tagged_json() -> anyhow::Result<()> {
    let line = "-e git+https://github.com/noironetworks/apicapi.git@master#egg=apicapi";
    let parsed = req(line);
    let json = serde_json::to_value(&parsed)?;
    assert_eq!(json["editable"]["vcs"], "git");
    assert_eq!(json["editable"]["rev"], "master");
    assert_eq!(json["editable"]["egg"], "apicapi");

    let back: Requirement = serde_json::from_value(json)?;
    assert_eq!(back, parsed);
    Ok(())
}
