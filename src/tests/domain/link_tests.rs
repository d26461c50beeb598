use crate::domain::{parse_public_path, public_link, public_path};

#[test]
fn builds_public_paths_and_links() {
    assert_eq!(public_path("a1b2c3"), "/f/a1b2c3");
    assert_eq!(
        public_link("https://forms.example.com/", "a1b2c3"),
        "https://forms.example.com/#/f/a1b2c3"
    );
}

#[test]
fn escapes_unsafe_characters() {
    assert_eq!(public_path("my form/1"), "/f/my%20form%2F1");
    assert_eq!(
        parse_public_path(&public_path("my form/1")).as_deref(),
        Some("my form/1")
    );
}

#[test]
fn accepts_every_link_shape() {
    for raw in [
        "/f/a1b2c3",
        "f/a1b2c3",
        "#/f/a1b2c3",
        "/#/f/a1b2c3/",
        "https://forms.example.com/#/f/a1b2c3",
        "http://localhost:5173/f/a1b2c3",
        "https://example.com/reportflow/#/f/a1b2c3",
        "https://example.com/a/b/f/a1b2c3",
        "a1b2c3",
        "  a1b2c3  ",
    ] {
        assert_eq!(parse_public_path(raw).as_deref(), Some("a1b2c3"), "{raw}");
    }
}

#[test]
fn rejects_other_paths() {
    assert_eq!(parse_public_path(""), None);
    assert_eq!(parse_public_path("/forms/a1b2c3"), None);
    assert_eq!(parse_public_path("https://example.com/f/"), None);
    assert_eq!(parse_public_path("/shelf/a1b2c3"), None);
    assert_eq!(parse_public_path("https://example.com/app/f/a1b2c3/extra"), None);
}

#[test]
fn links_under_a_base_path_parse_back() {
    for base in [
        "https://example.com/reportflow",
        "https://example.com/reportflow/",
        "http://localhost:5173/app/forms",
    ] {
        let link = public_link(base, "abc123");
        assert_eq!(parse_public_path(&link).as_deref(), Some("abc123"), "{link}");
    }
    let escaped = public_link("https://example.com/app", "my form/1");
    assert_eq!(parse_public_path(&escaped).as_deref(), Some("my form/1"));
}
