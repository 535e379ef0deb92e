use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PosterError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        PosterError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PosterError::not_ready("x").to_string().contains("not ready:"));
    assert!(
        PosterError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        PosterError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PosterError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
