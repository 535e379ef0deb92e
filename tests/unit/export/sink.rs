use super::*;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("posterkit-sink-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn in_memory_sink_records_saves_in_order() {
    let mut sink = InMemorySink::new();
    sink.save("a.png", b"1").unwrap();
    sink.save("sweet of madeena 2025.png", b"22").unwrap();
    let names: Vec<_> = sink.saved().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["a.png", "sweet of madeena 2025.png"]);
    assert_eq!(sink.saved()[1].1, b"22");
}

#[test]
fn directory_sink_creates_dir_and_writes() {
    let dir = temp_dir("write");
    let mut sink = DirectorySink::new(dir.join("nested"));
    let path = sink.save("out.png", b"png-bytes").unwrap();
    assert_eq!(path, dir.join("nested").join("out.png"));
    assert_eq!(std::fs::read(&path).unwrap(), b"png-bytes");

    sink.save("out.png", b"again").unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"again");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn directory_sink_can_refuse_overwrite() {
    let dir = temp_dir("no-overwrite");
    let mut sink = DirectorySink::new(&dir).with_overwrite(false);
    sink.save("x.png", b"first").unwrap();
    let err = sink.save("x.png", b"second").unwrap_err();
    assert!(matches!(err, PosterError::Validation(_)));
    assert_eq!(std::fs::read(dir.join("x.png")).unwrap(), b"first");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn file_names_must_be_bare() {
    let mut sink = InMemorySink::new();
    for bad in ["", "  ", ".", "..", "a/b.png", "a\\b.png"] {
        assert!(sink.save(bad, b"").is_err(), "{bad:?}");
    }
    assert!(sink.saved().is_empty());
}
