use packsmith_util::errors::PacksmithError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = PacksmithError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_manifest_error_display() {
    let err = PacksmithError::Manifest {
        message: "bad syntax".to_string(),
    };
    assert_eq!(err.to_string(), "Manifest error: bad syntax");
}

#[test]
fn test_index_error_display() {
    let err = PacksmithError::Index {
        message: "missing id".to_string(),
    };
    assert_eq!(err.to_string(), "Index error: missing id");
}

#[test]
fn test_resolution_error_display() {
    let err = PacksmithError::Resolution {
        message: "2 missing dependencies".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Dependency resolution failed: 2 missing dependencies"
    );
}

#[test]
fn test_generic_error_display() {
    let err = PacksmithError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}
