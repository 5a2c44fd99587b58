//! Behaviour that needs no running server: configuration failures and an
//! unreachable store.

use personal_library::{BookRepository, Catalog, DbConfig, LibraryError, NewBook, SearchField};

fn unreachable_config() -> DbConfig {
    DbConfig {
        // Port 1 on loopback refuses connections immediately.
        host: "127.0.0.1".to_string(),
        port: 1,
        user: "reader".to_string(),
        password: "secret".to_string(),
        database: "personal_library".to_string(),
    }
}

#[test]
fn missing_settings_fail_before_any_network_call() {
    let err = DbConfig::from_lookup(|_| None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing environment variables: DB_HOST, DB_USER, DB_PASSWORD, DB_NAME"
    );
}

#[test]
fn unreachable_store_yields_connection_errors() {
    let repo = BookRepository::new(unreachable_config()).unwrap();

    let dune = NewBook {
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        year: 1965,
        genre: Some("Sci-Fi".to_string()),
        read_status: true,
    };
    assert!(repo.create(&dune).unwrap_err().is_connection());
    assert!(repo.list_all().unwrap_err().is_connection());
    assert!(repo
        .search(SearchField::Title, "")
        .unwrap_err()
        .is_connection());
    assert!(repo.statistics().unwrap_err().is_connection());
    assert!(repo.delete_by_title("Dune").unwrap_err().is_connection());
}

#[test]
fn schema_setup_reports_unreachable_store() {
    let repo = BookRepository::new(unreachable_config()).unwrap();
    let err = repo.ensure_schema().unwrap_err();
    assert!(matches!(err, LibraryError::Connection(_)), "{err:?}");
}
