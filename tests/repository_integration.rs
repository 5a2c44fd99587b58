//! Repository tests against a live MySQL server.
//!
//! Run with: DB_HOST=... DB_USER=... DB_PASSWORD=... DB_NAME=... cargo test -- --ignored
//!
//! Each test works in its own database (`<DB_NAME>_<suffix>`) so they can run
//! in parallel without seeing each other's rows.

use personal_library::{
    ensure_schema, BookRepository, Catalog, DbConfig, LibraryError, LibraryStats, NewBook,
    SearchField,
};

fn repository(suffix: &str) -> BookRepository {
    let mut config =
        DbConfig::from_env().expect("DB_HOST, DB_USER, DB_PASSWORD and DB_NAME required");
    config.database = format!("{}_{suffix}", config.database);
    let repo = BookRepository::new(config).expect("runtime start");
    repo.ensure_schema().expect("schema setup");

    let provider = repo.provider();
    provider.run(async {
        let mut conn = provider.acquire().await.expect("connection");
        sqlx::query("DELETE FROM books")
            .execute(&mut conn)
            .await
            .expect("clear books");
    });
    repo
}

fn book(title: &str, author: &str, year: i32, genre: Option<&str>, read: bool) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: author.to_string(),
        year,
        genre: genre.map(str::to_string),
        read_status: read,
    }
}

#[test]
#[ignore = "requires database"]
fn schema_setup_is_idempotent() {
    let repo = repository("schema");
    ensure_schema(repo.provider()).expect("second run");
    repo.ensure_schema().expect("third run");
}

#[test]
#[ignore = "requires database"]
fn create_assigns_fresh_ids_visible_in_list() {
    let repo = repository("create");
    let first = repo
        .create(&book("Emma", "Jane Austen", 1915, None, false))
        .unwrap();
    let second = repo
        .create(&book("Ulysses", "James Joyce", 1922, Some("Modernist"), true))
        .unwrap();
    assert_ne!(first.id, second.id);

    let all = repo.list_all().unwrap();
    assert_eq!(all, vec![first, second.clone()]);
    assert_eq!(all.iter().filter(|b| b.id == second.id).count(), 1);
    assert_eq!(second.genre.as_deref(), Some("Modernist"));
}

#[test]
#[ignore = "requires database"]
fn delete_without_match_is_ok_and_changes_nothing() {
    let repo = repository("delete_none");
    repo.create(&book("Emma", "Jane Austen", 1915, None, false))
        .unwrap();
    let before = repo.list_all().unwrap();

    assert_eq!(repo.delete_by_title("Missing").unwrap(), 0);
    assert_eq!(repo.list_all().unwrap(), before);
}

#[test]
#[ignore = "requires database"]
fn delete_removes_every_matching_title() {
    let repo = repository("delete_all");
    repo.create(&book("Poems", "A. Writer", 1950, None, false))
        .unwrap();
    repo.create(&book("Poems", "B. Writer", 1960, None, true))
        .unwrap();
    let keep = repo
        .create(&book("Prose", "C. Writer", 1970, None, false))
        .unwrap();

    assert_eq!(repo.delete_by_title("Poems").unwrap(), 2);
    assert_eq!(repo.list_all().unwrap(), vec![keep]);
}

#[test]
#[ignore = "requires database"]
fn empty_title_search_matches_list_all() {
    let repo = repository("search_empty");
    repo.create(&book("Emma", "Jane Austen", 1915, None, false))
        .unwrap();
    repo.create(&book("Dune", "Frank Herbert", 1965, Some("Sci-Fi"), true))
        .unwrap();

    assert_eq!(
        repo.search(SearchField::Title, "").unwrap(),
        repo.list_all().unwrap()
    );
}

#[test]
#[ignore = "requires database"]
fn wildcards_in_pattern_match_literally() {
    let repo = repository("search_literal");
    let percent = repo
        .create(&book("100% Cotton", "Weaver", 2001, None, false))
        .unwrap();
    repo.create(&book("1000 Cotton", "Weaver", 2002, None, false))
        .unwrap();

    assert_eq!(
        repo.search(SearchField::Title, "0%").unwrap(),
        vec![percent]
    );
}

#[test]
#[ignore = "requires database"]
fn statistics_count_total_and_read() {
    let repo = repository("stats");
    assert_eq!(repo.statistics().unwrap(), LibraryStats { total: 0, read: 0 });

    for (idx, read) in [true, false, true, false, false].into_iter().enumerate() {
        repo.create(&book(&format!("Book {idx}"), "Author", 2000, None, read))
            .unwrap();
    }
    assert_eq!(repo.statistics().unwrap(), LibraryStats { total: 5, read: 2 });
}

#[test]
#[ignore = "requires database"]
fn dune_end_to_end() {
    let repo = repository("dune");
    let dune = repo
        .create(&book("Dune", "Frank Herbert", 1965, Some("Sci-Fi"), true))
        .unwrap();

    assert_eq!(
        repo.search(SearchField::Author, "Herbert").unwrap(),
        vec![dune]
    );
    repo.delete_by_title("Dune").unwrap();
    assert!(repo.list_all().unwrap().is_empty());
}

#[test]
#[ignore = "requires database"]
fn wrong_password_is_a_connection_error() {
    let mut config = DbConfig::from_env().expect("database settings required");
    config.password = format!("{}-wrong", config.password);
    let repo = BookRepository::new(config).unwrap();

    let err = repo.list_all().unwrap_err();
    assert!(matches!(err, LibraryError::Connection(_)), "{err:?}");
}
