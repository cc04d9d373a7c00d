//! List reads degrade to empty results when the store fails underneath a
//! live facade; failures are logged, never surfaced or panicked on.

use movieshelf_core::db::open_db_in_memory;
use movieshelf_core::LibraryService;

#[test]
fn list_users_degrades_to_empty_when_the_table_vanishes() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();
    library.create_user("Alice").unwrap();
    assert_eq!(library.list_users().len(), 1);

    conn.execute_batch("DROP TABLE users;").unwrap();

    assert!(library.list_users().is_empty());
}

#[test]
fn list_movies_degrades_to_empty_when_the_table_vanishes() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();

    conn.execute_batch("DROP TABLE movies;").unwrap();

    assert!(library.list_movies().is_empty());
}

#[test]
fn collection_for_user_degrades_to_empty_when_entries_vanish() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();
    let alice = library.create_user("Alice").unwrap();

    conn.execute_batch("DROP TABLE user_movies;").unwrap();

    assert_eq!(library.collection_for_user(alice.id), Some(Vec::new()));
}

#[test]
fn collection_for_user_degrades_when_the_user_probe_fails() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();

    conn.execute_batch("DROP TABLE users;").unwrap();

    // With the user table gone the existence probe errors; the contract is
    // an empty sequence, not a missing-user marker.
    assert_eq!(library.collection_for_user(1), Some(Vec::new()));
}
