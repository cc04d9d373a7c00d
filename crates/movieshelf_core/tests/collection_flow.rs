use movieshelf_core::db::open_db_in_memory;
use movieshelf_core::{LibraryError, LibraryService, NewMovie};

fn inception() -> NewMovie {
    let mut draft = NewMovie::new("Inception", 2010);
    draft.director = Some("Christopher Nolan".to_string());
    draft.rating = Some(8.8);
    draft
}

#[test]
fn adding_same_movie_twice_for_one_user_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();
    let alice = library.create_user("Alice").unwrap();

    let entry = library.add_movie_to_user(&inception(), alice.id).unwrap();
    let err = library.add_movie_to_user(&inception(), alice.id).unwrap_err();
    match err {
        LibraryError::AlreadyInCollection { user_id, movie_id } => {
            assert_eq!(user_id, alice.id);
            assert_eq!(movie_id, entry.movie_id);
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(library.list_movies().len(), 1);
    assert_eq!(library.collection_for_user(alice.id).unwrap().len(), 1);
}

#[test]
fn shared_title_across_users_reuses_one_movie_row() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();
    let alice = library.create_user("Alice").unwrap();
    let bob = library.create_user("Bob").unwrap();

    let first = library.add_movie_to_user(&inception(), alice.id).unwrap();
    let second = library.add_movie_to_user(&inception(), bob.id).unwrap();

    assert_eq!(first.movie_id, second.movie_id);
    assert_eq!(library.list_movies().len(), 1);
    assert_eq!(library.collection_for_user(alice.id).unwrap().len(), 1);
    assert_eq!(library.collection_for_user(bob.id).unwrap().len(), 1);
}

#[test]
fn adding_for_missing_user_fails_without_movie_insert() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();

    assert!(matches!(
        library.add_movie_to_user(&inception(), 42),
        Err(LibraryError::UserNotFound(42))
    ));
    assert!(library.list_movies().is_empty());
}

#[test]
fn blank_title_draft_is_rejected_without_writes() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();
    let alice = library.create_user("Alice").unwrap();

    let err = library
        .add_movie_to_user(&NewMovie::new("  ", 2010), alice.id)
        .unwrap_err();
    assert!(matches!(err, LibraryError::InvalidMovie(_)));
    assert!(library.list_movies().is_empty());
}

#[test]
fn rating_updates_only_the_entry_not_the_movie() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();
    let alice = library.create_user("Alice").unwrap();
    let entry = library.add_movie_to_user(&inception(), alice.id).unwrap();
    assert_eq!(entry.movie_rating, None);

    let rated = library.rate_movie(entry.id, 7.5).unwrap();
    assert_eq!(rated.movie_rating, Some(7.5));

    let movie = library.get_movie(entry.movie_id).unwrap().unwrap();
    assert_eq!(movie.rating, Some(8.8));
}

#[test]
fn non_finite_rating_is_rejected_without_mutation() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();
    let alice = library.create_user("Alice").unwrap();
    let entry = library.add_movie_to_user(&inception(), alice.id).unwrap();

    assert!(matches!(
        library.rate_movie(entry.id, f64::NAN),
        Err(LibraryError::InvalidRating(_))
    ));

    let unchanged = library.entry_for(alice.id, entry.movie_id).unwrap().unwrap();
    assert_eq!(unchanged.movie_rating, None);
}

#[test]
fn rating_a_missing_entry_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();

    assert!(matches!(
        library.rate_movie(42, 5.0),
        Err(LibraryError::EntryNotFound(42))
    ));
}

#[test]
fn removing_last_reference_purges_the_movie() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();
    let alice = library.create_user("Alice").unwrap();
    let entry = library.add_movie_to_user(&inception(), alice.id).unwrap();

    let removed = library
        .remove_movie_from_user(alice.id, entry.movie_id)
        .unwrap();
    assert!(removed.purged);
    assert_eq!(removed.movie.title, "Inception");
    assert!(library.list_movies().is_empty());
    assert!(library.collection_for_user(alice.id).unwrap().is_empty());
}

#[test]
fn removing_one_reference_keeps_a_movie_other_users_still_link() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();
    let alice = library.create_user("Alice").unwrap();
    let bob = library.create_user("Bob").unwrap();
    let entry = library.add_movie_to_user(&inception(), alice.id).unwrap();
    library.add_movie_to_user(&inception(), bob.id).unwrap();

    let removed = library
        .remove_movie_from_user(alice.id, entry.movie_id)
        .unwrap();
    assert!(!removed.purged);
    assert_eq!(library.list_movies().len(), 1);
    assert_eq!(library.collection_for_user(bob.id).unwrap().len(), 1);
}

#[test]
fn removing_an_unlinked_movie_is_a_no_op_failure() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();
    let alice = library.create_user("Alice").unwrap();
    let bob = library.create_user("Bob").unwrap();
    let entry = library.add_movie_to_user(&inception(), bob.id).unwrap();

    let err = library
        .remove_movie_from_user(alice.id, entry.movie_id)
        .unwrap_err();
    match err {
        LibraryError::NotInCollection { user_id, movie_id } => {
            assert_eq!(user_id, alice.id);
            assert_eq!(movie_id, entry.movie_id);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(library.list_movies().len(), 1);
}

#[test]
fn deleting_a_user_purges_only_movies_nobody_else_links() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();
    let alice = library.create_user("Alice").unwrap();
    let bob = library.create_user("Bob").unwrap();

    let shared = inception();
    let mut solo = NewMovie::new("Memento", 2000);
    solo.director = Some("Christopher Nolan".to_string());

    library.add_movie_to_user(&shared, alice.id).unwrap();
    library.add_movie_to_user(&shared, bob.id).unwrap();
    library.add_movie_to_user(&solo, alice.id).unwrap();

    let deleted = library.delete_user(alice.id).unwrap();
    assert_eq!(deleted.name, "Alice");
    assert_eq!(deleted.purged_movies, 1);

    let movies = library.list_movies();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Inception");
    assert_eq!(library.collection_for_user(alice.id), None);
    assert_eq!(library.collection_for_user(bob.id).unwrap().len(), 1);
}

#[test]
fn full_collection_scenario_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();

    let alice = library.create_user("Alice").unwrap();
    let entry = library.add_movie_to_user(&inception(), alice.id).unwrap();
    assert_eq!(entry.movie_rating, None);

    library.rate_movie(entry.id, 9.0).unwrap();

    let entries = library.collection_for_user(alice.id).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].movie_rating, Some(9.0));

    let removed = library
        .remove_movie_from_user(alice.id, entry.movie_id)
        .unwrap();
    assert_eq!(removed.movie.release_year, 2010);
    assert!(removed.purged);

    assert!(library.list_movies().is_empty());
    assert!(library.collection_for_user(alice.id).unwrap().is_empty());
}
