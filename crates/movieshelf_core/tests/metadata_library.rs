//! Caller-side flow: fetch metadata from a provider, convert it to a draft
//! and hand it to the library facade. The facade itself never touches the
//! provider.

use movieshelf_core::db::open_db_in_memory;
use movieshelf_core::{
    LibraryService, MetadataError, MetadataProvider, MovieMetadata, NewMovie,
};

struct StubProvider {
    known_title: &'static str,
}

impl MetadataProvider for StubProvider {
    fn fetch_by_title(&self, title: &str) -> Result<MovieMetadata, MetadataError> {
        if title != self.known_title {
            return Err(MetadataError::Lookup("Movie not found!".to_string()));
        }
        Ok(MovieMetadata {
            title: "Inception".to_string(),
            director: Some("Christopher Nolan".to_string()),
            year: Some("2010".to_string()),
            imdb_rating: Some("8.8".to_string()),
            poster: Some("https://example.com/inception.jpg".to_string()),
        })
    }
}

#[test]
fn fetched_metadata_flows_into_the_collection() {
    let provider = StubProvider {
        known_title: "Inception",
    };
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();
    let alice = library.create_user("Alice").unwrap();

    let metadata = provider.fetch_by_title("Inception").unwrap();
    let draft: NewMovie = metadata.to_movie_draft().unwrap();
    let entry = library.add_movie_to_user(&draft, alice.id).unwrap();

    let movie = library.get_movie(entry.movie_id).unwrap().unwrap();
    assert_eq!(movie.title, "Inception");
    assert_eq!(movie.director.as_deref(), Some("Christopher Nolan"));
    assert_eq!(movie.release_year, 2010);
    assert_eq!(movie.rating, Some(8.8));
    assert_eq!(
        movie.poster.as_deref(),
        Some("https://example.com/inception.jpg")
    );
    assert_eq!(entry.movie_rating, None);
}

#[test]
fn lookup_miss_never_reaches_the_library() {
    let provider = StubProvider {
        known_title: "Inception",
    };
    let conn = open_db_in_memory().unwrap();
    let library = LibraryService::try_new(&conn).unwrap();
    library.create_user("Alice").unwrap();

    let err = provider.fetch_by_title("Inceptoin").unwrap_err();
    assert!(matches!(err, MetadataError::Lookup(_)));
    assert!(library.list_movies().is_empty());
}

#[test]
fn metadata_without_year_cannot_become_a_draft() {
    let metadata = MovieMetadata {
        title: "Inception".to_string(),
        director: None,
        year: None,
        imdb_rating: None,
        poster: None,
    };
    assert!(matches!(
        metadata.to_movie_draft(),
        Err(MetadataError::MalformedResponse(_))
    ));
}
