//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable that exercises `movieshelf_core` end to
//!   end against an in-memory database.
//! - Keep output deterministic for quick local sanity checks.

use movieshelf_core::db::open_db_in_memory;
use movieshelf_core::{
    default_log_level, init_logging, parse_user_rating, LibraryService, NewMovie,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("movieshelf_core version={}", movieshelf_core::core_version());

    let log_dir = std::env::temp_dir().join("movieshelf-cli-logs");
    match init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        Ok(()) => println!("logging to {}", log_dir.display()),
        // The probe stays useful without logs; report and carry on.
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    let conn = open_db_in_memory()?;
    let library = LibraryService::try_new(&conn)?;

    let alice = library.create_user("Alice")?;
    println!("created user id={} name={}", alice.id, alice.name);

    let mut draft = NewMovie::new("Inception", 2010);
    draft.director = Some("Christopher Nolan".to_string());
    draft.rating = Some(8.8);
    let entry = library.add_movie_to_user(&draft, alice.id)?;
    println!("added movie_id={} entry_id={}", entry.movie_id, entry.id);

    let score = parse_user_rating("9,0")?;
    let rated = library.rate_movie(entry.id, score)?;
    println!(
        "rated entry_id={} movie_rating={}",
        rated.id,
        rated.movie_rating.unwrap_or_default()
    );

    let removed = library.remove_movie_from_user(alice.id, entry.movie_id)?;
    println!(
        "removed title={} purged={}",
        removed.movie.title, removed.purged
    );

    let deleted = library.delete_user(alice.id)?;
    println!(
        "deleted user name={} purged_movies={}",
        deleted.name, deleted.purged_movies
    );

    println!(
        "remaining users={} movies={}",
        library.list_users().len(),
        library.list_movies().len()
    );

    Ok(())
}
