//! The movie library on disk.
//!
//! - [`LibraryStore`] persists the scan folders and known genres.
//! - [`scan_movies`] lists the movies below a folder.
//! - [`move_movie`] files a movie under a genre folder.

mod error;
mod mover;
mod scanner;
mod store;
mod types;

pub use error::LibraryError;
pub use mover::{ensure_genre_folder, move_movie};
pub use scanner::{check_folder_access, scan_movies};
pub use store::LibraryStore;
pub use types::{is_movie_file, LibraryDocument, MovieFile, MOVIE_EXTENSIONS, UNCATEGORIZED};
