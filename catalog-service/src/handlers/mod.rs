pub mod health;
pub mod movies;
pub mod watchlist;

pub use health::{health_check, liveness, metrics};
pub use movies::{
    create_movie, delete_movie, get_movie, latest_movies, list_movies, movies_by_genre,
    my_collection, top_movies, update_movie,
};
pub use watchlist::{add_watch_list_entry, list_watch_list};
