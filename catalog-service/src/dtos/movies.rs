use mongodb::bson::{doc, Document};
use serde::Deserialize;

/// Query parameters for `/movie/my-collection`.
#[derive(Debug, Deserialize)]
pub struct MyCollectionParams {
    pub email: String,
}

/// Query parameters for `/genreMovies`. Everything is optional; absent
/// parameters impose no constraint.
#[derive(Debug, Default, Deserialize)]
pub struct GenreFilterParams {
    pub genres: Option<String>,
    #[serde(rename = "minRating")]
    pub min_rating: Option<f64>,
    #[serde(rename = "maxRating")]
    pub max_rating: Option<f64>,
}

impl GenreFilterParams {
    /// Compose the genre set and rating bounds into one AND-ed filter.
    ///
    /// `genres` is a comma-separated list matched with `$in`, which gives
    /// set membership whether the stored `genre` is a scalar or an array.
    /// Rating bounds are inclusive.
    pub fn into_filter(self) -> Document {
        let mut filter = doc! {};

        if let Some(genres) = self.genres {
            let genres: Vec<String> = genres
                .split(',')
                .map(|genre| genre.trim().to_string())
                .filter(|genre| !genre.is_empty())
                .collect();
            if !genres.is_empty() {
                filter.insert("genre", doc! { "$in": genres });
            }
        }

        let mut rating = doc! {};
        if let Some(min) = self.min_rating {
            rating.insert("$gte", min);
        }
        if let Some(max) = self.max_rating {
            rating.insert("$lte", max);
        }
        if !rating.is_empty() {
            filter.insert("rating", rating);
        }

        filter
    }
}
