pub mod documents;
pub mod movies;

pub use documents::{collect_documents, document_to_json, inserted_id_hex};
pub use movies::{GenreFilterParams, MyCollectionParams};
