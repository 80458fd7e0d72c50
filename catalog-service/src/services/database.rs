use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    /// Round-trip to the server. The driver connects lazily, so startup uses
    /// this to confirm the database is actually reachable before the service
    /// accepts traffic.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB ping failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    /// Indexes backing the list queries: newest-first, top-rated, and
    /// per-submitter lookups.
    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for catalog-service");

        let movies = self.movies();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("latest_lookup".to_string())
                    .build(),
            )
            .build();

        movies.create_index(created_at_index, None).await.map_err(|e| {
            tracing::error!("Failed to create created_at index on movies collection: {}", e);
            AppError::from(e)
        })?;

        let rating_index = IndexModel::builder()
            .keys(doc! { "rating": -1 })
            .options(
                IndexOptions::builder()
                    .name("top_rated_lookup".to_string())
                    .build(),
            )
            .build();

        movies.create_index(rating_index, None).await.map_err(|e| {
            tracing::error!("Failed to create rating index on movies collection: {}", e);
            AppError::from(e)
        })?;

        let added_by_index = IndexModel::builder()
            .keys(doc! { "addedBy": 1 })
            .options(
                IndexOptions::builder()
                    .name("added_by_lookup".to_string())
                    .build(),
            )
            .build();

        movies.create_index(added_by_index, None).await.map_err(|e| {
            tracing::error!("Failed to create addedBy index on movies collection: {}", e);
            AppError::from(e)
        })?;

        tracing::info!("Created indexes on movies.(created_at, rating, addedBy)");

        Ok(())
    }

    /// The catalog proper. Documents are schemaless; the database only
    /// enforces `_id` uniqueness.
    pub fn movies(&self) -> Collection<Document> {
        self.db.collection("movies")
    }

    /// Watch-list entries: unvalidated payloads, queried only as a full list.
    pub fn watch_list(&self) -> Collection<Document> {
        self.db.collection("watch_list")
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
