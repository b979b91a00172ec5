//! Nearest-neighbor retrieval over the store/index pair.

use crate::rag::embeddings::EmbeddingProvider;
use crate::rag::store::ChunkStore;
use crate::types::{AppError, Result, RetrievalResult};
use tracing::debug;
use vade_vector::{similarity_from_distance, FlatIndex};

/// Retrieves the chunks nearest to a query.
///
/// Owns the loaded store/index pair plus the embedding provider used to
/// vectorize queries, which must be the same model the pair was built with.
pub struct Retriever {
    store: ChunkStore,
    index: FlatIndex,
    embedder: Box<dyn EmbeddingProvider>,
}

impl Retriever {
    /// Build a retriever over a loaded pair.
    pub fn new(store: ChunkStore, index: FlatIndex, embedder: Box<dyn EmbeddingProvider>) -> Self {
        Self {
            store,
            index,
            embedder,
        }
    }

    /// Number of chunks available for retrieval.
    pub fn len(&self) -> usize {
        self.store.chunks.len()
    }

    /// True when nothing has been indexed.
    pub fn is_empty(&self) -> bool {
        self.store.chunks.is_empty()
    }

    /// Retrieve the `k` chunks nearest to `query`, best match first.
    ///
    /// An empty or whitespace-only query retrieves nothing (no embedding
    /// call is made). Results carry a 1-based rank, the raw squared L2
    /// distance, and its `1 / (1 + distance)` transform for display.
    ///
    /// An index position with no matching chunk means the pair on disk was
    /// not written together; that is a consistency error, not a miss.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievalResult>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.embedder.embed(query).await?;
        let neighbors = self.index.search(&query_vector, k)?;

        let mut results = Vec::with_capacity(neighbors.len());
        for (i, neighbor) in neighbors.iter().enumerate() {
            let chunk = self.store.chunks.get(neighbor.position).ok_or_else(|| {
                AppError::Consistency(format!(
                    "Index position {} has no chunk (store holds {})",
                    neighbor.position,
                    self.store.chunks.len()
                ))
            })?;

            results.push(RetrievalResult {
                rank: i + 1,
                chunk: chunk.clone(),
                distance: neighbor.distance,
                similarity: similarity_from_distance(neighbor.distance),
            });
        }

        debug!(results = results.len(), k, "Retrieved context");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chunk;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct StubEmbedder {
        vector: Vec<f32>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl EmbeddingProvider for StubEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.vector.clone())
        }

        async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts.iter().map(|_| self.vector.clone()).collect())
        }

        fn dimensions(&self) -> usize {
            self.vector.len()
        }

        fn model_name(&self) -> &str {
            "stub"
        }
    }

    fn chunk(id: u64, section: &str) -> Chunk {
        Chunk {
            id,
            source_url: "https://example.com/a".to_string(),
            page_title: "Page".to_string(),
            section_title: section.to_string(),
            content: format!("Content of {}", section),
            word_count: 3,
        }
    }

    fn retriever_with(vectors: &[Vec<f32>], chunks: Vec<Chunk>, query_vector: Vec<f32>) -> (Retriever, Arc<AtomicUsize>) {
        let index = FlatIndex::build(query_vector.len(), vectors).unwrap();
        let store = ChunkStore::new("stub", query_vector.len(), chunks);
        let calls = Arc::new(AtomicUsize::new(0));
        let embedder = Box::new(StubEmbedder {
            vector: query_vector,
            calls: calls.clone(),
        });
        (Retriever::new(store, index, embedder), calls)
    }

    #[tokio::test]
    async fn test_empty_query_is_a_no_op() {
        let (retriever, calls) = retriever_with(
            &[vec![0.0, 0.0]],
            vec![chunk(1, "A")],
            vec![0.0, 0.0],
        );

        let results = retriever.retrieve("   ", 3).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_results_are_ranked_by_distance() {
        // Query sits at the origin; positions 1, 0, 2 are nearest in order.
        let (retriever, _) = retriever_with(
            &[vec![2.0, 0.0], vec![1.0, 0.0], vec![3.0, 0.0]],
            vec![chunk(1, "A"), chunk(2, "B"), chunk(3, "C")],
            vec![0.0, 0.0],
        );

        let results = retriever.retrieve("anything", 3).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[0].chunk.section_title, "B");
        assert_eq!(results[1].chunk.section_title, "A");
        assert_eq!(results[2].chunk.section_title, "C");
        assert!(results[0].distance <= results[1].distance);
    }

    #[tokio::test]
    async fn test_similarity_transform() {
        let (retriever, _) = retriever_with(
            &[vec![0.0, 0.0], vec![3.0, 0.0]],
            vec![chunk(1, "A"), chunk(2, "B")],
            vec![0.0, 0.0],
        );

        let results = retriever.retrieve("anything", 2).await.unwrap();
        // Exact match: distance 0, similarity 1. Second hit: 1 / (1 + 9).
        assert_eq!(results[0].distance, 0.0);
        assert_eq!(results[0].similarity, 1.0);
        assert!((results[1].similarity - 0.1).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_k_larger_than_index_is_capped() {
        let (retriever, _) = retriever_with(
            &[vec![1.0, 0.0]],
            vec![chunk(1, "A")],
            vec![0.0, 0.0],
        );

        let results = retriever.retrieve("anything", 10).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_index_yields_no_results() {
        let (retriever, _) = retriever_with(&[] as &[Vec<f32>], vec![], vec![0.0, 0.0]);
        let results = retriever.retrieve("anything", 3).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_desynchronized_pair_is_a_consistency_error() {
        // Index has two vectors but the store only has one chunk. open_pair
        // refuses such a pair; building it by hand shows the runtime guard.
        let index = FlatIndex::build(2, &[vec![0.0, 0.0], vec![1.0, 0.0]]).unwrap();
        let store = ChunkStore::new("stub", 2, vec![chunk(1, "A")]);
        let embedder = Box::new(StubEmbedder {
            vector: vec![0.5, 0.0],
            calls: Arc::new(AtomicUsize::new(0)),
        });
        let retriever = Retriever::new(store, index, embedder);

        let err = retriever.retrieve("anything", 2).await.unwrap_err();
        assert!(matches!(err, AppError::Consistency(_)));
    }
}
