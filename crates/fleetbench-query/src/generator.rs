//! Batch query generation.
//!
//! Query `i` of a batch is drawn from its own random stream derived from
//! the context seed and `i`, so a batch is identical whatever the worker
//! count or scheduling order.

use std::ops::Range;

use rayon::ThreadPool;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use fleetbench_context::BenchmarkContext;

use crate::error::{GenerateError, Result};
use crate::registry::ScenarioRegistry;
use crate::scenario::{GeneratedQuery, Scenario, ScenarioParams};

/// Generates queries for one registry against one context.
#[derive(Debug, Clone)]
pub struct QueryGenerator<'r> {
    registry: &'r ScenarioRegistry,
    context: BenchmarkContext,
    workers: usize,
}

impl<'r> QueryGenerator<'r> {
    /// `workers == 0` uses rayon's global pool.
    pub fn new(registry: &'r ScenarioRegistry, context: BenchmarkContext) -> Self {
        Self {
            registry,
            context,
            workers: 0,
        }
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn registry(&self) -> &'r ScenarioRegistry {
        self.registry
    }

    pub fn context(&self) -> &BenchmarkContext {
        &self.context
    }

    /// Generates the `index`-th query of scenario `id`.
    pub fn generate(
        &self,
        id: &str,
        params: &ScenarioParams,
        index: u64,
    ) -> Result<GeneratedQuery> {
        let mut stream = self.context.stream(index);
        self.registry.generate(id, &mut stream, params)
    }

    /// Generates `count` queries of scenario `id`, in index order.
    ///
    /// An unknown id fails the whole call. Per-query failures are kept in
    /// place so the caller sees which indices failed.
    pub fn generate_batch(
        &self,
        id: &str,
        params: &ScenarioParams,
        count: usize,
    ) -> Result<Vec<Result<GeneratedQuery>>> {
        let mut results = Vec::with_capacity(count);
        self.generate_chunked(id, params, count, count.max(1), |_, result| {
            results.push(result);
            Ok::<_, GenerateError>(())
        })?;
        Ok(results)
    }

    /// Generates `count` queries of scenario `id`, `chunk_size` indices at
    /// a time, handing each to `sink` in index order.
    ///
    /// At most one chunk is held in memory. Output is identical to
    /// [`generate_batch`](Self::generate_batch) for any chunk size. A sink
    /// error stops generation.
    pub fn generate_chunked<F, E>(
        &self,
        id: &str,
        params: &ScenarioParams,
        count: usize,
        chunk_size: usize,
        mut sink: F,
    ) -> std::result::Result<(), E>
    where
        F: FnMut(usize, Result<GeneratedQuery>) -> std::result::Result<(), E>,
        E: From<GenerateError>,
    {
        let scenario = *self.registry.scenario(id)?;
        let chunk_size = chunk_size.max(1);
        info!(
            scenario = id,
            count,
            chunk_size,
            workers = self.workers,
            seed = self.context.seed(),
            "generating query batch"
        );

        let pool = match self.workers {
            0 => None,
            workers => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .thread_name(|i| format!("fleetbench-gen-{i}"))
                    .build()
                    .map_err(GenerateError::from)?,
            ),
        };

        let mut failed = 0usize;
        for chunk_start in (0..count).step_by(chunk_size) {
            let indices = chunk_start..count.min(chunk_start + chunk_size);
            let chunk = self.run_indices(&scenario, params, indices, pool.as_ref());
            for (offset, result) in chunk.into_iter().enumerate() {
                failed += usize::from(result.is_err());
                sink(chunk_start + offset, result)?;
            }
        }

        if failed > 0 {
            warn!(scenario = id, failed, count, "some queries failed to generate");
        } else {
            debug!(scenario = id, count, "query batch complete");
        }
        Ok(())
    }

    fn run_indices(
        &self,
        scenario: &Scenario,
        params: &ScenarioParams,
        indices: Range<usize>,
        pool: Option<&ThreadPool>,
    ) -> Vec<Result<GeneratedQuery>> {
        let build = |index: usize| {
            let mut stream = self.context.stream(index as u64);
            scenario.generate(&mut stream, params)
        };

        match pool {
            Some(pool) => pool.install(|| indices.into_par_iter().map(build).collect()),
            None => indices.into_par_iter().map(build).collect(),
        }
    }
}
