// src/core/integer_buffer.rs

use log::{debug, info};
use std::collections::VecDeque;
use crate::config::BufferConfig;
use crate::error::Result;

/// FIFO store of raw integers fetched ahead of demand.
///
/// Refills are requested through a caller-supplied closure so the buffer stays
/// independent of the transport. Each refill grows the next batch size by the
/// configured growth factor, up to `max_batch_size`.
#[derive(Debug, Clone)]
pub struct IntegerBuffer {
    values: VecDeque<i64>,
    batch_size: usize,
    growth_factor: usize,
    max_batch_size: usize,
}

impl IntegerBuffer {
    pub fn new(config: &BufferConfig) -> Self {
        IntegerBuffer {
            values: VecDeque::new(),
            batch_size: config.initial_batch_size.clamp(1, config.max_batch_size.max(1)),
            growth_factor: config.growth_factor.max(1),
            max_batch_size: config.max_batch_size.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Size of the next refill request.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Removes and returns `count` values, refilling through `fetch` while the
    /// buffer holds fewer than `count`. On a failed refill the values already
    /// buffered are kept.
    pub fn take<F>(&mut self, count: usize, mut fetch: F) -> Result<Vec<i64>>
    where
        F: FnMut(usize) -> Result<Vec<i64>>,
    {
        while self.values.len() < count {
            let missing = count - self.values.len();
            let request = self.batch_size.max(missing).min(self.max_batch_size);
            debug!("Buffer holds {} of {} values, refilling {}", self.values.len(), count, request);

            let fetched = fetch(request)?;
            self.values.extend(fetched);
            self.grow();
        }

        Ok(self.values.drain(..count).collect())
    }

    fn grow(&mut self) {
        let next = self.batch_size.saturating_mul(self.growth_factor).min(self.max_batch_size);
        if next != self.batch_size {
            info!("Growing refill batch size {} -> {}", self.batch_size, next);
        }
        self.batch_size = next;
    }
}
