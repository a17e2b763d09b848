use crate::record::WordCountRecord;
use log::{debug, warn};
use std::num::NonZeroUsize;
use thiserror::Error;

/// The default subsampling step: every 100th word.
pub const DEFAULT_EVERY: usize = 100;

#[derive(Debug, Error, PartialEq)]
pub enum SampleError {
    #[error("subsampling step must be at least 1")]
    InvalidStep,
    /// The logarithm is undefined for this sample.
    #[error("cannot take the logarithm of sample {index} (count {count})")]
    NonPositiveCount { index: usize, count: f64 },
}

/// One subsampled record, remembering where in the input it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample<'a> {
    /// Zero-based index into the parsed records.
    pub rank: usize,
    pub word: &'a str,
    pub count: f64,
}

/// Take every `every`th record (indices 0, every, 2*every, ...), in input order.
pub fn subsample(records: &[WordCountRecord], every: NonZeroUsize) -> Vec<Sample<'_>> {
    let samples: Vec<_> = records
        .iter()
        .enumerate()
        .step_by(every.get())
        .map(|(rank, record)| Sample {
            rank,
            word: &record.word,
            count: record.count as f64,
        })
        .collect();
    debug!("took {} samples from {} records (every {})", samples.len(), records.len(), every);
    samples
}

/// Remove samples whose count has no logarithm, logging each one.
pub fn drop_non_positive(samples: &mut Vec<Sample<'_>>) {
    samples.retain(|sample| {
        if sample.count > 0.0 {
            true
        } else {
            warn!("dropping {:?} (rank {}) with count {}", sample.word, sample.rank, sample.count);
            false
        }
    });
}

/// Pair each sample's position with the natural log of its count.
///
/// Fails on the first count that is zero or negative; nothing is clamped.
pub fn log_points(samples: &[Sample<'_>]) -> Result<Vec<(usize, f64)>, SampleError> {
    samples
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            if sample.count > 0.0 {
                Ok((index, sample.count.ln()))
            } else {
                Err(SampleError::NonPositiveCount {
                    index,
                    count: sample.count,
                })
            }
        })
        .collect()
}
