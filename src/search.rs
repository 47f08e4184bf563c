// Parallel fixed-point search over the 32-bit candidate space
//
// Workers partition the space by residue class: worker i of N tests the
// candidates i, i+N, i+2N, ... with wrapping arithmetic. Each trial resumes
// the shared prefix checksum over the candidate's hex text and the suffix
// bytes, so only ~16 bytes plus the tail of the file are hashed per attempt
// regardless of file size.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

use crate::checksum::crc32;
use crate::marker::{render_hex, splice, HEX_LEN};

/// Size of the full candidate space (every 32-bit value).
const CANDIDATE_SPACE: u64 = 1 << 32;

/// Fallback worker count when the runtime cannot report parallelism.
const DEFAULT_WORKERS: usize = 4;

// =============================================================================
// Configuration
// =============================================================================

/// Tuning knobs for a search run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of worker threads; also the candidate stride.
    pub workers: usize,
    /// Interval between progress log lines.
    pub progress_interval: Duration,
    /// Iteration budget per worker. The default covers the worker's whole
    /// residue class, so the union of all workers covers [0, 2^32) and the
    /// search terminates even when no fixed point exists.
    pub attempts_per_worker: u64,
}

impl SearchConfig {
    /// Build a config sized to the detected hardware parallelism.
    pub fn detect() -> Self {
        let workers = match num_cpus::get() {
            0 => DEFAULT_WORKERS,
            n => n,
        };
        Self {
            workers,
            progress_interval: Duration::from_secs(1),
            attempts_per_worker: per_worker_budget(workers),
        }
    }
}

/// Iterations each of `workers` threads needs to cover its residue class:
/// ceil(2^32 / workers). Rounding up means workers whose class is one short
/// revisit a wrapped value once, which is harmless; rounding down would leave
/// gaps.
pub fn per_worker_budget(workers: usize) -> u64 {
    let n = workers.max(1) as u64;
    CANDIDATE_SPACE.div_ceil(n)
}

// =============================================================================
// Outcome
// =============================================================================

/// Terminal result of a search run.
#[derive(Debug)]
pub enum SearchOutcome {
    /// A fixed point was found; `output` is the full spliced file content.
    Found {
        value: u32,
        output: Vec<u8>,
        attempts: u64,
        elapsed: Duration,
    },
    /// Every worker exhausted its budget without a hit.
    Exhausted { attempts: u64, elapsed: Duration },
}

// =============================================================================
// Shared search state
// =============================================================================

struct Winner {
    value: u32,
    output: Vec<u8>,
}

/// State shared across workers and the progress reporter.
///
/// `found` doubles as the stop signal and the publication gate: the winning
/// worker claims it with a compare-and-swap before touching `winner`, so two
/// simultaneous hits can never interleave their fields.
struct Shared {
    found: AtomicBool,
    attempts: AtomicU64,
    winner: Mutex<Option<Winner>>,
}

impl Shared {
    fn new() -> Self {
        Self {
            found: AtomicBool::new(false),
            attempts: AtomicU64::new(0),
            winner: Mutex::new(None),
        }
    }
}

// =============================================================================
// Worker
// =============================================================================

/// Search one residue class for a fixed point.
///
/// Per trial: render the candidate as 8 lowercase hex chars, resume the
/// prefix checksum over them, finish over the suffix, compare to the
/// candidate itself. Candidate advancement wraps on 32-bit overflow; the
/// iteration budget, not the wraparound, bounds the loop.
fn worker(
    content: &[u8],
    pos: usize,
    marker_len: usize,
    prefix_crc: u32,
    suffix: &[u8],
    start: u32,
    step: u32,
    budget: u64,
    shared: &Shared,
) {
    let mut candidate = start;
    let mut hex_buf = [0u8; HEX_LEN];

    for _ in 0..budget {
        if shared.found.load(Ordering::Acquire) {
            trace!(start, "stopping, another worker won");
            return;
        }

        render_hex(candidate, &mut hex_buf);
        let mid = crc32(prefix_crc, &hex_buf);
        let crc = crc32(mid, suffix);

        shared.attempts.fetch_add(1, Ordering::Relaxed);

        if crc == candidate {
            // First successful claim wins; a simultaneous finder that loses
            // the swap discards its hit and stops like everyone else.
            if shared
                .found
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                let output = splice(content, pos, marker_len, &hex_buf);
                *shared.winner.lock().unwrap() = Some(Winner {
                    value: candidate,
                    output,
                });
                debug!(value = format_args!("{:08x}", candidate), start, "claimed fixed point");
            }
            return;
        }

        candidate = candidate.wrapping_add(step);
    }

    debug!(start, budget, "residue class exhausted");
}

// =============================================================================
// Search driver
// =============================================================================

/// Run the parallel fixed-point search over `content`, whose marker span
/// starts at `pos` and spans `marker_len` bytes.
///
/// Blocks until every worker and the progress reporter have finished. The
/// prefix checksum and suffix span are computed once and shared read-only;
/// workers communicate only through the found flag and the attempt counter.
pub fn run_search(
    content: &[u8],
    pos: usize,
    marker_len: usize,
    config: &SearchConfig,
) -> SearchOutcome {
    let prefix_crc = crc32(0, &content[..pos]);
    let suffix = &content[pos + marker_len..];

    info!(
        workers = config.workers,
        prefix_len = pos,
        suffix_len = suffix.len(),
        "starting fixed-point search"
    );

    let shared = Shared::new();
    let done = AtomicBool::new(false);
    let started = Instant::now();

    thread::scope(|s| {
        let mut handles = Vec::with_capacity(config.workers);
        for i in 0..config.workers {
            let shared = &shared;
            handles.push(s.spawn(move || {
                worker(
                    content,
                    pos,
                    marker_len,
                    prefix_crc,
                    suffix,
                    i as u32,
                    config.workers as u32,
                    config.attempts_per_worker,
                    shared,
                )
            }));
        }

        // Progress reporter: one line per interval until the workers finish,
        // so at most one interval of staleness after a win or exhaustion.
        let reporter = s.spawn(|| {
            while !done.load(Ordering::Acquire) {
                thread::sleep(config.progress_interval);
                if done.load(Ordering::Acquire) {
                    break;
                }
                info!(attempts = shared.attempts.load(Ordering::Relaxed), "total tried");
            }
        });

        for handle in handles {
            let _ = handle.join();
        }
        done.store(true, Ordering::Release);
        let _ = reporter.join();
    });

    let elapsed = started.elapsed();
    let attempts = shared.attempts.load(Ordering::Relaxed);

    match shared.winner.into_inner().unwrap() {
        Some(Winner { value, output }) => SearchOutcome::Found {
            value,
            output,
            attempts,
            elapsed,
        },
        None => SearchOutcome::Exhausted { attempts, elapsed },
    }
}
