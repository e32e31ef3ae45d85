//! Session ID service
//!
//! A dedicated thread owns a single generator and hands freshly generated tokens to callers
//! through a channel, one token per receive. Generator state never leaves that thread, so no
//! locking is needed around generation; callers queue on the shared receiver instead.

use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use crate::error::{LogError, Result};

/// Length of every generated token
pub const ID_LENGTH: usize = 12;

const ALPHABET: &[u8; 64] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_-";

const COUNTER_BITS: u32 = 48;
const COUNTER_MASK: u64 = (1 << COUNTER_BITS) - 1;
const COUNTER_SYMBOLS: usize = 8;
const MULTIPLIER: u64 = 0x5_DEEC_E66D;

static GLOBAL: OnceLock<IdService> = OnceLock::new();

/// Produces unique tokens: a keyed permutation of a 48-bit counter followed by random symbols
struct IdGenerator {
    rng: StdRng,
    counter: u64,
    key: u64,
}

impl IdGenerator {
    fn seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let key = rng.gen::<u64>() & COUNTER_MASK;
        let counter = rng.gen::<u64>() & COUNTER_MASK;
        Self { rng, counter, key }
    }

    fn next_token(&mut self) -> String {
        let mut value = permute(self.counter, self.key);
        self.counter = (self.counter + 1) & COUNTER_MASK;

        let mut token = String::with_capacity(ID_LENGTH);
        for _ in 0..COUNTER_SYMBOLS {
            token.push(ALPHABET[(value & 63) as usize] as char);
            value >>= 6;
        }
        for _ in COUNTER_SYMBOLS..ID_LENGTH {
            token.push(ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char);
        }
        token
    }
}

/// Bijection on 48-bit values: xor with the key, multiply by an odd constant, xorshift
fn permute(n: u64, key: u64) -> u64 {
    let x = ((n ^ key).wrapping_mul(MULTIPLIER)) & COUNTER_MASK;
    x ^ (x >> (COUNTER_BITS / 2))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Handle to a running ID generator
///
/// Clones share the same generator. The generator thread exits once every handle is dropped.
#[derive(Clone)]
pub struct IdService {
    receiver: Arc<Mutex<mpsc::Receiver<String>>>,
}

impl IdService {
    /// Start a generator seeded from the clock
    pub fn start() -> Result<Self> {
        Self::start_with_seed(clock_seed())
    }

    /// Start a generator with an explicit seed. Equal seeds yield equal token sequences.
    pub fn start_with_seed(seed: u64) -> Result<Self> {
        // Capacity 1 is the smallest the channel allows: at most one token waits unclaimed.
        let (sender, receiver) = mpsc::channel(1);
        let mut generator = IdGenerator::seeded(seed);

        thread::Builder::new()
            .name("sessionlog-ids".to_string())
            .spawn(move || {
                while sender.blocking_send(generator.next_token()).is_ok() {}
                debug!("ID service stopped");
            })
            .map_err(LogError::IdServiceStart)?;

        debug!("ID service started");

        Ok(Self {
            receiver: Arc::new(Mutex::new(receiver)),
        })
    }

    /// The process-wide service, started on first access
    pub fn global() -> Result<&'static IdService> {
        if let Some(service) = GLOBAL.get() {
            return Ok(service);
        }
        // A racing caller may win the slot; the loser's service shuts down when dropped.
        let service = Self::start()?;
        Ok(GLOBAL.get_or_init(|| service))
    }

    /// Wait for the next token
    ///
    /// Fails only if the generator thread is gone.
    pub async fn next_id(&self) -> Result<String> {
        let mut receiver = self.receiver.lock().await;
        receiver.recv().await.ok_or(LogError::IdServiceStopped)
    }

    /// Like [`next_id`](Self::next_id), but gives up after `timeout`
    pub async fn next_id_timeout(&self, timeout: Duration) -> Result<String> {
        tokio::time::timeout(timeout, self.next_id())
            .await
            .map_err(|_| LogError::IdTimeout)?
    }

    /// Blocking variant of [`next_id`](Self::next_id) for synchronous callers
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous execution context.
    pub fn next_id_blocking(&self) -> Result<String> {
        let mut receiver = self.receiver.blocking_lock();
        receiver.blocking_recv().ok_or(LogError::IdServiceStopped)
    }
}

impl std::fmt::Debug for IdService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_shape() {
        let mut generator = IdGenerator::seeded(7);
        for _ in 0..100 {
            let token = generator.next_token();
            assert_eq!(token.len(), ID_LENGTH);
            assert!(token.bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_permute_is_injective_over_a_window() {
        let key = 0xABCD_EF01_2345 & COUNTER_MASK;
        let start = COUNTER_MASK - 5_000;
        let values: HashSet<u64> = (0..10_000u64)
            .map(|i| permute((start + i) & COUNTER_MASK, key))
            .collect();
        assert_eq!(values.len(), 10_000);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = IdGenerator::seeded(42);
        let mut b = IdGenerator::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.next_token(), b.next_token());
        }
    }

    #[test]
    fn test_next_id_blocking() {
        let service = IdService::start().unwrap();
        let first = service.next_id_blocking().unwrap();
        let second = service.next_id_blocking().unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_seeded_services_agree() {
        let a = IdService::start_with_seed(99).unwrap();
        let b = IdService::start_with_seed(99).unwrap();
        assert_eq!(a.next_id().await.unwrap(), b.next_id().await.unwrap());
        assert_eq!(a.next_id().await.unwrap(), b.next_id().await.unwrap());
    }

    #[tokio::test]
    async fn test_next_id_timeout_succeeds() {
        let service = IdService::start().unwrap();
        let token = service
            .next_id_timeout(Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(token.len(), ID_LENGTH);
    }

    #[tokio::test]
    async fn test_global_is_shared() {
        let a = IdService::global().unwrap();
        let b = IdService::global().unwrap();
        assert!(Arc::ptr_eq(&a.receiver, &b.receiver));
        assert_ne!(a.next_id().await.unwrap(), b.next_id().await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_next_id_is_unique() {
        let service = IdService::start().unwrap();

        let handles: Vec<_> = (0..10_000)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.next_id().await.unwrap() })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            assert!(seen.insert(handle.await.unwrap()));
        }
        assert_eq!(seen.len(), 10_000);
    }
}
