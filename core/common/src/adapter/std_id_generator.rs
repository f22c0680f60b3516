//! DocId を生成する IdGenerator の標準実装（Clock + グローバルシーケンス）
//!
//! 形式: base62(0-9,A-Z,a-z) 10文字。値 = (ms since 2024-01-01)<<12 | seq(0..4095)。
//! 辞書順＝数値順なので、ファイル名でソートすると作成順に並ぶ。

use crate::domain::DocId;
use crate::ports::outbound::{Clock, IdGenerator};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static LAST_ID: AtomicU64 = AtomicU64::new(0);

const EPOCH_MS: u64 = 1_704_067_200_000; // 2024-01-01 00:00:00 UTC
const SEQ_BITS: u64 = 12;
const BASE: u64 = 62;
const WIDTH: usize = 10;

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Clock + グローバルシーケンスで DocId を生成する標準実装
pub struct StdIdGenerator {
    clock: Arc<dyn Clock>,
}

impl StdIdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl IdGenerator for StdIdGenerator {
    fn next_id(&self) -> DocId {
        let ms_rel = self.clock.now_ms().saturating_sub(EPOCH_MS);
        let base = ms_rel << SEQ_BITS;
        // 同一ms内（または時計の巻き戻り）では前回値 +1 で単調増加を保つ
        let mut prev = LAST_ID.load(Ordering::SeqCst);
        loop {
            let next = if base > prev { base } else { prev + 1 };
            match LAST_ID.compare_exchange(prev, next, Ordering::SeqCst, Ordering::SeqCst) {
                Ok(_) => return DocId::new(to_base62(next)),
                Err(actual) => prev = actual,
            }
        }
    }
}

fn to_base62(mut n: u64) -> String {
    let mut buf = [b'0'; WIDTH];
    for slot in buf.iter_mut().rev() {
        *slot = ALPHABET[(n % BASE) as usize];
        n /= BASE;
    }
    buf.iter().map(|&b| b as char).collect()
}
