//! # 時刻取得の抽象化
//!
//! 現在時刻の取得を抽象化し、テスト時に固定時刻を注入できるようにする。
//!
//! ## 設計方針
//!
//! - エンティティのメソッドは `now: DateTime<Utc>` を引数で受け取る
//! - ユースケース層が `Clock` トレイト経由で現在時刻を取得して渡す
//! - テストでは `FixedClock` で任意の時刻を固定できる

use chrono::{DateTime, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
    /// 現在の UTC 時刻を返す
    fn now(&self) -> DateTime<Utc>;
}

/// システム時計
///
/// 本番環境で使用する実装。`Utc::now()` をそのまま返す。
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定時計
///
/// テスト用の実装。コンストラクタで指定した時刻を常に返す。
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
