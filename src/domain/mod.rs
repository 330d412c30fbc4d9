/*
 * Responsibility
 * - DB スキーマを写したドメイン型 (Role / Identity / Hackathon ...)
 * - HTTP / sqlx に依存しない純粋なロジック (role 判定, 結果集計)
 */
pub mod hackathon;
pub mod identity;
pub mod results;
pub mod role;
pub mod scoring;

pub use identity::Identity;
pub use role::{Role, satisfies};
