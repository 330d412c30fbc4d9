/*
 * Responsibility
 * - テーブル単位の SQLx 操作
 * - 上位には RepoError とドメイン寄りの Row 型だけを見せる
 */
pub mod error;
pub mod hackathon_repo;
pub mod score_repo;
pub mod user_repo;
