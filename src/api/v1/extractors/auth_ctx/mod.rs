/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - 認証済みリクエストの Identity を handler に提供する
 * - Identity の型は domain 側、axum 依存はここ (core) に閉じ込める
 */

mod core;

pub use core::CurrentUser;
