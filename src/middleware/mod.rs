/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth (認証/認可 gate), cors, http (request-id / trace / limit / timeout)
 */
pub mod auth;
pub mod cors;
pub mod http;
