/*
 * Responsibility
 * - 認証 service (token 検証 + identity 解決)
 */
pub mod auth;
