/*
 * Responsibility
 * - access: 認証 gate (credential → Identity)
 * - role: 認可 gate (Identity.role ∈ 許可リスト)
 */
pub mod access;
pub mod role;

pub use role::RoleRule;
