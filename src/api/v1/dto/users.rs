/*
 * Responsibility
 * - Users の request/response DTO
 * - response は Identity をそのまま返す (password 系の項目は元々持たない)
 */
use serde::Deserialize;

use crate::domain::Role;

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}
