/*
 * Responsibility
 * - 認証済みリクエストに付与される「誰か」の型
 * - middleware が request extensions に入れ、handler は extractor 経由で受け取る
 * - password hash は持たない (store 側で select しない)
 */
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::role::Role;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub role: Role,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_identity_has_no_password_field() {
        let identity = Identity {
            id: Uuid::new_v4(),
            user_name: "ada".into(),
            email: "ada@example.com".into(),
            role: Role::Admin,
            image_url: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(identity).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.keys().all(|k| !k.to_ascii_lowercase().contains("password")));
        assert_eq!(obj["role"], "admin");
        assert_eq!(obj["userName"], "ada");
    }
}
