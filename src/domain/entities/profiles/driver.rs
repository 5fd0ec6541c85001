use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ProfileStatus;

/// 기사 프로필
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    #[serde(rename = "_id")]
    pub id: i64,
    pub user_id: i64,
    pub license_number: String,
    pub vehicle_type: String,
    pub vehicle_model: String,
    pub vehicle_color: String,
    /// 쉼표로 구분된 사용 언어 목록
    pub languages: String,
    /// 경력 (년)
    pub experience: u32,
    pub rating: f32,
    pub status: ProfileStatus,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDriver {
    pub license_number: String,
    pub vehicle_type: String,
    pub vehicle_model: String,
    pub vehicle_color: String,
    pub languages: String,
    pub experience: u32,
}

impl NewDriver {
    /// 심사 전 기사: 평점 0, `pending`, 배차 가능 상태
    pub fn into_driver(self, id: i64, user_id: i64, created_at: DateTime<Utc>) -> Driver {
        Driver {
            id,
            user_id,
            license_number: self.license_number,
            vehicle_type: self.vehicle_type,
            vehicle_model: self.vehicle_model,
            vehicle_color: self.vehicle_color,
            languages: self.languages,
            experience: self.experience,
            rating: 0.0,
            status: ProfileStatus::Pending,
            is_available: true,
            created_at,
        }
    }
}
