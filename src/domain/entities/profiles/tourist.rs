use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ProfileStatus;

/// 관광객 프로필
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tourist {
    #[serde(rename = "_id")]
    pub id: i64,
    pub user_id: i64,
    pub nationality: String,
    pub language: String,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    #[serde(default)]
    pub preferences: String,
    #[serde(default)]
    pub special_needs: String,
    pub status: ProfileStatus,
    pub created_at: DateTime<Utc>,
}

/// 생성 전 관광객 프로필. 날짜는 요청 검증 단계에서 이미 파싱된 값입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTourist {
    pub nationality: String,
    pub language: String,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub preferences: String,
    pub special_needs: String,
}

impl NewTourist {
    /// 새 프로필은 항상 `pending` 상태로 시작합니다.
    pub fn into_tourist(self, id: i64, user_id: i64, created_at: DateTime<Utc>) -> Tourist {
        Tourist {
            id,
            user_id,
            nationality: self.nationality,
            language: self.language,
            arrival_date: self.arrival_date,
            departure_date: self.departure_date,
            preferences: self.preferences,
            special_needs: self.special_needs,
            status: ProfileStatus::Pending,
            created_at,
        }
    }
}
