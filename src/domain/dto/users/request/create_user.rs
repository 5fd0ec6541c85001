//! # 회원가입 요청 DTO
//!
//! 이메일/패스워드 회원가입 요청과 역할별 프로필 입력을 정의합니다.
//!
//! ## 검증 규칙
//!
//! ### 이메일 (`email`)
//! - 이메일 형식 준수
//! - 중복 여부는 저장소의 unique 인덱스로 보장 (409)
//!
//! ### 비밀번호 (`password`)
//! - 최소 길이: 8자
//!
//! ### 역할 (`role`)
//! - `tourist`, `driver` 또는 생략. 해석은 서비스 계층에서 수행
//! - `tourist`이면 `tourist` 프로필 입력이 필요하고, 날짜는 `YYYY-MM-DD`
//! - `driver`이면 `driver` 프로필 입력은 선택
//!
//! ## 요청 예제
//!
//! ```json
//! {
//!   "email": "ana@example.com",
//!   "password": "correct-horse",
//!   "name": "Ana",
//!   "role": "tourist",
//!   "tourist": {
//!     "nationality": "AR",
//!     "language": "es",
//!     "arrival_date": "2025-03-01",
//!     "departure_date": "2025-03-15"
//!   }
//! }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::profiles::{NewDriver, NewTourist};
use crate::errors::AppError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 회원가입 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    /// 요청한 역할 문자열. 빈 문자열은 미지정으로 취급합니다.
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub tourist: Option<TouristDetails>,

    #[serde(default)]
    #[validate(nested)]
    pub driver: Option<DriverDetails>,
}

/// 관광객 프로필 입력
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TouristDetails {
    #[validate(length(min = 1, message = "Nationality is required"))]
    pub nationality: String,

    #[validate(length(min = 1, message = "Language is required"))]
    pub language: String,

    /// `YYYY-MM-DD`
    pub arrival_date: String,

    /// `YYYY-MM-DD`
    pub departure_date: String,

    #[serde(default)]
    pub preferences: String,

    #[serde(default)]
    pub special_needs: String,
}

impl TouristDetails {
    /// 날짜를 파싱하여 저장 가능한 프로필로 변환합니다.
    ///
    /// 사용자 생성 전에 호출되므로 날짜 형식 오류는 아무것도 저장되지 않은 상태에서 400이 됩니다.
    pub fn into_new_tourist(self) -> Result<NewTourist, AppError> {
        let arrival_date = NaiveDate::parse_from_str(self.arrival_date.trim(), DATE_FORMAT)
            .map_err(|_| {
                AppError::ValidationError("Invalid arrival date format. Use YYYY-MM-DD".to_string())
            })?;
        let departure_date = NaiveDate::parse_from_str(self.departure_date.trim(), DATE_FORMAT)
            .map_err(|_| {
                AppError::ValidationError(
                    "Invalid departure date format. Use YYYY-MM-DD".to_string(),
                )
            })?;

        Ok(NewTourist {
            nationality: self.nationality,
            language: self.language,
            arrival_date,
            departure_date,
            preferences: self.preferences,
            special_needs: self.special_needs,
        })
    }
}

/// 기사 프로필 입력
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DriverDetails {
    #[validate(length(min = 1, message = "License number is required"))]
    pub license_number: String,

    #[validate(length(min = 1, message = "Vehicle type is required"))]
    pub vehicle_type: String,

    #[validate(length(min = 1, message = "Vehicle model is required"))]
    pub vehicle_model: String,

    #[validate(length(min = 1, message = "Vehicle color is required"))]
    pub vehicle_color: String,

    /// 쉼표로 구분된 언어 목록
    #[validate(length(min = 1, message = "At least one language is required"))]
    pub languages: String,

    /// 경력 (년)
    #[serde(default)]
    pub experience: u32,
}

impl From<DriverDetails> for NewDriver {
    fn from(details: DriverDetails) -> Self {
        Self {
            license_number: details.license_number,
            vehicle_type: details.vehicle_type,
            vehicle_model: details.vehicle_model,
            vehicle_color: details.vehicle_color,
            languages: details.languages,
            experience: details.experience,
        }
    }
}
