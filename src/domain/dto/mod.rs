//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 데이터를 전송하기 위한 객체들을 정의하는 모듈입니다.
//! 클라이언트와 서버 간의 데이터 계약(Contract)을 명확히 정의합니다.
//!
//! ## 설계 원칙
//!
//! - **유효성 검증 내장**: 요청 DTO는 `validator` derive로 형식을 검증하고,
//!   실패 메시지는 그대로 400 응답의 `error` 필드가 됩니다.
//! - **내부 표현과 외부 표현 분리**: 응답 DTO는 비밀번호 해시를 포함하지 않습니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! └── users/
//!     ├── request/        # 요청 DTO (클라이언트 → 서버)
//!     │   ├── create_user.rs    - 회원가입 (관광객/기사 프로필 포함)
//!     │   └── auth_request.rs   - 로그인, 역할 지정, OAuth 콜백
//!     └── response/       # 응답 DTO (서버 → 클라이언트)
//!         └── user_response.rs
//! ```

pub mod users;

pub use users::*;
