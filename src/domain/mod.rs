//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈로, 저장되는 엔티티와 API 경계의 데이터 구조를 정의합니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities      - 저장소에 영속되는 객체 (User, Tourist, Driver)
//! ├── DTOs          - 데이터 전송 객체 (Request/Response)
//! └── Models        - 토큰 클레임, 외부 ID 프로바이더 프로필, 인증 주체
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```
//!
//! ## 모듈 구성
//!
//! ### [`entities`] - 핵심 도메인 엔티티
//!
//! - **사용자**: 숫자 ID, 이메일(고유), bcrypt 해시, 이름, Google ID(선택, 고유), 역할
//! - **프로필**: 역할별 부가 정보 (관광객 / 기사). 회원가입 시 사용자와 같은 작업 단위로 생성됩니다.
//!
//! 사용자는 회원가입 또는 첫 Google 로그인 시 생성되고, 역할 지정과 Google ID 연결로만
//! 변경됩니다. 이 서비스에서 삭제되는 경우는 없습니다.
//!
//! ### [`dto`] - 데이터 전송 객체
//!
//! API 경계에서 주고받는 요청/응답 구조체입니다. 요청 DTO는 `validator`로 형식을 검증하고,
//! 응답 DTO는 비밀번호 해시 같은 민감 정보를 포함하지 않습니다.
//!
//! ```rust,ignore
//! use validator::Validate;
//!
//! let request: RegisterRequest = serde_json::from_str(body)?;
//! request.validate()?;
//! ```
//!
//! ### [`models`] - 인증 모델
//!
//! 저장되지 않는 값 객체들입니다.
//!
//! ```text
//! models/
//! ├── auth/     - 인증 미들웨어가 요청 확장에 넣는 인증 주체
//! ├── oauth/    - Google userinfo 응답 (연합 프로필)
//! └── token/    - JWT 클레임
//! ```

pub mod entities;
pub mod dto;
pub mod models;
