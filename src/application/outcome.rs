use serde::{Deserialize, Serialize};

pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

/// Outcome classification shared by every service operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    Success,
    NotFound,
    BadData,
    SomethingWentWrong,
}

impl ResultCode {
    /// Code used for any failure that was not classified more precisely
    pub const DEFAULT: ResultCode = ResultCode::SomethingWentWrong;

    /// HTTP-style status for a transport layer sitting on top of the service
    pub fn status(&self) -> u16 {
        match self {
            Self::Success => 200,
            Self::BadData => 400,
            Self::NotFound => 404,
            Self::SomethingWentWrong => 500,
        }
    }
}

impl Default for ResultCode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub const DEFAULT_ERROR_STATUS: u16 = 500;

/// Uniform result returned by every `GroupsService` operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResult<T = ()> {
    pub success: bool,
    pub code: ResultCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ServiceResult<T> {
    /// Success without payload
    pub fn ok() -> Self {
        Self {
            success: true,
            code: ResultCode::Success,
            message: None,
            data: None,
        }
    }

    pub fn ok_with(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::ok()
        }
    }

    pub fn fail(code: ResultCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::fail(ResultCode::NotFound, message)
    }

    pub fn bad_data(message: impl Into<String>) -> Self {
        Self::fail(ResultCode::BadData, message)
    }

    pub fn something_went_wrong() -> Self {
        Self::fail(ResultCode::DEFAULT, DEFAULT_ERROR_MESSAGE)
    }

    pub fn status(&self) -> u16 {
        self.code.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ResultCode::Success.status(), 200);
        assert_eq!(ResultCode::BadData.status(), 400);
        assert_eq!(ResultCode::NotFound.status(), 404);
        assert_eq!(ResultCode::SomethingWentWrong.status(), 500);
        assert_eq!(ResultCode::DEFAULT.status(), DEFAULT_ERROR_STATUS);
        assert_eq!(ResultCode::default(), ResultCode::SomethingWentWrong);
    }

    #[test]
    fn test_serialized_shape() {
        let ok: ServiceResult = ServiceResult::ok();
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"success": true, "code": "SUCCESS"})
        );

        let failed: ServiceResult<String> = ServiceResult::something_went_wrong();
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({
                "success": false,
                "code": "SOMETHING_WENT_WRONG",
                "message": "Something went wrong"
            })
        );

        let with_data = ServiceResult::ok_with(vec![1, 2]);
        assert_eq!(
            serde_json::to_value(&with_data).unwrap(),
            json!({"success": true, "code": "SUCCESS", "data": [1, 2]})
        );
    }

    #[test]
    fn test_codes_round_trip_from_wire_names() {
        let code: ResultCode = serde_json::from_str("\"NOT_FOUND\"").unwrap();
        assert_eq!(code, ResultCode::NotFound);
        let code: ResultCode = serde_json::from_str("\"BAD_DATA\"").unwrap();
        assert_eq!(code, ResultCode::BadData);
    }
}
