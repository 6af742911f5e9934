//! JWT claims model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use boardkit_core::UserId;

/// Claims carried inside every token the server issues.
///
/// Wire names follow the deployed format: `sub` (email), `userId`, `iat`,
/// `exp`. Timestamps are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the principal's email.
    pub sub: String,

    /// Numeric user id of the principal.
    #[serde(rename = "userId")]
    pub user_id: UserId,

    /// Issued-at (Unix seconds).
    pub iat: i64,

    /// Expiry (Unix seconds).
    pub exp: i64,
}

impl Claims {
    /// Expiry as a UTC timestamp.
    ///
    /// `exp` is produced by us from a `DateTime<Utc>`, so this only returns
    /// `None` for a token forged with an out-of-range timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Issued-at as a UTC timestamp.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_deployed_format() {
        let claims = Claims {
            sub: "a@x.com".to_string(),
            user_id: UserId::new(7),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["sub"], "a@x.com");
        assert_eq!(json["userId"], 7);
        assert_eq!(json["iat"], 1_700_000_000i64);
        assert_eq!(json["exp"], 1_700_003_600i64);
    }

    #[test]
    fn timestamps_convert_back_to_utc() {
        let claims = Claims {
            sub: "a@x.com".to_string(),
            user_id: UserId::new(7),
            iat: 0,
            exp: 60,
        };

        let exp = claims.expires_at().unwrap();
        let iat = claims.issued_at().unwrap();
        assert_eq!((exp - iat).num_seconds(), 60);
    }
}
