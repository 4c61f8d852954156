/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (warranty expiry, maintenance target) carry no time zone.
pub type Day = chrono::NaiveDate;
