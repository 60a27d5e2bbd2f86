use chrono::{Local, NaiveDateTime, Utc};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
    /// The current wall clock time of the scheduler, which is what
    /// reminder times are compared against
    fn get_local_datetime(&self) -> NaiveDateTime;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn get_local_datetime(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// System frozen at a fixed local time
pub struct StaticTimeSys {
    pub local: NaiveDateTime,
}
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.local.and_utc().timestamp_millis()
    }

    fn get_local_datetime(&self) -> NaiveDateTime {
        self.local
    }
}
