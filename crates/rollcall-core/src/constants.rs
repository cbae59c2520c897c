/// Storage formats shared with the CMS date fields.
///
/// Date values persist as `Y-m-d\TH:i:s` in UTC; the registration widget
/// and the recurrence options both read and write this shape.
pub const STORAGE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Date-only storage format (`Y-m-d`), used for exception dates.
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Display format for the recurring-time option (`h:i a`, 12-hour).
pub const STORAGE_TIME_FORMAT: &str = "%I:%M %P";

/// Timezone date values are stored in.
pub const STORAGE_TIMEZONE: &str = "UTC";
